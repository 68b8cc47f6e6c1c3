//! Bifrost Local Simulator Backend
//!
//! This crate provides a local statevector simulator implementing the
//! [`bifrost_hal::Backend`] trait. It is the default execution service for
//! the teleportation demo: per-shot statevector propagation with projective
//! mid-circuit measurement and classically conditioned gate evaluation.
//!
//! # Example
//!
//! ```ignore
//! use bifrost_adapter_sim::SimulatorBackend;
//! use bifrost_hal::{Backend, RunConfig};
//! use bifrost_ir::Circuit;
//!
//! let backend = SimulatorBackend::new().with_seed(42);
//! let circuit = Circuit::bell()?;
//! let job_id = backend.submit(&circuit, &RunConfig::default()).await?;
//! let result = backend.wait(&job_id).await?;
//! println!("{}", result.counts);
//! ```

pub mod simulator;
pub mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
