//! Bifrost Hardware Abstraction Layer
//!
//! This crate provides a unified interface between circuit construction and
//! circuit execution, so the teleportation demo (and anything else built on
//! `bifrost-ir`) can run against any execution service that implements the
//! [`Backend`] trait.
//!
//! # Overview
//!
//! The HAL abstracts away backend-specific details, providing:
//! - A common [`Backend`] trait for job submission and management
//! - [`RunConfig`] for per-run parameters (shots, layout, coupling)
//! - [`Capabilities`] to describe backend features and constraints
//! - Unified result handling via [`ExecutionResult`] and [`Counts`]
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use bifrost_hal::{Backend, RunConfig};
//! use bifrost_adapter_sim::SimulatorBackend;
//! use bifrost_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let circuit = Circuit::bell()?;
//!     let backend = SimulatorBackend::new();
//!
//!     let job_id = backend.submit(&circuit, &RunConfig::default()).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("Results: {}", result.counts);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Custom Backend
//!
//! ```ignore
//! use bifrost_hal::{
//!     Backend, BackendAvailability, Capabilities, RunConfig, ValidationResult,
//!     JobId, JobStatus, ExecutionResult, HalResult,
//! };
//! use bifrost_ir::Circuit;
//! use async_trait::async_trait;
//!
//! struct MyBackend {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Backend for MyBackend {
//!     fn name(&self) -> &str { "my_backend" }
//!
//!     // Sync, infallible — capabilities cached at construction.
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<BackendAvailability> {
//!         Ok(BackendAvailability::always_available())
//!     }
//!
//!     async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
//!         Ok(ValidationResult::Valid)
//!     }
//!
//!     async fn submit(&self, circuit: &Circuit, config: &RunConfig) -> HalResult<JobId> {
//!         # todo!()
//!     }
//!
//!     async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
//!         # todo!()
//!     }
//!
//!     async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
//!         # todo!()
//!     }
//!
//!     async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
//!         # todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod capability;
pub mod config;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, BackendConfig, BackendFactory, ValidationResult};
pub use capability::{Capabilities, GateSet, Topology, TopologyKind};
pub use config::{DEFAULT_SHOTS, RunConfig};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
