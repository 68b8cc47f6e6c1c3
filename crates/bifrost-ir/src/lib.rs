//! Bifrost Circuit Intermediate Representation
//!
//! This crate provides the core data structures for representing quantum
//! circuits in Bifrost: typed quantum and classical registers, a standard
//! gate vocabulary, and an ordered instruction sequence with build-time
//! structural validation.
//!
//! # Overview
//!
//! A [`Circuit`] is an append-only sequence of [`Instruction`]s. Every
//! append is validated: index ranges, gate arity, duplicate operands,
//! write-once classical bits, and the rule that a classically conditioned
//! gate may only follow the measurement that assigns its bit. Anything that
//! builds is safe to hand to an execution backend.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`] for addressing
//!   quantum and classical registers
//! - **Gates**: [`StandardGate`] for built-in gates (H, X, CX, U, …) and
//!   [`ClassicalCondition`] for classically conditioned application
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Measurement-Conditioned Correction
//!
//! ```rust
//! use bifrost_ir::Circuit;
//!
//! let mut circuit = Circuit::new("correction");
//! let q = circuit.add_qreg("q", 2);
//! let c = circuit.add_creg("c", 1);
//!
//! circuit.h(q[0]).unwrap();
//! circuit.measure(q[0], c[0]).unwrap();
//! // Bit-flip q1 only when the measured bit came out 1.
//! circuit.x_if(q[1], c[0], true).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.instructions().last().unwrap().is_conditional());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `U` | 1 | Universal single-qubit gate U(θ,φ,λ) |
//! | `CX`, `CY`, `CZ` | 2 | Controlled Pauli gates |
//! | `Swap` | 2 | SWAP gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, Gate, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
