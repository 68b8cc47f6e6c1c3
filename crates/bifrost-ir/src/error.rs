//! Error types for the IR crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit.
///
/// All of these are structural: they are raised when an operation is
/// appended, so a malformed circuit fails at build time rather than as an
/// opaque backend rejection.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit:?} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit:?} not found in circuit{}", format_gate_context(.gate_name))]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in operation (e.g. a self-targeting CNOT).
    #[error("Duplicate qubit {qubit:?} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Measurement targets a classical bit that already holds an outcome.
    ///
    /// Classical bits are write-once per run; re-measurement without an
    /// intervening re-initialization is rejected at build time.
    #[error("Classical bit {clbit:?} already assigned by an earlier measurement")]
    ClbitAlreadyAssigned {
        /// The classical bit that is already assigned.
        clbit: ClbitId,
    },

    /// Conditioned gate reads a classical bit no prior measurement assigns.
    #[error(
        "Classical bit {clbit:?} read by a condition before any measurement assigns it{}",
        format_gate_context(.gate_name)
    )]
    ClbitNotAssigned {
        /// The classical bit the condition reads.
        clbit: ClbitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
