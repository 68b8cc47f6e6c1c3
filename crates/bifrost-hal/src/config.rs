//! Run configuration for circuit execution.

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Default number of shots per run.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Configuration for a single execution run.
///
/// Per-run parameters are explicit fields rather than embedded constants,
/// with documented defaults: 1024 shots, no connectivity restriction,
/// identity layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of shots to execute. Must be positive.
    pub shots: u32,
    /// Logical-to-physical qubit assignment as `(logical, physical)` pairs.
    /// `None` means the identity mapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_layout: Option<Vec<(u32, u32)>>,
    /// Hardware connectivity constraint as undirected qubit pairs.
    /// `None` means all-to-all (no restriction), which is always the case
    /// for pure simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_map: Option<Vec<(u32, u32)>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            initial_layout: None,
            coupling_map: None,
        }
    }
}

impl RunConfig {
    /// Create a configuration with the given shot count and all other
    /// fields at their defaults.
    pub fn with_shots(shots: u32) -> Self {
        Self {
            shots,
            ..Self::default()
        }
    }

    /// Set an explicit initial layout.
    #[must_use]
    pub fn with_initial_layout(mut self, layout: Vec<(u32, u32)>) -> Self {
        self.initial_layout = Some(layout);
        self
    }

    /// Set a coupling map.
    #[must_use]
    pub fn with_coupling_map(mut self, coupling: Vec<(u32, u32)>) -> Self {
        self.coupling_map = Some(coupling);
        self
    }

    /// The identity layout over `n` qubits, for callers that want it
    /// spelled out rather than implied by `None`.
    pub fn identity_layout(n: u32) -> Vec<(u32, u32)> {
        (0..n).map(|i| (i, i)).collect()
    }

    /// Resolve the layout to a physical index per logical qubit.
    ///
    /// Checks that the layout, when present, is a bijection between the
    /// `num_qubits` logical qubits and as many physical slots.
    pub fn resolve_layout(&self, num_qubits: u32) -> HalResult<Vec<u32>> {
        let Some(layout) = &self.initial_layout else {
            return Ok((0..num_qubits).collect());
        };

        if layout.len() != num_qubits as usize {
            return Err(HalError::Configuration(format!(
                "initial layout maps {} qubits, circuit has {}",
                layout.len(),
                num_qubits
            )));
        }

        let mut physical = vec![None; num_qubits as usize];
        for &(logical, phys) in layout {
            if logical >= num_qubits || phys >= num_qubits {
                return Err(HalError::Configuration(format!(
                    "initial layout entry ({logical} -> {phys}) is out of range"
                )));
            }
            let slot = &mut physical[logical as usize];
            if slot.is_some() {
                return Err(HalError::Configuration(format!(
                    "initial layout maps logical qubit {logical} twice"
                )));
            }
            *slot = Some(phys);
        }

        let resolved: Vec<u32> = physical
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| {
                    HalError::Configuration(
                        "initial layout does not cover every logical qubit".into(),
                    )
                })
            })
            .collect::<HalResult<_>>()?;
        let mut seen = vec![false; num_qubits as usize];
        for &phys in &resolved {
            if seen[phys as usize] {
                return Err(HalError::Configuration(format!(
                    "initial layout maps physical qubit {phys} twice"
                )));
            }
            seen[phys as usize] = true;
        }
        Ok(resolved)
    }
}
