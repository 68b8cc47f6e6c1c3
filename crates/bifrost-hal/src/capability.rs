//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// What a backend can do, cached at construction time.
///
/// `validate()` implementations check circuits against this so malformed
/// submissions fail with a diagnostic instead of an opaque rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Qubit connectivity topology. All edges are bidirectional.
    pub topology: Topology,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) vs real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags: `"statevector"`,
    /// `"mid_circuit_measurement"`, `"conditional_gates"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a local statevector simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::standard(),
            topology: Topology::full(num_qubits),
            max_shots: 100_000,
            is_simulator: true,
            features: vec![
                "statevector".into(),
                "mid_circuit_measurement".into(),
                "conditional_gates".into(),
            ],
        }
    }

    /// Check whether a gate name is in the supported set.
    pub fn supports_gate(&self, name: &str) -> bool {
        self.gate_set.contains(name)
    }

    /// Check whether a capability flag is present.
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    /// Check whether classically conditioned gates can execute here.
    pub fn supports_conditional(&self) -> bool {
        self.has_feature("conditional_gates")
    }
}

/// The gates a backend accepts, by OpenQASM-style name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Two-qubit gates supported.
    pub two_qubit: Vec<String>,
}

impl GateSet {
    /// The full standard gate alphabet of the IR.
    pub fn standard() -> Self {
        Self {
            single_qubit: vec![
                "id".into(),
                "x".into(),
                "y".into(),
                "z".into(),
                "h".into(),
                "s".into(),
                "sdg".into(),
                "t".into(),
                "tdg".into(),
                "rx".into(),
                "ry".into(),
                "rz".into(),
                "p".into(),
                "u".into(),
            ],
            two_qubit: vec!["cx".into(), "cy".into(), "cz".into(), "swap".into()],
        }
    }

    /// Check whether a gate name is in this set.
    pub fn contains(&self, name: &str) -> bool {
        self.single_qubit.iter().any(|g| g == name) || self.two_qubit.iter().any(|g| g == name)
    }
}

/// Qubit connectivity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topology {
    /// Kind of topology.
    pub kind: TopologyKind,
    /// Coupling edges (pairs of connected qubits). Bidirectional.
    pub edges: Vec<(u32, u32)>,
}

impl Topology {
    /// Create a fully connected topology (all-to-all).
    pub fn full(n: u32) -> Self {
        let mut edges = vec![];
        for i in 0..n {
            for j in (i + 1)..n {
                edges.push((i, j));
            }
        }
        Self {
            kind: TopologyKind::FullyConnected,
            edges,
        }
    }

    /// Create a linear topology.
    pub fn linear(n: u32) -> Self {
        let edges: Vec<_> = (0..n.saturating_sub(1)).map(|i| (i, i + 1)).collect();
        Self {
            kind: TopologyKind::Linear,
            edges,
        }
    }

    /// Create a custom topology from explicit edges.
    pub fn custom(edges: Vec<(u32, u32)>) -> Self {
        Self {
            kind: TopologyKind::Custom,
            edges,
        }
    }

    /// Check whether two qubits are coupled.
    pub fn allows(&self, a: u32, b: u32) -> bool {
        matches!(self.kind, TopologyKind::FullyConnected)
            || self
                .edges
                .iter()
                .any(|&(x, y)| (x, y) == (a, b) || (y, x) == (a, b))
    }
}

/// Kind of topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopologyKind {
    /// Fully connected (all-to-all).
    FullyConnected,
    /// Linear chain.
    Linear,
    /// Custom topology.
    Custom,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(20);
        assert!(caps.is_simulator);
        assert_eq!(caps.num_qubits, 20);
        assert!(caps.supports_gate("u"));
        assert!(caps.supports_gate("cx"));
        assert!(!caps.supports_gate("ccx"));
        assert!(caps.supports_conditional());
        assert!(caps.has_feature("mid_circuit_measurement"));
    }

    #[test]
    fn test_full_topology_allows_everything() {
        let topo = Topology::full(3);
        assert_eq!(topo.edges.len(), 3);
        assert!(topo.allows(0, 2));
        assert!(topo.allows(2, 0));
    }

    #[test]
    fn test_linear_topology() {
        let topo = Topology::linear(3);
        assert!(topo.allows(0, 1));
        assert!(topo.allows(1, 2));
        assert!(!topo.allows(0, 2));
    }
}
