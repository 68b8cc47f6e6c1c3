//! Quantum teleportation circuit generator.
//!
//! Teleportation transfers the state of one qubit to another qubit through
//! a shared entangled pair and two classical bits; no quantum channel
//! carries the state itself (Gottesman & Chuang, arXiv:quant-ph/9908010).
//!
//! The three wires:
//!
//! ```text
//!   q[0]  secret ──U(θ,φ,λ)──────●──H──M──────────────  → l0
//!   q[1]  Alice  ──H──●──────────X─────M──────────────  → l1
//!   q[2]  Bob    ─────X──────────────────Z?────X?───M─  → l2
//! ```
//!
//! Alice holds the secret and one half of a Bell pair; Bob holds the other
//! half. After Alice's Bell-basis measurement, her two classical bits tell
//! Bob which of four corrections (I, Z, X, ZX) recovers the secret on his
//! qubit. That is the classical-communication step, expressed here as two
//! conditioned gates.

use bifrost_ir::{Circuit, IrResult};

/// Parameters of a teleportation run.
///
/// The three angles feed the U(θ, φ, λ) rotation that prepares the secret
/// state from |0⟩. Defaults pick a state close to |0⟩ with nontrivial
/// phases, so a run is visibly probabilistic without drowning the signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportSettings {
    /// Polar rotation angle θ, radians.
    pub theta: f64,
    /// Phase angle φ, radians.
    pub phi: f64,
    /// Phase angle λ, radians.
    pub lambda: f64,
}

impl Default for TeleportSettings {
    fn default() -> Self {
        Self {
            theta: 0.3,
            phi: 0.2,
            lambda: 0.1,
        }
    }
}

impl TeleportSettings {
    /// Settings that leave the secret in |0⟩ (the identity rotation).
    pub fn identity() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            lambda: 0.0,
        }
    }

    /// The probability that a direct measurement of the prepared secret
    /// reads 1: sin²(θ/2).
    ///
    /// Teleportation preserves measurement statistics, so the `l2` marginal
    /// of a teleportation run converges on this same value.
    pub fn expected_one_probability(&self) -> f64 {
        (self.theta / 2.0).sin().powi(2)
    }
}

/// Generate the three-qubit teleportation circuit.
///
/// Registers: quantum `q[0..3]`, classical `l0`, `l1`, `l2` (one bit each).
/// Outcome keys read `l2 l1 l0`; the leading character is the teleported
/// bit.
pub fn teleportation_circuit(settings: &TeleportSettings) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("teleportation");
    let q = circuit.add_qreg("q", 3);
    let l0 = circuit.add_creg("l0", 1)[0];
    let l1 = circuit.add_creg("l1", 1)[0];
    let l2 = circuit.add_creg("l2", 1)[0];

    // Prepare the secret state on q0.
    circuit.u(settings.theta, settings.phi, settings.lambda, q[0])?;

    // Bell pair between Alice (q1) and Bob (q2).
    circuit.h(q[1])?;
    circuit.cx(q[1], q[2])?;

    // Keep preparation and protocol from being fused by an optimizing
    // backend.
    circuit.barrier_all()?;

    // Alice's Bell-basis measurement of secret + her pair half.
    circuit.cx(q[0], q[1])?;
    circuit.h(q[0])?;
    circuit.measure(q[0], l0)?;
    circuit.measure(q[1], l1)?;

    circuit.barrier_all()?;

    // Bob's correction, driven by Alice's two classical bits.
    circuit.z_if(q[2], l0, true)?;
    circuit.x_if(q[2], l1, true)?;

    circuit.measure(q[2], l2)?;

    Ok(circuit)
}

/// Generate the reference circuit: prepare the same secret state and
/// measure it directly, no teleportation.
///
/// Its one-bit distribution is what the `l2` marginal of
/// [`teleportation_circuit`] must reproduce.
pub fn direct_measurement_circuit(settings: &TeleportSettings) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("direct_measurement");
    let q = circuit.add_qreg("q", 1);
    let c = circuit.add_creg("c", 1)[0];

    circuit.u(settings.theta, settings.phi, settings.lambda, q[0])?;
    circuit.measure(q[0], c)?;

    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_shape() {
        let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 3);

        let registers: Vec<_> = circuit
            .clbits()
            .iter()
            .filter_map(|c| c.register.as_deref())
            .collect();
        assert_eq!(registers, vec!["l0", "l1", "l2"]);
    }

    #[test]
    fn test_construction_never_errors() {
        // Any angle assignment builds; the structure does not depend on
        // parameter values.
        for theta in [-3.0, 0.0, 0.3, 7.5] {
            let settings = TeleportSettings {
                theta,
                phi: theta / 2.0,
                lambda: -theta,
            };
            assert!(teleportation_circuit(&settings).is_ok());
        }
    }

    #[test]
    fn test_conditionals_follow_their_measurements() {
        let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();

        let instructions = circuit.instructions();
        for (pos, inst) in instructions.iter().enumerate() {
            if let Some(condition) = inst.condition() {
                let assigned_before = instructions[..pos]
                    .iter()
                    .any(|prior| prior.is_measure() && prior.clbits.contains(&condition.clbit));
                assert!(
                    assigned_before,
                    "condition at {pos} reads a bit measured later"
                );
            }
        }
    }

    #[test]
    fn test_two_corrections_two_barriers() {
        let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();

        let conditionals = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_conditional())
            .count();
        let barriers = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_barrier())
            .count();
        let measures = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .count();

        assert_eq!(conditionals, 2);
        assert_eq!(barriers, 2);
        assert_eq!(measures, 3);
    }

    #[test]
    fn test_expected_probability() {
        let settings = TeleportSettings::default();
        let expected = (0.15_f64).sin().powi(2);
        assert!((settings.expected_one_probability() - expected).abs() < 1e-12);

        assert_eq!(TeleportSettings::identity().expected_one_probability(), 0.0);
    }

    #[test]
    fn test_direct_circuit_shape() {
        let circuit = direct_measurement_circuit(&TeleportSettings::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(circuit.num_ops(), 2);
    }
}
