//! Property-based tests for the circuit builder.
//!
//! Verifies that any sequence of structurally valid operations builds, and
//! that the builder's invariants hold for whatever sequence comes out.

use bifrost_ir::{Circuit, ClbitId, QubitId};
use proptest::prelude::*;

/// Operations the generator can append to a circuit.
#[derive(Debug, Clone)]
enum BuilderOp {
    H(u32),
    X(u32),
    Z(u32),
    U(u32, f64, f64, f64),
    CX(u32, u32),
    Barrier,
}

impl BuilderOp {
    fn apply(&self, circuit: &mut Circuit) {
        match *self {
            BuilderOp::H(q) => {
                circuit.h(QubitId(q)).unwrap();
            }
            BuilderOp::X(q) => {
                circuit.x(QubitId(q)).unwrap();
            }
            BuilderOp::Z(q) => {
                circuit.z(QubitId(q)).unwrap();
            }
            BuilderOp::U(q, theta, phi, lambda) => {
                circuit.u(theta, phi, lambda, QubitId(q)).unwrap();
            }
            BuilderOp::CX(c, t) => {
                circuit.cx(QubitId(c), QubitId(t)).unwrap();
            }
            BuilderOp::Barrier => {
                circuit.barrier_all().unwrap();
            }
        }
    }
}

/// Generate a random valid operation for a circuit with `num_qubits` qubits.
fn arb_builder_op(num_qubits: u32) -> impl Strategy<Value = BuilderOp> {
    let angle = -10.0_f64..10.0;
    prop_oneof![
        (0..num_qubits).prop_map(BuilderOp::H),
        (0..num_qubits).prop_map(BuilderOp::X),
        (0..num_qubits).prop_map(BuilderOp::Z),
        (0..num_qubits, angle.clone(), angle.clone(), angle)
            .prop_map(|(q, t, p, l)| BuilderOp::U(q, t, p, l)),
        (0..num_qubits, 0..num_qubits)
            .prop_filter("Control and target must differ", |(c, t)| c != t)
            .prop_map(|(c, t)| BuilderOp::CX(c, t)),
        Just(BuilderOp::Barrier),
    ]
}

/// Generate a circuit from a random valid operation sequence.
fn arb_circuit() -> impl Strategy<Value = (Circuit, usize)> {
    (2_u32..=5).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_builder_op(num_qubits), 1..=20).prop_map(move |ops| {
            let mut circuit = Circuit::with_size("prop", num_qubits, num_qubits);
            for op in &ops {
                op.apply(&mut circuit);
            }
            (circuit, ops.len())
        })
    })
}

proptest! {
    /// Every valid operation sequence builds, in order, with nothing lost.
    #[test]
    fn test_valid_sequences_always_build((circuit, num_ops) in arb_circuit()) {
        prop_assert_eq!(circuit.num_ops(), num_ops);
        // Depth never exceeds the number of non-barrier operations.
        let gate_ops = circuit.instructions().iter().filter(|i| !i.is_barrier()).count();
        prop_assert!(circuit.depth() <= gate_ops);
    }

    /// A condition on an unassigned bit is rejected no matter what valid
    /// prefix precedes it.
    #[test]
    fn test_unassigned_condition_rejected((mut circuit, _) in arb_circuit()) {
        let clbit = ClbitId(0);
        prop_assert!(!circuit.is_assigned(clbit));
        prop_assert!(circuit.z_if(QubitId(0), clbit, true).is_err());
    }

    /// After a measurement assigns the bit, the same condition is accepted,
    /// and the conditioned gate sits strictly after the measurement.
    #[test]
    fn test_condition_after_measurement_accepted((mut circuit, _) in arb_circuit()) {
        let clbit = ClbitId(0);
        circuit.measure(QubitId(0), clbit).unwrap();
        circuit.z_if(QubitId(1), clbit, true).unwrap();

        let measure_pos = circuit
            .instructions()
            .iter()
            .position(|i| i.is_measure())
            .unwrap();
        let conditional_pos = circuit
            .instructions()
            .iter()
            .position(|i| i.is_conditional())
            .unwrap();
        prop_assert!(conditional_pos > measure_pos);
    }
}
