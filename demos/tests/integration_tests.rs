//! Integration tests for the teleportation demo.
//!
//! These run the full stack, circuit construction through the local
//! simulator backend, with seeded RNGs for reproducible statistics.

use bifrost_adapter_sim::SimulatorBackend;
use bifrost_demos::circuits::teleportation::{
    TeleportSettings, direct_measurement_circuit, teleportation_circuit,
};
use bifrost_hal::{Backend, ExecutionResult, RunConfig};
use bifrost_ir::Circuit;

const SHOTS: u32 = 1024;

async fn run(circuit: &Circuit, seed: u64, shots: u32) -> ExecutionResult {
    let backend = SimulatorBackend::new().with_seed(seed);
    let job_id = backend
        .submit(circuit, &RunConfig::with_shots(shots))
        .await
        .expect("submit failed");
    backend.wait(&job_id).await.expect("execution failed")
}

/// Every conditioned operation appears strictly after the measurement that
/// assigns the bit it reads.
#[test]
fn test_structural_validity() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();
    let instructions = circuit.instructions();

    for (pos, inst) in instructions.iter().enumerate() {
        if let Some(condition) = inst.condition() {
            assert!(
                instructions[..pos]
                    .iter()
                    .any(|prior| prior.is_measure() && prior.clbits.contains(&condition.clbit)),
                "conditioned op at {pos} precedes its measurement"
            );
        }
    }
}

/// The quantum register has exactly 3 slots and each classical register one
/// bit; building the circuit never errors.
#[test]
fn test_register_sizing() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();

    assert_eq!(circuit.num_qubits(), 3);
    assert_eq!(circuit.num_clbits(), 3);
    for clbit in circuit.clbits() {
        assert_eq!(clbit.index, Some(0), "classical registers are one bit each");
    }
}

/// Outcome counts sum exactly to the configured shot count.
#[tokio::test]
async fn test_count_conservation() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();
    let result = run(&circuit, 1, SHOTS).await;

    assert_eq!(result.shots, SHOTS);
    assert_eq!(result.counts.total(), u64::from(SHOTS));
    assert!(result.is_complete());
}

/// Every outcome key is a 3-character string over {'0','1'}, ordered
/// (l2 l1 l0).
#[tokio::test]
async fn test_outcome_space() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();
    let result = run(&circuit, 2, SHOTS).await;

    assert!(!result.counts.is_empty());
    for (key, count) in result.counts.iter() {
        assert_eq!(key.len(), 3, "key '{key}' is not 3 characters");
        assert!(
            key.chars().all(|c| c == '0' || c == '1'),
            "key '{key}' has characters outside {{'0','1'}}"
        );
        assert!(count > 0);
    }
}

/// The l2 marginal of teleportation matches the distribution of directly
/// measuring the same prepared secret, within sampling tolerance.
#[tokio::test]
async fn test_teleportation_fidelity() {
    let settings = TeleportSettings::default();
    let shots = 4096;

    let teleport = teleportation_circuit(&settings).unwrap();
    let direct = direct_measurement_circuit(&settings).unwrap();

    let teleport_result = run(&teleport, 3, shots).await;
    let direct_result = run(&direct, 4, shots).await;

    let p_teleport = teleport_result.counts.probability_of_one(2);
    let p_direct = direct_result.counts.probability_of_one(0);
    let p_exact = settings.expected_one_probability();

    // sin²(0.15) ≈ 0.0223; at 4096 shots the standard error is ≈ 0.0023,
    // so a 0.02 tolerance sits far outside sampling noise.
    assert!(
        (p_teleport - p_exact).abs() < 0.02,
        "teleported marginal {p_teleport} deviates from exact {p_exact}"
    );
    assert!(
        (p_teleport - p_direct).abs() < 0.02,
        "teleported marginal {p_teleport} deviates from direct {p_direct}"
    );
}

/// With the identity rotation the teleported bit is 0 on every shot.
#[tokio::test]
async fn test_degenerate_identity_rotation() {
    let circuit = teleportation_circuit(&TeleportSettings::identity()).unwrap();
    let result = run(&circuit, 5, SHOTS).await;

    assert_eq!(result.counts.probability_of_one(2), 0.0);
    // The Bell-measurement bits still take all four values; only l2 is
    // pinned. Confirm every observed key leads with '0'.
    for (key, _) in result.counts.iter() {
        assert!(key.starts_with('0'), "unexpected teleported 1 in '{key}'");
    }
}

/// Seeded backends make whole runs reproducible end to end.
#[tokio::test]
async fn test_seeded_replay() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();

    let first = run(&circuit, 99, SHOTS).await;
    let second = run(&circuit, 99, SHOTS).await;

    assert_eq!(first.counts, second.counts);
}

/// The simulator accepts the teleportation circuit as-is.
#[tokio::test]
async fn test_backend_validation() {
    let circuit = teleportation_circuit(&TeleportSettings::default()).unwrap();
    let backend = SimulatorBackend::new();

    assert!(backend.validate(&circuit).await.unwrap().is_valid());
    assert!(backend.availability().await.unwrap().is_available);
}
