//! Quantum Teleportation Demo
//!
//! Builds the three-qubit teleportation circuit, runs it on the local
//! statevector simulator, and prints the aggregated outcome counts. The
//! secret state is prepared with a U(θ, φ, λ) rotation; after the protocol
//! the `l2` marginal reproduces the statistics a direct measurement of the
//! secret would give.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bifrost_adapter_sim::SimulatorBackend;
use bifrost_demos::circuits::teleportation::{
    TeleportSettings, direct_measurement_circuit, teleportation_circuit,
};
use bifrost_demos::{print_header, print_info, print_result, print_section, print_success};
use bifrost_hal::{Backend, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "demo-teleport")]
#[command(about = "Quantum teleportation on the Bifrost stack")]
struct Args {
    /// Polar rotation angle θ preparing the secret state, radians
    #[arg(long, default_value = "0.3")]
    theta: f64,

    /// Phase angle φ, radians
    #[arg(long, default_value = "0.2")]
    phi: f64,

    /// Phase angle λ, radians
    #[arg(long, default_value = "0.1")]
    lambda: f64,

    /// Number of shots
    #[arg(short, long, default_value = "1024")]
    shots: u32,

    /// RNG seed for reproducible counts
    #[arg(long)]
    seed: Option<u64>,

    /// Also run the direct-measurement reference circuit
    #[arg(long)]
    compare: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let settings = TeleportSettings {
        theta: args.theta,
        phi: args.phi,
        lambda: args.lambda,
    };

    print_header("Quantum Teleportation");
    println!("  Alice teleports U(θ,φ,λ)|0⟩ to Bob through a Bell pair");
    println!("  and two classical bits.");

    let circuit = teleportation_circuit(&settings).context("building teleportation circuit")?;

    print_section("Circuit");
    print_result("Qubits", circuit.num_qubits());
    print_result("Classical bits", circuit.num_clbits());
    print_result("Operations", circuit.num_ops());
    print_result("Depth", circuit.depth());

    let backend = match args.seed {
        Some(seed) => SimulatorBackend::new().with_seed(seed),
        None => SimulatorBackend::new(),
    };

    let availability = backend.availability().await?;
    if !availability.is_available {
        bail!(
            "backend '{}' is unavailable: {}",
            backend.name(),
            availability.status_message.unwrap_or_default()
        );
    }

    let validation = backend.validate(&circuit).await?;
    if !validation.is_valid() {
        bail!("backend rejected the circuit: {validation:?}");
    }

    let config = RunConfig::with_shots(args.shots)
        .with_initial_layout(RunConfig::identity_layout(circuit.num_qubits() as u32));

    info!(backend = backend.name(), shots = config.shots, "submitting job");
    let job_id = backend
        .submit(&circuit, &config)
        .await
        .context("submitting teleportation circuit")?;
    let result = backend
        .wait(&job_id)
        .await
        .context("waiting for execution result")?;

    print_section("Counts (l2 l1 l0)");
    println!("  {}", result.counts);
    if let Some(millis) = result.execution_time_ms {
        print_result("Execution time", format!("{millis} ms"));
    }

    let teleported = result.counts.probability_of_one(2);
    let expected = settings.expected_one_probability();

    print_section("Teleported bit (l2)");
    print_result("P(l2 = 1) observed", format!("{teleported:.4}"));
    print_result("P(1) expected sin²(θ/2)", format!("{expected:.4}"));

    if args.compare {
        let reference = direct_measurement_circuit(&settings)?;
        let ref_config = RunConfig::with_shots(args.shots);
        let ref_job = backend.submit(&reference, &ref_config).await?;
        let ref_result = backend.wait(&ref_job).await?;

        print_section("Direct measurement reference");
        println!("  {}", ref_result.counts);
        print_result(
            "P(1) observed",
            format!("{:.4}", ref_result.counts.probability_of_one(0)),
        );
    }

    println!();
    print_success("Teleportation run complete");
    print_info("The secret state never crossed a quantum channel; only");
    println!("  Alice's two measured bits did.");
    Ok(())
}
