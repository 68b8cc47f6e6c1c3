//! Simulator backend implementation.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use bifrost_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, RunConfig, ValidationResult,
};
use bifrost_ir::{Circuit, InstructionKind};

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local statevector simulator backend.
///
/// Executes each shot by walking the instruction sequence in order: gates
/// propagate the statevector, measurements collapse it and record a
/// classical bit, and classically conditioned gates consult the recorded
/// bits before applying. Barriers are honored trivially since the
/// simulator never reorders.
///
/// Supports circuits up to ~20 qubits (limited by memory).
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Capabilities, cached at construction.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Optional RNG seed for reproducible runs.
    seed: Option<u64>,
}

impl SimulatorBackend {
    const DEFAULT_MAX_QUBITS: u32 = 20;

    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(Self::DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed: None,
        }
    }

    /// Fix the RNG seed so repeated runs reproduce the same counts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Run all shots synchronously.
    #[instrument(skip(self, circuit, config))]
    fn run_shots(&self, circuit: &Circuit, config: &RunConfig) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        debug!(num_qubits, num_clbits, shots = config.shots, "starting simulation");

        // Identity unless the caller asked otherwise; with no connectivity
        // restriction the layout only relabels statevector indices.
        let layout = config.resolve_layout(num_qubits as u32)?;

        let mut rng = self.make_rng();
        let mut counts = Counts::new();

        for _ in 0..config.shots {
            let outcome = self.run_single_shot(circuit, &layout, &mut rng);
            counts.insert(outcome, 1);
        }

        let elapsed = start.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "simulation completed");

        Ok(ExecutionResult::new(counts, config.shots)
            .with_execution_time(elapsed.as_millis() as u64)
            .with_backend(self.name()))
    }

    /// Execute one shot and return its outcome key.
    fn run_single_shot<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        layout: &[u32],
        rng: &mut R,
    ) -> String {
        let mut sv = Statevector::new(circuit.num_qubits());
        let mut classical_bits = vec![false; circuit.num_clbits()];

        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    if let Some(cond) = &gate.condition {
                        if classical_bits[cond.clbit.0 as usize] != cond.value {
                            continue;
                        }
                    }
                    let qubits: Vec<usize> = inst
                        .qubits
                        .iter()
                        .map(|q| layout[q.0 as usize] as usize)
                        .collect();
                    sv.apply_gate(&gate.kind, &qubits);
                }
                InstructionKind::Measure => {
                    for (q, c) in inst.qubits.iter().zip(&inst.clbits) {
                        let bit = sv.measure(layout[q.0 as usize] as usize, rng);
                        classical_bits[c.0 as usize] = bit;
                    }
                }
                InstructionKind::Barrier => {}
            }
        }

        // Highest clbit index leftmost, matching the documented key order.
        classical_bits
            .iter()
            .rev()
            .map(|&bit| if bit { '1' } else { '0' })
            .collect()
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let caps = &self.capabilities;
        let mut reasons = vec![];

        if circuit.num_qubits() > caps.num_qubits as usize {
            reasons.push(format!(
                "circuit has {} qubits but backend supports {}",
                circuit.num_qubits(),
                caps.num_qubits
            ));
        }

        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if !caps.supports_gate(gate.name()) {
                    reasons.push(format!("gate '{}' is not supported", gate.name()));
                }
                if gate.is_conditional() && !caps.supports_conditional() {
                    reasons.push("classically conditioned gates are not supported".into());
                }
            }
        }

        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            reasons.sort();
            reasons.dedup();
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit, config))]
    async fn submit(&self, circuit: &Circuit, config: &RunConfig) -> HalResult<JobId> {
        if config.shots == 0 {
            return Err(HalError::InvalidShots("shot count must be positive".into()));
        }
        if config.shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{} shots exceeds backend maximum {}",
                config.shots, self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), config.shots).with_backend(self.name());

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }

        debug!(%job_id, "submitted job");

        // Shots run synchronously; the job is terminal by the time the
        // caller can poll it.
        let outcome = self.run_shots(circuit, config);

        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(sim_job) = jobs.get_mut(&job_id.0) {
                match outcome {
                    Ok(result) => {
                        sim_job.result = Some(result);
                        sim_job.job = sim_job.job.clone().with_status(JobStatus::Completed);
                    }
                    Err(err) => {
                        sim_job.job = sim_job
                            .job
                            .clone()
                            .with_status(JobStatus::Failed(err.to_string()));
                    }
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .and_then(|j| j.result.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            if !sim_job.job.status.is_terminal() {
                sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
            }
            Ok(())
        } else {
            Err(HalError::JobNotFound(job_id.0.clone()))
        }
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::Value::as_u64)
            .map_or(Self::DEFAULT_MAX_QUBITS, |v| v as u32);
        let seed = config.extra.get("seed").and_then(serde_json::Value::as_u64);

        Ok(Self {
            capabilities: Capabilities::simulator(max_qubits),
            config,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed,
        })
    }
}
