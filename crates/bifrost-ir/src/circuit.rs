//! High-level circuit builder API.

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::gate::{ClassicalCondition, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Clbit, ClbitId, Qubit, QubitId};

/// A quantum circuit.
///
/// An ordered sequence of instructions over typed quantum and classical
/// registers. Operations execute in append order; all structural
/// preconditions (index validity, gate arity, write-once classical bits,
/// condition-after-measurement ordering) are checked when an instruction is
/// appended, so a malformed circuit never reaches a backend.
///
/// Once built, a circuit is handed off whole: it is `Clone + Send + Sync`
/// and backends treat it as immutable.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<Qubit>,
    /// Classical bits in the circuit.
    clbits: Vec<Clbit>,
    /// The instruction sequence, in execution order.
    instructions: Vec<Instruction>,
    /// Classical bits assigned by a measurement appended so far.
    assigned: FxHashSet<ClbitId>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            clbits: vec![],
            instructions: vec![],
            assigned: FxHashSet::default(),
        }
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        for _ in 0..num_clbits {
            circuit.add_clbit();
        }
        circuit
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.qubits.len() as u32);
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = QubitId(self.qubits.len() as u32);
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbits.len() as u32);
        self.clbits.push(Clbit::new(id));
        id
    }

    /// Add a classical register with multiple bits.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> Vec<ClbitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = ClbitId(self.clbits.len() as u32);
            self.clbits.push(Clbit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    /// Append an instruction, checking every structural precondition.
    ///
    /// This is the single choke point the convenience methods funnel
    /// through; anything that passes here is safe to hand to a backend.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        let gate_name = instruction
            .as_gate()
            .map(|gate| gate.name().to_string());

        // Gate arity must match the operand count.
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        // Every referenced qubit must exist.
        for &qubit in &instruction.qubits {
            if qubit.0 as usize >= self.qubits.len() {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        // Every referenced classical bit must exist.
        for &clbit in &instruction.clbits {
            if clbit.0 as usize >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        // No qubit may appear twice in one operation (self-targeting CNOT).
        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        // A condition may only read a bit an earlier measurement assigned.
        if let Some(condition) = instruction.condition() {
            if condition.clbit.0 as usize >= self.clbits.len() {
                return Err(IrError::ClbitNotFound {
                    clbit: condition.clbit,
                    gate_name: gate_name.clone(),
                });
            }
            if !self.assigned.contains(&condition.clbit) {
                return Err(IrError::ClbitNotAssigned {
                    clbit: condition.clbit,
                    gate_name,
                });
            }
        }

        // Classical bits are write-once per run. Check before recording so
        // a rejected instruction leaves no trace.
        if instruction.is_measure() {
            for &clbit in &instruction.clbits {
                if self.assigned.contains(&clbit) {
                    return Err(IrError::ClbitAlreadyAssigned { clbit });
                }
            }
            self.assigned.extend(instruction.clbits.iter().copied());
        }

        self.instructions.push(instruction);
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Y, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Tdg, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))?;
        Ok(self)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))?;
        Ok(self)
    }

    /// Apply universal U gate, parameterized by three angles in radians.
    ///
    /// U(θ, φ, λ)|0⟩ = cos(θ/2)|0⟩ + e^{iφ} sin(θ/2)|1⟩; this is how the
    /// teleportation demo prepares its secret state.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::U(theta, phi, lambda),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))?;
        Ok(self)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CY, control, target))?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))?;
        Ok(self)
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))?;
        Ok(self)
    }

    // =========================================================================
    // Conditioned gates
    // =========================================================================

    /// Apply a single-qubit gate conditioned on a classical bit.
    ///
    /// The gate runs only if, at execution time, `condition.clbit` holds
    /// `condition.value`. The referenced bit must already be assigned by an
    /// earlier measurement in this circuit.
    pub fn gate_if(
        &mut self,
        gate: StandardGate,
        qubit: QubitId,
        condition: ClassicalCondition,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::conditional_gate(gate, qubit, condition))?;
        Ok(self)
    }

    /// Apply Pauli-X conditioned on a classical bit holding `value`.
    pub fn x_if(&mut self, qubit: QubitId, clbit: ClbitId, value: bool) -> IrResult<&mut Self> {
        self.gate_if(StandardGate::X, qubit, ClassicalCondition::new(clbit, value))
    }

    /// Apply Pauli-Z conditioned on a classical bit holding `value`.
    pub fn z_if(&mut self, qubit: QubitId, clbit: ClbitId, value: bool) -> IrResult<&mut Self> {
        self.gate_if(StandardGate::Z, qubit, ClassicalCondition::new(clbit, value))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.apply(Instruction::measure(qubit, clbit))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbits.len()
    }

    /// Get the instruction sequence, in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the number of instructions.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Check whether a classical bit has been assigned by a measurement.
    pub fn is_assigned(&self, clbit: ClbitId) -> bool {
        self.assigned.contains(&clbit)
    }

    /// Get the circuit depth: the longest wire-path through the sequence.
    ///
    /// Barriers do not contribute; a conditioned gate occupies both its
    /// qubit wire and the classical wire it reads.
    pub fn depth(&self) -> usize {
        let mut qubit_level = vec![0usize; self.qubits.len()];
        let mut clbit_level = vec![0usize; self.clbits.len()];

        for inst in &self.instructions {
            if inst.is_barrier() {
                continue;
            }
            let mut level = 0;
            for &q in &inst.qubits {
                level = level.max(qubit_level[q.0 as usize]);
            }
            for &c in &inst.clbits {
                level = level.max(clbit_level[c.0 as usize]);
            }
            if let Some(condition) = inst.condition() {
                level = level.max(clbit_level[condition.clbit.0 as usize]);
            }
            level += 1;
            for &q in &inst.qubits {
                qubit_level[q.0 as usize] = level;
            }
            for &c in &inst.clbits {
                clbit_level[c.0 as usize] = level;
            }
            if let Some(condition) = inst.condition() {
                clbit_level[condition.clbit.0 as usize] = level;
            }
        }

        qubit_level
            .into_iter()
            .chain(clbit_level)
            .max()
            .unwrap_or(0)
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the classical bits in the circuit.
    pub fn clbits(&self) -> &[Clbit] {
        &self.clbits
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))?
            .cx(QubitId(0), QubitId(1))?
            .measure(QubitId(0), ClbitId(0))?
            .measure(QubitId(1), ClbitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n, n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        for i in 0..n {
            circuit.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.num_clbits(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3, 2);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
    }

    #[test]
    fn test_add_registers() {
        let mut circuit = Circuit::new("test");
        let qreg = circuit.add_qreg("q", 3);
        let l0 = circuit.add_creg("l0", 1);
        let l1 = circuit.add_creg("l1", 1);

        assert_eq!(qreg.len(), 3);
        assert_eq!(l0.len(), 1);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(l1[0], ClbitId(1));
        assert_eq!(circuit.clbits()[1].register.as_deref(), Some("l1"));
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.num_ops(), 4);
    }

    #[test]
    fn test_out_of_range_qubit() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.h(QubitId(5)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
    }

    #[test]
    fn test_self_targeting_cnot() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_remeasure_is_rejected() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert!(matches!(err, IrError::ClbitAlreadyAssigned { .. }));
    }

    #[test]
    fn test_condition_requires_prior_measurement() {
        let mut circuit = Circuit::with_size("test", 2, 1);
        let err = circuit.z_if(QubitId(1), ClbitId(0), true).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotAssigned { .. }));

        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.z_if(QubitId(1), ClbitId(0), true).unwrap();
        assert!(circuit.instructions().last().unwrap().is_conditional());
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut circuit = Circuit::with_size("test", 2, 0);
        circuit.h(QubitId(0)).unwrap();
        let depth = circuit.depth();
        circuit.barrier_all().unwrap();
        assert_eq!(circuit.depth(), depth);
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_conditioned_gate_follows_measurement_in_depth() {
        let mut circuit = Circuit::with_size("test", 3, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        circuit.x_if(QubitId(2), ClbitId(0), true).unwrap();
        // H → measure → conditioned X chains through the classical wire.
        assert_eq!(circuit.depth(), 3);
    }
}
