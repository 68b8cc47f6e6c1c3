//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use bifrost_ir::StandardGate;

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A statevector representing a quantum state.
///
/// Amplitudes are indexed with qubit `k` as bit `k` of the basis index.
/// Single-qubit gates are all driven through one 2×2 kernel; controlled
/// gates reuse it under a control mask.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitude of a basis state.
    pub fn amplitude(&self, basis: usize) -> Complex64 {
        self.amplitudes[basis]
    }

    /// Apply a standard gate to the given qubits.
    ///
    /// The caller guarantees operand count matches the gate arity; the IR's
    /// build-time validation enforces it for any circuit that reaches here.
    pub fn apply_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_single(qubits[0], pauli_x()),
            StandardGate::Y => self.apply_single(qubits[0], pauli_y()),
            StandardGate::Z => self.apply_single(qubits[0], pauli_z()),
            StandardGate::H => self.apply_single(qubits[0], hadamard()),
            StandardGate::S => self.apply_single(qubits[0], phase(PI / 2.0)),
            StandardGate::Sdg => self.apply_single(qubits[0], phase(-PI / 2.0)),
            StandardGate::T => self.apply_single(qubits[0], phase(PI / 4.0)),
            StandardGate::Tdg => self.apply_single(qubits[0], phase(-PI / 4.0)),
            StandardGate::Rx(theta) => self.apply_single(qubits[0], rotation_x(*theta)),
            StandardGate::Ry(theta) => self.apply_single(qubits[0], rotation_y(*theta)),
            StandardGate::Rz(theta) => self.apply_single(qubits[0], rotation_z(*theta)),
            StandardGate::P(theta) => self.apply_single(qubits[0], phase(*theta)),
            StandardGate::U(theta, phi, lambda) => {
                self.apply_single(qubits[0], u_matrix(*theta, *phi, *lambda));
            }
            StandardGate::CX => self.apply_controlled(qubits[0], qubits[1], pauli_x()),
            StandardGate::CY => self.apply_controlled(qubits[0], qubits[1], pauli_y()),
            StandardGate::CZ => self.apply_controlled(qubits[0], qubits[1], pauli_z()),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
        }
    }

    /// Apply a 2×2 unitary to one qubit.
    fn apply_single(&mut self, qubit: usize, m: Matrix2) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Apply a 2×2 unitary to `target`, gated on `control` being |1⟩.
    fn apply_controlled(&mut self, control: usize, target: usize, m: Matrix2) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Probability that measuring `qubit` yields 1.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Projectively measure one qubit.
    ///
    /// Samples an outcome from the current amplitudes, collapses the state
    /// onto the matching subspace, and renormalizes. This is what lets
    /// later, classically conditioned gates act on the post-measurement
    /// state.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p_one = self.probability_of_one(qubit);
        let outcome = rng.r#gen::<f64>() < p_one;

        let mask = 1 << qubit;
        let norm = if outcome { p_one } else { 1.0 - p_one }.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask != 0) == outcome {
                *amp /= norm;
            } else {
                *amp = ZERO;
            }
        }
        outcome
    }
}

// =============================================================================
// Gate matrices
// =============================================================================

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    let i = Complex64::new(0.0, 1.0);
    [[ZERO, -i], [i, ZERO]]
}

fn pauli_z() -> Matrix2 {
    [[ONE, ZERO], [ZERO, -ONE]]
}

fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn phase(theta: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

fn rotation_x(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new(0.0, -(theta / 2.0).sin());
    [[c, s], [s, c]]
}

fn rotation_y(theta: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [[c, -s], [s, c]]
}

fn rotation_z(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// U(θ, φ, λ), the universal single-qubit gate.
fn u_matrix(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    [
        [
            Complex64::new(c, 0.0),
            -Complex64::from_polar(s, lambda),
        ],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(c, phi + lambda),
        ],
    ]
}
