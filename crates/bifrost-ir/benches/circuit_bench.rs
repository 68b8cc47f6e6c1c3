//! Benchmarks for Bifrost circuit operations
//!
//! Run with: cargo bench -p bifrost-ir

use bifrost_ir::{Circuit, ClbitId, QubitId};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f64::consts::PI;

/// Benchmark circuit creation
fn bench_circuit_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_creation");

    for num_qubits in &[3, 5, 10, 20] {
        group.bench_with_input(
            BenchmarkId::new("with_size", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| Circuit::with_size(black_box("bench"), black_box(n), black_box(n)));
            },
        );
    }

    group.finish();
}

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("u_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit
                .u(
                    black_box(PI / 4.0),
                    black_box(PI / 8.0),
                    black_box(PI / 16.0),
                    black_box(QubitId(0)),
                )
                .unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10, 0);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark the full measurement-and-correction pattern the teleportation
/// protocol is built from.
fn bench_conditioned_sequence(c: &mut Criterion) {
    c.bench_function("measure_then_conditioned_gates", |b| {
        b.iter(|| {
            let mut circuit = Circuit::with_size("bench", 3, 3);
            circuit.h(QubitId(1)).unwrap();
            circuit.cx(QubitId(1), QubitId(2)).unwrap();
            circuit.barrier_all().unwrap();
            circuit.cx(QubitId(0), QubitId(1)).unwrap();
            circuit.h(QubitId(0)).unwrap();
            circuit.measure(QubitId(0), ClbitId(0)).unwrap();
            circuit.measure(QubitId(1), ClbitId(1)).unwrap();
            circuit.z_if(QubitId(2), ClbitId(0), true).unwrap();
            circuit.x_if(QubitId(2), ClbitId(1), true).unwrap();
            circuit.measure(QubitId(2), ClbitId(2)).unwrap();
            black_box(circuit.depth())
        });
    });
}

/// Benchmark circuit cloning (the hand-off cost to a backend)
fn bench_circuit_clone(c: &mut Criterion) {
    let circuit = Circuit::ghz(10).unwrap();
    c.bench_function("clone_ghz_10", |b| {
        b.iter(|| black_box(circuit.clone()));
    });
}

criterion_group!(
    benches,
    bench_circuit_creation,
    bench_gate_addition,
    bench_conditioned_sequence,
    bench_circuit_clone
);
criterion_main!(benches);
