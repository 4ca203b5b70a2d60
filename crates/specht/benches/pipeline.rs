//! Benchmarks for the tableau pipeline stages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use specht::{
    build_matrix, orbit_relation, DistributedEvaluator, OrbitPolicy, Partition, Shape,
    StandardOrder,
};

const SHAPES: [&[usize]; 4] = [&[3, 2], &[4, 2, 1], &[3, 3, 2], &[3, 3, 3]];

fn shape(rows: &[usize]) -> Shape {
    Shape::new(rows.to_vec()).expect("valid shape")
}

fn bench_partition_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("partitions");
    for n in [10usize, 20, 30] {
        group.bench_with_input(BenchmarkId::new("all", n), &n, |b, &n| {
            b.iter(|| Partition::all(black_box(n)).count());
        });
        group.bench_with_input(BenchmarkId::new("2special_pairs", n), &n, |b, &n| {
            b.iter(|| {
                Partition::all(black_box(n))
                    .filter(|p| p.is_2special() && p.conjugate().is_2special())
                    .count()
            });
        });
    }
    group.finish();
}

fn bench_standard_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("standard_order");
    for rows in SHAPES {
        let s = shape(rows);
        group.throughput(Throughput::Elements(StandardOrder::new(&s).len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(&s), &s, |b, s| {
            b.iter(|| StandardOrder::new(black_box(s)));
        });
    }
    group.finish();
}

fn bench_orbit_relation(c: &mut Criterion) {
    let mut group = c.benchmark_group("orbit_relation");
    for rows in SHAPES {
        let order = StandardOrder::new(&shape(rows));
        group.throughput(Throughput::Elements(order.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(order.shape()), &order, |b, order| {
            b.iter(|| {
                order
                    .iter()
                    .map(|t| orbit_relation(t, OrbitPolicy::Parity).len())
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for rows in SHAPES {
        let order = StandardOrder::new(&shape(rows));
        let m = build_matrix(&order, OrbitPolicy::Parity);
        group.bench_with_input(BenchmarkId::new("exact", order.shape()), &m, |b, m| {
            b.iter(|| black_box(m.solve()));
        });
        group.bench_with_input(BenchmarkId::new("gf2", order.shape()), &m, |b, m| {
            b.iter(|| black_box(m.solve_parity()));
        });
    }
    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    group.sample_size(20);
    let pool = DistributedEvaluator::new(None).expect("worker pool");
    for rows in [&[3, 3, 2][..], &[3, 3, 3][..]] {
        let order = StandardOrder::new(&shape(rows));
        group.bench_with_input(BenchmarkId::new("sequential", order.shape()), &order, |b, order| {
            b.iter(|| build_matrix(black_box(order), OrbitPolicy::Parity));
        });
        group.bench_with_input(BenchmarkId::new("distributed", order.shape()), &order, |b, order| {
            b.iter(|| pool.matrix(black_box(order)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_partition_generation,
    bench_standard_order,
    bench_orbit_relation,
    bench_solve,
    bench_assembly
);
criterion_main!(benches);
