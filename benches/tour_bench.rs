//! Criterion benchmarks for u-tour solvers.
//!
//! Uses random Euclidean instances so timings reflect operator and strategy
//! overhead rather than instance structure.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_tour::ga::GaConfig;
use u_tour::operator::{converge, TwoOpt};
use u_tour::problem::WeightMatrix;
use u_tour::solver::{RandomSolver, Solver};
use u_tour::tsp::{self, TspObjective, TspProblem};
use u_tour::vns::VnsConfig;

// ===========================================================================
// Random Euclidean instance
// ===========================================================================

fn euclidean(n: usize, seed: u64) -> TspProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
        .collect();
    let weights = WeightMatrix::from_fn(n, |i, j| {
        let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
        (dx * dx + dy * dy).sqrt()
    });
    TspProblem::closed(0, weights).expect("valid instance")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_two_opt(c: &mut Criterion) {
    let mut group = c.benchmark_group("two_opt_converge");
    group.sample_size(10);

    for &n in &[50, 100, 200] {
        let problem = euclidean(n, 42);
        let start = RandomSolver
            .solve(&problem, &TspObjective, &mut StdRng::seed_from_u64(7))
            .tour;
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            b.iter(|| {
                let mut tour = start.clone();
                let mut rng = StdRng::seed_from_u64(0);
                let delta = converge(&TwoOpt, black_box(p), &TspObjective, &mut tour, 10_000, &mut rng);
                black_box(delta)
            })
        });
    }
    group.finish();
}

fn bench_vns(c: &mut Criterion) {
    let mut group = c.benchmark_group("vns");
    group.sample_size(10);

    for &n in &[30, 60] {
        let problem = euclidean(n, 42);
        let solver = tsp::default_solver(VnsConfig::fast().with_seed(42), 1).expect("valid config");
        group.bench_with_input(BenchmarkId::from_parameter(n), &problem, |b, p| {
            b.iter(|| {
                let best = solver.solve(black_box(p), &TspObjective, &mut StdRng::seed_from_u64(42));
                black_box(best)
            })
        });
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);

    for (n, pop, gen) in [(30usize, 30usize, 20usize), (60, 40, 20)] {
        let problem = euclidean(n, 42);
        let config = GaConfig::fast()
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42);
        let solver = tsp::default_ga(config).expect("valid config");
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_p{}_g{}", n, pop, gen), n),
            &problem,
            |b, p| {
                b.iter(|| {
                    let result = solver.run(black_box(p), &TspObjective);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_two_opt, bench_vns, bench_ga);
criterion_main!(benches);
