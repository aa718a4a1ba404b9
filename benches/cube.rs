//! Benchmarks for turning, scrambling and history simplification.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use twisty::cube::{random_sequence, Cube, DEFAULT_SCRAMBLE_LENGTH};
use twisty::kinds::ThreeByThree;
use twisty::simplify::simplify;

/// Benchmark simplifying a long history with plenty of cancellations.
fn bench_simplify(c: &mut Criterion) {
    let history = random_sequence(200, &mut StdRng::seed_from_u64(0));

    c.bench_function("simplify_200", |b| b.iter(|| simplify(black_box(&history))));
}

/// Benchmark a default-length scramble from a solved cube.
fn bench_scramble(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("scramble_50", |b| {
        b.iter(|| {
            let mut cube = Cube::new(ThreeByThree);
            cube.scramble_with(black_box(DEFAULT_SCRAMBLE_LENGTH), &mut rng)
        })
    });
}

/// Benchmark undoing a scrambled cube's history.
fn bench_solve(c: &mut Criterion) {
    let scramble = random_sequence(DEFAULT_SCRAMBLE_LENGTH, &mut StdRng::seed_from_u64(2));

    c.bench_function("solve_after_scramble", |b| {
        b.iter(|| {
            let mut cube = Cube::new(ThreeByThree);
            cube.do_sequence(black_box(&scramble));
            cube.solve()
        })
    });
}

criterion_group!(benches, bench_simplify, bench_scramble, bench_solve);
criterion_main!(benches);
