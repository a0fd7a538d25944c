use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pour_solver::solver::solve;
use pour_solver::{Puzzle, WaterJugService};

fn bench_solve(c: &mut Criterion) {
    let cases = [(3, 5, 4), (7, 11, 6), (97, 89, 1), (1000, 999, 1)];

    for (x, y, z) in cases {
        let puzzle = Puzzle::new(x, y, z).unwrap();
        c.bench_function(&format!("solve {}", puzzle), |b| {
            b.iter(|| solve(black_box(puzzle)))
        });
    }
}

fn bench_sparse_search(c: &mut Criterion) {
    let puzzle = Puzzle::new(20011, 10007, 1).unwrap();

    c.bench_function("solve sparse 20011-10007-1", |b| {
        b.iter(|| solve(black_box(puzzle)))
    });
}

fn bench_cached_solve(c: &mut Criterion) {
    let service = WaterJugService::default();
    service.solve(1000, 999, 1).unwrap();

    c.bench_function("cached solve 1000-999-1", |b| {
        b.iter(|| service.solve(black_box(1000), black_box(999), black_box(1)))
    });
}

criterion_group!(benches, bench_solve, bench_sparse_search, bench_cached_solve);
criterion_main!(benches);
