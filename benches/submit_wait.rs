//! Benchmarks for submission and result-wait round trips.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fixedpool::ThreadPool;

fn bench_submit_wait(c: &mut Criterion) {
    let pool = ThreadPool::new(4, 1024).unwrap();

    c.bench_function("submit_wait_single", |b| {
        b.iter(|| {
            let future = pool.submit(|| black_box(21) * 2).unwrap();
            black_box(future.wait().unwrap());
        })
    });

    c.bench_function("submit_wait_batch_100", |b| {
        b.iter(|| {
            let futures: Vec<_> = (0..100)
                .map(|i| pool.submit(move || black_box(i) + 1).unwrap())
                .collect();
            for future in futures {
                black_box(future.wait().unwrap());
            }
        })
    });
}

fn bench_create_shutdown(c: &mut Criterion) {
    c.bench_function("create_shutdown_4_threads", |b| {
        b.iter(|| {
            let mut pool = ThreadPool::new(4, 64).unwrap();
            pool.shutdown().unwrap();
        })
    });
}

criterion_group!(benches, bench_submit_wait, bench_create_shutdown);
criterion_main!(benches);
