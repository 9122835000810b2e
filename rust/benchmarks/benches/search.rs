use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use semiprime_finder::evaluate::allowed_map;
use semiprime_finder::{find_semiprimes_in, Sieve};

fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");

    for limit in [10_000u64, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(limit), &limit, |b, &limit| {
            b.iter(|| Sieve::new(limit));
        });
    }

    group.finish();
}

fn bench_next_prime_walk(c: &mut Criterion) {
    let sieve = Sieve::new(1_000_000).expect("limit within range");
    c.bench_function("next_prime_walk_1e6", |b| {
        b.iter(|| {
            let mut count = 0usize;
            let mut p = sieve.next_prime(1);
            while let Some(q) = p {
                count += 1;
                p = sieve.next_prime(q);
            }
            count
        });
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("combination_search");
    group.sample_size(10);

    for limit in [10_000u64, 100_000, 1_000_000] {
        let sieve = Sieve::new(limit).expect("limit within range");
        group.bench_with_input(BenchmarkId::from_parameter(limit), &sieve, |b, sieve| {
            b.iter(|| find_semiprimes_in(sieve));
        });
    }

    group.finish();
}

fn bench_allowed_ranking(c: &mut Criterion) {
    let sieve = Sieve::new(1_000_000).expect("limit within range");
    let found = find_semiprimes_in(&sieve);
    c.bench_function("allowed_map_1e6", |b| {
        b.iter(|| allowed_map(&found));
    });
}

criterion_group!(
    benches,
    bench_sieve,
    bench_next_prime_walk,
    bench_search,
    bench_allowed_ranking
);
criterion_main!(benches);
