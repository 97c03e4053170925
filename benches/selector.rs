use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fakers::{Generator, RandomGenerator, Selector, Strategy, WeightedSet};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn gen_set(n: usize) -> WeightedSet<usize> {
    let mut rng = Pcg32::seed_from_u64(777);
    WeightedSet::from_pairs((0..n).map(|i| (i, 0.1 + rng.random::<f64>()))).unwrap()
}

fn bench_table_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("cumulative_table_build");
    for &n in &[2usize, 8, 64, 256, 1024] {
        let set = gen_set(n);
        let generator = RandomGenerator::new(Pcg32::seed_from_u64(1));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("build_n={n}"), |b| {
            b.iter(|| black_box(generator.cumulative_table(black_box(set.weights()))).unwrap());
        });
    }
    group.finish();
}

fn bench_weighted_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("weighted_draws");
    const DRAWS_PER_ITER: usize = 1024;

    for &n in &[2usize, 8, 64, 256, 1024] {
        let set = gen_set(n);
        group.throughput(Throughput::Elements(DRAWS_PER_ITER as u64));

        group.bench_function(format!("select_one_cached_n={n}"), |b| {
            b.iter_batched_ref(
                || {
                    (
                        Selector::new(Strategy::WeightedReplace),
                        RandomGenerator::new(Pcg32::seed_from_u64(999)),
                    )
                },
                |(selector, generator)| {
                    let mut s = 0usize;
                    for _ in 0..DRAWS_PER_ITER {
                        s ^= selector.select_one(generator, &set).unwrap();
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_function(format!("select_many_per_call_n={n}"), |b| {
            b.iter_batched_ref(
                || {
                    (
                        Selector::new(Strategy::WeightedReplace),
                        RandomGenerator::new(Pcg32::seed_from_u64(1001)),
                    )
                },
                |(selector, generator)| {
                    let drawn = selector.select_many(generator, &set, DRAWS_PER_ITER).unwrap();
                    black_box(drawn.into_iter().fold(0usize, |s, i| s ^ i))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(selector, bench_table_build, bench_weighted_draws);
criterion_main!(selector);
