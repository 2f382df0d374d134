use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use llrb_rank_map::RankMap;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

struct KeyGenerator {
    rng: StdRng,
    limit: u64,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: u64 = 1_000_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> u64 {
        self.rng.gen_range(0..self.limit)
    }
}

// insert helper fn
fn rank_map_insert(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut map = RankMap::new();
        for k in keys.clone() {
            black_box(map.insert(k, ()));
        }
    });
}

// insert and remove helper fn
fn rank_map_insert_remove(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    bench.iter(|| {
        let mut map = RankMap::new();
        for k in keys.clone() {
            black_box(map.insert(k, ()));
        }
        for k in &keys {
            black_box(map.remove(k));
        }
    });
}

// rank query helper fn
fn rank_map_rank(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut map = RankMap::new();
    for k in keys.clone() {
        map.insert(k, ());
    }
    bench.iter(|| {
        for k in &keys {
            black_box(map.rank(k));
        }
    });
}

// select query helper fn
fn rank_map_get_by_rank(count: usize, bench: &mut Bencher) {
    let mut gen = KeyGenerator::new();
    let keys: Vec<_> = std::iter::repeat_with(|| gen.next()).take(count).collect();
    let mut map = RankMap::new();
    for k in keys {
        map.insert(k, ());
    }
    bench.iter(|| {
        for rank in 0..map.len() {
            black_box(map.get_by_rank(rank));
        }
    });
}

fn bench_rank_map_insert(c: &mut Criterion) {
    c.bench_function("bench_rank_map_insert_100", |b| rank_map_insert(100, b));
    c.bench_function("bench_rank_map_insert_1000", |b| rank_map_insert(1000, b));
    c.bench_function("bench_rank_map_insert_10,000", |b| {
        rank_map_insert(10_000, b)
    });
    c.bench_function("bench_rank_map_insert_100,000", |b| {
        rank_map_insert(100_000, b)
    });
}

fn bench_rank_map_insert_remove(c: &mut Criterion) {
    c.bench_function("bench_rank_map_insert_remove_100", |b| {
        rank_map_insert_remove(100, b)
    });
    c.bench_function("bench_rank_map_insert_remove_1000", |b| {
        rank_map_insert_remove(1000, b)
    });
    c.bench_function("bench_rank_map_insert_remove_10,000", |b| {
        rank_map_insert_remove(10_000, b)
    });
    c.bench_function("bench_rank_map_insert_remove_100,000", |b| {
        rank_map_insert_remove(100_000, b)
    });
}

fn bench_rank_map_rank(c: &mut Criterion) {
    c.bench_function("bench_rank_map_rank_100", |b| rank_map_rank(100, b));
    c.bench_function("bench_rank_map_rank_1000", |b| rank_map_rank(1000, b));
}

fn bench_rank_map_get_by_rank(c: &mut Criterion) {
    c.bench_function("bench_rank_map_get_by_rank_100", |b| {
        rank_map_get_by_rank(100, b)
    });
    c.bench_function("bench_rank_map_get_by_rank_1000", |b| {
        rank_map_get_by_rank(1000, b)
    });
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_rank_map_insert, bench_rank_map_insert_remove,
}

criterion_group! {
    name = benches_rank;
    config = criterion_config();
    targets = bench_rank_map_rank, bench_rank_map_get_by_rank
}

criterion_main!(benches_basic_op, benches_rank);
