use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use matcher::similarity::{levenshtein, score};
use matcher::{Candidate, QueryFields, RunningMaxPolicy, Selector, SelectorConfig};

const NAMES: &[&str] = &[
    "Andheri",
    "Andheri East",
    "Azad Nagar",
    "Chakala MIDC",
    "Gundavali",
    "J B Nagar",
    "Marol Bazar",
    "Marol Naka",
    "Saki Naka",
    "Vile Parle East",
];

fn create_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| Candidate::named(format!("{} {}", NAMES[i % NAMES.len()], i)))
        .collect()
}

/// Benchmark the two scoring rules on typical address fragments
fn bench_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");

    group.bench_function("token_containment", |b| {
        b.iter(|| score(black_box("Marol Naka"), black_box("Flat 4, Marol Naka, Andheri East")))
    });
    group.bench_function("edit_distance", |b| {
        b.iter(|| score(black_box("Chakala MIDC"), black_box("Sahar Road, Koldongri")))
    });
    group.bench_function("levenshtein_64", |b| {
        let s = "a".repeat(64);
        let t = "b".repeat(64);
        b.iter(|| levenshtein(black_box(&s), black_box(&t)))
    });

    group.finish();
}

/// Benchmark a full scan with no exact match for growing candidate lists
fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector_full_scan");
    let fields = QueryFields::new("Mumbai", "Flat 12, Sunshine Apartments", "Sahar Road");

    for policy in [RunningMaxPolicy::CityBaseline, RunningMaxPolicy::GlobalMaximum] {
        let selector = Selector::new(SelectorConfig::default().with_policy(policy));
        for count in [5usize, 25, 100] {
            let candidates = create_candidates(count);
            group.throughput(Throughput::Elements(count as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{policy:?}"), count),
                &candidates,
                |b, candidates| {
                    b.iter(|| {
                        selector
                            .select(black_box(candidates), black_box(&fields))
                            .expect("selection")
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_selector);
criterion_main!(benches);
