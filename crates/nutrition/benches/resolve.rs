//! Benchmarks for local nutrition resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pantry_nutrition::{ReferenceTable, Resolver, levenshtein_distance};

fn bench_stages(c: &mut Criterion) {
    let resolver = Resolver::default();
    let mut group = c.benchmark_group("resolve_local");

    for (label, query) in [
        ("exact", "鸡胸肉"),
        ("fuzzy", "新鲜西兰花"),
        ("estimated", "蓝莓"),
        ("miss", "不存在的食材XYZ"),
    ] {
        group.bench_with_input(BenchmarkId::new("stage", label), query, |b, q| {
            b.iter(|| resolver.resolve_local(black_box(q)))
        });
    }

    group.finish();
}

fn bench_did_you_mean(c: &mut Criterion) {
    let resolver = Resolver::default();

    c.bench_function("did_you_mean", |b| {
        b.iter(|| resolver.did_you_mean(black_box("西蓝花"), 3))
    });
}

fn bench_levenshtein(c: &mut Criterion) {
    let table = ReferenceTable::builtin();

    c.bench_function("levenshtein_table_scan", |b| {
        b.iter(|| {
            table
                .iter()
                .map(|entry| levenshtein_distance(&entry.name, black_box("胡萝卜丝")))
                .min()
        })
    });
}

criterion_group!(benches, bench_stages, bench_did_you_mean, bench_levenshtein);
criterion_main!(benches);
