//! # Membership Filter Benchmarks
//!
//! | Operation | Cost |
//! |-----------|------|
//! | insert | one SHA-256 + O(k) bit writes |
//! | query | one SHA-256 + up to k bit reads |
//! | dump | O(m) copy under the lock |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use bloom_membership::{FilterConfig, MembershipFilter};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-insert");
    let values: Vec<String> = (0..1_000).map(|i| format!("value_{}", i)).collect();

    for k in [1usize, 2, 7] {
        let filter = MembershipFilter::new(FilterConfig::new(264, k).unwrap()).unwrap();
        group.throughput(Throughput::Elements(values.len() as u64));
        group.bench_with_input(BenchmarkId::new("insert_batch", k), &values, |b, values| {
            b.iter(|| {
                for v in values {
                    filter.insert(black_box(v));
                }
            })
        });
    }

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-query");
    let filter = MembershipFilter::default();
    for i in 0..50 {
        filter.insert(&format!("inserted_{}", i));
    }

    group.bench_function("query_present", |b| {
        b.iter(|| black_box(filter.query(black_box("inserted_7"))))
    });
    group.bench_function("query_absent", |b| {
        b.iter(|| black_box(filter.query(black_box("never-inserted-xyz"))))
    });

    group.finish();
}

fn bench_dump(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-dump");

    for m in [264usize, 8_192, 65_536] {
        let filter = MembershipFilter::new(FilterConfig::new(m, 2).unwrap()).unwrap();
        filter.insert("alpha");
        group.throughput(Throughput::Elements(m as u64));
        group.bench_with_input(BenchmarkId::new("dump", m), &filter, |b, filter| {
            b.iter(|| black_box(filter.dump()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert, bench_query, bench_dump);
criterion_main!(benches);
