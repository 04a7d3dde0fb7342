use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use stockplan_allocation::{DemandLine, EvaluationConfig, MatchMode, evaluate, resolve_stock};
use stockplan_inventory::{Category, StockIndex, StockRecord, StockSnapshot};

const PREFIXES: [&str; 6] = ["PL", "PV", "RP", "MP", "AA", "OI"];

fn snapshot(items: usize) -> StockSnapshot {
    let mut records = Vec::with_capacity(items * PREFIXES.len());
    for i in 0..items {
        for (p, prefix) in PREFIXES.iter().enumerate() {
            let qty = ((i * 7 + p * 13) % 50) as f64;
            records.push(StockRecord::from_prefixed_code(format!("{prefix}{i:07}"), qty, 7));
        }
    }
    StockSnapshot::new(records).unwrap()
}

fn demand(items: usize) -> Vec<DemandLine> {
    (0..items)
        .map(|i| DemandLine::new(format!("PL{i:07}"), ((i % 40) + 1) as f64))
        .collect()
}

fn bench_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_evaluation");
    let config = EvaluationConfig::new(Category::Pl).with_match_mode(MatchMode::suffix());

    for items in [100usize, 1_000, 10_000] {
        let stock = snapshot(items);
        let lines = demand(items);
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, _| {
            b.iter(|| evaluate(black_box(&lines), black_box(&stock), &config).unwrap());
        });
    }

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_resolution");
    let stock = snapshot(5_000);
    let mode = MatchMode::suffix();

    group.bench_function("linear_scan", |b| {
        b.iter(|| resolve_stock(black_box("PL0002500"), &stock, &mode).unwrap());
    });

    group.bench_function("index_build_and_lookup", |b| {
        b.iter(|| {
            let index = StockIndex::build(&stock, mode).unwrap();
            index.resolve(black_box("PL0002500"))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_batch_evaluation, bench_resolution);
criterion_main!(benches);
