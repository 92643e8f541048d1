use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cqlorm::CqlValue;
use cqlorm::diff::{DiffOp, diff};
use cqlorm::schema::types;

fn ints(range: std::ops::Range<i32>) -> Vec<CqlValue> {
    range.map(CqlValue::Int).collect()
}

fn bench_list_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_diff/list_append");
    let column = types::list("l", types::int(None));

    for n in [10, 100, 1000] {
        let old = CqlValue::List(ints(0..n));
        let new = CqlValue::List(ints(0..n + n / 10));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(old, new), |b, (old, new)| {
            b.iter(|| {
                let mut ops: Vec<DiffOp> = Vec::new();
                diff(&mut ops, &column, old, new).unwrap();
                black_box(ops)
            });
        });
    }

    group.finish();
}

fn bench_list_internal_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_diff/list_internal_edit");
    let column = types::list("l", types::int(None));

    for n in [10, 100, 1000] {
        let old = ints(0..n);
        let mut edited = old.clone();
        edited[(n / 2) as usize] = CqlValue::Int(-1);
        let pair = (CqlValue::List(old), CqlValue::List(edited));
        group.bench_with_input(BenchmarkId::from_parameter(n), &pair, |b, (old, new)| {
            b.iter(|| {
                let mut ops: Vec<DiffOp> = Vec::new();
                diff(&mut ops, &column, old, new).unwrap();
                black_box(ops)
            });
        });
    }

    group.finish();
}

fn bench_set_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_diff/set_churn");
    let column = types::set("s", types::int(None));

    for n in [10, 100, 1000] {
        let old = CqlValue::Set(ints(0..n));
        let new = CqlValue::Set(ints(n / 4..n + n / 4));
        group.bench_with_input(BenchmarkId::from_parameter(n), &(old, new), |b, (old, new)| {
            b.iter(|| {
                let mut ops: Vec<DiffOp> = Vec::new();
                diff(&mut ops, &column, old, new).unwrap();
                black_box(ops)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_list_append,
    bench_list_internal_edit,
    bench_set_churn
);
criterion_main!(benches);
