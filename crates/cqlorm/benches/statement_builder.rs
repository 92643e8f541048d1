use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cqlorm::qb::{self, Select, Statement, TermTuple};

/// SELECT col0, col1, ... FROM t WHERE col0 = ? AND col1 = ? ...
fn build_select(n: usize) -> Select {
    let mut select = qb::select("t").columns((0..n).map(|i| format!("col{i}")));
    for i in 0..n {
        select = select.and_where(format!("col{i}"), "=", i as i64);
    }
    select
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let select = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &select, |b, select| {
            b.iter(|| black_box(select.render().unwrap()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).render().unwrap()));
        });
    }

    group.finish();
}

fn bench_nested_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/nested_groups");

    for depth in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut update = qb::update("t").set(("a", 1)).and_eq("id", 0);
                for i in 0..depth {
                    update = update.or_group(|w| {
                        w.and_where(["b", "c"], ">", TermTuple::new().with(i).with(i + 1))
                            .or_where("d", "<", i);
                    });
                }
                black_box(update.render().unwrap())
            });
        });
    }

    group.finish();
}

fn bench_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let select = qb::select("t").and_in("id", values.iter().copied());
                black_box(select.render().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_nested_groups,
    bench_in_list
);
criterion_main!(benches);
