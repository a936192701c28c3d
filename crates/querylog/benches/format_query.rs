use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use querylog::{FormatterConfig, QueryFormatter, truncate};

/// SELECT ... WHERE id IN (@P1,...,@Pn) with a matching JSON parameter list.
fn in_clause_query(n: usize) -> (String, String) {
    let placeholders: Vec<String> = (1..=n).map(|i| format!("@P{i}")).collect();
    let params: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
    (
        format!("SELECT * FROM users WHERE id IN ({})", placeholders.join(",")),
        format!("[{}]", params.join(",")),
    )
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format/in_clause");
    let formatter = QueryFormatter::new(FormatterConfig::new());

    for n in [1, 10, 50, 500] {
        let input = in_clause_query(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, (sql, params)| {
            b.iter(|| black_box(formatter.format(sql, params)));
        });
    }

    group.finish();
}

fn bench_malformed_params(c: &mut Criterion) {
    let mut group = c.benchmark_group("format/malformed_params");
    let formatter = QueryFormatter::new(FormatterConfig::new());
    let params: Vec<String> = (0..100).map(|i| format!("\"say \"{i}\" now\"")).collect();
    let raw = format!("[{}]", params.join(","));

    group.bench_function("stray_quotes", |b| {
        b.iter(|| black_box(formatter.format("SELECT $1, $50, $100", &raw)));
    });

    group.finish();
}

fn bench_truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate");

    for n in [10, 100, 1000] {
        let list: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let sql = format!("SELECT * FROM t WHERE a IN ({0}) AND b IN ({0})", list.join(", "));
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(truncate(sql)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format, bench_malformed_params, bench_truncate);
criterion_main!(benches);
