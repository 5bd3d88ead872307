use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use toml_tree::{parse, to_string, Array, Document, Table, Value};

const CONFIG: &str = r#"# Service configuration
title = "bench"
owner = { name = "Tom", email = "tom@example.com" }

[server]
host = "localhost"
port = 8080
workers = 16
timeout = 2.5 # seconds
started = 1979-05-27T07:32:00-08:00

[database]
urls = [ "postgres://a", "postgres://b" ]
pool = 32
enabled = true
retry = { attempts = 3, backoff = 0.25 }
"#;

fn products(size: u32) -> Document {
    let mut array = Array::new_table_array();
    for i in 0..size {
        let mut product = Table::new();
        product.put("sku", format!("SKU{}", i)).unwrap();
        product.put("name", format!("Product {}", i)).unwrap();
        product.put("price", 9.99 + f64::from(i)).unwrap();
        product.put("quantity", i).unwrap();
        array.push(product);
    }
    let mut doc = Document::new();
    doc.put("products", array).unwrap();
    doc
}

fn benchmark_parse_config(c: &mut Criterion) {
    c.bench_function("parse_config", |b| b.iter(|| parse(black_box(CONFIG))));
}

fn benchmark_serialize_config(c: &mut Criterion) {
    let doc = parse(CONFIG).unwrap();

    c.bench_function("serialize_config", |b| b.iter(|| to_string(black_box(&doc))));
}

fn benchmark_serialize_table_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_table_array");

    for size in [10, 50, 100, 500].iter() {
        let doc = products(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_parse_table_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_table_array");

    for size in [10, 50, 100, 500].iter() {
        let toml = to_string(&products(*size)).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), &toml, |b, toml| {
            b.iter(|| parse(black_box(toml)))
        });
    }
    group.finish();
}

fn benchmark_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("strings");

    let basic = "key = \"This is a medium length string with \\\"escapes\\\" and \\u00E9\"";
    let literal = "key = 'C:\\Users\\nodejs\\templates\\with\\a\\long\\path'";
    let multi_line = "key = \"\"\"\nRoses are red\nViolets are blue\nSugar is sweet\"\"\"";

    group.bench_function("parse_basic", |b| b.iter(|| parse(black_box(basic))));
    group.bench_function("parse_literal", |b| b.iter(|| parse(black_box(literal))));
    group.bench_function("parse_multi_line", |b| {
        b.iter(|| parse(black_box(multi_line)))
    });

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let integers: Array = (0..100).map(i64::from).collect();
    let floats: Array = (0..100).map(|i| f64::from(i) * 1.5).collect();
    let dates: Array = (1..=28)
        .map(|day| Value::from(chrono::NaiveDate::from_ymd_opt(2024, 2, day).unwrap()))
        .collect();

    for (name, array) in [("integers", integers), ("floats", floats), ("dates", dates)] {
        let mut doc = Document::new();
        doc.put(name, array).unwrap();
        let toml = to_string(&doc).unwrap();

        group.bench_function(format!("serialize_{}", name), |b| {
            b.iter(|| to_string(black_box(&doc)))
        });
        group.bench_function(format!("parse_{}", name), |b| {
            b.iter(|| parse(black_box(&toml)))
        });
    }

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let doc = parse(CONFIG).unwrap();
    let json_str = serde_json::to_string(&doc).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("toml_parse", |b| b.iter(|| parse(black_box(CONFIG))));

    group.bench_function("json_parse", |b| {
        b.iter(|| serde_json::from_str::<Document>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip_config", |b| {
        b.iter(|| {
            let doc = parse(black_box(CONFIG)).unwrap();
            let _serialized = to_string(black_box(&doc)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_parse_config,
    benchmark_serialize_config,
    benchmark_serialize_table_array,
    benchmark_parse_table_array,
    benchmark_strings,
    benchmark_primitive_array,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
