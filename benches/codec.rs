use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowbind::{Decoder, Encoder, FieldIndex, Record, Value};

#[derive(Default, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
    score: Option<f64>,
}

rowbind::impl_record! {
    User {
        id: tag("id"),
        name: tag("name"),
        email: tag("email"),
        active: tag("active"),
        score: tag("score"),
    }
}

#[derive(Default, Clone)]
struct Metadata {
    created: String,
    version: u32,
}

#[derive(Default, Clone)]
struct Audit {
    reviewer: Option<String>,
}

#[derive(Default, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    audit: Option<Box<Audit>>,
}

rowbind::impl_record! { Metadata { created: tag("created"), version: tag("version") } }
rowbind::impl_record! { Audit { reviewer: tag("reviewer") } }
rowbind::impl_record! {
    NestedData {
        id: tag("id"),
        metadata: embed(Metadata),
        audit: embed_ref(Audit),
    }
}

const USER_FIELDS: [&str; 5] = ["id", "name", "email", "active", "score"];
const NESTED_FIELDS: [&str; 4] = ["id", "created", "version", "reviewer"];

fn benchmark_encode_simple(c: &mut Criterion) {
    let encoder = Encoder::new(USER_FIELDS);
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
        score: Some(9.5),
    };

    c.bench_function("encode_simple_record", |b| {
        b.iter(|| encoder.encode(black_box(&user)))
    });
}

fn benchmark_decode_simple(c: &mut Criterion) {
    let decoder = Decoder::new(USER_FIELDS);
    let row = ["123", "Alice", "alice@example.com", "true", "9.5"];

    c.bench_function("decode_simple_record", |b| {
        b.iter(|| {
            let mut user = User::default();
            decoder.decode(black_box(&row), &mut user).map(|_| user)
        })
    });
}

fn benchmark_decode_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_rows");
    let decoder = Decoder::new(USER_FIELDS);

    for size in [10, 100, 1000].iter() {
        let rows: Vec<Vec<String>> = (0..*size)
            .map(|i| {
                vec![
                    i.to_string(),
                    format!("User {}", i),
                    format!("user{}@example.com", i),
                    (i % 2 == 0).to_string(),
                    if i % 3 == 0 { String::new() } else { format!("{}.25", i) },
                ]
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                rows.iter()
                    .map(|row| {
                        let mut user = User::default();
                        decoder.decode(black_box(row), &mut user).map(|_| user)
                    })
                    .collect::<rowbind::Result<Vec<_>>>()
            })
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let encoder = Encoder::new(NESTED_FIELDS);
    let decoder = Decoder::new(NESTED_FIELDS);
    let data = NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            version: 3,
        },
        audit: Some(Box::new(Audit {
            reviewer: Some("bob".to_string()),
        })),
    };
    let row = encoder.encode(&data).unwrap();

    c.bench_function("encode_nested_record", |b| {
        b.iter(|| encoder.encode(black_box(&data)))
    });

    c.bench_function("decode_nested_record", |b| {
        b.iter(|| {
            let mut data = NestedData::default();
            decoder.decode(black_box(&row), &mut data).map(|_| data)
        })
    });
}

fn benchmark_resolve(c: &mut Criterion) {
    c.bench_function("resolve_field_index", |b| {
        b.iter(|| FieldIndex::resolve(black_box(NestedData::SHAPE)))
    });
}

fn benchmark_custom_formatter(c: &mut Criterion) {
    let encoder = Encoder::new(USER_FIELDS).with_formatter("name", |value: &Value| {
        Ok(value.as_str().unwrap_or_default().to_uppercase())
    });
    let user = User {
        name: "alice".to_string(),
        ..User::default()
    };

    c.bench_function("encode_with_formatter", |b| {
        b.iter(|| encoder.encode(black_box(&user)))
    });
}

criterion_group!(
    benches,
    benchmark_encode_simple,
    benchmark_decode_simple,
    benchmark_decode_rows,
    benchmark_nested,
    benchmark_resolve,
    benchmark_custom_formatter
);

criterion_main!(benches);
