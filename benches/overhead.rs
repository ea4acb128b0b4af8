use criterion::{black_box, criterion_group, criterion_main, Criterion};

use callbridge::{CompositeBridge, ScalarBridge, SequenceBridge, Value};

fn bench_scalar(c: &mut Criterion) {
    let str_args = [Value::from("foobar")];
    c.bench_function("scalar_str", |b| {
        b.iter(|| ScalarBridge::call_str(black_box(&str_args)).unwrap());
    });

    let f64_args = [Value::Float(1.5)];
    c.bench_function("scalar_f64", |b| {
        b.iter(|| ScalarBridge::call_f64(black_box(&f64_args)).unwrap());
    });

    let void_args: [Value; 0] = [];
    c.bench_function("scalar_void", |b| {
        b.iter(|| ScalarBridge::call_void(black_box(&void_args)).unwrap());
    });
}

fn bench_sequence(c: &mut Criterion) {
    let args = [Value::List((0..1000i64).map(Value::Int).collect())];
    c.bench_function("sequence_1000_ints", |b| {
        b.iter(|| SequenceBridge::call(black_box(&args)).unwrap());
    });
}

fn bench_composite(c: &mut Criterion) {
    let with_text = [
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]),
        Value::from("foobar"),
    ];
    c.bench_function("composite_with_text", |b| {
        b.iter(|| CompositeBridge::call(black_box(&with_text)).unwrap());
    });

    let without_text = [
        Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]),
        Value::None,
    ];
    c.bench_function("composite_null_text", |b| {
        b.iter(|| CompositeBridge::call(black_box(&without_text)).unwrap());
    });
}

criterion_group!(benches, bench_scalar, bench_sequence, bench_composite);
criterion_main!(benches);
