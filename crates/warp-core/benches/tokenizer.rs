use criterion::{black_box, criterion_group, criterion_main, Criterion};
use warp_core::command;

const TYPICAL: &str = "-b 127.0.0.1:8086 -e 162.159.192.1 -k 'abc def' -cfon -country DE -rtt 800";

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_typical", |b| {
        b.iter(|| warp_core::tokenize(black_box(TYPICAL)))
    });

    let escaped = r"-k a\ b\ c\ d ".repeat(64);
    c.bench_function("tokenize_escaped_long", |b| {
        b.iter(|| warp_core::tokenize(black_box(&escaped)))
    });
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_and_validate", |b| {
        b.iter(|| command::parse(black_box(TYPICAL)))
    });
}

criterion_group!(benches, bench_tokenize, bench_parse);
criterion_main!(benches);
