use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SAMPLE: &str = r#"
piano: o4 c8 d e f g4 a b > c*2
  (tempo 120)
  [e f g]2 d4.~8
violin:
  V1: c d e V2: g a b V0:
"#;

fn bench_scan(c: &mut Criterion) {
    c.bench_function("scan sample score", |b| {
        b.iter(|| alda_lex::scan(black_box(SAMPLE), None).unwrap())
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
