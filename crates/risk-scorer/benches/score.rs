use criterion::{black_box, criterion_group, criterion_main, Criterion};
use risk_scorer::score;

fn bench_score(c: &mut Criterion) {
    c.bench_function("score", |b| {
        b.iter(|| score(black_box(27.3), black_box(64.0)))
    });

    c.bench_function("score_sweep", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for step in 0..=400 {
                let risk = step as f64 / 10.0;
                total += score(black_box(risk), black_box(55.0)).adjusted_confidence;
            }
            total
        })
    });
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
