use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rotrack_core::{classify, Criterion as EvalCriterion, EvaluationSession, PerformanceLevel};

fn make_criteria(per_category: usize, sections: usize) -> Vec<EvalCriterion> {
    let mut criteria = Vec::new();
    for category in PerformanceLevel::ALL {
        for i in 0..per_category {
            criteria.push(EvalCriterion::new(
                category,
                format!("Section {}", i % sections),
                i % 2 == 0,
            ));
        }
    }
    criteria
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("30 criteria", |b| {
        let criteria = make_criteria(10, 3);
        b.iter(|| classify(black_box(&criteria)))
    });

    group.bench_function("300 criteria", |b| {
        let criteria = make_criteria(100, 12);
        b.iter(|| classify(black_box(&criteria)))
    });

    group.finish();
}

fn bench_session_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_toggle");

    group.bench_function("toggle + relabel", |b| {
        let mut session = EvaluationSession::new(make_criteria(20, 4));
        b.iter(|| session.toggle(black_box(7)))
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_session_toggle);
criterion_main!(benches);
