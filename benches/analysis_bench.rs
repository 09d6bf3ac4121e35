use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tacticore::{analyze_key_event, clamp_to_100, compute_match_patterns, MatchEvent};

fn synthetic_match(events: usize) -> Vec<MatchEvent> {
    let types = ["GOAL", "SHOT", "TURNOVER", "PASS"];
    let phases = ["transition", "build-up", "set-piece", "Transition"];

    (0..events)
        .map(|i| {
            MatchEvent::new(1, types[i % types.len()])
                .with_time((i % 95) as i32, (i % 60) as i32)
                .with_phase(phases[i % phases.len()])
                .with_position((i * 7 % 101) as f64, (i * 13 % 101) as f64)
        })
        .collect()
}

fn bench_responsibility(c: &mut Criterion) {
    let events = synthetic_match(200);
    let goal = MatchEvent::new(1, "GOAL")
        .with_time(70, 0)
        .with_phase("transition")
        .with_position(90.0, 50.0);

    c.bench_function("analyze_goal_200_events", |b| {
        b.iter(|| black_box(analyze_key_event(black_box(&goal), black_box(&events))))
    });

    c.bench_function("clamp_to_100", |b| {
        b.iter(|| black_box(clamp_to_100(black_box(34), black_box(52), black_box(41))))
    });
}

fn bench_patterns(c: &mut Criterion) {
    let small = synthetic_match(50);
    let large = synthetic_match(5_000);

    c.bench_function("patterns_50_events", |b| {
        b.iter(|| black_box(compute_match_patterns(black_box(&small))))
    });

    c.bench_function("patterns_5000_events", |b| {
        b.iter(|| black_box(compute_match_patterns(black_box(&large))))
    });
}

criterion_group!(benches, bench_responsibility, bench_patterns);
criterion_main!(benches);
