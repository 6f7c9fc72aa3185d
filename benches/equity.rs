use holdem_equity::equity_calculator::{calculate_equity, EquityConfig};
use holdem_equity::hand_evaluator::{evaluate, Hand, LookupEvaluator};
use holdem_equity::hole_cards::{parse_cards, HoleCards};

criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        bench_lookup,
        bench_heads_up,
        bench_heads_up_sharded,
}

fn bench_lookup(c: &mut criterion::Criterion) {
    let hand = Hand::from_cards(&parse_cards("AsKhQdJc9s3h2d").unwrap());
    c.bench_function("evaluate a 7-card Hand", |b| {
        b.iter(|| evaluate(criterion::black_box(&hand)))
    });
}

fn bench_heads_up(c: &mut criterion::Criterion) {
    let hands = HoleCards::from_strings(&["AhAd", "7c2s"]).unwrap();
    let config = EquityConfig {
        sample_size: 10_000,
        threads: 1,
    };
    c.bench_function("simulate 10k heads up boards", |b| {
        b.iter(|| calculate_equity(&hands, &config, &LookupEvaluator).unwrap())
    });
}

fn bench_heads_up_sharded(c: &mut criterion::Criterion) {
    let hands = HoleCards::from_strings(&["AhAd", "7c2s"]).unwrap();
    let config = EquityConfig {
        sample_size: 10_000,
        threads: 4,
    };
    c.bench_function("simulate 10k heads up boards on 4 threads", |b| {
        b.iter(|| calculate_equity(&hands, &config, &LookupEvaluator).unwrap())
    });
}
