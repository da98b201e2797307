use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use tongits_engine::cards::parse_cards;
use tongits_engine::rules::{classify_meld, is_valid_meld};
use tongits_engine::{GameRng, TongitsRules};

/// Benchmark set, run, ace-high run, and rejected melds
fn bench_classify_meld(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify_meld");
    for (name, tokens) in [
        ("set", "4H 4S 4D"),
        ("run", "5C 6C 7C 8C"),
        ("ace_high_run", "10S JS QS KS AS"),
        ("invalid", "KS AS 2S"),
    ] {
        let cards = parse_cards(tokens).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &cards, |b, cards| {
            b.iter(|| classify_meld(black_box(cards)));
        });
    }
    group.finish();
}

/// Benchmark scanning every 3-card combination of a 13-card hand
fn bench_hand_scan(c: &mut Criterion) {
    let hand = parse_cards("2C 9D 4H KS JC 7D 3S QH 5C 10D 8S AH 6C").unwrap();

    c.bench_function("scan_13_card_hand", |b| {
        b.iter(|| {
            let mut found = 0;
            for i in 0..hand.len() {
                for j in i + 1..hand.len() {
                    for k in j + 1..hand.len() {
                        if is_valid_meld(&[hand[i], hand[j], hand[k]]) {
                            found += 1;
                        }
                    }
                }
            }
            black_box(found)
        });
    });
}

/// Benchmark a full game played with fallback actions only
fn bench_fallback_playout(c: &mut Criterion) {
    let rules = TongitsRules::default();

    c.bench_function("fallback_playout", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            let mut rng = GameRng::new(seed);
            let state = rules.initialize_game(&mut rng);
            let mut state = rules.deal_initial_cards(&state, false, &mut rng).unwrap();
            loop {
                if let Some(over) = rules.finish(&state) {
                    break black_box(over);
                }
                let Some(action) = rules.fallback_action(&state, state.current_player) else {
                    break state;
                };
                state = rules.apply(&state, state.current_player, &action).unwrap();
            }
        });
    });
}

criterion_group!(benches, bench_classify_meld, bench_hand_scan, bench_fallback_playout);
criterion_main!(benches);
