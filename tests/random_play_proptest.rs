//! Property-based tests: random play never loses, duplicates, or invents a
//! card, and rejected actions never change the state.

use proptest::prelude::*;
use tongits_engine::core::check_invariants;
use tongits_engine::deal::WeightedTowardPlayer;
use tongits_engine::{
    Action, ActionKind, FightRule, GameRng, GameState, Phase, ShuffleKind, TongitsConfig,
    TongitsRules,
};

/// Turn a raw choice into an action for the current player. Choices may be
/// illegal on purpose.
fn pick_action(rules: &TongitsRules, state: &GameState, choice: u32) -> Action {
    let player = state.current_player;
    let hand_len = state.player(player).hand.len().max(1);
    let index = |salt: u32| (choice.wrapping_mul(31).wrapping_add(salt) as usize) % (hand_len + 1);

    let kinds = rules.legal_actions(state, player);
    if kinds.is_empty() {
        return Action::draw_from_deck();
    }
    match kinds[choice as usize % kinds.len()] {
        ActionKind::Draw => {
            if choice % 4 == 0 {
                Action::draw_from_discard()
            } else {
                Action::draw_from_deck()
            }
        }
        ActionKind::Discard => Action::discard(index(0)),
        ActionKind::CreateMeld => Action::create_meld(&[index(1), index(2), index(3)]),
        ActionKind::Fight => Action::fight(&[index(4)]),
    }
}

fn rules_for(biased: bool, rank_sorted: bool, unchecked_fight: bool) -> TongitsRules {
    let mut config = TongitsConfig::default();
    if unchecked_fight {
        config = config.with_fight(FightRule::Unchecked);
    }
    if biased {
        config = config.with_deal_bias(WeightedTowardPlayer::legacy());
    }
    if rank_sorted {
        config = config.with_shuffle(ShuffleKind::legacy());
    }
    TongitsRules::new(config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_conserves_cards(
        seed in any::<u64>(),
        biased in any::<bool>(),
        rank_sorted in any::<bool>(),
        unchecked_fight in any::<bool>(),
        choices in prop::collection::vec(any::<u32>(), 0..200),
    ) {
        let rules = rules_for(biased, rank_sorted, unchecked_fight);
        let mut rng = GameRng::new(seed);
        let state = rules.initialize_game(&mut rng);
        let mut state = rules.deal_initial_cards(&state, biased, &mut rng).unwrap();
        prop_assert!(check_invariants(&state).is_empty());

        for choice in choices {
            if state.is_over() {
                break;
            }
            let action = pick_action(&rules, &state, choice);
            let before = state.clone();

            match rules.apply(&state, state.current_player, &action) {
                Ok(next) => {
                    prop_assert_eq!(next.history.len(), before.history.len() + 1);
                    state = rules.finish(&next).unwrap_or(next);
                }
                Err(_) => {
                    prop_assert_eq!(&state, &before);
                }
            }

            let violations = check_invariants(&state);
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", action, violations);
        }
    }

    #[test]
    fn fallback_actions_are_always_accepted(seed in any::<u64>(), turns in 1usize..120) {
        let rules = TongitsRules::default();
        let mut rng = GameRng::new(seed);
        let state = rules.initialize_game(&mut rng);
        let mut state = rules.deal_initial_cards(&state, false, &mut rng).unwrap();

        for _ in 0..turns {
            if let Some(over) = rules.finish(&state) {
                state = over;
            }
            let Some(action) = rules.fallback_action(&state, state.current_player) else {
                break;
            };
            state = rules.apply(&state, state.current_player, &action).unwrap();
        }

        prop_assert!(check_invariants(&state).is_empty());
        if state.phase == Phase::GameOver {
            prop_assert!(state.result.is_some());
        }
    }
}
