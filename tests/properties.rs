//! Property tests over randomly driven rounds and matches.
//!
//! Properties tested:
//! - Hands and piles always add up to one standard deck
//! - Exactly one player is in turn while a round is ongoing, none after it ends
//! - Every snapshot taken mid-round validates and restores to the same snapshot
//! - Rejected actions leave the round untouched

mod common;

use common::{assert_conserved, names};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use unobot::{Action, Game, Round, identity_shuffler};

const MAX_STEPS: usize = 400;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    }
}

fn random_round(seed: u64, players: usize) -> Round {
    Round::builder(names(players))
        .and_then(|builder| builder.with_seed(seed).with_dealer(seed as usize % players).build())
        .expect("valid round")
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_round_invariants_hold(
        seed in any::<u64>(),
        players in 2usize..=10,
        choices in prop::collection::vec(any::<u64>(), 1..MAX_STEPS),
    ) {
        let mut round = random_round(seed, players);
        for choice in choices {
            if round.has_ended() {
                break;
            }
            let current = round.player_in_turn().expect("ongoing round has a player in turn");
            let actions = round.legal_actions(current).expect("player in range");
            prop_assert!(!actions.is_empty());
            let action = actions[choice as usize % actions.len()].clone();
            round.apply_action(current, action).expect("legal action applies");

            assert_conserved(&round);
            prop_assert_eq!(round.player_in_turn().is_some(), !round.has_ended());
            let memento = round.to_memento();
            prop_assert_eq!(memento.validate(), Ok(()));
        }
    }

    #[test]
    fn prop_snapshot_restores_exactly(
        seed in any::<u64>(),
        players in 2usize..=6,
        steps in 0usize..60,
    ) {
        let mut round = random_round(seed, players);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..steps {
            let Some(current) = round.player_in_turn() else {
                break;
            };
            let actions = round.legal_actions(current).expect("player in range");
            let action = actions.choose(&mut rng).cloned().expect("draw is always legal");
            round.apply_action(current, action).expect("legal action applies");
        }
        let memento = round.to_memento();
        let restored = Round::from_memento(memento.clone(), identity_shuffler())
            .expect("snapshot restores");
        prop_assert_eq!(restored.to_memento(), memento);
        prop_assert_eq!(restored.winner(), round.winner());
        prop_assert_eq!(restored.score(), round.score());
    }

    #[test]
    fn prop_rejected_actions_change_nothing(
        seed in any::<u64>(),
        players in 2usize..=10,
        bad_index in 0usize..40,
    ) {
        let mut round = random_round(seed, players);
        let current = round.player_in_turn().expect("fresh round is ongoing");
        let waiting = (current + 1) % players;
        let before = round.to_memento();

        prop_assert!(round.apply_action(waiting, Action::Draw).is_err());
        let hand_size = round.player_hand(current).expect("player in range").len();
        if bad_index >= hand_size {
            prop_assert!(round.play(bad_index, None).is_err());
        }
        prop_assert!(!round.catch_uno_failure(waiting, current));
        prop_assert_eq!(round.to_memento(), before);
    }

    #[test]
    fn prop_match_scores_never_shrink(seed in any::<u64>(), players in 2usize..=4) {
        let mut game = Game::builder(names(players))
            .and_then(|builder| builder.with_seed(seed).with_target_score(100).build())
            .expect("valid game");
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        let mut previous = game.scores().to_vec();
        for _ in 0..5_000 {
            if game.has_ended() {
                break;
            }
            let current = game
                .round()
                .and_then(Round::player_in_turn)
                .expect("a round is in progress");
            let actions = game.legal_actions(current).expect("player in range");
            let action = actions.choose(&mut rng).cloned().expect("draw is always legal");
            game.apply_action(current, action).expect("legal action applies");
            for (now, before) in game.scores().iter().zip(&previous) {
                prop_assert!(now >= before);
            }
            previous = game.scores().to_vec();
        }
        if let Some(winner) = game.winner() {
            prop_assert!(game.scores()[winner] >= 100);
        }
    }
}
