mod common;

use common::{arranged, n};
use unobot::{
    Card, Color, Game, GameError, GameMemento, MementoError, Round, RoundMemento, UnoCall,
    identity_shuffler,
};

fn ongoing() -> RoundMemento {
    arranged(
        vec![
            vec![n(Color::Red, 3), n(Color::Red, 4)],
            vec![n(Color::Green, 1), n(Color::Green, 2), n(Color::Green, 3)],
        ],
        vec![n(Color::Red, 9)],
        vec![],
        Color::Red,
        Some(0),
    )
}

fn finished() -> RoundMemento {
    arranged(
        vec![vec![], vec![n(Color::Green, 1), Card::Reverse(Color::Blue)]],
        vec![n(Color::Red, 9)],
        vec![],
        Color::Red,
        None,
    )
}

fn game_memento(round: RoundMemento) -> GameMemento {
    GameMemento {
        players: round.players.clone(),
        target_score: 500,
        cards_per_player: 7,
        scores: vec![0, 0],
        round_number: 1,
        current_round: Some(round),
        winner: None,
    }
}

#[test]
fn round_snapshot_restores_identically() -> Result<(), GameError> {
    let round = Round::builder(["Ann", "Bob", "Cid", "Dee"])?
        .with_seed(77)
        .with_dealer(1)
        .build()?;
    let memento = round.to_memento();
    let restored = Round::from_memento(memento.clone(), identity_shuffler())?;
    assert_eq!(restored.to_memento(), memento);
    assert_eq!(restored.player_in_turn(), round.player_in_turn());
    assert_eq!(restored.current_color(), round.current_color());
    assert_eq!(restored.dealer(), 1);
    Ok(())
}

#[test]
fn restored_round_starts_with_closed_window() -> Result<(), GameError> {
    let mut round = Round::from_memento(ongoing(), identity_shuffler())?;
    round.play(0, None)?;
    assert_eq!(round.uno_call().accused(), Some(0));

    let restored = Round::from_memento(round.to_memento(), identity_shuffler())?;
    assert_eq!(restored.uno_call(), UnoCall::Idle);
    assert!(!restored.can_catch(1, 0));
    assert_eq!(restored.player_hand(0)?, round.player_hand(0)?);
    Ok(())
}

#[test]
fn finished_round_restores_winner_and_score() -> Result<(), GameError> {
    let round = Round::from_memento(finished(), identity_shuffler())?;
    assert!(round.has_ended());
    assert_eq!(round.winner(), Some(0));
    assert_eq!(round.score(), Some(21));
    assert_eq!(round.player_in_turn(), None);
    assert_eq!(round.to_memento(), finished());
    Ok(())
}

#[test]
fn finished_round_must_not_name_a_player_in_turn() {
    let mut memento = finished();
    memento.player_in_turn = Some(1);
    let result = Round::from_memento(memento, identity_shuffler());
    assert!(matches!(
        result,
        Err(GameError::InvalidMemento(MementoError::PlayerInTurnAfterEnd))
    ));
}

#[test]
fn wild_on_top_accepts_any_named_color() -> Result<(), GameError> {
    let memento = arranged(
        vec![
            vec![n(Color::Red, 3), n(Color::Red, 4)],
            vec![n(Color::Green, 1), n(Color::Green, 2)],
        ],
        vec![Card::Wild, n(Color::Red, 9)],
        vec![],
        Color::Blue,
        Some(1),
    );
    let round = Round::from_memento(memento, identity_shuffler())?;
    assert_eq!(round.current_color(), Color::Blue);
    assert!(!round.can_play_any());
    Ok(())
}

#[test]
fn colored_top_must_match_active_color() {
    let mut memento = ongoing();
    memento.current_color = Color::Green;
    let result = Round::from_memento(memento, identity_shuffler());
    assert!(matches!(
        result,
        Err(GameError::InvalidMemento(MementoError::ColorMismatch {
            color: Color::Green,
            ..
        }))
    ));
}

#[test]
fn corrupt_bytes_are_reported() {
    let result = RoundMemento::from_bytes(&[0xFF, 0xFF, 0xFF]);
    assert!(matches!(result, Err(GameError::Decode(_))));
}

#[test]
fn round_bytes_round_trip() -> Result<(), GameError> {
    let memento = ongoing();
    let decoded = RoundMemento::from_bytes(&memento.to_bytes()?)?;
    assert_eq!(decoded, memento);
    Ok(())
}

#[test]
fn game_snapshot_rejects_inconsistent_scores() {
    let mut memento = game_memento(ongoing());
    memento.scores = vec![0];
    assert_eq!(
        memento.validate(),
        Err(MementoError::ScoreCountMismatch {
            scores: 1,
            players: 2
        })
    );

    let mut memento = game_memento(ongoing());
    memento.scores = vec![600, 0];
    assert_eq!(memento.validate(), Err(MementoError::WinnerMismatch));

    let mut memento = game_memento(ongoing());
    memento.winner = Some(1);
    assert_eq!(memento.validate(), Err(MementoError::WinnerMismatch));

    let mut memento = game_memento(ongoing());
    memento.target_score = 0;
    assert_eq!(memento.validate(), Err(MementoError::InvalidTargetScore));
}

#[test]
fn game_snapshot_requires_a_live_round_until_won() {
    let mut memento = game_memento(ongoing());
    memento.current_round = None;
    assert_eq!(memento.validate(), Err(MementoError::MissingRound));

    let memento = game_memento(finished());
    assert_eq!(memento.validate(), Err(MementoError::UnsettledRound));

    let mut memento = game_memento(finished());
    memento.scores = vec![521, 0];
    memento.winner = Some(0);
    assert_eq!(memento.validate(), Ok(()));

    let mut memento = game_memento(ongoing());
    if let Some(round) = memento.current_round.as_mut() {
        round.players[1] = String::from("Zed");
    }
    assert_eq!(memento.validate(), Err(MementoError::RoundPlayersMismatch));
}

#[test]
fn finished_game_restores_without_round_play() -> Result<(), GameError> {
    let mut memento = game_memento(finished());
    memento.scores = vec![521, 0];
    memento.winner = Some(0);
    let mut game = Game::from_memento(memento, identity_shuffler())?;
    assert!(game.has_ended());
    assert_eq!(game.winner(), Some(0));
    assert!(matches!(game.draw(), Err(GameError::GameOver)));
    Ok(())
}

#[test]
fn won_game_must_carry_its_final_round() {
    let mut memento = game_memento(ongoing());
    memento.target_score = 100;
    memento.scores = vec![0, 500];
    memento.winner = Some(1);
    assert_eq!(memento.validate(), Err(MementoError::RoundOngoingAfterWin));
    let result = Game::from_memento(memento, identity_shuffler());
    assert!(matches!(
        result,
        Err(GameError::InvalidMemento(MementoError::RoundOngoingAfterWin))
    ));

    let mut memento = game_memento(finished());
    memento.scores = vec![0, 521];
    memento.winner = Some(1);
    assert_eq!(
        memento.validate(),
        Err(MementoError::FinalRoundWinnerMismatch)
    );

    let mut memento = game_memento(finished());
    memento.scores = vec![521, 0];
    memento.winner = Some(0);
    memento.current_round = None;
    assert_eq!(memento.validate(), Ok(()));
}

#[test]
fn round_numbers_start_at_one() {
    let mut memento = game_memento(ongoing());
    memento.round_number = 0;
    assert_eq!(memento.validate(), Err(MementoError::InvalidRoundNumber));
}
