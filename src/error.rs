use thiserror::Error;

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Errors that can occur when building or manipulating rounds and games.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("player count {0} is out of range, expected between 2 and 10")]
    InvalidPlayerCount(usize),
    #[error("dealer index {0} is out of range")]
    InvalidDealer(PlayerId),
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("invalid memento: {0}")]
    InvalidMemento(#[from] MementoError),
    #[error("player index {0} is out of range")]
    InvalidPlayer(PlayerId),
    #[error("not the specified player's turn")]
    NotPlayersTurn,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("round is already over")]
    RoundOver,
    #[error("game is already over")]
    GameOver,
    #[error("failed to encode memento: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode memento: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Details of rejected moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("player has no cards to play")]
    EmptyHand,
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("a color must be named when playing a wild card")]
    MissingColor,
    #[error("only wild cards accept a named color")]
    ColorNotAllowed,
    #[error("{card} cannot be played on {top} while the active color is {color}")]
    IllegalPlay { card: Card, top: Card, color: Color },
    #[error("wild draw four cannot be played while holding a card of the active color")]
    WildDrawFourBluff,
}

/// Inconsistencies found while restoring a snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MementoError {
    #[error("player count {0} is out of range")]
    PlayerCount(usize),
    #[error("{hands} hands recorded for {players} players")]
    HandCountMismatch { hands: usize, players: usize },
    #[error("more than one hand is empty")]
    MultipleEmptyHands,
    #[error("discard pile is empty")]
    EmptyDiscardPile,
    #[error("active color {color} disagrees with top card {top}")]
    ColorMismatch { color: Color, top: Card },
    #[error("dealer index {0} is out of range")]
    DealerOutOfRange(PlayerId),
    #[error("player in turn is missing while the round is ongoing")]
    MissingPlayerInTurn,
    #[error("player in turn {0} is out of range")]
    PlayerInTurnOutOfRange(PlayerId),
    #[error("player in turn recorded for a finished round")]
    PlayerInTurnAfterEnd,
    #[error("cards do not add up to exactly one standard deck")]
    CardsNotConserved,
    #[error("{scores} scores recorded for {players} players")]
    ScoreCountMismatch { scores: usize, players: usize },
    #[error("target score must be positive")]
    InvalidTargetScore,
    #[error("round numbers start at 1")]
    InvalidRoundNumber,
    #[error("recorded winner does not match the scores")]
    WinnerMismatch,
    #[error("round players do not match game players")]
    RoundPlayersMismatch,
    #[error("an unfinished game must carry a round")]
    MissingRound,
    #[error("round has ended but was never scored")]
    UnsettledRound,
    #[error("game has a winner but its round is still being played")]
    RoundOngoingAfterWin,
    #[error("final round was won by a different player than the game")]
    FinalRoundWinnerMismatch,
}
