//! Plain snapshots of rounds and games for persistence and network transit.
//!
//! Restoring a snapshot re-validates every structural invariant. Inconsistencies are
//! reported as [`MementoError`]s and never repaired.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color, MAX_PLAYERS, MIN_PLAYERS, standard_deck};
use crate::deck::Deck;
use crate::error::{GameError, MementoError};
use crate::random::Shuffler;
use crate::round::Round;
use crate::state::Direction;

/// Snapshot sufficient to reconstruct a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundMemento {
    pub players: Vec<String>,
    pub hands: Vec<Vec<Card>>,
    pub draw_pile: Vec<Card>,
    /// Top card first.
    pub discard_pile: Vec<Card>,
    pub current_color: Color,
    pub current_direction: Direction,
    pub dealer: PlayerId,
    /// Absent once the round has ended.
    pub player_in_turn: Option<PlayerId>,
}

/// Snapshot sufficient to reconstruct a game in progress or a finished game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMemento {
    pub players: Vec<String>,
    pub target_score: u32,
    pub cards_per_player: usize,
    pub scores: Vec<u32>,
    pub round_number: u32,
    pub current_round: Option<RoundMemento>,
    pub winner: Option<PlayerId>,
}

impl RoundMemento {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let (memento, _): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(memento)
    }

    /// Checks every structural invariant a live round maintains.
    pub fn validate(&self) -> Result<(), MementoError> {
        let player_count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(MementoError::PlayerCount(player_count));
        }
        if self.hands.len() != player_count {
            return Err(MementoError::HandCountMismatch {
                hands: self.hands.len(),
                players: player_count,
            });
        }
        let empty_hands = self.hands.iter().filter(|hand| hand.is_empty()).count();
        if empty_hands > 1 {
            return Err(MementoError::MultipleEmptyHands);
        }
        let Some(top) = self.discard_pile.first() else {
            return Err(MementoError::EmptyDiscardPile);
        };
        if let Some(color) = top.color() {
            if color != self.current_color {
                return Err(MementoError::ColorMismatch {
                    color: self.current_color,
                    top: *top,
                });
            }
        }
        if self.dealer >= player_count {
            return Err(MementoError::DealerOutOfRange(self.dealer));
        }
        let ended = empty_hands == 1;
        match (self.player_in_turn, ended) {
            (None, false) => return Err(MementoError::MissingPlayerInTurn),
            (Some(_), true) => return Err(MementoError::PlayerInTurnAfterEnd),
            (Some(player), false) if player >= player_count => {
                return Err(MementoError::PlayerInTurnOutOfRange(player));
            }
            _ => {}
        }
        if !self.conserves_deck() {
            return Err(MementoError::CardsNotConserved);
        }
        Ok(())
    }

    /// The player with an empty hand, if the round has ended.
    fn finished_by(&self) -> Option<PlayerId> {
        self.hands.iter().position(Vec::is_empty)
    }

    fn conserves_deck(&self) -> bool {
        let mut counts: HashMap<Card, i32> = HashMap::new();
        for card in standard_deck() {
            *counts.entry(card).or_default() += 1;
        }
        let recorded = self
            .hands
            .iter()
            .flatten()
            .chain(&self.draw_pile)
            .chain(&self.discard_pile);
        for card in recorded {
            *counts.entry(*card).or_default() -= 1;
        }
        counts.values().all(|count| *count == 0)
    }
}

impl GameMemento {
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        let (memento, _): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(memento)
    }

    pub fn validate(&self) -> Result<(), MementoError> {
        let player_count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(MementoError::PlayerCount(player_count));
        }
        if self.scores.len() != player_count {
            return Err(MementoError::ScoreCountMismatch {
                scores: self.scores.len(),
                players: player_count,
            });
        }
        if self.target_score == 0 {
            return Err(MementoError::InvalidTargetScore);
        }
        if self.round_number == 0 {
            return Err(MementoError::InvalidRoundNumber);
        }
        let leaders: Vec<PlayerId> = self
            .scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score >= self.target_score)
            .map(|(player, _)| player)
            .collect();
        match self.winner {
            Some(winner) if leaders != [winner] => return Err(MementoError::WinnerMismatch),
            None if !leaders.is_empty() => return Err(MementoError::WinnerMismatch),
            _ => {}
        }
        match &self.current_round {
            Some(round) => {
                round.validate()?;
                if round.players != self.players {
                    return Err(MementoError::RoundPlayersMismatch);
                }
                match (self.winner, round.finished_by()) {
                    (None, Some(_)) => return Err(MementoError::UnsettledRound),
                    (Some(_), None) => return Err(MementoError::RoundOngoingAfterWin),
                    (Some(winner), Some(finisher)) if winner != finisher => {
                        return Err(MementoError::FinalRoundWinnerMismatch);
                    }
                    _ => {}
                }
            }
            None if self.winner.is_none() => return Err(MementoError::MissingRound),
            None => {}
        }
        Ok(())
    }
}

impl Round {
    pub fn to_memento(&self) -> RoundMemento {
        RoundMemento {
            players: self.players().to_vec(),
            hands: self.hands().to_vec(),
            draw_pile: self.draw_pile().to_vec(),
            discard_pile: self.discard_pile().to_vec(),
            current_color: self.current_color(),
            current_direction: self.direction(),
            dealer: self.dealer(),
            player_in_turn: self.player_in_turn(),
        }
    }

    /// Rebuilds a round from a snapshot. The accusation window always restarts closed.
    pub fn from_memento(
        memento: RoundMemento,
        shuffler: impl Shuffler + 'static,
    ) -> Result<Self, GameError> {
        Self::from_memento_boxed(memento, Box::new(shuffler))
    }

    pub(crate) fn from_memento_boxed(
        memento: RoundMemento,
        shuffler: Box<dyn Shuffler>,
    ) -> Result<Self, GameError> {
        memento.validate()?;
        let RoundMemento {
            players,
            hands,
            draw_pile,
            discard_pile,
            current_color,
            current_direction,
            dealer,
            player_in_turn,
        } = memento;
        Ok(Round::from_parts(
            players,
            hands,
            Deck::new(draw_pile),
            Deck::new(discard_pile),
            current_color,
            current_direction,
            dealer,
            player_in_turn,
            shuffler,
        ))
    }
}
