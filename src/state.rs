use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{Card, Color};

/// Direction in which the turn travels around the table.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat reached after moving `steps` seats from `from` around a table of `seats`.
    pub fn step(self, from: PlayerId, steps: usize, seats: usize) -> PlayerId {
        let steps = steps % seats;
        match self {
            Direction::Clockwise => (from + steps) % seats,
            Direction::CounterClockwise => (from + seats - steps) % seats,
        }
    }
}

/// Status of a single round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundStatus {
    Ongoing,
    Finished { winner: PlayerId, score: u32 },
}

/// Public portion of a player's state that all opponents may observe.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub hand_size: usize,
    pub is_current: bool,
    pub is_dealer: bool,
    pub declared_uno: bool,
}

/// Round snapshot from one player's perspective, tailored for transports and bots.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundView {
    pub status: RoundStatus,
    pub self_player: PlayerId,
    pub player_in_turn: Option<PlayerId>,
    pub direction: Direction,
    pub current_color: Color,
    pub top_of_discard: Option<Card>,
    pub draw_pile_count: usize,
    pub discard_pile_count: usize,
    pub players: Vec<PlayerPublicState>,
    pub hand: Vec<Card>,
    /// Player currently exposed to an accusation, if any.
    pub uno_pending: Option<PlayerId>,
}
