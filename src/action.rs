use serde::{Deserialize, Serialize};

use crate::card::{Card, Color};

/// Zero-based index of a player within the round.
pub type PlayerId = usize;

/// Action a player can submit to a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from the hand. Wild cards require a named color, other cards forbid one.
    Play {
        card_index: usize,
        named_color: Option<Color>,
    },
    /// Draw a single card from the draw pile.
    Draw,
    /// Declare a low hand ("UNO").
    SayUno,
    /// Accuse a player of failing to declare their last card.
    CatchUnoFailure { accused: PlayerId },
}

impl Action {
    pub fn play(card_index: usize) -> Self {
        Action::Play {
            card_index,
            named_color: None,
        }
    }

    pub fn play_wild(card_index: usize, color: Color) -> Self {
        Action::Play {
            card_index,
            named_color: Some(color),
        }
    }

    /// True for actions that only the player in turn may take.
    pub fn requires_turn(&self) -> bool {
        matches!(self, Action::Play { .. } | Action::Draw)
    }
}

/// Result of a successfully applied action.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    Played(Card),
    /// The drawn card, or `None` when both piles were exhausted.
    Drew(Option<Card>),
    /// Whether the declaration was recorded.
    Declared(bool),
    /// Whether the accusation was upheld.
    Caught(bool),
}
