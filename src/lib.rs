//! UNO rules engine: dealing, turn order, legal-move checking, special-card effects,
//! the UNO call/accusation protocol, scoring and match sequencing.

pub mod action;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod memento;
pub mod random;
pub mod round;
pub mod score;
pub mod state;
pub mod uno;
pub mod visualize;

pub use crate::action::{Action, ActionOutcome, PlayerId};
pub use crate::card::{Card, CardKind, Color};
pub use crate::deck::Deck;
pub use crate::error::{GameError, InvalidAction, MementoError};
pub use crate::game::{DEFAULT_TARGET_SCORE, Game, GameBuilder, GameConfig};
pub use crate::memento::{GameMemento, RoundMemento};
pub use crate::random::{Randomizer, SeededRng, Shuffler, identity_shuffler};
pub use crate::round::{DEFAULT_CARDS_PER_PLAYER, Round, RoundBuilder};
pub use crate::score::{hand_points, round_score};
pub use crate::state::{Direction, PlayerPublicState, RoundStatus, RoundView};
pub use crate::uno::UnoCall;
pub use crate::visualize::{VisualOptions, describe_action, render_state};
