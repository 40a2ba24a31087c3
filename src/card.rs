use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four suit colors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
        };
        f.write_str(name)
    }
}

/// Representation of an UNO card. Cards are plain values; duplicates are expected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Colored card carrying a number between 0 and 9.
    Numbered(Color, u8),
    Skip(Color),
    Reverse(Color),
    DrawTwo(Color),
    /// Wild card. The player names the next active color.
    Wild,
    /// Wild card that also forces the next player to draw four.
    WildDrawFour,
}

/// Card type without color or number, used for type-to-type matching.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Numbered,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

pub const MAX_CARD_NUMBER: u8 = 9;
pub const DECK_SIZE: usize = 108;
pub const WILD_COUNT: usize = 4;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const ACTION_CARD_POINTS: u32 = 20;
pub const WILD_CARD_POINTS: u32 = 50;

impl Card {
    #[inline]
    pub fn kind(&self) -> CardKind {
        match self {
            Card::Numbered(..) => CardKind::Numbered,
            Card::Skip(_) => CardKind::Skip,
            Card::Reverse(_) => CardKind::Reverse,
            Card::DrawTwo(_) => CardKind::DrawTwo,
            Card::Wild => CardKind::Wild,
            Card::WildDrawFour => CardKind::WildDrawFour,
        }
    }

    /// Returns the printed color, or `None` for wild cards.
    #[inline]
    pub fn color(&self) -> Option<Color> {
        match self {
            Card::Numbered(color, _)
            | Card::Skip(color)
            | Card::Reverse(color)
            | Card::DrawTwo(color) => Some(*color),
            Card::Wild | Card::WildDrawFour => None,
        }
    }

    #[inline]
    pub fn number(&self) -> Option<u8> {
        match self {
            Card::Numbered(_, number) => Some(*number),
            _ => None,
        }
    }

    #[inline]
    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDrawFour)
    }

    /// Points this card is worth when left in a losing hand.
    pub fn points(&self) -> u32 {
        match self {
            Card::Numbered(_, number) => u32::from(*number),
            Card::Skip(_) | Card::Reverse(_) | Card::DrawTwo(_) => ACTION_CARD_POINTS,
            Card::Wild | Card::WildDrawFour => WILD_CARD_POINTS,
        }
    }

    /// Base matching rule against the top of the discard pile.
    ///
    /// Wild cards always match here; the WildDrawFour hand restriction depends on the
    /// acting player's hand and is enforced by the round.
    pub fn matches(&self, top: &Card, active: Color) -> bool {
        if self.is_wild() {
            return true;
        }
        if self.color() == Some(active) {
            return true;
        }
        match (self, top) {
            (Card::Numbered(_, played), Card::Numbered(_, shown)) => played == shown,
            (Card::Numbered(..), _) => false,
            _ => self.kind() == top.kind(),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Numbered(color, number) => write!(f, "{color} {number}"),
            Card::Skip(color) => write!(f, "{color} Skip"),
            Card::Reverse(color) => write!(f, "{color} Reverse"),
            Card::DrawTwo(color) => write!(f, "{color} Draw Two"),
            Card::Wild => f.write_str("Wild"),
            Card::WildDrawFour => f.write_str("Wild Draw Four"),
        }
    }
}

/// Builds the standard 108-card deck in deterministic order (unshuffled).
pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for color in Color::ALL {
        deck.push(Card::Numbered(color, 0));
        for number in 1..=MAX_CARD_NUMBER {
            deck.push(Card::Numbered(color, number));
            deck.push(Card::Numbered(color, number));
        }
        for _ in 0..2 {
            deck.push(Card::Skip(color));
            deck.push(Card::Reverse(color));
            deck.push(Card::DrawTwo(color));
        }
    }
    deck.extend(std::iter::repeat(Card::Wild).take(WILD_COUNT));
    deck.extend(std::iter::repeat(Card::WildDrawFour).take(WILD_COUNT));
    deck
}
