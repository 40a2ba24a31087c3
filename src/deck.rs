use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::card::{Card, standard_deck};
use crate::random::Shuffler;

/// Ordered pile of cards. The front of the pile is its top.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Unshuffled 108-card deck.
    pub fn standard() -> Self {
        Self::new(standard_deck())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top(&self) -> Option<&Card> {
        self.cards.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Removes up to `count` cards from the top. Returns fewer when the pile runs out.
    pub fn draw(&mut self, count: usize) -> Vec<Card> {
        let count = count.min(self.cards.len());
        self.cards.drain(..count).collect()
    }

    pub fn push_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    pub fn shuffle(&mut self, shuffler: &mut dyn Shuffler) {
        let cards: Vec<Card> = std::mem::take(&mut self.cards).into();
        let expected = cards.len();
        let shuffled = shuffler.shuffle(cards);
        debug_assert_eq!(shuffled.len(), expected, "shuffler must permute, not resize");
        self.cards = shuffled.into();
    }

    /// Removes every card below the top one, leaving only the top in place.
    pub fn take_below_top(&mut self) -> Vec<Card> {
        if self.cards.len() <= 1 {
            return Vec::new();
        }
        self.cards.drain(1..).collect()
    }

    /// Removes the card nearest the top that satisfies `predicate`.
    pub fn take_first(&mut self, predicate: impl Fn(&Card) -> bool) -> Option<Card> {
        let position = self.cards.iter().position(predicate)?;
        self.cards.remove(position)
    }

    /// Appends cards underneath the current pile.
    pub fn extend_bottom(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Top-first copy of the pile.
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }
}
