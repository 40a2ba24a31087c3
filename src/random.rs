//! Randomness ports. The engine never draws randomness on its own; shuffling and
//! dealer selection are injected so tests can stack decks deterministically.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::card::Card;

/// Permutes a sequence of cards.
pub trait Shuffler: Send {
    fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card>;
}

impl<F> Shuffler for F
where
    F: FnMut(Vec<Card>) -> Vec<Card> + Send,
{
    fn shuffle(&mut self, cards: Vec<Card>) -> Vec<Card> {
        self(cards)
    }
}

/// Produces a bounded random integer in `0..bound`.
pub trait Randomizer {
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<F> Randomizer for F
where
    F: FnMut(usize) -> usize,
{
    fn next_below(&mut self, bound: usize) -> usize {
        self(bound)
    }
}

/// Seedable source backing both ports.
#[derive(Clone, Debug)]
pub struct SeededRng {
    rng: StdRng,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Shuffler for SeededRng {
    fn shuffle(&mut self, mut cards: Vec<Card>) -> Vec<Card> {
        cards.shuffle(&mut self.rng);
        cards
    }
}

impl Randomizer for SeededRng {
    fn next_below(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Shuffler that leaves the order untouched.
pub fn identity_shuffler() -> impl Shuffler {
    |cards: Vec<Card>| cards
}
