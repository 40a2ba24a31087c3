//! Scoring utilities for finished rounds.
//!
//! Current scoring rule (winner-only):
//!   points = sum of every card left in the opponents' hands, where numbered cards
//!   count their face value, Skip/Reverse/Draw-Two count 20 and wild cards count 50.
//! Non-winning players receive 0 points.

use crate::action::PlayerId;
use crate::card::Card;

/// Points held in a single hand.
pub fn hand_points(hand: &[Card]) -> u32 {
    hand.iter().map(Card::points).sum()
}

/// Compute the winner's points from every player's remaining hand.
///
/// Assumes `winner` is a valid index into `hands`.
pub fn round_score(hands: &[Vec<Card>], winner: PlayerId) -> u32 {
    hands
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != winner)
        .map(|(_, hand)| hand_points(hand))
        .sum()
}
