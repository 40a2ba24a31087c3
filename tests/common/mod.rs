#![allow(dead_code)]

use unobot::card::standard_deck;
use unobot::{Card, Color, Direction, Round, RoundMemento, Shuffler, identity_shuffler};

pub fn n(color: Color, number: u8) -> Card {
    Card::Numbered(color, number)
}

pub fn names(count: usize) -> Vec<String> {
    ["Ann", "Bob", "Cid", "Dee", "Eve", "Fay", "Gus", "Hal", "Ivy", "Jon"]
        .iter()
        .take(count)
        .map(|name| name.to_string())
        .collect()
}

/// Moves `prefix` to the front of `cards`, keeping the remaining order.
pub fn stack(mut cards: Vec<Card>, prefix: &[Card]) -> Vec<Card> {
    for card in prefix {
        let position = cards
            .iter()
            .position(|candidate| candidate == card)
            .expect("card available in deck");
        cards.remove(position);
    }
    let mut stacked = prefix.to_vec();
    stacked.extend(cards);
    stacked
}

/// Shuffler that stacks `prefix` on top for the first shuffle and leaves later shuffles untouched.
pub fn stacked(prefix: Vec<Card>) -> impl Shuffler {
    let mut pending = Some(prefix);
    move |cards: Vec<Card>| match pending.take() {
        Some(prefix) => stack(cards, &prefix),
        None => cards,
    }
}

/// Deck order dealing `hands` in seat order, then turning up `opening`.
pub fn deal_order(hands: &[Vec<Card>], opening: Card) -> Vec<Card> {
    let mut order: Vec<Card> = hands.iter().flatten().copied().collect();
    order.push(opening);
    order
}

/// Snapshot with the given hands and discard pile (top first); every other card sits in
/// the draw pile, `draw_top` first and the rest in standard deck order.
pub fn arranged(
    hands: Vec<Vec<Card>>,
    discard: Vec<Card>,
    draw_top: Vec<Card>,
    color: Color,
    player_in_turn: Option<usize>,
) -> RoundMemento {
    let mut rest = standard_deck();
    for card in hands.iter().flatten().chain(&discard) {
        let position = rest
            .iter()
            .position(|candidate| candidate == card)
            .expect("card available in deck");
        rest.remove(position);
    }
    RoundMemento {
        players: names(hands.len()),
        hands,
        draw_pile: stack(rest, &draw_top),
        discard_pile: discard,
        current_color: color,
        current_direction: Direction::Clockwise,
        dealer: 0,
        player_in_turn,
    }
}

pub fn arranged_round(
    hands: Vec<Vec<Card>>,
    top: Card,
    draw_top: Vec<Card>,
    color: Color,
    player_in_turn: usize,
) -> Round {
    let memento = arranged(hands, vec![top], draw_top, color, Some(player_in_turn));
    Round::from_memento(memento, identity_shuffler()).expect("valid arrangement")
}

/// Asserts the hands and both piles add up to exactly one standard deck.
pub fn assert_conserved(round: &Round) {
    let mut all: Vec<Card> = round.hands().iter().flatten().copied().collect();
    all.extend(round.draw_pile().iter().copied());
    all.extend(round.discard_pile().iter().copied());
    let mut expected = standard_deck();
    let key = |card: &Card| format!("{card:?}");
    all.sort_by_key(key);
    expected.sort_by_key(key);
    assert_eq!(all, expected);
}
