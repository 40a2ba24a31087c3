use std::fmt::Write;

use crate::action::Action;
use crate::card::Card;
use crate::state::{Direction, RoundStatus, RoundView};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_pile_sizes: bool,
    pub show_uno_status: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_pile_sizes: true,
            show_uno_status: true,
        }
    }
}

pub fn render_state(state: &RoundView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &RoundView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        RoundStatus::Ongoing => String::from("Ongoing"),
        RoundStatus::Finished { winner, score } => {
            format!("Finished (winner: Player {winner}, {score} points)")
        }
    };
    let _ = writeln!(out, "Round status: {status}");
    match state.player_in_turn {
        Some(current) => {
            let you = if current == state.self_player { " (You)" } else { "" };
            let _ = writeln!(out, "Current player: {current}{you}");
        }
        None => {
            let _ = writeln!(out, "Current player: --");
        }
    }
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let top = state
        .top_of_discard
        .map(format_card)
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Top card: {top}  |  Active color: {}  |  Direction: {direction}",
        state.current_color
    );
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            state.draw_pile_count, state.discard_pile_count
        );
    }
    if options.show_uno_status {
        if let Some(accused) = state.uno_pending {
            let _ = writeln!(out, "Player {accused} is down to one card");
        }
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player { " (You)" } else { "" };
        let dealer_tag = if player.is_dealer { " [dealer]" } else { "" };
        let uno_tag = if player.declared_uno { " UNO!" } else { "" };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "  Player {} {}{}{}{} - {} cards{}",
            player.id, player.name, label_you, dealer_tag, uno_tag, player.hand_size, current_tag
        );
        if player.id == state.self_player {
            if state.hand.is_empty() {
                let _ = writeln!(out, "    Hand: (empty)");
            } else {
                let hand_display = state
                    .hand
                    .iter()
                    .enumerate()
                    .map(|(idx, card)| format!("{}:{}", idx, format_card(*card)))
                    .collect::<Vec<_>>()
                    .join("  ");
                let _ = writeln!(out, "    Hand: {hand_display}");
            }
        }
    }
    out
}

pub fn describe_action(state: &RoundView, action: &Action) -> String {
    match action {
        Action::Play {
            card_index,
            named_color,
        } => {
            let card = state
                .hand
                .get(*card_index)
                .map(|card| format_card(*card))
                .unwrap_or_else(|| String::from("--"));
            match named_color {
                Some(color) => format!("Play hand[{card_index}] {card} naming {color}"),
                None => format!("Play hand[{card_index}] {card}"),
            }
        }
        Action::Draw => String::from("Draw a card"),
        Action::SayUno => String::from("Say UNO"),
        Action::CatchUnoFailure { accused } => {
            format!("Catch player {accused} without UNO")
        }
    }
}

fn format_card(card: Card) -> String {
    match card {
        Card::Wild => String::from("W"),
        Card::WildDrawFour => String::from("W+4"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::Round;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let round = Round::builder(["Ann", "Bob"])
            .expect("builder")
            .with_seed(3)
            .build()
            .expect("round");
        let current = round.player_in_turn().expect("round in progress");
        let view = round.state_view(current).expect("state view");
        let text = render_state(&view);
        assert!(text.contains(&format!("Player {current} ")));
        assert!(text.contains("(You)"));
        assert!(text.contains("Hand:"));
        assert!(text.contains("Active color:"));

        let actions = round.legal_actions(current).expect("actions available");
        assert!(actions.contains(&Action::Draw));
        assert_eq!(describe_action(&view, &Action::Draw), "Draw a card");
        if let Some(play) = actions
            .iter()
            .find(|action| matches!(action, Action::Play { .. }))
        {
            assert!(describe_action(&view, play).starts_with("Play hand["));
        }
        let catch = Action::CatchUnoFailure { accused: 1 };
        assert!(describe_action(&view, &catch).contains("player 1"));
    }
}
