use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing_subscriber::EnvFilter;

use unobot::{DEFAULT_TARGET_SCORE, Game, describe_action, render_state};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play a seeded UNO match where every seat picks uniformly among its legal actions."
)]
struct Args {
    /// Player names (2-10 total)
    #[arg(default_values_t = [String::from("Ann"), String::from("Bob"), String::from("Cid")])]
    players: Vec<String>,

    /// Base RNG seed (deck, dealer and action choices are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Score that ends the match
    #[arg(short = 't', long = "target-score", default_value_t = DEFAULT_TARGET_SCORE)]
    target_score: u32,

    /// Cards dealt to each player at the start of a round
    #[arg(long = "cards-per-player", default_value_t = unobot::DEFAULT_CARDS_PER_PLAYER)]
    cards_per_player: usize,

    /// Safety cap on the number of applied actions
    #[arg(long = "max-actions", default_value_t = 100_000)]
    max_actions: usize,

    /// Show the round state and chosen action every step
    #[arg(long = "visualize")]
    visualize: bool,

    /// Write the final game snapshot (bincode) to this file
    #[arg(long = "save")]
    save: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("unobot=info")),
        )
        .init();
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut game = Game::builder(args.players.iter().cloned())?
        .with_seed(args.seed)
        .with_target_score(args.target_score)
        .with_cards_per_player(args.cards_per_player)
        .build()?;
    let mut rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9_7F4A_7C15);

    println!(
        "Starting UNO simulation with {} players, target score {}.\n",
        game.player_count(),
        game.target_score()
    );
    let mut actions_taken = 0usize;
    while !game.has_ended() {
        if actions_taken >= args.max_actions {
            println!("Max action limit {} reached. Stopping simulation.", args.max_actions);
            break;
        }
        let round = game.round().ok_or("no round in progress")?;
        let current = round
            .player_in_turn()
            .ok_or("round ended without being settled")?;
        let view = round.state_view(current)?;
        let legal_actions = game.legal_actions(current)?;
        let action = legal_actions
            .choose(&mut rng)
            .cloned()
            .ok_or("no legal actions available for current player")?;
        if args.visualize {
            println!("{}", render_state(&view));
            println!("Chosen action: {}\n", describe_action(&view, &action));
        }
        let round_number = game.round_number();
        game.apply_action(current, action)?;
        actions_taken += 1;
        if game.round_number() != round_number || game.has_ended() {
            println!("Round {round_number} finished. Scores: {:?}", game.scores());
        }
    }

    match game.winner() {
        Some(winner) => println!(
            "Game finished after {actions_taken} actions. Winner: {} ({} points).",
            game.players()[winner],
            game.scores()[winner]
        ),
        None => println!("Simulation stopped before completion."),
    }

    if let Some(path) = args.save {
        let bytes = game.to_memento().to_bytes()?;
        fs::write(&path, bytes)?;
        println!("Snapshot saved -> {}", path.display());
    }
    Ok(())
}
