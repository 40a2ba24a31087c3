use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::{Action, ActionOutcome, PlayerId};
use crate::card::{Card, Color};
use crate::error::GameError;
use crate::memento::GameMemento;
use crate::random::{Randomizer, SeededRng, Shuffler};
use crate::round::{DEFAULT_CARDS_PER_PLAYER, Round, check_cards_per_player, check_player_count};

pub const DEFAULT_TARGET_SCORE: u32 = 500;
const DEFAULT_SEED: u64 = 0x5EED_5EED_0A0A_0A0A;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    pub num_players: usize,
    pub target_score: u32,
    pub cards_per_player: usize,
    pub seed: u64,
}

impl GameConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        let config = Self {
            num_players,
            target_score: DEFAULT_TARGET_SCORE,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        check_player_count(self.num_players)?;
        if self.target_score == 0 {
            return Err(GameError::InvalidConfiguration("target score must be positive"));
        }
        check_cards_per_player(self.num_players, self.cards_per_player)
    }
}

/// Builder for games with optional injected shuffling and dealer selection.
pub struct GameBuilder {
    players: Vec<String>,
    config: GameConfig,
    shuffler: Option<Box<dyn Shuffler>>,
    randomizer: Option<Box<dyn Randomizer>>,
}

impl GameBuilder {
    pub fn new<I, S>(players: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        Ok(Self {
            config: GameConfig::new(players.len(), DEFAULT_SEED)?,
            players,
            shuffler: None,
            randomizer: None,
        })
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_target_score(mut self, target_score: u32) -> Self {
        self.config.target_score = target_score;
        self
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.config.cards_per_player = cards_per_player;
        self
    }

    /// Seed for the default shuffler and dealer selection.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Some(Box::new(shuffler));
        self
    }

    pub fn with_randomizer(mut self, randomizer: impl Randomizer + 'static) -> Self {
        self.randomizer = Some(Box::new(randomizer));
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        let GameBuilder {
            players,
            config,
            shuffler,
            randomizer,
        } = self;
        if config.num_players != players.len() {
            return Err(GameError::InvalidConfiguration(
                "configured player count differs from the player list",
            ));
        }
        config.validate()?;
        let shuffler = shuffler.unwrap_or_else(|| Box::new(SeededRng::new(config.seed)));
        let mut randomizer =
            randomizer.unwrap_or_else(|| Box::new(SeededRng::new(config.seed.rotate_left(17))));
        Game::new(
            players,
            config.target_score,
            randomizer.as_mut(),
            shuffler,
            config.cards_per_player,
        )
    }
}

/// Sequences rounds until one player's cumulative score reaches the target.
#[derive(Debug)]
pub struct Game {
    players: Vec<String>,
    target_score: u32,
    cards_per_player: usize,
    scores: Vec<u32>,
    round_number: u32,
    round: Option<Round>,
    winner: Option<PlayerId>,
}

impl Game {
    pub fn builder<I, S>(players: I) -> Result<GameBuilder, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new(players)
    }

    /// Picks the first dealer with `randomizer` and deals the opening round.
    pub fn new(
        players: Vec<String>,
        target_score: u32,
        randomizer: &mut dyn Randomizer,
        shuffler: Box<dyn Shuffler>,
        cards_per_player: usize,
    ) -> Result<Self, GameError> {
        check_player_count(players.len())?;
        if target_score == 0 {
            return Err(GameError::InvalidConfiguration("target score must be positive"));
        }
        let dealer = randomizer.next_below(players.len());
        let round = Round::new(players.clone(), dealer, shuffler, cards_per_player)?;
        info!(players = players.len(), target_score, dealer, "game started");
        Ok(Self {
            scores: vec![0; players.len()],
            players,
            target_score,
            cards_per_player,
            round_number: 1,
            round: Some(round),
            winner: None,
        })
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn cards_per_player(&self) -> usize {
        self.cards_per_player
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn score(&self, player: PlayerId) -> Result<u32, GameError> {
        self.scores
            .get(player)
            .copied()
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn has_ended(&self) -> bool {
        self.winner.is_some()
    }

    /// One-based index of the current (or final) round.
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// The round in play, or the final round once the game has a winner.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        match &self.round {
            Some(round) if self.winner.is_none() => round.legal_actions(player),
            _ => Ok(Vec::new()),
        }
    }

    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionOutcome, GameError> {
        let outcome = self.active_round()?.apply_action(player, action)?;
        self.settle_round()?;
        Ok(outcome)
    }

    pub fn play(&mut self, card_index: usize, named_color: Option<Color>) -> Result<Card, GameError> {
        let card = self.active_round()?.play(card_index, named_color)?;
        self.settle_round()?;
        Ok(card)
    }

    pub fn draw(&mut self) -> Result<Option<Card>, GameError> {
        let card = self.active_round()?.draw()?;
        self.settle_round()?;
        Ok(card)
    }

    pub fn say_uno(&mut self, player: PlayerId) -> Result<bool, GameError> {
        self.active_round()?.say_uno(player)
    }

    pub fn catch_uno_failure(&mut self, accuser: PlayerId, accused: PlayerId) -> bool {
        match self.active_round() {
            Ok(round) => round.catch_uno_failure(accuser, accused),
            Err(_) => false,
        }
    }

    pub fn to_memento(&self) -> GameMemento {
        GameMemento {
            players: self.players.clone(),
            target_score: self.target_score,
            cards_per_player: self.cards_per_player,
            scores: self.scores.clone(),
            round_number: self.round_number,
            current_round: self.round.as_ref().map(Round::to_memento),
            winner: self.winner,
        }
    }

    /// Rebuilds a game from a snapshot; `shuffler` drives every round from here on.
    pub fn from_memento(
        memento: GameMemento,
        shuffler: impl Shuffler + 'static,
    ) -> Result<Self, GameError> {
        memento.validate()?;
        check_cards_per_player(memento.players.len(), memento.cards_per_player)?;
        let GameMemento {
            players,
            target_score,
            cards_per_player,
            scores,
            round_number,
            current_round,
            winner,
        } = memento;
        let round = current_round
            .map(|round| Round::from_memento_boxed(round, Box::new(shuffler)))
            .transpose()?;
        Ok(Self {
            players,
            target_score,
            cards_per_player,
            scores,
            round_number,
            round,
            winner,
        })
    }

    fn active_round(&mut self) -> Result<&mut Round, GameError> {
        if self.winner.is_some() {
            return Err(GameError::GameOver);
        }
        self.round.as_mut().ok_or(GameError::GameOver)
    }

    /// Scores a finished round and either ends the game or deals the next round.
    fn settle_round(&mut self) -> Result<(), GameError> {
        let Some((winner, score)) = self
            .round
            .as_ref()
            .and_then(|round| Some((round.winner()?, round.score()?)))
        else {
            return Ok(());
        };
        self.scores[winner] += score;
        info!(
            round = self.round_number,
            winner,
            score,
            total = self.scores[winner],
            "round settled"
        );
        if self.scores[winner] >= self.target_score {
            self.winner = Some(winner);
            info!(winner, total = self.scores[winner], "game won");
            return Ok(());
        }
        let Some(finished) = self.round.take() else {
            return Ok(());
        };
        let next = Round::new(
            self.players.clone(),
            winner,
            finished.into_shuffler(),
            self.cards_per_player,
        )?;
        self.round = Some(next);
        self.round_number += 1;
        Ok(())
    }
}
