use std::fmt;

use tracing::{debug, info, trace};

use crate::action::{Action, ActionOutcome, PlayerId};
use crate::card::{Card, Color, DECK_SIZE, MAX_PLAYERS, MIN_PLAYERS, WILD_COUNT};
use crate::deck::Deck;
use crate::error::{GameError, InvalidAction};
use crate::random::{SeededRng, Shuffler};
use crate::score::round_score;
use crate::state::{Direction, PlayerPublicState, RoundStatus, RoundView};
use crate::uno::UnoCall;

pub const DEFAULT_CARDS_PER_PLAYER: usize = 7;
pub const UNO_PENALTY: usize = 4;
const DEFAULT_SEED: u64 = 0x5EED_0D0D_5EED_0D0D;
/// Reshuffles allowed while turning up the opening card before falling back to pile order.
const MAX_OPENING_RESHUFFLES: usize = 2 * WILD_COUNT;

pub(crate) fn check_player_count(count: usize) -> Result<(), GameError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(GameError::InvalidPlayerCount(count));
    }
    Ok(())
}

pub(crate) fn check_cards_per_player(players: usize, cards_per_player: usize) -> Result<(), GameError> {
    if cards_per_player == 0 {
        return Err(GameError::InvalidConfiguration("cards per player must be positive"));
    }
    // Every hand plus one face-up card must come out of a single deck.
    match players.checked_mul(cards_per_player) {
        Some(dealt) if dealt < DECK_SIZE => Ok(()),
        _ => Err(GameError::InvalidConfiguration(
            "deck does not contain enough cards to deal every hand",
        )),
    }
}

/// Builder that enables deterministic deck injection for testing and replays.
pub struct RoundBuilder {
    players: Vec<String>,
    dealer: PlayerId,
    cards_per_player: usize,
    seed: u64,
    shuffler: Option<Box<dyn Shuffler>>,
}

impl RoundBuilder {
    pub fn new<I, S>(players: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let players: Vec<String> = players.into_iter().map(Into::into).collect();
        check_player_count(players.len())?;
        Ok(Self {
            players,
            dealer: 0,
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
            seed: DEFAULT_SEED,
            shuffler: None,
        })
    }

    pub fn with_dealer(mut self, dealer: PlayerId) -> Self {
        self.dealer = dealer;
        self
    }

    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.cards_per_player = cards_per_player;
        self
    }

    /// Seed for the default shuffler. Ignored when a shuffler is injected.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.shuffler = Some(Box::new(shuffler));
        self
    }

    pub fn build(self) -> Result<Round, GameError> {
        let shuffler = self
            .shuffler
            .unwrap_or_else(|| Box::new(SeededRng::new(self.seed)));
        Round::new(self.players, self.dealer, shuffler, self.cards_per_player)
    }
}

/// A single round of UNO, from the deal until one player empties their hand.
pub struct Round {
    players: Vec<String>,
    hands: Vec<Vec<Card>>,
    draw_pile: Deck,
    discard_pile: Deck,
    dealer: PlayerId,
    current_player: PlayerId,
    direction: Direction,
    current_color: Color,
    status: RoundStatus,
    uno_call: UnoCall,
    declared: Vec<bool>,
    last_player: Option<PlayerId>,
    turn_number: u64,
    shuffler: Box<dyn Shuffler>,
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("players", &self.players)
            .field("hands", &self.hands)
            .field("draw_pile", &self.draw_pile.len())
            .field("discard_pile", &self.discard_pile.len())
            .field("top_of_discard", &self.discard_pile.top())
            .field("dealer", &self.dealer)
            .field("current_player", &self.current_player)
            .field("direction", &self.direction)
            .field("current_color", &self.current_color)
            .field("status", &self.status)
            .field("uno_call", &self.uno_call)
            .finish_non_exhaustive()
    }
}

impl Round {
    pub fn builder<I, S>(players: I) -> Result<RoundBuilder, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RoundBuilder::new(players)
    }

    /// Shuffles a fresh deck, deals the hands and turns up the opening card.
    pub fn new(
        players: Vec<String>,
        dealer: PlayerId,
        mut shuffler: Box<dyn Shuffler>,
        cards_per_player: usize,
    ) -> Result<Self, GameError> {
        check_player_count(players.len())?;
        if dealer >= players.len() {
            return Err(GameError::InvalidDealer(dealer));
        }
        check_cards_per_player(players.len(), cards_per_player)?;

        let mut draw_pile = Deck::standard();
        draw_pile.shuffle(shuffler.as_mut());
        let hands: Vec<Vec<Card>> = players
            .iter()
            .map(|_| draw_pile.draw(cards_per_player))
            .collect();

        if draw_pile.iter().all(Card::is_wild) {
            return Err(GameError::InvalidConfiguration(
                "no colored card left to start the discard pile",
            ));
        }
        let mut reshuffles = 0;
        let opening = loop {
            let card = draw_pile.draw_one().ok_or(GameError::InvalidConfiguration(
                "deck exhausted while turning up the opening card",
            ))?;
            if !card.is_wild() {
                break card;
            }
            draw_pile.extend_bottom([card]);
            if reshuffles == MAX_OPENING_RESHUFFLES {
                trace!(%card, "shuffler keeps surfacing wilds, taking first colored card");
                break draw_pile
                    .take_first(|candidate| !candidate.is_wild())
                    .ok_or(GameError::InvalidConfiguration(
                        "no colored card left to start the discard pile",
                    ))?;
            }
            trace!(%card, "opening card is wild, reshuffling");
            draw_pile.shuffle(shuffler.as_mut());
            reshuffles += 1;
        };
        let color = opening.color().ok_or(GameError::InvalidConfiguration(
            "opening card has no color",
        ))?;
        let mut discard_pile = Deck::empty();
        discard_pile.push_top(opening);

        let player_count = players.len();
        let mut round = Round {
            players,
            hands,
            draw_pile,
            discard_pile,
            dealer,
            current_player: dealer,
            direction: Direction::Clockwise,
            current_color: color,
            status: RoundStatus::Ongoing,
            uno_call: UnoCall::Idle,
            declared: vec![false; player_count],
            last_player: None,
            turn_number: 0,
            shuffler,
        };
        round.open_with(opening);
        debug!(
            dealer,
            opening = %opening,
            first_player = round.current_player,
            "round dealt"
        );
        Ok(round)
    }

    /// Restores a validated snapshot. Callers are responsible for consistency checks.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        players: Vec<String>,
        hands: Vec<Vec<Card>>,
        draw_pile: Deck,
        discard_pile: Deck,
        current_color: Color,
        direction: Direction,
        dealer: PlayerId,
        player_in_turn: Option<PlayerId>,
        shuffler: Box<dyn Shuffler>,
    ) -> Self {
        let player_count = players.len();
        let winner = hands.iter().position(Vec::is_empty);
        let status = match winner {
            Some(winner) => RoundStatus::Finished {
                winner,
                score: round_score(&hands, winner),
            },
            None => RoundStatus::Ongoing,
        };
        let current_player = player_in_turn.or(winner).unwrap_or(dealer);
        Round {
            players,
            hands,
            draw_pile,
            discard_pile,
            dealer,
            current_player,
            direction,
            current_color,
            status,
            uno_call: UnoCall::Idle,
            declared: vec![false; player_count],
            last_player: None,
            turn_number: 0,
            shuffler,
        }
    }

    /// Hands back the shuffler so it can be reused for the next round.
    pub fn into_shuffler(self) -> Box<dyn Shuffler> {
        self.shuffler
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn player_name(&self, player: PlayerId) -> Result<&str, GameError> {
        self.players
            .get(player)
            .map(String::as_str)
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn dealer(&self) -> PlayerId {
        self.dealer
    }

    /// The player whose turn it is, or `None` once the round has ended.
    pub fn player_in_turn(&self) -> Option<PlayerId> {
        match self.status {
            RoundStatus::Ongoing => Some(self.current_player),
            RoundStatus::Finished { .. } => None,
        }
    }

    /// The player who most recently passed the turn on.
    pub fn last_player(&self) -> Option<PlayerId> {
        self.last_player
    }

    /// Number of times the turn has passed since the deal.
    pub fn turn_number(&self) -> u64 {
        self.turn_number
    }

    pub fn player_hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.hands
            .get(player)
            .map(Vec::as_slice)
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn hands(&self) -> &[Vec<Card>] {
        &self.hands
    }

    pub fn draw_pile(&self) -> &Deck {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &Deck {
        &self.discard_pile
    }

    pub fn top_of_discard(&self) -> Option<&Card> {
        self.discard_pile.top()
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn uno_call(&self) -> UnoCall {
        self.uno_call
    }

    pub fn has_declared(&self, player: PlayerId) -> bool {
        self.declared.get(player).copied().unwrap_or(false)
    }

    pub fn has_ended(&self) -> bool {
        matches!(self.status, RoundStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            RoundStatus::Finished { winner, .. } => Some(winner),
            RoundStatus::Ongoing => None,
        }
    }

    /// Points earned by the winner, available once the round has ended.
    pub fn score(&self) -> Option<u32> {
        match self.status {
            RoundStatus::Finished { score, .. } => Some(score),
            RoundStatus::Ongoing => None,
        }
    }

    /// Whether the player in turn may legally play the card at `card_index`.
    pub fn can_play(&self, card_index: usize) -> bool {
        if self.has_ended() {
            return false;
        }
        self.hands[self.current_player]
            .get(card_index)
            .is_some_and(|card| self.is_playable(self.current_player, card))
    }

    pub fn can_play_any(&self) -> bool {
        if self.has_ended() {
            return false;
        }
        self.hands[self.current_player]
            .iter()
            .any(|card| self.is_playable(self.current_player, card))
    }

    /// Whether `accuser` would currently succeed in catching `accused`.
    pub fn can_catch(&self, accuser: PlayerId, accused: PlayerId) -> bool {
        if self.has_ended() {
            return false;
        }
        let count = self.players.len();
        if accuser >= count || accused >= count || accuser == accused {
            return false;
        }
        if self.hands[accused].len() != 1 {
            return false;
        }
        if self.last_player != Some(accused) {
            return false;
        }
        if self.declared[accused] {
            return false;
        }
        self.uno_call.permits_catch(accused)
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<RoundView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let player_in_turn = self.player_in_turn();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, name)| PlayerPublicState {
                id: idx,
                name: name.clone(),
                hand_size: self.hands[idx].len(),
                is_current: player_in_turn == Some(idx),
                is_dealer: idx == self.dealer,
                declared_uno: self.declared[idx],
            })
            .collect();

        Ok(RoundView {
            status: self.status,
            self_player: perspective,
            player_in_turn,
            direction: self.direction,
            current_color: self.current_color,
            top_of_discard: self.discard_pile.top().copied(),
            draw_pile_count: self.draw_pile.len(),
            discard_pile_count: self.discard_pile.len(),
            players,
            hand: self.hands[perspective].clone(),
            uno_pending: self.uno_call.accused(),
        })
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.has_ended() {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        let mut actions = Vec::new();
        if player == self.current_player {
            for (card_index, card) in self.hands[player].iter().enumerate() {
                if !self.is_playable(player, card) {
                    continue;
                }
                if card.is_wild() {
                    for color in Color::ALL {
                        actions.push(Action::play_wild(card_index, color));
                    }
                } else {
                    actions.push(Action::play(card_index));
                }
            }
            actions.push(Action::Draw);
        }
        if self.may_declare(player) && !self.declared[player] && self.hand_qualifies(player) {
            actions.push(Action::SayUno);
        }
        for accused in 0..self.players.len() {
            if self.can_catch(player, accused) {
                actions.push(Action::CatchUnoFailure { accused });
            }
        }
        Ok(actions)
    }

    /// Validates `player` and dispatches `action`.
    ///
    /// An accusation is never an error once `player` is in range: like
    /// [`Round::catch_uno_failure`] it yields `Caught(false)`, also after the round ended.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionOutcome, GameError> {
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if action.requires_turn() {
            self.ensure_ongoing()?;
            if player != self.current_player {
                return Err(GameError::NotPlayersTurn);
            }
        }

        match action {
            Action::Play {
                card_index,
                named_color,
            } => self.play(card_index, named_color).map(ActionOutcome::Played),
            Action::Draw => self.draw().map(ActionOutcome::Drew),
            Action::SayUno => self.say_uno(player).map(ActionOutcome::Declared),
            Action::CatchUnoFailure { accused } => {
                Ok(ActionOutcome::Caught(self.catch_uno_failure(player, accused)))
            }
        }
    }

    /// Plays a card from the hand of the player in turn.
    pub fn play(
        &mut self,
        card_index: usize,
        named_color: Option<Color>,
    ) -> Result<Card, GameError> {
        self.ensure_ongoing()?;
        let player = self.current_player;
        let hand = &self.hands[player];
        if hand.is_empty() {
            return Err(InvalidAction::EmptyHand.into());
        }
        let card = *hand
            .get(card_index)
            .ok_or(InvalidAction::HandIndex(card_index))?;
        match (card.is_wild(), named_color) {
            (true, None) => return Err(InvalidAction::MissingColor.into()),
            (false, Some(_)) => return Err(InvalidAction::ColorNotAllowed.into()),
            _ => {}
        }
        let top = *self
            .discard_pile
            .top()
            .ok_or(GameError::InvalidConfiguration("discard pile is empty"))?;
        if !card.matches(&top, self.current_color) {
            return Err(InvalidAction::IllegalPlay {
                card,
                top,
                color: self.current_color,
            }
            .into());
        }
        if card == Card::WildDrawFour && self.holds_color(player, self.current_color) {
            return Err(InvalidAction::WildDrawFourBluff.into());
        }

        self.expire_uno_window();
        self.hands[player].remove(card_index);
        self.discard_pile.push_top(card);
        self.current_color = card.color().or(named_color).unwrap_or(self.current_color);
        debug!(player, %card, color = %self.current_color, "card played");

        match self.hands[player].len() {
            0 => {
                self.finish(player);
                return Ok(card);
            }
            1 => {
                // Open until the player after the next one takes over.
                self.uno_call =
                    UnoCall::open(player, self.turn_number + 2, self.declared[player]);
            }
            _ => {}
        }
        self.resolve_effect(card);
        Ok(card)
    }

    /// Draws one card for the player in turn. The turn stays with them if the card is playable.
    pub fn draw(&mut self) -> Result<Option<Card>, GameError> {
        self.ensure_ongoing()?;
        self.expire_uno_window();
        let player = self.current_player;
        let Some(card) = self.draw_cards(1).pop() else {
            debug!(player, "nothing left to draw");
            self.advance(1);
            return Ok(None);
        };
        self.hands[player].push(card);
        self.forget_declaration(player);
        let playable = self.is_playable(player, &card);
        debug!(player, %card, playable, "card drawn");
        if !playable {
            self.advance(1);
        }
        Ok(Some(card))
    }

    /// Records a low-hand declaration. Returns `false` when the hand size does not qualify.
    pub fn say_uno(&mut self, player: PlayerId) -> Result<bool, GameError> {
        self.ensure_ongoing()?;
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if !self.may_declare(player) {
            return Err(GameError::NotPlayersTurn);
        }
        if !self.hand_qualifies(player) {
            return Ok(false);
        }
        self.declared[player] = true;
        if self.uno_call.is_open_for(player) {
            self.uno_call.satisfy();
        }
        debug!(player, "uno declared");
        Ok(true)
    }

    /// Accuses `accused` of not declaring their last card. Upheld accusations cost four cards.
    pub fn catch_uno_failure(&mut self, accuser: PlayerId, accused: PlayerId) -> bool {
        if !self.can_catch(accuser, accused) {
            return false;
        }
        self.deal_penalty(accused, UNO_PENALTY);
        self.uno_call = UnoCall::Idle;
        info!(accuser, accused, "uno failure caught");
        true
    }

    fn ensure_ongoing(&self) -> Result<(), GameError> {
        if self.has_ended() {
            return Err(GameError::RoundOver);
        }
        Ok(())
    }

    fn may_declare(&self, player: PlayerId) -> bool {
        player == self.current_player || self.uno_call.is_open_for(player)
    }

    fn hand_qualifies(&self, player: PlayerId) -> bool {
        (1..=2).contains(&self.hands[player].len())
    }

    fn is_playable(&self, player: PlayerId, card: &Card) -> bool {
        let Some(top) = self.discard_pile.top() else {
            return false;
        };
        if !card.matches(top, self.current_color) {
            return false;
        }
        if *card == Card::WildDrawFour {
            return !self.holds_color(player, self.current_color);
        }
        true
    }

    fn holds_color(&self, player: PlayerId, color: Color) -> bool {
        self.hands[player]
            .iter()
            .any(|card| card.color() == Some(color))
    }

    fn seat_after(&self, from: PlayerId, steps: usize) -> PlayerId {
        self.direction.step(from, steps, self.players.len())
    }

    /// Applies the opening card as if the dealer had just played it.
    fn open_with(&mut self, opening: Card) {
        let dealer = self.dealer;
        self.current_player = match opening {
            Card::Reverse(_) => {
                self.direction = self.direction.reversed();
                self.seat_after(dealer, 1)
            }
            Card::Skip(_) => self.seat_after(dealer, 2),
            Card::DrawTwo(_) => {
                let victim = self.seat_after(dealer, 1);
                self.deal_penalty(victim, 2);
                self.seat_after(dealer, 2)
            }
            _ => self.seat_after(dealer, 1),
        };
    }

    fn resolve_effect(&mut self, card: Card) {
        match card {
            Card::Reverse(_) => {
                self.direction = self.direction.reversed();
                if self.players.len() == 2 {
                    self.advance(2);
                } else {
                    self.advance(1);
                }
            }
            Card::Skip(_) => self.advance(2),
            Card::DrawTwo(_) => {
                let victim = self.seat_after(self.current_player, 1);
                self.deal_penalty(victim, 2);
                self.advance(2);
            }
            Card::WildDrawFour => {
                let victim = self.seat_after(self.current_player, 1);
                self.deal_penalty(victim, 4);
                self.advance(2);
            }
            Card::Numbered(..) | Card::Wild => self.advance(1),
        }
    }

    fn advance(&mut self, steps: usize) {
        let next = self.seat_after(self.current_player, steps);
        self.last_player = Some(self.current_player);
        self.current_player = next;
        self.turn_number += 1;
        trace!(next, turn = self.turn_number, "turn passed");
    }

    fn expire_uno_window(&mut self) {
        if self.uno_call.expire(self.turn_number) {
            trace!(turn = self.turn_number, "uno window closed");
        }
    }

    fn deal_penalty(&mut self, player: PlayerId, count: usize) {
        let cards = self.draw_cards(count);
        debug!(player, drawn = cards.len(), "penalty cards dealt");
        if !cards.is_empty() {
            self.hands[player].extend(cards);
            self.forget_declaration(player);
        }
    }

    /// Draws up to `count` cards, recycling the discard pile when the draw pile runs dry.
    fn draw_cards(&mut self, count: usize) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            if self.draw_pile.is_empty() {
                self.replenish_draw_pile();
            }
            match self.draw_pile.draw_one() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    fn replenish_draw_pile(&mut self) {
        let recycled = self.discard_pile.take_below_top();
        if recycled.is_empty() {
            return;
        }
        trace!(cards = recycled.len(), "recycling discard pile");
        self.draw_pile.extend_bottom(recycled);
        self.draw_pile.shuffle(self.shuffler.as_mut());
    }

    /// A declaration covers the hand it was made for. Any card taken into the hand voids it.
    fn forget_declaration(&mut self, player: PlayerId) {
        self.declared[player] = false;
    }

    fn finish(&mut self, winner: PlayerId) {
        let score = round_score(&self.hands, winner);
        self.status = RoundStatus::Finished { winner, score };
        self.uno_call = UnoCall::Idle;
        self.declared.iter_mut().for_each(|flag| *flag = false);
        info!(winner, score, "round finished");
    }
}
