use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::card::{build_catalog, Card, CardId, Color, Face};
use super::player::Player;
use super::shuffle::shuffled;

/// Cards dealt to every seat when a game starts.
const OPENING_HAND_SIZE: usize = 7;
/// Penalty draw for ending a turn on one card without calling UNO.
const MISSED_UNO_PENALTY: usize = 2;

/// Direction of play around the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reverse(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Expected rule violations. Every variant is something a participant can
/// trigger from the table; hosts report the message and re-prompt. Caller
/// bookkeeping defects (an id that was never seated, recoloring a non-wild
/// top) panic instead of appearing here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleError {
    NotYourTurn,
    AlreadyPlayed,
    CardNotInHand,
    CannotPlay,
    NotDiscardTop,
    AlreadyColored,
    UnoAlreadyCalled,
    UnoRequiresTwoCards,
    GameNotStarted,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::NotYourTurn => write!(f, "Not the player's turn"),
            RuleError::AlreadyPlayed => write!(f, "Player has already played a card"),
            RuleError::CardNotInHand => write!(f, "Card not found in player's hand"),
            RuleError::CannotPlay => write!(f, "Cannot play this card"),
            RuleError::NotDiscardTop => write!(f, "Card is not the top of the discard pile"),
            RuleError::AlreadyColored => write!(f, "Wild card has already been given a color"),
            RuleError::UnoAlreadyCalled => write!(f, "Player has already called UNO"),
            RuleError::UnoRequiresTwoCards => {
                write!(f, "Player cannot call UNO unless they have exactly two cards")
            }
            RuleError::GameNotStarted => write!(f, "Game has not started yet"),
        }
    }
}

impl std::error::Error for RuleError {}

/// Cheat grants a host may hand out. Unknown code strings are rejected at
/// the parsing seam; the engine only ever sees these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCheat {
    GiveWildFour,
    GiveWildEight,
}

impl GameCheat {
    /// Parses the host-facing cheat codes.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "gw4" => Some(GameCheat::GiveWildFour),
            "gw8" => Some(GameCheat::GiveWildEight),
            _ => None,
        }
    }
}

/// Authoritative state of one UNO table.
///
/// All mutation goes through the command methods, and hosts read the table
/// back through the query methods after every command. The struct is a
/// plain value, so a hosting process can run any number of games side by
/// side.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct UnoGame {
    players: Vec<Player>,
    deck: Vec<Card>,
    discard: Vec<Card>,
    current_player_index: usize,
    direction: Direction,
    cheat_sequence: u32,
}

impl UnoGame {
    /// Creates an empty table. Nothing is playable until [`start_game`].
    ///
    /// [`start_game`]: UnoGame::start_game
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            deck: Vec::new(),
            discard: Vec::new(),
            current_player_index: 0,
            direction: Direction::Clockwise,
            cheat_sequence: 0,
        }
    }

    /// Seats the given participants in shuffled order, builds a fresh
    /// shuffled deck and deals the opening hands from the front of it. The
    /// discard pile starts empty; the first play opens it.
    ///
    /// Expects a freshly created or [`reset`] instance. Degenerate rosters
    /// (zero or one id) are accepted; lobby minimums are host policy.
    ///
    /// [`reset`]: UnoGame::reset
    pub fn start_game(&mut self, player_ids: Vec<String>) {
        let players: Vec<Player> = player_ids.into_iter().map(Player::new).collect();
        self.players = shuffled(&players);
        self.deck = shuffled(&build_catalog());
        self.deal_opening_hands();
        debug!(
            "started a game with {} players and {} cards in the draw pile",
            self.players.len(),
            self.deck.len()
        );
    }

    fn deal_opening_hands(&mut self) {
        for player in &mut self.players {
            let count = OPENING_HAND_SIZE.min(self.deck.len());
            player.hand = self.deck.drain(..count).collect();
        }
    }

    /// Returns the table to the empty state.
    pub fn reset(&mut self) {
        self.players.clear();
        self.deck.clear();
        self.discard.clear();
        self.current_player_index = 0;
        self.direction = Direction::Clockwise;
        self.cheat_sequence = 0;
    }

    /// Plays `card_id` from `player_id`'s hand onto the discard pile,
    /// resolves the card's effect and ends the turn.
    ///
    /// Panics if `player_id` was never seated.
    pub fn play_card(&mut self, player_id: &str, card_id: CardId) -> Result<(), RuleError> {
        let player_index = self.player_index(player_id);
        if player_index != self.current_player_index {
            return Err(RuleError::NotYourTurn);
        }
        if self.players[player_index].has_played_card {
            return Err(RuleError::AlreadyPlayed);
        }
        let Some(card_index) = self.players[player_index]
            .hand
            .iter()
            .position(|card| card.id == card_id)
        else {
            return Err(RuleError::CardNotInHand);
        };
        if !self.can_play_card(&self.players[player_index].hand[card_index]) {
            return Err(RuleError::CannotPlay);
        }

        let card = self.players[player_index].hand.remove(card_index);
        let color = card.color;
        let face = card.face.clone();
        debug!("{} plays {color:?} {face:?}", self.players[player_index].id);
        self.discard.push(card);
        self.players[player_index].has_played_card = true;

        match face {
            Face::Skip => {
                self.next_turn();
            }
            Face::Reverse => {
                self.direction = self.direction.reverse();
            }
            Face::DrawTwo => {
                let target = self.next_player_index();
                self.draw_cards(target, 2);
                self.next_turn();
            }
            Face::WildDrawFour => {
                let target = self.next_player_index();
                self.draw_cards(target, 4);
            }
            Face::WildDrawEight => {
                let target = self.next_player_index();
                self.draw_cards(target, 8);
                self.next_turn();
            }
            Face::Number(_) | Face::Wild => {}
        }

        self.next_turn();
        Ok(())
    }

    /// Gives the just-played wild card its chosen color. Only the discard
    /// top can be recolored, and only while its color is still
    /// [`Color::Wild`].
    ///
    /// Panics if nothing has been played yet or if the discard top is not a
    /// wild-family card.
    pub fn change_wild_card_color(
        &mut self,
        card_id: CardId,
        new_color: Color,
    ) -> Result<(), RuleError> {
        let Some(top) = self.discard.last_mut() else {
            panic!("no card has been played yet");
        };
        if top.id != card_id {
            return Err(RuleError::NotDiscardTop);
        }
        if !top.face.is_wild() {
            panic!("discard top {:?} is not a wild card", top.face);
        }
        if top.color != Color::Wild {
            return Err(RuleError::AlreadyColored);
        }
        top.color = new_color;
        Ok(())
    }

    /// Draws one card for `player_id` and ends their turn.
    ///
    /// Panics if `player_id` was never seated.
    pub fn draw_card(&mut self, player_id: &str) -> Result<(), RuleError> {
        let player_index = self.player_index(player_id);
        if player_index != self.current_player_index {
            return Err(RuleError::NotYourTurn);
        }
        if self.players[player_index].has_played_card {
            return Err(RuleError::AlreadyPlayed);
        }

        self.draw_cards(player_index, 1);
        self.players[player_index].has_played_card = true;
        self.next_turn();
        Ok(())
    }

    /// Records a participant's UNO call. Valid once per turn and only while
    /// the caller holds exactly two cards. The call is not turn-bound.
    ///
    /// Panics if `player_id` was never seated.
    pub fn say_uno(&mut self, player_id: &str) -> Result<(), RuleError> {
        let player_index = self.player_index(player_id);
        let player = &mut self.players[player_index];
        if player.has_said_uno {
            return Err(RuleError::UnoAlreadyCalled);
        }
        if player.hand.len() != 2 {
            return Err(RuleError::UnoRequiresTwoCards);
        }
        player.has_said_uno = true;
        Ok(())
    }

    /// Mints a bonus wild card directly into `player_id`'s hand, outside
    /// the catalog and the piles.
    ///
    /// Panics if `player_id` was never seated.
    pub fn activate_cheat_code(
        &mut self,
        player_id: &str,
        cheat: GameCheat,
    ) -> Result<(), RuleError> {
        if self.players.is_empty() {
            return Err(RuleError::GameNotStarted);
        }
        let player_index = self.player_index(player_id);
        let face = match cheat {
            GameCheat::GiveWildFour => Face::WildDrawFour,
            GameCheat::GiveWildEight => Face::WildDrawEight,
        };
        let id = CardId::Cheat(self.cheat_sequence);
        self.cheat_sequence += 1;
        self.players[player_index].hand.push(Card {
            id,
            color: Color::Wild,
            face,
        });
        Ok(())
    }

    /// Seats in turn order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The given participant's hand, in acquisition order.
    ///
    /// Panics if `player_id` was never seated.
    pub fn player_cards(&self, player_id: &str) -> &[Card] {
        &self.players[self.player_index(player_id)].hand
    }

    /// The active card, if any card has been played yet.
    pub fn top_card(&self) -> Option<&Card> {
        self.discard.last()
    }

    /// Draw pile, bottom to top.
    pub fn deck_cards(&self) -> &[Card] {
        &self.deck
    }

    /// Discard pile, bottom to top; the last card is the active one.
    pub fn discard_cards(&self) -> &[Card] {
        &self.discard
    }

    /// The seat whose turn it is.
    ///
    /// Panics if the game has not started.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// Whether the direction of play is currently reversed.
    pub fn is_reversed(&self) -> bool {
        self.direction == Direction::CounterClockwise
    }

    /// Whether the participant has emptied their hand.
    ///
    /// Panics if `player_id` was never seated.
    pub fn is_winner(&self, player_id: &str) -> bool {
        self.players[self.player_index(player_id)].hand.is_empty()
    }

    /// Whether `card` may be played on the current discard top. The opening
    /// play (empty discard) is always legal; after that the card must match
    /// the top's color or face, or be a wild.
    pub fn can_play_card(&self, card: &Card) -> bool {
        match self.discard.last() {
            None => true,
            Some(top) => {
                card.color == top.color || card.face == top.face || card.color == Color::Wild
            }
        }
    }

    /// Index of the seat that acts after the current one, honoring the
    /// direction of play.
    fn next_player_index(&self) -> usize {
        let player_count = self.players.len();
        match self.direction {
            Direction::Clockwise => (self.current_player_index + 1) % player_count,
            Direction::CounterClockwise => {
                (self.current_player_index + player_count - 1) % player_count
            }
        }
    }

    /// Ends the current seat's turn: applies the missed-UNO penalty, clears
    /// the per-turn flags and moves the turn pointer. Effect resolution may
    /// run this more than once per command; the penalty check applies each
    /// time.
    fn next_turn(&mut self) {
        let current = self.current_player_index;
        if self.players[current].hand.len() == 1 && !self.players[current].has_said_uno {
            debug!(
                "{} ends a turn on one card without calling UNO and draws {}",
                self.players[current].id, MISSED_UNO_PENALTY
            );
            self.draw_cards(current, MISSED_UNO_PENALTY);
        }
        let player = &mut self.players[current];
        player.has_played_card = false;
        player.has_said_uno = false;
        self.current_player_index = self.next_player_index();
    }

    /// Moves up to `count` cards from the draw pile into the given seat's
    /// hand, rebuilding the pile from the discard when it runs out. Once
    /// both piles are exhausted the remaining draws are silently skipped.
    fn draw_cards(&mut self, player_index: usize, count: usize) {
        let mut drawn = 0;
        for _ in 0..count {
            if self.deck.is_empty() {
                self.reshuffle_discard();
            }
            if let Some(card) = self.deck.pop() {
                self.players[player_index].hand.push(card);
                drawn += 1;
            }
        }
        if drawn > 0 {
            debug!("{} draws {drawn}", self.players[player_index].id);
        }
    }

    /// Recycles every discard except the top card back into the draw pile
    /// in fresh shuffled order. Wild-family cards lose their chosen color
    /// on the way back. A discard holding at most one card leaves the empty
    /// draw pile as is.
    fn reshuffle_discard(&mut self) {
        let top = self.discard.pop();
        let mut recycled = std::mem::take(&mut self.discard);
        for card in &mut recycled {
            if card.face.is_wild() {
                card.color = Color::Wild;
            }
        }
        self.deck = shuffled(&recycled);
        if let Some(top) = top {
            self.discard.push(top);
        }
        if !self.deck.is_empty() {
            debug!("reshuffled {} discards into the draw pile", self.deck.len());
        }
    }

    /// Resolves a participant id to its seat index.
    ///
    /// Panics if the id was never seated; commands addressed to unknown
    /// participants are host bookkeeping defects, not game outcomes.
    fn player_index(&self, player_id: &str) -> usize {
        self.players
            .iter()
            .position(|player| player.id == player_id)
            .unwrap_or_else(|| panic!("player {player_id:?} is not part of this game"))
    }
}

impl Default for UnoGame {
    fn default() -> Self {
        Self::new()
    }
}
