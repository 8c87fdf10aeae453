//! Turn orchestration.
//!
//! `Game` owns the board, the decks, every seat's state and its decider, and
//! drives one player's turn at a time to completion:
//!
//! 1. refresh rents
//! 2. roll
//! 3. jail branch, or a normal move
//! 4. cascading space resolution (cards included)
//! 5. financial offers: sell buildings, mortgage, lift mortgages, build
//! 6. trading window
//! 7. advance, unless doubles were rolled outside jail
//!
//! Mandatory payments that the payer cannot cover go through liquidation
//! prompts and then bankruptcy. The game ends when one solvent player remains.
//!
//! ## Example
//!
//! ```
//! use rust_monopoly::agents::{Decider, HeuristicDecider};
//! use rust_monopoly::core::{DiceRoll, GameConfig, JailConfig, PlayerConfig, SpaceConfig};
//! use rust_monopoly::game::Game;
//!
//! let config = GameConfig::new()
//!     .with_spaces((0..8).map(|i| SpaceConfig::blank(format!("Space {i}"))))
//!     .with_jail(JailConfig::new(2, 50, 3))
//!     .with_player(PlayerConfig::new("Ann", 1500, 200))
//!     .with_player(PlayerConfig::new("Bo", 1500, 200));
//! let deciders: Vec<Box<dyn Decider>> = vec![
//!     Box::new(HeuristicDecider::new()),
//!     Box::new(HeuristicDecider::new()),
//! ];
//!
//! let mut game = Game::new(config, deciders, 42)
//!     .unwrap()
//!     .with_dice_script([DiceRoll::from_faces(&[4, 5])]);
//! game.play_turn().unwrap();
//!
//! // 0 + 9 wraps an 8-space board once.
//! let ann = game.player(rust_monopoly::core::PlayerId::new(0)).unwrap();
//! assert_eq!(ann.position, 1);
//! assert_eq!(ann.wallet(), 1700);
//! ```

mod finance;
mod resolve;
mod turn;

pub use turn::TurnOutcome;

use std::collections::VecDeque;

use crate::agents::{Decider, GameView};
use crate::board::Board;
use crate::cards::Deck;
use crate::core::error::{Result, ValidationError};
use crate::core::{
    CardRef, DeckId, DiceConfig, DiceRoll, EventRecord, GameConfig, GameEvent, GameRng, JailConfig,
    PlayerId, PlayerMap, PlayerState,
};

/// How a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Only this player is still solvent.
    Winner(PlayerId),
    /// The turn limit was reached. The leader has the highest net worth.
    Unfinished { leader: PlayerId },
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// A running game.
pub struct Game {
    board: Board,
    decks: Vec<Deck>,
    players: PlayerMap<PlayerState>,
    deciders: PlayerMap<Box<dyn Decider>>,
    dice: DiceConfig,
    jail: JailConfig,
    current: PlayerId,
    turn: u32,
    rng: GameRng,
    dice_script: VecDeque<DiceRoll>,
    history: im::Vector<EventRecord>,
}

impl Game {
    /// Validate a configuration and seat one decider per player, in turn
    /// order.
    pub fn new(config: GameConfig, deciders: Vec<Box<dyn Decider>>, seed: u64) -> Result<Self> {
        let count = config.players.len();
        if !(2..=u8::MAX as usize).contains(&count) {
            return Err(ValidationError::PlayerCount(count).into());
        }
        if deciders.len() != count {
            return Err(ValidationError::DeciderCount {
                expected: count,
                got: deciders.len(),
            }
            .into());
        }
        if config.decks.len() > u8::MAX as usize + 1 {
            return Err(ValidationError::IndexOutOfRange {
                what: "deck",
                index: config.decks.len() - 1,
                len: u8::MAX as usize + 1,
            }
            .into());
        }
        config.dice.validate()?;
        if config.jail.bail < 0 {
            return Err(ValidationError::NegativeBail.into());
        }

        let board = Board::from_config(&config.spaces, config.jail.index, config.decks.len())?;
        for property in board.properties() {
            if let Some(owner) = property.owner() {
                check_seat("property owner", owner, count)?;
            }
        }

        let rng = GameRng::new(seed);
        let mut decks = Vec::with_capacity(config.decks.len());
        for (i, deck_config) in config.decks.iter().enumerate() {
            let deck = Deck::from_config(
                DeckId::new(i as u8),
                deck_config,
                rng.for_context(&format!("deck-{i}")),
            )?;
            for card in deck.cards() {
                if let Some(owner) = card.owner() {
                    check_seat("card owner", owner, count)?;
                }
                check_card_target(&board, card.effect())?;
            }
            decks.push(deck);
        }

        let mut players = Vec::with_capacity(count);
        for (i, p) in config.players.iter().enumerate() {
            if p.wallet < 0 {
                return Err(ValidationError::NegativeWallet(p.name.clone()).into());
            }
            if p.salary < 0 {
                return Err(ValidationError::NegativeSalary(p.name.clone()).into());
            }
            board.check_index("player position", p.position)?;
            if p.jail_turns > 0 && p.position != board.jail_index() {
                return Err(ValidationError::JailedOffJail(p.name.clone()).into());
            }
            let mut state = PlayerState::new(PlayerId::new(i as u8), p.name.clone(), p.wallet, p.position, p.salary);
            state.kind = p.kind;
            state.color = p.color.clone();
            state.jail_turns = p.jail_turns;
            players.push(state);
        }

        let mut game = Self {
            board,
            decks,
            players: PlayerMap::from_vec(players),
            deciders: PlayerMap::from_vec(deciders),
            dice: config.dice,
            jail: config.jail,
            current: PlayerId::new(0),
            turn: 0,
            rng: rng.for_context("dice"),
            dice_script: VecDeque::new(),
            history: im::Vector::new(),
        };
        game.board.refresh_rents()?;
        tracing::debug!(players = count, spaces = game.board.len(), seed, "game created");
        Ok(game)
    }

    /// Queue fixed dice results. They are used before the RNG, in order,
    /// for turn rolls and dice-multiplier rent alike.
    #[must_use]
    pub fn with_dice_script(mut self, rolls: impl IntoIterator<Item = DiceRoll>) -> Self {
        self.dice_script.extend(rolls);
        self
    }

    /// Queue one more fixed roll.
    pub fn push_roll(&mut self, roll: DiceRoll) {
        self.dice_script.push_back(roll);
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    #[must_use]
    pub fn deck(&self, id: DeckId) -> Option<&Deck> {
        self.decks.get(id.index())
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(id)
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Rolls played so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn jail(&self) -> JailConfig {
        self.jail
    }

    #[must_use]
    pub fn dice(&self) -> DiceConfig {
        self.dice
    }

    /// Everything that has happened, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<EventRecord> {
        &self.history
    }

    /// Jail-release cards a player holds, across all decks.
    #[must_use]
    pub fn jail_cards(&self, player: PlayerId) -> Vec<CardRef> {
        self.decks.iter().flat_map(|d| d.held_by(player)).collect()
    }

    /// Players still taking turns.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Cash plus holdings: list price of each property (less the cost of
    /// lifting its mortgage) and buildings at build price.
    #[must_use]
    pub fn net_worth(&self, player: PlayerId) -> i64 {
        let cash = self.players.get(player).map_or(0, PlayerState::wallet);
        let holdings: i64 = self
            .board
            .properties()
            .filter(|p| p.owner() == Some(player))
            .map(|p| {
                let land = if p.is_mortgaged() {
                    p.price() - p.unmortgage_cost()
                } else {
                    p.price()
                };
                land + p.buildings() as i64 * p.build_price()
            })
            .sum();
        cash + holdings
    }

    /// The winner, once only one player is solvent.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.active_players().as_slice() {
            [winner] => Some(GameResult::Winner(*winner)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Play whole turns until someone wins or `max_turns` rolls have been
    /// played.
    pub fn run(&mut self, max_turns: u32) -> Result<GameResult> {
        while self.turn < max_turns {
            if let Some(result) = self.result() {
                return Ok(result);
            }
            self.play_turn()?;
        }
        Ok(self.result().unwrap_or_else(|| {
            let leader = self
                .active_players()
                .into_iter()
                .max_by_key(|&p| (self.net_worth(p), std::cmp::Reverse(p)))
                .unwrap_or(self.current);
            GameResult::Unfinished { leader }
        }))
    }

    // === Internals shared by the turn modules ===

    /// Borrow the read-only view for `seat` alongside the deciders.
    fn seat(&mut self, seat: PlayerId) -> (GameView<'_>, &mut PlayerMap<Box<dyn Decider>>) {
        (
            GameView::new(&self.board, &self.players, &self.decks, self.jail, seat, self.turn),
            &mut self.deciders,
        )
    }

    fn notify_cannot_afford(&mut self, seat: PlayerId, amount: i64) {
        tracing::debug!(player = %seat, amount, "cannot afford");
        let (view, deciders) = self.seat(seat);
        deciders[seat].notify_cannot_afford(&view, amount);
    }

    fn record(&mut self, player: PlayerId, event: GameEvent) {
        self.history.push_back(EventRecord::new(self.turn, player, event));
    }

    fn is_active(&self, player: PlayerId) -> bool {
        self.players.get(player).is_some_and(PlayerState::is_active)
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("current", &self.current)
            .field("turn", &self.turn)
            .field("players", &self.players)
            .finish_non_exhaustive()
    }
}

fn check_seat(what: &'static str, player: PlayerId, count: usize) -> std::result::Result<(), ValidationError> {
    if player.index() >= count {
        return Err(ValidationError::IndexOutOfRange {
            what,
            index: player.index(),
            len: count,
        });
    }
    Ok(())
}

fn check_card_target(board: &Board, effect: &crate::cards::CardEffect) -> std::result::Result<(), ValidationError> {
    use crate::cards::CardEffect;
    match effect {
        CardEffect::GotoSpace(target) => board.check_index("card goto space", *target),
        CardEffect::GotoColorGroup(group) => board.check_group(group),
        _ => Ok(()),
    }
}
