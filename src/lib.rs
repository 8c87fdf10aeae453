//! # rust-monopoly
//!
//! A rules engine for configurable Monopoly-style board games.
//!
//! ## Design Principles
//!
//! 1. **No built-in board**: spaces, properties, decks, jail rules and seats
//!    all arrive through `GameConfig` and are validated once, up front.
//!
//! 2. **N-Player First**: per-player data lives in `PlayerMap`, indexed by
//!    `PlayerId`; nothing assumes two players.
//!
//! 3. **Deciders at the edge**: the engine never knows who plays a seat. It
//!    asks through the `Decider` trait and blocks until answered.
//!
//! ## Architecture
//!
//! - **Arenas and ids**: the `Board` owns every `Property` and decks own
//!   their cards. Everything else refers to them by `PropertyId`/`CardRef`.
//!
//! - **Deterministic**: dice and decks draw from seeded ChaCha streams, so a
//!   seed plus a decider script replays a game exactly.
//!
//! - **Persistent history**: every state change is appended to an
//!   `im::Vector` of `EventRecord`s.
//!
//! ## Modules
//!
//! - `core`: ids, players, RNG, configuration, events, errors
//! - `board`: properties, spaces, the board and its group queries
//! - `cards`: card effects and decks
//! - `deals`: auctions and trades
//! - `agents`: the `Decider` contract and its implementations
//! - `game`: the turn engine

pub mod agents;
pub mod board;
pub mod cards;
pub mod core;
pub mod deals;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardRef, DeckId, DiceConfig, DiceRoll, EventRecord, GameConfig, GameError, GameEvent, GameRng,
    JailConfig, PlayerConfig, PlayerId, PlayerMap, PlayerState, PropertyConfig, PropertyId, Result,
    SpaceConfig, StateError, ValidationError,
};

pub use crate::board::{Board, Property, Space, SpaceEffect};

pub use crate::cards::{Card, CardEffect, Deck};

pub use crate::deals::{Auction, AuctionStatus, Trade, TradeSide};

pub use crate::agents::{
    Answer, Choice, Decider, ExternalDecider, GameView, HeuristicDecider, PromptSurface, Question,
    ScriptedDecider,
};

pub use crate::game::{Game, GameResult, TurnOutcome};
