//! Core engine types: ids, players, RNG, configuration, errors, events.
//!
//! Everything here is independent of the board and turn rules. Setup data
//! arrives as a `GameConfig`; the rest of the engine builds on these types.

pub mod config;
pub mod entity;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;

pub use config::{
    CardColumns, CardConfig, DeckConfig, DiceConfig, GameConfig, JailConfig, PlayerColumns,
    PlayerConfig, PropertyConfig, SpaceColumns, SpaceConfig,
};
pub use entity::{CardRef, DeckId, PropertyId};
pub use error::{GameError, Result, StateError, ValidationError};
pub use event::{EventRecord, GameEvent};
pub use player::{PlayerId, PlayerKind, PlayerMap, PlayerState};
pub use rng::{DiceRoll, GameRng, GameRngState};
