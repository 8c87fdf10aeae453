//! Cards and decks.
//!
//! ## Key Types
//!
//! - `CardEffect`: the single effect a card carries
//! - `Card`: a card in a deck's default set, optionally held by a player
//! - `Deck`: the default set plus the draw pool and the owned pool

pub mod card;
pub mod deck;

pub use card::{Card, CardEffect};
pub use deck::Deck;
