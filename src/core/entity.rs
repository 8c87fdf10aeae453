//! Stable identifiers into the engine's arenas.
//!
//! Properties live in the board's property list and cards live in their deck's
//! default set. Everything else (spaces, trades, auctions, the turn engine)
//! refers to them by these ids, never by copies, so there is exactly one copy
//! of each mutable entity.
//!
//! ```
//! use rust_monopoly::core::{CardRef, DeckId, PropertyId};
//!
//! let park_place = PropertyId::new(20);
//! assert_eq!(park_place.index(), 20);
//!
//! let get_out = CardRef::new(DeckId::new(1), 4);
//! assert_eq!(get_out.deck, DeckId::new(1));
//! assert_eq!(format!("{}", get_out), "Card(1:4)");
//! ```

use serde::{Deserialize, Serialize};

/// Index of a property in the board's property arena.
///
/// Assigned in board order at setup: the first ownable space gets
/// `PropertyId(0)`, the next `PropertyId(1)`, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub u16);

impl PropertyId {
    /// Create a new property ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position in the property arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.0)
    }
}

/// Index of a deck in the game's deck list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeckId(pub u8);

impl DeckId {
    /// Create a new deck ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Position in the deck list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// A card, addressed by its deck and its slot in that deck's default set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardRef {
    /// Deck the card belongs to.
    pub deck: DeckId,
    /// Slot in the deck's default set.
    pub slot: u16,
}

impl CardRef {
    /// Create a new card reference.
    #[must_use]
    pub const fn new(deck: DeckId, slot: u16) -> Self {
        Self { deck, slot }
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({}:{})", self.deck.0, self.slot)
    }
}
