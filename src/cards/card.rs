//! Card definitions.
//!
//! A card is a value: a type label, a description and exactly one
//! `CardEffect`. The only mutable part is `owner`, which is set while a
//! jail-release card is held by a player.

use serde::{Deserialize, Serialize};

use crate::core::config::CardConfig;
use crate::core::error::{StateError, ValidationError};
use crate::core::{CardRef, PlayerId};

/// The single effect a card carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// The drawer receives (positive) or pays (negative) the bank.
    Money(i64),
    /// Applied to every other player; the drawer receives the negated total.
    MoneyPerPlayer(i64),
    /// Move forward (positive) or back (negative).
    Movement(i64),
    /// Teleport to a board index.
    GotoSpace(usize),
    /// Teleport to the next space of a color group.
    GotoColorGroup(String),
    /// Pay the bank per building held.
    BuildingToll { per_house: i64, per_hotel: i64 },
    /// Held until spent to leave jail.
    JailRelease,
    /// Go directly to jail.
    GotoJail,
}

/// A card in a deck's default set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardRef,
    kind: String,
    description: String,
    effect: CardEffect,
    owner: Option<PlayerId>,
}

impl Card {
    /// Create a card from setup data. Only jail-release cards may start held.
    pub fn from_config(id: CardRef, config: &CardConfig) -> Result<Self, ValidationError> {
        if config.owner.is_some() && config.effect != CardEffect::JailRelease {
            return Err(ValidationError::HeldNonJailCard(config.description.clone()));
        }
        Ok(Self {
            id,
            kind: config.kind.clone(),
            description: config.description.clone(),
            effect: config.effect.clone(),
            owner: config.owner,
        })
    }

    #[must_use]
    pub fn id(&self) -> CardRef {
        self.id
    }

    /// Type label, e.g. "Chance".
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn effect(&self) -> &CardEffect {
        &self.effect
    }

    #[must_use]
    pub fn is_jail_release(&self) -> bool {
        self.effect == CardEffect::JailRelease
    }

    /// Current holder. Only ever set for jail-release cards.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<PlayerId>) -> Result<(), StateError> {
        if owner.is_some() && !self.is_jail_release() {
            return Err(StateError::NotJailCard(self.id));
        }
        self.owner = owner;
        Ok(())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}
