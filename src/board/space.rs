//! Board positions.
//!
//! A `Space` carries at most one effect or one property, never both. The
//! effect is a sum type, so "at most one effect" holds by construction; the
//! remaining rule (a property space has no effect) is checked in `Space::new`.

use serde::{Deserialize, Serialize};

use crate::core::error::ValidationError;
use crate::core::{DeckId, PropertyId};

/// What happens when a player lands on a non-property space.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceEffect {
    /// Nothing happens (go, free parking, just visiting).
    #[default]
    None,
    /// Receive (positive) or pay (negative) the bank.
    Money(i64),
    /// Move forward (positive) or back (negative).
    Movement(i64),
    /// Teleport to a board index.
    GotoSpace(usize),
    /// Teleport to the next space of a color group.
    GotoColorGroup(String),
    /// Pay the bank per building held across all holdings.
    BuildingToll { per_house: i64, per_hotel: i64 },
    /// Draw from a deck.
    DeckDraw(DeckId),
    /// Go directly to jail without passing go.
    GotoJail,
}

impl SpaceEffect {
    /// Does this effect do anything?
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, SpaceEffect::None)
    }
}

/// One board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    name: String,
    effect: SpaceEffect,
    property: Option<PropertyId>,
}

impl Space {
    /// Create a space. A property space may not also carry an effect.
    pub fn new(
        name: impl Into<String>,
        effect: SpaceEffect,
        property: Option<PropertyId>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if property.is_some() && !effect.is_none() {
            return Err(ValidationError::PropertyWithEffect(name));
        }
        Ok(Self {
            name,
            effect,
            property,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn effect(&self) -> &SpaceEffect {
        &self.effect
    }

    #[must_use]
    pub fn property(&self) -> Option<PropertyId> {
        self.property
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_space() {
        let go = Space::new("Go", SpaceEffect::None, None).unwrap();
        assert_eq!(go.name(), "Go");
        assert!(go.effect().is_none());
        assert_eq!(go.property(), None);
    }

    #[test]
    fn test_property_space() {
        let space = Space::new("Boardwalk", SpaceEffect::None, Some(PropertyId::new(21))).unwrap();
        assert_eq!(space.property(), Some(PropertyId::new(21)));
    }

    #[test]
    fn test_property_with_effect_rejected() {
        let err = Space::new("Boardwalk", SpaceEffect::Money(-75), Some(PropertyId::new(21)));
        assert_eq!(err, Err(ValidationError::PropertyWithEffect("Boardwalk".into())));
    }
}
