//! The board: a cyclic sequence of spaces plus the property arena.
//!
//! `Board` owns every `Property`. Spaces, trades, auctions and the turn
//! engine refer to them by `PropertyId`. Color-group membership is indexed
//! once at construction; ownership and monopoly queries are plain reads over
//! the arena.

use rustc_hash::FxHashMap;

use super::property::Property;
use super::space::{Space, SpaceEffect};
use crate::core::config::SpaceConfig;
use crate::core::error::{Result, StateError, ValidationError};
use crate::core::{PlayerId, PropertyId};

/// The game board.
#[derive(Clone, Debug)]
pub struct Board {
    spaces: Vec<Space>,
    properties: Vec<Property>,
    /// Board index of each property, parallel to `properties`.
    locations: Vec<usize>,
    /// Members of each color group, in board order.
    groups: FxHashMap<String, Vec<PropertyId>>,
    jail: usize,
}

impl Board {
    /// Build and validate a board.
    ///
    /// Checks board shape, the jail index, per-space effect rules, goto
    /// targets, deck references, and the color-group invariants.
    pub fn from_config(
        spaces: &[SpaceConfig],
        jail: usize,
        deck_count: usize,
    ) -> std::result::Result<Self, ValidationError> {
        if spaces.is_empty() {
            return Err(ValidationError::EmptyBoard);
        }
        if spaces.len() % 4 != 0 {
            return Err(ValidationError::BoardNotSymmetric(spaces.len()));
        }
        if jail >= spaces.len() {
            return Err(ValidationError::IndexOutOfRange {
                what: "jail",
                index: jail,
                len: spaces.len(),
            });
        }

        let mut board = Self {
            spaces: Vec::with_capacity(spaces.len()),
            properties: Vec::new(),
            locations: Vec::new(),
            groups: FxHashMap::default(),
            jail,
        };

        for (index, config) in spaces.iter().enumerate() {
            let property = match &config.property {
                Some(prop_config) => {
                    let id = PropertyId::new(board.properties.len() as u16);
                    let property = Property::from_config(id, &config.name, prop_config)?;
                    board
                        .groups
                        .entry(property.color_group().to_string())
                        .or_default()
                        .push(id);
                    board.properties.push(property);
                    board.locations.push(index);
                    Some(id)
                }
                None => None,
            };
            board
                .spaces
                .push(Space::new(config.name.clone(), config.effect.clone(), property)?);
        }

        for space in &board.spaces {
            match space.effect() {
                SpaceEffect::GotoSpace(target) => board.check_index("goto space", *target)?,
                SpaceEffect::GotoColorGroup(group) => board.check_group(group)?,
                SpaceEffect::DeckDraw(deck) if deck.index() >= deck_count => {
                    return Err(ValidationError::UnknownDeck(*deck));
                }
                _ => {}
            }
        }

        board.check_groups()?;
        Ok(board)
    }

    /// Fail unless `index` is on the board.
    pub fn check_index(&self, what: &'static str, index: usize) -> std::result::Result<(), ValidationError> {
        if index >= self.spaces.len() {
            return Err(ValidationError::IndexOutOfRange {
                what,
                index,
                len: self.spaces.len(),
            });
        }
        Ok(())
    }

    /// Fail unless a color group with this name has members.
    pub fn check_group(&self, group: &str) -> std::result::Result<(), ValidationError> {
        if !self.groups.contains_key(group) {
            return Err(ValidationError::UnknownColorGroup(group.to_string()));
        }
        Ok(())
    }

    /// Group-wide invariants: shared flags, scaled schedule length, and a
    /// single owner for any group carrying buildings.
    pub fn check_groups(&self) -> std::result::Result<(), ValidationError> {
        for (name, members) in &self.groups {
            let first = &self.properties[members[0].index()];
            let mut owners = members.iter().map(|id| self.properties[id.index()].owner());
            let first_owner = owners.next().flatten();
            let single_owner = first_owner.is_some() && owners.all(|o| o == first_owner);
            let mut built = false;

            for id in members {
                let prop = &self.properties[id.index()];
                if prop.is_scaled() != first.is_scaled()
                    || prop.is_dice_multiplier() != first.is_dice_multiplier()
                {
                    return Err(ValidationError::MixedGroupFlags(name.clone()));
                }
                if prop.is_scaled() && prop.rent_schedule().len() != members.len() {
                    return Err(ValidationError::RentScheduleLength {
                        name: prop.name().to_string(),
                        expected: members.len(),
                        got: prop.rent_schedule().len(),
                    });
                }
                built |= prop.buildings() > 0;
            }

            if built && !single_owner {
                return Err(ValidationError::SplitBuiltGroup(name.clone()));
            }
        }
        Ok(())
    }

    // === Spaces ===

    /// Number of spaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    /// Boards are never empty; provided for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    #[must_use]
    pub fn space(&self, index: usize) -> Option<&Space> {
        self.spaces.get(index)
    }

    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter()
    }

    /// Board index of the jail.
    #[must_use]
    pub fn jail_index(&self) -> usize {
        self.jail
    }

    // === Properties ===

    #[must_use]
    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties.get(id.index())
    }

    /// Look up a property, failing on a stale or foreign id.
    pub fn property(&self, id: PropertyId) -> Result<&Property> {
        self.properties
            .get(id.index())
            .ok_or_else(|| StateError::UnknownProperty(id).into())
    }

    /// Mutable variant of `property`.
    pub fn property_mut(&mut self, id: PropertyId) -> Result<&mut Property> {
        self.properties
            .get_mut(id.index())
            .ok_or_else(|| StateError::UnknownProperty(id).into())
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    /// Number of properties on the board.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Board index the property sits on.
    #[must_use]
    pub fn location(&self, id: PropertyId) -> Option<usize> {
        self.locations.get(id.index()).copied()
    }

    /// Members of a color group, in board order. Empty for unknown groups.
    #[must_use]
    pub fn group(&self, name: &str) -> &[PropertyId] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names of all color groups.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    // === Ownership queries ===

    /// Properties held by a player, in board order.
    #[must_use]
    pub fn holdings(&self, player: PlayerId) -> Vec<PropertyId> {
        self.properties
            .iter()
            .filter(|p| p.owner() == Some(player))
            .map(Property::id)
            .collect()
    }

    /// How many members of `group` the player owns.
    #[must_use]
    pub fn owned_in_group(&self, player: PlayerId, group: &str) -> usize {
        self.group(group)
            .iter()
            .filter(|id| self.properties[id.index()].owner() == Some(player))
            .count()
    }

    /// The player owns every member of the group and none is mortgaged.
    #[must_use]
    pub fn has_monopoly(&self, player: PlayerId, group: &str) -> bool {
        let members = self.group(group);
        !members.is_empty()
            && members.iter().all(|id| {
                let prop = &self.properties[id.index()];
                prop.owner() == Some(player) && !prop.is_mortgaged()
            })
    }

    /// Does any member of the group carry buildings?
    #[must_use]
    pub fn group_has_buildings(&self, group: &str) -> bool {
        self.group(group)
            .iter()
            .any(|id| self.properties[id.index()].buildings() > 0)
    }

    /// Can this property change hands without breaking a group invariant?
    ///
    /// Besides being sellable itself, no other member of its group may carry
    /// buildings (a built group always has a single owner).
    #[must_use]
    pub fn is_transferable(&self, id: PropertyId) -> bool {
        self.get(id)
            .is_some_and(|p| p.is_sellable() && !self.group_has_buildings(p.color_group()))
    }

    /// Houses and hotels across a player's holdings. A property at its
    /// building limit counts as one hotel, otherwise each building is a house.
    #[must_use]
    pub fn building_totals(&self, player: PlayerId) -> (i64, i64) {
        self.properties
            .iter()
            .filter(|p| p.owner() == Some(player))
            .fold((0, 0), |(houses, hotels), p| {
                if p.has_hotel() {
                    (houses, hotels + 1)
                } else {
                    (houses + p.buildings() as i64, hotels)
                }
            })
    }

    /// The first member of `group` strictly ahead of `from`, wrapping around
    /// the board.
    #[must_use]
    pub fn next_in_group(&self, from: usize, group: &str) -> Option<usize> {
        let size = self.spaces.len();
        self.group(group)
            .iter()
            .filter_map(|id| self.location(*id))
            .min_by_key(|&index| (index + size - from - 1) % size)
    }

    // === Rent ===

    /// Recompute every property's cached rent.
    pub fn refresh_rents(&mut self) -> Result<()> {
        for i in 0..self.properties.len() {
            let (owned, monopoly) = match self.properties[i].owner() {
                Some(owner) => {
                    let group = self.properties[i].color_group();
                    (self.owned_in_group(owner, group), self.has_monopoly(owner, group))
                }
                None => (0, false),
            };
            self.properties[i].set_rent(owned, monopoly)?;
        }
        Ok(())
    }

    /// Return every property to the bank for a new game.
    pub fn reset(&mut self) {
        for prop in &mut self.properties {
            prop.reset();
        }
    }
}
