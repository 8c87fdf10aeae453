//! Economic state of one ownable board position.
//!
//! A `Property` tracks price, mortgage terms, rent schedule and building
//! state. It caches a single rent value, recomputed by `set_rent` whenever
//! ownership, mortgages or buildings change anywhere in its color group.
//!
//! ## Rent modes
//!
//! - **House-scaled** (default): `rent[0]` without the monopoly,
//!   `rent[buildings + 1]` with it. Schedule length is `max_buildings + 2`.
//! - **Group-scaled** (`scaled`): `rent[owned_in_group - 1]`, buildings not
//!   allowed. Schedule length equals the group size.
//! - **Dice multiplier** (independent of the two above): the cached value is a
//!   multiplier applied to a fresh roll total when rent is charged.
//!
//! ## Invariants
//!
//! - `buildings <= max_buildings`
//! - `buildings > 0` implies an owner and not mortgaged
//! - `mortgaged` implies an owner

use serde::{Deserialize, Serialize};

use crate::core::config::PropertyConfig;
use crate::core::error::{Result, StateError, ValidationError};
use crate::core::{PlayerId, PropertyId};

/// One ownable board position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    id: PropertyId,
    name: String,
    price: i64,
    mortgage: i64,
    interest_rate: f64,
    build_price: i64,
    color_group: String,
    max_buildings: u8,
    rent_schedule: Vec<i64>,
    dice_multiplier: bool,
    scaled: bool,

    buildings: u8,
    mortgaged: bool,
    owner: Option<PlayerId>,
    rent: i64,
}

impl Property {
    /// Build a property from setup data, checking everything that can be
    /// checked without seeing the rest of its color group.
    ///
    /// Group-scaled schedule length and group-wide flags are checked by
    /// `Board::from_config`.
    pub fn from_config(
        id: PropertyId,
        name: impl Into<String>,
        config: &PropertyConfig,
    ) -> std::result::Result<Self, ValidationError> {
        let name = name.into();

        if let Some(display) = &config.name {
            if *display != name {
                return Err(ValidationError::NameMismatch {
                    space: name,
                    property: display.clone(),
                });
            }
        }
        if config.price < 0 || config.build_price < 0 || config.interest_rate < 0.0 {
            return Err(ValidationError::NegativeAmount(name));
        }
        if !(0 < config.mortgage && config.mortgage < config.price) {
            return Err(ValidationError::BadMortgage(name));
        }
        if config.color_group.is_empty() {
            return Err(ValidationError::MissingColorGroup(name));
        }
        if !config.scaled && config.rent.len() != config.max_buildings as usize + 2 {
            return Err(ValidationError::RentScheduleLength {
                name,
                expected: config.max_buildings as usize + 2,
                got: config.rent.len(),
            });
        }
        if config.buildings > config.max_buildings {
            return Err(ValidationError::TooManyBuildings(name));
        }
        if config.buildings > 0 && (config.owner.is_none() || config.mortgaged) {
            return Err(ValidationError::BuildingsWithoutOwner(name));
        }
        if config.mortgaged && config.owner.is_none() {
            return Err(ValidationError::MortgagedWithoutOwner(name));
        }

        Ok(Self {
            id,
            name,
            price: config.price,
            mortgage: config.mortgage,
            interest_rate: config.interest_rate,
            build_price: config.build_price,
            color_group: config.color_group.clone(),
            max_buildings: config.max_buildings,
            rent_schedule: config.rent.clone(),
            dice_multiplier: config.dice_multiplier,
            scaled: config.scaled,
            buildings: config.buildings,
            mortgaged: config.mortgaged,
            owner: config.owner,
            rent: 0,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn id(&self) -> PropertyId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Cash received for mortgaging.
    #[must_use]
    pub fn mortgage_value(&self) -> i64 {
        self.mortgage
    }

    #[must_use]
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }

    #[must_use]
    pub fn build_price(&self) -> i64 {
        self.build_price
    }

    #[must_use]
    pub fn color_group(&self) -> &str {
        &self.color_group
    }

    #[must_use]
    pub fn max_buildings(&self) -> u8 {
        self.max_buildings
    }

    #[must_use]
    pub fn rent_schedule(&self) -> &[i64] {
        &self.rent_schedule
    }

    #[must_use]
    pub fn is_dice_multiplier(&self) -> bool {
        self.dice_multiplier
    }

    #[must_use]
    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    #[must_use]
    pub fn buildings(&self) -> u8 {
        self.buildings
    }

    /// A property at its building limit counts as carrying a hotel.
    #[must_use]
    pub fn has_hotel(&self) -> bool {
        self.max_buildings > 0 && self.buildings == self.max_buildings
    }

    #[must_use]
    pub fn is_mortgaged(&self) -> bool {
        self.mortgaged
    }

    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Can the property change hands through a sale, trade or auction?
    #[must_use]
    pub fn is_sellable(&self) -> bool {
        self.buildings == 0 && !self.mortgaged
    }

    /// The cached rent value from the last `set_rent`. For dice-multiplier
    /// properties this is the multiplier.
    #[must_use]
    pub fn rent(&self) -> i64 {
        self.rent
    }

    /// Rent owed by a visitor, given a fresh roll total for dice-multiplier
    /// properties.
    #[must_use]
    pub fn rent_due(&self, roll_total: usize) -> i64 {
        if self.dice_multiplier {
            self.rent * roll_total as i64
        } else {
            self.rent
        }
    }

    /// Cost to lift the mortgage: the mortgage value plus the interest.
    #[must_use]
    pub fn unmortgage_cost(&self) -> i64 {
        self.mortgage + self.mortgage_interest()
    }

    /// Interest alone: `round(mortgage * interest)`.
    #[must_use]
    pub fn mortgage_interest(&self) -> i64 {
        (self.mortgage as f64 * self.interest_rate).round() as i64
    }

    /// Cash returned when one building is sold back (half the build price).
    #[must_use]
    pub fn building_refund(&self) -> i64 {
        self.build_price / 2
    }

    // === Rent ===

    /// Recompute the cached rent from ownership, monopoly status and
    /// buildings. A pure function of those inputs.
    pub fn set_rent(&mut self, owned_in_group: usize, has_monopoly: bool) -> Result<()> {
        if self.owner.is_none() || self.mortgaged {
            self.rent = 0;
            return Ok(());
        }

        let index = if self.scaled {
            owned_in_group
                .checked_sub(1)
                .ok_or(StateError::RentIndex(self.id))?
        } else if has_monopoly {
            self.buildings as usize + 1
        } else {
            if self.buildings > 0 {
                return Err(StateError::RentWithoutMonopoly(self.id).into());
            }
            0
        };

        self.rent = *self
            .rent_schedule
            .get(index)
            .ok_or(StateError::RentIndex(self.id))?;
        Ok(())
    }

    // === Buildings ===

    /// Add one building. Returns the (negative) cash delta for the owner.
    ///
    /// Monopoly status is the caller's concern; this only guards the
    /// property's own invariants.
    pub fn buy_house(&mut self) -> Result<i64> {
        self.require_owned()?;
        if self.mortgaged {
            return Err(StateError::Mortgaged(self.id).into());
        }
        if self.scaled {
            return Err(StateError::ScaledBuild(self.id).into());
        }
        if self.buildings >= self.max_buildings {
            return Err(StateError::BuildingLimit(self.id).into());
        }
        self.buildings += 1;
        Ok(-self.build_price)
    }

    /// Remove one building. Returns the (positive) cash delta for the owner.
    pub fn sell_house(&mut self) -> Result<i64> {
        self.require_owned()?;
        if self.mortgaged {
            return Err(StateError::Mortgaged(self.id).into());
        }
        if self.buildings == 0 {
            return Err(StateError::NoBuildings(self.id).into());
        }
        self.buildings -= 1;
        Ok(self.building_refund())
    }

    // === Mortgages ===

    /// Mortgage the property. Returns the mortgage value as a cash delta.
    pub fn mortgage(&mut self) -> Result<i64> {
        self.require_owned()?;
        if self.mortgaged {
            return Err(StateError::Mortgaged(self.id).into());
        }
        if self.buildings > 0 {
            return Err(StateError::HasBuildings(self.id).into());
        }
        self.mortgaged = true;
        Ok(self.mortgage)
    }

    /// Lift the mortgage. Returns the negative of `unmortgage_cost`.
    pub fn unmortgage(&mut self) -> Result<i64> {
        self.require_owned()?;
        if !self.mortgaged {
            return Err(StateError::NotMortgaged(self.id).into());
        }
        self.mortgaged = false;
        Ok(-self.unmortgage_cost())
    }

    // === Ownership ===

    /// Change owner through a normal sale. Only sellable properties move.
    pub fn set_owner(&mut self, owner: Option<PlayerId>) -> Result<()> {
        if !self.is_sellable() {
            return Err(StateError::NotSellable(self.id).into());
        }
        self.owner = owner;
        Ok(())
    }

    /// Move the property out of a bankrupt estate, mortgage and all.
    ///
    /// Returns the interest the new owner owes on a mortgaged property, or
    /// zero. Passing `None` returns the property to the bank unowned and
    /// clears the mortgage.
    pub fn bankrupt_transfer(&mut self, new_owner: Option<PlayerId>) -> Result<i64> {
        if self.buildings > 0 {
            return Err(StateError::HasBuildings(self.id).into());
        }
        self.owner = new_owner;
        if new_owner.is_none() {
            self.mortgaged = false;
            return Ok(0);
        }
        Ok(if self.mortgaged { self.mortgage_interest() } else { 0 })
    }

    /// Return to the bank's starting state between games: unowned, unbuilt,
    /// unmortgaged.
    pub fn reset(&mut self) {
        self.owner = None;
        self.buildings = 0;
        self.mortgaged = false;
        self.rent = 0;
    }

    fn require_owned(&self) -> Result<PlayerId> {
        self.owner.ok_or_else(|| StateError::Unowned(self.id).into())
    }
}
