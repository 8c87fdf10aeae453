//! Game configuration types.
//!
//! Setup collaborators (board editors, wizards, test fixtures) describe a game
//! by providing:
//! - `SpaceConfig`/`PropertyConfig`: the board, in order
//! - `DeckConfig`/`CardConfig`: card decks
//! - `PlayerConfig`: seats, in turn order
//! - `JailConfig`/`DiceConfig`: jail position, bail, sentence, dice
//! - `GameConfig`: all of the above
//!
//! The engine holds no default board. Everything arrives through a
//! `GameConfig` and is validated by `Game::new`.
//!
//! Collaborators that collect setup data as parallel arrays use
//! `SpaceColumns`, `CardColumns` and `PlayerColumns`, which check lengths and
//! effect exclusivity before producing the records above.

use serde::{Deserialize, Serialize};

use super::entity::DeckId;
use super::error::ValidationError;
use super::player::{PlayerId, PlayerKind};
use crate::board::SpaceEffect;
use crate::cards::CardEffect;

/// Dice thrown each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceConfig {
    pub count: u8,
    pub sides: u8,
}

impl DiceConfig {
    #[must_use]
    pub const fn new(count: u8, sides: u8) -> Self {
        Self { count, sides }
    }

    /// Two six-sided dice.
    #[must_use]
    pub const fn standard() -> Self {
        Self::new(2, 6)
    }

    /// At least one die with at least two sides.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 || self.sides < 2 {
            return Err(ValidationError::BadDice);
        }
        Ok(())
    }
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Jail rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JailConfig {
    /// Board index of the jail space.
    pub index: usize,
    /// Cost to leave jail early.
    pub bail: i64,
    /// Jail turns assigned when a player is sent to jail.
    pub sentence: u32,
}

impl JailConfig {
    #[must_use]
    pub const fn new(index: usize, bail: i64, sentence: u32) -> Self {
        Self { index, bail, sentence }
    }
}

/// Setup data for one property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Display name, if the collaborator tracks one separately. Must equal the
    /// space name when present.
    #[serde(default)]
    pub name: Option<String>,
    pub price: i64,
    pub mortgage: i64,
    pub interest_rate: f64,
    pub build_price: i64,
    pub color_group: String,
    pub max_buildings: u8,
    pub rent: Vec<i64>,
    #[serde(default)]
    pub buildings: u8,
    #[serde(default)]
    pub dice_multiplier: bool,
    #[serde(default)]
    pub scaled: bool,
    #[serde(default)]
    pub mortgaged: bool,
    #[serde(default)]
    pub owner: Option<PlayerId>,
}

impl PropertyConfig {
    /// An unowned, unbuildable property with 10% mortgage interest.
    pub fn new(price: i64, mortgage: i64, color_group: impl Into<String>, rent: Vec<i64>) -> Self {
        Self {
            name: None,
            price,
            mortgage,
            interest_rate: 0.1,
            build_price: 0,
            color_group: color_group.into(),
            max_buildings: 0,
            rent,
            buildings: 0,
            dice_multiplier: false,
            scaled: false,
            mortgaged: false,
            owner: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_interest_rate(mut self, rate: f64) -> Self {
        self.interest_rate = rate;
        self
    }

    #[must_use]
    pub fn with_build_price(mut self, price: i64) -> Self {
        self.build_price = price;
        self
    }

    #[must_use]
    pub fn with_max_buildings(mut self, max: u8) -> Self {
        self.max_buildings = max;
        self
    }

    #[must_use]
    pub fn with_buildings(mut self, buildings: u8) -> Self {
        self.buildings = buildings;
        self
    }

    #[must_use]
    pub fn with_owner(mut self, owner: Option<PlayerId>) -> Self {
        self.owner = owner;
        self
    }

    /// Rent scales with the number of group members owned.
    #[must_use]
    pub fn scaled(mut self) -> Self {
        self.scaled = true;
        self
    }

    /// Rent values multiply a fresh dice roll.
    #[must_use]
    pub fn dice_multiplier(mut self) -> Self {
        self.dice_multiplier = true;
        self
    }

    #[must_use]
    pub fn mortgaged(mut self) -> Self {
        self.mortgaged = true;
        self
    }
}

/// Setup data for one board position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpaceConfig {
    pub name: String,
    #[serde(default)]
    pub effect: SpaceEffect,
    #[serde(default)]
    pub property: Option<PropertyConfig>,
}

impl SpaceConfig {
    /// A space with no effect.
    pub fn blank(name: impl Into<String>) -> Self {
        Self::effect(name, SpaceEffect::None)
    }

    /// A space with one effect.
    pub fn effect(name: impl Into<String>, effect: SpaceEffect) -> Self {
        Self {
            name: name.into(),
            effect,
            property: None,
        }
    }

    /// A property space.
    pub fn property(name: impl Into<String>, property: PropertyConfig) -> Self {
        Self {
            name: name.into(),
            effect: SpaceEffect::None,
            property: Some(property),
        }
    }
}

/// Setup data for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Type label, e.g. "Chance".
    pub kind: String,
    pub description: String,
    pub effect: CardEffect,
    /// Holder of a jail-release card at game start.
    #[serde(default)]
    pub owner: Option<PlayerId>,
}

impl CardConfig {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, effect: CardEffect) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            effect,
            owner: None,
        }
    }

    #[must_use]
    pub fn held_by(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Setup data for one deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckConfig {
    pub name: String,
    pub cards: Vec<CardConfig>,
}

impl DeckConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: CardConfig) -> Self {
        self.cards.push(card);
        self
    }
}

/// Setup data for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub kind: PlayerKind,
    pub wallet: i64,
    #[serde(default)]
    pub position: usize,
    pub salary: i64,
    #[serde(default)]
    pub jail_turns: u32,
    #[serde(default)]
    pub color: String,
}

impl PlayerConfig {
    /// A free player on go.
    pub fn new(name: impl Into<String>, wallet: i64, salary: i64) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
            wallet,
            position: 0,
            salary,
            jail_turns: 0,
            color: String::new(),
        }
    }

    #[must_use]
    pub fn computer(mut self) -> Self {
        self.kind = PlayerKind::Computer;
        self
    }

    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn jailed(mut self, turns: u32) -> Self {
        self.jail_turns = turns;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub spaces: Vec<SpaceConfig>,
    pub decks: Vec<DeckConfig>,
    pub players: Vec<PlayerConfig>,
    pub jail: JailConfig,
    pub dice: DiceConfig,
}

impl GameConfig {
    /// An empty configuration with standard dice and a jail on space 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            spaces: Vec::new(),
            decks: Vec::new(),
            players: Vec::new(),
            jail: JailConfig::new(0, 50, 3),
            dice: DiceConfig::standard(),
        }
    }

    #[must_use]
    pub fn with_space(mut self, space: SpaceConfig) -> Self {
        self.spaces.push(space);
        self
    }

    #[must_use]
    pub fn with_spaces(mut self, spaces: impl IntoIterator<Item = SpaceConfig>) -> Self {
        self.spaces.extend(spaces);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: DeckConfig) -> Self {
        self.decks.push(deck);
        self
    }

    #[must_use]
    pub fn with_player(mut self, player: PlayerConfig) -> Self {
        self.players.push(player);
        self
    }

    #[must_use]
    pub fn with_jail(mut self, jail: JailConfig) -> Self {
        self.jail = jail;
        self
    }

    #[must_use]
    pub fn with_dice(mut self, dice: DiceConfig) -> Self {
        self.dice = dice;
        self
    }

    /// Get a deck config by ID.
    #[must_use]
    pub fn get_deck(&self, id: DeckId) -> Option<&DeckConfig> {
        self.decks.get(id.index())
    }

    /// Assemble a configuration from the column-per-field setup form.
    ///
    /// Decks are numbered in the order given. Any column whose length differs
    /// from its table's name column is a `LengthMismatch`.
    pub fn from_parallel(
        spaces: SpaceColumns,
        decks: Vec<(String, CardColumns)>,
        players: PlayerColumns,
        jail: JailConfig,
        dice: DiceConfig,
    ) -> Result<Self, ValidationError> {
        let decks = decks
            .into_iter()
            .map(|(name, cards)| {
                Ok(DeckConfig {
                    name,
                    cards: cards.into_configs()?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self {
            spaces: spaces.into_configs()?,
            decks,
            players: players.into_configs()?,
            jail,
            dice,
        })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Parallel-array setup
// =============================================================================

fn check_len(field: &'static str, expected: usize, got: usize) -> Result<(), ValidationError> {
    if expected != got {
        return Err(ValidationError::LengthMismatch { field, expected, got });
    }
    Ok(())
}

/// Board setup as parallel columns, one entry per space.
///
/// Zero/`None` means "not set". At most one effect column may be set per
/// space, and none when the space has a property.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpaceColumns {
    pub names: Vec<String>,
    pub money: Vec<i64>,
    pub movement: Vec<i64>,
    pub goto_space: Vec<Option<usize>>,
    pub goto_color_group: Vec<Option<String>>,
    pub building_toll: Vec<Option<(i64, i64)>>,
    pub deck: Vec<Option<u8>>,
    pub properties: Vec<Option<PropertyConfig>>,
}

impl SpaceColumns {
    /// Zip the columns into space records.
    pub fn into_configs(self) -> Result<Vec<SpaceConfig>, ValidationError> {
        let n = self.names.len();
        check_len("money", n, self.money.len())?;
        check_len("movement", n, self.movement.len())?;
        check_len("goto_space", n, self.goto_space.len())?;
        check_len("goto_color_group", n, self.goto_color_group.len())?;
        check_len("building_toll", n, self.building_toll.len())?;
        check_len("deck", n, self.deck.len())?;
        check_len("properties", n, self.properties.len())?;

        let mut configs = Vec::with_capacity(n);
        let columns = self
            .names
            .into_iter()
            .zip(self.money)
            .zip(self.movement)
            .zip(self.goto_space)
            .zip(self.goto_color_group)
            .zip(self.building_toll)
            .zip(self.deck)
            .zip(self.properties);

        for (((((((name, money), movement), goto), group), toll), deck), property) in columns {
            let mut effects = Vec::new();
            if money != 0 {
                effects.push(SpaceEffect::Money(money));
            }
            if movement != 0 {
                effects.push(SpaceEffect::Movement(movement));
            }
            if let Some(index) = goto {
                effects.push(SpaceEffect::GotoSpace(index));
            }
            if let Some(group) = group {
                effects.push(SpaceEffect::GotoColorGroup(group));
            }
            if let Some((per_house, per_hotel)) = toll {
                effects.push(SpaceEffect::BuildingToll { per_house, per_hotel });
            }
            if let Some(deck) = deck {
                effects.push(SpaceEffect::DeckDraw(DeckId::new(deck)));
            }

            if effects.len() > 1 {
                return Err(ValidationError::MultipleEffects(name));
            }
            let effect = effects.pop().unwrap_or_default();
            if property.is_some() && !effect.is_none() {
                return Err(ValidationError::PropertyWithEffect(name));
            }
            configs.push(SpaceConfig { name, effect, property });
        }
        Ok(configs)
    }
}

/// One deck's cards as parallel columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardColumns {
    pub kinds: Vec<String>,
    pub descriptions: Vec<String>,
    pub money: Vec<i64>,
    /// Apply `money` to every other player instead of the drawer.
    pub per_player: Vec<bool>,
    pub movement: Vec<i64>,
    pub goto_space: Vec<Option<usize>>,
    pub goto_color_group: Vec<Option<String>>,
    pub building_toll: Vec<Option<(i64, i64)>>,
    pub jail_release: Vec<bool>,
}

impl CardColumns {
    /// Zip the columns into card records. Every card needs exactly one effect.
    pub fn into_configs(self) -> Result<Vec<CardConfig>, ValidationError> {
        let n = self.kinds.len();
        check_len("descriptions", n, self.descriptions.len())?;
        check_len("money", n, self.money.len())?;
        check_len("per_player", n, self.per_player.len())?;
        check_len("movement", n, self.movement.len())?;
        check_len("goto_space", n, self.goto_space.len())?;
        check_len("goto_color_group", n, self.goto_color_group.len())?;
        check_len("building_toll", n, self.building_toll.len())?;
        check_len("jail_release", n, self.jail_release.len())?;

        let mut configs = Vec::with_capacity(n);
        for i in 0..n {
            let description = self.descriptions[i].clone();
            let mut effects = Vec::new();
            if self.money[i] != 0 {
                effects.push(if self.per_player[i] {
                    CardEffect::MoneyPerPlayer(self.money[i])
                } else {
                    CardEffect::Money(self.money[i])
                });
            }
            if self.movement[i] != 0 {
                effects.push(CardEffect::Movement(self.movement[i]));
            }
            if let Some(index) = self.goto_space[i] {
                effects.push(CardEffect::GotoSpace(index));
            }
            if let Some(group) = &self.goto_color_group[i] {
                effects.push(CardEffect::GotoColorGroup(group.clone()));
            }
            if let Some((per_house, per_hotel)) = self.building_toll[i] {
                effects.push(CardEffect::BuildingToll { per_house, per_hotel });
            }
            if self.jail_release[i] {
                effects.push(CardEffect::JailRelease);
            }

            let effect = match effects.len() {
                0 => return Err(ValidationError::CardWithoutEffect(description)),
                1 => effects.remove(0),
                _ => return Err(ValidationError::CardMultipleEffects(description)),
            };
            configs.push(CardConfig::new(self.kinds[i].clone(), description, effect));
        }
        Ok(configs)
    }
}

/// Seats as parallel columns, in turn order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerColumns {
    pub names: Vec<String>,
    pub kinds: Vec<PlayerKind>,
    pub wallets: Vec<i64>,
    pub positions: Vec<usize>,
    pub salaries: Vec<i64>,
    pub jail_turns: Vec<u32>,
    pub colors: Vec<String>,
}

impl PlayerColumns {
    /// Zip the columns into player records.
    pub fn into_configs(self) -> Result<Vec<PlayerConfig>, ValidationError> {
        let n = self.names.len();
        check_len("kinds", n, self.kinds.len())?;
        check_len("wallets", n, self.wallets.len())?;
        check_len("positions", n, self.positions.len())?;
        check_len("salaries", n, self.salaries.len())?;
        check_len("jail_turns", n, self.jail_turns.len())?;
        check_len("colors", n, self.colors.len())?;

        Ok((0..n)
            .map(|i| PlayerConfig {
                name: self.names[i].clone(),
                kind: self.kinds[i],
                wallet: self.wallets[i],
                position: self.positions[i],
                salary: self.salaries[i],
                jail_turns: self.jail_turns[i],
                color: self.colors[i].clone(),
            })
            .collect())
    }
}
