//! Shared fixtures for the integration tests.
//!
//! A 16-space board with every kind of space on it:
//!
//! ```text
//!  0 Go               8 Electric Company (utility)
//!  1 Mediterranean    9 Pennsylvania Railroad
//!  2 Community Chest 10 Free Parking
//!  3 Baltic          11 Street Repairs (25/house, 100/hotel)
//!  4 Income Tax -200 12 Water Works (utility)
//!  5 Reading Railroad 13 Back Three
//!  6 Chance          14 Go To Jail
//!  7 Jail            15 Boardwalk
//! ```
//!
//! Logging goes through `tracing-subscriber` with the level taken from
//! `TEST_LOG`, then `RUST_LOG`, then `warn`.

#![allow(dead_code)]

use rust_monopoly::agents::{Answer, Decider, ScriptedDecider, Transcript};
use rust_monopoly::board::SpaceEffect;
use rust_monopoly::cards::CardEffect;
use rust_monopoly::core::{
    CardConfig, DeckConfig, DeckId, DiceRoll, GameConfig, JailConfig, PlayerConfig, PlayerId,
    PropertyConfig, PropertyId, SpaceConfig,
};
use rust_monopoly::game::Game;
use tracing_subscriber::{fmt, EnvFilter};

pub const ANN: PlayerId = PlayerId(0);
pub const BO: PlayerId = PlayerId(1);
pub const CY: PlayerId = PlayerId(2);
pub const DI: PlayerId = PlayerId(3);

pub const GO: usize = 0;
pub const CHEST_SPACE: usize = 2;
pub const INCOME_TAX: usize = 4;
pub const CHANCE_SPACE: usize = 6;
pub const JAIL: usize = 7;
pub const REPAIRS: usize = 11;
pub const BACK_THREE: usize = 13;
pub const GO_TO_JAIL: usize = 14;

pub const MEDITERRANEAN: PropertyId = PropertyId(0);
pub const BALTIC: PropertyId = PropertyId(1);
pub const READING: PropertyId = PropertyId(2);
pub const ELECTRIC: PropertyId = PropertyId(3);
pub const PENNSYLVANIA: PropertyId = PropertyId(4);
pub const WATER_WORKS: PropertyId = PropertyId(5);
pub const BOARDWALK: PropertyId = PropertyId(6);

pub const CHANCE: DeckId = DeckId(0);
pub const CHEST: DeckId = DeckId(1);

pub const NAMES: [&str; 4] = ["Ann", "Bo", "Cy", "Di"];

/// Install the test subscriber. Safe to call from every test.
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Ownership and building state for the fixture's properties, in id order.
#[derive(Clone, Debug, Default)]
pub struct Holdings {
    pub owners: [Option<PlayerId>; 7],
    pub buildings: [u8; 7],
    pub mortgaged: [bool; 7],
}

impl Holdings {
    pub fn own(mut self, owner: PlayerId, properties: &[PropertyId]) -> Self {
        for p in properties {
            self.owners[p.index()] = Some(owner);
        }
        self
    }

    pub fn build(mut self, property: PropertyId, buildings: u8) -> Self {
        self.buildings[property.index()] = buildings;
        self
    }

    pub fn mortgage(mut self, property: PropertyId) -> Self {
        self.mortgaged[property.index()] = true;
        self
    }

    fn apply(&self, id: PropertyId, mut config: PropertyConfig) -> PropertyConfig {
        let i = id.index();
        config = config.with_owner(self.owners[i]).with_buildings(self.buildings[i]);
        if self.mortgaged[i] {
            config = config.mortgaged();
        }
        config
    }
}

fn street(price: i64, group: &str, rent: Vec<i64>) -> PropertyConfig {
    PropertyConfig::new(price, price / 2, group, rent)
        .with_build_price(50)
        .with_max_buildings(5)
}

fn railroad() -> PropertyConfig {
    PropertyConfig::new(200, 100, "Railroad", vec![25, 50]).scaled()
}

fn utility() -> PropertyConfig {
    PropertyConfig::new(150, 75, "Utility", vec![4, 10]).scaled().dice_multiplier()
}

pub fn spaces(holdings: &Holdings) -> Vec<SpaceConfig> {
    let h = |id, config| holdings.apply(id, config);
    vec![
        SpaceConfig::blank("Go"),
        SpaceConfig::property(
            "Mediterranean Avenue",
            h(MEDITERRANEAN, street(60, "Brown", vec![2, 10, 30, 90, 160, 250, 450])),
        ),
        SpaceConfig::effect("Community Chest", SpaceEffect::DeckDraw(CHEST)),
        SpaceConfig::property(
            "Baltic Avenue",
            h(BALTIC, street(60, "Brown", vec![4, 20, 60, 180, 320, 450, 600])),
        ),
        SpaceConfig::effect("Income Tax", SpaceEffect::Money(-200)),
        SpaceConfig::property("Reading Railroad", h(READING, railroad())),
        SpaceConfig::effect("Chance", SpaceEffect::DeckDraw(CHANCE)),
        SpaceConfig::blank("Jail"),
        SpaceConfig::property("Electric Company", h(ELECTRIC, utility())),
        SpaceConfig::property("Pennsylvania Railroad", h(PENNSYLVANIA, railroad())),
        SpaceConfig::blank("Free Parking"),
        SpaceConfig::effect(
            "Street Repairs",
            SpaceEffect::BuildingToll {
                per_house: 25,
                per_hotel: 100,
            },
        ),
        SpaceConfig::property("Water Works", h(WATER_WORKS, utility())),
        SpaceConfig::effect("Back Three", SpaceEffect::Movement(-3)),
        SpaceConfig::effect("Go To Jail", SpaceEffect::GotoJail),
        SpaceConfig::property(
            "Boardwalk",
            h(BOARDWALK, {
                let mut c = street(400, "Blue", vec![50, 200, 600, 1400, 1700, 2000, 2200]);
                c.build_price = 200;
                c
            }),
        ),
    ]
}

/// The fixture board with `players` seats of 1500 and 200 salary, and a
/// one-card deck for each of Chance and Community Chest.
pub fn config(players: usize, holdings: &Holdings) -> GameConfig {
    let mut config = GameConfig::new()
        .with_spaces(spaces(holdings))
        .with_jail(JailConfig::new(JAIL, 50, 3))
        .with_deck(deck("Chance", vec![CardEffect::Money(50)]))
        .with_deck(deck("Community Chest", vec![CardEffect::Money(-50)]));
    for name in NAMES.iter().take(players) {
        config = config.with_player(PlayerConfig::new(*name, 1500, 200));
    }
    config
}

pub fn deck(name: &str, effects: Vec<CardEffect>) -> DeckConfig {
    effects
        .into_iter()
        .enumerate()
        .fold(DeckConfig::new(name), |deck, (i, effect)| {
            deck.with_card(CardConfig::new(name, format!("{name} {i}"), effect))
        })
}

/// A running game plus a transcript per seat.
pub struct Table {
    pub game: Game,
    pub transcripts: Vec<Transcript>,
}

/// Seat one `ScriptedDecider` per answer list.
pub fn table(config: GameConfig, scripts: Vec<Vec<Answer>>, seed: u64) -> Table {
    init_logging();
    let mut transcripts = Vec::new();
    let deciders: Vec<Box<dyn Decider>> = scripts
        .into_iter()
        .map(|answers| {
            let decider = ScriptedDecider::new(answers);
            transcripts.push(decider.transcript());
            Box::new(decider) as Box<dyn Decider>
        })
        .collect();
    let game = Game::new(config, deciders, seed).unwrap();
    Table { game, transcripts }
}

/// Every seat declines everything.
pub fn passive_table(config: GameConfig) -> Table {
    let seats = config.players.len();
    table(config, vec![Vec::new(); seats], 7)
}

pub fn roll(a: u8, b: u8) -> DiceRoll {
    DiceRoll::from_faces(&[a, b])
}

pub fn wallet(game: &Game, player: PlayerId) -> i64 {
    game.player(player).unwrap().wallet()
}

pub fn position(game: &Game, player: PlayerId) -> usize {
    game.player(player).unwrap().position
}
