//! Engine error types.
//!
//! Two families, both fatal to the operation that raised them:
//!
//! - `ValidationError`: malformed or contradictory setup input. Raised by
//!   constructors and `Game::new`; a game never starts with one outstanding.
//! - `StateError`: an operation invoked in a state that does not permit it.
//!   These indicate an orchestration bug and halt the turn.
//!
//! Running short of money is *not* an error. Affordability is checked up front
//! and reported to the decider through `notify_cannot_afford`.

use thiserror::Error;

use super::entity::{CardRef, DeckId, PropertyId};
use super::player::PlayerId;

/// Malformed or contradictory setup input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("board must have at least one space")]
    EmptyBoard,
    #[error("board size {0} is not divisible by 4")]
    BoardNotSymmetric(usize),
    #[error("{what} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },
    #[error("parallel setup arrays disagree: {field} has {got} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("space {0:?} configures more than one effect")]
    MultipleEffects(String),
    #[error("card {0:?} configures more than one effect")]
    CardMultipleEffects(String),
    #[error("card {0:?} starts held but is not a jail-release card")]
    HeldNonJailCard(String),
    #[error("card {0:?} configures no effect")]
    CardWithoutEffect(String),
    #[error("space {0:?} owns a property and also configures an effect")]
    PropertyWithEffect(String),
    #[error("property name {property:?} does not match space name {space:?}")]
    NameMismatch { space: String, property: String },
    #[error("property {0:?} needs 0 < mortgage < price")]
    BadMortgage(String),
    #[error("property {0:?} has a negative price, build price or interest rate")]
    NegativeAmount(String),
    #[error("property {0:?} has an empty color group")]
    MissingColorGroup(String),
    #[error("property {name:?} rent schedule has {got} entries, expected {expected}")]
    RentScheduleLength {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("property {0:?} starts with more buildings than it allows")]
    TooManyBuildings(String),
    #[error("property {0:?} starts with buildings but is unowned or mortgaged")]
    BuildingsWithoutOwner(String),
    #[error("property {0:?} starts mortgaged but has no owner")]
    MortgagedWithoutOwner(String),
    #[error("color group {0:?} mixes scaled or dice-multiplier flags")]
    MixedGroupFlags(String),
    #[error("color group {0:?} has buildings but more than one owner")]
    SplitBuiltGroup(String),
    #[error("color group {0:?} is referenced but has no properties")]
    UnknownColorGroup(String),
    #[error("{0} does not exist")]
    UnknownDeck(DeckId),
    #[error("deck {0:?} has no cards")]
    EmptyDeck(String),
    #[error("jail bail cannot be negative")]
    NegativeBail,
    #[error("dice need at least one die with at least two sides")]
    BadDice,
    #[error("a game needs between 2 and 255 players, got {0}")]
    PlayerCount(usize),
    #[error("expected {expected} deciders for {expected} players, got {got}")]
    DeciderCount { expected: usize, got: usize },
    #[error("player {0:?} starts with a negative wallet")]
    NegativeWallet(String),
    #[error("player {0:?} has a negative salary")]
    NegativeSalary(String),
    #[error("player {0:?} starts in jail away from the jail space")]
    JailedOffJail(String),
}

/// An operation invoked when the entity's state does not permit it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("the auction is already confirmed")]
    AuctionConfirmed,
    #[error("the auction for {0} is still open")]
    AuctionOpen(PropertyId),
    #[error("the auction for {0} has no bidders")]
    NoBidders(PropertyId),
    #[error("{player} cannot afford the winning bid of {bid}")]
    UnaffordableWinningBid { player: PlayerId, bid: i64 },
    #[error("the trade is already confirmed")]
    TradeConfirmed,
    #[error("a player cannot trade with themselves")]
    SelfTrade,
    #[error("{proposer} proposed a trade between {sender} and {receiver}")]
    ForeignTrade {
        proposer: PlayerId,
        sender: PlayerId,
        receiver: PlayerId,
    },
    #[error("{0} is already owned")]
    AlreadyOwned(PropertyId),
    #[error("{0} is not owned by the offering side")]
    PropertyNotOwned(PropertyId),
    #[error("{0} is not held by the offering side")]
    CardNotHeld(CardRef),
    #[error("{0} is not a jail-release card")]
    NotJailCard(CardRef),
    #[error("{player} cannot afford to offer {amount}")]
    UnaffordableOffer { player: PlayerId, amount: i64 },
    #[error("money offers cannot be negative")]
    NegativeOffer,
    #[error("{0} has buildings or is mortgaged and cannot change hands")]
    NotSellable(PropertyId),
    #[error("{0} has no owner")]
    Unowned(PropertyId),
    #[error("{0} is mortgaged")]
    Mortgaged(PropertyId),
    #[error("{0} is not mortgaged")]
    NotMortgaged(PropertyId),
    #[error("{0} has buildings")]
    HasBuildings(PropertyId),
    #[error("{0} is already at its building limit")]
    BuildingLimit(PropertyId),
    #[error("{0} has no buildings to sell")]
    NoBuildings(PropertyId),
    #[error("{0} rents by group size and cannot be built on")]
    ScaledBuild(PropertyId),
    #[error("{0} has buildings without its owner holding the monopoly")]
    RentWithoutMonopoly(PropertyId),
    #[error("{0} rent schedule has no entry for this state")]
    RentIndex(PropertyId),
    #[error("{player} does not own {property}")]
    OwnerMismatch {
        player: PlayerId,
        property: PropertyId,
    },
    #[error("{player} cannot pay {amount} without going below zero")]
    Overdraft { player: PlayerId, amount: i64 },
    #[error("{0} is not in jail")]
    NotInJail(PlayerId),
    #[error("{0} is jailed but not on the jail space")]
    JailedOffJail(PlayerId),
    #[error("{0} has gone bankrupt")]
    Bankrupt(PlayerId),
    #[error("every card in {0} is held by a player")]
    DeckLocked(DeckId),
    #[error("{0} does not exist")]
    UnknownCard(CardRef),
    #[error("{0} does not exist")]
    UnknownProperty(PropertyId),
    #[error("choice {index} is out of range ({len} options)")]
    ChoiceOutOfRange { index: usize, len: usize },
    #[error("space effects kept moving {0} without settling")]
    ResolutionLoop(PlayerId),
    #[error("the game is over")]
    GameOver,
}

/// Any engine failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid setup: {0}")]
    Validation(#[from] ValidationError),
    #[error("illegal state: {0}")]
    State(#[from] StateError),
}

impl GameError {
    /// Was this raised while validating setup input?
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, GameError::Validation(_))
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, GameError>;
