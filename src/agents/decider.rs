//! The decision contract between the turn engine and whoever plays a seat.
//!
//! The engine never knows whether a seat is a person at a UI, the built-in
//! heuristic or a test script. It asks through `Decider` and blocks until the
//! answer comes back.
//!
//! Every call receives a read-only `GameView` and a `Question` describing
//! what is being asked. Bounded answers (`ask_int`, `ask_choice`) use `None`
//! as the decline sentinel.

use crate::core::{PlayerId, PropertyId};
use crate::deals::Trade;

use super::view::GameView;

// =============================================================================
// Questions
// =============================================================================

/// What the engine is asking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Question<'a> {
    /// Buy the property just landed on at list price?
    BuyProperty(PropertyId),
    /// Raise the current high bid in an auction.
    Bid { property: PropertyId, high_bid: i64 },
    /// Spend a held jail-release card?
    UseJailCard,
    /// Pay bail to leave jail now?
    PayBail(i64),
    /// Propose a trade for someone's jail-release card.
    TradeForJailCard,
    /// Propose a trade during the trading window.
    ProposeTrade,
    /// Accept a trade proposed to you?
    AcceptTrade(&'a Trade),
    /// Pick a building to sell.
    SellBuilding,
    /// Pick a property to mortgage.
    Mortgage,
    /// Pick a property to lift the mortgage on.
    Unmortgage,
    /// Pick a property to build on.
    BuyBuilding,
    /// Pick an asset to liquidate toward a debt you cannot pay.
    RaiseFunds { owed: i64 },
}

impl std::fmt::Display for Question<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Question::BuyProperty(p) => write!(f, "Buy {p}?"),
            Question::Bid { property, high_bid } => {
                write!(f, "Bid on {property} (high bid {high_bid})")
            }
            Question::UseJailCard => write!(f, "Use your get-out-of-jail card?"),
            Question::PayBail(bail) => write!(f, "Pay {bail} bail to leave jail?"),
            Question::TradeForJailCard => write!(f, "Trade for a get-out-of-jail card?"),
            Question::ProposeTrade => write!(f, "Propose a trade?"),
            Question::AcceptTrade(trade) => write!(f, "Accept a trade from {}?", trade.sender()),
            Question::SellBuilding => write!(f, "Sell a building?"),
            Question::Mortgage => write!(f, "Mortgage a property?"),
            Question::Unmortgage => write!(f, "Lift a mortgage?"),
            Question::BuyBuilding => write!(f, "Buy a building?"),
            Question::RaiseFunds { owed } => write!(f, "You owe {owed}. Sell or mortgage something?"),
        }
    }
}

/// One entry in an `ask_choice` option list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    /// A property to act on (mortgage, unmortgage, build, sell a building).
    Property(PropertyId),
    /// Sell one building from this property (debt liquidation).
    SellBuilding(PropertyId),
    /// Mortgage this property (debt liquidation).
    Mortgage(PropertyId),
}

impl Choice {
    #[must_use]
    pub fn property(&self) -> PropertyId {
        match *self {
            Choice::Property(p) | Choice::SellBuilding(p) | Choice::Mortgage(p) => p,
        }
    }
}

// =============================================================================
// Decider
// =============================================================================

/// Answers the engine's questions for one seat.
pub trait Decider {
    /// A yes/no question.
    fn ask_yes_no(&mut self, view: &GameView<'_>, question: &Question<'_>) -> bool;

    /// An integer in `min..=max`, or `None` to decline.
    ///
    /// `max` is advisory (usually the wallet). The engine validates whatever
    /// comes back.
    fn ask_int(&mut self, view: &GameView<'_>, question: &Question<'_>, min: i64, max: i64) -> Option<i64>;

    /// An index into `options`, or `None` to decline.
    fn ask_choice(&mut self, view: &GameView<'_>, question: &Question<'_>, options: &[Choice]) -> Option<usize>;

    /// A trade with one of `candidates`, or `None` to stop proposing.
    fn ask_trade(&mut self, view: &GameView<'_>, question: &Question<'_>, candidates: &[PlayerId]) -> Option<Trade>;

    /// The last answer named an amount the seat cannot pay.
    fn notify_cannot_afford(&mut self, _view: &GameView<'_>, _amount: i64) {}
}
