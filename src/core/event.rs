//! Game events and the history log.
//!
//! Every state change the turn engine makes is recorded as a `GameEvent`
//! wrapped in an `EventRecord` (turn number plus acting player). The history
//! is an `im::Vector`, so snapshots of a game share structure instead of
//! copying the log.
//!
//! ## Example
//!
//! ```
//! use rust_monopoly::core::{EventRecord, GameEvent, PlayerId, PropertyId};
//!
//! let record = EventRecord::new(
//!     3,
//!     PlayerId::new(1),
//!     GameEvent::Purchased { property: PropertyId::new(4), price: 200 },
//! );
//! assert_eq!(record.to_string(), "turn 3, Player 1: bought Property(4) for 200");
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::{CardRef, PropertyId};
use super::player::PlayerId;

/// Something that happened during a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Rolled { faces: SmallVec<[u8; 4]> },
    Moved { from: usize, to: usize },
    PassedGo { salary: i64 },
    /// Cash moved between the player and the bank.
    BankPayment { amount: i64 },
    /// Cash moved from the player to another player.
    PaidPlayer { to: PlayerId, amount: i64 },
    RentPaid { property: PropertyId, owner: PlayerId, amount: i64 },
    Purchased { property: PropertyId, price: i64 },
    AuctionWon { property: PropertyId, bid: i64 },
    AuctionUnsold { property: PropertyId },
    CardDrawn { card: CardRef },
    CardKept { card: CardRef },
    Jailed,
    ReleasedByDoubles,
    ReleasedByCard { card: CardRef },
    BailPaid { amount: i64 },
    ServedJailTurn { remaining: u32 },
    BuildingBought { property: PropertyId },
    BuildingSold { property: PropertyId },
    Mortgaged { property: PropertyId },
    Unmortgaged { property: PropertyId },
    TradeAccepted { with: PlayerId },
    TradeDeclined { with: PlayerId },
    Bankrupt { creditor: Option<PlayerId> },
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::Rolled { faces } => {
                let total: usize = faces.iter().map(|&x| x as usize).sum();
                write!(f, "rolled {total}")
            }
            GameEvent::Moved { from, to } => write!(f, "moved {from} -> {to}"),
            GameEvent::PassedGo { salary } => write!(f, "passed go, collected {salary}"),
            GameEvent::BankPayment { amount } if *amount >= 0 => {
                write!(f, "received {amount} from the bank")
            }
            GameEvent::BankPayment { amount } => write!(f, "paid {} to the bank", -amount),
            GameEvent::PaidPlayer { to, amount } => write!(f, "paid {amount} to {to}"),
            GameEvent::RentPaid { property, owner, amount } => {
                write!(f, "paid {amount} rent on {property} to {owner}")
            }
            GameEvent::Purchased { property, price } => write!(f, "bought {property} for {price}"),
            GameEvent::AuctionWon { property, bid } => write!(f, "won {property} at auction for {bid}"),
            GameEvent::AuctionUnsold { property } => write!(f, "nobody bid on {property}"),
            GameEvent::CardDrawn { card } => write!(f, "drew {card}"),
            GameEvent::CardKept { card } => write!(f, "kept {card}"),
            GameEvent::Jailed => write!(f, "went to jail"),
            GameEvent::ReleasedByDoubles => write!(f, "rolled out of jail"),
            GameEvent::ReleasedByCard { card } => write!(f, "used {card} to leave jail"),
            GameEvent::BailPaid { amount } => write!(f, "paid {amount} bail"),
            GameEvent::ServedJailTurn { remaining } => write!(f, "served a jail turn, {remaining} left"),
            GameEvent::BuildingBought { property } => write!(f, "built on {property}"),
            GameEvent::BuildingSold { property } => write!(f, "sold a building on {property}"),
            GameEvent::Mortgaged { property } => write!(f, "mortgaged {property}"),
            GameEvent::Unmortgaged { property } => write!(f, "lifted the mortgage on {property}"),
            GameEvent::TradeAccepted { with } => write!(f, "traded with {with}"),
            GameEvent::TradeDeclined { with } => write!(f, "{with} declined a trade"),
            GameEvent::Bankrupt { creditor: Some(creditor) } => write!(f, "went bankrupt to {creditor}"),
            GameEvent::Bankrupt { creditor: None } => write!(f, "went bankrupt to the bank"),
        }
    }
}

/// An event with the turn and player it belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number, counted from zero.
    pub turn: u32,

    /// The player the event happened to.
    pub player: PlayerId,

    pub event: GameEvent,
}

impl EventRecord {
    #[must_use]
    pub fn new(turn: u32, player: PlayerId, event: GameEvent) -> Self {
        Self { turn, player, event }
    }
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "turn {}, {}: {}", self.turn, self.player, self.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DeckId;

    #[test]
    fn test_bank_payment_display() {
        assert_eq!(GameEvent::BankPayment { amount: 50 }.to_string(), "received 50 from the bank");
        assert_eq!(GameEvent::BankPayment { amount: -75 }.to_string(), "paid 75 to the bank");
    }

    #[test]
    fn test_record_display() {
        let card = CardRef::new(DeckId::new(1), 2);
        let record = EventRecord::new(0, PlayerId::new(2), GameEvent::ReleasedByCard { card });
        assert_eq!(record.to_string(), "turn 0, Player 2: used Card(1:2) to leave jail");
    }

    #[test]
    fn test_record_serde() {
        let record = EventRecord::new(
            7,
            PlayerId::new(0),
            GameEvent::Rolled { faces: SmallVec::from_slice(&[3, 4]) },
        );
        let json = serde_json::to_string(&record).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
        assert_eq!(back.event.to_string(), "rolled 7");
    }
}
