//! Property auctions.
//!
//! An `Auction` runs in rounds. Each round walks the remaining bidders in a
//! fixed order and asks each one (except the current high bidder) to raise.
//! A bidder who declines or does not strictly raise is removed. A bidder who
//! names more than they can pay is told so and stays in, without raising.
//!
//! The auction settles when one bidder remains. `confirm` then charges that
//! bidder and hands over the property. If every bidder declines before
//! anyone bids, the property stays with the bank.
//!
//! ## States
//!
//! OPEN -> (rounds) -> CONFIRMED. Nothing can change after CONFIRMED.

use crate::agents::{Decider, GameView, Question};
use crate::board::Board;
use crate::core::error::{Result, StateError};
use crate::core::{PlayerId, PlayerMap, PlayerState, PropertyId};

/// Where an auction stands after a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionStatus {
    /// More than one bidder remains.
    Open,
    /// One bidder remains holding the high bid.
    Won { winner: PlayerId, bid: i64 },
    /// Everyone declined without a bid.
    Unsold,
}

/// An auction for one property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Auction {
    property: PropertyId,
    bidders: Vec<PlayerId>,
    high_bid: i64,
    high_bidder: Option<PlayerId>,
    confirmed: bool,
}

impl Auction {
    /// Open an auction. Bidders are asked in the order given.
    pub fn new(property: PropertyId, bidders: Vec<PlayerId>) -> Result<Self> {
        if bidders.is_empty() {
            return Err(StateError::NoBidders(property).into());
        }
        Ok(Self {
            property,
            bidders,
            high_bid: 0,
            high_bidder: None,
            confirmed: false,
        })
    }

    #[must_use]
    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Bidders still in the auction, in asking order.
    #[must_use]
    pub fn bidders(&self) -> &[PlayerId] {
        &self.bidders
    }

    #[must_use]
    pub fn high_bid(&self) -> i64 {
        self.high_bid
    }

    #[must_use]
    pub fn high_bidder(&self) -> Option<PlayerId> {
        self.high_bidder
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Current standing, without asking anyone.
    #[must_use]
    pub fn status(&self) -> AuctionStatus {
        match (self.bidders.as_slice(), self.high_bidder) {
            ([], _) => AuctionStatus::Unsold,
            ([only], Some(high)) if *only == high => AuctionStatus::Won {
                winner: high,
                bid: self.high_bid,
            },
            _ => AuctionStatus::Open,
        }
    }

    /// Ask every remaining bidder once.
    pub fn do_round(
        &mut self,
        view: &GameView<'_>,
        deciders: &mut PlayerMap<Box<dyn Decider>>,
    ) -> Result<AuctionStatus> {
        if self.confirmed {
            return Err(StateError::AuctionConfirmed.into());
        }

        let round = self.bidders.clone();
        for bidder in round {
            if self.status() != AuctionStatus::Open {
                break;
            }
            if Some(bidder) == self.high_bidder {
                continue;
            }

            let seat = view.for_seat(bidder);
            let question = Question::Bid {
                property: self.property,
                high_bid: self.high_bid,
            };
            let max = view.wallet(bidder);
            let answer = deciders[bidder].ask_int(&seat, &question, self.high_bid + 1, max);

            match answer {
                Some(bid) if bid > self.high_bid && bid > max => {
                    tracing::debug!(player = %bidder, bid, "unaffordable bid");
                    deciders[bidder].notify_cannot_afford(&seat, bid);
                }
                Some(bid) if bid > self.high_bid => {
                    tracing::debug!(player = %bidder, bid, property = %self.property, "new high bid");
                    self.high_bid = bid;
                    self.high_bidder = Some(bidder);
                }
                _ => {
                    tracing::debug!(player = %bidder, property = %self.property, "left auction");
                    self.bidders.retain(|&b| b != bidder);
                }
            }
        }
        Ok(self.status())
    }

    /// Settle a finished auction: charge the winner and transfer the
    /// property. Returns the new owner, or `None` if nobody bid.
    pub fn confirm(
        &mut self,
        board: &mut Board,
        players: &mut PlayerMap<PlayerState>,
    ) -> Result<Option<PlayerId>> {
        if self.confirmed {
            return Err(StateError::AuctionConfirmed.into());
        }
        match self.status() {
            AuctionStatus::Open => Err(StateError::AuctionOpen(self.property).into()),
            AuctionStatus::Unsold => {
                self.confirmed = true;
                tracing::info!(property = %self.property, "auction closed unsold");
                Ok(None)
            }
            AuctionStatus::Won { winner, bid } => {
                let player = players.get_mut(winner).ok_or(StateError::UnaffordableWinningBid {
                    player: winner,
                    bid,
                })?;
                if !player.can_afford(bid) {
                    return Err(StateError::UnaffordableWinningBid { player: winner, bid }.into());
                }
                board.property_mut(self.property)?.set_owner(Some(winner))?;
                player.transact(-bid)?;
                self.confirmed = true;
                tracing::info!(player = %winner, property = %self.property, bid, "auction won");
                Ok(Some(winner))
            }
        }
    }
}
