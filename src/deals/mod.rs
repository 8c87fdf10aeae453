//! Auctions and trades: the two ways property changes hands between players.

pub mod auction;
pub mod trade;

pub use auction::{Auction, AuctionStatus};
pub use trade::{Offer, Trade, TradeSide};
