//! Player-to-player trades.
//!
//! A `Trade` is OPEN while either side edits its offer and CONFIRMED
//! (terminal) once `confirm` has moved everything. Every add is checked
//! against the current game state: the offering side must own the item, be
//! able to afford the money, and properties must be free to change hands.
//!
//! `confirm` re-checks every item before touching anything, then applies
//! all transfers in one pass. Either everything moves or nothing does.
//!
//! ```
//! use rust_monopoly::deals::{Trade, TradeSide};
//! use rust_monopoly::core::PlayerId;
//!
//! let trade = Trade::new(PlayerId::new(0), PlayerId::new(1)).unwrap();
//! assert_eq!(trade.player(TradeSide::Receiver), PlayerId::new(1));
//! assert!(trade.offer(TradeSide::Sender).is_empty());
//! ```

use crate::agents::GameView;
use crate::board::Board;
use crate::cards::Deck;
use crate::core::error::{Result, StateError};
use crate::core::{CardRef, PlayerId, PlayerMap, PlayerState, PropertyId};

/// Which side of a trade an offer belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeSide {
    /// The player who proposed the trade.
    Sender,
    /// The player asked to accept it.
    Receiver,
}

impl TradeSide {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            TradeSide::Sender => TradeSide::Receiver,
            TradeSide::Receiver => TradeSide::Sender,
        }
    }

    fn slot(self) -> usize {
        match self {
            TradeSide::Sender => 0,
            TradeSide::Receiver => 1,
        }
    }
}

/// What one side gives up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Offer {
    pub properties: Vec<PropertyId>,
    pub cards: Vec<CardRef>,
    pub money: i64,
}

impl Offer {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.cards.is_empty() && self.money == 0
    }
}

/// A proposed exchange between two players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trade {
    sender: PlayerId,
    receiver: PlayerId,
    offers: [Offer; 2],
    confirmed: bool,
}

impl Trade {
    /// Open an empty trade.
    pub fn new(sender: PlayerId, receiver: PlayerId) -> Result<Self> {
        if sender == receiver {
            return Err(StateError::SelfTrade.into());
        }
        Ok(Self {
            sender,
            receiver,
            offers: [Offer::default(), Offer::default()],
            confirmed: false,
        })
    }

    #[must_use]
    pub fn sender(&self) -> PlayerId {
        self.sender
    }

    #[must_use]
    pub fn receiver(&self) -> PlayerId {
        self.receiver
    }

    /// The player on a given side.
    #[must_use]
    pub fn player(&self, side: TradeSide) -> PlayerId {
        match side {
            TradeSide::Sender => self.sender,
            TradeSide::Receiver => self.receiver,
        }
    }

    /// What `side` gives up.
    #[must_use]
    pub fn offer(&self, side: TradeSide) -> &Offer {
        &self.offers[side.slot()]
    }

    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    // === Editing ===

    pub fn add_property(&mut self, side: TradeSide, property: PropertyId, view: &GameView<'_>) -> Result<()> {
        self.require_open()?;
        self.check_property(side, property, view.board)?;
        let offer = &mut self.offers[side.slot()];
        if !offer.properties.contains(&property) {
            offer.properties.push(property);
        }
        Ok(())
    }

    pub fn remove_property(&mut self, side: TradeSide, property: PropertyId) -> Result<()> {
        self.require_open()?;
        self.offers[side.slot()].properties.retain(|&p| p != property);
        Ok(())
    }

    /// Offer a held jail-release card.
    pub fn add_card(&mut self, side: TradeSide, card: CardRef, view: &GameView<'_>) -> Result<()> {
        self.require_open()?;
        self.check_card(side, card, view.decks)?;
        let offer = &mut self.offers[side.slot()];
        if !offer.cards.contains(&card) {
            offer.cards.push(card);
        }
        Ok(())
    }

    pub fn remove_card(&mut self, side: TradeSide, card: CardRef) -> Result<()> {
        self.require_open()?;
        self.offers[side.slot()].cards.retain(|&c| c != card);
        Ok(())
    }

    /// Raise the money offered by `side`. The total must stay affordable.
    pub fn add_money(&mut self, side: TradeSide, amount: i64, view: &GameView<'_>) -> Result<()> {
        self.require_open()?;
        if amount < 0 {
            return Err(StateError::NegativeOffer.into());
        }
        let player = self.player(side);
        let total = self.offers[side.slot()].money + amount;
        if view.wallet(player) < total {
            return Err(StateError::UnaffordableOffer { player, amount: total }.into());
        }
        self.offers[side.slot()].money = total;
        Ok(())
    }

    /// Lower the money offered by `side`. Cannot go below zero.
    pub fn remove_money(&mut self, side: TradeSide, amount: i64) -> Result<()> {
        self.require_open()?;
        let offer = &mut self.offers[side.slot()];
        if amount < 0 || amount > offer.money {
            return Err(StateError::NegativeOffer.into());
        }
        offer.money -= amount;
        Ok(())
    }

    // === Execution ===

    /// Execute the trade.
    ///
    /// Every item is re-validated against the live state first, so a failure
    /// leaves board, decks and wallets untouched. The caller refreshes rents
    /// afterwards.
    pub fn confirm(
        &mut self,
        board: &mut Board,
        players: &mut PlayerMap<PlayerState>,
        decks: &mut [Deck],
    ) -> Result<()> {
        self.require_open()?;

        for side in [TradeSide::Sender, TradeSide::Receiver] {
            let offer = self.offer(side);
            for &property in &offer.properties {
                self.check_property(side, property, board)?;
            }
            for &card in &offer.cards {
                self.check_card(side, card, decks)?;
            }
            let player = self.player(side);
            let wallet = players.get(player).map_or(0, PlayerState::wallet);
            if offer.money < 0 || wallet < offer.money {
                return Err(StateError::UnaffordableOffer {
                    player,
                    amount: offer.money,
                }
                .into());
            }
        }

        for side in [TradeSide::Sender, TradeSide::Receiver] {
            let from = self.player(side);
            let to = self.player(side.other());
            let offer = self.offer(side);

            for &property in &offer.properties {
                board.property_mut(property)?.set_owner(Some(to))?;
            }
            for &card in &offer.cards {
                deck_mut(decks, card)?.transfer(card, from, to)?;
            }
            if offer.money > 0 {
                players[from].transact(-offer.money)?;
                players[to].transact(offer.money)?;
            }
        }

        self.confirmed = true;
        tracing::info!(sender = %self.sender, receiver = %self.receiver, "trade confirmed");
        Ok(())
    }

    fn require_open(&self) -> Result<()> {
        if self.confirmed {
            return Err(StateError::TradeConfirmed.into());
        }
        Ok(())
    }

    fn check_property(&self, side: TradeSide, property: PropertyId, board: &Board) -> Result<()> {
        let player = self.player(side);
        if board.property(property)?.owner() != Some(player) {
            return Err(StateError::PropertyNotOwned(property).into());
        }
        if !board.is_transferable(property) {
            return Err(StateError::NotSellable(property).into());
        }
        Ok(())
    }

    fn check_card(&self, side: TradeSide, card: CardRef, decks: &[Deck]) -> Result<()> {
        let held = decks
            .get(card.deck.index())
            .ok_or(StateError::UnknownCard(card))?
            .card(card)?;
        if !held.is_jail_release() {
            return Err(StateError::NotJailCard(card).into());
        }
        if held.owner() != Some(self.player(side)) {
            return Err(StateError::CardNotHeld(card).into());
        }
        Ok(())
    }
}

fn deck_mut(decks: &mut [Deck], card: CardRef) -> Result<&mut Deck> {
    decks
        .get_mut(card.deck.index())
        .ok_or_else(|| StateError::UnknownCard(card).into())
}
