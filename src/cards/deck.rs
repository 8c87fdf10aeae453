//! Card decks.
//!
//! A `Deck` keeps its default card set for the whole game. Draws come from a
//! working pool that is refilled from the default set, minus any card a player
//! is holding, whenever it runs dry. Held jail-release cards sit in a separate
//! owned pool until spent.
//!
//! ```
//! use rust_monopoly::cards::{CardEffect, Deck};
//! use rust_monopoly::core::{CardConfig, DeckConfig, DeckId, GameRng, PlayerId};
//!
//! let config = DeckConfig::new("Chance")
//!     .with_card(CardConfig::new("Chance", "Get out of jail free", CardEffect::JailRelease));
//! let mut deck = Deck::from_config(DeckId::new(0), &config, GameRng::new(7)).unwrap();
//!
//! let card = deck.draw().unwrap();
//! deck.hold(card, PlayerId::new(0)).unwrap();
//!
//! // The only card is held, so the deck is locked.
//! assert!(deck.draw().is_err());
//! ```

use super::card::Card;
use crate::core::config::DeckConfig;
use crate::core::error::{Result, StateError, ValidationError};
use crate::core::{CardRef, DeckId, GameRng, PlayerId};

/// A shuffled-on-demand pool of cards.
#[derive(Clone, Debug)]
pub struct Deck {
    id: DeckId,
    name: String,
    /// The default set. Never shrinks.
    cards: Vec<Card>,
    /// Slots still available to draw.
    draw_pool: Vec<u16>,
    /// Slots currently held by players.
    owned: Vec<u16>,
    rng: GameRng,
}

impl Deck {
    /// Build a deck. Cards configured with an owner start in the owned pool.
    pub fn from_config(
        id: DeckId,
        config: &DeckConfig,
        rng: GameRng,
    ) -> std::result::Result<Self, ValidationError> {
        if config.cards.is_empty() {
            return Err(ValidationError::EmptyDeck(config.name.clone()));
        }

        let cards = config
            .cards
            .iter()
            .enumerate()
            .map(|(slot, card)| Card::from_config(CardRef::new(id, slot as u16), card))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let owned: Vec<u16> = cards
            .iter()
            .filter(|c| c.owner().is_some())
            .map(|c| c.id().slot)
            .collect();

        let mut deck = Self {
            id,
            name: config.name.clone(),
            cards,
            draw_pool: Vec::new(),
            owned,
            rng,
        };
        deck.refill();
        Ok(deck)
    }

    #[must_use]
    pub fn id(&self) -> DeckId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of cards in the default set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pool.len()
    }

    /// Look up a card of this deck.
    pub fn card(&self, card: CardRef) -> Result<&Card> {
        if card.deck != self.id {
            return Err(StateError::UnknownCard(card).into());
        }
        self.cards
            .get(card.slot as usize)
            .ok_or_else(|| StateError::UnknownCard(card).into())
    }

    fn card_mut(&mut self, card: CardRef) -> Result<&mut Card> {
        if card.deck != self.id {
            return Err(StateError::UnknownCard(card).into());
        }
        self.cards
            .get_mut(card.slot as usize)
            .ok_or_else(|| StateError::UnknownCard(card).into())
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards of this deck held by `player`.
    pub fn held_by(&self, player: PlayerId) -> impl Iterator<Item = CardRef> + '_ {
        self.owned
            .iter()
            .map(|&slot| &self.cards[slot as usize])
            .filter(move |c| c.owner() == Some(player))
            .map(Card::id)
    }

    /// Every card is held by a player, so nothing can be drawn.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.owned.len() == self.cards.len()
    }

    /// Draw a uniformly random card from the working pool, refilling it first
    /// if empty. Drawing never grants ownership.
    pub fn draw(&mut self) -> Result<CardRef> {
        if self.draw_pool.is_empty() {
            self.refill();
        }
        if self.draw_pool.is_empty() {
            return Err(StateError::DeckLocked(self.id).into());
        }
        let pick = self.rng.index(self.draw_pool.len());
        let slot = self.draw_pool.swap_remove(pick);
        Ok(CardRef::new(self.id, slot))
    }

    /// Give a drawn jail-release card to `player` and move it to the owned pool.
    pub fn hold(&mut self, card: CardRef, player: PlayerId) -> Result<()> {
        self.card_mut(card)?.set_owner(Some(player))?;
        self.draw_pool.retain(|&s| s != card.slot);
        if !self.owned.contains(&card.slot) {
            self.owned.push(card.slot);
        }
        Ok(())
    }

    /// Hand a held card to another player (trades, bankruptcy).
    pub fn transfer(&mut self, card: CardRef, from: PlayerId, to: PlayerId) -> Result<()> {
        let held = self.card_mut(card)?;
        if held.owner() != Some(from) {
            return Err(StateError::CardNotHeld(card).into());
        }
        held.set_owner(Some(to))?;
        Ok(())
    }

    /// Spend or surrender a held card. It leaves the owned pool and becomes
    /// drawable again at the next refill.
    pub fn release(&mut self, card: CardRef) -> Result<()> {
        self.card_mut(card)?.set_owner(None)?;
        self.owned.retain(|&s| s != card.slot);
        Ok(())
    }

    /// Rebuild the working pool from every card nobody holds.
    fn refill(&mut self) {
        self.draw_pool = (0..self.cards.len() as u16)
            .filter(|slot| !self.owned.contains(slot))
            .collect();
        tracing::debug!(deck = %self.id, cards = self.draw_pool.len(), "refilled deck");
    }
}
