//! Cascading space resolution and card effects.
//!
//! Resolving a space can move the player (movement, teleports, cards), so
//! resolution repeats until a step leaves the player where it found them.
//! Going to jail ends resolution for the turn.

use super::Game;
use crate::agents::Question;
use crate::board::SpaceEffect;
use crate::cards::CardEffect;
use crate::core::error::{Result, StateError, ValidationError};
use crate::core::{CardRef, DeckId, GameEvent, PlayerId, PropertyId};
use crate::deals::{Auction, AuctionStatus};

impl Game {
    /// Resolve spaces until the player stops moving.
    pub(super) fn resolve(&mut self, seat: PlayerId) -> Result<()> {
        let limit = self.board.len() * 4 + 16;
        for _ in 0..limit {
            if !self.is_active(seat) || self.players[seat].in_jail() {
                return Ok(());
            }
            let before = self.players[seat].position;
            self.resolve_space(seat)?;
            if self.players[seat].position == before {
                return Ok(());
            }
        }
        Err(StateError::ResolutionLoop(seat).into())
    }

    fn resolve_space(&mut self, seat: PlayerId) -> Result<()> {
        let index = self.players[seat].position;
        let space = self.board.space(index).ok_or(ValidationError::IndexOutOfRange {
            what: "player position",
            index,
            len: self.board.len(),
        })?;
        tracing::debug!(player = %seat, space = space.name(), "resolving");

        if let Some(property) = space.property() {
            return self.land_on_property(seat, property);
        }
        match space.effect().clone() {
            SpaceEffect::None => Ok(()),
            SpaceEffect::Money(amount) => self.bank_payment(seat, amount),
            SpaceEffect::Movement(delta) => self.move_by(seat, delta),
            SpaceEffect::GotoSpace(target) => self.move_to(seat, target),
            SpaceEffect::GotoColorGroup(group) => self.goto_group(seat, &group),
            SpaceEffect::BuildingToll { per_house, per_hotel } => self.building_toll(seat, per_house, per_hotel),
            SpaceEffect::DeckDraw(deck) => self.draw_card(seat, deck),
            SpaceEffect::GotoJail => {
                self.send_to_jail(seat);
                Ok(())
            }
        }
    }

    fn goto_group(&mut self, seat: PlayerId, group: &str) -> Result<()> {
        let from = self.players[seat].position;
        let target = self
            .board
            .next_in_group(from, group)
            .ok_or_else(|| ValidationError::UnknownColorGroup(group.to_string()))?;
        self.move_to(seat, target)
    }

    /// Charge the per-building toll over all of the player's holdings.
    fn building_toll(&mut self, seat: PlayerId, per_house: i64, per_hotel: i64) -> Result<()> {
        let (houses, hotels) = self.board.building_totals(seat);
        let toll = houses * per_house + hotels * per_hotel;
        tracing::debug!(player = %seat, houses, hotels, toll, "building toll");
        if toll == 0 {
            return Ok(());
        }
        self.bank_payment(seat, -toll)
    }

    // === Properties ===

    fn land_on_property(&mut self, seat: PlayerId, property: PropertyId) -> Result<()> {
        let prop = self.board.property(property)?;
        let owner = match prop.owner() {
            None => return self.offer_purchase(seat, property),
            Some(owner) if owner == seat => return Ok(()),
            Some(owner) => owner,
        };
        if prop.is_mortgaged() || prop.rent() <= 0 {
            return Ok(());
        }
        let roll_total = if prop.is_dice_multiplier() { self.roll().total() } else { 0 };
        let due = self.board.property(property)?.rent_due(roll_total);

        tracing::debug!(player = %seat, owner = %owner, property = %property, rent = due, "rent due");
        self.settle_debt(seat, Some(owner), due)?;
        if self.is_active(seat) {
            self.record(seat, GameEvent::RentPaid { property, owner, amount: due });
        }
        Ok(())
    }

    /// Offer an unowned property at list price, auctioning it if declined
    /// or unaffordable.
    fn offer_purchase(&mut self, seat: PlayerId, property: PropertyId) -> Result<()> {
        let price = self.board.property(property)?.price();
        let (view, deciders) = self.seat(seat);
        if deciders[seat].ask_yes_no(&view, &Question::BuyProperty(property)) {
            if self.players[seat].can_afford(price) {
                self.players[seat].transact(-price)?;
                self.board.property_mut(property)?.set_owner(Some(seat))?;
                self.board.refresh_rents()?;
                tracing::info!(player = %seat, property = %property, price, "bought");
                self.record(seat, GameEvent::Purchased { property, price });
                return Ok(());
            }
            self.notify_cannot_afford(seat, price);
        }
        self.auction(seat, property)
    }

    /// Auction a property among every solvent player, starting with `seat`.
    pub(super) fn auction(&mut self, seat: PlayerId, property: PropertyId) -> Result<()> {
        let count = self.players.player_count();
        let mut bidders = Vec::with_capacity(count);
        let mut next = seat;
        for _ in 0..count {
            if self.is_active(next) {
                bidders.push(next);
            }
            next = next.next(count);
        }

        let mut auction = Auction::new(property, bidders)?;
        loop {
            let (view, deciders) = self.seat(seat);
            if auction.do_round(&view, deciders)? != AuctionStatus::Open {
                break;
            }
        }
        match auction.confirm(&mut self.board, &mut self.players)? {
            Some(winner) => {
                self.board.refresh_rents()?;
                let bid = auction.high_bid();
                self.record(winner, GameEvent::AuctionWon { property, bid });
            }
            None => self.record(seat, GameEvent::AuctionUnsold { property }),
        }
        Ok(())
    }

    // === Cards ===

    fn draw_card(&mut self, seat: PlayerId, deck_id: DeckId) -> Result<()> {
        let deck = self
            .decks
            .get_mut(deck_id.index())
            .ok_or(ValidationError::UnknownDeck(deck_id))?;
        if deck.is_locked() {
            tracing::debug!(player = %seat, deck = %deck_id, "every card held, nothing drawn");
            return Ok(());
        }
        let card = deck.draw()?;
        let effect = deck.card(card)?.effect().clone();
        tracing::debug!(player = %seat, card = %card, "drew card");
        self.record(seat, GameEvent::CardDrawn { card });
        self.apply_card(seat, card, effect)
    }

    fn apply_card(&mut self, seat: PlayerId, card: CardRef, effect: CardEffect) -> Result<()> {
        match effect {
            CardEffect::Money(amount) => self.bank_payment(seat, amount),
            CardEffect::MoneyPerPlayer(amount) => self.per_player_payment(seat, amount),
            CardEffect::Movement(delta) => self.move_by(seat, delta),
            CardEffect::GotoSpace(target) => self.move_to(seat, target),
            CardEffect::GotoColorGroup(group) => self.goto_group(seat, &group),
            CardEffect::BuildingToll { per_house, per_hotel } => self.building_toll(seat, per_house, per_hotel),
            CardEffect::JailRelease => {
                self.decks
                    .get_mut(card.deck.index())
                    .ok_or(StateError::UnknownCard(card))?
                    .hold(card, seat)?;
                tracing::info!(player = %seat, card = %card, "kept jail card");
                self.record(seat, GameEvent::CardKept { card });
                Ok(())
            }
            CardEffect::GotoJail => {
                self.send_to_jail(seat);
                Ok(())
            }
        }
    }

    /// Apply `amount` to every other solvent player and the negation to the
    /// drawer, one pair at a time, so each transfer nets to zero.
    fn per_player_payment(&mut self, seat: PlayerId, amount: i64) -> Result<()> {
        for other in self.active_players() {
            if other == seat || !self.is_active(seat) {
                continue;
            }
            if amount < 0 {
                self.settle_debt(other, Some(seat), -amount)?;
            } else {
                self.settle_debt(seat, Some(other), amount)?;
            }
        }
        Ok(())
    }
}
