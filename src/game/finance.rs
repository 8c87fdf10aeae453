//! Money that must change hands, and the prompts around it.
//!
//! ## Debts
//!
//! Every mandatory payment goes through `settle_debt`. A payer who cannot
//! cover a debt is first offered liquidation (sell buildings, mortgage). If
//! that still falls short the payer goes bankrupt:
//!
//! 1. every building is sold back to the bank
//! 2. remaining cash goes to the creditor
//! 3. the wallet is forced down to the shortfall
//! 4. properties pass to the creditor through `bankrupt_transfer` (the
//!    creditor owes interest on mortgaged ones) or return to the bank
//! 5. held jail cards go back to their decks
//!
//! ## Offers
//!
//! After moving, the player is offered four prompt loops in order: sell
//! buildings, mortgage, lift mortgages, build. Then the trading window.

use super::Game;
use crate::agents::{Choice, Question};
use crate::core::error::{Result, StateError};
use crate::core::{GameEvent, PlayerId, PropertyId};

impl Game {
    // === Debts ===

    /// Pay (`amount < 0`) or receive (`amount >= 0`) money from the bank.
    pub(super) fn bank_payment(&mut self, seat: PlayerId, amount: i64) -> Result<()> {
        if amount < 0 {
            return self.settle_debt(seat, None, -amount);
        }
        self.players[seat].transact(amount)?;
        self.record(seat, GameEvent::BankPayment { amount });
        Ok(())
    }

    /// Collect a mandatory payment from `payer`. `None` is the bank.
    pub(super) fn settle_debt(&mut self, payer: PlayerId, creditor: Option<PlayerId>, amount: i64) -> Result<()> {
        if amount <= 0 || !self.is_active(payer) {
            return Ok(());
        }
        let creditor = creditor.filter(|&c| c != payer && self.is_active(c));

        if !self.players[payer].can_afford(amount) {
            self.notify_cannot_afford(payer, amount);
            self.raise_funds(payer, amount)?;
        }
        if !self.players[payer].can_afford(amount) {
            return self.declare_bankrupt(payer, creditor, amount);
        }

        self.players[payer].transact(-amount)?;
        match creditor {
            Some(to) => {
                self.players[to].transact(amount)?;
                self.record(payer, GameEvent::PaidPlayer { to, amount });
            }
            None => self.record(payer, GameEvent::BankPayment { amount: -amount }),
        }
        Ok(())
    }

    /// Ask the payer to liquidate until `owed` is covered, they decline, or
    /// nothing is left to sell.
    fn raise_funds(&mut self, payer: PlayerId, owed: i64) -> Result<()> {
        while !self.players[payer].can_afford(owed) {
            let options = self.liquidation_options(payer);
            let Some(choice) = self.choose(payer, &Question::RaiseFunds { owed }, &options)? else {
                break;
            };
            match choice {
                Choice::SellBuilding(p) => self.sell_building(payer, p)?,
                Choice::Mortgage(p) | Choice::Property(p) => self.mortgage(payer, p)?,
            }
        }
        Ok(())
    }

    fn liquidation_options(&self, payer: PlayerId) -> Vec<Choice> {
        self.board
            .holdings(payer)
            .into_iter()
            .filter_map(|id| {
                let prop = self.board.get(id)?;
                if prop.buildings() > 0 {
                    Some(Choice::SellBuilding(id))
                } else if self.board.is_transferable(id) {
                    Some(Choice::Mortgage(id))
                } else {
                    None
                }
            })
            .collect()
    }

    fn declare_bankrupt(&mut self, payer: PlayerId, creditor: Option<PlayerId>, amount: i64) -> Result<()> {
        let holdings = self.board.holdings(payer);
        for &id in &holdings {
            while self.board.property(id)?.buildings() > 0 {
                let refund = self.board.property_mut(id)?.sell_house()?;
                self.players[payer].transact(refund)?;
            }
        }

        let cash = self.players[payer].wallet();
        if let Some(to) = creditor {
            self.players[to].transact(cash)?;
        }
        self.players[payer].force_debit(amount);

        for &id in &holdings {
            let heir = creditor.filter(|&c| self.is_active(c));
            let interest = self.board.property_mut(id)?.bankrupt_transfer(heir)?;
            if let Some(heir) = heir {
                self.settle_debt(heir, None, interest)?;
            }
        }
        for card in self.jail_cards(payer) {
            self.decks
                .get_mut(card.deck.index())
                .ok_or(StateError::UnknownCard(card))?
                .release(card)?;
        }

        let player = &mut self.players[payer];
        player.bankrupt = true;
        player.jail_turns = 0;
        let shortfall = -player.wallet();
        tracing::warn!(player = %payer, creditor = ?creditor, amount, shortfall, "bankrupt");
        self.record(payer, GameEvent::Bankrupt { creditor });
        self.board.refresh_rents()
    }

    // === Offers ===

    /// The post-move prompt loops.
    pub(super) fn financial_offers(&mut self, seat: PlayerId) -> Result<()> {
        loop {
            let options = self.property_options(seat, |game, id| {
                game.board.get(id).is_some_and(|p| p.buildings() > 0)
            });
            let Some(choice) = self.choose(seat, &Question::SellBuilding, &options)? else {
                break;
            };
            self.sell_building(seat, choice.property())?;
        }

        loop {
            let options = self.property_options(seat, |game, id| game.board.is_transferable(id));
            let Some(choice) = self.choose(seat, &Question::Mortgage, &options)? else {
                break;
            };
            self.mortgage(seat, choice.property())?;
        }

        let mut unaffordable = Vec::new();
        loop {
            let options = self.property_options(seat, |game, id| {
                !unaffordable.contains(&id) && game.board.get(id).is_some_and(|p| p.is_mortgaged())
            });
            let Some(choice) = self.choose(seat, &Question::Unmortgage, &options)? else {
                break;
            };
            let id = choice.property();
            let cost = self.board.property(id)?.unmortgage_cost();
            if !self.players[seat].can_afford(cost) {
                self.notify_cannot_afford(seat, cost);
                unaffordable.push(id);
                continue;
            }
            let delta = self.board.property_mut(id)?.unmortgage()?;
            self.players[seat].transact(delta)?;
            self.board.refresh_rents()?;
            tracing::info!(player = %seat, property = %id, cost, "mortgage lifted");
            self.record(seat, GameEvent::Unmortgaged { property: id });
        }

        let mut unaffordable = Vec::new();
        loop {
            let options = self.property_options(seat, |game, id| {
                !unaffordable.contains(&id) && game.can_build(seat, id)
            });
            let Some(choice) = self.choose(seat, &Question::BuyBuilding, &options)? else {
                break;
            };
            let id = choice.property();
            let cost = self.board.property(id)?.build_price();
            if !self.players[seat].can_afford(cost) {
                self.notify_cannot_afford(seat, cost);
                unaffordable.push(id);
                continue;
            }
            let delta = self.board.property_mut(id)?.buy_house()?;
            self.players[seat].transact(delta)?;
            self.board.refresh_rents()?;
            tracing::info!(player = %seat, property = %id, cost, "built");
            self.record(seat, GameEvent::BuildingBought { property: id });
        }
        Ok(())
    }

    /// Full unmortgaged group, room to build, not group-scaled.
    fn can_build(&self, seat: PlayerId, id: PropertyId) -> bool {
        self.board.get(id).is_some_and(|p| {
            p.owner() == Some(seat)
                && !p.is_scaled()
                && p.buildings() < p.max_buildings()
                && self.board.has_monopoly(seat, p.color_group())
        })
    }

    fn property_options(&self, seat: PlayerId, eligible: impl Fn(&Self, PropertyId) -> bool) -> Vec<Choice> {
        self.board
            .holdings(seat)
            .into_iter()
            .filter(|&id| eligible(self, id))
            .map(Choice::Property)
            .collect()
    }

    /// Ask for one of `options`. An empty list is not asked.
    fn choose(&mut self, seat: PlayerId, question: &Question<'_>, options: &[Choice]) -> Result<Option<Choice>> {
        if options.is_empty() {
            return Ok(None);
        }
        let (view, deciders) = self.seat(seat);
        match deciders[seat].ask_choice(&view, question, options) {
            None => Ok(None),
            Some(index) => options.get(index).copied().map(Some).ok_or_else(|| {
                StateError::ChoiceOutOfRange {
                    index,
                    len: options.len(),
                }
                .into()
            }),
        }
    }

    fn sell_building(&mut self, seat: PlayerId, id: PropertyId) -> Result<()> {
        let refund = self.board.property_mut(id)?.sell_house()?;
        self.players[seat].transact(refund)?;
        self.board.refresh_rents()?;
        tracing::info!(player = %seat, property = %id, refund, "sold building");
        self.record(seat, GameEvent::BuildingSold { property: id });
        Ok(())
    }

    fn mortgage(&mut self, seat: PlayerId, id: PropertyId) -> Result<()> {
        let value = self.board.property_mut(id)?.mortgage()?;
        self.players[seat].transact(value)?;
        self.board.refresh_rents()?;
        tracing::info!(player = %seat, property = %id, value, "mortgaged");
        self.record(seat, GameEvent::Mortgaged { property: id });
        Ok(())
    }

    // === Trading ===

    pub(super) fn trading_window(&mut self, seat: PlayerId) -> Result<()> {
        let candidates: Vec<PlayerId> = self.active_players().into_iter().filter(|&p| p != seat).collect();
        self.propose_trades(seat, Question::ProposeTrade, &candidates, false)
    }

    /// Let a jailed player without a card try to buy one from its holders.
    pub(super) fn trade_for_jail_card(&mut self, seat: PlayerId) -> Result<()> {
        let holders: Vec<PlayerId> = self
            .active_players()
            .into_iter()
            .filter(|&p| p != seat && !self.jail_cards(p).is_empty())
            .collect();
        self.propose_trades(seat, Question::TradeForJailCard, &holders, true)
    }

    /// Ask `seat` for trades until it stops proposing. With
    /// `until_jail_card`, also stop once `seat` holds a jail card.
    fn propose_trades(
        &mut self,
        seat: PlayerId,
        question: Question<'static>,
        candidates: &[PlayerId],
        until_jail_card: bool,
    ) -> Result<()> {
        if candidates.is_empty() {
            return Ok(());
        }
        loop {
            if until_jail_card && !self.jail_cards(seat).is_empty() {
                return Ok(());
            }
            let (view, deciders) = self.seat(seat);
            let Some(mut trade) = deciders[seat].ask_trade(&view, &question, candidates) else {
                return Ok(());
            };
            let receiver = trade.receiver();
            if trade.sender() != seat || !candidates.contains(&receiver) {
                return Err(StateError::ForeignTrade {
                    proposer: seat,
                    sender: trade.sender(),
                    receiver,
                }
                .into());
            }

            let (view, deciders) = self.seat(receiver);
            if deciders[receiver].ask_yes_no(&view, &Question::AcceptTrade(&trade)) {
                trade.confirm(&mut self.board, &mut self.players, &mut self.decks)?;
                self.board.refresh_rents()?;
                self.record(seat, GameEvent::TradeAccepted { with: receiver });
            } else {
                tracing::debug!(player = %seat, with = %receiver, "trade declined");
                self.record(seat, GameEvent::TradeDeclined { with: receiver });
            }
        }
    }
}
