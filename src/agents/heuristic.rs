//! Built-in computer player.
//!
//! A cash-reserve heuristic: spend on property, buildings and bail only while
//! the wallet stays above `reserve`; bid up to list price in fixed steps;
//! accept trades that give at least as much value as they take; try at most
//! one trade of its own per turn.

use crate::board::Property;
use crate::core::PlayerId;
use crate::deals::{Offer, Trade, TradeSide};

use super::decider::{Choice, Decider, Question};
use super::view::GameView;

/// Reserve-keeping computer player.
#[derive(Clone, Debug)]
pub struct HeuristicDecider {
    /// Cash the decider will not spend voluntarily.
    pub reserve: i64,
    /// Auction raise increment.
    pub bid_step: i64,
    /// Premium over list price offered for the last piece of a color group,
    /// in percent.
    pub trade_premium: i64,
    last_offer_turn: Option<u32>,
}

impl Default for HeuristicDecider {
    fn default() -> Self {
        Self {
            reserve: 150,
            bid_step: 10,
            trade_premium: 50,
            last_offer_turn: None,
        }
    }
}

impl HeuristicDecider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reserve(mut self, reserve: i64) -> Self {
        self.reserve = reserve;
        self
    }

    fn spare(&self, view: &GameView<'_>) -> i64 {
        view.wallet(view.seat) - self.reserve
    }

    fn property_value(prop: &Property) -> i64 {
        if prop.is_mortgaged() {
            prop.price() - prop.unmortgage_cost()
        } else {
            prop.price()
        }
    }

    fn offer_value(view: &GameView<'_>, offer: &Offer) -> i64 {
        let properties: i64 = offer
            .properties
            .iter()
            .filter_map(|&p| view.property(p))
            .map(Self::property_value)
            .sum();
        properties + offer.cards.len() as i64 * view.jail.bail + offer.money
    }

    fn accepts(view: &GameView<'_>, trade: &Trade) -> bool {
        let given = trade.offer(TradeSide::Receiver);
        let breaks_monopoly = given.properties.iter().any(|&p| {
            view.property(p)
                .is_some_and(|prop| view.board.has_monopoly(view.seat, prop.color_group()))
        });
        !breaks_monopoly
            && Self::offer_value(view, trade.offer(TradeSide::Sender)) >= Self::offer_value(view, given)
    }

    /// Offer bail money for the first jail card someone else holds.
    fn jail_card_offer(&self, view: &GameView<'_>, candidates: &[PlayerId]) -> Option<Trade> {
        let bail = view.jail.bail;
        if view.wallet(view.seat) < bail {
            return None;
        }
        candidates.iter().find_map(|&holder| {
            let card = *view.jail_cards(holder).first()?;
            let mut trade = Trade::new(view.seat, holder).ok()?;
            trade.add_card(TradeSide::Receiver, card, view).ok()?;
            if bail > 0 {
                trade.add_money(TradeSide::Sender, bail, view).ok()?;
            }
            Some(trade)
        })
    }

    /// Offer a premium for the one property missing from a color group.
    fn completion_offer(&self, view: &GameView<'_>, candidates: &[PlayerId]) -> Option<Trade> {
        let mut groups: Vec<&str> = view.board.group_names().collect();
        groups.sort_unstable();
        groups.into_iter().find_map(|group| {
            let members = view.board.group(group);
            let missing: Vec<_> = members
                .iter()
                .filter_map(|&id| view.property(id))
                .filter(|p| p.owner() != Some(view.seat))
                .collect();
            if members.len() < 2 || missing.len() != 1 {
                return None;
            }
            let target = missing[0];
            let holder = target.owner()?;
            if !candidates.contains(&holder) || !view.board.is_transferable(target.id()) {
                return None;
            }
            let price = target.price() * (100 + self.trade_premium) / 100;
            if price > self.spare(view) {
                return None;
            }
            let mut trade = Trade::new(view.seat, holder).ok()?;
            trade.add_property(TradeSide::Receiver, target.id(), view).ok()?;
            trade.add_money(TradeSide::Sender, price, view).ok()?;
            Some(trade)
        })
    }
}

impl Decider for HeuristicDecider {
    fn ask_yes_no(&mut self, view: &GameView<'_>, question: &Question<'_>) -> bool {
        match question {
            Question::BuyProperty(p) => view.property(*p).is_some_and(|prop| prop.price() <= self.spare(view)),
            Question::UseJailCard => true,
            Question::PayBail(bail) => *bail <= self.spare(view),
            Question::AcceptTrade(trade) => Self::accepts(view, trade),
            _ => false,
        }
    }

    fn ask_int(&mut self, view: &GameView<'_>, question: &Question<'_>, min: i64, max: i64) -> Option<i64> {
        let Question::Bid { property, high_bid } = question else {
            return None;
        };
        let price = view.property(*property)?.price();
        let limit = price.min(self.spare(view)).min(max);
        let bid = (high_bid + self.bid_step).max(min);
        (bid <= limit).then_some(bid)
    }

    fn ask_choice(&mut self, view: &GameView<'_>, question: &Question<'_>, options: &[Choice]) -> Option<usize> {
        let spare = self.spare(view);
        let cost = |choice: &Choice| view.property(choice.property()).map(|p| (p.build_price(), p.unmortgage_cost()));
        match question {
            Question::BuyBuilding => options
                .iter()
                .position(|c| cost(c).is_some_and(|(build, _)| build <= spare)),
            Question::Unmortgage => options
                .iter()
                .position(|c| cost(c).is_some_and(|(_, lift)| lift <= spare)),
            Question::RaiseFunds { .. } => options
                .iter()
                .position(|c| matches!(c, Choice::SellBuilding(_)))
                .or_else(|| options.iter().position(|c| matches!(c, Choice::Mortgage(_)))),
            _ => None,
        }
    }

    fn ask_trade(&mut self, view: &GameView<'_>, question: &Question<'_>, candidates: &[PlayerId]) -> Option<Trade> {
        if self.last_offer_turn == Some(view.turn) {
            return None;
        }
        let trade = match question {
            Question::TradeForJailCard => self.jail_card_offer(view, candidates),
            Question::ProposeTrade => self.completion_offer(view, candidates),
            _ => None,
        }?;
        self.last_offer_turn = Some(view.turn);
        tracing::debug!(player = %view.seat, with = %trade.receiver(), "heuristic trade offer");
        Some(trade)
    }
}
