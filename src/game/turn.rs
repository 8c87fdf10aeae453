//! Rolling, jail, movement and turn advance.

use super::Game;
use crate::agents::Question;
use crate::core::error::{Result, StateError};
use crate::core::{DiceRoll, GameEvent, PlayerId};

/// What one roll of the dice led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub player: PlayerId,
    pub roll: DiceRoll,
    /// The same player rolls again (doubles outside jail).
    pub again: bool,
}

impl Game {
    /// Play the current player's full turn, repeating on doubles.
    pub fn play_turn(&mut self) -> Result<()> {
        while self.play_roll()?.again {}
        Ok(())
    }

    /// Play a single roll for the current player: jail or move, resolve,
    /// offers, trading, then advance unless the player rolls again.
    pub fn play_roll(&mut self) -> Result<TurnOutcome> {
        if self.is_over() {
            return Err(StateError::GameOver.into());
        }
        let seat = self.current;
        self.board.refresh_rents()?;

        let roll = self.roll();
        tracing::debug!(player = %seat, roll = %roll, "rolled");
        self.record(seat, GameEvent::Rolled { faces: roll.faces().into() });

        let started_in_jail = self.players[seat].in_jail();
        let moving = if started_in_jail {
            if self.players[seat].position != self.board.jail_index() {
                return Err(StateError::JailedOffJail(seat).into());
            }
            self.jail_turn(seat, &roll)?
        } else {
            true
        };

        if moving && self.is_active(seat) {
            self.move_by(seat, roll.total() as i64)?;
            self.resolve(seat)?;
        }
        if self.is_active(seat) {
            self.financial_offers(seat)?;
        }
        if self.is_active(seat) {
            self.trading_window(seat)?;
        }
        self.board.refresh_rents()?;

        let again = !started_in_jail
            && roll.is_doubles()
            && self.is_active(seat)
            && !self.players[seat].in_jail()
            && !self.is_over();
        if !again {
            self.advance();
        }
        self.turn += 1;
        Ok(TurnOutcome { player: seat, roll, again })
    }

    /// Next scripted roll, or a fresh one.
    pub(super) fn roll(&mut self) -> DiceRoll {
        match self.dice_script.pop_front() {
            Some(roll) => roll,
            None => self.rng.roll(&self.dice),
        }
    }

    /// Hand the turn to the next solvent player.
    fn advance(&mut self) {
        let count = self.players.player_count();
        let mut next = self.current;
        for _ in 0..count {
            next = next.next(count);
            if self.is_active(next) {
                break;
            }
        }
        self.current = next;
    }

    // === Jail ===

    /// One turn in jail. Returns whether the player leaves and moves by the
    /// roll.
    fn jail_turn(&mut self, seat: PlayerId, roll: &DiceRoll) -> Result<bool> {
        if roll.is_doubles() {
            self.release(seat)?;
            self.record(seat, GameEvent::ReleasedByDoubles);
            return Ok(true);
        }

        if self.jail_cards(seat).is_empty() && self.others_hold_jail_cards(seat) {
            self.trade_for_jail_card(seat)?;
            if let Some(&card) = self.jail_cards(seat).first() {
                self.spend_jail_card(seat, card)?;
                return Ok(true);
            }
        } else if let Some(&card) = self.jail_cards(seat).first() {
            let (view, deciders) = self.seat(seat);
            if deciders[seat].ask_yes_no(&view, &Question::UseJailCard) {
                self.spend_jail_card(seat, card)?;
                return Ok(true);
            }
        }

        let bail = self.jail.bail;
        let (view, deciders) = self.seat(seat);
        if deciders[seat].ask_yes_no(&view, &Question::PayBail(bail)) {
            if self.players[seat].can_afford(bail) {
                self.players[seat].transact(-bail)?;
                self.record(seat, GameEvent::BailPaid { amount: bail });
                self.release(seat)?;
                return Ok(true);
            }
            self.notify_cannot_afford(seat, bail);
        }

        if self.players[seat].jail_turns == 1 {
            tracing::debug!(player = %seat, bail, "last jail turn, bail forced");
            self.settle_debt(seat, None, bail)?;
            if !self.is_active(seat) {
                return Ok(false);
            }
            self.record(seat, GameEvent::BailPaid { amount: bail });
            self.release(seat)?;
            return Ok(true);
        }

        let player = &mut self.players[seat];
        player.jail_turns -= 1;
        let remaining = player.jail_turns;
        self.record(seat, GameEvent::ServedJailTurn { remaining });
        Ok(false)
    }

    fn others_hold_jail_cards(&self, seat: PlayerId) -> bool {
        self.active_players()
            .into_iter()
            .any(|p| p != seat && !self.jail_cards(p).is_empty())
    }

    fn spend_jail_card(&mut self, seat: PlayerId, card: crate::core::CardRef) -> Result<()> {
        self.decks
            .get_mut(card.deck.index())
            .ok_or(StateError::UnknownCard(card))?
            .release(card)?;
        self.record(seat, GameEvent::ReleasedByCard { card });
        self.release(seat)
    }

    fn release(&mut self, seat: PlayerId) -> Result<()> {
        let player = &mut self.players[seat];
        if !player.in_jail() {
            return Err(StateError::NotInJail(seat).into());
        }
        player.jail_turns = 0;
        tracing::info!(player = %seat, "released from jail");
        Ok(())
    }

    pub(super) fn send_to_jail(&mut self, seat: PlayerId) {
        let jail = self.board.jail_index();
        let player = &mut self.players[seat];
        let from = player.position;
        player.position = jail;
        player.jail_turns = self.jail.sentence;
        tracing::info!(player = %seat, "sent to jail");
        self.record(seat, GameEvent::Moved { from, to: jail });
        self.record(seat, GameEvent::Jailed);
    }

    // === Movement ===

    /// Move by a signed delta. Each forward wrap pays salary once; backward
    /// wraps pay nothing.
    pub(super) fn move_by(&mut self, seat: PlayerId, delta: i64) -> Result<()> {
        let size = self.board.len() as i64;
        let from = self.players[seat].position;
        let raw = from as i64 + delta;
        let to = raw.rem_euclid(size) as usize;
        let wraps = if delta > 0 { raw / size } else { 0 };

        self.players[seat].position = to;
        tracing::debug!(player = %seat, from, to, "moved");
        self.record(seat, GameEvent::Moved { from, to });
        for _ in 0..wraps {
            self.pay_salary(seat)?;
        }
        Ok(())
    }

    /// Teleport to `target`, paying salary when the move wraps (the target is
    /// behind the current position).
    pub(super) fn move_to(&mut self, seat: PlayerId, target: usize) -> Result<()> {
        let from = self.players[seat].position;
        self.players[seat].position = target;
        tracing::debug!(player = %seat, from, to = target, "teleported");
        self.record(seat, GameEvent::Moved { from, to: target });
        if target < from {
            self.pay_salary(seat)?;
        }
        Ok(())
    }

    fn pay_salary(&mut self, seat: PlayerId) -> Result<()> {
        let salary = self.players[seat].salary;
        self.players[seat].transact(salary)?;
        self.record(seat, GameEvent::PassedGo { salary });
        Ok(())
    }
}
