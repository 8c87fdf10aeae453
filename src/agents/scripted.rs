//! A decider that replays queued answers.
//!
//! Used for deterministic replays and tests. Answers are consumed in order;
//! when the next queued answer does not fit the question kind, or the queue
//! is empty, the decider declines. Every question asked is written to a
//! shared `Transcript` so callers can inspect it after handing the decider to
//! a game.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::core::{CardRef, PlayerId, PropertyId};
use crate::deals::{Trade, TradeSide};

use super::decider::{Choice, Decider, Question};
use super::view::GameView;

/// One queued answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    YesNo(bool),
    Int(Option<i64>),
    Choice(Option<usize>),
    Trade(Option<TradeScript>),
}

/// A trade described by its contents, built against the live view when it
/// is proposed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TradeScript {
    pub receiver: PlayerId,
    pub give_properties: Vec<PropertyId>,
    pub give_cards: Vec<CardRef>,
    pub give_money: i64,
    pub take_properties: Vec<PropertyId>,
    pub take_cards: Vec<CardRef>,
    pub take_money: i64,
}

impl TradeScript {
    #[must_use]
    pub fn with(receiver: PlayerId) -> Self {
        Self {
            receiver,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn give_property(mut self, property: PropertyId) -> Self {
        self.give_properties.push(property);
        self
    }

    #[must_use]
    pub fn give_money(mut self, amount: i64) -> Self {
        self.give_money = amount;
        self
    }

    #[must_use]
    pub fn take_property(mut self, property: PropertyId) -> Self {
        self.take_properties.push(property);
        self
    }

    #[must_use]
    pub fn take_card(mut self, card: CardRef) -> Self {
        self.take_cards.push(card);
        self
    }

    #[must_use]
    pub fn take_money(mut self, amount: i64) -> Self {
        self.take_money = amount;
        self
    }

    /// Build the trade from `view.seat` to the receiver.
    pub fn build(&self, view: &GameView<'_>) -> crate::core::Result<Trade> {
        let mut trade = Trade::new(view.seat, self.receiver)?;
        for &p in &self.give_properties {
            trade.add_property(TradeSide::Sender, p, view)?;
        }
        for &c in &self.give_cards {
            trade.add_card(TradeSide::Sender, c, view)?;
        }
        if self.give_money > 0 {
            trade.add_money(TradeSide::Sender, self.give_money, view)?;
        }
        for &p in &self.take_properties {
            trade.add_property(TradeSide::Receiver, p, view)?;
        }
        for &c in &self.take_cards {
            trade.add_card(TradeSide::Receiver, c, view)?;
        }
        if self.take_money > 0 {
            trade.add_money(TradeSide::Receiver, self.take_money, view)?;
        }
        Ok(trade)
    }
}

/// Shared record of what a `ScriptedDecider` was asked.
#[derive(Clone, Debug, Default)]
pub struct Transcript(Rc<RefCell<TranscriptInner>>);

#[derive(Debug, Default)]
struct TranscriptInner {
    questions: Vec<String>,
    cannot_afford: Vec<i64>,
}

impl Transcript {
    /// Question texts, in the order asked.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.0.borrow().questions.clone()
    }

    /// Amounts named in `notify_cannot_afford` calls.
    #[must_use]
    pub fn cannot_afford(&self) -> Vec<i64> {
        self.0.borrow().cannot_afford.clone()
    }

    /// Was a question with this text asked?
    #[must_use]
    pub fn asked(&self, text: &str) -> bool {
        self.0.borrow().questions.iter().any(|q| q == text)
    }

    fn ask(&self, question: &Question<'_>) {
        self.0.borrow_mut().questions.push(question.to_string());
    }
}

/// Replays a fixed answer queue.
#[derive(Debug, Default)]
pub struct ScriptedDecider {
    answers: VecDeque<Answer>,
    transcript: Transcript,
}

impl ScriptedDecider {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            transcript: Transcript::default(),
        }
    }

    /// A decider that declines everything.
    #[must_use]
    pub fn passive() -> Self {
        Self::default()
    }

    /// Handle to the questions this decider will be asked.
    #[must_use]
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    /// Answers not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next_if(&mut self, fits: impl Fn(&Answer) -> bool) -> Option<Answer> {
        if self.answers.front().is_some_and(fits) {
            self.answers.pop_front()
        } else {
            None
        }
    }
}

impl Decider for ScriptedDecider {
    fn ask_yes_no(&mut self, _view: &GameView<'_>, question: &Question<'_>) -> bool {
        self.transcript.ask(question);
        matches!(
            self.next_if(|a| matches!(a, Answer::YesNo(_))),
            Some(Answer::YesNo(true))
        )
    }

    fn ask_int(&mut self, _view: &GameView<'_>, question: &Question<'_>, _min: i64, _max: i64) -> Option<i64> {
        self.transcript.ask(question);
        match self.next_if(|a| matches!(a, Answer::Int(_))) {
            Some(Answer::Int(value)) => value,
            _ => None,
        }
    }

    fn ask_choice(&mut self, _view: &GameView<'_>, question: &Question<'_>, _options: &[Choice]) -> Option<usize> {
        self.transcript.ask(question);
        match self.next_if(|a| matches!(a, Answer::Choice(_))) {
            Some(Answer::Choice(index)) => index,
            _ => None,
        }
    }

    fn ask_trade(&mut self, view: &GameView<'_>, question: &Question<'_>, _candidates: &[PlayerId]) -> Option<Trade> {
        self.transcript.ask(question);
        let Some(Answer::Trade(Some(script))) = self.next_if(|a| matches!(a, Answer::Trade(_))) else {
            return None;
        };
        match script.build(view) {
            Ok(trade) => Some(trade),
            Err(err) => {
                tracing::warn!(player = %view.seat, %err, "scripted trade no longer valid");
                None
            }
        }
    }

    fn notify_cannot_afford(&mut self, _view: &GameView<'_>, amount: i64) {
        self.transcript.0.borrow_mut().cannot_afford.push(amount);
    }
}
