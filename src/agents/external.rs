//! A decider that forwards questions to an external input surface.
//!
//! Console front ends, GUIs and network bridges implement `PromptSurface`,
//! which deals only in rendered text. `ExternalDecider` turns each question
//! and option list into that text using names from the view.

use crate::core::PlayerId;
use crate::deals::Trade;

use super::decider::{Choice, Decider, Question};
use super::view::GameView;

/// Text-level input surface supplied by a UI.
pub trait PromptSurface {
    fn yes_no(&mut self, prompt: &str) -> bool;

    fn int(&mut self, prompt: &str, min: i64, max: i64) -> Option<i64>;

    fn choose(&mut self, prompt: &str, options: &[String]) -> Option<usize>;

    /// Compose a trade. Surfaces build it against the view the same way any
    /// decider does.
    fn trade(&mut self, prompt: &str, view: &GameView<'_>, candidates: &[PlayerId]) -> Option<Trade>;

    /// Show a message that needs no answer.
    fn notice(&mut self, message: &str);
}

/// Forwards every question to a `PromptSurface`.
#[derive(Debug, Default)]
pub struct ExternalDecider<S> {
    surface: S,
}

impl<S: PromptSurface> ExternalDecider<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Render a question with property and player names filled in.
#[must_use]
pub fn render_question(view: &GameView<'_>, question: &Question<'_>) -> String {
    let name = |p| view.property(p).map_or_else(|| p.to_string(), |prop| prop.name().to_string());
    match *question {
        Question::BuyProperty(p) => match view.property(p) {
            Some(prop) => format!("Buy {} for {}?", prop.name(), prop.price()),
            None => question.to_string(),
        },
        Question::Bid { property, high_bid } => {
            format!("Bid on {} (high bid {high_bid})", name(property))
        }
        Question::AcceptTrade(trade) => match view.player(trade.sender()) {
            Some(sender) => format!("Accept a trade from {}?", sender.name),
            None => question.to_string(),
        },
        _ => question.to_string(),
    }
}

/// Render one option line.
#[must_use]
pub fn render_choice(view: &GameView<'_>, choice: &Choice) -> String {
    let Some(prop) = view.property(choice.property()) else {
        return choice.property().to_string();
    };
    match choice {
        Choice::Property(_) => prop.name().to_string(),
        Choice::SellBuilding(_) => format!("Sell a building on {} (+{})", prop.name(), prop.building_refund()),
        Choice::Mortgage(_) => format!("Mortgage {} (+{})", prop.name(), prop.mortgage_value()),
    }
}

impl<S: PromptSurface> Decider for ExternalDecider<S> {
    fn ask_yes_no(&mut self, view: &GameView<'_>, question: &Question<'_>) -> bool {
        self.surface.yes_no(&render_question(view, question))
    }

    fn ask_int(&mut self, view: &GameView<'_>, question: &Question<'_>, min: i64, max: i64) -> Option<i64> {
        self.surface.int(&render_question(view, question), min, max)
    }

    fn ask_choice(&mut self, view: &GameView<'_>, question: &Question<'_>, options: &[Choice]) -> Option<usize> {
        let lines: Vec<String> = options.iter().map(|c| render_choice(view, c)).collect();
        self.surface.choose(&render_question(view, question), &lines)
    }

    fn ask_trade(&mut self, view: &GameView<'_>, question: &Question<'_>, candidates: &[PlayerId]) -> Option<Trade> {
        self.surface.trade(&render_question(view, question), view, candidates)
    }

    fn notify_cannot_afford(&mut self, _view: &GameView<'_>, amount: i64) {
        self.surface.notice(&format!("You cannot afford {amount}."));
    }
}
