//! Seat deciders: the engine's only boundary to whoever plays.
//!
//! ## Key Types
//!
//! - `Decider`: yes/no, integer, choice and trade prompts plus the
//!   cannot-afford notice
//! - `GameView`: read-only snapshot passed to every prompt
//! - `HeuristicDecider`: built-in computer player
//! - `ExternalDecider`: forwards prompts to a UI through `PromptSurface`
//! - `ScriptedDecider`: replays queued answers

pub mod decider;
pub mod external;
pub mod heuristic;
pub mod scripted;
pub mod view;

pub use decider::{Choice, Decider, Question};
pub use external::{ExternalDecider, PromptSurface};
pub use heuristic::HeuristicDecider;
pub use scripted::{Answer, ScriptedDecider, TradeScript, Transcript};
pub use view::GameView;
