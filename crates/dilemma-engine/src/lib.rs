//! Dilemma Engine
//!
//! Game theory engine for an educational Iterated Prisoner's Dilemma, where
//! a human plays repeated rounds against a scripted opponent.
//! This crate is compiled to:
//! - Native (for tests and embedding)
//! - WASM (for the browser game)

mod config;
mod error;
mod game;
mod payoff;
mod random;
mod strategy;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use game::{Leader, MatchSummary, Round, RoundOutcome, Score, Session};
pub use payoff::PayoffMatrix;
pub use random::SeededRng;
pub use strategy::{decide, describe_strategy, Move, Strategy};

/// Standard payoff matrix for the Prisoner's Dilemma
/// Returns (user_points, bot_points)
pub fn payoff(user: Move, bot: Move) -> (u8, u8) {
    PayoffMatrix::standard().resolve(user, bot)
}
