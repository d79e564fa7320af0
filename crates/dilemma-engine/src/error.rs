//! Error types for boundary parsing and configuration

use crate::payoff::PayoffMatrix;

/// Errors raised when external input falls outside the engine's domain.
///
/// The engine itself never fails: `decide`, `payoff` and `Session::play` are
/// total. Only identifiers and configuration coming from the presentation
/// layer are checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid move {0:?}: expected C, D, cooperate or defect")]
    InvalidMove(String),

    #[error("unknown strategy {0:?}")]
    InvalidStrategy(String),

    #[error("payoffs {matrix} violate T > R > P > S and 2R > T + S")]
    InvalidPayoffs { matrix: PayoffMatrix },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}
