//! Payoff matrix and round resolution

use core::fmt;
use serde::{Deserialize, Serialize};
use crate::error::{EngineError, Result};
use crate::strategy::Move;

/// Symmetric Prisoner's Dilemma payoffs.
///
/// Named after the classic labels: Reward for mutual cooperation, Sucker's
/// payoff for cooperating into a defection, Temptation to defect, and
/// Punishment for mutual defection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    pub reward: u8,
    pub sucker: u8,
    pub temptation: u8,
    pub punishment: u8,
}

impl PayoffMatrix {
    /// The standard 3/0/5/1 table
    pub const fn standard() -> Self {
        Self { reward: 3, sucker: 0, temptation: 5, punishment: 1 }
    }

    /// Build a matrix, rejecting values that are not a Prisoner's Dilemma
    pub fn new(reward: u8, sucker: u8, temptation: u8, punishment: u8) -> Result<Self> {
        let matrix = Self { reward, sucker, temptation, punishment };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Check T > R > P > S and 2R > T + S.
    ///
    /// The second condition keeps alternating exploitation worse than
    /// steady cooperation over repeated rounds.
    pub fn validate(&self) -> Result<()> {
        let ordered = self.temptation > self.reward
            && self.reward > self.punishment
            && self.punishment > self.sucker;
        let iterated = 2 * self.reward as u16 > self.temptation as u16 + self.sucker as u16;

        if ordered && iterated {
            Ok(())
        } else {
            Err(EngineError::InvalidPayoffs { matrix: *self })
        }
    }

    /// Returns (user_points, bot_points)
    pub fn resolve(&self, user: Move, bot: Move) -> (u8, u8) {
        match (user, bot) {
            (Move::Cooperate, Move::Cooperate) => (self.reward, self.reward),
            (Move::Cooperate, Move::Defect) => (self.sucker, self.temptation),
            (Move::Defect, Move::Cooperate) => (self.temptation, self.sucker),
            (Move::Defect, Move::Defect) => (self.punishment, self.punishment),
        }
    }
}

impl Default for PayoffMatrix {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for PayoffMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R={} S={} T={} P={}",
            self.reward, self.sucker, self.temptation, self.punishment
        )
    }
}
