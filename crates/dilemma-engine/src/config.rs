//! Session configuration

use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::payoff::PayoffMatrix;
use crate::strategy::Strategy;

/// Settings for a new session. Every field is optional in JSON.
///
/// ```json
/// { "strategy": "grim", "seed": 7, "payoffs": { "reward": 3, "sucker": 0, "temptation": 5, "punishment": 1 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub strategy: Strategy,
    /// Seed for the Random opponent
    pub seed: u64,
    pub payoffs: PayoffMatrix,
}

impl GameConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.payoffs.validate()
    }
}
