//! WASM bindings for the browser game

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;
use crate::{describe_strategy, payoff, GameConfig, Move, Session, Strategy};

fn parse_move(value: &str) -> Result<Move, JsError> {
    value.parse::<Move>().map_err(|e| JsError::new(&e.to_string()))
}

/// Plain JS objects for maps too, since `play` flattens its payload
fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    serde::Serialize::serialize(value, &serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

/// A game session owned by one page.
///
/// Strategy identifiers are read leniently, like the dropdown value the
/// page hands over: anything unrecognized becomes the cooperating
/// `Unknown` opponent. Moves are strict.
#[wasm_bindgen]
pub struct WasmSession {
    inner: Session,
}

#[wasm_bindgen]
impl WasmSession {
    #[wasm_bindgen(constructor)]
    pub fn new(strategy_id: &str, seed: u64) -> WasmSession {
        WasmSession {
            inner: Session::new(Strategy::from_id_lossy(strategy_id), seed),
        }
    }

    /// Build from a JSON `GameConfig`
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> Result<WasmSession, JsError> {
        let inner = GameConfig::from_json(config_json)
            .and_then(|config| Session::from_config(&config))
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmSession { inner })
    }

    /// Play one round. Accepts "C", "D", "cooperate" or "defect".
    ///
    /// Returns the serialized RoundOutcome with an extra `message` field
    /// holding the game-log line.
    pub fn play(&mut self, user_move: &str) -> Result<JsValue, JsError> {
        let outcome = self.inner.play(parse_move(user_move)?);
        to_js(&RenderedOutcome { message: outcome.to_string(), outcome })
    }

    #[wasm_bindgen(js_name = setStrategy)]
    pub fn set_strategy(&mut self, strategy_id: &str) {
        self.inner.set_strategy(Strategy::from_id_lossy(strategy_id));
    }

    pub fn strategy(&self) -> String {
        self.inner.strategy().id().to_string()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn score(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.score())
    }

    pub fn history(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.history())
    }

    pub fn summary(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.summary())
    }
}

#[derive(serde::Serialize)]
struct RenderedOutcome {
    #[serde(flatten)]
    outcome: crate::RoundOutcome,
    message: String,
}

#[derive(serde::Serialize)]
struct StrategyInfo {
    id: &'static str,
    name: &'static str,
    description: &'static str,
}

/// Get all selectable strategies for the opponent dropdown
#[wasm_bindgen]
pub fn get_strategy_types() -> Result<JsValue, JsError> {
    let types: Vec<StrategyInfo> = Strategy::ALL
        .into_iter()
        .map(|s| StrategyInfo {
            id: s.id(),
            name: s.name(),
            description: describe_strategy(s),
        })
        .collect();

    to_js(&types)
}

/// Just the strategy identifiers, in dropdown order
#[wasm_bindgen]
pub fn get_strategy_ids() -> js_sys::Array {
    Strategy::ALL
        .into_iter()
        .map(|s| JsValue::from_str(s.id()))
        .collect()
}

/// Get human-readable description of a strategy
#[wasm_bindgen]
pub fn get_strategy_description(strategy_id: &str) -> String {
    describe_strategy(Strategy::from_id_lossy(strategy_id)).to_string()
}

/// Look up the standard payoff pair for two moves
#[wasm_bindgen]
pub fn resolve_payoff(user_move: &str, bot_move: &str) -> Result<JsValue, JsError> {
    let (user_points, bot_points) = payoff(parse_move(user_move)?, parse_move(bot_move)?);
    to_js(&[user_points, bot_points])
}
