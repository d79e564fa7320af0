//! Session state and round execution

use core::fmt;
use serde::{Deserialize, Serialize};
use crate::config::GameConfig;
use crate::error::Result;
use crate::payoff::PayoffMatrix;
use crate::random::SeededRng;
use crate::strategy::{decide, Move, Strategy};

/// One played round. Appended to the history once and never changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub user_move: Move,
    pub bot_move: Move,
}

/// Everything the presentation layer needs to render a resolved round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// 0-indexed
    pub round: u32,
    pub user_move: Move,
    pub bot_move: Move,
    pub user_points: u8,
    pub bot_points: u8,
    pub user_total: u32,
    pub bot_total: u32,
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You {} (+{}) vs Opponent {} (+{})",
            self.user_move.verb(),
            self.user_points,
            self.bot_move.verb(),
            self.bot_points
        )
    }
}

/// Cumulative scores
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub user: u32,
    pub bot: u32,
}

impl Score {
    fn add(&mut self, user_points: u8, bot_points: u8) {
        self.user = self.user.saturating_add(user_points as u32);
        self.bot = self.bot.saturating_add(bot_points as u32);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leader {
    User,
    Bot,
    Tie,
}

/// End-of-game statistics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub strategy: Strategy,
    pub rounds_played: u32,
    pub score: Score,
    /// Fraction of rounds the user cooperated, 0.0 when nothing was played
    pub user_cooperation_rate: f64,
    pub bot_cooperation_rate: f64,
    pub leader: Leader,
}

/// A single player's game against one scripted opponent.
///
/// Owns its history and score exclusively. Mutating calls take `&mut self`,
/// so plays on one session are always sequenced.
#[derive(Clone, Debug)]
pub struct Session {
    strategy: Strategy,
    payoffs: PayoffMatrix,
    rng: SeededRng,
    history: Vec<Round>,
    score: Score,
}

impl Session {
    /// Create a session with the standard payoff matrix
    pub fn new(strategy: Strategy, seed: u64) -> Self {
        Self::build(strategy, seed, PayoffMatrix::standard())
    }

    /// Create a session with a custom matrix, rejecting one that is not a
    /// Prisoner's Dilemma
    pub fn with_payoffs(strategy: Strategy, seed: u64, payoffs: PayoffMatrix) -> Result<Self> {
        payoffs.validate()?;
        Ok(Self::build(strategy, seed, payoffs))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::with_payoffs(config.strategy, config.seed, config.payoffs)
    }

    fn build(strategy: Strategy, seed: u64, payoffs: PayoffMatrix) -> Self {
        log::info!("new session: strategy={} seed={} payoffs={}", strategy, seed, payoffs);
        Self {
            strategy,
            payoffs,
            rng: SeededRng::new(seed),
            history: Vec::new(),
            score: Score::default(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switch opponents mid-game. History and score carry over.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        log::debug!("strategy changed: {} -> {}", self.strategy, strategy);
        self.strategy = strategy;
    }

    pub fn payoffs(&self) -> &PayoffMatrix {
        &self.payoffs
    }

    pub fn history(&self) -> &[Round] {
        &self.history
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Play one round against the opponent
    ///
    /// The opponent decides from the history before this round, so it never
    /// sees the user's current move.
    pub fn play(&mut self, user_move: Move) -> RoundOutcome {
        let round = u32::try_from(self.history.len()).unwrap_or(u32::MAX);

        // Per-round RNG so a replay from the same seed draws the same coins
        let mut rng = self.rng.for_round(round);
        let bot_move = decide(self.strategy, &self.history, &mut rng);

        let (user_points, bot_points) = self.payoffs.resolve(user_move, bot_move);
        self.score.add(user_points, bot_points);
        self.history.push(Round { user_move, bot_move });

        let outcome = RoundOutcome {
            round,
            user_move,
            bot_move,
            user_points,
            bot_points,
            user_total: self.score.user,
            bot_total: self.score.bot,
        };
        log::debug!("round {} [{}]: {}", round, self.strategy, outcome);
        outcome
    }

    /// Play a sequence of user moves in order
    pub fn play_all(&mut self, user_moves: &[Move]) -> Vec<RoundOutcome> {
        user_moves.iter().map(|&m| self.play(m)).collect()
    }

    /// Clear score and history. Strategy, payoffs and seed are kept.
    pub fn reset(&mut self) {
        log::info!("session reset after {} rounds", self.history.len());
        self.history.clear();
        self.score = Score::default();
    }

    pub fn summary(&self) -> MatchSummary {
        let rounds_played = u32::try_from(self.history.len()).unwrap_or(u32::MAX);
        let rate = |count: usize| {
            if rounds_played == 0 {
                0.0
            } else {
                count as f64 / rounds_played as f64
            }
        };
        let user_coops = self.history.iter().filter(|r| r.user_move == Move::Cooperate).count();
        let bot_coops = self.history.iter().filter(|r| r.bot_move == Move::Cooperate).count();

        let leader = match self.score.user.cmp(&self.score.bot) {
            core::cmp::Ordering::Greater => Leader::User,
            core::cmp::Ordering::Less => Leader::Bot,
            core::cmp::Ordering::Equal => Leader::Tie,
        };

        MatchSummary {
            strategy: self.strategy,
            rounds_played,
            score: self.score,
            user_cooperation_rate: rate(user_coops),
            bot_cooperation_rate: rate(bot_coops),
            leader,
        }
    }
}
