//! Moves, opponent strategies and the opponent decision function

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::error::EngineError;
use crate::game::Round;
use crate::random::SeededRng;

/// A move in the Prisoner's Dilemma
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Cooperate,
    Defect,
}

impl Move {
    /// Past-tense verb used in the game log
    pub fn verb(self) -> &'static str {
        match self {
            Move::Cooperate => "Cooperated",
            Move::Defect => "Defected",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Cooperate => f.write_str("C"),
            Move::Defect => f.write_str("D"),
        }
    }
}

/// Accepts the single-letter codes and the full radio values,
/// case-insensitively.
impl FromStr for Move {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "cooperate" => Ok(Move::Cooperate),
            "d" | "defect" => Ok(Move::Defect),
            _ => Err(EngineError::InvalidMove(s.to_string())),
        }
    }
}

/// Opponent strategy
///
/// Deserializes through the strict `FromStr`, so `"unknown"` is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Strategy {
    /// Cooperate first, then copy the user's last move.
    TitForTat,
    /// Always defect, never cooperate.
    AlwaysDefect,
    /// Always cooperate, never defect.
    AlwaysCooperate,
    /// Fair coin flip each round.
    Random,
    /// Cooperate until the user defects once, then always defect.
    Grim,
    /// Unrecognized identifier. Cooperates.
    Unknown,
}

impl Strategy {
    /// Strategies a player can pick
    pub const ALL: [Strategy; 5] = [
        Strategy::TitForTat,
        Strategy::AlwaysDefect,
        Strategy::AlwaysCooperate,
        Strategy::Random,
        Strategy::Grim,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Strategy::TitForTat => "tit_for_tat",
            Strategy::AlwaysDefect => "always_defect",
            Strategy::AlwaysCooperate => "always_cooperate",
            Strategy::Random => "random",
            Strategy::Grim => "grim",
            Strategy::Unknown => "unknown",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::TitForTat => "Tit for Tat",
            Strategy::AlwaysDefect => "Always Defect",
            Strategy::AlwaysCooperate => "Always Cooperate",
            Strategy::Random => "Random",
            Strategy::Grim => "Grim Trigger",
            Strategy::Unknown => "Unknown",
        }
    }

    /// Parse an identifier, mapping anything unrecognized to `Unknown`
    pub fn from_id_lossy(id: &str) -> Self {
        id.parse().unwrap_or(Strategy::Unknown)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::TitForTat
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Strict parse of the selectable identifiers. `"unknown"` is rejected.
impl FromStr for Strategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.id() == s.trim())
            .ok_or_else(|| EngineError::InvalidStrategy(s.to_string()))
    }
}

impl TryFrom<String> for Strategy {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Choose the opponent's move for the next round
///
/// # Arguments
/// * `strategy` - The opponent's strategy
/// * `history` - Every round played so far, oldest first
/// * `rng` - Random number generator for this round; only `Random` draws from it
pub fn decide(strategy: Strategy, history: &[Round], rng: &mut SeededRng) -> Move {
    match strategy {
        Strategy::TitForTat => execute_tit_for_tat(history),
        Strategy::AlwaysDefect => Move::Defect,
        Strategy::AlwaysCooperate => Move::Cooperate,
        Strategy::Random => execute_random(rng),
        Strategy::Grim => execute_grim(history),
        Strategy::Unknown => Move::Cooperate,
    }
}

/// Tit-for-Tat: mirror the user's previous move
fn execute_tit_for_tat(history: &[Round]) -> Move {
    match history.last() {
        None => Move::Cooperate,
        Some(round) => round.user_move,
    }
}

/// Grim: a single user defection is never forgiven
fn execute_grim(history: &[Round]) -> Move {
    if history.iter().any(|round| round.user_move == Move::Defect) {
        Move::Defect
    } else {
        Move::Cooperate
    }
}

fn execute_random(rng: &mut SeededRng) -> Move {
    if rng.next_bool() {
        Move::Cooperate
    } else {
        Move::Defect
    }
}

/// Human-readable description of a strategy, for the strategy picker
pub fn describe_strategy(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::TitForTat => "Cooperates first, then copies your last move.",
        Strategy::AlwaysDefect => "Never cooperates. Always defects.",
        Strategy::AlwaysCooperate => "Never defects. Always cooperates.",
        Strategy::Random => "Flips a coin every round.",
        Strategy::Grim => "Cooperates until you defect once, then defects forever.",
        Strategy::Unknown => "Unrecognized strategy. Always cooperates.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, prop, prop_assert_eq, prop_oneof, proptest, Just};
    use proptest::strategy::Strategy as PropStrategy;

    fn make_rng() -> SeededRng {
        SeededRng::new(42)
    }

    fn history(user_moves: &[Move]) -> Vec<Round> {
        user_moves
            .iter()
            .map(|&user_move| Round { user_move, bot_move: Move::Cooperate })
            .collect()
    }

    fn arb_move() -> impl PropStrategy<Value = Move> {
        prop_oneof![Just(Move::Cooperate), Just(Move::Defect)]
    }

    fn arb_history() -> impl PropStrategy<Value = Vec<Round>> {
        prop::collection::vec(
            (arb_move(), arb_move()).prop_map(|(user_move, bot_move)| Round { user_move, bot_move }),
            0..40,
        )
    }

    #[test]
    fn test_tit_for_tat_first_move() {
        let m = decide(Strategy::TitForTat, &[], &mut make_rng());
        assert_eq!(m, Move::Cooperate);
    }

    #[test]
    fn test_tit_for_tat_copies() {
        let mut rng = make_rng();

        let m = decide(Strategy::TitForTat, &history(&[Move::Cooperate]), &mut rng);
        assert_eq!(m, Move::Cooperate);

        let m = decide(Strategy::TitForTat, &history(&[Move::Cooperate, Move::Defect]), &mut rng);
        assert_eq!(m, Move::Defect);

        let m = decide(Strategy::TitForTat, &history(&[Move::Defect, Move::Cooperate]), &mut rng);
        assert_eq!(m, Move::Cooperate);
    }

    #[test]
    fn test_tit_for_tat_ignores_own_moves() {
        let rounds = [Round { user_move: Move::Cooperate, bot_move: Move::Defect }];
        assert_eq!(decide(Strategy::TitForTat, &rounds, &mut make_rng()), Move::Cooperate);
    }

    #[test]
    fn test_grim_first_move() {
        assert_eq!(decide(Strategy::Grim, &[], &mut make_rng()), Move::Cooperate);
    }

    #[test]
    fn test_grim_trigger() {
        let mut rng = make_rng();

        let m = decide(Strategy::Grim, &history(&[Move::Cooperate, Move::Cooperate]), &mut rng);
        assert_eq!(m, Move::Cooperate);

        // Long-ago defection still counts
        let m = decide(
            Strategy::Grim,
            &history(&[Move::Defect, Move::Cooperate, Move::Cooperate, Move::Cooperate]),
            &mut rng,
        );
        assert_eq!(m, Move::Defect);
    }

    #[test]
    fn test_unknown_cooperates() {
        let rounds = history(&[Move::Defect, Move::Defect]);
        assert_eq!(decide(Strategy::Unknown, &rounds, &mut make_rng()), Move::Cooperate);
    }

    #[test]
    fn test_random_uses_both_moves() {
        let mut rng = make_rng();
        let moves: Vec<_> = (0..64).map(|_| decide(Strategy::Random, &[], &mut rng)).collect();

        assert!(moves.contains(&Move::Cooperate));
        assert!(moves.contains(&Move::Defect));
    }

    #[test]
    fn test_random_reproducible_from_seed() {
        let mut rng1 = SeededRng::new(9);
        let mut rng2 = SeededRng::new(9);

        for _ in 0..32 {
            assert_eq!(
                decide(Strategy::Random, &[], &mut rng1),
                decide(Strategy::Random, &[], &mut rng2)
            );
        }
    }

    #[test]
    fn test_move_parse() {
        assert_eq!("C".parse::<Move>(), Ok(Move::Cooperate));
        assert_eq!("d".parse::<Move>(), Ok(Move::Defect));
        assert_eq!("cooperate".parse::<Move>(), Ok(Move::Cooperate));
        assert_eq!(" Defect ".parse::<Move>(), Ok(Move::Defect));
        assert_eq!("x".parse::<Move>(), Err(EngineError::InvalidMove("x".to_string())));
        assert!("".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Cooperate.to_string(), "C");
        assert_eq!(Move::Defect.to_string(), "D");
        assert_eq!(Move::Cooperate.verb(), "Cooperated");
    }

    #[test]
    fn test_strategy_parse_strict() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.id().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!(
            "pavlov".parse::<Strategy>(),
            Err(EngineError::InvalidStrategy("pavlov".to_string()))
        );
        assert!("unknown".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_parse_lossy() {
        assert_eq!(Strategy::from_id_lossy("grim"), Strategy::Grim);
        assert_eq!(Strategy::from_id_lossy("Grim"), Strategy::Unknown);
        assert_eq!(Strategy::from_id_lossy(""), Strategy::Unknown);
    }

    #[test]
    fn test_strategy_serde_ids_match_display() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy));
        }
    }

    #[test]
    fn test_strategy_deserialize_matches_parse() {
        for strategy in Strategy::ALL {
            let json = format!("\"{}\"", strategy.id());
            assert_eq!(serde_json::from_str::<Strategy>(&json).unwrap(), strategy);
        }
        assert_eq!(serde_json::from_str::<Strategy>("\" grim\"").unwrap(), Strategy::Grim);
        assert!(serde_json::from_str::<Strategy>("\"unknown\"").is_err());
        assert!(serde_json::from_str::<Strategy>("\"pavlov\"").is_err());
    }

    #[test]
    fn test_every_strategy_is_described() {
        for strategy in Strategy::ALL {
            assert!(!describe_strategy(strategy).is_empty());
            assert!(!strategy.name().is_empty());
        }
    }

    proptest! {
        #[test]
        fn prop_constant_strategies(rounds in arb_history(), seed in any::<u64>()) {
            let mut rng = SeededRng::new(seed);
            prop_assert_eq!(decide(Strategy::AlwaysDefect, &rounds, &mut rng), Move::Defect);
            prop_assert_eq!(decide(Strategy::AlwaysCooperate, &rounds, &mut rng), Move::Cooperate);
            prop_assert_eq!(decide(Strategy::Unknown, &rounds, &mut rng), Move::Cooperate);
        }

        #[test]
        fn prop_tit_for_tat_mirrors_last(rounds in arb_history()) {
            let expected = rounds.last().map_or(Move::Cooperate, |r| r.user_move);
            prop_assert_eq!(decide(Strategy::TitForTat, &rounds, &mut make_rng()), expected);
        }

        #[test]
        fn prop_grim_never_forgives(
            before in arb_history(),
            after in arb_history(),
        ) {
            let mut rounds = before;
            rounds.push(Round { user_move: Move::Defect, bot_move: Move::Cooperate });
            rounds.extend(after);
            prop_assert_eq!(decide(Strategy::Grim, &rounds, &mut make_rng()), Move::Defect);
        }

        #[test]
        fn prop_deterministic_strategies_ignore_rng(
            rounds in arb_history(),
            seed_a in any::<u64>(),
            seed_b in any::<u64>(),
        ) {
            for strategy in [
                Strategy::TitForTat,
                Strategy::AlwaysDefect,
                Strategy::AlwaysCooperate,
                Strategy::Grim,
            ] {
                let a = decide(strategy, &rounds, &mut SeededRng::new(seed_a));
                let b = decide(strategy, &rounds, &mut SeededRng::new(seed_b));
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn prop_move_display_parses_back(m in arb_move()) {
            prop_assert_eq!(m.to_string().parse::<Move>().unwrap(), m);
        }
    }
}
