//! Engine configuration and fixed battle constants.
//!
//! The engine itself carries no process-wide state: everything a trial
//! needs to know about the run (round caps, statistics threshold,
//! behavioral knobs) arrives in one immutable [`EngineConfig`] record.

use serde::{Deserialize, Serialize};

/// First round on which the demon acts.
pub const FIRST_DEMON_ROUND: i32 = 5;

/// First round on which the front card may swing at the demon.
/// On-play effects still fire before this.
pub const FIRST_PLAYER_ROUND: i32 = 6;

/// Round from which the hero starts bleeding unavoidable damage.
pub const ATTRITION_ROUND: i32 = 51;

/// Maximum cards in the deck list.
pub const MAX_CARDS_IN_DECK: usize = 10;

/// Maximum cards held in hand.
pub const MAX_CARDS_IN_HAND: usize = 5;

/// Maximum runes attached to a deck.
pub const MAX_RUNES: usize = 4;

/// Tie-break policy when several cards share the lowest hp.
///
/// The historical behavior takes the rightmost tied card, which the
/// live game may or may not match; the knob exists so both readings
/// can be exercised. Ties on the *most damaged* card are always broken
/// uniformly at random.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LowHpTieBreak {
    /// Pick the rightmost tied card.
    #[default]
    Rightmost,
    /// Pick uniformly among tied cards.
    Random,
}

/// Immutable per-run configuration handed to the engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard cap on rounds per trial; unterminated battles stop here.
    pub max_rounds: i32,
    /// Round whose reach-rate is reported.
    pub round_x: i32,
    /// Replace the 50/50 Concentrate and Frost Bite rolls with their
    /// deterministic average.
    pub avg_concentrate: bool,
    /// Tie-break policy for lowest-hp targeting.
    pub low_hp_tie_break: LowHpTieBreak,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rounds: 500,
            round_x: 50,
            avg_concentrate: false,
            low_hp_tie_break: LowHpTieBreak::default(),
        }
    }
}

impl EngineConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: i32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the reported round threshold.
    #[must_use]
    pub fn with_round_x(mut self, round_x: i32) -> Self {
        self.round_x = round_x;
        self
    }

    /// Enable deterministic averaging of Concentrate and Frost Bite.
    #[must_use]
    pub fn with_avg_concentrate(mut self, avg: bool) -> Self {
        self.avg_concentrate = avg;
        self
    }

    /// Set the lowest-hp tie-break policy.
    #[must_use]
    pub fn with_low_hp_tie_break(mut self, policy: LowHpTieBreak) -> Self {
        self.low_hp_tie_break = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.max_rounds, 500);
        assert_eq!(cfg.round_x, 50);
        assert!(!cfg.avg_concentrate);
        assert_eq!(cfg.low_hp_tie_break, LowHpTieBreak::Rightmost);
    }

    #[test]
    fn test_builder() {
        let cfg = EngineConfig::new()
            .with_max_rounds(80)
            .with_round_x(30)
            .with_avg_concentrate(true)
            .with_low_hp_tie_break(LowHpTieBreak::Random);

        assert_eq!(cfg.max_rounds, 80);
        assert_eq!(cfg.round_x, 30);
        assert!(cfg.avg_concentrate);
        assert_eq!(cfg.low_hp_tie_break, LowHpTieBreak::Random);
    }
}
