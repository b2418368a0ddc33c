//! Per-worker accumulators and their associative merge.

use serde::{Deserialize, Serialize};

/// Aggregate statistics over a set of trials.
///
/// Each worker fills one of these; the driver folds them together with
/// [`RunResult::merge`], which is associative over its sum, min, max
/// and count fields, so any partitioning of the trial load yields the
/// same aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Sum of damage dealt to the demon across trials.
    pub total_damage: i64,
    /// Sum of rounds survived across trials.
    pub total_rounds: i64,
    /// Fewest rounds any trial lasted.
    pub low_rounds: i32,
    /// Most rounds any trial lasted.
    pub high_rounds: i32,
    /// Least damage any trial dealt.
    pub low_damage: i32,
    /// Most damage any trial dealt.
    pub high_damage: i32,
    /// Trials that reached the report round.
    pub times_round_x: u64,
}

impl RunResult {
    /// The merge identity: zero sums, saturated extrema.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_damage: 0,
            total_rounds: 0,
            low_rounds: i32::MAX,
            high_rounds: 0,
            low_damage: i32::MAX,
            high_damage: 0,
            times_round_x: 0,
        }
    }

    /// Fold one finished trial in.
    pub fn record_trial(&mut self, dmg_done: i32, rounds: i32, hit_round_x: bool) {
        self.total_damage += i64::from(dmg_done);
        self.total_rounds += i64::from(rounds);
        self.low_rounds = self.low_rounds.min(rounds);
        self.high_rounds = self.high_rounds.max(rounds);
        self.low_damage = self.low_damage.min(dmg_done);
        self.high_damage = self.high_damage.max(dmg_done);
        if hit_round_x {
            self.times_round_x += 1;
        }
    }

    /// Combine two accumulators.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_damage: self.total_damage + other.total_damage,
            total_rounds: self.total_rounds + other.total_rounds,
            low_rounds: self.low_rounds.min(other.low_rounds),
            high_rounds: self.high_rounds.max(other.high_rounds),
            low_damage: self.low_damage.min(other.low_damage),
            high_damage: self.high_damage.max(other.high_damage),
            times_round_x: self.times_round_x + other.times_round_x,
        }
    }

    /// Mean damage per trial.
    #[must_use]
    pub fn avg_damage(&self, iters: usize) -> f64 {
        self.total_damage as f64 / iters as f64
    }

    /// Mean rounds per trial.
    #[must_use]
    pub fn avg_rounds(&self, iters: usize) -> f64 {
        self.total_rounds as f64 / iters as f64
    }
}

impl Default for RunResult {
    fn default() -> Self {
        Self::empty()
    }
}
