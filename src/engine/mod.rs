//! The battle engine.
//!
//! A [`Battle`] borrows one trial's state, the run configuration and a
//! narration sink, and plays the whole battle through [`Battle::run`].
//! The engine is a pure function over the borrowed state: it owns no
//! globals and takes no locks, which is what lets the Monte-Carlo
//! driver fan trials out across workers freely.
//!
//! Cards are addressed by field position throughout. A card that dies
//! mid-round is replaced in place by the tombstone sentinel so that
//! neighbor-targeting effects resolving later in the same round still
//! hit the positions they were aimed at; the tombstones are swept at
//! the end of the acting side's round.

mod abilities;
mod buffs;
mod damage;
mod demon;
mod play;
mod player;
mod remove;
mod round;
mod runes;

use crate::core::{EngineConfig, TrialState};
use crate::trace::FightLog;

/// One battle in progress.
pub struct Battle<'a, 'w> {
    /// The trial state being played.
    pub state: &'a mut TrialState,
    /// Immutable run configuration.
    pub cfg: &'a EngineConfig,
    /// Narration sink; silent in parallel runs.
    pub log: &'a mut FightLog<'w>,
}

impl<'a, 'w> Battle<'a, 'w> {
    /// Borrow a state for one battle.
    pub fn new(
        state: &'a mut TrialState,
        cfg: &'a EngineConfig,
        log: &'a mut FightLog<'w>,
    ) -> Self {
        Self { state, cfg, log }
    }
}
