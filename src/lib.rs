//! # demonsim
//!
//! A Monte-Carlo battle simulator for demon boss fights: a fixed boss
//! against a player deck of up to ten cards and four passive runes,
//! replayed tens of thousands of times to estimate damage output and
//! survival statistics.
//!
//! ## Architecture
//!
//! - **Per-trial determinism**: a trial is a pure function of its
//!   state, and the state embeds its own PRNG stream: the same seed
//!   pair replays the same battle event for event.
//!
//! - **Attribute-driven effects**: every ability, buff and marker is a
//!   `(kind, level)` attribute on a card. The engine reacts to
//!   attributes at fixed points (card played, card damaged, card died,
//!   round started), and reaction order follows attribute order.
//!
//! - **Share-nothing parallelism**: workers own page-aligned states
//!   and private accumulators; the final merge is associative, so any
//!   partitioning of the trial load reports identically.
//!
//! ## Modules
//!
//! - `core`: PRNG, attributes, cards, card sets, trial state, config
//! - `catalog`: card/deck file parsing and fixed lookup tables
//! - `engine`: buffs, damage, abilities, rounds (the battle itself)
//! - `sim`: the parallel Monte-Carlo driver
//! - `trace`: optional per-event fight narration
//! - `report`: end-of-run report formatting

pub mod catalog;
pub mod core;
pub mod engine;
pub mod error;
pub mod report;
pub mod sim;
pub mod trace;

// Re-export commonly used types
pub use crate::catalog::{Catalog, DeckList};
pub use crate::core::{
    Attr, AttrKind, AttrList, Card, CardClass, CardSet, CardTemplate, EngineConfig,
    LowHpTieBreak, MwcRng, RuneState, TrialState,
};
pub use crate::engine::Battle;
pub use crate::error::SimError;
pub use crate::sim::{RunResult, SimOptions};
pub use crate::trace::{FightLog, TraceLevel};
