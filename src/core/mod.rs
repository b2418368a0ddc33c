//! Core data model: PRNG, attributes, cards, card sets, trial state
//! and engine configuration.

pub mod attr;
pub mod card;
pub mod card_set;
pub mod config;
pub mod rng;
pub mod state;

pub use attr::{Attr, AttrKind, AttrList, CardClass, MAX_ATTRS};
pub use card::{Card, CardTemplate};
pub use card_set::{CardSet, MAX_CARDS_IN_SET};
pub use config::{
    EngineConfig, LowHpTieBreak, ATTRITION_ROUND, FIRST_DEMON_ROUND, FIRST_PLAYER_ROUND,
    MAX_CARDS_IN_DECK, MAX_CARDS_IN_HAND, MAX_RUNES,
};
pub use rng::MwcRng;
pub use state::{RuneState, TrialState};
