//! Error types for catalog and deck loading.
//!
//! Only startup work can fail: reading and parsing the card catalog,
//! the deck list and the output file. Once a battle starts, adverse
//! conditions (full hand, empty grave, no valid target) are game events
//! handled by the engine, not errors.

use thiserror::Error;

/// Errors raised while loading the catalog, deck, or output file.
#[derive(Debug, Error)]
pub enum SimError {
    /// A malformed line in the card catalog file.
    #[error("bad card description on line {line}: {reason}")]
    BadCardLine { line: usize, reason: String },

    /// An ability key outside the closed vocabulary.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A deck entry that names neither a card nor a rune.
    #[error("unknown card or rune: {0}")]
    UnknownCardOrRune(String),

    /// The demon named on the command line is not in the catalog.
    #[error("couldn't find demon card: {0}")]
    UnknownDemon(String),

    /// More cards in the deck file than the deck can hold.
    #[error("too many cards in deck (limit {0})")]
    TooManyCards(usize),

    /// More runes in the deck file than a deck can carry.
    #[error("too many runes (limit {0})")]
    TooManyRunes(usize),

    /// File could not be read or written.
    #[error("couldn't read file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimError>;
