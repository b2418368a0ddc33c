//! Deck file parsing.
//!
//! One name per line, `#` comments and blank lines ignored. Each name
//! resolves against the catalog first and the rune table second; a
//! name matching neither is fatal. A deck holds at most ten cards and
//! four runes.

use std::path::Path;
use std::sync::Arc;

use crate::core::{CardTemplate, RuneState, MAX_CARDS_IN_DECK, MAX_RUNES};
use crate::error::{Result, SimError};

use super::{runes, Catalog};

/// A resolved deck: card templates in file order plus runes.
#[derive(Clone, Debug, Default)]
pub struct DeckList {
    /// Deck cards in file order.
    pub cards: Vec<Arc<CardTemplate>>,
    /// Runes attached to the deck.
    pub runes: Vec<RuneState>,
}

impl DeckList {
    /// Load and resolve a deck file.
    pub fn from_file(catalog: &Catalog, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(catalog, &text)
    }

    /// Resolve deck text against the catalog and rune table.
    pub fn parse(catalog: &Catalog, text: &str) -> Result<Self> {
        let mut deck = Self::default();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(template) = catalog.find(line) {
                if deck.cards.len() >= MAX_CARDS_IN_DECK {
                    return Err(SimError::TooManyCards(MAX_CARDS_IN_DECK));
                }
                deck.cards.push(template.clone());
            } else if let Some(rune) = runes::find_rune(line) {
                if deck.runes.len() >= MAX_RUNES {
                    return Err(SimError::TooManyRunes(MAX_RUNES));
                }
                deck.runes.push(rune);
            } else {
                return Err(SimError::UnknownCardOrRune(line.to_string()));
            }
        }
        Ok(deck)
    }

    /// Total cost of the deck cards; drives the cooldown statistic.
    #[must_use]
    pub fn total_cost(&self) -> i32 {
        self.cards.iter().map(|c| c.cost).sum()
    }
}
