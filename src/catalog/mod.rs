//! Card catalog, deck lists and fixed lookup tables.
//!
//! The catalog file is plain text, one card per line:
//!
//! ```text
//! # comment lines and blank lines are ignored
//! Name, cost, timing, baseAtk, baseHp, ABILITY[:level], ABILITY[:level], ...
//! ```
//!
//! Fields are comma-separated; ability keys are case-insensitive and
//! drawn from the closed vocabulary in [`crate::core::AttrKind`]. The
//! four numeric fields must be positive. Templates are deduplicated
//! behind [`Arc`]s and shared by every worker.

pub mod deck;
pub mod level;
pub mod runes;

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{Attr, AttrKind, CardTemplate, MAX_ATTRS};
use crate::error::{Result, SimError};

pub use deck::DeckList;
pub use level::{hp_for_level, MAX_LEVEL};
pub use runes::find_rune;

/// The card catalog: every known card template, indexed by name.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    templates: Vec<Arc<CardTemplate>>,
    index: FxHashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse catalog text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut catalog = Self::new();
        for (number, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let template = parse_card_line(line, number + 1)?;
            catalog.insert(template);
        }
        Ok(catalog)
    }

    /// Add a template to the catalog.
    pub fn insert(&mut self, template: CardTemplate) {
        let key = template.name.to_ascii_lowercase();
        let slot = self.templates.len();
        self.templates.push(Arc::new(template));
        self.index.insert(key, slot);
    }

    /// Look up a template by name, case-insensitively.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<CardTemplate>> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&slot| &self.templates[slot])
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when no templates are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Parse one catalog line into a template.
fn parse_card_line(line: &str, number: usize) -> Result<CardTemplate> {
    let bad = |reason: &str| SimError::BadCardLine {
        line: number,
        reason: reason.to_string(),
    };

    let mut fields = line.split(',').map(str::trim);
    let name = fields.next().filter(|s| !s.is_empty()).ok_or_else(|| bad("missing name"))?;

    let mut numeric = |what: &str| -> Result<i32> {
        let field = fields.next().ok_or_else(|| bad(&format!("missing {what}")))?;
        match field.parse::<i32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(bad(&format!("bad {what}: {field}"))),
        }
    };

    let cost = numeric("cost")?;
    let timing = numeric("timing")?;
    let base_atk = numeric("attack")?;
    let base_hp = numeric("hp")?;

    let mut template = CardTemplate::new(name, cost, timing, base_atk, base_hp);
    for field in fields {
        if field.is_empty() {
            continue;
        }
        if template.base_attrs.len() >= MAX_ATTRS - 1 {
            return Err(bad("too many abilities"));
        }
        let (key, level) = match field.split_once(':') {
            Some((key, level)) => {
                let level = level
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| bad(&format!("bad ability level: {field}")))?;
                (key.trim(), level)
            }
            None => (field, 0),
        };
        let kind = AttrKind::parse(key).ok_or_else(|| SimError::UnknownAbility(key.to_string()))?;
        template.base_attrs.push(Attr::new(kind, level));
    }
    Ok(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# the catalog
DarkTitan, 1, 1, 1000, 500000, CURSE:220, LACERATE

Headless Horseman, 9, 2, 430, 1370, FOREST, FOREST FORCE:120, Dodge:30
";

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);

        let demon = catalog.find("DarkTitan").unwrap();
        assert_eq!(demon.cost, 1);
        assert_eq!(demon.base_atk, 1000);
        assert_eq!(demon.base_hp, 500_000);
        assert_eq!(demon.base_attrs.find(AttrKind::Curse), Some(220));
        assert!(demon.base_attrs.has(AttrKind::Lacerate));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert!(catalog.find("darktitan").is_some());
        assert!(catalog.find("HEADLESS HORSEMAN").is_some());
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn test_ability_levels_and_markers() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let card = catalog.find("Headless Horseman").unwrap();

        assert!(card.base_attrs.has(AttrKind::Forest));
        assert_eq!(card.base_attrs.find(AttrKind::ForestAtk), Some(120));
        assert_eq!(card.base_attrs.find(AttrKind::Dodge), Some(30));
    }

    #[test]
    fn test_bad_numeric_field() {
        let err = Catalog::parse("Broken, 0, 1, 10, 10").unwrap_err();
        assert!(matches!(err, SimError::BadCardLine { line: 1, .. }));

        let err = Catalog::parse("Broken, 1, x, 10, 10").unwrap_err();
        assert!(matches!(err, SimError::BadCardLine { .. }));
    }

    #[test]
    fn test_too_many_abilities_is_fatal() {
        let abilities = vec!["DODGE:1"; 40].join(", ");
        let line = format!("Card, 1, 1, 10, 10, {abilities}");
        let err = Catalog::parse(&line).unwrap_err();
        assert!(matches!(err, SimError::BadCardLine { .. }));
    }

    #[test]
    fn test_unknown_ability_is_fatal() {
        let err = Catalog::parse("Card, 1, 1, 10, 10, FLYING").unwrap_err();
        match err {
            SimError::UnknownAbility(name) => assert_eq!(name, "FLYING"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
