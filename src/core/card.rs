//! Card templates and per-trial card instances.
//!
//! A [`CardTemplate`] is the immutable description parsed from the
//! catalog; it is deduplicated and shared by reference across every
//! trial. A [`Card`] is the mutable in-battle instance: its current
//! section starts as a copy of the template and drifts as buffs,
//! damage and permanent modifications land on it. [`Card::reset`]
//! snaps the current section back to the template, which is exactly
//! what happens when a card leaves play and re-enters the deck, grave
//! or hand.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::attr::{Attr, AttrKind, AttrList, CardClass};

/// Immutable card description shared across trials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    /// Card name, unique within the catalog.
    pub name: String,
    /// Deck cost; feeds the deck cooldown statistic.
    pub cost: i32,
    /// Player rounds the card waits in hand before it can be played.
    pub timing: i32,
    /// Attack printed on the card.
    pub base_atk: i32,
    /// Hit points printed on the card.
    pub base_hp: i32,
    /// Abilities printed on the card, in file order.
    pub base_attrs: AttrList,
}

impl CardTemplate {
    /// Create a template.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i32, timing: i32, base_atk: i32, base_hp: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            timing,
            base_atk,
            base_hp,
            base_attrs: AttrList::new(),
        }
    }

    /// Add a printed ability. Builder-style, used by tests and the
    /// catalog parser.
    #[must_use]
    pub fn with_attr(mut self, kind: AttrKind, level: i32) -> Self {
        self.base_attrs.push(Attr::new(kind, level));
        self
    }
}

/// Template for the tombstone that holds a field slot after a death.
fn dead_template() -> &'static Arc<CardTemplate> {
    static DEAD: OnceLock<Arc<CardTemplate>> = OnceLock::new();
    DEAD.get_or_init(|| {
        Arc::new(CardTemplate {
            name: "Dead Card".to_string(),
            cost: 0,
            timing: 0,
            base_atk: 0,
            base_hp: 0,
            base_attrs: [Attr::marker(AttrKind::Dead)].into_iter().collect(),
        })
    })
}

/// A card instance inside one trial.
///
/// The template reference is the immutable section; everything else is
/// current state. `atk` and `cur_base_atk` are tracked separately
/// because some abilities scale off the modified base attack rather
/// than the current attack (and permanent gains move both).
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    /// Shared immutable description.
    pub template: Arc<CardTemplate>,
    /// Rounds left before the card can be played from hand.
    pub cur_timing: i32,
    /// Current attack.
    pub atk: i32,
    /// Base attack after permanent modifications.
    pub cur_base_atk: i32,
    /// Current hit points.
    pub hp: i32,
    /// Current hit point ceiling.
    pub max_hp: i32,
    /// Attributes currently attached, in order.
    pub attrs: AttrList,
}

impl Card {
    /// Instantiate a template at its printed stats.
    #[must_use]
    pub fn from_template(template: Arc<CardTemplate>) -> Self {
        let mut card = Self {
            template,
            cur_timing: 0,
            atk: 0,
            cur_base_atk: 0,
            hp: 0,
            max_hp: 0,
            attrs: AttrList::new(),
        };
        card.reset();
        card
    }

    /// The tombstone sentinel that replaces a dead card on the field
    /// until the end-of-round sweep, keeping positional indices stable.
    #[must_use]
    pub fn dead() -> Self {
        let mut card = Self::from_template(dead_template().clone());
        card.hp = 0;
        card.max_hp = 0;
        card
    }

    /// Reset the current section back to the template.
    pub fn reset(&mut self) {
        self.cur_timing = self.template.timing;
        self.atk = self.template.base_atk;
        self.cur_base_atk = self.template.base_atk;
        self.hp = self.template.base_hp;
        self.max_hp = self.template.base_hp;
        self.attrs = self.template.base_attrs.clone();
    }

    /// A fresh copy of this card at its printed stats, as produced when
    /// the card is recycled into the grave or deck.
    #[must_use]
    pub fn recycled(&self) -> Self {
        Self::from_template(self.template.clone())
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Whether the card carries the tombstone marker.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.attrs.has(AttrKind::Dead)
    }

    /// Whether the card still has hit points.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Level of the first attribute of `kind`, if present.
    #[must_use]
    pub fn find(&self, kind: AttrKind) -> Option<i32> {
        self.attrs.find(kind)
    }

    /// Whether any attribute of `kind` is attached.
    #[must_use]
    pub fn has(&self, kind: AttrKind) -> bool {
        self.attrs.has(kind)
    }

    /// The card's class, determined by the first class marker found.
    #[must_use]
    pub fn class(&self) -> Option<CardClass> {
        CardClass::ALL
            .into_iter()
            .find(|class| self.attrs.has(class.marker()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soldier() -> Arc<CardTemplate> {
        Arc::new(
            CardTemplate::new("Soldier", 8, 2, 250, 800)
                .with_attr(AttrKind::Forest, 0)
                .with_attr(AttrKind::Dodge, 30),
        )
    }

    #[test]
    fn test_from_template_copies_stats() {
        let card = Card::from_template(soldier());

        assert_eq!(card.name(), "Soldier");
        assert_eq!(card.cur_timing, 2);
        assert_eq!(card.atk, 250);
        assert_eq!(card.cur_base_atk, 250);
        assert_eq!(card.hp, 800);
        assert_eq!(card.max_hp, 800);
        assert_eq!(card.find(AttrKind::Dodge), Some(30));
    }

    #[test]
    fn test_reset_discards_battle_state() {
        let mut card = Card::from_template(soldier());
        card.hp = 120;
        card.atk = 900;
        card.attrs.push(Attr::new(AttrKind::ForestAtkBuff, 50));

        card.reset();
        assert_eq!(card.hp, 800);
        assert_eq!(card.atk, 250);
        assert!(!card.has(AttrKind::ForestAtkBuff));
        assert!(card.has(AttrKind::Dodge));
    }

    #[test]
    fn test_recycled_is_pristine() {
        let mut card = Card::from_template(soldier());
        card.hp = 0;
        card.attrs.push(Attr::marker(AttrKind::Dead));

        let fresh = card.recycled();
        assert_eq!(fresh.hp, 800);
        assert!(!fresh.is_dead());
        assert!(Arc::ptr_eq(&fresh.template, &card.template));
    }

    #[test]
    fn test_dead_sentinel() {
        let tomb = Card::dead();
        assert!(tomb.is_dead());
        assert!(!tomb.is_alive());
        assert_eq!(tomb.atk, 0);
        assert_eq!(tomb.attrs.len(), 1);
    }

    #[test]
    fn test_class_uses_first_marker() {
        let card = Card::from_template(soldier());
        assert_eq!(card.class(), Some(CardClass::Forest));

        let neutral = Card::from_template(Arc::new(CardTemplate::new("Golem", 5, 1, 100, 100)));
        assert_eq!(neutral.class(), None);
    }
}
