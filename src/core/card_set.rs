//! Bounded, ordered card sequences.
//!
//! Each trial owns four sets: deck, hand, field and grave. Order is
//! semantic everywhere it is observable:
//!
//! - the deck is a stack whose top is the *highest* index: the draw
//!   step takes the last card, and reincarnation pushes onto the tail
//!   so a reincarnated card is the next draw;
//! - field position 0 is the front card, first in line for the demon's
//!   physical attack and the only card that swings back;
//! - the grave's front is its oldest card, which is what reincarnation
//!   retrieves.
//!
//! Removal shifts the tail left to preserve relative order. Capacity is
//! fixed; overflowing a set indicates a broken setup and panics.

use smallvec::SmallVec;

use super::attr::AttrKind;
use super::card::Card;
use super::rng::MwcRng;

/// Capacity of one card set.
pub const MAX_CARDS_IN_SET: usize = 20;

/// A bounded ordered sequence of cards.
#[derive(Clone, Debug, Default)]
pub struct CardSet {
    cards: SmallVec<[Card; MAX_CARDS_IN_SET]>,
}

impl CardSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when the set holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Mutable access to the card at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// Append a card at the end.
    ///
    /// Panics when the set is full; the caps on deck, hand and
    /// resurrection routing keep a well-formed battle far below the
    /// set capacity.
    pub fn push(&mut self, card: Card) {
        assert!(self.cards.len() < MAX_CARDS_IN_SET, "too many cards");
        self.cards.push(card);
    }

    /// Insert a card at a uniformly random position.
    ///
    /// This is the exile path back into the deck.
    pub fn insert_random(&mut self, rng: &mut MwcRng, card: Card) {
        assert!(self.cards.len() < MAX_CARDS_IN_SET, "too many cards");
        let slot = rng.below(self.cards.len() as u32 + 1) as usize;
        self.cards.insert(slot, card);
    }

    /// Remove and return the card at `index`, shifting the tail left.
    pub fn remove(&mut self, index: usize) -> Card {
        self.cards.remove(index)
    }

    /// Replace the card at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, card: Card) -> Card {
        std::mem::replace(&mut self.cards[index], card)
    }

    /// Shuffle the set in place.
    pub fn shuffle(&mut self, rng: &mut MwcRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Number of cards bearing an attribute of `kind`.
    ///
    /// Rune gates use this to census classes in a set.
    #[must_use]
    pub fn count_with(&self, kind: AttrKind) -> usize {
        self.cards.iter().filter(|c| c.has(kind)).count()
    }

    /// Iterate over the cards in order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Iterate mutably over the cards in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    /// Remove all cards.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::CardTemplate;
    use std::sync::Arc;

    fn named(name: &str) -> Card {
        Card::from_template(Arc::new(CardTemplate::new(name, 1, 1, 10, 10)))
    }

    fn names(set: &CardSet) -> Vec<&str> {
        set.iter().map(Card::name).collect()
    }

    #[test]
    fn test_push_appends_at_tail() {
        let mut set = CardSet::new();
        set.push(named("A"));
        set.push(named("B"));

        assert_eq!(names(&set), vec!["A", "B"]);
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut set = CardSet::new();
        for name in ["A", "B", "C", "D"] {
            set.push(named(name));
        }

        let removed = set.remove(1);
        assert_eq!(removed.name(), "B");
        assert_eq!(names(&set), vec!["A", "C", "D"]);
    }

    #[test]
    fn test_insert_random_keeps_everything() {
        let mut rng = MwcRng::new(31, 41);
        let mut set = CardSet::new();
        for name in ["A", "B", "C"] {
            set.push(named(name));
        }

        set.insert_random(&mut rng, named("X"));
        assert_eq!(set.len(), 4);
        assert!(names(&set).contains(&"X"));
    }

    #[test]
    fn test_insert_random_into_empty_set() {
        let mut rng = MwcRng::new(1, 2);
        let mut set = CardSet::new();

        set.insert_random(&mut rng, named("X"));
        assert_eq!(names(&set), vec!["X"]);
    }

    #[test]
    fn test_count_with() {
        let mut set = CardSet::new();
        set.push(Card::from_template(Arc::new(
            CardTemplate::new("F1", 1, 1, 10, 10).with_attr(AttrKind::Forest, 0),
        )));
        set.push(Card::from_template(Arc::new(
            CardTemplate::new("F2", 1, 1, 10, 10).with_attr(AttrKind::Forest, 0),
        )));
        set.push(named("N"));

        assert_eq!(set.count_with(AttrKind::Forest), 2);
        assert_eq!(set.count_with(AttrKind::Tundra), 0);
    }

    #[test]
    #[should_panic(expected = "too many cards")]
    fn test_push_panics_at_capacity() {
        let mut set = CardSet::new();
        for i in 0..=MAX_CARDS_IN_SET {
            set.push(named(&format!("C{i}")));
        }
    }

    #[test]
    fn test_shuffle_preserves_cards() {
        let mut rng = MwcRng::new(17, 19);
        let mut set = CardSet::new();
        for i in 0..10 {
            set.push(named(&format!("C{i}")));
        }

        set.shuffle(&mut rng);
        let mut found = names(&set)
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>();
        found.sort();
        let mut expected: Vec<_> = (0..10).map(|i| format!("C{i}")).collect();
        expected.sort();
        assert_eq!(found, expected);
    }
}
