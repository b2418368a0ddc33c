//! Per-trial battle state.
//!
//! One [`TrialState`] holds everything a single battle needs: the
//! demon, the four card sets, the rune states, the hero's hit points,
//! the round counter, the damage tally and the PRNG stream. Each
//! worker owns exactly one, rebuilt from a shared master copy at the
//! start of every trial with [`TrialState::reset_from`], which
//! preserves the worker's PRNG stream so consecutive trials differ.
//!
//! States are aligned to a 4 KiB page. Workers hammer their own
//! `dmg_done`, seeds and attribute arrays millions of times per run;
//! page alignment guarantees no two workers ever share a cache line.

use std::sync::Arc;

use smallvec::SmallVec;

use super::attr::Attr;
use super::card::{Card, CardTemplate};
use super::card_set::CardSet;
use super::config::MAX_RUNES;
use super::rng::MwcRng;

/// A rune attached to the deck: fixed identity plus per-trial charge
/// tracking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuneState {
    /// Rune name from the fixed rune table.
    pub name: &'static str,
    /// The attribute this rune places on field cards while active.
    pub attr: Attr,
    /// Total activations available across one trial.
    pub max_charges: i32,
    /// Activations consumed so far.
    pub charges_used: i32,
    /// Whether the rune's attribute is currently out on the field and
    /// must be withdrawn at the next player round.
    pub active_this_round: bool,
}

impl RuneState {
    /// Create a fresh rune with no charges used.
    #[must_use]
    pub const fn new(name: &'static str, attr: Attr, max_charges: i32) -> Self {
        Self {
            name,
            attr,
            max_charges,
            charges_used: 0,
            active_this_round: false,
        }
    }

    /// Whether the rune may still activate.
    #[must_use]
    pub fn has_charges(&self) -> bool {
        self.charges_used < self.max_charges
    }
}

/// Complete state of one battle trial.
///
/// Page-aligned so that worker states never share a cache line.
#[derive(Clone, Debug)]
#[repr(align(4096))]
pub struct TrialState {
    /// Cumulative damage dealt to the demon this trial.
    pub dmg_done: i32,
    /// Hero's current hit points.
    pub hp: i32,
    /// Hero's hit point ceiling.
    pub max_hp: i32,
    /// Current round, starting at 1.
    pub round: i32,
    /// The boss.
    pub demon: Card,
    /// Cards waiting to be drawn; the top of the deck is the tail.
    pub deck: CardSet,
    /// Cards in hand, at most five.
    pub hand: CardSet,
    /// Cards in play; position 0 is the front.
    pub field: CardSet,
    /// Dead cards, oldest first.
    pub grave: CardSet,
    /// Runes attached to the deck.
    pub runes: SmallVec<[RuneState; MAX_RUNES]>,
    /// This trial's random stream.
    pub rng: MwcRng,
}

impl TrialState {
    /// Assemble the master state from resolved components.
    ///
    /// The demon and deck cards are instantiated at their printed
    /// stats; the deck keeps the deck-file order (each trial shuffles
    /// its own copy). The PRNG is seeded to zero here; workers install
    /// their own seeds before the first trial.
    #[must_use]
    pub fn assemble(
        demon: Arc<CardTemplate>,
        deck: &[Arc<CardTemplate>],
        runes: &[RuneState],
        initial_hp: i32,
    ) -> Self {
        let mut deck_set = CardSet::new();
        for template in deck {
            deck_set.push(Card::from_template(template.clone()));
        }

        Self {
            dmg_done: 0,
            hp: initial_hp,
            max_hp: initial_hp,
            round: 1,
            demon: Card::from_template(demon),
            deck: deck_set,
            hand: CardSet::new(),
            field: CardSet::new(),
            grave: CardSet::new(),
            runes: runes.iter().cloned().collect(),
            rng: MwcRng::new(0, 0),
        }
    }

    /// Start a new trial: copy the master state but keep this worker's
    /// PRNG stream where it left off.
    pub fn reset_from(&mut self, master: &TrialState) {
        let rng = self.rng;
        self.clone_from(master);
        self.rng = rng;
    }

    /// Whether the player still has any cards anywhere.
    #[must_use]
    pub fn has_cards_left(&self) -> bool {
        !self.field.is_empty() || !self.deck.is_empty() || !self.hand.is_empty()
    }
}
