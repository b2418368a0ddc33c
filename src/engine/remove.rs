//! Taking a card off the field: death and exile.
//!
//! Removal never shifts the field mid-round. The slot is overwritten
//! with the tombstone sentinel and a *fresh* template-reset copy of the
//! card is routed onward: to the grave (possibly resurrected into the
//! hand), or back into the deck at a random position when exiled. The
//! tombstones are compacted by [`Battle::sweep_dead`] at the end of the
//! acting side's round.

use crate::core::{Attr, AttrKind, Card, MAX_CARDS_IN_HAND};

use super::Battle;

enum Destination {
    Grave,
    Hand,
    Deck,
}

impl Battle<'_, '_> {
    /// Remove the field card at `idx`.
    ///
    /// With `to_grave` the card died: its outgoing class buffs are
    /// withdrawn, its Desperation abilities fire, and resurrection
    /// chances may divert the fresh copy into the hand (or the deck
    /// tail when the hand is full). Without it the card was exiled:
    /// buffs are still withdrawn but nothing triggers, and the fresh
    /// copy re-enters the deck at a uniformly random position.
    pub fn remove_card(&mut self, idx: usize, to_grave: bool) {
        {
            let card = self.state.field.get_mut(idx).expect("removed card");
            card.hp = 0;
            card.attrs.push(Attr::marker(AttrKind::Dead));
        }

        // Withdraw buffs this card granted and fire Desperation
        // abilities. Handlers can mutate other cards and even append
        // to this card's own list, so read by index each step.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(idx).and_then(|c| c.attrs.get(i)) {
            let level = attr.level;
            if let Some(class) = attr.kind.class_hp_ability() {
                self.remove_buff_from_field(idx, class.hp_buff(), level);
            } else if let Some(class) = attr.kind.class_atk_ability() {
                self.remove_buff_from_field(idx, class.atk_buff(), level);
            } else if to_grave {
                match attr.kind {
                    AttrKind::DesperationPrayer => self.prayer(level),
                    AttrKind::DesperationReanimate => self.reanimate("Desperation: Reanimated"),
                    AttrKind::DesperationReincarnate => {
                        self.reincarnate("Desperation: Reincarnated", level);
                    }
                    _ => {}
                }
            }
            i += 1;
        }

        let card = self.state.field.get(idx).expect("removed card");
        let fresh = card.recycled();
        let name = card.template.clone();

        if to_grave {
            self.log.debug(format_args!("{} died.\n", name.name));
            let mut dest = Destination::Grave;
            dest = self.resurrection_roll(idx, AttrKind::Dirt, " (Dirt)", dest);
            dest = self.resurrection_roll(idx, AttrKind::Resurrection, "", dest);
            match dest {
                Destination::Grave => self.state.grave.push(fresh),
                Destination::Hand => self.state.hand.push(fresh),
                Destination::Deck => self.state.deck.push(fresh),
            }
        } else {
            self.log.debug(format_args!("{} exiled.\n", name.name));
            let state = &mut *self.state;
            state.deck.insert_random(&mut state.rng, fresh);
        }

        self.state.field.replace(idx, Card::dead());
    }

    /// Roll one resurrection chance for the dying card at `idx`.
    /// A success routes the fresh copy to the hand, or to the deck
    /// tail when the hand is already full.
    fn resurrection_roll(
        &mut self,
        idx: usize,
        kind: AttrKind,
        tag: &str,
        dest: Destination,
    ) -> Destination {
        let Some(level) = self.state.field.get(idx).and_then(|c| c.find(kind)) else {
            return dest;
        };
        if !self.state.rng.percent(level) {
            return dest;
        }
        let name = self.state.field.get(idx).expect("dying card").template.clone();
        if self.state.hand.len() >= MAX_CARDS_IN_HAND {
            self.log.debug(format_args!(
                "{} resurrected{} to deck because hand is full.\n",
                name.name, tag
            ));
            Destination::Deck
        } else {
            self.log
                .debug(format_args!("{} resurrected{}.\n", name.name, tag));
            Destination::Hand
        }
    }

    /// Compact the field, dropping every tombstone.
    pub fn sweep_dead(&mut self) {
        let mut i = 0;
        while i < self.state.field.len() {
            if self.state.field.get(i).expect("field card").is_dead() {
                self.state.field.remove(i);
            } else {
                i += 1;
            }
        }
    }
}
