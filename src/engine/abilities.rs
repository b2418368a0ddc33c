//! Ability resolvers shared by the player and demon scripts, plus the
//! random target pickers they rely on.

use smallvec::SmallVec;

use crate::core::{Attr, AttrKind, LowHpTieBreak, MAX_CARDS_IN_SET};

use super::Battle;

impl Battle<'_, '_> {
    /// Knock one round off the hand card with the highest timer.
    pub(crate) fn advanced_strike(&mut self) {
        let mut best: Option<(usize, i32)> = None;
        for (i, card) in self.state.hand.iter().enumerate() {
            if best.is_none_or(|(_, t)| card.cur_timing > t) {
                best = Some((i, card.cur_timing));
            }
        }
        if let Some((i, timing)) = best {
            if timing > 0 {
                let card = self.state.hand.get_mut(i).expect("hand card");
                card.cur_timing -= 1;
                let (name, now) = (card.template.clone(), card.cur_timing);
                self.log.debug(format_args!(
                    "Advanced strike: {} timing lowered to {}.\n",
                    name.name, now
                ));
            }
        }
    }

    /// Move up to `count` of the oldest grave cards onto the deck
    /// tail, where they become the next draws.
    pub(crate) fn reincarnate(&mut self, label: &str, count: i32) {
        for _ in 0..count {
            if self.state.grave.is_empty() {
                break;
            }
            let card = self.state.grave.remove(0);
            let name = card.template.clone();
            self.state.deck.push(card);
            self.log.debug(format_args!("{} {}.\n", label, name.name));
        }
    }

    /// Bring a random eligible grave card straight onto the field.
    ///
    /// The card arrives with a sickness marker so it skips its first
    /// turn, and fires its on-play effects immediately.
    pub(crate) fn reanimate(&mut self, label: &str) {
        let Some(slot) = self.pick_reanimatable() else {
            return;
        };
        let mut card = self.state.grave.remove(slot);
        card.cur_timing = 0;
        card.attrs.push(Attr::marker(AttrKind::ReanimSickness));
        let name = card.template.clone();
        self.state.field.push(card);
        self.log.debug(format_args!("{} {}.\n", label, name.name));
        let idx = self.state.field.len() - 1;
        self.card_played(idx);
    }

    /// Heal one field card, honoring lacerate and immunity.
    pub(crate) fn heal_one(&mut self, idx: usize, healer: &str, heal: i32) {
        let Some(card) = self.state.field.get_mut(idx) else {
            return;
        };
        if card.has(AttrKind::LacerateBuff) || card.has(AttrKind::Immunity) {
            return;
        }
        if card.hp > 0 && card.hp < card.max_hp {
            let amount = heal.min(card.max_hp - card.hp);
            card.hp += amount;
            let name = card.template.clone();
            self.log.debug(format_args!(
                "{} healed {} for {}.\n",
                healer, name.name, amount
            ));
        }
    }

    /// Heal every field card.
    pub(crate) fn regenerate(&mut self, healer: &str, heal: i32) {
        for i in 0..self.state.field.len() {
            self.heal_one(i, healer, heal);
        }
    }

    /// Heal the single most damaged field card.
    pub(crate) fn healing(&mut self, healer: &str, heal: i32) {
        if let Some(idx) = self.find_lowest_hp(true) {
            self.heal_one(idx, healer, heal);
        }
    }

    /// Heal the hero, capped at the hero's ceiling.
    pub(crate) fn prayer(&mut self, heal: i32) {
        if self.state.hp > 0 && self.state.hp < self.state.max_hp {
            let amount = heal.min(self.state.max_hp - self.state.hp);
            self.state.hp += amount;
            self.log.debug(format_args!("Prayer healed {amount}.\n"));
        }
    }

    /// Index of a uniformly random live field card.
    pub(crate) fn pick_alive_in_field(&mut self) -> Option<usize> {
        let alive: SmallVec<[usize; MAX_CARDS_IN_SET]> = self
            .state
            .field
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect();
        if alive.is_empty() {
            return None;
        }
        let r = self.state.rng.below(alive.len() as u32) as usize;
        Some(alive[r])
    }

    /// Index of a uniformly random grave card that can be reanimated.
    ///
    /// Cards that themselves reanimate, or that are immune, never come
    /// back this way.
    pub(crate) fn pick_reanimatable(&mut self) -> Option<usize> {
        let eligible: SmallVec<[usize; MAX_CARDS_IN_SET]> = self
            .state
            .grave
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                !c.has(AttrKind::Reanimate)
                    && !c.has(AttrKind::DesperationReanimate)
                    && !c.has(AttrKind::Immunity)
            })
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            return None;
        }
        let r = self.state.rng.below(eligible.len() as u32) as usize;
        Some(eligible[r])
    }

    /// Pick up to `n` distinct live field cards uniformly at random,
    /// returned in ascending position order.
    pub(crate) fn pick_n_alive(&mut self, n: usize) -> SmallVec<[usize; MAX_CARDS_IN_SET]> {
        let mut alive: SmallVec<[usize; MAX_CARDS_IN_SET]> = self
            .state
            .field
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| i)
            .collect();

        let n = n.min(alive.len());
        if n == alive.len() {
            return alive;
        }
        for i in 0..n {
            let r = self.state.rng.below((alive.len() - 1 - i) as u32) as usize;
            if r != 0 {
                alive.swap(i, i + r);
            }
        }
        alive.truncate(n);
        alive.sort_unstable();
        alive
    }

    /// Find the lowest-hp or most-damaged live field card.
    ///
    /// Most-damaged ties break uniformly at random; lowest-hp ties
    /// follow the configured policy (rightmost by default).
    pub(crate) fn find_lowest_hp(&mut self, most_damaged: bool) -> Option<usize> {
        let mut best: Option<i32> = None;
        let mut tied: SmallVec<[usize; MAX_CARDS_IN_SET]> = SmallVec::new();

        for (i, card) in self.state.field.iter().enumerate() {
            if !card.is_alive() {
                continue;
            }
            let value = if most_damaged {
                card.max_hp - card.hp
            } else {
                card.hp
            };
            let better = match best {
                None => true,
                Some(b) if most_damaged => value > b,
                Some(b) => value < b,
            };
            if better {
                best = Some(value);
                tied.clear();
                tied.push(i);
            } else if best == Some(value) {
                tied.push(i);
            }
        }

        match tied.len() {
            0 => None,
            1 => Some(tied[0]),
            n => {
                let pick_random = most_damaged
                    || self.cfg.low_hp_tie_break == LowHpTieBreak::Random;
                if pick_random {
                    let r = self.state.rng.below(n as u32) as usize;
                    Some(tied[r])
                } else {
                    Some(tied[n - 1])
                }
            }
        }
    }
}
