//! The on-play pipeline.
//!
//! When a card arrives on the field, played from hand or reanimated,
//! its entry effects fire in a fixed order: Obstinacy, Backstab, the
//! three quick-strike abilities, Sacrifice, then buff exchange with the
//! residents (incoming before outgoing). The order is observable (a
//! sacrifice, for example, scales off an attack Backstab has already
//! raised) and must not be rearranged.

use smallvec::SmallVec;

use crate::core::{Attr, AttrKind, MAX_ATTRS};

use super::Battle;

impl Battle<'_, '_> {
    /// Fire the entry effects for the card at field position `idx`
    /// (always the last position: new arrivals are appended).
    pub fn card_played(&mut self, idx: usize) {
        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::Obstinacy)) {
            self.log.debug(format_args!("Obstinacy: -{level} hp\n"));
            self.state.hp -= level;
        }

        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::Backstab)) {
            let card = self.state.field.get_mut(idx).expect("played card");
            card.atk += level;
            let (name, now) = (card.template.clone(), card.atk);
            card.attrs.push(Attr::new(AttrKind::BackstabBuff, level));
            self.log.debug(format_args!(
                "{} backstab +{} attack (now {}).\n",
                name.name, level, now
            ));
        }

        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::QuickPrayer)) {
            self.prayer(level);
        }

        if let Some(level) = self
            .state
            .field
            .get(idx)
            .and_then(|c| c.find(AttrKind::QuickRegenerate))
        {
            let healer = self.state.field.get(idx).expect("played card").template.clone();
            self.regenerate(&healer.name, level);
        }

        if let Some(level) = self
            .state
            .field
            .get(idx)
            .and_then(|c| c.find(AttrKind::QuickReincarnate))
        {
            self.reincarnate("QS Reincarnated", level);
        }

        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::Sacrifice)) {
            if self.state.field.len() > 1 {
                self.sacrifice(idx, level);
            }
        }

        self.receive_buffs(idx);
        self.grant_buffs(idx);
    }

    /// Consume a random other field card, converting a share of its
    /// owner's current stats into permanent gains.
    fn sacrifice(&mut self, idx: usize, level: i32) {
        let target = self.state.rng.below(self.state.field.len() as u32 - 1) as usize;
        let own = self.state.field.get(idx).expect("played card").template.clone();
        let victim = self.state.field.get(target).expect("sacrifice target");
        let victim_name = victim.template.clone();

        if victim.has(AttrKind::Immunity) {
            self.log.debug(format_args!(
                "{} attempts to sacrifice {} but fails.\n",
                own.name, victim_name.name
            ));
            return;
        }

        let card = self.state.field.get_mut(idx).expect("played card");
        let atk_gain = (card.atk * level) / 100;
        let hp_gain = (card.hp * level) / 100;
        card.atk += atk_gain;
        card.cur_base_atk += atk_gain;
        card.hp += hp_gain;
        card.max_hp += hp_gain;
        let (now_atk, now_hp) = (card.atk, card.hp);
        self.log.debug(format_args!(
            "{} sacrifices {}.  Atk +{} (now {}).  Hp +{} (now {}).\n",
            own.name, victim_name.name, atk_gain, now_atk, hp_gain, now_hp
        ));

        self.state.field.get_mut(target).expect("sacrifice target").hp = 0;
        self.remove_card(target, true);
    }

    /// Collect buffs the residents owe a newcomer of this class.
    fn receive_buffs(&mut self, idx: usize) {
        let Some(class) = self.state.field.get(idx).and_then(|c| c.class()) else {
            return;
        };
        for i in 0..self.state.field.len() {
            if i == idx {
                continue;
            }
            if let Some(level) = self.state.field.get(i).and_then(|c| c.find(class.hp_ability())) {
                self.add_buff_to_card(i, idx, class.hp_buff(), level);
            }
            if let Some(level) = self.state.field.get(i).and_then(|c| c.find(class.atk_ability()))
            {
                self.add_buff_to_card(i, idx, class.atk_buff(), level);
            }
        }
    }

    /// Apply the newcomer's own force/guard abilities to the matching
    /// residents.
    fn grant_buffs(&mut self, idx: usize) {
        let abilities: SmallVec<[Attr; MAX_ATTRS]> = self
            .state
            .field
            .get(idx)
            .expect("played card")
            .attrs
            .iter()
            .copied()
            .collect();
        for attr in abilities {
            if let Some(class) = attr.kind.class_hp_ability() {
                self.add_buff_to_field(idx, class, class.hp_buff(), attr.level);
            } else if let Some(class) = attr.kind.class_atk_ability() {
                self.add_buff_to_field(idx, class, class.atk_buff(), attr.level);
            }
        }
    }
}
