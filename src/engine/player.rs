//! The player round: one scripted turn per field card.

use crate::core::{AttrKind, FIRST_PLAYER_ROUND};

use super::Battle;

impl Battle<'_, '_> {
    /// Run the player's half of the round: runes first, then every
    /// field card in position order, then end-of-round cleanup.
    pub fn player_round(&mut self) {
        self.update_runes();

        let mut i = 0;
        while i < self.state.field.len() {
            self.player_card_turn(i);
            i += 1;
        }

        // Backstab only lasts the round it was played.
        for i in 0..self.state.field.len() {
            if let Some(level) = self.state.field.get(i).and_then(|c| c.find(AttrKind::BackstabBuff))
            {
                let card = self.state.field.get_mut(i).expect("field card");
                card.attrs.remove(AttrKind::BackstabBuff, None);
                card.atk -= level;
            }
        }

        self.sweep_dead();
    }

    /// One card's turn: ability handlers in attribute order, the front
    /// card's attack, then the damage-over-time and self-heal statuses.
    pub fn player_card_turn(&mut self, idx: usize) {
        if self.state.field.get(idx).is_none_or(|c| c.hp <= 0) {
            return;
        }

        let name = self.state.field.get(idx).expect("field card").template.clone();
        self.log.verbose(format_args!("{}'s turn:\n", name.name));

        // A freshly reanimated card sits out the round it returned.
        if self.state.field.get(idx).expect("field card").has(AttrKind::ReanimSickness) {
            self.state
                .field
                .get_mut(idx)
                .expect("field card")
                .attrs
                .remove(AttrKind::ReanimSickness, None);
            return;
        }

        let mut trapped = false;
        if self.state.field.get(idx).expect("field card").has(AttrKind::TrapBuff) {
            self.log
                .debug(format_args!("Trap removed from {}.\n", name.name));
            self.state
                .field
                .get_mut(idx)
                .expect("field card")
                .attrs
                .remove(AttrKind::TrapBuff, None);
            trapped = true;
        }

        if !trapped {
            // Handlers can reshape the card's own list (and the whole
            // field), so read by index every step.
            let mut i = 0;
            while let Some(attr) = self.state.field.get(idx).and_then(|c| c.attrs.get(i)) {
                let level = attr.level;
                match attr.kind {
                    AttrKind::AdvancedStrike => self.advanced_strike(),
                    AttrKind::Reincarnate => self.reincarnate("Reincarnated", level),
                    AttrKind::Reanimate => self.reanimate("Reanimated"),
                    AttrKind::Regenerate => self.regenerate(&name.name, level),
                    AttrKind::Healing => self.healing(&name.name, level),
                    AttrKind::Prayer => self.prayer(level),
                    AttrKind::Snipe | AttrKind::ManaCorrupt | AttrKind::FlyingStone => {
                        if self.state.round >= FIRST_PLAYER_ROUND {
                            let dealt = match attr.kind {
                                AttrKind::Snipe => {
                                    self.log.debug(format_args!("Snipe: {level} dmg\n"));
                                    level
                                }
                                AttrKind::ManaCorrupt => {
                                    let dealt = level * 3;
                                    self.log
                                        .debug(format_args!("Mana Corrupt: {dealt} dmg\n"));
                                    dealt
                                }
                                _ => {
                                    self.log
                                        .debug(format_args!("Flying Stone: {level} dmg\n"));
                                    level
                                }
                            };
                            self.state.dmg_done += dealt;
                            self.state.demon.hp -= dealt;
                        }
                    }
                    AttrKind::Bite => {
                        self.log.debug(format_args!("Bite: Demon is immune.\n"));
                    }
                    AttrKind::Mania => {
                        let card = self.state.field.get_mut(idx).expect("field card");
                        card.hp = (card.hp - level).max(0);
                        card.atk += level;
                        card.cur_base_atk += level;
                        let (hp_now, atk_now) = (card.hp, card.atk);
                        self.log.debug(format_args!(
                            "Mania: -{level} hp (to {hp_now}), +{level} atk (to {atk_now}).\n"
                        ));
                        if hp_now == 0 {
                            self.remove_card(idx, true);
                        }
                    }
                    _ => {}
                }
                i += 1;
            }

            if idx == 0 && self.state.field.get(0).is_some_and(|c| c.hp > 0) {
                self.player_attack();
            }

            if self.state.field.get(idx).is_none_or(|c| c.hp <= 0) {
                return;
            }
        }

        // Damage-over-time statuses tick even for trapped cards.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(idx).and_then(|c| c.attrs.get(i)) {
            if matches!(attr.kind, AttrKind::FireGod | AttrKind::ToxicClouds) {
                let card = self.state.field.get_mut(idx).expect("field card");
                let tick = attr.level.min(card.hp);
                card.hp -= tick;
                let left = card.hp;
                if attr.kind == AttrKind::FireGod {
                    self.log.debug(format_args!(
                        "Fire God does {} dmg to {} ({} hp left).\n",
                        tick, name.name, left
                    ));
                } else {
                    self.log.debug(format_args!(
                        "Toxic clouds does {} dmg to {} ({} hp left).\n",
                        tick, name.name, left
                    ));
                    // Toxic Clouds burns off after one tick.
                    self.state
                        .field
                        .get_mut(idx)
                        .expect("field card")
                        .attrs
                        .remove(AttrKind::ToxicClouds, None);
                }
                if left <= 0 {
                    self.remove_card(idx, true);
                }
            }
            i += 1;
        }

        if self.state.field.get(idx).is_none_or(|c| c.hp <= 0) {
            return;
        }

        // Self-heal statuses; lacerated or trapped cards get nothing.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(idx).and_then(|c| c.attrs.get(i)) {
            if matches!(attr.kind, AttrKind::Rejuvenate | AttrKind::BloodStone)
                && !trapped
                && !self.state.field.get(idx).expect("field card").has(AttrKind::LacerateBuff)
            {
                let card = self.state.field.get_mut(idx).expect("field card");
                let heal = attr.level.min(card.max_hp - card.hp);
                if heal > 0 {
                    card.hp += heal;
                    let now = card.hp;
                    if attr.kind == AttrKind::BloodStone {
                        self.log.debug(format_args!(
                            "{} rejuvenates {} to {} hp (Blood Stone).\n",
                            name.name, heal, now
                        ));
                    } else {
                        self.log.debug(format_args!(
                            "{} rejuvenates {} to {} hp.\n",
                            name.name, heal, now
                        ));
                    }
                }
            }
            i += 1;
        }
    }
}
