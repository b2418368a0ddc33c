//! The rune engine.
//!
//! Runes activate at the start of the player's round, before any card
//! acts. Most runes work by attaching their attribute to every field
//! card for one round (the attribute then shows up in the ordinary
//! per-card handlers) and withdrawing it at the start of the next
//! player round. Clear Spring and Leaf are one-shot effects with no
//! deactivation state. Every activation burns a charge; an exhausted
//! rune never fires again in the trial.

use crate::core::{Attr, AttrKind};

use super::Battle;

impl Battle<'_, '_> {
    /// Withdraw last round's rune attributes, then test every charged
    /// rune's gate and activate the ones that pass.
    pub fn update_runes(&mut self) {
        for r in 0..self.state.runes.len() {
            if !self.state.runes[r].active_this_round {
                continue;
            }
            self.state.runes[r].active_this_round = false;
            let attr = self.state.runes[r].attr;
            if attr.kind == AttrKind::SpringBreeze {
                self.end_spring_breeze(attr.level);
            } else {
                for j in 0..self.state.field.len() {
                    self.state
                        .field
                        .get_mut(j)
                        .expect("field card")
                        .attrs
                        .remove(attr.kind, None);
                }
            }
        }

        for r in 0..self.state.runes.len() {
            if !self.state.runes[r].has_charges() {
                continue;
            }
            let attr = self.state.runes[r].attr;
            match attr.kind {
                AttrKind::ArcticFreeze => {
                    if self.state.grave.count_with(AttrKind::Tundra) > 2 {
                        self.activate_attach(r, "Arctic Freeze activated.\n");
                    }
                }
                AttrKind::BloodStone => {
                    if self.state.field.count_with(AttrKind::Mountain) > 1 {
                        self.activate_attach(r, "Blood stone activated.\n");
                    }
                }
                AttrKind::ClearSpring => self.try_clear_spring(r, attr.level),
                AttrKind::FrostBite => {
                    if self.state.grave.count_with(AttrKind::Tundra) > 3 {
                        self.activate_attach(r, "Frost bite activated.\n");
                    }
                }
                AttrKind::RedValley => {
                    if self.state.field.count_with(AttrKind::Swamp) > 1 {
                        self.activate_attach(r, "Red valley activated.\n");
                    }
                }
                AttrKind::Lore => {
                    if self.state.grave.count_with(AttrKind::Mountain) > 2 {
                        self.activate_attach(r, "Lore activated.\n");
                    }
                }
                AttrKind::Leaf => {
                    if self.state.round > 14 {
                        self.log.debug(format_args!("Leaf: {} dmg\n", attr.level));
                        self.state.dmg_done += attr.level;
                        self.state.demon.hp -= attr.level;
                        self.state.runes[r].charges_used += 1;
                    }
                }
                AttrKind::Revival => {
                    if self.state.grave.count_with(AttrKind::Forest) > 1 {
                        self.activate_attach(r, "Revival activated.\n");
                    }
                }
                AttrKind::FireForge => {
                    if self.state.grave.count_with(AttrKind::Mountain) > 1 {
                        self.activate_attach(r, "Fire forge activated.\n");
                    }
                }
                AttrKind::Stonewall => {
                    if self.state.field.count_with(AttrKind::Swamp) > 1 {
                        self.activate_attach(r, "Stonewall activated.\n");
                    }
                }
                AttrKind::ThunderShield => {
                    if self.state.field.count_with(AttrKind::Forest) > 1 {
                        self.activate_attach(r, "Thunder shield activated.\n");
                    }
                }
                AttrKind::NimbleSoul => {
                    if self.state.grave.count_with(AttrKind::Forest) > 2 {
                        self.activate_attach(r, "Nimble soul activated.\n");
                    }
                }
                AttrKind::Dirt => {
                    if self.state.grave.count_with(AttrKind::Swamp) > 1 {
                        self.activate_attach(r, "Dirt activated.\n");
                    }
                }
                AttrKind::FlyingStone => {
                    if self.state.grave.count_with(AttrKind::Swamp) > 2 {
                        self.activate_attach(r, "Flying stone activated.\n");
                    }
                }
                AttrKind::Tsunami => {
                    if self.state.hp < self.state.max_hp / 2 {
                        self.activate_attach(r, "Tsunami activated.\n");
                    }
                }
                AttrKind::SpringBreeze => self.try_spring_breeze(r, attr),
                _ => {}
            }
        }
    }

    /// The common activation: narrate, attach the rune's attribute to
    /// every field card, burn a charge, arm the deactivation sweep.
    fn activate_attach(&mut self, r: usize, label: &str) {
        self.log.verbose(format_args!("{label}"));
        let attr = self.state.runes[r].attr;
        for j in 0..self.state.field.len() {
            self.state.field.get_mut(j).expect("field card").attrs.push(attr);
        }
        self.state.runes[r].charges_used += 1;
        self.state.runes[r].active_this_round = true;
    }

    /// Clear Spring: with enough Tundra on the field *and* at least one
    /// damaged card, heal the whole field once. No deactivation state.
    fn try_clear_spring(&mut self, r: usize, level: i32) {
        if self.state.field.count_with(AttrKind::Tundra) <= 1 {
            return;
        }
        let any_damaged = self
            .state
            .field
            .iter()
            .any(|c| c.hp != 0 && c.hp < c.max_hp);
        if !any_damaged {
            self.log
                .verbose(format_args!("Clear spring skipped because no cards damaged.\n"));
            return;
        }
        self.log.verbose(format_args!("Clear spring activated.\n"));
        self.regenerate("Clear spring", level);
        self.state.runes[r].charges_used += 1;
    }

    /// Spring Breeze: gated on Forest cards in *hand*; attaches and
    /// swells every field card's hp and ceiling for the round.
    fn try_spring_breeze(&mut self, r: usize, attr: Attr) {
        if self.state.hand.count_with(AttrKind::Forest) <= 1 || self.state.field.is_empty() {
            return;
        }
        self.log.verbose(format_args!("Spring breeze activated.\n"));
        for j in 0..self.state.field.len() {
            self.state.field.get_mut(j).expect("field card").attrs.push(attr);
        }
        self.state.runes[r].charges_used += 1;
        self.state.runes[r].active_this_round = true;
        for j in 0..self.state.field.len() {
            let card = self.state.field.get_mut(j).expect("field card");
            card.hp += attr.level;
            card.max_hp += attr.level;
            let (name, now) = (card.template.clone(), card.hp);
            self.log.debug(format_args!(
                "Spring breeze increases hp of {} by {} (to {}).\n",
                name.name, attr.level, now
            ));
        }
    }

    /// Withdraw Spring Breeze: drop the tag and the extra ceiling,
    /// clamping hp back down.
    fn end_spring_breeze(&mut self, level: i32) {
        self.log.debug(format_args!("Spring breeze ended.\n"));
        for j in 0..self.state.field.len() {
            let card = self.state.field.get_mut(j).expect("field card");
            if !card.has(AttrKind::SpringBreeze) {
                continue;
            }
            let old_hp = card.hp;
            card.attrs.remove(AttrKind::SpringBreeze, None);
            card.max_hp -= level;
            if card.hp > card.max_hp {
                card.hp = card.max_hp;
            }
            if card.hp != old_hp {
                let (name, dropped, now) = (card.template.clone(), old_hp - card.hp, card.hp);
                self.log.debug(format_args!(
                    "Spring breeze ended, hp of {} dropped by {} (to {}).\n",
                    name.name, dropped, now
                ));
            }
        }
    }
}
