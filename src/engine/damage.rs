//! Damage resolution: hits on player cards, on the hero, and the
//! front card's swing at the demon.

use crate::core::{Attr, AttrKind, Card, FIRST_PLAYER_ROUND};

use super::Battle;

/// Apply the defender's physical mitigation: flat reductions first
/// (Parry, Stonewall), then hard caps (Ice Shield, Arctic Freeze), in
/// attribute order.
pub(crate) fn reduce_phys_dmg(card: &Card, mut dmg: i32) -> i32 {
    for attr in card.attrs.iter() {
        match attr.kind {
            AttrKind::Parry | AttrKind::Stonewall => {
                dmg = (dmg - attr.level).max(0);
            }
            AttrKind::IceShield | AttrKind::ArcticFreeze => {
                if dmg > attr.level {
                    dmg = attr.level;
                }
            }
            _ => {}
        }
    }
    dmg
}

impl Battle<'_, '_> {
    /// Damage the field card at `idx`, running the full avoidance →
    /// mitigation → application → trigger → death pipeline.
    ///
    /// Returns the damage actually applied, which feeds the demon's
    /// chain attack. A hit that resolves to zero triggers nothing.
    pub fn damage_card(&mut self, idx: usize, dmg: i32) -> i32 {
        let name = self.state.field.get(idx).expect("damaged card").template.clone();

        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::NimbleSoul)) {
            if self.state.rng.percent(level) {
                self.log
                    .debug(format_args!("{} dodged (nimble soul).\n", name.name));
                return 0;
            }
        }
        if let Some(level) = self.state.field.get(idx).and_then(|c| c.find(AttrKind::Dodge)) {
            if self.state.rng.percent(level) {
                self.log.debug(format_args!("{} dodged.\n", name.name));
                return 0;
            }
        }

        let dmg = reduce_phys_dmg(self.state.field.get(idx).expect("damaged card"), dmg);
        if dmg <= 0 {
            return 0;
        }

        {
            let card = self.state.field.get_mut(idx).expect("damaged card");
            card.hp = (card.hp - dmg).max(0);
        }
        let left = self.state.field.get(idx).expect("damaged card").hp;
        self.log.debug(format_args!(
            "{} takes {} dmg ({} left).\n",
            name.name, dmg, left
        ));

        // On-damage triggers, in attribute order. Handlers may grow
        // the list, so read by index.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(idx).and_then(|c| c.attrs.get(i)) {
            let level = attr.level;
            match attr.kind {
                AttrKind::Craze => {
                    self.log
                        .debug(format_args!("Craze: {} +{} dmg\n", name.name, level));
                    let card = self.state.field.get_mut(idx).expect("damaged card");
                    card.atk += level;
                    card.cur_base_atk += level;
                }
                AttrKind::Tsunami => {
                    self.log
                        .debug(format_args!("Tsunami: {} +{} dmg\n", name.name, level));
                    let card = self.state.field.get_mut(idx).expect("damaged card");
                    card.atk += level;
                    card.cur_base_atk += level;
                }
                AttrKind::Counterattack => {
                    self.log.debug(format_args!("Counterattack: {level} dmg\n"));
                    self.state.dmg_done += level;
                    self.state.demon.hp -= level;
                }
                AttrKind::Retaliation => {
                    self.log.debug(format_args!("Retaliation: {level} dmg\n"));
                    self.state.dmg_done += level;
                    self.state.demon.hp -= level;
                }
                AttrKind::ThunderShield => {
                    self.log.debug(format_args!("Thunder Shield: {level} dmg\n"));
                    self.state.dmg_done += level;
                    self.state.demon.hp -= level;
                }
                AttrKind::FireForge => {
                    self.log.debug(format_args!("Fire Forge: {level} dmg\n"));
                    self.state.dmg_done += level;
                    self.state.demon.hp -= level;
                }
                AttrKind::WickedLeech => {
                    let steal = (self.state.demon.cur_base_atk * level) / 100;
                    self.state.demon.cur_base_atk -= steal;
                    self.state.demon.atk -= steal;
                    let card = self.state.field.get_mut(idx).expect("damaged card");
                    card.atk += steal;
                    card.cur_base_atk += steal;
                    let now = card.atk;
                    let demon_now = self.state.demon.atk;
                    self.log.debug(format_args!(
                        "Wicked Leech: Steal {steal} atk (now {now}) (demon now {demon_now})\n"
                    ));
                }
                _ => {}
            }
            i += 1;
        }

        if self.state.field.get(idx).expect("damaged card").hp == 0 {
            self.remove_card(idx, true);
        }
        if self.state.field.get(idx).expect("damaged card").hp > 0
            && self.state.demon.has(AttrKind::Lacerate)
        {
            self.apply_lacerate(idx);
        }
        dmg
    }

    /// Mark the card at `idx` as lacerated, blocking heals. Idempotent.
    pub(crate) fn apply_lacerate(&mut self, idx: usize) {
        let card = self.state.field.get_mut(idx).expect("lacerated card");
        if !card.has(AttrKind::LacerateBuff) {
            card.attrs.push(Attr::marker(AttrKind::LacerateBuff));
            let name = card.template.clone();
            self.log.debug(format_args!("{} lacerated.\n", name.name));
        }
    }

    /// Damage the hero. Cards with Guard absorb from the front of the
    /// field first, dying if drained; the remainder lands on the hero.
    pub fn damage_hero(&mut self, mut dmg: i32) {
        let mut continued = false;
        for i in 0..self.state.field.len() {
            let Some(card) = self.state.field.get(i) else {
                continue;
            };
            if !card.has(AttrKind::Guard) {
                continue;
            }
            let absorbed = dmg.min(card.hp);
            if absorbed <= 0 {
                continue;
            }
            let card = self.state.field.get_mut(i).expect("guard card");
            card.hp -= absorbed;
            let (name, left) = (card.template.clone(), card.hp);
            if continued {
                self.log.debug(format_args!("        "));
            }
            self.log.debug(format_args!(
                "{} absorbs {} ({} left).\n",
                name.name, absorbed, left
            ));
            continued = true;
            if left <= 0 {
                self.log.debug(format_args!("        "));
                self.remove_card(i, true);
            }
            dmg -= absorbed;
        }

        self.state.hp -= dmg;
        if dmg > 0 {
            if continued {
                self.log.debug(format_args!("        "));
            }
            let left = self.state.hp;
            self.log
                .debug(format_args!("Player takes {dmg} dmg ({left} left).\n"));
        }
    }

    /// The front card's physical attack on the demon.
    pub fn player_attack(&mut self) {
        if self.state.field.is_empty() || self.state.round < FIRST_PLAYER_ROUND {
            return;
        }

        let attacker = self.state.field.get(0).expect("front card").template.clone();
        let mut dmg = self.state.field.get(0).expect("front card").atk;
        let mut base_atk = self.state.field.get(0).expect("front card").cur_base_atk;

        // Base-attack modifiers apply before anything that scales off
        // the base.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(0).and_then(|c| c.attrs.get(i)) {
            if attr.kind == AttrKind::Revival {
                dmg += attr.level;
                base_atk += attr.level;
                self.log.debug(format_args!(
                    "Revival: Dmg increased by {} to {}.\n",
                    attr.level, dmg
                ));
                self.log.debug(format_args!(
                    "Revival: Base dmg increased by {} to {}.\n",
                    attr.level, base_atk
                ));
            }
            i += 1;
        }

        // Pre-attack additive modifiers.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(0).and_then(|c| c.attrs.get(i)) {
            let level = attr.level;
            match attr.kind {
                AttrKind::Vendetta => {
                    let increase = self.state.grave.len() as i32 * level;
                    if increase > 0 {
                        dmg += increase;
                        self.log.debug(format_args!(
                            "Vendetta: dmg increased by {increase} to {dmg}.\n"
                        ));
                    }
                }
                AttrKind::Warpath => {
                    let increase = (base_atk * level) / 100;
                    dmg += increase;
                    self.log.debug(format_args!(
                        "Warpath: dmg increased by {increase} to {dmg}.\n"
                    ));
                }
                AttrKind::Lore => {
                    let increase = (base_atk * level) / 100;
                    dmg += increase;
                    self.log
                        .debug(format_args!("Lore: dmg increased by {increase} to {dmg}.\n"));
                }
                AttrKind::Concentrate => {
                    if self.cfg.avg_concentrate {
                        let increase = (base_atk * level) / 200;
                        dmg += increase;
                        self.log.debug(format_args!(
                            "Concentrate: dmg increased by {increase} to {dmg} (AVG).\n"
                        ));
                    } else if self.state.rng.percent(50) {
                        let increase = (base_atk * level) / 100;
                        dmg += increase;
                        self.log.debug(format_args!(
                            "Concentrate: dmg increased by {increase} to {dmg}.\n"
                        ));
                    }
                }
                AttrKind::FrostBite => {
                    if self.cfg.avg_concentrate {
                        let increase = (base_atk * level) / 200;
                        dmg += increase;
                        self.log.debug(format_args!(
                            "Frost bite: dmg increased by {increase} to {dmg} (AVG).\n"
                        ));
                    } else if self.state.rng.percent(50) {
                        let increase = (base_atk * level) / 100;
                        dmg += increase;
                        self.log.debug(format_args!(
                            "Frost bite: dmg increased by {increase} to {dmg}.\n"
                        ));
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let dmg = reduce_phys_dmg(&self.state.demon, dmg);
        self.log
            .debug(format_args!("{} attacks for {} dmg.\n", attacker.name, dmg));
        self.state.dmg_done += dmg;
        self.state.demon.hp -= dmg;

        if dmg <= 0 {
            return;
        }

        // Post-attack effects on the attacker.
        let mut i = 0;
        while let Some(attr) = self.state.field.get(0).and_then(|c| c.attrs.get(i)) {
            let level = attr.level;
            match attr.kind {
                AttrKind::Bloodsucker | AttrKind::RedValley => {
                    let card = self.state.field.get_mut(0).expect("front card");
                    let heal = ((dmg * level) / 100).min(card.max_hp - card.hp);
                    if card.hp > 0 && heal > 0 {
                        card.hp += heal;
                        let (name, now) = (card.template.clone(), card.hp);
                        let what = if attr.kind == AttrKind::Bloodsucker {
                            "Bloodsucker"
                        } else {
                            "Red valley"
                        };
                        self.log.debug(format_args!(
                            "{}: {} heals {} ({} hp).\n",
                            what, name.name, heal, now
                        ));
                    }
                }
                AttrKind::Bloodthirsty => {
                    let card = self.state.field.get_mut(0).expect("front card");
                    card.atk += level;
                    card.cur_base_atk += level;
                    let (name, now) = (card.template.clone(), card.atk);
                    self.log.debug(format_args!(
                        "Bloodthirsty: {} attack increases by {} (now {}).\n",
                        name.name, level, now
                    ));
                }
                _ => {}
            }
            i += 1;
        }

        self.demon_counter();

        // If the attacker fell to the counter, nothing drains.
        if self.state.field.get(0).is_none_or(|c| c.hp <= 0) {
            return;
        }

        if let Some(level) = self.state.demon.find(AttrKind::WickedLeech) {
            let card = self.state.field.get_mut(0).expect("front card");
            let drain = (card.cur_base_atk * level) / 100;
            card.atk -= drain;
            card.cur_base_atk -= drain;
            if card.atk < 0 {
                card.atk = 0;
            }
            let (name, now) = (card.template.clone(), card.atk);
            self.state.demon.cur_base_atk += drain;
            self.state.demon.atk += drain;
            let demon_now = self.state.demon.atk;
            self.log.debug(format_args!(
                "Wicked leech: {} loses {} atk (now {}), demon gains {} atk (now {}).\n",
                name.name, drain, now, drain, demon_now
            ));
        }
    }

    /// The demon's counterattack after being hit: Retaliation strikes
    /// the first two field cards, Counterattack the first. Each strike
    /// can be sidestepped by Dexterity and otherwise resolves through
    /// the full [`Battle::damage_card`] pipeline.
    fn demon_counter(&mut self) {
        let (level, targets) = if let Some(l) = self.state.demon.find(AttrKind::Retaliation) {
            (l, 2)
        } else if let Some(l) = self.state.demon.find(AttrKind::Counterattack) {
            (l, 1)
        } else {
            return;
        };

        for i in 0..targets {
            if self.state.field.len() <= i {
                break;
            }
            let card = self.state.field.get(i).expect("counter target");
            if card.hp <= 0 {
                continue;
            }
            if let Some(dex) = card.find(AttrKind::Dexterity) {
                let name = card.template.clone();
                if self.state.rng.percent(dex) {
                    self.log.debug(format_args!(
                        "Dexterity: {} dodges the counter.\n",
                        name.name
                    ));
                    continue;
                }
            }
            self.log
                .debug(format_args!("Demon counterattack: {level} dmg.  "));
            self.damage_card(i, level);
        }
    }
}
