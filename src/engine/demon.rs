//! The demon's round: ability script, physical attack, cleanup.

use crate::core::{Attr, AttrKind, ATTRITION_ROUND, FIRST_DEMON_ROUND};

use super::Battle;

impl Battle<'_, '_> {
    /// Run the demon's half of the round. The demon sits out the
    /// opening rounds entirely; once awake it runs its abilities in
    /// attribute order (stopping the moment the hero dies), then
    /// swings, then the field is swept.
    pub fn demon_round(&mut self) {
        if self.state.round < FIRST_DEMON_ROUND {
            return;
        }
        let demon_name = self.state.demon.template.clone();
        if self.state.round == FIRST_DEMON_ROUND {
            self.log
                .debug(format_args!("{} appears.\n", demon_name.name));
        }
        self.log
            .verbose(format_args!("{}'s turn:\n", demon_name.name));

        // Deep rounds bleed the hero dry no matter what is on the
        // field; Guard does not intercept this.
        if self.state.round >= ATTRITION_ROUND {
            let mut dmg = ((self.state.round - ATTRITION_ROUND) / 2) * 60 + 80;
            dmg = dmg.min(self.state.hp);
            self.state.hp -= dmg;
            let left = self.state.hp;
            self.log.debug(format_args!(
                "Player takes {dmg} unavoidable damage ({left} left)\n"
            ));
        }

        let mut i = 0;
        while let Some(attr) = self.state.demon.attrs.get(i) {
            if self.state.hp <= 0 {
                break;
            }
            let level = attr.level;
            match attr.kind {
                AttrKind::Curse => {
                    self.log.debug(format_args!("Curse : {level} dmg.  "));
                    self.damage_hero(level);
                }
                AttrKind::Damnation => {
                    let dmg = level * self.state.field.len() as i32;
                    if dmg > 0 {
                        self.log.debug(format_args!("Damnation: {dmg} dmg.  "));
                        self.damage_hero(dmg);
                    }
                }
                AttrKind::Exile => self.demon_exile(),
                AttrKind::Snipe => self.demon_snipe(level),
                AttrKind::ManaCorrupt => self.demon_mana_corrupt(level),
                AttrKind::Destroy => self.demon_destroy(),
                AttrKind::FireGod => self.demon_fire_god(Attr::new(attr.kind, level)),
                AttrKind::ToxicClouds => self.demon_toxic_clouds(Attr::new(attr.kind, level)),
                AttrKind::Trap => self.demon_trap(level),
                _ => {}
            }
            i += 1;
        }

        if self.state.hp > 0 {
            let mut atk = self.state.demon.atk;
            if let Some(level) = self.state.demon.find(AttrKind::HotChase) {
                let bonus = level * self.state.grave.len() as i32;
                if bonus > 0 {
                    atk += bonus;
                    self.log.debug(format_args!(
                        "Hot Chase: Demon attack +{bonus} (now {atk}).\n"
                    ));
                }
            }
            self.demon_attack(atk);
        }

        self.sweep_dead();
    }

    /// Banish the front card back into the deck, unless it resists.
    fn demon_exile(&mut self) {
        if self.state.field.is_empty() {
            return;
        }
        let card = self.state.field.get(0).expect("front card");
        let name = card.template.clone();
        if card.hp > 0 {
            self.log
                .debug(format_args!("Exile cast on {}.\n", name.name));
            if !card.has(AttrKind::Resistance) && !card.has(AttrKind::Immunity) {
                self.remove_card(0, false);
            }
        } else {
            self.log
                .debug(format_args!("{} resisted Exile.\n", name.name));
        }
    }

    /// Hit the lowest-hp card for up to `level`, straight to its hit
    /// points: no dodge, no mitigation.
    fn demon_snipe(&mut self, level: i32) {
        let Some(idx) = self.find_lowest_hp(false) else {
            return;
        };
        let card = self.state.field.get_mut(idx).expect("snipe target");
        let dmg = level.min(card.hp);
        card.hp -= dmg;
        let (name, hp) = (card.template.clone(), card.hp);
        self.log.debug(format_args!(
            "Devil's blade: {} dmg to {}.\n",
            dmg, name.name
        ));
        if hp == 0 {
            self.remove_card(idx, true);
        }
    }

    /// Capped direct damage to a random live card; Reflection and
    /// Immunity backfire, tripling it.
    fn demon_mana_corrupt(&mut self, level: i32) {
        let Some(idx) = self.pick_alive_in_field() else {
            return;
        };
        let card = self.state.field.get_mut(idx).expect("corrupt target");
        let mut dmg = level;
        if card.has(AttrKind::Reflection) || card.has(AttrKind::Immunity) {
            dmg *= 3;
        }
        dmg = dmg.min(card.hp);
        card.hp -= dmg;
        let (name, hp) = (card.template.clone(), card.hp);
        self.log.debug(format_args!(
            "Mana corrupt: {} dmg to {}.\n",
            dmg, name.name
        ));
        if hp == 0 {
            self.remove_card(idx, true);
        }
    }

    /// Kill a random live card outright, unless it resists.
    fn demon_destroy(&mut self) {
        let Some(idx) = self.pick_alive_in_field() else {
            return;
        };
        let card = self.state.field.get(idx).expect("destroy target");
        let name = card.template.clone();
        self.log
            .debug(format_args!("Destroy cast on {}.\n", name.name));
        if !card.has(AttrKind::Resistance) && !card.has(AttrKind::Immunity) {
            self.state.field.get_mut(idx).expect("destroy target").hp = 0;
            self.remove_card(idx, true);
        } else {
            self.log
                .debug(format_args!("{} resisted Destroy.\n", name.name));
        }
    }

    /// Tag every live, non-immune, untagged card with the burn.
    fn demon_fire_god(&mut self, attr: Attr) {
        for j in 0..self.state.field.len() {
            let card = self.state.field.get(j).expect("field card");
            if card.hp <= 0 {
                continue;
            }
            let name = card.template.clone();
            if card.has(AttrKind::Immunity) {
                self.log
                    .debug(format_args!("{} immune to Fire God.\n", name.name));
            } else if !card.has(AttrKind::FireGod) {
                self.log
                    .debug(format_args!("Fire God cast on {}.\n", name.name));
                self.state.field.get_mut(j).expect("field card").attrs.push(attr);
            }
        }
    }

    /// Damage every live card, tagging the survivors with the cloud.
    /// Immune cards are skipped.
    fn demon_toxic_clouds(&mut self, attr: Attr) {
        for j in 0..self.state.field.len() {
            let card = self.state.field.get(j).expect("field card");
            if card.hp <= 0 {
                continue;
            }
            let name = card.template.clone();
            if card.has(AttrKind::Immunity) {
                self.log
                    .debug(format_args!("{} immune to Toxic Clouds.\n", name.name));
                continue;
            }
            let card = self.state.field.get_mut(j).expect("field card");
            let dmg = attr.level.min(card.hp);
            card.hp -= dmg;
            let left = card.hp;
            self.log.debug(format_args!(
                "Toxic clouds does {} dmg to {} ({} hp left).\n",
                dmg, name.name, left
            ));
            if left <= 0 {
                self.remove_card(j, true);
            } else if !self.state.field.get(j).expect("field card").has(AttrKind::ToxicClouds) {
                self.state.field.get_mut(j).expect("field card").attrs.push(attr);
            }
        }
    }

    /// Try to trap `count` random live cards; each pick sticks 65 % of
    /// the time, and Immunity or Evasion shrugs it off outright.
    pub(crate) fn demon_trap(&mut self, count: i32) {
        let picks = self.pick_n_alive(count.max(0) as usize);
        for &idx in &picks {
            let roll = self.state.rng.below(100) as i32;
            let card = self.state.field.get(idx).expect("trap target");
            let name = card.template.clone();
            if card.has(AttrKind::Immunity) {
                self.log.debug(format_args!(
                    "{} not trapped because of immunity.\n",
                    name.name
                ));
            } else if card.has(AttrKind::Evasion) {
                self.log.debug(format_args!(
                    "{} not trapped because of evasion.\n",
                    name.name
                ));
            } else if roll < 65 {
                self.state
                    .field
                    .get_mut(idx)
                    .expect("trap target")
                    .attrs
                    .push(Attr::marker(AttrKind::TrapBuff));
                self.log.debug(format_args!("{} trapped.\n", name.name));
            } else {
                self.log.debug(format_args!("{} not trapped.\n", name.name));
            }
        }
    }

    /// The demon's physical attack: the front card takes it (with a
    /// chain splash onto same-named cards when the hit lands), or the
    /// hero does when the front slot is empty or already a tombstone.
    pub fn demon_attack(&mut self, dmg: i32) {
        self.log.debug(format_args!("Attack: {dmg} dmg.  "));

        if let Some(front) = self.state.field.get(0) {
            if !front.is_dead() {
                let target_name = front.template.clone();
                let dealt = self.damage_card(0, dmg);

                if dealt > 0 {
                    if let Some(level) = self.state.demon.find(AttrKind::ChainAttack) {
                        let splash = (dealt * level) / 100;
                        let mut i = 1;
                        while i < self.state.field.len() {
                            let card = self.state.field.get(i).expect("field card");
                            if !card.is_dead()
                                && card.hp > 0
                                && card.name() == target_name.name
                            {
                                let name = card.template.clone();
                                self.log.debug(format_args!(
                                    "Chain attack on {} for {} damage.\n",
                                    name.name, splash
                                ));
                                self.damage_card(i, splash);
                            }
                            i += 1;
                        }
                    }
                }
                return;
            }
        }

        self.damage_hero(dmg);
    }
}
