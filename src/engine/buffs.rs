//! Class buff propagation across the field.
//!
//! The four "force"/"guard" ability families place stat buffs on every
//! other field card of the matching class. Buffs are attributes: the
//! stat change happens when the buff lands and is withdrawn, by the
//! exact `(kind, level)` pair, when the source card leaves the field,
//! so buffs of the same kind from other live sources survive intact.

use crate::core::{Attr, AttrKind, CardClass};

use super::Battle;

impl Battle<'_, '_> {
    /// Place one buff on the card at `dst`. Hp buffs raise both hp and
    /// the ceiling; atk buffs raise both the current and the modified
    /// base attack.
    pub(crate) fn add_buff_to_card(&mut self, src: usize, dst: usize, buff: AttrKind, level: i32) {
        let src_name = self.state.field.get(src).expect("buff source").template.clone();
        let card = self.state.field.get_mut(dst).expect("buff target");
        let dst_name = card.template.clone();

        if buff.is_class_hp_buff() {
            card.hp += level;
            card.max_hp += level;
            card.attrs.push(Attr::new(buff, level));
            self.log.debug(format_args!(
                "{} increases hp of {} by {}.\n",
                src_name.name, dst_name.name, level
            ));
        } else if buff.is_class_atk_buff() {
            card.atk += level;
            card.cur_base_atk += level;
            let now = card.atk;
            card.attrs.push(Attr::new(buff, level));
            self.log.debug(format_args!(
                "{} increases atk and base atk of {} by {} (now {}).\n",
                src_name.name, dst_name.name, level, now
            ));
        } else {
            card.attrs.push(Attr::new(buff, level));
        }
    }

    /// Place a buff on every other field card of `class`.
    pub fn add_buff_to_field(
        &mut self,
        src: usize,
        class: CardClass,
        buff: AttrKind,
        level: i32,
    ) {
        for i in 0..self.state.field.len() {
            if i == src {
                continue;
            }
            let matches = self
                .state
                .field
                .get(i)
                .is_some_and(|c| c.has(class.marker()));
            if matches {
                self.add_buff_to_card(src, i, buff, level);
            }
        }
    }

    /// Withdraw one `(buff, level)` pair from every other field card
    /// that carries it, undoing the stat change it granted.
    pub fn remove_buff_from_field(&mut self, src: usize, buff: AttrKind, level: i32) {
        for i in 0..self.state.field.len() {
            if i == src {
                continue;
            }
            let Some(card) = self.state.field.get_mut(i) else {
                continue;
            };
            if !card.has(buff) {
                continue;
            }
            let name = card.template.clone();

            if buff.is_class_hp_buff() {
                let old_hp = card.hp;
                card.attrs.remove(buff, Some(level));
                card.max_hp -= level;
                if card.hp > card.max_hp {
                    card.hp = card.max_hp;
                }
                let (lost, now) = (old_hp - card.hp, card.hp);
                self.log.debug(format_args!(
                    "Hp buff removed: {} loses {} max hp and {} hp (now {})\n",
                    name.name, level, lost, now
                ));
            } else if buff.is_class_atk_buff() {
                card.attrs.remove(buff, Some(level));
                card.atk = (card.atk - level).max(0);
                card.cur_base_atk = (card.cur_base_atk - level).max(0);
                let now = card.atk;
                self.log.debug(format_args!(
                    "Atk buff removed: {} loses {} atk and base atk (now {})\n",
                    name.name, level, now
                ));
            } else {
                card.attrs.remove(buff, Some(level));
            }
        }
    }
}
