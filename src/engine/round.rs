//! The round driver: alternating demon and player rounds from round 1
//! until the hero dies, the player runs out of cards, or the round cap.

use crate::core::MAX_CARDS_IN_HAND;

use super::Battle;

impl Battle<'_, '_> {
    /// Play the battle to completion.
    ///
    /// Rounds alternate demon (odd) and player (even), starting at
    /// round 1 with a demon round in which the demon does nothing;
    /// its script only wakes at round 5. Returns whether the battle
    /// reached the configured report round. On exit the round counter
    /// is stepped back to the last round actually played.
    pub fn run(&mut self) -> bool {
        let mut hit_round_x = false;

        while self.state.hp > 0
            && self.state.has_cards_left()
            && self.state.round <= self.cfg.max_rounds
        {
            if self.state.round == self.cfg.round_x {
                hit_round_x = true;
            }
            self.print_state();
            self.decrease_timers();

            let round = self.state.round;
            if round % 2 == 0 {
                self.log
                    .debug(format_args!("\nRound {round} (player)\n\n"));
                self.draw_from_deck();
                self.play_from_hand();
                // Obstinacy on play can kill the hero outright.
                if self.state.hp <= 0 {
                    break;
                }
                self.player_round();
            } else {
                self.log.debug(format_args!("\nRound {round} (demon)\n\n"));
                self.demon_round();
            }
            self.state.round += 1;
        }

        self.state.round -= 1;
        self.print_state();
        hit_round_x
    }

    /// Tick down every hand card's timer. Runs every round, demon
    /// rounds included.
    fn decrease_timers(&mut self) {
        for card in self.state.hand.iter_mut() {
            if card.cur_timing > 0 {
                card.cur_timing -= 1;
            }
        }
    }

    /// Draw the top of the deck into the hand, unless the hand is full.
    fn draw_from_deck(&mut self) {
        if self.state.deck.is_empty() {
            return;
        }
        if self.state.hand.len() >= MAX_CARDS_IN_HAND {
            self.log.debug(format_args!(
                "Hand is full.  No card played to hand this turn\n"
            ));
            return;
        }
        let top = self.state.deck.len() - 1;
        let card = self.state.deck.remove(top);
        let name = card.template.clone();
        self.state.hand.push(card);
        self.log
            .verbose(format_args!("{} dealt to hand.\n", name.name));
    }

    /// Move every hand card whose timer has run out onto the field,
    /// firing its entry effects.
    fn play_from_hand(&mut self) {
        let mut i = 0;
        while i < self.state.hand.len() {
            if self.state.hand.get(i).expect("hand card").cur_timing <= 0 {
                let card = self.state.hand.remove(i);
                self.state.field.push(card);
                let idx = self.state.field.len() - 1;
                self.card_played(idx);
            } else {
                i += 1;
            }
        }
    }

    /// Narrate the whole battle position (debug tracing only).
    fn print_state(&mut self) {
        if !self.log.debug_enabled() {
            return;
        }
        let (hp, dmg) = (self.state.hp, self.state.dmg_done);
        self.log
            .debug(format_args!("\nPlayer: Hp = {hp}, Damage done = {dmg}\n"));
        let d = &self.state.demon;
        self.log.debug(format_args!(
            "{:<20} ({} atk) ({:4}/{:4} hp)\n",
            d.name(),
            d.atk,
            d.hp,
            d.max_hp
        ));

        if !self.state.field.is_empty() {
            self.log.debug(format_args!("\nField:\n"));
            for i in 0..self.state.field.len() {
                let c = self.state.field.get(i).expect("field card");
                let line = format!(
                    "{:<20} ({} atk) ({:4}/{:4} hp)\n",
                    c.name(),
                    c.atk,
                    c.hp,
                    c.max_hp
                );
                self.log.debug(format_args!("{line}"));
            }
        }
        if !self.state.hand.is_empty() {
            self.log.debug(format_args!("\nHand:\n"));
            for i in 0..self.state.hand.len() {
                let c = self.state.hand.get(i).expect("hand card");
                let line = format!("{:<20} ({})\n", c.name(), c.cur_timing);
                self.log.debug(format_args!("{line}"));
            }
        }
        if !self.state.grave.is_empty() {
            self.log.debug(format_args!("\nGrave:\n"));
            for i in 0..self.state.grave.len() {
                let c = self.state.grave.get(i).expect("grave card");
                let line = format!("{:<20}\n", c.name());
                self.log.debug(format_args!("{line}"));
            }
        }
    }
}
