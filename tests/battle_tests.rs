//! Battle engine integration tests.
//!
//! These drive targeted scenarios through the public engine API and
//! assert the exact numbers the rules call for.

use std::sync::Arc;

use demonsim::core::{Attr, AttrKind, Card, CardTemplate, EngineConfig, MwcRng, TrialState};
use demonsim::engine::Battle;
use demonsim::trace::FightLog;

fn template(name: &str, atk: i32, hp: i32) -> Arc<CardTemplate> {
    Arc::new(CardTemplate::new(name, 5, 2, atk, hp))
}

fn card(name: &str, atk: i32, hp: i32) -> Card {
    Card::from_template(template(name, atk, hp))
}

fn card_with(name: &str, atk: i32, hp: i32, attrs: &[(AttrKind, i32)]) -> Card {
    let mut t = CardTemplate::new(name, 5, 2, atk, hp);
    for &(kind, level) in attrs {
        t = t.with_attr(kind, level);
    }
    Card::from_template(Arc::new(t))
}

/// A bare state with an inert demon and no deck.
fn empty_state() -> TrialState {
    let demon = Arc::new(CardTemplate::new("Boss", 1, 1, 300, 500_000));
    let mut state = TrialState::assemble(demon, &[], &[], 8800);
    state.rng = MwcRng::new(12345, 67890);
    state
}

#[test]
fn full_dodge_nullifies_the_demon_hit() {
    let mut state = empty_state();
    state.round = 5;
    state
        .field
        .push(card_with("Acrobat", 100, 400, &[(AttrKind::Dodge, 100)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.demon_attack(300);

    assert_eq!(state.field.get(0).unwrap().hp, 400);
    assert_eq!(state.hp, 8800);
}

#[test]
fn guard_absorbs_before_the_hero_bleeds() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Shieldman", 50, 100, &[(AttrKind::Guard, 9999)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.damage_hero(300);

    // The guard soaks its 100 hp and dies; the hero takes the rest.
    assert_eq!(state.hp, 8800 - 200);
    assert_eq!(state.grave.len(), 1);
    assert_eq!(state.grave.get(0).unwrap().name(), "Shieldman");
    // The slot holds a tombstone until the end-of-round sweep.
    assert!(state.field.get(0).unwrap().is_dead());
}

#[test]
fn reincarnate_moves_oldest_grave_cards_to_the_deck_tail() {
    let mut state = empty_state();
    state.grave.push(card("A", 10, 10));
    state.grave.push(card("B", 10, 10));
    state.grave.push(card("C", 10, 10));
    state
        .field
        .push(card_with("Necromancer", 10, 100, &[(AttrKind::QuickReincarnate, 2)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.card_played(0);

    assert_eq!(state.grave.len(), 1);
    assert_eq!(state.grave.get(0).unwrap().name(), "C");
    // A left the grave first, so B sits on top and is drawn first.
    let n = state.deck.len();
    assert_eq!(state.deck.get(n - 2).unwrap().name(), "A");
    assert_eq!(state.deck.get(n - 1).unwrap().name(), "B");
}

#[test]
fn warpath_adds_half_the_base_attack() {
    let mut state = empty_state();
    state.round = 6;
    state
        .field
        .push(card_with("Berserker", 400, 1000, &[(AttrKind::Warpath, 50)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.player_attack();

    assert_eq!(state.dmg_done, 600);
}

#[test]
fn attack_is_withheld_before_round_six() {
    let mut state = empty_state();
    state.round = 5;
    state.field.push(card("Eager", 400, 1000));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.player_attack();

    assert_eq!(state.dmg_done, 0);
}

#[test]
fn late_rounds_bleed_the_hero_through_guard() {
    for (round, expected) in [(51, 80), (53, 140), (55, 200)] {
        let mut state = empty_state();
        state.demon.atk = 0;
        state.round = round;
        // A guard on the field must not intercept attrition damage.
        state
            .field
            .push(card_with("Shieldman", 50, 10_000, &[(AttrKind::Guard, 9999)]));
        let cfg = EngineConfig::default();
        let mut log = FightLog::off();
        let mut battle = Battle::new(&mut state, &cfg, &mut log);

        battle.demon_round();

        assert_eq!(state.hp, 8800 - expected, "round {round}");
    }
}

#[test]
fn class_buffs_round_trip_exactly() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Elder", 200, 800, &[(AttrKind::Forest, 0)]));
    state.field.push(card_with(
        "Warden",
        300,
        900,
        &[
            (AttrKind::Forest, 0),
            (AttrKind::ForestAtk, 120),
            (AttrKind::ForestHp, 250),
        ],
    ));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.card_played(1);
    {
        let elder = state.field.get(0).unwrap();
        assert_eq!(elder.atk, 320);
        assert_eq!(elder.cur_base_atk, 320);
        assert_eq!(elder.hp, 1050);
        assert_eq!(elder.max_hp, 1050);
    }

    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);
    battle.remove_card(1, true);
    let elder = state.field.get(0).unwrap();
    assert_eq!(elder.atk, 200);
    assert_eq!(elder.cur_base_atk, 200);
    assert_eq!(elder.hp, 800);
    assert_eq!(elder.max_hp, 800);
    assert!(!elder.has(AttrKind::ForestAtkBuff));
    assert!(!elder.has(AttrKind::ForestHpBuff));
}

#[test]
fn stacked_buffs_of_different_levels_are_withdrawn_independently() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Elder", 200, 800, &[(AttrKind::Forest, 0)]));
    state.field.push(card_with(
        "Weak",
        100,
        500,
        &[(AttrKind::Forest, 0), (AttrKind::ForestAtk, 50)],
    ));
    state.field.push(card_with(
        "Strong",
        100,
        500,
        &[(AttrKind::Forest, 0), (AttrKind::ForestAtk, 120)],
    ));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);
    battle.card_played(1);
    battle.card_played(2);

    assert_eq!(state.field.get(0).unwrap().atk, 200 + 50 + 120);

    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);
    battle.remove_card(1, true);

    // Only the 50-point pair is withdrawn; the 120 from the live
    // source survives.
    let elder = state.field.get(0).unwrap();
    assert_eq!(elder.atk, 200 + 120);
    assert_eq!(elder.attrs.find(AttrKind::ForestAtkBuff), Some(120));
}

#[test]
fn resurrection_reroutes_to_the_deck_when_the_hand_is_full() {
    let mut state = empty_state();
    for i in 0..5 {
        state.hand.push(card(&format!("H{i}"), 10, 10));
    }
    state
        .field
        .push(card_with("Phoenix", 100, 100, &[(AttrKind::Resurrection, 100)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.remove_card(0, true);

    assert_eq!(state.hand.len(), 5);
    assert!(state.grave.is_empty());
    assert_eq!(state.deck.len(), 1);
    assert_eq!(state.deck.get(0).unwrap().name(), "Phoenix");
}

#[test]
fn certain_resurrection_returns_to_hand_at_printed_stats() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Phoenix", 100, 100, &[(AttrKind::Resurrection, 100)]));
    {
        let phoenix = state.field.get_mut(0).unwrap();
        phoenix.hp = 1;
        phoenix.atk = 999;
    }
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.remove_card(0, true);

    assert!(state.grave.is_empty());
    assert_eq!(state.hand.len(), 1);
    let back = state.hand.get(0).unwrap();
    assert_eq!(back.hp, 100);
    assert_eq!(back.atk, 100);
    assert_eq!(back.cur_timing, 2);
}

#[test]
fn exile_returns_the_card_to_the_deck_somewhere() {
    let mut state = empty_state();
    for i in 0..4 {
        state.deck.push(card(&format!("D{i}"), 10, 10));
    }
    state.field.push(card("Exiled", 100, 100));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.remove_card(0, false);

    assert!(state.grave.is_empty());
    assert_eq!(state.deck.len(), 5);
    assert!(state.deck.iter().any(|c| c.name() == "Exiled"));
    // Exile is not a death; the fresh copy is at printed stats.
    let back = state.deck.iter().find(|c| c.name() == "Exiled").unwrap();
    assert_eq!(back.hp, 100);
}

#[test]
fn zero_damage_triggers_nothing() {
    let mut state = empty_state();
    state.field.push(card_with(
        "Turtle",
        50,
        400,
        &[(AttrKind::Parry, 500), (AttrKind::Craze, 70)],
    ));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    let dealt = battle.damage_card(0, 300);

    assert_eq!(dealt, 0);
    // Craze must not fire on a fully parried hit.
    assert_eq!(state.field.get(0).unwrap().atk, 50);
}

#[test]
fn counterattack_trigger_strikes_back_on_damage() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Spiky", 50, 400, &[(AttrKind::Counterattack, 130)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    let dealt = battle.damage_card(0, 100);

    assert_eq!(dealt, 100);
    assert_eq!(state.field.get(0).unwrap().hp, 300);
    assert_eq!(state.dmg_done, 130);
}

#[test]
fn ice_shield_caps_incoming_damage() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Glacier", 50, 400, &[(AttrKind::IceShield, 60)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    let dealt = battle.damage_card(0, 500);

    assert_eq!(dealt, 60);
    assert_eq!(state.field.get(0).unwrap().hp, 340);
}

#[test]
fn mania_can_kill_its_own_card() {
    let mut state = empty_state();
    state.round = 6;
    state.field.push(card("Wall", 10, 5000));
    state
        .field
        .push(card_with("Madman", 100, 40, &[(AttrKind::Mania, 60)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.player_card_turn(1);

    assert!(state.field.get(1).unwrap().is_dead());
    assert_eq!(state.grave.len(), 1);
    assert_eq!(state.grave.get(0).unwrap().name(), "Madman");
}

#[test]
fn toxic_clouds_ticks_once_and_clears() {
    let mut state = empty_state();
    state.round = 6;
    state.field.push(card("Wall", 10, 5000));
    let mut victim = card("Victim", 10, 1000);
    victim.attrs.push(Attr::new(AttrKind::ToxicClouds, 200));
    state.field.push(victim);
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.player_card_turn(1);
    assert_eq!(state.field.get(1).unwrap().hp, 800);
    assert!(!state.field.get(1).unwrap().has(AttrKind::ToxicClouds));

    // The next turn must not tick again.
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);
    battle.player_card_turn(1);
    assert_eq!(state.field.get(1).unwrap().hp, 800);
}

#[test]
fn fire_god_keeps_burning() {
    let mut state = empty_state();
    state.round = 6;
    state.field.push(card("Wall", 10, 5000));
    let mut victim = card("Victim", 10, 1000);
    victim.attrs.push(Attr::new(AttrKind::FireGod, 200));
    state.field.push(victim);
    let cfg = EngineConfig::default();

    for expected in [800, 600] {
        let mut log = FightLog::off();
        let mut battle = Battle::new(&mut state, &cfg, &mut log);
        battle.player_card_turn(1);
        assert_eq!(state.field.get(1).unwrap().hp, expected);
        assert!(state.field.get(1).unwrap().has(AttrKind::FireGod));
    }
}

#[test]
fn trapped_card_skips_its_turn_but_still_burns() {
    let mut state = empty_state();
    state.round = 6;
    let mut victim = card_with("Trapped", 300, 1000, &[(AttrKind::Rejuvenate, 50)]);
    victim.attrs.push(Attr::marker(AttrKind::TrapBuff));
    victim.attrs.push(Attr::new(AttrKind::FireGod, 100));
    state.field.push(victim);
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.player_card_turn(0);

    // No attack happened, the burn ticked, the self-heal was withheld,
    // and the trap is spent.
    assert_eq!(state.dmg_done, 0);
    assert_eq!(state.field.get(0).unwrap().hp, 900);
    assert!(!state.field.get(0).unwrap().has(AttrKind::TrapBuff));
}

#[test]
fn backstab_boost_expires_with_the_round() {
    let mut state = empty_state();
    state.round = 4;
    state
        .field
        .push(card_with("Rogue", 200, 600, &[(AttrKind::Backstab, 150)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.card_played(0);
    assert_eq!(state.field.get(0).unwrap().atk, 350);

    // The cleanup at the end of the player round strips the bonus.
    let mut log = FightLog::off();
    Battle::new(&mut state, &cfg, &mut log).player_round();
    let rogue = state.field.get(0).unwrap();
    assert_eq!(rogue.atk, 200);
    assert!(!rogue.has(AttrKind::BackstabBuff));
}

#[test]
fn obstinacy_costs_the_hero_on_play() {
    let mut state = empty_state();
    state
        .field
        .push(card_with("Zealot", 100, 500, &[(AttrKind::Obstinacy, 300)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.card_played(0);

    assert_eq!(state.hp, 8500);
}

#[test]
fn demon_chain_attack_splashes_same_named_cards() {
    let mut state = empty_state();
    state.round = 5;
    state.demon.attrs.push(Attr::new(AttrKind::ChainAttack, 150));
    state.field.push(card("Twin", 50, 1000));
    state.field.push(card("Twin", 50, 1000));
    state.field.push(card("Other", 50, 1000));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.demon_attack(200);

    // Front twin takes 200; its double takes 200 * 150%.
    assert_eq!(state.field.get(0).unwrap().hp, 800);
    assert_eq!(state.field.get(1).unwrap().hp, 700);
    assert_eq!(state.field.get(2).unwrap().hp, 1000);
}

#[test]
fn sacrifice_grows_the_played_card_and_kills_the_victim() {
    let mut state = empty_state();
    state.field.push(card("Lamb", 100, 100));
    state
        .field
        .push(card_with("Cultist", 200, 1000, &[(AttrKind::Sacrifice, 50)]));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.card_played(1);

    let cultist = state.field.get(1).unwrap();
    assert_eq!(cultist.atk, 300);
    assert_eq!(cultist.cur_base_atk, 300);
    assert_eq!(cultist.hp, 1500);
    assert_eq!(cultist.max_hp, 1500);
    // The victim's tombstone holds its slot until the sweep.
    assert!(state.field.get(0).unwrap().is_dead());
    assert_eq!(state.grave.len(), 1);
    assert_eq!(state.grave.get(0).unwrap().name(), "Lamb");
}

#[test]
fn dead_slots_keep_positions_until_the_sweep() {
    let mut state = empty_state();
    state.field.push(card("A", 10, 100));
    state.field.push(card("B", 10, 100));
    state.field.push(card("C", 10, 100));
    let cfg = EngineConfig::default();
    let mut log = FightLog::off();
    let mut battle = Battle::new(&mut state, &cfg, &mut log);

    battle.remove_card(1, true);
    assert_eq!(state.field.len(), 3);
    assert_eq!(state.field.get(2).unwrap().name(), "C");

    let mut log = FightLog::off();
    Battle::new(&mut state, &cfg, &mut log).sweep_dead();
    assert_eq!(state.field.len(), 2);
    assert_eq!(state.field.get(1).unwrap().name(), "C");
}
