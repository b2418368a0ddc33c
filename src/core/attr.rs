//! The typed-attribute model that drives every card interaction.
//!
//! Every ability, buff, debuff and transient marker on a card is an
//! [`Attr`]: a kind drawn from the closed [`AttrKind`] vocabulary plus
//! an integer level whose meaning is kind-specific (a percent, a flat
//! amount, or nothing at all). Cards carry their attributes in an
//! [`AttrList`] and the engine reacts to them at well-defined points.
//!
//! Two disciplines keep the model unambiguous:
//!
//! - An ability that grants a lasting stat change to *other* cards uses
//!   a distinct buff kind (e.g. [`AttrKind::ForestAtk`] places
//!   [`AttrKind::ForestAtkBuff`]), so withdrawing the buff on the
//!   source's death cannot be confused with the source ability itself.
//! - Several kinds double as demon ability and player debuff (e.g.
//!   [`AttrKind::FireGod`]). The demon is immune to all debuffs, so a
//!   player card carrying such a kind can only have received it from
//!   the demon.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Maximum number of attributes one card can carry.
pub const MAX_ATTRS: usize = 40;

/// The closed vocabulary of attribute kinds.
///
/// Covers player abilities, demon abilities, class markers, buff
/// markers placed by other actors, rune attributes, and the internal
/// `Dead` tombstone marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttrKind {
    AdvancedStrike,
    Backstab,
    BackstabBuff,
    Bite,
    Bloodsucker,
    Bloodthirsty,
    ChainAttack,
    Concentrate,
    Counterattack,
    Craze,
    Curse,
    Damnation,
    Dead,
    DesperationPrayer,
    DesperationReanimate,
    DesperationReincarnate,
    Destroy,
    Dexterity,
    Dodge,
    Evasion,
    Exile,
    FireGod,
    Forest,
    ForestAtk,
    ForestAtkBuff,
    ForestHp,
    ForestHpBuff,
    Guard,
    Healing,
    HotChase,
    IceShield,
    Immunity,
    Lacerate,
    LacerateBuff,
    ManaCorrupt,
    Mania,
    Mountain,
    MountainAtk,
    MountainAtkBuff,
    MountainHp,
    MountainHpBuff,
    Obstinacy,
    Parry,
    Prayer,
    QuickPrayer,
    QuickRegenerate,
    QuickReincarnate,
    Reanimate,
    ReanimSickness,
    Reflection,
    Regenerate,
    Reincarnate,
    Rejuvenate,
    Resistance,
    Resurrection,
    Retaliation,
    Sacrifice,
    Snipe,
    Swamp,
    SwampAtk,
    SwampAtkBuff,
    SwampHp,
    SwampHpBuff,
    ToxicClouds,
    Trap,
    TrapBuff,
    Tundra,
    TundraAtk,
    TundraAtkBuff,
    TundraHp,
    TundraHpBuff,
    Vendetta,
    Warpath,
    WickedLeech,

    // Rune attributes, attached to field cards while their rune is
    // active for the round.
    ArcticFreeze,
    BloodStone,
    ClearSpring,
    FrostBite,
    RedValley,
    Lore,
    Leaf,
    Revival,
    FireForge,
    Stonewall,
    SpringBreeze,
    ThunderShield,
    NimbleSoul,
    Dirt,
    FlyingStone,
    Tsunami,
}

/// Card-file ability vocabulary, keyed case-insensitively.
///
/// Only abilities that may appear in the catalog are listed; buff
/// markers, sickness markers and rune attributes cannot be named there.
const ABILITY_NAMES: &[(&str, AttrKind)] = &[
    ("ADVANCED STRIKE", AttrKind::AdvancedStrike),
    ("BACKSTAB", AttrKind::Backstab),
    ("BITE", AttrKind::Bite),
    ("BLOODSUCKER", AttrKind::Bloodsucker),
    ("BLOODTHIRSTY", AttrKind::Bloodthirsty),
    ("CHAIN ATTACK", AttrKind::ChainAttack),
    ("CONCENTRATE", AttrKind::Concentrate),
    ("COUNTERATTACK", AttrKind::Counterattack),
    ("CRAZE", AttrKind::Craze),
    ("CURSE", AttrKind::Curse),
    ("D_PRAYER", AttrKind::DesperationPrayer),
    ("D_REANIMATE", AttrKind::DesperationReanimate),
    ("D_REINCARNATE", AttrKind::DesperationReincarnate),
    ("DAMNATION", AttrKind::Damnation),
    ("DEAD", AttrKind::Dead),
    ("DEXTERITY", AttrKind::Dexterity),
    ("DESTROY", AttrKind::Destroy),
    ("DODGE", AttrKind::Dodge),
    ("EXILE", AttrKind::Exile),
    ("EVASION", AttrKind::Evasion),
    ("FIRE GOD", AttrKind::FireGod),
    ("FOREST", AttrKind::Forest),
    ("FOREST FORCE", AttrKind::ForestAtk),
    ("FOREST GUARD", AttrKind::ForestHp),
    ("GUARD", AttrKind::Guard),
    ("HEALING", AttrKind::Healing),
    ("HOT CHASE", AttrKind::HotChase),
    ("ICE SHIELD", AttrKind::IceShield),
    ("IMMUNITY", AttrKind::Immunity),
    ("LACERATE", AttrKind::Lacerate),
    ("MANA CORRUPT", AttrKind::ManaCorrupt),
    ("MANIA", AttrKind::Mania),
    ("MTN", AttrKind::Mountain),
    ("MTN FORCE", AttrKind::MountainAtk),
    ("MTN GUARD", AttrKind::MountainHp),
    ("OBSTINACY", AttrKind::Obstinacy),
    ("PARRY", AttrKind::Parry),
    ("PRAYER", AttrKind::Prayer),
    ("QS_PRAYER", AttrKind::QuickPrayer),
    ("QS_REGENERATE", AttrKind::QuickRegenerate),
    ("QS_REINCARNATE", AttrKind::QuickReincarnate),
    ("REANIMATE", AttrKind::Reanimate),
    ("REFLECTION", AttrKind::Reflection),
    ("REGENERATE", AttrKind::Regenerate),
    ("REINCARNATE", AttrKind::Reincarnate),
    ("REJUVENATE", AttrKind::Rejuvenate),
    ("RESISTANCE", AttrKind::Resistance),
    ("RESURRECTION", AttrKind::Resurrection),
    ("RETALIATION", AttrKind::Retaliation),
    ("SACRIFICE", AttrKind::Sacrifice),
    ("SNIPE", AttrKind::Snipe),
    ("SWAMP", AttrKind::Swamp),
    ("SWAMP FORCE", AttrKind::SwampAtk),
    ("SWAMP GUARD", AttrKind::SwampHp),
    ("TOXIC CLOUDS", AttrKind::ToxicClouds),
    ("TRAP", AttrKind::Trap),
    ("TUNDRA", AttrKind::Tundra),
    ("TUNDRA FORCE", AttrKind::TundraAtk),
    ("TUNDRA GUARD", AttrKind::TundraHp),
    ("VENDETTA", AttrKind::Vendetta),
    ("WARPATH", AttrKind::Warpath),
    ("WICKED LEECH", AttrKind::WickedLeech),
];

impl AttrKind {
    /// Look up an ability by its card-file name, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        ABILITY_NAMES
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }

    /// The class whose hp this ability buffs, if it is one of the four
    /// "guard" abilities.
    #[must_use]
    pub fn class_hp_ability(self) -> Option<CardClass> {
        match self {
            AttrKind::TundraHp => Some(CardClass::Tundra),
            AttrKind::ForestHp => Some(CardClass::Forest),
            AttrKind::MountainHp => Some(CardClass::Mountain),
            AttrKind::SwampHp => Some(CardClass::Swamp),
            _ => None,
        }
    }

    /// The class whose attack this ability buffs, if it is one of the
    /// four "force" abilities.
    #[must_use]
    pub fn class_atk_ability(self) -> Option<CardClass> {
        match self {
            AttrKind::TundraAtk => Some(CardClass::Tundra),
            AttrKind::ForestAtk => Some(CardClass::Forest),
            AttrKind::MountainAtk => Some(CardClass::Mountain),
            AttrKind::SwampAtk => Some(CardClass::Swamp),
            _ => None,
        }
    }

    /// Is this one of the four hp buff markers?
    #[must_use]
    pub fn is_class_hp_buff(self) -> bool {
        matches!(
            self,
            AttrKind::TundraHpBuff
                | AttrKind::ForestHpBuff
                | AttrKind::MountainHpBuff
                | AttrKind::SwampHpBuff
        )
    }

    /// Is this one of the four attack buff markers?
    #[must_use]
    pub fn is_class_atk_buff(self) -> bool {
        matches!(
            self,
            AttrKind::TundraAtkBuff
                | AttrKind::ForestAtkBuff
                | AttrKind::MountainAtkBuff
                | AttrKind::SwampAtkBuff
        )
    }
}

/// One of the four card classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardClass {
    Tundra,
    Forest,
    Mountain,
    Swamp,
}

impl CardClass {
    /// All classes, in marker-scan order.
    pub const ALL: [CardClass; 4] = [
        CardClass::Tundra,
        CardClass::Forest,
        CardClass::Mountain,
        CardClass::Swamp,
    ];

    /// The class marker attribute carried by members.
    #[must_use]
    pub fn marker(self) -> AttrKind {
        match self {
            CardClass::Tundra => AttrKind::Tundra,
            CardClass::Forest => AttrKind::Forest,
            CardClass::Mountain => AttrKind::Mountain,
            CardClass::Swamp => AttrKind::Swamp,
        }
    }

    /// The ability that grants hp to members of this class.
    #[must_use]
    pub fn hp_ability(self) -> AttrKind {
        match self {
            CardClass::Tundra => AttrKind::TundraHp,
            CardClass::Forest => AttrKind::ForestHp,
            CardClass::Mountain => AttrKind::MountainHp,
            CardClass::Swamp => AttrKind::SwampHp,
        }
    }

    /// The hp buff marker placed on members.
    #[must_use]
    pub fn hp_buff(self) -> AttrKind {
        match self {
            CardClass::Tundra => AttrKind::TundraHpBuff,
            CardClass::Forest => AttrKind::ForestHpBuff,
            CardClass::Mountain => AttrKind::MountainHpBuff,
            CardClass::Swamp => AttrKind::SwampHpBuff,
        }
    }

    /// The ability that grants attack to members of this class.
    #[must_use]
    pub fn atk_ability(self) -> AttrKind {
        match self {
            CardClass::Tundra => AttrKind::TundraAtk,
            CardClass::Forest => AttrKind::ForestAtk,
            CardClass::Mountain => AttrKind::MountainAtk,
            CardClass::Swamp => AttrKind::SwampAtk,
        }
    }

    /// The attack buff marker placed on members.
    #[must_use]
    pub fn atk_buff(self) -> AttrKind {
        match self {
            CardClass::Tundra => AttrKind::TundraAtkBuff,
            CardClass::Forest => AttrKind::ForestAtkBuff,
            CardClass::Mountain => AttrKind::MountainAtkBuff,
            CardClass::Swamp => AttrKind::SwampAtkBuff,
        }
    }
}

/// A `(kind, level)` pair attached to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attr {
    pub kind: AttrKind,
    pub level: i32,
}

impl Attr {
    /// Create an attribute.
    #[must_use]
    pub const fn new(kind: AttrKind, level: i32) -> Self {
        Self { kind, level }
    }

    /// Create a level-less marker attribute.
    #[must_use]
    pub const fn marker(kind: AttrKind) -> Self {
        Self { kind, level: 0 }
    }
}

/// A card's attribute list.
///
/// Order is semantic: handlers react to attributes in list order, and
/// that order is observable (e.g. which on-damage trigger fires first).
/// Multiple attributes of the same kind may coexist, possibly with
/// different levels; queries answer for the *first* occurrence while
/// level-targeted removal takes out exactly one matching pair.
///
/// Storage is inline. A battle never allocates for attributes, and a
/// list that outgrows [`MAX_ATTRS`] indicates a broken catalog, so
/// [`AttrList::push`] panics rather than spilling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrList {
    attrs: SmallVec<[Attr; MAX_ATTRS]>,
}

impl AttrList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// True when no attributes are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// The attribute at `index`, if any. Attributes are `Copy`, so this
    /// hands out a value; handlers that mutate the list mid-iteration
    /// re-read by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Attr> {
        self.attrs.get(index).copied()
    }

    /// Level of the first attribute of `kind`, if present.
    #[must_use]
    pub fn find(&self, kind: AttrKind) -> Option<i32> {
        self.attrs.iter().find(|a| a.kind == kind).map(|a| a.level)
    }

    /// Whether any attribute of `kind` is present.
    #[must_use]
    pub fn has(&self, kind: AttrKind) -> bool {
        self.attrs.iter().any(|a| a.kind == kind)
    }

    /// Append an attribute.
    ///
    /// Panics when the card already carries [`MAX_ATTRS`] attributes;
    /// that is a misconfiguration, not a game event.
    pub fn push(&mut self, attr: Attr) {
        assert!(
            self.attrs.len() < MAX_ATTRS,
            "too many attributes: {:?}",
            self.attrs
        );
        self.attrs.push(attr);
    }

    /// Remove attributes of `kind`.
    ///
    /// With `Some(level)`, removes the *first* `(kind, level)` pair
    /// only; this is what lets two buffs of the same kind but different
    /// magnitudes be withdrawn independently. With `None`, removes
    /// every attribute of the kind.
    pub fn remove(&mut self, kind: AttrKind, level: Option<i32>) {
        match level {
            Some(level) => {
                if let Some(pos) = self
                    .attrs
                    .iter()
                    .position(|a| a.kind == kind && a.level == level)
                {
                    self.attrs.remove(pos);
                }
            }
            None => self.attrs.retain(|a| a.kind != kind),
        }
    }

    /// Iterate over the attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = &Attr> {
        self.attrs.iter()
    }

    /// Drop all attributes.
    pub fn clear(&mut self) {
        self.attrs.clear();
    }
}

impl FromIterator<Attr> for AttrList {
    fn from_iter<I: IntoIterator<Item = Attr>>(iter: I) -> Self {
        let mut list = Self::new();
        for attr in iter {
            list.push(attr);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AttrKind::parse("dodge"), Some(AttrKind::Dodge));
        assert_eq!(AttrKind::parse("DODGE"), Some(AttrKind::Dodge));
        assert_eq!(AttrKind::parse("Forest Force"), Some(AttrKind::ForestAtk));
        assert_eq!(AttrKind::parse("mtn guard"), Some(AttrKind::MountainHp));
        assert_eq!(AttrKind::parse("qs_prayer"), Some(AttrKind::QuickPrayer));
        assert_eq!(AttrKind::parse("no such ability"), None);
    }

    #[test]
    fn test_find_returns_first_occurrence() {
        let mut list = AttrList::new();
        list.push(Attr::new(AttrKind::ForestAtkBuff, 50));
        list.push(Attr::new(AttrKind::ForestAtkBuff, 120));

        assert_eq!(list.find(AttrKind::ForestAtkBuff), Some(50));
    }

    #[test]
    fn test_remove_specific_level() {
        let mut list = AttrList::new();
        list.push(Attr::new(AttrKind::ForestAtkBuff, 50));
        list.push(Attr::new(AttrKind::ForestAtkBuff, 120));

        list.remove(AttrKind::ForestAtkBuff, Some(120));
        assert_eq!(list.len(), 1);
        assert_eq!(list.find(AttrKind::ForestAtkBuff), Some(50));

        // Removing a level that isn't present leaves the list alone.
        list.remove(AttrKind::ForestAtkBuff, Some(999));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_all_is_idempotent() {
        let mut list = AttrList::new();
        list.push(Attr::new(AttrKind::ToxicClouds, 200));
        list.push(Attr::new(AttrKind::Dodge, 60));
        list.push(Attr::new(AttrKind::ToxicClouds, 300));

        list.remove(AttrKind::ToxicClouds, None);
        assert!(!list.has(AttrKind::ToxicClouds));
        assert_eq!(list.len(), 1);

        list.remove(AttrKind::ToxicClouds, None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_first_of_equal_pairs() {
        let mut list = AttrList::new();
        list.push(Attr::new(AttrKind::TundraHpBuff, 80));
        list.push(Attr::new(AttrKind::TundraHpBuff, 80));

        list.remove(AttrKind::TundraHpBuff, Some(80));
        assert_eq!(list.len(), 1);
        assert_eq!(list.find(AttrKind::TundraHpBuff), Some(80));
    }

    #[test]
    #[should_panic(expected = "too many attributes")]
    fn test_push_panics_at_capacity() {
        let mut list = AttrList::new();
        for _ in 0..=MAX_ATTRS {
            list.push(Attr::marker(AttrKind::Dodge));
        }
    }

    #[test]
    fn test_class_lookup_tables_agree() {
        for class in CardClass::ALL {
            assert_eq!(class.hp_ability().class_hp_ability(), Some(class));
            assert_eq!(class.atk_ability().class_atk_ability(), Some(class));
            assert!(class.hp_buff().is_class_hp_buff());
            assert!(class.atk_buff().is_class_atk_buff());
            assert!(!class.hp_buff().is_class_atk_buff());
        }
    }
}
