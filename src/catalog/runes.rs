//! The fixed rune table.
//!
//! Runes are not user-definable: the sixteen known runes, their
//! attribute levels and their charge counts are baked in. A deck file
//! names up to four of them.

use crate::core::{Attr, AttrKind, RuneState};

/// Every known rune: name, attribute kind, attribute level, charges.
const RUNE_TABLE: &[(&str, AttrKind, i32, i32)] = &[
    ("Arctic Freeze", AttrKind::ArcticFreeze, 100, 3),
    ("Blood Stone", AttrKind::BloodStone, 270, 5),
    ("Clear Spring", AttrKind::ClearSpring, 225, 4),
    ("Frost Bite", AttrKind::FrostBite, 140, 3),
    ("Red Valley", AttrKind::RedValley, 90, 5),
    ("Lore", AttrKind::Lore, 150, 4),
    ("Leaf", AttrKind::Leaf, 240, 4),
    ("Revival", AttrKind::Revival, 120, 4),
    ("Fire Forge", AttrKind::FireForge, 210, 4),
    ("Stonewall", AttrKind::Stonewall, 180, 4),
    ("Spring Breeze", AttrKind::SpringBreeze, 240, 4),
    ("Thunder Shield", AttrKind::ThunderShield, 200, 4),
    ("Nimble Soul", AttrKind::NimbleSoul, 65, 3),
    ("Dirt", AttrKind::Dirt, 70, 4),
    ("Flying Stone", AttrKind::FlyingStone, 270, 4),
    ("Tsunami", AttrKind::Tsunami, 80, 4),
];

/// Look up a rune by name, case-insensitively.
#[must_use]
pub fn find_rune(name: &str) -> Option<RuneState> {
    RUNE_TABLE
        .iter()
        .find(|(key, _, _, _)| key.eq_ignore_ascii_case(name))
        .map(|&(key, kind, level, charges)| RuneState::new(key, Attr::new(kind, level), charges))
}
