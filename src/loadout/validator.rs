//! Equip validation: slot rules over weapon, accessory and armor cards.
//!
//! The validator is pure and total. It always walks the whole loadout and
//! returns every violation at once — menus surface the full list to the
//! player rather than the first complaint.

use crate::cards::{AccessoryKind, Card, CardKind, EffectSet, SpecialEffect, WeaponKind};
use thiserror::Error;

/// A single broken equip constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{count} {kind} weapons equipped (limit {limit})")]
    TooManyWeapons {
        kind: WeaponKind,
        count: usize,
        limit: usize,
    },
    #[error("{count} two-handed weapons equipped (limit {limit})")]
    TooManyTwoHanded { count: usize, limit: usize },
    #[error("{count} {kind} accessories equipped (limit {limit})")]
    TooManyAccessories {
        kind: AccessoryKind,
        count: usize,
        limit: usize,
    },
    #[error("{count} armor pieces equipped (limit 1)")]
    TooManyArmor { count: usize },
    #[error("armor cannot be worn while Blade Dancer is equipped")]
    ArmorForbidden,
}

/// Per-sub-kind weapon cap, given the active unique effects.
///
/// Two-handed kinds are not capped here; they share a group rule.
fn weapon_limit(kind: WeaponKind, effects: &EffectSet) -> usize {
    match kind {
        // Light one-handed and offhand kinds dual-equip unconditionally.
        WeaponKind::Sword | WeaponKind::Wand | WeaponKind::Shield => 2,
        WeaponKind::Dagger => {
            if effects.contains(SpecialEffect::BladeDancer) {
                4
            } else {
                1
            }
        }
        WeaponKind::Staff | WeaponKind::Bow => 1,
        // No per-kind cap; the shared two-handed group rule applies instead.
        WeaponKind::Greatsword | WeaponKind::Axe | WeaponKind::Spear => usize::MAX,
    }
}

/// Validates a loadout against the equip slot rules.
///
/// Returns `Ok(())` or the complete list of violations, never truncated to
/// the first. Violation order is deterministic: weapon sub-kinds in
/// [`WeaponKind::ALL`] order, then the two-handed group, then accessories,
/// then armor.
pub fn validate(cards: &[Card]) -> Result<(), Vec<Violation>> {
    let effects = EffectSet::from_cards(cards);
    let mut violations = Vec::new();

    for kind in WeaponKind::ALL {
        if kind.is_two_handed() {
            continue;
        }
        let count = cards
            .iter()
            .filter(|c| c.kind == CardKind::Weapon && c.weapon_kind == Some(kind))
            .count();
        let limit = weapon_limit(kind, &effects);
        if count > limit {
            violations.push(Violation::TooManyWeapons { kind, count, limit });
        }
    }

    // Greatswords, axes and spears share one pair of hands.
    let two_handed = cards
        .iter()
        .filter(|c| {
            c.kind == CardKind::Weapon && c.weapon_kind.is_some_and(|k| k.is_two_handed())
        })
        .count();
    let two_handed_limit = if effects.contains(SpecialEffect::TitansStrength) {
        2
    } else {
        1
    };
    if two_handed > two_handed_limit {
        violations.push(Violation::TooManyTwoHanded {
            count: two_handed,
            limit: two_handed_limit,
        });
    }

    for (kind, limit) in [(AccessoryKind::Ring, 2), (AccessoryKind::Amulet, 1)] {
        let count = cards
            .iter()
            .filter(|c| c.kind == CardKind::Accessory && c.accessory_kind == Some(kind))
            .count();
        if count > limit {
            violations.push(Violation::TooManyAccessories { kind, count, limit });
        }
    }

    let armor = cards.iter().filter(|c| c.kind == CardKind::Armor).count();
    if armor > 0 && effects.contains(SpecialEffect::BladeDancer) {
        violations.push(Violation::ArmorForbidden);
    } else if armor > 1 {
        violations.push(Violation::TooManyArmor { count: armor });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
