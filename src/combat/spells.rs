//! Spell dispatch: one damage-shape per named spell effect.
//!
//! The table is data, not logic — the engine interprets the shape. Mana is
//! paid up front; Blood Magic converts a shortfall from HP without ever
//! driving HP to the escape floor.

use crate::cards::SpecialEffect;
use crate::combat::combatant::Combatant;
use crate::constants::{BLOOD_MAGIC_HP_PER_MANA, ESCAPE_HP_FLOOR};

/// The damage shape a spell resolves through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpellShape {
    /// One hit, front target.
    SingleInstant,
    /// N sequential hits at a reduced per-hit multiplier, consuming targets
    /// as they fall.
    FixedMultiHit { hits: u32, per_hit: f64 },
    /// One hit applied to every current opponent.
    Area,
    /// K turns of per-turn damage; locks the caster; first tick on cast.
    ContinuousChannel { turns: u32, per_turn: f64 },
    /// K turns of nothing, then one area hit.
    DelayedDetonation { delay: u32 },
    /// One hit now, then N additional ticks.
    InstantPlusDot { ticks: u32, per_tick: f64 },
}

/// Maps a spell's dispatch key to its shape. Non-spell effects map to None.
pub fn spell_shape(effect: SpecialEffect) -> Option<SpellShape> {
    match effect {
        SpecialEffect::Fireball => Some(SpellShape::SingleInstant),
        SpecialEffect::ArcaneBarrage => Some(SpellShape::FixedMultiHit {
            hits: 3,
            per_hit: 0.6,
        }),
        SpecialEffect::FrostNova => Some(SpellShape::Area),
        SpecialEffect::ArcaneTorrent => Some(SpellShape::ContinuousChannel {
            turns: 3,
            per_turn: 0.8,
        }),
        SpecialEffect::Meteor => Some(SpellShape::DelayedDetonation { delay: 2 }),
        SpecialEffect::Immolate => Some(SpellShape::InstantPlusDot {
            ticks: 3,
            per_tick: 0.4,
        }),
        _ => None,
    }
}

/// Resources consumed by a successful cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastCost {
    pub mana: i32,
    pub hp: i32,
}

/// Attempts to pay a spell's mana cost, converting any shortfall from HP
/// when Blood Magic is active. Returns None (and leaves the caster
/// untouched) when neither resource suffices; the action slot then falls
/// through to an ordinary attack.
pub fn pay_cast_cost(caster: &mut Combatant, cost: i32) -> Option<CastCost> {
    if caster.mana >= cost {
        caster.mana -= cost;
        return Some(CastCost { mana: cost, hp: 0 });
    }

    if !caster.effects.contains(SpecialEffect::BloodMagic) {
        return None;
    }

    let shortfall = cost - caster.mana;
    let hp_cost = shortfall * BLOOD_MAGIC_HP_PER_MANA;
    if caster.hp - hp_cost <= ESCAPE_HP_FLOOR {
        return None;
    }

    let mana_spent = caster.mana;
    caster.mana = 0;
    caster.hp -= hp_cost;
    Some(CastCost {
        mana: mana_spent,
        hp: hp_cost,
    })
}

/// Base spell power before shaping: caster magic attack plus the card's own
/// damage.
pub fn spell_power(magic_attack: i32, card_damage: i32) -> i32 {
    (magic_attack + card_damage).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::catalog;
    use crate::loadout::{AscensionSet, DerivedStats};

    #[test]
    fn test_every_spell_key_has_a_shape() {
        for card in [
            catalog::fireball(),
            catalog::arcane_barrage(),
            catalog::frost_nova(),
            catalog::arcane_torrent(),
            catalog::meteor(),
            catalog::immolate(),
        ] {
            assert!(
                spell_shape(card.special_effect.unwrap()).is_some(),
                "{} has no shape",
                card.name
            );
        }
    }

    #[test]
    fn test_passive_effects_are_not_spells() {
        assert_eq!(spell_shape(SpecialEffect::TitansStrength), None);
        assert_eq!(spell_shape(SpecialEffect::Bulwark), None);
    }

    #[test]
    fn test_pay_cost_from_mana() {
        let mut c = Combatant::from_stats("C".to_string(), DerivedStats::base());
        let paid = pay_cast_cost(&mut c, 20).unwrap();
        assert_eq!(paid, CastCost { mana: 20, hp: 0 });
        assert_eq!(c.mana, 30);
    }

    #[test]
    fn test_insufficient_mana_without_blood_magic_fails() {
        let mut c = Combatant::from_stats("C".to_string(), DerivedStats::base());
        c.mana = 5;
        assert!(pay_cast_cost(&mut c, 20).is_none());
        assert_eq!(c.mana, 5);
    }

    #[test]
    fn test_blood_magic_covers_shortfall_from_hp() {
        let mut c =
            Combatant::from_loadout("C", &[catalog::blood_pact()], &AscensionSet::new()).unwrap();
        c.mana = 5;
        let paid = pay_cast_cost(&mut c, 20).unwrap();
        // 15 missing mana at 2 HP each.
        assert_eq!(paid, CastCost { mana: 5, hp: 30 });
        assert_eq!(c.mana, 0);
        assert_eq!(c.hp, c.stats.max_hp - 30);
    }

    #[test]
    fn test_blood_magic_never_reaches_escape_floor() {
        let mut c =
            Combatant::from_loadout("C", &[catalog::blood_pact()], &AscensionSet::new()).unwrap();
        c.mana = 0;
        c.hp = 40;
        // 20 mana short = 40 HP, which would land exactly on 0 — refused.
        assert!(pay_cast_cost(&mut c, 20).is_none());
        assert_eq!(c.hp, 40);
        assert!(c.is_alive());

        // Leaves at least 2 HP: 19 short = 38 HP, 40 - 38 = 2 > floor.
        let paid = pay_cast_cost(&mut c, 19).unwrap();
        assert_eq!(paid.hp, 38);
        assert_eq!(c.hp, 2);
        assert!(c.is_alive());
    }
}
