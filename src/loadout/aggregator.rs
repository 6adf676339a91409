//! Loadout aggregation: a flat card list in, one `DerivedStats` out.
//!
//! Aggregation runs in four steps: sum the deltas of every plain card onto
//! the engine base values, apply unique-effect overrides in a fixed priority
//! order, apply ascension-tier overrides, then clamp. The function is pure —
//! re-running it on the same loadout always yields the same stats.

use crate::cards::{Card, EffectSet, SpecialEffect};
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// The flattened numeric outcome of aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub max_mana: i32,
    pub mana_regen: i32,
    pub crit_chance: i32,
    pub crit_damage: f64,
    pub dodge_chance: i32,
    pub attack_speed: f64,
    pub luck: i32,
}

impl DerivedStats {
    /// Engine base values before any card contributes.
    pub fn base() -> Self {
        Self {
            max_hp: BASE_HP,
            attack: BASE_ATTACK,
            defense: BASE_DEFENSE,
            magic_attack: BASE_MAGIC_ATTACK,
            max_mana: BASE_MANA,
            mana_regen: BASE_MANA_REGEN,
            crit_chance: BASE_CRIT_CHANCE,
            crit_damage: BASE_CRIT_DAMAGE,
            dodge_chance: BASE_DODGE_CHANCE,
            attack_speed: BASE_ATTACK_SPEED,
            luck: BASE_LUCK,
        }
    }
}

/// Ascension tiers: a small set of always-on overrides tracked separately
/// from the card list, applied after unique-card overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AscensionTier {
    Vigor,
    Ferocity,
    Clarity,
    Fortune,
}

/// The ascension tiers a player has equipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AscensionSet(Vec<AscensionTier>);

impl AscensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(tiers: &[AscensionTier]) -> Self {
        Self(tiers.to_vec())
    }

    pub fn contains(&self, tier: AscensionTier) -> bool {
        self.0.contains(&tier)
    }

    pub fn tiers(&self) -> &[AscensionTier] {
        &self.0
    }
}

/// Aggregates an ordered loadout into derived stats.
///
/// Only cards whose class is not unique/spell contribute to the sum; unique
/// cards act purely through their override, applied afterwards in a fixed
/// engine-defined order independent of list order.
pub fn aggregate(cards: &[Card], ascension: &AscensionSet) -> DerivedStats {
    let mut stats = DerivedStats::base();

    for card in cards.iter().filter(|c| c.contributes_to_sum()) {
        let d = &card.deltas;
        stats.max_hp += d.hp;
        stats.attack += d.attack;
        stats.defense += d.defense;
        stats.magic_attack += d.magic_attack;
        stats.max_mana += d.mana;
        stats.mana_regen += d.mana_regen;
        stats.crit_chance += d.crit_chance;
        stats.crit_damage += d.crit_damage;
        stats.dodge_chance += d.dodge_chance;
        stats.attack_speed += d.attack_speed;
        stats.luck += d.luck;
    }

    let effects = EffectSet::from_cards(cards);
    apply_unique_overrides(&mut stats, &effects);
    apply_ascension_overrides(&mut stats, ascension);
    clamp(&mut stats);
    stats
}

/// Applies unique-effect overrides in the fixed priority order:
///
/// 1. `ArcaneAscendance` — attack zeroed, magic attack ×1.5
/// 2. `GlassCannon` — defense zeroed, attack ×2
/// 3. `WindSpirit` — attack speed ×1.5
/// 4. `IronPact` — speed bonus-over-base halved, defense ×2
///
/// The order is load-bearing: zeroing effects run before multipliers so the
/// multiplied value is the zeroed one, and `IronPact` reads the speed bonus
/// after `WindSpirit` has multiplied it.
fn apply_unique_overrides(stats: &mut DerivedStats, effects: &EffectSet) {
    if effects.contains(SpecialEffect::ArcaneAscendance) {
        stats.attack = 0;
        stats.magic_attack = (stats.magic_attack as f64 * 1.5) as i32;
    }
    if effects.contains(SpecialEffect::GlassCannon) {
        stats.defense = 0;
        stats.attack *= 2;
    }
    if effects.contains(SpecialEffect::WindSpirit) {
        stats.attack_speed *= 1.5;
    }
    if effects.contains(SpecialEffect::IronPact) {
        let bonus = stats.attack_speed - BASE_ATTACK_SPEED;
        stats.attack_speed = BASE_ATTACK_SPEED + bonus / 2.0;
        stats.defense *= 2;
    }
}

fn apply_ascension_overrides(stats: &mut DerivedStats, ascension: &AscensionSet) {
    if ascension.contains(AscensionTier::Vigor) {
        stats.max_hp = (stats.max_hp as f64 * ASCENSION_VIGOR_HP_MULT) as i32;
    }
    if ascension.contains(AscensionTier::Ferocity) {
        stats.attack = (stats.attack as f64 * ASCENSION_FEROCITY_ATTACK_MULT) as i32;
    }
    if ascension.contains(AscensionTier::Clarity) {
        stats.max_mana = (stats.max_mana as f64 * ASCENSION_CLARITY_MANA_MULT) as i32;
        stats.mana_regen = (stats.mana_regen as f64 * ASCENSION_CLARITY_MANA_MULT) as i32;
    }
    if ascension.contains(AscensionTier::Fortune) {
        stats.luck += ASCENSION_FORTUNE_LUCK;
    }
}

/// Every stat floors at zero regardless of how negative the deltas were.
fn clamp(stats: &mut DerivedStats) {
    stats.max_hp = stats.max_hp.max(0);
    stats.attack = stats.attack.max(0);
    stats.defense = stats.defense.max(0);
    stats.magic_attack = stats.magic_attack.max(0);
    stats.max_mana = stats.max_mana.max(0);
    stats.mana_regen = stats.mana_regen.max(0);
    stats.crit_chance = stats.crit_chance.max(0);
    stats.crit_damage = stats.crit_damage.max(0.0);
    stats.dodge_chance = stats.dodge_chance.max(0);
    stats.attack_speed = stats.attack_speed.max(0.0);
    stats.luck = stats.luck.max(0);
}
