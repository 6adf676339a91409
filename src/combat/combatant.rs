//! Combatant runtime state.
//!
//! A [`Combatant`] wraps a [`DerivedStats`] snapshot plus everything that
//! only lives for one battle: current HP/mana, shield, rage, dodge-lock,
//! channel and DoT queues, pity counters. Both the player and enemies use
//! the same type; enemies simply carry an empty effect set, so every
//! effect-gated branch is a no-op for them.

use crate::cards::{Card, CardKind, EffectSet, SpecialEffect};
use crate::constants::*;
use crate::loadout::{aggregate, validate, AscensionSet, DerivedStats, Violation};

/// Kind of active channel. At most one channel is live at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Deals its damage every turn, first tick on cast.
    Continuous,
    /// Silent wind-up, then one area strike when the counter hits zero.
    Detonation,
}

/// An active channel: a counter and a damage, nothing more.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub kind: ChannelKind,
    pub turns_left: u32,
    pub damage: i32,
}

/// One independent damage-over-time effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub turns_left: u32,
    pub damage: i32,
}

/// Outcome of one resolved hit against a combatant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Damage after defense, guard halving and shield absorption reached HP.
    pub hp_damage: i32,
    /// Portion absorbed by the shield.
    pub absorbed: i32,
    /// Total damage dealt (HP damage plus absorbed).
    pub dealt: i32,
    /// The hit pushed the combatant to the 1-HP floor.
    pub defeated: bool,
}

/// A battle participant. Built from a loadout (player) or raw stats (enemy).
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub stats: DerivedStats,
    pub hp: i32,
    pub mana: i32,
    /// Active unique effects, recomputed once per equip.
    pub effects: EffectSet,
    /// Spell cards in loadout order.
    pub spells: Vec<Card>,
    /// Summed swing damage from equipped weapon cards.
    pub weapon_damage: i32,
    pub shield: i32,
    pub rage: u32,
    /// Set after a successful dodge; the next incoming hit cannot be dodged.
    pub dodge_lock: bool,
    /// Bulwark state: primed means the next incoming hit is halved.
    pub guard_primed: bool,
    pub stunned: bool,
    /// Bonus damage the next incoming hit consumes (impale wound).
    pub impale_mark: i32,
    pub channel: Option<Channel>,
    pub dots: Vec<Dot>,
    pub crit_pity: u8,
    pub dodge_pity: u8,
    /// Terminal state: escaped (player) or defeated (enemy). HP stays at 1.
    pub defeated: bool,
}

impl Combatant {
    /// Builds a combatant from raw stats. Used for generated enemies.
    pub fn from_stats(name: impl Into<String>, stats: DerivedStats) -> Self {
        Self {
            name: name.into(),
            stats,
            hp: stats.max_hp,
            mana: stats.max_mana,
            effects: EffectSet::new(),
            spells: Vec::new(),
            weapon_damage: 0,
            shield: 0,
            rage: 0,
            dodge_lock: false,
            guard_primed: false,
            stunned: false,
            impale_mark: 0,
            channel: None,
            dots: Vec::new(),
            crit_pity: 0,
            dodge_pity: 0,
            defeated: false,
        }
    }

    /// Builds a combatant from a validated loadout.
    pub fn from_loadout(
        name: &str,
        cards: &[Card],
        ascension: &AscensionSet,
    ) -> Result<Self, Vec<Violation>> {
        validate(cards)?;
        let stats = aggregate(cards, ascension);
        let mut combatant = Self::from_stats(name.to_string(), stats);
        combatant.effects = EffectSet::from_cards(cards);
        combatant.spells = cards.iter().filter(|c| c.is_spell()).cloned().collect();
        combatant.weapon_damage = weapon_damage(cards);
        Ok(combatant)
    }

    /// Replaces the loadout. On validation failure the prior stats stay
    /// authoritative and `self` is untouched.
    pub fn equip(&mut self, cards: &[Card], ascension: &AscensionSet) -> Result<(), Vec<Violation>> {
        validate(cards)?;
        self.stats = aggregate(cards, ascension);
        self.effects = EffectSet::from_cards(cards);
        self.spells = cards.iter().filter(|c| c.is_spell()).cloned().collect();
        self.weapon_damage = weapon_damage(cards);
        self.hp = self.hp.min(self.stats.max_hp);
        self.mana = self.mana.min(self.stats.max_mana);
        Ok(())
    }

    pub fn is_alive(&self) -> bool {
        !self.defeated
    }

    /// Physical swing damage: attack plus weapon damage plus rage bonus.
    pub fn attack_power(&self) -> i32 {
        self.stats.attack + self.weapon_damage + self.rage as i32 * RAGE_ATTACK_PER_STACK
    }

    /// Effective attack speed, including the War Drums rage bonus.
    pub fn speed(&self) -> f64 {
        let mut speed = self.stats.attack_speed;
        if self.effects.contains(SpecialEffect::WarDrums) {
            let blocks = self.rage / WAR_DRUMS_STACKS_PER_BLOCK;
            speed += blocks as f64 * WAR_DRUMS_SPEED_PER_BLOCK;
        }
        speed
    }

    /// Start-of-turn mana regeneration.
    pub fn regen_mana(&mut self) {
        self.mana = (self.mana + self.stats.mana_regen).min(self.stats.max_mana);
    }

    /// Rage builds only on successful physical hits, for rage-effect holders.
    pub fn gain_rage(&mut self) {
        if self.effects.contains(SpecialEffect::Bloodlust)
            || self.effects.contains(SpecialEffect::WarDrums)
        {
            self.rage = (self.rage + 1).min(RAGE_CAP);
        }
    }

    pub fn gain_shield(&mut self, amount: i32) {
        self.shield += amount.max(0);
    }

    /// Resolves an incoming hit through the damage pipeline:
    /// defense, guard halving, shield absorption, HP loss with the 1-HP
    /// escape floor.
    pub fn take_hit(&mut self, raw: i32) -> HitResult {
        let mut damage = (raw - self.stats.defense).max(1);

        if self.effects.contains(SpecialEffect::Bulwark) {
            if self.guard_primed {
                damage /= 2;
                self.guard_primed = false;
            } else {
                self.guard_primed = true;
            }
        }

        self.apply_damage(damage)
    }

    /// Applies damage that has already paid defense (DoT ticks). Shield and
    /// the escape floor still apply.
    pub fn take_direct(&mut self, damage: i32) -> HitResult {
        self.apply_damage(damage.max(0))
    }

    fn apply_damage(&mut self, damage: i32) -> HitResult {
        let absorbed = damage.min(self.shield);
        self.shield -= absorbed;
        let hp_damage = damage - absorbed;

        if hp_damage > 0 && self.hp - hp_damage <= ESCAPE_HP_FLOOR {
            self.hp = ESCAPE_HP_FLOOR;
            self.defeated = true;
        } else {
            self.hp -= hp_damage;
        }

        HitResult {
            hp_damage,
            absorbed,
            dealt: damage,
            defeated: self.defeated,
        }
    }

    /// Between-floor reset. HP and mana refill; transient battle state
    /// clears. Rage and shield persist only behind their dedicated effects,
    /// and a persisted shield is capped at 200% of max HP.
    pub fn reset_for_floor(&mut self) {
        self.hp = self.stats.max_hp;
        self.mana = self.stats.max_mana;
        self.defeated = false;
        self.dodge_lock = false;
        self.guard_primed = false;
        self.stunned = false;
        self.impale_mark = 0;
        self.channel = None;
        self.dots.clear();

        if !self.effects.contains(SpecialEffect::EndlessFury) {
            self.rage = 0;
        }
        if self.effects.contains(SpecialEffect::Aegis) {
            let cap = (self.stats.max_hp as f64 * AEGIS_SHIELD_CAP_RATIO) as i32;
            self.shield = self.shield.min(cap);
        } else {
            self.shield = 0;
        }
    }
}

/// Summed swing damage over every weapon card. Unique weapons count too —
/// the unique-class invariant covers the stat deltas, not the weapon's own
/// damage payload.
fn weapon_damage(cards: &[Card]) -> i32 {
    cards
        .iter()
        .filter(|c| c.kind == CardKind::Weapon)
        .map(|c| c.damage)
        .sum()
}
