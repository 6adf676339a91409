//! Engine-wide balance constants.
//!
//! Base stats and caps live here so the aggregator, combat engine and tests
//! all read from one place.

// ── Base combatant stats ─────────────────────────────────────────────

/// Base maximum HP before any card bonuses.
pub const BASE_HP: i32 = 100;
/// Base physical attack.
pub const BASE_ATTACK: i32 = 10;
/// Base defense.
pub const BASE_DEFENSE: i32 = 5;
/// Base magic attack.
pub const BASE_MAGIC_ATTACK: i32 = 10;
/// Base maximum mana.
pub const BASE_MANA: i32 = 50;
/// Mana regenerated at the start of every turn.
pub const BASE_MANA_REGEN: i32 = 5;
/// Base critical hit chance (percent, rolled on 1..=100).
pub const BASE_CRIT_CHANCE: i32 = 5;
/// Base critical damage multiplier.
pub const BASE_CRIT_DAMAGE: f64 = 1.5;
/// Base dodge chance (percent, rolled on 1..=100).
pub const BASE_DODGE_CHANCE: i32 = 5;
/// Base attacks per turn. The fractional part is a probabilistic extra swing.
pub const BASE_ATTACK_SPEED: f64 = 1.0;
/// Base luck. Zero means no best-of-two re-rolls.
pub const BASE_LUCK: i32 = 0;

// ── Combat state caps ────────────────────────────────────────────────

/// HP floor that triggers auto-escape instead of death.
pub const ESCAPE_HP_FLOOR: i32 = 1;
/// Maximum rage stacks.
pub const RAGE_CAP: u32 = 50;
/// Flat attack bonus per rage stack.
pub const RAGE_ATTACK_PER_STACK: i32 = 1;
/// War Drums grants attack speed per full block of rage stacks.
pub const WAR_DRUMS_STACKS_PER_BLOCK: u32 = 10;
/// Attack speed granted per full War Drums block.
pub const WAR_DRUMS_SPEED_PER_BLOCK: f64 = 0.1;
/// Failed luck draws before the next re-roll is guaranteed.
pub const PITY_THRESHOLD: u8 = 7;
/// Shield cap with the Aegis persistence effect, as a multiple of max HP.
pub const AEGIS_SHIELD_CAP_RATIO: f64 = 2.0;
/// Shield granted per kill by Soul Harvest, as a fraction of max HP.
pub const SOUL_HARVEST_SHIELD_RATIO: f64 = 0.25;
/// Impale mark left on the target, as a fraction of physical damage dealt.
pub const IMPALE_MARK_RATIO: f64 = 0.3;
/// Stun chance (percent) for the Concussion effect.
pub const CONCUSSION_STUN_CHANCE: i32 = 20;
/// Spellblade bonus magic hit, as a fraction of physical damage dealt.
pub const SPELLBLADE_RATIO: f64 = 0.3;
/// Blood Magic converts mana shortfall to HP at this rate.
pub const BLOOD_MAGIC_HP_PER_MANA: i32 = 2;

// ── Tower shape ──────────────────────────────────────────────────────

/// Total floors in the tower.
pub const MAX_FLOORS: u32 = 1000;
/// One extra enemy per this many floors.
pub const ENEMY_COUNT_FLOOR_STEP: u32 = 100;
/// Enemy count cap per floor.
pub const MAX_ENEMIES_PER_FLOOR: u32 = 5;
/// Enemy name tier changes every this many floors.
pub const ENEMY_TIER_FLOOR_STEP: u32 = 200;
/// Enemies gain attack speed per this many floors.
pub const ENEMY_SPEED_FLOOR_STEP: u32 = 200;
/// Attack speed gained per enemy speed step.
pub const ENEMY_SPEED_PER_STEP: f64 = 0.1;

// ── Ascension tiers ──────────────────────────────────────────────────

/// Vigor: max HP multiplier.
pub const ASCENSION_VIGOR_HP_MULT: f64 = 1.10;
/// Ferocity: attack multiplier.
pub const ASCENSION_FEROCITY_ATTACK_MULT: f64 = 1.10;
/// Clarity: max mana and mana regen multiplier.
pub const ASCENSION_CLARITY_MANA_MULT: f64 = 1.20;
/// Fortune: flat luck bonus.
pub const ASCENSION_FORTUNE_LUCK: i32 = 5;

// ── Progression ──────────────────────────────────────────────────────

/// Base XP for clearing floor 1; grows 10% per floor.
pub const FLOOR_XP_BASE: f64 = 100.0;
/// Per-floor XP growth factor.
pub const FLOOR_XP_GROWTH: f64 = 1.1;
/// Base gold bounty per defeated opponent, before the floor bonus.
pub const BOUNTY_BASE: u64 = 5;

// ── Persistence ──────────────────────────────────────────────────────

/// Save file version magic. Bump when the save layout changes.
pub const SAVE_VERSION_MAGIC: u64 = 0x4153_4345_4E54_0001;
