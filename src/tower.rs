//! Tower floor generation.
//!
//! Each floor spawns a small pack of opponents scaled by the floor number.
//! Archetypes trade bulk against damage; the prefix tier is cosmetic and
//! tracks the 200-floor bands the stat scaling moves through.

use crate::combat::Combatant;
use crate::constants::{
    ENEMY_COUNT_FLOOR_STEP, ENEMY_SPEED_FLOOR_STEP, ENEMY_SPEED_PER_STEP, ENEMY_TIER_FLOOR_STEP,
    MAX_ENEMIES_PER_FLOOR, MAX_FLOORS,
};
use crate::loadout::DerivedStats;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

const ENEMY_HP_BASE: f64 = 50.0;
const ENEMY_HP_PER_FLOOR: f64 = 2.5;
const ENEMY_ATTACK_BASE: f64 = 8.0;
const ENEMY_ATTACK_PER_FLOOR: f64 = 1.2;
const ENEMY_DEFENSE_BASE: f64 = 3.0;
const ENEMY_DEFENSE_PER_FLOOR: f64 = 0.8;

/// The opponent archetypes the tower draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Slime,
    Goblin,
    Skeleton,
    Wraith,
    Golem,
    Vampire,
    Demon,
    Dragon,
}

impl Archetype {
    pub const ALL: [Archetype; 8] = [
        Archetype::Slime,
        Archetype::Goblin,
        Archetype::Skeleton,
        Archetype::Wraith,
        Archetype::Golem,
        Archetype::Vampire,
        Archetype::Demon,
        Archetype::Dragon,
    ];

    fn hp_factor(self) -> f64 {
        match self {
            Archetype::Slime => 1.2,
            Archetype::Goblin => 0.8,
            Archetype::Skeleton => 1.0,
            Archetype::Wraith => 0.9,
            Archetype::Golem => 1.5,
            Archetype::Vampire => 1.1,
            Archetype::Demon => 1.0,
            Archetype::Dragon => 1.3,
        }
    }

    fn attack_factor(self) -> f64 {
        match self {
            Archetype::Slime => 0.7,
            Archetype::Goblin => 1.1,
            Archetype::Skeleton => 1.0,
            Archetype::Wraith => 1.1,
            Archetype::Golem => 0.8,
            Archetype::Vampire => 1.2,
            Archetype::Demon => 1.4,
            Archetype::Dragon => 1.3,
        }
    }

    fn defense_factor(self) -> f64 {
        match self {
            Archetype::Slime => 0.8,
            Archetype::Goblin => 0.6,
            Archetype::Skeleton => 1.2,
            Archetype::Wraith => 0.5,
            Archetype::Golem => 1.8,
            Archetype::Vampire => 1.0,
            Archetype::Demon => 1.1,
            Archetype::Dragon => 1.4,
        }
    }

    fn dodge_chance(self) -> i32 {
        match self {
            Archetype::Wraith => 10,
            _ => 0,
        }
    }

    fn crit_chance(self) -> i32 {
        match self {
            Archetype::Vampire | Archetype::Demon => 10,
            _ => 0,
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Archetype::Slime => "Slime",
            Archetype::Goblin => "Goblin",
            Archetype::Skeleton => "Skeleton",
            Archetype::Wraith => "Wraith",
            Archetype::Golem => "Golem",
            Archetype::Vampire => "Vampire",
            Archetype::Demon => "Demon",
            Archetype::Dragon => "Dragon",
        };
        f.write_str(s)
    }
}

/// Cosmetic name prefix for the 200-floor band a floor sits in.
fn tier_prefix(floor: u32) -> &'static str {
    const TIERS: [&str; 6] = ["Lesser", "Common", "Greater", "Elite", "Ancient", "Legendary"];
    let idx = (floor / ENEMY_TIER_FLOOR_STEP).min(TIERS.len() as u32 - 1) as usize;
    TIERS[idx]
}

/// How many opponents a floor spawns: one more per hundred floors, capped.
pub fn enemy_count(floor: u32) -> u32 {
    (1 + floor / ENEMY_COUNT_FLOOR_STEP).min(MAX_ENEMIES_PER_FLOOR)
}

/// Builds one opponent of the given archetype scaled to the floor.
pub fn spawn_enemy(floor: u32, archetype: Archetype) -> Combatant {
    let stats = DerivedStats {
        max_hp: ((ENEMY_HP_BASE + floor as f64 * ENEMY_HP_PER_FLOOR) * archetype.hp_factor())
            as i32,
        attack: ((ENEMY_ATTACK_BASE + floor as f64 * ENEMY_ATTACK_PER_FLOOR)
            * archetype.attack_factor()) as i32,
        defense: ((ENEMY_DEFENSE_BASE + floor as f64 * ENEMY_DEFENSE_PER_FLOOR)
            * archetype.defense_factor()) as i32,
        magic_attack: 0,
        max_mana: 0,
        mana_regen: 0,
        crit_chance: archetype.crit_chance(),
        crit_damage: 1.5,
        dodge_chance: archetype.dodge_chance(),
        attack_speed: 1.0 + (floor / ENEMY_SPEED_FLOOR_STEP) as f64 * ENEMY_SPEED_PER_STEP,
        luck: 0,
    };
    Combatant::from_stats(format!("{} {}", tier_prefix(floor), archetype), stats)
}

/// Rolls a full floor's opponent pack.
pub fn spawn_floor(floor: u32, rng: &mut impl Rng) -> Vec<Combatant> {
    debug_assert!((1..=MAX_FLOORS).contains(&floor));
    (0..enemy_count(floor))
        .map(|_| {
            let archetype = *Archetype::ALL
                .choose(rng)
                .unwrap_or(&Archetype::Slime);
            spawn_enemy(floor, archetype)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_enemy_count_grows_then_caps() {
        assert_eq!(enemy_count(1), 1);
        assert_eq!(enemy_count(99), 1);
        assert_eq!(enemy_count(100), 2);
        assert_eq!(enemy_count(400), 5);
        assert_eq!(enemy_count(999), 5);
    }

    #[test]
    fn test_tier_prefix_bands() {
        assert_eq!(tier_prefix(1), "Lesser");
        assert_eq!(tier_prefix(199), "Lesser");
        assert_eq!(tier_prefix(200), "Common");
        assert_eq!(tier_prefix(600), "Elite");
        assert_eq!(tier_prefix(1000), "Legendary");
    }

    #[test]
    fn test_floor_one_golem_stats() {
        let golem = spawn_enemy(1, Archetype::Golem);
        assert_eq!(golem.stats.max_hp, ((50.0 + 2.5) * 1.5) as i32);
        assert_eq!(golem.stats.attack, ((8.0 + 1.2) * 0.8) as i32);
        assert_eq!(golem.stats.defense, ((3.0 + 0.8) * 1.8) as i32);
        assert_eq!(golem.name, "Lesser Golem");
    }

    #[test]
    fn test_stats_scale_with_floor() {
        let low = spawn_enemy(10, Archetype::Dragon);
        let high = spawn_enemy(500, Archetype::Dragon);
        assert!(high.stats.max_hp > low.stats.max_hp);
        assert!(high.stats.attack > low.stats.attack);
        assert!(high.stats.defense > low.stats.defense);
        assert!(high.stats.attack_speed > low.stats.attack_speed);
    }

    #[test]
    fn test_archetype_roll_traits() {
        assert_eq!(spawn_enemy(1, Archetype::Wraith).stats.dodge_chance, 10);
        assert_eq!(spawn_enemy(1, Archetype::Vampire).stats.crit_chance, 10);
        let skeleton = spawn_enemy(1, Archetype::Skeleton);
        assert_eq!(skeleton.stats.dodge_chance, 0);
        assert_eq!(skeleton.stats.crit_chance, 0);
        assert_eq!(skeleton.stats.luck, 0);
    }

    #[test]
    fn test_spawn_floor_is_seed_deterministic() {
        let first: Vec<String> = spawn_floor(250, &mut ChaCha8Rng::seed_from_u64(9))
            .into_iter()
            .map(|c| c.name)
            .collect();
        let second: Vec<String> = spawn_floor(250, &mut ChaCha8Rng::seed_from_u64(9))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }
}
