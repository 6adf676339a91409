//! Shared roll resolution: dodge, crit, luck re-rolls and pity counters.
//!
//! Both sides use the same functions. All draws are uniform on 1..=100.
//! Dodge favors high rolls (success when roll > 100 - chance), crit favors
//! low rolls (success when roll <= chance); a luck proc grants a second main
//! roll and keeps whichever outcome favors the roller.

use crate::combat::combatant::Combatant;
use crate::constants::PITY_THRESHOLD;
use rand::Rng;

fn roll(rng: &mut impl Rng) -> i32 {
    rng.gen_range(1..=100)
}

/// Decides whether a best-of-two re-roll triggers.
///
/// With luck <= 0 there is no draw and no pity bookkeeping. Otherwise a
/// failed draw increments the pity counter; at [`PITY_THRESHOLD`] the next
/// opportunity triggers without drawing and the counter resets. A successful
/// draw also resets the counter.
pub fn luck_reroll(luck: i32, pity: &mut u8, rng: &mut impl Rng) -> bool {
    if luck <= 0 {
        return false;
    }
    if *pity >= PITY_THRESHOLD {
        *pity = 0;
        return true;
    }
    if roll(rng) <= luck {
        *pity = 0;
        true
    } else {
        *pity += 1;
        false
    }
}

/// Dodge check for an incoming weapon attack.
///
/// Returns true when the hit is fully negated. Dodge-lock is not touched
/// here: the engine sets it on success and clears it when a hit lands.
pub fn roll_dodge(defender: &mut Combatant, rng: &mut impl Rng) -> bool {
    if defender.dodge_lock {
        return false;
    }
    let chance = defender.stats.dodge_chance;
    if chance <= 0 {
        return false;
    }
    let reroll = luck_reroll(defender.stats.luck, &mut defender.dodge_pity, rng);
    let first = roll(rng);
    let best = if reroll { first.max(roll(rng)) } else { first };
    best > 100 - chance
}

/// Crit check for an outgoing weapon attack.
pub fn roll_crit(attacker: &mut Combatant, rng: &mut impl Rng) -> bool {
    let chance = attacker.stats.crit_chance;
    if chance <= 0 {
        return false;
    }
    let reroll = luck_reroll(attacker.stats.luck, &mut attacker.crit_pity, rng);
    let first = roll(rng);
    let best = if reroll { first.min(roll(rng)) } else { first };
    best <= chance
}

/// Actions this combatant takes in one turn: the integer part of its speed,
/// plus one more with probability equal to the fractional part.
pub fn action_count(speed: f64, rng: &mut impl Rng) -> u32 {
    let base = speed.max(0.0).floor();
    let frac = speed.max(0.0) - base;
    let extra = frac > 0.0 && rng.gen_range(0.0..1.0) < frac;
    base as u32 + u32::from(extra)
}
