//! Meta-progression math: floor XP, level thresholds and kill bounties.

use crate::constants::{BOUNTY_BASE, FLOOR_XP_BASE, FLOOR_XP_GROWTH};
use serde::{Deserialize, Serialize};

/// XP awarded for clearing a floor: 100 at floor 1, growing 10% per floor.
pub fn xp_for_floor(floor: u32) -> u64 {
    let scaled = FLOOR_XP_BASE * FLOOR_XP_GROWTH.powi(floor.saturating_sub(1) as i32);
    scaled.floor() as u64
}

/// XP needed to go from `level` to `level + 1`. Quadratic with a step bonus
/// every ten levels.
pub fn level_threshold(level: u32) -> u64 {
    let level = level as u64;
    level * level * 1000 + (level / 10) * 10000
}

/// Gold paid per opponent defeated on a floor.
pub fn bounty_for_floor(floor: u32) -> u64 {
    BOUNTY_BASE + floor as u64 / 2
}

/// Level and banked XP. Gained XP is consumed by level-ups; the remainder
/// carries toward the next threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub xp: u64,
}

impl Default for Progress {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Progress {
    /// Banks XP and resolves every level-up it affords. Returns how many
    /// levels were gained.
    pub fn gain_xp(&mut self, gained: u64) -> u32 {
        self.xp += gained;
        let mut ups = 0;
        while self.xp >= level_threshold(self.level) {
            self.xp -= level_threshold(self.level);
            self.level += 1;
            ups += 1;
        }
        ups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_xp_compounds() {
        assert_eq!(xp_for_floor(1), 100);
        assert_eq!(xp_for_floor(2), 110);
        assert_eq!(xp_for_floor(3), 121);
        // floor(100 × 1.1^9)
        assert_eq!(xp_for_floor(10), 235);
    }

    #[test]
    fn test_level_threshold_step_bonus() {
        assert_eq!(level_threshold(1), 1000);
        assert_eq!(level_threshold(2), 4000);
        assert_eq!(level_threshold(9), 81000);
        // Step bonus kicks in at level 10.
        assert_eq!(level_threshold(10), 110_000);
        assert_eq!(level_threshold(25), 645_000);
    }

    #[test]
    fn test_bounty_scales_with_floor() {
        assert_eq!(bounty_for_floor(1), 5);
        assert_eq!(bounty_for_floor(2), 6);
        assert_eq!(bounty_for_floor(100), 55);
    }

    #[test]
    fn test_gain_xp_consumes_thresholds() {
        let mut p = Progress::default();
        assert_eq!(p.gain_xp(999), 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.xp, 999);

        // 1 more crosses level 1's threshold; remainder carries over.
        assert_eq!(p.gain_xp(501), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp, 500);
    }

    #[test]
    fn test_gain_xp_resolves_multiple_levels() {
        let mut p = Progress::default();
        // 1000 + 4000 + a bit.
        let ups = p.gain_xp(5200);
        assert_eq!(ups, 2);
        assert_eq!(p.level, 3);
        assert_eq!(p.xp, 200);
    }
}
