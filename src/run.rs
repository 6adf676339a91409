//! One climb through the tower: floors fought in sequence until the player
//! escapes or clears the top.
//!
//! The run loop owns nothing permanent. It resets the player between floors,
//! spawns each floor's pack, drives the battle and folds the rewards into a
//! [`RunOutcome`] plus the caller's [`Progress`].

use crate::combat::{Battle, BattleState, Combatant};
use crate::constants::MAX_FLOORS;
use crate::events::EventSink;
use crate::progression::{bounty_for_floor, xp_for_floor, Progress};
use crate::tower;
use rand::Rng;

/// Everything a finished climb produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunOutcome {
    pub floors_cleared: u32,
    /// Highest floor cleared, zero when the very first floor ended the run.
    pub highest_floor: u32,
    /// The floor the player escaped from, None when the tower was cleared.
    pub escaped_at: Option<u32>,
    pub kills: u32,
    pub gold: u64,
    pub xp: u64,
    pub level_ups: u32,
}

/// A climb starting from a given floor.
#[derive(Debug, Clone, Copy)]
pub struct TowerRun {
    start_floor: u32,
}

impl Default for TowerRun {
    fn default() -> Self {
        Self::new()
    }
}

impl TowerRun {
    pub fn new() -> Self {
        Self { start_floor: 1 }
    }

    pub fn from_floor(start_floor: u32) -> Self {
        Self {
            start_floor: start_floor.clamp(1, MAX_FLOORS),
        }
    }

    /// Climbs floor by floor until escape or the top of the tower.
    ///
    /// Bounty gold is paid per kill even on the floor the run ends on; XP is
    /// paid only for cleared floors and is resolved into `progress`
    /// immediately.
    pub fn climb(
        &self,
        player: &mut Combatant,
        progress: &mut Progress,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        for floor in self.start_floor..=MAX_FLOORS {
            player.reset_for_floor();
            let mut battle = Battle::new(floor, tower::spawn_floor(floor, rng));
            let state = battle.run(player, rng, sink);

            outcome.kills += battle.kills();
            outcome.gold += battle.kills() as u64 * bounty_for_floor(floor);

            match state {
                BattleState::Won => {
                    outcome.floors_cleared += 1;
                    outcome.highest_floor = floor;
                    let xp = xp_for_floor(floor);
                    outcome.xp += xp;
                    outcome.level_ups += progress.gain_xp(xp);
                }
                BattleState::Escaped => {
                    outcome.escaped_at = Some(floor);
                    break;
                }
                BattleState::InProgress => unreachable!("battle run returned mid-fight"),
            }
        }

        outcome
    }
}
