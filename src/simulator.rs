//! Headless balance simulator.
//!
//! Runs many seeded climbs with a fixed deck and aggregates where they end.
//! Used to sanity-check card balance without a frontend.

use crate::cards::{catalog, Card};
use crate::combat::Combatant;
use crate::events::NullSink;
use crate::loadout::{AscensionSet, Violation};
use crate::progression::Progress;
use crate::run::{RunOutcome, TowerRun};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Simulation parameters.
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_runs: u32,
    /// Fixed seed for reproducible batches; None draws from entropy.
    pub seed: Option<u64>,
    pub deck: Vec<Card>,
    pub ascension: AscensionSet,
    pub start_floor: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            deck: catalog::starter_deck(),
            ascension: AscensionSet::new(),
            start_floor: 1,
        }
    }
}

/// Aggregated results over a batch of climbs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub runs: u32,
    pub mean_floor: f64,
    pub median_floor: u32,
    pub best_floor: u32,
    pub worst_floor: u32,
    pub mean_kills: f64,
    pub mean_gold: f64,
    pub mean_final_level: f64,
}

impl SimReport {
    fn from_outcomes(outcomes: &[(RunOutcome, Progress)]) -> Self {
        let runs = outcomes.len() as u32;
        let runs_f = runs as f64;
        let mut floors: Vec<u32> = outcomes.iter().map(|(o, _)| o.highest_floor).collect();
        floors.sort_unstable();

        Self {
            runs,
            mean_floor: floors.iter().map(|&f| f as f64).sum::<f64>() / runs_f,
            median_floor: floors[floors.len() / 2],
            best_floor: *floors.last().unwrap_or(&0),
            worst_floor: *floors.first().unwrap_or(&0),
            mean_kills: outcomes.iter().map(|(o, _)| o.kills as f64).sum::<f64>() / runs_f,
            mean_gold: outcomes.iter().map(|(o, _)| o.gold as f64).sum::<f64>() / runs_f,
            mean_final_level: outcomes.iter().map(|(_, p)| p.level as f64).sum::<f64>()
                / runs_f,
        }
    }

    pub fn to_text(&self) -> String {
        format!(
            "Results over {} runs:\n\
             \x20 Highest floor:  mean {:.1}, median {}, best {}, worst {}\n\
             \x20 Kills per run:  {:.1}\n\
             \x20 Gold per run:   {:.1}\n\
             \x20 Final level:    {:.2}",
            self.runs,
            self.mean_floor,
            self.median_floor,
            self.best_floor,
            self.worst_floor,
            self.mean_kills,
            self.mean_gold,
            self.mean_final_level,
        )
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Runs the configured batch. Fails up front if the deck is not equippable.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, Vec<Violation>> {
    // Validate once; every run reuses the same deck.
    Combatant::from_loadout("Sim", &config.deck, &config.ascension)?;

    let mut seed_rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let run = TowerRun::from_floor(config.start_floor);
    let mut outcomes = Vec::with_capacity(config.num_runs as usize);

    for _ in 0..config.num_runs.max(1) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed_rng.gen());
        let mut player = Combatant::from_loadout("Sim", &config.deck, &config.ascension)?;
        let mut progress = Progress::default();
        let outcome = run.climb(&mut player, &mut progress, &mut rng, &mut NullSink);
        outcomes.push((outcome, progress));
    }

    Ok(SimReport::from_outcomes(&outcomes))
}
