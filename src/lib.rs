//! Ascent: a card-driven, turn-based tower-combat rules engine.
//!
//! A player's build is an ordered list of cards. Equipping validates the
//! list as a whole, aggregation flattens it into derived stats, and the
//! combat engine drives floor battles against generated opponents, emitting
//! structured events instead of printing. Progression and persistence sit
//! on top of the run loop.

pub mod cards;
pub mod combat;
pub mod constants;
pub mod events;
pub mod loadout;
pub mod progression;
pub mod run;
pub mod save;
pub mod simulator;
pub mod tower;

pub use cards::{Card, CardClass, CardKind, SpecialEffect};
pub use combat::{Battle, BattleState, Combatant};
pub use events::{CombatEvent, EventLog, EventSink, NullSink};
pub use loadout::{aggregate, validate, AscensionSet, AscensionTier, DerivedStats, Violation};
pub use progression::Progress;
pub use run::{RunOutcome, TowerRun};
pub use save::{PlayerRecord, SaveError, SaveManager};
