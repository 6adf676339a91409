//! The combat core: combatant runtime, shared roll resolution, spell
//! dispatch and the per-turn battle engine.

pub mod combatant;
pub mod engine;
pub mod rolls;
pub mod spells;

pub use combatant::{Channel, ChannelKind, Combatant, Dot, HitResult};
pub use engine::{Battle, BattleState};
pub use spells::SpellShape;
