//! Structured combat observation events.
//!
//! The engine never prints. Every observable outcome is emitted as a
//! [`CombatEvent`] to a caller-supplied [`EventSink`]; a presentation layer
//! decides whether and how to render them, and tests collect them with
//! [`EventLog`].

use crate::cards::SpecialEffect;

/// A single observable combat outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    /// A new turn began.
    TurnStarted { turn: u32 },

    /// A weapon attack landed.
    AttackLanded {
        attacker: String,
        defender: String,
        damage: i32,
        was_crit: bool,
    },

    /// A weapon attack was fully dodged.
    AttackDodged { attacker: String, defender: String },

    /// A spell was cast, with the resources it consumed.
    SpellCast {
        caster: String,
        spell: SpecialEffect,
        mana_spent: i32,
        hp_spent: i32,
    },

    /// One spell-shaped hit resolved against a target.
    SpellHit {
        caster: String,
        target: String,
        damage: i32,
    },

    /// A continuous channel dealt its per-turn damage.
    ChannelTick { caster: String, damage: i32 },

    /// A delayed detonation went off, striking every opponent.
    Detonated { caster: String, damage: i32 },

    /// A damage-over-time effect ticked.
    DotTick { target: String, damage: i32 },

    /// A shield absorbed part of a hit.
    ShieldAbsorbed { defender: String, amount: i32 },

    /// A combatant was stunned and will skip its next action phase.
    Stunned { target: String },

    /// An opponent was removed from the battle; bounty is owed.
    CombatantDefeated { name: String, bounty: u64 },

    /// All opponents on the floor are down; XP is owed.
    FloorCleared { floor: u32, xp: u64 },

    /// The player hit the 1-HP floor and escaped the tower.
    EscapedAtFloor { floor: u32 },
}

/// Consumer of combat events. The engine emits, the caller renders.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

/// Discards every event. The headless equivalent of a quiet flag.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: CombatEvent) {}
}

/// Collects events in order. Used by tests and the simulator's verbose mode.
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of events matching a predicate.
    pub fn count_where(&self, pred: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }
}
