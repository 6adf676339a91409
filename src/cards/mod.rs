//! Modifier records ("cards") and the static card catalog.

pub mod catalog;
pub mod types;

pub use types::{
    AccessoryKind, Card, CardClass, CardKind, EffectSet, SpawnCondition, SpecialEffect,
    StatDeltas, WeaponKind,
};
