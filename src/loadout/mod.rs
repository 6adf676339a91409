//! Loadout aggregation and equip validation.

pub mod aggregator;
pub mod validator;

pub use aggregator::{aggregate, AscensionSet, AscensionTier, DerivedStats};
pub use validator::{validate, Violation};
