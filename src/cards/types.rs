//! Card data model.
//!
//! A [`Card`] is an immutable modifier record: numeric stat deltas plus an
//! optional named special effect. Cards never contain behavior — unique
//! effects and spells are dispatch keys resolved by the aggregator and the
//! spell resolver.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Coarse card kind. Drives equip-slot grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Weapon,
    Armor,
    Accessory,
    Spell,
    Passive,
    Consumable,
}

/// How a card contributes to derived stats.
///
/// `Stat` and `Equipment` cards contribute through the plain-sum path.
/// `Unique` cards contribute only through their override function and
/// `Spell` cards only through the spell resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardClass {
    Stat,
    Unique,
    Equipment,
    Spell,
}

/// Weapon sub-kind, used only by the equip validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Sword,
    Dagger,
    Greatsword,
    Axe,
    Spear,
    Staff,
    Wand,
    Bow,
    Shield,
}

impl WeaponKind {
    /// All sub-kinds, in the order the validator reports violations.
    pub const ALL: [WeaponKind; 9] = [
        WeaponKind::Sword,
        WeaponKind::Dagger,
        WeaponKind::Greatsword,
        WeaponKind::Axe,
        WeaponKind::Spear,
        WeaponKind::Staff,
        WeaponKind::Wand,
        WeaponKind::Bow,
        WeaponKind::Shield,
    ];

    /// Two-handed weapons share one dual-wield rule (Titan's Strength).
    pub fn is_two_handed(self) -> bool {
        matches!(
            self,
            WeaponKind::Greatsword | WeaponKind::Axe | WeaponKind::Spear
        )
    }
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeaponKind::Sword => "Sword",
            WeaponKind::Dagger => "Dagger",
            WeaponKind::Greatsword => "Greatsword",
            WeaponKind::Axe => "Axe",
            WeaponKind::Spear => "Spear",
            WeaponKind::Staff => "Staff",
            WeaponKind::Wand => "Wand",
            WeaponKind::Bow => "Bow",
            WeaponKind::Shield => "Shield",
        };
        f.write_str(label)
    }
}

/// Accessory sub-kind, used only by the equip validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryKind {
    Ring,
    Amulet,
}

impl fmt::Display for AccessoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AccessoryKind::Ring => "Ring",
            AccessoryKind::Amulet => "Amulet",
        })
    }
}

/// Named special effect. A pure dispatch key — all behavior lives in the
/// aggregator override table, the equip validator, the combat engine or the
/// spell resolver. Keeping this an enum makes the override-priority match
/// exhaustive at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialEffect {
    // Stat overrides, applied in the documented priority order.
    ArcaneAscendance,
    GlassCannon,
    WindSpirit,
    IronPact,
    // Equip-rule modifiers.
    TitansStrength,
    BladeDancer,
    // Combat behavior.
    Impale,
    Impaler,
    Concussion,
    Spellblade,
    Bloodlust,
    WarDrums,
    Bulwark,
    BloodMagic,
    SoulHarvest,
    // Between-floor persistence.
    Aegis,
    EndlessFury,
    // Spell dispatch keys.
    Fireball,
    ArcaneBarrage,
    FrostNova,
    ArcaneTorrent,
    Meteor,
    Immolate,
}

/// Acquisition-time spawn precondition. Consulted by pack/shop flows only,
/// never read in combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnCondition {
    MinFloor(u32),
    MinLevel(u32),
}

/// The eleven numeric deltas a card can carry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatDeltas {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub mana: i32,
    pub mana_regen: i32,
    pub crit_chance: i32,
    pub crit_damage: f64,
    pub dodge_chance: i32,
    pub attack_speed: f64,
    pub luck: i32,
}

/// One modifier record. Immutable and shared; a loadout is just an ordered
/// list of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub kind: CardKind,
    pub class: CardClass,
    pub description: String,
    pub deltas: StatDeltas,
    pub weapon_kind: Option<WeaponKind>,
    pub accessory_kind: Option<AccessoryKind>,
    /// Weapon swing damage (weapon cards).
    pub damage: i32,
    /// Spell base damage (spell cards).
    pub magic_damage: i32,
    /// Mana cost (spell cards).
    pub mana_cost: i32,
    pub special_effect: Option<SpecialEffect>,
    pub spawn_condition: Option<SpawnCondition>,
}

impl Card {
    /// A card with zeroed deltas and no effect. Catalog constructors fill in
    /// the rest via struct update syntax.
    pub fn new(name: &str, kind: CardKind, class: CardClass, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            class,
            description: description.to_string(),
            deltas: StatDeltas::default(),
            weapon_kind: None,
            accessory_kind: None,
            damage: 0,
            magic_damage: 0,
            mana_cost: 0,
            special_effect: None,
            spawn_condition: None,
        }
    }

    /// Whether this card's deltas flow through the plain-sum path.
    /// Unique and spell cards are resolved only through dispatch.
    pub fn contributes_to_sum(&self) -> bool {
        !matches!(self.class, CardClass::Unique | CardClass::Spell)
    }

    pub fn is_spell(&self) -> bool {
        self.class == CardClass::Spell
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}): {}", self.name, self.kind, self.description)
    }
}

/// The set of special effects active on a loadout, computed once per equip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectSet(HashSet<SpecialEffect>);

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a loadout for present special effects.
    pub fn from_cards(cards: &[Card]) -> Self {
        Self(cards.iter().filter_map(|c| c.special_effect).collect())
    }

    pub fn contains(&self, effect: SpecialEffect) -> bool {
        self.0.contains(&effect)
    }

    pub fn insert(&mut self, effect: SpecialEffect) {
        self.0.insert(effect);
    }
}
