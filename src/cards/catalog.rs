//! Static card catalog.
//!
//! Cards are created once from these constructors and shared read-only.
//! Acquisition flows (packs, shops) pick from the catalog; combat only ever
//! sees finished loadouts.

use super::types::{
    AccessoryKind, Card, CardClass, CardKind, SpawnCondition, SpecialEffect, StatDeltas,
    WeaponKind,
};

// ── Base equipment ───────────────────────────────────────────────────

pub fn iron_sword() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Sword),
        damage: 15,
        ..Card::new(
            "Iron Sword",
            CardKind::Weapon,
            CardClass::Equipment,
            "A basic sword",
        )
    }
}

pub fn leather_armor() -> Card {
    Card {
        deltas: StatDeltas {
            defense: 5,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Leather Armor",
            CardKind::Armor,
            CardClass::Equipment,
            "Basic protection",
        )
    }
}

pub fn oak_wand() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Wand),
        deltas: StatDeltas {
            magic_attack: 15,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Oak Wand",
            CardKind::Weapon,
            CardClass::Equipment,
            "A simple casting focus",
        )
    }
}

pub fn steel_greatsword() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Greatsword),
        damage: 30,
        deltas: StatDeltas {
            attack_speed: -0.2,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Steel Greatsword",
            CardKind::Weapon,
            CardClass::Equipment,
            "Slow, heavy, decisive",
        )
    }
}

pub fn hunting_dagger() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Dagger),
        damage: 8,
        deltas: StatDeltas {
            attack_speed: 0.3,
            crit_chance: 5,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Hunting Dagger",
            CardKind::Weapon,
            CardClass::Equipment,
            "Fast and precise",
        )
    }
}

// ── Stat cards ───────────────────────────────────────────────────────

pub fn vitality_charm() -> Card {
    Card {
        deltas: StatDeltas {
            hp: 50,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Vitality Charm",
            CardKind::Passive,
            CardClass::Stat,
            "Increases max HP",
        )
    }
}

pub fn power_ring() -> Card {
    Card {
        accessory_kind: Some(AccessoryKind::Ring),
        deltas: StatDeltas {
            attack: 5,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Power Ring",
            CardKind::Accessory,
            CardClass::Stat,
            "Increases attack",
        )
    }
}

pub fn lucky_coin() -> Card {
    Card {
        accessory_kind: Some(AccessoryKind::Amulet),
        deltas: StatDeltas {
            luck: 15,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Lucky Coin",
            CardKind::Accessory,
            CardClass::Stat,
            "Fortune favors the bold",
        )
    }
}

pub fn quicksilver_band() -> Card {
    Card {
        accessory_kind: Some(AccessoryKind::Ring),
        deltas: StatDeltas {
            attack_speed: 0.5,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Quicksilver Band",
            CardKind::Accessory,
            CardClass::Stat,
            "Increases attack speed",
        )
    }
}

pub fn sage_amulet() -> Card {
    Card {
        accessory_kind: Some(AccessoryKind::Amulet),
        deltas: StatDeltas {
            mana: 30,
            mana_regen: 5,
            ..StatDeltas::default()
        },
        ..Card::new(
            "Sage Amulet",
            CardKind::Accessory,
            CardClass::Stat,
            "Deepens mana reserves",
        )
    }
}

// ── Unique cards ─────────────────────────────────────────────────────

fn unique(name: &str, kind: CardKind, description: &str, effect: SpecialEffect) -> Card {
    Card {
        special_effect: Some(effect),
        ..Card::new(name, kind, CardClass::Unique, description)
    }
}

pub fn titans_strength() -> Card {
    unique(
        "Titan's Strength",
        CardKind::Passive,
        "Wield two two-handed weapons",
        SpecialEffect::TitansStrength,
    )
}

pub fn blade_dancer() -> Card {
    Card {
        spawn_condition: Some(SpawnCondition::MinFloor(100)),
        ..unique(
            "Blade Dancer",
            CardKind::Passive,
            "Carry four daggers, wear no armor",
            SpecialEffect::BladeDancer,
        )
    }
}

pub fn arcane_ascendance() -> Card {
    unique(
        "Arcane Ascendance",
        CardKind::Passive,
        "Forsake the blade: attack drops to zero, magic attack soars",
        SpecialEffect::ArcaneAscendance,
    )
}

pub fn glass_cannon() -> Card {
    unique(
        "Glass Cannon",
        CardKind::Passive,
        "Double attack, no defense",
        SpecialEffect::GlassCannon,
    )
}

pub fn wind_spirit() -> Card {
    unique(
        "Wind Spirit",
        CardKind::Passive,
        "Attack speed increased by half",
        SpecialEffect::WindSpirit,
    )
}

pub fn iron_pact() -> Card {
    unique(
        "Iron Pact",
        CardKind::Passive,
        "Double defense, but speed bonuses are halved",
        SpecialEffect::IronPact,
    )
}

pub fn stalwart_guard() -> Card {
    unique(
        "Stalwart Guard",
        CardKind::Passive,
        "Every second incoming hit is halved",
        SpecialEffect::Bulwark,
    )
}

pub fn blood_pact() -> Card {
    unique(
        "Blood Pact",
        CardKind::Passive,
        "Pay missing mana with your own blood",
        SpecialEffect::BloodMagic,
    )
}

pub fn eternal_aegis() -> Card {
    Card {
        spawn_condition: Some(SpawnCondition::MinFloor(200)),
        ..unique(
            "Eternal Aegis",
            CardKind::Passive,
            "Shield carries between floors",
            SpecialEffect::Aegis,
        )
    }
}

pub fn endless_fury() -> Card {
    unique(
        "Endless Fury",
        CardKind::Passive,
        "Rage carries between floors",
        SpecialEffect::EndlessFury,
    )
}

pub fn bloodlust() -> Card {
    unique(
        "Bloodlust",
        CardKind::Passive,
        "Each landed blow feeds your rage",
        SpecialEffect::Bloodlust,
    )
}

pub fn war_drums() -> Card {
    unique(
        "War Drums",
        CardKind::Passive,
        "Rage quickens your strikes",
        SpecialEffect::WarDrums,
    )
}

pub fn soul_harvest() -> Card {
    unique(
        "Soul Harvest",
        CardKind::Passive,
        "Each kill raises a soul shield",
        SpecialEffect::SoulHarvest,
    )
}

pub fn barbed_spear() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Spear),
        damage: 20,
        ..unique(
            "Barbed Spear",
            CardKind::Weapon,
            "Critical hits leave a festering wound",
            SpecialEffect::Impale,
        )
    }
}

pub fn impaler() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Greatsword),
        damage: 25,
        spawn_condition: Some(SpawnCondition::MinFloor(300)),
        ..unique(
            "Impaler",
            CardKind::Weapon,
            "Every hit leaves a festering wound",
            SpecialEffect::Impaler,
        )
    }
}

pub fn skullcracker() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Axe),
        damage: 18,
        ..unique(
            "Skullcracker",
            CardKind::Weapon,
            "Blows may leave the enemy reeling",
            SpecialEffect::Concussion,
        )
    }
}

pub fn runeblade() -> Card {
    Card {
        weapon_kind: Some(WeaponKind::Sword),
        damage: 12,
        ..unique(
            "Runeblade",
            CardKind::Weapon,
            "Strikes echo with arcane force",
            SpecialEffect::Spellblade,
        )
    }
}

// ── Spell cards ──────────────────────────────────────────────────────

fn spell(name: &str, description: &str, effect: SpecialEffect, damage: i32, cost: i32) -> Card {
    Card {
        magic_damage: damage,
        mana_cost: cost,
        special_effect: Some(effect),
        ..Card::new(name, CardKind::Spell, CardClass::Spell, description)
    }
}

pub fn fireball() -> Card {
    spell(
        "Fireball",
        "A single searing bolt",
        SpecialEffect::Fireball,
        30,
        20,
    )
}

pub fn arcane_barrage() -> Card {
    spell(
        "Arcane Barrage",
        "Three rapid bolts at reduced power",
        SpecialEffect::ArcaneBarrage,
        25,
        25,
    )
}

pub fn frost_nova() -> Card {
    spell(
        "Frost Nova",
        "Strikes every enemy at once",
        SpecialEffect::FrostNova,
        20,
        30,
    )
}

pub fn arcane_torrent() -> Card {
    spell(
        "Arcane Torrent",
        "Channel three turns of raw force",
        SpecialEffect::ArcaneTorrent,
        25,
        35,
    )
}

pub fn meteor() -> Card {
    Card {
        spawn_condition: Some(SpawnCondition::MinLevel(10)),
        ..spell(
            "Meteor",
            "Two turns of silence, then the sky falls",
            SpecialEffect::Meteor,
            60,
            40,
        )
    }
}

pub fn immolate() -> Card {
    spell(
        "Immolate",
        "Burns on impact and keeps burning",
        SpecialEffect::Immolate,
        20,
        25,
    )
}

/// The starter deck every new climber begins with.
pub fn starter_deck() -> Vec<Card> {
    vec![iron_sword(), leather_armor(), vitality_charm(), power_ring()]
}
