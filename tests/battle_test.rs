//! Integration tests for full battles driven turn by turn.

use ascent::cards::catalog;
use ascent::combat::{Battle, BattleState, Combatant};
use ascent::events::{CombatEvent, EventLog};
use ascent::loadout::{AscensionSet, DerivedStats};
use ascent::SpecialEffect;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A harmless, tanky target that cannot dodge or crit.
fn training_dummy(hp: i32) -> Combatant {
    let mut stats = DerivedStats::base();
    stats.max_hp = hp;
    stats.attack = 0;
    stats.defense = 0;
    stats.crit_chance = 0;
    stats.dodge_chance = 0;
    stats.max_mana = 0;
    stats.mana_regen = 0;
    Combatant::from_stats("Dummy", stats)
}

/// A deterministic attacker: no crits, no dodges, no randomness in damage.
fn plain_hero() -> Combatant {
    let mut stats = DerivedStats::base();
    stats.crit_chance = 0;
    stats.dodge_chance = 0;
    Combatant::from_stats("Hero", stats)
}

fn player_attacks_in(log: &EventLog) -> Vec<i32> {
    log.events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::AttackLanded {
                attacker, damage, ..
            } if attacker == "Hero" => Some(*damage),
            _ => None,
        })
        .collect()
}

#[test]
fn test_channel_locks_caster_through_its_final_tick() {
    // Arcane Torrent: 3 ticks at 80% power, first on cast, caster locked
    // every turn the channel is live at the start of.
    let mut player =
        Combatant::from_loadout("Hero", &[catalog::arcane_torrent()], &AscensionSet::new())
            .unwrap();
    let mut battle = Battle::new(1, vec![training_dummy(1000)]);
    let mut log = EventLog::new();
    let mut r = rng(11);

    // Turn 1: cast, first tick fires immediately.
    battle.turn(&mut player, &mut r, &mut log);
    assert!(player.channel.is_some());

    // Turns 2 and 3: ticks only, no weapon swings.
    battle.turn(&mut player, &mut r, &mut log);
    battle.turn(&mut player, &mut r, &mut log);
    assert!(player.channel.is_none(), "channel expires on the third tick");

    let ticks = log.count_where(|e| matches!(e, CombatEvent::ChannelTick { .. }));
    assert_eq!(ticks, 3);
    assert!(
        player_attacks_in(&log).is_empty(),
        "caster must not swing while the channel is live"
    );

    // Turn 4: the lock is gone; mana is too low to re-cast, so the player
    // falls back to a weapon attack.
    battle.turn(&mut player, &mut r, &mut log);
    assert_eq!(player_attacks_in(&log).len(), 1);
}

#[test]
fn test_delayed_detonation_hits_every_opponent_at_once() {
    // Meteor: two silent turns, then one area strike.
    let mut player =
        Combatant::from_loadout("Hero", &[catalog::meteor()], &AscensionSet::new()).unwrap();
    // Power 10 + 60 kills both 30-HP dummies outright.
    let mut battle = Battle::new(1, vec![training_dummy(30), training_dummy(30)]);
    let mut log = EventLog::new();
    let mut r = rng(3);

    battle.turn(&mut player, &mut r, &mut log);
    assert_eq!(battle.state(), BattleState::InProgress);
    battle.turn(&mut player, &mut r, &mut log);
    assert_eq!(battle.state(), BattleState::InProgress);
    assert_eq!(
        log.count_where(|e| matches!(e, CombatEvent::Detonated { .. })),
        0
    );

    battle.turn(&mut player, &mut r, &mut log);
    assert_eq!(battle.state(), BattleState::Won);
    assert_eq!(battle.kills(), 2);
    assert_eq!(
        log.count_where(|e| matches!(e, CombatEvent::Detonated { .. })),
        1
    );
}

#[test]
fn test_successful_dodge_cannot_repeat() {
    // A player who always dodges faces an enemy with two actions per turn:
    // the first swing is dodged, the lock forces the second to land, and the
    // landing hit re-arms the dodge for the next turn.
    let mut stats = DerivedStats::base();
    stats.dodge_chance = 100;
    stats.crit_chance = 0;
    stats.attack = 0;
    let mut player = Combatant::from_stats("Hero", stats);

    let mut enemy_stats = DerivedStats::base();
    enemy_stats.max_hp = 10_000;
    enemy_stats.attack_speed = 2.0;
    enemy_stats.crit_chance = 0;
    enemy_stats.dodge_chance = 0;
    let enemy = Combatant::from_stats("Twinblade", enemy_stats);

    let mut battle = Battle::new(1, vec![enemy]);
    let mut log = EventLog::new();
    let mut r = rng(19);

    for _ in 0..3 {
        battle.turn(&mut player, &mut r, &mut log);
    }

    let dodges = log.count_where(
        |e| matches!(e, CombatEvent::AttackDodged { defender, .. } if defender == "Hero"),
    );
    let landed = log.count_where(
        |e| matches!(e, CombatEvent::AttackLanded { defender, .. } if defender == "Hero"),
    );
    assert_eq!(dodges, 3, "exactly one dodge per enemy turn");
    assert_eq!(landed, 3, "the locked second swing always lands");
}

#[test]
fn test_impaler_mark_compounds_successive_hits() {
    let mut player = plain_hero();
    player.effects.insert(SpecialEffect::Impaler);
    player.weapon_damage = 25;

    let mut battle = Battle::new(1, vec![training_dummy(200)]);
    let mut log = EventLog::new();
    let mut r = rng(23);

    battle.turn(&mut player, &mut r, &mut log);
    battle.turn(&mut player, &mut r, &mut log);

    let damages = player_attacks_in(&log);
    // First swing: 35 flat. Second consumes the 30% mark: 35 + 10.
    assert_eq!(damages[0], 35);
    assert_eq!(damages[1], 45);
}

#[test]
fn test_spellblade_echoes_a_fraction_as_magic() {
    let mut player = plain_hero();
    player.effects.insert(SpecialEffect::Spellblade);

    let mut battle = Battle::new(1, vec![training_dummy(500)]);
    let mut log = EventLog::new();
    let mut r = rng(29);

    battle.turn(&mut player, &mut r, &mut log);

    // 10 physical, then a 3-point magic echo that ignores defense.
    assert_eq!(player_attacks_in(&log), vec![10]);
    assert!(log.events.iter().any(|e| matches!(
        e,
        CombatEvent::SpellHit { caster, damage: 3, .. } if caster == "Hero"
    )));
}

#[test]
fn test_rage_ramps_attack_damage_per_hit() {
    let mut player = plain_hero();
    player.effects.insert(SpecialEffect::Bloodlust);

    let mut battle = Battle::new(1, vec![training_dummy(500)]);
    let mut log = EventLog::new();
    let mut r = rng(31);

    for _ in 0..4 {
        battle.turn(&mut player, &mut r, &mut log);
    }

    // Rage is granted after each landed hit, so damage climbs one per turn.
    assert_eq!(player_attacks_in(&log), vec![10, 11, 12, 13]);
    assert_eq!(player.rage, 4);
}

#[test]
fn test_immolate_dot_ticks_after_the_hit() {
    let mut player =
        Combatant::from_loadout("Hero", &[catalog::immolate()], &AscensionSet::new()).unwrap();
    // Enough mana for exactly one cast, so regen cannot re-trigger it.
    player.stats.max_mana = 25;
    player.mana = 25;
    let mut battle = Battle::new(1, vec![training_dummy(1000)]);
    let mut log = EventLog::new();
    let mut r = rng(37);

    // Cast turn: one direct hit, no tick yet.
    battle.turn(&mut player, &mut r, &mut log);
    assert_eq!(
        log.count_where(|e| matches!(e, CombatEvent::DotTick { .. })),
        0
    );
    assert_eq!(player.dots.len(), 1);

    // Three following turns each carry one tick; then the DoT is gone.
    for _ in 0..3 {
        battle.turn(&mut player, &mut r, &mut log);
    }
    assert_eq!(
        log.count_where(|e| matches!(e, CombatEvent::DotTick { .. })),
        3
    );
    assert!(player.dots.is_empty());
}

#[test]
fn test_escape_ends_the_battle_with_the_player_at_one_hp() {
    let mut stats = DerivedStats::base();
    stats.attack = 100_000;
    stats.crit_chance = 0;
    stats.dodge_chance = 0;
    let brute = Combatant::from_stats("Brute", stats);

    let mut player = plain_hero();
    let mut battle = Battle::new(42, vec![brute]);
    let mut log = EventLog::new();

    let state = battle.run(&mut player, &mut rng(41), &mut log);
    assert_eq!(state, BattleState::Escaped);
    assert_eq!(player.hp, 1);
    assert!(log
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::EscapedAtFloor { floor: 42 })));
}
