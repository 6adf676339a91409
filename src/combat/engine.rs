//! The battle state machine.
//!
//! One [`Battle`] covers one floor: the player against a queue of opponents.
//! Each turn runs five phases in a fixed, load-bearing order — mana
//! regeneration, channel advance, DoT ticks, player actions, enemy actions.
//! Opponents live in a `VecDeque` owned by the engine; defeated opponents
//! are dequeued between iterations, never while a phase is walking the
//! queue. All observable outcomes go to the caller's [`EventSink`].

use crate::cards::SpecialEffect;
use crate::combat::combatant::{Channel, ChannelKind, Combatant, Dot};
use crate::combat::rolls::{action_count, roll_crit, roll_dodge};
use crate::combat::spells::{self, SpellShape};
use crate::constants::{CONCUSSION_STUN_CHANCE, IMPALE_MARK_RATIO, SOUL_HARVEST_SHIELD_RATIO, SPELLBLADE_RATIO};
use crate::events::{CombatEvent, EventSink};
use crate::progression::{bounty_for_floor, xp_for_floor};
use rand::Rng;
use std::collections::VecDeque;

/// Where a battle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleState {
    InProgress,
    /// Every opponent was removed from the queue.
    Won,
    /// The player crossed the 1-HP floor.
    Escaped,
}

/// One floor's battle: the player versus a queue of opponents.
pub struct Battle {
    floor: u32,
    turn: u32,
    kills: u32,
    state: BattleState,
    enemies: VecDeque<Combatant>,
}

impl Battle {
    pub fn new(floor: u32, enemies: Vec<Combatant>) -> Self {
        Self {
            floor,
            turn: 0,
            kills: 0,
            state: BattleState::InProgress,
            enemies: enemies.into(),
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn turn_count(&self) -> u32 {
        self.turn
    }

    /// Opponents defeated so far this battle.
    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn remaining_enemies(&self) -> usize {
        self.enemies.len()
    }

    /// Runs turns until the battle resolves.
    pub fn run(
        &mut self,
        player: &mut Combatant,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> BattleState {
        while self.state == BattleState::InProgress {
            self.turn(player, rng, sink);
        }
        self.state
    }

    /// Runs a single turn. Exposed so callers and tests can step battles.
    pub fn turn(
        &mut self,
        player: &mut Combatant,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) -> BattleState {
        debug_assert!(player.is_alive(), "turn on an escaped player");
        if self.state != BattleState::InProgress {
            return self.state;
        }

        self.turn += 1;
        sink.emit(CombatEvent::TurnStarted { turn: self.turn });

        // Phase 1: mana regeneration.
        player.regen_mana();
        for enemy in self.enemies.iter_mut() {
            enemy.regen_mana();
        }

        // Channeling locks the whole action phase, including the turn the
        // channel expires on.
        let was_channeling = player.channel.is_some();

        // Phase 2: channel advance.
        self.advance_channel(player, sink);
        if self.check_won(sink) {
            return self.state;
        }

        // Phase 3: DoT ticks.
        self.tick_dots(player, sink);
        if self.check_won(sink) {
            return self.state;
        }

        // Phase 4: player actions.
        if !was_channeling {
            let actions = action_count(player.speed(), rng);
            for _ in 0..actions {
                if self.enemies.is_empty() || player.channel.is_some() {
                    break;
                }
                if !self.try_cast(player, sink) {
                    self.player_attack(player, rng, sink);
                }
            }
            if self.check_won(sink) {
                return self.state;
            }
        }

        // Phase 5: enemy actions.
        self.enemy_phase(player, rng, sink);
        self.state
    }

    fn check_won(&mut self, sink: &mut dyn EventSink) -> bool {
        if self.state == BattleState::InProgress && self.enemies.is_empty() {
            self.state = BattleState::Won;
            sink.emit(CombatEvent::FloorCleared {
                floor: self.floor,
                xp: xp_for_floor(self.floor),
            });
        }
        self.state != BattleState::InProgress
    }

    /// Dequeues every defeated opponent, paying bounty and Soul Harvest
    /// shield per kill. Runs between iterations, never during them.
    fn prune_defeated(&mut self, player: &mut Combatant, sink: &mut dyn EventSink) {
        let mut i = 0;
        while i < self.enemies.len() {
            if !self.enemies[i].defeated {
                i += 1;
                continue;
            }
            if let Some(dead) = self.enemies.remove(i) {
                self.kills += 1;
                sink.emit(CombatEvent::CombatantDefeated {
                    name: dead.name,
                    bounty: bounty_for_floor(self.floor),
                });
                if player.effects.contains(SpecialEffect::SoulHarvest) {
                    let gain =
                        (player.stats.max_hp as f64 * SOUL_HARVEST_SHIELD_RATIO) as i32;
                    player.gain_shield(gain);
                }
            }
        }
    }

    // ── Channel & DoT phases ─────────────────────────────────────────

    fn advance_channel(&mut self, player: &mut Combatant, sink: &mut dyn EventSink) {
        let Some(channel) = player.channel else {
            return;
        };
        match channel.kind {
            ChannelKind::Continuous => self.continuous_tick(player, sink),
            ChannelKind::Detonation => {
                let mut channel = channel;
                channel.turns_left -= 1;
                if channel.turns_left == 0 {
                    player.channel = None;
                    sink.emit(CombatEvent::Detonated {
                        caster: player.name.clone(),
                        damage: channel.damage,
                    });
                    for enemy in self.enemies.iter_mut() {
                        enemy.take_hit(channel.damage);
                    }
                    self.prune_defeated(player, sink);
                } else {
                    player.channel = Some(channel);
                }
            }
        }
    }

    /// One continuous-channel tick: damage the front opponent, count down,
    /// clear on expiry. Also fired on the cast itself.
    fn continuous_tick(&mut self, player: &mut Combatant, sink: &mut dyn EventSink) {
        let Some(mut channel) = player.channel else {
            return;
        };
        debug_assert_eq!(channel.kind, ChannelKind::Continuous);

        if let Some(target) = self.enemies.front_mut() {
            let hit = target.take_hit(channel.damage);
            sink.emit(CombatEvent::ChannelTick {
                caster: player.name.clone(),
                damage: hit.dealt,
            });
        }
        self.prune_defeated(player, sink);

        channel.turns_left -= 1;
        player.channel = if channel.turns_left == 0 {
            None
        } else {
            Some(channel)
        };
    }

    fn tick_dots(&mut self, player: &mut Combatant, sink: &mut dyn EventSink) {
        if player.dots.is_empty() {
            return;
        }
        let mut dots = std::mem::take(&mut player.dots);
        for dot in dots.iter_mut() {
            if let Some(target) = self.enemies.front_mut() {
                let hit = target.take_direct(dot.damage);
                sink.emit(CombatEvent::DotTick {
                    target: target.name.clone(),
                    damage: hit.dealt,
                });
            }
            dot.turns_left -= 1;
            self.prune_defeated(player, sink);
        }
        dots.retain(|d| d.turns_left > 0);
        player.dots = dots;
    }

    // ── Player action phase ──────────────────────────────────────────

    /// Casts the first affordable spell card, in loadout order. Returns
    /// false when nothing was castable; the action then falls through to an
    /// ordinary attack.
    fn try_cast(&mut self, player: &mut Combatant, sink: &mut dyn EventSink) -> bool {
        let spells = player.spells.clone();
        for card in &spells {
            let Some(effect) = card.special_effect else {
                continue;
            };
            let Some(shape) = spells::spell_shape(effect) else {
                continue;
            };
            let Some(cost) = spells::pay_cast_cost(player, card.mana_cost) else {
                continue;
            };
            sink.emit(CombatEvent::SpellCast {
                caster: player.name.clone(),
                spell: effect,
                mana_spent: cost.mana,
                hp_spent: cost.hp,
            });
            let power = spells::spell_power(player.stats.magic_attack, card.magic_damage);
            self.resolve_spell(player, shape, power, sink);
            return true;
        }
        false
    }

    fn resolve_spell(
        &mut self,
        player: &mut Combatant,
        shape: SpellShape,
        power: i32,
        sink: &mut dyn EventSink,
    ) {
        match shape {
            SpellShape::SingleInstant => {
                self.spell_hit_front(player, power, sink);
            }
            SpellShape::FixedMultiHit { hits, per_hit } => {
                let per = (power as f64 * per_hit) as i32;
                for _ in 0..hits {
                    if self.enemies.is_empty() {
                        break;
                    }
                    self.spell_hit_front(player, per, sink);
                }
            }
            SpellShape::Area => {
                let caster = player.name.clone();
                for enemy in self.enemies.iter_mut() {
                    let hit = enemy.take_hit(power);
                    sink.emit(CombatEvent::SpellHit {
                        caster: caster.clone(),
                        target: enemy.name.clone(),
                        damage: hit.dealt,
                    });
                }
                self.prune_defeated(player, sink);
            }
            SpellShape::ContinuousChannel { turns, per_turn } => {
                player.channel = Some(Channel {
                    kind: ChannelKind::Continuous,
                    turns_left: turns,
                    damage: (power as f64 * per_turn) as i32,
                });
                // First tick fires on the cast itself.
                self.continuous_tick(player, sink);
            }
            SpellShape::DelayedDetonation { delay } => {
                player.channel = Some(Channel {
                    kind: ChannelKind::Detonation,
                    turns_left: delay,
                    damage: power,
                });
            }
            SpellShape::InstantPlusDot { ticks, per_tick } => {
                self.spell_hit_front(player, power, sink);
                player.dots.push(Dot {
                    turns_left: ticks,
                    damage: (power as f64 * per_tick) as i32,
                });
            }
        }
    }

    fn spell_hit_front(&mut self, player: &mut Combatant, damage: i32, sink: &mut dyn EventSink) {
        if let Some(target) = self.enemies.front_mut() {
            let hit = target.take_hit(damage);
            sink.emit(CombatEvent::SpellHit {
                caster: player.name.clone(),
                target: target.name.clone(),
                damage: hit.dealt,
            });
        }
        self.prune_defeated(player, sink);
    }

    /// One ordinary weapon attack against the front opponent, with the
    /// on-hit secondary effects in their fixed order: impale consumption,
    /// main hit, impale re-application, stun roll, spellblade echo, rage.
    fn player_attack(
        &mut self,
        player: &mut Combatant,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) {
        let Some(target) = self.enemies.front_mut() else {
            return;
        };

        if roll_dodge(target, rng) {
            target.dodge_lock = true;
            sink.emit(CombatEvent::AttackDodged {
                attacker: player.name.clone(),
                defender: target.name.clone(),
            });
            return;
        }
        target.dodge_lock = false;

        let was_crit = roll_crit(player, rng);
        let mut raw = player.attack_power() + target.impale_mark;
        target.impale_mark = 0;
        if was_crit {
            raw = (raw as f64 * player.stats.crit_damage) as i32;
        }

        let hit = target.take_hit(raw);
        sink.emit(CombatEvent::AttackLanded {
            attacker: player.name.clone(),
            defender: target.name.clone(),
            damage: hit.dealt,
            was_crit,
        });

        if (player.effects.contains(SpecialEffect::Impale) && was_crit)
            || player.effects.contains(SpecialEffect::Impaler)
        {
            target.impale_mark = (hit.dealt as f64 * IMPALE_MARK_RATIO) as i32;
        }

        if player.effects.contains(SpecialEffect::Concussion)
            && !hit.defeated
            && rng.gen_range(1..=100) <= CONCUSSION_STUN_CHANCE
        {
            target.stunned = true;
            sink.emit(CombatEvent::Stunned {
                target: target.name.clone(),
            });
        }

        if player.effects.contains(SpecialEffect::Spellblade) && !hit.defeated {
            let bonus = (hit.dealt as f64 * SPELLBLADE_RATIO) as i32;
            if bonus > 0 {
                let echo = target.take_direct(bonus);
                sink.emit(CombatEvent::SpellHit {
                    caster: player.name.clone(),
                    target: target.name.clone(),
                    damage: echo.dealt,
                });
            }
        }

        player.gain_rage();
        self.prune_defeated(player, sink);
    }

    // ── Enemy action phase ───────────────────────────────────────────

    fn enemy_phase(
        &mut self,
        player: &mut Combatant,
        rng: &mut impl Rng,
        sink: &mut dyn EventSink,
    ) {
        for i in 0..self.enemies.len() {
            if self.enemies[i].stunned {
                self.enemies[i].stunned = false;
                continue;
            }
            let actions = action_count(self.enemies[i].speed(), rng);
            for _ in 0..actions {
                if roll_dodge(player, rng) {
                    player.dodge_lock = true;
                    sink.emit(CombatEvent::AttackDodged {
                        attacker: self.enemies[i].name.clone(),
                        defender: player.name.clone(),
                    });
                    continue;
                }
                player.dodge_lock = false;

                let was_crit = roll_crit(&mut self.enemies[i], rng);
                let (raw, attacker) = {
                    let enemy = &self.enemies[i];
                    let mut raw = enemy.attack_power();
                    if was_crit {
                        raw = (raw as f64 * enemy.stats.crit_damage) as i32;
                    }
                    (raw, enemy.name.clone())
                };

                let hit = player.take_hit(raw);
                if hit.absorbed > 0 {
                    sink.emit(CombatEvent::ShieldAbsorbed {
                        defender: player.name.clone(),
                        amount: hit.absorbed,
                    });
                }
                sink.emit(CombatEvent::AttackLanded {
                    attacker,
                    defender: player.name.clone(),
                    damage: hit.dealt,
                    was_crit,
                });

                if hit.defeated {
                    self.state = BattleState::Escaped;
                    sink.emit(CombatEvent::EscapedAtFloor { floor: self.floor });
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventLog, NullSink};
    use crate::loadout::DerivedStats;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    /// An enemy that cannot dodge, crit or meaningfully hurt anyone.
    fn dummy_enemy(hp: i32) -> Combatant {
        let mut stats = DerivedStats::base();
        stats.max_hp = hp;
        stats.attack = 0;
        stats.defense = 0;
        stats.crit_chance = 0;
        stats.dodge_chance = 0;
        stats.max_mana = 0;
        stats.mana_regen = 0;
        Combatant::from_stats("Dummy".to_string(), stats)
    }

    fn plain_player() -> Combatant {
        let mut stats = DerivedStats::base();
        stats.dodge_chance = 0;
        stats.crit_chance = 0;
        Combatant::from_stats("Hero".to_string(), stats)
    }

    #[test]
    fn test_empty_queue_is_an_immediate_win() {
        let mut battle = Battle::new(1, vec![]);
        let mut player = plain_player();
        let state = battle.run(&mut player, &mut rng(), &mut NullSink);
        assert_eq!(state, BattleState::Won);
    }

    #[test]
    fn test_player_defeats_single_weak_enemy() {
        let mut battle = Battle::new(1, vec![dummy_enemy(30)]);
        let mut player = plain_player();
        let mut log = EventLog::new();
        let state = battle.run(&mut player, &mut rng(), &mut log);
        assert_eq!(state, BattleState::Won);
        assert_eq!(battle.kills(), 1);
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::FloorCleared { floor: 1, .. })));
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::CombatantDefeated { .. })));
    }

    #[test]
    fn test_overwhelming_enemy_forces_escape_at_one_hp() {
        let mut stats = DerivedStats::base();
        stats.attack = 10_000;
        stats.dodge_chance = 0;
        stats.crit_chance = 0;
        let brute = Combatant::from_stats("Brute".to_string(), stats);

        let mut battle = Battle::new(10, vec![brute]);
        let mut player = plain_player();
        let mut log = EventLog::new();
        let state = battle.run(&mut player, &mut rng(), &mut log);

        assert_eq!(state, BattleState::Escaped);
        assert_eq!(player.hp, 1);
        assert!(!player.is_alive());
        assert!(log
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::EscapedAtFloor { floor: 10 })));
    }

    #[test]
    fn test_queue_consumed_in_order() {
        let enemies = vec![dummy_enemy(10), dummy_enemy(10), dummy_enemy(10)];
        let mut battle = Battle::new(1, enemies);
        let mut player = plain_player();
        let state = battle.run(&mut player, &mut rng(), &mut NullSink);
        assert_eq!(state, BattleState::Won);
        assert_eq!(battle.kills(), 3);
        assert_eq!(battle.remaining_enemies(), 0);
    }

    #[test]
    fn test_stunned_enemy_skips_one_action_phase() {
        let mut enemy = dummy_enemy(1000);
        enemy.stunned = true;
        let mut battle = Battle::new(1, vec![enemy]);
        let mut player = plain_player();
        let hp_before = player.hp;

        battle.turn(&mut player, &mut rng(), &mut NullSink);
        assert_eq!(player.hp, hp_before, "stunned enemy must not act");

        // Recovered the next turn: attack 0 still means min 1 damage.
        battle.turn(&mut player, &mut rng(), &mut NullSink);
        assert!(player.hp < hp_before);
    }
}
