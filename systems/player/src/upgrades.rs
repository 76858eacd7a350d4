use std::{f32::consts::TAU, time::Duration};

use tracing::debug;
use wave_arena_core::{
    DashState, Explosive, Miniature, Player, Shield, SimulationConfig, SimulationContext,
    StatusProc, UpgradeId,
};

const DAMAGE_STEP: f32 = 1.15;
const ATTACK_SPEED_STEP: f32 = 1.12;
const MOVEMENT_SPEED_STEP: f32 = 1.08;
const MAX_HP_STEP: f32 = 20.0;
const CRIT_CHANCE_STEP: f32 = 0.05;
const CRIT_DAMAGE_STEP: f32 = 0.25;
const DEFENSE_STEP: f32 = 0.05;
const DEFENSE_STORED_CAP: f32 = 0.9;
const LIFE_STEAL_STEP: f32 = 0.03;
const PROC_CHANCE_STEP: f32 = 0.2;
const PROC_POTENCY_STEP: f32 = 0.25;
const HOMING_STEP: f32 = 0.25;
const EXPLOSIVE_ROUNDS: Explosive = Explosive {
    radius: 70.0,
    on_hit_chance: 0.2,
    damage_factor: 0.5,
    max_targets: 4,
};
const EXPLOSIVE_CHANCE_STEP: f32 = 0.1;
const EXPLOSIVE_RADIUS_STEP: f32 = 10.0;

/// Applies `upgrade` to `player` and returns how many times it is now owned.
///
/// Unique upgrades are retired from the context's pool so they are never
/// offered again.
pub fn apply_upgrade(
    player: &mut Player,
    upgrade: UpgradeId,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> u32 {
    let tuning = &config.player;
    match upgrade {
        UpgradeId::Damage => {
            player.min_damage *= DAMAGE_STEP;
            player.max_damage *= DAMAGE_STEP;
        }
        UpgradeId::AttackSpeed => player.attack_speed.multiplier *= ATTACK_SPEED_STEP,
        UpgradeId::MovementSpeed => player.movement_speed.multiplier *= MOVEMENT_SPEED_STEP,
        UpgradeId::MaxHp => {
            player.max_hp += MAX_HP_STEP;
            let _ = player.heal(MAX_HP_STEP);
        }
        UpgradeId::CritChance => {
            player.crit_chance = (player.crit_chance + CRIT_CHANCE_STEP).min(1.0);
        }
        UpgradeId::CritDamage => player.crit_multiplier += CRIT_DAMAGE_STEP,
        UpgradeId::Defense => {
            player.defense = (player.defense + DEFENSE_STEP).min(DEFENSE_STORED_CAP);
        }
        UpgradeId::LifeSteal => player.life_steal += LIFE_STEAL_STEP,
        UpgradeId::Shield => {
            player.shield = Some(Shield {
                max_hp: tuning.shield.max_hp,
                current_hp: tuning.shield.max_hp,
                recharge_delay: Duration::from_millis(tuning.shield.recharge_delay_ms),
                recharge_rate: tuning.shield.recharge_rate,
                last_damaged: None,
            });
        }
        UpgradeId::Dash => {
            player.dash = Some(DashState {
                active: false,
                timer: Duration::ZERO,
                direction: player.facing,
                last_started: None,
                duration: Duration::from_millis(tuning.dash.duration_ms),
                speed: tuning.dash.speed,
                cooldown: Duration::from_millis(tuning.dash.cooldown_ms),
                invincibility: Duration::from_millis(tuning.dash.invincibility_ms),
            });
        }
        UpgradeId::DoubleJump => player.double_jump_unlocked = true,
        UpgradeId::Burn => strengthen(&mut player.status_modifiers.burn),
        UpgradeId::Chill => strengthen(&mut player.status_modifiers.chill),
        UpgradeId::ExplosiveRounds => {
            player.explosive = Some(match player.explosive {
                None => EXPLOSIVE_ROUNDS,
                Some(current) => Explosive {
                    radius: current.radius + EXPLOSIVE_RADIUS_STEP,
                    on_hit_chance: (current.on_hit_chance + EXPLOSIVE_CHANCE_STEP).min(1.0),
                    ..current
                },
            });
        }
        UpgradeId::PiercingRounds => player.extra_pierce += 1,
        UpgradeId::HomingRounds => player.homing_strength += HOMING_STEP,
        UpgradeId::Fragmentation => player.fragmentation = true,
        UpgradeId::Miniature => {
            let phase = TAU * player.miniatures.len() as f32 / 3.0;
            player.miniatures.push(Miniature {
                orbit_phase: phase % TAU,
                last_shot: None,
            });
        }
        UpgradeId::Thunderbolt => {
            player.thunderbolt = true;
            player.last_thunderbolt = Some(ctx.now());
        }
        UpgradeId::ExtraLife => player.lives += 1,
    }

    if upgrade.is_unique() {
        let _ = ctx.remove_upgrade_from_pool(upgrade);
    }

    let count = player.upgrades.entry(upgrade).or_insert(0);
    *count += 1;
    debug!(upgrade = upgrade.name(), count = *count, "upgrade applied");
    *count
}

fn strengthen(proc: &mut Option<StatusProc>) {
    *proc = Some(match *proc {
        None => StatusProc {
            chance: PROC_CHANCE_STEP,
            potency: 1.0,
        },
        Some(current) => StatusProc {
            chance: (current.chance + PROC_CHANCE_STEP).min(1.0),
            potency: current.potency + PROC_POTENCY_STEP,
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn repeated_status_upgrades_raise_chance_then_potency() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(1);
        let mut player = Player::new(&config.player, Vec2::ZERO);

        for _ in 0..6 {
            let _ = apply_upgrade(&mut player, UpgradeId::Burn, &config, &mut ctx);
        }

        let burn = player.status_modifiers.burn.expect("burn unlocked");
        assert_eq!(burn.chance, 1.0);
        assert!((burn.potency - 2.25).abs() < 1e-5);
        assert!(player.status_modifiers.chill.is_none());
    }

    #[test]
    fn max_hp_upgrade_also_heals() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(1);
        let mut player = Player::new(&config.player, Vec2::ZERO);
        player.hp = 50.0;

        assert_eq!(apply_upgrade(&mut player, UpgradeId::MaxHp, &config, &mut ctx), 1);
        assert_eq!(player.max_hp, 120.0);
        assert_eq!(player.hp, 70.0);
    }
}
