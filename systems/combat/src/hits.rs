use std::time::Duration;

use tracing::debug;
use wave_arena_core::{
    Color, Detonation, Enemy, EnemyId, ParticleKind, Player, Projectile, ProjectileDamage,
    SimulationConfig, SimulationContext, SoundCue, StatusEffect,
};

/// Strongest slow a chill may reach however potent it is.
const SLOW_FLOOR: f32 = 0.2;

/// Damage of one resolved impact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RolledHit {
    /// Damage after every multiplier.
    pub amount: f32,
    /// Whether the hit was critical.
    pub critical: bool,
}

/// Rolls the damage a player-side `damage` payload deals.
///
/// A rolled payload is critical with the player's crit chance and then deals
/// `max_damage × crit_multiplier`; otherwise it is uniform in
/// `[min_damage, max_damage]`. Both are scaled by the payload and by the admin
/// damage multiplier. Fixed payloads only take the admin multiplier.
pub fn roll_damage(
    damage: ProjectileDamage,
    player: &Player,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> RolledHit {
    let admin = config.admin.damage_multiplier();
    match damage {
        ProjectileDamage::Rolled { scale } => {
            let critical = ctx.roll(player.crit_chance);
            let base = if critical {
                player.max_damage * player.crit_multiplier
            } else {
                ctx.uniform(player.min_damage, player.max_damage)
            };
            RolledHit {
                amount: base * scale * admin,
                critical,
            }
        }
        ProjectileDamage::Fixed(amount) => RolledHit {
            amount: amount * admin,
            critical: false,
        },
    }
}

/// Resolves player projectiles against enemies.
///
/// A projectile damages each enemy at most once and stops as soon as its
/// pierce is exhausted, even mid-frame.
pub(crate) fn resolve_player_fire(
    player: &mut Player,
    enemies: &mut [Enemy],
    projectiles: &mut [Projectile],
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    let live = |projectile: &&mut Projectile| {
        projectile.is_live() && projectile.is_friendly() && projectile.laser.is_none()
    };
    for projectile in projectiles.iter_mut().filter(live) {
        let shot = projectile.aabb();
        for enemy in enemies.iter_mut() {
            if !projectile.is_live() {
                break;
            }
            if !enemy.is_alive() || !shot.intersects(&enemy.aabb()) {
                continue;
            }
            if !projectile.register_hit(enemy.id) {
                continue;
            }
            impact(player, enemy, projectile, config, ctx);
        }
    }
}

fn impact(
    player: &mut Player,
    enemy: &mut Enemy,
    projectile: &mut Projectile,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    if enemy.is_invulnerable() {
        ctx.particles(projectile.center(), 8, Color::CYAN, ParticleKind::ShieldHit);
        ctx.sound(SoundCue::Deflect, 0.5);
        spend(projectile, enemy.id, false, ctx);
        return;
    }

    let hit = roll_damage(projectile.damage, player, config, ctx);
    let color = if hit.critical { Color::GOLD } else { Color::WHITE };
    let report = enemy.apply_damage(hit.amount, color, config.boss.fury_threshold, ctx);
    ctx.particles(projectile.center(), 6, color, ParticleKind::Spark);
    ctx.sound(
        if hit.critical {
            SoundCue::Crit
        } else {
            SoundCue::Hit
        },
        0.3,
    );
    if report.fury_triggered {
        debug!(boss = enemy.id.get(), "boss fury latched");
    }

    steal_life(player, hit.amount, ctx);
    if !report.lethal {
        inflict_statuses(player, enemy, config, ctx);
    }
    spend(projectile, enemy.id, true, ctx);
}

/// Spends one pierce and queues the blast the impact calls for.
///
/// An explosive projectile always detonates when exhausted; otherwise a
/// landed hit detonates with the payload's on-hit chance. Either way the
/// struck enemy is left out of the blast.
fn spend(projectile: &mut Projectile, struck: EnemyId, landed: bool, ctx: &mut SimulationContext) {
    let exhausted = projectile.consume_pierce();
    let Some(explosive) = projectile.explosive else {
        return;
    };
    if exhausted || (landed && ctx.roll(explosive.on_hit_chance)) {
        ctx.queue_detonation(Detonation {
            position: projectile.center(),
            explosive,
            damage: projectile.damage,
            exclude: Some(struck),
        });
    }
}

/// Heals the player by the life-steal share of `damage`.
pub(crate) fn steal_life(player: &mut Player, damage: f32, ctx: &mut SimulationContext) {
    if player.life_steal <= 0.0 || !player.is_alive() {
        return;
    }
    let restored = player.heal(damage * player.life_steal);
    if restored >= 1.0 {
        ctx.floating_text(
            player.center() - glam::Vec2::new(0.0, player.size.y * 0.5),
            format!("+{}", restored.round() as i64),
            Color::GREEN,
        );
    }
}

fn inflict_statuses(
    player: &Player,
    enemy: &mut Enemy,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    let tuning = &config.status;
    if let Some(burn) = player.status_modifiers.burn {
        if ctx.roll(burn.chance) {
            enemy.status.apply(StatusEffect::burn(
                tuning.burn_damage_per_tick * burn.potency,
                Duration::from_millis(tuning.burn_tick_interval_ms),
                Duration::from_millis(tuning.burn_duration_ms),
                tuning.burn_max_stacks,
                ctx.now(),
            ));
        }
    }
    if let Some(chill) = player.status_modifiers.chill {
        if ctx.roll(chill.chance) {
            enemy.status.apply(StatusEffect::chill(
                deepen(tuning.chill_movement_factor, chill.potency),
                deepen(tuning.chill_attack_factor, chill.potency),
                Duration::from_millis(tuning.chill_duration_ms),
            ));
        }
    }
}

/// Scales the slowdown of `factor` by `potency`.
fn deepen(factor: f32, potency: f32) -> f32 {
    (1.0 - (1.0 - factor) * potency).clamp(SLOW_FLOOR, 1.0)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use wave_arena_core::{Brain, EnemyKind, Explosive, LaserState, StatusKind, StatusProc};

    use super::*;
    use crate::test_support::{enemy, player, player_shot};

    #[test]
    fn crits_deal_the_scaled_maximum() {
        let mut config = SimulationConfig::default();
        config.admin.enabled = true;
        config.admin.damage_multiplier = 2.0;
        let mut player = player(&config);
        player.crit_chance = 1.0;
        let mut ctx = SimulationContext::new(4);

        let hit = roll_damage(
            ProjectileDamage::Rolled { scale: 0.5 },
            &player,
            &config,
            &mut ctx,
        );
        assert!(hit.critical);
        assert_eq!(hit.amount, player.max_damage * player.crit_multiplier);

        let fixed = roll_damage(ProjectileDamage::Fixed(5.0), &player, &config, &mut ctx);
        assert_eq!(
            fixed,
            RolledHit {
                amount: 10.0,
                critical: false
            }
        );
    }

    #[test]
    fn charging_bosses_deflect_hits_but_still_spend_pierce() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(4);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Boss, Vec2::new(400.0, 200.0))];
        if let Brain::Boss(brain) = &mut enemies[0].brain {
            brain.laser = LaserState::Charging {
                until: Duration::from_secs(5),
            };
        }
        let mut shots = vec![player_shot(9, Vec2::new(400.0, 200.0), 2)];

        resolve_player_fire(&mut player, &mut enemies, &mut shots, &config, &mut ctx);

        assert_eq!(enemies[0].hp, enemies[0].max_hp);
        assert_eq!(shots[0].hits_left, 1);
        let mut events = Vec::new();
        ctx.drain_events(&mut events);
        assert!(events.iter().any(|event| matches!(
            event,
            wave_arena_core::Event::SpawnParticles {
                kind: ParticleKind::ShieldHit,
                ..
            }
        )));
    }

    #[test]
    fn exhausting_an_explosive_shot_queues_one_blast_without_the_struck_enemy() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(4);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Boss, Vec2::new(400.0, 200.0))];
        let mut shots = vec![player_shot(9, Vec2::new(400.0, 200.0), 1)];
        shots[0].explosive = Some(Explosive {
            radius: 80.0,
            on_hit_chance: 1.0,
            damage_factor: 0.5,
            max_targets: 4,
        });

        resolve_player_fire(&mut player, &mut enemies, &mut shots, &config, &mut ctx);

        let blasts = ctx.take_detonations();
        assert_eq!(blasts.len(), 1);
        assert_eq!(blasts[0].exclude, Some(enemies[0].id));
        assert!(!shots[0].is_live());
    }

    #[test]
    fn certain_procs_apply_scaled_statuses() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        player.status_modifiers.burn = Some(StatusProc {
            chance: 1.0,
            potency: 2.0,
        });
        player.status_modifiers.chill = Some(StatusProc {
            chance: 1.0,
            potency: 1.0,
        });
        let mut ctx = SimulationContext::new(4);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Boss, Vec2::new(400.0, 200.0))];
        let mut shots = vec![player_shot(9, Vec2::new(400.0, 200.0), 1)];

        resolve_player_fire(&mut player, &mut enemies, &mut shots, &config, &mut ctx);

        let status = &enemies[0].status;
        assert_eq!(status.len(), 2);
        let burn = status.iter().find_map(|effect| match effect.kind {
            StatusKind::Burn(burn) => Some(burn),
            StatusKind::Chill(_) => None,
        });
        assert_eq!(
            burn.map(|burn| burn.damage_per_tick),
            Some(config.status.burn_damage_per_tick * 2.0)
        );
        let (movement, attack) = status.slow_factors();
        assert!((movement - config.status.chill_movement_factor).abs() < 1e-5);
        assert!((attack - config.status.chill_attack_factor).abs() < 1e-5);
    }

    #[test]
    fn life_steal_returns_a_share_of_dealt_damage() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        player.hp = 50.0;
        player.life_steal = 0.5;
        player.crit_chance = 0.0;
        player.min_damage = 10.0;
        player.max_damage = 10.0;
        let mut ctx = SimulationContext::new(4);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Boss, Vec2::new(400.0, 200.0))];
        let mut shots = vec![player_shot(9, Vec2::new(400.0, 200.0), 1)];

        resolve_player_fire(&mut player, &mut enemies, &mut shots, &config, &mut ctx);

        assert_eq!(player.hp, 55.0);
    }

    #[test]
    fn potency_deepens_slows_down_to_a_floor() {
        assert!((deepen(0.5, 1.0) - 0.5).abs() < 1e-6);
        assert!((deepen(0.5, 1.5) - 0.25).abs() < 1e-6);
        assert_eq!(deepen(0.5, 10.0), SLOW_FLOOR);
    }
}
