#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy and boss behavior engine.
//!
//! Every enemy kind is driven by an exhaustive match over its [`Brain`]:
//! grounded kinds fall in, follow and shoot; healing drones cycle through
//! scan, approach, pulse and retreat; bosses hold an altitude, dodge incoming
//! fire and start abilities under a shared cooldown. Decisions that involve
//! other enemies read a snapshot taken at the start of the pass, and heals are
//! applied once every brain has run so no enemy observes a half-updated
//! neighbour. After the pass a separation step pushes overlapping grounded
//! enemies apart, enemies that left the arena are flagged for removal, and
//! the survivors are clamped to the arena floor and walls.

use std::time::Duration;

use glam::Vec2;
use wave_arena_core::{
    ArenaBounds, Brain, Color, Enemy, EnemyId, EnemyKind, ParticleKind, Player, Projectile,
    Removal, SimulationConfig, SimulationContext, SoundCue,
};

mod boss;
mod drone;
mod grounded;
mod separation;

pub use separation::separate;

/// What other enemies may know about one another during a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AllySnapshot {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) center: Vec2,
    pub(crate) hp_fraction: f32,
    pub(crate) alive: bool,
}

impl AllySnapshot {
    fn of(enemy: &Enemy) -> Self {
        Self {
            id: enemy.id,
            kind: enemy.kind,
            center: enemy.center(),
            hp_fraction: enemy.hp_fraction(),
            alive: enemy.is_alive(),
        }
    }
}

/// Heal released by a drone pulse, applied after every brain ran.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct HealRequest {
    pub(crate) target: EnemyId,
    pub(crate) fraction: f32,
}

/// Shared, read-only inputs of one behavior pass.
pub(crate) struct Frame<'a> {
    pub(crate) player_center: Vec2,
    pub(crate) projectiles: &'a [Projectile],
    pub(crate) allies: &'a [AllySnapshot],
    pub(crate) config: &'a SimulationConfig,
    pub(crate) bounds: ArenaBounds,
    pub(crate) dt: Duration,
    pub(crate) wave: u32,
}

impl Frame<'_> {
    pub(crate) fn seconds(&self) -> f32 {
        self.dt.as_secs_f32()
    }

    pub(crate) fn is_alive(&self, id: EnemyId) -> bool {
        self.allies.iter().any(|ally| ally.id == id && ally.alive)
    }
}

/// Behavior engine driving every enemy brain.
#[derive(Debug, Default)]
pub struct EnemyBehavior {
    allies: Vec<AllySnapshot>,
    heals: Vec<HealRequest>,
}

impl EnemyBehavior {
    /// Creates a behavior engine with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one behavior pass over `enemies`.
    ///
    /// Minions and enemy projectiles are buffered on `ctx`; the caller merges
    /// them into the world once the pass returns.
    pub fn handle(
        &mut self,
        enemies: &mut [Enemy],
        player: &Player,
        projectiles: &[Projectile],
        wave: u32,
        config: &SimulationConfig,
        dt: Duration,
        ctx: &mut SimulationContext,
    ) {
        self.allies.clear();
        self.allies.extend(enemies.iter().map(AllySnapshot::of));
        self.heals.clear();

        let frame = Frame {
            player_center: player.center(),
            projectiles,
            allies: &self.allies,
            config,
            bounds: config.arena.bounds(),
            dt,
            wave,
        };

        for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            match enemy.brain {
                Brain::Grounded => grounded::update(enemy, &frame, ctx),
                Brain::Drone(_) => drone::update(enemy, &frame, &mut self.heals, ctx),
                Brain::Boss(_) => boss::update(enemy, &frame, ctx),
            }
        }

        apply_heals(enemies, &self.heals, ctx);

        let bounds = config.arena.bounds();
        separate(enemies, config.enemies.separation_strength);
        for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            if !bounds.contains(&enemy.aabb(), config.arena.despawn_margin) {
                enemy.removal = Some(Removal::LeftArena);
                continue;
            }
            enemy.position = bounds.clamp_to_floor(&enemy.aabb());
        }
    }
}

fn apply_heals(enemies: &mut [Enemy], heals: &[HealRequest], ctx: &mut SimulationContext) {
    for request in heals {
        let Some(enemy) = enemies.iter_mut().find(|enemy| enemy.id == request.target) else {
            continue;
        };
        let restored = enemy.heal(enemy.max_hp * request.fraction);
        if restored <= 0.0 {
            continue;
        }
        let center = enemy.center();
        ctx.floating_text(
            Vec2::new(center.x, enemy.position.y),
            format!("+{}", restored.round() as i64),
            Color::GREEN,
        );
        ctx.particles(center, 12, Color::GREEN, ParticleKind::Heal);
    }
}

/// Moves `enemy` toward `target` at `speed`, stopping on arrival.
pub(crate) fn approach(enemy: &mut Enemy, target: Vec2, speed: f32, seconds: f32) -> f32 {
    let offset = target - enemy.center();
    let distance = offset.length();
    let step = speed * seconds;
    if distance <= step || distance <= f32::EPSILON {
        enemy.position += offset;
        enemy.velocity = Vec2::ZERO;
        return 0.0;
    }
    enemy.velocity = offset / distance * speed;
    enemy.position += enemy.velocity * seconds;
    distance - step
}

/// Fires an aimed shot at the player once the chill-scaled cooldown elapsed.
///
/// Returns whether a shot was fired.
pub(crate) fn shoot(
    enemy: &mut Enemy,
    frame: &Frame<'_>,
    damage_multiplier: f32,
    ctx: &mut SimulationContext,
) -> bool {
    if enemy.shoot_cooldown.is_zero() {
        return false;
    }
    let (_, attack_factor) = enemy.status.slow_factors();
    if attack_factor <= 0.0 {
        return false;
    }
    let cooldown = enemy.shoot_cooldown.div_f32(attack_factor);
    if !ctx.clock().elapsed(enemy.last_shot, cooldown) {
        return false;
    }

    let origin = enemy.center();
    let Some(direction) = (frame.player_center - origin).try_normalize() else {
        return false;
    };
    let tuning = &frame.config.enemies;
    let _ = ctx.spawn_enemy_projectile(
        enemy.id,
        origin,
        direction * tuning.projectile_speed,
        tuning.projectile_size,
        enemy.damage * damage_multiplier,
    );
    enemy.last_shot = Some(ctx.now());
    ctx.sound(SoundCue::EnemyShoot, 0.2);
    true
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use wave_arena_core::EnemySpawn;

    pub(crate) fn spawn(
        config: &SimulationConfig,
        id: u32,
        kind: EnemyKind,
        center: Vec2,
    ) -> Enemy {
        let spawn = EnemySpawn {
            kind,
            center,
            wave: 1,
            summoned_by: None,
        };
        Enemy::spawn(EnemyId::new(id), &spawn, config, Duration::ZERO)
    }

    pub(crate) fn player_at(config: &SimulationConfig, center: Vec2) -> Player {
        Player::new(&config.player, center)
    }
}
