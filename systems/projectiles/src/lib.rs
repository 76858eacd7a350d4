#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Projectile motion resolver.
//!
//! Advances every live projectile, steers homing shots, extends and expires
//! laser beams, and retires projectiles that leave the arena. Explosive
//! projectiles leaving the arena queue their blast on the context so the
//! collision pass resolves it together with impact blasts.

use std::{
    f32::consts::{PI, TAU},
    time::Duration,
};

use glam::Vec2;
use tracing::trace;
use wave_arena_core::{
    ArenaBounds, Detonation, Enemy, EnemyId, Homing, Projectile, SimulationContext,
};

/// Per-frame projectile motion resolver.
#[derive(Debug, Default)]
pub struct ProjectileMotion;

impl ProjectileMotion {
    /// Creates a new projectile motion resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Advances `projectiles` by `dt`, steering homing shots toward `enemies`.
    ///
    /// Returns the number of projectiles retired this frame.
    pub fn handle(
        &mut self,
        projectiles: &mut [Projectile],
        enemies: &[Enemy],
        bounds: ArenaBounds,
        dt: Duration,
        ctx: &mut SimulationContext,
    ) -> usize {
        let seconds = dt.as_secs_f32();
        let now = ctx.now();
        let mut retired = 0;

        for projectile in projectiles.iter_mut().filter(|projectile| projectile.is_live()) {
            if let Some(beam) = projectile.laser.as_mut() {
                beam.length = (beam.length + beam.extend_speed * seconds).min(beam.max_length);
                if now >= beam.expires_at {
                    projectile.spent = true;
                    retired += 1;
                }
                continue;
            }

            if let Some(homing) = projectile.homing.as_mut() {
                let center = projectile.position + projectile.size * 0.5;
                projectile.velocity = steer(homing, center, projectile.velocity, enemies, seconds);
            }

            projectile.position += projectile.velocity * seconds;

            if !bounds.contains(&projectile.aabb(), 0.0) {
                projectile.spent = true;
                retired += 1;
                if let Some(explosive) = projectile.explosive {
                    trace!(projectile = projectile.id.get(), "out of bounds detonation");
                    ctx.queue_detonation(Detonation {
                        position: projectile.center(),
                        explosive,
                        damage: projectile.damage,
                        exclude: None,
                    });
                }
            }
        }

        retired
    }
}

/// Turns `velocity` toward the homing target by at most `strength` turns per second.
///
/// A dead or missing target is replaced by the nearest living enemy; with no
/// enemy left the projectile keeps flying straight.
fn steer(
    homing: &mut Homing,
    center: Vec2,
    velocity: Vec2,
    enemies: &[Enemy],
    seconds: f32,
) -> Vec2 {
    let locked = homing
        .target
        .and_then(|id| living(enemies, id))
        .map(Enemy::center);
    let target = match locked {
        Some(target) => target,
        None => {
            let Some(enemy) = nearest_living(enemies, center) else {
                homing.target = None;
                return velocity;
            };
            homing.target = Some(enemy.id);
            enemy.center()
        }
    };

    let Some(desired) = (target - center).try_normalize() else {
        return velocity;
    };
    if velocity.length_squared() <= f32::EPSILON {
        return velocity;
    }

    let mut difference = desired.y.atan2(desired.x) - velocity.y.atan2(velocity.x);
    if difference > PI {
        difference -= TAU;
    } else if difference < -PI {
        difference += TAU;
    }
    let max_turn = homing.strength.max(0.0) * TAU * seconds;
    let turn = difference.clamp(-max_turn, max_turn);
    Vec2::from_angle(turn).rotate(velocity)
}

fn living(enemies: &[Enemy], id: EnemyId) -> Option<&Enemy> {
    enemies
        .iter()
        .find(|enemy| enemy.id == id)
        .filter(|enemy| enemy.is_alive())
}

/// Closest living enemy to `point`; ties go to the lower id.
fn nearest_living(enemies: &[Enemy], point: Vec2) -> Option<&Enemy> {
    enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .min_by(|a, b| {
            a.center()
                .distance_squared(point)
                .total_cmp(&b.center().distance_squared(point))
                .then(a.id.cmp(&b.id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_arena_core::{EnemyKind, EnemySpawn, SimulationConfig};

    fn enemy(id: u32, center: Vec2) -> Enemy {
        let spawn = EnemySpawn {
            kind: EnemyKind::Standard,
            center,
            wave: 1,
            summoned_by: None,
        };
        Enemy::spawn(
            EnemyId::new(id),
            &spawn,
            &SimulationConfig::default(),
            Duration::ZERO,
        )
    }

    #[test]
    fn turn_rate_is_bounded_and_speed_preserved() {
        let mut homing = Homing {
            strength: 0.25,
            target: None,
        };
        let enemies = vec![enemy(1, Vec2::new(0.0, 100.0))];
        let velocity = Vec2::new(300.0, 0.0);

        let steered = steer(&mut homing, Vec2::ZERO, velocity, &enemies, 0.1);

        let turned = steered.y.atan2(steered.x);
        assert!((turned - 0.25 * TAU * 0.1).abs() < 1e-4);
        assert!((steered.length() - 300.0).abs() < 1e-3);
        assert_eq!(homing.target, Some(EnemyId::new(1)));
    }

    #[test]
    fn dead_target_is_replaced_by_the_nearest_living_enemy() {
        let mut enemies = vec![
            enemy(1, Vec2::new(50.0, 0.0)),
            enemy(2, Vec2::new(400.0, 0.0)),
            enemy(3, Vec2::new(200.0, 0.0)),
        ];
        enemies[0].hp = 0.0;
        let mut homing = Homing {
            strength: 1.0,
            target: Some(EnemyId::new(1)),
        };

        let _ = steer(&mut homing, Vec2::ZERO, Vec2::X * 100.0, &enemies, 0.016);
        assert_eq!(homing.target, Some(EnemyId::new(3)));
    }

    #[test]
    fn no_enemies_means_flying_straight() {
        let mut homing = Homing {
            strength: 1.0,
            target: Some(EnemyId::new(4)),
        };
        let velocity = Vec2::new(10.0, -5.0);
        assert_eq!(steer(&mut homing, Vec2::ZERO, velocity, &[], 0.016), velocity);
        assert_eq!(homing.target, None);
    }
}
