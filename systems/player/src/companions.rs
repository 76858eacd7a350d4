use std::time::Duration;

use glam::Vec2;
use tracing::trace;
use wave_arena_core::{
    Enemy, Miniature, Owner, Player, PlayerTuning, Projectile, ProjectileDamage,
    ProjectileEffect, SimulationContext,
};

const ORBIT_RADIUS: f32 = 44.0;
const ORBIT_SPEED: f32 = 2.5;
const COMPANION_SHOT_SCALE: f32 = 0.7;

/// Runs miniature companion attacks and the thunderbolt cadence.
#[derive(Debug, Default)]
pub struct Companions;

impl Companions {
    /// Creates a new companion system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Orbits every companion, fires at the nearest enemy in range when its
    /// cadence allows, and requests a thunderbolt when one is due.
    ///
    /// Returns the number of companion shots fired.
    pub fn handle(
        &mut self,
        player: &mut Player,
        enemies: &[Enemy],
        tuning: &PlayerTuning,
        dt: Duration,
        ctx: &mut SimulationContext,
    ) -> usize {
        if !player.is_alive() {
            return 0;
        }

        let now = ctx.now();
        let cooldown = Duration::from_millis(tuning.miniature_cooldown_ms);
        let center = player.center();
        let mut fired = 0;

        for miniature in &mut player.miniatures {
            miniature.orbit_phase =
                (miniature.orbit_phase + ORBIT_SPEED * dt.as_secs_f32()) % std::f32::consts::TAU;
            if !ctx.clock().elapsed(miniature.last_shot, cooldown) {
                continue;
            }

            let origin = orbit_point(center, miniature);
            let Some(target) = nearest_enemy(enemies, origin, tuning.miniature_range) else {
                continue;
            };
            let Some(direction) = (target - origin).try_normalize() else {
                continue;
            };

            let mut projectile = Projectile::new(
                ctx.next_projectile_id(),
                Owner::Player,
                origin,
                direction * tuning.projectile_speed,
                tuning.projectile_size * COMPANION_SHOT_SCALE,
                ProjectileDamage::Rolled {
                    scale: tuning.miniature_damage_factor,
                },
            );
            projectile.effect = ProjectileEffect::Companion;
            ctx.spawn_projectile(projectile);
            miniature.last_shot = Some(now);
            fired += 1;
        }

        let interval = Duration::from_millis(tuning.thunderbolt_interval_ms);
        if player.thunderbolt && ctx.clock().elapsed(player.last_thunderbolt, interval) {
            player.last_thunderbolt = Some(now);
            ctx.trigger_thunderbolt();
            trace!(at = ?now, "thunderbolt requested");
        }

        fired
    }
}

/// World position of `miniature` orbiting `player`.
#[must_use]
pub fn miniature_position(player: &Player, miniature: &Miniature) -> Vec2 {
    orbit_point(player.center(), miniature)
}

fn orbit_point(center: Vec2, miniature: &Miniature) -> Vec2 {
    center + Vec2::from_angle(miniature.orbit_phase) * ORBIT_RADIUS
}

/// Centre of the closest living enemy within `range`; ties go to the lower id.
fn nearest_enemy(enemies: &[Enemy], from: Vec2, range: f32) -> Option<Vec2> {
    enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(|enemy| (enemy, enemy.center().distance(from)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|(a, a_distance), (b, b_distance)| {
            a_distance.total_cmp(b_distance).then(a.id.cmp(&b.id))
        })
        .map(|(enemy, _)| enemy.center())
}
