use std::time::Duration;

use glam::Vec2;
use rand::seq::SliceRandom;
use wave_arena_core::{
    Explosive, Homing, Owner, Player, PlayerTuning, Projectile, ProjectileDamage,
    ProjectileEffect, SimulationContext, SoundCue, WeaponBehavior,
};

const SPREAD_ANGLE: f32 = 15.0 * std::f32::consts::PI / 180.0;
const SPREAD_SCALE: f32 = 0.8;
const RAPID_CADENCE: f32 = 2.0;
const RAPID_SCALE: f32 = 0.55;
const RAPID_HOMING: f32 = 0.35;
const PIERCING_HITS: u32 = 3;
const EXPLOSIVE_PAYLOAD: Explosive = Explosive {
    radius: 90.0,
    on_hit_chance: 1.0,
    damage_factor: 0.6,
    max_targets: 4,
};
const RAINBOW_POOL: [WeaponBehavior; 5] = [
    WeaponBehavior::Straight,
    WeaponBehavior::Spread,
    WeaponBehavior::RapidHoming,
    WeaponBehavior::Piercing,
    WeaponBehavior::Explosive,
];

/// Fires the equipped weapon toward `aim` if the shot cadence allows it.
///
/// Returns the number of projectiles spawned.
pub(crate) fn fire(
    player: &mut Player,
    aim: Vec2,
    tuning: &PlayerTuning,
    ctx: &mut SimulationContext,
) -> usize {
    let rate = player.attack_speed.value() * cadence(player.weapon);
    if !rate.is_finite() || rate <= 0.0 {
        return 0;
    }
    let Ok(interval) = Duration::try_from_secs_f32(1.0 / rate) else {
        return 0;
    };
    if !ctx.clock().elapsed(player.last_shot, interval) {
        return 0;
    }
    player.last_shot = Some(ctx.now());

    let origin = player.center();
    let direction = (aim - origin)
        .try_normalize()
        .unwrap_or(Vec2::new(player.facing, 0.0));
    let (behavior, tag) = match player.weapon {
        WeaponBehavior::Rainbow => {
            let picked = RAINBOW_POOL
                .choose(ctx.rng())
                .copied()
                .unwrap_or(WeaponBehavior::Straight);
            (picked, Some(ProjectileEffect::Rainbow))
        }
        equipped => (equipped, None),
    };

    let mut volley = Vec::with_capacity(3);
    match behavior {
        WeaponBehavior::Spread => {
            for angle in [-SPREAD_ANGLE, 0.0, SPREAD_ANGLE] {
                let heading = Vec2::from_angle(angle).rotate(direction);
                volley.push(shot(
                    player,
                    tuning,
                    heading,
                    SPREAD_SCALE,
                    ProjectileEffect::Spread,
                    ctx,
                ));
            }
        }
        WeaponBehavior::RapidHoming => {
            let mut projectile = shot(
                player,
                tuning,
                direction,
                RAPID_SCALE,
                ProjectileEffect::Homing,
                ctx,
            );
            projectile.homing = Some(Homing {
                strength: RAPID_HOMING + player.homing_strength,
                target: None,
            });
            volley.push(projectile);
        }
        WeaponBehavior::Piercing => {
            let mut projectile = shot(
                player,
                tuning,
                direction,
                1.0,
                ProjectileEffect::Piercing,
                ctx,
            );
            projectile.hits_left = PIERCING_HITS + player.extra_pierce;
            volley.push(projectile);
        }
        WeaponBehavior::Explosive => {
            let mut projectile = shot(
                player,
                tuning,
                direction,
                1.0,
                ProjectileEffect::Explosive,
                ctx,
            );
            projectile.explosive = Some(EXPLOSIVE_PAYLOAD);
            volley.push(projectile);
        }
        WeaponBehavior::Straight | WeaponBehavior::Rainbow => {
            volley.push(shot(player, tuning, direction, 1.0, ProjectileEffect::Standard, ctx));
        }
    }

    let fired = volley.len();
    for mut projectile in volley {
        if let Some(tag) = tag {
            projectile.effect = tag;
        }
        ctx.spawn_projectile(projectile);
    }
    ctx.sound(SoundCue::Shoot, 0.3);
    fired
}

/// Fire-rate multiplier of a weapon.
fn cadence(weapon: WeaponBehavior) -> f32 {
    match weapon {
        WeaponBehavior::RapidHoming => RAPID_CADENCE,
        WeaponBehavior::Straight
        | WeaponBehavior::Spread
        | WeaponBehavior::Piercing
        | WeaponBehavior::Explosive
        | WeaponBehavior::Rainbow => 1.0,
    }
}

/// Builds one projectile carrying the player's acquired projectile upgrades.
fn shot(
    player: &Player,
    tuning: &PlayerTuning,
    direction: Vec2,
    scale: f32,
    effect: ProjectileEffect,
    ctx: &mut SimulationContext,
) -> Projectile {
    let mut projectile = Projectile::new(
        ctx.next_projectile_id(),
        Owner::Player,
        player.center(),
        direction * tuning.projectile_speed,
        tuning.projectile_size,
        ProjectileDamage::Rolled { scale },
    );
    projectile.effect = effect;
    projectile.hits_left += player.extra_pierce;
    projectile.explosive = player.explosive;
    if player.homing_strength > 0.0 {
        projectile.homing = Some(Homing {
            strength: player.homing_strength,
            target: None,
        });
    }
    projectile
}
