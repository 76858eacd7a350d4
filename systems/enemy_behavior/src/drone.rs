use std::time::Duration;

use glam::Vec2;
use tracing::debug;
use wave_arena_core::{
    Brain, Color, DronePhase, Enemy, EnemyId, EnemyKind, ParticleKind, SimulationContext,
    SoundCue,
};

use crate::{approach, Frame, HealRequest};

/// Advances the scan, approach, pulse and retreat cycle of a healing drone.
pub(crate) fn update(
    enemy: &mut Enemy,
    frame: &Frame<'_>,
    heals: &mut Vec<HealRequest>,
    ctx: &mut SimulationContext,
) {
    let Brain::Drone(brain) = &mut enemy.brain else {
        return;
    };
    let phase = std::mem::replace(
        &mut brain.phase,
        DronePhase::IdleScanning {
            next_scan: Duration::ZERO,
        },
    );
    let next = advance(enemy, phase, frame, heals, ctx);
    if let Brain::Drone(brain) = &mut enemy.brain {
        brain.phase = next;
    }
}

fn advance(
    enemy: &mut Enemy,
    phase: DronePhase,
    frame: &Frame<'_>,
    heals: &mut Vec<HealRequest>,
    ctx: &mut SimulationContext,
) -> DronePhase {
    let tuning = &frame.config.drone;
    let now = ctx.now();
    let seconds = frame.seconds();
    let (movement_factor, _) = enemy.status.slow_factors();
    let speed = enemy.speed * movement_factor;
    let scan_interval = Duration::from_millis(tuning.scan_interval_ms);

    match phase {
        DronePhase::IdleScanning { next_scan } => {
            let hover = (tuning.safe_altitude_min + tuning.safe_altitude_max) * 0.5;
            if enemy.position.y < tuning.safe_altitude_min {
                let target = Vec2::new(enemy.center().x, hover + enemy.size.y * 0.5);
                let _ = approach(enemy, target, speed, seconds);
            } else {
                enemy.velocity = Vec2::ZERO;
            }

            if now < next_scan {
                return DronePhase::IdleScanning { next_scan };
            }
            let targets = select_targets(enemy, frame);
            if targets.is_empty() {
                return DronePhase::IdleScanning {
                    next_scan: now + scan_interval,
                };
            }
            DronePhase::MovingToHeal { targets }
        }
        DronePhase::MovingToHeal { mut targets } => {
            targets.retain(|target| frame.is_alive(*target));
            let Some(centroid) = centroid(frame, &targets) else {
                return retreat(ctx, tuning.safe_altitude_min, tuning.safe_altitude_max);
            };

            let remaining = enemy.center().distance(centroid);
            if remaining > tuning.heal_range {
                let _ = approach(enemy, centroid, speed, seconds);
                return DronePhase::MovingToHeal { targets };
            }

            enemy.velocity = Vec2::ZERO;
            ctx.particles(enemy.center(), 10, Color::GREEN, ParticleKind::Heal);
            DronePhase::HealingPulse {
                targets,
                release_at: now + Duration::from_millis(tuning.pulse_ms),
            }
        }
        DronePhase::HealingPulse {
            targets,
            release_at,
        } => {
            enemy.velocity = Vec2::ZERO;
            if now < release_at {
                return DronePhase::HealingPulse {
                    targets,
                    release_at,
                };
            }

            let mut healed = 0;
            for target in targets.iter().filter(|target| frame.is_alive(**target)) {
                heals.push(HealRequest {
                    target: *target,
                    fraction: tuning.heal_fraction,
                });
                healed += 1;
            }
            if healed > 0 {
                ctx.particles(enemy.center(), 24, Color::GREEN, ParticleKind::Heal);
                ctx.sound(SoundCue::Heal, 0.4);
                debug!(drone = enemy.id.get(), healed, "drone heal pulse");
            }
            retreat(ctx, tuning.safe_altitude_min, tuning.safe_altitude_max)
        }
        DronePhase::Retreating { altitude } => {
            let target = Vec2::new(enemy.center().x, altitude + enemy.size.y * 0.5);
            if approach(enemy, target, speed, seconds) > 0.0 {
                return DronePhase::Retreating { altitude };
            }
            DronePhase::IdleScanning {
                next_scan: now + scan_interval,
            }
        }
    }
}

fn retreat(ctx: &mut SimulationContext, low: f32, high: f32) -> DronePhase {
    DronePhase::Retreating {
        altitude: ctx.uniform(low, high),
    }
}

/// Damaged allies in scan range, lowest hit point fraction first.
fn select_targets(drone: &Enemy, frame: &Frame<'_>) -> Vec<EnemyId> {
    let tuning = &frame.config.drone;
    let origin = drone.center();
    let mut candidates: Vec<_> = frame
        .allies
        .iter()
        .filter(|ally| ally.alive && ally.id != drone.id)
        .filter(|ally| ally.kind != EnemyKind::HealingDrone)
        .filter(|ally| ally.hp_fraction < 1.0)
        .filter(|ally| ally.center.distance(origin) <= tuning.scan_range)
        .collect();
    candidates.sort_by(|a, b| a.hp_fraction.total_cmp(&b.hp_fraction).then(a.id.cmp(&b.id)));
    candidates
        .into_iter()
        .take(tuning.max_targets)
        .map(|ally| ally.id)
        .collect()
}

fn centroid(frame: &Frame<'_>, targets: &[EnemyId]) -> Option<Vec2> {
    let points: Vec<Vec2> = frame
        .allies
        .iter()
        .filter(|ally| targets.contains(&ally.id))
        .map(|ally| ally.center)
        .collect();
    if points.is_empty() {
        return None;
    }
    Some(points.iter().copied().sum::<Vec2>() / points.len() as f32)
}
