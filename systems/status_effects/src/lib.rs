#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Status effect ticker that ages burns and chills and applies burn damage.
//!
//! Chills only age here; their slow factors are read by the systems that
//! compute movement and shot cadence. Enemies brought to zero hit points by a
//! burn are left in place for the shared death handler to resolve.

use std::time::Duration;

use wave_arena_core::{Color, Enemy, SimulationContext, StatusEffects, StatusKind};

/// Ticks the status effects attached to every living enemy.
#[derive(Debug, Default)]
pub struct StatusTicker;

impl StatusTicker {
    /// Creates a new status ticker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Ages every enemy's effects by `dt` and applies due burn damage.
    ///
    /// Returns the number of enemies the burns killed this frame.
    pub fn handle(
        &mut self,
        enemies: &mut [Enemy],
        dt: Duration,
        fury_threshold: f32,
        ctx: &mut SimulationContext,
    ) -> usize {
        let now = ctx.now();
        let mut lethal = 0;

        for enemy in enemies.iter_mut().filter(|enemy| enemy.is_alive()) {
            if enemy.status.is_empty() {
                continue;
            }

            let burn_damage = tick(&mut enemy.status, dt, now);
            if burn_damage > 0.0 {
                let report = enemy.apply_damage(burn_damage, Color::ORANGE, fury_threshold, ctx);
                if report.lethal {
                    lethal += 1;
                }
            }
        }

        lethal
    }
}

/// Ages `effects` by `dt` and returns the burn damage due at `now`.
///
/// Effects whose remaining duration reaches zero are removed after their
/// final tick is evaluated.
pub fn tick(effects: &mut StatusEffects, dt: Duration, now: Duration) -> f32 {
    let mut damage = 0.0;

    for effect in effects.iter_mut() {
        effect.remaining = effect.remaining.saturating_sub(dt);
        match &mut effect.kind {
            StatusKind::Burn(burn) => {
                if now.saturating_sub(burn.last_tick) >= burn.tick_interval {
                    damage += burn.damage_per_tick * burn.stacks as f32;
                    burn.last_tick = now;
                }
            }
            StatusKind::Chill(_) => {}
        }
    }

    effects.retain(|effect| !effect.remaining.is_zero());
    damage
}
