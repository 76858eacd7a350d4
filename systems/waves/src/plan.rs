use std::time::Duration;

use wave_arena_core::{EnemyKind, SessionModifiers, SimulationContext, WaveTuning};

/// Population and pacing of one wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavePlan {
    /// Wave number, starting at one.
    pub wave: u32,
    /// Enemies to spawn.
    pub target: u32,
    /// Delay between two spawns.
    pub spawn_interval: Duration,
    /// Whether the wave spawns bosses instead of regular enemies.
    pub boss_wave: bool,
}

impl WavePlan {
    /// Computes the plan of `wave`.
    ///
    /// Regular waves grow linearly and double under the more-enemies
    /// modifier. Boss waves override the count with one boss, or two under
    /// the modifier. The spawn interval shrinks per wave down to its floor.
    #[must_use]
    pub fn for_wave(wave: u32, tuning: &WaveTuning, modifiers: &SessionModifiers) -> Self {
        let wave = wave.max(1);
        let boss_wave = tuning.boss_every > 0 && wave % tuning.boss_every == 0;
        let multiplier = if modifiers.more_enemies { 2 } else { 1 };
        let target = if boss_wave {
            multiplier
        } else {
            let regular = tuning
                .initial_enemy_count
                .saturating_add(tuning.enemies_per_wave.saturating_mul(wave - 1));
            regular.saturating_mul(multiplier)
        };

        let shrink = tuning
            .spawn_interval_decrement_ms
            .saturating_mul(u64::from(wave - 1));
        let interval = tuning
            .spawn_interval_ms
            .saturating_sub(shrink)
            .max(tuning.spawn_interval_floor_ms);

        Self {
            wave,
            target,
            spawn_interval: Duration::from_millis(interval),
            boss_wave,
        }
    }
}

/// Rest period that follows the clearing of `cleared` (zero before wave one).
#[must_use]
pub fn intermission_after(cleared: u32, tuning: &WaveTuning) -> Duration {
    let extra = tuning
        .intermission_increment_ms
        .saturating_mul(u64::from(cleared));
    Duration::from_millis(tuning.intermission_ms.saturating_add(extra))
}

/// Picks the kind of a regular spawn, drones first, then splitters.
pub(crate) fn regular_kind(
    wave: u32,
    tuning: &WaveTuning,
    ctx: &mut SimulationContext,
) -> EnemyKind {
    if wave >= tuning.drone_from_wave && ctx.roll(tuning.drone_chance) {
        return EnemyKind::HealingDrone;
    }
    if wave >= tuning.splitter_from_wave && ctx.roll(tuning.splitter_chance) {
        return EnemyKind::Splitter;
    }
    EnemyKind::Standard
}
