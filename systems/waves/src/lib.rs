#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave and encounter scheduler.
//!
//! Cycles through intermission, spawning and fighting. Every timer is a
//! countdown decremented by the frame delta, so a paused host freezes the
//! schedule together with the rest of the simulation.

use std::time::Duration;

use glam::Vec2;
use tracing::info;
use wave_arena_core::{
    Color, Enemy, EnemyKind, EnemySpawn, Event, Platform, Player, Projectile, SimulationConfig,
    SimulationContext, SoundCue,
};

mod plan;

pub use plan::{intermission_after, WavePlan};

/// Horizontal distance from the side walls kept by new spawns.
const SPAWN_MARGIN: f32 = 60.0;
/// Height above the arena at which new enemies appear.
const SPAWN_HEIGHT: f32 = 60.0;

/// Phase of the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WavePhase {
    /// Resting between waves.
    Intermission {
        /// Time left before the next wave starts.
        remaining: Duration,
    },
    /// Spawning the current wave.
    Spawning {
        /// Time left before the next spawn.
        next_spawn_in: Duration,
    },
    /// Every enemy of the wave is out; waiting for the arena to clear.
    Fighting,
}

/// Transition taken during one scheduler step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveTransition {
    /// A wave started spawning.
    Started(WavePlan),
    /// The last enemy of the wave spawned.
    FullySpawned,
    /// The wave was cleared.
    Cleared(u32),
}

/// Mutable state the scheduler touches when a wave clears.
#[derive(Debug)]
pub struct Battlefield<'a> {
    /// Healed on clear.
    pub player: &'a mut Player,
    /// Emptied on clear.
    pub projectiles: &'a mut Vec<Projectile>,
    /// Destructible ones are moved on clear.
    pub platforms: &'a mut [Platform],
}

/// Three-state wave scheduler.
#[derive(Debug)]
pub struct WaveScheduler {
    phase: WavePhase,
    plan: WavePlan,
    spawned: u32,
    last_cleared: u32,
}

impl WaveScheduler {
    /// Creates a scheduler resting before wave one.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            phase: WavePhase::Intermission {
                remaining: intermission_after(0, &config.waves),
            },
            plan: WavePlan {
                wave: 0,
                target: 0,
                spawn_interval: Duration::ZERO,
                boss_wave: false,
            },
            spawned: 0,
            last_cleared: 0,
        }
    }

    /// Current wave number; zero before the first wave.
    #[must_use]
    pub fn wave(&self) -> u32 {
        self.plan.wave
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    /// Plan of the current wave.
    #[must_use]
    pub fn plan(&self) -> WavePlan {
        self.plan
    }

    /// Enemies spawned so far in the current wave.
    #[must_use]
    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Last wave that was cleared.
    #[must_use]
    pub fn last_cleared(&self) -> u32 {
        self.last_cleared
    }

    /// Advances the schedule by `dt`.
    ///
    /// `enemies` must already contain every enemy spawned earlier in the
    /// frame; enemies spawned here are buffered on `ctx`.
    pub fn handle(
        &mut self,
        enemies: &[Enemy],
        field: Battlefield<'_>,
        config: &SimulationConfig,
        dt: Duration,
        ctx: &mut SimulationContext,
    ) -> Option<WaveTransition> {
        match self.phase {
            WavePhase::Intermission { remaining } => {
                let remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    self.phase = WavePhase::Intermission { remaining };
                    return None;
                }
                Some(self.start_next_wave(config, ctx))
            }
            WavePhase::Spawning { next_spawn_in } => {
                if self.spawned >= self.plan.target {
                    self.phase = WavePhase::Fighting;
                    return Some(WaveTransition::FullySpawned);
                }
                let next_spawn_in = next_spawn_in.saturating_sub(dt);
                if !next_spawn_in.is_zero() {
                    self.phase = WavePhase::Spawning { next_spawn_in };
                    return None;
                }
                self.spawn_one(config, ctx);
                if self.spawned >= self.plan.target {
                    self.phase = WavePhase::Fighting;
                    return Some(WaveTransition::FullySpawned);
                }
                self.phase = WavePhase::Spawning {
                    next_spawn_in: self.plan.spawn_interval,
                };
                None
            }
            WavePhase::Fighting => {
                let holdouts = enemies
                    .iter()
                    .filter(|enemy| enemy.is_alive() && enemy.summoned_by.is_none())
                    .count();
                if holdouts > 0 || self.spawned < self.plan.target {
                    return None;
                }
                if self.last_cleared >= self.plan.wave {
                    return None;
                }
                Some(self.clear(field, config, ctx))
            }
        }
    }

    fn start_next_wave(
        &mut self,
        config: &SimulationConfig,
        ctx: &mut SimulationContext,
    ) -> WaveTransition {
        let wave = self.last_cleared.max(self.plan.wave) + 1;
        self.plan = WavePlan::for_wave(wave, &config.waves, &config.modifiers);
        self.spawned = 0;
        self.phase = WavePhase::Spawning {
            next_spawn_in: Duration::ZERO,
        };

        let plan = self.plan;
        ctx.emit(Event::WaveStarted {
            wave: plan.wave,
            target: plan.target,
            boss_wave: plan.boss_wave,
        });
        let (text, color) = if plan.boss_wave {
            (format!("BOSS WAVE {}", plan.wave), Color::RED)
        } else {
            (format!("WAVE {}", plan.wave), Color::WHITE)
        };
        ctx.message(text, Duration::from_millis(2_000), color);
        ctx.sound(SoundCue::WaveStart, 0.8);
        info!(
            wave = plan.wave,
            target = plan.target,
            boss_wave = plan.boss_wave,
            "wave started"
        );
        WaveTransition::Started(plan)
    }

    fn spawn_one(&mut self, config: &SimulationConfig, ctx: &mut SimulationContext) {
        let bounds = config.arena.bounds();
        let wave = self.plan.wave;
        let (kind, center) = if self.plan.boss_wave {
            let lanes = self.plan.target.max(1) as f32;
            let x = bounds.width * (self.spawned as f32 + 1.0) / (lanes + 1.0);
            (EnemyKind::Boss, Vec2::new(x, -SPAWN_HEIGHT))
        } else {
            let kind = plan::regular_kind(wave, &config.waves, ctx);
            let x = ctx.uniform(SPAWN_MARGIN, bounds.width - SPAWN_MARGIN);
            (kind, Vec2::new(x, -SPAWN_HEIGHT))
        };
        let spawn = EnemySpawn {
            kind,
            center,
            wave,
            summoned_by: None,
        };
        let _ = ctx.spawn_enemy(&spawn, config);
        self.spawned += 1;
    }

    fn clear(
        &mut self,
        field: Battlefield<'_>,
        config: &SimulationConfig,
        ctx: &mut SimulationContext,
    ) -> WaveTransition {
        let wave = self.plan.wave;
        self.last_cleared = wave;
        self.phase = WavePhase::Intermission {
            remaining: intermission_after(wave, &config.waves),
        };

        let player = field.player;
        let restored = player.heal(player.max_hp * config.waves.clear_heal_fraction);
        if restored >= 1.0 {
            ctx.floating_text(
                Vec2::new(player.center().x, player.position.y),
                format!("+{}", restored.round() as i64),
                Color::GREEN,
            );
        }
        field.projectiles.clear();
        reposition_platforms(field.platforms, config, ctx);

        ctx.emit(Event::WaveCleared { wave });
        ctx.message(
            format!("WAVE {wave} CLEARED"),
            Duration::from_millis(2_000),
            Color::GREEN,
        );
        ctx.sound(SoundCue::WaveClear, 0.8);
        info!(wave, "wave cleared");
        WaveTransition::Cleared(wave)
    }
}

/// Moves every destructible platform to a random spot inside the platform band.
fn reposition_platforms(
    platforms: &mut [Platform],
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    let arena = &config.arena;
    for platform in platforms.iter_mut().filter(|platform| platform.destructible) {
        let size = platform.rect.size;
        let x = ctx.uniform(0.0, (arena.width - size.x).max(0.0));
        let y = ctx.uniform(arena.platform_band_top, arena.platform_band_bottom);
        platform.rect.min = Vec2::new(x, y);
    }
}
