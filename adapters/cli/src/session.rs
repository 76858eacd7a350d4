//! Headless host loop.

use std::{fmt, time::Duration};

use anyhow::{Context, Result};
use tracing::debug;
use wave_arena_core::{Event, SimulationConfig, WeaponBehavior};
use wave_arena_world::{query, step, FrameInput, World};

use crate::autopilot::Autopilot;

/// How a headless session is driven.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SessionOptions {
    /// Seed of the session's random source.
    pub(crate) seed: u64,
    /// Frames to simulate at most.
    pub(crate) frames: u64,
    /// Delta handed to every frame.
    pub(crate) frame: Duration,
    /// Weapon equipped before the first frame.
    pub(crate) weapon: WeaponBehavior,
}

/// Outcome of a headless session.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) frames: u64,
    pub(crate) simulated: Duration,
    pub(crate) wave: u32,
    pub(crate) waves_cleared: u32,
    pub(crate) kills: u32,
    pub(crate) level: u32,
    pub(crate) coins: u32,
    pub(crate) upgrades: usize,
    pub(crate) bosses_defeated: u32,
    pub(crate) events: usize,
    pub(crate) game_over: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.game_over {
            "defeated"
        } else {
            "survived"
        };
        writeln!(
            f,
            "{outcome} after {} frames ({:.1}s simulated)",
            self.frames,
            self.simulated.as_secs_f32()
        )?;
        writeln!(
            f,
            "wave {} reached, {} cleared, {} bosses defeated",
            self.wave, self.waves_cleared, self.bosses_defeated
        )?;
        writeln!(
            f,
            "level {}, {} kills, {} coins, {} upgrades",
            self.level, self.kills, self.coins, self.upgrades
        )?;
        write!(f, "{} effect requests emitted", self.events)
    }
}

/// Runs a session under the autopilot until it ends or the frame budget runs out.
pub(crate) fn run(config: SimulationConfig, options: SessionOptions) -> Result<Summary> {
    let mut world = World::new(config, options.seed).context("tuning rejected by the world")?;
    world.equip_weapon(options.weapon);

    let bounds = query::config(&world).arena.bounds();
    let mut autopilot = Autopilot::new();
    let mut events = Vec::new();
    let mut tally = Tally::default();
    let mut frames = 0;

    while frames < options.frames && !query::is_game_over(&world) {
        let controls = autopilot.controls(
            query::player(&world),
            query::enemies(&world),
            query::projectiles(&world),
            bounds,
        );
        step(
            &mut world,
            &FrameInput::from_controls(controls),
            options.frame,
            &mut events,
        );
        frames += 1;

        while let Some(pick) = query::pending_offer(&world)
            .and_then(|offer| autopilot.pick(query::player(&world), offer))
        {
            debug!(upgrade = pick.name(), "autopilot picked an upgrade");
            if world.choose_upgrade(pick, &mut events).is_none() {
                break;
            }
        }

        tally.record(&events);
        events.clear();
    }

    let player = query::player(&world);
    Ok(Summary {
        frames,
        simulated: query::now(&world),
        wave: query::wave(&world),
        waves_cleared: tally.waves_cleared,
        kills: player.kills,
        level: player.level,
        coins: player.coins,
        upgrades: player.upgrades.values().map(|count| *count as usize).sum(),
        bosses_defeated: tally.bosses_defeated,
        events: tally.events,
        game_over: query::is_game_over(&world),
    })
}

#[derive(Debug, Default)]
struct Tally {
    waves_cleared: u32,
    bosses_defeated: u32,
    events: usize,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        self.events += events.len();
        for event in events {
            match event {
                Event::WaveCleared { .. } => self.waves_cleared += 1,
                Event::BossRewardPending { .. } => self.bosses_defeated += 1,
                _ => {}
            }
        }
    }
}
