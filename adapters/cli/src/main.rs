#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a Wave Arena session headlessly.

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_arena_core::WeaponBehavior;

mod autopilot;
mod config;
mod session;

use session::SessionOptions;

/// Weapon the autopilot starts with.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Weapon {
    Straight,
    Spread,
    RapidHoming,
    Piercing,
    Explosive,
    Rainbow,
}

impl From<Weapon> for WeaponBehavior {
    fn from(weapon: Weapon) -> Self {
        match weapon {
            Weapon::Straight => WeaponBehavior::Straight,
            Weapon::Spread => WeaponBehavior::Spread,
            Weapon::RapidHoming => WeaponBehavior::RapidHoming,
            Weapon::Piercing => WeaponBehavior::Piercing,
            Weapon::Explosive => WeaponBehavior::Explosive,
            Weapon::Rainbow => WeaponBehavior::Rainbow,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wave-arena", version, about = "Headless Wave Arena session runner")]
struct Args {
    /// TOML tuning file; built-in tuning when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Seed of the session's random source
    #[arg(long, short = 's', default_value_t = 1)]
    seed: u64,

    /// Simulated seconds to play at most
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Weapon equipped at the start
    #[arg(long, value_enum, default_value_t = Weapon::Straight)]
    weapon: Weapon,

    /// Doubles wave sizes and boss counts
    #[arg(long)]
    more_enemies: bool,
}

/// Entry point for the Wave Arena command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    ensure!(args.fps > 0, "--fps must be positive");
    ensure!(args.seconds > 0.0, "--seconds must be positive");

    let mut config = config::load(args.config.as_deref())?;
    config.modifiers.more_enemies |= args.more_enemies;

    let options = SessionOptions {
        seed: args.seed,
        frames: (args.seconds * args.fps as f32).ceil() as u64,
        frame: Duration::from_secs_f64(1.0 / f64::from(args.fps)),
        weapon: args.weapon.into(),
    };
    info!(seed = options.seed, frames = options.frames, "session starting");

    let summary = session::run(config, options)?;
    println!("{summary}");
    Ok(())
}
