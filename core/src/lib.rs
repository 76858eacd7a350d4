#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Wave Arena combat engine.
//!
//! This crate defines the data and message surface that connects the host
//! loop, the authoritative world, and the per-frame systems. The host submits
//! an [`InputSnapshot`] every frame, the world advances its entity
//! collections by running each system in a fixed order, and every side effect
//! the renderer or audio layer must act upon is queued as an [`Event`] on the
//! [`SimulationContext`]. Nothing in the core draws pixels or plays sound.

use std::time::Duration;

use glam::Vec2;

mod ambient;
mod config;
mod context;
mod enemy;
mod geometry;
mod player;
mod projectile;
mod status;
mod upgrade;

pub use ambient::{Coin, LightningBolt, Platform};
pub use config::{
    AdminConfig, ArenaConfig, BossTuning, ConfigError, DashTuning, DroneTuning, EnemyBlueprint,
    EnemyTuning, LaserTuning, MinionTuning, PlayerTuning, SessionModifiers, ShieldTuning,
    SimulationConfig, StatusTuning, TeleportTuning, WaveTuning,
};
pub use context::{SimClock, SimulationContext};
pub use enemy::{
    BossBrain, Brain, DamageReport, DodgeState, DroneBrain, DronePhase, Enemy, EnemyKind,
    EnemyMode, EnemySpawn, LaserState, MinionRoster, Removal,
};
pub use geometry::{segment_intersects_aabb, Aabb, ArenaBounds};
pub use player::{
    DashState, InvincibilityKind, InvincibilityWindow, Miniature, Player, Shield, Stat,
    StatusModifiers, StatusProc,
};
pub use projectile::{
    Detonation, Explosive, Homing, LaserBeam, Owner, Projectile, ProjectileDamage,
    ProjectileEffect, WeaponBehavior,
};
pub use status::{Burn, Chill, StatusEffect, StatusEffects, StatusKind};
pub use upgrade::{UpgradeId, UpgradePool};

/// Events queued during a frame for rendering, audio and session collaborators.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Requests a burst of particles at a world position.
    SpawnParticles {
        /// Centre of the burst.
        position: Vec2,
        /// Number of particles in the burst.
        count: u32,
        /// Tint applied to the particles.
        color: Color,
        /// Visual flavour of the burst.
        kind: ParticleKind,
    },
    /// Requests playback of a sound cue.
    PlaySound {
        /// Cue to play.
        cue: SoundCue,
        /// Playback volume in `[0, 1]`.
        volume: f32,
    },
    /// Requests a camera shake.
    ScreenShake {
        /// Maximum displacement of the shake in pixels.
        intensity: f32,
        /// How long the shake lasts.
        duration: Duration,
    },
    /// Requests a flash of the arena border.
    BorderFlash {
        /// How long the flash lasts.
        duration: Duration,
    },
    /// Requests a floating text label, typically a damage number.
    FloatingText {
        /// Anchor of the label.
        position: Vec2,
        /// Text to display.
        text: String,
        /// Colour of the label.
        color: Color,
    },
    /// Requests a centred announcement banner.
    CenterMessage {
        /// Text to display.
        text: String,
        /// How long the banner stays visible.
        duration: Duration,
        /// Colour of the banner text.
        color: Color,
    },
    /// Signals that the player reached a new level and may pick an upgrade.
    LevelUp {
        /// Level reached.
        level: u32,
        /// Upgrades offered from the current pool.
        choices: Vec<UpgradeId>,
    },
    /// Signals that the player died without a spare life.
    GameOver {
        /// Wave in progress when the session ended.
        wave: u32,
        /// Level reached by the player.
        level: u32,
    },
    /// Signals that a boss died and its reward flow should open.
    BossRewardPending {
        /// Identifier of the defeated boss.
        boss: EnemyId,
    },
    /// Signals that a boss latched into fury mode.
    FuryEntered {
        /// Identifier of the enraged boss.
        boss: EnemyId,
    },
    /// Signals that a wave left intermission and began spawning.
    WaveStarted {
        /// Number of the wave.
        wave: u32,
        /// Enemies the wave will spawn.
        target: u32,
        /// Whether the wave spawns bosses.
        boss_wave: bool,
    },
    /// Signals that a wave was cleared.
    WaveCleared {
        /// Number of the cleared wave.
        wave: u32,
    },
    /// Signals that an enemy died and its kill credit was resolved.
    EnemyKilled {
        /// Identifier of the enemy.
        enemy: EnemyId,
        /// Kind of the enemy.
        kind: EnemyKind,
        /// Position of the corpse.
        position: Vec2,
    },
    /// Signals that the player consumed a spare life.
    PlayerRevived {
        /// Spare lives remaining afterwards.
        lives_left: u32,
    },
}

/// RGB tint attached to visual requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Plain white.
    pub const WHITE: Self = Self::from_rgb(0xff, 0xff, 0xff);
    /// Damage number red.
    pub const RED: Self = Self::from_rgb(0xff, 0x45, 0x3a);
    /// Critical hit yellow.
    pub const GOLD: Self = Self::from_rgb(0xff, 0xd6, 0x0a);
    /// Healing green.
    pub const GREEN: Self = Self::from_rgb(0x30, 0xd1, 0x58);
    /// Burn orange.
    pub const ORANGE: Self = Self::from_rgb(0xff, 0x9f, 0x0a);
    /// Chill and shield blue.
    pub const CYAN: Self = Self::from_rgb(0x64, 0xd2, 0xff);
    /// Boss purple.
    pub const PURPLE: Self = Self::from_rgb(0xbf, 0x5a, 0xf2);

    /// Creates a new colour from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the colour.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the colour.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the colour.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Visual flavour of a particle burst.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    /// Small impact sparks.
    Spark,
    /// Explosion debris.
    Explosion,
    /// Rising healing motes.
    Heal,
    /// Teleport departure or arrival swirl.
    Teleport,
    /// Laser charge warning glow.
    LaserWarning,
    /// Deflection flare on an invulnerable target.
    ShieldHit,
    /// Death burst.
    Death,
    /// Thunderbolt impact.
    Lightning,
}

/// Sound cues the audio collaborator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player weapon discharge.
    Shoot,
    /// Enemy weapon discharge.
    EnemyShoot,
    /// Projectile impact on an enemy.
    Hit,
    /// Critical impact on an enemy.
    Crit,
    /// Explosion.
    Explosion,
    /// Player took damage.
    PlayerHurt,
    /// Shield absorbed a hit.
    ShieldBreak,
    /// Deflected hit on an invulnerable boss.
    Deflect,
    /// Regular enemy died.
    EnemyDeath,
    /// Boss died.
    BossDeath,
    /// Coin collected.
    CoinPickup,
    /// Level gained.
    LevelUp,
    /// Jump or double jump.
    Jump,
    /// Dash burst.
    Dash,
    /// Boss teleport.
    Teleport,
    /// Boss laser charge.
    LaserCharge,
    /// Boss laser discharge.
    LaserFire,
    /// Boss summoned minions.
    MinionSummon,
    /// Drone heal pulse.
    Heal,
    /// Thunderbolt strike.
    Thunder,
    /// Wave started.
    WaveStart,
    /// Wave cleared.
    WaveClear,
    /// Spare life consumed.
    Revive,
    /// Session ended.
    GameOver,
    /// Boss enraged.
    Fury,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a dropped coin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinId(u32);

impl CoinId {
    /// Creates a new coin identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Pressed-state snapshot distilled from the host's input devices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    /// Move-left control is held.
    pub left: bool,
    /// Move-right control is held.
    pub right: bool,
    /// Jump control is held.
    pub jump: bool,
    /// Dash control is held.
    pub dash: bool,
    /// Fire control is held.
    pub fire: bool,
    /// Pointer position in world space.
    pub aim: Vec2,
}

impl InputSnapshot {
    /// Horizontal direction requested by the held controls: -1, 0 or 1.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
