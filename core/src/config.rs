//! Tuning configuration consumed by the world and its systems.
//!
//! Every section deserializes with defaults so hosts may override a handful of
//! values from a partial TOML document. Durations are stored as whole
//! milliseconds and exposed through `Duration` accessors.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::ArenaBounds;

/// Reasons a [`SimulationConfig`] may be rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The arena has no playable area.
    #[error("arena dimensions must be positive (got {width}x{height})")]
    EmptyArena {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// The ground strip swallows the whole arena.
    #[error("ground height {ground_height} does not fit inside an arena {height} tall")]
    GroundOutOfArena {
        /// Configured ground height.
        ground_height: f32,
        /// Configured arena height.
        height: f32,
    },
    /// The minimum damage exceeds the maximum damage.
    #[error("player damage range is inverted ({min} > {max})")]
    InvertedDamageRange {
        /// Configured minimum damage.
        min: f32,
        /// Configured maximum damage.
        max: f32,
    },
    /// A chance or fraction lies outside `[0, 1]`.
    #[error("`{name}` must lie in [0, 1] (got {value})")]
    InvalidFraction {
        /// Name of the offending setting.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// A speed, size or rate that must be strictly positive is not.
    #[error("`{name}` must be positive (got {value})")]
    NonPositive {
        /// Name of the offending setting.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// The spawn interval floor is zero, which would spawn a wave in one frame.
    #[error("spawn interval floor must be non-zero")]
    ZeroSpawnFloor,
    /// Boss waves were configured to occur every zero waves.
    #[error("boss cadence must be non-zero")]
    ZeroBossCadence,
    /// The first regular wave would contain no enemy.
    #[error("the first wave must spawn at least one enemy")]
    EmptyFirstWave,
}

/// Aggregated tuning for a simulation session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Arena extents and frame clamping.
    pub arena: ArenaConfig,
    /// Player base statistics and movement physics.
    pub player: PlayerTuning,
    /// Per-kind enemy blueprints and shared enemy behaviour.
    pub enemies: EnemyTuning,
    /// Boss state machine tuning.
    pub boss: BossTuning,
    /// Healing drone state machine tuning.
    pub drone: DroneTuning,
    /// Burn and chill parameters.
    pub status: StatusTuning,
    /// Wave scheduler tuning.
    pub waves: WaveTuning,
    /// Debug overrides.
    pub admin: AdminConfig,
    /// Session-wide difficulty modifiers.
    pub modifiers: SessionModifiers,
}

impl SimulationConfig {
    /// Checks the configuration for values the simulation cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let arena = &self.arena;
        if arena.width <= 0.0 || arena.height <= 0.0 {
            return Err(ConfigError::EmptyArena {
                width: arena.width,
                height: arena.height,
            });
        }
        if arena.ground_height < 0.0 || arena.ground_height >= arena.height {
            return Err(ConfigError::GroundOutOfArena {
                ground_height: arena.ground_height,
                height: arena.height,
            });
        }

        let player = &self.player;
        if player.min_damage > player.max_damage {
            return Err(ConfigError::InvertedDamageRange {
                min: player.min_damage,
                max: player.max_damage,
            });
        }
        positive("player.max_hp", player.max_hp)?;
        positive("player.attack_speed", player.attack_speed)?;
        positive("player.movement_speed", player.movement_speed)?;
        positive("player.projectile_speed", player.projectile_speed)?;
        fraction("player.crit_chance", player.crit_chance)?;
        fraction("player.revive_hp_fraction", player.revive_hp_fraction)?;
        if !(0.0..1.0).contains(&player.defense) {
            return Err(ConfigError::InvalidFraction {
                name: "player.defense",
                value: player.defense,
            });
        }

        fraction("boss.fury_threshold", self.boss.fury_threshold)?;
        fraction("drone.heal_fraction", self.drone.heal_fraction)?;
        fraction("waves.clear_heal_fraction", self.waves.clear_heal_fraction)?;
        fraction("waves.splitter_chance", self.waves.splitter_chance)?;
        fraction("waves.drone_chance", self.waves.drone_chance)?;
        fraction("admin.defense_boost", self.admin.defense_boost)?;
        for (name, blueprint) in self.enemies.blueprints() {
            fraction(name, blueprint.coin_chance)?;
            positive(name, blueprint.hp)?;
        }

        if self.waves.spawn_interval_floor_ms == 0 {
            return Err(ConfigError::ZeroSpawnFloor);
        }
        if self.waves.boss_every == 0 {
            return Err(ConfigError::ZeroBossCadence);
        }
        if self.waves.initial_enemy_count == 0 {
            return Err(ConfigError::EmptyFirstWave);
        }

        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn fraction(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidFraction { name, value })
    }
}

/// Arena extents and frame clamping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Width of the arena in world units.
    pub width: f32,
    /// Height of the arena in world units.
    pub height: f32,
    /// Thickness of the ground strip at the bottom of the arena.
    pub ground_height: f32,
    /// Upper bound applied to every frame delta.
    pub max_frame_delta_ms: u64,
    /// Highest platform top used when repositioning destructible platforms.
    pub platform_band_top: f32,
    /// Lowest platform top used when repositioning destructible platforms.
    pub platform_band_bottom: f32,
    /// Distance outside the arena past which enemies are despawned.
    pub despawn_margin: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            ground_height: 60.0,
            max_frame_delta_ms: 100,
            platform_band_top: 260.0,
            platform_band_bottom: 520.0,
            despawn_margin: 240.0,
        }
    }
}

impl ArenaConfig {
    /// Playable bounds derived from the configured extents.
    #[must_use]
    pub fn bounds(&self) -> ArenaBounds {
        ArenaBounds {
            width: self.width,
            height: self.height,
            ground_y: self.height - self.ground_height,
        }
    }

    /// Largest delta a single frame may simulate.
    #[must_use]
    pub fn max_frame_delta(&self) -> Duration {
        Duration::from_millis(self.max_frame_delta_ms)
    }
}

/// Player base statistics and movement physics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Hitbox width.
    pub width: f32,
    /// Hitbox height.
    pub height: f32,
    /// Starting maximum hit points.
    pub max_hp: f32,
    /// Base horizontal speed in units per second.
    pub movement_speed: f32,
    /// Base shots per second.
    pub attack_speed: f32,
    /// Lower bound of a rolled hit.
    pub min_damage: f32,
    /// Upper bound of a rolled hit.
    pub max_damage: f32,
    /// Chance that a hit is critical.
    pub crit_chance: f32,
    /// Multiplier applied to the maximum damage on a critical hit.
    pub crit_multiplier: f32,
    /// Fraction of incoming damage ignored.
    pub defense: f32,
    /// Downward acceleration in units per second squared.
    pub gravity: f32,
    /// Upward speed applied by a ground jump.
    pub jump_velocity: f32,
    /// Upward speed applied by a double jump.
    pub double_jump_velocity: f32,
    /// Upward speed the player must have decayed below before a double jump is allowed.
    pub double_jump_threshold: f32,
    /// Invincibility granted after taking damage.
    pub hit_invincibility_ms: u64,
    /// Speed of player projectiles.
    pub projectile_speed: f32,
    /// Edge length of player projectiles.
    pub projectile_size: f32,
    /// Dash burst parameters.
    pub dash: DashTuning,
    /// Shield parameters.
    pub shield: ShieldTuning,
    /// Fraction of maximum hit points restored by a spare life.
    pub revive_hp_fraction: f32,
    /// Invincibility granted after a revive.
    pub revive_invincibility_ms: u64,
    /// Experience required for the first level up.
    pub exp_base: u32,
    /// Growth factor applied to the experience requirement on each level.
    pub exp_growth: f32,
    /// Targeting range of miniature companions.
    pub miniature_range: f32,
    /// Delay between miniature companion shots.
    pub miniature_cooldown_ms: u64,
    /// Fraction of rolled damage dealt by companion shots.
    pub miniature_damage_factor: f32,
    /// Delay between thunderbolt strikes.
    pub thunderbolt_interval_ms: u64,
    /// Enemies struck per thunderbolt.
    pub thunderbolt_targets: usize,
    /// Damage dealt by each thunderbolt strike.
    pub thunderbolt_damage: f32,
    /// Shrapnel pieces released by a fragmenting corpse.
    pub fragment_count: u32,
    /// Damage dealt by each shrapnel piece.
    pub fragment_damage: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 48.0,
            max_hp: 100.0,
            movement_speed: 280.0,
            attack_speed: 2.5,
            min_damage: 10.0,
            max_damage: 20.0,
            crit_chance: 0.1,
            crit_multiplier: 2.0,
            defense: 0.0,
            gravity: 1_800.0,
            jump_velocity: 700.0,
            double_jump_velocity: 600.0,
            double_jump_threshold: 150.0,
            hit_invincibility_ms: 800,
            projectile_speed: 720.0,
            projectile_size: 10.0,
            dash: DashTuning::default(),
            shield: ShieldTuning::default(),
            revive_hp_fraction: 0.5,
            revive_invincibility_ms: 2_000,
            exp_base: 20,
            exp_growth: 1.3,
            miniature_range: 520.0,
            miniature_cooldown_ms: 900,
            miniature_damage_factor: 0.5,
            thunderbolt_interval_ms: 4_000,
            thunderbolt_targets: 3,
            thunderbolt_damage: 25.0,
            fragment_count: 6,
            fragment_damage: 6.0,
        }
    }
}

impl PlayerTuning {
    /// Invincibility granted after taking damage.
    #[must_use]
    pub fn hit_invincibility(&self) -> Duration {
        Duration::from_millis(self.hit_invincibility_ms)
    }

    /// Invincibility granted after a revive.
    #[must_use]
    pub fn revive_invincibility(&self) -> Duration {
        Duration::from_millis(self.revive_invincibility_ms)
    }
}

/// Dash burst parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    /// Length of the burst.
    pub duration_ms: u64,
    /// Horizontal speed during the burst.
    pub speed: f32,
    /// Delay between dash starts.
    pub cooldown_ms: u64,
    /// Invincibility granted when the dash starts.
    pub invincibility_ms: u64,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            duration_ms: 180,
            speed: 1_100.0,
            cooldown_ms: 900,
            invincibility_ms: 250,
        }
    }
}

/// Shield parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldTuning {
    /// Hits the shield absorbs when full.
    pub max_hp: f32,
    /// Grace period without damage before recharge starts.
    pub recharge_delay_ms: u64,
    /// Shield points restored per second once recharging.
    pub recharge_rate: f32,
}

impl Default for ShieldTuning {
    fn default() -> Self {
        Self {
            max_hp: 1.0,
            recharge_delay_ms: 4_000,
            recharge_rate: 0.25,
        }
    }
}

/// Spawn-time statistics of one enemy kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyBlueprint {
    /// Hitbox width.
    pub width: f32,
    /// Hitbox height.
    pub height: f32,
    /// Hit points at wave one.
    pub hp: f32,
    /// Projectile damage at wave one.
    pub damage: f32,
    /// Experience awarded on death.
    pub xp: u32,
    /// Movement speed in units per second.
    pub speed: f32,
    /// Delay between shots; zero disables shooting.
    pub shoot_cooldown_ms: u64,
    /// Chance of dropping a coin on death.
    pub coin_chance: f32,
    /// Value of each dropped coin.
    pub coin_value: u32,
}

impl Default for EnemyBlueprint {
    fn default() -> Self {
        Self {
            width: 34.0,
            height: 34.0,
            hp: 30.0,
            damage: 8.0,
            xp: 5,
            speed: 90.0,
            shoot_cooldown_ms: 2_200,
            coin_chance: 0.3,
            coin_value: 1,
        }
    }
}

/// Per-kind enemy blueprints and shared enemy behaviour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Blueprint for standard enemies.
    pub standard: EnemyBlueprint,
    /// Blueprint for splitters.
    pub splitter: EnemyBlueprint,
    /// Blueprint for the fragments a splitter leaves behind.
    pub mini_splitter: EnemyBlueprint,
    /// Blueprint for healing drones.
    pub drone: EnemyBlueprint,
    /// Blueprint for bosses.
    pub boss: EnemyBlueprint,
    /// Descent speed while falling into the arena.
    pub fall_speed: f32,
    /// Height above the ground at which falling enemies start following the player.
    pub hover_height: f32,
    /// Speed of enemy projectiles.
    pub projectile_speed: f32,
    /// Edge length of enemy projectiles.
    pub projectile_size: f32,
    /// Fractional hit point growth per wave.
    pub hp_growth: f32,
    /// Fractional damage growth per wave.
    pub damage_growth: f32,
    /// Fraction of the overlap resolved per separation pass.
    pub separation_strength: f32,
    /// Mini splitters spawned by a dying splitter.
    pub splitter_children: u32,
    /// Coins dropped by a dying boss.
    pub boss_coin_burst: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            standard: EnemyBlueprint::default(),
            splitter: EnemyBlueprint {
                width: 40.0,
                height: 40.0,
                hp: 45.0,
                xp: 8,
                speed: 75.0,
                shoot_cooldown_ms: 2_600,
                coin_chance: 0.35,
                ..EnemyBlueprint::default()
            },
            mini_splitter: EnemyBlueprint {
                width: 22.0,
                height: 22.0,
                hp: 12.0,
                damage: 5.0,
                xp: 2,
                speed: 130.0,
                shoot_cooldown_ms: 2_000,
                coin_chance: 0.15,
                ..EnemyBlueprint::default()
            },
            drone: EnemyBlueprint {
                width: 30.0,
                height: 20.0,
                hp: 25.0,
                damage: 0.0,
                xp: 6,
                speed: 150.0,
                shoot_cooldown_ms: 0,
                ..EnemyBlueprint::default()
            },
            boss: EnemyBlueprint {
                width: 120.0,
                height: 100.0,
                hp: 1_200.0,
                damage: 15.0,
                xp: 100,
                speed: 260.0,
                shoot_cooldown_ms: 1_400,
                coin_chance: 1.0,
                coin_value: 5,
            },
            fall_speed: 160.0,
            hover_height: 220.0,
            projectile_speed: 320.0,
            projectile_size: 10.0,
            hp_growth: 0.15,
            damage_growth: 0.08,
            separation_strength: 0.5,
            splitter_children: 2,
            boss_coin_burst: 8,
        }
    }
}

impl EnemyTuning {
    fn blueprints(&self) -> [(&'static str, &EnemyBlueprint); 5] {
        [
            ("enemies.standard", &self.standard),
            ("enemies.splitter", &self.splitter),
            ("enemies.mini_splitter", &self.mini_splitter),
            ("enemies.drone", &self.drone),
            ("enemies.boss", &self.boss),
        ]
    }
}

/// Boss state machine tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Hit point fraction at or below which fury latches.
    pub fury_threshold: f32,
    /// Damage multiplier applied to boss shots once enraged.
    pub fury_damage_multiplier: f32,
    /// Vertical coordinate of the boss's top edge while positioned.
    pub preferred_altitude: f32,
    /// How far ahead incoming projectiles are considered threats.
    pub threat_horizon_ms: u64,
    /// Distance from a side wall at which dodging reverses.
    pub wall_buffer: f32,
    /// Direction flips tolerated before the boss abandons dodging.
    pub vibration_threshold: u32,
    /// Holding one direction this long forgives previous flips.
    pub vibration_window_ms: u64,
    /// Time spent returning to the centre after vibrating.
    pub recenter_ms: u64,
    /// Shared cooldown between any two ability starts.
    pub global_ability_cooldown_ms: u64,
    /// Minion summoning parameters.
    pub minions: MinionTuning,
    /// Teleport parameters.
    pub teleport: TeleportTuning,
    /// Laser parameters.
    pub laser: LaserTuning,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            fury_threshold: 0.25,
            fury_damage_multiplier: 1.5,
            preferred_altitude: 120.0,
            threat_horizon_ms: 1_200,
            wall_buffer: 90.0,
            vibration_threshold: 6,
            vibration_window_ms: 600,
            recenter_ms: 1_500,
            global_ability_cooldown_ms: 3_000,
            minions: MinionTuning::default(),
            teleport: TeleportTuning::default(),
            laser: LaserTuning::default(),
        }
    }
}

/// Minion summoning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionTuning {
    /// Living minions allowed in normal mode.
    pub normal_cap: u32,
    /// Living minions allowed in fury mode.
    pub fury_cap: u32,
    /// Delay between the last minion dying and the next batch.
    pub respawn_ms: u64,
    /// Cadence of fury batches.
    pub fury_interval_ms: u64,
    /// Remaining time at which the incoming batch is announced.
    pub warning_window_ms: u64,
}

impl Default for MinionTuning {
    fn default() -> Self {
        Self {
            normal_cap: 3,
            fury_cap: 6,
            respawn_ms: 8_000,
            fury_interval_ms: 5_000,
            warning_window_ms: 2_000,
        }
    }
}

/// Teleport parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportTuning {
    /// Whether the boss may teleport.
    pub enabled: bool,
    /// Delay between teleports.
    pub cooldown_ms: u64,
    /// Fraction of the arena height the destination is drawn from.
    pub upper_fraction: f32,
    /// Depth below the preferred altitude that triggers a smooth return.
    pub return_depth: f32,
    /// Vertical speed of the smooth return.
    pub return_speed: f32,
}

impl Default for TeleportTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_ms: 7_000,
            upper_fraction: 0.45,
            return_depth: 60.0,
            return_speed: 200.0,
        }
    }
}

/// Laser parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserTuning {
    /// Whether the boss may fire its laser.
    pub enabled: bool,
    /// Delay between laser starts.
    pub cooldown_ms: u64,
    /// Length of the invulnerable charge phase.
    pub charge_ms: u64,
    /// Lifetime of the fired beam.
    pub lifetime_ms: u64,
    /// Beam width.
    pub width: f32,
    /// Maximum beam length.
    pub max_length: f32,
    /// Rate at which the beam extends.
    pub extend_speed: f32,
    /// Pierce count carried by the beam.
    pub pierce: u32,
    /// Multiplier applied to the boss's damage.
    pub damage_multiplier: f32,
}

impl Default for LaserTuning {
    fn default() -> Self {
        Self {
            enabled: true,
            cooldown_ms: 10_000,
            charge_ms: 1_200,
            lifetime_ms: 900,
            width: 26.0,
            max_length: 1_600.0,
            extend_speed: 5_000.0,
            pierce: 999,
            damage_multiplier: 2.0,
        }
    }
}

/// Healing drone state machine tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneTuning {
    /// Radius searched for damaged allies.
    pub scan_range: f32,
    /// Delay between scans while idle.
    pub scan_interval_ms: u64,
    /// Allies healed per pulse.
    pub max_targets: usize,
    /// Fraction of maximum hit points restored per pulse.
    pub heal_fraction: f32,
    /// Distance from the targets' centroid at which the pulse starts.
    pub heal_range: f32,
    /// Length of the pulse wind-up.
    pub pulse_ms: u64,
    /// Lowest safe retreat altitude.
    pub safe_altitude_min: f32,
    /// Highest safe retreat altitude.
    pub safe_altitude_max: f32,
}

impl Default for DroneTuning {
    fn default() -> Self {
        Self {
            scan_range: 420.0,
            scan_interval_ms: 800,
            max_targets: 3,
            heal_fraction: 0.15,
            heal_range: 70.0,
            pulse_ms: 600,
            safe_altitude_min: 80.0,
            safe_altitude_max: 240.0,
        }
    }
}

/// Burn and chill parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusTuning {
    /// Damage per burn tick per stack before potency.
    pub burn_damage_per_tick: f32,
    /// Delay between burn ticks.
    pub burn_tick_interval_ms: u64,
    /// Duration of a burn application.
    pub burn_duration_ms: u64,
    /// Maximum burn stacks.
    pub burn_max_stacks: u32,
    /// Duration of a chill application.
    pub chill_duration_ms: u64,
    /// Movement multiplier of a chill at potency one.
    pub chill_movement_factor: f32,
    /// Attack-rate multiplier of a chill at potency one.
    pub chill_attack_factor: f32,
}

impl Default for StatusTuning {
    fn default() -> Self {
        Self {
            burn_damage_per_tick: 3.0,
            burn_tick_interval_ms: 500,
            burn_duration_ms: 3_000,
            burn_max_stacks: 5,
            chill_duration_ms: 2_500,
            chill_movement_factor: 0.5,
            chill_attack_factor: 0.6,
        }
    }
}

/// Wave scheduler tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Enemies spawned by wave one.
    pub initial_enemy_count: u32,
    /// Additional enemies per subsequent wave.
    pub enemies_per_wave: u32,
    /// Spawn interval of wave one.
    pub spawn_interval_ms: u64,
    /// Reduction of the spawn interval per wave.
    pub spawn_interval_decrement_ms: u64,
    /// Smallest allowed spawn interval.
    pub spawn_interval_floor_ms: u64,
    /// Intermission before wave one.
    pub intermission_ms: u64,
    /// Additional intermission per wave.
    pub intermission_increment_ms: u64,
    /// Every n-th wave is a boss wave.
    pub boss_every: u32,
    /// Fraction of maximum hit points restored when a wave clears.
    pub clear_heal_fraction: f32,
    /// First wave that may spawn splitters.
    pub splitter_from_wave: u32,
    /// First wave that may spawn healing drones.
    pub drone_from_wave: u32,
    /// Chance a regular spawn is a splitter once unlocked.
    pub splitter_chance: f32,
    /// Chance a regular spawn is a drone once unlocked.
    pub drone_chance: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            initial_enemy_count: 5,
            enemies_per_wave: 2,
            spawn_interval_ms: 1_500,
            spawn_interval_decrement_ms: 100,
            spawn_interval_floor_ms: 400,
            intermission_ms: 4_000,
            intermission_increment_ms: 250,
            boss_every: 5,
            clear_heal_fraction: 0.25,
            splitter_from_wave: 3,
            drone_from_wave: 4,
            splitter_chance: 0.3,
            drone_chance: 0.15,
        }
    }
}

/// Debug overrides applied when enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Whether the overrides apply.
    pub enabled: bool,
    /// Multiplier applied to experience gains.
    pub xp_multiplier: f32,
    /// Multiplier applied to player damage.
    pub damage_multiplier: f32,
    /// Additional defense fraction.
    pub defense_boost: f32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            xp_multiplier: 1.0,
            damage_multiplier: 1.0,
            defense_boost: 0.0,
        }
    }
}

impl AdminConfig {
    /// Experience multiplier in effect.
    #[must_use]
    pub fn xp_multiplier(&self) -> f32 {
        if self.enabled {
            self.xp_multiplier
        } else {
            1.0
        }
    }

    /// Player damage multiplier in effect.
    #[must_use]
    pub fn damage_multiplier(&self) -> f32 {
        if self.enabled {
            self.damage_multiplier
        } else {
            1.0
        }
    }

    /// Additional defense in effect.
    #[must_use]
    pub fn defense_boost(&self) -> f32 {
        if self.enabled {
            self.defense_boost
        } else {
            0.0
        }
    }
}

/// Session-wide difficulty modifiers.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionModifiers {
    /// Doubles regular wave sizes and boss counts.
    pub more_enemies: bool,
}
