use std::time::Duration;

use glam::Vec2;

use crate::{
    config::{EnemyBlueprint, EnemyTuning, SimulationConfig},
    context::SimulationContext,
    geometry::Aabb,
    status::StatusEffects,
    Color, EnemyId, Event, ParticleKind, SoundCue,
};

/// Behavioural kind of an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnemyKind {
    /// Falls in, follows and shoots.
    Standard,
    /// Standard behaviour; splits into mini splitters on death.
    Splitter,
    /// Small fragment left behind by a splitter.
    MiniSplitter,
    /// Heals damaged allies instead of attacking.
    HealingDrone,
    /// Multi-phase boss.
    Boss,
}

impl EnemyKind {
    /// Resolves a kind from its configuration name, falling back to [`EnemyKind::Standard`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "splitter" => Self::Splitter,
            "minisplitter" | "mini_splitter" | "mini-splitter" => Self::MiniSplitter,
            "healingdrone" | "healing_drone" | "drone" => Self::HealingDrone,
            "boss" => Self::Boss,
            _ => Self::Standard,
        }
    }

    /// Blueprint describing this kind in `tuning`.
    #[must_use]
    pub fn blueprint(self, tuning: &EnemyTuning) -> &EnemyBlueprint {
        match self {
            Self::Standard => &tuning.standard,
            Self::Splitter => &tuning.splitter,
            Self::MiniSplitter => &tuning.mini_splitter,
            Self::HealingDrone => &tuning.drone,
            Self::Boss => &tuning.boss,
        }
    }

    /// Reports whether this kind takes part in the separation pass.
    #[must_use]
    pub fn separates(self) -> bool {
        !matches!(self, Self::HealingDrone | Self::Boss)
    }
}

/// Movement phase shared by the simple enemy kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyMode {
    /// Descending into the arena.
    Falling,
    /// Homing toward the player and shooting.
    Following,
}

/// Reason an enemy is scheduled for removal at the end of the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// Killed; kill credit has been resolved.
    Killed,
    /// Drifted out of the arena; no kill credit.
    LeftArena,
}

/// Phase of the healing drone cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum DronePhase {
    /// Hovering and periodically scanning for damaged allies.
    IdleScanning {
        /// Simulation time of the next scan.
        next_scan: Duration,
    },
    /// Flying toward the selected allies.
    MovingToHeal {
        /// Allies selected for healing.
        targets: Vec<EnemyId>,
    },
    /// Winding up a heal pulse.
    HealingPulse {
        /// Allies the pulse will heal.
        targets: Vec<EnemyId>,
        /// Simulation time the pulse releases.
        release_at: Duration,
    },
    /// Flying back to a safe altitude.
    Retreating {
        /// Altitude the drone retreats to.
        altitude: f32,
    },
}

/// Healing drone state.
#[derive(Clone, Debug, PartialEq)]
pub struct DroneBrain {
    /// Current phase.
    pub phase: DronePhase,
}

/// Threat-dodging state of a boss.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DodgeState {
    /// Last horizontal dodge direction, -1, 0 or 1.
    pub direction: f32,
    /// Consecutive direction flips.
    pub sign_changes: u32,
    /// Simulation time the current direction was taken.
    pub direction_since: Duration,
    /// Dodging is suspended in favour of re-centring until this time.
    pub recentering_until: Option<Duration>,
}

/// Laser ability phase of a boss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaserState {
    /// Not charging.
    Idle,
    /// Charging; the beam fires at `until`.
    Charging {
        /// Simulation time the charge completes.
        until: Duration,
    },
}

/// Minions a boss summoned and its summon timers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinionRoster {
    /// Identifiers of summoned minions still alive.
    pub alive: Vec<EnemyId>,
    /// Simulation time the next normal-mode batch spawns.
    pub respawn_at: Option<Duration>,
    /// Whether the incoming batch was announced.
    pub warned: bool,
    /// Simulation time of the last fury batch.
    pub last_fury_batch: Option<Duration>,
}

/// Boss state.
#[derive(Clone, Debug, PartialEq)]
pub struct BossBrain {
    /// Latched once hit points fall to the fury threshold; never cleared.
    pub in_fury: bool,
    /// Vertical coordinate of the top edge the boss holds.
    pub preferred_altitude: f32,
    /// Whether the boss is gliding back to its preferred altitude.
    pub returning_to_altitude: bool,
    /// Threat-dodging state.
    pub dodge: DodgeState,
    /// Simulation time of the last ability start.
    pub last_ability_at: Option<Duration>,
    /// Simulation time of the last teleport.
    pub last_teleport_at: Option<Duration>,
    /// Simulation time of the last laser start.
    pub last_laser_at: Option<Duration>,
    /// Laser phase.
    pub laser: LaserState,
    /// Summoned minions.
    pub minions: MinionRoster,
}

impl BossBrain {
    /// Creates a boss that descends to `preferred_altitude` after spawning.
    #[must_use]
    pub fn new(preferred_altitude: f32, now: Duration) -> Self {
        Self {
            in_fury: false,
            preferred_altitude,
            returning_to_altitude: true,
            dodge: DodgeState {
                direction: 0.0,
                sign_changes: 0,
                direction_since: now,
                recentering_until: None,
            },
            last_ability_at: None,
            last_teleport_at: None,
            last_laser_at: None,
            laser: LaserState::Idle,
            minions: MinionRoster::default(),
        }
    }

    /// Reports whether a laser charge is in progress.
    #[must_use]
    pub fn is_charging_laser(&self) -> bool {
        matches!(self.laser, LaserState::Charging { .. })
    }
}

/// Kind-specific state of an enemy.
#[derive(Clone, Debug, PartialEq)]
pub enum Brain {
    /// Falls, follows and shoots.
    Grounded,
    /// Healing drone cycle.
    Drone(DroneBrain),
    /// Boss state machine.
    Boss(Box<BossBrain>),
}

/// Request to create an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Kind to create.
    pub kind: EnemyKind,
    /// Centre of the new enemy.
    pub center: Vec2,
    /// Wave used to scale hit points and damage.
    pub wave: u32,
    /// Boss that summoned the enemy, if any.
    pub summoned_by: Option<EnemyId>,
}

/// Outcome of damage dealt to an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageReport {
    /// Hit points actually removed.
    pub dealt: f32,
    /// Whether this hit latched fury mode.
    pub fury_triggered: bool,
    /// Whether the enemy has no hit points left.
    pub lethal: bool,
}

/// Hostile entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Behavioural kind.
    pub kind: EnemyKind,
    /// Upper-left corner of the hitbox.
    pub position: Vec2,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Hitbox size.
    pub size: Vec2,
    /// Current hit points, never negative.
    pub hp: f32,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Damage of the enemy's shots.
    pub damage: f32,
    /// Experience awarded on death.
    pub xp_value: u32,
    /// Movement speed before slows.
    pub speed: f32,
    /// Delay between shots; zero disables shooting.
    pub shoot_cooldown: Duration,
    /// Simulation time of the last shot.
    pub last_shot: Option<Duration>,
    /// Active status effects.
    pub status: StatusEffects,
    /// Movement phase.
    pub mode: EnemyMode,
    /// Kind-specific state.
    pub brain: Brain,
    /// Boss that summoned this enemy, if any.
    pub summoned_by: Option<EnemyId>,
    /// Chance of dropping a coin on death.
    pub coin_chance: f32,
    /// Value of each dropped coin.
    pub coin_value: u32,
    /// Pending removal, applied at the end of the frame.
    pub removal: Option<Removal>,
}

impl Enemy {
    /// Builds an enemy from the blueprint of `spawn.kind`, scaled for `spawn.wave`.
    #[must_use]
    pub fn spawn(
        id: EnemyId,
        spawn: &EnemySpawn,
        config: &SimulationConfig,
        now: Duration,
    ) -> Self {
        let tuning = &config.enemies;
        let blueprint = spawn.kind.blueprint(tuning);
        let wave_index = spawn.wave.saturating_sub(1) as f32;
        let hp = blueprint.hp * (1.0 + tuning.hp_growth * wave_index);
        let size = Vec2::new(blueprint.width, blueprint.height);
        let brain = match spawn.kind {
            EnemyKind::Standard | EnemyKind::Splitter | EnemyKind::MiniSplitter => Brain::Grounded,
            EnemyKind::HealingDrone => Brain::Drone(DroneBrain {
                phase: DronePhase::IdleScanning { next_scan: now },
            }),
            EnemyKind::Boss => Brain::Boss(Box::new(BossBrain::new(
                config.boss.preferred_altitude,
                now,
            ))),
        };

        Self {
            id,
            kind: spawn.kind,
            position: spawn.center - size * 0.5,
            velocity: Vec2::ZERO,
            size,
            hp,
            max_hp: hp,
            damage: blueprint.damage * (1.0 + tuning.damage_growth * wave_index),
            xp_value: blueprint.xp,
            speed: blueprint.speed,
            shoot_cooldown: Duration::from_millis(blueprint.shoot_cooldown_ms),
            last_shot: None,
            status: StatusEffects::new(),
            mode: EnemyMode::Falling,
            brain,
            summoned_by: spawn.summoned_by,
            coin_chance: blueprint.coin_chance,
            coin_value: blueprint.coin_value,
            removal: None,
        }
    }

    /// Hitbox of the enemy.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Centre of the hitbox.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Reports whether the enemy is alive and not scheduled for removal.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.removal.is_none() && self.hp > 0.0
    }

    /// Remaining hit points as a fraction of the maximum.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.hp / self.max_hp
        }
    }

    /// Reports whether incoming player hits are deflected.
    #[must_use]
    pub fn is_invulnerable(&self) -> bool {
        match &self.brain {
            Brain::Boss(boss) => boss.is_charging_laser(),
            Brain::Grounded | Brain::Drone(_) => false,
        }
    }

    /// Reports whether the enemy is a boss in fury mode.
    #[must_use]
    pub fn in_fury(&self) -> bool {
        match &self.brain {
            Brain::Boss(boss) => boss.in_fury,
            Brain::Grounded | Brain::Drone(_) => false,
        }
    }

    /// Restores up to `amount` hit points and returns the amount restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Removes hit points, queues a damage number and latches boss fury.
    ///
    /// Hit points are floored at zero. Routing a lethal hit to the death
    /// handler is the caller's responsibility.
    pub fn apply_damage(
        &mut self,
        amount: f32,
        color: Color,
        fury_threshold: f32,
        ctx: &mut SimulationContext,
    ) -> DamageReport {
        if !self.is_alive() || amount <= 0.0 {
            return DamageReport {
                dealt: 0.0,
                fury_triggered: false,
                lethal: false,
            };
        }

        let dealt = amount.min(self.hp);
        self.hp = (self.hp - amount).max(0.0);
        ctx.emit(Event::FloatingText {
            position: Vec2::new(self.center().x, self.position.y),
            text: format!("{}", amount.round() as i64),
            color,
        });

        let fury_triggered = self.latch_fury(fury_threshold, ctx);
        DamageReport {
            dealt,
            fury_triggered,
            lethal: self.hp <= 0.0,
        }
    }

    fn latch_fury(&mut self, threshold: f32, ctx: &mut SimulationContext) -> bool {
        let fraction = self.hp_fraction();
        let center = self.center();
        let id = self.id;
        let Brain::Boss(boss) = &mut self.brain else {
            return false;
        };
        if boss.in_fury || self.hp <= 0.0 || fraction > threshold {
            return false;
        }

        boss.in_fury = true;
        ctx.emit(Event::FuryEntered { boss: id });
        ctx.emit(Event::CenterMessage {
            text: "THE BOSS IS ENRAGED!".to_owned(),
            duration: Duration::from_millis(2_000),
            color: Color::RED,
        });
        ctx.emit(Event::ScreenShake {
            intensity: 12.0,
            duration: Duration::from_millis(600),
        });
        ctx.emit(Event::SpawnParticles {
            position: center,
            count: 40,
            color: Color::RED,
            kind: ParticleKind::Explosion,
        });
        ctx.emit(Event::PlaySound {
            cue: SoundCue::Fury,
            volume: 1.0,
        });
        true
    }
}
