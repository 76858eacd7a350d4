use std::{collections::BTreeMap, time::Duration};

use glam::Vec2;

use crate::{
    config::PlayerTuning, geometry::Aabb, projectile::Explosive, projectile::WeaponBehavior,
    upgrade::UpgradeId,
};

const DEFENSE_CEILING: f32 = 0.95;

/// Statistic composed of a base value and an upgrade multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat {
    /// Value before modifiers.
    pub base: f32,
    /// Product of every modifier applied so far.
    pub multiplier: f32,
}

impl Stat {
    /// Creates an unmodified statistic.
    #[must_use]
    pub const fn new(base: f32) -> Self {
        Self {
            base,
            multiplier: 1.0,
        }
    }

    /// Effective value after modifiers.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.base * self.multiplier
    }
}

/// Reason a player is temporarily immune to damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvincibilityKind {
    /// Granted by the start of a dash.
    Dash,
    /// Granted by consuming a spare life.
    Revive,
    /// Granted after taking damage.
    Hit,
}

/// Immunity window measured on the simulation clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InvincibilityWindow {
    /// Reason for the immunity.
    pub kind: InvincibilityKind,
    /// Simulation time the window opened.
    pub start: Duration,
    /// Length of the window.
    pub duration: Duration,
}

impl InvincibilityWindow {
    /// Reports whether the window still covers `now`.
    #[must_use]
    pub fn is_active(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) < self.duration
    }
}

/// Hit-absorbing buffer that recharges after a quiet period.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shield {
    /// Capacity of the shield in absorbed hits.
    pub max_hp: f32,
    /// Current charge.
    pub current_hp: f32,
    /// Grace period without damage before recharging.
    pub recharge_delay: Duration,
    /// Charge restored per second while recharging.
    pub recharge_rate: f32,
    /// Simulation time the player last took a hit.
    pub last_damaged: Option<Duration>,
}

impl Shield {
    /// Reports whether the shield holds enough charge to absorb a hit.
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.current_hp >= 1.0
    }
}

/// Dash ability state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DashState {
    /// Whether a burst is in progress.
    pub active: bool,
    /// Time left in the current burst.
    pub timer: Duration,
    /// Horizontal direction of the burst, -1 or 1.
    pub direction: f32,
    /// Simulation time the last burst started.
    pub last_started: Option<Duration>,
    /// Length of a burst.
    pub duration: Duration,
    /// Horizontal speed during a burst.
    pub speed: f32,
    /// Delay between burst starts.
    pub cooldown: Duration,
    /// Immunity granted by a burst.
    pub invincibility: Duration,
}

/// Chance and strength with which the player's hits apply a status.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusProc {
    /// Chance per hit.
    pub chance: f32,
    /// Multiplier applied to the configured effect strength.
    pub potency: f32,
}

/// Statuses the player's hits may apply.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatusModifiers {
    /// Burn application, if unlocked.
    pub burn: Option<StatusProc>,
    /// Chill application, if unlocked.
    pub chill: Option<StatusProc>,
}

/// Companion that fires at nearby enemies on its own cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Miniature {
    /// Angle of the companion around the player.
    pub orbit_phase: f32,
    /// Simulation time of the last shot.
    pub last_shot: Option<Duration>,
}

/// The player-controlled character.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Upper-left corner of the hitbox.
    pub position: Vec2,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Hitbox size.
    pub size: Vec2,
    /// Current hit points.
    pub hp: f32,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Current level.
    pub level: u32,
    /// Experience gathered toward the next level.
    pub exp: u32,
    /// Experience required for the next level.
    pub exp_to_next: u32,
    /// Horizontal speed.
    pub movement_speed: Stat,
    /// Shots per second.
    pub attack_speed: Stat,
    /// Lower bound of a rolled hit.
    pub min_damage: f32,
    /// Upper bound of a rolled hit.
    pub max_damage: f32,
    /// Chance a hit is critical.
    pub crit_chance: f32,
    /// Critical hit multiplier.
    pub crit_multiplier: f32,
    /// Fraction of incoming damage ignored.
    pub defense: f32,
    /// Fraction of dealt damage returned as healing.
    pub life_steal: f32,
    /// Immunity that negates damage outright (dash, revive).
    pub invincibility: Option<InvincibilityWindow>,
    /// Immunity opened by the last hit taken.
    pub hit_invincibility: Option<InvincibilityWindow>,
    /// Shield, if unlocked.
    pub shield: Option<Shield>,
    /// Dash, if unlocked.
    pub dash: Option<DashState>,
    /// Whether double jumping is unlocked.
    pub double_jump_unlocked: bool,
    /// Whether the airborne double jump was spent.
    pub double_jump_used: bool,
    /// Whether the player stands on the ground or a platform.
    pub grounded: bool,
    /// Jump control state of the previous frame.
    pub jump_held: bool,
    /// Dash control state of the previous frame.
    pub dash_held: bool,
    /// Last horizontal facing, -1 or 1.
    pub facing: f32,
    /// Equipped weapon.
    pub weapon: WeaponBehavior,
    /// Simulation time of the last shot.
    pub last_shot: Option<Duration>,
    /// Statuses applied by the player's hits.
    pub status_modifiers: StatusModifiers,
    /// Extra enemies each projectile may pierce.
    pub extra_pierce: u32,
    /// Homing strength added to every projectile.
    pub homing_strength: f32,
    /// Explosive payload added to every projectile.
    pub explosive: Option<Explosive>,
    /// Whether corpses release shrapnel.
    pub fragmentation: bool,
    /// Companions.
    pub miniatures: Vec<Miniature>,
    /// Whether thunderbolts are unlocked.
    pub thunderbolt: bool,
    /// Simulation time of the last thunderbolt.
    pub last_thunderbolt: Option<Duration>,
    /// Spare lives.
    pub lives: u32,
    /// Coins collected.
    pub coins: u32,
    /// Enemies killed.
    pub kills: u32,
    /// Acquired upgrades with multiplicity.
    pub upgrades: BTreeMap<UpgradeId, u32>,
}

impl Player {
    /// Creates a fresh player whose hitbox is centred on `spawn`.
    #[must_use]
    pub fn new(tuning: &PlayerTuning, spawn: Vec2) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        Self {
            position: spawn - size * 0.5,
            velocity: Vec2::ZERO,
            size,
            hp: tuning.max_hp,
            max_hp: tuning.max_hp,
            level: 1,
            exp: 0,
            exp_to_next: tuning.exp_base.max(1),
            movement_speed: Stat::new(tuning.movement_speed),
            attack_speed: Stat::new(tuning.attack_speed),
            min_damage: tuning.min_damage,
            max_damage: tuning.max_damage,
            crit_chance: tuning.crit_chance,
            crit_multiplier: tuning.crit_multiplier,
            defense: tuning.defense,
            life_steal: 0.0,
            invincibility: None,
            hit_invincibility: None,
            shield: None,
            dash: None,
            double_jump_unlocked: false,
            double_jump_used: false,
            grounded: false,
            jump_held: false,
            dash_held: false,
            facing: 1.0,
            weapon: WeaponBehavior::Straight,
            last_shot: None,
            status_modifiers: StatusModifiers::default(),
            extra_pierce: 0,
            homing_strength: 0.0,
            explosive: None,
            fragmentation: false,
            miniatures: Vec::new(),
            thunderbolt: false,
            last_thunderbolt: None,
            lives: 0,
            coins: 0,
            kills: 0,
            upgrades: BTreeMap::new(),
        }
    }

    /// Hitbox of the player.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Centre of the hitbox.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Reports whether the player still has hit points.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Defense including `boost`, capped at 95%.
    #[must_use]
    pub fn effective_defense(&self, boost: f32) -> f32 {
        (self.defense + boost).clamp(0.0, DEFENSE_CEILING)
    }

    /// Restores up to `amount` hit points and returns the amount restored.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount <= 0.0 {
            return 0.0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    /// Adds experience and returns every level reached as a result.
    pub fn grant_exp(&mut self, amount: u32, growth: f32) -> Vec<u32> {
        let mut reached = Vec::new();
        self.exp = self.exp.saturating_add(amount);
        while self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.level += 1;
            let next = (self.exp_to_next as f32 * growth.max(1.0)).ceil() as u32;
            self.exp_to_next = next.max(self.exp_to_next + 1);
            reached.push(self.level);
        }
        reached
    }

    /// Number of times `upgrade` was acquired.
    #[must_use]
    pub fn upgrade_count(&self, upgrade: UpgradeId) -> u32 {
        self.upgrades.get(&upgrade).copied().unwrap_or(0)
    }

    /// Reports whether damage is currently negated by a dash or revive window.
    #[must_use]
    pub fn is_invincible(&self, now: Duration) -> bool {
        self.invincibility
            .is_some_and(|window| window.is_active(now))
    }

    /// Reports whether damage is currently negated by the post-hit window.
    #[must_use]
    pub fn is_hit_invincible(&self, now: Duration) -> bool {
        self.hit_invincibility
            .is_some_and(|window| window.is_active(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_is_capped() {
        let mut player = Player::new(&PlayerTuning::default(), Vec2::ZERO);
        player.defense = 0.9;
        assert!((player.effective_defense(0.3) - 0.95).abs() < f32::EPSILON);
    }

    #[test]
    fn experience_can_cross_several_levels() {
        let mut player = Player::new(&PlayerTuning::default(), Vec2::ZERO);
        player.exp_to_next = 10;
        let reached = player.grant_exp(35, 1.5);
        assert_eq!(reached, vec![2, 3]);
        assert_eq!(player.level, 3);
        assert_eq!(player.exp, 10);
        assert_eq!(player.exp_to_next, 23);
    }

    #[test]
    fn heal_is_clamped_to_maximum() {
        let mut player = Player::new(&PlayerTuning::default(), Vec2::ZERO);
        player.hp = 90.0;
        assert_eq!(player.heal(50.0), 10.0);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn invincibility_window_expires() {
        let window = InvincibilityWindow {
            kind: InvincibilityKind::Dash,
            start: Duration::from_millis(100),
            duration: Duration::from_millis(250),
        };
        assert!(window.is_active(Duration::from_millis(300)));
        assert!(!window.is_active(Duration::from_millis(350)));
    }
}
