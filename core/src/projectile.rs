use std::{collections::BTreeSet, time::Duration};

use glam::Vec2;

use crate::{geometry::Aabb, EnemyId, ProjectileId};

/// Side that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Fired by the player or one of the player's effects.
    Player,
    /// Fired by the identified enemy.
    Enemy(EnemyId),
}

/// Damage a projectile carries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileDamage {
    /// Rolled from the player's damage range on impact, then scaled.
    Rolled {
        /// Multiplier applied to the rolled damage.
        scale: f32,
    },
    /// Fixed damage.
    Fixed(f32),
}

/// Steering toward an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homing {
    /// Maximum turn rate as a fraction of a full turn per second.
    pub strength: f32,
    /// Enemy currently locked on, if any.
    pub target: Option<EnemyId>,
}

/// Area damage released by a projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Explosive {
    /// Radius of the blast.
    pub radius: f32,
    /// Chance that an impact releases a blast.
    pub on_hit_chance: f32,
    /// Fraction of the projectile's damage dealt by the blast.
    pub damage_factor: f32,
    /// Maximum enemies caught in one blast.
    pub max_targets: usize,
}

/// Beam geometry of a boss laser.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaserBeam {
    /// Anchor of the beam.
    pub origin: Vec2,
    /// Direction of the beam in radians.
    pub angle: f32,
    /// Current length of the beam.
    pub length: f32,
    /// Length the beam extends to.
    pub max_length: f32,
    /// Width of the beam.
    pub width: f32,
    /// Rate at which the beam extends.
    pub extend_speed: f32,
    /// Simulation time at which the beam disappears.
    pub expires_at: Duration,
    /// Frame in which the beam last dealt damage.
    pub last_hit_frame: Option<u64>,
}

impl LaserBeam {
    /// Far end of the beam at its current length.
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.origin + Vec2::new(self.angle.cos(), self.angle.sin()) * self.length
    }
}

/// Visual and behaviour tag carried by a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectileEffect {
    /// Plain shot.
    Standard,
    /// Fragment of a spread volley.
    Spread,
    /// Homing shot.
    Homing,
    /// Piercing shot.
    Piercing,
    /// Explosive shot.
    Explosive,
    /// Shot fired by the rainbow weapon.
    Rainbow,
    /// Companion shot.
    Companion,
    /// Shrapnel from a fragmenting corpse.
    Shrapnel,
    /// Aimed enemy shot.
    EnemyShot,
    /// Boss laser beam.
    Laser,
}

/// Firing pattern of the player's weapon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponBehavior {
    /// One straight shot.
    Straight,
    /// Three shots fanned around the aim direction.
    Spread,
    /// Weak homing shots at a higher rate.
    RapidHoming,
    /// Shots that pierce several enemies.
    Piercing,
    /// Shots that explode on impact.
    Explosive,
    /// Picks another behaviour at random for every shot.
    Rainbow,
}

/// Projectile in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Identifier of the projectile.
    pub id: ProjectileId,
    /// Upper-left corner of the hitbox.
    pub position: Vec2,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Hitbox size.
    pub size: Vec2,
    /// Damage carried.
    pub damage: ProjectileDamage,
    /// Side that fired the projectile.
    pub owner: Owner,
    /// Enemies the projectile may still damage.
    pub hits_left: u32,
    /// Steering, if homing.
    pub homing: Option<Homing>,
    /// Blast payload, if explosive.
    pub explosive: Option<Explosive>,
    /// Visual and behaviour tag.
    pub effect: ProjectileEffect,
    /// Enemies this projectile already damaged.
    pub hit_enemies: BTreeSet<EnemyId>,
    /// Beam geometry, if this is a laser.
    pub laser: Option<LaserBeam>,
    /// Marked for removal at the end of the frame.
    pub spent: bool,
}

impl Projectile {
    /// Creates a single-hit projectile centred on `center`.
    #[must_use]
    pub fn new(
        id: ProjectileId,
        owner: Owner,
        center: Vec2,
        velocity: Vec2,
        size: f32,
        damage: ProjectileDamage,
    ) -> Self {
        let size = Vec2::splat(size);
        Self {
            id,
            position: center - size * 0.5,
            velocity,
            size,
            damage,
            owner,
            hits_left: 1,
            homing: None,
            explosive: None,
            effect: ProjectileEffect::Standard,
            hit_enemies: BTreeSet::new(),
            laser: None,
            spent: false,
        }
    }

    /// Hitbox of the projectile.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Centre of the hitbox.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Reports whether the projectile is still live this frame.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.spent
    }

    /// Reports whether the projectile was fired by the player side.
    #[must_use]
    pub fn is_friendly(&self) -> bool {
        self.owner == Owner::Player
    }

    /// Records a hit on `enemy`; returns `false` if it was already hit.
    pub fn register_hit(&mut self, enemy: EnemyId) -> bool {
        self.hit_enemies.insert(enemy)
    }

    /// Spends one pierce; returns `true` when the projectile is exhausted.
    ///
    /// Lasers are persistent and are never exhausted by hits.
    pub fn consume_pierce(&mut self) -> bool {
        if self.laser.is_some() {
            return false;
        }
        self.hits_left = self.hits_left.saturating_sub(1);
        if self.hits_left == 0 {
            self.spent = true;
        }
        self.spent
    }
}

/// Pending area blast resolved by the collision pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detonation {
    /// Centre of the blast.
    pub position: Vec2,
    /// Blast parameters.
    pub explosive: Explosive,
    /// Damage of the projectile that released the blast.
    pub damage: ProjectileDamage,
    /// Enemy excluded from the blast, typically the one directly hit.
    pub exclude: Option<EnemyId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(hits: u32) -> Projectile {
        let mut projectile = Projectile::new(
            ProjectileId::new(1),
            Owner::Player,
            Vec2::ZERO,
            Vec2::X,
            10.0,
            ProjectileDamage::Rolled { scale: 1.0 },
        );
        projectile.hits_left = hits;
        projectile
    }

    #[test]
    fn pierce_exhaustion_marks_projectile_spent() {
        let mut projectile = shot(2);
        assert!(!projectile.consume_pierce());
        assert!(projectile.is_live());
        assert!(projectile.consume_pierce());
        assert!(!projectile.is_live());
        assert!(projectile.consume_pierce());
        assert_eq!(projectile.hits_left, 0);
    }

    #[test]
    fn the_same_enemy_registers_once() {
        let mut projectile = shot(3);
        assert!(projectile.register_hit(EnemyId::new(4)));
        assert!(!projectile.register_hit(EnemyId::new(4)));
        assert!(projectile.register_hit(EnemyId::new(5)));
    }

    #[test]
    fn lasers_are_never_exhausted() {
        let mut projectile = shot(1);
        projectile.laser = Some(LaserBeam {
            origin: Vec2::ZERO,
            angle: 0.0,
            length: 0.0,
            max_length: 100.0,
            width: 10.0,
            extend_speed: 100.0,
            expires_at: Duration::from_secs(1),
            last_hit_frame: None,
        });
        assert!(!projectile.consume_pierce());
        assert!(projectile.is_live());
        assert_eq!(projectile.hits_left, 1);
    }
}
