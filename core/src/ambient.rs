use std::time::Duration;

use glam::Vec2;

use crate::{geometry::Aabb, CoinId};

/// Coin dropped by a dying enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    /// Identifier of the coin.
    pub id: CoinId,
    /// Upper-left corner of the pickup box.
    pub position: Vec2,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Pickup box size.
    pub size: Vec2,
    /// Coins credited on pickup.
    pub value: u32,
    /// Simulation time the coin disappears.
    pub expires_at: Duration,
    /// Marked for removal at the end of the frame.
    pub collected: bool,
}

impl Coin {
    /// Pickup box of the coin.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }
}

/// Short-lived visual of a thunderbolt strike.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightningBolt {
    /// Top of the bolt.
    pub from: Vec2,
    /// Struck point.
    pub to: Vec2,
    /// Simulation time the bolt disappears.
    pub expires_at: Duration,
}

/// One-way platform the player may land on from above.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Platform {
    /// Surface rectangle; its top edge is the landing surface.
    pub rect: Aabb,
    /// Whether the platform is repositioned between waves.
    pub destructible: bool,
}
