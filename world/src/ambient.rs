//! Ambient entities advanced after combat: falling coins and lightning visuals.

use std::time::Duration;

use glam::Vec2;
use wave_arena_core::{ArenaBounds, Coin, LightningBolt};

/// Drops every loose coin under `gravity` and rests it on the ground.
pub(crate) fn advance_coins(coins: &mut [Coin], bounds: ArenaBounds, gravity: f32, dt: Duration) {
    let seconds = dt.as_secs_f32();
    for coin in coins.iter_mut().filter(|coin| !coin.collected) {
        let floor = bounds.ground_y - coin.size.y;
        if coin.position.y >= floor && coin.velocity == Vec2::ZERO {
            continue;
        }

        coin.velocity.y += gravity * seconds;
        coin.position += coin.velocity * seconds;
        coin.position.x = coin.position.x.clamp(0.0, (bounds.width - coin.size.x).max(0.0));
        if coin.position.y >= floor {
            coin.position.y = floor;
            coin.velocity = Vec2::ZERO;
        }
    }
}

/// Flags coins whose lifetime ran out as collected so the compaction drops them.
pub(crate) fn expire_coins(coins: &mut [Coin], now: Duration) {
    for coin in coins.iter_mut().filter(|coin| coin.expires_at <= now) {
        coin.collected = true;
    }
}

/// Drops the lightning visuals whose lifetime ran out.
pub(crate) fn expire_lightning(lightning: &mut Vec<LightningBolt>, now: Duration) {
    lightning.retain(|bolt| bolt.expires_at > now);
}
