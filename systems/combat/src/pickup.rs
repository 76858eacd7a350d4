use wave_arena_core::{Coin, Color, Player, SimulationContext, SoundCue};

/// Credits every coin touching the player; returns the value collected.
pub(crate) fn collect_coins(
    player: &mut Player,
    coins: &mut [Coin],
    ctx: &mut SimulationContext,
) -> u32 {
    let body = player.aabb();
    let mut collected = 0;
    for coin in coins
        .iter_mut()
        .filter(|coin| !coin.collected && coin.aabb().intersects(&body))
    {
        coin.collected = true;
        collected += coin.value;
        ctx.floating_text(coin.position, format!("+{}", coin.value), Color::GOLD);
    }
    if collected > 0 {
        player.coins = player.coins.saturating_add(collected);
        ctx.sound(SoundCue::CoinPickup, 0.4);
    }
    collected
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec2;
    use wave_arena_core::{CoinId, SimulationConfig};

    use super::*;
    use crate::test_support::player;

    fn coin(id: u32, position: Vec2, value: u32) -> Coin {
        Coin {
            id: CoinId::new(id),
            position,
            velocity: Vec2::ZERO,
            size: Vec2::splat(14.0),
            value,
            expires_at: Duration::from_secs(10),
            collected: false,
        }
    }

    #[test]
    fn only_touching_coins_are_credited_once() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(1);
        let mut coins = vec![
            coin(1, player.center(), 3),
            coin(2, player.center() + Vec2::new(300.0, 0.0), 5),
        ];

        assert_eq!(collect_coins(&mut player, &mut coins, &mut ctx), 3);
        assert_eq!(collect_coins(&mut player, &mut coins, &mut ctx), 0);
        assert_eq!(player.coins, 3);
        assert!(coins[0].collected);
        assert!(!coins[1].collected);
    }
}
