use glam::Vec2;
use wave_arena_core::{Enemy, EnemyMode, SimulationContext};

use crate::{approach, shoot, Frame};

/// Distance at which following enemies stop closing in on the player.
const STANDOFF: f32 = 140.0;

/// Falls toward the hover line, then follows the player and shoots.
pub(crate) fn update(enemy: &mut Enemy, frame: &Frame<'_>, ctx: &mut SimulationContext) {
    let (movement_factor, _) = enemy.status.slow_factors();
    let seconds = frame.seconds();
    let tuning = &frame.config.enemies;

    match enemy.mode {
        EnemyMode::Falling => {
            enemy.velocity = Vec2::new(0.0, tuning.fall_speed * movement_factor);
            enemy.position += enemy.velocity * seconds;
            let hover_line = frame.bounds.ground_y - tuning.hover_height;
            if enemy.aabb().bottom() >= hover_line {
                enemy.mode = EnemyMode::Following;
            }
        }
        EnemyMode::Following => {
            let speed = enemy.speed * movement_factor;
            if enemy.center().distance(frame.player_center) > STANDOFF {
                let _ = approach(enemy, frame.player_center, speed, seconds);
            } else {
                enemy.velocity = Vec2::ZERO;
            }
            let _ = shoot(enemy, frame, 1.0, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{player_at, spawn};
    use crate::EnemyBehavior;
    use wave_arena_core::{EnemyKind, SimulationConfig, StatusEffect};

    #[test]
    fn falling_enemies_switch_to_following_at_the_hover_line() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(2);
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let mut enemies = vec![spawn(&config, 1, EnemyKind::Standard, Vec2::new(200.0, 0.0))];
        let mut behavior = EnemyBehavior::new();
        let dt = Duration::from_millis(50);

        let mut frames = 0;
        while enemies[0].mode == EnemyMode::Falling {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 1, &config, dt, &mut ctx);
            frames += 1;
            assert!(frames < 200, "never reached the hover line");
        }

        let hover_line = config.arena.bounds().ground_y - config.enemies.hover_height;
        assert!(enemies[0].aabb().bottom() >= hover_line);
        assert!(ctx.take_spawned_projectiles().is_empty(), "falling enemies hold fire");
    }

    #[test]
    fn chill_stretches_the_shot_cooldown() {
        let config = SimulationConfig::default();
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let dt = Duration::from_millis(100);

        let shots = |chilled: bool| {
            let mut ctx = SimulationContext::new(2);
            let mut enemies = vec![spawn(&config, 1, EnemyKind::Standard, Vec2::new(600.0, 420.0))];
            enemies[0].mode = EnemyMode::Following;
            if chilled {
                enemies[0]
                    .status
                    .apply(StatusEffect::chill(1.0, 0.5, Duration::from_secs(60)));
            }
            let mut behavior = EnemyBehavior::new();
            for _ in 0..50 {
                ctx.advance(dt);
                behavior.handle(&mut enemies, &player, &[], 1, &config, dt, &mut ctx);
            }
            ctx.take_spawned_projectiles().len()
        };

        // Five seconds: 2.2s cadence fires at 0.1, 2.3, 4.5; 4.4s fires at 0.1, 4.5.
        assert_eq!(shots(false), 3);
        assert_eq!(shots(true), 2);
    }
}
