use std::time::Duration;

use glam::Vec2;
use rand::seq::SliceRandom;
use tracing::{debug, trace};
use wave_arena_core::{
    Color, Enemy, Event, LightningBolt, ParticleKind, SimulationConfig, SimulationContext,
    SoundCue,
};

/// How long a strike stays visible.
const BOLT_LIFETIME: Duration = Duration::from_millis(250);

/// Strikes random living enemies; returns how many were struck.
pub(crate) fn strike(
    enemies: &mut [Enemy],
    lightning: &mut Vec<LightningBolt>,
    candidates: &mut Vec<usize>,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> usize {
    candidates.clear();
    candidates.extend(
        enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_alive() && !enemy.is_invulnerable())
            .map(|(index, _)| index),
    );
    if candidates.is_empty() {
        return 0;
    }

    let tuning = &config.player;
    let struck: Vec<usize> = candidates
        .choose_multiple(ctx.rng(), tuning.thunderbolt_targets)
        .copied()
        .collect();
    let damage = tuning.thunderbolt_damage * config.admin.damage_multiplier();
    let expires_at = ctx.now() + BOLT_LIFETIME;

    for &index in &struck {
        let enemy = &mut enemies[index];
        let target = enemy.center();
        lightning.push(LightningBolt {
            from: Vec2::new(target.x, 0.0),
            to: target,
            expires_at,
        });
        ctx.particles(target, 16, Color::CYAN, ParticleKind::Lightning);
        let report = enemy.apply_damage(damage, Color::CYAN, config.boss.fury_threshold, ctx);
        if report.fury_triggered {
            debug!(boss = enemy.id.get(), "boss fury latched");
        }
    }

    ctx.sound(SoundCue::Thunder, 0.8);
    ctx.emit(Event::ScreenShake {
        intensity: 5.0,
        duration: Duration::from_millis(250),
    });
    trace!(struck = struck.len(), "thunderbolt");
    struck.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::enemy;
    use wave_arena_core::EnemyKind;

    #[test]
    fn strikes_are_capped_and_leave_a_bolt_each() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(21);
        let mut enemies: Vec<Enemy> = (1..=5)
            .map(|id| {
                let center = Vec2::new(100.0 * id as f32, 300.0);
                enemy(&config, id, EnemyKind::Splitter, center)
            })
            .collect();
        enemies[0].hp = 0.0;
        let mut lightning = Vec::new();

        let struck = strike(&mut enemies, &mut lightning, &mut Vec::new(), &config, &mut ctx);

        assert_eq!(struck, config.player.thunderbolt_targets);
        assert_eq!(lightning.len(), struck);
        let damaged = enemies
            .iter()
            .filter(|enemy| enemy.hp > 0.0 && enemy.hp < enemy.max_hp)
            .count();
        assert_eq!(damaged, struck);
        assert!(lightning
            .iter()
            .all(|bolt| bolt.expires_at == ctx.now() + BOLT_LIFETIME));
    }

    #[test]
    fn no_living_enemy_means_no_strike() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(21);
        let mut lightning = Vec::new();
        assert_eq!(
            strike(&mut [], &mut lightning, &mut Vec::new(), &config, &mut ctx),
            0
        );
        assert!(lightning.is_empty());
    }
}
