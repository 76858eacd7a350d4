//! The one path every enemy death takes.

use std::{f32::consts::TAU, time::Duration};

use glam::Vec2;
use tracing::{debug, info};
use wave_arena_core::{
    Coin, Color, Enemy, EnemyKind, EnemySpawn, Event, Owner, ParticleKind, Player, Projectile,
    ProjectileDamage, ProjectileEffect, Removal, SimulationConfig, SimulationContext, SoundCue,
};

const COIN_SIZE: f32 = 14.0;
const COIN_LIFETIME: Duration = Duration::from_secs(10);
const LEVEL_UP_CHOICES: usize = 3;
const CHILD_SPACING: f32 = 24.0;
const SHRAPNEL_SPEED_FACTOR: f32 = 0.6;

/// Resolves every enemy whose hit points ran out; returns the kill count.
///
/// Each dead enemy is flagged `Removal::Killed` exactly once, so the same
/// corpse never pays out twice even when several passes found it lethal.
pub(crate) fn reap(
    player: &mut Player,
    enemies: &mut [Enemy],
    coins: &mut Vec<Coin>,
    wave: u32,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> usize {
    let mut kills = 0;
    for enemy in enemies
        .iter_mut()
        .filter(|enemy| enemy.removal.is_none() && enemy.hp <= 0.0)
    {
        enemy.removal = Some(Removal::Killed);
        kills += 1;
        player.kills = player.kills.saturating_add(1);

        award_experience(player, enemy, config, ctx);
        drop_coins(enemy, coins, config, ctx);
        match enemy.kind {
            EnemyKind::Splitter => split(enemy, wave, config, ctx),
            EnemyKind::Boss => boss_defeated(enemy, ctx),
            EnemyKind::Standard | EnemyKind::MiniSplitter | EnemyKind::HealingDrone => {}
        }
        if player.fragmentation {
            fragment(enemy, config, ctx);
        }

        ctx.particles(enemy.center(), 20, Color::RED, ParticleKind::Death);
        ctx.sound(SoundCue::EnemyDeath, 0.4);
        ctx.emit(Event::EnemyKilled {
            enemy: enemy.id,
            kind: enemy.kind,
            position: enemy.center(),
        });
    }
    kills
}

fn award_experience(
    player: &mut Player,
    enemy: &Enemy,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    let xp = (enemy.xp_value as f32 * config.admin.xp_multiplier()).round() as u32;
    if xp == 0 {
        return;
    }
    ctx.floating_text(enemy.center(), format!("+{xp} XP"), Color::PURPLE);

    for level in player.grant_exp(xp, config.player.exp_growth) {
        let choices = ctx.offer_upgrades(LEVEL_UP_CHOICES);
        debug!(level, offered = choices.len(), "level up");
        ctx.emit(Event::LevelUp { level, choices });
        ctx.message(
            format!("LEVEL {level}!"),
            Duration::from_millis(1_500),
            Color::GOLD,
        );
        ctx.sound(SoundCue::LevelUp, 0.8);
    }
}

fn drop_coins(
    enemy: &Enemy,
    coins: &mut Vec<Coin>,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) {
    let count = match enemy.kind {
        EnemyKind::Boss => config.enemies.boss_coin_burst,
        _ if ctx.roll(enemy.coin_chance) => 1,
        _ => 0,
    };
    let center = enemy.center();
    for _ in 0..count {
        let velocity = Vec2::new(ctx.uniform(-120.0, 120.0), -ctx.uniform(180.0, 320.0));
        coins.push(Coin {
            id: ctx.next_coin_id(),
            position: center - Vec2::splat(COIN_SIZE * 0.5),
            velocity,
            size: Vec2::splat(COIN_SIZE),
            value: enemy.coin_value,
            expires_at: ctx.now() + COIN_LIFETIME,
            collected: false,
        });
    }
}

fn split(enemy: &Enemy, wave: u32, config: &SimulationConfig, ctx: &mut SimulationContext) {
    let children = config.enemies.splitter_children;
    let spread = children.saturating_sub(1) as f32 * 0.5;
    for index in 0..children {
        let offset = Vec2::new((index as f32 - spread) * CHILD_SPACING, 0.0);
        let spawn = EnemySpawn {
            kind: EnemyKind::MiniSplitter,
            center: enemy.center() + offset,
            wave,
            summoned_by: None,
        };
        let _ = ctx.spawn_enemy(&spawn, config);
    }
    ctx.particles(enemy.center(), 16, Color::PURPLE, ParticleKind::Explosion);
}

fn boss_defeated(enemy: &Enemy, ctx: &mut SimulationContext) {
    ctx.emit(Event::BossRewardPending { boss: enemy.id });
    ctx.message("BOSS DEFEATED!", Duration::from_millis(2_500), Color::GOLD);
    ctx.sound(SoundCue::BossDeath, 1.0);
    ctx.emit(Event::ScreenShake {
        intensity: 14.0,
        duration: Duration::from_millis(800),
    });
    info!(boss = enemy.id.get(), "boss defeated");
}

/// Fans shrapnel radially out of the corpse.
fn fragment(enemy: &Enemy, config: &SimulationConfig, ctx: &mut SimulationContext) {
    let tuning = &config.player;
    let count = tuning.fragment_count.max(1);
    let speed = tuning.projectile_speed * SHRAPNEL_SPEED_FACTOR;
    for index in 0..count {
        let angle = TAU * index as f32 / count as f32;
        let mut shard = Projectile::new(
            ctx.next_projectile_id(),
            Owner::Player,
            enemy.center(),
            Vec2::new(angle.cos(), angle.sin()) * speed,
            tuning.projectile_size * 0.6,
            ProjectileDamage::Fixed(tuning.fragment_damage),
        );
        shard.effect = ProjectileEffect::Shrapnel;
        let _ = shard.register_hit(enemy.id);
        ctx.spawn_projectile(shard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{enemy, player};

    fn drain(ctx: &mut SimulationContext) -> Vec<Event> {
        let mut events = Vec::new();
        ctx.drain_events(&mut events);
        events
    }

    #[test]
    fn corpses_pay_out_exactly_once() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(6);
        let mut coins = Vec::new();
        let mut enemies = vec![
            enemy(&config, 1, EnemyKind::Standard, Vec2::new(300.0, 300.0)),
            enemy(&config, 2, EnemyKind::Standard, Vec2::new(500.0, 300.0)),
            enemy(&config, 3, EnemyKind::Standard, Vec2::new(700.0, 300.0)),
        ];
        enemies[0].hp = 0.0;
        enemies[2].hp = 0.0;
        enemies[2].removal = Some(Removal::LeftArena);

        assert_eq!(reap(&mut player, &mut enemies, &mut coins, 1, &config, &mut ctx), 1);
        assert_eq!(reap(&mut player, &mut enemies, &mut coins, 1, &config, &mut ctx), 0);

        assert_eq!(enemies[0].removal, Some(Removal::Killed));
        assert_eq!(enemies[1].removal, None);
        assert_eq!(enemies[2].removal, Some(Removal::LeftArena));
        assert_eq!(player.kills, 1);
        assert_eq!(player.exp, enemies[0].xp_value);
        let killed = drain(&mut ctx)
            .into_iter()
            .filter(|event| matches!(event, Event::EnemyKilled { .. }))
            .count();
        assert_eq!(killed, 1);
    }

    #[test]
    fn splitters_leave_mini_splitters_behind() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(6);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Splitter, Vec2::new(300.0, 300.0))];
        enemies[0].hp = 0.0;

        let _ = reap(&mut player, &mut enemies, &mut Vec::new(), 4, &config, &mut ctx);

        let children = ctx.take_spawned_enemies();
        assert_eq!(children.len(), config.enemies.splitter_children as usize);
        assert!(children
            .iter()
            .all(|child| child.kind == EnemyKind::MiniSplitter));
    }

    #[test]
    fn bosses_drop_a_coin_burst_and_request_their_reward() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        let mut ctx = SimulationContext::new(6);
        let mut coins = Vec::new();
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Boss, Vec2::new(640.0, 200.0))];
        enemies[0].hp = 0.0;

        let _ = reap(&mut player, &mut enemies, &mut coins, 5, &config, &mut ctx);

        assert_eq!(coins.len(), config.enemies.boss_coin_burst as usize);
        assert!(drain(&mut ctx)
            .iter()
            .any(|event| *event == Event::BossRewardPending { boss: enemies[0].id }));
    }

    #[test]
    fn fragmentation_fans_shrapnel_out_of_the_corpse() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        player.fragmentation = true;
        let mut ctx = SimulationContext::new(6);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Standard, Vec2::new(300.0, 300.0))];
        enemies[0].hp = 0.0;

        let _ = reap(&mut player, &mut enemies, &mut Vec::new(), 1, &config, &mut ctx);

        let shards = ctx.take_spawned_projectiles();
        assert_eq!(shards.len(), config.player.fragment_count as usize);
        assert!(shards.iter().all(|shard| shard.is_friendly()
            && shard.effect == ProjectileEffect::Shrapnel
            && shard.hit_enemies.contains(&enemies[0].id)));
    }

    #[test]
    fn crossing_a_level_offers_upgrades() {
        let config = SimulationConfig::default();
        let mut player = player(&config);
        player.exp = player.exp_to_next - 1;
        let mut ctx = SimulationContext::new(6);
        let mut enemies = vec![enemy(&config, 1, EnemyKind::Standard, Vec2::new(300.0, 300.0))];
        enemies[0].hp = 0.0;

        let _ = reap(&mut player, &mut enemies, &mut Vec::new(), 1, &config, &mut ctx);

        assert_eq!(player.level, 2);
        let offers: Vec<_> = drain(&mut ctx)
            .into_iter()
            .filter_map(|event| match event {
                Event::LevelUp { level, choices } => Some((level, choices.len())),
                _ => None,
            })
            .collect();
        assert_eq!(offers, vec![(2, LEVEL_UP_CHOICES)]);
    }
}
