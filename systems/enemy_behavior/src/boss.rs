//! Boss state machine: altitude keeping, threat dodging and abilities.
//!
//! Ability precedence is fixed. Nothing starts while the laser charges, the
//! shared ability cooldown gates eligibility, and eligible abilities are tried
//! in the order minion summon, laser, teleport. Starting any of them stamps
//! the shared cooldown.

use std::time::Duration;

use glam::Vec2;
use tracing::debug;
use wave_arena_core::{
    Aabb, BossBrain, BossTuning, Brain, Color, Enemy, EnemyKind, EnemyMode, EnemySpawn, Event,
    LaserBeam, LaserState, Owner, ParticleKind, Projectile, ProjectileDamage, ProjectileEffect,
    SimulationContext, SoundCue,
};

use crate::{shoot, Frame};

const MINION_SPACING: f32 = 56.0;

pub(crate) fn update(enemy: &mut Enemy, frame: &Frame<'_>, ctx: &mut SimulationContext) {
    let mut brain = match std::mem::replace(&mut enemy.brain, Brain::Grounded) {
        Brain::Boss(brain) => brain,
        other => {
            enemy.brain = other;
            return;
        }
    };
    run(enemy, &mut brain, frame, ctx);
    enemy.brain = Brain::Boss(brain);
}

fn run(enemy: &mut Enemy, brain: &mut BossBrain, frame: &Frame<'_>, ctx: &mut SimulationContext) {
    let tuning = &frame.config.boss;
    let now = ctx.now();

    if let LaserState::Charging { until } = brain.laser {
        enemy.velocity = Vec2::ZERO;
        if now < until {
            return;
        }
        fire_laser(enemy, brain, frame, ctx);
    }

    hold_altitude(enemy, brain, tuning, frame.seconds());
    dodge(enemy, brain, frame, now);
    enemy.position.x += enemy.velocity.x * frame.seconds();
    enemy.position.x = enemy
        .position
        .x
        .clamp(0.0, (frame.bounds.width - enemy.size.x).max(0.0));

    brain
        .minions
        .alive
        .retain(|minion| frame.is_alive(*minion));
    resolve_minion_batch(enemy, brain, frame, ctx);
    let _ = start_ability(enemy, brain, frame, ctx);

    if enemy.mode == EnemyMode::Following && !brain.is_charging_laser() {
        let multiplier = if brain.in_fury {
            tuning.fury_damage_multiplier
        } else {
            1.0
        };
        let _ = shoot(enemy, frame, multiplier, ctx);
    }
}

/// Glides back to the preferred altitude after spawning or a deep teleport.
fn hold_altitude(enemy: &mut Enemy, brain: &mut BossBrain, tuning: &BossTuning, seconds: f32) {
    enemy.velocity.y = 0.0;
    if !brain.returning_to_altitude {
        return;
    }

    let offset = brain.preferred_altitude - enemy.position.y;
    let step = tuning.teleport.return_speed * seconds;
    if offset.abs() <= step {
        enemy.position.y = brain.preferred_altitude;
        brain.returning_to_altitude = false;
        enemy.mode = EnemyMode::Following;
        return;
    }
    enemy.velocity.y = step.copysign(offset) / seconds.max(f32::EPSILON);
    enemy.position.y += step.copysign(offset);
}

/// Sets the horizontal velocity from the most imminent threat.
fn dodge(enemy: &mut Enemy, brain: &mut BossBrain, frame: &Frame<'_>, now: Duration) {
    let tuning = &frame.config.boss;
    let (movement_factor, _) = enemy.status.slow_factors();
    let speed = enemy.speed * movement_factor;
    let body = enemy.aabb();
    let center_x = frame.bounds.center_x();
    let state = &mut brain.dodge;

    if let Some(until) = state.recentering_until {
        if now < until {
            let offset = center_x - body.center().x;
            let step = speed * frame.seconds();
            enemy.velocity.x = if offset.abs() <= step {
                offset / frame.seconds().max(f32::EPSILON)
            } else {
                speed.copysign(offset)
            };
            return;
        }
        state.recentering_until = None;
    }

    let horizon = Duration::from_millis(tuning.threat_horizon_ms).as_secs_f32();
    let Some(threat_x) = most_imminent_threat(&body, frame.projectiles, horizon) else {
        enemy.velocity.x = 0.0;
        return;
    };

    let mut direction = (body.center().x - threat_x).signum();
    if body.center().x == threat_x {
        direction = (center_x - body.center().x).signum();
    }
    if direction < 0.0 && body.min.x <= tuning.wall_buffer {
        direction = 1.0;
    } else if direction > 0.0 && body.max().x >= frame.bounds.width - tuning.wall_buffer {
        direction = -1.0;
    }

    if state.direction != 0.0 && direction != state.direction {
        state.sign_changes += 1;
        state.direction_since = now;
    } else if state.direction == 0.0 {
        state.direction_since = now;
    } else if now.saturating_sub(state.direction_since)
        >= Duration::from_millis(tuning.vibration_window_ms)
    {
        state.sign_changes = 0;
    }
    state.direction = direction;

    if state.sign_changes > tuning.vibration_threshold {
        state.sign_changes = 0;
        state.direction = 0.0;
        state.recentering_until = Some(now + Duration::from_millis(tuning.recenter_ms));
        debug!(boss = enemy.id.get(), "boss abandons dodging to recentre");
        enemy.velocity.x = 0.0;
        return;
    }

    enemy.velocity.x = direction * speed;
}

/// Horizontal centre of the friendly projectile that reaches `body` first
/// within `horizon` seconds; ties go to the lower projectile id.
pub(crate) fn most_imminent_threat(
    body: &Aabb,
    projectiles: &[Projectile],
    horizon: f32,
) -> Option<f32> {
    projectiles
        .iter()
        .filter(|projectile| projectile.is_live() && projectile.is_friendly())
        .filter(|projectile| projectile.laser.is_none())
        .filter_map(|projectile| {
            entry_time(body, projectile)
                .filter(|time| *time <= horizon)
                .map(|time| (time, projectile))
        })
        .min_by(|(a_time, a), (b_time, b)| a_time.total_cmp(b_time).then(a.id.cmp(&b.id)))
        .map(|(_, projectile)| projectile.center().x)
}

/// Time until `projectile` overlaps `body` on both axes, if it ever does.
fn entry_time(body: &Aabb, projectile: &Projectile) -> Option<f32> {
    let shot = projectile.aabb();
    let low = body.min - shot.size;
    let high = body.max();
    let mut enter = f32::NEG_INFINITY;
    let mut exit = f32::INFINITY;

    for (origin, velocity, low, high) in [
        (shot.min.x, projectile.velocity.x, low.x, high.x),
        (shot.min.y, projectile.velocity.y, low.y, high.y),
    ] {
        if velocity.abs() <= f32::EPSILON {
            if origin <= low || origin >= high {
                return None;
            }
            continue;
        }
        let mut near = (low - origin) / velocity;
        let mut far = (high - origin) / velocity;
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        enter = enter.max(near);
        exit = exit.min(far);
    }

    if enter > exit || exit < 0.0 {
        return None;
    }
    Some(enter.max(0.0))
}

/// Spawns minions whose normal-mode timer has expired, announcing the batch
/// once it is within the warning window.
fn resolve_minion_batch(
    enemy: &Enemy,
    brain: &mut BossBrain,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) {
    let tuning = &frame.config.boss.minions;
    let now = ctx.now();
    if brain.in_fury {
        brain.minions.respawn_at = None;
        return;
    }
    let Some(respawn_at) = brain.minions.respawn_at else {
        return;
    };

    let warning = Duration::from_millis(tuning.warning_window_ms);
    if !brain.minions.warned && respawn_at.saturating_sub(now) <= warning {
        brain.minions.warned = true;
        ctx.message("Minions incoming!", Duration::from_millis(1_500), Color::ORANGE);
    }
    if now < respawn_at {
        return;
    }

    brain.minions.respawn_at = None;
    brain.minions.warned = false;
    let spawned = summon(enemy, brain, tuning.normal_cap, frame, ctx);
    if spawned > 0 {
        ctx.message("Minions summoned!", Duration::from_millis(1_200), Color::ORANGE);
    }
}

/// Starts at most one ability; returns whether one started.
fn start_ability(
    enemy: &mut Enemy,
    brain: &mut BossBrain,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) -> bool {
    let tuning = &frame.config.boss;
    let now = ctx.now();
    if brain.is_charging_laser() {
        return false;
    }
    let global = Duration::from_millis(tuning.global_ability_cooldown_ms);
    if !ctx.clock().elapsed(brain.last_ability_at, global) {
        return false;
    }

    if start_summon(enemy, brain, frame, ctx) {
        brain.last_ability_at = Some(now);
        return true;
    }

    let laser = &tuning.laser;
    if laser.enabled
        && ctx
            .clock()
            .elapsed(brain.last_laser_at, Duration::from_millis(laser.cooldown_ms))
    {
        brain.laser = LaserState::Charging {
            until: now + Duration::from_millis(laser.charge_ms),
        };
        brain.last_laser_at = Some(now);
        brain.last_ability_at = Some(now);
        enemy.velocity = Vec2::ZERO;
        ctx.particles(enemy.center(), 30, Color::RED, ParticleKind::LaserWarning);
        ctx.message("LASER CHARGING!", Duration::from_millis(laser.charge_ms), Color::RED);
        ctx.sound(SoundCue::LaserCharge, 0.8);
        debug!(boss = enemy.id.get(), "boss laser charge started");
        return true;
    }

    let teleport = &tuning.teleport;
    if teleport.enabled
        && ctx
            .clock()
            .elapsed(brain.last_teleport_at, Duration::from_millis(teleport.cooldown_ms))
    {
        teleport_boss(enemy, brain, frame, ctx);
        brain.last_teleport_at = Some(now);
        brain.last_ability_at = Some(now);
        return true;
    }

    false
}

/// Arms the normal-mode respawn timer or spawns a fury batch.
fn start_summon(
    enemy: &Enemy,
    brain: &mut BossBrain,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) -> bool {
    let tuning = &frame.config.boss.minions;
    let now = ctx.now();

    if brain.in_fury {
        let interval = Duration::from_millis(tuning.fury_interval_ms);
        if !ctx.clock().elapsed(brain.minions.last_fury_batch, interval) {
            return false;
        }
        brain.minions.last_fury_batch = Some(now);
        let spawned = summon(enemy, brain, tuning.fury_cap, frame, ctx);
        debug!(boss = enemy.id.get(), spawned, "boss fury batch");
        return true;
    }

    if !brain.minions.alive.is_empty() || brain.minions.respawn_at.is_some() {
        return false;
    }
    brain.minions.respawn_at = Some(now + Duration::from_millis(tuning.respawn_ms));
    brain.minions.warned = false;
    debug!(boss = enemy.id.get(), "boss minion respawn armed");
    true
}

/// Tops the living minion count up to `cap`; returns how many spawned.
fn summon(
    enemy: &Enemy,
    brain: &mut BossBrain,
    cap: u32,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) -> usize {
    let missing = (cap as usize).saturating_sub(brain.minions.alive.len());
    if missing == 0 {
        return 0;
    }

    let origin = enemy.center() + Vec2::new(0.0, enemy.size.y * 0.5);
    let spread = (missing as f32 - 1.0) * 0.5;
    for index in 0..missing {
        let x = origin.x + (index as f32 - spread) * MINION_SPACING;
        let spawn = EnemySpawn {
            kind: EnemyKind::Standard,
            center: Vec2::new(x.clamp(0.0, frame.bounds.width), origin.y),
            wave: frame.wave,
            summoned_by: Some(enemy.id),
        };
        let id = ctx.spawn_enemy(&spawn, frame.config);
        brain.minions.alive.push(id);
    }
    ctx.particles(origin, 20, Color::PURPLE, ParticleKind::Teleport);
    ctx.sound(SoundCue::MinionSummon, 0.7);
    missing
}

fn teleport_boss(
    enemy: &mut Enemy,
    brain: &mut BossBrain,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) {
    let tuning = &frame.config.boss.teleport;
    ctx.particles(enemy.center(), 30, Color::PURPLE, ParticleKind::Teleport);

    let max_x = (frame.bounds.width - enemy.size.x).max(0.0);
    let max_y = (frame.bounds.height * tuning.upper_fraction - enemy.size.y).max(0.0);
    let x = ctx.uniform(0.0, max_x);
    let y = ctx.uniform(0.0, max_y);
    enemy.position = Vec2::new(x, y);
    enemy.velocity = Vec2::ZERO;
    brain.returning_to_altitude = (y - brain.preferred_altitude).abs() > tuning.return_depth;
    brain.dodge.direction = 0.0;
    brain.dodge.sign_changes = 0;

    ctx.particles(enemy.center(), 30, Color::PURPLE, ParticleKind::Teleport);
    ctx.sound(SoundCue::Teleport, 0.7);
    debug!(boss = enemy.id.get(), x, y, "boss teleported");
}

fn fire_laser(
    enemy: &mut Enemy,
    brain: &mut BossBrain,
    frame: &Frame<'_>,
    ctx: &mut SimulationContext,
) {
    let tuning = &frame.config.boss;
    let laser = &tuning.laser;
    let now = ctx.now();
    brain.laser = LaserState::Idle;

    let origin = enemy.center();
    let aim = frame.player_center - origin;
    let angle = if aim.length_squared() <= f32::EPSILON {
        std::f32::consts::FRAC_PI_2
    } else {
        aim.y.atan2(aim.x)
    };
    let fury = if brain.in_fury {
        tuning.fury_damage_multiplier
    } else {
        1.0
    };

    let mut beam = Projectile::new(
        ctx.next_projectile_id(),
        Owner::Enemy(enemy.id),
        origin,
        Vec2::ZERO,
        laser.width,
        ProjectileDamage::Fixed(enemy.damage * laser.damage_multiplier * fury),
    );
    beam.hits_left = laser.pierce.max(1);
    beam.effect = ProjectileEffect::Laser;
    beam.laser = Some(LaserBeam {
        origin,
        angle,
        length: 0.0,
        max_length: laser.max_length,
        width: laser.width,
        extend_speed: laser.extend_speed,
        expires_at: now + Duration::from_millis(laser.lifetime_ms),
        last_hit_frame: None,
    });
    ctx.spawn_projectile(beam);
    ctx.sound(SoundCue::LaserFire, 1.0);
    ctx.emit(Event::ScreenShake {
        intensity: 8.0,
        duration: Duration::from_millis(300),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{player_at, spawn};
    use crate::EnemyBehavior;
    use wave_arena_core::{EnemyId, ProjectileId, SimulationConfig};

    /// Well clear of the ids the context hands out to summoned minions.
    const BOSS_ID: u32 = 1_000;

    fn brain(enemy: &Enemy) -> &BossBrain {
        match &enemy.brain {
            Brain::Boss(brain) => brain,
            other => panic!("not a boss: {other:?}"),
        }
    }

    fn brain_mut(enemy: &mut Enemy) -> &mut BossBrain {
        match &mut enemy.brain {
            Brain::Boss(brain) => brain,
            other => panic!("not a boss: {other:?}"),
        }
    }

    fn positioned_boss(config: &SimulationConfig) -> Enemy {
        let center = Vec2::new(640.0, config.boss.preferred_altitude + 50.0);
        spawn(config, BOSS_ID, EnemyKind::Boss, center)
    }

    fn shot(id: u32, center: Vec2, velocity: Vec2) -> Projectile {
        Projectile::new(
            ProjectileId::new(id),
            Owner::Player,
            center,
            velocity,
            10.0,
            ProjectileDamage::Rolled { scale: 1.0 },
        )
    }

    #[test]
    fn threats_are_ranked_by_entry_time_then_id() {
        let body = Aabb::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        let shots = vec![
            shot(4, Vec2::new(150.0, 400.0), Vec2::new(0.0, -400.0)),
            shot(2, Vec2::new(120.0, 300.0), Vec2::new(0.0, -100.0)),
            shot(3, Vec2::new(180.0, 400.0), Vec2::new(0.0, -400.0)),
            shot(5, Vec2::new(500.0, 150.0), Vec2::new(0.0, -400.0)),
        ];

        assert_eq!(most_imminent_threat(&body, &shots, 2.0), Some(180.0));
        assert_eq!(most_imminent_threat(&body, &shots, 0.1), None);
    }

    #[test]
    fn boss_moves_away_from_the_threat_and_respects_the_wall_buffer() {
        let config = SimulationConfig::default();
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let dt = Duration::from_millis(16);

        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        let center = enemies[0].center();
        let threat = vec![shot(9, Vec2::new(center.x - 20.0, 500.0), Vec2::new(0.0, -700.0))];
        ctx.advance(dt);
        EnemyBehavior::new().handle(&mut enemies, &player, &threat, 5, &config, dt, &mut ctx);
        assert!(enemies[0].velocity.x > 0.0, "dodges to the right");

        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        enemies[0].position.x = config.boss.wall_buffer - 10.0;
        let center = enemies[0].center();
        let threat = vec![shot(9, Vec2::new(center.x + 20.0, 500.0), Vec2::new(0.0, -700.0))];
        ctx.advance(dt);
        EnemyBehavior::new().handle(&mut enemies, &player, &threat, 5, &config, dt, &mut ctx);
        assert!(enemies[0].velocity.x > 0.0, "wall buffer reverses the dodge");
    }

    #[test]
    fn alternating_threats_trigger_a_recentre() {
        let config = SimulationConfig::default();
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        enemies[0].position.x = 200.0;
        {
            let brain = brain_mut(&mut enemies[0]);
            brain.returning_to_altitude = false;
            brain.last_ability_at = Some(Duration::from_secs(3_600));
        }
        let mut behavior = EnemyBehavior::new();
        let dt = Duration::from_millis(16);

        for frame in 0..=config.boss.vibration_threshold + 1 {
            let center = enemies[0].center();
            let side = if frame % 2 == 0 { -20.0 } else { 20.0 };
            let threat = vec![shot(
                frame + 1,
                Vec2::new(center.x + side, 500.0),
                Vec2::new(0.0, -700.0),
            )];
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &threat, 5, &config, dt, &mut ctx);
        }

        let state = brain(&enemies[0]).dodge;
        assert!(state.recentering_until.is_some());
        let before = enemies[0].center().x;
        ctx.advance(dt);
        behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        assert!(enemies[0].center().x > before, "heads back toward the centre");
    }

    #[test]
    fn abilities_follow_the_shared_cooldown_and_fixed_order() {
        let config = SimulationConfig::default();
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        let mut behavior = EnemyBehavior::new();
        let dt = Duration::from_millis(100);

        ctx.advance(dt);
        behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        let armed = brain(&enemies[0]);
        assert_eq!(armed.minions.respawn_at, Some(Duration::from_millis(8_100)));
        assert_eq!(armed.last_ability_at, Some(Duration::from_millis(100)));
        assert_eq!(armed.laser, LaserState::Idle);

        while ctx.now() < Duration::from_millis(3_100) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
            if ctx.now() < Duration::from_millis(3_100) {
                assert_eq!(brain(&enemies[0]).laser, LaserState::Idle);
            }
        }
        let charging = brain(&enemies[0]);
        assert_eq!(
            charging.laser,
            LaserState::Charging {
                until: Duration::from_millis(4_300)
            }
        );
        assert!(enemies[0].is_invulnerable());
        assert_eq!(charging.last_teleport_at, None);

        while ctx.now() < Duration::from_millis(4_300) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        }
        assert!(!enemies[0].is_invulnerable());
        let beams: Vec<_> = ctx
            .take_spawned_projectiles()
            .into_iter()
            .filter(|projectile| projectile.laser.is_some())
            .collect();
        assert_eq!(beams.len(), 1);
        assert_eq!(beams[0].owner, Owner::Enemy(EnemyId::new(BOSS_ID)));

        while ctx.now() < Duration::from_millis(6_100) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        }
        assert_eq!(
            brain(&enemies[0]).last_teleport_at,
            Some(Duration::from_millis(6_100))
        );

        while ctx.now() < Duration::from_millis(8_100) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        }
        let minions = ctx.take_spawned_enemies();
        assert_eq!(minions.len(), config.boss.minions.normal_cap as usize);
        assert!(minions
            .iter()
            .all(|minion| minion.summoned_by == Some(EnemyId::new(BOSS_ID))));
        assert_eq!(
            brain(&enemies[0]).minions.alive.len(),
            config.boss.minions.normal_cap as usize
        );
    }

    #[test]
    fn teleports_land_in_the_upper_arena_and_glide_back_when_deep() {
        let config = SimulationConfig::default();
        let tuning = &config.boss.teleport;
        let bounds = config.arena.bounds();
        let mut ctx = SimulationContext::new(31);
        let mut boss = positioned_boss(&config);
        let mut brain = brain(&boss).clone();
        let frame = Frame {
            player_center: Vec2::new(640.0, 600.0),
            projectiles: &[],
            allies: &[],
            config: &config,
            bounds,
            dt: Duration::from_millis(100),
            wave: 5,
        };

        let (mut deep, mut shallow) = (0, 0);
        for _ in 0..64 {
            teleport_boss(&mut boss, &mut brain, &frame, &mut ctx);
            let max_y = bounds.height * tuning.upper_fraction - boss.size.y;
            assert!(boss.position.x >= 0.0 && boss.position.x <= bounds.width - boss.size.x);
            assert!(boss.position.y >= 0.0 && boss.position.y <= max_y);
            let far = (boss.position.y - brain.preferred_altitude).abs() > tuning.return_depth;
            assert_eq!(brain.returning_to_altitude, far);
            if far {
                deep += 1;
            } else {
                shallow += 1;
            }
        }
        assert!(deep > 0 && shallow > 0);

        boss.position.y = brain.preferred_altitude + 150.0;
        boss.mode = EnemyMode::Falling;
        brain.returning_to_altitude = true;
        let seconds = frame.seconds();
        let step = tuning.return_speed * seconds;
        hold_altitude(&mut boss, &mut brain, &config.boss, seconds);
        assert!((boss.position.y - (brain.preferred_altitude + 150.0 - step)).abs() < 1e-3);
        assert!(brain.returning_to_altitude);

        for _ in 0..20 {
            hold_altitude(&mut boss, &mut brain, &config.boss, seconds);
        }
        assert_eq!(boss.position.y, brain.preferred_altitude);
        assert!(!brain.returning_to_altitude);
        assert_eq!(boss.mode, EnemyMode::Following);
    }

    #[test]
    fn minion_warning_fires_once_inside_its_window() {
        let mut config = SimulationConfig::default();
        config.boss.laser.enabled = false;
        config.boss.teleport.enabled = false;
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        let mut behavior = EnemyBehavior::new();
        let dt = Duration::from_millis(100);
        let mut events = Vec::new();
        let mut warnings = Vec::new();
        let mut summoned_at = None;

        while ctx.now() < Duration::from_secs(12) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
            enemies.extend(ctx.take_spawned_enemies());
            ctx.drain_events(&mut events);
            for event in events.drain(..) {
                let Event::CenterMessage { text, .. } = event else {
                    continue;
                };
                match text.as_str() {
                    "Minions incoming!" => warnings.push(ctx.now()),
                    "Minions summoned!" => summoned_at = Some(ctx.now()),
                    _ => {}
                }
            }
        }

        let respawn_at = Duration::from_millis(100 + config.boss.minions.respawn_ms);
        let window = Duration::from_millis(config.boss.minions.warning_window_ms);
        assert_eq!(warnings, vec![respawn_at - window]);
        assert_eq!(summoned_at, Some(respawn_at));
        assert_eq!(enemies.len(), 1 + config.boss.minions.normal_cap as usize);
    }

    #[test]
    fn fury_batches_top_up_to_the_fury_cap_on_their_own_interval() {
        let config = SimulationConfig::default();
        let player = player_at(&config, Vec2::new(640.0, 600.0));
        let mut ctx = SimulationContext::new(5);
        let mut enemies = vec![positioned_boss(&config)];
        {
            let brain = brain_mut(&mut enemies[0]);
            brain.in_fury = true;
            brain.minions.respawn_at = Some(Duration::from_secs(1));
        }
        let mut config = config;
        config.boss.laser.enabled = false;
        config.boss.teleport.enabled = false;
        config.boss.global_ability_cooldown_ms = 0;
        let mut behavior = EnemyBehavior::new();
        let dt = Duration::from_millis(100);

        ctx.advance(dt);
        behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
        let first = ctx.take_spawned_enemies();
        assert_eq!(first.len(), config.boss.minions.fury_cap as usize);
        assert_eq!(brain(&enemies[0]).minions.respawn_at, None);

        // Two minions die; the next batch only refills the missing slots.
        enemies.extend(first);
        enemies[1].hp = 0.0;
        enemies[2].hp = 0.0;
        while ctx.now() < Duration::from_millis(5_100) {
            ctx.advance(dt);
            behavior.handle(&mut enemies, &player, &[], 5, &config, dt, &mut ctx);
            if ctx.now() < Duration::from_millis(5_100) {
                assert!(ctx.take_spawned_enemies().is_empty());
            }
        }
        assert_eq!(ctx.take_spawned_enemies().len(), 2);
    }
}
