use std::time::Duration;

use tracing::{debug, trace};
use wave_arena_core::{
    Color, Detonation, Enemy, Event, ParticleKind, Player, SimulationConfig, SimulationContext,
    SoundCue,
};

use crate::hits::{roll_damage, steal_life};

/// Resolves one blast; returns how many enemies it damaged.
///
/// The blast catches up to `max_targets` living enemies whose centre lies
/// within its radius, nearest first with ties going to the lower id. The
/// payload is rolled once and scaled by the damage factor.
pub(crate) fn detonate(
    blast: &Detonation,
    player: &mut Player,
    enemies: &mut [Enemy],
    targets: &mut Vec<usize>,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> usize {
    ctx.particles(blast.position, 30, Color::ORANGE, ParticleKind::Explosion);
    ctx.sound(SoundCue::Explosion, 0.6);
    ctx.emit(Event::ScreenShake {
        intensity: 4.0,
        duration: Duration::from_millis(200),
    });

    let radius = blast.explosive.radius;
    targets.clear();
    targets.extend(enemies.iter().enumerate().filter_map(|(index, enemy)| {
        let eligible = enemy.is_alive()
            && Some(enemy.id) != blast.exclude
            && enemy.center().distance(blast.position) <= radius;
        eligible.then_some(index)
    }));
    targets.sort_by(|&a, &b| {
        let a_distance = enemies[a].center().distance(blast.position);
        let b_distance = enemies[b].center().distance(blast.position);
        a_distance
            .total_cmp(&b_distance)
            .then(enemies[a].id.cmp(&enemies[b].id))
    });
    targets.truncate(blast.explosive.max_targets);

    let hit = roll_damage(blast.damage, player, config, ctx);
    let amount = hit.amount * blast.explosive.damage_factor;
    let color = if hit.critical { Color::GOLD } else { Color::ORANGE };
    let mut damaged = 0;
    for &index in targets.iter() {
        let enemy = &mut enemies[index];
        if enemy.is_invulnerable() {
            ctx.particles(enemy.center(), 8, Color::CYAN, ParticleKind::ShieldHit);
            continue;
        }
        let report = enemy.apply_damage(amount, color, config.boss.fury_threshold, ctx);
        if report.fury_triggered {
            debug!(boss = enemy.id.get(), "boss fury latched");
        }
        steal_life(player, amount, ctx);
        damaged += 1;
    }

    trace!(
        x = blast.position.x,
        y = blast.position.y,
        damaged,
        "detonation resolved"
    );
    damaged
}
