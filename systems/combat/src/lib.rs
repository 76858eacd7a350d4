#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision and damage resolution.
//!
//! The resolver runs once per frame after every motion pass. It settles
//! player fire against enemies, queued blasts, thunderbolt strikes, enemy
//! fire against the player and coin pickups, then funnels every enemy left
//! without hit points through a single death handler. Enemies killed earlier
//! in the frame (for example by a burn tick) are reaped by the same handler,
//! so kill credit is never skipped.

use std::time::Duration;

use tracing::info;
use wave_arena_core::{
    Coin, Color, Enemy, Event, LightningBolt, Player, Projectile, SimulationConfig,
    SimulationContext, SoundCue,
};

mod deaths;
mod detonation;
mod hits;
mod incoming;
mod pickup;
mod thunder;

pub use hits::{roll_damage, RolledHit};
pub use incoming::{damage_player, PlayerHit};

/// Entity collections the resolver mutates during a frame.
#[derive(Debug)]
pub struct Combatants<'a> {
    /// The player.
    pub player: &'a mut Player,
    /// Every enemy of the session; spawned children are buffered on the context.
    pub enemies: &'a mut [Enemy],
    /// Every projectile of the session; spawned shrapnel is buffered on the context.
    pub projectiles: &'a mut [Projectile],
    /// Coins lying in the arena; drops are appended here.
    pub coins: &'a mut Vec<Coin>,
    /// Lightning visuals; strikes are appended here.
    pub lightning: &'a mut Vec<LightningBolt>,
}

/// Summary of one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Enemies killed this frame.
    pub kills: usize,
    /// Whether the player ran out of hit points and lives.
    pub game_over: bool,
}

/// Collision and damage resolver.
#[derive(Debug, Default)]
pub struct CollisionResolver {
    targets: Vec<usize>,
}

impl CollisionResolver {
    /// Creates a resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves every collision of the frame and reaps the dead.
    pub fn handle(
        &mut self,
        combatants: Combatants<'_>,
        wave: u32,
        config: &SimulationConfig,
        ctx: &mut SimulationContext,
    ) -> CombatReport {
        let Combatants {
            player,
            enemies,
            projectiles,
            coins,
            lightning,
        } = combatants;

        hits::resolve_player_fire(player, enemies, projectiles, config, ctx);
        for blast in ctx.take_detonations() {
            let _ = detonation::detonate(&blast, player, enemies, &mut self.targets, config, ctx);
        }
        if ctx.take_thunderbolt() {
            let _ = thunder::strike(enemies, lightning, &mut self.targets, config, ctx);
        }

        let mut report = CombatReport::default();
        if player.is_alive() {
            let outcome = incoming::resolve_enemy_fire(player, projectiles, config, ctx);
            if outcome == PlayerHit::Died {
                report.game_over = true;
                ctx.emit(Event::GameOver {
                    wave,
                    level: player.level,
                });
                ctx.message("GAME OVER", Duration::from_secs(3), Color::RED);
                ctx.sound(SoundCue::GameOver, 1.0);
                info!(wave, level = player.level, kills = player.kills, "game over");
            }
        }
        let _ = pickup::collect_coins(player, coins, ctx);

        report.kills = deaths::reap(player, enemies, coins, wave, config, ctx);
        report
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use glam::Vec2;
    use wave_arena_core::{
        Enemy, EnemyId, EnemyKind, EnemySpawn, Owner, Player, Projectile, ProjectileDamage,
        ProjectileId, SimulationConfig,
    };

    pub(crate) fn enemy(
        config: &SimulationConfig,
        id: u32,
        kind: EnemyKind,
        center: Vec2,
    ) -> Enemy {
        let spawn = EnemySpawn {
            kind,
            center,
            wave: 1,
            summoned_by: None,
        };
        Enemy::spawn(EnemyId::new(id), &spawn, config, std::time::Duration::ZERO)
    }

    pub(crate) fn player(config: &SimulationConfig) -> Player {
        Player::new(&config.player, Vec2::new(640.0, 600.0))
    }

    pub(crate) fn player_shot(id: u32, center: Vec2, hits: u32) -> Projectile {
        let mut projectile = Projectile::new(
            ProjectileId::new(id),
            Owner::Player,
            center,
            Vec2::new(0.0, -700.0),
            10.0,
            ProjectileDamage::Rolled { scale: 1.0 },
        );
        projectile.hits_left = hits;
        projectile
    }
}
