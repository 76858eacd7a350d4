use std::time::Duration;

use glam::Vec2;
use tracing::info;
use wave_arena_core::{
    segment_intersects_aabb, Aabb, Color, Event, InvincibilityKind, InvincibilityWindow,
    ParticleKind, Player, Projectile, ProjectileDamage, SimulationConfig, SimulationContext,
    SoundCue,
};

/// Outcome of one hit on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerHit {
    /// Negated by an invincibility window.
    Negated,
    /// Absorbed by the shield.
    Absorbed,
    /// Hit points were lost.
    Damaged,
    /// The hit was lethal and a spare life was consumed.
    Revived,
    /// The hit was lethal and no life was left.
    Died,
}

/// Applies one incoming hit of `amount` to the player.
///
/// Precedence is fixed: a dash or revive window negates the hit, then a
/// charged shield absorbs it whatever its size, then the post-hit window
/// negates it. Only then is `amount × (1 − defense)` subtracted, at least 1.
/// A lethal hit consumes a spare life when one is left.
pub fn damage_player(
    player: &mut Player,
    amount: f32,
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> PlayerHit {
    let now = ctx.now();
    if player.is_invincible(now) {
        return PlayerHit::Negated;
    }

    if let Some(shield) = player.shield.as_mut().filter(|shield| shield.is_up()) {
        shield.current_hp = (shield.current_hp - 1.0).max(0.0);
        shield.last_damaged = Some(now);
        let broken = !shield.is_up();
        ctx.particles(player.center(), 12, Color::CYAN, ParticleKind::ShieldHit);
        ctx.sound(
            if broken {
                SoundCue::ShieldBreak
            } else {
                SoundCue::Deflect
            },
            0.6,
        );
        return PlayerHit::Absorbed;
    }

    if player.is_hit_invincible(now) {
        return PlayerHit::Negated;
    }

    let defense = player.effective_defense(config.admin.defense_boost());
    let dealt = (amount * (1.0 - defense)).max(1.0);
    player.hp = (player.hp - dealt).max(0.0);
    if let Some(shield) = player.shield.as_mut() {
        shield.last_damaged = Some(now);
    }
    player.hit_invincibility = Some(InvincibilityWindow {
        kind: InvincibilityKind::Hit,
        start: now,
        duration: config.player.hit_invincibility(),
    });
    ctx.floating_text(
        Vec2::new(player.center().x, player.position.y),
        format!("-{}", dealt.round() as i64),
        Color::RED,
    );
    ctx.sound(SoundCue::PlayerHurt, 0.7);
    ctx.emit(Event::BorderFlash {
        duration: Duration::from_millis(200),
    });
    ctx.emit(Event::ScreenShake {
        intensity: 6.0,
        duration: Duration::from_millis(200),
    });

    if player.is_alive() {
        return PlayerHit::Damaged;
    }
    if player.lives == 0 {
        return PlayerHit::Died;
    }
    revive(player, config, ctx);
    PlayerHit::Revived
}

fn revive(player: &mut Player, config: &SimulationConfig, ctx: &mut SimulationContext) {
    player.lives -= 1;
    player.hp = (player.max_hp * config.player.revive_hp_fraction).max(1.0);
    player.invincibility = Some(InvincibilityWindow {
        kind: InvincibilityKind::Revive,
        start: ctx.now(),
        duration: config.player.revive_invincibility(),
    });
    ctx.emit(Event::PlayerRevived {
        lives_left: player.lives,
    });
    ctx.message("REVIVED!", Duration::from_millis(1_500), Color::GOLD);
    ctx.particles(player.center(), 40, Color::GOLD, ParticleKind::Heal);
    ctx.sound(SoundCue::Revive, 0.9);
    info!(lives_left = player.lives, "player revived");
}

/// Resolves enemy shots and lasers against the player.
///
/// Returns the most severe outcome of the frame, or `Negated` when nothing
/// landed. Processing stops once the player died.
pub(crate) fn resolve_enemy_fire(
    player: &mut Player,
    projectiles: &mut [Projectile],
    config: &SimulationConfig,
    ctx: &mut SimulationContext,
) -> PlayerHit {
    let frame = ctx.clock().frame();
    let body = player.aabb();
    let mut worst = PlayerHit::Negated;

    for projectile in projectiles
        .iter_mut()
        .filter(|projectile| projectile.is_live() && !projectile.is_friendly())
    {
        let touching = match projectile.laser.as_mut() {
            Some(beam) => {
                if beam.last_hit_frame == Some(frame) {
                    continue;
                }
                let reach = Aabb::new(
                    body.min - Vec2::splat(beam.width * 0.5),
                    body.size + Vec2::splat(beam.width),
                );
                let touching = segment_intersects_aabb(beam.origin, beam.end(), &reach);
                if touching {
                    beam.last_hit_frame = Some(frame);
                }
                touching
            }
            None => projectile.aabb().intersects(&body),
        };
        if !touching {
            continue;
        }

        let ProjectileDamage::Fixed(amount) = projectile.damage else {
            continue;
        };
        let _ = projectile.consume_pierce();
        let outcome = damage_player(player, amount, config, ctx);
        worst = worst.max_severity(outcome);
        if outcome == PlayerHit::Died {
            break;
        }
    }
    worst
}

impl PlayerHit {
    fn severity(self) -> u8 {
        match self {
            Self::Negated => 0,
            Self::Absorbed => 1,
            Self::Damaged => 2,
            Self::Revived => 3,
            Self::Died => 4,
        }
    }

    fn max_severity(self, other: Self) -> Self {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use wave_arena_core::{EnemyId, LaserBeam, Owner, ProjectileId, Shield};

    use super::*;
    use crate::test_support::player;

    fn shielded(config: &SimulationConfig) -> Player {
        let mut player = player(config);
        player.shield = Some(Shield {
            max_hp: 1.0,
            current_hp: 1.0,
            recharge_delay: Duration::from_secs(3),
            recharge_rate: 0.5,
            last_damaged: None,
        });
        player
    }

    #[test]
    fn shield_absorbs_before_the_hit_window_is_consulted() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(3);
        ctx.advance(Duration::from_millis(500));
        let mut player = shielded(&config);
        player.hit_invincibility = Some(InvincibilityWindow {
            kind: InvincibilityKind::Hit,
            start: Duration::from_millis(400),
            duration: Duration::from_secs(1),
        });

        let outcome = damage_player(&mut player, 9_999.0, &config, &mut ctx);

        assert_eq!(outcome, PlayerHit::Absorbed);
        let shield = player.shield.expect("shield");
        assert_eq!(shield.current_hp, 0.0);
        assert_eq!(shield.last_damaged, Some(Duration::from_millis(500)));
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn dash_invincibility_outranks_the_shield() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(3);
        let mut player = shielded(&config);
        player.invincibility = Some(InvincibilityWindow {
            kind: InvincibilityKind::Dash,
            start: Duration::ZERO,
            duration: Duration::from_secs(1),
        });

        assert_eq!(damage_player(&mut player, 30.0, &config, &mut ctx), PlayerHit::Negated);
        assert_eq!(player.shield.map(|shield| shield.current_hp), Some(1.0));
    }

    #[test]
    fn defense_reduces_damage_to_at_least_one_point() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(3);
        let mut player = player(&config);
        player.defense = 0.95;

        assert_eq!(damage_player(&mut player, 10.0, &config, &mut ctx), PlayerHit::Damaged);
        assert_eq!(player.hp, player.max_hp - 1.0);
        assert!(player.is_hit_invincible(ctx.now()));
        assert_eq!(damage_player(&mut player, 10.0, &config, &mut ctx), PlayerHit::Negated);
    }

    #[test]
    fn a_spare_life_turns_a_lethal_hit_into_a_revive() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(3);
        let mut player = player(&config);
        player.hp = 5.0;
        player.lives = 1;

        assert_eq!(damage_player(&mut player, 50.0, &config, &mut ctx), PlayerHit::Revived);
        assert_eq!(player.lives, 0);
        assert_eq!(player.hp, player.max_hp * config.player.revive_hp_fraction);
        assert!(player.is_invincible(ctx.now()));

        ctx.advance(config.player.revive_invincibility());
        player.hit_invincibility = None;
        player.hp = 5.0;
        assert_eq!(damage_player(&mut player, 50.0, &config, &mut ctx), PlayerHit::Died);
        assert_eq!(player.hp, 0.0);
    }

    #[test]
    fn lasers_hit_at_most_once_per_frame_and_persist() {
        let config = SimulationConfig::default();
        let mut ctx = SimulationContext::new(3);
        ctx.advance(Duration::from_millis(16));
        let mut player = player(&config);
        player.hp = 1_000.0;
        player.max_hp = 1_000.0;
        let origin = player.center() - Vec2::new(0.0, 400.0);
        let mut beam = Projectile::new(
            ProjectileId::new(1),
            Owner::Enemy(EnemyId::new(7)),
            origin,
            Vec2::ZERO,
            26.0,
            ProjectileDamage::Fixed(20.0),
        );
        beam.hits_left = 999;
        beam.laser = Some(LaserBeam {
            origin,
            angle: std::f32::consts::FRAC_PI_2,
            length: 600.0,
            max_length: 600.0,
            width: 26.0,
            extend_speed: 0.0,
            expires_at: Duration::from_secs(5),
            last_hit_frame: None,
        });
        let mut projectiles = vec![beam];

        let first = resolve_enemy_fire(&mut player, &mut projectiles, &config, &mut ctx);
        player.hit_invincibility = None;
        let again = resolve_enemy_fire(&mut player, &mut projectiles, &config, &mut ctx);

        assert_eq!(first, PlayerHit::Damaged);
        assert_eq!(again, PlayerHit::Negated);
        assert_eq!(player.hp, 980.0);
        assert!(projectiles[0].is_live());
    }
}
