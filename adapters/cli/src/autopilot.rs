//! Scripted stand-in for a human player.

use glam::Vec2;
use wave_arena_core::{ArenaBounds, Enemy, InputSnapshot, Player, Projectile, UpgradeId};

const THREAT_RADIUS: f32 = 220.0;
const JUMP_RADIUS: f32 = 120.0;
const DASH_RADIUS: f32 = 70.0;
const HOME_SLACK: f32 = 180.0;

/// Plays the session: fires at the nearest enemy and sidesteps incoming shots.
#[derive(Debug, Default)]
pub(crate) struct Autopilot {
    jumped: bool,
}

impl Autopilot {
    /// Creates an autopilot.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Controls for the coming frame.
    pub(crate) fn controls(
        &mut self,
        player: &Player,
        enemies: &[Enemy],
        projectiles: &[Projectile],
        bounds: ArenaBounds,
    ) -> InputSnapshot {
        let center = player.center();
        let aim = nearest_enemy(enemies, center).unwrap_or(center - Vec2::new(0.0, 300.0));
        let mut input = InputSnapshot {
            fire: true,
            aim,
            ..InputSnapshot::default()
        };

        match nearest_threat(projectiles, center) {
            Some(threat) => {
                let distance = threat.distance(center);
                if threat.x < center.x {
                    input.right = true;
                } else {
                    input.left = true;
                }
                input.jump = distance < JUMP_RADIUS && !self.jumped;
                input.dash = distance < DASH_RADIUS;
            }
            None => {
                let offset = center.x - bounds.center_x();
                input.left = offset > HOME_SLACK;
                input.right = offset < -HOME_SLACK;
            }
        }

        self.jumped = input.jump;
        input
    }

    /// Upgrade taken from a level-up offer: the first one not yet owned.
    pub(crate) fn pick(&self, player: &Player, offer: &[UpgradeId]) -> Option<UpgradeId> {
        offer
            .iter()
            .copied()
            .find(|upgrade| player.upgrade_count(*upgrade) == 0)
            .or_else(|| offer.first().copied())
    }
}

fn nearest_enemy(enemies: &[Enemy], from: Vec2) -> Option<Vec2> {
    enemies
        .iter()
        .filter(|enemy| enemy.is_alive())
        .map(Enemy::center)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

fn nearest_threat(projectiles: &[Projectile], from: Vec2) -> Option<Vec2> {
    projectiles
        .iter()
        .filter(|projectile| !projectile.is_friendly() && projectile.is_live())
        .map(Projectile::center)
        .filter(|center| center.distance(from) < THREAT_RADIUS)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_arena_core::{
        EnemyId, EnemyKind, EnemySpawn, Owner, PlayerTuning, ProjectileDamage, ProjectileId,
        SimulationConfig,
    };

    fn bounds() -> ArenaBounds {
        SimulationConfig::default().arena.bounds()
    }

    fn player_at(x: f32) -> Player {
        Player::new(&PlayerTuning::default(), Vec2::new(x, 600.0))
    }

    fn enemy_at(id: u32, center: Vec2) -> Enemy {
        let spawn = EnemySpawn {
            kind: EnemyKind::Standard,
            center,
            wave: 1,
            summoned_by: None,
        };
        Enemy::spawn(
            EnemyId::new(id),
            &spawn,
            &SimulationConfig::default(),
            Default::default(),
        )
    }

    fn enemy_shot(center: Vec2) -> Projectile {
        Projectile::new(
            ProjectileId::new(1),
            Owner::Enemy(EnemyId::new(1)),
            center,
            Vec2::ZERO,
            10.0,
            ProjectileDamage::Fixed(5.0),
        )
    }

    #[test]
    fn aims_at_the_nearest_enemy() {
        let mut autopilot = Autopilot::new();
        let player = player_at(640.0);
        let enemies = [
            enemy_at(1, Vec2::new(100.0, 100.0)),
            enemy_at(2, Vec2::new(700.0, 400.0)),
        ];
        let input = autopilot.controls(&player, &enemies, &[], bounds());
        assert!(input.fire);
        assert_eq!(input.aim, Vec2::new(700.0, 400.0));
    }

    #[test]
    fn sidesteps_away_from_incoming_shots() {
        let mut autopilot = Autopilot::new();
        let player = player_at(640.0);
        let shot = enemy_shot(player.center() + Vec2::new(-40.0, -20.0));

        let input = autopilot.controls(&player, &[], &[shot.clone()], bounds());
        assert!(input.right && !input.left);
        assert!(input.jump && input.dash);

        let again = autopilot.controls(&player, &[], &[shot], bounds());
        assert!(!again.jump);
    }

    #[test]
    fn drifts_home_when_nothing_threatens() {
        let mut autopilot = Autopilot::new();
        let input = autopilot.controls(&player_at(100.0), &[], &[], bounds());
        assert!(input.right && !input.left);
    }

    #[test]
    fn prefers_upgrades_not_yet_owned() {
        let autopilot = Autopilot::new();
        let mut player = player_at(640.0);
        let _ = player.upgrades.insert(UpgradeId::Damage, 1);
        let offer = [UpgradeId::Damage, UpgradeId::Dash];
        assert_eq!(autopilot.pick(&player, &offer), Some(UpgradeId::Dash));
        assert_eq!(autopilot.pick(&player, &[UpgradeId::Damage]), Some(UpgradeId::Damage));
    }
}
