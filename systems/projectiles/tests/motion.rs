use std::time::Duration;

use glam::Vec2;
use wave_arena_core::{
    EnemyId, Explosive, LaserBeam, Owner, Projectile, ProjectileDamage, ProjectileId,
    SimulationConfig, SimulationContext,
};
use wave_arena_system_projectiles::ProjectileMotion;

fn projectile(id: u32, center: Vec2, velocity: Vec2) -> Projectile {
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
fn explosive_shots_leaving_the_arena_detonate_once() {
    let config = SimulationConfig::default();
    let bounds = config.arena.bounds();
    let mut ctx = SimulationContext::new(4);
    let mut shot = projectile(1, Vec2::new(bounds.width - 8.0, 200.0), Vec2::new(600.0, 0.0));
    shot.explosive = Some(Explosive {
        radius: 60.0,
        on_hit_chance: 0.0,
        damage_factor: 0.5,
        max_targets: 3,
    });
    let mut projectiles = vec![shot, projectile(2, Vec2::new(200.0, 200.0), Vec2::X * 10.0)];
    let mut motion = ProjectileMotion::new();
    let dt = Duration::from_millis(50);

    ctx.advance(dt);
    assert_eq!(motion.handle(&mut projectiles, &[], bounds, dt, &mut ctx), 1);
    ctx.advance(dt);
    assert_eq!(motion.handle(&mut projectiles, &[], bounds, dt, &mut ctx), 0);

    assert!(!projectiles[0].is_live());
    assert!(projectiles[1].is_live());
    let detonations = ctx.take_detonations();
    assert_eq!(detonations.len(), 1);
    assert_eq!(detonations[0].exclude, None);
}

#[test]
fn laser_beams_extend_to_their_cap_and_expire_on_schedule() {
    let config = SimulationConfig::default();
    let mut ctx = SimulationContext::new(4);
    let mut beam = projectile(3, Vec2::new(600.0, 100.0), Vec2::ZERO);
    beam.owner = Owner::Enemy(EnemyId::new(9));
    beam.laser = Some(LaserBeam {
        origin: Vec2::new(600.0, 100.0),
        angle: std::f32::consts::FRAC_PI_2,
        length: 0.0,
        max_length: 300.0,
        width: 20.0,
        extend_speed: 4_000.0,
        expires_at: Duration::from_millis(200),
        last_hit_frame: None,
    });
    let mut projectiles = vec![beam];
    let mut motion = ProjectileMotion::new();
    let dt = Duration::from_millis(50);

    ctx.advance(dt);
    let _ = motion.handle(&mut projectiles, &[], config.arena.bounds(), dt, &mut ctx);
    let length = projectiles[0].laser.map(|beam| beam.length);
    assert_eq!(length, Some(200.0));

    ctx.advance(dt);
    let _ = motion.handle(&mut projectiles, &[], config.arena.bounds(), dt, &mut ctx);
    let length = projectiles[0].laser.map(|beam| beam.length);
    assert_eq!(length, Some(300.0));
    assert!(projectiles[0].is_live());

    for _ in 0..2 {
        ctx.advance(dt);
        let _ = motion.handle(&mut projectiles, &[], config.arena.bounds(), dt, &mut ctx);
    }
    assert!(!projectiles[0].is_live());
}
