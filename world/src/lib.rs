#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for a Wave Arena session.
//!
//! The world owns every entity collection of a session and is the only
//! place that knows the order in which the systems run. Hosts build a world
//! from a validated [`SimulationConfig`], call [`step`] once per frame and
//! read the results back through [`query`].

use std::{collections::VecDeque, time::Duration};

use glam::Vec2;
use tracing::{debug, info, warn};
use wave_arena_core::{
    Aabb, ArenaConfig, Coin, ConfigError, Enemy, Event, InputSnapshot, LightningBolt, Platform,
    Player, Projectile, SimulationConfig, SimulationContext, UpgradeId, WeaponBehavior,
};
use wave_arena_system_combat::{Combatants, CollisionResolver};
use wave_arena_system_enemy_behavior::EnemyBehavior;
use wave_arena_system_player::{apply_upgrade, Companions, PlayerResolver};
use wave_arena_system_projectiles::ProjectileMotion;
use wave_arena_system_status_effects::StatusTicker;
use wave_arena_system_waves::{Battlefield, WaveScheduler};

mod ambient;

const PLATFORM_WIDTH: f32 = 200.0;
const PLATFORM_THICKNESS: f32 = 16.0;

/// Everything the host hands to the world for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Pressed-state snapshot of the controls.
    pub controls: InputSnapshot,
    /// Platforms currently visible to the host; `None` keeps the world's layout.
    pub platforms: Option<Vec<Platform>>,
}

impl FrameInput {
    /// Input carrying `controls` and no platform change.
    #[must_use]
    pub fn from_controls(controls: InputSnapshot) -> Self {
        Self {
            controls,
            platforms: None,
        }
    }
}

#[derive(Debug)]
struct Systems {
    status: StatusTicker,
    player: PlayerResolver,
    companions: Companions,
    enemies: EnemyBehavior,
    projectiles: ProjectileMotion,
    combat: CollisionResolver,
    waves: WaveScheduler,
}

impl Systems {
    fn new(config: &SimulationConfig) -> Self {
        Self {
            status: StatusTicker::new(),
            player: PlayerResolver::new(),
            companions: Companions::new(),
            enemies: EnemyBehavior::new(),
            projectiles: ProjectileMotion::new(),
            combat: CollisionResolver::new(),
            waves: WaveScheduler::new(config),
        }
    }
}

/// Represents the authoritative Wave Arena world state.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    ctx: SimulationContext,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    coins: Vec<Coin>,
    lightning: Vec<LightningBolt>,
    platforms: Vec<Platform>,
    systems: Systems,
    offers: VecDeque<Vec<UpgradeId>>,
    game_over: bool,
}

impl World {
    /// Creates a session from `config`, seeding its random source with `seed`.
    ///
    /// The player starts on the ground in the middle of the arena, the
    /// default platform layout is placed inside the platform band and the
    /// scheduler waits out the first intermission.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let bounds = config.arena.bounds();
        let spawn = Vec2::new(
            bounds.center_x(),
            bounds.ground_y - config.player.height * 0.5,
        );
        let player = Player::new(&config.player, spawn);
        let platforms = default_platforms(&config.arena);
        let systems = Systems::new(&config);
        info!(seed, width = bounds.width, height = bounds.height, "world created");

        Ok(Self {
            ctx: SimulationContext::new(seed),
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            coins: Vec::new(),
            lightning: Vec::new(),
            platforms,
            systems,
            offers: VecDeque::new(),
            game_over: false,
            config,
        })
    }

    /// Applies `upgrade` if it belongs to the oldest pending level-up offer.
    ///
    /// Returns how many times the player now owns the upgrade, or `None`
    /// when no offer is pending or the upgrade was not part of it.
    pub fn choose_upgrade(
        &mut self,
        upgrade: UpgradeId,
        out_events: &mut Vec<Event>,
    ) -> Option<u32> {
        let offered = self.offers.front()?.contains(&upgrade);
        if !offered {
            warn!(upgrade = upgrade.name(), "upgrade was not offered");
            return None;
        }

        let _ = self.offers.pop_front();
        let owned = apply_upgrade(&mut self.player, upgrade, &self.config, &mut self.ctx);
        self.ctx.drain_events(out_events);
        Some(owned)
    }

    /// Replaces the player's weapon.
    pub fn equip_weapon(&mut self, weapon: WeaponBehavior) {
        debug!(?weapon, "weapon equipped");
        self.player.weapon = weapon;
    }

    /// Replaces the platform layout.
    pub fn set_platforms(&mut self, platforms: Vec<Platform>) {
        self.platforms = platforms;
    }
}

/// Advances the world by one frame of `dt` under `input`.
///
/// The delta is clamped to the configured frame ceiling before anything
/// runs. Systems then run in a fixed order: status effects, player,
/// companions, enemy behavior, projectile motion, collisions, ambient
/// entities and the wave scheduler. Entities spawned by a pass are merged
/// before the next pass, and removals are deferred to the end of the frame.
/// Every effect request of the frame is appended to `out_events` in the order
/// it was raised. A world whose session ended ignores further frames.
pub fn step(world: &mut World, input: &FrameInput, dt: Duration, out_events: &mut Vec<Event>) {
    if world.game_over {
        return;
    }
    if let Some(platforms) = &input.platforms {
        world.platforms.clone_from(platforms);
    }

    let World {
        config,
        ctx,
        player,
        enemies,
        projectiles,
        coins,
        lightning,
        platforms,
        systems,
        offers,
        game_over,
    } = world;

    let dt = dt.min(config.arena.max_frame_delta());
    ctx.advance(dt);

    let _ = systems
        .status
        .handle(enemies.as_mut_slice(), dt, config.boss.fury_threshold, ctx);

    systems
        .player
        .handle(player, &input.controls, platforms.as_slice(), config, dt, ctx);
    let _ = systems
        .companions
        .handle(player, enemies.as_slice(), &config.player, dt, ctx);
    merge_spawns(enemies, projectiles, ctx);

    let wave = systems.waves.wave();
    systems.enemies.handle(
        enemies.as_mut_slice(),
        player,
        projectiles.as_slice(),
        wave,
        config,
        dt,
        ctx,
    );
    merge_spawns(enemies, projectiles, ctx);

    let _ = systems.projectiles.handle(
        projectiles.as_mut_slice(),
        enemies.as_slice(),
        config.arena.bounds(),
        dt,
        ctx,
    );

    let report = systems.combat.handle(
        Combatants {
            player: &mut *player,
            enemies: enemies.as_mut_slice(),
            projectiles: projectiles.as_mut_slice(),
            coins: &mut *coins,
            lightning: &mut *lightning,
        },
        wave,
        config,
        ctx,
    );
    merge_spawns(enemies, projectiles, ctx);

    let bounds = config.arena.bounds();
    ambient::advance_coins(coins.as_mut_slice(), bounds, config.player.gravity, dt);
    ambient::expire_coins(coins.as_mut_slice(), ctx.now());
    ambient::expire_lightning(lightning, ctx.now());

    if report.game_over {
        *game_over = true;
    } else {
        let _ = systems.waves.handle(
            enemies.as_slice(),
            Battlefield {
                player: &mut *player,
                projectiles: &mut *projectiles,
                platforms: platforms.as_mut_slice(),
            },
            config,
            dt,
            ctx,
        );
        merge_spawns(enemies, projectiles, ctx);
    }

    enemies.retain(|enemy| enemy.removal.is_none());
    projectiles.retain(Projectile::is_live);
    coins.retain(|coin| !coin.collected);

    let first = out_events.len();
    ctx.drain_events(out_events);
    for event in &out_events[first..] {
        if let Event::LevelUp { choices, .. } = event {
            if !choices.is_empty() {
                offers.push_back(choices.clone());
            }
        }
    }
}

fn merge_spawns(
    enemies: &mut Vec<Enemy>,
    projectiles: &mut Vec<Projectile>,
    ctx: &mut SimulationContext,
) {
    enemies.extend(ctx.take_spawned_enemies());
    projectiles.extend(ctx.take_spawned_projectiles());
}

fn default_platforms(arena: &ArenaConfig) -> Vec<Platform> {
    let low = arena.platform_band_bottom;
    let high = arena.platform_band_top;
    let middle = (low + high) * 0.5;
    [
        (0.2, low, true),
        (0.5, middle, false),
        (0.8, low, true),
        (0.35, high, true),
        (0.65, high, true),
    ]
    .into_iter()
    .map(|(fraction, top, destructible)| Platform {
        rect: Aabb::new(
            Vec2::new(arena.width * fraction - PLATFORM_WIDTH * 0.5, top),
            Vec2::new(PLATFORM_WIDTH, PLATFORM_THICKNESS),
        ),
        destructible,
    })
    .collect()
}

/// Read-only accessors exposed for renderers and hosts.
pub mod query {
    use std::time::Duration;

    use super::World;
    use wave_arena_core::{
        Coin, Enemy, LightningBolt, Platform, Player, Projectile, SimulationConfig, UpgradeId,
    };
    use wave_arena_system_waves::{WavePhase, WavePlan};

    /// Configuration the session runs with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }

    /// Current simulation time.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.ctx.now()
    }

    /// Number of frames stepped so far.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.ctx.clock().frame()
    }

    /// The player.
    #[must_use]
    pub fn player(world: &World) -> &Player {
        &world.player
    }

    /// Enemies alive at the end of the last frame.
    #[must_use]
    pub fn enemies(world: &World) -> &[Enemy] {
        &world.enemies
    }

    /// Projectiles in flight at the end of the last frame.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Coins lying in the arena.
    #[must_use]
    pub fn coins(world: &World) -> &[Coin] {
        &world.coins
    }

    /// Lightning visuals still on screen.
    #[must_use]
    pub fn lightning(world: &World) -> &[LightningBolt] {
        &world.lightning
    }

    /// Current platform layout.
    #[must_use]
    pub fn platforms(world: &World) -> &[Platform] {
        &world.platforms
    }

    /// Number of the current wave; zero before the first wave starts.
    #[must_use]
    pub fn wave(world: &World) -> u32 {
        world.systems.waves.wave()
    }

    /// Phase of the wave scheduler.
    #[must_use]
    pub fn wave_phase(world: &World) -> WavePhase {
        world.systems.waves.phase()
    }

    /// Plan of the current wave.
    #[must_use]
    pub fn wave_plan(world: &World) -> WavePlan {
        world.systems.waves.plan()
    }

    /// Choices of the oldest level-up still waiting for a pick.
    #[must_use]
    pub fn pending_offer(world: &World) -> Option<&[UpgradeId]> {
        world.offers.front().map(Vec::as_slice)
    }

    /// Reports whether the session ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wave_arena_core::{EnemyKind, EnemySpawn, Owner, ProjectileDamage, ProjectileId};

    fn world() -> World {
        World::new(SimulationConfig::default(), 7).expect("default config is valid")
    }

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    fn frame() -> Duration {
        Duration::from_millis(16)
    }

    fn enemy_at(world: &mut World, kind: EnemyKind, center: Vec2) -> Enemy {
        let spawn = EnemySpawn {
            kind,
            center,
            wave: 1,
            summoned_by: None,
        };
        let _ = world.ctx.spawn_enemy(&spawn, &world.config);
        world
            .ctx
            .take_spawned_enemies()
            .pop()
            .expect("spawned enemy")
    }

    fn shot_at(center: Vec2, owner: Owner, damage: ProjectileDamage) -> Projectile {
        Projectile::new(ProjectileId::new(9_000), owner, center, Vec2::ZERO, 20.0, damage)
    }

    #[test]
    fn delta_is_clamped_to_the_frame_ceiling() {
        let mut world = world();
        let mut events = Vec::new();
        step(&mut world, &idle(), Duration::from_secs(5), &mut events);
        assert_eq!(query::now(&world), Duration::from_millis(100));
        assert_eq!(query::frame(&world), 1);
    }

    #[test]
    fn lethal_hit_without_lives_ends_the_session() {
        let mut world = world();
        let mut events = Vec::new();
        step(&mut world, &idle(), frame(), &mut events);

        world.player.hp = 1.0;
        let center = world.player.center();
        let enemy = enemy_at(&mut world, EnemyKind::Standard, Vec2::new(100.0, 100.0));
        world.projectiles.push(shot_at(
            center,
            Owner::Enemy(enemy.id),
            ProjectileDamage::Fixed(50.0),
        ));
        events.clear();
        step(&mut world, &idle(), frame(), &mut events);

        assert!(query::is_game_over(&world));
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::GameOver { level: 1, .. })));

        let stopped_at = query::now(&world);
        events.clear();
        step(&mut world, &idle(), frame(), &mut events);
        assert!(events.is_empty());
        assert_eq!(query::now(&world), stopped_at);
    }

    #[test]
    fn killed_enemies_are_credited_and_gone_after_the_frame() {
        let mut world = world();
        let mut events = Vec::new();
        let mut enemy = enemy_at(&mut world, EnemyKind::Standard, Vec2::new(300.0, 300.0));
        enemy.hp = 1.0;
        let center = enemy.center();
        let id = enemy.id;
        world.enemies.push(enemy);
        world.projectiles.push(shot_at(
            center,
            Owner::Player,
            ProjectileDamage::Fixed(5.0),
        ));

        step(&mut world, &idle(), frame(), &mut events);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::EnemyKilled { enemy, .. } if *enemy == id)));
        assert!(query::enemies(&world).iter().all(|enemy| enemy.id != id));
        assert!(query::projectiles(&world).is_empty());
        assert_eq!(query::player(&world).kills, 1);
    }

    #[test]
    fn only_offered_upgrades_can_be_chosen() {
        let mut world = world();
        let mut events = Vec::new();
        assert_eq!(world.choose_upgrade(UpgradeId::Damage, &mut events), None);

        world
            .offers
            .push_back(vec![UpgradeId::Shield, UpgradeId::Damage]);
        assert_eq!(world.choose_upgrade(UpgradeId::Thunderbolt, &mut events), None);
        assert_eq!(world.choose_upgrade(UpgradeId::Shield, &mut events), Some(1));
        assert!(query::player(&world).shield.is_some());
        assert!(query::pending_offer(&world).is_none());
    }

    #[test]
    fn host_platforms_replace_the_layout() {
        let mut world = world();
        assert_eq!(query::platforms(&world).len(), 5);
        let mut events = Vec::new();
        let input = FrameInput {
            controls: InputSnapshot::default(),
            platforms: Some(Vec::new()),
        };
        step(&mut world, &input, frame(), &mut events);
        assert!(query::platforms(&world).is_empty());
    }
}
