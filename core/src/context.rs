use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    config::SimulationConfig,
    enemy::{Enemy, EnemySpawn},
    projectile::{Detonation, Owner, Projectile, ProjectileDamage, ProjectileEffect},
    upgrade::{UpgradeId, UpgradePool},
    CoinId, Color, EnemyId, Event, ParticleKind, ProjectileId, SoundCue,
};

/// Monotonic simulation clock advanced only by clamped frame deltas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimClock {
    now: Duration,
    frame: u64,
}

impl SimClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            frame: 0,
        }
    }

    /// Advances the clock by one frame of `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
        self.frame = self.frame.wrapping_add(1);
    }

    /// Current simulation time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Index of the current frame.
    #[must_use]
    pub const fn frame(&self) -> u64 {
        self.frame
    }

    /// Time elapsed since `earlier`, or `None` when there was no such moment.
    #[must_use]
    pub fn since(&self, earlier: Option<Duration>) -> Option<Duration> {
        earlier.map(|moment| self.now.saturating_sub(moment))
    }

    /// Reports whether `cooldown` has elapsed since `earlier`; `None` counts as elapsed.
    #[must_use]
    pub fn elapsed(&self, earlier: Option<Duration>, cooldown: Duration) -> bool {
        self.since(earlier).map_or(true, |since| since >= cooldown)
    }
}

/// Per-session context handed by reference into every system.
///
/// Holds the clock, the random source and the outbound event queue, and
/// exposes narrow capabilities for effects that cross system boundaries:
/// spawning enemies and enemy projectiles, queueing blasts, requesting a
/// thunderbolt, and retiring upgrades from the pool. Spawned entities are
/// buffered here and merged into the world's collections between passes.
#[derive(Debug)]
pub struct SimulationContext {
    clock: SimClock,
    rng: ChaCha8Rng,
    events: Vec<Event>,
    next_id: u32,
    spawned_enemies: Vec<Enemy>,
    spawned_projectiles: Vec<Projectile>,
    detonations: Vec<Detonation>,
    thunderbolt_requested: bool,
    upgrade_pool: UpgradePool,
}

impl SimulationContext {
    /// Creates a context whose random source is seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            clock: SimClock::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
            spawned_enemies: Vec::new(),
            spawned_projectiles: Vec::new(),
            detonations: Vec::new(),
            thunderbolt_requested: false,
            upgrade_pool: UpgradePool::new(),
        }
    }

    /// Simulation clock.
    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Advances the simulation clock by one frame.
    pub fn advance(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Current simulation time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Random source of the session.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Rolls a chance in `[0, 1]`; values outside the interval saturate.
    pub fn roll(&mut self, chance: f32) -> bool {
        if chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        self.rng.gen::<f32>() < chance
    }

    /// Uniform sample in `[low, high]`; returns `low` for an empty range.
    pub fn uniform(&mut self, low: f32, high: f32) -> f32 {
        if high <= low {
            return low;
        }
        self.rng.gen_range(low..=high)
    }

    /// Queues an event for the collaborators.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Queues a floating text label.
    pub fn floating_text(&mut self, position: Vec2, text: impl Into<String>, color: Color) {
        self.emit(Event::FloatingText {
            position,
            text: text.into(),
            color,
        });
    }

    /// Queues a particle burst.
    pub fn particles(&mut self, position: Vec2, count: u32, color: Color, kind: ParticleKind) {
        self.emit(Event::SpawnParticles {
            position,
            count,
            color,
            kind,
        });
    }

    /// Queues a sound cue.
    pub fn sound(&mut self, cue: SoundCue, volume: f32) {
        self.emit(Event::PlaySound { cue, volume });
    }

    /// Queues a centred announcement.
    pub fn message(&mut self, text: impl Into<String>, duration: Duration, color: Color) {
        self.emit(Event::CenterMessage {
            text: text.into(),
            duration,
            color,
        });
    }

    /// Moves every queued event into `out`, preserving emission order.
    pub fn drain_events(&mut self, out: &mut Vec<Event>) {
        out.append(&mut self.events);
    }

    /// Allocates an identifier for a new projectile.
    pub fn next_projectile_id(&mut self) -> ProjectileId {
        ProjectileId::new(self.allocate())
    }

    /// Allocates an identifier for a new coin.
    pub fn next_coin_id(&mut self) -> CoinId {
        CoinId::new(self.allocate())
    }

    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Creates an enemy and buffers it until the next merge.
    pub fn spawn_enemy(&mut self, spawn: &EnemySpawn, config: &SimulationConfig) -> EnemyId {
        let id = EnemyId::new(self.allocate());
        let enemy = Enemy::spawn(id, spawn, config, self.now());
        self.spawned_enemies.push(enemy);
        id
    }

    /// Creates an aimed enemy projectile and buffers it until the next merge.
    pub fn spawn_enemy_projectile(
        &mut self,
        owner: EnemyId,
        center: Vec2,
        velocity: Vec2,
        size: f32,
        damage: f32,
    ) -> ProjectileId {
        let id = self.next_projectile_id();
        let mut projectile = Projectile::new(
            id,
            Owner::Enemy(owner),
            center,
            velocity,
            size,
            ProjectileDamage::Fixed(damage),
        );
        projectile.effect = ProjectileEffect::EnemyShot;
        self.spawned_projectiles.push(projectile);
        id
    }

    /// Buffers an already built projectile until the next merge.
    pub fn spawn_projectile(&mut self, projectile: Projectile) {
        self.spawned_projectiles.push(projectile);
    }

    /// Takes every enemy spawned since the last call.
    pub fn take_spawned_enemies(&mut self) -> Vec<Enemy> {
        std::mem::take(&mut self.spawned_enemies)
    }

    /// Takes every projectile spawned since the last call.
    pub fn take_spawned_projectiles(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.spawned_projectiles)
    }

    /// Queues an area blast for the collision pass.
    pub fn queue_detonation(&mut self, detonation: Detonation) {
        self.detonations.push(detonation);
    }

    /// Takes every queued blast.
    pub fn take_detonations(&mut self) -> Vec<Detonation> {
        std::mem::take(&mut self.detonations)
    }

    /// Requests a thunderbolt strike this frame.
    pub fn trigger_thunderbolt(&mut self) {
        self.thunderbolt_requested = true;
    }

    /// Consumes a pending thunderbolt request.
    pub fn take_thunderbolt(&mut self) -> bool {
        std::mem::replace(&mut self.thunderbolt_requested, false)
    }

    /// Upgrades still offered on level up.
    #[must_use]
    pub fn upgrade_pool(&self) -> &UpgradePool {
        &self.upgrade_pool
    }

    /// Retires `upgrade` from future offers; returns whether it was offered.
    pub fn remove_upgrade_from_pool(&mut self, upgrade: UpgradeId) -> bool {
        self.upgrade_pool.remove(upgrade)
    }

    /// Draws up to `count` distinct upgrades from the pool.
    pub fn offer_upgrades(&mut self, count: usize) -> Vec<UpgradeId> {
        self.upgrade_pool.offer(&mut self.rng, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_counts_frames_and_time() {
        let mut clock = SimClock::new();
        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::from_millis(32));
        assert_eq!(clock.frame(), 2);
        assert!(clock.elapsed(None, Duration::from_secs(10)));
        assert!(clock.elapsed(Some(Duration::from_millis(2)), Duration::from_millis(30)));
        assert!(!clock.elapsed(Some(Duration::from_millis(3)), Duration::from_millis(30)));
    }

    #[test]
    fn rolls_saturate_outside_unit_interval() {
        let mut ctx = SimulationContext::new(1);
        assert!(!ctx.roll(0.0));
        assert!(!ctx.roll(-3.0));
        assert!(ctx.roll(1.0));
        assert!(ctx.roll(2.0));
        assert_eq!(ctx.uniform(5.0, 5.0), 5.0);
    }

    #[test]
    fn identifiers_are_unique_across_kinds() {
        let mut ctx = SimulationContext::new(1);
        let projectile = ctx.next_projectile_id();
        let coin = ctx.next_coin_id();
        assert_ne!(projectile.get(), coin.get());
    }

    #[test]
    fn thunderbolt_request_is_consumed_once() {
        let mut ctx = SimulationContext::new(1);
        assert!(!ctx.take_thunderbolt());
        ctx.trigger_thunderbolt();
        assert!(ctx.take_thunderbolt());
        assert!(!ctx.take_thunderbolt());
    }
}
