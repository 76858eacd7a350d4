#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Player resolver that turns an input snapshot into movement, jumps, dashes
//! and shots.
//!
//! The resolver only ever mutates the player it is handed. Projectiles are
//! handed to the [`SimulationContext`], which buffers them until the world
//! merges them into its projectile collection.

use std::time::Duration;

use wave_arena_core::{
    ArenaBounds, InputSnapshot, InvincibilityKind, InvincibilityWindow, Platform, Player,
    PlayerTuning, SimulationConfig, SimulationContext, SoundCue,
};

mod companions;
mod upgrades;
mod weapon;

pub use companions::{miniature_position, Companions};
pub use upgrades::apply_upgrade;

/// Per-frame player resolver.
#[derive(Debug, Default)]
pub struct PlayerResolver;

impl PlayerResolver {
    /// Creates a new player resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Advances `player` by `dt` under `input`, landing on `platforms` from above.
    pub fn handle(
        &mut self,
        player: &mut Player,
        input: &InputSnapshot,
        platforms: &[Platform],
        config: &SimulationConfig,
        dt: Duration,
        ctx: &mut SimulationContext,
    ) {
        if !player.is_alive() {
            return;
        }

        let tuning = &config.player;
        let bounds = config.arena.bounds();
        let seconds = dt.as_secs_f32();
        start_dash(player, input, ctx);
        let dashing = steer(player, input, dt);
        jump(player, input, tuning, ctx);
        integrate(player, platforms, bounds, tuning.gravity, seconds, dashing);
        recharge_shield(player, seconds, ctx.now());

        if input.fire {
            let _ = weapon::fire(player, input.aim, tuning, ctx);
        }

        player.jump_held = input.jump;
        player.dash_held = input.dash;
    }
}

/// Opens an invincibility window unless a longer one is already running.
pub fn grant_invincibility(
    player: &mut Player,
    kind: InvincibilityKind,
    now: Duration,
    duration: Duration,
) {
    let ends_at = now.saturating_add(duration);
    let covered = player.invincibility.is_some_and(|window| {
        window.is_active(now) && window.start.saturating_add(window.duration) >= ends_at
    });
    if !covered {
        player.invincibility = Some(InvincibilityWindow {
            kind,
            start: now,
            duration,
        });
    }
}

fn start_dash(player: &mut Player, input: &InputSnapshot, ctx: &mut SimulationContext) {
    let pressed = input.dash && !player.dash_held;
    let now = ctx.now();
    let facing = player.facing;
    let Some(dash) = player.dash.as_mut() else {
        return;
    };
    if !pressed || dash.active || !ctx.clock().elapsed(dash.last_started, dash.cooldown) {
        return;
    }

    let requested = input.horizontal();
    dash.active = true;
    dash.timer = dash.duration;
    dash.direction = if requested == 0.0 { facing } else { requested };
    dash.last_started = Some(now);
    let invincibility = dash.invincibility;

    grant_invincibility(player, InvincibilityKind::Dash, now, invincibility);
    ctx.sound(SoundCue::Dash, 0.6);
}

/// Sets the horizontal velocity; returns whether a dash burst is in progress.
fn steer(player: &mut Player, input: &InputSnapshot, dt: Duration) -> bool {
    if let Some(dash) = player.dash.as_mut().filter(|dash| dash.active) {
        player.velocity.x = dash.direction * dash.speed;
        dash.timer = dash.timer.saturating_sub(dt);
        if dash.timer.is_zero() {
            dash.active = false;
        }
        return true;
    }

    let direction = input.horizontal();
    if direction != 0.0 {
        player.facing = direction;
    }
    player.velocity.x = direction * player.movement_speed.value();
    false
}

fn jump(
    player: &mut Player,
    input: &InputSnapshot,
    tuning: &PlayerTuning,
    ctx: &mut SimulationContext,
) {
    if !input.jump || player.jump_held {
        return;
    }

    if player.grounded {
        player.velocity.y = -tuning.jump_velocity;
        player.grounded = false;
        player.double_jump_used = false;
        ctx.sound(SoundCue::Jump, 0.5);
        return;
    }

    // Upward speed must have decayed below the threshold first.
    let decayed = player.velocity.y > -tuning.double_jump_threshold;
    if player.double_jump_unlocked && !player.double_jump_used && decayed {
        player.velocity.y = -tuning.double_jump_velocity;
        player.double_jump_used = true;
        ctx.sound(SoundCue::Jump, 0.5);
    }
}

fn integrate(
    player: &mut Player,
    platforms: &[Platform],
    bounds: ArenaBounds,
    gravity: f32,
    seconds: f32,
    dashing: bool,
) {
    if dashing {
        player.velocity.y = 0.0;
    } else {
        player.velocity.y += gravity * seconds;
    }

    let previous_bottom = player.aabb().bottom();
    player.position += player.velocity * seconds;
    player.position.x = player
        .position
        .x
        .clamp(0.0, (bounds.width - player.size.x).max(0.0));
    player.grounded = false;

    if player.velocity.y > 0.0 {
        if let Some(top) = landing_surface(player, platforms, previous_bottom) {
            land(player, top);
        }
    }

    if player.aabb().bottom() >= bounds.ground_y {
        land(player, bounds.ground_y);
    }
}

/// Highest platform top crossed this frame by a player who started above it.
fn landing_surface(player: &Player, platforms: &[Platform], previous_bottom: f32) -> Option<f32> {
    let body = player.aabb();
    let body_max = body.max();
    platforms
        .iter()
        .map(|platform| platform.rect)
        .filter(|rect| body.min.x < rect.max().x && body_max.x > rect.min.x)
        .filter(|rect| previous_bottom <= rect.min.y && body_max.y >= rect.min.y)
        .map(|rect| rect.min.y)
        .min_by(f32::total_cmp)
}

fn land(player: &mut Player, surface: f32) {
    player.position.y = surface - player.size.y;
    player.velocity.y = 0.0;
    player.grounded = true;
    player.double_jump_used = false;
}

fn recharge_shield(player: &mut Player, seconds: f32, now: Duration) {
    let Some(shield) = player.shield.as_mut() else {
        return;
    };
    if shield.current_hp >= shield.max_hp {
        return;
    }
    let quiet = shield
        .last_damaged
        .map_or(true, |moment| now.saturating_sub(moment) >= shield.recharge_delay);
    if quiet {
        shield.current_hp = (shield.current_hp + shield.recharge_rate * seconds).min(shield.max_hp);
    }
}
