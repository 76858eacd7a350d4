use std::time::Duration;

/// Periodic damage parameters of a burn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Burn {
    /// Damage dealt per tick for each stack.
    pub damage_per_tick: f32,
    /// Delay between ticks.
    pub tick_interval: Duration,
    /// Simulation time of the last tick, or of the application.
    pub last_tick: Duration,
    /// Current stack count.
    pub stacks: u32,
    /// Maximum stack count.
    pub max_stacks: u32,
}

/// Slow factors of a chill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chill {
    /// Multiplier applied to movement speed.
    pub movement_factor: f32,
    /// Multiplier applied to attack rate.
    pub attack_factor: f32,
}

/// Payload of a timed status effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatusKind {
    /// Periodic damage.
    Burn(Burn),
    /// Movement and attack slow.
    Chill(Chill),
}

/// Timed debuff attached to an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusEffect {
    /// Effect payload.
    pub kind: StatusKind,
    /// Time left before the effect expires.
    pub remaining: Duration,
    /// Duration the effect was applied with.
    pub initial: Duration,
}

impl StatusEffect {
    /// Creates a burn applied at `now`.
    #[must_use]
    pub fn burn(
        damage_per_tick: f32,
        tick_interval: Duration,
        duration: Duration,
        max_stacks: u32,
        now: Duration,
    ) -> Self {
        Self {
            kind: StatusKind::Burn(Burn {
                damage_per_tick,
                tick_interval,
                last_tick: now,
                stacks: 1,
                max_stacks: max_stacks.max(1),
            }),
            remaining: duration,
            initial: duration,
        }
    }

    /// Creates a chill.
    #[must_use]
    pub fn chill(movement_factor: f32, attack_factor: f32, duration: Duration) -> Self {
        Self {
            kind: StatusKind::Chill(Chill {
                movement_factor: movement_factor.clamp(0.0, 1.0),
                attack_factor: attack_factor.clamp(0.0, 1.0),
            }),
            remaining: duration,
            initial: duration,
        }
    }

    fn same_kind(&self, other: &StatusEffect) -> bool {
        matches!(
            (&self.kind, &other.kind),
            (StatusKind::Burn(_), StatusKind::Burn(_))
                | (StatusKind::Chill(_), StatusKind::Chill(_))
        )
    }
}

/// Ordered list of the status effects attached to one entity.
///
/// Re-applying an effect refreshes its duration instead of extending it;
/// burns gain a stack up to their cap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Creates an empty effect list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches `effect`, merging it with an active effect of the same kind.
    pub fn apply(&mut self, effect: StatusEffect) {
        let Some(existing) = self.effects.iter_mut().find(|active| active.same_kind(&effect)) else {
            self.effects.push(effect);
            return;
        };

        existing.remaining = effect.remaining;
        existing.initial = effect.initial;
        match (&mut existing.kind, effect.kind) {
            (StatusKind::Burn(active), StatusKind::Burn(incoming)) => {
                active.max_stacks = active.max_stacks.max(incoming.max_stacks);
                active.stacks = (active.stacks + 1).min(active.max_stacks);
                active.damage_per_tick = active.damage_per_tick.max(incoming.damage_per_tick);
                active.tick_interval = incoming.tick_interval;
            }
            (StatusKind::Chill(active), StatusKind::Chill(incoming)) => {
                active.movement_factor = active.movement_factor.min(incoming.movement_factor);
                active.attack_factor = active.attack_factor.min(incoming.attack_factor);
            }
            _ => {}
        }
    }

    /// Combined `(movement, attack)` multipliers of every active chill.
    #[must_use]
    pub fn slow_factors(&self) -> (f32, f32) {
        self.effects
            .iter()
            .fold((1.0, 1.0), |(movement, attack), effect| match effect.kind {
                StatusKind::Chill(chill) => {
                    (movement * chill.movement_factor, attack * chill.attack_factor)
                }
                StatusKind::Burn(_) => (movement, attack),
            })
    }

    /// Stack count of the active burn, or zero.
    #[must_use]
    pub fn burn_stacks(&self) -> u32 {
        self.effects
            .iter()
            .find_map(|effect| match effect.kind {
                StatusKind::Burn(burn) => Some(burn.stacks),
                StatusKind::Chill(_) => None,
            })
            .unwrap_or(0)
    }

    /// Iterator over the active effects in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    /// Mutable iterator over the active effects in application order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusEffect> {
        self.effects.iter_mut()
    }

    /// Keeps only the effects for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&StatusEffect) -> bool) {
        self.effects.retain(keep);
    }

    /// Number of active effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Reports whether no effect is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burn(max_stacks: u32) -> StatusEffect {
        StatusEffect::burn(
            3.0,
            Duration::from_millis(500),
            Duration::from_secs(3),
            max_stacks,
            Duration::ZERO,
        )
    }

    #[test]
    fn reapplied_burn_refreshes_and_stacks_up_to_cap() {
        let mut effects = StatusEffects::new();
        for _ in 0..10 {
            effects.apply(burn(4));
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.burn_stacks(), 4);
        let remaining = effects.iter().next().map(|effect| effect.remaining);
        assert_eq!(remaining, Some(Duration::from_secs(3)));
    }

    #[test]
    fn chill_keeps_the_stronger_slow() {
        let mut effects = StatusEffects::new();
        effects.apply(StatusEffect::chill(0.5, 0.8, Duration::from_secs(2)));
        effects.apply(StatusEffect::chill(0.7, 0.6, Duration::from_secs(1)));
        assert_eq!(effects.len(), 1);
        assert_eq!(effects.slow_factors(), (0.5, 0.6));
    }

    #[test]
    fn burns_do_not_slow() {
        let mut effects = StatusEffects::new();
        effects.apply(burn(3));
        assert_eq!(effects.slow_factors(), (1.0, 1.0));
    }
}
