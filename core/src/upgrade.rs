use rand::seq::SliceRandom;
use rand::Rng;

/// Upgrades the player may acquire on level up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeId {
    /// Raises the damage range.
    Damage,
    /// Raises the rate of fire.
    AttackSpeed,
    /// Raises horizontal speed.
    MovementSpeed,
    /// Raises maximum hit points.
    MaxHp,
    /// Raises critical hit chance.
    CritChance,
    /// Raises the critical hit multiplier.
    CritDamage,
    /// Raises defense.
    Defense,
    /// Heals for a fraction of dealt damage.
    LifeSteal,
    /// Grants a recharging shield.
    Shield,
    /// Unlocks the dash.
    Dash,
    /// Unlocks the double jump.
    DoubleJump,
    /// Hits may ignite enemies.
    Burn,
    /// Hits may chill enemies.
    Chill,
    /// Projectiles may explode on impact.
    ExplosiveRounds,
    /// Projectiles pierce one more enemy.
    PiercingRounds,
    /// Projectiles steer toward enemies.
    HomingRounds,
    /// Corpses release shrapnel.
    Fragmentation,
    /// Adds a companion that fires on its own.
    Miniature,
    /// Periodic lightning strikes.
    Thunderbolt,
    /// Adds a spare life.
    ExtraLife,
}

impl UpgradeId {
    /// Every upgrade in catalogue order.
    pub const ALL: [UpgradeId; 20] = [
        Self::Damage,
        Self::AttackSpeed,
        Self::MovementSpeed,
        Self::MaxHp,
        Self::CritChance,
        Self::CritDamage,
        Self::Defense,
        Self::LifeSteal,
        Self::Shield,
        Self::Dash,
        Self::DoubleJump,
        Self::Burn,
        Self::Chill,
        Self::ExplosiveRounds,
        Self::PiercingRounds,
        Self::HomingRounds,
        Self::Fragmentation,
        Self::Miniature,
        Self::Thunderbolt,
        Self::ExtraLife,
    ];

    /// Reports whether the upgrade leaves the pool once acquired.
    #[must_use]
    pub const fn is_unique(self) -> bool {
        matches!(
            self,
            Self::Shield | Self::Dash | Self::DoubleJump | Self::Fragmentation | Self::Thunderbolt
        )
    }

    /// Display name of the upgrade.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Damage => "Sharpened Rounds",
            Self::AttackSpeed => "Hair Trigger",
            Self::MovementSpeed => "Light Boots",
            Self::MaxHp => "Vitality",
            Self::CritChance => "Keen Eye",
            Self::CritDamage => "Deadly Precision",
            Self::Defense => "Plating",
            Self::LifeSteal => "Vampirism",
            Self::Shield => "Energy Shield",
            Self::Dash => "Dash",
            Self::DoubleJump => "Double Jump",
            Self::Burn => "Incendiary Rounds",
            Self::Chill => "Cryo Rounds",
            Self::ExplosiveRounds => "Explosive Rounds",
            Self::PiercingRounds => "Piercing Rounds",
            Self::HomingRounds => "Seeker Rounds",
            Self::Fragmentation => "Fragmentation",
            Self::Miniature => "Miniature",
            Self::Thunderbolt => "Thunderbolt",
            Self::ExtraLife => "Extra Life",
        }
    }
}

/// Upgrades still offered on level up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradePool {
    available: Vec<UpgradeId>,
}

impl Default for UpgradePool {
    fn default() -> Self {
        Self::new()
    }
}

impl UpgradePool {
    /// Creates a pool holding the whole catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            available: UpgradeId::ALL.to_vec(),
        }
    }

    /// Removes `upgrade`; returns whether it was present.
    pub fn remove(&mut self, upgrade: UpgradeId) -> bool {
        let before = self.available.len();
        self.available.retain(|candidate| *candidate != upgrade);
        self.available.len() != before
    }

    /// Reports whether `upgrade` may still be offered.
    #[must_use]
    pub fn contains(&self, upgrade: UpgradeId) -> bool {
        self.available.contains(&upgrade)
    }

    /// Number of upgrades in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.available.len()
    }

    /// Reports whether the pool is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    /// Draws up to `count` distinct upgrades, sorted in catalogue order.
    pub fn offer<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<UpgradeId> {
        let mut offer: Vec<UpgradeId> = self
            .available
            .choose_multiple(rng, count)
            .copied()
            .collect();
        offer.sort();
        offer
    }
}
