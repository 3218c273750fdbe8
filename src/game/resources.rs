//! Resource ledger: per-actor pools of military, economic, political and
//! information strength.
//!
//! Every amount lives in `[0, 10]`. Updates saturate instead of failing;
//! game balance relies on that saturation, so there is no error path here.
//!
//! Clamping differs per mutation site:
//!
//! | Site | Lower bound | Upper bound |
//! |------|-------------|-------------|
//! | [`ResourcePool::apply_delta`] | 0 | 10 |
//! | [`ResourcePool::spend`] | 0 | n/a (only decreases) |
//! | [`ResourcePool::windfall`] | n/a (only increases) | 10 |

use serde::{Deserialize, Serialize};

use crate::game::Actor;

/// Upper bound of every resource amount.
pub const MAX_AMOUNT: u8 = 10;

/// Kinds of resource each actor holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Armed forces and basing.
    Military,
    /// Investment capacity and trade leverage.
    Economic,
    /// Diplomatic capital and legitimacy.
    Political,
    /// Media, cyber and intelligence reach.
    Information,
}

impl ResourceKind {
    /// All kinds in canonical order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Military,
        ResourceKind::Economic,
        ResourceKind::Political,
        ResourceKind::Information,
    ];

    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Military => "military",
            ResourceKind::Economic => "economic",
            ResourceKind::Political => "political",
            ResourceKind::Information => "information",
        }
    }
}

/// Resource cost of an action. Kinds not mentioned cost nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    /// Military cost.
    pub military: u8,
    /// Economic cost.
    pub economic: u8,
    /// Political cost.
    pub political: u8,
    /// Information cost.
    pub information: u8,
}

impl Cost {
    /// A cost of nothing.
    pub const FREE: Cost = Cost {
        military: 0,
        economic: 0,
        political: 0,
        information: 0,
    };

    /// Set the military component.
    #[must_use]
    pub const fn military(mut self, amount: u8) -> Self {
        self.military = amount;
        self
    }

    /// Set the economic component.
    #[must_use]
    pub const fn economic(mut self, amount: u8) -> Self {
        self.economic = amount;
        self
    }

    /// Set the political component.
    #[must_use]
    pub const fn political(mut self, amount: u8) -> Self {
        self.political = amount;
        self
    }

    /// Set the information component.
    #[must_use]
    pub const fn information(mut self, amount: u8) -> Self {
        self.information = amount;
        self
    }

    /// Amount charged for `kind`.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u8 {
        match kind {
            ResourceKind::Military => self.military,
            ResourceKind::Economic => self.economic,
            ResourceKind::Political => self.political,
            ResourceKind::Information => self.information,
        }
    }

    /// Non-zero components in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u8)> + '_ {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, amount)| amount > 0)
    }
}

/// One actor's resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ResourcePool {
    /// Military strength.
    pub military: u8,
    /// Economic strength.
    pub economic: u8,
    /// Political strength.
    pub political: u8,
    /// Information strength.
    pub information: u8,
}

impl ResourcePool {
    /// Create a pool. Amounts above [`MAX_AMOUNT`] are clamped.
    #[must_use]
    pub const fn new(military: u8, economic: u8, political: u8, information: u8) -> Self {
        Self {
            military: clamp_max(military),
            economic: clamp_max(economic),
            political: clamp_max(political),
            information: clamp_max(information),
        }
    }

    /// Current amount of `kind`.
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> u8 {
        match kind {
            ResourceKind::Military => self.military,
            ResourceKind::Economic => self.economic,
            ResourceKind::Political => self.political,
            ResourceKind::Information => self.information,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u8 {
        match kind {
            ResourceKind::Military => &mut self.military,
            ResourceKind::Economic => &mut self.economic,
            ResourceKind::Political => &mut self.political,
            ResourceKind::Information => &mut self.information,
        }
    }

    /// Add `delta` to `kind`, clamping into `[0, 10]`. Returns the new amount.
    pub fn apply_delta(&mut self, kind: ResourceKind, delta: i32) -> u8 {
        let slot = self.slot_mut(kind);
        let next = (i32::from(*slot).saturating_add(delta)).clamp(0, i32::from(MAX_AMOUNT));
        // In range by the clamp above.
        *slot = u8::try_from(next).unwrap_or(MAX_AMOUNT);
        *slot
    }

    /// Pay `amount` of `kind`, flooring at zero. Returns the new amount.
    pub fn spend(&mut self, kind: ResourceKind, amount: u8) -> u8 {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_sub(amount);
        *slot
    }

    /// Grant a single point of `kind`, capped at [`MAX_AMOUNT`]. Returns the new amount.
    pub fn windfall(&mut self, kind: ResourceKind) -> u8 {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(1).min(MAX_AMOUNT);
        *slot
    }

    /// Sum of all amounts.
    #[must_use]
    pub fn total(&self) -> u32 {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| u32::from(self.get(kind)))
            .sum()
    }

    /// Whether every component of `cost` is covered by this pool.
    #[must_use]
    pub fn covers(&self, cost: &Cost) -> bool {
        cost.iter().all(|(kind, amount)| self.get(kind) >= amount)
    }

    /// All amounts in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u8)> + '_ {
        ResourceKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

const fn clamp_max(amount: u8) -> u8 {
    if amount > MAX_AMOUNT { MAX_AMOUNT } else { amount }
}

/// Resource pools for all three actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ledger {
    /// Russia's pool.
    pub russia: ResourcePool,
    /// China's pool.
    pub china: ResourcePool,
    /// The United States' pool.
    pub united_states: ResourcePool,
}

impl Ledger {
    /// Starting endowments: Russia leads militarily, China economically and
    /// the United States holds the broadest base.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            russia: ResourcePool::new(8, 5, 7, 6),
            china: ResourcePool::new(6, 9, 6, 7),
            united_states: ResourcePool::new(9, 7, 8, 8),
        }
    }

    /// The pool owned by `actor`.
    #[must_use]
    pub const fn pool(&self, actor: Actor) -> &ResourcePool {
        match actor {
            Actor::Russia => &self.russia,
            Actor::China => &self.china,
            Actor::UnitedStates => &self.united_states,
        }
    }

    /// Mutable access to the pool owned by `actor`.
    pub fn pool_mut(&mut self, actor: Actor) -> &mut ResourcePool {
        match actor {
            Actor::Russia => &mut self.russia,
            Actor::China => &mut self.china,
            Actor::UnitedStates => &mut self.united_states,
        }
    }

    /// Apply a clamped delta to one actor's resource. Returns the new amount.
    pub fn apply_delta(&mut self, actor: Actor, kind: ResourceKind, delta: i32) -> u8 {
        self.pool_mut(actor).apply_delta(kind, delta)
    }

    /// Sum of an actor's resources.
    #[must_use]
    pub fn total(&self, actor: Actor) -> u32 {
        self.pool(actor).total()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_endowments() {
        let ledger = Ledger::initial();
        assert_eq!(ledger.total(Actor::Russia), 26);
        assert_eq!(ledger.total(Actor::China), 28);
        assert_eq!(ledger.total(Actor::UnitedStates), 32);
        assert_eq!(ledger.pool(Actor::China).economic, 9);
    }

    #[test]
    fn test_apply_delta_clamps_both_ends() {
        let mut pool = ResourcePool::new(8, 1, 5, 5);
        assert_eq!(pool.apply_delta(ResourceKind::Military, 5), 10);
        assert_eq!(pool.apply_delta(ResourceKind::Economic, -4), 0);
        assert_eq!(pool.apply_delta(ResourceKind::Political, i32::MAX), 10);
        assert_eq!(pool.apply_delta(ResourceKind::Information, i32::MIN), 0);
    }

    #[test]
    fn test_spend_floors_at_zero() {
        let mut pool = ResourcePool::new(2, 0, 0, 0);
        assert_eq!(pool.spend(ResourceKind::Military, 3), 0);
        assert_eq!(pool.spend(ResourceKind::Economic, 1), 0);
    }

    #[test]
    fn test_windfall_caps_at_max() {
        let mut pool = ResourcePool::new(10, 9, 0, 0);
        assert_eq!(pool.windfall(ResourceKind::Military), 10);
        assert_eq!(pool.windfall(ResourceKind::Economic), 10);
        assert_eq!(pool.windfall(ResourceKind::Political), 1);
    }

    #[test]
    fn test_new_clamps_above_max() {
        let pool = ResourcePool::new(20, 11, 10, 3);
        assert_eq!(pool.military, 10);
        assert_eq!(pool.economic, 10);
        assert_eq!(pool.total(), 33);
    }

    #[test]
    fn test_covers() {
        let pool = ResourcePool::new(3, 1, 0, 4);
        assert!(pool.covers(&Cost::FREE.military(3).economic(1)));
        assert!(!pool.covers(&Cost::FREE.military(4)));
        assert!(!pool.covers(&Cost::FREE.political(1)));
        assert!(pool.covers(&Cost::FREE));
    }

    #[test]
    fn test_cost_iter_skips_zero_components() {
        let cost = Cost::FREE.military(2).information(1);
        let parts: Vec<_> = cost.iter().collect();
        assert_eq!(
            parts,
            vec![(ResourceKind::Military, 2), (ResourceKind::Information, 1)]
        );
    }

    #[test]
    fn test_ledger_delta_targets_one_actor() {
        let mut ledger = Ledger::initial();
        ledger.apply_delta(Actor::China, ResourceKind::Economic, -3);
        assert_eq!(ledger.china.economic, 6);
        assert_eq!(ledger.russia, Ledger::initial().russia);
    }
}
