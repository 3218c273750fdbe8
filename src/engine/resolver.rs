//! Action resolution: success draws, costs and windfalls.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::engine::rng::roll;
use crate::game::{Action, Actor, Ledger, MAX_TENSION, ResourceKind, Tension};

/// Base success odds of the tension-scaled resolver.
pub const RESOLVER_BASE_ODDS: f64 = 0.70;

/// Extra success odds per tension point below the maximum.
pub const RESOLVER_ODDS_PER_CALM_POINT: f64 = 0.05;

/// Success odds of coalition actions.
pub const COALITION_SUCCESS_ODDS: f64 = 0.80;

/// Success odds of player actions.
pub const PLAYER_SUCCESS_ODDS: f64 = 0.75;

/// How the success probability of an action is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessOdds {
    /// A constant probability.
    Fixed(f64),
    /// `base + (10 - tension) * per_point`, capped at 1. Calm favors success.
    TensionScaled {
        /// Odds at maximum tension.
        base: f64,
        /// Added per tension point below the maximum.
        per_point: f64,
    },
}

impl SuccessOdds {
    /// Success probability at `tension`, within `[0, 1]`.
    #[must_use]
    pub fn probability(self, tension: Tension) -> f64 {
        let p = match self {
            SuccessOdds::Fixed(p) => p,
            SuccessOdds::TensionScaled { base, per_point } => {
                let calm = i32::from(MAX_TENSION) - i32::from(tension.level());
                base + f64::from(calm) * per_point
            }
        };
        p.clamp(0.0, 1.0)
    }

    /// Whether the parameters describe a usable probability.
    #[must_use]
    pub fn is_valid(self) -> bool {
        match self {
            SuccessOdds::Fixed(p) => (0.0..=1.0).contains(&p),
            SuccessOdds::TensionScaled { base, per_point } => {
                base.is_finite() && per_point.is_finite()
            }
        }
    }
}

impl Default for SuccessOdds {
    fn default() -> Self {
        SuccessOdds::TensionScaled {
            base: RESOLVER_BASE_ODDS,
            per_point: RESOLVER_ODDS_PER_CALM_POINT,
        }
    }
}

/// Everything a resolver needs to know about one attempt.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// Acting actor.
    pub actor: Actor,
    /// Chosen action.
    pub action: &'a Action,
    /// Tension before the attempt.
    pub tension: Tension,
    /// Success odds for this call site.
    pub odds: SuccessOdds,
    /// Chance of a windfall per costed resource on success.
    pub windfall_chance: f64,
}

/// Numeric outcome of one attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Whether the action succeeded.
    pub success: bool,
    /// Resources that yielded a +1 windfall.
    pub windfalls: Vec<ResourceKind>,
}

/// Decides the outcome of an action and applies its resource effects.
///
/// Implementations must only touch the acting actor's pool and must keep
/// every amount within `[0, 10]`.
pub trait ActionResolver: Send {
    /// Resolve one attempt, charging its cost to `ledger`.
    fn resolve(
        &mut self,
        ctx: &ResolutionContext<'_>,
        ledger: &mut Ledger,
        rng: &mut dyn RngCore,
    ) -> Resolution;
}

/// Bernoulli success, full cost, then independent windfalls on success.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardResolver;

impl ActionResolver for StandardResolver {
    fn resolve(
        &mut self,
        ctx: &ResolutionContext<'_>,
        ledger: &mut Ledger,
        rng: &mut dyn RngCore,
    ) -> Resolution {
        let success = roll(rng, ctx.odds.probability(ctx.tension));
        let pool = ledger.pool_mut(ctx.actor);

        let mut windfalls = Vec::new();
        for (kind, amount) in ctx.action.cost.iter() {
            pool.spend(kind, amount);
            if success && roll(rng, ctx.windfall_chance) {
                pool.windfall(kind);
                windfalls.push(kind);
            }
        }

        Resolution { success, windfalls }
    }
}
