//! Regional tension: a single level in `[1, 10]` moved by each resolved action.
//!
//! # Rules
//!
//! | Kind | Success | Failure |
//! |------|---------|---------|
//! | Military | +2 | +1 |
//! | Cyber | +3 | +2 |
//! | Hybrid | +2 | +1 |
//! | Diplomatic | -1 | 0 |
//! | Information | 0 | +1 (30% backfire) |
//! | Intelligence | +1 (40% detection) | 0 |
//! | Economic | 0 | 0 |
//!
//! A justification is produced only when the level actually moves, so a
//! delta absorbed by the clamp or a chance roll that misses leaves no trace
//! in the tension log.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::{ActionKind, Actor};

/// Lowest tension level.
pub const MIN_TENSION: u8 = 1;

/// Highest tension level.
pub const MAX_TENSION: u8 = 10;

/// Level at the start of every game, before the opening crisis.
pub const INITIAL_TENSION: u8 = 3;

/// Chance that a failed information campaign raises tension.
pub const INFORMATION_BACKFIRE_CHANCE: f64 = 0.3;

/// Chance that a successful intelligence operation is detected.
pub const INTELLIGENCE_DETECTION_CHANCE: f64 = 0.4;

/// Regional tension level, always within `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tension(u8);

/// Coarse reading of the tension level used in briefings and prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensionTier {
    /// Level 3 or below.
    Low,
    /// Levels 4 and 5.
    Moderate,
    /// Levels 6 and 7.
    High,
    /// Level 8 or above.
    Critical,
}

impl TensionTier {
    /// Upper-case label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TensionTier::Low => "LOW",
            TensionTier::Moderate => "MODERATE",
            TensionTier::High => "HIGH",
            TensionTier::Critical => "CRITICAL",
        }
    }
}

impl Tension {
    /// Create a level, clamped into `[1, 10]`.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        if level < MIN_TENSION {
            Self(MIN_TENSION)
        } else if level > MAX_TENSION {
            Self(MAX_TENSION)
        } else {
            Self(level)
        }
    }

    /// Raw level.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// This level moved by `delta`, clamped into `[1, 10]`.
    #[must_use]
    pub fn shifted(self, delta: i32) -> Self {
        let next = (i32::from(self.0).saturating_add(delta))
            .clamp(i32::from(MIN_TENSION), i32::from(MAX_TENSION));
        Self(u8::try_from(next).unwrap_or(MAX_TENSION))
    }

    /// Coarse tier of this level.
    #[must_use]
    pub const fn tier(self) -> TensionTier {
        match self.0 {
            0..=3 => TensionTier::Low,
            4..=5 => TensionTier::Moderate,
            6..=7 => TensionTier::High,
            _ => TensionTier::Critical,
        }
    }

    /// Apply the rule for a resolved action and return what happened.
    ///
    /// `rng` is only consulted for information failures and intelligence
    /// successes.
    pub fn apply_action<R: Rng + ?Sized>(
        &mut self,
        kind: ActionKind,
        success: bool,
        actor: Actor,
        rng: &mut R,
    ) -> TensionChange {
        let old = *self;
        let delta = rule_delta(kind, success, rng);
        *self = old.shifted(delta);

        let justification = (*self != old).then(|| justify(kind, success, actor, old, *self));
        TensionChange {
            old,
            new: *self,
            justification,
        }
    }
}

impl Default for Tension {
    fn default() -> Self {
        Self(INITIAL_TENSION)
    }
}

impl fmt::Display for Tension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{MAX_TENSION}", self.0)
    }
}

/// Outcome of one tension update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensionChange {
    /// Level before the update.
    pub old: Tension,
    /// Level after the update.
    pub new: Tension,
    /// Why the level moved. `None` when it did not.
    pub justification: Option<String>,
}

fn rule_delta<R: Rng + ?Sized>(kind: ActionKind, success: bool, rng: &mut R) -> i32 {
    match (kind, success) {
        (ActionKind::Military | ActionKind::Hybrid, true) => 2,
        (ActionKind::Military | ActionKind::Hybrid, false) => 1,
        (ActionKind::Cyber, true) => 3,
        (ActionKind::Cyber, false) => 2,
        (ActionKind::Diplomatic, true) => -1,
        (ActionKind::Information, false) => i32::from(rng.gen_bool(INFORMATION_BACKFIRE_CHANCE)),
        (ActionKind::Intelligence, true) => i32::from(rng.gen_bool(INTELLIGENCE_DETECTION_CHANCE)),
        (ActionKind::Diplomatic | ActionKind::Intelligence, false)
        | (ActionKind::Information, true)
        | (ActionKind::Economic, _) => 0,
    }
}

fn justify(kind: ActionKind, success: bool, actor: Actor, old: Tension, new: Tension) -> String {
    let (old, new) = (old.level(), new.level());
    match kind {
        ActionKind::Military => format!(
            "Tension rises {old}->{new}: {actor} military action {} regional competition",
            if success { "escalates" } else { "attempts escalation of" }
        ),
        ActionKind::Cyber => format!(
            "Tension spikes {old}->{new}: {actor} cyber operations {} regional tensions",
            if success { "severely escalate" } else { "escalate" }
        ),
        ActionKind::Hybrid => format!(
            "Tension rises {old}->{new}: {actor} hybrid operations {} regional stability",
            if success { "destabilize" } else { "threaten" }
        ),
        ActionKind::Diplomatic => format!(
            "Tension decreases {old}->{new}: {actor} successful diplomacy reduces regional friction"
        ),
        ActionKind::Information => format!(
            "Tension rises {old}->{new}: {actor} failed information campaign backfires, causing friction"
        ),
        ActionKind::Intelligence => format!(
            "Tension rises {old}->{new}: {actor} intelligence operations detected, causing diplomatic friction"
        ),
        ActionKind::Economic => format!(
            "Tension shifts {old}->{new}: {actor} economic pressure reshapes regional competition"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::mock::StepRng;
    use rand_chacha::ChaCha8Rng;

    /// An RNG whose `gen_bool` always succeeds.
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    /// An RNG whose `gen_bool` always fails.
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_new_clamps() {
        assert_eq!(Tension::new(0).level(), 1);
        assert_eq!(Tension::new(42).level(), 10);
        assert_eq!(Tension::default().level(), 3);
    }

    #[test]
    fn test_military_success_and_failure() {
        let mut tension = Tension::new(3);
        let change = tension.apply_action(ActionKind::Military, true, Actor::Russia, &mut never());
        assert_eq!(change.new.level(), 5);
        assert!(change.justification.unwrap().contains("Russia military action escalates"));

        let change = tension.apply_action(ActionKind::Military, false, Actor::Russia, &mut never());
        assert_eq!(change.new.level(), 6);
    }

    #[test]
    fn test_cyber_is_most_escalatory() {
        let mut tension = Tension::new(3);
        tension.apply_action(ActionKind::Cyber, true, Actor::UnitedStates, &mut never());
        assert_eq!(tension.level(), 6);
        tension.apply_action(ActionKind::Cyber, false, Actor::UnitedStates, &mut never());
        assert_eq!(tension.level(), 8);
    }

    #[test]
    fn test_diplomatic_only_lowers_on_success() {
        let mut tension = Tension::new(5);
        let change =
            tension.apply_action(ActionKind::Diplomatic, false, Actor::China, &mut always());
        assert_eq!(change.new.level(), 5);
        assert!(change.justification.is_none());

        let change =
            tension.apply_action(ActionKind::Diplomatic, true, Actor::China, &mut always());
        assert_eq!(change.new.level(), 4);
        assert!(change.justification.unwrap().starts_with("Tension decreases 5->4"));
    }

    #[test]
    fn test_information_backfires_only_on_failure() {
        let mut tension = Tension::new(5);
        tension.apply_action(ActionKind::Information, true, Actor::China, &mut always());
        assert_eq!(tension.level(), 5);
        tension.apply_action(ActionKind::Information, false, Actor::China, &mut never());
        assert_eq!(tension.level(), 5);
        tension.apply_action(ActionKind::Information, false, Actor::China, &mut always());
        assert_eq!(tension.level(), 6);
    }

    #[test]
    fn test_intelligence_detected_only_on_success() {
        let mut tension = Tension::new(5);
        tension.apply_action(ActionKind::Intelligence, false, Actor::Russia, &mut always());
        assert_eq!(tension.level(), 5);
        tension.apply_action(ActionKind::Intelligence, true, Actor::Russia, &mut never());
        assert_eq!(tension.level(), 5);
        tension.apply_action(ActionKind::Intelligence, true, Actor::Russia, &mut always());
        assert_eq!(tension.level(), 6);
    }

    #[test]
    fn test_economic_never_moves_tension() {
        let mut tension = Tension::new(7);
        for success in [true, false] {
            let change =
                tension.apply_action(ActionKind::Economic, success, Actor::China, &mut always());
            assert_eq!(change.old, change.new);
            assert!(change.justification.is_none());
        }
    }

    #[test]
    fn test_no_justification_when_clamp_absorbs_delta() {
        let mut tension = Tension::new(10);
        let change = tension.apply_action(ActionKind::Cyber, true, Actor::UnitedStates, &mut never());
        assert_eq!(change.new.level(), 10);
        assert!(change.justification.is_none());

        let mut tension = Tension::new(1);
        let change =
            tension.apply_action(ActionKind::Diplomatic, true, Actor::UnitedStates, &mut never());
        assert_eq!(change.new.level(), 1);
        assert!(change.justification.is_none());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Tension::new(3).tier(), TensionTier::Low);
        assert_eq!(Tension::new(4).tier(), TensionTier::Moderate);
        assert_eq!(Tension::new(7).tier(), TensionTier::High);
        assert_eq!(Tension::new(8).tier(), TensionTier::Critical);
    }

    #[test]
    fn test_stays_in_bounds_under_random_updates() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut tension = Tension::default();
        for i in 0..1000 {
            let kind = ActionKind::ALL[i % ActionKind::ALL.len()];
            tension.apply_action(kind, rng.gen_bool(0.5), Actor::Russia, &mut rng);
            assert!((MIN_TENSION..=MAX_TENSION).contains(&tension.level()));
        }
    }
}
