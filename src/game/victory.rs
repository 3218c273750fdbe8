//! Victory adjudication.
//!
//! Checked in order once the minimum turn is reached:
//! 1. Per-actor victory predicates. A single winner is decisive; several
//!    winners are separated by weighted score.
//! 2. The turn ceiling, which forces a final ranking by resource totals.
//! 3. Elimination: when two actors are depleted the third wins by survival.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Actor, GameState, ScoringWeights, Tension, TensionTier};

/// Earliest turn at which victory is evaluated.
pub const VICTORY_MIN_TURN: u32 = 10;

/// Turn at which the game is adjudicated by resource totals.
pub const TURN_CEILING: u32 = 25;

/// An actor whose resource total is at or below this is eliminated.
pub const ELIMINATION_THRESHOLD: u32 = 8;

/// Lead over the runner-up required for a decisive final verdict.
pub const DECISIVE_GAP: u32 = 8;

/// Lead over the runner-up required for a clear final verdict.
pub const CLEAR_GAP: u32 = 4;

/// Thresholds used by [`adjudicate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryRules {
    /// Earliest turn at which victory is evaluated.
    pub min_turn: u32,
    /// Turn at which the final adjudication is forced.
    pub turn_ceiling: u32,
    /// Resource total at or below which an actor is eliminated.
    pub elimination_threshold: u32,
    /// Tie-break weights for simultaneous winners.
    pub weights: ScoringWeights,
}

impl Default for VictoryRules {
    fn default() -> Self {
        Self {
            min_turn: VICTORY_MIN_TURN,
            turn_ceiling: TURN_CEILING,
            elimination_threshold: ELIMINATION_THRESHOLD,
            weights: ScoringWeights::default(),
        }
    }
}

/// Strategic path by which an actor meets its victory predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VictoryPath {
    /// Russia: military 9+ and political 6+.
    ArcticTerritorialControl,
    /// Russia: military 8+ and economic 7+.
    ResourceExtractionDominance,
    /// China: economic 9+ and political 6+.
    PolarSilkRoadCompletion,
    /// China: political 8+ and economic 7+.
    ArcticPartnershipNetwork,
    /// United States: political 8+ and a total no lower than either rival.
    MultilateralArcticGovernance,
    /// United States: military 9+ and political 7+.
    NatoArcticSecurityFramework,
}

impl VictoryPath {
    /// Lower-case description used in verdict text.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            VictoryPath::ArcticTerritorialControl => "Arctic territorial control",
            VictoryPath::ResourceExtractionDominance => "resource extraction dominance",
            VictoryPath::PolarSilkRoadCompletion => "Polar Silk Road completion",
            VictoryPath::ArcticPartnershipNetwork => "Arctic partnership network",
            VictoryPath::MultilateralArcticGovernance => "multilateral Arctic governance",
            VictoryPath::NatoArcticSecurityFramework => "NATO Arctic security framework",
        }
    }
}

impl fmt::Display for VictoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Evaluate `actor`'s victory predicates. The first satisfied path wins.
#[must_use]
pub fn victory_path(state: &GameState, actor: Actor) -> Option<VictoryPath> {
    let pool = state.ledger.pool(actor);
    match actor {
        Actor::Russia => {
            if pool.military >= 9 && pool.political >= 6 {
                Some(VictoryPath::ArcticTerritorialControl)
            } else if pool.military >= 8 && pool.economic >= 7 {
                Some(VictoryPath::ResourceExtractionDominance)
            } else {
                None
            }
        }
        Actor::China => {
            if pool.economic >= 9 && pool.political >= 6 {
                Some(VictoryPath::PolarSilkRoadCompletion)
            } else if pool.political >= 8 && pool.economic >= 7 {
                Some(VictoryPath::ArcticPartnershipNetwork)
            } else {
                None
            }
        }
        Actor::UnitedStates => {
            let total = state.total(actor);
            let leads = total >= state.total(Actor::Russia) && total >= state.total(Actor::China);
            if pool.political >= 8 && leads {
                Some(VictoryPath::MultilateralArcticGovernance)
            } else if pool.military >= 9 && pool.political >= 7 {
                Some(VictoryPath::NatoArcticSecurityFramework)
            } else {
                None
            }
        }
    }
}

/// How far the final winner finished ahead of the runner-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Margin {
    /// A lead of [`DECISIVE_GAP`] or more.
    Decisive,
    /// A lead of [`CLEAR_GAP`] or more.
    Clear,
    /// Anything closer.
    Narrow,
}

impl Margin {
    /// Classify a lead over the runner-up.
    #[must_use]
    pub const fn from_gap(gap: u32) -> Self {
        if gap >= DECISIVE_GAP {
            Margin::Decisive
        } else if gap >= CLEAR_GAP {
            Margin::Clear
        } else {
            Margin::Narrow
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Margin::Decisive => "decisive",
            Margin::Clear => "clear",
            Margin::Narrow => "narrow",
        }
    }
}

/// Ranking of all actors by resource total, forced at the turn ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalAdjudication {
    /// Turn at which the ranking was taken.
    pub turn: u32,
    /// Actors and totals, highest first.
    pub ranking: [(Actor, u32); 3],
    /// Lead of the winner over the runner-up.
    pub margin: Margin,
    /// Tension at adjudication time.
    pub tension: Tension,
    /// Closing strategic assessment.
    pub assessment: String,
}

impl FinalAdjudication {
    /// Rank the actors in `state` regardless of turn.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let ranking = state.ranking();
        let margin = Margin::from_gap(ranking[0].1 - ranking[1].1);
        Self {
            turn: state.turn,
            ranking,
            margin,
            tension: state.tension,
            assessment: assessment(ranking[0].0, margin, state.tension),
        }
    }

    /// The top-ranked actor.
    #[must_use]
    pub const fn winner(&self) -> Actor {
        self.ranking[0].0
    }

    /// Winner's lead over the runner-up.
    #[must_use]
    pub const fn gap(&self) -> u32 {
        self.ranking[0].1 - self.ranking[1].1
    }
}

impl fmt::Display for FinalAdjudication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "FINAL ADJUDICATION (Turn {}): {} achieves {} victory!",
            self.turn,
            self.winner(),
            self.margin.name()
        )?;
        for (place, (actor, total)) in ["1st", "2nd", "3rd"].iter().zip(&self.ranking) {
            writeln!(f, "{place} {actor}: {total} total resources")?;
        }
        writeln!(f, "Final tension level: {}", self.tension)?;
        write!(f, "Strategic assessment: {}", self.assessment)
    }
}

fn assessment(winner: Actor, margin: Margin, tension: Tension) -> String {
    let base = match (winner, margin) {
        (Actor::Russia, Margin::Decisive) => {
            "Russia's military-first approach secured Arctic dominance through territorial control"
        }
        (Actor::Russia, Margin::Clear) => {
            "Russian energy infrastructure and military presence established regional hegemony"
        }
        (Actor::Russia, Margin::Narrow) => {
            "Russia edged out competitors through sustained pressure on Arctic claims"
        }
        (Actor::China, Margin::Decisive) => {
            "China's Belt and Road strategy successfully transformed Arctic into economic sphere of influence"
        }
        (Actor::China, Margin::Clear) => {
            "Chinese investment and partnerships outmaneuvered military-focused competitors"
        }
        (Actor::China, Margin::Narrow) => {
            "China's economic approach proved slightly more effective than military posturing"
        }
        (Actor::UnitedStates, Margin::Decisive) => {
            "US multilateral strategy successfully prevented Arctic militarization while maintaining influence"
        }
        (Actor::UnitedStates, Margin::Clear) => {
            "American alliance-building and diplomatic engagement secured favorable Arctic governance"
        }
        (Actor::UnitedStates, Margin::Narrow) => {
            "US balance-of-power approach barely contained aggressive expansion by rivals"
        }
    };
    match tension.tier() {
        TensionTier::Critical => format!(
            "{base}. High tensions suggest potential for future conflict despite current resolution."
        ),
        TensionTier::Low => format!(
            "{base}. Low final tensions indicate successful management of Arctic competition."
        ),
        TensionTier::Moderate | TensionTier::High => base.to_string(),
    }
}

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    /// Exactly one actor met a victory predicate.
    Decisive {
        /// Winning actor.
        winner: Actor,
        /// Path taken.
        path: VictoryPath,
    },
    /// Several actors met victory predicates; the highest weighted score won.
    Dominant {
        /// Winning actor.
        winner: Actor,
        /// Path taken by the winner.
        path: VictoryPath,
        /// Winner's weighted score.
        score: f64,
        /// Second-highest scorer among the qualifying actors.
        runner_up: Actor,
    },
    /// Both rivals were eliminated by resource depletion.
    Survival {
        /// Last actor standing.
        winner: Actor,
    },
    /// Ranking forced at the turn ceiling.
    Final(FinalAdjudication),
}

impl Verdict {
    /// Winning actor.
    #[must_use]
    pub const fn winner(&self) -> Actor {
        match self {
            Verdict::Decisive { winner, .. }
            | Verdict::Dominant { winner, .. }
            | Verdict::Survival { winner } => *winner,
            Verdict::Final(adjudication) => adjudication.winner(),
        }
    }

    /// Short snake-case label of the verdict kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Verdict::Decisive { .. } => "decisive",
            Verdict::Dominant { .. } => "dominant",
            Verdict::Survival { .. } => "survival",
            Verdict::Final(_) => "final",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Decisive { winner, path } => {
                write!(f, "{winner} achieves decisive victory through {path}!")
            }
            Verdict::Dominant {
                winner,
                path,
                score,
                runner_up,
            } => write!(
                f,
                "{winner} achieves dominant victory through {path}! (Score: {score:.1}, defeating {runner_up})"
            ),
            Verdict::Survival { winner } => write!(
                f,
                "{winner} wins by survival - competitors eliminated due to resource depletion"
            ),
            Verdict::Final(adjudication) => write!(f, "{adjudication}"),
        }
    }
}

/// Actors at or below the elimination threshold, in [`Actor::ALL`] order.
#[must_use]
pub fn eliminated(state: &GameState, threshold: u32) -> Vec<Actor> {
    Actor::ALL
        .into_iter()
        .filter(|&actor| state.total(actor) <= threshold)
        .collect()
}

/// Evaluate the end of the game. `None` means play continues.
#[must_use]
pub fn adjudicate(state: &GameState, rules: &VictoryRules) -> Option<Verdict> {
    if state.turn < rules.min_turn {
        return None;
    }

    let mut winners: Vec<(Actor, VictoryPath, f64)> = Actor::ALL
        .into_iter()
        .filter_map(|actor| {
            victory_path(state, actor)
                .map(|path| (actor, path, state.weighted_score(actor, &rules.weights)))
        })
        .collect();

    match winners.len() {
        0 => {}
        1 => {
            let (winner, path, _) = winners[0];
            return Some(Verdict::Decisive { winner, path });
        }
        _ => {
            // Stable: equal scores keep Actor::ALL order.
            winners.sort_by(|a, b| b.2.total_cmp(&a.2));
            let (winner, path, score) = winners[0];
            return Some(Verdict::Dominant {
                winner,
                path,
                score,
                runner_up: winners[1].0,
            });
        }
    }

    if state.turn >= rules.turn_ceiling {
        return Some(Verdict::Final(FinalAdjudication::of(state)));
    }

    let out = eliminated(state, rules.elimination_threshold);
    if out.len() >= 2 {
        return Actor::ALL
            .into_iter()
            .find(|actor| !out.contains(actor))
            .map(|winner| Verdict::Survival { winner });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ResourcePool;

    fn state_at(turn: u32, russia: ResourcePool, china: ResourcePool, us: ResourcePool) -> GameState {
        let mut state = GameState::default();
        state.turn = turn;
        state.ledger.russia = russia;
        state.ledger.china = china;
        state.ledger.united_states = us;
        state
    }

    #[test]
    fn test_no_verdict_before_min_turn() {
        let state = state_at(
            9,
            ResourcePool::new(10, 10, 10, 10),
            ResourcePool::new(0, 0, 0, 0),
            ResourcePool::new(0, 0, 0, 0),
        );
        assert!(adjudicate(&state, &VictoryRules::default()).is_none());
    }

    #[test]
    fn test_single_winner_is_decisive() {
        let state = state_at(
            10,
            ResourcePool::new(9, 5, 6, 5),
            ResourcePool::new(5, 5, 5, 5),
            ResourcePool::new(5, 5, 5, 5),
        );
        let verdict = adjudicate(&state, &VictoryRules::default()).unwrap();
        assert_eq!(
            verdict,
            Verdict::Decisive {
                winner: Actor::Russia,
                path: VictoryPath::ArcticTerritorialControl
            }
        );
        assert_eq!(
            verdict.to_string(),
            "Russia achieves decisive victory through Arctic territorial control!"
        );
    }

    #[test]
    fn test_multiple_winners_resolved_by_score() {
        // Russia scores 34.7, China 36.2.
        let state = state_at(
            12,
            ResourcePool::new(9, 7, 6, 5),
            ResourcePool::new(6, 9, 8, 6),
            ResourcePool::new(5, 5, 5, 5),
        );
        let verdict = adjudicate(&state, &VictoryRules::default()).unwrap();
        match verdict {
            Verdict::Dominant {
                winner,
                path,
                score,
                runner_up,
            } => {
                assert_eq!(winner, Actor::China);
                assert_eq!(path, VictoryPath::PolarSilkRoadCompletion);
                assert!((score - 36.2).abs() < 1e-9);
                assert_eq!(runner_up, Actor::Russia);
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn test_us_governance_requires_lead() {
        let mut state = state_at(
            10,
            ResourcePool::new(5, 5, 5, 5),
            ResourcePool::new(5, 5, 5, 5),
            ResourcePool::new(3, 3, 8, 3),
        );
        assert_eq!(victory_path(&state, Actor::UnitedStates), None);
        state.ledger.united_states = ResourcePool::new(4, 4, 8, 4);
        assert_eq!(
            victory_path(&state, Actor::UnitedStates),
            Some(VictoryPath::MultilateralArcticGovernance)
        );
    }

    #[test]
    fn test_final_adjudication_at_ceiling() {
        let state = state_at(
            25,
            ResourcePool::new(5, 5, 5, 5),
            ResourcePool::new(4, 4, 4, 4),
            ResourcePool::new(7, 7, 7, 7),
        );
        let Some(Verdict::Final(adjudication)) = adjudicate(&state, &VictoryRules::default())
        else {
            panic!("expected final adjudication");
        };
        assert_eq!(adjudication.winner(), Actor::UnitedStates);
        assert_eq!(adjudication.gap(), 8);
        assert_eq!(adjudication.margin, Margin::Decisive);
        assert!(adjudication.assessment.starts_with("US multilateral strategy"));
        assert!(adjudication.assessment.ends_with("successful management of Arctic competition."));
        assert!(adjudication.to_string().contains("1st United States: 28 total resources"));
    }

    #[test]
    fn test_margins() {
        assert_eq!(Margin::from_gap(8), Margin::Decisive);
        assert_eq!(Margin::from_gap(7), Margin::Clear);
        assert_eq!(Margin::from_gap(4), Margin::Clear);
        assert_eq!(Margin::from_gap(3), Margin::Narrow);
        assert_eq!(Margin::from_gap(0), Margin::Narrow);
    }

    #[test]
    fn test_survival() {
        let state = state_at(
            11,
            ResourcePool::new(2, 2, 2, 2),
            ResourcePool::new(1, 1, 1, 1),
            ResourcePool::new(5, 5, 5, 5),
        );
        assert_eq!(
            adjudicate(&state, &VictoryRules::default()),
            Some(Verdict::Survival {
                winner: Actor::UnitedStates
            })
        );
    }

    #[test]
    fn test_single_elimination_continues() {
        let state = state_at(
            11,
            ResourcePool::new(2, 2, 2, 2),
            ResourcePool::new(5, 5, 5, 5),
            ResourcePool::new(5, 5, 5, 5),
        );
        assert_eq!(eliminated(&state, ELIMINATION_THRESHOLD), vec![Actor::Russia]);
        assert!(adjudicate(&state, &VictoryRules::default()).is_none());
    }

    #[test]
    fn test_everyone_eliminated_has_no_survivor() {
        let state = state_at(
            11,
            ResourcePool::new(1, 1, 1, 1),
            ResourcePool::new(1, 1, 1, 1),
            ResourcePool::new(1, 1, 1, 1),
        );
        assert!(adjudicate(&state, &VictoryRules::default()).is_none());
    }

    #[test]
    fn test_verdict_serde_round_trip() {
        let verdict = Verdict::Survival {
            winner: Actor::China,
        };
        let json = serde_json::to_string(&verdict).unwrap();
        assert!(json.contains("\"kind\":\"survival\""));
        let back: Verdict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, verdict);
    }
}
