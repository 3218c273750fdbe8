//! Game state management.

use std::mem;

use serde::{Deserialize, Serialize};

use crate::game::crisis::LOGGED_CONSEQUENCES;
use crate::game::{Action, Actor, BoundedLog, Crisis, Ledger, LogCaps, ResourceKind, Tension};

/// Turn number of a fresh game.
pub const FIRST_TURN: u32 = 1;

/// Weights for the tie-break score when several actors win at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Points per military (default: 1.5).
    pub military: f64,
    /// Points per economic (default: 1.2).
    pub economic: f64,
    /// Points per political (default: 1.3).
    pub political: f64,
    /// Points per information (default: 1.0).
    pub information: f64,
}

impl ScoringWeights {
    /// Weight applied to `kind`.
    #[must_use]
    pub const fn weight(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Military => self.military,
            ResourceKind::Economic => self.economic,
            ResourceKind::Political => self.political,
            ResourceKind::Information => self.information,
        }
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            military: 1.5,
            economic: 1.2,
            political: 1.3,
            information: 1.0,
        }
    }
}

/// One attempted action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Who acted.
    pub actor: Actor,
    /// What was attempted.
    pub action: Action,
    /// Whether it succeeded.
    pub success: bool,
}

/// Actions attempted during a single turn, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn the actions belong to.
    pub turn: u32,
    /// Attempts in the order they resolved.
    pub entries: Vec<ActionRecord>,
}

impl TurnRecord {
    /// Empty record for `turn`.
    #[must_use]
    pub fn new(turn: u32) -> Self {
        Self {
            turn,
            entries: Vec::new(),
        }
    }

    /// Record an attempt.
    pub fn push(&mut self, actor: Actor, action: Action, success: bool) {
        self.entries.push(ActionRecord {
            actor,
            action,
            success,
        });
    }

    /// Whether nothing was attempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attempts in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter()
    }

    /// Attempts made by `actor`.
    pub fn by(&self, actor: Actor) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter().filter(move |record| record.actor == actor)
    }

    /// Attempts made by actors other than `actor`.
    pub fn others(&self, actor: Actor) -> impl Iterator<Item = &ActionRecord> {
        self.entries.iter().filter(move |record| record.actor != actor)
    }
}

/// Complete game state.
///
/// Owned by the engine; everything else sees it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current turn number (1-indexed).
    pub turn: u32,
    /// Regional tension.
    pub tension: Tension,
    /// Resource pools of all actors.
    pub ledger: Ledger,
    /// Events, reasoning, reflections and briefings.
    pub events: BoundedLog,
    /// Coalition reactions to the player's moves.
    pub reactions: BoundedLog,
    /// Tension change justifications.
    pub tension_changes: BoundedLog,
    /// Actions attempted so far this turn.
    pub this_turn: TurnRecord,
    /// Actions attempted during the previous turn.
    pub last_turn: TurnRecord,
    /// Headline of the crisis that opened the game.
    pub opening_crisis: Option<String>,
}

impl GameState {
    /// Fresh state at turn 1 with starting endowments and tension.
    #[must_use]
    pub fn new(caps: LogCaps) -> Self {
        Self {
            turn: FIRST_TURN,
            tension: Tension::default(),
            ledger: Ledger::initial(),
            events: BoundedLog::new(caps.events),
            reactions: BoundedLog::new(caps.reactions),
            tension_changes: BoundedLog::new(caps.tension_changes),
            this_turn: TurnRecord::new(FIRST_TURN),
            last_turn: TurnRecord::default(),
            opening_crisis: None,
        }
    }

    /// Get the current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Advance to the next turn, keeping exactly one generation of history.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.last_turn = mem::replace(&mut self.this_turn, TurnRecord::new(self.turn));
    }

    /// Apply an opening crisis: tension, resource shocks and log entries.
    ///
    /// `description` replaces the crisis' base description, so callers can
    /// pass an embellished version.
    pub fn apply_crisis(&mut self, crisis: &Crisis, description: &str) {
        self.tension = self.tension.shifted(i32::from(crisis.tension_increase));
        for &(actor, kind, delta) in crisis.effects {
            self.ledger.apply_delta(actor, kind, delta);
        }

        self.events.push(format!("BREAKING: {}", crisis.name));
        self.events.push(description.to_string());
        for consequence in crisis.consequences.iter().take(LOGGED_CONSEQUENCES) {
            self.events.push(format!("Consequence: {consequence}"));
        }
        self.opening_crisis = Some(crisis.name.to_string());
        self.turn = FIRST_TURN;
        self.this_turn = TurnRecord::new(FIRST_TURN);
        self.last_turn = TurnRecord::default();
    }

    /// Sum of an actor's resources.
    #[must_use]
    pub fn total(&self, actor: Actor) -> u32 {
        self.ledger.total(actor)
    }

    /// Weighted tie-break score of an actor.
    #[must_use]
    pub fn weighted_score(&self, actor: Actor, weights: &ScoringWeights) -> f64 {
        self.ledger
            .pool(actor)
            .iter()
            .map(|(kind, amount)| f64::from(amount) * weights.weight(kind))
            .sum()
    }

    /// Actors ordered by resource total, highest first. Ties keep
    /// [`Actor::ALL`] order.
    #[must_use]
    pub fn ranking(&self) -> [(Actor, u32); 3] {
        let mut ranking = Actor::ALL.map(|actor| (actor, self.total(actor)));
        ranking.sort_by(|a, b| b.1.cmp(&a.1));
        ranking
    }

    /// The actor with the highest resource total and that total.
    #[must_use]
    pub fn leader(&self) -> (Actor, u32) {
        self.ranking()[0]
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(LogCaps::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActionKind, Cost, ResourcePool, catalog};

    #[test]
    fn test_game_state_creation() {
        let game = GameState::default();
        assert_eq!(game.turn(), 1);
        assert_eq!(game.tension.level(), 3);
        assert_eq!(game.ledger, Ledger::initial());
        assert!(game.events.is_empty());
        assert!(game.opening_crisis.is_none());
    }

    #[test]
    fn test_advance_turn_keeps_one_generation() {
        let mut game = GameState::default();
        let action = catalog(Actor::Russia)[0].clone();

        game.advance_turn();
        game.this_turn.push(Actor::Russia, action.clone(), true);
        game.advance_turn();
        assert_eq!(game.turn(), 3);
        assert_eq!(game.last_turn.turn, 2);
        assert_eq!(game.last_turn.entries.len(), 1);
        assert!(game.this_turn.is_empty());

        game.advance_turn();
        assert!(game.last_turn.is_empty());
    }

    #[test]
    fn test_apply_crisis() {
        let mut game = GameState::default();
        let crisis = Crisis::find("Arctic Cyber Infrastructure Attack").unwrap();
        game.apply_crisis(crisis, crisis.description);

        assert_eq!(game.tension.level(), 7);
        assert_eq!(game.ledger.russia.economic, 3);
        assert_eq!(game.ledger.china.economic, 6);
        assert_eq!(game.ledger.united_states.information, 9);
        assert_eq!(game.events.len(), 5);
        assert_eq!(
            game.events.iter().next(),
            Some("BREAKING: Arctic Cyber Infrastructure Attack")
        );
        assert_eq!(
            game.opening_crisis.as_deref(),
            Some("Arctic Cyber Infrastructure Attack")
        );
    }

    #[test]
    fn test_apply_crisis_realigns_turn_records() {
        let mut game = GameState::default();
        game.advance_turn();
        game.advance_turn();
        let crisis = Crisis::find("Arctic Cyber Infrastructure Attack").unwrap();
        game.apply_crisis(crisis, crisis.description);
        assert_eq!(game.turn(), FIRST_TURN);
        assert_eq!(game.this_turn.turn, FIRST_TURN);
        assert!(game.last_turn.is_empty());
        assert!(crate::game::check_invariants(&game).is_empty());
    }

    #[test]
    fn test_crisis_tension_is_capped() {
        let mut game = GameState::default();
        game.tension = Tension::new(8);
        let crisis = Crisis::find("Arctic Resource Discovery Crisis").unwrap();
        game.apply_crisis(crisis, crisis.description);
        assert_eq!(game.tension.level(), 10);
    }

    #[test]
    fn test_weighted_score() {
        let mut game = GameState::default();
        game.ledger.russia = ResourcePool::new(9, 7, 6, 5);
        let score = game.weighted_score(Actor::Russia, &ScoringWeights::default());
        assert!((score - 34.7).abs() < 1e-9);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let mut game = GameState::default();
        game.ledger.russia = ResourcePool::new(5, 5, 5, 5);
        game.ledger.china = ResourcePool::new(5, 5, 5, 5);
        game.ledger.united_states = ResourcePool::new(1, 1, 1, 1);
        let order: Vec<_> = game.ranking().iter().map(|(actor, _)| *actor).collect();
        assert_eq!(order, vec![Actor::Russia, Actor::China, Actor::UnitedStates]);
        assert_eq!(game.leader(), (Actor::Russia, 20));
    }

    #[test]
    fn test_turn_record_filters() {
        let mut record = TurnRecord::new(4);
        let action = crate::game::Action::new(ActionKind::Economic, "x", "y", Cost::FREE);
        record.push(Actor::Russia, action.clone(), true);
        record.push(Actor::China, action.clone(), false);
        record.push(Actor::UnitedStates, action, true);
        assert_eq!(record.by(Actor::China).count(), 1);
        assert_eq!(record.others(Actor::UnitedStates).count(), 2);
    }
}
