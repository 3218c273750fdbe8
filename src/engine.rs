//! Turn orchestration.
//!
//! [`WargameEngine`] owns the [`GameState`] and drives it through the turn
//! state machine:
//!
//! ```text
//! AwaitingTurn ──execute_turn──► ResolvingAiActors ──┬─ autopilot ─► (adjudicate)
//!      ▲                                             └─ interactive ─► AwaitingPlayerAction
//!      │                                                                  │
//!      │                                       execute_human_action ──────┘
//!      │                                                │
//!      │                                    ResolvingPlayerAction ─► (adjudicate)
//!      └──────────── no verdict ◄──────────────────────────────────────────┘
//!                    verdict ──► GameOver
//! ```
//!
//! Each resolved action is checked against the state invariants in debug
//! builds.

mod advisor;
mod narrative;
mod oracle;
mod resolver;
mod rng;
mod selection;
mod snapshot;

pub use advisor::{
    AdvisorBrief, AdvisorReply, Confidence, DiscussionExchange, Priority, Recommendation, Urgency,
};
pub use narrative::{ActionReport, FLAVOR_EVENTS, MAX_REACTIONS};
pub use oracle::{
    CommandOracle, DEFAULT_ORACLE_TIMEOUT, EnrichmentKind, EnrichmentRequest, NarrativeOracle,
    Narrator,
};
pub use resolver::{
    ActionResolver, COALITION_SUCCESS_ODDS, PLAYER_SUCCESS_ODDS, RESOLVER_BASE_ODDS,
    RESOLVER_ODDS_PER_CALM_POINT, Resolution, ResolutionContext, StandardResolver, SuccessOdds,
};
pub use rng::RngStreams;
pub use selection::{Selection, select_action};
pub use snapshot::EngineSnapshot;

use std::fmt;
use std::time::Duration;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::error::{EngineError, SnapshotError};
use crate::game::{
    Action, Actor, CRISES, Crisis, FIRST_TURN, FinalAdjudication, GameState, Tension, Verdict,
    adjudicate, affordable, assert_invariants, catalog,
};
use rng::roll;

/// Position of the engine in the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Ready for [`WargameEngine::execute_turn`].
    AwaitingTurn,
    /// Coalition actors are acting.
    ResolvingAiActors,
    /// Suspended until [`WargameEngine::execute_human_action`].
    AwaitingPlayerAction,
    /// The player's action is being resolved.
    ResolvingPlayerAction,
    /// A verdict has been reached. Terminal.
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::AwaitingTurn => "awaiting turn",
            Phase::ResolvingAiActors => "resolving coalition actors",
            Phase::AwaitingPlayerAction => "awaiting player action",
            Phase::ResolvingPlayerAction => "resolving player action",
            Phase::GameOver => "game over",
        })
    }
}

/// Result of [`WargameEngine::execute_turn`].
#[derive(Debug, Clone, PartialEq)]
pub enum TurnStatus {
    /// The turn completed; call `execute_turn` again.
    Continue,
    /// The player must choose from [`WargameEngine::human_actions`].
    AwaitingPlayer,
    /// The game ended.
    GameOver(Verdict),
}

/// Result of [`WargameEngine::execute_human_action`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerActionStatus {
    /// The turn completed.
    Completed,
    /// The game ended.
    GameOver(Verdict),
}

#[derive(Deserialize)]
struct ReportText {
    dramatic_description: String,
    tactical_details: String,
}

/// The Arctic wargame engine.
pub struct WargameEngine {
    config: GameConfig,
    state: GameState,
    rng: RngStreams,
    phase: Phase,
    offered: Vec<Action>,
    verdict: Option<Verdict>,
    resolver: Box<dyn ActionResolver>,
    narrator: Narrator,
    last_report: Option<ActionReport>,
    discussion: Vec<DiscussionExchange>,
}

impl WargameEngine {
    /// Create an engine with a fresh state, seeded streams, the standard
    /// resolver and the oracle named by `config`, if any.
    #[must_use]
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(config.log_caps);
        Self::from_state(config, state, seed)
    }

    /// Create an engine around an existing state.
    #[must_use]
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Self {
        let narrator = narrator_for(&config);
        Self {
            config,
            state,
            rng: RngStreams::from_seed(seed),
            phase: Phase::AwaitingTurn,
            offered: Vec::new(),
            verdict: None,
            resolver: Box::new(StandardResolver),
            narrator,
            last_report: None,
            discussion: Vec::new(),
        }
    }

    /// Restore an engine from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Invalid`] if the snapshot fails
    /// [`EngineSnapshot::validate`].
    pub fn from_snapshot(snapshot: EngineSnapshot) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        let narrator = narrator_for(&snapshot.config);
        Ok(Self {
            narrator,
            config: snapshot.config,
            state: snapshot.state,
            rng: snapshot.rng,
            phase: snapshot.phase,
            offered: snapshot.offered,
            verdict: snapshot.verdict,
            resolver: Box::new(StandardResolver),
            last_report: snapshot.last_report,
            discussion: snapshot.discussion,
        })
    }

    /// Replace the action resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Box<dyn ActionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Attach a narrative oracle, using the configured retry count.
    #[must_use]
    pub fn with_oracle(mut self, oracle: Box<dyn NarrativeOracle>) -> Self {
        self.narrator = Narrator::new(oracle, self.config.oracle_retries);
        self
    }

    /// Capture everything needed to continue this game later.
    #[must_use]
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config.clone(),
            state: self.state.clone(),
            rng: self.rng.clone(),
            phase: self.phase,
            offered: self.offered.clone(),
            verdict: self.verdict.clone(),
            last_report: self.last_report.clone(),
            discussion: self.discussion.clone(),
        }
    }

    /// Apply a random opening crisis and return it.
    pub fn start_game(&mut self) -> &'static Crisis {
        let crisis = CRISES.choose(&mut self.rng.mechanics).unwrap_or(&CRISES[0]);
        self.start_game_with(crisis);
        crisis
    }

    /// Apply `crisis` as the opening of the game.
    ///
    /// A game already under way (crisis applied or turns played) is first
    /// reset to the starting endowments, so calling this again restarts.
    /// The random streams carry on where they were.
    pub fn start_game_with(&mut self, crisis: &Crisis) {
        if self.has_started() {
            info!(turn = self.state.turn, "restarting game");
            self.reset();
        }
        let description = self
            .narrator
            .enrich(&EnrichmentRequest::crisis(crisis))
            .unwrap_or_else(|| crisis.description.to_string());
        self.state.apply_crisis(crisis, &description);
        info!(crisis = crisis.name, tension = %self.state.tension, "opening crisis");
        assert_invariants(&self.state);
    }

    /// Run one turn up to the player's decision or the end of the turn.
    ///
    /// Once the game is over this keeps returning the verdict without
    /// touching the state.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::PlayerActionPending`] while a player action is
    /// awaited.
    pub fn execute_turn(&mut self) -> Result<TurnStatus, EngineError> {
        match self.phase {
            Phase::AwaitingTurn => {}
            Phase::GameOver => return Ok(TurnStatus::GameOver(self.end_game())),
            Phase::AwaitingPlayerAction | Phase::ResolvingAiActors | Phase::ResolvingPlayerAction => {
                return Err(EngineError::PlayerActionPending);
            }
        }

        self.state.advance_turn();
        info!(turn = self.state.turn, tension = %self.state.tension, "turn started");

        if self.state.turn > 2 {
            for line in narrative::reflections(&self.state.last_turn, &mut self.rng.flavor) {
                self.state.events.push(line);
            }
        }
        if roll(&mut self.rng.flavor, self.config.flavor_event_chance) {
            let event = narrative::flavor_event(&mut self.rng.flavor);
            self.state.events.push(event);
        }

        self.phase = Phase::ResolvingAiActors;
        for actor in Actor::COALITION {
            if roll(&mut self.rng.mechanics, self.config.coalition_act_chance) {
                self.act(actor, self.config.coalition_odds);
            }
        }

        if self.config.interactive {
            self.offered = affordable(
                self.state.ledger.pool(Actor::PLAYER),
                catalog(Actor::PLAYER),
            );
            if !self.offered.is_empty() {
                self.phase = Phase::AwaitingPlayerAction;
                debug!(offered = self.offered.len(), "awaiting player action");
                return Ok(TurnStatus::AwaitingPlayer);
            }
            self.state
                .events
                .push(format!("{} has no affordable actions this turn", Actor::PLAYER));
        } else if roll(&mut self.rng.mechanics, self.config.auto_player_act_chance) {
            self.act(Actor::PLAYER, self.config.player_odds);
        }

        Ok(match self.finish_turn() {
            Some(verdict) => TurnStatus::GameOver(verdict),
            None => TurnStatus::Continue,
        })
    }

    /// Actions the player may choose from. Empty unless a player action is
    /// awaited.
    #[must_use]
    pub fn human_actions(&self) -> &[Action] {
        &self.offered
    }

    /// Resolve the player's choice and finish the turn.
    ///
    /// # Errors
    ///
    /// Rejects, without changing any state, a call outside
    /// [`Phase::AwaitingPlayerAction`], an action that was not offered, or
    /// one the player can no longer afford.
    pub fn execute_human_action(
        &mut self,
        action: &Action,
    ) -> Result<PlayerActionStatus, EngineError> {
        if self.phase != Phase::AwaitingPlayerAction {
            return Err(EngineError::NotAwaitingPlayer { phase: self.phase });
        }
        if !self.offered.contains(action) {
            return Err(EngineError::InvalidAction {
                name: action.name.to_string(),
            });
        }
        if !self.state.ledger.pool(Actor::PLAYER).covers(&action.cost) {
            return Err(EngineError::Unaffordable {
                actor: Actor::PLAYER,
                name: action.name.to_string(),
            });
        }

        self.phase = Phase::ResolvingPlayerAction;
        self.offered.clear();

        let reasoning = narrative::player_reasoning(action.kind, &self.state.this_turn);
        self.state.events.push(format!(
            "{} (player) strategic thinking: {reasoning}",
            Actor::PLAYER
        ));
        let report = self.resolve(Actor::PLAYER, action.clone(), self.config.player_odds);
        for reaction in narrative::reactions(action.kind, report.success, &mut self.rng.flavor) {
            self.state.reactions.push(reaction);
        }
        self.last_report = Some(report);

        Ok(match self.finish_turn() {
            Some(verdict) => PlayerActionStatus::GameOver(verdict),
            None => PlayerActionStatus::Completed,
        })
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The verdict, once the game is over.
    #[must_use]
    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether a verdict has been reached.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Rank the actors as if the turn ceiling were reached now.
    #[must_use]
    pub fn final_adjudication(&self) -> FinalAdjudication {
        FinalAdjudication::of(&self.state)
    }

    /// End the game now with the final adjudication, unless a verdict
    /// already exists.
    pub fn end_game(&mut self) -> Verdict {
        if let Some(verdict) = &self.verdict {
            return verdict.clone();
        }
        let verdict = Verdict::Final(self.final_adjudication());
        self.conclude(&verdict);
        verdict
    }

    /// Advisor recommendations for the current decision.
    pub fn advisor_brief(&mut self) -> AdvisorBrief {
        let offered = if self.offered.is_empty() {
            affordable(
                self.state.ledger.pool(Actor::PLAYER),
                catalog(Actor::PLAYER),
            )
        } else {
            self.offered.clone()
        };
        let request = advisor::brief_request(&self.state, &offered);
        self.narrator
            .enrich_json(&request)
            .unwrap_or_else(|| AdvisorBrief::fallback(self.state.tension, &offered))
    }

    /// Ask the advisor about `suggested_action`. Every exchange is kept.
    pub fn discuss(&mut self, question: &str, suggested_action: &str) -> AdvisorReply {
        let reply = if self.narrator.is_online() {
            let request = advisor::discussion_request(&self.state, question, suggested_action);
            self.narrator
                .enrich_json(&request)
                .unwrap_or_else(|| AdvisorReply::fallback(question))
        } else {
            AdvisorReply::offline()
        };
        self.discussion.push(DiscussionExchange {
            turn: self.state.turn,
            question: question.to_string(),
            suggested_action: suggested_action.to_string(),
            reply: reply.clone(),
        });
        reply
    }

    /// Questions and answers exchanged with the advisor this game.
    #[must_use]
    pub fn discussion_history(&self) -> &[DiscussionExchange] {
        &self.discussion
    }

    /// Report of the last player action resolved interactively.
    #[must_use]
    pub fn last_action_report(&self) -> Option<&ActionReport> {
        self.last_report.as_ref()
    }

    fn has_started(&self) -> bool {
        self.state.turn != FIRST_TURN
            || self.state.opening_crisis.is_some()
            || self.phase != Phase::AwaitingTurn
            || self.verdict.is_some()
    }

    fn reset(&mut self) {
        self.state = GameState::new(self.config.log_caps);
        self.phase = Phase::AwaitingTurn;
        self.offered.clear();
        self.verdict = None;
        self.last_report = None;
        self.discussion.clear();
    }

    fn act(&mut self, actor: Actor, odds: SuccessOdds) {
        let Some(selection) = select_action(actor, &self.state, &mut self.rng.mechanics) else {
            debug!(%actor, "no affordable action");
            return;
        };
        debug!(%actor, action = %selection.action.name, reasoning = %selection.reasoning, "action selected");
        self.state
            .events
            .push(format!("{actor} strategic thinking: {}", selection.reasoning));
        self.resolve(actor, selection.action, odds);
    }

    fn resolve(&mut self, actor: Actor, action: Action, odds: SuccessOdds) -> ActionReport {
        let tension = self.state.tension;
        let ctx = ResolutionContext {
            actor,
            action: &action,
            tension,
            odds,
            windfall_chance: self.config.windfall_chance,
        };
        let resolution = self
            .resolver
            .resolve(&ctx, &mut self.state.ledger, &mut self.rng.mechanics);
        let success = resolution.success;

        let change =
            self.state
                .tension
                .apply_action(action.kind, success, actor, &mut self.rng.mechanics);
        if let Some(justification) = change.justification {
            debug!(old = %change.old, new = %change.new, "tension changed");
            self.state.tension_changes.push(justification);
        }

        let report = self.report(actor, &action, success, tension);
        self.state.events.push(report.dramatic_description.clone());
        debug!(
            %actor,
            action = %action.name,
            success,
            windfalls = resolution.windfalls.len(),
            "action resolved"
        );
        self.state.this_turn.push(actor, action, success);

        assert_invariants(&self.state);
        report
    }

    fn report(
        &mut self,
        actor: Actor,
        action: &Action,
        success: bool,
        tension: Tension,
    ) -> ActionReport {
        let request = EnrichmentRequest::action_report(actor, action, success, tension);
        match self.narrator.enrich_json::<ReportText>(&request) {
            Some(text) => ActionReport {
                actor,
                action: action.name.to_string(),
                success,
                dramatic_description: text.dramatic_description,
                tactical_details: text.tactical_details,
            },
            None => ActionReport::fallback(actor, action, success),
        }
    }

    /// Trim logs, adjudicate, then either end the game or brief the next turn.
    fn finish_turn(&mut self) -> Option<Verdict> {
        self.state.events.trim();
        self.state.reactions.trim();
        self.state.tension_changes.trim();

        if let Some(verdict) = adjudicate(&self.state, &self.config.victory_rules()) {
            self.conclude(&verdict);
            return Some(verdict);
        }

        if let Some(line) = narrative::briefing(&self.state, &mut self.rng.flavor) {
            self.state.events.push(format!("SITUATION BRIEFING: {line}"));
        }
        self.phase = Phase::AwaitingTurn;
        None
    }

    fn conclude(&mut self, verdict: &Verdict) {
        info!(
            turn = self.state.turn,
            winner = %verdict.winner(),
            kind = verdict.kind(),
            "game over"
        );
        self.state.events.push(format!("GAME OVER: {verdict}"));
        self.offered.clear();
        self.verdict = Some(verdict.clone());
        self.phase = Phase::GameOver;
    }
}

impl fmt::Debug for WargameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WargameEngine")
            .field("turn", &self.state.turn)
            .field("phase", &self.phase)
            .field("tension", &self.state.tension)
            .field("offered", &self.offered.len())
            .field("verdict", &self.verdict)
            .field("narrator", &self.narrator)
            .finish_non_exhaustive()
    }
}

fn narrator_for(config: &GameConfig) -> Narrator {
    match config.oracle_command.as_deref().map(CommandOracle::from_command_line) {
        Some(Ok(oracle)) => {
            let oracle = oracle.with_timeout(Duration::from_millis(config.oracle_timeout_ms));
            Narrator::new(Box::new(oracle), config.oracle_retries)
        }
        Some(Err(err)) => {
            warn!(%err, "oracle command rejected, running offline");
            Narrator::offline()
        }
        None => Narrator::offline(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Ledger, ResourcePool};
    use rand::RngCore;

    /// Resolves every action as a success without touching the ledger.
    struct AlwaysSucceeds;

    impl ActionResolver for AlwaysSucceeds {
        fn resolve(
            &mut self,
            _ctx: &ResolutionContext<'_>,
            _ledger: &mut Ledger,
            _rng: &mut dyn RngCore,
        ) -> Resolution {
            Resolution {
                success: true,
                windfalls: Vec::new(),
            }
        }
    }

    fn interactive(seed: u64) -> WargameEngine {
        let mut engine = WargameEngine::new(GameConfig::interactive(), seed);
        engine.start_game_with(&CRISES[0]);
        engine
    }

    fn await_player(engine: &mut WargameEngine) {
        loop {
            match engine.execute_turn().unwrap() {
                TurnStatus::AwaitingPlayer => return,
                TurnStatus::Continue => {}
                TurnStatus::GameOver(verdict) => panic!("game ended early: {verdict}"),
            }
        }
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::GameOver.to_string(), "game over");
        assert_eq!(Phase::AwaitingPlayerAction.to_string(), "awaiting player action");
    }

    #[test]
    fn test_start_game_applies_crisis() {
        let engine = interactive(1);
        assert_eq!(engine.state().turn, 1);
        assert_eq!(engine.state().tension, Tension::new(5));
        assert_eq!(
            engine.state().opening_crisis.as_deref(),
            Some("Arctic Environmental Disaster")
        );
        assert_eq!(engine.phase(), Phase::AwaitingTurn);
    }

    #[test]
    fn test_first_turn_is_two() {
        let mut engine = interactive(2);
        await_player(&mut engine);
        assert!(engine.state().turn >= 2);
        assert_eq!(engine.phase(), Phase::AwaitingPlayerAction);
        assert!(!engine.human_actions().is_empty());
    }

    #[test]
    fn test_turn_refused_while_player_pending() {
        let mut engine = interactive(3);
        await_player(&mut engine);
        let before = engine.snapshot();
        assert_eq!(engine.execute_turn(), Err(EngineError::PlayerActionPending));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_unoffered_action_rejected_without_change() {
        let mut engine = interactive(4);
        await_player(&mut engine);
        let before = engine.snapshot();
        let foreign = catalog(Actor::Russia)[0].clone();
        assert!(matches!(
            engine.execute_human_action(&foreign),
            Err(EngineError::InvalidAction { .. })
        ));
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_player_action_outside_suspension_rejected() {
        let mut engine = interactive(5);
        let action = catalog(Actor::UnitedStates)[0].clone();
        assert_eq!(
            engine.execute_human_action(&action),
            Err(EngineError::NotAwaitingPlayer {
                phase: Phase::AwaitingTurn
            })
        );
    }

    #[test]
    fn test_player_action_completes_turn() {
        let mut engine = interactive(6);
        await_player(&mut engine);
        let turn = engine.state().turn;
        let action = engine.human_actions()[0].clone();
        let status = engine.execute_human_action(&action).unwrap();
        assert_eq!(status, PlayerActionStatus::Completed);
        assert_eq!(engine.phase(), Phase::AwaitingTurn);
        assert!(engine.human_actions().is_empty());
        assert_eq!(engine.state().turn, turn);
        assert!(engine.state().this_turn.by(Actor::UnitedStates).count() == 1);
        assert!(!engine.state().reactions.is_empty());
        let report = engine.last_action_report().unwrap();
        assert_eq!(report.action, action.name);
    }

    #[test]
    fn test_autopilot_never_suspends() {
        let mut engine = WargameEngine::new(GameConfig::default(), 7);
        engine.start_game();
        for _ in 0..40 {
            match engine.execute_turn().unwrap() {
                TurnStatus::Continue => {}
                TurnStatus::AwaitingPlayer => panic!("autopilot suspended"),
                TurnStatus::GameOver(_) => break,
            }
        }
        assert!(engine.is_game_over());
        assert!(engine.state().turn <= 25);
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut engine = WargameEngine::new(GameConfig::default(), 9);
        let verdict = engine.end_game();
        assert!(matches!(verdict, Verdict::Final(_)));
        let before = engine.state().clone();
        assert_eq!(engine.execute_turn(), Ok(TurnStatus::GameOver(verdict.clone())));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.end_game(), verdict);
    }

    #[test]
    fn test_stub_resolver_keeps_ledger() {
        let mut engine = WargameEngine::new(GameConfig::default(), 10)
            .with_resolver(Box::new(AlwaysSucceeds));
        engine.execute_turn().unwrap();
        assert_eq!(engine.state().ledger, Ledger::initial());
    }

    #[test]
    fn test_exhausted_player_skips_decision() {
        let mut state = GameState::default();
        state.ledger.united_states = ResourcePool::new(0, 0, 0, 0);
        let mut engine = WargameEngine::from_state(GameConfig::interactive(), state, 11);
        assert_eq!(engine.execute_turn(), Ok(TurnStatus::Continue));
        assert!(engine.human_actions().is_empty());
    }

    #[test]
    fn test_offline_discussion_is_recorded() {
        let mut engine = interactive(12);
        let reply = engine.discuss("Is this too risky?", "Arctic Truth Campaign");
        assert_eq!(reply, AdvisorReply::offline());
        assert_eq!(engine.discussion_history().len(), 1);
        assert_eq!(engine.discussion_history()[0].question, "Is this too risky?");
    }

    #[test]
    fn test_restart_after_play_resets_game() {
        let mut engine = WargameEngine::new(GameConfig::default(), 14);
        engine.start_game_with(&CRISES[0]);
        engine.execute_turn().unwrap();
        engine.execute_turn().unwrap();
        engine.discuss("Hold or push?", "Arctic Truth Campaign");

        engine.start_game_with(&CRISES[0]);
        let mut fresh = GameState::default();
        fresh.apply_crisis(&CRISES[0], CRISES[0].description);
        assert_eq!(engine.state(), &fresh);
        assert_eq!(engine.phase(), Phase::AwaitingTurn);
        assert!(engine.verdict().is_none());
        assert!(engine.discussion_history().is_empty());
        assert_eq!(engine.execute_turn().map(|_| engine.state().turn), Ok(2));
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut engine = WargameEngine::new(GameConfig::default(), 15);
        engine.start_game();
        engine.end_game();
        engine.start_game();
        assert!(!engine.is_game_over());
        assert_eq!(engine.state().turn, FIRST_TURN);
        assert!(engine.execute_turn().is_ok());
    }

    #[test]
    fn test_start_keeps_custom_starting_state() {
        let mut state = GameState::default();
        state.ledger.china = ResourcePool::new(9, 9, 9, 9);
        let mut engine = WargameEngine::from_state(GameConfig::default(), state, 16);
        engine.start_game_with(&CRISES[0]);
        assert_eq!(engine.state().ledger.china.military, 9);
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_oracle_falls_back_to_base_description() {
        let config = GameConfig {
            oracle_command: Some(["sh", "-c", "sleep 20"].map(String::from).to_vec()),
            oracle_timeout_ms: 200,
            ..GameConfig::default()
        };
        let mut engine = WargameEngine::new(config, 17);
        let started = std::time::Instant::now();
        engine.start_game_with(&CRISES[0]);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(
            engine
                .state()
                .events
                .iter()
                .any(|line| line == CRISES[0].description)
        );
    }

    #[test]
    fn test_invalid_snapshot_is_refused() {
        let mut snapshot = interactive(18).snapshot();
        snapshot.state.ledger.russia.military = 200;
        assert!(matches!(
            WargameEngine::from_snapshot(snapshot),
            Err(SnapshotError::Invalid(_))
        ));
    }

    #[test]
    fn test_advisor_brief_offline() {
        let mut engine = interactive(13);
        await_player(&mut engine);
        let first = engine.human_actions()[0].name.to_string();
        let brief = engine.advisor_brief();
        assert_eq!(brief.top_recommendations[0].action_name, first);
    }
}
