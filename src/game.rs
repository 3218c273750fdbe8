//! Game layer: the rules of the Arctic competition.
//!
//! - Actors and their resource ledger
//! - Action catalogs and the affordability filter
//! - Tension tracking
//! - Opening crises
//! - Bounded narrative logs
//! - Victory adjudication

mod action;
mod actor;
pub mod crisis;
pub mod invariants;
mod log;
mod resources;
mod state;
mod tension;
pub mod victory;

pub use action::{Action, ActionKind, affordable, catalog};
pub use actor::Actor;
pub use crisis::{CRISES, Crisis};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use log::{
    BoundedLog, EVENT_LOG_CAPACITY, LogCaps, REACTION_LOG_CAPACITY, TENSION_LOG_CAPACITY,
};
pub use resources::{Cost, Ledger, MAX_AMOUNT, ResourceKind, ResourcePool};
pub use state::{ActionRecord, FIRST_TURN, GameState, ScoringWeights, TurnRecord};
pub use tension::{
    INFORMATION_BACKFIRE_CHANCE, INITIAL_TENSION, INTELLIGENCE_DETECTION_CHANCE, MAX_TENSION,
    MIN_TENSION, Tension, TensionChange, TensionTier,
};
pub use victory::{FinalAdjudication, Margin, Verdict, VictoryPath, VictoryRules, adjudicate};
