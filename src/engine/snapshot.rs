//! Engine snapshots.
//!
//! A snapshot holds everything needed to continue a game bit-for-bit:
//! state, both random streams mid-sequence, the phase and the offered
//! player actions. The resolver and oracle are not captured; a restored
//! engine uses the standard resolver and the oracle named by its config.
//!
//! Decoding validates: a snapshot describing an impossible game (pools or
//! tension out of range, a pending decision with nothing offered) is
//! rejected with [`SnapshotError::Invalid`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::engine::advisor::DiscussionExchange;
use crate::engine::narrative::ActionReport;
use crate::engine::rng::RngStreams;
use crate::engine::Phase;
use crate::error::SnapshotError;
use crate::game::{Action, Actor, GameState, Verdict, catalog, check_invariants};

/// Serializable engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Game configuration.
    pub config: GameConfig,
    /// Game state.
    pub state: GameState,
    /// Random streams at their current positions.
    pub rng: RngStreams,
    /// Orchestrator phase.
    pub phase: Phase,
    /// Actions offered to the player, if awaiting one.
    pub offered: Vec<Action>,
    /// Verdict, once the game is over.
    pub verdict: Option<Verdict>,
    /// Report of the last player action.
    pub last_report: Option<ActionReport>,
    /// Advisor discussion so far.
    pub discussion: Vec<DiscussionExchange>,
}

impl EngineSnapshot {
    /// Encode as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode and validate JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not decode or the decoded
    /// snapshot fails [`Self::validate`].
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check that the snapshot describes a game the engine can continue.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.config
            .validate()
            .map_err(|e| SnapshotError::Invalid(e.to_string()))?;

        let violations = check_invariants(&self.state);
        if !violations.is_empty() {
            let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
            return Err(SnapshotError::Invalid(messages.join("; ")));
        }

        match self.phase {
            Phase::ResolvingAiActors | Phase::ResolvingPlayerAction => {
                return Err(invalid(format!("taken while {}", self.phase)));
            }
            Phase::AwaitingPlayerAction if self.offered.is_empty() => {
                return Err(invalid("awaiting a player action with nothing offered"));
            }
            _ => {}
        }
        if (self.phase == Phase::GameOver) != self.verdict.is_some() {
            return Err(invalid(format!(
                "phase {} does not match verdict presence",
                self.phase
            )));
        }

        let player_catalog = catalog(Actor::PLAYER);
        if let Some(action) = self.offered.iter().find(|a| !player_catalog.contains(a)) {
            return Err(invalid(format!(
                "offered action `{}` is not a player action",
                action.name
            )));
        }
        Ok(())
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read and validate a file.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, decoding or validation fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

fn invalid(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Invalid(reason.into())
}
