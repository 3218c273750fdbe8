//! Error types for the wargame engine.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::engine::Phase;
use crate::game::Actor;

/// Errors returned by [`crate::WargameEngine`] operations.
///
/// Every variant is returned before any state is touched, so a rejected
/// call leaves the engine exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The chosen action is not among the actions last offered to the player.
    #[error("action `{name}` is not among the offered actions")]
    InvalidAction {
        /// Name of the rejected action.
        name: String,
    },

    /// A player action was submitted outside the player's turn.
    #[error("no player action is expected while the engine is {phase}")]
    NotAwaitingPlayer {
        /// Phase the engine was in.
        phase: Phase,
    },

    /// The turn is suspended until the player acts.
    #[error("the player must act before the next turn")]
    PlayerActionPending,

    /// An actor attempted an action its resources do not cover.
    #[error("{actor} cannot afford `{name}`")]
    Unaffordable {
        /// Acting actor.
        actor: Actor,
        /// Name of the action.
        name: String,
    },
}

/// Errors loading or validating a [`crate::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its permitted range.
    #[error("config field `{field}` out of range: {value}")]
    OutOfRange {
        /// Offending field.
        field: &'static str,
        /// Offending value, rendered.
        value: String,
    },
}

/// Failures of a narrative oracle. Never surfaced past the narrator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The oracle cannot be used at all; it stays disabled for the game.
    #[error("oracle unavailable: {0}")]
    Unavailable(String),

    /// A single request failed and may be retried.
    #[error("oracle request failed: {0}")]
    Failed(String),

    /// The reply could not be interpreted.
    #[error("malformed oracle reply: {0}")]
    Malformed(String),

    /// No reply arrived before the deadline. Not retried.
    #[error("oracle timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors saving or loading an engine snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] io::Error),

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot encoding failed: {0}")]
    Serde(#[from] serde_json::Error),

    /// The snapshot decoded but describes an impossible game.
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}
