// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Arctic Wargame: a seeded, replayable three-actor geopolitical wargame.
//!
//! Russia and China act as a coordinated coalition against the United
//! States, which is either played interactively or put on autopilot. This
//! crate provides:
//! - A clamped resource ledger and per-actor action catalogs
//! - Probabilistic action resolution and a bounded tension tracker
//! - A turn state machine that suspends for player input
//! - Victory, elimination and turn-ceiling adjudication
//! - Offline narrative with an optional external oracle
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Simulation / CLI / batch runner   │
//! ├─────────────────────────────────────┤
//! │   Engine (turns, narrative, oracle) │
//! ├─────────────────────────────────────┤
//! │   Game rules (ledger, tension, win) │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use arctic_wargame::{GameConfig, TurnStatus, WargameEngine};
//!
//! let mut engine = WargameEngine::new(GameConfig::default(), 7);
//! engine.start_game();
//! loop {
//!     if let TurnStatus::GameOver(verdict) = engine.execute_turn().unwrap() {
//!         println!("{verdict}");
//!         break;
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod simulation;

pub use config::GameConfig;
pub use engine::{EngineSnapshot, Phase, PlayerActionStatus, TurnStatus, WargameEngine};
pub use error::{ConfigError, EngineError, OracleError, SnapshotError};

// Re-export key game types at crate root for convenience
pub use game::{Action, ActionKind, Actor, GameState, ResourceKind, Tension, Verdict};
pub use simulation::{GameResult, run_game};
