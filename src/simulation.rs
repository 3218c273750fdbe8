//! Headless games.
//!
//! Provides a pure function interface: `(seed, config) -> GameResult`.
//! The player is always on autopilot, so a result depends on nothing but
//! its inputs.

use serde::Serialize;
use tracing::debug;

use crate::config::GameConfig;
use crate::engine::{TurnStatus, WargameEngine};
use crate::game::{Actor, Ledger, Verdict};

/// Outcome of one headless game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// Headline of the opening crisis.
    pub opening_crisis: Option<String>,
    /// How the game ended.
    pub verdict: Verdict,
    /// Turn on which the verdict was reached.
    pub turns_played: u32,
    /// Tension level at the end.
    pub final_tension: u8,
    /// Resources of every actor at the end.
    pub final_resources: Ledger,
}

impl GameResult {
    /// The winning actor.
    #[must_use]
    pub fn winner(&self) -> Actor {
        self.verdict.winner()
    }
}

/// Play one game to its verdict with the player on autopilot.
///
/// `config.interactive` is ignored.
#[must_use]
pub fn run_game(seed: u64, config: &GameConfig) -> GameResult {
    let config = GameConfig {
        interactive: false,
        ..config.clone()
    };
    let mut engine = WargameEngine::new(config, seed);
    engine.start_game();
    play_out(&mut engine, seed)
}

/// Drive an autopilot engine until it reaches a verdict.
///
/// A config whose victory gate can never open still ends at the turn
/// ceiling. An engine that suspends for the player is ended with the final
/// adjudication.
pub fn play_out(engine: &mut WargameEngine, seed: u64) -> GameResult {
    let ceiling = engine.config().turn_ceiling;
    let verdict = loop {
        match engine.execute_turn() {
            Ok(TurnStatus::Continue) if engine.state().turn < ceiling => {}
            Ok(TurnStatus::GameOver(verdict)) => break verdict,
            Ok(TurnStatus::Continue | TurnStatus::AwaitingPlayer) | Err(_) => {
                break engine.end_game();
            }
        }
    };

    let state = engine.state();
    debug!(seed, turn = state.turn, winner = %verdict.winner(), "headless game finished");
    GameResult {
        seed,
        opening_crisis: state.opening_crisis.clone(),
        verdict,
        turns_played: state.turn,
        final_tension: state.tension.level(),
        final_resources: state.ledger,
    }
}
