#![no_main]

//! Full game turn fuzzer.
//!
//! This fuzz target drives the interactive engine with arbitrary player
//! choices, including invalid ones, and checks the state invariants after
//! every call:
//! 1. Start the game with a fuzzed crisis
//! 2. Execute turns
//! 3. Answer suspensions with fuzzed menu indices or foreign actions
//! 4. Occasionally end the game early

use arbitrary::Arbitrary;
use arctic_wargame::game::{Actor, CRISES, catalog, check_invariants};
use arctic_wargame::{GameConfig, TurnStatus, WargameEngine};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated player decision.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Decision {
    /// Pick the offered action at this index (modulo the menu size).
    Pick(u8),
    /// Submit an action that was never offered.
    Foreign(u8),
    /// End the game with the final adjudication.
    Resign,
}

/// Structured input for full game fuzzing.
#[derive(Arbitrary, Debug)]
struct GameInput {
    /// Engine seed.
    seed: u64,
    /// Opening crisis index.
    crisis: u8,
    /// Interactive or autopilot.
    interactive: bool,
    /// Player decisions, consumed in order.
    decisions: Vec<Decision>,
}

fuzz_target!(|input: GameInput| {
    let config = GameConfig {
        interactive: input.interactive,
        ..GameConfig::default()
    };
    let mut engine = WargameEngine::new(config, input.seed);
    engine.start_game_with(&CRISES[usize::from(input.crisis) % CRISES.len()]);
    let mut decisions = input.decisions.into_iter();

    for _ in 0..64 {
        let status = match engine.execute_turn() {
            Ok(status) => status,
            Err(_) => break,
        };
        assert!(check_invariants(engine.state()).is_empty());

        match status {
            TurnStatus::Continue => {}
            TurnStatus::GameOver(_) => break,
            TurnStatus::AwaitingPlayer => {
                let offered = engine.human_actions().to_vec();
                match decisions.next().unwrap_or(Decision::Pick(0)) {
                    Decision::Pick(i) => {
                        let action = &offered[usize::from(i) % offered.len()];
                        assert!(engine.execute_human_action(action).is_ok());
                    }
                    Decision::Foreign(i) => {
                        let foreign = &catalog(Actor::Russia)[usize::from(i) % 4];
                        let before = engine.snapshot();
                        assert!(engine.execute_human_action(foreign).is_err());
                        assert_eq!(engine.snapshot(), before);
                        let _ = engine.execute_human_action(&offered[0]);
                    }
                    Decision::Resign => {
                        engine.end_game();
                        break;
                    }
                }
                assert!(check_invariants(engine.state()).is_empty());
            }
        }
    }

    assert!(engine.state().turn <= 25);
});
