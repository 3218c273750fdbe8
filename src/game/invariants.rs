//! Game invariants - sanity checks that detect bugs.
//!
//! Every mutation path clamps, so these should never trigger. They guard
//! against direct field writes and hand-edited snapshots.

use std::fmt;

use crate::game::{Actor, BoundedLog, GameState, MAX_AMOUNT, MAX_TENSION, MIN_TENSION};

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for actor in Actor::ALL {
        for (kind, amount) in state.ledger.pool(actor).iter() {
            if amount > MAX_AMOUNT {
                violations.push(InvariantViolation {
                    message: format!(
                        "{actor} {} is {amount} > max {MAX_AMOUNT}",
                        kind.name()
                    ),
                });
            }
        }
    }

    let tension = state.tension.level();
    if !(MIN_TENSION..=MAX_TENSION).contains(&tension) {
        violations.push(InvariantViolation {
            message: format!("tension {tension} outside [{MIN_TENSION}, {MAX_TENSION}]"),
        });
    }

    if state.turn < 1 {
        violations.push(InvariantViolation {
            message: "turn counter is zero".to_string(),
        });
    }

    if state.this_turn.turn != state.turn {
        violations.push(InvariantViolation {
            message: format!(
                "turn record belongs to turn {} during turn {}",
                state.this_turn.turn, state.turn
            ),
        });
    }

    let logs: [(&str, &BoundedLog); 3] = [
        ("event", &state.events),
        ("reaction", &state.reactions),
        ("tension", &state.tension_changes),
    ];
    for (name, log) in logs {
        if log.len() > log.capacity() {
            violations.push(InvariantViolation {
                message: format!(
                    "{name} log holds {} entries > cap {}",
                    log.len(),
                    log.capacity()
                ),
            });
        }
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
