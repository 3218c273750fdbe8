//! Reasoning-driven action selection for computer-controlled actors.
//!
//! A reasoning line is drawn from candidates built out of the tension level,
//! the moves already made this turn and the resource balance. Keyword cues
//! in the chosen line then narrow the affordable actions to one kind.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::{Action, ActionKind, Actor, GameState, affordable, catalog};

/// An action chosen together with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Chosen action.
    pub action: Action,
    /// Strategic reasoning shown in the event log.
    pub reasoning: String,
}

/// Keyword cues checked in order; the first cue with an affordable match wins.
const CUES: [(&[&str], ActionKind); 3] = [
    (&["military", "force"], ActionKind::Military),
    (&["economic", "partnership"], ActionKind::Economic),
    (&["diplomatic", "alliance"], ActionKind::Diplomatic),
];

/// Choose an action for `actor`, or `None` when nothing is affordable.
///
/// Coalition reasoning is prefixed with how the actor coordinates with its
/// partner's move this turn.
pub fn select_action<R: Rng + ?Sized>(
    actor: Actor,
    state: &GameState,
    rng: &mut R,
) -> Option<Selection> {
    let available = affordable(state.ledger.pool(actor), catalog(actor));
    if available.is_empty() {
        return None;
    }

    let candidates = reasoning_candidates(actor, state);
    let reasoning = candidates
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| format!("Pursuing {actor}'s core Arctic strategy objectives"));

    let action = pick_matching(&reasoning, &available, rng)?;
    let reasoning = match actor.partner() {
        Some(partner) => format!("{} - {reasoning}", coordination(partner, state)),
        None => reasoning,
    };

    Some(Selection { action, reasoning })
}

fn pick_matching<R: Rng + ?Sized>(
    reasoning: &str,
    available: &[Action],
    rng: &mut R,
) -> Option<Action> {
    let lowered = reasoning.to_lowercase();
    for (keywords, kind) in CUES {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            let matching: Vec<&Action> = available.iter().filter(|a| a.kind == kind).collect();
            if let Some(action) = matching.choose(rng) {
                return Some((*action).clone());
            }
        }
    }
    available.choose(rng).cloned()
}

fn coordination(partner: Actor, state: &GameState) -> String {
    match state.this_turn.by(partner).next() {
        Some(record) => match record.action.kind {
            ActionKind::Military => format!("Coordinating with {partner}'s military action"),
            ActionKind::Economic => format!("Supporting {partner}'s economic strategy"),
            _ => format!("Alliance coordination with {partner}"),
        },
        None => "Leading alliance initiative".to_string(),
    }
}

/// Russia reads any move that spends military resources or speaks of the
/// military as a military move, not only moves of the military kind.
/// Oracle-written report text is never consulted.
fn has_military_trace(action: &Action) -> bool {
    action.kind == ActionKind::Military
        || action.cost.military > 0
        || action.name.to_lowercase().contains("military")
        || action.description.to_lowercase().contains("military")
}

fn reasoning_candidates(actor: Actor, state: &GameState) -> Vec<String> {
    let tension = state.tension.level();
    let military_move = state
        .this_turn
        .iter()
        .any(|record| record.action.kind == ActionKind::Military);
    let military_trace = state
        .this_turn
        .iter()
        .any(|record| has_military_trace(&record.action));

    let mut candidates: Vec<String> = Vec::new();
    let mut extend = |lines: &[&str]| candidates.extend(lines.iter().map(|s| (*s).to_string()));

    match actor {
        Actor::Russia => {
            if tension >= 7 {
                extend(&[
                    "Escalating tensions require strong territorial assertion",
                    "Must demonstrate Arctic dominance amid growing competition",
                ]);
            } else if military_trace {
                extend(&["Responding to military moves by rivals with force projection"]);
            } else {
                extend(&[
                    "Consolidating historical Arctic claims through strategic positioning",
                    "Leveraging natural resource advantages while competitors focus elsewhere",
                ]);
            }
        }
        Actor::China => {
            let russia_military = state
                .this_turn
                .by(Actor::Russia)
                .any(|record| record.action.kind == ActionKind::Military);
            if russia_military {
                extend(&["Pursuing economic strategy while Russia focuses on military posturing"]);
            } else if tension <= 3 {
                extend(&["Low tensions create opportunity for partnership building"]);
            } else {
                extend(&[
                    "Building economic presence through strategic partnerships",
                    "Advancing Belt and Road objectives in Arctic region",
                ]);
            }
        }
        Actor::UnitedStates => {
            if tension >= 6 {
                extend(&[
                    "High tensions require multilateral response to prevent conflict",
                    "Strengthening alliances to counter unilateral actions",
                ]);
            } else if military_move {
                extend(&["Military escalation by others demands strong allied response"]);
            } else {
                extend(&[
                    "Maintaining balance of power through diplomatic engagement",
                    "Preventing any single nation from dominating Arctic governance",
                ]);
            }
        }
    }

    for record in state.this_turn.others(actor) {
        let other = record.actor;
        match record.action.kind {
            ActionKind::Military => {
                candidates.push(format!("Responding to {other}'s military posturing"));
            }
            ActionKind::Economic => {
                candidates.push(format!("Countering {other}'s economic expansion"));
            }
            ActionKind::Diplomatic => {
                candidates.push(format!("Matching {other}'s diplomatic outreach"));
            }
            ActionKind::Information
            | ActionKind::Cyber
            | ActionKind::Intelligence
            | ActionKind::Hybrid => {}
        }
    }

    let russia = state.total(Actor::Russia);
    let rest = state.total(Actor::China) + state.total(Actor::UnitedStates);
    if actor != Actor::Russia && russia > rest {
        candidates.push("Countering Russia's resource advantage through coordinated action".into());
    }

    candidates
}
