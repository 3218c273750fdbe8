//! Offline narrative: reflections, flavor events, coalition reactions,
//! situation briefings and action reports.
//!
//! Every table here is total over [`ActionKind`], so adding a kind forces
//! new text.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::game::{Action, ActionKind, Actor, GameState, TurnRecord};

/// Successful actions reflected upon at the start of a turn.
pub(crate) const REFLECTED_SUCCESSES: usize = 2;

/// Failed actions reflected upon at the start of a turn.
pub(crate) const REFLECTED_FAILURES: usize = 1;

/// Most coalition reactions sampled for one player action.
pub const MAX_REACTIONS: usize = 2;

/// Resource total below which an actor is reported as depleted.
pub(crate) const DEPLETION_WARNING_TOTAL: u32 = 15;

/// Ambient events that may open a turn.
pub const FLAVOR_EVENTS: [&str; 8] = [
    "Massive oil deposit discovered in disputed Arctic waters",
    "Climate change accelerates Arctic ice melting",
    "International Arctic Council calls emergency meeting",
    "Commercial shipping vessel reports harassment by military patrol",
    "Environmental activists protest Arctic drilling operations",
    "New shipping route opens through melting ice",
    "Submarine incident reported near North Pole",
    "Arctic research station establishes new base",
];

/// Narrative account of one resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionReport {
    /// Actor who acted.
    pub actor: Actor,
    /// Name of the action.
    pub action: String,
    /// Whether it succeeded.
    pub success: bool,
    /// One-paragraph description written to the event log.
    pub dramatic_description: String,
    /// Technical detail line.
    pub tactical_details: String,
}

impl ActionReport {
    /// Deterministic report used when no oracle is available.
    #[must_use]
    pub fn fallback(actor: Actor, action: &Action, success: bool) -> Self {
        let outcome = if success { "succeeds" } else { "fails" };
        Self {
            actor,
            action: action.name.to_string(),
            success,
            dramatic_description: format!(
                "{actor} {} {outcome}: {}",
                action.name, action.description
            ),
            tactical_details: format!(
                "Operation {}",
                if success {
                    "completed successfully"
                } else {
                    "encountered difficulties"
                }
            ),
        }
    }
}

/// Reflections on the previous turn: up to two successes and one failure.
pub(crate) fn reflections<R: Rng + ?Sized>(last_turn: &TurnRecord, rng: &mut R) -> Vec<String> {
    let successes = last_turn.iter().filter(|r| r.success).take(REFLECTED_SUCCESSES);
    let failures = last_turn.iter().filter(|r| !r.success).take(REFLECTED_FAILURES);

    successes
        .chain(failures)
        .map(|record| {
            let (actor, kind, name) = (record.actor, record.action.kind, &record.action.name);
            let templates = if record.success {
                [
                    format!("{actor} reflects: Our {kind} strategy proved effective"),
                    format!("{actor} analysis: Successful {name} strengthens our position"),
                    format!("{actor} assessment: {name} achieved strategic objectives"),
                ]
            } else {
                [
                    format!("{actor} review: Failed {name} requires strategic adjustment"),
                    format!("{actor} lesson learned: {kind} approach needs refinement"),
                    format!("{actor} adaptation: Reconsidering tactics after {name} setback"),
                ]
            };
            let pick = rng.gen_range(0..templates.len());
            templates[pick].clone()
        })
        .collect()
}

/// A random ambient event.
pub(crate) fn flavor_event<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    FLAVOR_EVENTS[rng.gen_range(0..FLAVOR_EVENTS.len())]
}

/// Reaction lines of one coalition actor to a player action.
#[must_use]
pub(crate) fn reaction_templates(reactor: Actor, kind: ActionKind, success: bool) -> &'static [&'static str] {
    match (reactor, kind, success) {
        (Actor::Russia, ActionKind::Military, true) => &[
            "Russia reacts: 'US military buildup threatens Arctic stability. We reserve right to strengthen defensive positions.'",
            "Russia warns: 'American militarization of Arctic violates regional cooperation principles. Moscow will respond appropriately.'",
            "Russia responds: 'NATO expansion in Arctic forces Russia to reconsider strategic deterrence measures.'",
        ],
        (Actor::Russia, ActionKind::Military, false) => &[
            "Russia notes: 'Failed US military posturing demonstrates declining American capability in Arctic region.'",
        ],
        (Actor::Russia, ActionKind::Diplomatic, true) => &[
            "Russia dismisses: 'US diplomatic initiatives ignore established Arctic territorial realities. Empty gestures will not change facts.'",
            "Russia critiques: 'American multilateral approach seeks to limit legitimate Russian Arctic sovereignty. We reject such interference.'",
        ],
        (Actor::Russia, ActionKind::Diplomatic, false) => &[
            "Russia observes: 'Diplomatic failures show US inability to understand Arctic geopolitical dynamics.'",
        ],
        (Actor::Russia, ActionKind::Economic, _) => &[
            "Russia counters: 'US economic competition cannot match Russia's natural resource advantages in Arctic region.'",
            "Russia responds: 'American economic pressure tactics will backfire. Arctic nations prefer reliable Russian partnerships.'",
        ],
        (Actor::Russia, ActionKind::Information, _) => &[
            "Russia dismisses: 'US propaganda cannot change geographic reality of Russian Arctic presence and capabilities.'",
        ],
        (Actor::Russia, ActionKind::Cyber, true) => &[
            "Russia accuses: 'American cyber aggression against Arctic navigation endangers civilian shipping. This will not go unanswered.'",
            "Russia warns: 'Attacks on our Arctic networks are acts of hostility. Moscow reserves all options.'",
        ],
        (Actor::Russia, ActionKind::Cyber, false) => &[
            "Russia mocks: 'Clumsy US intrusion attempts were detected and contained. Our Arctic networks remain secure.'",
        ],
        (Actor::Russia, ActionKind::Intelligence, true) => &[
            "Russia protests: 'Foreign surveillance of Russian Arctic installations violates our sovereignty.'",
        ],
        (Actor::Russia, ActionKind::Intelligence, false) => &[
            "Russia exposes: 'Captured US reconnaissance assets prove Washington's hostile intentions in the Arctic.'",
        ],
        (Actor::Russia, ActionKind::Hybrid, true) => &[
            "Russia condemns: 'Coordinated American pressure campaign is undeclared warfare against Russian Arctic interests.'",
            "Russia responds: 'Multi-domain provocations leave Moscow no choice but to raise readiness across the Northern Fleet.'",
        ],
        (Actor::Russia, ActionKind::Hybrid, false) => &[
            "Russia notes: 'Disjointed US operations reveal a strategy without direction in the Arctic.'",
        ],
        (Actor::China, ActionKind::Military, true) => &[
            "China expresses 'deep concern': 'US military escalation threatens peaceful Arctic development. China advocates dialogue over confrontation.'",
            "China calls for restraint: 'Militarization of Arctic contradicts international cooperation principles. All parties should exercise prudence.'",
        ],
        (Actor::China, ActionKind::Military, false) => &[
            "China observes: 'US military stumbles demonstrate risks of confrontational approach. China offers stable partnership alternative.'",
        ],
        (Actor::China, ActionKind::Diplomatic, true) => &[
            "China welcomes dialogue but notes: 'True Arctic cooperation must include all stakeholders, not just traditional Western allies.'",
            "China responds: 'Belt and Road Arctic initiatives offer more inclusive development framework than US-led partnerships.'",
        ],
        (Actor::China, ActionKind::Diplomatic, false) => &[
            "China remarks: 'Exclusive Western blocs cannot deliver Arctic consensus. Inclusive cooperation remains the only path.'",
        ],
        (Actor::China, ActionKind::Economic, _) => &[
            "China confident: 'Chinese Arctic investments provide superior infrastructure and long-term economic benefits.'",
            "China positions: 'US economic restrictions cannot halt China's Arctic development partnerships. Win-win cooperation prevails.'",
        ],
        (Actor::China, ActionKind::Information, _) => &[
            "China advocates: 'Facts speak louder than rhetoric. Arctic development requires practical cooperation, not ideological competition.'",
        ],
        (Actor::China, ActionKind::Cyber, true) => &[
            "China condemns: 'Cyber attacks on shared Arctic infrastructure harm every trading nation. China calls for a cyber code of conduct.'",
        ],
        (Actor::China, ActionKind::Cyber, false) => &[
            "China cautions: 'Reckless cyber operations threaten global shipping. Responsible powers show restraint.'",
        ],
        (Actor::China, ActionKind::Intelligence, true) => &[
            "China objects: 'Surveillance of Chinese research stations contradicts the spirit of scientific cooperation.'",
        ],
        (Actor::China, ActionKind::Intelligence, false) => &[
            "China observes: 'Failed espionage shows the costs of suspicion. Transparency serves Arctic stability better.'",
        ],
        (Actor::China, ActionKind::Hybrid, true) => &[
            "China warns: 'Combined pressure tactics destabilize Arctic markets and endanger peaceful development.'",
            "China responds: 'Coercion will only strengthen the partnerships the United States seeks to disrupt.'",
        ],
        (Actor::China, ActionKind::Hybrid, false) => &[
            "China notes: 'Overreach across every domain exposes the limits of confrontation.'",
        ],
        (Actor::UnitedStates, _, _) => &[],
    }
}

/// Sample one or two coalition reactions to a player action.
pub(crate) fn reactions<R: Rng + ?Sized>(kind: ActionKind, success: bool, rng: &mut R) -> Vec<&'static str> {
    let pool: Vec<&'static str> = Actor::COALITION
        .into_iter()
        .flat_map(|reactor| reaction_templates(reactor, kind, success).iter().copied())
        .collect();
    pool.choose_multiple(rng, MAX_REACTIONS).copied().collect()
}

/// Reasoning shown for the player's chosen action.
#[must_use]
pub(crate) fn player_reasoning(kind: ActionKind, this_turn: &TurnRecord) -> &'static str {
    let coalition_moved = |wanted: ActionKind| {
        this_turn
            .iter()
            .any(|r| r.actor.is_coalition() && r.action.kind == wanted)
    };
    let any_coalition = this_turn.iter().any(|r| r.actor.is_coalition());

    if any_coalition {
        match kind {
            ActionKind::Military if coalition_moved(ActionKind::Military) => {
                return "Responding to Russia-China military coordination with defensive measures";
            }
            ActionKind::Economic if coalition_moved(ActionKind::Economic) => {
                return "Countering alliance economic expansion through competitive investment";
            }
            ActionKind::Diplomatic => {
                return "Using diplomatic channels to address Russia-China alliance actions";
            }
            ActionKind::Information => {
                return "Challenging alliance narrative through information operations";
            }
            _ => {}
        }
    }

    match kind {
        ActionKind::Military => "Maintaining military balance against Russia-China alliance",
        ActionKind::Diplomatic => "Pursuing multilateral approach to counter bilateral alliance",
        ActionKind::Economic => "Leveraging economic tools to maintain Arctic influence",
        ActionKind::Information => "Promoting democratic values against authoritarian partnership",
        ActionKind::Cyber => "Degrading alliance command networks before they can coordinate",
        ActionKind::Intelligence => "Exposing Russia-China alliance intentions through covert collection",
        ActionKind::Hybrid => "Applying pressure across every domain the alliance depends on",
    }
}

/// Pick one situation briefing, or `None` when nothing is noteworthy.
///
/// Candidates are grouped by priority: turn milestones, tension, resource
/// depletion, leader superlatives, then periodic insights. The choice is
/// random within the first non-empty group.
pub(crate) fn briefing<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> Option<String> {
    let turn = state.turn;
    let tension = state.tension.level();
    let (leader, leading_total) = state.leader();

    let milestones: Vec<String> = match turn {
        2 => vec!["Initial positioning phase complete. Nations are establishing their Arctic strategies.".into()],
        5 => vec!["Early competition intensifying as nations stake territorial and economic claims.".into()],
        10 => vec!["Mid-game dynamics emerging. Resource investments beginning to show strategic impact.".into()],
        t if t % 7 == 0 => vec![format!(
            "{leader} maintains strategic advantage with total resources of {leading_total}."
        )],
        _ => Vec::new(),
    };

    let tension_lines: &[&str] = if tension >= 8 {
        &[
            "CRISIS ALERT: Arctic tensions reaching dangerous levels. Risk of armed confrontation increasing.",
            "International observers warn of potential for military escalation in disputed waters.",
            "Emergency diplomatic channels activated as nations seek to prevent Arctic conflict.",
        ]
    } else if tension >= 6 {
        &[
            "Rising tensions creating instability in Arctic region. Military posturing increasing.",
            "Arctic Council calls for restraint as territorial disputes intensify.",
            "Commercial shipping companies report concerns over safety in contested waters.",
        ]
    } else if tension <= 2 {
        &[
            "Diplomatic efforts showing positive results. Arctic cooperation improving.",
            "Peaceful competition fostering regional stability and economic development.",
            "International community praises collaborative approach to Arctic governance.",
        ]
    } else {
        &[]
    };

    let depletion: &[&str] = if Actor::ALL
        .iter()
        .any(|&actor| state.total(actor) < DEPLETION_WARNING_TOTAL)
    {
        &["Resource depletion becoming critical concern. Nations must balance expansion with sustainability."]
    } else {
        &[]
    };

    let ledger = &state.ledger;
    let mut superlatives: Vec<&str> = Vec::new();
    if ledger.russia.military >= 8 {
        superlatives.push("Russia's military dominance in Arctic raising international concerns about territorial control.");
    }
    if ledger.china.economic >= 8 {
        superlatives.push("China's economic influence expanding rapidly through Arctic infrastructure investments.");
    }
    if ledger.united_states.political >= 8 {
        superlatives.push("United States successfully maintaining multilateral approach to Arctic governance.");
    }

    let insights: Vec<String> = if turn % 5 == 0 {
        let stability = if tension >= 7 {
            "high instability"
        } else if tension >= 4 {
            "moderate stability"
        } else {
            "relative calm"
        };
        let phase = if turn >= 15 {
            "critical phase"
        } else if turn >= 8 {
            "intensification period"
        } else {
            "establishment phase"
        };
        vec![
            format!("Current regional balance shows {leader} leading with {leading_total} total resources."),
            format!("Tension level at {} indicates {stability}.", state.tension),
            format!("Turn {turn}: Arctic competition entering {phase}."),
        ]
    } else {
        Vec::new()
    };

    let to_owned = |lines: &[&str]| lines.iter().map(|s| (*s).to_string()).collect::<Vec<_>>();
    let groups = [
        milestones,
        to_owned(tension_lines),
        to_owned(depletion),
        to_owned(&superlatives),
        insights,
    ];
    groups
        .into_iter()
        .find(|group| !group.is_empty())
        .and_then(|group| group.choose(rng).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ResourcePool, Tension, catalog};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(17)
    }

    #[test]
    fn test_every_kind_draws_coalition_reactions() {
        let mut rng = rng();
        for kind in ActionKind::ALL {
            for success in [true, false] {
                for reactor in Actor::COALITION {
                    assert!(
                        !reaction_templates(reactor, kind, success).is_empty(),
                        "{reactor} has no {kind} reaction (success: {success})"
                    );
                }
                let sampled = reactions(kind, success, &mut rng);
                assert!((1..=MAX_REACTIONS).contains(&sampled.len()));
            }
        }
    }

    #[test]
    fn test_reflections_limits() {
        let mut record = TurnRecord::new(3);
        let action = catalog(Actor::Russia)[0].clone();
        for _ in 0..3 {
            record.push(Actor::Russia, action.clone(), true);
            record.push(Actor::China, action.clone(), false);
        }
        let lines = reflections(&record, &mut rng());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Russia"));
        assert!(lines[2].starts_with("China"));
    }

    #[test]
    fn test_reflections_of_empty_turn() {
        assert!(reflections(&TurnRecord::default(), &mut rng()).is_empty());
    }

    #[test]
    fn test_fallback_report() {
        let action = &catalog(Actor::Russia)[0];
        let report = ActionReport::fallback(Actor::Russia, action, true);
        assert_eq!(
            report.dramatic_description,
            "Russia deploys Arctic fleet succeeds: Increases naval presence along Arctic shipping lanes"
        );
        assert_eq!(report.tactical_details, "Operation completed successfully");
    }

    #[test]
    fn test_milestone_beats_tension() {
        let mut state = GameState::default();
        state.turn = 5;
        state.tension = Tension::new(9);
        let line = briefing(&state, &mut rng()).unwrap();
        assert!(line.starts_with("Early competition"));
    }

    #[test]
    fn test_tension_beats_depletion() {
        let mut state = GameState::default();
        state.turn = 3;
        state.tension = Tension::new(8);
        state.ledger.china = ResourcePool::new(1, 1, 1, 1);
        let line = briefing(&state, &mut rng()).unwrap();
        assert!(!line.contains("depletion"));
    }

    #[test]
    fn test_depletion_briefing() {
        let mut state = GameState::default();
        state.turn = 3;
        state.tension = Tension::new(4);
        state.ledger.china = ResourcePool::new(1, 1, 1, 1);
        let line = briefing(&state, &mut rng()).unwrap();
        assert!(line.starts_with("Resource depletion"));
    }

    #[test]
    fn test_quiet_turn_has_no_briefing() {
        let mut state = GameState::default();
        state.turn = 3;
        state.tension = Tension::new(4);
        state.ledger.russia = ResourcePool::new(5, 5, 5, 5);
        state.ledger.china = ResourcePool::new(5, 5, 5, 5);
        state.ledger.united_states = ResourcePool::new(5, 5, 5, 5);
        assert!(briefing(&state, &mut rng()).is_none());
    }

    #[test]
    fn test_player_reasoning_reacts_to_coalition() {
        let mut record = TurnRecord::new(4);
        record.push(Actor::Russia, catalog(Actor::Russia)[0].clone(), true);
        assert_eq!(
            player_reasoning(ActionKind::Military, &record),
            "Responding to Russia-China military coordination with defensive measures"
        );
        assert_eq!(
            player_reasoning(ActionKind::Economic, &record),
            "Leveraging economic tools to maintain Arctic influence"
        );
    }
}
