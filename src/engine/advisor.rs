//! The player's strategic advisor.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::engine::oracle::{EnrichmentKind, EnrichmentRequest};
use crate::game::{Action, Actor, GameState, ResourceKind, Tension};

/// Event log entries quoted to the advisor.
const QUOTED_EVENTS: usize = 3;

/// Tension at or above which the fallback brief is urgent.
const URGENT_TENSION: u8 = 7;

/// Recommendation priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Act now.
    High,
    /// Worth considering.
    Medium,
    /// Optional.
    Low,
}

/// Overall urgency of a brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Urgency {
    /// Conflict is imminent.
    Critical,
    /// Immediate action advised.
    High,
    /// Routine pressure.
    Moderate,
    /// Quiet period.
    Low,
}

/// How sure the advisor is of a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Firm.
    High,
    /// Qualified.
    Medium,
    /// Tentative.
    Low,
}

/// One recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Name of the recommended action.
    pub action_name: String,
    /// How strongly it is recommended.
    pub priority: Priority,
    /// Why now.
    pub rationale: String,
}

/// Advisor recommendations for the current player decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorBrief {
    /// Recommended actions, best first.
    pub top_recommendations: Vec<Recommendation>,
    /// Adversary capabilities and likely moves.
    pub threat_assessment: String,
    /// Risks, opportunities and approach.
    pub strategic_analysis: String,
    /// Overall urgency.
    pub urgency_level: Urgency,
}

impl AdvisorBrief {
    /// Deterministic brief from the offered actions and tension alone.
    #[must_use]
    pub fn fallback(tension: Tension, offered: &[Action]) -> Self {
        let name_at = |index: usize, placeholder: &str| {
            offered
                .get(index)
                .map_or_else(|| placeholder.to_string(), |a| a.name.to_string())
        };
        Self {
            top_recommendations: vec![
                Recommendation {
                    action_name: name_at(0, "No actions available"),
                    priority: Priority::High,
                    rationale: "Immediate response needed to current threats".into(),
                },
                Recommendation {
                    action_name: name_at(1, "Limited options"),
                    priority: Priority::Medium,
                    rationale: "Secondary defensive measure".into(),
                },
            ],
            threat_assessment: format!(
                "Tension at {tension}. Adversary actions detected this turn."
            ),
            strategic_analysis: "Recommend immediate action to counter adversary moves and maintain strategic balance.".into(),
            urgency_level: if tension.level() >= URGENT_TENSION {
                Urgency::High
            } else {
                Urgency::Moderate
            },
        }
    }
}

fn yes() -> bool {
    true
}

/// The advisor's answer to a player question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorReply {
    /// The answer itself.
    pub ai_response: String,
    /// Supporting points.
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Whether the player's concern was accepted as valid.
    #[serde(default)]
    pub acknowledges_concerns: bool,
    /// Whether the original recommendation stands.
    #[serde(default = "yes")]
    pub maintains_recommendation: bool,
    /// Alternatives, if the recommendation changed.
    #[serde(default)]
    pub alternative_suggestions: String,
    /// Confidence in the answer.
    pub confidence_level: Confidence,
    /// Updated risk analysis.
    #[serde(default)]
    pub risk_assessment: String,
}

impl AdvisorReply {
    /// Reply when no oracle is attached.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            ai_response: "AI advisor is currently offline. Please proceed with your best judgment."
                .into(),
            key_points: Vec::new(),
            acknowledges_concerns: false,
            maintains_recommendation: true,
            alternative_suggestions: String::new(),
            confidence_level: Confidence::Low,
            risk_assessment: String::new(),
        }
    }

    /// Reply when the oracle failed to answer `question`.
    #[must_use]
    pub fn fallback(question: &str) -> Self {
        Self {
            ai_response: format!(
                "I understand your concern about {question}. Let me reconsider... Based on current threat levels and our strategic position, I still believe this is our best option, but I'm open to discussing alternatives."
            ),
            key_points: vec![
                "Current threat requires immediate response".into(),
                "Our resources support this action".into(),
                "Delaying may give advantage to adversaries".into(),
            ],
            acknowledges_concerns: true,
            maintains_recommendation: true,
            alternative_suggestions: "We could consider a more diplomatic approach first, though this may be less effective given current tensions.".into(),
            confidence_level: Confidence::Medium,
            risk_assessment:
                "All options carry risks in current situation. Recommend proceeding with caution."
                    .into(),
        }
    }
}

/// One question and answer kept in the discussion history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionExchange {
    /// Turn the question was asked.
    pub turn: u32,
    /// The player's question.
    pub question: String,
    /// Action under discussion.
    pub suggested_action: String,
    /// The advisor's reply.
    pub reply: AdvisorReply,
}

fn situation(state: &GameState, out: &mut String) {
    let us = state.ledger.pool(Actor::UnitedStates);
    let _ = writeln!(out, "US RESOURCES STATUS:");
    for kind in ResourceKind::ALL {
        let _ = writeln!(out, "- {}: {}/10", kind.name(), us.get(kind));
    }
    let _ = writeln!(out, "\nENEMY FORCE ESTIMATES:");
    for actor in Actor::COALITION {
        let pool = state.ledger.pool(actor);
        let _ = writeln!(
            out,
            "- {actor}: military {}/10, economic {}/10",
            pool.military, pool.economic
        );
    }
    let _ = writeln!(out, "\nRECENT EVENTS:");
    for event in state.events.latest(QUOTED_EVENTS) {
        let _ = writeln!(out, "- {event}");
    }
}

/// Request for a JSON [`AdvisorBrief`].
#[must_use]
pub(crate) fn brief_request(state: &GameState, offered: &[Action]) -> EnrichmentRequest {
    let mut prompt = format!(
        "PRESIDENTIAL BRIEFING - TURN {}\nCURRENT THREAT LEVEL: {}\n\nAVAILABLE ACTIONS:\n",
        state.turn, state.tension
    );
    for action in offered {
        let _ = writeln!(prompt, "- {} ({}): {}", action.name, action.kind, action.description);
    }
    prompt.push('\n');
    situation(state, &mut prompt);
    prompt.push_str(
        "\nRespond in JSON format:\n\
         {\"top_recommendations\": [{\"action_name\": \"name\", \"priority\": \"HIGH/MEDIUM/LOW\", \"rationale\": \"why this action now\"}], \
         \"threat_assessment\": \"..\", \"strategic_analysis\": \"..\", \"urgency_level\": \"CRITICAL/HIGH/MODERATE/LOW\"}",
    );
    EnrichmentRequest {
        kind: EnrichmentKind::AdvisorBrief,
        system: "You are the US President's senior Arctic strategy advisor. \
                 Recommend only actions from the available list. Be direct and tactical."
            .into(),
        prompt,
    }
}

/// Request for a JSON [`AdvisorReply`] to `question` about `suggested_action`.
#[must_use]
pub(crate) fn discussion_request(
    state: &GameState,
    question: &str,
    suggested_action: &str,
) -> EnrichmentRequest {
    let mut prompt = format!(
        "SITUATION ROOM DISCUSSION - TURN {}\nCURRENT THREAT LEVEL: {}\n\n\
         YOUR PREVIOUS RECOMMENDATION: {suggested_action}\nPRESIDENT'S QUESTION/CONCERN: {question}\n\n",
        state.turn, state.tension
    );
    situation(state, &mut prompt);
    prompt.push_str(
        "\nRespond in JSON format:\n\
         {\"ai_response\": \"..\", \"key_points\": [\"..\"], \"acknowledges_concerns\": true, \
         \"maintains_recommendation\": true, \"alternative_suggestions\": \"..\", \
         \"confidence_level\": \"HIGH/MEDIUM/LOW\", \"risk_assessment\": \"..\"}",
    );
    EnrichmentRequest {
        kind: EnrichmentKind::Discussion,
        system: "You are the US President's top strategic advisor. Defend your reasoning, \
                 address the President's concern directly and change your recommendation \
                 when the concern is valid."
            .into(),
        prompt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::catalog;

    #[test]
    fn test_fallback_brief_uses_first_two_actions() {
        let offered = catalog(Actor::UnitedStates);
        let brief = AdvisorBrief::fallback(Tension::new(7), offered);
        assert_eq!(brief.top_recommendations[0].action_name, "Operation Arctic Shield");
        assert_eq!(brief.top_recommendations[0].priority, Priority::High);
        assert_eq!(
            brief.top_recommendations[1].action_name,
            "Arctic Strike Force Deployment"
        );
        assert_eq!(brief.urgency_level, Urgency::High);
        assert_eq!(
            brief.threat_assessment,
            "Tension at 7/10. Adversary actions detected this turn."
        );
    }

    #[test]
    fn test_fallback_brief_placeholders() {
        let brief = AdvisorBrief::fallback(Tension::new(3), &[]);
        assert_eq!(brief.top_recommendations[0].action_name, "No actions available");
        assert_eq!(brief.top_recommendations[1].action_name, "Limited options");
        assert_eq!(brief.urgency_level, Urgency::Moderate);
    }

    #[test]
    fn test_reply_decodes_with_missing_optional_fields() {
        let reply: AdvisorReply =
            serde_json::from_str(r#"{"ai_response": "Hold course.", "confidence_level": "HIGH"}"#)
                .unwrap();
        assert!(reply.maintains_recommendation);
        assert!(reply.key_points.is_empty());
        assert_eq!(reply.confidence_level, Confidence::High);
    }

    #[test]
    fn test_brief_decodes_uppercase_enums() {
        let brief: AdvisorBrief = serde_json::from_str(
            r#"{"top_recommendations": [{"action_name": "Arctic Truth Campaign", "priority": "LOW", "rationale": "cheap"}],
                "threat_assessment": "t", "strategic_analysis": "s", "urgency_level": "CRITICAL"}"#,
        )
        .unwrap();
        assert_eq!(brief.top_recommendations[0].priority, Priority::Low);
        assert_eq!(brief.urgency_level, Urgency::Critical);
    }

    #[test]
    fn test_discussion_prompt_quotes_question() {
        let state = GameState::default();
        let request = discussion_request(&state, "Is this too risky?", "Arctic Truth Campaign");
        assert_eq!(request.kind, EnrichmentKind::Discussion);
        assert!(request.prompt.contains("Is this too risky?"));
        assert!(request.prompt.contains("Arctic Truth Campaign"));
    }
}
