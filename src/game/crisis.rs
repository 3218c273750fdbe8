//! Opening crises. One is applied before the first turn of every game.

use crate::game::{Actor, ResourceKind};

/// Number of consequences written to the event log when a crisis opens.
pub const LOGGED_CONSEQUENCES: usize = 3;

/// A scripted opening crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crisis {
    /// Headline.
    pub name: &'static str,
    /// Base description, used verbatim when no narrative oracle is available.
    pub description: &'static str,
    /// Immediate consequences, most important first.
    pub consequences: &'static [&'static str],
    /// Tension added on top of the starting level.
    pub tension_increase: u8,
    /// Resource shocks per actor.
    pub effects: &'static [(Actor, ResourceKind, i32)],
}

impl Crisis {
    /// Look up a crisis by headline.
    #[must_use]
    pub fn find(name: &str) -> Option<&'static Crisis> {
        CRISES.iter().find(|crisis| crisis.name == name)
    }
}

/// All opening crises.
pub static CRISES: [Crisis; 5] = [
    Crisis {
        name: "Arctic Environmental Disaster",
        description: "Chinese oil tanker Shen Zhou carrying Russian Arctic crude oil suffers catastrophic hull breach during severe storm. 150,000 tons of oil spill into pristine Arctic waters, creating environmental crisis spanning three national territories.",
        consequences: &[
            "Massive environmental cleanup required across international waters",
            "Russia denies responsibility - claims Chinese navigation error",
            "China demands Russia pay for cleanup - oil was Russian property",
            "Indigenous communities report contaminated fishing grounds",
            "International environmental groups demand immediate action",
        ],
        tension_increase: 2,
        effects: &[
            (Actor::Russia, ResourceKind::Political, -1),
            (Actor::Russia, ResourceKind::Economic, -2),
            (Actor::China, ResourceKind::Political, -2),
            (Actor::China, ResourceKind::Economic, -1),
            (Actor::UnitedStates, ResourceKind::Political, 1),
        ],
    },
    Crisis {
        name: "Arctic Submarine Collision",
        description: "Russian nuclear submarine Komsomolsk collides with Chinese research vessel during covert Arctic mapping mission. Both crews rescued but classified technology scattered across Arctic seabed in disputed territorial waters.",
        consequences: &[
            "Classified Russian naval technology exposed on seabed",
            "China accuses Russia of ramming civilian research vessel",
            "Russia claims Chinese ship was conducting espionage operations",
            "International salvage rights disputed across territorial claims",
            "NATO monitoring Russian nuclear safety protocols",
        ],
        tension_increase: 3,
        effects: &[
            (Actor::Russia, ResourceKind::Military, -2),
            (Actor::Russia, ResourceKind::Information, -1),
            (Actor::China, ResourceKind::Political, -1),
            (Actor::China, ResourceKind::Information, -2),
            (Actor::UnitedStates, ResourceKind::Information, 2),
        ],
    },
    Crisis {
        name: "Arctic Cyber Infrastructure Attack",
        description: "Massive cyber attack cripples Arctic shipping navigation systems during peak transit season. GPS satellites feeding false data, icebreaker fleets stranded, international shipping paralyzed. Attack origin unknown but sophisticated state-level operation suspected.",
        consequences: &[
            "International Arctic shipping completely paralyzed",
            "Russia blames US cyber warfare capabilities",
            "China accuses Russia of sabotaging Belt and Road shipping",
            "US denies involvement but offers to investigate",
            "Emergency international cyber security summit called",
        ],
        tension_increase: 4,
        effects: &[
            (Actor::Russia, ResourceKind::Economic, -2),
            (Actor::Russia, ResourceKind::Information, -1),
            (Actor::China, ResourceKind::Economic, -3),
            (Actor::UnitedStates, ResourceKind::Information, 1),
            (Actor::UnitedStates, ResourceKind::Political, 1),
        ],
    },
    Crisis {
        name: "Arctic Resource Discovery Crisis",
        description: "Massive rare earth element deposit discovered directly on Russia-China-US territorial claim overlap. Geological surveys indicate deposit worth $2 trillion. All three nations immediately dispatch military forces to secure the area.",
        consequences: &[
            "$2 trillion rare earth deposit spans disputed territorial waters",
            "Russia immediately begins military base construction",
            "China deploys icebreaker fleet with mining equipment",
            "US sends nuclear submarines to assert territorial claims",
            "International law experts warn of potential armed conflict",
        ],
        tension_increase: 5,
        effects: &[
            (Actor::Russia, ResourceKind::Military, 1),
            (Actor::Russia, ResourceKind::Economic, 2),
            (Actor::China, ResourceKind::Economic, 2),
            (Actor::China, ResourceKind::Political, 1),
            (Actor::UnitedStates, ResourceKind::Military, 1),
            (Actor::UnitedStates, ResourceKind::Political, 1),
        ],
    },
    Crisis {
        name: "Arctic Climate Tipping Point",
        description: "Sudden acceleration of Arctic ice sheet collapse triggers unprecedented global climate event. Sea levels rise 2 meters overnight, new shipping lanes open, coastal cities flood. Nations scramble to adapt while exploiting new opportunities.",
        consequences: &[
            "Unprecedented Arctic shipping lanes suddenly open",
            "Coastal flooding requires massive international response",
            "New territorial water boundaries disputed globally",
            "Arctic resources become immediately accessible",
            "Climate refugees create international crisis",
        ],
        tension_increase: 3,
        effects: &[
            (Actor::Russia, ResourceKind::Economic, 3),
            (Actor::Russia, ResourceKind::Political, -1),
            (Actor::China, ResourceKind::Economic, 2),
            (Actor::China, ResourceKind::Political, -1),
            (Actor::UnitedStates, ResourceKind::Political, -2),
            (Actor::UnitedStates, ResourceKind::Military, 1),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find() {
        let crisis = Crisis::find("Arctic Submarine Collision").unwrap();
        assert_eq!(crisis.tension_increase, 3);
        assert!(Crisis::find("Nothing happened").is_none());
    }

    #[test]
    fn test_every_crisis_has_enough_consequences() {
        for crisis in &CRISES {
            assert!(crisis.consequences.len() >= LOGGED_CONSEQUENCES, "{}", crisis.name);
            assert!(!crisis.effects.is_empty());
        }
    }
}
