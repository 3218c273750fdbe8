//! The three fixed actors of the Arctic competition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three competing nations.
///
/// Russia and China form the coalition and are always AI-driven. The
/// United States is the independent actor and may be player-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// Coalition member favoring force projection.
    Russia,
    /// Coalition member favoring economic expansion.
    China,
    /// Independent actor, controlled by the player in interactive games.
    UnitedStates,
}

impl Actor {
    /// All actors in fixed adjudication order.
    pub const ALL: [Actor; 3] = [Actor::Russia, Actor::China, Actor::UnitedStates];

    /// Coalition members in the order they act each turn.
    pub const COALITION: [Actor; 2] = [Actor::Russia, Actor::China];

    /// The actor the player controls in interactive games.
    pub const PLAYER: Actor = Actor::UnitedStates;

    /// Display name used in narrative text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Actor::Russia => "Russia",
            Actor::China => "China",
            Actor::UnitedStates => "United States",
        }
    }

    /// Whether this actor belongs to the coalition.
    #[must_use]
    pub const fn is_coalition(self) -> bool {
        matches!(self, Actor::Russia | Actor::China)
    }

    /// The other coalition member, if this actor is in the coalition.
    #[must_use]
    pub const fn partner(self) -> Option<Actor> {
        match self {
            Actor::Russia => Some(Actor::China),
            Actor::China => Some(Actor::Russia),
            Actor::UnitedStates => None,
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
