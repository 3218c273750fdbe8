//! Action catalog and affordability filter.
//!
//! Each actor draws from a fixed catalog that reflects its strategic
//! posture. Catalog entries are read-only templates; resolving an action
//! never changes the template.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::{Actor, Cost, ResourcePool};

/// Category of an action. Drives tension rules and narrative templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Force projection: deployments, exercises, deterrence.
    Military,
    /// Investment, sanctions, infrastructure.
    Economic,
    /// Treaties, partnerships, councils.
    Diplomatic,
    /// Media and narrative campaigns.
    Information,
    /// Attacks on networks and navigation systems.
    Cyber,
    /// Reconnaissance and covert operations.
    Intelligence,
    /// Combined multi-domain pressure.
    Hybrid,
}

impl ActionKind {
    /// All kinds.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Military,
        ActionKind::Economic,
        ActionKind::Diplomatic,
        ActionKind::Information,
        ActionKind::Cyber,
        ActionKind::Intelligence,
        ActionKind::Hybrid,
    ];

    /// Lower-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Military => "military",
            ActionKind::Economic => "economic",
            ActionKind::Diplomatic => "diplomatic",
            ActionKind::Information => "information",
            ActionKind::Cyber => "cyber",
            ActionKind::Intelligence => "intelligence",
            ActionKind::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Category of the action.
    pub kind: ActionKind,
    /// Short name, phrased to follow the actor's name in narrative text.
    pub name: Cow<'static, str>,
    /// One-line description.
    pub description: Cow<'static, str>,
    /// Resources paid when the action is attempted.
    pub cost: Cost,
}

impl Action {
    /// Create a catalog entry.
    #[must_use]
    pub const fn new(
        kind: ActionKind,
        name: &'static str,
        description: &'static str,
        cost: Cost,
    ) -> Self {
        Self {
            kind,
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            cost,
        }
    }
}

static RUSSIA_CATALOG: [Action; 4] = [
    Action::new(
        ActionKind::Military,
        "deploys Arctic fleet",
        "Increases naval presence along Arctic shipping lanes",
        Cost::FREE.military(2).economic(1),
    ),
    Action::new(
        ActionKind::Economic,
        "expands gas infrastructure",
        "Builds new LNG terminals and pipelines",
        Cost::FREE.economic(3),
    ),
    Action::new(
        ActionKind::Diplomatic,
        "proposes Arctic treaty",
        "Suggests new framework for territorial claims",
        Cost::FREE.political(2),
    ),
    Action::new(
        ActionKind::Information,
        "launches media campaign",
        "Promotes Russian Arctic sovereignty claims",
        Cost::FREE.information(2),
    ),
];

static CHINA_CATALOG: [Action; 4] = [
    Action::new(
        ActionKind::Economic,
        "invests in Arctic ports",
        "Funds infrastructure development in partner nations",
        Cost::FREE.economic(3),
    ),
    Action::new(
        ActionKind::Diplomatic,
        "strengthens Arctic partnerships",
        "Negotiates resource extraction agreements",
        Cost::FREE.political(2).economic(1),
    ),
    Action::new(
        ActionKind::Information,
        "promotes Belt and Road",
        "Advocates for Polar Silk Road initiative",
        Cost::FREE.information(2),
    ),
    Action::new(
        ActionKind::Military,
        "conducts Arctic research mission",
        "Sends icebreaker on 'scientific' expedition",
        Cost::FREE.military(1).economic(2),
    ),
];

static UNITED_STATES_CATALOG: [Action; 10] = [
    Action::new(
        ActionKind::Military,
        "Operation Arctic Shield",
        "Deploy advanced F-22 Raptors and nuclear submarines to assert dominance over contested Arctic waters",
        Cost::FREE.military(3).economic(1),
    ),
    Action::new(
        ActionKind::Military,
        "Arctic Strike Force Deployment",
        "Establish forward operating bases with Aegis missile systems targeting adversary positions",
        Cost::FREE.military(4).political(1),
    ),
    Action::new(
        ActionKind::Cyber,
        "Operation Digital Blizzard",
        "Launch sophisticated cyber attack on adversary Arctic communication networks and navigation systems",
        Cost::FREE.information(3).military(1),
    ),
    Action::new(
        ActionKind::Intelligence,
        "Arctic Shadow Reconnaissance",
        "Deploy stealth drones and special forces for covert surveillance of enemy installations",
        Cost::FREE.information(4).military(1),
    ),
    Action::new(
        ActionKind::Diplomatic,
        "Arctic Alliance War Council",
        "Convene emergency NATO meeting to coordinate massive joint response against aggression",
        Cost::FREE.political(3).information(1),
    ),
    Action::new(
        ActionKind::Economic,
        "Arctic Economic Warfare",
        "Impose devastating sanctions and freeze Arctic assets to cripple adversary operations",
        Cost::FREE.economic(3).political(2),
    ),
    Action::new(
        ActionKind::Hybrid,
        "Operation Arctic Storm",
        "Coordinate multi-domain assault combining cyber, economic, and military pressure",
        Cost::FREE.military(2).economic(2).information(2),
    ),
    Action::new(
        ActionKind::Information,
        "Arctic Truth Campaign",
        "Launch massive propaganda offensive exposing adversary aggression to world media",
        Cost::FREE.information(4),
    ),
    Action::new(
        ActionKind::Military,
        "Arctic Nuclear Deterrent",
        "Deploy nuclear-capable assets as ultimate deterrent against further escalation",
        Cost::FREE.military(5).political(2),
    ),
    Action::new(
        ActionKind::Intelligence,
        "Arctic Deep Strike",
        "Conduct precision sabotage operations against critical enemy infrastructure",
        Cost::FREE.information(3).military(2),
    ),
];

/// The fixed catalog for `actor`.
#[must_use]
pub fn catalog(actor: Actor) -> &'static [Action] {
    match actor {
        Actor::Russia => &RUSSIA_CATALOG,
        Actor::China => &CHINA_CATALOG,
        Actor::UnitedStates => &UNITED_STATES_CATALOG,
    }
}

/// Every action in `catalog` whose cost `pool` fully covers, in catalog order.
#[must_use]
pub fn affordable(pool: &ResourcePool, catalog: &[Action]) -> Vec<Action> {
    catalog
        .iter()
        .filter(|action| pool.covers(&action.cost))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Ledger;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(catalog(Actor::Russia).len(), 4);
        assert_eq!(catalog(Actor::China).len(), 4);
        assert_eq!(catalog(Actor::UnitedStates).len(), 10);
    }

    #[test]
    fn test_player_catalog_covers_every_kind() {
        for kind in ActionKind::ALL {
            assert!(
                catalog(Actor::UnitedStates).iter().any(|a| a.kind == kind),
                "no {kind} action for the player"
            );
        }
    }

    #[test]
    fn test_affordable_with_full_pool_returns_everything_in_order() {
        let pool = ResourcePool::new(10, 10, 10, 10);
        let actions = affordable(&pool, catalog(Actor::UnitedStates));
        assert_eq!(actions.as_slice(), catalog(Actor::UnitedStates));
    }

    #[test]
    fn test_affordable_with_empty_pool_is_empty() {
        let pool = ResourcePool::default();
        assert!(affordable(&pool, catalog(Actor::Russia)).is_empty());
    }

    #[test]
    fn test_affordable_filters_by_cost() {
        // Russia with no information cannot run the media campaign.
        let mut pool = Ledger::initial().russia;
        pool.information = 1;
        let names: Vec<_> = affordable(&pool, catalog(Actor::Russia))
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "deploys Arctic fleet",
                "expands gas infrastructure",
                "proposes Arctic treaty"
            ]
        );
    }

    #[test]
    fn test_nuclear_deterrent_requires_five_military() {
        let pool = ResourcePool::new(4, 10, 10, 10);
        let actions = affordable(&pool, catalog(Actor::UnitedStates));
        assert!(!actions.iter().any(|a| a.name == "Arctic Nuclear Deterrent"));
    }
}
