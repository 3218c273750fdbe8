//! Output formatting utilities for CLI.

use arctic_wargame::game::{Action, Cost, LogCaps, ResourceKind};
use arctic_wargame::{Actor, GameResult, GameState};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Position of an actor in per-actor arrays.
const fn slot(actor: Actor) -> usize {
    match actor {
        Actor::Russia => 0,
        Actor::China => 1,
        Actor::UnitedStates => 2,
    }
}

/// Render a cost as `military 3, economic 1`.
pub(super) fn format_cost(cost: &Cost) -> String {
    let parts: Vec<String> = cost
        .iter()
        .map(|(kind, amount)| format!("{} {amount}", kind.name()))
        .collect();
    if parts.is_empty() {
        "free".to_string()
    } else {
        parts.join(", ")
    }
}

/// Numbered menu of player actions.
pub(super) fn format_menu(actions: &[Action]) -> String {
    let mut output = String::new();
    for (i, action) in actions.iter().enumerate() {
        let _ = writeln!(
            output,
            "  {:>2}. {} [{}] ({})\n      {}",
            i + 1,
            action.name,
            action.kind,
            format_cost(&action.cost),
            action.description
        );
    }
    output
}

/// Turn header, tension and resource table.
pub(super) fn format_status(state: &GameState) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "=== Turn {} | Tension {} ({}) ===",
        state.turn,
        state.tension,
        state.tension.tier().label()
    );
    let _ = write!(output, "  {:<14}", "");
    for kind in ResourceKind::ALL {
        let _ = write!(output, "{:>12}", kind.name());
    }
    let _ = writeln!(output, "{:>8}", "total");
    for actor in Actor::ALL {
        let pool = state.ledger.pool(actor);
        let _ = write!(output, "  {:<14}", actor.name());
        for kind in ResourceKind::ALL {
            let _ = write!(output, "{:>12}", pool.get(kind));
        }
        let _ = writeln!(output, "{:>8}", pool.total());
    }
    output
}

/// Event, reaction and tension logs.
pub(super) fn format_logs(state: &GameState) -> String {
    let mut output = String::new();
    let sections = [
        ("Events", &state.events),
        ("Reactions", &state.reactions),
        ("Tension", &state.tension_changes),
    ];
    for (title, log) in sections {
        if log.is_empty() {
            continue;
        }
        let _ = writeln!(output, "{title}:");
        for entry in log.iter() {
            let _ = writeln!(output, "  - {entry}");
        }
    }
    output
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    if let Some(crisis) = &result.opening_crisis {
        let _ = writeln!(output, "  Opening crisis: {crisis}");
    }
    let _ = writeln!(output, "  Winner: {} ({})", result.winner(), result.verdict.kind());
    let _ = writeln!(output, "  Turns: {}", result.turns_played);
    let _ = writeln!(output, "  Final tension: {}/10\n", result.final_tension);
    for actor in Actor::ALL {
        let _ = writeln!(
            output,
            "  {}: {} total resources",
            actor,
            result.final_resources.total(actor)
        );
    }
    let _ = writeln!(output, "\n{}", result.verdict);

    output
}

/// Aggregated statistics of a batch of games.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Win count per actor, in [`Actor::ALL`] order.
    wins: [u64; 3],
    /// Win count per verdict kind.
    verdicts: BTreeMap<&'static str, u64>,
    /// Total turns across all games.
    total_turns: u64,
    /// Sum of final tension levels.
    total_tension: u64,
}

impl BatchStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.wins[slot(result.winner())] += 1;
        *self.verdicts.entry(result.verdict.kind()).or_insert(0) += 1;
        self.total_turns += u64::from(result.turns_played);
        self.total_tension += u64::from(result.final_tension);
    }

    /// Fold another thread's stats into these.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        for (mine, theirs) in self.wins.iter_mut().zip(other.wins) {
            *mine += theirs;
        }
        for (kind, count) in &other.verdicts {
            *self.verdicts.entry(*kind).or_insert(0) += count;
        }
        self.total_turns += other.total_turns;
        self.total_tension += other.total_tension;
    }

    /// Wins of an actor.
    pub(super) const fn wins(&self, actor: Actor) -> u64 {
        self.wins[slot(actor)]
    }

    /// Win rate of an actor (0.0-1.0).
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn win_rate(&self, actor: Actor) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins(actor) as f64 / self.games_played as f64
    }

    /// Average game length.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }

    /// Average final tension.
    #[allow(clippy::cast_precision_loss)]
    pub(super) fn avg_tension(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_tension as f64 / self.games_played as f64
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total games played.
    games_played: u64,
    /// Per-actor statistics.
    actors: Vec<JsonBatchActor>,
    /// Games won per verdict kind.
    verdicts: BTreeMap<&'static str, u64>,
    /// Average game length in turns.
    avg_turns: f64,
    /// Average final tension.
    avg_tension: f64,
}

/// JSON-serializable per-actor batch stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchActor {
    /// Actor name.
    actor: &'static str,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
}

impl JsonBatchResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        Self {
            games_played: stats.games_played,
            actors: Actor::ALL
                .into_iter()
                .map(|actor| JsonBatchActor {
                    actor: actor.name(),
                    wins: stats.wins(actor),
                    win_rate: stats.win_rate(actor),
                })
                .collect(),
            verdicts: stats.verdicts.clone(),
            avg_turns: stats.avg_turns(),
            avg_tension: stats.avg_tension(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Batch Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for actor in Actor::ALL {
        let _ = writeln!(
            output,
            "  {:<14} {:>5.1}% ({} wins)",
            actor.name(),
            stats.win_rate(actor) * 100.0,
            stats.wins(actor)
        );
    }

    output.push_str("\nVerdicts:\n");
    for (kind, count) in &stats.verdicts {
        let _ = writeln!(output, "  {kind:<14} {count}");
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.1} turns", stats.avg_turns());
    let _ = writeln!(output, "Average Final Tension: {:.1}/10", stats.avg_tension());

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str("actor,wins,win_rate,avg_turns\n");
    for actor in Actor::ALL {
        let _ = writeln!(
            output,
            "{},{},{:.4},{:.2}",
            actor.name(),
            stats.wins(actor),
            stats.win_rate(actor),
            stats.avg_turns()
        );
    }

    output
}

/// Default log caps, shown in the interactive banner.
pub(super) fn format_caps(caps: LogCaps) -> String {
    format!(
        "logs keep {} events, {} reactions, {} tension notes",
        caps.events, caps.reactions, caps.tension_changes
    )
}
