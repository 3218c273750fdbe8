//! Interactive play on stdin/stdout.

use super::output::{format_caps, format_cost, format_logs, format_menu, format_status};
use super::{CliError, load_config, resolve_seed};
use arctic_wargame::engine::AdvisorBrief;
use arctic_wargame::{GameConfig, PlayerActionStatus, TurnStatus, Verdict, WargameEngine};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// What the player typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    /// Take the numbered action (0-based).
    Choose(usize),
    /// Show the advisor brief.
    Advisor,
    /// Question the advisor's top recommendation.
    Discuss(String),
    /// End the game now with the final adjudication.
    Quit,
    /// Unrecognized input.
    Unknown,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    match line {
        "a" | "advisor" => Command::Advisor,
        "q" | "quit" => Command::Quit,
        _ => {
            if let Some(question) = line.strip_prefix("d ") {
                return Command::Discuss(question.trim().to_string());
            }
            match line.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Choose(n - 1),
                _ => Command::Unknown,
            }
        }
    }
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the terminal fails.
pub(crate) fn execute(seed: Option<u64>, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = GameConfig {
        interactive: true,
        ..load_config(config_path.as_deref())?
    };
    let seed = resolve_seed(seed);
    println!("Arctic wargame, seed {seed} ({})", format_caps(config.log_caps));
    println!("Commands: <number> to act, a for the advisor, d <question> to challenge it, q to end the game.");
    println!();

    let mut engine = WargameEngine::new(config, seed);
    let crisis = engine.start_game();
    println!("BREAKING: {}", crisis.name);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut last_brief: Option<AdvisorBrief> = None;

    let verdict = 'game: loop {
        match engine.execute_turn()? {
            TurnStatus::Continue => continue,
            TurnStatus::GameOver(verdict) => break verdict,
            TurnStatus::AwaitingPlayer => {}
        }

        println!();
        print!("{}", format_status(engine.state()));
        print!("{}", format_logs(engine.state()));
        println!("\nYour options:");
        print!("{}", format_menu(engine.human_actions()));

        loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next().transpose()? else {
                break 'game engine.end_game();
            };

            match parse_command(&line) {
                Command::Choose(index) => {
                    let Some(action) = engine.human_actions().get(index).cloned() else {
                        println!("No option {}.", index + 1);
                        continue;
                    };
                    match engine.execute_human_action(&action)? {
                        PlayerActionStatus::Completed => {}
                        PlayerActionStatus::GameOver(verdict) => break 'game verdict,
                    }
                    if let Some(report) = engine.last_action_report() {
                        println!("{}", report.dramatic_description);
                        println!("  {}", report.tactical_details);
                    }
                    continue 'game;
                }
                Command::Advisor => {
                    let brief = engine.advisor_brief();
                    print_brief(&brief, &engine);
                    last_brief = Some(brief);
                }
                Command::Discuss(question) => {
                    let suggested = last_brief
                        .as_ref()
                        .and_then(|b| b.top_recommendations.first())
                        .map_or_else(
                            || "no recommendation yet".to_string(),
                            |r| r.action_name.clone(),
                        );
                    let reply = engine.discuss(&question, &suggested);
                    println!("Advisor: {}", reply.ai_response);
                    for point in &reply.key_points {
                        println!("  - {point}");
                    }
                    if !reply.maintains_recommendation && !reply.alternative_suggestions.is_empty() {
                        println!("  Alternative: {}", reply.alternative_suggestions);
                    }
                }
                Command::Quit => break 'game engine.end_game(),
                Command::Unknown => println!("Enter an option number, a, d <question> or q."),
            }
        }
    };

    print_verdict(&verdict, &engine);
    Ok(())
}

fn print_brief(brief: &AdvisorBrief, engine: &WargameEngine) {
    println!("Advisor brief ({:?} urgency):", brief.urgency_level);
    for rec in &brief.top_recommendations {
        let cost = engine
            .human_actions()
            .iter()
            .find(|a| a.name == rec.action_name)
            .map(|a| format_cost(&a.cost))
            .unwrap_or_default();
        println!("  [{:?}] {} {cost}", rec.priority, rec.action_name);
        println!("      {}", rec.rationale);
    }
    println!("  Threat: {}", brief.threat_assessment);
    println!("  Analysis: {}", brief.strategic_analysis);
}

fn print_verdict(verdict: &Verdict, engine: &WargameEngine) {
    println!();
    print!("{}", format_status(engine.state()));
    println!();
    println!("GAME OVER: {verdict}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("3\n"), Command::Choose(2));
        assert_eq!(parse_command("a"), Command::Advisor);
        assert_eq!(parse_command(" q "), Command::Quit);
        assert_eq!(
            parse_command("d why not diplomacy?"),
            Command::Discuss("why not diplomacy?".to_string())
        );
        assert_eq!(parse_command("0"), Command::Unknown);
        assert_eq!(parse_command("launch"), Command::Unknown);
    }
}
