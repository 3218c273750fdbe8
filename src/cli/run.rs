//! Run command implementation.

use super::output::{format_logs, format_status, format_text};
use super::{CliError, OutputFormat, load_config, resolve_seed};
use arctic_wargame::simulation::play_out;
use arctic_wargame::{GameConfig, WargameEngine};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded, or the snapshot or
/// result cannot be written.
pub(crate) fn execute(
    seed: Option<u64>,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let config = GameConfig {
        interactive: false,
        ..load_config(config_path.as_deref())?
    };
    let seed = resolve_seed(seed);
    let chatty = !quiet && format == OutputFormat::Text;

    if chatty {
        println!("Running game with seed {seed}...");
    }

    let mut engine = WargameEngine::new(config, seed);
    let crisis = engine.start_game();
    if chatty {
        println!("Opening crisis: {}", crisis.name);
        println!();
    }

    let result = play_out(&mut engine, seed);

    if let Some(save_path) = save {
        engine
            .snapshot()
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save snapshot: {e}")))?;
        if chatty {
            println!("Snapshot saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            if !quiet {
                print!("{}", format_status(engine.state()));
                println!();
                print!("{}", format_logs(engine.state()));
                println!();
            }
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
