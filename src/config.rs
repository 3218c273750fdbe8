//! Engine configuration.
//!
//! Every field has a default equal to the standard rules, so a config file
//! only needs the values it changes:
//!
//! ```json
//! { "interactive": true, "turn_ceiling": 30 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{COALITION_SUCCESS_ODDS, PLAYER_SUCCESS_ODDS, SuccessOdds};
use crate::error::ConfigError;
use crate::game::victory::{ELIMINATION_THRESHOLD, TURN_CEILING, VICTORY_MIN_TURN};
use crate::game::{LogCaps, ScoringWeights, VictoryRules};

/// Chance that each coalition actor acts in a turn.
pub const COALITION_ACT_CHANCE: f64 = 0.8;

/// Chance that the player acts in a turn when played automatically.
pub const AUTO_PLAYER_ACT_CHANCE: f64 = 0.7;

/// Chance of a flavor event at the start of a turn.
pub const FLAVOR_EVENT_CHANCE: f64 = 0.25;

/// Chance that each costed resource of a successful action yields +1.
pub const WINDFALL_CHANCE: f64 = 0.3;

/// Default number of retries for a failed oracle request.
pub const ORACLE_RETRIES: u32 = 1;

/// Default milliseconds an oracle command gets per request.
pub const ORACLE_TIMEOUT_MS: u64 = 20_000;

/// Configuration for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Suspend each turn for a player decision instead of auto-playing.
    pub interactive: bool,
    /// Chance that each coalition actor acts (default: 0.8).
    pub coalition_act_chance: f64,
    /// Chance that the auto-played player acts (default: 0.7).
    pub auto_player_act_chance: f64,
    /// Success odds of coalition actions (default: fixed 0.80).
    pub coalition_odds: SuccessOdds,
    /// Success odds of player actions (default: fixed 0.75).
    pub player_odds: SuccessOdds,
    /// Chance of a flavor event per turn (default: 0.25).
    pub flavor_event_chance: f64,
    /// Chance of a +1 windfall per costed resource on success (default: 0.3).
    pub windfall_chance: f64,
    /// Earliest turn at which victory is evaluated (default: 10).
    pub victory_min_turn: u32,
    /// Turn at which the final adjudication is forced (default: 25).
    pub turn_ceiling: u32,
    /// Resource total at or below which an actor is eliminated (default: 8).
    pub elimination_threshold: u32,
    /// Tie-break weights for simultaneous winners.
    pub scoring_weights: ScoringWeights,
    /// Retention caps of the narrative logs.
    pub log_caps: LogCaps,
    /// Retries per oracle request after a failure (default: 1).
    pub oracle_retries: u32,
    /// Milliseconds an oracle command may take per request (default: 20000).
    pub oracle_timeout_ms: u64,
    /// External narrative command, program first. `None` runs offline.
    pub oracle_command: Option<Vec<String>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            interactive: false,
            coalition_act_chance: COALITION_ACT_CHANCE,
            auto_player_act_chance: AUTO_PLAYER_ACT_CHANCE,
            coalition_odds: SuccessOdds::Fixed(COALITION_SUCCESS_ODDS),
            player_odds: SuccessOdds::Fixed(PLAYER_SUCCESS_ODDS),
            flavor_event_chance: FLAVOR_EVENT_CHANCE,
            windfall_chance: WINDFALL_CHANCE,
            victory_min_turn: VICTORY_MIN_TURN,
            turn_ceiling: TURN_CEILING,
            elimination_threshold: ELIMINATION_THRESHOLD,
            scoring_weights: ScoringWeights::default(),
            log_caps: LogCaps::default(),
            oracle_retries: ORACLE_RETRIES,
            oracle_timeout_ms: ORACLE_TIMEOUT_MS,
            oracle_command: None,
        }
    }
}

impl GameConfig {
    /// Interactive configuration: the engine suspends for every player move.
    #[must_use]
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Self::default()
        }
    }

    /// Load and validate a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON for
    /// this schema, or holds out-of-range values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not parse or fails validation.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfRange`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chances = [
            ("coalition_act_chance", self.coalition_act_chance),
            ("auto_player_act_chance", self.auto_player_act_chance),
            ("flavor_event_chance", self.flavor_event_chance),
            ("windfall_chance", self.windfall_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(out_of_range(field, value));
            }
        }

        if !self.coalition_odds.is_valid() {
            return Err(out_of_range("coalition_odds", format!("{:?}", self.coalition_odds)));
        }
        if !self.player_odds.is_valid() {
            return Err(out_of_range("player_odds", format!("{:?}", self.player_odds)));
        }

        if self.victory_min_turn < 1 {
            return Err(out_of_range("victory_min_turn", self.victory_min_turn));
        }
        if self.turn_ceiling <= self.victory_min_turn {
            return Err(out_of_range("turn_ceiling", self.turn_ceiling));
        }

        let caps = [
            ("log_caps.events", self.log_caps.events),
            ("log_caps.reactions", self.log_caps.reactions),
            ("log_caps.tension_changes", self.log_caps.tension_changes),
        ];
        for (field, value) in caps {
            if value < 1 {
                return Err(out_of_range(field, value));
            }
        }

        let weights = self.scoring_weights;
        for (field, value) in [
            ("scoring_weights.military", weights.military),
            ("scoring_weights.economic", weights.economic),
            ("scoring_weights.political", weights.political),
            ("scoring_weights.information", weights.information),
        ] {
            if !value.is_finite() {
                return Err(out_of_range(field, value));
            }
        }

        if self.oracle_timeout_ms == 0 {
            return Err(out_of_range("oracle_timeout_ms", self.oracle_timeout_ms));
        }
        if self.oracle_command.as_ref().is_some_and(Vec::is_empty) {
            return Err(out_of_range("oracle_command", "[]"));
        }

        Ok(())
    }

    /// Victory thresholds derived from this config.
    #[must_use]
    pub const fn victory_rules(&self) -> VictoryRules {
        VictoryRules {
            min_turn: self.victory_min_turn,
            turn_ceiling: self.turn_ceiling,
            elimination_threshold: self.elimination_threshold,
            weights: self.scoring_weights,
        }
    }
}

fn out_of_range(field: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.interactive);
        assert_eq!(config.victory_rules(), VictoryRules::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "interactive": true, "turn_ceiling": 30 }"#)
            .unwrap();
        assert!(config.interactive);
        assert_eq!(config.turn_ceiling, 30);
        assert_eq!(config.victory_min_turn, 10);
        assert_eq!(config.log_caps, LogCaps::default());
    }

    #[test]
    fn test_odds_json_shapes() {
        let config = GameConfig::from_json_str(
            r#"{ "player_odds": { "tension_scaled": { "base": 0.7, "per_point": 0.05 } } }"#,
        )
        .unwrap();
        assert_eq!(
            config.player_odds,
            SuccessOdds::TensionScaled {
                base: 0.7,
                per_point: 0.05
            }
        );
    }

    #[test]
    fn test_rejects_probability_above_one() {
        let err = GameConfig::from_json_str(r#"{ "windfall_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "windfall_chance",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_ceiling_before_min_turn() {
        let err =
            GameConfig::from_json_str(r#"{ "victory_min_turn": 12, "turn_ceiling": 12 }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "turn_ceiling", .. }));
    }

    #[test]
    fn test_rejects_zero_log_cap() {
        let err = GameConfig::from_json_str(r#"{ "log_caps": { "events": 0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "log_caps.events",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_oracle_timeout() {
        let err = GameConfig::from_json_str(r#"{ "oracle_timeout_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "oracle_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "coalition_act_chance": 1.0 }}"#).unwrap();
        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert!((config.coalition_act_chance - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameConfig::from_json_file("/nonexistent/arctic.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
