//! Configuration loading and typed config structures for the Sleuth
//! simulation.
//!
//! The canonical configuration lives in `sleuth-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure, a loader that reads the file, and validation of the roster
//! and round cap.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sleuth_types::{ErrorKind, Person};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sleuth-config.yaml";

/// Largest roster the board supports: one player per suspect.
pub const MAX_PLAYERS: usize = 6;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value for {variable}: {value:?}")]
    InvalidOverride {
        /// The environment variable name.
        variable: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The roster is empty or larger than the number of suspects.
    #[error("roster must have 1 to {MAX_PLAYERS} players, found {0}")]
    RosterSize(usize),

    /// Two players chose the same suspect.
    #[error("character {0} is assigned to more than one player")]
    DuplicateCharacter(Person),

    /// The round cap is zero.
    #[error("max_rounds must be at least 1")]
    ZeroRounds,
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl ConfigError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } | Self::RosterSize(_) => ErrorKind::InsufficientData,
            Self::Yaml { .. }
            | Self::InvalidOverride { .. }
            | Self::DuplicateCharacter(_)
            | Self::ZeroRounds => ErrorKind::InconsistentData,
        }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `sleuth-config.yaml`. Every field has a
/// default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SleuthConfig {
    /// Game-level settings (name, seed, round cap).
    #[serde(default)]
    pub game: GameConfig,

    /// Ordered seating roster.
    #[serde(default = "default_players")]
    pub players: Vec<PlayerConfig>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Event log output.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for SleuthConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            players: default_players(),
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl SleuthConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SLEUTH_SEED` overrides `game.seed`
    /// - `SLEUTH_MAX_ROUNDS` overrides `game.max_rounds`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidOverride`] for an unparsable override.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if it exists, otherwise start from the defaults.
    /// Environment overrides apply either way.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an existing file cannot be loaded.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        Self::load_or_default_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`SleuthConfig::load_or_default`], reading overrides through
    /// `lookup` instead of the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if an existing file cannot be loaded or an
    /// override is unparsable.
    pub fn load_or_default_with(
        path: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_yaml(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::from_yaml(yaml)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Empty input means the defaults.
    fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply `SLEUTH_SEED` and `SLEUTH_MAX_ROUNDS` from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an unparsable value.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOverride`] for an unparsable value.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("SLEUTH_SEED") {
            let seed = value.trim().parse().map_err(|_parse| ConfigError::InvalidOverride {
                variable: "SLEUTH_SEED",
                value: value.clone(),
            })?;
            self.game.seed = Some(seed);
        }
        if let Some(value) = lookup("SLEUTH_MAX_ROUNDS") {
            let rounds = value.trim().parse().map_err(|_parse| ConfigError::InvalidOverride {
                variable: "SLEUTH_MAX_ROUNDS",
                value: value.clone(),
            })?;
            self.game.max_rounds = rounds;
        }
        Ok(())
    }

    /// Check the roster and round cap.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::RosterSize`] for an empty or oversized roster
    /// - [`ConfigError::DuplicateCharacter`] if a suspect is taken twice
    /// - [`ConfigError::ZeroRounds`] if `max_rounds` is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() || self.players.len() > MAX_PLAYERS {
            return Err(ConfigError::RosterSize(self.players.len()));
        }
        let mut seen = BTreeSet::new();
        for player in &self.players {
            if !seen.insert(player.character) {
                return Err(ConfigError::DuplicateCharacter(player.character));
            }
        }
        if self.game.max_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        Ok(())
    }
}

/// Game-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Human-readable game name.
    #[serde(default = "default_game_name")]
    pub name: String,

    /// Random seed; a fresh seed is drawn and logged when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Round cap. A round is one turn for every seat.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            name: default_game_name(),
            seed: None,
            max_rounds: default_max_rounds(),
        }
    }
}

/// One roster seat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlayerConfig {
    /// Display name.
    pub name: String,
    /// The suspect this player moves.
    pub character: Person,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Event log output configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// File to write the JSON-lines event log to, if any.
    #[serde(default)]
    pub event_log: Option<PathBuf>,
}

fn default_game_name() -> String {
    "Sleuth".to_owned()
}

const fn default_max_rounds() -> u32 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_players() -> Vec<PlayerConfig> {
    vec![
        PlayerConfig {
            name: "Player 1".to_owned(),
            character: Person::ColonelMustard,
        },
        PlayerConfig {
            name: "Player 2".to_owned(),
            character: Person::ProfessorPlum,
        },
        PlayerConfig {
            name: "Player 3".to_owned(),
            character: Person::MissScarlet,
        },
    ]
}
