//! Error types for the game binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the game run.

/// Top-level error for the game binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sleuth_core::config::ConfigError,
    },

    /// Game setup failed.
    #[error("setup error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: sleuth_core::GameError,
    },

    /// The game loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: sleuth_core::RunnerError,
    },

    /// The event log file could not be created.
    #[error("failed to open event log {path}: {source}")]
    EventLog {
        /// The path that could not be opened.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
