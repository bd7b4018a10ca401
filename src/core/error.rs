use std::path::PathBuf;
use std::time::Duration;

/// Result type alias for conformance-runner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for conformance-runner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Test corpus errors (missing root, malformed names).
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Process spawning and waiting errors.
    #[error("Runner error: {0}")]
    Runner(String),

    /// A spawned command exceeded its wall-clock budget.
    #[error("Command '{command}' timed out after {} seconds", .timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// File not found.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid configuration value.
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: String, value: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("TOML parsing error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a corpus error.
    pub fn corpus(msg: impl Into<String>) -> Self {
        Error::Corpus(msg.into())
    }

    /// Create a runner error.
    pub fn runner(msg: impl Into<String>) -> Self {
        Error::Runner(msg.into())
    }

    /// Create a timeout error for the given command.
    pub fn timeout(command: impl Into<String>, timeout: Duration) -> Self {
        Error::Timeout {
            command: command.into(),
            timeout,
        }
    }
}
