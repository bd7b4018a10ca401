//! Environment variable processing for runtime configuration overrides.
//!
//! Env var prefix: `CONFORMANCE_RUNNER_`
//!
//! - `CONFORMANCE_RUNNER_CONFIG`: path to a standalone TOML configuration file
//! - `CONFORMANCE_RUNNER_PROFILE`: select a configuration profile
//! - `CONFORMANCE_RUNNER_TIMEOUT`: per-process timeout in seconds
//! - `CONFORMANCE_RUNNER_CORPUS_ROOT`: override the corpus root directory
//! - `CONFORMANCE_RUNNER_REFERENCE`: override the reference interpreter command
//! - `CONFORMANCE_RUNNER_COMPILER`: override the compiler command
//! - `CONFORMANCE_RUNNER_INTERPRETER`: override the generated-code interpreter command
//! - `CONFORMANCE_RUNNER_ARTIFACT_DIR`: override the artifact directory
//! - `CONFORMANCE_RUNNER_VERBOSE`: enable verbose output (1/true/yes)

use super::Config;
use std::path::PathBuf;

const PREFIX: &str = "CONFORMANCE_RUNNER_";

/// Read the active profile name from `CONFORMANCE_RUNNER_PROFILE`.
pub fn get_profile_name() -> Option<String> {
    env_str("PROFILE")
}

/// Read an explicit configuration file path from `CONFORMANCE_RUNNER_CONFIG`.
pub fn get_config_path() -> Option<PathBuf> {
    env_str("CONFIG").map(PathBuf::from)
}

/// Apply individual env var overrides to a config.
///
/// Each override is applied only if the env var is set and parses correctly.
/// Invalid values are silently ignored.
pub fn apply_env_overrides(config: &mut Config) {
    if let Some(val) = env_parse::<u64>("TIMEOUT").filter(|&secs| secs > 0) {
        config.timeout = val;
    }

    if let Some(val) = env_str("CORPUS_ROOT") {
        config.corpus.root = PathBuf::from(val);
    }

    if let Some(val) = env_str("REFERENCE") {
        config.tools.reference = val;
    }

    if let Some(val) = env_str("COMPILER") {
        config.tools.compiler = val;
    }

    if let Some(val) = env_str("INTERPRETER") {
        config.tools.interpreter = val;
    }

    if let Some(val) = env_str("ARTIFACT_DIR") {
        config.artifacts.dir = PathBuf::from(val);
    }

    if let Some(val) = env_bool("VERBOSE") {
        config.verbose = val;
    }
}

/// Summarize which env var overrides are currently active.
///
/// Returns a list of `(env_var_name, value)` pairs.
pub fn detect_active_overrides() -> Vec<(String, String)> {
    let keys = [
        "CONFIG",
        "PROFILE",
        "TIMEOUT",
        "CORPUS_ROOT",
        "REFERENCE",
        "COMPILER",
        "INTERPRETER",
        "ARTIFACT_DIR",
        "VERBOSE",
    ];

    let mut active = Vec::new();
    for key in keys {
        let full = format!("{PREFIX}{key}");
        if let Ok(val) = std::env::var(&full) {
            if !val.is_empty() {
                active.push((full, val));
            }
        }
    }
    active
}

// --- helpers ---

fn env_str(suffix: &str) -> Option<String> {
    std::env::var(format!("{PREFIX}{suffix}"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn env_parse<T: std::str::FromStr>(suffix: &str) -> Option<T> {
    env_str(suffix).and_then(|s| s.parse().ok())
}

fn env_bool(suffix: &str) -> Option<bool> {
    env_str(suffix).map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
}
