use super::Config;
use crate::core::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "conformance-runner.toml";

/// Configuration loader that supports multiple sources.
pub struct ConfigLoader {
    /// Directory searched for the default configuration file.
    working_dir: Option<PathBuf>,
    /// Path to standalone config file.
    config_file: Option<PathBuf>,
    /// Whether to apply `CONFORMANCE_RUNNER_*` overrides.
    use_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            working_dir: None,
            config_file: None,
            use_env: true,
        }
    }

    /// Set the directory searched for `conformance-runner.toml`.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Set a standalone configuration file path. The file must exist.
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Ignore environment variables (file path, profile and overrides).
    pub fn no_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    /// Load configuration from all enabled sources.
    ///
    /// Priority (later sources override earlier):
    /// 1. Default values
    /// 2. Standalone TOML file (explicit, `CONFORMANCE_RUNNER_CONFIG`, or
    ///    `conformance-runner.toml` in the working directory)
    /// 3. Profile overlay (`CONFORMANCE_RUNNER_PROFILE`)
    /// 4. Individual env var overrides (`CONFORMANCE_RUNNER_*`)
    pub fn load(self) -> Result<Config> {
        let mut config = Config::default();
        let mut profiles: HashMap<String, serde_json::Value> = HashMap::new();

        if let Some(path) = self.resolve_config_file()? {
            tracing::debug!(path = %path.display(), "loading configuration file");
            let (file_config, file_profiles) = Self::load_toml_file(&path)?;
            config = file_config;
            profiles = file_profiles;
        }

        if self.use_env {
            if let Some(profile_name) = super::env::get_profile_name() {
                config = apply_profile(config, &profiles, &profile_name)?;
            }

            super::env::apply_env_overrides(&mut config);
        }

        config.validate()?;
        Ok(config)
    }

    /// Pick the configuration file to read, if any.
    fn resolve_config_file(&self) -> Result<Option<PathBuf>> {
        let explicit = self.config_file.clone().or_else(|| {
            if self.use_env {
                super::env::get_config_path()
            } else {
                None
            }
        });

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(Error::FileNotFound(path));
            }
            return Ok(Some(path));
        }

        let dir = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        Ok(candidate.is_file().then_some(candidate))
    }

    /// Load configuration and its `[profiles.*]` tables from a TOML file.
    fn load_toml_file(path: &Path) -> Result<(Config, HashMap<String, serde_json::Value>)> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("failed to read config file: {}", e)))?;

        let raw: toml::Value = toml::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse TOML config: {}", e)))?;

        let mut profiles = HashMap::new();
        extract_profiles(&serde_json::to_value(&raw)?, &mut profiles);

        let config = raw
            .try_into::<Config>()
            .map_err(|e| Error::config(format!("invalid config file {}: {}", path.display(), e)))?;

        Ok((config, profiles))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay the named profile onto `config`.
fn apply_profile(
    config: Config,
    profiles: &HashMap<String, serde_json::Value>,
    profile_name: &str,
) -> Result<Config> {
    let profile_value = profiles.get(profile_name).ok_or_else(|| {
        let mut available: Vec<&str> = profiles.keys().map(|s| s.as_str()).collect();
        available.sort_unstable();
        if available.is_empty() {
            Error::config(format!(
                "profile '{}' not found (no profiles defined)",
                profile_name,
            ))
        } else {
            Error::config(format!(
                "profile '{}' not found. Available profiles: {}",
                profile_name,
                available.join(", "),
            ))
        }
    })?;

    let mut base_value = serde_json::to_value(&config)
        .map_err(|e| Error::config(format!("failed to serialize config: {}", e)))?;
    deep_merge(&mut base_value, profile_value);
    serde_json::from_value(base_value)
        .map_err(|e| Error::config(format!("failed to apply profile '{}': {}", profile_name, e)))
}

/// Extract profile definitions from a parsed configuration value.
///
/// Profiles live at `value["profiles"]` as `{ name: { ...config fields... } }`.
fn extract_profiles(
    value: &serde_json::Value,
    profiles: &mut HashMap<String, serde_json::Value>,
) {
    if let Some(serde_json::Value::Object(map)) = value.get("profiles") {
        for (name, profile_value) in map {
            profiles.insert(name.clone(), profile_value.clone());
        }
    }
}

/// Recursively deep-merge `overlay` into `base`.
///
/// - Objects: keys are merged recursively (overlay keys win for conflicts).
/// - Scalars and arrays: overlay replaces base entirely.
pub(crate) fn deep_merge(base: &mut serde_json::Value, overlay: &serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let entry = base_map
                    .entry(key.clone())
                    .or_insert(serde_json::Value::Null);
                deep_merge(entry, overlay_val);
            }
        }
        (base, overlay) => {
            *base = overlay.clone();
        }
    }
}
