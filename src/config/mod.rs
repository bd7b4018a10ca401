//! Configuration types and loading from `conformance-runner.toml` and the environment.
//!
//! Every field has a default, so an absent configuration file reproduces the
//! corpus conventions: suites under `example-code/`, `.tl` sources, `.txt`
//! companion inputs, `<code>_` name prefixes, a 3 second budget per process and
//! `out_<file>` artifacts in the working directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{Error, Result};

pub mod env;
mod loader;
pub use loader::ConfigLoader;

/// Placeholder substituted with the test source path in tool commands.
pub const SOURCE_VAR: &str = "SOURCE";

/// Placeholder substituted with the compiler artifact path in tool commands.
pub const ARTIFACT_VAR: &str = "ARTIFACT";

/// Complete configuration for a conformance run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Test corpus layout.
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// Compiler artifact placement.
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// External tool command templates.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Wall-clock budget in seconds for each spawned process.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Enable verbose output (debug-level logging of every spawned command).
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// The per-process timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Reject values that would make every run meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.timeout == 0 {
            return Err(Error::InvalidConfig {
                field: "timeout".to_string(),
                value: "0".to_string(),
            });
        }
        if self.corpus.source_extension.is_empty() {
            return Err(Error::InvalidConfig {
                field: "corpus.source-extension".to_string(),
                value: String::new(),
            });
        }
        if self.corpus.input_extension == self.corpus.source_extension {
            return Err(Error::InvalidConfig {
                field: "corpus.input-extension".to_string(),
                value: self.corpus.input_extension.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            artifacts: ArtifactConfig::default(),
            tools: ToolsConfig::default(),
            timeout: default_timeout(),
            verbose: false,
        }
    }
}

fn default_timeout() -> u64 {
    3
}

/// Test corpus layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding one subdirectory per suite.
    pub root: PathBuf,

    /// Extension (without the dot) of test source files.
    #[serde(rename = "source-extension")]
    pub source_extension: String,

    /// Extension (without the dot) of companion stdin files.
    #[serde(rename = "input-extension")]
    pub input_extension: String,

    /// Character ending the expected exit code prefix of a file name.
    pub separator: char,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("example-code"),
            source_extension: "tl".to_string(),
            input_extension: "txt".to_string(),
            separator: '_',
        }
    }
}

/// Where compiler output artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory for `out_<file>` artifacts, relative to the working directory.
    pub dir: PathBuf,

    /// File name prefix for artifacts.
    pub prefix: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            prefix: "out_".to_string(),
        }
    }
}

/// Shell command templates for the three external tools.
///
/// `{{SOURCE}}` expands to the test source path, `{{ARTIFACT}}` to the
/// compiler output artifact path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Reference interpreter, run on the test source.
    pub reference: String,

    /// Compiler under test, fed the test source on stdin.
    pub compiler: String,

    /// Generated-code interpreter, run on the compiler artifact.
    pub interpreter: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            reference: "tl run {{SOURCE}}".to_string(),
            compiler: "../../ifj21".to_string(),
            interpreter: "./ic21int {{ARTIFACT}}".to_string(),
        }
    }
}
