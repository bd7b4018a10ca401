use crate::config::{ARTIFACT_VAR, Config, SOURCE_VAR};
use crate::core::error::Result;
use crate::corpus::TestCase;
use crate::util::{ensure_dir_exists, shell_quote};
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// Context object that carries resolved paths and settings through a run.
pub struct Context {
    /// Configuration.
    pub config: Config,

    /// Directory the run is anchored to; relative config paths resolve against it.
    pub working_dir: PathBuf,

    /// Absolute path of the corpus root.
    pub corpus_root: PathBuf,

    /// Absolute path of the directory receiving compiler artifacts.
    pub artifact_dir: PathBuf,

    /// Variables available to every tool command.
    pub template_vars: HashMap<String, String>,
}

impl Context {
    /// Create a new context from configuration and a working directory.
    pub fn new(config: Config, working_dir: PathBuf) -> Result<Self> {
        config.validate()?;

        let corpus_root = resolve(&working_dir, &config.corpus.root);
        let artifact_dir = resolve(&working_dir, &config.artifacts.dir);

        ensure_dir_exists(&artifact_dir)?;

        let mut ctx = Self {
            config,
            working_dir,
            corpus_root,
            artifact_dir,
            template_vars: HashMap::new(),
        };

        ctx.init_template_vars();

        Ok(ctx)
    }

    /// Initialize run-wide template variables.
    fn init_template_vars(&mut self) {
        self.template_vars.insert(
            "WORKING_DIR".to_string(),
            shell_quote(&self.working_dir.display().to_string()),
        );
        self.template_vars.insert(
            "CORPUS_ROOT".to_string(),
            shell_quote(&self.corpus_root.display().to_string()),
        );
    }

    /// Path of the compiler artifact for a test case.
    pub fn artifact_path(&self, case: &TestCase) -> PathBuf {
        case.artifact_path(&self.artifact_dir, &self.config.artifacts.prefix)
    }

    /// Template variables for one test case, layered over the run-wide ones.
    pub fn case_vars(&self, case: &TestCase, artifact: &Path) -> HashMap<String, String> {
        let mut vars = self.template_vars.clone();
        vars.insert(
            SOURCE_VAR.to_string(),
            shell_quote(&case.source.display().to_string()),
        );
        vars.insert(
            ARTIFACT_VAR.to_string(),
            shell_quote(&artifact.display().to_string()),
        );
        vars
    }
}

/// Join `path` onto `base`, dropping `.` components.
fn resolve(base: &Path, path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .fold(base.to_path_buf(), |acc, c| acc.join(c))
}
