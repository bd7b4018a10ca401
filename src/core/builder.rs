use crate::config::{Config, ConfigLoader};
use crate::core::context::Context;
use crate::core::error::{Error, Result};
use crate::harness::{ResultFormatter, RunSummary, TestHarness};
use crate::runner::{ShellRunner, ToolRunner};
use std::io::Write;
use std::path::PathBuf;

/// Builder for creating and running a conformance run.
pub struct ConformanceRunnerBuilder {
    config: Option<Config>,
    working_dir: Option<PathBuf>,
    runner: Option<Box<dyn ToolRunner>>,
}

impl ConformanceRunnerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            working_dir: None,
            runner: None,
        }
    }

    /// Set the configuration directly.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from `conformance-runner.toml` and `CONFORMANCE_RUNNER_*` variables.
    pub fn load_config(mut self) -> Result<Self> {
        let mut loader = ConfigLoader::new();
        if let Some(dir) = &self.working_dir {
            loader = loader.working_dir(dir);
        }
        self.config = Some(loader.load()?);
        Ok(self)
    }

    /// Load configuration from a standalone TOML file (environment overrides still apply).
    pub fn from_config_file(mut self, path: impl Into<PathBuf>) -> Result<Self> {
        self.config = Some(ConfigLoader::new().config_file(path).load()?);
        Ok(self)
    }

    /// Set the working directory; defaults to the process's current directory.
    pub fn working_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(path.into());
        self
    }

    /// Set a custom tool runner implementation.
    pub fn runner<R: ToolRunner + 'static>(mut self, runner: R) -> Self {
        self.runner = Some(Box::new(runner));
        self
    }

    /// Build the conformance runner.
    pub fn build(self) -> Result<ConformanceRunner> {
        let config = self.config.ok_or_else(|| Error::config("no configuration provided"))?;

        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        // Shell runner from the working directory if not explicitly set
        let runner = match self.runner {
            Some(r) => r,
            None => Box::new(ShellRunner::in_dir(&working_dir)),
        };

        let ctx = Context::new(config, working_dir)?;

        Ok(ConformanceRunner { ctx, runner })
    }

    /// Build and immediately run, printing to stdout.
    pub fn run(self) -> Result<RunSummary> {
        self.build()?.run()
    }
}

impl Default for ConformanceRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Conformance runner that executes every suite of a corpus.
pub struct ConformanceRunner {
    ctx: Context,
    runner: Box<dyn ToolRunner>,
}

impl ConformanceRunner {
    /// Resolved run context.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run all suites, printing the report to stdout.
    pub fn run(&self) -> Result<RunSummary> {
        let (summary, _) = self.run_with_writer(std::io::stdout())?;
        Ok(summary)
    }

    /// Run all suites, writing the report to `out`. Returns the writer back.
    pub fn run_with_writer<W: Write>(&self, out: W) -> Result<(RunSummary, W)> {
        tracing::debug!(
            runner = self.runner.name(),
            corpus = %self.ctx.corpus_root.display(),
            timeout_secs = self.ctx.config.timeout,
            "starting conformance run"
        );

        let mut harness = TestHarness::new(&self.ctx, self.runner.as_ref(), ResultFormatter::new(out));
        let summary = harness.run()?;
        Ok((summary, harness.into_writer()))
    }
}
