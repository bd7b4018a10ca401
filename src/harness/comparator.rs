//! Differential comparison of one test case.
//!
//! Sequence per case, terminal on the first mismatch:
//! `reference → compiler → (expected success only) generated-code interpreter`.

use super::outcome::Outcome;
use crate::core::context::Context;
use crate::core::error::Error;
use crate::corpus::TestCase;
use crate::runner::{ExecutionResult, Invocation, ToolRunner};
use crate::util::TemplateProcessor;
use std::path::PathBuf;

/// Which external tool a step invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    Reference,
    Compiler,
    Interpreter,
}

impl Tool {
    fn name(self) -> &'static str {
        match self {
            Tool::Reference => "reference interpreter",
            Tool::Compiler => "compiler",
            Tool::Interpreter => "generated-code interpreter",
        }
    }
}

/// Runs the three tools for a test case and classifies the result.
pub struct Comparator<'a> {
    ctx: &'a Context,
    runner: &'a dyn ToolRunner,
}

/// Early exit of the comparison; the carried outcome is final.
type Step<T> = std::result::Result<T, Outcome>;

impl<'a> Comparator<'a> {
    /// Create a comparator running tools through `runner`.
    pub fn new(ctx: &'a Context, runner: &'a dyn ToolRunner) -> Self {
        Self { ctx, runner }
    }

    /// Compare one test case. Always produces exactly one outcome.
    pub fn compare(&self, case: &TestCase) -> Outcome {
        self.evaluate(case).unwrap_or_else(|outcome| outcome)
    }

    fn evaluate(&self, case: &TestCase) -> Step<Outcome> {
        match case.is_empty() {
            Ok(true) => return Ok(Outcome::Skipped),
            Ok(false) => {}
            Err(e) => return Err(fault(e)),
        }

        let expected_rc = case
            .expected_exit_code(self.ctx.config.corpus.separator)
            .map_err(internal)?;

        let artifact = self.ctx.artifact_path(case);
        let vars = self.ctx.case_vars(case, &artifact);
        let tools = &self.ctx.config.tools;

        // The reference run is unconditional; its exit code is informational only.
        let reference = self.spawn(
            Tool::Reference,
            TemplateProcessor::process(&tools.reference, &vars),
            case.input.clone(),
        )?;
        tracing::debug!(case = %case.file_name, ref_rc = reference.exit_code, "reference finished");

        let compiled = self.spawn(
            Tool::Compiler,
            TemplateProcessor::process(&tools.compiler, &vars),
            Some(case.source.clone()),
        )?;

        std::fs::write(&artifact, &compiled.stdout).map_err(|e| Outcome::HarnessFault {
            message: format!("failed to write artifact {}: {}", artifact.display(), e),
        })?;

        if compiled.exit_code != expected_rc {
            return Ok(Outcome::DiffExitCode {
                expected: expected_rc,
                actual: compiled.exit_code,
                stderr: compiled.stderr_text(),
            });
        }

        // Expected compile-time failure matched; nothing further is under test.
        if expected_rc != 0 {
            return Ok(Outcome::Ok);
        }

        let interpreted = self.spawn(
            Tool::Interpreter,
            TemplateProcessor::process(&tools.interpreter, &vars),
            case.input.clone(),
        )?;

        if interpreted.exit_code != 0 {
            return Ok(Outcome::RuntimeError {
                exit_code: interpreted.exit_code,
                stderr: interpreted.stderr_text(),
            });
        }

        // Raw bytes: distinct invalid UTF-8 sequences decode to the same text.
        if reference.stdout != interpreted.stdout {
            return Ok(Outcome::DiffOut {
                expected: reference.stdout_text(),
                actual: interpreted.stdout_text(),
            });
        }

        Ok(Outcome::Ok)
    }

    /// Run one tool. Timeouts and spawn failures end the comparison.
    fn spawn(
        &self,
        tool: Tool,
        command: String,
        stdin: Option<PathBuf>,
    ) -> Step<ExecutionResult> {
        let timeout = self.ctx.config.timeout();
        let invocation = Invocation::new(command, timeout).with_stdin(stdin);

        let result = self.runner.run(&invocation).map_err(|e| Outcome::HarnessFault {
            message: format!("{} could not be run: {}", tool.name(), e),
        })?;

        if result.timed_out {
            return Err(Outcome::Timeout {
                message: Error::timeout(invocation.command, timeout).to_string(),
            });
        }

        Ok(result)
    }
}

fn internal(err: Error) -> Outcome {
    Outcome::Internal {
        message: err.to_string(),
    }
}

fn fault(err: Error) -> Outcome {
    Outcome::HarnessFault {
        message: err.to_string(),
    }
}
