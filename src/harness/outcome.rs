//! Closed outcome taxonomy for a single test case.

use serde::{Deserialize, Serialize};

/// Kind of a test outcome, rendered in SCREAMING_SNAKE_CASE (`DIFF_OUT`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Ok,
    DiffOut,
    Timeout,
    DiffExitCode,
    Skipped,
    InvalidInput,
    Internal,
    RuntimeError,
}

serde_plain::derive_display_from_serialize!(OutcomeKind);
serde_plain::derive_fromstr_from_deserialize!(OutcomeKind);

/// Result of comparing one test case. Exactly one is produced per case per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Compiler pipeline matched the expectation.
    Ok,
    /// Empty test file, never executed.
    Skipped,
    /// Malformed test corpus, e.g. a file name without an expected exit code.
    Internal { message: String },
    /// The harness itself failed on this case, e.g. a tool could not be
    /// spawned or the artifact could not be written. Reported as `INTERNAL`
    /// and counted as a failure.
    HarnessFault { message: String },
    /// The reference interpreter rejected the input.
    InvalidInput { message: String },
    /// A spawned process exceeded its time budget.
    Timeout { message: String },
    /// The compiler exit code differs from the one encoded in the file name.
    DiffExitCode {
        expected: i32,
        actual: i32,
        stderr: String,
    },
    /// The generated-code interpreter failed on an expected-success case.
    RuntimeError { exit_code: i32, stderr: String },
    /// Generated program output differs from the reference output.
    DiffOut { expected: String, actual: String },
}

impl Outcome {
    /// The kind tag of this outcome.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Outcome::Ok => OutcomeKind::Ok,
            Outcome::Skipped => OutcomeKind::Skipped,
            Outcome::Internal { .. } | Outcome::HarnessFault { .. } => OutcomeKind::Internal,
            Outcome::InvalidInput { .. } => OutcomeKind::InvalidInput,
            Outcome::Timeout { .. } => OutcomeKind::Timeout,
            Outcome::DiffExitCode { .. } => OutcomeKind::DiffExitCode,
            Outcome::RuntimeError { .. } => OutcomeKind::RuntimeError,
            Outcome::DiffOut { .. } => OutcomeKind::DiffOut,
        }
    }

    /// Human-readable diagnostic, if the outcome carries one.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Ok | Outcome::Skipped => None,
            Outcome::Internal { message }
            | Outcome::HarnessFault { message }
            | Outcome::InvalidInput { message }
            | Outcome::Timeout { message } => Some(message.clone()),
            Outcome::DiffExitCode {
                expected,
                actual,
                stderr,
            } => Some(with_stderr(
                format!("Expected exit code {expected}, compiler returned {actual}"),
                stderr,
            )),
            Outcome::RuntimeError { exit_code, stderr } => Some(with_stderr(
                format!("Interpreter returned exit code {exit_code}"),
                stderr,
            )),
            Outcome::DiffOut { .. } => Some("Output differs from reference interpreter".to_string()),
        }
    }

    /// Whether this outcome counts as a failed test.
    ///
    /// Skipped cases and corpus naming errors are reported but never fail
    /// the run; harness faults do.
    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            Outcome::Ok | Outcome::Skipped | Outcome::Internal { .. }
        )
    }
}

fn with_stderr(mut message: String, stderr: &str) -> String {
    let stderr = stderr.trim_end();
    if !stderr.is_empty() {
        message.push('\n');
        message.push_str(stderr);
    }
    message
}
