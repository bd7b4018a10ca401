//! Runner trait and shell implementation for executing the external tools.
//!
//! The reference interpreter, the compiler under test and the generated-code
//! interpreter are all driven through the same [`ToolRunner`] capability; the
//! call sites differ only in the command and stdin they pass.

use crate::core::error::Result;
use std::path::PathBuf;
use std::time::Duration;

mod shell;

pub use shell::ShellRunner;

/// One external command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Shell command line.
    pub command: String,
    /// File redirected to the command's standard input.
    pub stdin: Option<PathBuf>,
    /// Wall-clock budget measured from process start.
    pub timeout: Duration,
}

impl Invocation {
    /// Create an invocation with no stdin redirection.
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            stdin: None,
            timeout,
        }
    }

    /// Redirect `path` to the command's standard input.
    pub fn with_stdin(mut self, path: Option<PathBuf>) -> Self {
        self.stdin = path;
        self
    }
}

/// Runner trait for executing external commands with a timeout.
pub trait ToolRunner {
    /// Execute the command and capture its output.
    ///
    /// A timeout is not an error: it is reported through
    /// [`ExecutionResult::timed_out`]. Errors are reserved for failures to
    /// start or wait on the process.
    fn run(&self, invocation: &Invocation) -> Result<ExecutionResult>;

    /// Get a human-readable name for this runner.
    fn name(&self) -> &str;
}

/// Captured result of one external process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Captured standard output bytes.
    pub stdout: Vec<u8>,

    /// Captured standard error bytes.
    pub stderr: Vec<u8>,

    /// Exit code of the process; negative signal number when killed by a signal.
    pub exit_code: i32,

    /// Whether the run was terminated due to a timeout.
    pub timed_out: bool,
}

impl ExecutionResult {
    /// Create a result with the given exit code and no output.
    pub fn new(exit_code: i32) -> Self {
        Self {
            exit_code,
            ..Self::default()
        }
    }

    /// Attach captured output to the result.
    pub fn with_output(mut self, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self.stderr = stderr.into();
        self
    }

    /// Mark the result as timed out.
    pub fn with_timeout(mut self) -> Self {
        self.timed_out = true;
        self
    }

    /// Standard output decoded as text.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error decoded as text.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_result_builders() {
        let result = ExecutionResult::new(2).with_output("out", "err");
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.stdout_text(), "out");
        assert_eq!(result.stderr_text(), "err");
        assert!(!result.timed_out);
        assert!(result.with_timeout().timed_out);
    }

    #[test]
    fn test_execution_result_lossy_decoding() {
        let result = ExecutionResult::new(0).with_output(vec![b'H', 0xff, b'i'], Vec::new());
        assert_eq!(result.stdout_text(), "H\u{fffd}i");
    }

    #[test]
    fn test_invocation_with_stdin() {
        let inv = Invocation::new("cat", Duration::from_secs(3))
            .with_stdin(Some(PathBuf::from("in.txt")));
        assert_eq!(inv.command, "cat");
        assert_eq!(inv.stdin, Some(PathBuf::from("in.txt")));
        assert_eq!(inv.timeout, Duration::from_secs(3));
    }
}
