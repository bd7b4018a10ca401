use super::{ExecutionResult, Invocation, ToolRunner};
use crate::core::error::{Error, Result};
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Instant;

/// Runs invocations through the platform shell (`sh -c` / `cmd /C`).
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    /// Create a shell runner that inherits the current working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands from `dir` instead of the current working directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
        }
    }

    fn shell_command(command: &str) -> Command {
        #[cfg(unix)]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
        #[cfg(not(unix))]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }
    }
}

impl ToolRunner for ShellRunner {
    fn run(&self, invocation: &Invocation) -> Result<ExecutionResult> {
        let mut cmd = Self::shell_command(&invocation.command);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let stdin = match &invocation.stdin {
            Some(path) => Stdio::from(File::open(path).map_err(|e| {
                Error::runner(format!("failed to open stdin file {}: {}", path.display(), e))
            })?),
            None => Stdio::null(),
        };
        cmd.stdin(stdin);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        // Own process group, so a timeout also takes down whatever the shell started.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        tracing::debug!(command = %invocation.command, stdin = ?invocation.stdin, "spawning");
        let started = Instant::now();

        let child = cmd.spawn().map_err(|e| {
            Error::runner(format!("failed to execute '{}': {}", invocation.command, e))
        })?;

        // Timeout watchdog: fires unless the main thread reports completion first.
        let timed_out = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let watchdog = {
            let flag = timed_out.clone();
            let child_id = child.id();
            let timeout = invocation.timeout;
            std::thread::spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(timeout) {
                    flag.store(true, Ordering::SeqCst);
                    kill_process_tree(child_id);
                }
            })
        };

        // Reaps the child, so a killed process never lingers as a zombie.
        let output = child.wait_with_output();
        let _ = done_tx.send(());
        let _ = watchdog.join();

        let output = output.map_err(|e| {
            Error::runner(format!("failed to wait for '{}': {}", invocation.command, e))
        })?;

        let exit_code = exit_code(&output.status);
        let mut result = ExecutionResult::new(exit_code).with_output(output.stdout, output.stderr);

        if timed_out.load(Ordering::SeqCst) {
            tracing::warn!(
                command = %invocation.command,
                timeout_secs = invocation.timeout.as_secs(),
                "process timed out and was killed"
            );
            result = result.with_timeout();
        } else {
            tracing::debug!(
                command = %invocation.command,
                exit_code,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "process finished"
            );
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "shell"
    }
}

/// Exit code of a finished process, or the negated signal number if killed.
fn exit_code(status: &ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}

fn kill_process_tree(child_id: u32) {
    #[cfg(unix)]
    {
        let pgid = child_id as libc::pid_t;
        unsafe {
            libc::kill(-pgid, libc::SIGKILL);
            libc::kill(pgid, libc::SIGKILL);
        }
    }
    #[cfg(not(unix))]
    {
        let _ = Command::new("taskkill")
            .args(["/F", "/T", "/PID", &child_id.to_string()])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
    }
}
