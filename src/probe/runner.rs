//! External command execution seam.
//!
//! The `CommandRunner` trait abstracts process execution so the invoker and
//! dispatcher can be tested against a fake runner. The real implementation
//! wraps `tokio::process` with an optional per-invocation timeout.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;

/// Error type for a single command invocation.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to launch: {0}")]
    Launch(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

/// Captured output of a completed command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// True when the process exited with status zero.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Trait for executing external commands.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, waiting for it to exit.
    ///
    /// With a timeout, a command still running when the limit expires is
    /// killed and reported as `RunnerError::TimedOut`.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunnerError>;
}

/// Runner backed by real child processes.
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, RunnerError> {
        let mut cmd = tokio::process::Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the future on timeout must not leave the child running
            .kill_on_drop(true);

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, cmd.output())
                .await
                .map_err(|_| RunnerError::TimedOut(limit))??,
            None => cmd.output().await?,
        };

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
pub mod testing {
    //! Fake runner for dispatcher and pipeline tests.

    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::sync::Mutex;

    /// Records every invocation; output and failures are scripted per test.
    pub struct FakeRunner {
        /// (program, args) in invocation order.
        pub invocations: Mutex<Vec<(String, Vec<String>)>>,
        /// Any argv element in this set makes the invocation fail to launch.
        pub fail_on: Vec<String>,
        /// Any argv element in this set makes the invocation time out.
        pub time_out_on: Vec<String>,
        /// Canned stdout per program; default echoes the argv.
        pub stdout: HashMap<String, Vec<u8>>,
    }

    impl FakeRunner {
        pub fn new() -> Self {
            Self {
                invocations: Mutex::new(Vec::new()),
                fail_on: Vec::new(),
                time_out_on: Vec::new(),
                stdout: HashMap::new(),
            }
        }

        pub fn with_stdout(mut self, program: &str, body: &str) -> Self {
            self.stdout.insert(program.to_string(), body.as_bytes().to_vec());
            self
        }

        pub fn recorded(&self) -> Vec<(String, Vec<String>)> {
            self.invocations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(
            &self,
            program: &str,
            args: &[String],
            _timeout: Option<Duration>,
        ) -> Result<CommandOutput, RunnerError> {
            self.invocations
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));

            if args.iter().any(|a| self.fail_on.contains(a)) {
                return Err(RunnerError::Launch(io::Error::new(
                    io::ErrorKind::NotFound,
                    "missing binary",
                )));
            }
            if args.iter().any(|a| self.time_out_on.contains(a)) {
                return Err(RunnerError::TimedOut(Duration::from_secs(1)));
            }

            let stdout = self
                .stdout
                .get(program)
                .cloned()
                .unwrap_or_else(|| format!("{} {}\n", program, args.join(" ")).into_bytes());

            Ok(CommandOutput {
                status: Some(0),
                stdout,
                stderr: Vec::new(),
            })
        }
    }
}
