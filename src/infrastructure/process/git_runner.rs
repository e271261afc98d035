use async_trait::async_trait;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::warn;

use crate::common::error::MgitError;
use crate::common::result::MgitResult;
use crate::domain::entities::CapturedOutput;

/// What happens to the child's stdout and stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Forward to our own standard streams as it is produced
    #[default]
    Inherit,
    /// Collect and hand back with the outcome
    Capture,
    /// Forward both streams to our stderr, leaving stdout to the caller
    ToStderr,
}

/// How a git process ended
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutcome {
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub output: Option<CapturedOutput>,
}

impl ProcessOutcome {
    pub fn exited(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            ..Default::default()
        }
    }

    pub fn with_output(mut self, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        self.output = Some(CapturedOutput {
            stdout: stdout.into(),
            stderr: stderr.into(),
        });
        self
    }

    fn from_status(status: ExitStatus) -> Self {
        Self {
            exit_code: status.code(),
            signal: signal_of(&status),
            output: None,
        }
    }
}

/// Runs git for one repository
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run with `working_dir` as the process working directory and `args`
    /// as argv, unchanged. Fails only when the process cannot be started.
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        mode: OutputMode,
    ) -> MgitResult<ProcessOutcome>;

    /// Executable name, for display.
    fn program(&self) -> &str;
}

/// Spawns the git executable found on `PATH` (or a configured one)
#[derive(Debug, Clone)]
pub struct SystemGitRunner {
    git_executable: String,
}

impl Default for SystemGitRunner {
    fn default() -> Self {
        Self {
            git_executable: "git".to_string(),
        }
    }
}

impl SystemGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bare name is looked up on `PATH`; a path with a directory part is
    /// made absolute against the current directory, since each child runs
    /// inside a repository.
    pub fn with_executable(executable: impl Into<String>) -> Self {
        let executable = executable.into();
        let git_executable = match std::env::current_dir() {
            Ok(cwd) => resolve_executable(&executable, &cwd),
            Err(e) => {
                warn!("Cannot read current directory, using '{}' as is: {}", executable, e);
                executable
            }
        };
        Self { git_executable }
    }

    fn command(&self, working_dir: &Path, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.git_executable);
        cmd.args(args).current_dir(working_dir).stdin(Stdio::inherit());
        cmd
    }
}

#[async_trait]
impl GitRunner for SystemGitRunner {
    async fn run(
        &self,
        working_dir: &Path,
        args: &[String],
        mode: OutputMode,
    ) -> MgitResult<ProcessOutcome> {
        let mut cmd = self.command(working_dir, args);
        let spawn_error = |e: std::io::Error| {
            MgitError::command_error_with_source(
                format!(
                    "failed to start '{}' in {}",
                    self.git_executable,
                    working_dir.display()
                ),
                format!("{} {}", self.git_executable, args.join(" ")),
                e,
            )
        };

        match mode {
            OutputMode::Inherit => {
                let status = cmd
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(spawn_error)?;
                Ok(ProcessOutcome::from_status(status))
            }
            OutputMode::ToStderr => {
                let status = cmd
                    .stdout(std::io::stderr())
                    .stderr(Stdio::inherit())
                    .status()
                    .await
                    .map_err(spawn_error)?;
                Ok(ProcessOutcome::from_status(status))
            }
            OutputMode::Capture => {
                let output = cmd.output().await.map_err(spawn_error)?;
                Ok(ProcessOutcome::from_status(output.status).with_output(
                    String::from_utf8_lossy(&output.stdout),
                    String::from_utf8_lossy(&output.stderr),
                ))
            }
        }
    }

    fn program(&self) -> &str {
        &self.git_executable
    }
}

fn resolve_executable(executable: &str, cwd: &Path) -> String {
    let path = Path::new(executable);
    if path.is_absolute() || path.components().count() <= 1 {
        return executable.to_string();
    }
    cwd.join(path).to_string_lossy().into_owned()
}

#[cfg(unix)]
fn signal_of(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: &ExitStatus) -> Option<i32> {
    None
}
