use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::common::exit_code;

/// Outcome of running git in one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Exited with status 0
    Succeeded,
    /// Exited non-zero or was terminated by a signal
    Failed,
    /// The process could not be started
    NotStarted,
}

/// Output collected when running in capture mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}

/// Result of a single repository's git invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    /// Repository directory name
    pub name: String,

    /// Repository path, used as working directory
    pub path: PathBuf,

    pub status: DispatchStatus,

    /// Exit code, absent when killed by a signal or never started
    pub exit_code: Option<i32>,

    /// Captured output, absent when streamed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<CapturedOutput>,

    /// Why the invocation failed without an exit code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Wall time in milliseconds
    pub execution_time_ms: u64,
}

impl DispatchResult {
    /// Result of a process that ran to completion or was killed.
    pub fn completed(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        exit_code: Option<i32>,
        output: Option<CapturedOutput>,
        execution_time_ms: u64,
    ) -> Self {
        let status = if exit_code == Some(0) {
            DispatchStatus::Succeeded
        } else {
            DispatchStatus::Failed
        };
        Self {
            name: name.into(),
            path: path.into(),
            status,
            exit_code,
            output,
            error_message: None,
            execution_time_ms,
        }
    }

    /// Result of a process that could not be started.
    pub fn not_started(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        error: impl Into<String>,
        execution_time_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            status: DispatchStatus::NotStarted,
            exit_code: None,
            output: None,
            error_message: Some(error.into()),
            execution_time_ms,
        }
    }

    /// Attach an explanation, e.g. the signal that terminated the process.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, DispatchStatus::Succeeded)
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}

/// Aggregated results, in dispatch order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchReport {
    pub results: Vec<DispatchResult>,
    pub success_count: usize,
    pub failure_count: usize,
    pub total_execution_time_ms: u64,
}

impl DispatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: DispatchResult) {
        if result.is_success() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.total_execution_time_ms += result.execution_time_ms;
        self.results.push(result);
    }

    /// True when nothing failed, including when nothing was dispatched.
    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    pub fn failed_results(&self) -> Vec<&DispatchResult> {
        self.results.iter().filter(|r| r.is_failure()).collect()
    }

    /// Results grouped by exit code; `None` collects signals and start failures.
    pub fn by_exit_code(&self) -> BTreeMap<Option<i32>, Vec<&DispatchResult>> {
        let mut groups: BTreeMap<Option<i32>, Vec<&DispatchResult>> = BTreeMap::new();
        for result in &self.results {
            groups.entry(result.exit_code).or_default().push(result);
        }
        groups
    }

    /// Process exit status for this report.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            exit_code::SUCCESS
        } else {
            exit_code::DISPATCH_FAILED
        }
    }
}
