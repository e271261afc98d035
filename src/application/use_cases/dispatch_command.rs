use std::time::Instant;
use tracing::{debug, warn};

use crate::common::error::MgitError;
use crate::common::result::MgitResult;
use crate::domain::entities::{DispatchReport, DispatchResult, RepositoryCandidate};
use crate::infrastructure::process::{GitRunner, OutputMode, ProcessOutcome};

/// Dispatch settings
#[derive(Debug, Clone, Default)]
pub struct DispatchConfig {
    /// Arguments forwarded to git in every repository
    pub git_args: Vec<String>,

    /// Stream output or collect it into the results
    pub output_mode: OutputMode,
}

impl DispatchConfig {
    pub fn new<I, S>(git_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            git_args: git_args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_output_mode(mut self, output_mode: OutputMode) -> Self {
        self.output_mode = output_mode;
        self
    }
}

/// Progress callbacks, all optional
pub trait DispatchObserver {
    /// Once, before the first repository. `program` is the executable that
    /// will receive `git_args`.
    fn before_all(
        &self,
        _repositories: &[RepositoryCandidate],
        _program: &str,
        _git_args: &[String],
    ) {
    }

    /// Before git starts in `repository`.
    fn before_each(&self, _repository: &RepositoryCandidate) {}

    /// After git finished (or failed to start) in a repository.
    fn after_each(&self, _result: &DispatchResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl DispatchObserver for SilentObserver {}

/// Runs git in each repository, one after the other
pub struct DispatchCommandUseCase<'a> {
    config: DispatchConfig,
    runner: &'a dyn GitRunner,
    observer: &'a dyn DispatchObserver,
}

impl<'a> DispatchCommandUseCase<'a> {
    pub fn new(
        config: DispatchConfig,
        runner: &'a dyn GitRunner,
        observer: &'a dyn DispatchObserver,
    ) -> Self {
        Self {
            config,
            runner,
            observer,
        }
    }

    /// Every repository is attempted; failures only show up in the report.
    pub async fn execute(
        &self,
        repositories: &[RepositoryCandidate],
    ) -> MgitResult<DispatchReport> {
        self.validate_command()?;

        self.observer
            .before_all(repositories, self.runner.program(), &self.config.git_args);

        let mut report = DispatchReport::new();
        for repository in repositories {
            self.observer.before_each(repository);
            let result = self.dispatch_one(repository).await;
            self.observer.after_each(&result);
            report.add_result(result);
        }

        debug!(
            "Dispatched to {} repositories, {} failed",
            report.total_count(),
            report.failure_count
        );
        Ok(report)
    }

    fn validate_command(&self) -> MgitResult<()> {
        if self.config.git_args.is_empty() {
            return Err(MgitError::usage_error("no git command given"));
        }
        Ok(())
    }

    async fn dispatch_one(&self, repository: &RepositoryCandidate) -> DispatchResult {
        let start_time = Instant::now();
        let outcome = self
            .runner
            .run(
                &repository.path,
                &self.config.git_args,
                self.config.output_mode,
            )
            .await;
        let elapsed = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(outcome) => Self::to_result(repository, outcome, elapsed),
            Err(e) => {
                warn!("{}", e);
                DispatchResult::not_started(
                    &repository.name,
                    &repository.path,
                    e.to_string(),
                    elapsed,
                )
            }
        }
    }

    fn to_result(
        repository: &RepositoryCandidate,
        outcome: ProcessOutcome,
        elapsed: u64,
    ) -> DispatchResult {
        let result = DispatchResult::completed(
            &repository.name,
            &repository.path,
            outcome.exit_code,
            outcome.output,
            elapsed,
        );
        match outcome.signal {
            Some(signal) => result.with_error_message(format!("terminated by signal {}", signal)),
            None => result,
        }
    }
}
