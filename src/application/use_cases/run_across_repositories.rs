use std::path::PathBuf;
use tracing::info;

use crate::application::services::Confirmer;
use crate::application::use_cases::discover_repositories::{
    DiscoverRepositoriesUseCase, RepositorySelection,
};
use crate::application::use_cases::dispatch_command::{
    DispatchCommandUseCase, DispatchConfig, DispatchObserver,
};
use crate::application::use_cases::resolve_filter::{FilterOptions, ResolveFilterUseCase};
use crate::common::error::MgitError;
use crate::common::result::MgitResult;
use crate::domain::entities::{DispatchReport, FilterPolicy, RepositoryCandidate};
use crate::infrastructure::filesystem::RepositoryLister;
use crate::infrastructure::process::GitRunner;

/// Everything one mgit run needs to know
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Scan roots, in command-line order
    pub roots: Vec<PathBuf>,
    pub filter: FilterOptions,
    pub dispatch: DispatchConfig,
}

impl RunConfig {
    /// Run in the current directory with no filtering flags.
    pub fn new(dispatch: DispatchConfig) -> Self {
        Self {
            roots: vec![PathBuf::from(".")],
            filter: FilterOptions::default(),
            dispatch,
        }
    }

    /// Replace the roots; an empty list keeps the current directory.
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        if !roots.is_empty() {
            self.roots = roots;
        }
        self
    }

    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }
}

/// Outcome of a run that got as far as dispatching
#[derive(Debug, Clone)]
pub struct RunResult {
    pub selections: Vec<RepositorySelection>,
    pub report: DispatchReport,
}

/// Resolves filtering, asks for confirmation, discovers and then dispatches
pub struct RunAcrossRepositoriesUseCase<'a> {
    config: RunConfig,
    lister: &'a dyn RepositoryLister,
    runner: &'a dyn GitRunner,
    confirmer: &'a dyn Confirmer,
    observer: &'a dyn DispatchObserver,
}

impl<'a> RunAcrossRepositoriesUseCase<'a> {
    pub fn new(
        config: RunConfig,
        lister: &'a dyn RepositoryLister,
        runner: &'a dyn GitRunner,
        confirmer: &'a dyn Confirmer,
        observer: &'a dyn DispatchObserver,
    ) -> Self {
        Self {
            config,
            lister,
            runner,
            confirmer,
            observer,
        }
    }

    /// Every root is resolved and discovered before the first git process
    /// starts, so configuration, discovery and confirmation problems leave
    /// all repositories untouched.
    pub async fn execute(&self) -> MgitResult<RunResult> {
        let selections = self.select_all()?;

        let repositories: Vec<RepositoryCandidate> = selections
            .iter()
            .flat_map(|selection| selection.selected.iter().cloned())
            .collect();
        info!(
            "Running git {} in {} repositories",
            self.config.dispatch.git_args.join(" "),
            repositories.len()
        );

        let dispatcher =
            DispatchCommandUseCase::new(self.config.dispatch.clone(), self.runner, self.observer);
        let report = dispatcher.execute(&repositories).await?;

        Ok(RunResult { selections, report })
    }

    fn select_all(&self) -> MgitResult<Vec<RepositorySelection>> {
        let resolver = ResolveFilterUseCase::new(self.config.filter.clone());
        let discoverer = DiscoverRepositoriesUseCase::new(self.lister);

        let mut selections = Vec::with_capacity(self.config.roots.len());
        for root in &self.config.roots {
            let policy = resolver.execute(root)?;
            self.confirm_policy(root, &policy)?;
            selections.push(discoverer.execute(root, policy)?);
        }
        Ok(selections)
    }

    fn confirm_policy(&self, root: &std::path::Path, policy: &FilterPolicy) -> MgitResult<()> {
        if !policy.requires_confirmation() {
            return Ok(());
        }
        let message = format!(
            "default filtering file found in '{}', continue?",
            root.display()
        );
        if self.confirmer.confirm(&message)? {
            Ok(())
        } else {
            Err(MgitError::confirmation_declined(root))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::confirmation::MockConfirmer;
    use crate::application::use_cases::dispatch_command::SilentObserver;
    use crate::infrastructure::filesystem::{
        FsRepositoryLister, DEFAULT_FILTER_FILE_NAME, GIT_MARKER,
    };
    use crate::infrastructure::process::{OutputMode, ProcessOutcome};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        dirs: Mutex<Vec<String>>,
    }

    impl RecordingRunner {
        fn dirs(&self) -> Vec<String> {
            self.dirs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GitRunner for RecordingRunner {
        async fn run(
            &self,
            working_dir: &Path,
            _: &[String],
            _: OutputMode,
        ) -> MgitResult<ProcessOutcome> {
            let name = working_dir.file_name().unwrap().to_string_lossy().into_owned();
            let code = if name.starts_with("fail") { 1 } else { 0 };
            self.dirs.lock().unwrap().push(name);
            Ok(ProcessOutcome::exited(code))
        }

        fn program(&self) -> &str {
            "git"
        }
    }

    fn workspace(repos: &[&str], dotfile: Option<&str>) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in repos {
            fs::create_dir_all(temp_dir.path().join(name).join(GIT_MARKER)).unwrap();
        }
        fs::create_dir_all(temp_dir.path().join("notes")).unwrap();
        if let Some(content) = dotfile {
            fs::write(temp_dir.path().join(DEFAULT_FILTER_FILE_NAME), content).unwrap();
        }
        temp_dir
    }

    fn config(root: &Path, filter: FilterOptions) -> RunConfig {
        RunConfig::new(DispatchConfig::new(["status"]))
            .with_roots(vec![root.to_path_buf()])
            .with_filter(filter)
    }

    fn never_asked() -> MockConfirmer {
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().never();
        confirmer
    }

    #[test]
    fn test_run_config_defaults_to_current_directory() {
        let config = RunConfig::new(DispatchConfig::new(["status"])).with_roots(Vec::new());
        assert_eq!(config.roots, vec![PathBuf::from(".")]);
    }

    #[tokio::test]
    async fn test_dispatches_only_to_git_repositories() {
        let temp_dir = workspace(&["repo1", "repo2"], None);
        let runner = RecordingRunner::default();
        let confirmer = never_asked();

        let result = RunAcrossRepositoriesUseCase::new(
            config(temp_dir.path(), FilterOptions::new()),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["repo1", "repo2"]);
        assert!(result.report.is_success());
        assert_eq!(result.selections.len(), 1);
    }

    #[tokio::test]
    async fn test_dotfile_is_confirmed_once_then_applied() {
        let temp_dir = workspace(
            &["repo1", "repo2", "repo3"],
            Some("repo1\n  repo2  # keep\n# repo3 excluded\n"),
        );
        let runner = RecordingRunner::default();
        let mut confirmer = MockConfirmer::new();
        confirmer
            .expect_confirm()
            .withf(|message| message.contains("default filtering file found"))
            .times(1)
            .returning(|_| Ok(true));

        RunAcrossRepositoriesUseCase::new(
            config(temp_dir.path(), FilterOptions::new()),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["repo1", "repo2"]);
    }

    #[tokio::test]
    async fn test_declined_confirmation_touches_nothing() {
        let temp_dir = workspace(&["repo1", "repo2"], Some("repo1\n"));
        let runner = RecordingRunner::default();
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().times(1).returning(|_| Ok(false));

        let result = RunAcrossRepositoriesUseCase::new(
            config(temp_dir.path(), FilterOptions::new()),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await;

        assert!(matches!(result, Err(MgitError::ConfirmationDeclined { .. })));
        assert!(runner.dirs().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_explicit_file() {
        let temp_dir = workspace(&["repo1", "repo2", "repo3"], None);
        let filter_file = temp_dir.path().join("filter.txt");
        fs::write(&filter_file, "repo1\n  repo2  # keep\n# repo3 excluded\n").unwrap();
        let runner = RecordingRunner::default();
        let confirmer = never_asked();

        RunAcrossRepositoriesUseCase::new(
            config(
                temp_dir.path(),
                FilterOptions::new().with_filtering_file(&filter_file).with_invert(true),
            ),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["repo3"]);
    }

    #[tokio::test]
    async fn test_no_filtering_skips_dotfile_and_prompt() {
        let temp_dir = workspace(&["repo1", "repo2"], Some("repo1\n"));
        let runner = RecordingRunner::default();
        let confirmer = never_asked();

        RunAcrossRepositoriesUseCase::new(
            config(temp_dir.path(), FilterOptions::new().with_no_filtering(true)),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["repo1", "repo2"]);
    }

    #[tokio::test]
    async fn test_bad_second_root_stops_before_any_dispatch() {
        let temp_dir = workspace(&["repo1"], None);
        let runner = RecordingRunner::default();
        let confirmer = never_asked();
        let config = RunConfig::new(DispatchConfig::new(["status"]))
            .with_roots(vec![temp_dir.path().to_path_buf(), temp_dir.path().join("missing")]);

        let result = RunAcrossRepositoriesUseCase::new(
            config,
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await;

        assert!(matches!(result, Err(MgitError::DiscoveryError { .. })));
        assert!(runner.dirs().is_empty());
    }

    #[tokio::test]
    async fn test_one_of_three_fails() {
        let temp_dir = workspace(&["alpha", "fail-beta", "gamma"], None);
        let runner = RecordingRunner::default();
        let confirmer = never_asked();

        let result = RunAcrossRepositoriesUseCase::new(
            config(temp_dir.path(), FilterOptions::new()),
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["alpha", "fail-beta", "gamma"]);
        let failed: Vec<_> = result
            .report
            .failed_results()
            .iter()
            .map(|r| r.name.clone())
            .collect();
        assert_eq!(failed, vec!["fail-beta".to_string()]);
        assert_ne!(result.report.exit_code(), crate::common::exit_code::SUCCESS);
    }

    #[tokio::test]
    async fn test_multiple_roots_in_order() {
        let first = workspace(&["b", "a"], None);
        let second = workspace(&["c"], None);
        let runner = RecordingRunner::default();
        let confirmer = never_asked();
        let config = RunConfig::new(DispatchConfig::new(["status"]))
            .with_roots(vec![second.path().to_path_buf(), first.path().to_path_buf()]);

        RunAcrossRepositoriesUseCase::new(
            config,
            &FsRepositoryLister,
            &runner,
            &confirmer,
            &SilentObserver,
        )
        .execute()
        .await
        .unwrap();

        assert_eq!(runner.dirs(), vec!["c", "a", "b"]);
    }
}
