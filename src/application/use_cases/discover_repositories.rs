use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::result::MgitResult;
use crate::domain::entities::{FilterPolicy, RepositoryCandidate};
use crate::infrastructure::filesystem::RepositoryLister;

/// Repositories found under one root, split by the filtering policy
#[derive(Debug, Clone)]
pub struct RepositorySelection {
    pub root: PathBuf,
    pub policy: FilterPolicy,

    /// Repositories to dispatch to, in discovery order
    pub selected: Vec<RepositoryCandidate>,

    /// Repositories left out by the policy
    pub excluded: Vec<RepositoryCandidate>,
}

impl RepositorySelection {
    pub fn discovered_count(&self) -> usize {
        self.selected.len() + self.excluded.len()
    }
}

/// Lists a root once and applies its policy
pub struct DiscoverRepositoriesUseCase<'a> {
    lister: &'a dyn RepositoryLister,
}

impl<'a> DiscoverRepositoriesUseCase<'a> {
    pub fn new(lister: &'a dyn RepositoryLister) -> Self {
        Self { lister }
    }

    pub fn execute(&self, root: &Path, policy: FilterPolicy) -> MgitResult<RepositorySelection> {
        let (selected, excluded): (Vec<_>, Vec<_>) = self
            .lister
            .list(root)?
            .into_iter()
            .filter(|candidate| candidate.is_git_repo)
            .partition(|candidate| policy.includes(&candidate.name));

        for candidate in &excluded {
            debug!("Filtered out {}", candidate.path.display());
        }

        Ok(RepositorySelection {
            root: root.to_path_buf(),
            policy,
            selected,
            excluded,
        })
    }
}
