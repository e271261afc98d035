use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::common::error::MgitError;
use crate::common::result::{IoResultExt, MgitResult};
use crate::domain::entities::RepositoryCandidate;

/// Entry whose presence marks a directory as a git working copy.
pub const GIT_MARKER: &str = ".git";

/// Lists the git repositories directly under a root
pub trait RepositoryLister: Send + Sync {
    /// Repositories in a stable order; only entries with `is_git_repo` set.
    fn list(&self, root: &Path) -> MgitResult<Vec<RepositoryCandidate>>;
}

/// Reads the real filesystem, one level deep, sorted by file name
#[derive(Debug, Clone, Default)]
pub struct FsRepositoryLister;

impl FsRepositoryLister {
    pub fn new() -> Self {
        Self
    }

    /// Existence check only; a `.git` file (worktree, submodule) counts.
    pub fn is_repository(path: &Path) -> bool {
        path.join(GIT_MARKER).exists()
    }

    fn check_root(root: &Path) -> MgitResult<()> {
        let metadata = fs::metadata(root).with_discovery_error(
            format!("directory {} does not exist", root.display()),
            Some(root.to_path_buf()),
        )?;
        if !metadata.is_dir() {
            return Err(MgitError::discovery_error(
                format!("{} is not a directory", root.display()),
                Some(root.to_path_buf()),
            ));
        }
        Ok(())
    }
}

impl RepositoryLister for FsRepositoryLister {
    fn list(&self, root: &Path) -> MgitResult<Vec<RepositoryCandidate>> {
        Self::check_root(root)?;

        let mut repositories = Vec::new();
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(MgitError::discovery_error(
                        format!("cannot list {}: {}", root.display(), e),
                        Some(root.to_path_buf()),
                    ));
                }
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }
            if !Self::is_repository(entry.path()) {
                debug!("Not a git repository: {}", entry.path().display());
                continue;
            }
            repositories.push(RepositoryCandidate::new(entry.path(), true));
        }

        debug!(
            "Found {} repositories under {}",
            repositories.len(),
            root.display()
        );
        Ok(repositories)
    }
}
