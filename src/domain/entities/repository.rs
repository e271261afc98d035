use serde::Serialize;
use std::path::{Path, PathBuf};

/// A directory found under a scan root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryCandidate {
    /// Path of the working copy
    pub path: PathBuf,

    /// Directory name, matched against filtering rules
    pub name: String,

    /// Whether the git metadata marker is present
    pub is_git_repo: bool,
}

impl RepositoryCandidate {
    /// Create a candidate, naming it after the last path component.
    pub fn new(path: impl Into<PathBuf>, is_git_repo: bool) -> Self {
        let path = path.into();
        let name = Self::name_of(&path);
        Self {
            path,
            name,
            is_git_repo,
        }
    }

    fn name_of(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}
