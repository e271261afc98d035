use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::error::MgitError;
use crate::common::result::{IoResultExt, MgitResult};
use crate::domain::entities::FilterRule;

/// Name of the filtering file picked up automatically at a scan root.
pub const DEFAULT_FILTER_FILE_NAME: &str = ".mgit_filter";

/// Reads filtering files from disk
#[derive(Debug, Clone, Default)]
pub struct FilterFileStore;

impl FilterFileStore {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse one filtering file.
    pub fn read(&self, path: &Path) -> MgitResult<FilterRule> {
        if !path.is_file() {
            return Err(MgitError::config_error(
                format!("filtering file {} does not exist", path.display()),
                Some(path.to_path_buf()),
            ));
        }

        let content = fs::read_to_string(path).with_config_error(
            format!("cannot read filtering file {}", path.display()),
            Some(path.to_path_buf()),
        )?;
        let rule = FilterRule::parse(&content);
        debug!("Read {} rules from {}", rule.len(), path.display());
        Ok(rule)
    }

    /// Read several files and merge their rules.
    pub fn read_all(&self, paths: &[PathBuf]) -> MgitResult<FilterRule> {
        let mut rules = FilterRule::default();
        for path in paths {
            rules.extend(self.read(path)?);
        }
        Ok(rules)
    }

    /// The dotfile at `root`, if it is a regular file.
    pub fn discover(&self, root: &Path) -> Option<PathBuf> {
        let candidate = root.join(DEFAULT_FILTER_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }
}
