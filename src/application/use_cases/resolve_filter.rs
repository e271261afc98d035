use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::result::MgitResult;
use crate::domain::entities::{FilterPolicy, FilterSource};
use crate::infrastructure::filesystem::FilterFileStore;

/// Filtering flags from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Explicit filtering files (`--filtering-file`), merged
    pub filtering_files: Vec<PathBuf>,

    /// Ignore every filtering file (`--no-filtering`)
    pub no_filtering: bool,

    /// Treat the rules as a deny list (`--invert-filtering`)
    pub invert: bool,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filtering_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.filtering_files.push(path.into());
        self
    }

    pub fn with_no_filtering(mut self, no_filtering: bool) -> Self {
        self.no_filtering = no_filtering;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }
}

/// Works out the filtering policy for a scan root
pub struct ResolveFilterUseCase {
    options: FilterOptions,
    store: FilterFileStore,
}

impl ResolveFilterUseCase {
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            store: FilterFileStore::new(),
        }
    }

    /// Precedence: `--no-filtering`, then explicit files, then the dotfile at
    /// `root`; with none of them filtering is off.
    pub fn execute(&self, root: &Path) -> MgitResult<FilterPolicy> {
        let invert = self.options.invert;

        if self.options.no_filtering {
            debug!("Filtering disabled for {}", root.display());
            return Ok(FilterPolicy::disabled(invert));
        }

        if !self.options.filtering_files.is_empty() {
            let rules = self.store.read_all(&self.options.filtering_files)?;
            return Ok(FilterPolicy::from_rules(
                rules,
                invert,
                FilterSource::ExplicitFile(self.options.filtering_files.clone()),
            ));
        }

        match self.store.discover(root) {
            Some(dotfile) => {
                info!("Using filtering file {}", dotfile.display());
                let rules = self.store.read(&dotfile)?;
                Ok(FilterPolicy::from_rules(
                    rules,
                    invert,
                    FilterSource::AutoDiscovered(dotfile),
                ))
            }
            None => Ok(FilterPolicy::disabled(invert)),
        }
    }
}
