use std::path::PathBuf;

use crate::common::error::MgitError;

/// Result alias used across the crate.
///
/// # Examples
///
/// ```
/// use mgit::common::result::MgitResult;
/// use mgit::common::error::MgitError;
///
/// fn needs_a_command(args: &[String]) -> MgitResult<&String> {
///     args.first().ok_or_else(|| MgitError::usage_error("no git command given"))
/// }
///
/// assert!(needs_a_command(&[]).is_err());
/// ```
pub type MgitResult<T> = Result<T, MgitError>;

/// Conversions from I/O failures into the run-stopping error kinds.
pub trait IoResultExt<T> {
    /// Wrap an I/O failure as a configuration error for `path`.
    fn with_config_error(self, message: impl Into<String>, path: Option<PathBuf>)
        -> MgitResult<T>;

    /// Wrap an I/O failure as a discovery error for `path`.
    fn with_discovery_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MgitResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_config_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MgitResult<T> {
        self.map_err(|e| MgitError::config_error_with_source(message, path, e))
    }

    fn with_discovery_error(
        self,
        message: impl Into<String>,
        path: Option<PathBuf>,
    ) -> MgitResult<T> {
        self.map_err(|e| MgitError::discovery_error_with_source(message, path, e))
    }
}
