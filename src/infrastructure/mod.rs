/// Infrastructure layer modules
///
/// This layer provides concrete implementations for external system interactions:
/// - File system operations (filtering files, repository listing)
/// - Process execution (the git subprocess)
pub mod filesystem;
pub mod process;

// Re-export commonly used types
pub use filesystem::{FilterFileStore, FsRepositoryLister, RepositoryLister};
pub use process::{GitRunner, OutputMode, SystemGitRunner};
