pub mod filter_file_store;
pub mod repository_lister;

pub use filter_file_store::{FilterFileStore, DEFAULT_FILTER_FILE_NAME};
pub use repository_lister::{FsRepositoryLister, RepositoryLister, GIT_MARKER};
