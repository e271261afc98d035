pub mod dispatch_result;
pub mod filter_policy;
pub mod repository;

pub use dispatch_result::{CapturedOutput, DispatchReport, DispatchResult, DispatchStatus};
pub use filter_policy::{FilterPolicy, FilterRule, FilterSource};
pub use repository::RepositoryCandidate;
