pub mod discover_repositories;
pub mod dispatch_command;
pub mod resolve_filter;
pub mod run_across_repositories;
