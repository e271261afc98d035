pub mod git_runner;

pub use git_runner::{GitRunner, OutputMode, ProcessOutcome, SystemGitRunner};
