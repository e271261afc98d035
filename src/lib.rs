//! # mgit - run a git command in many repositories
//!
//! `mgit` finds every git repository directly under one or more directories and
//! runs the same git command in each of them, one after the other. A filtering
//! file can restrict the run to a list of repository names, or exclude them.
//!
//! ## Command line
//!
//! Arguments before a `--` separator belong to mgit, everything after it is
//! handed to git untouched:
//!
//! ```bash
//! mgit -f projects.txt ~/src -- pull --rebase
//! ```
//!
//! Without a separator every argument goes to git and the current directory is
//! scanned:
//!
//! ```bash
//! mgit status --short
//! ```
//!
//! ## Architecture
//!
//! - [`domain`]: filtering policy, repository candidates, dispatch results
//! - [`application`]: filter resolution, discovery, dispatch, and the run that chains them
//! - [`infrastructure`]: filesystem listing, filtering files and the git subprocess
//! - [`presentation`]: CLI parsing, console output and the confirmation prompt
//! - [`common`]: error type, result alias and exit codes
//!
//! ## Using the library
//!
//! ```rust,no_run
//! use mgit::application::services::AssumeYes;
//! use mgit::application::use_cases::dispatch_command::{DispatchConfig, SilentObserver};
//! use mgit::application::use_cases::run_across_repositories::{
//!     RunAcrossRepositoriesUseCase, RunConfig,
//! };
//! use mgit::infrastructure::{FsRepositoryLister, SystemGitRunner};
//!
//! # async fn example() -> mgit::Result<()> {
//! let config = RunConfig::new(DispatchConfig::new(["fetch", "--all"]))
//!     .with_roots(vec!["/home/me/src".into()]);
//! let lister = FsRepositoryLister::new();
//! let runner = SystemGitRunner::new();
//!
//! let use_case =
//!     RunAcrossRepositoriesUseCase::new(config, &lister, &runner, &AssumeYes, &SilentObserver);
//! let result = use_case.execute().await?;
//!
//! println!("{} of {} succeeded", result.report.success_count, result.report.total_count());
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

pub mod application;
pub mod common;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use crate::common::error::MgitError;
pub use crate::common::result::MgitResult as Result;
