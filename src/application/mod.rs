//! Use cases: filter resolution, repository discovery, dispatch, and the run
//! that chains them.

pub mod services;
pub mod use_cases;
