//! Shared fixtures for the command-line tests

pub mod test_fixtures;
