/// Presentation layer: command line parsing and console interaction
pub mod cli;
pub mod ui;
