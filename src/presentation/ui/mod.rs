pub mod display;
pub mod prompt;

pub use display::{ConsoleReporter, Verbosity};
pub use prompt::TerminalConfirmer;
