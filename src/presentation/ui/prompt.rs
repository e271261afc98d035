use console::Term;
use std::io;
use tracing::warn;

use crate::application::services::Confirmer;
use crate::common::result::MgitResult;

/// Yes/no question on the terminal.
///
/// The answer defaults to "no", and is "no" without asking when stderr is
/// not a terminal, so unattended runs never apply an unexpected filter.
pub struct TerminalConfirmer {
    terminal: Term,
}

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self {
            terminal: Term::stderr(),
        }
    }

    /// Interpret a typed answer.
    pub fn is_yes(answer: &str) -> bool {
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }

    /// An answer that could not be read counts as "no".
    fn accepted(answer: io::Result<String>) -> bool {
        match answer {
            Ok(answer) => Self::is_yes(&answer),
            Err(e) => {
                warn!("Cannot read confirmation answer, declining: {}", e);
                false
            }
        }
    }
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, message: &str) -> MgitResult<bool> {
        if !self.terminal.is_term() {
            warn!("Not a terminal, declining: {} (use --yes to accept)", message);
            return Ok(false);
        }

        let answer = self
            .terminal
            .write_str(&format!("{} [y/N] ", message))
            .and_then(|_| self.terminal.read_line());
        Ok(Self::accepted(answer))
    }
}
