use colored::Colorize;
use console::Term;

use crate::application::use_cases::dispatch_command::DispatchObserver;
use crate::common::error::MgitError;
use crate::domain::entities::{DispatchReport, DispatchResult, RepositoryCandidate};

const SUMMARY_TITLE: &str = "Summary per return code:";
const FALLBACK_WIDTH: usize = 80;

/// How much the console reporter prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Only failing repositories' output, short headers
    Quiet,
    #[default]
    Normal,
    /// Full-width rules, every return code, every repository name
    Verbose,
}

/// One summary line and whether it describes successes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub success: bool,
    pub text: String,
}

/// Prints per-repository headers, return codes and the final summary
///
/// Everything goes to stdout unless [`ConsoleReporter::on_stderr`] moved it,
/// which keeps stdout clean for a structured summary.
pub struct ConsoleReporter {
    verbosity: Verbosity,
    terminal: Term,
}

impl ConsoleReporter {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            terminal: Term::stdout(),
        }
    }

    pub fn on_stderr(mut self) -> Self {
        self.terminal = Term::stderr();
        self
    }

    fn line(&self, text: impl std::fmt::Display) {
        let _ = self.terminal.write_line(&text.to_string());
    }

    fn text(&self, text: impl std::fmt::Display) {
        let _ = self.terminal.write_str(&text.to_string());
    }

    /// Verbose-mode announcement before dispatch.
    pub fn announcement(count: usize, program: &str, git_args: &[String]) -> String {
        format!(
            "Run this command on {} directories: {} {}",
            count,
            program,
            git_args.join(" ")
        )
    }

    fn terminal_width(&self) -> usize {
        self.terminal
            .size_checked()
            .map(|(_, columns)| columns as usize)
            .unwrap_or(FALLBACK_WIDTH)
    }

    fn rule(&self, ch: char, text_len: usize) -> String {
        let width = match self.verbosity {
            Verbosity::Verbose => self.terminal_width(),
            _ => text_len,
        };
        ch.to_string().repeat(width)
    }

    /// The line shown after a repository, if any.
    pub fn outcome_line(&self, result: &DispatchResult) -> Option<String> {
        if result.is_success() && self.verbosity != Verbosity::Verbose {
            return None;
        }
        Some(match (result.exit_code, &result.error_message) {
            (Some(code), _) => format!(">>> return code: {}", code),
            (None, Some(message)) => format!(">>> {}", message),
            (None, None) => ">>> no return code".to_string(),
        })
    }

    /// Summary lines grouped by return code, in ascending order.
    ///
    /// Quiet mode keeps the failing groups only.
    pub fn summary_lines(&self, report: &DispatchReport) -> Vec<SummaryLine> {
        report
            .by_exit_code()
            .into_iter()
            .filter(|(code, _)| self.verbosity != Verbosity::Quiet || *code != Some(0))
            .map(|(code, results)| {
                let success = code == Some(0);
                let label = code.map_or_else(|| "error".to_string(), |c| c.to_string());
                let text = if success && self.verbosity != Verbosity::Verbose {
                    format!(" * {}: {} repo(s)", label, results.len())
                } else {
                    let paths: Vec<String> =
                        results.iter().map(|r| r.path.display().to_string()).collect();
                    format!(" * {}: {}", label, paths.join(", "))
                };
                SummaryLine { success, text }
            })
            .collect()
    }

    pub fn print_summary(&self, report: &DispatchReport) {
        if self.verbosity == Verbosity::Quiet && report.is_success() {
            return;
        }

        self.line("");
        self.line(self.rule('=', SUMMARY_TITLE.len()).bold());
        self.line(SUMMARY_TITLE.bold());
        for line in self.summary_lines(report) {
            if line.success {
                self.line(line.text.green());
            } else {
                self.line(line.text.red());
            }
        }
    }

    pub fn print_error(&self, error: &MgitError) {
        if let MgitError::ConfirmationDeclined { .. } = error {
            eprintln!("{} {}", "Aborted:".yellow().bold(), error);
            return;
        }
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
}

impl DispatchObserver for ConsoleReporter {
    fn before_all(
        &self,
        repositories: &[RepositoryCandidate],
        program: &str,
        git_args: &[String],
    ) {
        if self.verbosity == Verbosity::Verbose {
            let message = Self::announcement(repositories.len(), program, git_args);
            self.line(message.yellow());
        }
    }

    fn before_each(&self, repository: &RepositoryCandidate) {
        let message = format!("handling {}", repository.path.display());
        if self.verbosity == Verbosity::Quiet {
            self.text("* ".cyan());
        } else {
            self.line(self.rule('~', message.len()).cyan());
        }
        self.line(message.blue().bold());
    }

    fn after_each(&self, result: &DispatchResult) {
        // Captured streams are replayed separately, stdout first.
        if result.is_failure() {
            if let Some(output) = &result.output {
                self.text(&output.stdout);
                eprint!("{}", output.stderr);
            }
        }
        if let Some(line) = self.outcome_line(result) {
            if result.is_success() {
                self.line(line.green());
            } else {
                self.line(line.red().bold());
            }
        }
    }
}
