use clap::{CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::application::services::{AssumeYes, Confirmer};
use crate::application::use_cases::dispatch_command::DispatchConfig;
use crate::application::use_cases::resolve_filter::FilterOptions;
use crate::application::use_cases::run_across_repositories::{
    RunAcrossRepositoriesUseCase, RunConfig,
};
use crate::common::error::MgitError;
use crate::common::exit_code;
use crate::common::result::MgitResult;
use crate::domain::entities::DispatchReport;
use crate::domain::value_objects::InvocationArgs;
use crate::infrastructure::filesystem::FsRepositoryLister;
use crate::infrastructure::process::{OutputMode, SystemGitRunner};
use crate::presentation::ui::{ConsoleReporter, TerminalConfirmer, Verbosity};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MGIT_GIT_HASH"),
    " ",
    env!("MGIT_BUILD_DATE"),
    ")"
);

/// Output format for the final summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// mgit - run a git command in every repository under a directory
#[derive(Parser, Debug)]
#[command(name = "mgit")]
#[command(about = "Run a git command in every git repository found in the given directories")]
#[command(override_usage = "mgit [OPTIONS] [DIR]... -- GIT_ARGUMENTS\n       mgit GIT_ARGUMENTS")]
#[command(after_help = "If no option is needed, simply use: mgit GIT_ARGUMENTS")]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Directories to scan (defaults to the current directory)
    #[arg(value_name = "DIR")]
    pub directories: Vec<PathBuf>,

    /// Filtering file listing repository names, may be repeated
    #[arg(short = 'f', long = "filtering-file", value_name = "PATH", help_heading = "Filtering")]
    pub filtering_files: Vec<PathBuf>,

    /// Do not filter, even when a default filtering file is present
    #[arg(short = 'F', long, help_heading = "Filtering")]
    pub no_filtering: bool,

    /// Skip the listed repositories instead of keeping them
    #[arg(short = 'I', long, help_heading = "Filtering")]
    pub invert_filtering: bool,

    /// Use a default filtering file without asking
    #[arg(short = 'y', long, help_heading = "Filtering")]
    pub yes: bool,

    /// Make lots of noise
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Display output of failing commands only
    #[arg(short, long)]
    pub quiet: bool,

    /// Git executable to run
    #[arg(long = "git", value_name = "PATH", env = "MGIT_GIT", default_value = "git")]
    pub git: String,

    /// Format of the final summary
    #[arg(long, value_enum, default_value = "text")]
    pub summary: SummaryFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            filtering_files: self.filtering_files.clone(),
            no_filtering: self.no_filtering,
            invert: self.invert_filtering,
        }
    }
}

/// CLI application runner
pub struct CliApp {
    invocation: InvocationArgs,
}

impl CliApp {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            invocation: InvocationArgs::split(args),
        }
    }

    /// Build from the process arguments; non UTF-8 arguments are refused.
    pub fn from_env() -> MgitResult<Self> {
        let args = std::env::args_os()
            .skip(1)
            .map(|arg| {
                arg.into_string().map_err(|raw| {
                    MgitError::usage_error(format!(
                        "argument is not valid UTF-8: {}",
                        raw.to_string_lossy()
                    ))
                })
            })
            .collect::<MgitResult<Vec<_>>>()?;
        Ok(Self::new(args))
    }

    pub async fn run(self) -> ExitCode {
        let program_and_args = std::iter::once("mgit".to_string())
            .chain(self.invocation.script_args.iter().cloned());
        let cli = match Cli::try_parse_from(program_and_args) {
            Ok(cli) => cli,
            Err(e) => {
                let _ = e.print();
                return ExitCode::from(e.exit_code() as u8);
            }
        };

        if !self.invocation.has_git_command() {
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("For more help, use the -h/--help argument.");
            return ExitCode::from(exit_code::FATAL);
        }

        colored::control::set_override(!cli.no_color && atty::is(atty::Stream::Stdout));

        let code = self.execute(&cli).await;
        debug!("Exit status {}: {}", code, exit_code::describe(code));
        ExitCode::from(code)
    }

    async fn execute(&self, cli: &Cli) -> u8 {
        let verbosity = cli.verbosity();
        let structured = cli.summary != SummaryFormat::Text;
        let output_mode = match (verbosity, structured) {
            (Verbosity::Quiet, _) => OutputMode::Capture,
            (_, true) => OutputMode::ToStderr,
            (_, false) => OutputMode::Inherit,
        };

        let dispatch = DispatchConfig::new(self.invocation.passthrough_args.clone())
            .with_output_mode(output_mode);
        let config = RunConfig::new(dispatch)
            .with_roots(cli.directories.clone())
            .with_filter(cli.filter_options());

        // A structured summary owns stdout; progress goes to stderr
        let reporter = if structured {
            ConsoleReporter::new(verbosity).on_stderr()
        } else {
            ConsoleReporter::new(verbosity)
        };
        let runner = SystemGitRunner::with_executable(&cli.git);
        let lister = FsRepositoryLister::new();
        let confirmer: Box<dyn Confirmer> = if cli.yes {
            Box::new(AssumeYes)
        } else {
            Box::new(TerminalConfirmer::new())
        };

        let use_case = RunAcrossRepositoriesUseCase::new(
            config,
            &lister,
            &runner,
            confirmer.as_ref(),
            &reporter,
        );

        match use_case.execute().await {
            Ok(result) => {
                if let Err(e) = self.print_summary(cli.summary, &reporter, &result.report) {
                    reporter.print_error(&e);
                }
                result.report.exit_code()
            }
            Err(e) => {
                reporter.print_error(&e);
                e.exit_code()
            }
        }
    }

    fn print_summary(
        &self,
        format: SummaryFormat,
        reporter: &ConsoleReporter,
        report: &DispatchReport,
    ) -> MgitResult<()> {
        match format {
            SummaryFormat::Text => reporter.print_summary(report),
            SummaryFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
            SummaryFormat::Yaml => print!("{}", serde_yaml::to_string(report)?),
        }
        Ok(())
    }
}
