use std::process::ExitCode;

use anyhow::anyhow;
use mgit::common::exit_code;
use mgit::presentation::cli::CliApp;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so they never mix with git's output.
fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("cannot initialize logging: {}", e))
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Warning: {:#}", e);
    }

    match CliApp::from_env() {
        Ok(app) => app.run().await,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(exit_code::FATAL)
        }
    }
}
