// ABOUTME: Entry point for the healthwait CLI application.
// ABOUTME: Layers configuration sources and dispatches to command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, PropertyArgs};
use healthwait::config::{self, HealthCheckSpec, TaskConfig};
use healthwait::error::Result;
use healthwait::output::{Output, OutputMode};
use healthwait::task::HealthCheckTask;
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    match run(cli, &mut output).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded.
async fn run(cli: Cli, output: &mut Output) -> Result<bool> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Check(args) => {
            let config = load_config(&cwd, cli.config.as_deref(), args)?;
            let spec = HealthCheckSpec::from_config(&config)?;

            output.progress(&format!(
                "Waiting for {} to report {}={} (every {}s, up to {}s)",
                spec.url(),
                spec.attribute_path(),
                spec.expected_status(),
                spec.poll_interval().as_secs(),
                spec.timeout().as_secs()
            ));
            output.start_timer();

            let result = HealthCheckTask::default().run(spec).await;
            output.report(&result);
            Ok(result.success)
        }
        Commands::Validate(args) => {
            let config = load_config(&cwd, cli.config.as_deref(), args)?;
            let spec = HealthCheckSpec::from_config(&config)?;
            output.success(&format!("Configuration is valid: {}", spec.url()));
            Ok(true)
        }
        Commands::Init { url, force } => {
            let path = config::init_config(&cwd, url.as_deref(), force)?;
            output.success(&format!("Created {}", path.display()));
            Ok(true)
        }
    }
}

/// Merge defaults < config file < environment < flags.
fn load_config(cwd: &Path, explicit: Option<&Path>, args: PropertyArgs) -> Result<TaskConfig> {
    let file = match explicit {
        Some(path) => TaskConfig::load(path)?,
        None => TaskConfig::discover(cwd)?,
    };

    Ok(file
        .merge(TaskConfig::from_env()?)
        .merge(TaskConfig::from(args)))
}
