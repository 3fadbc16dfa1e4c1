// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines subcommands and the flag layer of the task configuration.

use clap::{Args, Parser, Subcommand};
use healthwait::config::TaskConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "healthwait")]
#[command(about = "Wait for a JSON health endpoint to report the expected status")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to healthwait.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Poll the health endpoint until it reports the expected status
    Check(PropertyArgs),

    /// Validate the configuration without polling
    Validate(PropertyArgs),

    /// Initialize a new healthwait.yml configuration file
    Init {
        /// Health endpoint to write into the template
        #[arg(long)]
        url: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },
}

/// Task properties given on the command line. Unset flags fall through to
/// the environment, the config file and finally the defaults.
#[derive(Args, Debug, Default)]
pub struct PropertyArgs {
    /// Health endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Dot-separated path to the status attribute in the response JSON
    #[arg(long)]
    pub attribute: Option<String>,

    /// Expected status value (case-insensitive)
    #[arg(long)]
    pub status: Option<String>,

    /// Seconds between polls
    #[arg(long)]
    pub delay: Option<String>,

    /// Seconds before giving up
    #[arg(long)]
    pub timeout: Option<String>,

    /// Cap on a single request, e.g. 5s or 500ms
    #[arg(long, value_parser = parse_duration)]
    pub request_timeout: Option<Duration>,
}

impl From<PropertyArgs> for TaskConfig {
    fn from(args: PropertyArgs) -> Self {
        TaskConfig {
            url: args.url,
            attribute: args.attribute,
            status: args.status,
            delay: args.delay,
            timeout: args.timeout,
            request_timeout: args.request_timeout,
        }
    }
}

fn parse_duration(raw: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(raw).map_err(|e| e.to_string())
}
