//! CLI for the JIRA sprint log.
//!
//! Prompts for a board and sprints on a JIRA server and writes the issues
//! finished in those sprints as an HTML report.

use clap::Parser;
use jira_sprint_log::{
    config_help, default_config_path, load_settings, ConfigError, JiraClient, JiraSettings,
    RunSummary, Runner, RunnerConfig, RunnerError, Selector, SettingsOverrides,
};
use std::fs::File;
use std::io::{self, BufWriter};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Simple tool that lists JIRA issues from specified sprints.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to write the HTML report to (defaults to stdout).
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Path to the config file (defaults to ~/.jira-sprint-log.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JIRA server URL, overriding the config file.
    #[arg(long, env = "JIRA_URL")]
    url: Option<String>,

    /// JIRA user name, overriding the config file.
    #[arg(long, env = "JIRA_USER")]
    user: Option<String>,

    /// JIRA password or API token, overriding the config file.
    #[arg(long, env = "JIRA_PASS", hide_env_values = true)]
    password: Option<String>,

    /// Items requested per page from JIRA (1 to 50, the server's page cap).
    #[arg(long, default_value = "50", value_parser = parse_page_size)]
    page_size: NonZeroUsize,
}

/// Largest page JIRA agile endpoints return for a single request.
const MAX_PAGE_SIZE: usize = 50;

/// Errors that end the process.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration could not be resolved.
    #[error("{error}")]
    Config {
        /// What went wrong with the configuration.
        #[source]
        error: ConfigError,
        /// Config file that was looked up.
        path: PathBuf,
    },

    /// The report run failed.
    #[error(transparent)]
    Run(#[from] RunnerError),

    /// The output file could not be created.
    #[error("Could not create output file {}: {source}", .path.display())]
    Output {
        /// Requested output path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}

impl CliError {
    /// Returns true for mistakes the user can fix by changing their input.
    fn is_usage_error(&self) -> bool {
        match self {
            Self::Config { .. } => true,
            Self::Run(e) => e.is_invalid_selection(),
            Self::Output { .. } => false,
        }
    }

    /// Process exit status for this error.
    fn exit_code(&self) -> u8 {
        if self.is_usage_error() {
            2
        } else {
            1
        }
    }

    /// Message shown to the user, with the config example for config errors.
    fn message(&self) -> String {
        match self {
            Self::Config { path, .. } => format!("error: {self}\n\n{}", config_help(path)),
            _ => format!("error: {self}"),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args) {
        Ok(summary) => {
            info!(
                board = %summary.board,
                sprints = summary.sprints.len(),
                issues = summary.issues,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            if e.is_usage_error() {
                eprintln!("{}", e.message());
            } else {
                error!(error = %e, "Report failed");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

/// Parses `--page-size`, rejecting 0 and anything above [`MAX_PAGE_SIZE`].
fn parse_page_size(value: &str) -> Result<NonZeroUsize, String> {
    let size: NonZeroUsize = value.parse().map_err(|e| format!("{e}"))?;
    if size.get() > MAX_PAGE_SIZE {
        return Err(format!("must be at most {MAX_PAGE_SIZE}"));
    }
    Ok(size)
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting written to stderr, leaving stdout for the report
/// - Log level filtering via `RUST_LOG` env var (defaults to "warn")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

/// Main execution logic.
fn run(args: Args) -> Result<RunSummary, CliError> {
    let settings = resolve_settings(&args)?;
    let client = JiraClient::new(settings.url, settings.user, settings.password)
        .map_err(|e| CliError::Run(e.into()))?;

    // Prompts go to stderr so the report can be redirected from stdout
    let selector = Selector::new(io::stdin().lock(), io::stderr());
    let mut runner = Runner::new(client, selector, RunnerConfig::new(args.page_size))?;

    match &args.outfile {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Output {
                path: path.clone(),
                source,
            })?;
            Ok(runner.run(BufWriter::new(file))?)
        }
        None => Ok(runner.run(io::stdout().lock())?),
    }
}

/// Loads settings from the config file and command-line overrides.
fn resolve_settings(args: &Args) -> Result<JiraSettings, CliError> {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => default_config_path().map_err(|error| CliError::Config {
            error,
            path: PathBuf::from("~/.jira-sprint-log.toml"),
        })?,
    };

    let overrides = SettingsOverrides {
        url: args.url.clone(),
        user: args.user.clone(),
        password: args.password.clone(),
    };

    load_settings(&path, overrides).map_err(|error| CliError::Config { error, path })
}
