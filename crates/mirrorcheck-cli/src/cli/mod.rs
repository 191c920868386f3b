//! CLI for the mirror checker.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mirrorcheck_core::config;
use mirrorcheck_core::probe::ProbeMethod;
use mirrorcheck_core::report::ReportFormat;
use std::path::PathBuf;
use std::time::Duration;

use commands::{run_check, run_config, run_list};

/// Top-level CLI for the mirror checker.
#[derive(Debug, Parser)]
#[command(name = "mirrorcheck")]
#[command(about = "Check software repository mirrors for reachability and freshness", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe every mirror in a list and print the report.
    Check(CheckArgs),

    /// Print the candidates extracted from a mirror list.
    List {
        /// Markdown mirror page or JSON mirror list.
        #[arg(long, value_name = "FILE")]
        mirrors: PathBuf,
    },

    /// Show the config file path and effective configuration.
    Config,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Markdown mirror page (links in its first table) or JSON mirror list.
    #[arg(long, value_name = "FILE")]
    pub mirrors: PathBuf,

    /// Canonical source; enables comparison against its metadata.
    #[arg(long, value_name = "URL")]
    pub source: Option<String>,

    /// Resource path probed on every mirror (default from config).
    #[arg(long, value_name = "PATH")]
    pub target: Option<String>,

    /// Per-attempt request timeout, e.g. `10s`.
    #[arg(long, value_name = "DUR", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Bound on the whole run, e.g. `2m`.
    #[arg(long, value_name = "DUR", value_parser = humantime::parse_duration)]
    pub run_timeout: Option<Duration>,

    /// Maximum probes in flight.
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Retries after the first failed attempt.
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Media type every response must declare, e.g. `application/pgp-signature`.
    #[arg(long, value_name = "MIME")]
    pub content_type: Option<String>,

    /// Maximum lag behind the source before a mirror is outdated, e.g. `7days`.
    #[arg(long, value_name = "DUR", value_parser = humantime::parse_duration)]
    pub stale_after: Option<Duration>,

    /// Leave mirrors with unsupported schemes out of the rendered report.
    #[arg(long)]
    pub skip_unsupported: bool,

    /// Probe method.
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Output format: css, jsonl or text.
    #[arg(long, default_value = "css", value_name = "FORMAT")]
    pub format: ReportFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// HEAD, falling back to GET when the server rejects it.
    Head,
    /// Header-only GET.
    Get,
}

impl From<MethodArg> for ProbeMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Head => ProbeMethod::Head,
            MethodArg::Get => ProbeMethod::Get,
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check(args) => run_check(&cfg, &args).await?,
            CliCommand::List { mirrors } => run_list(&mirrors)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
