use clap::{Parser, Subcommand};

use std::path::PathBuf;

use super::config::QueryMode;
use super::constants::{
    ENV_CONFIG, ENV_HOST, ENV_PORT, ENV_QUERY_MODE, ENV_SUMMARY_DAYS, ENV_UPSTREAM_TIMEOUT_SECS,
    ENV_UPSTREAM_URL,
};

#[derive(Parser)]
#[command(name = "assetlens")]
#[command(version, about = "Financial asset query service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Server host address
    #[arg(long, short = 'H', global = true, env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', global = true, env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// XML service gRPC URL (http://host:port)
    #[arg(long, global = true, env = ENV_UPSTREAM_URL)]
    pub upstream_url: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, global = true, env = ENV_UPSTREAM_TIMEOUT_SECS)]
    pub upstream_timeout_secs: Option<u64>,

    /// Where filters are evaluated (filter or pushdown)
    #[arg(long, global = true, env = ENV_QUERY_MODE, value_parser = parse_query_mode)]
    pub query_mode: Option<QueryMode>,

    /// Daily entries kept per asset (0 = all)
    #[arg(long, global = true, env = ENV_SUMMARY_DAYS)]
    pub summary_days: Option<usize>,
}

/// Parse query mode from CLI/env string
fn parse_query_mode(s: &str) -> Result<QueryMode, String> {
    match s.to_lowercase().as_str() {
        "filter" | "memory" => Ok(QueryMode::Filter),
        "pushdown" | "xpath" => Ok(QueryMode::Pushdown),
        _ => Err(format!(
            "Invalid query mode '{}'. Valid options: filter, pushdown",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Start the server (default command)
    Start,
    /// Print the XPath a query translates to, without contacting the XML service
    Xpath {
        /// Query string, e.g. "symbol=NVDA sector=Technology"
        query: String,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub upstream_url: Option<String>,
    pub upstream_timeout_secs: Option<u64>,
    pub query_mode: Option<QueryMode>,
    pub summary_days: Option<usize>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            upstream_url: cli.upstream_url,
            upstream_timeout_secs: cli.upstream_timeout_secs,
            query_mode: cli.query_mode,
            summary_days: cli.summary_days,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    let mut cli = Cli::parse();
    let command = cli.command.take();
    (CliConfig::from(cli), command)
}
