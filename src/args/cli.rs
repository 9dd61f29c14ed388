use clap::{Args, Parser, Subcommand};

use super::parsers::parse_identifier;
use super::types::OutputFormat;
use crate::kpi::Page;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Runtime statistics per flow node of a process model
    Runtime(RuntimeArgs),
    /// Currently running or suspended tokens
    Tokens(TokensArgs),
}

#[derive(Debug, Args, Clone, Default)]
pub struct PageArgs {
    /// Number of results to skip
    #[arg(long = "offset", default_value_t = 0)]
    pub offset: usize,

    /// Maximum number of results (0 = no limit)
    #[arg(long = "limit")]
    pub limit: Option<usize>,
}

impl PageArgs {
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit.unwrap_or(0))
    }
}

#[derive(Debug, Args, Clone)]
pub struct RuntimeArgs {
    /// Process model to analyze
    #[arg(long = "process-model", value_parser = parse_identifier)]
    pub process_model: String,

    /// Only report this flow node
    #[arg(long = "flow-node", value_parser = parse_identifier)]
    pub flow_node: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TokensArgs {
    /// Active tokens of a process model (or, with --correlation, of one correlation)
    #[arg(long = "process-model", value_parser = parse_identifier)]
    pub process_model: Option<String>,

    /// Active tokens of a process instance
    #[arg(long = "process-instance", value_parser = parse_identifier)]
    pub process_instance: Option<String>,

    /// Active tokens of a flow node
    #[arg(long = "flow-node", value_parser = parse_identifier)]
    pub flow_node: Option<String>,

    /// Correlation to narrow --process-model to
    #[arg(long = "correlation", value_parser = parse_identifier)]
    pub correlation: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Runtime and active-token KPIs for business-process engines - quartile runtime statistics per flow node and in-flight token tracking over engine metrics."
)]
pub struct KpiArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Engine SQLite database to read metrics and flow node instances from
    #[arg(long = "db", global = true)]
    pub db_path: Option<String>,

    /// JSON snapshot with metrics and flow node instances
    #[arg(long = "snapshot", global = true)]
    pub snapshot_path: Option<String>,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config", short = 'c', global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// User id handed to the metrics store
    #[arg(long = "user-id", env = "FLOWKPI_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Access token handed to the metrics store
    #[arg(long = "token", env = "FLOWKPI_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}
