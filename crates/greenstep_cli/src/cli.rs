//! CLI argument definitions for the `greenstep` binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Browse the GreenStep community tree catalog from the terminal
#[derive(Parser, Debug)]
#[command(name = "greenstep")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// JSON file overriding catalog settings (latency, failure rate, QR endpoint)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip simulated network latency
    #[arg(long, global = true)]
    pub instant: bool,

    /// Override the injected failure probability of "list all trees"
    #[arg(long, global = true)]
    pub failure_rate: Option<f64>,

    /// Log level: trace|debug|info|warn|error (needs --log-dir)
    #[arg(long, global = true, requires = "log_dir")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the catalog once and print it
    List(ListArgs),
    /// Show full details of one tree
    Show(ShowArgs),
    /// Print the deep link and QR image URL of one tree
    Qr(QrArgs),
    /// Load the catalog, retrying manually after failures
    Browse(BrowseArgs),
    /// Smoke probe of the core crate
    Ping,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive filter on name, species or location
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Print matching records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Tree identifier, e.g. tree-001
    pub id: String,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct QrArgs {
    /// Tree identifier, e.g. tree-001
    pub id: String,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Case-insensitive filter on name, species or location
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// How many times to press "Try Again" after a failed load
    #[arg(short, long, default_value_t = 3)]
    pub retries: u32,

    /// Open the detail view of this tree once loaded
    #[arg(long)]
    pub select: Option<String>,
}
