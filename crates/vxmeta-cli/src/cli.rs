//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};

/// vxmeta - metadata pipeline for verification databases
#[derive(Parser, Debug)]
#[command(name = "vxmeta")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file (default: ./vxmeta.yml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the store path (file path or :memory:)
    #[arg(short, long, global = true)]
    pub store: Option<String>,

    /// Override the metadata schema name
    #[arg(short = 'm', long, global = true)]
    pub metadata_schema: Option<String>,

    /// Override the cardinality guard limit
    #[arg(short = 'd', long, global = true)]
    pub limit: Option<u64>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate all candidate databases and publish the metadata tables
    Run(RunArgs),

    /// List the metadata tables and their row counts
    Show,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Emit the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
