//! CLI argument definitions using clap derive API.

use clap::{Args, Parser, Subcommand};

/// pgsf - drives a PostgreSQL-to-Snowflake migration run from a config file.
#[derive(Parser, Debug)]
#[command(name = "pgsf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Root directory under which per-run workspaces (artifacts + scratch) are created.
    #[arg(short = 'w', long, global = true, default_value = "./pgsf-runs")]
    pub workspace_root: String,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive one migration request to completion (or to AWAITING_CONFIRMATION).
    Run(RunArgs),

    /// List or print the artifacts a completed run produced.
    Artifacts(ArtifactsArgs),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to a YAML or JSON migration request.
    #[arg(short, long)]
    pub config: String,
}

/// Arguments for the `artifacts` command.
#[derive(Args, Debug)]
pub struct ArtifactsArgs {
    /// Run id whose workspace to inspect.
    pub run_id: String,

    /// Print the named artifact's contents instead of listing all of them.
    #[arg(short, long)]
    pub show: Option<String>,
}
