//! pgsf - drives a PostgreSQL-to-Snowflake migration run from a config file.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result: Result<()> = match &cli.command {
        cli::Commands::Run(args) => commands::run::execute(args, &cli.global).await,
        cli::Commands::Artifacts(args) => commands::artifacts::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(exit_code) = err.downcast_ref::<commands::common::ExitCode>() {
            std::process::exit(exit_code.0);
        }
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
