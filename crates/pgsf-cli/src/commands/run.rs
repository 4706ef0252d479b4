//! `pgsf run` - drive one migration request to completion.

use std::sync::Arc;

use anyhow::Result;
use pgsf_orchestrator::{Orchestrator, Phase};

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{load_request, ExitCode};

pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let request = load_request(&args.config)?;
    let workspace_root = std::path::Path::new(&global.workspace_root);
    std::fs::create_dir_all(workspace_root)?;

    let orchestrator = Arc::new(Orchestrator::new(request, workspace_root)?);
    let run_id = orchestrator.run_id();
    println!(
        "run {run_id} started, workspace {}",
        orchestrator.workspace().root.display()
    );

    let outcome = orchestrator.run().await?;

    println!();
    println!("run {run_id} finished in phase {:?}", outcome.status);
    if let Some(analysis) = &outcome.analysis {
        println!(
            "  discovered {} schema(s), {} table(s)",
            analysis.schemas.len(),
            analysis
                .schemas
                .iter()
                .map(|s| s.tables.len())
                .sum::<usize>()
        );
    }
    for result in &outcome.migration_results {
        println!(
            "  {}.{}: {:?} ({} rows, {} retries)",
            result.schema, result.table, result.status, result.rows_loaded, result.retries
        );
    }
    for result in &outcome.validation_results {
        println!(
            "  validate {}.{} [{:?}]: {:?} - {}",
            result.schema, result.table, result.check, result.status, result.message
        );
    }

    match outcome.status {
        Phase::Completed => Ok(()),
        Phase::AwaitingConfirmation => {
            println!();
            println!("awaiting confirmation; re-run with the same run_id to continue past analysis");
            Err(ExitCode(2).into())
        }
        Phase::Cancelled => Err(ExitCode(3).into()),
        _ => Err(ExitCode(1).into()),
    }
}
