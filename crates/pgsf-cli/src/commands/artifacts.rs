//! `pgsf artifacts` - inspect a prior run's workspace on disk.
//!
//! Unlike `run`, this does not go through [`pgsf_orchestrator::RunRegistry`]:
//! that registry is an in-process handle, gone once the CLI process that
//! ran the migration exits. Artifacts on disk outlive the process, so
//! this command reads them directly from the workspace tree.

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use crate::cli::{ArtifactsArgs, GlobalArgs};

pub async fn execute(args: &ArtifactsArgs, global: &GlobalArgs) -> Result<()> {
    let run_id = Uuid::parse_str(&args.run_id).context("run id must be a UUID")?;
    let run_dir = std::path::Path::new(&global.workspace_root)
        .join(run_id.to_string())
        .join("artifacts");

    if !run_dir.is_dir() {
        bail!("no artifacts directory for run {run_id} under {}", global.workspace_root);
    }

    if let Some(name) = &args.show {
        let path = run_dir.join(name);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading artifact {}", path.display()))?;
        print!("{text}");
        return Ok(());
    }

    let mut names: Vec<String> = std::fs::read_dir(&run_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    for name in names {
        println!("{name}");
    }

    Ok(())
}
