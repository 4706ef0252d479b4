//! Rendering for the artifacts that aren't already owned by another
//! crate (`analysis_report.json`, `snowflake_objects.sql`, and
//! `mapping_decisions.yml`/`improvement_recommendations.md` come
//! straight out of `pgsf_introspect`/`pgsf_emitter`; this module adds
//! `load_plan.yml`, `copy_commands.sql`, and `summary.md`).

use pgsf_core::identifier::quote_identifier;
use pgsf_core::model::{AnalysisRun, MigrationResult, MigrationStatus, Table, TableKind, ValidationResult, ValidationStatus};
use pgsf_core::{
    config::{CaseStyle, DataFormat},
    PgsfResult,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct LoadPlanEntry {
    pub schema: String,
    pub table: String,
    pub columns: Vec<String>,
    pub format: DataFormat,
    pub chunk_rows: u32,
}

/// Build the load plan: one entry per base table, in introspection
/// order, independent of whether a table ultimately gets migrated.
pub fn build_load_plan(analysis: &AnalysisRun, format: DataFormat, chunk_rows: u32) -> Vec<LoadPlanEntry> {
    let mut entries = Vec::new();
    for schema in &analysis.schemas {
        for table in &schema.tables {
            if table.kind != TableKind::Base {
                continue;
            }
            entries.push(LoadPlanEntry {
                schema: schema.name.clone(),
                table: table.name.clone(),
                columns: table.columns.iter().map(|c| c.name.clone()).collect(),
                format,
                chunk_rows,
            });
        }
    }
    entries
}

pub fn render_load_plan(entries: &[LoadPlanEntry]) -> PgsfResult<String> {
    Ok(serde_yaml::to_string(entries)?)
}

/// One representative `COPY INTO` statement per table in the load
/// plan, for human inspection -- not the actual per-file statements
/// the loader issues. Identifiers are normalized and quoted with the
/// same [`quote_identifier`] policy the DDL emitter and the loader use,
/// so this artifact always matches what actually runs.
pub fn render_copy_commands(
    entries: &[LoadPlanEntry],
    stage: &str,
    file_format: &str,
    case_style: CaseStyle,
) -> String {
    let mut out = String::from("-- Representative COPY INTO commands (one example per table).\n-- The loader issues one such statement per staged chunk file.\n\n");
    for entry in entries {
        let qualified_table = format!(
            "{}.{}",
            quote_identifier(&entry.schema, case_style),
            quote_identifier(&entry.table, case_style)
        );
        let column_list = entry
            .columns
            .iter()
            .map(|c| quote_identifier(c, case_style))
            .collect::<Vec<_>>()
            .join(", ");
        let ext = match entry.format {
            DataFormat::Csv => "csv.gz",
            DataFormat::Parquet => "parquet",
        };
        out.push_str(&format!(
            "COPY INTO {qualified_table} ({column_list}) FROM @{stage} FILES = ('{}_{}_chunk_0001.{ext}') FILE_FORMAT = {file_format} MATCH_BY_COLUMN_NAME = CASE_INSENSITIVE ON_ERROR = 'ABORT_STATEMENT' PURGE = FALSE;\n",
            entry.schema, entry.table,
        ));
    }
    out
}

/// Human-readable run report, written once at finalize.
pub fn render_summary(
    analysis: &AnalysisRun,
    status: &str,
    migration_results: &[MigrationResult],
    validation_results: &[ValidationResult],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Migration run {}\n\n", analysis.run_id));
    out.push_str(&format!("Source: `{}` on `{}`\n\n", analysis.source_db, analysis.host));
    out.push_str(&format!("Final status: **{status}**\n\n"));

    out.push_str(&format!(
        "Volumetrics: {} tables scanned, {} total rows, {} bytes.\n\n",
        analysis.schemas.iter().map(|s| s.tables.len()).sum::<usize>(),
        analysis.volumetrics.total_approx_rows,
        analysis.volumetrics.total_size_bytes,
    ));

    if !analysis.compatibility_flags.is_empty() {
        out.push_str("## Compatibility flags\n\n");
        for flag in &analysis.compatibility_flags {
            out.push_str(&format!("- {}: {}\n", flag.schema, flag.message));
        }
        out.push('\n');
    }

    if !migration_results.is_empty() {
        out.push_str("## Migration results\n\n");
        out.push_str("| Schema | Table | Status | Rows loaded | Files | Retries | Duration (ms) |\n");
        out.push_str("|---|---|---|---|---|---|---|\n");
        let mut total_rows = 0u64;
        for r in migration_results {
            total_rows += r.rows_loaded;
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                r.schema,
                r.table,
                status_label(r.status),
                r.rows_loaded,
                r.file_count,
                r.retries,
                r.duration_ms,
            ));
        }
        out.push_str(&format!("\nTotal rows loaded: {total_rows}\n\n"));
    }

    if !validation_results.is_empty() {
        out.push_str("## Validation results\n\n");
        out.push_str("| Schema | Table | Check | Status | Details |\n");
        out.push_str("|---|---|---|---|---|\n");
        for v in validation_results {
            out.push_str(&format!(
                "| {} | {} | {:?} | {} | {} |\n",
                v.schema,
                v.table,
                v.check,
                validation_status_label(v.status),
                v.details,
            ));
        }
    }

    out
}

fn status_label(status: MigrationStatus) -> &'static str {
    match status {
        MigrationStatus::Completed => "COMPLETED",
        MigrationStatus::Failed => "FAILED",
        MigrationStatus::UploadFailed => "UPLOAD_FAILED",
        MigrationStatus::Skipped => "SKIPPED",
    }
}

fn validation_status_label(status: ValidationStatus) -> &'static str {
    match status {
        ValidationStatus::Pass => "PASS",
        ValidationStatus::Fail => "FAIL",
        ValidationStatus::Skip => "SKIP",
        ValidationStatus::Error => "ERROR",
    }
}

/// Tables in the analysis that are eligible for migration: base
/// tables only, in introspection order.
pub fn base_tables(analysis: &AnalysisRun) -> Vec<(&str, &Table)> {
    let mut out = Vec::new();
    for schema in &analysis.schemas {
        for table in &schema.tables {
            if table.kind == TableKind::Base {
                out.push((schema.name.as_str(), table));
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "artifacts_test.rs"]
mod tests;
