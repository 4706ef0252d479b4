//! The phased migration orchestrator.
//!
//! Owns the phase state machine, the per-run workspace, the progress
//! snapshot, the structured log ring, and the confirmation gate. Table
//! extraction and load are fanned out over a bounded worker pool
//! during `EXECUTING`; each worker opens its own source and target
//! connections, never shared across workers.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use pgsf_core::config::MigrationRequest;
use pgsf_core::model::{AnalysisRun, MigrationResult, MigrationStatus, Table, ValidationResult};
use pgsf_core::phase::{Phase, Progress, TableProgress, TableProgressState};
use pgsf_core::{PgsfError, PgsfResult};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::artifacts;
use crate::log_ring::LogRing;
use crate::workspace::RunWorkspace;

pub struct Orchestrator {
    request: MigrationRequest,
    workspace: RunWorkspace,
    progress: Mutex<Progress>,
    cancel: AtomicBool,
    log_ring: LogRing,
}

/// Everything the run produced, returned once the orchestrator reaches
/// a terminal phase (or `AwaitingConfirmation`, if nobody confirmed).
pub struct RunOutcome {
    pub status: Phase,
    pub analysis: Option<AnalysisRun>,
    pub migration_results: Vec<MigrationResult>,
    pub validation_results: Vec<ValidationResult>,
}

impl Orchestrator {
    pub fn new(request: MigrationRequest, workspace_root: &Path) -> PgsfResult<Self> {
        request.validate()?;
        let run_id = match &request.control.run_id {
            Some(raw) => {
                Uuid::parse_str(raw).map_err(|e| PgsfError::Config(format!("invalid run_id: {e}")))?
            }
            None => Uuid::new_v4(),
        };
        let workspace = RunWorkspace::create(workspace_root, run_id)?;
        let log_ring = LogRing::new(run_id);
        let progress = Mutex::new(Progress {
            phase: Phase::Pending,
            percent: 0.0,
            tables_completed: 0,
            tables_total: 0,
            per_table: Vec::new(),
        });

        Ok(Orchestrator {
            request,
            workspace,
            progress,
            cancel: AtomicBool::new(false),
            log_ring,
        })
    }

    pub fn run_id(&self) -> Uuid {
        self.workspace.run_id
    }

    pub fn workspace(&self) -> &RunWorkspace {
        &self.workspace
    }

    pub fn progress(&self) -> Progress {
        self.progress.lock().unwrap().clone()
    }

    /// Cooperative cancellation request: checked at phase
    /// boundaries and between tables, never force-aborts an in-flight
    /// PUT/COPY.
    pub fn request_cancel(&self) {
        self.log_ring.info("control", "cancel requested");
        self.cancel.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    fn set_phase(&self, next: Phase) {
        let mut progress = self.progress.lock().unwrap();
        if !progress.phase.can_transition_to(next) {
            log::error!(
                "illegal phase transition attempted: {:?} -> {:?}",
                progress.phase,
                next
            );
            debug_assert!(false, "illegal phase transition");
        }
        progress.phase = next;
        progress.percent = next.base_percent(progress.tables_completed, progress.tables_total);
        drop(progress);
        self.log_ring.info("phase", &format!("entered {next:?}"));
    }

    fn set_tables_total(&self, total: usize) {
        let mut progress = self.progress.lock().unwrap();
        progress.tables_total = total;
        let phase = progress.phase;
        progress.percent = phase.base_percent(progress.tables_completed, progress.tables_total);
    }

    fn mark_table_state(&self, schema: &str, table: &str, state: TableProgressState) {
        let mut progress = self.progress.lock().unwrap();
        if let Some(entry) = progress
            .per_table
            .iter_mut()
            .find(|t| t.schema == schema && t.table == table)
        {
            entry.state = state;
        } else {
            progress.per_table.push(TableProgress {
                schema: schema.to_string(),
                table: table.to_string(),
                state,
            });
        }
        progress.tables_completed = progress
            .per_table
            .iter()
            .filter(|t| matches!(t.state, TableProgressState::Done | TableProgressState::Failed))
            .count();
        let phase = progress.phase;
        progress.percent = phase.base_percent(progress.tables_completed, progress.tables_total);
    }

    fn finalize(
        &self,
        status_label: &str,
        analysis: Option<&AnalysisRun>,
        migration_results: &[MigrationResult],
        validation_results: &[ValidationResult],
    ) -> PgsfResult<()> {
        let summary = match analysis {
            Some(a) => artifacts::render_summary(a, status_label, migration_results, validation_results),
            None => format!("# Migration run\n\nFinal status: **{status_label}**\n\nNo analysis was produced (failure during ANALYZING).\n"),
        };
        std::fs::write(self.workspace.artifact_path("summary.md"), summary)?;
        self.log_ring
            .flush_ndjson(&self.workspace.artifact_path("run_log.ndjson"))?;
        Ok(())
    }

    /// Drive the full phase sequence to completion (or to
    /// `AwaitingConfirmation`, if `control.confirm` was never set).
    /// Must be called on an `Arc`-wrapped orchestrator so per-table
    /// workers can hold a `'static` handle back to shared state.
    pub async fn run(self: Arc<Self>) -> PgsfResult<RunOutcome> {
        self.set_phase(Phase::Analyzing);

        let analysis = match pgsf_introspect::introspect(
            &self.request.postgres,
            self.request.postgres.database.clone(),
        )
        .await
        {
            Ok(a) => a,
            Err(e) => {
                self.log_ring.error("introspect", &e.to_string());
                self.set_phase(Phase::Failed);
                self.finalize("FAILED", None, &[], &[])?;
                return Err(e);
            }
        };

        std::fs::write(
            self.workspace.artifact_path("analysis_report.json"),
            serde_json::to_string_pretty(&analysis)?,
        )?;

        self.set_phase(Phase::Planning);

        let emission = pgsf_emitter::emit(&analysis, &self.request.snowflake, &self.request.preferences)?;
        std::fs::write(self.workspace.artifact_path("snowflake_objects.sql"), &emission.ddl_script)?;
        std::fs::write(
            self.workspace.artifact_path("mapping_decisions.yml"),
            &emission.mapping_manifest_yaml,
        )?;
        std::fs::write(
            self.workspace.artifact_path("improvement_recommendations.md"),
            &emission.improvement_recommendations,
        )?;

        let chunk_rows = pgsf_extract::DEFAULT_CHUNK_ROWS;
        let load_plan = artifacts::build_load_plan(&analysis, self.request.preferences.format, chunk_rows);
        std::fs::write(
            self.workspace.artifact_path("load_plan.yml"),
            artifacts::render_load_plan(&load_plan)?,
        )?;
        std::fs::write(
            self.workspace.artifact_path("copy_commands.sql"),
            artifacts::render_copy_commands(
                &load_plan,
                &self.request.snowflake.stage,
                &self.request.snowflake.file_format,
                self.request.preferences.case_style,
            ),
        )?;

        let validation_targets: Vec<pgsf_validate::sql_artifact::ValidationTarget<'_>> =
            artifacts::base_tables(&analysis)
                .into_iter()
                .map(|(schema, table)| pgsf_validate::sql_artifact::ValidationTarget { schema, table })
                .collect();
        std::fs::write(
            self.workspace.artifact_path("post_migration_checks.sql"),
            pgsf_validate::sql_artifact::render(&validation_targets, self.request.preferences.case_style),
        )?;

        if self.request.preferences.dry_run {
            self.set_phase(Phase::Completed);
            self.finalize("COMPLETED", Some(&analysis), &[], &[])?;
            return Ok(RunOutcome {
                status: Phase::Completed,
                analysis: Some(analysis),
                migration_results: Vec::new(),
                validation_results: Vec::new(),
            });
        }

        self.set_phase(Phase::AwaitingConfirmation);

        if !self.request.control.confirm {
            self.log_ring
                .info("control", "awaiting confirmation; rerun with control.confirm=true");
            self.finalize("AWAITING_CONFIRMATION", Some(&analysis), &[], &[])?;
            return Ok(RunOutcome {
                status: Phase::AwaitingConfirmation,
                analysis: Some(analysis),
                migration_results: Vec::new(),
                validation_results: Vec::new(),
            });
        }

        if self.is_cancelled() {
            self.set_phase(Phase::Cancelled);
            self.finalize("CANCELLED", Some(&analysis), &[], &[])?;
            return Ok(RunOutcome {
                status: Phase::Cancelled,
                analysis: Some(analysis),
                migration_results: Vec::new(),
                validation_results: Vec::new(),
            });
        }

        self.set_phase(Phase::Executing);

        let ddl_loader = pgsf_load::loader::SnowflakeLoader::connect(&self.request.snowflake, &self.request.auth)
            .map_err(|e| e.into_pgsf())?;
        if let Err(e) = ddl_loader.execute_ddl_script(&emission.ddl_script).await {
            let pgsf_err = e.into_pgsf();
            self.log_ring.error("ddl", &pgsf_err.to_string());
            self.set_phase(Phase::Failed);
            self.finalize("FAILED", Some(&analysis), &[], &[])?;
            return Err(pgsf_err);
        }
        drop(ddl_loader);

        let base_tables: Vec<(String, Table)> = artifacts::base_tables(&analysis)
            .into_iter()
            .map(|(schema, table)| (schema.to_string(), table.clone()))
            .collect();
        self.set_tables_total(base_tables.len());

        let parallelism = self.request.preferences.parallelism as usize;
        let semaphore = Arc::new(Semaphore::new(parallelism));
        let results: Arc<Mutex<Vec<MigrationResult>>> = Arc::new(Mutex::new(Vec::new()));
        let mut handles = Vec::new();

        for (schema, table) in base_tables {
            if self.is_cancelled() {
                results.lock().unwrap().push(MigrationResult {
                    schema: schema.clone(),
                    table: table.name.clone(),
                    status: MigrationStatus::Skipped,
                    rows_loaded: 0,
                    file_count: 0,
                    duration_ms: 0,
                    retries: 0,
                    error: Some("run cancelled before this table started".to_string()),
                });
                self.mark_table_state(&schema, &table.name, TableProgressState::Done);
                continue;
            }

            let permit = semaphore.clone().acquire_owned().await.expect("semaphore not closed");
            let orchestrator = self.clone();
            let results = results.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = orchestrator.migrate_one_table(&schema, &table).await;
                results.lock().unwrap().push(result);
            });
            handles.push(handle);
        }

        for handle in handles {
            let _ = handle.await;
        }

        let migration_results = results.lock().unwrap().clone();

        self.set_phase(Phase::Validating);

        let validation_results = if self.is_cancelled() {
            Vec::new()
        } else {
            self.validate_completed_tables(&analysis, &migration_results).await
        };

        let any_failed = migration_results
            .iter()
            .any(|r| matches!(r.status, MigrationStatus::Failed | MigrationStatus::UploadFailed));
        let final_phase = if self.is_cancelled() {
            Phase::Cancelled
        } else if any_failed {
            Phase::Failed
        } else {
            Phase::Completed
        };
        self.set_phase(final_phase);
        self.finalize(
            &format!("{final_phase:?}").to_uppercase(),
            Some(&analysis),
            &migration_results,
            &validation_results,
        )?;

        Ok(RunOutcome {
            status: final_phase,
            analysis: Some(analysis),
            migration_results,
            validation_results,
        })
    }

    /// Extract-all-chunks then upload-each then COPY-each for one
    /// table, sequentially within the worker. Never propagates an
    /// error: per-table failures are recorded in the returned
    /// [`MigrationResult`] so sibling tables keep going.
    async fn migrate_one_table(&self, schema: &str, table: &Table) -> MigrationResult {
        let started = std::time::Instant::now();
        self.mark_table_state(schema, &table.name, TableProgressState::Extracting);

        let mut conn = match pgsf_introspect::connect::connect(&self.request.postgres).await {
            Ok(c) => c,
            Err(e) => {
                self.mark_table_state(schema, &table.name, TableProgressState::Failed);
                let message = PgsfError::from(e).to_string();
                self.log_ring.error("extract", &message);
                return failed_result(schema, &table.name, started, message);
            }
        };

        let extracted = pgsf_extract::extract_table(
            &mut conn.client,
            schema,
            &table.name,
            &table.columns,
            &self.workspace.scratch_dir,
            self.request.preferences.format,
            pgsf_extract::DEFAULT_CHUNK_ROWS,
        )
        .await;
        conn.close();

        let files = match extracted {
            Ok(files) => files,
            Err(e) => {
                self.mark_table_state(schema, &table.name, TableProgressState::Failed);
                let message = e.into_pgsf(schema, &table.name).to_string();
                self.log_ring.error("extract", &message);
                return failed_result(schema, &table.name, started, message);
            }
        };

        self.mark_table_state(schema, &table.name, TableProgressState::Loading);

        let mut loader = match pgsf_load::loader::SnowflakeLoader::connect(&self.request.snowflake, &self.request.auth)
        {
            Ok(l) => l,
            Err(e) => {
                self.mark_table_state(schema, &table.name, TableProgressState::Failed);
                let message = e.into_pgsf().to_string();
                self.log_ring.error("load", &message);
                return failed_result(schema, &table.name, started, message);
            }
        };

        let column_names: Vec<String> = table.columns.iter().map(|c| c.name.clone()).collect();
        let mut rows_loaded = 0u64;
        let mut retries = 0u32;
        let mut upload_failed = false;
        let mut copy_failed = false;
        let mut last_error = None;

        for file in &files {
            if self.is_cancelled() {
                break;
            }
            match loader.put_file(file).await {
                Ok(put) => {
                    retries += put.retries;
                    match loader
                        .copy_into(
                            schema,
                            &table.name,
                            &put.staged_name,
                            &column_names,
                            self.request.preferences.case_style,
                        )
                        .await
                    {
                        Ok(copy) => {
                            rows_loaded += copy.rows_loaded;
                            retries += copy.retries;
                        }
                        Err(e) => {
                            copy_failed = true;
                            let message = e.into_pgsf().to_string();
                            self.log_ring.error("copy", &message);
                            last_error = Some(message);
                        }
                    }
                }
                Err(e) => {
                    upload_failed = true;
                    let message = e.into_pgsf().to_string();
                    self.log_ring.error("put", &message);
                    last_error = Some(message);
                }
            }
        }

        let status = if upload_failed {
            MigrationStatus::UploadFailed
        } else if copy_failed {
            MigrationStatus::Failed
        } else {
            MigrationStatus::Completed
        };
        self.mark_table_state(
            schema,
            &table.name,
            if status == MigrationStatus::Completed {
                TableProgressState::Done
            } else {
                TableProgressState::Failed
            },
        );

        MigrationResult {
            schema: schema.to_string(),
            table: table.name.clone(),
            status,
            rows_loaded,
            file_count: files.len() as u32,
            duration_ms: started.elapsed().as_millis() as u64,
            retries,
            error: last_error,
        }
    }

    /// Validate every table whose load attempt completed. Connections
    /// are opened fresh for this phase and released at its end; a
    /// per-table validation error is recorded as an `ERROR` result for
    /// that check rather than aborting the phase (`ValidationError`
    /// never changes run status).
    async fn validate_completed_tables(
        &self,
        analysis: &AnalysisRun,
        migration_results: &[MigrationResult],
    ) -> Vec<ValidationResult> {
        let completed: std::collections::HashSet<(&str, &str)> = migration_results
            .iter()
            .filter(|r| r.status == MigrationStatus::Completed)
            .map(|r| (r.schema.as_str(), r.table.as_str()))
            .collect();
        if completed.is_empty() {
            return Vec::new();
        }

        let pg_conn = match pgsf_introspect::connect::connect(&self.request.postgres).await {
            Ok(c) => c,
            Err(e) => {
                self.log_ring.error("validate", &PgsfError::from(e).to_string());
                return Vec::new();
            }
        };
        let sf_api = match pgsf_load::loader::connect_api(&self.request.snowflake, &self.request.auth) {
            Ok(api) => api,
            Err(e) => {
                self.log_ring.error("validate", &e.into_pgsf().to_string());
                pg_conn.close();
                return Vec::new();
            }
        };

        let mut results = Vec::new();
        for (schema, table) in artifacts::base_tables(analysis) {
            if !completed.contains(&(schema, table.name.as_str())) {
                continue;
            }
            match pgsf_validate::validate_table(
                &pg_conn.client,
                &sf_api,
                schema,
                table,
                self.request.preferences.case_style,
            )
            .await
            {
                Ok(mut table_results) => results.append(&mut table_results),
                Err(e) => {
                    self.log_ring
                        .error("validate", &e.into_pgsf(schema, &table.name, "UNKNOWN").to_string());
                }
            }
        }
        pg_conn.close();
        results
    }
}

fn failed_result(schema: &str, table: &str, started: std::time::Instant, message: String) -> MigrationResult {
    MigrationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        status: MigrationStatus::Failed,
        rows_loaded: 0,
        file_count: 0,
        duration_ms: started.elapsed().as_millis() as u64,
        retries: 0,
        error: Some(message),
    }
}

#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;
