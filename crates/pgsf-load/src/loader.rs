//! Snowflake PUT/COPY driver.

use std::collections::HashSet;
use std::path::Path;

use pgsf_core::config::{AuthConfig, CaseStyle, SnowflakeConfig};
use pgsf_core::identifier::quote_identifier;
use snowflake_api::{QueryResult, SnowflakeApi};

use crate::error::{LoadError, LoadResult};
use crate::retry::retry_with_backoff_counted;

pub struct CopyOutcome {
    pub rows_loaded: u64,
    pub duration_ms: u64,
    pub retries: u32,
}

pub struct PutOutcome {
    pub staged_name: String,
    pub retries: u32,
}

pub struct SnowflakeLoader {
    api: SnowflakeApi,
    stage: String,
    file_format: String,
    /// Keyed by staged basename; skips a COPY already completed this
    /// run so a retried batch doesn't double-load a succeeded chunk.
    loaded_files: HashSet<String>,
}

/// Build a bare `SnowflakeApi` session from the run's target config.
/// Shared by [`SnowflakeLoader::connect`] and by the validator, which
/// opens its own short-lived connection for the `Validating` phase
/// rather than reusing a loader's (connections are acquired at phase
/// entry and released at phase exit).
pub fn connect_api(cfg: &SnowflakeConfig, auth: &AuthConfig) -> LoadResult<SnowflakeApi> {
    SnowflakeApi::with_oauth_access_token_auth(
        &cfg.account,
        Some(&cfg.warehouse),
        Some(&cfg.database),
        Some(&cfg.schema),
        cfg.default_role.as_str(),
        auth.access_token.clone(),
    )
    .map_err(|e| LoadError::Connect(e.to_string()))
}

impl SnowflakeLoader {
    pub fn connect(cfg: &SnowflakeConfig, auth: &AuthConfig) -> LoadResult<Self> {
        let api = connect_api(cfg, auth)?;

        Ok(SnowflakeLoader {
            api,
            stage: cfg.stage.clone(),
            file_format: cfg.file_format.clone(),
            loaded_files: HashSet::new(),
        })
    }

    /// Upload `path` to the configured stage; auto-compress and
    /// overwrite are both disabled so idempotency rests on the stable
    /// chunk filename. Retries with the shared backoff policy.
    pub async fn put_file(&mut self, path: &Path) -> LoadResult<PutOutcome> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stage = self.stage.clone();
        let path_str = path.to_string_lossy().to_string();

        let (_, retries) = retry_with_backoff_counted(
            || {
                let api = &self.api;
                let cmd = format!(
                    "PUT file://{path_str} @{stage} AUTO_COMPRESS=FALSE OVERWRITE=FALSE"
                );
                async move {
                    api.exec(&cmd)
                        .await
                        .map_err(|e| LoadError::Put {
                            file: file_name.clone(),
                            message: e.to_string(),
                        })
                }
            },
            LoadError::is_retryable,
        )
        .await?;

        Ok(PutOutcome {
            staged_name: file_name_of(path),
            retries,
        })
    }

    /// Run one `COPY INTO` for a staged file. Skips the network call
    /// entirely (returning a zero-row, zero-duration outcome) if this
    /// file already succeeded earlier in the run.
    ///
    /// Schema, table, and column names are normalized and quoted with
    /// the same [`quote_identifier`] policy the DDL emitter used to
    /// create these objects, so the explicit column list always
    /// resolves to the identifiers that actually exist on the target.
    pub async fn copy_into(
        &mut self,
        schema: &str,
        table: &str,
        staged_file: &str,
        columns: &[String],
        case_style: CaseStyle,
    ) -> LoadResult<CopyOutcome> {
        if self.loaded_files.contains(staged_file) {
            return Ok(CopyOutcome {
                rows_loaded: 0,
                duration_ms: 0,
                retries: 0,
            });
        }

        let qualified_table = format!(
            "{}.{}",
            quote_identifier(schema, case_style),
            quote_identifier(table, case_style)
        );
        let column_list = columns
            .iter()
            .map(|c| quote_identifier(c, case_style))
            .collect::<Vec<_>>()
            .join(", ");
        let stage = self.stage.clone();
        let file_format = self.file_format.clone();
        let cmd = format!(
            "COPY INTO {qualified_table} ({column_list}) FROM @{stage} FILES = ('{staged_file}') FILE_FORMAT = {file_format} MATCH_BY_COLUMN_NAME = CASE_INSENSITIVE ON_ERROR = 'ABORT_STATEMENT' PURGE = FALSE"
        );

        let started = std::time::Instant::now();
        let (result, retries) = retry_with_backoff_counted(
            || {
                let api = &self.api;
                let cmd = cmd.clone();
                let staged_file = staged_file.to_string();
                async move {
                    api.exec(&cmd).await.map_err(|e| LoadError::Copy {
                        file: staged_file,
                        message: e.to_string(),
                    })
                }
            },
            LoadError::is_retryable,
        )
        .await?;

        let rows_loaded = parse_rows_loaded(&result);
        self.loaded_files.insert(staged_file.to_string());

        Ok(CopyOutcome {
            rows_loaded,
            duration_ms: started.elapsed().as_millis() as u64,
            retries,
        })
    }

    /// Split `script` on `;` and execute each non-empty statement. Any
    /// statement failure aborts the remaining script.
    pub async fn execute_ddl_script(&self, script: &str) -> LoadResult<()> {
        for statement in script.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            self.api
                .exec(statement)
                .await
                .map_err(|e| LoadError::Ddl {
                    message: format!("{e} (statement: {})", &statement[..statement.len().min(100)]),
                })?;
        }
        Ok(())
    }
}

/// COPY INTO's result set has one row per staged file with (at least)
/// a `status` and a `rows_loaded` column; sum rows for files whose
/// status is `LOADED`.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn parse_rows_loaded(result: &QueryResult) -> u64 {
    let QueryResult::Arrow(batches) = result else {
        return 0;
    };

    let mut total = 0u64;
    for batch in batches {
        let schema = batch.schema();
        let status_idx = schema
            .fields()
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case("status"));
        let rows_idx = schema
            .fields()
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case("rows_loaded"));

        let (Some(status_idx), Some(rows_idx)) = (status_idx, rows_idx) else {
            continue;
        };

        let statuses = batch
            .column(status_idx)
            .as_any()
            .downcast_ref::<arrow::array::StringArray>();
        let rows = batch
            .column(rows_idx)
            .as_any()
            .downcast_ref::<arrow::array::Int64Array>();

        if let (Some(statuses), Some(rows)) = (statuses, rows) {
            for i in 0..batch.num_rows() {
                if statuses.value(i).eq_ignore_ascii_case("LOADED") {
                    total += rows.value(i).max(0) as u64;
                }
            }
        }
    }
    total
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
