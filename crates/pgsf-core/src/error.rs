//! Error taxonomy for the migration engine.

use thiserror::Error;

/// Top-level error type shared by every phase of the migration engine.
#[derive(Error, Debug)]
pub enum PgsfError {
    /// Invalid preferences or request shape; surfaced synchronously at
    /// acceptance, before any phase starts.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Could not open the source or target connection. Fatal to the
    /// current phase; retried only by user action.
    #[error("connection failed: {0}")]
    Connect(String),

    /// An introspection catalog query failed. Fatal to analyze.
    #[error("catalog query failed: {0}")]
    CatalogQuery(String),

    /// Cursor or file-write failure during extraction. Fatal to the one
    /// table being extracted.
    #[error("extract failed for {schema}.{table}: {message}")]
    Extract {
        schema: String,
        table: String,
        message: String,
    },

    /// PUT upload exhausted its retry budget for one staged file.
    #[error("stage upload failed for {file}: {message}")]
    StageUpload { file: String, message: String },

    /// COPY INTO exhausted its retry budget for one staged file.
    #[error("copy into failed for {file}: {message}")]
    Copy { file: String, message: String },

    /// A validation query itself errored (distinct from a failed check).
    #[error("validation query failed for {schema}.{table} ({check}): {message}")]
    Validation {
        schema: String,
        table: String,
        check: String,
        message: String,
    },

    /// The run was cancelled; the orchestrator will transition to
    /// `CANCELLED` at the next checkpoint.
    #[error("run cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type PgsfResult<T> = Result<T, PgsfError>;
