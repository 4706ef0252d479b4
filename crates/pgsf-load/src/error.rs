//! Loader error type, convertible into [`pgsf_core::PgsfError`].

use pgsf_core::PgsfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to connect to Snowflake: {0}")]
    Connect(String),

    #[error("PUT failed for {file}: {message}")]
    Put { file: String, message: String },

    #[error("COPY INTO failed for {file}: {message}")]
    Copy { file: String, message: String },

    #[error("DDL statement failed: {message}")]
    Ddl { message: String },
}

impl LoadError {
    /// Most Snowflake session/network failures are worth a retry;
    /// malformed-statement errors (our own bug, not a transient fault)
    /// are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LoadError::Ddl { .. })
    }

    pub fn into_pgsf(self) -> PgsfError {
        match self {
            LoadError::Connect(msg) => PgsfError::Connect(msg),
            LoadError::Put { file, message } => PgsfError::StageUpload { file, message },
            LoadError::Copy { file, message } => PgsfError::Copy { file, message },
            LoadError::Ddl { message } => PgsfError::Config(message),
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;
