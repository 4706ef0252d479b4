//! Extraction error type. Any error here is fatal to the one table
//! being extracted and never leaves a partial chunk file
//! considered valid.

use pgsf_core::PgsfError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type ExtractResult<T> = Result<T, ExtractError>;

impl ExtractError {
    pub fn into_pgsf(self, schema: &str, table: &str) -> PgsfError {
        PgsfError::Extract {
            schema: schema.to_string(),
            table: table.to_string(),
            message: self.to_string(),
        }
    }
}
