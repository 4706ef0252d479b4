//! Validator error type. A validation *query* failure (this error) is
//! distinct from a validation *check* failing its PASS condition,
//! which is recorded as a `FAIL` result, not an error.

use pgsf_core::PgsfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("postgres query failed: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("snowflake query failed: {0}")]
    Snowflake(String),
}

impl ValidateError {
    pub fn into_pgsf(self, schema: &str, table: &str, check: &str) -> PgsfError {
        PgsfError::Validation {
            schema: schema.to_string(),
            table: table.to_string(),
            check: check.to_string(),
            message: self.to_string(),
        }
    }
}

pub type ValidateResult<T> = Result<T, ValidateError>;
