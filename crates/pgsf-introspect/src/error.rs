//! Introspection-specific error type, convertible into the shared
//! [`pgsf_core::PgsfError`] taxonomy.

use pgsf_core::PgsfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntrospectError {
    #[error("failed to connect to PostgreSQL at {host}:{port}/{database}: {source}")]
    Connect {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("catalog query '{query}' failed: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("TLS setup failed: {0}")]
    Tls(String),
}

impl From<IntrospectError> for PgsfError {
    fn from(err: IntrospectError) -> Self {
        match err {
            IntrospectError::Connect { .. } | IntrospectError::Tls(_) => {
                PgsfError::Connect(err.to_string())
            }
            IntrospectError::Query { .. } => PgsfError::CatalogQuery(err.to_string()),
        }
    }
}

pub type IntrospectResult<T> = Result<T, IntrospectError>;
