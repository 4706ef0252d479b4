//! pgsf-core - shared types, config, error taxonomy, and run registry
//! for the Postgres-to-Snowflake migration engine.

pub mod config;
pub mod error;
pub mod identifier;
pub mod model;
pub mod phase;
pub mod redact;
pub mod run_store;

pub use error::{PgsfError, PgsfResult};
