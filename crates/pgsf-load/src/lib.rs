//! Loader: stages local chunk files to Snowflake and
//! drives `COPY INTO`, plus execution of the emitted DDL script.

pub mod error;
pub mod loader;
pub mod retry;

pub use error::{LoadError, LoadResult};
pub use loader::{CopyOutcome, PutOutcome, SnowflakeLoader};
