//! Request configuration types.
//!
//! Mirrors the shape of a single `MigrationRequest` accepted at run
//! start. Deserializable from YAML or JSON; unknown fields are
//! rejected so typos in a hand-written request surface immediately
//! instead of being silently ignored.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{PgsfError, PgsfResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

impl Default for SslMode {
    fn default() -> Self {
        SslMode::Prefer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SslConfig {
    #[serde(default)]
    pub mode: SslMode,
    pub ca: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostgresConfig {
    pub host: String,
    #[serde(default = "default_pg_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub schemas: Vec<String>,
    pub ssl: Option<SslConfig>,
}

fn default_pg_port() -> u16 {
    5432
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnowflakeConfig {
    pub account: String,
    pub warehouse: String,
    pub database: String,
    pub default_role: String,
    pub schema: String,
    pub stage: String,
    pub file_format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// OAuth bearer token. Never logged in the clear; see
    /// [`crate::redact::redact`].
    pub access_token: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataFormat {
    Csv,
    Parquet,
}

impl Default for DataFormat {
    fn default() -> Self {
        DataFormat::Csv
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CaseStyle {
    Upper,
    Lower,
    Preserve,
}

impl Default for CaseStyle {
    fn default() -> Self {
        CaseStyle::Upper
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Preferences {
    #[serde(default)]
    pub format: DataFormat,
    #[serde(default = "default_max_chunk_mb")]
    pub max_chunk_mb: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
    #[serde(default = "default_true")]
    pub use_identity_for_serial: bool,
    #[serde(default)]
    pub cluster_key_hints: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub case_style: CaseStyle,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_max_chunk_mb() -> u32 {
    200
}

fn default_parallelism() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            format: DataFormat::default(),
            max_chunk_mb: default_max_chunk_mb(),
            parallelism: default_parallelism(),
            use_identity_for_serial: true,
            cluster_key_hints: HashMap::new(),
            case_style: CaseStyle::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlConfig {
    pub run_id: Option<String>,
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationRequest {
    pub postgres: PostgresConfig,
    pub snowflake: SnowflakeConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub control: ControlConfig,
}

impl MigrationRequest {
    pub fn from_yaml(text: &str) -> PgsfResult<Self> {
        let req: MigrationRequest = serde_yaml::from_str(text)?;
        req.validate()?;
        Ok(req)
    }

    pub fn from_json(text: &str) -> PgsfResult<Self> {
        let req: MigrationRequest = serde_json::from_str(text)?;
        req.validate()?;
        Ok(req)
    }

    /// Synchronous shape/range validation performed at acceptance,
    /// before any phase starts, surfaced as `ConfigError`.
    pub fn validate(&self) -> PgsfResult<()> {
        if self.postgres.host.is_empty() {
            return Err(PgsfError::Config("postgres.host must not be empty".into()));
        }
        if self.snowflake.account.is_empty() {
            return Err(PgsfError::Config(
                "snowflake.account must not be empty".into(),
            ));
        }
        if !(1..=1000).contains(&self.preferences.max_chunk_mb) {
            return Err(PgsfError::Config(
                "preferences.max_chunk_mb must be in 1..=1000".into(),
            ));
        }
        if !(1..=16).contains(&self.preferences.parallelism) {
            return Err(PgsfError::Config(
                "preferences.parallelism must be in 1..=16".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
