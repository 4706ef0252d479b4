//! Validator: runs four per-table checks and renders a
//! standalone re-verification script.

pub mod checks;
pub mod error;
pub mod scalar;
pub mod sql_artifact;

use pgsf_core::config::CaseStyle;
use pgsf_core::model::{Table, ValidationResult};
use snowflake_api::SnowflakeApi;
use tokio_postgres::Client;

pub use error::{ValidateError, ValidateResult};

/// Run all four checks for one table, returning all four results
/// (some may be SKIP). A query error aborts the whole table's checks.
pub async fn validate_table(
    pg_client: &Client,
    sf_api: &SnowflakeApi,
    schema: &str,
    table: &Table,
    case_style: CaseStyle,
) -> ValidateResult<Vec<ValidationResult>> {
    let not_null_columns: Vec<String> = table
        .columns
        .iter()
        .filter(|c| !c.nullable)
        .map(|c| c.name.clone())
        .collect();

    let pk_columns: Vec<String> = table
        .constraints
        .primary_keys
        .first()
        .map(|pk| pk.columns.clone())
        .unwrap_or_default();

    let json_columns: Vec<String> = table
        .columns
        .iter()
        .filter(|c| c.udt_name == "json" || c.udt_name == "jsonb")
        .map(|c| c.name.clone())
        .collect();

    Ok(vec![
        checks::row_count(pg_client, sf_api, schema, &table.name, case_style).await?,
        checks::not_null(sf_api, schema, &table.name, &not_null_columns, case_style).await?,
        checks::pk_duplicates(sf_api, schema, &table.name, &pk_columns, case_style).await?,
        checks::json_validity(sf_api, schema, &table.name, &json_columns, case_style).await?,
    ])
}
