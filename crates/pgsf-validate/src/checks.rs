//! The four per-table validation checks.

use pgsf_core::config::CaseStyle;
use pgsf_core::identifier::quote_identifier;
use pgsf_core::model::{ValidationCheck, ValidationResult, ValidationStatus};
use snowflake_api::SnowflakeApi;
use tokio_postgres::Client;

use crate::error::ValidateResult;
use crate::scalar::{pg_count, sf_count, sf_row_count_of};

/// Source-side qualifier: Postgres identifiers are quoted exactly as
/// introspected, never case-normalized (that policy is target-only).
fn quoted_table_pg(schema: &str, table: &str) -> String {
    format!("\"{schema}\".\"{table}\"")
}

/// Target-side qualifier: normalized and quoted with the same
/// [`quote_identifier`] policy the DDL emitter used to create these
/// objects, so every validation query resolves to the real column.
fn quoted_table_sf(schema: &str, table: &str, case_style: CaseStyle) -> String {
    format!(
        "{}.{}",
        quote_identifier(schema, case_style),
        quote_identifier(table, case_style)
    )
}

pub async fn row_count(
    pg_client: &Client,
    sf_api: &SnowflakeApi,
    schema: &str,
    table: &str,
    case_style: CaseStyle,
) -> ValidateResult<ValidationResult> {
    let pg_qualified = quoted_table_pg(schema, table);
    let sf_qualified = quoted_table_sf(schema, table, case_style);
    let pg_value = pg_count(pg_client, &format!("SELECT COUNT(*) FROM {pg_qualified}")).await?;
    let sf_value = sf_count(sf_api, &format!("SELECT COUNT(*) FROM {sf_qualified}")).await?;

    let (status, message) = if pg_value == sf_value {
        (ValidationStatus::Pass, format!("row counts match ({pg_value})"))
    } else {
        (
            ValidationStatus::Fail,
            format!("row count mismatch: postgres={pg_value}, snowflake={sf_value}"),
        )
    };

    Ok(ValidationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        check: ValidationCheck::RowCount,
        status,
        details: format!("postgres={pg_value}, snowflake={sf_value}"),
        message,
    })
}

pub async fn not_null(
    sf_api: &SnowflakeApi,
    schema: &str,
    table: &str,
    not_null_columns: &[String],
    case_style: CaseStyle,
) -> ValidateResult<ValidationResult> {
    if not_null_columns.is_empty() {
        return Ok(skip(schema, table, ValidationCheck::NotNull, "no NOT NULL columns"));
    }

    let qualified = quoted_table_sf(schema, table, case_style);
    let mut violations = Vec::new();
    for column in not_null_columns {
        let quoted_column = quote_identifier(column, case_style);
        let count = sf_count(
            sf_api,
            &format!("SELECT COUNT(*) FROM {qualified} WHERE {quoted_column} IS NULL"),
        )
        .await?;
        if count > 0 {
            violations.push(format!("{column}={count}"));
        }
    }

    let (status, message) = if violations.is_empty() {
        (ValidationStatus::Pass, "all NOT NULL constraints satisfied".to_string())
    } else {
        (
            ValidationStatus::Fail,
            format!("{} column(s) have NULL violations", violations.len()),
        )
    };

    Ok(ValidationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        check: ValidationCheck::NotNull,
        status,
        details: violations.join(", "),
        message,
    })
}

pub async fn pk_duplicates(
    sf_api: &SnowflakeApi,
    schema: &str,
    table: &str,
    pk_columns: &[String],
    case_style: CaseStyle,
) -> ValidateResult<ValidationResult> {
    if pk_columns.is_empty() {
        return Ok(skip(schema, table, ValidationCheck::PkDuplicates, "no primary key defined"));
    }

    let qualified = quoted_table_sf(schema, table, case_style);
    let pk_list = pk_columns
        .iter()
        .map(|c| quote_identifier(c, case_style))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {pk_list}, COUNT(*) AS cnt FROM {qualified} GROUP BY {pk_list} HAVING COUNT(*) > 1 LIMIT 10"
    );
    let duplicate_groups = sf_row_count_of(sf_api, &sql).await?;

    let (status, message) = if duplicate_groups == 0 {
        (ValidationStatus::Pass, "no duplicate primary keys found".to_string())
    } else {
        (
            ValidationStatus::Fail,
            format!("found {duplicate_groups} duplicate primary key combination(s) (showing first 10)"),
        )
    };

    Ok(ValidationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        check: ValidationCheck::PkDuplicates,
        status,
        details: format!("duplicate_groups={duplicate_groups}"),
        message,
    })
}

pub async fn json_validity(
    sf_api: &SnowflakeApi,
    schema: &str,
    table: &str,
    json_columns: &[String],
    case_style: CaseStyle,
) -> ValidateResult<ValidationResult> {
    if json_columns.is_empty() {
        return Ok(skip(schema, table, ValidationCheck::JsonValidity, "no JSON columns"));
    }

    let qualified = quoted_table_sf(schema, table, case_style);
    let mut invalid_total = 0i64;
    let mut invalid_columns = Vec::new();
    for column in json_columns {
        let quoted_column = quote_identifier(column, case_style);
        let count = sf_count(
            sf_api,
            &format!(
                "SELECT COUNT(*) FROM {qualified} WHERE {quoted_column} IS NOT NULL AND TRY_PARSE_JSON({quoted_column}) IS NULL"
            ),
        )
        .await?;
        if count > 0 {
            invalid_total += count;
            invalid_columns.push(format!("{column}={count}"));
        }
    }

    let (status, message) = if invalid_columns.is_empty() {
        (ValidationStatus::Pass, "all JSON values are valid".to_string())
    } else {
        (
            ValidationStatus::Fail,
            format!("{invalid_total} invalid JSON value(s) found"),
        )
    };

    Ok(ValidationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        check: ValidationCheck::JsonValidity,
        status,
        details: invalid_columns.join(", "),
        message,
    })
}

fn skip(schema: &str, table: &str, check: ValidationCheck, message: &str) -> ValidationResult {
    ValidationResult {
        schema: schema.to_string(),
        table: table.to_string(),
        check,
        status: ValidationStatus::Skip,
        details: String::new(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[path = "checks_test.rs"]
mod tests;
