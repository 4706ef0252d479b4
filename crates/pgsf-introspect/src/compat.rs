//! Compatibility flag pass.
//!
//! Advisory only — every flag raised here lands in
//! `analysis_report.json` for the operator to read before confirming
//! the run; none of them ever abort introspection.

use pgsf_core::identifier::RESERVED_WORDS;
use pgsf_core::model::{CompatibilityFlag, CompatibilityFlagKind, Schema};

/// Matches the mapper's `SNOWFLAKE_VARCHAR_CEILING`; kept as a
/// separate constant here rather than a cross-crate dependency since
/// the flag is advisory and the mapper's ceiling is authoritative.
const OVERSIZED_VARCHAR_THRESHOLD: i32 = 16_777_216;

const WIDE_TABLE_COLUMN_THRESHOLD: usize = 500;

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name.to_uppercase().as_str())
}

/// Categorize one column's `udt_name`/`source_type` into the set of
/// special-type labels it belongs to: JSON, ARRAY, USER-DEFINED, BYTEA,
/// UUID. A column can match more than one category (an array of
/// UUIDs is both `ARRAY` and `UUID`).
fn categorize_column(source_type: &str, udt_name: &str) -> Vec<&'static str> {
    let mut labels = Vec::new();
    let lower = source_type.to_ascii_lowercase();

    if lower.ends_with("[]") || udt_name.starts_with('_') {
        labels.push("ARRAY");
    }
    if lower == "json" || lower == "jsonb" {
        labels.push("JSON");
    }
    if source_type.eq_ignore_ascii_case("USER-DEFINED") {
        labels.push("USER-DEFINED");
    }
    if lower == "bytea" {
        labels.push("BYTEA");
    }
    if lower == "uuid" {
        labels.push("UUID");
    }
    labels
}

/// Collect the distinct special-type labels present anywhere in
/// `schema`'s base tables, for `Schema.special_types`.
pub fn special_types_for_schema(schema: &Schema) -> Vec<String> {
    let mut found = Vec::new();
    for table in &schema.tables {
        for column in &table.columns {
            for label in categorize_column(&column.source_type, &column.udt_name) {
                if !found.iter().any(|l: &String| l == label) {
                    found.push(label.to_string());
                }
            }
        }
    }
    found.sort();
    found
}

/// Walk a fully-populated schema and raise every flag that applies.
pub fn scan_schema(schema: &Schema) -> Vec<CompatibilityFlag> {
    let mut flags = Vec::new();

    if is_reserved(&schema.name) {
        flags.push(CompatibilityFlag {
            schema: schema.name.clone(),
            table: None,
            column: None,
            kind: CompatibilityFlagKind::ReservedIdentifier,
            message: format!(
                "schema name '{}' collides with a Snowflake reserved word",
                schema.name
            ),
        });
    }

    for table in &schema.tables {
        if is_reserved(&table.name) {
            flags.push(CompatibilityFlag {
                schema: schema.name.clone(),
                table: Some(table.name.clone()),
                column: None,
                kind: CompatibilityFlagKind::ReservedIdentifier,
                message: format!(
                    "table name '{}' collides with a Snowflake reserved word",
                    table.name
                ),
            });
        }

        if table.columns.len() > WIDE_TABLE_COLUMN_THRESHOLD {
            flags.push(CompatibilityFlag {
                schema: schema.name.clone(),
                table: Some(table.name.clone()),
                column: None,
                kind: CompatibilityFlagKind::WideTable,
                message: format!(
                    "table has {} columns, exceeding the {}-column review threshold",
                    table.columns.len(),
                    WIDE_TABLE_COLUMN_THRESHOLD
                ),
            });
        }

        if !table.triggers.is_empty() {
            flags.push(CompatibilityFlag {
                schema: schema.name.clone(),
                table: Some(table.name.clone()),
                column: None,
                kind: CompatibilityFlagKind::HasTriggers,
                message: format!(
                    "{} trigger(s) defined; Snowflake has no trigger equivalent and none will be migrated",
                    table.triggers.len()
                ),
            });
        }

        for column in &table.columns {
            if is_reserved(&column.name) {
                flags.push(CompatibilityFlag {
                    schema: schema.name.clone(),
                    table: Some(table.name.clone()),
                    column: Some(column.name.clone()),
                    kind: CompatibilityFlagKind::ReservedIdentifier,
                    message: format!(
                        "column name '{}' collides with a Snowflake reserved word",
                        column.name
                    ),
                });
            }

            if matches!(column.char_max_len, Some(len) if len > OVERSIZED_VARCHAR_THRESHOLD) {
                flags.push(CompatibilityFlag {
                    schema: schema.name.clone(),
                    table: Some(table.name.clone()),
                    column: Some(column.name.clone()),
                    kind: CompatibilityFlagKind::OversizedVarchar,
                    message: format!(
                        "declared length {} exceeds Snowflake's VARCHAR ceiling of {}",
                        column.char_max_len.unwrap_or_default(),
                        OVERSIZED_VARCHAR_THRESHOLD
                    ),
                });
            }

            if column.udt_name == "bytea" {
                flags.push(CompatibilityFlag {
                    schema: schema.name.clone(),
                    table: Some(table.name.clone()),
                    column: Some(column.name.clone()),
                    kind: CompatibilityFlagKind::Bytea,
                    message: "bytea column will be mapped to BINARY; verify downstream readers expect base64-free binary".to_string(),
                });
            }
        }
    }

    if !schema.functions.is_empty() {
        flags.push(CompatibilityFlag {
            schema: schema.name.clone(),
            table: None,
            column: None,
            kind: CompatibilityFlagKind::HasFunctions,
            message: format!(
                "{} user-defined function(s) in schema; none are migrated automatically",
                schema.functions.len()
            ),
        });
    }

    flags
}

#[cfg(test)]
#[path = "compat_test.rs"]
mod tests;
