//! Standalone validation SQL script for human re-execution (spec
//! §4.6). Mirrors the same four queries the checks run, as
//! free-standing statements rather than driver calls.

use pgsf_core::config::CaseStyle;
use pgsf_core::identifier::quote_identifier;
use pgsf_core::model::Table;

pub struct ValidationTarget<'a> {
    pub schema: &'a str,
    pub table: &'a Table,
}

/// Render the human re-runnable script. Identifiers are quoted with
/// the same [`quote_identifier`] policy the DDL emitter used to
/// create these objects on the target, so every block below runs
/// as-is against Snowflake without manual case-fixing.
pub fn render(targets: &[ValidationTarget<'_>], case_style: CaseStyle) -> String {
    let mut out = String::from("-- Post-migration validation checks\n-- Re-run any block below against Snowflake to re-verify a table.\n\n");

    for target in targets {
        let schema = target.schema;
        let table = &target.table.name;
        let qualified = format!(
            "{}.{}",
            quote_identifier(schema, case_style),
            quote_identifier(table, case_style)
        );

        out.push_str(&format!("-- {schema}.{table}: ROW_COUNT\n"));
        out.push_str(&format!("SELECT COUNT(*) FROM {qualified};\n\n"));

        let not_null_columns: Vec<&str> = target
            .table
            .columns
            .iter()
            .filter(|c| !c.nullable)
            .map(|c| c.name.as_str())
            .collect();
        if !not_null_columns.is_empty() {
            out.push_str(&format!("-- {schema}.{table}: NOT_NULL\n"));
            for column in &not_null_columns {
                let quoted_column = quote_identifier(column, case_style);
                out.push_str(&format!(
                    "SELECT COUNT(*) FROM {qualified} WHERE {quoted_column} IS NULL;\n"
                ));
            }
            out.push('\n');
        }

        let pk_columns: Vec<&str> = target
            .table
            .constraints
            .primary_keys
            .first()
            .map(|pk| pk.columns.iter().map(|c| c.as_str()).collect())
            .unwrap_or_default();
        if !pk_columns.is_empty() {
            let pk_list = pk_columns
                .iter()
                .map(|c| quote_identifier(c, case_style))
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!("-- {schema}.{table}: PK_DUPLICATES\n"));
            out.push_str(&format!(
                "SELECT {pk_list}, COUNT(*) AS cnt FROM {qualified} GROUP BY {pk_list} HAVING COUNT(*) > 1 LIMIT 10;\n\n"
            ));
        }

        let json_columns: Vec<&str> = target
            .table
            .columns
            .iter()
            .filter(|c| c.udt_name == "json" || c.udt_name == "jsonb")
            .map(|c| c.name.as_str())
            .collect();
        if !json_columns.is_empty() {
            out.push_str(&format!("-- {schema}.{table}: JSON_VALIDITY\n"));
            for column in &json_columns {
                let quoted_column = quote_identifier(column, case_style);
                out.push_str(&format!(
                    "SELECT COUNT(*) FROM {qualified} WHERE {quoted_column} IS NOT NULL AND TRY_PARSE_JSON({quoted_column}) IS NULL;\n"
                ));
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
#[path = "sql_artifact_test.rs"]
mod tests;
