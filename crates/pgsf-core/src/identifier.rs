//! Identifier case normalization and quoting, shared by the DDL
//! emitter (§4.3) and the loader's COPY column list (§4.5) so the two
//! never disagree on how a given source identifier renders.

use crate::config::CaseStyle;

/// A representative slice of Snowflake reserved words. Not
/// exhaustive, but enough to exercise the collision/quoting behavior.
pub const RESERVED_WORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "ANY", "AS", "BETWEEN", "BY", "CASE", "CAST", "CHECK", "COLUMN",
    "CONNECT", "CONSTRAINT", "CREATE", "CROSS", "CURRENT", "DELETE", "DISTINCT", "DROP", "ELSE",
    "EXISTS", "FALSE", "FOLLOWING", "FOR", "FROM", "FULL", "GRANT", "GROUP", "GSCLUSTER",
    "HAVING", "ILIKE", "IN", "INCREMENT", "INNER", "INSERT", "INTERSECT", "INTO", "IS", "ISSUE",
    "JOIN", "LATERAL", "LEFT", "LIKE", "LOCALTIME", "LOCALTIMESTAMP", "MINUS", "NATURAL", "NOT",
    "NULL", "OF", "ON", "OR", "ORDER", "ORGANIZATION", "QUALIFY", "REGEXP", "REVOKE", "RIGHT",
    "RLIKE", "ROW", "ROWS", "SAMPLE", "SCHEMA", "SELECT", "SET", "SOME", "START", "TABLE",
    "TABLESAMPLE", "THEN", "TO", "TRIGGER", "TRUE", "TRY_CAST", "UNION", "UNIQUE", "UPDATE",
    "USING", "VALUES", "VIEW", "WHEN", "WHENEVER", "WHERE", "WITH",
];

/// Apply the configured case policy to a bare identifier.
pub fn normalize_case(name: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Upper => name.to_uppercase(),
        CaseStyle::Lower => name.to_lowercase(),
        CaseStyle::Preserve => name.to_string(),
    }
}

fn is_bare_safe(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(&name.to_uppercase().as_str())
}

/// Normalize then quote `name` iff it collides with a reserved word or
/// contains a character outside `[A-Za-z0-9_]`.
pub fn quote_identifier(name: &str, style: CaseStyle) -> String {
    let normalized = normalize_case(name, style);
    if is_reserved(&normalized) || !is_bare_safe(&normalized) {
        format!("\"{}\"", normalized.replace('"', "\"\""))
    } else {
        normalized
    }
}

#[cfg(test)]
#[path = "identifier_test.rs"]
mod tests;
