//! Per-value encoding for the delimited-text format: NULL -> empty
//! token, everything else is quoted and escaped unless it is one of a
//! short list of bare numeric/boolean/temporal types, matching the
//! original's "quote anything psycopg2 handed back as a str" rule
//! rather than a fixed whitelist of string-shaped types.

/// Postgres `udt_name`s whose `::text` rendering is always a bare
/// numeric, boolean, or temporal literal — no embedded delimiter or
/// quote character is possible, so these are the only types left
/// unquoted. Everything else (including `money`, `bit`/`varbit`,
/// `xml`, enum/`USER-DEFINED` types, and arrays) is quoted, since
/// those render with commas, spaces, or other characters a bare CSV
/// field can't carry.
fn is_bare_safe(udt_name: &str) -> bool {
    matches!(
        udt_name,
        "int2"
            | "int4"
            | "int8"
            | "float4"
            | "float8"
            | "numeric"
            | "bool"
            | "date"
            | "time"
            | "timetz"
            | "timestamp"
            | "timestamptz"
    )
}

fn quote_and_escape(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Encode one already-text-cast column value for a CSV data row.
pub fn encode_csv_value(value: Option<&str>, udt_name: &str) -> String {
    match value {
        None => String::new(),
        Some(v) if is_bare_safe(udt_name) => v.to_string(),
        Some(v) => quote_and_escape(v),
    }
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
