//! pgsf-mapper - the pure PostgreSQL-to-Snowflake column type mapping
//! decision tree.
//!
//! [`map_type`] is a pure function: identical inputs always produce
//! identical outputs, including the rationale string byte-for-byte.

/// Upper bound on Snowflake's `VARCHAR` length argument.
pub const SNOWFLAKE_VARCHAR_CEILING: i32 = 16_777_216;

/// Everything the decision tree needs to know about a source column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDescriptor<'a> {
    pub source_type: &'a str,
    pub udt_name: &'a str,
    pub char_max_len: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
}

/// Result of mapping one column: the target type plus the rationale
/// that must be preserved verbatim in the mapping manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOutcome {
    pub target_type: String,
    pub rationale: String,
}

fn outcome(target_type: impl Into<String>, rationale: impl Into<String>) -> MappingOutcome {
    MappingOutcome {
        target_type: target_type.into(),
        rationale: rationale.into(),
    }
}

/// Map one source column descriptor to a target column type plus a
/// rationale, evaluating the decision tree top to bottom; first match
/// wins.
pub fn map_type(col: ColumnDescriptor<'_>) -> MappingOutcome {
    let source_type = col.source_type;
    let lower = source_type.to_ascii_lowercase();

    // 1. Array types.
    if lower.ends_with("[]") || source_type.eq_ignore_ascii_case("ARRAY") {
        return outcome(
            "VARIANT",
            format!("array type {source_type} widened to semi-structured VARIANT"),
        );
    }

    // 2. numeric / decimal.
    if lower == "numeric" || lower == "decimal" {
        return match (col.numeric_precision, col.numeric_scale) {
            (Some(p), Some(s)) => outcome(
                format!("NUMBER({p},{s})"),
                format!("PostgreSQL {source_type}({p},{s}) mapped to matching NUMBER precision/scale"),
            ),
            (Some(p), None) => outcome(
                format!("NUMBER({p},0)"),
                format!("PostgreSQL {source_type}({p}) has no declared scale; defaulted to 0"),
            ),
            (None, _) => outcome(
                "NUMBER(38,0)",
                format!("PostgreSQL {source_type} has no declared precision; defaulted to NUMBER(38,0)"),
            ),
        };
    }

    // 3. Character types.
    if matches!(
        lower.as_str(),
        "character varying" | "varchar" | "character" | "char"
    ) {
        let is_fixed = matches!(lower.as_str(), "character" | "char");
        return match col.char_max_len {
            Some(len) if len > 0 && len <= SNOWFLAKE_VARCHAR_CEILING => {
                let target = if is_fixed { "CHAR" } else { "VARCHAR" };
                outcome(
                    format!("{target}({len})"),
                    format!("PostgreSQL {source_type}({len}) with length preserved"),
                )
            }
            Some(len) => outcome(
                "VARCHAR",
                format!(
                    "PostgreSQL {source_type}({len}) exceeds Snowflake VARCHAR max \
                     ({SNOWFLAKE_VARCHAR_CEILING}); widened to unbounded VARCHAR"
                ),
            ),
            None => outcome(
                "VARCHAR",
                format!("PostgreSQL {source_type} has no declared length; mapped to unbounded VARCHAR"),
            ),
        };
    }

    // 4. text.
    if lower == "text" {
        return outcome("VARCHAR", "PostgreSQL text mapped to unbounded VARCHAR");
    }

    // 5. Fixed static map for well-known types.
    if let Some(o) = static_map(&lower, source_type) {
        return o;
    }

    // 6. USER-DEFINED (enum/composite).
    if source_type.eq_ignore_ascii_case("USER-DEFINED") {
        return outcome(
            "VARCHAR",
            format!(
                "user-defined type ({}) widened to VARCHAR; consider validation",
                col.udt_name
            ),
        );
    }

    // 7. Unknown.
    log::warn!("unknown PostgreSQL type: {source_type}, defaulting to VARCHAR");
    outcome(
        "VARCHAR",
        format!("unknown type {source_type} mapped to VARCHAR (needs review)"),
    )
}

fn static_map(lower: &str, source_type: &str) -> Option<MappingOutcome> {
    let simple = |target: &str, note: &str| {
        Some(outcome(
            target.to_string(),
            format!("PostgreSQL {source_type} mapped to {target} ({note})"),
        ))
    };

    match lower {
        "smallint" | "smallserial" => simple("NUMBER(5,0)", "16-bit integral width"),
        "integer" | "serial" => simple("NUMBER(10,0)", "32-bit integral width"),
        "bigint" | "bigserial" => simple("NUMBER(19,0)", "64-bit integral width"),
        "real" | "double precision" => simple("FLOAT", "floating point"),
        "money" => simple("NUMBER(19,4)", "currency fixed scale"),
        "bytea" => simple("BINARY", "raw bytes"),
        "timestamp" | "timestamp without time zone" => simple("TIMESTAMP_NTZ", "no time zone"),
        "timestamptz" | "timestamp with time zone" => simple("TIMESTAMP_TZ", "with time zone"),
        "date" => simple("DATE", "calendar date"),
        "interval" => simple("VARCHAR", "no direct Snowflake equivalent"),
        "boolean" | "bool" => simple("BOOLEAN", "boolean"),
        "json" | "jsonb" => simple("VARIANT", "semi-structured"),
        "uuid" => simple("VARCHAR(36)", "canonical UUID text form"),
        "inet" | "cidr" => simple("VARCHAR(45)", "fixed-width network address"),
        "macaddr" => simple("VARCHAR(17)", "fixed-width MAC address"),
        "point" | "line" | "lseg" | "box" | "path" | "polygon" | "circle" => {
            simple("VARCHAR", "geometric type has no Snowflake equivalent")
        }
        _ if lower.starts_with("time") => simple("TIME", "time of day"),
        _ => None,
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
