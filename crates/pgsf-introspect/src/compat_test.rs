use super::*;

use pgsf_core::model::{Column, IdentityKind, Table, TableKind};

fn empty_column(name: &str) -> Column {
    Column {
        position: 1,
        name: name.to_string(),
        source_type: "text".to_string(),
        udt_name: "text".to_string(),
        char_max_len: None,
        numeric_precision: None,
        numeric_scale: None,
        nullable: true,
        default_expr: None,
        identity: IdentityKind::None,
        identity_start: None,
        identity_increment: None,
        generated: false,
        serial_sequence_fqn: None,
        comment: None,
    }
}

fn bare_schema(name: &str) -> Schema {
    Schema {
        name: name.to_string(),
        owner: "postgres".to_string(),
        tables: Vec::new(),
        sequences: Vec::new(),
        views: Vec::new(),
        functions: Vec::new(),
        special_types: Vec::new(),
    }
}

fn bare_table(name: &str) -> Table {
    Table {
        name: name.to_string(),
        kind: TableKind::Base,
        size_bytes: 0,
        approx_rows: 0,
        comment: None,
        columns: Vec::new(),
        constraints: Default::default(),
        indexes: Vec::new(),
        triggers: Vec::new(),
    }
}

#[test]
fn flags_reserved_column_name() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("orders");
    table.columns.push(empty_column("order"));
    schema.tables.push(table);

    let flags = scan_schema(&schema);
    assert!(flags
        .iter()
        .any(|f| f.kind == CompatibilityFlagKind::ReservedIdentifier
            && f.column.as_deref() == Some("order")));
}

#[test]
fn flags_oversized_varchar() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("notes");
    let mut col = empty_column("body");
    col.char_max_len = Some(20_000_000);
    table.columns.push(col);
    schema.tables.push(table);

    let flags = scan_schema(&schema);
    assert!(flags
        .iter()
        .any(|f| f.kind == CompatibilityFlagKind::OversizedVarchar));
}

#[test]
fn does_not_flag_varchar_at_ceiling() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("notes");
    let mut col = empty_column("body");
    col.char_max_len = Some(OVERSIZED_VARCHAR_THRESHOLD);
    table.columns.push(col);
    schema.tables.push(table);

    let flags = scan_schema(&schema);
    assert!(!flags
        .iter()
        .any(|f| f.kind == CompatibilityFlagKind::OversizedVarchar));
}

#[test]
fn flags_wide_table() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("wide");
    for i in 0..501 {
        table.columns.push(empty_column(&format!("c{i}")));
    }
    schema.tables.push(table);

    let flags = scan_schema(&schema);
    assert!(flags
        .iter()
        .any(|f| f.kind == CompatibilityFlagKind::WideTable));
}

#[test]
fn clean_schema_raises_no_flags() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("customers");
    table.columns.push(empty_column("customer_id"));
    schema.tables.push(table);

    assert!(scan_schema(&schema).is_empty());
}

#[test]
fn special_types_collects_distinct_sorted_labels() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("events");

    let mut payload = empty_column("payload");
    payload.source_type = "jsonb".to_string();
    payload.udt_name = "jsonb".to_string();
    table.columns.push(payload);

    let mut tags = empty_column("tags");
    tags.source_type = "text[]".to_string();
    tags.udt_name = "_text".to_string();
    table.columns.push(tags);

    let mut id = empty_column("id");
    id.source_type = "uuid".to_string();
    id.udt_name = "uuid".to_string();
    table.columns.push(id);

    let mut blob = empty_column("blob");
    blob.source_type = "bytea".to_string();
    blob.udt_name = "bytea".to_string();
    table.columns.push(blob);

    let mut status = empty_column("status");
    status.source_type = "USER-DEFINED".to_string();
    status.udt_name = "order_status".to_string();
    table.columns.push(status);

    schema.tables.push(table);

    assert_eq!(
        special_types_for_schema(&schema),
        vec!["ARRAY", "BYTEA", "JSON", "USER-DEFINED", "UUID"]
    );
}

#[test]
fn special_types_empty_for_plain_schema() {
    let mut schema = bare_schema("public");
    let mut table = bare_table("customers");
    table.columns.push(empty_column("customer_id"));
    schema.tables.push(table);

    assert!(special_types_for_schema(&schema).is_empty());
}
