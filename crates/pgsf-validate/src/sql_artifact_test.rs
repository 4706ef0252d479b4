use super::*;

use pgsf_core::model::{Constraints, IdentityKind, KeyConstraint, TableKind};

fn sample_table() -> Table {
    Table {
        name: "orders".to_string(),
        kind: TableKind::Base,
        size_bytes: 0,
        approx_rows: 0,
        comment: None,
        columns: vec![pgsf_core::model::Column {
            position: 1,
            name: "id".to_string(),
            source_type: "integer".to_string(),
            udt_name: "int4".to_string(),
            char_max_len: None,
            numeric_precision: None,
            numeric_scale: None,
            nullable: false,
            default_expr: None,
            identity: IdentityKind::None,
            identity_start: None,
            identity_increment: None,
            generated: false,
            serial_sequence_fqn: None,
            comment: None,
        }],
        constraints: Constraints {
            primary_keys: vec![KeyConstraint {
                name: "orders_pkey".to_string(),
                columns: vec!["id".to_string()],
            }],
            ..Default::default()
        },
        indexes: Vec::new(),
        triggers: Vec::new(),
    }
}

#[test]
fn renders_row_count_and_pk_duplicate_blocks() {
    let table = sample_table();
    let targets = vec![ValidationTarget {
        schema: "public",
        table: &table,
    }];
    let sql = render(&targets, CaseStyle::Upper);
    assert!(sql.contains("public.orders: ROW_COUNT"));
    assert!(sql.contains("FROM PUBLIC.ORDERS"));
    assert!(sql.contains("HAVING COUNT(*) > 1"));
    assert!(sql.contains("WHERE ID IS NULL"));
}
