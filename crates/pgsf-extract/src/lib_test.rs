use super::*;

#[test]
fn select_sql_casts_every_column_to_text() {
    let columns = vec![Column {
        position: 1,
        name: "id".to_string(),
        source_type: "integer".to_string(),
        udt_name: "int4".to_string(),
        char_max_len: None,
        numeric_precision: None,
        numeric_scale: None,
        nullable: false,
        default_expr: None,
        identity: pgsf_core::model::IdentityKind::None,
        identity_start: None,
        identity_increment: None,
        generated: false,
        serial_sequence_fqn: None,
        comment: None,
    }];
    let sql = select_sql("public", "orders", &columns);
    assert_eq!(sql, "SELECT id::text FROM public.orders");
}
