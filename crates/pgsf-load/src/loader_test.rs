use super::*;

#[test]
fn parse_rows_loaded_returns_zero_for_non_arrow_result() {
    assert_eq!(parse_rows_loaded(&QueryResult::Empty), 0);
}

#[test]
fn copy_into_column_list_matches_ddl_case_style() {
    let qualified_table = format!(
        "{}.{}",
        quote_identifier("public", CaseStyle::Upper),
        quote_identifier("orders", CaseStyle::Upper)
    );
    let column_list = vec!["id".to_string(), "order".to_string()]
        .iter()
        .map(|c| quote_identifier(c, CaseStyle::Upper))
        .collect::<Vec<_>>()
        .join(", ");
    assert_eq!(qualified_table, "PUBLIC.ORDERS");
    assert_eq!(column_list, "ID, \"ORDER\"");
}
