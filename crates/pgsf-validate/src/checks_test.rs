use super::*;

#[test]
fn skip_result_carries_no_details() {
    let r = skip("public", "orders", ValidationCheck::PkDuplicates, "no primary key defined");
    assert_eq!(r.status, ValidationStatus::Skip);
    assert!(r.details.is_empty());
}

#[test]
fn source_qualifier_preserves_case_target_qualifier_normalizes() {
    assert_eq!(quoted_table_pg("public", "orders"), "\"public\".\"orders\"");
    assert_eq!(quoted_table_sf("public", "orders", CaseStyle::Upper), "PUBLIC.ORDERS");
    assert_eq!(quoted_table_sf("public", "orders", CaseStyle::Preserve), "public.orders");
}
