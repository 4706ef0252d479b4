use super::*;

#[test]
fn plain_identifier_is_not_quoted() {
    assert_eq!(quote_identifier("customer_id", CaseStyle::Upper), "CUSTOMER_ID");
}

#[test]
fn reserved_word_is_quoted() {
    assert_eq!(quote_identifier("order", CaseStyle::Upper), "\"ORDER\"");
}

#[test]
fn special_characters_force_quoting() {
    assert_eq!(
        quote_identifier("weird col", CaseStyle::Upper),
        "\"WEIRD COL\""
    );
}

#[test]
fn preserve_keeps_original_case() {
    assert_eq!(
        quote_identifier("CustomerId", CaseStyle::Preserve),
        "CustomerId"
    );
}

#[test]
fn lower_style_normalizes_before_reserved_check() {
    assert_eq!(quote_identifier("ORDER", CaseStyle::Lower), "\"order\"");
}
