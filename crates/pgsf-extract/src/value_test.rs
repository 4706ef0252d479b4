use super::*;

#[test]
fn null_encodes_as_empty_token() {
    assert_eq!(encode_csv_value(None, "int4"), "");
}

#[test]
fn numeric_scalar_is_unquoted() {
    assert_eq!(encode_csv_value(Some("42"), "int4"), "42");
}

#[test]
fn string_value_is_quoted_and_escaped() {
    assert_eq!(
        encode_csv_value(Some("say \"hi\""), "text"),
        "\"say \"\"hi\"\"\""
    );
}

#[test]
fn json_value_is_quoted_and_escaped() {
    assert_eq!(
        encode_csv_value(Some("{\"a\":1}"), "jsonb"),
        "\"{\"\"a\"\":1}\""
    );
}

#[test]
fn array_type_is_quoted() {
    assert_eq!(encode_csv_value(Some("{1,2,3}"), "_int4"), "\"{1,2,3}\"");
}

#[test]
fn boolean_is_unquoted() {
    assert_eq!(encode_csv_value(Some("t"), "bool"), "t");
}

#[test]
fn money_with_locale_grouping_is_quoted() {
    assert_eq!(encode_csv_value(Some("$1,000.00"), "money"), "\"$1,000.00\"");
}

#[test]
fn bit_and_varbit_are_quoted() {
    assert_eq!(encode_csv_value(Some("1010"), "bit"), "\"1010\"");
    assert_eq!(encode_csv_value(Some("101"), "varbit"), "\"101\"");
}

#[test]
fn xml_is_quoted() {
    assert_eq!(
        encode_csv_value(Some("<a>1</a>"), "xml"),
        "\"<a>1</a>\""
    );
}

#[test]
fn user_defined_enum_is_quoted() {
    assert_eq!(encode_csv_value(Some("active"), "order_status"), "\"active\"");
}

#[test]
fn numeric_is_unquoted() {
    assert_eq!(encode_csv_value(Some("12.50"), "numeric"), "12.50");
}
