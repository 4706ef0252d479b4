use super::*;

fn col<'a>(source_type: &'a str) -> ColumnDescriptor<'a> {
    ColumnDescriptor {
        source_type,
        udt_name: source_type,
        char_max_len: None,
        numeric_precision: None,
        numeric_scale: None,
    }
}

#[test]
fn array_type_widens_to_variant() {
    let c = col("integer[]");
    assert_eq!(map_type(c).target_type, "VARIANT");
}

#[test]
fn numeric_with_no_precision_defaults_to_number_38_0() {
    let c = col("numeric");
    assert_eq!(map_type(c).target_type, "NUMBER(38,0)");
}

#[test]
fn numeric_with_precision_only_defaults_scale_zero() {
    let mut c = col("numeric");
    c.numeric_precision = Some(10);
    assert_eq!(map_type(c).target_type, "NUMBER(10,0)");
}

#[test]
fn numeric_with_precision_and_scale() {
    let mut c = col("numeric");
    c.numeric_precision = Some(12);
    c.numeric_scale = Some(4);
    assert_eq!(map_type(c).target_type, "NUMBER(12,4)");
}

#[test]
fn varchar_exactly_at_ceiling_is_bounded() {
    let mut c = col("character varying");
    c.char_max_len = Some(SNOWFLAKE_VARCHAR_CEILING);
    let m = map_type(c);
    assert_eq!(m.target_type, format!("VARCHAR({SNOWFLAKE_VARCHAR_CEILING})"));
}

#[test]
fn varchar_one_over_ceiling_is_unbounded_with_warning() {
    let mut c = col("character varying");
    c.char_max_len = Some(SNOWFLAKE_VARCHAR_CEILING + 1);
    let m = map_type(c);
    assert_eq!(m.target_type, "VARCHAR");
    assert!(m.rationale.contains("exceeds"));
}

#[test]
fn fixed_char_maps_to_char() {
    let mut c = col("character");
    c.char_max_len = Some(10);
    assert_eq!(map_type(c).target_type, "CHAR(10)");
}

#[test]
fn text_is_unbounded_varchar() {
    assert_eq!(map_type(col("text")).target_type, "VARCHAR");
}

#[test]
fn integral_widths() {
    assert_eq!(map_type(col("smallint")).target_type, "NUMBER(5,0)");
    assert_eq!(map_type(col("integer")).target_type, "NUMBER(10,0)");
    assert_eq!(map_type(col("bigint")).target_type, "NUMBER(19,0)");
    assert_eq!(map_type(col("serial")).target_type, "NUMBER(10,0)");
}

#[test]
fn jsonb_is_variant() {
    assert_eq!(map_type(col("jsonb")).target_type, "VARIANT");
}

#[test]
fn uuid_is_fixed_varchar() {
    assert_eq!(map_type(col("uuid")).target_type, "VARCHAR(36)");
}

#[test]
fn user_defined_widens_with_rationale() {
    let mut c = col("USER-DEFINED");
    c.udt_name = "mood_enum";
    let m = map_type(c);
    assert_eq!(m.target_type, "VARCHAR");
    assert!(m.rationale.contains("mood_enum"));
}

#[test]
fn unknown_type_falls_through_to_varchar_needs_review() {
    let m = map_type(col("tsvector"));
    assert_eq!(m.target_type, "VARCHAR");
    assert!(m.rationale.contains("needs review"));
}

#[test]
fn mapping_is_deterministic() {
    let mut c = col("numeric");
    c.numeric_precision = Some(10);
    c.numeric_scale = Some(2);
    assert_eq!(map_type(c), map_type(c));
}
