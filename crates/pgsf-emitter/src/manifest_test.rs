use super::*;

fn sample_record() -> MappingRecord {
    MappingRecord {
        schema: "public".to_string(),
        table: "orders".to_string(),
        column: "id".to_string(),
        source_type: "integer".to_string(),
        target_type: "NUMBER(10, 0)".to_string(),
        rationale: "integral type widened".to_string(),
        nullable: false,
        has_default: false,
        is_identity: true,
    }
}

#[test]
fn manifest_round_trips_through_yaml() {
    let yaml = render_manifest(vec![sample_record()]).unwrap();
    let parsed: Vec<MappingDecision> = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed[0].column, "id");
}

#[test]
fn empty_recommendations_state_clean_schema() {
    let text = render_recommendations(&[]);
    assert!(text.contains("maps cleanly"));
}

#[test]
fn recommendations_render_as_bullet_list() {
    let text = render_recommendations(&["do the thing".to_string()]);
    assert!(text.contains("- do the thing"));
}
