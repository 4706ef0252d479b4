use super::*;

fn minimal_yaml() -> &'static str {
    r#"
postgres:
  host: localhost
  database: app
  username: app
  password: secret
  schemas: ["public"]
snowflake:
  account: xy12345
  warehouse: COMPUTE_WH
  database: APP
  default_role: SYSADMIN
  schema: PUBLIC
  stage: MIGRATION_STAGE
  file_format: PG2SF_CSV
auth:
  access_token: tok-abc
"#
}

#[test]
fn parses_minimal_request_with_defaults() {
    let req = MigrationRequest::from_yaml(minimal_yaml()).unwrap();
    assert_eq!(req.preferences.parallelism, 4);
    assert_eq!(req.preferences.max_chunk_mb, 200);
    assert!(req.preferences.use_identity_for_serial);
    assert_eq!(req.preferences.case_style, CaseStyle::Upper);
    assert!(!req.control.confirm);
}

#[test]
fn rejects_unknown_fields() {
    let bad = format!("{}\nbogus_field: 1", minimal_yaml());
    assert!(MigrationRequest::from_yaml(&bad).is_err());
}

#[test]
fn rejects_out_of_range_parallelism() {
    let bad = format!("{}\npreferences:\n  parallelism: 99", minimal_yaml());
    let err = MigrationRequest::from_yaml(&bad);
    assert!(err.is_err());
}
