use super::*;

use pgsf_core::config::MigrationRequest;

fn minimal_request() -> MigrationRequest {
    MigrationRequest::from_yaml(
        r#"
postgres:
  host: localhost
  database: app
  username: app
  password: secret
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
"#,
    )
    .unwrap()
}

#[test]
fn delete_before_terminal_is_refused() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = RunRegistry::new();
    let orchestrator = Orchestrator::new(minimal_request(), tmp.path()).unwrap();
    let run_id = registry.start_migration(orchestrator);
    assert!(registry.delete(run_id).is_err());
}

#[test]
fn unknown_run_id_errors_on_every_lookup() {
    let registry = RunRegistry::new();
    let run_id = Uuid::new_v4();
    assert!(registry.get_progress(run_id).is_none());
    assert!(registry.delete(run_id).is_err());
    assert!(registry.list_artifacts(run_id).is_err());
}
