use super::*;

use pgsf_core::config::MigrationRequest;

fn minimal_request(dry_run: bool) -> MigrationRequest {
    let yaml = format!(
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
preferences:
  dry_run: {dry_run}
"#
    );
    MigrationRequest::from_yaml(&yaml).unwrap()
}

#[test]
fn new_creates_a_pending_run_with_workspace() {
    let tmp = tempfile::tempdir().unwrap();
    let orchestrator = Orchestrator::new(minimal_request(true), tmp.path()).unwrap();
    assert_eq!(orchestrator.progress().phase, Phase::Pending);
    assert!(orchestrator.workspace().artifacts_dir.is_dir());
}

#[test]
fn request_cancel_is_observable() {
    let tmp = tempfile::tempdir().unwrap();
    let orchestrator = Orchestrator::new(minimal_request(true), tmp.path()).unwrap();
    assert!(!orchestrator.is_cancelled());
    orchestrator.request_cancel();
    assert!(orchestrator.is_cancelled());
}
