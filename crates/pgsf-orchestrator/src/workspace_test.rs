use super::*;

#[test]
fn create_makes_artifacts_and_scratch_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let ws = RunWorkspace::create(tmp.path(), Uuid::new_v4()).unwrap();
    assert!(ws.artifacts_dir.is_dir());
    assert!(ws.scratch_dir.is_dir());
}

#[test]
fn list_and_read_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let ws = RunWorkspace::create(tmp.path(), Uuid::new_v4()).unwrap();
    std::fs::write(ws.artifact_path("summary.md"), "hello").unwrap();
    assert_eq!(ws.list_artifacts().unwrap(), vec!["summary.md".to_string()]);
    assert_eq!(ws.read_artifact("summary.md").unwrap(), "hello");
}

#[test]
fn delete_removes_the_whole_tree() {
    let tmp = tempfile::tempdir().unwrap();
    let ws = RunWorkspace::create(tmp.path(), Uuid::new_v4()).unwrap();
    ws.delete().unwrap();
    assert!(!ws.root.exists());
}
