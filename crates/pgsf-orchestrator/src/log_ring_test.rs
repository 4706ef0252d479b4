use super::*;

#[test]
fn events_are_redacted_before_storage() {
    let ring = LogRing::new(Uuid::new_v4());
    ring.info("connect", "connecting with password=hunter2");
    let snapshot = ring.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot[0].message.contains("hunter2"));
}

#[test]
fn flush_writes_one_json_object_per_line() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("run_log.ndjson");
    let ring = LogRing::new(Uuid::new_v4());
    ring.info("phase", "entering ANALYZING");
    ring.warn("mapper", "unknown type widened");
    ring.flush_ndjson(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(parsed.get("ts").is_some());
        assert!(parsed.get("run_id").is_some());
    }
}
