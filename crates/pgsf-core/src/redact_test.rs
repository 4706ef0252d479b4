use super::*;

#[test]
fn redacts_password_query_param() {
    let msg = "connecting host=db password=hunter2 port=5432";
    let redacted = redact(msg);
    assert!(!redacted.contains("hunter2"));
    assert!(redacted.contains("password=***REDACTED***"));
}

#[test]
fn redacts_json_fields() {
    let msg = r#"{"password":"s3cr3t","access_token":"oauth-xyz"}"#;
    let redacted = redact(msg);
    assert!(!redacted.contains("s3cr3t"));
    assert!(!redacted.contains("oauth-xyz"));
}

#[test]
fn leaves_unrelated_text_untouched() {
    let msg = "loaded 42 rows into public.orders";
    assert_eq!(redact(msg), msg);
}
