use serde_json::json;
use spider_core::{ErrorKind, Scalar, SpiderError};
use spider_source::{parse_records_str, parse_records_value};

#[test]
fn empty_array_is_valid() {
    assert!(parse_records_str("[]").unwrap().is_empty());
}

#[test]
fn extra_fields_are_ignored_and_tumor_type_is_optional() {
    let records = parse_records_value(&json!([
        {"subject_id": "S-1", "arm": "A", "dose": 1800, "days": 7, "change": -4, "visit": "W1"}
    ]))
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subject_id, Scalar::Text("S-1".into()));
    assert_eq!(records[0].tumor_type, None);
}

#[test]
fn non_array_payload_is_rejected() {
    let err = parse_records_value(&json!({"rows": []})).unwrap_err();
    assert!(err.to_string().contains("received an object"));
    assert_eq!(err.kind(), ErrorKind::DataFormat);
}

#[test]
fn missing_required_field_names_the_record() {
    let err = parse_records_value(&json!([
        {"subject_id": 1, "arm": "A", "dose": 1800, "days": 7, "change": 1},
        {"subject_id": 2, "arm": "A", "days": 7, "change": 1}
    ]))
    .unwrap_err();

    match err {
        SpiderError::Payload(message) => {
            assert!(message.starts_with("record 1:"), "{message}");
            assert!(message.contains("dose"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_json_is_a_payload_error() {
    let err = parse_records_str("<html>oops</html>").unwrap_err();
    assert!(matches!(err, SpiderError::Payload(_)));
}
