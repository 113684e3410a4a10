use super::*;
use serde_json::json;

fn row(name: &str, value: &str) -> PropertyRow {
    PropertyRow::new(name, value)
}

// =============================================================
// RawJson
// =============================================================

#[test]
fn raw_json_parses_french_field_names() {
    let body = json!(r#"[{"propriété":"name","valeur":"Ada"},{"propriété":"email","valeur":"ada@contoso.com"}]"#);
    let rows = decode_rows(PayloadShape::RawJson, body).unwrap();
    assert_eq!(rows, vec![row("name", "Ada"), row("email", "ada@contoso.com")]);
}

#[test]
fn raw_json_parses_english_field_names() {
    let body = json!(r#"[{"name":"tenant","value":"contoso"}]"#);
    let rows = decode_rows(PayloadShape::RawJson, body).unwrap();
    assert_eq!(rows, vec![row("tenant", "contoso")]);
}

#[test]
fn raw_json_keeps_order() {
    let body = json!(r#"[{"name":"c","value":"3"},{"name":"a","value":"1"},{"name":"b","value":"2"}]"#);
    let rows = decode_rows(PayloadShape::RawJson, body).unwrap();
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn raw_json_empty_array_is_no_rows() {
    let rows = decode_rows(PayloadShape::RawJson, json!("[]")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn raw_json_rejects_structured_object() {
    let body = json!({"rows": []});
    let err = decode_rows(PayloadShape::RawJson, body).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
    assert!(err.to_string().contains("expected a JSON string, got an object"));
}

#[test]
fn raw_json_rejects_unparseable_text() {
    let err = decode_rows(PayloadShape::RawJson, json!("not json")).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

// =============================================================
// Structured
// =============================================================

#[test]
fn structured_reads_rows_field() {
    let body = json!({"rows": [{"name": "upn", "value": "ada@contoso.com"}]});
    let rows = decode_rows(PayloadShape::Structured, body).unwrap();
    assert_eq!(rows, vec![row("upn", "ada@contoso.com")]);
}

#[test]
fn structured_rejects_missing_rows_field() {
    let err = decode_rows(PayloadShape::Structured, json!({"items": []})).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[test]
fn structured_rejects_string_payload() {
    let err = decode_rows(PayloadShape::Structured, json!("[]")).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

// =============================================================
// Row values
// =============================================================

#[test]
fn non_string_values_keep_json_text() {
    let value = json!([
        {"name": "verified", "value": true},
        {"name": "age", "value": 42},
        {"name": "groups", "value": ["a", "b"]},
        {"name": "nickname", "value": null}
    ]);
    let rows = decode_list(value).unwrap();
    assert_eq!(
        rows,
        vec![
            row("verified", "true"),
            row("age", "42"),
            row("groups", r#"["a","b"]"#),
            row("nickname", ""),
        ]
    );
}

#[test]
fn row_without_name_is_rejected() {
    let err = decode_text(r#"[{"value":"x"}]"#).unwrap_err();
    assert!(err.to_string().starts_with("malformed payload:"));
}

#[test]
fn row_without_value_is_rejected() {
    let err = decode_text(r#"[{"name":"locale"}]"#).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
    assert!(err.to_string().contains("value"));
}

#[test]
fn row_with_both_spellings_is_rejected() {
    let err = decode_text(r#"[{"name":"a","propriété":"b","value":"1"}]"#).unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
    assert!(err.to_string().contains("duplicate field"));
}
