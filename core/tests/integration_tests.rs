use docform_core::{
    DecodeError, Schema, decode, decode_with_report, encode, validate_schema,
    validate_schema_with_report,
};
use serde_json::{Value, json};

fn library_schema() -> Value {
    json!({
        "type": "map",
        "name": "library",
        "fields": {
            "name": { "type": "string", "length": { "minimum": 1, "maximum": 64 } },
            "open": { "type": "flag" },
            "established": { "type": "number", "decimal": false, "minimum": 1800 },
            "genres": {
                "type": "array",
                "value": { "type": "enum", "values": ["fiction", "poetry", "science"] }
            },
            "shelves": {
                "type": "object",
                "key": "integer",
                "value": { "type": "number", "minimum": 0 }
            },
            "coordinates": {
                "type": "tuple",
                "items": [{ "type": "number" }, { "type": "number" }]
            },
            "motto": { "type": "string", "option": true }
        }
    })
}

#[test]
fn test_full_pipeline_from_raw_schema_to_round_trip() {
    let raw = library_schema();
    assert!(validate_schema(&raw).is_ok());

    let report = validate_schema_with_report(&raw);
    assert!(report.is_valid());
    assert!(report.warnings.is_empty());

    let schema = Schema::from_value(&raw).expect("schema should compile");
    let document = concat!(
        r#"{"name":"Central","open":true,"established":1905,"#,
        r#""genres":["poetry","science"],"shelves":{"0":120,"1":96},"#,
        r#""coordinates":[60.17,24.94]}"#,
    );

    let value = decode(document, &schema).expect("document should conform");
    assert_eq!(value["motto"], Value::Null);

    let encoded = encode(&value, &schema).expect("value should conform");
    assert_eq!(decode(&encoded, &schema).unwrap(), value);
}

#[test]
fn test_inclusive_bound_admits_exactly_the_limit() {
    let schema = Schema::from_value(&json!({ "type": "number", "minimum": 42 })).unwrap();

    assert!(decode("42", &schema).is_ok());
    assert!(decode("43", &schema).is_ok());

    let error = decode("41", &schema).unwrap_err();
    assert_eq!(error.to_string(), "value must be equal or greater than 42 at []");
}

#[test]
fn test_exclusive_bound_rejects_exactly_the_limit() {
    let schema = Schema::from_value(&json!({
        "type": "number",
        "minimum": { "value": 42, "exclusive": true }
    }))
    .unwrap();

    assert!(decode("43", &schema).is_ok());

    let error = decode("42", &schema).unwrap_err();
    assert_eq!(error.to_string(), "value must be strictly greater than 42 at []");
}

#[test]
fn test_exact_length_accepts_only_that_length() {
    let schema = Schema::from_value(&json!({ "type": "string", "length": 42 })).unwrap();

    let exact = format!(r#""{}""#, "a".repeat(42));
    assert!(decode(&exact, &schema).is_ok());

    for wrong in [41, 43] {
        let document = format!(r#""{}""#, "a".repeat(wrong));
        let error = decode(&document, &schema).unwrap_err();
        assert_eq!(error.to_string(), "length must be equal to 42 at []");
    }
}

#[test]
fn test_lazy_decoding_collects_bound_violations_in_order() {
    // Contradictory bounds cannot come out of from_value; build the block
    // directly to observe both checks on one value.
    use docform_core::{Bound, Kind, NumberSchema};

    let schema = Schema::new(Kind::Number(NumberSchema {
        decimal: true,
        minimum: Some(Bound::inclusive(43.0)),
        maximum: Some(Bound::inclusive(41.0)),
    }));

    let report = decode_with_report("42", &schema).unwrap();
    let messages: Vec<&str> = report
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "value must be equal or greater than 43",
            "value must be equal or lower than 41",
        ]
    );
    assert!(report.value.is_none());
}

#[test]
fn test_enum_duplicate_is_flagged_once_per_repeat() {
    let raw = json!({ "type": "enum", "values": ["foo", "bar", "foo"] });

    let report = validate_schema_with_report(&raw);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].message, "'foo' value is duplicated");

    let eager = validate_schema(&raw).unwrap_err();
    assert_eq!(eager, report.errors[0]);
}

#[test]
fn test_tuple_arity_error_suppresses_item_errors() {
    let schema = Schema::from_value(&json!({
        "type": "tuple",
        "items": [{ "type": "number" }, { "type": "number" }, { "type": "number" }]
    }))
    .unwrap();

    let report = decode_with_report("[true, true, true, true]", &schema).unwrap();
    let messages: Vec<&str> = report
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .collect();
    assert_eq!(messages, vec!["length of the array must be 3"]);
}

#[test]
fn test_synthesized_fields_follow_supplied_fields() {
    let schema = Schema::from_value(&json!({
        "type": "map",
        "fields": {
            "foo": { "type": "flag" },
            "bar": { "type": "number", "option": true },
            "quz": { "type": "string" }
        }
    }))
    .unwrap();

    let document = encode(&json!({ "foo": true, "quz": "x" }), &schema).unwrap();
    assert_eq!(document, r#"{"foo":true,"quz":"x","bar":null}"#);

    let value = decode(r#"{"foo":false,"quz":"y"}"#, &schema).unwrap();
    assert_eq!(value, json!({ "foo": false, "quz": "y", "bar": null }));
}

#[test]
fn test_validation_is_idempotent() {
    let raw = json!({
        "type": "map",
        "fields": {
            "ok": { "type": "flag" },
            "broken": { "type": "number", "decimal": "yes", "length": 2 }
        }
    });

    let first = validate_schema_with_report(&raw);
    let second = validate_schema_with_report(&raw);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(validate_schema(&raw).unwrap_err(), first.errors[0]);
}

#[test]
fn test_malformed_documents_fail_before_any_validation() {
    let schema = Schema::from_value(&json!({ "type": "flag" })).unwrap();

    let error = decode(r#"{"unterminated"#, &schema).unwrap_err();
    assert!(matches!(error, DecodeError::Parse(_)));
    assert!(error.to_string().starts_with("malformed document:"));

    assert!(decode_with_report(r#"{"unterminated"#, &schema).is_err());
}

#[test]
fn test_issue_paths_compose_across_both_walks() {
    let raw = json!({
        "type": "map",
        "fields": {
            "rows": {
                "type": "array",
                "value": { "type": "tuple", "items": [{ "type": "bogus" }] }
            }
        }
    });
    let schema_report = validate_schema_with_report(&raw);
    assert_eq!(schema_report.errors.len(), 1);
    assert_eq!(
        schema_report.errors[0].path.to_string(),
        r#"["$rows", "[]", "<0>"]"#
    );

    let schema = Schema::from_value(&json!({
        "type": "map",
        "fields": {
            "rows": {
                "type": "array",
                "value": { "type": "tuple", "items": [{ "type": "number" }] }
            }
        }
    }))
    .unwrap();
    let report = decode_with_report(r#"{"rows":[[1],["x"]]}"#, &schema).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].path.to_string(), r#"["$rows", "[1]", "<0>"]"#);
}

#[test]
fn test_reports_serialize_for_downstream_consumers() {
    let report = validate_schema_with_report(&json!({ "type": "array" }));
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "errors": [{ "path": [], "message": "'value' property is missing" }],
            "warnings": []
        })
    );

    let schema = Schema::from_value(&json!({ "type": "flag" })).unwrap();
    let decoded = decode_with_report("true", &schema).unwrap();
    assert_eq!(
        serde_json::to_value(&decoded).unwrap(),
        json!({ "value": true, "errors": [], "warnings": [] })
    );
}
