//! Bidirectional document conversion.
//!
//! Decoding parses a JSON document and checks the parsed value against a
//! compiled [`Schema`]; encoding checks an in-memory value and serializes
//! it back to text. Both directions run the same recursive walk and differ
//! only in the wording of type mismatches and in the parse/serialize step
//! at the boundary. The walk produces an adjusted value: conforming input
//! with a `null` filled in for every missing optional map field.
//!
//! # Examples
//!
//! ```
//! use docform_core::{decode, encode, Schema};
//!
//! let schema = Schema::map([
//!     ("id", Schema::number()),
//!     ("tags", Schema::array(Schema::string())),
//! ]);
//!
//! let value = decode(r#"{"id":7,"tags":["a","b"]}"#, &schema).unwrap();
//! let document = encode(&value, &schema).unwrap();
//! assert_eq!(document, r#"{"id":7,"tags":["a","b"]}"#);
//! ```

use serde_json::{Map, Value};
use tracing::debug;

use crate::props::{NAME_PATTERN, check_bounds, check_length, is_integer_key};
use crate::report::{
    DecodeError, DecodeReport, EncodeReport, Halt, Mode, ParseError, Path, Segment, Sink,
    ValidationError,
};
use crate::types::{
    ArraySchema, EnumSchema, KeyKind, Kind, MapSchema, NumberSchema, ObjectSchema, Schema,
    StringSchema, TupleSchema,
};

/// Decodes a JSON document against a schema, stopping at the first
/// conformance error.
///
/// # Examples
///
/// ```
/// use docform_core::{decode, Schema};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::number());
/// assert_eq!(decode("[1, 2, 3]", &schema).unwrap(), json!([1, 2, 3]));
///
/// let error = decode("[1, true]", &schema).unwrap_err();
/// assert_eq!(error.to_string(), r#"was expecting a JSON number at ["[1]"]"#);
/// ```
pub fn decode(document: &str, schema: &Schema) -> Result<Value, DecodeError> {
    let raw: Value = match serde_json::from_str(document) {
        Ok(raw) => raw,
        Err(source) => {
            debug!(error = %source, "document is not valid JSON");
            return Err(ParseError::from(source).into());
        }
    };
    let mut sink = Sink::new(Mode::FailFast);
    let mut converter = Converter {
        direction: Direction::Decode,
        path: Path::root(),
        sink: &mut sink,
    };
    match converter.check(&raw, schema) {
        Ok(Some(adjusted)) => Ok(adjusted),
        Ok(None) | Err(Halt) => Err(sink
            .into_first_error()
            .expect("halted walk records an error")
            .into()),
    }
}

/// Decodes a JSON document against a schema, collecting every conformance
/// error.
///
/// A parse failure still aborts the whole call: there is no value to walk.
///
/// # Examples
///
/// ```
/// use docform_core::{decode_with_report, Schema};
///
/// let schema = Schema::tuple([Schema::number(), Schema::string()]);
/// let report = decode_with_report("[true, 7]", &schema).unwrap();
/// assert_eq!(report.errors.len(), 2);
/// assert!(report.value.is_none());
/// ```
pub fn decode_with_report(document: &str, schema: &Schema) -> Result<DecodeReport, ParseError> {
    let raw: Value = match serde_json::from_str(document) {
        Ok(raw) => raw,
        Err(source) => {
            debug!(error = %source, "document is not valid JSON");
            return Err(ParseError::from(source));
        }
    };
    let mut sink = Sink::new(Mode::CollectAll);
    let mut converter = Converter {
        direction: Direction::Decode,
        path: Path::root(),
        sink: &mut sink,
    };
    // A collecting sink never halts.
    let value = converter.check(&raw, schema).unwrap_or_default();
    debug!(
        errors = sink.errors.len(),
        warnings = sink.warnings.len(),
        "document decoding finished"
    );
    Ok(DecodeReport {
        value,
        errors: sink.errors,
        warnings: sink.warnings,
    })
}

/// Encodes a value into a JSON document, stopping at the first conformance
/// error.
///
/// # Examples
///
/// ```
/// use docform_core::{encode, Schema};
/// use serde_json::json;
///
/// let schema = Schema::map([
///     ("name", Schema::string()),
///     ("admin", Schema::flag().optional()),
/// ]);
///
/// let document = encode(&json!({ "name": "Ada" }), &schema).unwrap();
/// assert_eq!(document, r#"{"name":"Ada","admin":null}"#);
///
/// let error = encode(&json!({ "name": 7 }), &schema).unwrap_err();
/// assert_eq!(error.message, "was expecting a string");
/// ```
pub fn encode(value: &Value, schema: &Schema) -> Result<String, ValidationError> {
    let mut sink = Sink::new(Mode::FailFast);
    let mut converter = Converter {
        direction: Direction::Encode,
        path: Path::root(),
        sink: &mut sink,
    };
    match converter.check(value, schema) {
        Ok(Some(adjusted)) => Ok(serialize_document(&adjusted)),
        Ok(None) | Err(Halt) => Err(sink
            .into_first_error()
            .expect("halted walk records an error")),
    }
}

/// Encodes a value into a JSON document, collecting every conformance
/// error.
///
/// # Examples
///
/// ```
/// use docform_core::{encode_with_report, Schema};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::flag());
/// let report = encode_with_report(&json!([true, 1, 2]), &schema);
/// assert!(report.document.is_none());
/// assert_eq!(report.errors.len(), 2);
/// ```
pub fn encode_with_report(value: &Value, schema: &Schema) -> EncodeReport {
    let mut sink = Sink::new(Mode::CollectAll);
    let mut converter = Converter {
        direction: Direction::Encode,
        path: Path::root(),
        sink: &mut sink,
    };
    // A collecting sink never halts.
    let adjusted = converter.check(value, schema).unwrap_or_default();
    debug!(
        errors = sink.errors.len(),
        warnings = sink.warnings.len(),
        "value encoding finished"
    );
    EncodeReport {
        document: adjusted.map(|adjusted| serialize_document(&adjusted)),
        errors: sink.errors,
        warnings: sink.warnings,
    }
}

fn serialize_document(value: &Value) -> String {
    serde_json::to_string(value).expect("serializing an in-memory JSON value cannot fail")
}

/// Which conversion is running. Only the type-mismatch vocabulary differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Decode,
    Encode,
}

impl Direction {
    fn expected(self, noun: &str) -> String {
        match self {
            Direction::Decode => format!("was expecting a JSON {noun}"),
            Direction::Encode => {
                let article = if noun.starts_with(['a', 'o']) {
                    "an"
                } else {
                    "a"
                };
                format!("was expecting {article} {noun}")
            }
        }
    }
}

/// The walk state for one conversion call.
struct Converter<'a> {
    direction: Direction,
    path: Path,
    sink: &'a mut Sink<ValidationError>,
}

impl Converter<'_> {
    fn error(&mut self, message: String) -> Result<(), Halt> {
        self.sink.error(ValidationError {
            path: self.path.clone(),
            message,
        })
    }

    fn mismatch(&mut self, noun: &str) -> Result<(), Halt> {
        let message = self.direction.expected(noun);
        self.error(message)
    }

    /// Checks one node and returns its adjusted value, `None` when the node
    /// or anything beneath it failed.
    fn check(&mut self, raw: &Value, schema: &Schema) -> Result<Option<Value>, Halt> {
        if schema.option && raw.is_null() {
            return Ok(Some(Value::Null));
        }
        match &schema.kind {
            Kind::Flag => self.check_flag(raw),
            Kind::Number(number) => self.check_number(raw, number),
            Kind::String(string) => self.check_string(raw, string),
            Kind::Array(array) => self.check_array(raw, array),
            Kind::Object(object) => self.check_object(raw, object),
            Kind::Tuple(tuple) => self.check_tuple(raw, tuple),
            Kind::Map(map) => self.check_map(raw, map),
            Kind::Enum(enumeration) => self.check_enum(raw, enumeration),
        }
    }

    fn check_flag(&mut self, raw: &Value) -> Result<Option<Value>, Halt> {
        if raw.is_boolean() {
            Ok(Some(raw.clone()))
        } else {
            self.mismatch("boolean")?;
            Ok(None)
        }
    }

    fn check_number(&mut self, raw: &Value, number: &NumberSchema) -> Result<Option<Value>, Halt> {
        let Some(value) = raw.as_f64() else {
            self.mismatch("number")?;
            return Ok(None);
        };
        let mut failed = false;
        if !number.decimal && value.fract() != 0.0 {
            self.error("was expecting non-decimal number".to_string())?;
            failed = true;
        }
        for violation in check_bounds(number, value) {
            self.error(violation)?;
            failed = true;
        }
        Ok((!failed).then(|| raw.clone()))
    }

    fn check_string(&mut self, raw: &Value, string: &StringSchema) -> Result<Option<Value>, Halt> {
        let Some(value) = raw.as_str() else {
            self.mismatch("string")?;
            return Ok(None);
        };
        let mut failed = false;
        if let Some(constraint) = &string.length {
            if let Some(violation) = check_length(constraint, value.chars().count()) {
                self.error(violation)?;
                failed = true;
            }
        }
        if let Some(pattern) = &string.pattern {
            if !pattern.is_match(value) {
                self.error("value did not match the pattern".to_string())?;
                failed = true;
            }
        }
        Ok((!failed).then(|| raw.clone()))
    }

    fn check_array(&mut self, raw: &Value, array: &ArraySchema) -> Result<Option<Value>, Halt> {
        let Some(elements) = raw.as_array() else {
            self.mismatch("array")?;
            return Ok(None);
        };
        let mut failed = false;
        if let Some(constraint) = &array.length {
            if let Some(violation) = check_length(constraint, elements.len()) {
                self.error(violation)?;
                failed = true;
            }
        }
        // Failed elements keep their position as null placeholders.
        let mut adjusted = Vec::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            self.path.push(Segment::Index(index));
            let item = self.check(element, &array.value)?;
            self.path.pop();
            match item {
                Some(item) => adjusted.push(item),
                None => {
                    adjusted.push(Value::Null);
                    failed = true;
                }
            }
        }
        Ok((!failed).then(|| Value::Array(adjusted)))
    }

    fn check_object(&mut self, raw: &Value, object: &ObjectSchema) -> Result<Option<Value>, Halt> {
        let Some(entries) = raw.as_object() else {
            self.mismatch("object")?;
            return Ok(None);
        };
        let mut failed = false;
        if let Some(constraint) = &object.length {
            if let Some(violation) = check_length(constraint, entries.len()) {
                self.error(violation)?;
                failed = true;
            }
        }
        let mut adjusted = Map::new();
        for (index, (key, entry)) in entries.iter().enumerate() {
            let admissible = match object.key {
                KeyKind::Integer => is_integer_key(key),
                KeyKind::String => NAME_PATTERN.is_match(key),
            };
            if !admissible {
                let expectation = match object.key {
                    KeyKind::Integer => "expected it to be an integer",
                    KeyKind::String => "expected it to match the pattern",
                };
                self.error(format!("key at index {index} is invalid; {expectation}"))?;
                failed = true;
                continue;
            }
            self.path.push(Segment::Key(key.clone()));
            let value = self.check(entry, &object.value)?;
            self.path.pop();
            match value {
                Some(value) => {
                    adjusted.insert(key.clone(), value);
                }
                None => failed = true,
            }
        }
        Ok((!failed).then(|| Value::Object(adjusted)))
    }

    fn check_tuple(&mut self, raw: &Value, tuple: &TupleSchema) -> Result<Option<Value>, Halt> {
        let Some(elements) = raw.as_array() else {
            self.mismatch("array")?;
            return Ok(None);
        };
        if elements.len() != tuple.items.len() {
            self.error(format!("length of the array must be {}", tuple.items.len()))?;
            return Ok(None);
        }
        let mut failed = false;
        let mut adjusted = Vec::with_capacity(elements.len());
        for (index, (element, item)) in elements.iter().zip(&tuple.items).enumerate() {
            self.path.push(Segment::TupleItem(index));
            let value = self.check(element, item)?;
            self.path.pop();
            match value {
                Some(value) => adjusted.push(value),
                None => {
                    adjusted.push(Value::Null);
                    failed = true;
                }
            }
        }
        Ok((!failed).then(|| Value::Array(adjusted)))
    }

    fn check_map(&mut self, raw: &Value, map: &MapSchema) -> Result<Option<Value>, Halt> {
        let Some(entries) = raw.as_object() else {
            self.mismatch("object")?;
            return Ok(None);
        };
        let mut failed = false;
        for key in entries.keys() {
            if !map.fields.contains_key(key.as_str()) {
                self.error(format!("'{key}' field was unexpected"))?;
                failed = true;
            }
        }
        let mut adjusted = Map::new();
        let mut absent = Vec::new();
        for (name, field) in &map.fields {
            match entries.get(name) {
                Some(entry) => {
                    self.path.push(Segment::Field(name.clone()));
                    let value = self.check(entry, field)?;
                    self.path.pop();
                    match value {
                        Some(value) => {
                            adjusted.insert(name.clone(), value);
                        }
                        None => failed = true,
                    }
                }
                None if field.option => absent.push(name.clone()),
                None => {
                    self.error(format!("'{name}' field was missing"))?;
                    failed = true;
                }
            }
        }
        // Tolerated absences surface as explicit nulls after the supplied
        // fields.
        for name in absent {
            adjusted.insert(name, Value::Null);
        }
        Ok((!failed).then(|| Value::Object(adjusted)))
    }

    fn check_enum(&mut self, raw: &Value, enumeration: &EnumSchema) -> Result<Option<Value>, Halt> {
        let Some(value) = raw.as_str() else {
            self.mismatch("string")?;
            return Ok(None);
        };
        if enumeration.values.iter().any(|candidate| candidate.as_str() == value) {
            Ok(Some(raw.clone()))
        } else {
            self.error("enum value is invalid".to_string())?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::types::{Bound, LengthConstraint};

    use super::*;

    fn decode_messages(document: &str, schema: &Schema) -> Vec<String> {
        decode_with_report(document, schema)
            .expect("document should parse")
            .errors
            .into_iter()
            .map(|error| error.message)
            .collect()
    }

    #[test]
    fn test_type_mismatch_vocabulary_differs_by_direction() {
        let schema = Schema::flag();
        let decoded = decode("1", &schema).unwrap_err();
        assert_eq!(decoded.to_string(), "was expecting a JSON boolean at []");

        let encoded = encode(&json!(1), &schema).unwrap_err();
        assert_eq!(encoded.message, "was expecting a boolean");
    }

    #[test]
    fn test_encode_vocabulary_uses_an_before_vowels() {
        let array = encode(&json!(7), &Schema::array(Schema::flag())).unwrap_err();
        assert_eq!(array.message, "was expecting an array");

        let object = encode(&json!(7), &Schema::map([("a", Schema::flag())])).unwrap_err();
        assert_eq!(object.message, "was expecting an object");
    }

    #[test]
    fn test_integer_number_rejects_fractions() {
        let schema = Schema::new(Kind::Number(NumberSchema {
            decimal: false,
            minimum: None,
            maximum: None,
        }));
        assert!(decode("2", &schema).is_ok());
        assert!(decode("2.0", &schema).is_ok());
        assert_eq!(
            decode_messages("2.5", &schema),
            vec!["was expecting non-decimal number".to_string()]
        );
    }

    #[test]
    fn test_inclusive_bound_admits_the_limit() {
        let schema = Schema::new(Kind::Number(NumberSchema {
            decimal: true,
            minimum: Some(Bound::inclusive(42.0)),
            maximum: None,
        }));
        assert!(decode("42", &schema).is_ok());
        assert_eq!(
            decode_messages("41", &schema),
            vec!["value must be equal or greater than 42".to_string()]
        );
    }

    #[test]
    fn test_exclusive_bound_rejects_the_limit() {
        let schema = Schema::new(Kind::Number(NumberSchema {
            decimal: true,
            minimum: Some(Bound::exclusive(42.0)),
            maximum: None,
        }));
        assert!(decode("43", &schema).is_ok());
        assert_eq!(
            decode_messages("42", &schema),
            vec!["value must be strictly greater than 42".to_string()]
        );
    }

    #[test]
    fn test_maximum_messages_mirror_minimum() {
        let inclusive = Schema::new(Kind::Number(NumberSchema {
            decimal: true,
            minimum: None,
            maximum: Some(Bound::inclusive(10.0)),
        }));
        assert_eq!(
            decode_messages("11", &inclusive),
            vec!["value must be equal or lower than 10".to_string()]
        );

        let exclusive = Schema::new(Kind::Number(NumberSchema {
            decimal: true,
            minimum: None,
            maximum: Some(Bound::exclusive(10.0)),
        }));
        assert_eq!(
            decode_messages("10", &exclusive),
            vec!["value must be strictly lower than 10".to_string()]
        );
    }

    #[test]
    fn test_both_bounds_reported_in_one_pass() {
        // Degenerate bounds are constructible through the typed model even
        // though raw schemas reject them; the walk trusts the schema.
        let schema = Schema::new(Kind::Number(NumberSchema {
            decimal: true,
            minimum: Some(Bound::inclusive(43.0)),
            maximum: Some(Bound::inclusive(41.0)),
        }));
        assert_eq!(
            decode_messages("42", &schema),
            vec![
                "value must be equal or greater than 43".to_string(),
                "value must be equal or lower than 41".to_string(),
            ]
        );
    }

    #[test]
    fn test_string_length_counts_characters() {
        let schema = Schema::new(Kind::String(StringSchema {
            length: Some(LengthConstraint::Exact(3)),
            pattern: None,
        }));
        assert!(decode(r#""åäö""#, &schema).is_ok());
        assert_eq!(
            decode_messages(r#""ab""#, &schema),
            vec!["length must be equal to 3".to_string()]
        );
    }

    #[test]
    fn test_string_length_and_pattern_fire_independently() {
        let schema = Schema::from_value(&json!({
            "type": "string",
            "length": 3,
            "pattern": "^[a-z]+$"
        }))
        .unwrap();
        assert_eq!(
            decode_messages(r#""ABCD""#, &schema),
            vec![
                "length must be equal to 3".to_string(),
                "value did not match the pattern".to_string(),
            ]
        );
    }

    #[test]
    fn test_array_failures_keep_positions_as_nulls() {
        let schema = Schema::array(Schema::number());
        let report = decode_with_report(r#"[1, "x", 3]"#, &schema).unwrap();
        assert!(report.value.is_none());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path.to_string(), r#"["[1]"]"#);
    }

    #[test]
    fn test_array_length_applies_to_element_count() {
        let schema = Schema::from_value(&json!({
            "type": "array",
            "value": { "type": "number" },
            "length": { "minimum": 2 }
        }))
        .unwrap();
        assert_eq!(
            decode_messages("[1]", &schema),
            vec!["length must be equal or greater than 2".to_string()]
        );
    }

    #[test]
    fn test_tuple_arity_mismatch_skips_item_checks() {
        let schema = Schema::tuple([Schema::number(), Schema::number(), Schema::number()]);
        assert_eq!(
            decode_messages("[true, true, true, true]", &schema),
            vec!["length of the array must be 3".to_string()]
        );
    }

    #[test]
    fn test_tuple_items_checked_positionally() {
        let schema = Schema::tuple([Schema::number(), Schema::string()]);
        let report = decode_with_report("[1, 2]", &schema).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path.to_string(), r#"["<1>"]"#);
        assert_eq!(report.errors[0].message, "was expecting a JSON string");
    }

    #[test]
    fn test_object_integer_keys_must_be_canonical() {
        let schema = Schema::object(KeyKind::Integer, Schema::number());
        assert!(decode(r#"{"-3":1,"0":2,"10":3}"#, &schema).is_ok());
        assert_eq!(
            decode_messages(r#"{"0":1,"007":2,"x":3}"#, &schema),
            vec![
                "key at index 1 is invalid; expected it to be an integer".to_string(),
                "key at index 2 is invalid; expected it to be an integer".to_string(),
            ]
        );
    }

    #[test]
    fn test_object_string_keys_follow_the_name_pattern() {
        let schema = Schema::object(KeyKind::String, Schema::flag());
        assert!(decode(r#"{"some-key_2":true}"#, &schema).is_ok());
        assert_eq!(
            decode_messages(r#"{"bad key":true}"#, &schema),
            vec!["key at index 0 is invalid; expected it to match the pattern".to_string()]
        );
    }

    #[test]
    fn test_object_values_recurse_with_key_paths() {
        let schema = Schema::object(KeyKind::String, Schema::number());
        let report = decode_with_report(r#"{"a":1,"b":"x"}"#, &schema).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path.to_string(), r#"["{b}"]"#);
    }

    #[test]
    fn test_map_reports_unexpected_before_missing() {
        let schema = Schema::map([("a", Schema::flag()), ("b", Schema::flag())]);
        assert_eq!(
            decode_messages(r#"{"c":true}"#, &schema),
            vec![
                "'c' field was unexpected".to_string(),
                "'a' field was missing".to_string(),
                "'b' field was missing".to_string(),
            ]
        );
    }

    #[test]
    fn test_map_appends_synthesized_nulls_after_supplied_fields() {
        let schema = Schema::map([
            ("foo", Schema::flag()),
            ("bar", Schema::number().optional()),
            ("quz", Schema::string()),
        ]);
        let document = encode(&json!({ "foo": true, "quz": "x" }), &schema).unwrap();
        assert_eq!(document, r#"{"foo":true,"quz":"x","bar":null}"#);
    }

    #[test]
    fn test_optional_blocks_accept_null_anywhere() {
        let schema = Schema::map([("note", Schema::string().optional())]);
        let value = decode(r#"{"note":null}"#, &schema).unwrap();
        assert_eq!(value, json!({ "note": null }));

        let top = Schema::number().optional();
        assert_eq!(decode("null", &top).unwrap(), Value::Null);
    }

    #[test]
    fn test_enum_checks_membership() {
        let schema = Schema::enumeration(["red", "green", "blue"]);
        assert_eq!(decode(r#""red""#, &schema).unwrap(), json!("red"));
        assert_eq!(
            decode_messages(r#""yellow""#, &schema),
            vec!["enum value is invalid".to_string()]
        );
        assert_eq!(
            decode_messages("7", &schema),
            vec!["was expecting a JSON string".to_string()]
        );
    }

    #[test]
    fn test_nested_paths_compose_across_kinds() {
        let schema = Schema::map([("nums", Schema::array(Schema::number()))]);
        let report = decode_with_report(r#"{"nums":[1,2,false]}"#, &schema).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path.to_string(), r#"["$nums", "[2]"]"#);
    }

    #[test]
    fn test_parse_failure_aborts_both_decode_forms() {
        let schema = Schema::flag();
        assert!(matches!(
            decode("{oops", &schema),
            Err(DecodeError::Parse(_))
        ));
        assert!(decode_with_report("{oops", &schema).is_err());
    }

    #[test]
    fn test_eager_decode_returns_the_first_collected_error() {
        let schema = Schema::array(Schema::flag());
        let report = decode_with_report("[1, 2]", &schema).unwrap();
        assert_eq!(report.errors.len(), 2);

        let DecodeError::Validation(eager) = decode("[1, 2]", &schema).unwrap_err() else {
            panic!("expected a validation error");
        };
        assert_eq!(eager, report.errors[0]);
    }

    #[test]
    fn test_encode_report_carries_the_document_only_when_clean() {
        let schema = Schema::map([("on", Schema::flag())]);

        let clean = encode_with_report(&json!({ "on": true }), &schema);
        assert!(clean.is_valid());
        assert_eq!(clean.document.as_deref(), Some(r#"{"on":true}"#));
        assert!(clean.warnings.is_empty());

        let broken = encode_with_report(&json!({ "on": 1 }), &schema);
        assert!(!broken.is_valid());
        assert!(broken.document.is_none());
    }

    #[test]
    fn test_decode_then_encode_round_trips_with_null_normalization() {
        let schema = Schema::map([
            ("id", Schema::number()),
            ("name", Schema::string()),
            ("note", Schema::string().optional()),
        ]);

        let value = decode(r#"{"id":7,"name":"x"}"#, &schema).unwrap();
        assert_eq!(value, json!({ "id": 7, "name": "x", "note": null }));

        let document = encode(&value, &schema).unwrap();
        assert_eq!(document, r#"{"id":7,"name":"x","note":null}"#);

        // A normalized value is a fixed point.
        assert_eq!(decode(&document, &schema).unwrap(), value);
    }
}
