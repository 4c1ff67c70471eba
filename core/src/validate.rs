//! Schema validation and compilation.
//!
//! A raw schema is an untrusted `serde_json::Value`. One recursive walk
//! checks it against the block grammar and, on the compiling path, builds
//! the typed [`Schema`] tree at the same time. [`validate_schema`] and
//! [`validate_schema_with_report`] run the walk for its diagnostics alone;
//! [`Schema::from_value`] runs it for the tree and fails on the first
//! violation.
//!
//! # Examples
//!
//! ```
//! use docform_core::validate_schema;
//! use serde_json::json;
//!
//! let schema = json!({ "type": "array", "value": { "type": "number" } });
//! assert!(validate_schema(&schema).is_ok());
//!
//! let error = validate_schema(&json!({ "type": "rocket" })).unwrap_err();
//! assert_eq!(error.message, "'rocket' is not a valid type");
//! ```

use std::collections::HashSet;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::props::{NAME_PATTERN, read_bound, read_length};
use crate::report::{Halt, Mode, Path, SchemaError, SchemaReport, Segment, Sink};
use crate::types::{
    ArraySchema, EnumSchema, KeyKind, Kind, MapSchema, NumberSchema, ObjectSchema, Schema,
    StringSchema, TupleSchema,
};

/// Properties legal on every block.
const COMMON_PROPERTIES: [&str; 4] = ["type", "name", "description", "option"];

/// Validates a raw schema, stopping at the first grammar violation.
///
/// Warnings are not reported here; use [`validate_schema_with_report`] to
/// see them.
///
/// # Examples
///
/// ```
/// use docform_core::validate_schema;
/// use serde_json::json;
///
/// let schema = json!({
///     "type": "map",
///     "fields": { "id": { "type": "number", "decimal": false } },
/// });
/// assert!(validate_schema(&schema).is_ok());
///
/// let error = validate_schema(&json!({ "type": "number", "decimal": 1 })).unwrap_err();
/// assert_eq!(error.message, "'decimal' property must be a boolean");
/// ```
pub fn validate_schema(schema: &Value) -> Result<(), SchemaError> {
    let mut sink = Sink::new(Mode::FailFast);
    let mut checker = Checker {
        path: Path::root(),
        sink: &mut sink,
        compile_patterns: false,
    };
    match checker.check_block(schema) {
        Ok(_) => Ok(()),
        Err(Halt) => Err(sink.into_first_error().expect("halted walk records an error")),
    }
}

/// Validates a raw schema, collecting every error and warning.
///
/// # Examples
///
/// ```
/// use docform_core::validate_schema_with_report;
/// use serde_json::json;
///
/// let report = validate_schema_with_report(&json!({
///     "type": "enum",
///     "values": ["foo", "bar", "foo"]
/// }));
/// assert!(!report.is_valid());
/// assert_eq!(report.errors[0].message, "'foo' value is duplicated");
/// ```
pub fn validate_schema_with_report(schema: &Value) -> SchemaReport {
    let mut sink = Sink::new(Mode::CollectAll);
    let mut checker = Checker {
        path: Path::root(),
        sink: &mut sink,
        compile_patterns: false,
    };
    // A collecting sink never halts.
    let _ = checker.check_block(schema);
    debug!(
        errors = sink.errors.len(),
        warnings = sink.warnings.len(),
        "schema validation finished"
    );
    SchemaReport {
        errors: sink.errors,
        warnings: sink.warnings,
    }
}

impl Schema {
    /// Compiles a raw schema into its typed form, failing on the first
    /// grammar violation.
    ///
    /// Compilation is stricter than [`validate_schema`] on one point:
    /// `pattern` sources must compile as regular expressions here, because
    /// the typed schema stores the compiled form.
    ///
    /// # Examples
    ///
    /// ```
    /// use docform_core::{validate_schema, Kind, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_value(&json!({
    ///     "type": "map",
    ///     "fields": {
    ///         "id": { "type": "number", "decimal": false },
    ///         "tag": { "type": "string", "option": true }
    ///     }
    /// }))
    /// .unwrap();
    /// let Kind::Map(map) = &schema.kind else { panic!("expected a map") };
    /// assert!(map.fields["tag"].option);
    ///
    /// // Pattern sources are only parsed when compiling.
    /// let raw = json!({ "type": "string", "pattern": "[" });
    /// assert!(validate_schema(&raw).is_ok());
    /// assert!(Schema::from_value(&raw).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let mut sink = Sink::new(Mode::FailFast);
        let mut checker = Checker {
            path: Path::root(),
            sink: &mut sink,
            compile_patterns: true,
        };
        match checker.check_block(value) {
            Ok(schema) => Ok(schema.expect("fail-fast walk builds a schema or halts")),
            Err(Halt) => Err(sink.into_first_error().expect("halted walk records an error")),
        }
    }
}

/// Grammar tag of a block, parsed from its `type` property.
#[derive(Debug, Clone, Copy)]
enum Tag {
    Flag,
    Number,
    String,
    Array,
    Object,
    Tuple,
    Map,
    Enum,
}

impl Tag {
    fn parse(tag: &str) -> Option<Self> {
        match tag {
            "flag" => Some(Self::Flag),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "tuple" => Some(Self::Tuple),
            "map" => Some(Self::Map),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }

    /// Kind-specific properties legal alongside the common set.
    fn properties(self) -> &'static [&'static str] {
        match self {
            Self::Flag => &[],
            Self::Number => &["decimal", "minimum", "maximum"],
            Self::String => &["length", "pattern"],
            Self::Array => &["value", "length"],
            Self::Object => &["value", "key", "length"],
            Self::Tuple => &["items"],
            Self::Map => &["fields"],
            Self::Enum => &["values"],
        }
    }
}

/// The walk state: where we are, where issues go, and whether pattern
/// sources must compile.
struct Checker<'a> {
    path: Path,
    sink: &'a mut Sink<SchemaError>,
    compile_patterns: bool,
}

impl Checker<'_> {
    fn error(&mut self, message: String) -> Result<(), Halt> {
        self.sink.error(SchemaError {
            path: self.path.clone(),
            message,
        })
    }

    /// Checks one block and builds its typed form when it is intact enough.
    ///
    /// `Ok(None)` means the block had errors; in collecting mode the walk
    /// still continues wherever it can.
    fn check_block(&mut self, value: &Value) -> Result<Option<Schema>, Halt> {
        let Some(object) = value.as_object() else {
            self.error("value must be an object".to_string())?;
            return Ok(None);
        };

        let tag = match object.get("type") {
            None => {
                self.error("'type' property is missing".to_string())?;
                return Ok(None);
            }
            Some(raw_type) => match raw_type.as_str() {
                None => {
                    self.error("'type' property must be a string".to_string())?;
                    return Ok(None);
                }
                Some(spelled) => match Tag::parse(spelled) {
                    None => {
                        self.error(format!("'{spelled}' is not a valid type"))?;
                        return Ok(None);
                    }
                    Some(tag) => tag,
                },
            },
        };

        for key in object.keys() {
            let key = key.as_str();
            if !COMMON_PROPERTIES.contains(&key) && !tag.properties().contains(&key) {
                self.error(format!("'{key}' property was unexpected"))?;
            }
        }

        let kind = match tag {
            Tag::Flag => {
                self.check_common(object)?;
                Some(Kind::Flag)
            }
            Tag::Number => self.check_number(object)?,
            Tag::String => self.check_string(object)?,
            Tag::Array => self.check_array(object)?,
            Tag::Object => self.check_object(object)?,
            Tag::Tuple => self.check_tuple(object)?,
            Tag::Map => self.check_map(object)?,
            Tag::Enum => self.check_enum(object)?,
        };

        let Some(kind) = kind else {
            return Ok(None);
        };
        Ok(Some(Schema {
            name: object.get("name").and_then(Value::as_str).map(String::from),
            description: object
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            option: object.get("option").and_then(Value::as_bool).unwrap_or(false),
            kind,
        }))
    }

    /// The `name`, `description` and `option` checks shared by every kind,
    /// run after the kind body.
    fn check_common(&mut self, object: &Map<String, Value>) -> Result<(), Halt> {
        if let Some(name) = object.get("name") {
            if !name.is_string() {
                self.error("'name' property must be a string".to_string())?;
            }
        }
        if let Some(description) = object.get("description") {
            if !description.is_string() {
                self.error("'description' property must be a string".to_string())?;
            }
        }
        if let Some(option) = object.get("option") {
            if !option.is_boolean() {
                self.error("'option' property must be a boolean".to_string())?;
            }
        }
        Ok(())
    }

    fn check_number(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let mut number = NumberSchema::default();
        let mut valid = true;

        if let Some(raw) = object.get("decimal") {
            match raw.as_bool() {
                Some(decimal) => number.decimal = decimal,
                None => {
                    self.error("'decimal' property must be a boolean".to_string())?;
                    valid = false;
                }
            }
        }
        if let Some(raw) = object.get("minimum") {
            match read_bound("minimum", raw, &mut self.path, self.sink)? {
                Some(bound) => number.minimum = Some(bound),
                None => valid = false,
            }
        }
        if let Some(raw) = object.get("maximum") {
            match read_bound("maximum", raw, &mut self.path, self.sink)? {
                Some(bound) => number.maximum = Some(bound),
                None => valid = false,
            }
        }
        // Raw limit values only; exclusivity does not tighten this check.
        if let (Some(minimum), Some(maximum)) = (number.minimum, number.maximum) {
            if maximum.value < minimum.value {
                self.error("minimum must be lower than maximum".to_string())?;
                valid = false;
            }
        }

        self.check_common(object)?;
        Ok(valid.then(|| Kind::Number(number)))
    }

    fn check_string(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let mut string = StringSchema::default();
        let mut valid = true;

        if let Some(raw) = object.get("length") {
            match read_length(raw, &mut self.path, self.sink)? {
                Some(constraint) => string.length = Some(constraint),
                None => valid = false,
            }
        }
        if let Some(raw) = object.get("pattern") {
            match raw.as_str() {
                None => {
                    self.error("'pattern' property must be a string".to_string())?;
                    valid = false;
                }
                Some(source) => {
                    if self.compile_patterns {
                        match Regex::new(source) {
                            Ok(pattern) => string.pattern = Some(pattern),
                            Err(_) => {
                                self.error(
                                    "'pattern' property is not a valid regular expression"
                                        .to_string(),
                                )?;
                                valid = false;
                            }
                        }
                    }
                }
            }
        }

        self.check_common(object)?;
        Ok(valid.then(|| Kind::String(string)))
    }

    fn check_array(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        // A valueless array aborts the whole block, common checks included.
        let Some(raw_value) = object.get("value") else {
            self.error("'value' property is missing".to_string())?;
            return Ok(None);
        };
        self.path.push(Segment::ArrayValue);
        let element = self.check_block(raw_value)?;
        self.path.pop();

        let mut length = None;
        let mut length_valid = true;
        if let Some(raw) = object.get("length") {
            match read_length(raw, &mut self.path, self.sink)? {
                Some(constraint) => length = Some(constraint),
                None => length_valid = false,
            }
        }

        self.check_common(object)?;
        Ok(match element {
            Some(element) if length_valid => Some(Kind::Array(ArraySchema {
                value: Box::new(element),
                length,
            })),
            _ => None,
        })
    }

    fn check_object(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let element = match object.get("value") {
            None => {
                self.error("'value' property is missing".to_string())?;
                None
            }
            Some(raw_value) => {
                self.path.push(Segment::ObjectValue);
                let element = self.check_block(raw_value)?;
                self.path.pop();
                element
            }
        };

        let key = match object.get("key") {
            None => {
                self.error("'key' property is missing".to_string())?;
                None
            }
            Some(raw_key) => match raw_key.as_str() {
                Some("integer") => Some(KeyKind::Integer),
                Some("string") => Some(KeyKind::String),
                _ => {
                    self.error(
                        "'key' property must be either 'integer' or 'string'".to_string(),
                    )?;
                    None
                }
            },
        };

        let mut length = None;
        let mut length_valid = true;
        if let Some(raw) = object.get("length") {
            match read_length(raw, &mut self.path, self.sink)? {
                Some(constraint) => length = Some(constraint),
                None => length_valid = false,
            }
        }

        self.check_common(object)?;
        Ok(match (element, key) {
            (Some(element), Some(key)) if length_valid => Some(Kind::Object(ObjectSchema {
                key,
                value: Box::new(element),
                length,
            })),
            _ => None,
        })
    }

    fn check_tuple(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let mut items = None;
        match object.get("items") {
            None => self.error("'items' property is missing".to_string())?,
            Some(Value::Array(raw_items)) if raw_items.is_empty() => {
                self.error("'items' property must not be empty".to_string())?
            }
            Some(Value::Array(raw_items)) => {
                let mut built = Vec::with_capacity(raw_items.len());
                let mut complete = true;
                for (index, raw_item) in raw_items.iter().enumerate() {
                    self.path.push(Segment::TupleItem(index));
                    match self.check_block(raw_item)? {
                        Some(item) => built.push(item),
                        None => complete = false,
                    }
                    self.path.pop();
                }
                if complete {
                    items = Some(built);
                }
            }
            Some(_) => self.error("'items' property must be an array".to_string())?,
        }

        self.check_common(object)?;
        Ok(items.map(|items| Kind::Tuple(TupleSchema { items })))
    }

    fn check_map(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let mut fields = None;
        match object.get("fields") {
            None => self.error("'fields' property is missing".to_string())?,
            Some(Value::Object(raw_fields)) if raw_fields.is_empty() => {
                self.error("'fields' property must not be empty".to_string())?
            }
            Some(Value::Object(raw_fields)) => {
                let mut built = IndexMap::with_capacity(raw_fields.len());
                let mut complete = true;
                for (name, raw_field) in raw_fields {
                    if !NAME_PATTERN.is_match(name) {
                        self.error(format!("'{name}' field name is invalid"))?;
                        complete = false;
                        continue;
                    }
                    self.path.push(Segment::Field(name.clone()));
                    match self.check_block(raw_field)? {
                        Some(field) => {
                            built.insert(name.clone(), field);
                        }
                        None => complete = false,
                    }
                    self.path.pop();
                }
                if complete {
                    fields = Some(built);
                }
            }
            Some(_) => self.error("'fields' property must be an object".to_string())?,
        }

        self.check_common(object)?;
        Ok(fields.map(|fields| Kind::Map(MapSchema { fields })))
    }

    fn check_enum(&mut self, object: &Map<String, Value>) -> Result<Option<Kind>, Halt> {
        let mut values = None;
        match object.get("values") {
            None => self.error("'values' property is missing".to_string())?,
            Some(Value::Array(raw_values)) if raw_values.is_empty() => {
                self.error("'values' property must not be empty".to_string())?
            }
            Some(Value::Array(raw_values)) => {
                self.path.push(Segment::Property("values".to_string()));
                let mut built = Vec::with_capacity(raw_values.len());
                let mut complete = true;
                let mut seen: HashSet<&str> = HashSet::new();
                for (index, raw_value) in raw_values.iter().enumerate() {
                    let Some(value) = raw_value.as_str() else {
                        self.error(format!("value at index {index} must be a string"))?;
                        complete = false;
                        continue;
                    };
                    if !NAME_PATTERN.is_match(value) {
                        self.error(format!("'{value}' value is invalid"))?;
                        complete = false;
                    }
                    if !seen.insert(value) {
                        self.error(format!("'{value}' value is duplicated"))?;
                        complete = false;
                    }
                    built.push(value.to_string());
                }
                self.path.pop();
                if complete {
                    values = Some(built);
                }
            }
            Some(_) => self.error("'values' property must be an array".to_string())?,
        }

        self.check_common(object)?;
        Ok(values.map(|values| Kind::Enum(EnumSchema { values })))
    }
}
