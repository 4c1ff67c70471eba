//! Shared property helpers.
//!
//! The `minimum`/`maximum` bound properties and the `length` property accept
//! the same raw spellings wherever they appear, and the compiled constraints
//! are enforced by the same checks in both conversion directions. This
//! module owns that shared ground, together with the identifier patterns of
//! the grammar.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::report::{Halt, Path, SchemaError, Segment, Sink, ValidationWarning};
use crate::types::{Bound, LengthConstraint, NumberSchema};

/// Identifier grammar shared by map field names, enum values, and string
/// object keys.
pub(crate) static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-zA-Z0-9_-]+$").expect("static regex must compile"));

/// Canonical integer spelling: an optional minus on nonzero values, no
/// leading zeros, no plus sign, no exponent.
static INTEGER_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^(0|-?[1-9][0-9]*)$").expect("static regex must compile"));

/// Whether `key` spells a canonical integer within the `i64` range.
pub(crate) fn is_integer_key(key: &str) -> bool {
    INTEGER_KEY_PATTERN.is_match(key) && key.parse::<i64>().is_ok()
}

/// f64 form of a JSON number. Without serde_json's arbitrary-precision
/// feature every number is representable.
pub(crate) fn lossy_f64(number: &serde_json::Number) -> f64 {
    number.as_f64().unwrap_or(f64::NAN)
}

fn fail(sink: &mut Sink<SchemaError>, path: &Path, message: String) -> Result<(), Halt> {
    sink.error(SchemaError {
        path: path.clone(),
        message,
    })
}

fn warn_decimal(sink: &mut Sink<SchemaError>, path: &Path) {
    sink.warning(ValidationWarning {
        path: path.clone(),
        message: "should be an integer (got decimal)".to_string(),
    });
}

/// Reads a `minimum` or `maximum` property of a number block.
///
/// A bare number is an inclusive bound; the object form carries a required
/// `value` and an optional `exclusive`. Returns `None` when the property is
/// too malformed to compile; the errors have already been recorded.
pub(crate) fn read_bound(
    property: &str,
    raw: &Value,
    path: &mut Path,
    sink: &mut Sink<SchemaError>,
) -> Result<Option<Bound>, Halt> {
    match raw {
        Value::Number(number) => Ok(Some(Bound::inclusive(lossy_f64(number)))),
        Value::Object(entries) => {
            path.push(Segment::Property(property.to_string()));
            let mut valid = true;
            for key in entries.keys() {
                if key != "value" && key != "exclusive" {
                    fail(sink, path, format!("'{key}' property was unexpected"))?;
                    valid = false;
                }
            }
            let mut exclusive = false;
            if let Some(raw_exclusive) = entries.get("exclusive") {
                match raw_exclusive.as_bool() {
                    Some(flag) => exclusive = flag,
                    None => {
                        fail(sink, path, "'exclusive' property must be a boolean".to_string())?;
                        valid = false;
                    }
                }
            }
            let mut value = None;
            match entries.get("value") {
                None => {
                    fail(sink, path, "'value' property is missing".to_string())?;
                    valid = false;
                }
                Some(raw_value) => match raw_value.as_f64() {
                    Some(number) => value = Some(number),
                    None => {
                        fail(sink, path, "'value' property must be a number".to_string())?;
                        valid = false;
                    }
                },
            }
            path.pop();
            Ok(match (valid, value) {
                (true, Some(value)) => Some(Bound { value, exclusive }),
                _ => None,
            })
        }
        _ => {
            fail(
                sink,
                path,
                format!("'{property}' property must be a number or an object"),
            )?;
            Ok(None)
        }
    }
}

/// Reads a `length` property of a string, array, or object block.
///
/// A bare number is an exact length; the object form carries optional
/// `minimum`/`maximum` limits. Lengths are counts, so decimal spellings
/// only warn and are truncated toward zero, while negatives are errors.
pub(crate) fn read_length(
    raw: &Value,
    path: &mut Path,
    sink: &mut Sink<SchemaError>,
) -> Result<Option<LengthConstraint>, Halt> {
    match raw {
        Value::Number(number) => {
            path.push(Segment::Property("length".to_string()));
            let value = lossy_f64(number);
            if value.fract() != 0.0 {
                warn_decimal(sink, path);
            }
            let valid = if value < 0.0 {
                fail(sink, path, "length must be equal or greater than 0".to_string())?;
                false
            } else {
                true
            };
            path.pop();
            Ok(valid.then(|| LengthConstraint::Exact(value as u64)))
        }
        Value::Object(entries) => {
            path.push(Segment::Property("length".to_string()));
            let mut stray = false;
            for key in entries.keys() {
                if key != "minimum" && key != "maximum" {
                    fail(sink, path, format!("'{key}' property was unexpected"))?;
                    stray = true;
                }
            }
            if stray {
                path.pop();
                return Ok(None);
            }
            let (minimum_valid, minimum) =
                read_length_limit("minimum", entries.get("minimum"), path, sink)?;
            let (maximum_valid, maximum) =
                read_length_limit("maximum", entries.get("maximum"), path, sink)?;
            let mut ordered = true;
            if let (Some(minimum), Some(maximum)) = (minimum, maximum) {
                if minimum > maximum {
                    fail(sink, path, "minimum must be lower than maximum".to_string())?;
                    ordered = false;
                }
            }
            path.pop();
            if !minimum_valid || !maximum_valid || !ordered {
                return Ok(None);
            }
            Ok(Some(LengthConstraint::Range {
                minimum: minimum.map(|value| value as u64),
                maximum: maximum.map(|value| value as u64),
            }))
        }
        _ => {
            fail(sink, path, "'length' property must be a number or an object".to_string())?;
            Ok(None)
        }
    }
}

/// Reads one limit of the object-form `length`. Returns whether the limit
/// is usable and its raw value when it is.
fn read_length_limit(
    property: &str,
    raw: Option<&Value>,
    path: &mut Path,
    sink: &mut Sink<SchemaError>,
) -> Result<(bool, Option<f64>), Halt> {
    let Some(raw) = raw else {
        return Ok((true, None));
    };
    let Some(value) = raw.as_f64() else {
        fail(sink, path, format!("'{property}' property must be a number"))?;
        return Ok((false, None));
    };
    path.push(Segment::Property(property.to_string()));
    if value.fract() != 0.0 {
        warn_decimal(sink, path);
    }
    let valid = if value < 0.0 {
        fail(sink, path, format!("{property} must be equal or greater than 0"))?;
        false
    } else {
        true
    };
    path.pop();
    Ok((valid, valid.then_some(value)))
}

/// Violation messages for a numeric value against its compiled bounds.
/// The minimum and maximum are checked independently; both may fire.
pub(crate) fn check_bounds(number: &NumberSchema, value: f64) -> Vec<String> {
    let mut violations = Vec::new();
    if let Some(minimum) = number.minimum {
        if minimum.exclusive {
            if value <= minimum.value {
                violations.push(format!(
                    "value must be strictly greater than {}",
                    minimum.value
                ));
            }
        } else if value < minimum.value {
            violations.push(format!(
                "value must be equal or greater than {}",
                minimum.value
            ));
        }
    }
    if let Some(maximum) = number.maximum {
        if maximum.exclusive {
            if value >= maximum.value {
                violations.push(format!("value must be strictly lower than {}", maximum.value));
            }
        } else if value > maximum.value {
            violations.push(format!("value must be equal or lower than {}", maximum.value));
        }
    }
    violations
}

/// Violation message for a measured length against its compiled constraint.
pub(crate) fn check_length(constraint: &LengthConstraint, actual: usize) -> Option<String> {
    let actual = actual as u64;
    match constraint {
        LengthConstraint::Exact(expected) => {
            (actual != *expected).then(|| format!("length must be equal to {expected}"))
        }
        LengthConstraint::Range { minimum, maximum } => {
            if let Some(minimum) = minimum {
                if actual < *minimum {
                    return Some(format!("length must be equal or greater than {minimum}"));
                }
            }
            if let Some(maximum) = maximum {
                if actual > *maximum {
                    return Some(format!("length must be equal or lower than {maximum}"));
                }
            }
            None
        }
    }
}
