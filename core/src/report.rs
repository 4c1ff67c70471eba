//! Issue reporting: structural paths, error and warning types, and the
//! reports returned by the collecting entry points.
//!
//! Every diagnostic produced by this crate carries a [`Path`] locating the
//! offending node inside the walked schema or document, plus a standalone
//! human-readable message. Paths are diagnostic only and are never used to
//! look values back up.
//!
//! # Examples
//!
//! ```
//! use docform_core::{Path, Segment};
//!
//! let root = Path::root();
//! assert_eq!(root.to_string(), "[]");
//!
//! let path = Path::from(vec![
//!     Segment::Property("fields".to_string()),
//!     Segment::Field("foo".to_string()),
//! ]);
//! assert_eq!(path.to_string(), r#"["fields", "$foo"]"#);
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// One step of a structural [`Path`].
///
/// Schema walks use `Property`, `ArrayValue`, `ObjectValue`, `TupleItem` and
/// `Field`; document walks use `Index`, `Key`, `TupleItem` and `Field`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A schema property, rendered as its bare name (`minimum`).
    Property(String),
    /// The element schema of an array block, rendered as `[]`.
    ArrayValue,
    /// The value schema of an object block, rendered as `{}`.
    ObjectValue,
    /// A tuple item position, rendered as `<2>`.
    TupleItem(usize),
    /// A map field, rendered as `$foo`.
    Field(String),
    /// An array element of a document, rendered as `[3]`.
    Index(usize),
    /// An object entry of a document, rendered as `{bar}`.
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Property(name) => write!(f, "{name}"),
            Segment::ArrayValue => write!(f, "[]"),
            Segment::ObjectValue => write!(f, "{{}}"),
            Segment::TupleItem(index) => write!(f, "<{index}>"),
            Segment::Field(name) => write!(f, "${name}"),
            Segment::Index(index) => write!(f, "[{index}]"),
            Segment::Key(key) => write!(f, "{{{key}}}"),
        }
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Structural location of an issue within a schema or a document value.
///
/// Renders as a JSON-style list of segment strings, the root being `[]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Path(Vec<Segment>);

impl Path {
    /// The empty path, pointing at the walked root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Whether the path points at the walked root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments from the root down to the located node.
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub(crate) fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{segment}\"")?;
        }
        write!(f, "]")
    }
}

/// A violation of the schema grammar, reported against a raw schema value.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at {path}")]
pub struct SchemaError {
    /// Location of the offending node within the schema.
    pub path: Path,
    /// Human-readable description of the violation.
    pub message: String,
}

/// A document value that does not conform to its schema.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at {path}")]
pub struct ValidationError {
    /// Location of the offending node within the document.
    pub path: Path,
    /// Human-readable description of the violation.
    pub message: String,
}

/// A non-fatal issue noticed during a walk.
///
/// Warnings never fail an operation and never suppress the produced value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Location of the node the warning is about.
    pub path: Path,
    /// Human-readable description of the issue.
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.path)
    }
}

/// The document text is not syntactically valid JSON.
///
/// Parsing failures always abort the whole decode call; they are never
/// collected per node alongside validation errors.
#[derive(Debug, Error)]
#[error("malformed document: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Error type of the short-circuiting [`decode`](crate::decode).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The document text could not be parsed at all.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed document does not conform to the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Outcome of [`validate_schema_with_report`](crate::validate_schema_with_report).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchemaReport {
    /// Grammar violations, in walk order.
    pub errors: Vec<SchemaError>,
    /// Non-fatal issues, in walk order.
    pub warnings: Vec<ValidationWarning>,
}

impl SchemaReport {
    /// Whether the walked schema is valid. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of [`decode_with_report`](crate::decode_with_report).
#[derive(Debug, Clone, Serialize)]
pub struct DecodeReport {
    /// The adjusted value. `Some` only when `errors` is empty.
    pub value: Option<serde_json::Value>,
    /// Conformance violations, in walk order.
    pub errors: Vec<ValidationError>,
    /// Non-fatal issues, in walk order.
    pub warnings: Vec<ValidationWarning>,
}

impl DecodeReport {
    /// Whether the document conforms to the schema. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of [`encode_with_report`](crate::encode_with_report).
#[derive(Debug, Clone, Serialize)]
pub struct EncodeReport {
    /// The serialized document. `Some` only when `errors` is empty.
    pub document: Option<String>,
    /// Conformance violations, in walk order.
    pub errors: Vec<ValidationError>,
    /// Non-fatal issues, in walk order.
    pub warnings: Vec<ValidationWarning>,
}

impl EncodeReport {
    /// Whether the value conforms to the schema. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Walk behavior on error: stop at the first one or collect them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    FailFast,
    CollectAll,
}

/// Unwind marker raised by a fail-fast [`Sink`] once an error is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Halt;

/// Accumulator shared by all walks.
///
/// Walk code records every issue through the sink and propagates [`Halt`]
/// with `?`; the mode alone decides whether recording an error also stops
/// the walk.
#[derive(Debug)]
pub(crate) struct Sink<E> {
    mode: Mode,
    pub(crate) errors: Vec<E>,
    pub(crate) warnings: Vec<ValidationWarning>,
}

impl<E> Sink<E> {
    pub(crate) fn new(mode: Mode) -> Self {
        Self {
            mode,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Records an error. Halts the walk in fail-fast mode.
    pub(crate) fn error(&mut self, error: E) -> Result<(), Halt> {
        self.errors.push(error);
        match self.mode {
            Mode::FailFast => Err(Halt),
            Mode::CollectAll => Ok(()),
        }
    }

    /// Records a warning. Warnings never halt a walk.
    pub(crate) fn warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// The first recorded error. Meaningful after a fail-fast halt.
    pub(crate) fn into_first_error(self) -> Option<E> {
        self.errors.into_iter().next()
    }
}
