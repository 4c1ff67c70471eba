//! Typed schema model.
//!
//! A schema is a tree of [`Schema`] blocks. Each block pairs the properties
//! shared by every kind (`name`, `description`, `option`) with a [`Kind`]
//! carrying the kind-specific constraints. Trees are built either through
//! the constructors below or compiled from a raw JSON schema with
//! [`Schema::from_value`].
//!
//! # Examples
//!
//! ```
//! use docform_core::{Schema, Kind};
//!
//! let schema = Schema::map([
//!     ("name", Schema::string()),
//!     ("admin", Schema::flag().optional()),
//! ]);
//!
//! assert!(matches!(schema.kind, Kind::Map(_)));
//! assert!(!schema.option);
//! ```

use indexmap::IndexMap;
use regex::Regex;

/// One block of the recursive schema grammar.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Display name of the described value.
    pub name: Option<String>,
    /// Free-form description of the described value.
    pub description: Option<String>,
    /// Whether `null` is accepted in place of a conforming value.
    pub option: bool,
    /// The kind-specific constraints of this block.
    pub kind: Kind,
}

impl Schema {
    /// Creates a block of the given kind with no common properties set.
    pub fn new(kind: Kind) -> Self {
        Self {
            name: None,
            description: None,
            option: false,
            kind,
        }
    }

    /// A boolean block.
    ///
    /// # Examples
    ///
    /// ```
    /// use docform_core::{decode, Schema};
    ///
    /// let schema = Schema::flag();
    /// assert_eq!(decode("true", &schema).unwrap(), serde_json::json!(true));
    /// assert!(decode("0", &schema).is_err());
    /// ```
    pub fn flag() -> Self {
        Self::new(Kind::Flag)
    }

    /// A numeric block accepting any JSON number.
    ///
    /// Tighten it by filling in the [`NumberSchema`] payload:
    ///
    /// ```
    /// use docform_core::{decode, Bound, Kind, NumberSchema, Schema};
    ///
    /// let schema = Schema::new(Kind::Number(NumberSchema {
    ///     decimal: false,
    ///     minimum: Some(Bound::inclusive(0.0)),
    ///     maximum: None,
    /// }));
    ///
    /// assert!(decode("7", &schema).is_ok());
    /// assert!(decode("7.5", &schema).is_err());
    /// assert!(decode("-1", &schema).is_err());
    /// ```
    pub fn number() -> Self {
        Self::new(Kind::Number(NumberSchema::default()))
    }

    /// A string block with no length or pattern constraint.
    pub fn string() -> Self {
        Self::new(Kind::String(StringSchema::default()))
    }

    /// A uniform array block whose elements all conform to `value`.
    pub fn array(value: Schema) -> Self {
        Self::new(Kind::Array(ArraySchema {
            value: Box::new(value),
            length: None,
        }))
    }

    /// A uniform object block whose entry values all conform to `value` and
    /// whose keys follow the given [`KeyKind`].
    pub fn object(key: KeyKind, value: Schema) -> Self {
        Self::new(Kind::Object(ObjectSchema {
            key,
            value: Box::new(value),
            length: None,
        }))
    }

    /// A fixed-arity tuple block with one schema per position.
    ///
    /// # Examples
    ///
    /// ```
    /// use docform_core::{decode, Schema};
    ///
    /// let schema = Schema::tuple([Schema::number(), Schema::string()]);
    /// assert!(decode(r#"[1, "one"]"#, &schema).is_ok());
    /// assert!(decode(r#"[1, "one", true]"#, &schema).is_err());
    /// ```
    pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Self {
        Self::new(Kind::Tuple(TupleSchema {
            items: items.into_iter().collect(),
        }))
    }

    /// A record block with a fixed set of named fields.
    ///
    /// Field order is preserved and is observable in produced documents.
    pub fn map<S: Into<String>>(fields: impl IntoIterator<Item = (S, Schema)>) -> Self {
        Self::new(Kind::Map(MapSchema {
            fields: fields
                .into_iter()
                .map(|(name, field)| (name.into(), field))
                .collect(),
        }))
    }

    /// A closed set of admissible string values.
    ///
    /// # Examples
    ///
    /// ```
    /// use docform_core::{decode, Schema};
    ///
    /// let schema = Schema::enumeration(["red", "green", "blue"]);
    /// assert!(decode(r#""green""#, &schema).is_ok());
    /// assert!(decode(r#""yellow""#, &schema).is_err());
    /// ```
    pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(Kind::Enum(EnumSchema {
            values: values.into_iter().map(Into::into).collect(),
        }))
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the block optional: `null` then conforms wherever the block
    /// applies, and a missing map field is tolerated.
    pub fn optional(mut self) -> Self {
        self.option = true;
        self
    }
}

/// Kind-specific constraints of a [`Schema`] block.
#[derive(Debug, Clone)]
pub enum Kind {
    /// A boolean.
    Flag,
    /// A number, optionally bounded and restricted to integers.
    Number(NumberSchema),
    /// A string, optionally length-constrained and pattern-matched.
    String(StringSchema),
    /// A uniform, arbitrary-length sequence.
    Array(ArraySchema),
    /// A uniform, arbitrary-size keyed collection.
    Object(ObjectSchema),
    /// A fixed-arity sequence with per-position schemas.
    Tuple(TupleSchema),
    /// A record with a fixed set of named fields.
    Map(MapSchema),
    /// A closed set of admissible string values.
    Enum(EnumSchema),
}

impl Kind {
    /// Grammar tag of this kind, as spelled in raw schemas.
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::Flag => "flag",
            Kind::Number(_) => "number",
            Kind::String(_) => "string",
            Kind::Array(_) => "array",
            Kind::Object(_) => "object",
            Kind::Tuple(_) => "tuple",
            Kind::Map(_) => "map",
            Kind::Enum(_) => "enum",
        }
    }
}

/// Constraints of a `number` block.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    /// Whether values with a fractional part are accepted.
    pub decimal: bool,
    /// Lower limit, if any.
    pub minimum: Option<Bound>,
    /// Upper limit, if any.
    pub maximum: Option<Bound>,
}

impl Default for NumberSchema {
    /// Decimals allowed, no bounds.
    fn default() -> Self {
        Self {
            decimal: true,
            minimum: None,
            maximum: None,
        }
    }
}

/// Constraints of a `string` block.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    /// Constraint on the character count, if any.
    pub length: Option<LengthConstraint>,
    /// Regular expression the value must match, if any.
    pub pattern: Option<Regex>,
}

/// Constraints of an `array` block.
#[derive(Debug, Clone)]
pub struct ArraySchema {
    /// Schema every element must conform to.
    pub value: Box<Schema>,
    /// Constraint on the element count, if any.
    pub length: Option<LengthConstraint>,
}

/// Constraints of an `object` block.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    /// Spelling rule for entry keys.
    pub key: KeyKind,
    /// Schema every entry value must conform to.
    pub value: Box<Schema>,
    /// Constraint on the entry count, if any.
    pub length: Option<LengthConstraint>,
}

/// Constraints of a `tuple` block.
#[derive(Debug, Clone)]
pub struct TupleSchema {
    /// One schema per position; arity is `items.len()`.
    pub items: Vec<Schema>,
}

/// Constraints of a `map` block.
#[derive(Debug, Clone)]
pub struct MapSchema {
    /// Field schemas, in declaration order.
    pub fields: IndexMap<String, Schema>,
}

/// Constraints of an `enum` block.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    /// Admissible values, in declaration order.
    pub values: Vec<String>,
}

/// Spelling rule for the keys of an `object` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Keys must spell canonical integers: an optional minus followed by
    /// digits without leading zeros, within the `i64` range.
    Integer,
    /// Keys must match the identifier pattern `^[a-zA-Z0-9_-]+$`.
    String,
}

/// A lower or upper numeric limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// The limit itself.
    pub value: f64,
    /// Whether the limit value is excluded from the admissible range.
    pub exclusive: bool,
}

impl Bound {
    /// A limit that admits the limit value itself.
    pub fn inclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: false,
        }
    }

    /// A limit that excludes the limit value itself.
    pub fn exclusive(value: f64) -> Self {
        Self {
            value,
            exclusive: true,
        }
    }
}

/// A constraint on a measured length: character count of a string, element
/// count of an array, entry count of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthConstraint {
    /// The length must equal this value.
    Exact(u64),
    /// The length must fall within the given limits, both inclusive.
    Range {
        /// Smallest admissible length, if constrained.
        minimum: Option<u64>,
        /// Largest admissible length, if constrained.
        maximum: Option<u64>,
    },
}

impl LengthConstraint {
    /// Requires the length to equal `length`.
    pub fn exact(length: u64) -> Self {
        Self::Exact(length)
    }

    /// Requires the length to be at least `minimum`.
    pub fn at_least(minimum: u64) -> Self {
        Self::Range {
            minimum: Some(minimum),
            maximum: None,
        }
    }

    /// Requires the length to be at most `maximum`.
    pub fn at_most(maximum: u64) -> Self {
        Self::Range {
            minimum: None,
            maximum: Some(maximum),
        }
    }

    /// Requires the length to fall between `minimum` and `maximum`, both
    /// inclusive.
    pub fn between(minimum: u64, maximum: u64) -> Self {
        Self::Range {
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }
}
