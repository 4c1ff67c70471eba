//! Schema-driven validation and bidirectional JSON document conversion.
//!
//! A schema describes the admissible shape of a JSON document as a tree of
//! typed blocks:
//!
//! - [`Schema`] — one block: common properties plus a [`Kind`].
//! - [`Kind`] — the eight block kinds: flag, number, string, array, object,
//!   tuple, map, and enum, each with its own constraint payload.
//!
//! Raw schemas are plain `serde_json::Value`s. Validation
//! ([`validate_schema`], [`validate_schema_with_report`]) checks them
//! against the block grammar; [`Schema::from_value`] compiles them into the
//! typed form the converters consume.
//!
//! Conversion is bidirectional: [`decode`] parses and checks a JSON
//! document, [`encode`] checks a value and serializes it. Each has a
//! `_with_report` sibling that collects every error and warning instead of
//! stopping at the first, with locations reported as structural [`Path`]s.
//!
//! # Example
//!
//! ```
//! use docform_core::*;
//! use serde_json::json;
//!
//! // Compile a schema for a small user record
//! let schema = Schema::from_value(&json!({
//!     "type": "map",
//!     "fields": {
//!         "name": { "type": "string" },
//!         "age": { "type": "number", "decimal": false, "minimum": 0 },
//!         "role": { "type": "enum", "values": ["admin", "guest"], "option": true }
//!     }
//! }))
//! .unwrap();
//!
//! let value = decode(r#"{"name":"Ada","age":36}"#, &schema).unwrap();
//! assert_eq!(value["role"], json!(null));
//!
//! let document = encode(&value, &schema).unwrap();
//! assert_eq!(document, r#"{"name":"Ada","age":36,"role":null}"#);
//! ```

mod convert;
mod props;
mod report;
mod types;
mod validate;

pub use convert::{decode, decode_with_report, encode, encode_with_report};
pub use report::{
    DecodeError, DecodeReport, EncodeReport, ParseError, Path, SchemaError, SchemaReport, Segment,
    ValidationError, ValidationWarning,
};
pub use types::*;
pub use validate::{validate_schema, validate_schema_with_report};
