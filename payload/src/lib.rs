//! Payload-family naming for the docform engine.
//!
//! Early integrations spoke of "specs" describing "payloads". The engine
//! behind that vocabulary is [`docform_core`]; this crate keeps the old
//! names compiling as thin aliases over it, with identical behavior. New
//! code should depend on `docform-core` directly.
//!
//! # Examples
//!
//! ```
//! use docform_payload::{from_payload, validate_specs, Specs};
//! use serde_json::json;
//!
//! let raw = json!({ "type": "array", "value": { "type": "number" } });
//! assert!(validate_specs(&raw).is_ok());
//!
//! let specs = Specs::from_value(&raw).unwrap();
//! assert_eq!(from_payload("[1, 2]", &specs).unwrap(), json!([1, 2]));
//! ```

pub use docform_core::*;

/// The schema tree under this family's historical name.
pub type Specs = docform_core::Schema;

pub use docform_core::validate_schema as validate_specs;
pub use docform_core::validate_schema_with_report as validate_specs_with_report;
pub use docform_core::decode as from_payload;
pub use docform_core::decode_with_report as from_payload_with_report;
pub use docform_core::encode as to_payload;
pub use docform_core::encode_with_report as to_payload_with_report;
