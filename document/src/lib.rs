//! Document-family naming for the docform engine.
//!
//! The later integration wave described "formats" checked against
//! "documents". Like [`docform_payload`](https://docs.rs/docform-payload),
//! this crate is a thin alias layer over [`docform_core`] with identical
//! behavior. New code should depend on `docform-core` directly.
//!
//! # Examples
//!
//! ```
//! use docform_document::{from_document, to_document, Format};
//! use serde_json::json;
//!
//! let format = Format::from_value(&json!({
//!     "type": "enum",
//!     "values": ["draft", "published"]
//! }))
//! .unwrap();
//!
//! let value = from_document(r#""draft""#, &format).unwrap();
//! assert_eq!(to_document(&value, &format).unwrap(), r#""draft""#);
//! ```

pub use docform_core::*;

/// The schema tree under this family's historical name.
pub type Format = docform_core::Schema;

pub use docform_core::validate_schema as validate_format;
pub use docform_core::validate_schema_with_report as validate_format_with_report;
pub use docform_core::decode as from_document;
pub use docform_core::decode_with_report as from_document_with_report;
pub use docform_core::encode as to_document;
pub use docform_core::encode_with_report as to_document_with_report;
