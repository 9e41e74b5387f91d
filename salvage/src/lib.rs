#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Partial model validation for lossy JSON ingestion.
//!
//! Third-party API payloads are schema-correct mostly but not always:
//! fields occasionally carry malformed values. Rejecting the whole record
//! over one bad field loses data; accepting it unvalidated loses safety.
//! This crate takes the middle road: construct the model anyway, validate
//! every field that can be validated, substitute a fallback for each field
//! that cannot, and return a structured report of exactly which fields
//! failed and why — suitable for a JSON-typed error column next to the
//! stored record.
//!
//! Field-level failures never abort construction; only a structurally
//! broken input (not a mapping at all) fails the call.
//!
//! ```
//! use salvage::{Schema, StructuralError};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), StructuralError> {
//! let schema = Schema::builder("user")
//!     .string("name")
//!     .integer("age")
//!     .build()?;
//!
//! let bundle = schema.construct_partial(&json!({
//!     "name": "ok",
//!     "age": "not-a-number",
//! }))?;
//!
//! // The instance constructed anyway; the bad field kept its raw value.
//! assert_eq!(bundle.instance()["name"], json!("ok"));
//! assert_eq!(bundle.instance()["age"], json!("not-a-number"));
//!
//! // The report says exactly what failed.
//! assert!(bundle.report().contains("age"));
//! assert_eq!(bundle.valid_fields(), ["name"]);
//! # Ok(())
//! # }
//! ```

mod aggregate;
mod bundle;
mod error;
mod intercept;
mod report;
mod schema;
pub mod validate;

pub use aggregate::Aggregator;
pub use bundle::{Bundle, Instance};
pub use error::{ErrorDetail, ErrorKind, StructuralError, StructuralErrorKind};
pub use intercept::{Fallback, MissingOptional, Options, Outcome};
pub use report::{ErrorEntry, ErrorReport};
pub use schema::{FieldKind, FieldSpec, Schema, SchemaBuilder, Validator};

// Paths are part of the public error-report surface.
pub use salvage_path::{FieldPath, PathSegment};
