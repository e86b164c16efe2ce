//! # squad-schema — Schema-Driven Document Validation
//!
//! Turns YAML text into typed, validated domain objects. A domain type
//! declares an attribute [`Schema`] (field name → [`Validator`]) and an
//! optional whole-object check; the engine does the rest.
//!
//! ## Validation protocol
//!
//! 1. **Field phase.** Each declared field is validated in declaration
//!    order. The first failure aborts construction.
//! 2. **Object phase.** Once every field is valid, the schema's check hook
//!    runs over the complete [`Record`].
//!
//! Unknown keys are ignored. Missing or null fields fail unless the field
//! is [`Validator::Optional`].
//!
//! ## Loading
//!
//! [`build_objects`] parses a document stream with `serde_yaml` and returns
//! the first validated object. [`dump_object`] writes one back out.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `squad-*` crates.
//! - No `.unwrap()` outside tests.
//! - Schemas are immutable after construction and `Send + Sync`.

pub mod datetime;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;
pub mod value;

pub use datetime::{DateTimeFormat, DATE_FORMATS};
pub use error::ValidationError;
pub use loader::{build_objects, dump_object, parse_documents, LoadError};
pub use schema::{construct, CheckFn, Schema, Validated};
pub use validator::{FormatCodec, Validator};
pub use value::{FieldValue, Kind, Record};
