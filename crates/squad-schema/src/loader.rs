//! # Document Loader
//!
//! Drives `serde_yaml` over a text buffer and feeds each parsed document
//! through the construction engine for a target type.
//!
//! ## Document streams
//!
//! A buffer may hold zero, one, or several YAML documents. Every document
//! is validated, so an invalid later document still fails the load, but
//! only the first object is returned.
//!
//! ## Error channels
//!
//! YAML syntax errors and validation errors are kept apart:
//! [`LoadError::Parse`] and [`LoadError::Validation`]. A validation error
//! is carried unchanged.

use serde::Deserialize;
use serde_yaml::Value;
use thiserror::Error;

use crate::error::ValidationError;
use crate::schema::{construct, Validated};

/// Error loading or writing a document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The text is not well-formed YAML.
    #[error("invalid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A document parsed but failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

/// Parse `text` into one raw tree per YAML document.
pub fn parse_documents(text: &str) -> Result<Vec<Value>, serde_yaml::Error> {
    serde_yaml::Deserializer::from_str(text)
        .map(Value::deserialize)
        .collect()
}

/// Build objects of type `T` from a YAML document stream.
///
/// Returns the object built from the first document, or `None` when the
/// stream holds no documents. Later documents are validated and dropped.
pub fn build_objects<T: Validated>(text: &str) -> Result<Option<T>, LoadError> {
    let documents = parse_documents(text)?;
    let type_name = T::schema().type_name();
    tracing::debug!(type_name, documents = documents.len(), "parsed document stream");

    let mut objects = documents
        .iter()
        .map(construct::<T>)
        .collect::<Result<Vec<T>, _>>()?;

    if objects.len() > 1 {
        tracing::debug!(
            type_name,
            dropped = objects.len() - 1,
            "keeping first document only"
        );
        objects.truncate(1);
    }
    Ok(objects.pop())
}

/// Render a validated object as YAML text.
pub fn dump_object<T: Validated>(object: &T) -> Result<String, LoadError> {
    let raw = T::schema().serialize(&object.to_record());
    Ok(serde_yaml::to_string(&raw)?)
}
