//! # Error Types — Validation Failures
//!
//! Every failure raised while turning a raw YAML tree into a validated
//! object is a [`ValidationError`]. Errors carry the field key and the
//! expected vs actual value so callers can render a useful message.
//!
//! ## Design
//!
//! - Fail fast: the first error aborts construction of the enclosing
//!   object. Errors are never accumulated.
//! - Element failures inside a repeated field are wrapped in
//!   [`ValidationError::InElement`] with the element index.
//! - Whole-object invariants surface as [`ValidationError::Invariant`],
//!   carrying a domain error that callers recover with
//!   [`ValidationError::invariant_ref`].

use std::error::Error;
use std::sync::Arc;

use thiserror::Error;

/// Error raised while validating a raw document against a schema.
#[derive(Error, Debug, Clone)]
pub enum ValidationError {
    /// The raw value's type does not match the declared field type.
    #[error("value for '{key}' must be of type {expected}, got {actual}")]
    TypeMismatch {
        /// Field key (or type name, for a non-mapping object node).
        key: String,
        /// Expected kind of value.
        expected: String,
        /// Kind of value actually found.
        actual: String,
    },

    /// The raw value is not one of the declared options.
    #[error("value {value:?} for '{key}' not in allowed options {allowed:?}")]
    OptionNotAllowed {
        /// Field key.
        key: String,
        /// Offending value, rendered as text.
        value: String,
        /// The allowed options, in declaration order.
        allowed: Vec<String>,
    },

    /// A custom-format validator exhausted every known pattern.
    #[error("value {value:?} for '{key}' must follow one of the formats {formats:?}")]
    FormatUnparseable {
        /// Field key.
        key: String,
        /// Offending value, rendered as text.
        value: String,
        /// Every pattern that was attempted, in order.
        formats: Vec<String>,
    },

    /// A required field is absent (or explicitly null).
    #[error("missing required field '{key}'")]
    MissingRequiredField {
        /// Field key.
        key: String,
    },

    /// An element of a repeated field failed validation.
    #[error("{key}[{index}]: {source}")]
    InElement {
        /// Key of the repeated field.
        key: String,
        /// Zero-based index of the failing element.
        index: usize,
        /// The element's own error.
        source: Box<ValidationError>,
    },

    /// The object is field-valid but violates a whole-object invariant.
    #[error("invalid {type_name}: {source}")]
    Invariant {
        /// Name of the type whose invariant failed.
        type_name: &'static str,
        /// The domain-specific invariant error.
        source: Arc<dyn Error + Send + Sync>,
    },
}

impl ValidationError {
    /// Wrap a domain invariant error raised by `type_name`'s check hook.
    pub fn invariant<E>(type_name: &'static str, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Invariant {
            type_name,
            source: Arc::new(error),
        }
    }

    /// Annotate an element error with its position in a repeated field.
    pub fn in_element(key: impl Into<String>, index: usize, source: ValidationError) -> Self {
        Self::InElement {
            key: key.into(),
            index,
            source: Box::new(source),
        }
    }

    /// Follow `InElement` annotations down to the error that caused them.
    pub fn leaf(&self) -> &ValidationError {
        let mut current = self;
        while let Self::InElement { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// The field key this error is attached to, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { key, .. }
            | Self::OptionNotAllowed { key, .. }
            | Self::FormatUnparseable { key, .. }
            | Self::MissingRequiredField { key }
            | Self::InElement { key, .. } => Some(key.as_str()),
            Self::Invariant { .. } => None,
        }
    }

    /// Element indices from the outermost repeated field inwards.
    pub fn element_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::InElement { index, source, .. } = current {
            path.push(*index);
            current = &**source;
        }
        path
    }

    /// Recover a typed invariant error, looking through element annotations.
    pub fn invariant_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        match self.leaf() {
            Self::Invariant { source, .. } => source.downcast_ref::<E>(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("too few widgets")]
    struct TooFewWidgets;

    #[test]
    fn test_type_mismatch_display_names_key_and_kinds() {
        let err = ValidationError::TypeMismatch {
            key: "player_count".into(),
            expected: "int".into(),
            actual: "string".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("player_count"));
        assert!(msg.contains("int"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn test_element_annotations_unwrap_to_leaf() {
        let inner = ValidationError::MissingRequiredField { key: "name".into() };
        let err = ValidationError::in_element(
            "teams",
            2,
            ValidationError::in_element("players", 4, inner),
        );
        assert_eq!(err.key(), Some("teams"));
        assert_eq!(err.element_path(), vec![2, 4]);
        assert!(matches!(
            err.leaf(),
            ValidationError::MissingRequiredField { key } if key == "name"
        ));
        assert_eq!(err.to_string(), "teams[2]: players[4]: missing required field 'name'");
    }

    #[test]
    fn test_invariant_downcast() {
        let err = ValidationError::invariant("Warehouse", TooFewWidgets);
        assert!(err.invariant_ref::<TooFewWidgets>().is_some());
        assert!(err.key().is_none());
        assert_eq!(err.to_string(), "invalid Warehouse: too few widgets");

        let field_err = ValidationError::MissingRequiredField { key: "x".into() };
        assert!(field_err.invariant_ref::<TooFewWidgets>().is_none());
    }
}
