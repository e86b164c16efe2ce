//! # Validator Primitives
//!
//! Field-level rules composed into a [`Schema`]. Each rule knows how to
//! check one raw YAML node and how to render a validated value back to a
//! node for writing.
//!
//! Validators are immutable once built and hold no interior state, so a
//! schema can be shared across threads without locking.

use std::fmt;
use std::sync::Arc;

use serde_yaml::Value;

use crate::error::ValidationError;
use crate::schema::Schema;
use crate::value::{describe_raw, raw_kind_name, FieldValue, Kind};

/// A custom textual format for a field, parsed on input and rendered on output.
///
/// Implementors are stateless; `parse` returns the first interpretation
/// that succeeds, and `render` returns `None` for values it does not own.
pub trait FormatCodec: fmt::Debug + Send + Sync {
    /// Parse a present, non-null raw node.
    fn parse(&self, key: &str, raw: &Value) -> Result<FieldValue, ValidationError>;

    /// Render a validated value back to a raw node.
    fn render(&self, value: &FieldValue) -> Option<Value>;
}

/// A field validator.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Scalar type check without coercion.
    Type(Kind),
    /// The value must be a string equal to one of these options.
    Options(Vec<String>),
    /// A sequence whose elements each construct an object of the schema.
    Repeated(&'static Schema),
    /// An absent value yields the default; a present one goes to the inner validator.
    Optional(Box<Validator>, FieldValue),
    /// A custom textual format.
    Custom(Arc<dyn FormatCodec>),
}

impl Validator {
    /// Options check over the given values, kept in declaration order.
    pub fn options<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Options(options.into_iter().map(Into::into).collect())
    }

    /// Wrap `inner` so that an absent value yields `default`.
    pub fn optional(inner: Validator, default: FieldValue) -> Self {
        Self::Optional(Box::new(inner), default)
    }

    /// Custom-format validator backed by `codec`.
    pub fn custom(codec: impl FormatCodec + 'static) -> Self {
        Self::Custom(Arc::new(codec))
    }

    /// Validate the raw node found under `key`.
    ///
    /// `raw` is `None` when the key is absent. An explicit YAML null is
    /// treated as absent.
    pub fn validate(&self, key: &str, raw: Option<&Value>) -> Result<FieldValue, ValidationError> {
        let raw = match raw.filter(|v| !v.is_null()) {
            Some(raw) => raw,
            None => {
                return match self {
                    Self::Optional(_, default) => Ok(default.clone()),
                    _ => Err(ValidationError::MissingRequiredField {
                        key: key.to_string(),
                    }),
                };
            }
        };

        match self {
            Self::Type(kind) => kind.extract(raw).ok_or_else(|| ValidationError::TypeMismatch {
                key: key.to_string(),
                expected: kind.name().to_string(),
                actual: raw_kind_name(raw).to_string(),
            }),
            Self::Options(allowed) => match raw.as_str() {
                Some(s) if allowed.iter().any(|option| option == s) => {
                    Ok(FieldValue::Str(s.to_string()))
                }
                _ => Err(ValidationError::OptionNotAllowed {
                    key: key.to_string(),
                    value: describe_raw(raw),
                    allowed: allowed.clone(),
                }),
            },
            Self::Repeated(schema) => {
                let elements = raw.as_sequence().ok_or_else(|| ValidationError::TypeMismatch {
                    key: key.to_string(),
                    expected: "sequence".to_string(),
                    actual: raw_kind_name(raw).to_string(),
                })?;
                elements
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        schema
                            .construct(element)
                            .map_err(|e| ValidationError::in_element(key, index, e))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List)
            }
            Self::Optional(inner, _) => inner.validate(key, Some(raw)),
            Self::Custom(codec) => codec.parse(key, raw),
        }
    }

    /// Render a validated value back to a raw node.
    pub fn serialize(&self, value: &FieldValue) -> Value {
        match (self, value) {
            (Self::Optional(inner, _), value) => inner.serialize(value),
            (Self::Repeated(schema), FieldValue::List(records)) => {
                Value::Sequence(records.iter().map(|r| schema.serialize(r)).collect())
            }
            (Self::Custom(codec), value) => codec.render(value).unwrap_or_else(|| value.to_raw()),
            (_, value) => value.to_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_type_check_accepts_matching_kind() {
        let v = Validator::Type(Kind::Str);
        assert_eq!(
            v.validate("name", Some(&yaml("Lola Bunny"))).unwrap(),
            FieldValue::Str("Lola Bunny".into())
        );
    }

    #[test]
    fn test_type_check_rejects_other_kinds() {
        let v = Validator::Type(Kind::Int);
        let err = v.validate("player_count", Some(&yaml("five"))).unwrap_err();
        match err {
            ValidationError::TypeMismatch { key, expected, actual } => {
                assert_eq!(key, "player_count");
                assert_eq!(expected, "int");
                assert_eq!(actual, "string");
            }
            other => panic!("Expected TypeMismatch, got: {other}"),
        }
    }

    #[test]
    fn test_missing_and_null_are_missing_required() {
        let v = Validator::Type(Kind::Str);
        assert!(matches!(
            v.validate("name", None),
            Err(ValidationError::MissingRequiredField { key }) if key == "name"
        ));
        assert!(matches!(
            v.validate("name", Some(&Value::Null)),
            Err(ValidationError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn test_options_is_case_sensitive() {
        let v = Validator::options(["PG", "C"]);
        assert!(v.validate("position", Some(&yaml("PG"))).is_ok());
        let err = v.validate("position", Some(&yaml("pg"))).unwrap_err();
        match err {
            ValidationError::OptionNotAllowed { value, allowed, .. } => {
                assert_eq!(value, "pg");
                assert_eq!(allowed, vec!["PG".to_string(), "C".to_string()]);
            }
            other => panic!("Expected OptionNotAllowed, got: {other}"),
        }
    }

    #[test]
    fn test_options_rejects_non_string() {
        let v = Validator::options(["1", "2"]);
        assert!(matches!(
            v.validate("slot", Some(&yaml("1"))),
            Err(ValidationError::OptionNotAllowed { .. })
        ));
    }

    #[test]
    fn test_optional_default_skips_inner() {
        let v = Validator::optional(Validator::Type(Kind::Bool), FieldValue::Bool(true));
        assert_eq!(v.validate("flag", None).unwrap(), FieldValue::Bool(true));
        assert_eq!(
            v.validate("flag", Some(&yaml("false"))).unwrap(),
            FieldValue::Bool(false)
        );
        assert!(matches!(
            v.validate("flag", Some(&yaml("maybe"))),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_serialize_scalars() {
        assert_eq!(Validator::Type(Kind::Int).serialize(&FieldValue::Int(5)), yaml("5"));
        let optional = Validator::optional(Validator::Type(Kind::Bool), FieldValue::Bool(true));
        assert_eq!(optional.serialize(&FieldValue::Bool(false)), Value::Bool(false));
    }
}
