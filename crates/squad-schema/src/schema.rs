//! # Attribute Schemas and Two-Phase Construction
//!
//! A [`Schema`] is the ordered list of `(field name, validator)` pairs that
//! defines a domain type's shape, plus an optional whole-object check.
//!
//! ## Construction protocol
//!
//! 1. Every declared field is validated, in declaration order. The first
//!    failure aborts; no partially valid record is returned.
//! 2. Keys in the raw mapping that the schema does not declare are ignored.
//! 3. Once every field is valid, the schema's check hook runs against the
//!    complete record. Nested objects have already passed their own check
//!    by this point.
//!
//! Schemas are built once per type (see [`Validated::schema`]) and never
//! mutated afterwards.

use serde_yaml::Value;

use crate::error::ValidationError;
use crate::validator::Validator;
use crate::value::{raw_kind_name, FieldValue, Record};

/// Whole-object check run after every field has validated.
pub type CheckFn = fn(&Record) -> Result<(), ValidationError>;

/// Attribute schema of one domain type.
#[derive(Debug)]
pub struct Schema {
    type_name: &'static str,
    fields: Vec<(&'static str, Validator)>,
    check: Option<CheckFn>,
}

impl Schema {
    /// Empty schema for `type_name`.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
            check: None,
        }
    }

    /// Declare a field.
    pub fn field(mut self, name: &'static str, validator: Validator) -> Self {
        self.fields.push((name, validator));
        self
    }

    /// Install the whole-object check.
    pub fn check(mut self, hook: CheckFn) -> Self {
        self.check = Some(hook);
        self
    }

    /// Name of the type this schema describes.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Validator)> {
        self.fields.iter().map(|(name, v)| (*name, v))
    }

    /// Validator declared for `name`.
    pub fn validator(&self, name: &str) -> Option<&Validator> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, v)| v)
    }

    /// Build a validated record from a raw mapping node.
    pub fn construct(&self, raw: &Value) -> Result<Record, ValidationError> {
        let mapping = raw.as_mapping().ok_or_else(|| ValidationError::TypeMismatch {
            key: self.type_name.to_string(),
            expected: "mapping".to_string(),
            actual: raw_kind_name(raw).to_string(),
        })?;

        for (key, _) in mapping {
            let declared = key.as_str().is_some_and(|k| self.validator(k).is_some());
            if !declared {
                tracing::debug!(
                    type_name = self.type_name,
                    key = ?key,
                    "ignoring undeclared field"
                );
            }
        }

        let mut record = Record::new(self.type_name);
        for (name, validator) in &self.fields {
            let value = validator.validate(name, mapping.get(*name))?;
            record.insert(*name, value);
        }

        if let Some(check) = self.check {
            if let Err(e) = check(&record) {
                tracing::debug!(
                    type_name = self.type_name,
                    error = %e,
                    "whole-object check failed"
                );
                return Err(e);
            }
        }

        Ok(record)
    }

    /// Render a record back to a mapping node.
    ///
    /// Fields are written in declaration order; null values are omitted.
    pub fn serialize(&self, record: &Record) -> Value {
        let mut mapping = serde_yaml::Mapping::new();
        for (name, validator) in &self.fields {
            match record.get(name) {
                None | Some(FieldValue::Null) => {}
                Some(value) => {
                    mapping.insert(Value::String((*name).to_string()), validator.serialize(value));
                }
            }
        }
        Value::Mapping(mapping)
    }
}

/// A domain type constructed through a [`Schema`].
pub trait Validated: Sized {
    /// The type's schema, built once and shared.
    fn schema() -> &'static Schema;

    /// Convert a record that has passed [`Schema::construct`].
    fn from_record(record: Record) -> Result<Self, ValidationError>;

    /// Record view of the object, for writing it back out.
    fn to_record(&self) -> Record;
}

/// Validate a raw node and build a `T` from it.
pub fn construct<T: Validated>(raw: &Value) -> Result<T, ValidationError> {
    let record = T::schema().construct(raw)?;
    T::from_record(record)
}
