//! # Validated Values and Records
//!
//! A [`Record`] is what the construction engine produces from one mapping
//! node: the schema's type name and the validated [`FieldValue`] of every
//! declared field, in schema order. Domain types are built from records by
//! [`Validated::from_record`](crate::Validated::from_record).

use std::fmt;

use chrono::NaiveDateTime;
use serde_yaml::Value;

use crate::error::ValidationError;

/// Scalar kinds checked by [`Validator::Type`](crate::Validator::Type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A YAML string scalar.
    Str,
    /// A YAML integer scalar that fits in `i64`.
    Int,
    /// A YAML boolean scalar.
    Bool,
}

impl Kind {
    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Str => "string",
            Kind::Int => "int",
            Kind::Bool => "bool",
        }
    }

    /// Extract a value of this kind from a raw node. No coercion.
    pub(crate) fn extract(&self, raw: &Value) -> Option<FieldValue> {
        match (self, raw) {
            (Kind::Str, Value::String(s)) => Some(FieldValue::Str(s.clone())),
            (Kind::Int, Value::Number(n)) => n.as_i64().map(FieldValue::Int),
            (Kind::Bool, Value::Bool(b)) => Some(FieldValue::Bool(*b)),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name of a raw node's kind, for error messages.
pub fn raw_kind_name(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Render a raw node as short text for error messages.
pub fn describe_raw(raw: &Value) -> String {
    match raw {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| raw_kind_name(other).to_string()),
    }
}

/// A value that has passed its field validator.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit absence, only ever produced as an `Optional` default.
    Null,
    /// A string.
    Str(String),
    /// A signed integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// A date and time without timezone.
    DateTime(NaiveDateTime),
    /// Validated sub-objects of a repeated field, in input order.
    List(Vec<Record>),
}

impl FieldValue {
    /// Name of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Str(_) => "string",
            FieldValue::Int(_) => "int",
            FieldValue::Bool(_) => "bool",
            FieldValue::DateTime(_) => "datetime",
            FieldValue::List(_) => "sequence",
        }
    }

    /// Generic rendering back to a raw node.
    ///
    /// Validators with their own rendering (dates, nested schemas) override
    /// this in [`Validator::serialize`](crate::Validator::serialize).
    pub fn to_raw(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::Number((*i).into()),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::DateTime(dt) => Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
            FieldValue::List(records) => {
                Value::Sequence(records.iter().map(Record::to_raw).collect())
            }
        }
    }
}

/// The validated fields of one object, in schema declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: &'static str,
    fields: Vec<(&'static str, FieldValue)>,
}

impl Record {
    /// Create an empty record for `type_name`.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Builder form of [`Record::insert`].
    pub fn with(mut self, name: &'static str, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Name of the schema this record was built for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Look up a field's value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow a string field.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FieldValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Borrow the sub-records of a repeated field.
    pub fn list_field(&self, name: &str) -> Option<&[Record]> {
        match self.get(name) {
            Some(FieldValue::List(records)) => Some(records.as_slice()),
            _ => None,
        }
    }

    /// Remove a field and return its value.
    pub fn take(&mut self, name: &str) -> Result<FieldValue, ValidationError> {
        let pos = self
            .fields
            .iter()
            .position(|(n, _)| *n == name)
            .ok_or_else(|| ValidationError::MissingRequiredField { key: name.to_string() })?;
        Ok(self.fields.remove(pos).1)
    }

    /// Remove a string field.
    pub fn take_str(&mut self, name: &str) -> Result<String, ValidationError> {
        match self.take(name)? {
            FieldValue::Str(s) => Ok(s),
            other => Err(field_mismatch(name, "string", &other)),
        }
    }

    /// Remove an integer field.
    pub fn take_int(&mut self, name: &str) -> Result<i64, ValidationError> {
        match self.take(name)? {
            FieldValue::Int(i) => Ok(i),
            other => Err(field_mismatch(name, "int", &other)),
        }
    }

    /// Remove a boolean field.
    pub fn take_bool(&mut self, name: &str) -> Result<bool, ValidationError> {
        match self.take(name)? {
            FieldValue::Bool(b) => Ok(b),
            other => Err(field_mismatch(name, "bool", &other)),
        }
    }

    /// Remove a date/time field.
    pub fn take_datetime(&mut self, name: &str) -> Result<NaiveDateTime, ValidationError> {
        match self.take(name)? {
            FieldValue::DateTime(dt) => Ok(dt),
            other => Err(field_mismatch(name, "datetime", &other)),
        }
    }

    /// Remove a repeated field's sub-records.
    pub fn take_list(&mut self, name: &str) -> Result<Vec<Record>, ValidationError> {
        match self.take(name)? {
            FieldValue::List(records) => Ok(records),
            other => Err(field_mismatch(name, "sequence", &other)),
        }
    }

    /// Generic rendering as a mapping node.
    pub fn to_raw(&self) -> Value {
        let mut map = serde_yaml::Mapping::new();
        for (name, value) in &self.fields {
            map.insert(Value::String((*name).to_string()), value.to_raw());
        }
        Value::Mapping(map)
    }
}

fn field_mismatch(name: &str, expected: &str, found: &FieldValue) -> ValidationError {
    ValidationError::TypeMismatch {
        key: name.to_string(),
        expected: expected.to_string(),
        actual: found.kind_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_extract_is_strict() {
        let five: Value = serde_yaml::from_str("5").unwrap();
        let quoted: Value = serde_yaml::from_str("'5'").unwrap();
        let yes: Value = serde_yaml::from_str("true").unwrap();

        assert_eq!(Kind::Int.extract(&five), Some(FieldValue::Int(5)));
        assert_eq!(Kind::Int.extract(&quoted), None);
        assert_eq!(Kind::Int.extract(&yes), None);
        assert_eq!(Kind::Str.extract(&five), None);
        assert_eq!(Kind::Bool.extract(&yes), Some(FieldValue::Bool(true)));
    }

    #[test]
    fn test_raw_kind_names() {
        let float: Value = serde_yaml::from_str("1.5").unwrap();
        let seq: Value = serde_yaml::from_str("[1, 2]").unwrap();
        assert_eq!(raw_kind_name(&float), "float");
        assert_eq!(raw_kind_name(&seq), "sequence");
        assert_eq!(raw_kind_name(&Value::Null), "null");
    }

    #[test]
    fn test_record_insert_replaces_and_take_removes() {
        let mut record = Record::new("Thing")
            .with("a", FieldValue::Int(1))
            .with("b", FieldValue::Str("x".into()));
        record.insert("a", FieldValue::Int(2));
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a"), Some(&FieldValue::Int(2)));

        assert_eq!(record.take_int("a").unwrap(), 2);
        assert!(record.get("a").is_none());
        assert!(matches!(
            record.take_int("a"),
            Err(ValidationError::MissingRequiredField { .. })
        ));
        assert!(matches!(
            record.take_bool("b"),
            Err(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_record_to_raw_keeps_field_order() {
        let record = Record::new("Thing")
            .with("zeta", FieldValue::Bool(false))
            .with("alpha", FieldValue::Str("first".into()));
        let raw = record.to_raw();
        let keys: Vec<&str> = raw
            .as_mapping()
            .unwrap()
            .iter()
            .filter_map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
