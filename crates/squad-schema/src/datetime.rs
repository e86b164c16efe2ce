//! # Date/Time Format Codec
//!
//! [`DateTimeFormat`] accepts a native YAML timestamp unchanged, or parses a
//! string against an ordered list of `strftime` patterns, returning the
//! first successful parse. Rendering always uses the first pattern, so a
//! value parsed from `11-15-96` is written back as `11/15/1996`.

use chrono::format::{parse_and_remainder, Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde_yaml::Value;

use crate::error::ValidationError;
use crate::validator::FormatCodec;
use crate::value::{describe_raw, FieldValue};

/// Default accepted date patterns, in the order they are tried.
pub const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%m/%d/%y", "%m-%d-%Y", "%m-%d-%y"];

/// Patterns YAML resolves to native timestamps.
const NATIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dt%H:%M:%S%.f",
];

/// Codec for date/time fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeFormat {
    formats: Vec<String>,
}

impl Default for DateTimeFormat {
    fn default() -> Self {
        Self::with_formats(DATE_FORMATS)
    }
}

impl DateTimeFormat {
    /// Codec over [`DATE_FORMATS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec over a custom ordered pattern list.
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// The accepted patterns, in the order they are tried.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Try each pattern in order; the first that parses wins.
    pub fn parse_str(&self, text: &str) -> Option<NaiveDateTime> {
        self.formats
            .iter()
            .find_map(|format| parse_with(text, format))
    }

    /// Render with the first pattern.
    pub fn render_datetime(&self, dt: &NaiveDateTime) -> Option<String> {
        self.formats
            .first()
            .map(|format| dt.format(format).to_string())
    }

    fn unparseable(&self, key: &str, raw: &Value) -> ValidationError {
        ValidationError::FormatUnparseable {
            key: key.to_string(),
            value: describe_raw(raw),
            formats: self.formats.clone(),
        }
    }
}

impl FormatCodec for DateTimeFormat {
    fn parse(&self, key: &str, raw: &Value) -> Result<FieldValue, ValidationError> {
        if let Some(native) = native_timestamp(raw) {
            return Ok(FieldValue::DateTime(native));
        }
        let text = raw.as_str().ok_or_else(|| self.unparseable(key, raw))?;
        self.parse_str(text)
            .map(FieldValue::DateTime)
            .ok_or_else(|| self.unparseable(key, raw))
    }

    fn render(&self, value: &FieldValue) -> Option<Value> {
        match value {
            FieldValue::DateTime(dt) => self.render_datetime(dt).map(Value::String),
            _ => None,
        }
    }
}

/// Parse `text` with a single pattern, accepting date-only patterns as midnight.
///
/// `%Y` must consume a four-digit year; chrono would otherwise read `96`
/// as the year 96 and shadow the two-digit `%y` patterns. `%y` follows
/// [`two_digit_year`].
fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })?;
    if format.contains("%Y") && !(1000..=9999).contains(&parsed.year()) {
        return None;
    }
    two_digit_year(text, format, parsed)
}

/// Apply `strptime` rules to a `%y` year: exactly two digits, with `69`
/// and up in the 1900s.
///
/// chrono accepts a single digit and pivots at `70`, mapping `69` to 2069.
fn two_digit_year(text: &str, format: &str, parsed: NaiveDateTime) -> Option<NaiveDateTime> {
    let Some(at) = format.find("%y") else {
        return Some(parsed);
    };
    let mut prefix = Parsed::new();
    let rest = parse_and_remainder(&mut prefix, text, StrftimeItems::new(&format[..at])).ok()?;
    if rest.bytes().take_while(u8::is_ascii_digit).count() != 2 {
        return None;
    }
    if parsed.year() == 2069 {
        parsed.with_year(1969)
    } else {
        Some(parsed)
    }
}

/// A value YAML would already have resolved to a timestamp.
fn native_timestamp(raw: &Value) -> Option<NaiveDateTime> {
    let text = match raw {
        Value::String(s) => s.as_str(),
        Value::Tagged(tagged) if tagged.tag.to_string().ends_with("timestamp") => {
            tagged.value.as_str()?
        }
        _ => return None,
    };
    NATIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| parse_with(text, format))
}
