//! Value kinds and lazy coercion of matched text.
//!
//! Parsing only ever stores raw substrings. Conversion to a typed [`Value`]
//! happens on access through [`ValueKind::coerce`], which is the single place
//! type errors surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, Result};

/// Declared type of a command's value.
///
/// Configuration files name kinds with short tags (`int`, `bool`, ...).
/// Tags with no known coercion are kept as [`ValueKind::Other`] so a tree can
/// still be built; reading such a value fails with
/// [`CommandError::UnsupportedValueType`].
///
/// # Examples
///
/// ```
/// use command_match_core::ValueKind;
///
/// assert_eq!(ValueKind::from_tag("int"), ValueKind::Integer);
/// assert_eq!(ValueKind::from_tag("Boolean"), ValueKind::Boolean);
/// assert_eq!(ValueKind::from_tag("date"), ValueKind::Other("date".into()));
/// assert_eq!(ValueKind::default(), ValueKind::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueKind {
    /// Free text, passed through unchanged (the default).
    #[default]
    Text,
    /// Signed 64-bit integer.
    Integer,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// `true` / `false`, ASCII case-insensitive.
    Boolean,
    /// A declared tag with no registered coercion.
    Other(String),
}

impl ValueKind {
    /// Resolves a configuration tag to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" | "string" | "str" => Self::Text,
            "int" | "integer" | "long" => Self::Integer,
            "float" => Self::Float,
            "double" | "number" => Self::Double,
            "bool" | "boolean" => Self::Boolean,
            _ => Self::Other(tag.trim().to_string()),
        }
    }

    /// Canonical tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Other(tag) => tag,
        }
    }

    /// Returns `true` when raw text of this kind can be converted.
    pub fn is_coercible(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Converts `raw` into a typed value.
    ///
    /// `command` is only used to label errors.
    ///
    /// # Errors
    ///
    /// [`CommandError::UnsupportedValueType`] for [`ValueKind::Other`], and
    /// [`CommandError::ValueCoercionFailure`] when `raw` does not parse.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_match_core::{CommandError, Value, ValueKind};
    ///
    /// let value = ValueKind::Integer.coerce("-c", "3").unwrap();
    /// assert_eq!(value, Value::Integer(3));
    ///
    /// let err = ValueKind::Integer.coerce("-c", "abc").unwrap_err();
    /// assert!(matches!(err, CommandError::ValueCoercionFailure { .. }));
    /// ```
    pub fn coerce(&self, command: &str, raw: &str) -> Result<Value> {
        let failure = || CommandError::ValueCoercionFailure {
            command: command.to_string(),
            kind: self.as_str().to_string(),
            raw: raw.to_string(),
        };

        match self {
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Integer => raw.parse().map(Value::Integer).map_err(|_| failure()),
            Self::Float => raw.parse().map(Value::Float).map_err(|_| failure()),
            Self::Double => raw.parse().map(Value::Double).map_err(|_| failure()),
            Self::Boolean => parse_bool(raw).map(Value::Boolean).ok_or_else(failure),
            Self::Other(tag) => Err(CommandError::UnsupportedValueType {
                command: command.to_string(),
                kind: tag.clone(),
            }),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

impl From<String> for ValueKind {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<ValueKind> for String {
    fn from(kind: ValueKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coerced command value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
}

impl Value {
    /// Returns the text payload, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns any floating point payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(f64::from(*n)),
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}
