//! Literal value codec.
//!
//! Declaration arguments are either quoted strings or boolean literals.
//! Anything else (numeric constants, typed expressions) decodes as an opaque
//! string and is only re-quoted if it is explicitly written back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// A declaration argument value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
}

impl Value {
    /// Decode raw argument text into a typed value.
    ///
    /// Quote-delimited text becomes a string (quotes stripped, no escape
    /// processing); `true`/`false` in any casing becomes a boolean; anything
    /// else passes through as a string of the raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use asminfo_content::Value;
    ///
    /// assert_eq!(Value::decode("\"1.0.0.0\""), Value::Str("1.0.0.0".into()));
    /// assert_eq!(Value::decode("True"), Value::Bool(true));
    /// assert_eq!(Value::decode("0x42"), Value::Str("0x42".into()));
    /// ```
    pub fn decode(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
            return Self::Str(raw[1..raw.len() - 1].to_string());
        }

        match raw.to_ascii_lowercase().as_str() {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Str(raw.to_string()),
        }
    }

    /// Encode this value as argument text for the given dialect.
    ///
    /// Strings are wrapped in double quotes; booleans use the dialect's
    /// literal spelling.
    pub fn encode(&self, dialect: Dialect) -> String {
        match self {
            Self::Str(s) => format!("\"{s}\""),
            Self::Bool(b) => dialect.boolean_literal(*b).to_string(),
        }
    }

    /// The string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    /// The boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_decode_quoted_string() {
        assert_eq!(Value::decode("\"hello\""), Value::Str("hello".into()));
    }

    #[test]
    fn test_decode_quoted_boolean_is_a_string() {
        assert_eq!(Value::decode("\"true\""), Value::Str("true".into()));
    }

    #[rstest]
    #[case("true", true)]
    #[case("True", true)]
    #[case("TRUE", true)]
    #[case("false", false)]
    #[case("False", false)]
    fn test_decode_boolean_any_casing(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(Value::decode(raw), Value::Bool(expected));
    }

    #[test]
    fn test_decode_unrecognized_passes_through() {
        assert_eq!(Value::decode("42"), Value::Str("42".into()));
        assert_eq!(
            Value::decode("AssemblyVersionKind.Full"),
            Value::Str("AssemblyVersionKind.Full".into())
        );
    }

    #[test]
    fn test_decode_lone_quote_is_not_quoted() {
        assert_eq!(Value::decode("\""), Value::Str("\"".into()));
    }

    #[test]
    fn test_encode_string_quotes() {
        let value = Value::Str("1.2.3.4".into());
        assert_eq!(value.encode(Dialect::CSharp), "\"1.2.3.4\"");
        assert_eq!(value.encode(Dialect::VisualBasic), "\"1.2.3.4\"");
    }

    #[rstest]
    #[case(Dialect::CSharp, true, "true")]
    #[case(Dialect::FSharp, false, "false")]
    #[case(Dialect::VisualBasic, true, "True")]
    #[case(Dialect::VisualBasic, false, "False")]
    fn test_encode_boolean_spelling(
        #[case] dialect: Dialect,
        #[case] value: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(Value::Bool(value).encode(dialect), expected);
    }

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(Value::Str("1.0.0.0".into()).to_string(), "1.0.0.0");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }
}
