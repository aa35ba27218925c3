//! Literal AST types.

use std::fmt;

/// A literal value.
///
/// Numeric literals keep their lexical form; interpreting them is left to
/// later stages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Literal {
    /// `NULL`
    Null,
    /// `TRUE` / `FALSE`
    Boolean(bool),
    /// String in one of its three spellings.
    String(StringLiteral),
    /// Integer, float or hex number.
    Numeric(NumericLiteral),
    /// Date/time literal keyword form.
    DateTime(DateTimeLiteral),
    /// Binary blob.
    Binary(BinaryLiteral),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::String(s) => s.fmt(f),
            Self::Numeric(n) => n.fmt(f),
            Self::DateTime(d) => d.fmt(f),
            Self::Binary(b) => b.fmt(f),
        }
    }
}

/// How a string literal was spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StringStyle {
    /// `'text'`, quotes doubled inside.
    Single,
    /// `"text"`, Java backslash escapes.
    Double,
    /// `'c'`, a single character.
    Character,
}

/// A string literal with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StringLiteral {
    /// The decoded text.
    pub value: String,
    /// The spelling used in the source.
    pub style: StringStyle,
}

impl StringLiteral {
    /// Creates a single-quoted string literal.
    #[must_use]
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: StringStyle::Single,
        }
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            StringStyle::Single | StringStyle::Character => {
                write!(f, "'{}'", self.value.replace('\'', "''"))
            }
            StringStyle::Double => {
                f.write_str("\"")?;
                for c in self.value.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        '\u{8}' => f.write_str("\\b")?,
                        '\u{c}' => f.write_str("\\f")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

/// Lexical class of a numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NumericKind {
    /// `42`, `42L`, `42BI`
    Integer,
    /// `1.5`, `1e3`, `2F`, `3.0BD`
    Float,
    /// `0xFF`
    Hex,
}

/// A numeric literal, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NumericLiteral {
    /// Lexical class.
    pub kind: NumericKind,
    /// The lexeme, including any type suffix.
    pub text: String,
}

impl NumericLiteral {
    /// Creates a numeric literal.
    #[must_use]
    pub fn new(kind: NumericKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns true for plain integer literals.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.kind, NumericKind::Integer)
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Qualifier of the spaced date/time literal forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DateTimeScope {
    /// `LOCAL`
    Local,
    /// `CURRENT`
    Current,
    /// `OFFSET`
    Offset,
}

impl DateTimeScope {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "LOCAL",
            Self::Current => "CURRENT",
            Self::Offset => "OFFSET",
        }
    }
}

/// The date/time literal spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DateTimeLiteral {
    /// `LOCAL_DATE`
    LocalDate,
    /// `LOCAL_TIME`
    LocalTime,
    /// `LOCAL_DATETIME`
    LocalDateTime,
    /// `CURRENT_DATE`
    CurrentDate,
    /// `CURRENT_TIME`
    CurrentTime,
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
    /// `OFFSET_DATETIME`
    OffsetDateTime,
    /// `LOCAL DATE` / `CURRENT DATE`
    Date(DateTimeScope),
    /// `LOCAL TIME` / `CURRENT TIME`
    Time(DateTimeScope),
    /// `LOCAL DATETIME` / `CURRENT DATETIME` / `OFFSET DATETIME`
    DateTime(DateTimeScope),
    /// `INSTANT`
    Instant,
}

impl fmt::Display for DateTimeLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocalDate => f.write_str("LOCAL_DATE"),
            Self::LocalTime => f.write_str("LOCAL_TIME"),
            Self::LocalDateTime => f.write_str("LOCAL_DATETIME"),
            Self::CurrentDate => f.write_str("CURRENT_DATE"),
            Self::CurrentTime => f.write_str("CURRENT_TIME"),
            Self::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
            Self::OffsetDateTime => f.write_str("OFFSET_DATETIME"),
            Self::Date(scope) => write!(f, "{} DATE", scope.as_str()),
            Self::Time(scope) => write!(f, "{} TIME", scope.as_str()),
            Self::DateTime(scope) => write!(f, "{} DATETIME", scope.as_str()),
            Self::Instant => f.write_str("INSTANT"),
        }
    }
}

/// A binary literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryLiteral {
    /// `X'0A1B'`, holding the hex digits.
    Hex(String),
    /// `{0x0A, 0x1B}`, holding each hex lexeme.
    List(Vec<String>),
}

impl fmt::Display for BinaryLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(digits) => write!(f, "X'{digits}'"),
            Self::List(items) => write!(f, "{{{}}}", items.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_display_escapes() {
        assert_eq!(StringLiteral::single("it's").to_string(), "'it''s'");
        let java = StringLiteral {
            value: "a\"b\\c\n".into(),
            style: StringStyle::Double,
        };
        assert_eq!(java.to_string(), r#""a\"b\\c\n""#);
    }

    #[test]
    fn test_datetime_display() {
        assert_eq!(DateTimeLiteral::LocalDateTime.to_string(), "LOCAL_DATETIME");
        assert_eq!(
            DateTimeLiteral::DateTime(DateTimeScope::Offset).to_string(),
            "OFFSET DATETIME"
        );
        assert_eq!(
            DateTimeLiteral::Date(DateTimeScope::Current).to_string(),
            "CURRENT DATE"
        );
    }

    #[test]
    fn test_binary_display() {
        assert_eq!(BinaryLiteral::Hex("0aFF".into()).to_string(), "X'0aFF'");
        assert_eq!(
            BinaryLiteral::List(vec!["0x01".into(), "0x02".into()]).to_string(),
            "{0x01, 0x02}"
        );
    }
}
