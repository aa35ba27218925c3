//! Parser error types.

use std::collections::BTreeSet;

use crate::lexer::{LexError, Position, Span, TokenKind};

/// What kind of failure a [`ParseError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseErrorKind {
    /// The input could not be split into tokens.
    Lexical,
    /// The tokens do not form a valid statement.
    Syntax,
    /// Nesting or operator chaining went deeper than the configured
    /// limits.
    RecursionLimitExceeded,
    /// The input holds more tokens than the configured budget.
    TokenLimitExceeded,
}

/// A parse error.
///
/// Exactly one error is reported per parse call. When several alternatives
/// were tried, it is the one that got furthest into the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("{message} at {position}")]
pub struct ParseError {
    /// The failure class.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// The location of the error.
    pub span: Span,
    /// Line and column of the start of `span`.
    pub position: Position,
    /// Description of the offending token.
    pub found: Option<String>,
    /// Descriptions of what would have been accepted.
    pub expected: BTreeSet<String>,
}

impl ParseError {
    /// Creates a new syntax error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            span,
            position: Position::default(),
            found: None,
            expected: BTreeSet::new(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &TokenKind, span: Span) -> Self {
        let mut error = Self::new(String::new(), span);
        error.found = Some(found.describe());
        error.expected.insert(expected.into());
        error.refresh_message();
        error
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        Self::unexpected(expected, &TokenKind::Eof, span)
    }

    /// Creates the error for input nested deeper than `limit`.
    #[must_use]
    pub fn recursion_limit(limit: usize, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::RecursionLimitExceeded,
            ..Self::new(
                format!("Query is too deeply nested (limit {limit})"),
                span,
            )
        }
    }

    /// Creates the error for a statement chaining more than `limit`
    /// operators.
    #[must_use]
    pub fn operator_limit(limit: usize, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::RecursionLimitExceeded,
            ..Self::new(
                format!("Query chains too many operators (limit {limit})"),
                span,
            )
        }
    }

    /// Creates the error for input longer than `limit` tokens.
    #[must_use]
    pub fn token_limit(limit: usize, span: Span) -> Self {
        Self {
            kind: ParseErrorKind::TokenLimitExceeded,
            ..Self::new(format!("Query exceeds the token limit of {limit}"), span)
        }
    }

    /// Byte offset the error points at.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.span.start
    }

    /// Returns true for plain syntax errors, the only kind that
    /// alternative parses may recover from.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Syntax)
    }

    /// Folds the expectations of an error at the same offset into this one.
    pub(crate) fn merge(&mut self, other: Self) {
        if self.found.is_none() {
            self.found = other.found;
        }
        self.expected.extend(other.expected);
        self.refresh_message();
    }

    /// Fills in `position` from the original input.
    #[must_use]
    pub(crate) fn locate(mut self, input: &str) -> Self {
        self.position = Position::locate(input, self.span.start);
        self
    }

    fn refresh_message(&mut self) {
        let Some(found) = &self.found else {
            return;
        };
        if self.expected.is_empty() {
            self.message = format!("Unexpected {found}");
            return;
        }
        let expected: Vec<&str> = self.expected.iter().map(String::as_str).collect();
        let list = match expected.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {last}", rest.join(", ")),
            _ => expected.join(""),
        };
        self.message = format!("Unexpected {found}: expected {list}");
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        Self {
            kind: ParseErrorKind::Lexical,
            message: error.reason,
            span: error.span,
            position: error.position,
            found: None,
            expected: BTreeSet::new(),
        }
    }
}
