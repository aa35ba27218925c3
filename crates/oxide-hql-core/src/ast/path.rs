//! Names and path expressions.

use std::fmt;

use super::Expression;
use crate::lexer::Span;

/// How an identifier was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum IdentifierStyle {
    /// A bare name or a keyword used as a name.
    Plain,
    /// `` `name` ``
    Backtick,
    /// `#{expression}`, a SpEL block standing in for a name.
    Spel,
}

/// A single name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Identifier {
    /// The name as written, without quoting.
    pub value: String,
    /// Quoting style.
    pub style: IdentifierStyle,
    /// Source span.
    pub span: Span,
}

impl Identifier {
    /// Creates a plain identifier.
    #[must_use]
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            style: IdentifierStyle::Plain,
            span,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            IdentifierStyle::Plain => f.write_str(&self.value),
            IdentifierStyle::Backtick => write!(f, "`{}`", self.value),
            IdentifierStyle::Spel => write!(f, "#{{{}}}", self.value),
        }
    }
}

/// A dotted chain of identifiers: `e.address.city`, `com.acme.Employee`.
///
/// Also used wherever the grammar wants a dotted name: entity names,
/// function names, cast target types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimplePath {
    /// The segments, never empty.
    pub segments: Vec<Identifier>,
    /// Source span.
    pub span: Span,
}

impl SimplePath {
    /// Returns the segments joined with `.`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.to_string()
    }

    /// Returns the first segment.
    #[must_use]
    pub fn head(&self) -> Option<&Identifier> {
        self.segments.first()
    }
}

impl fmt::Display for SimplePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            segment.fmt(f)?;
        }
        Ok(())
    }
}

/// A path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Path {
    /// A dotted chain with optional indexed access.
    General(GeneralPath),
    /// `TREAT(path AS Type)` with optional continuation.
    Treated(TreatedPath),
}

impl Path {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::General(p) => p.span,
            Self::Treated(p) => p.span,
        }
    }

    /// Returns a short tag naming the node kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::General(_) => "GeneralPath",
            Self::Treated(_) => "TreatedPath",
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General(p) => p.fmt(f),
            Self::Treated(p) => p.fmt(f),
        }
    }
}

/// `simplePath ([index] (.continuation)?)?`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GeneralPath {
    /// The dotted chain.
    pub path: SimplePath,
    /// Optional `[expr]` access after the chain.
    pub index: Option<Box<IndexedAccess>>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for GeneralPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.path.fmt(f)?;
        if let Some(index) = &self.index {
            index.fmt(f)?;
        }
        Ok(())
    }
}

/// `[expr]` optionally followed by `.path`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexedAccess {
    /// The index or key expression.
    pub index: Expression,
    /// Navigation continuing after the brackets.
    pub continuation: Option<GeneralPath>,
}

impl fmt::Display for IndexedAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.index)?;
        if let Some(continuation) = &self.continuation {
            write!(f, ".{continuation}")?;
        }
        Ok(())
    }
}

/// `TREAT(path AS Type)` followed by an optional `.path`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TreatedPath {
    /// The path being downcast.
    pub path: Box<Path>,
    /// The subtype name.
    pub treat_as: SimplePath,
    /// Navigation continuing after the cast.
    pub continuation: Option<SimplePath>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for TreatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TREAT({} AS {})", self.path, self.treat_as)?;
        if let Some(continuation) = &self.continuation {
            write!(f, ".{continuation}")?;
        }
        Ok(())
    }
}
