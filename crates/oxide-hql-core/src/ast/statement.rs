//! Top-level statement AST types.

use std::fmt;

use super::query::fmt_variable;
use super::{
    display_comma_separated, Expression, ExpressionOrPredicate, QueryExpression, SimplePath,
    Variable, WhereClause,
};
use crate::lexer::Span;

/// A parsed HQL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Statement {
    /// A query.
    Select(QueryExpression),
    /// `UPDATE ...`
    Update(UpdateStatement),
    /// `DELETE ...`
    Delete(DeleteStatement),
    /// `INSERT ...`
    Insert(InsertStatement),
}

impl Statement {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Select(q) => q.span,
            Self::Update(u) => u.span,
            Self::Delete(d) => d.span,
            Self::Insert(i) => i.span,
        }
    }

    /// Returns a short tag naming the statement kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::Insert(_) => "INSERT",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(q) => q.fmt(f),
            Self::Update(u) => u.fmt(f),
            Self::Delete(d) => d.fmt(f),
            Self::Insert(i) => i.fmt(f),
        }
    }
}

/// The entity an UPDATE, DELETE or INSERT acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TargetEntity {
    /// The (possibly qualified) entity name.
    pub entity: SimplePath,
    /// Optional alias.
    pub variable: Option<Variable>,
}

impl fmt::Display for TargetEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity.fmt(f)?;
        fmt_variable(f, self.variable.as_ref())
    }
}

/// `path = value` in an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    /// The assigned attribute.
    pub target: SimplePath,
    /// The new value.
    pub value: ExpressionOrPredicate,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

/// `UPDATE [VERSIONED] target SET assignment, ... [WHERE ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateStatement {
    /// `VERSIONED` was given.
    pub versioned: bool,
    /// The updated entity.
    pub target: TargetEntity,
    /// The assignments, never empty.
    pub assignments: Vec<Assignment>,
    /// Optional filter.
    pub where_clause: Option<WhereClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UPDATE ")?;
        if self.versioned {
            f.write_str("VERSIONED ")?;
        }
        write!(
            f,
            "{} SET {}",
            self.target,
            display_comma_separated(&self.assignments)
        )?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " {where_clause}")?;
        }
        Ok(())
    }
}

/// `DELETE [FROM] target [WHERE ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeleteStatement {
    /// `FROM` was written.
    pub from: bool,
    /// The deleted entity.
    pub target: TargetEntity,
    /// Optional filter.
    pub where_clause: Option<WhereClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DELETE ")?;
        if self.from {
            f.write_str("FROM ")?;
        }
        self.target.fmt(f)?;
        if let Some(where_clause) = &self.where_clause {
            write!(f, " {where_clause}")?;
        }
        Ok(())
    }
}

/// One `(a, b, ...)` row of a VALUES list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuesRow {
    /// The values.
    pub values: Vec<Expression>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for ValuesRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", display_comma_separated(&self.values))
    }
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InsertSource {
    /// A query.
    Query(QueryExpression),
    /// `VALUES (...), (...)`
    Values(Vec<ValuesRow>),
}

impl fmt::Display for InsertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => q.fmt(f),
            Self::Values(rows) => write!(f, "VALUES {}", display_comma_separated(rows)),
        }
    }
}

/// `INSERT [INTO] target (field, ...) query|VALUES ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InsertStatement {
    /// `INTO` was written.
    pub into: bool,
    /// The target entity.
    pub target: TargetEntity,
    /// The target attributes.
    pub fields: Vec<SimplePath>,
    /// The inserted rows.
    pub source: InsertSource,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("INSERT ")?;
        if self.into {
            f.write_str("INTO ")?;
        }
        write!(
            f,
            "{} ({}) {}",
            self.target,
            display_comma_separated(&self.fields),
            self.source
        )
    }
}
