//! FROM clause and join AST types.

use std::fmt;

use super::query::fmt_variable;
use super::{display_comma_separated, Path, Predicate, QueryExpression, SimplePath, Variable};
use crate::lexer::Span;

/// `FROM root [joins], root [joins], ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FromClause {
    /// The roots with their joins, never empty.
    pub roots: Vec<EntityWithJoins>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FROM {}", display_comma_separated(&self.roots))
    }
}

/// A FROM root followed by its joins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityWithJoins {
    /// The root.
    pub root: FromRoot,
    /// Joins in source order.
    pub joins: Vec<JoinSpecifier>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for EntityWithJoins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)?;
        for join in &self.joins {
            match join {
                JoinSpecifier::Collection(c) => c.fmt(f)?,
                other => write!(f, " {other}")?,
            }
        }
        Ok(())
    }
}

/// A FROM root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FromRoot {
    /// `Entity [alias]`
    Entity {
        /// The (possibly qualified) entity name.
        name: SimplePath,
        /// Optional alias.
        variable: Option<Variable>,
        /// Source span.
        span: Span,
    },
    /// `[LATERAL] (subquery) [alias]`
    Subquery {
        /// `LATERAL` was given.
        lateral: bool,
        /// The derived query.
        query: Box<QueryExpression>,
        /// Optional alias.
        variable: Option<Variable>,
        /// Source span.
        span: Span,
    },
}

impl FromRoot {
    /// Returns the alias, if any.
    #[must_use]
    pub const fn variable(&self) -> Option<&Variable> {
        match self {
            Self::Entity { variable, .. } | Self::Subquery { variable, .. } => variable.as_ref(),
        }
    }

    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Entity { span, .. } | Self::Subquery { span, .. } => *span,
        }
    }
}

impl fmt::Display for FromRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity { name, .. } => name.fmt(f)?,
            Self::Subquery { lateral, query, .. } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({query})")?;
            }
        }
        fmt_variable(f, self.variable())
    }
}

/// Something following a FROM root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinSpecifier {
    /// `[type] JOIN [FETCH] target [ON|WITH predicate]`
    Join(Join),
    /// `CROSS JOIN Entity [alias]`
    Cross(CrossJoin),
    /// `, IN(path) [alias]`
    Collection(CollectionJoin),
}

impl fmt::Display for JoinSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Join(j) => j.fmt(f),
            Self::Cross(c) => c.fmt(f),
            Self::Collection(c) => c.fmt(f),
        }
    }
}

/// The side keyword of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinKind {
    /// No side keyword.
    Unspecified,
    /// `INNER`
    Inner,
    /// `LEFT`
    Left,
    /// `RIGHT`
    Right,
    /// `FULL`
    Full,
    /// `CROSS`
    Cross,
}

/// Join type as written: a side keyword plus the `OUTER` flag.
///
/// `OUTER JOIN` without a side is accepted and kept as
/// `Unspecified` with `outer` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinType {
    /// The side keyword.
    pub kind: JoinKind,
    /// `OUTER` was written.
    pub outer: bool,
}

impl JoinType {
    /// A plain `JOIN`.
    pub const DEFAULT: Self = Self {
        kind: JoinKind::Unspecified,
        outer: false,
    };

    /// Returns true for joins that keep unmatched rows.
    #[must_use]
    pub const fn is_outer(&self) -> bool {
        self.outer || matches!(self.kind, JoinKind::Left | JoinKind::Right | JoinKind::Full)
    }
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.kind {
            JoinKind::Unspecified => "",
            JoinKind::Inner => "INNER ",
            JoinKind::Left => "LEFT ",
            JoinKind::Right => "RIGHT ",
            JoinKind::Full => "FULL ",
            JoinKind::Cross => "CROSS ",
        };
        f.write_str(side)?;
        if self.outer {
            f.write_str("OUTER ")?;
        }
        f.write_str("JOIN")
    }
}

/// The thing being joined.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum JoinTarget {
    /// `path [alias]`
    Path {
        /// The association path or entity name.
        path: Path,
        /// Optional alias.
        variable: Option<Variable>,
    },
    /// `[LATERAL] (subquery) [alias]`
    Subquery {
        /// `LATERAL` was given.
        lateral: bool,
        /// The derived query.
        query: Box<QueryExpression>,
        /// Optional alias.
        variable: Option<Variable>,
    },
}

impl JoinTarget {
    /// Returns the alias, if any.
    #[must_use]
    pub const fn variable(&self) -> Option<&Variable> {
        match self {
            Self::Path { variable, .. } | Self::Subquery { variable, .. } => variable.as_ref(),
        }
    }
}

impl fmt::Display for JoinTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path { path, .. } => path.fmt(f)?,
            Self::Subquery { lateral, query, .. } => {
                if *lateral {
                    f.write_str("LATERAL ")?;
                }
                write!(f, "({query})")?;
            }
        }
        fmt_variable(f, self.variable())
    }
}

/// `ON` or `WITH`; both mean the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RestrictionKeyword {
    /// `ON`
    On,
    /// `WITH`
    With,
}

/// `ON predicate` / `WITH predicate`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct JoinRestriction {
    /// The keyword used.
    pub keyword: RestrictionKeyword,
    /// The join condition.
    pub predicate: Predicate,
}

impl fmt::Display for JoinRestriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self.keyword {
            RestrictionKeyword::On => "ON",
            RestrictionKeyword::With => "WITH",
        };
        write!(f, "{keyword} {}", self.predicate)
    }
}

/// A typed join.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Join {
    /// Join type.
    pub join_type: JoinType,
    /// `JOIN FETCH`
    pub fetch: bool,
    /// The joined path or subquery.
    pub target: JoinTarget,
    /// Optional join condition.
    pub restriction: Option<JoinRestriction>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.join_type.fmt(f)?;
        if self.fetch {
            f.write_str(" FETCH")?;
        }
        write!(f, " {}", self.target)?;
        if let Some(restriction) = &self.restriction {
            write!(f, " {restriction}")?;
        }
        Ok(())
    }
}

/// `CROSS JOIN Entity [alias]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CrossJoin {
    /// The entity name.
    pub entity: SimplePath,
    /// Optional alias.
    pub variable: Option<Variable>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for CrossJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CROSS JOIN {}", self.entity)?;
        fmt_variable(f, self.variable.as_ref())
    }
}

/// Legacy `, IN(path) [alias]` collection member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CollectionJoin {
    /// The collection path.
    pub path: Path,
    /// Optional alias.
    pub variable: Option<Variable>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for CollectionJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ", IN({})", self.path)?;
        fmt_variable(f, self.variable.as_ref())
    }
}
