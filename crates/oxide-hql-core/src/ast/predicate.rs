//! Predicate AST types.

use std::fmt;

use super::{
    display_comma_separated, Expression, ExpressionOrPredicate, Parameter, Path, QueryExpression,
    SimplePath, StringLiteral,
};
use crate::lexer::Span;

/// Relational comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RelationalOperator {
    /// `=`
    Equal,
    /// `<>`
    NotEqual,
    /// `!=`
    BangEqual,
    /// `^=`
    CaretEqual,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
}

impl RelationalOperator {
    /// Returns the HQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::BangEqual => "!=",
            Self::CaretEqual => "^=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns true for the three spellings of inequality.
    #[must_use]
    pub const fn is_inequality(&self) -> bool {
        matches!(self, Self::NotEqual | Self::BangEqual | Self::CaretEqual)
    }
}

/// `ELEMENTS` or `INDICES` of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CollectionFunction {
    /// `ELEMENTS(path)`
    Elements,
    /// `INDICES(path)`
    Indices,
}

impl CollectionFunction {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Elements => "ELEMENTS",
            Self::Indices => "INDICES",
        }
    }
}

/// The right-hand side of `IN`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InList {
    /// `ELEMENTS(path)` / `INDICES(path)`
    Collection {
        /// Which side of the collection.
        function: CollectionFunction,
        /// The collection path.
        path: SimplePath,
    },
    /// `(subquery)`
    Subquery(Box<QueryExpression>),
    /// A parameter bound to a list.
    Parameter(Parameter),
    /// `(a, b, ...)`, possibly empty.
    List(Vec<ExpressionOrPredicate>),
}

impl fmt::Display for InList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection { function, path } => write!(f, "{}({path})", function.as_str()),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Parameter(p) => p.fmt(f),
            Self::List(items) => write!(f, "({})", display_comma_separated(items)),
        }
    }
}

/// The escape character of a `LIKE` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LikeEscape {
    /// A string or character literal.
    Literal(StringLiteral),
    /// A parameter.
    Parameter(Parameter),
}

impl fmt::Display for LikeEscape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => s.fmt(f),
            Self::Parameter(p) => p.fmt(f),
        }
    }
}

/// An HQL predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Predicate {
    /// `(predicate)`
    Grouped {
        /// The parenthesized predicate.
        inner: Box<Predicate>,
        /// Source span.
        span: Span,
    },

    /// `left AND right`
    And {
        /// Left operand.
        left: Box<Predicate>,
        /// Right operand.
        right: Box<Predicate>,
        /// Source span.
        span: Span,
    },

    /// `left OR right`
    Or {
        /// Left operand.
        left: Box<Predicate>,
        /// Right operand.
        right: Box<Predicate>,
        /// Source span.
        span: Span,
    },

    /// `NOT predicate`
    Not {
        /// The negated predicate.
        inner: Box<Predicate>,
        /// Source span.
        span: Span,
    },

    /// `expr IS [NOT] NULL`
    IsNull {
        /// The tested expression.
        expression: Expression,
        /// `IS NOT NULL`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `left IS [NOT] DISTINCT FROM right`
    IsDistinctFrom {
        /// Left operand.
        left: Expression,
        /// Right operand.
        right: Expression,
        /// `IS NOT DISTINCT FROM`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        /// The tested expression.
        expression: Expression,
        /// Lower bound.
        low: Expression,
        /// Upper bound.
        high: Expression,
        /// `NOT BETWEEN`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `left op right`
    Relational {
        /// Left operand.
        left: Expression,
        /// Comparison operator.
        op: RelationalOperator,
        /// Right operand.
        right: Expression,
        /// Source span.
        span: Span,
    },

    /// `expr [NOT] LIKE|ILIKE pattern [ESCAPE c]`
    Like {
        /// The matched expression.
        expression: Expression,
        /// The pattern.
        pattern: Expression,
        /// The escape character.
        escape: Option<LikeEscape>,
        /// `ILIKE`
        case_insensitive: bool,
        /// `NOT LIKE`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `EXISTS expr`
    Exists {
        /// Usually a subquery.
        expression: Expression,
        /// Source span.
        span: Span,
    },

    /// `EXISTS ELEMENTS(path)` / `EXISTS INDICES(path)`
    ExistsCollection {
        /// Which side of the collection.
        function: CollectionFunction,
        /// The collection path.
        path: SimplePath,
        /// Source span.
        span: Span,
    },

    /// `expr [NOT] IN list`
    In {
        /// The tested expression.
        expression: Expression,
        /// The candidates.
        list: InList,
        /// `NOT IN`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `expr IS [NOT] EMPTY`
    IsEmpty {
        /// The collection expression.
        expression: Expression,
        /// `IS NOT EMPTY`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// `expr [NOT] MEMBER OF path`
    MemberOf {
        /// The candidate element.
        expression: Expression,
        /// The collection.
        collection: Path,
        /// `NOT MEMBER OF`
        negated: bool,
        /// Source span.
        span: Span,
    },

    /// A bare expression used as a boolean.
    Expression(Expression),
}

impl Predicate {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Grouped { span, .. }
            | Self::And { span, .. }
            | Self::Or { span, .. }
            | Self::Not { span, .. }
            | Self::IsNull { span, .. }
            | Self::IsDistinctFrom { span, .. }
            | Self::Between { span, .. }
            | Self::Relational { span, .. }
            | Self::Like { span, .. }
            | Self::Exists { span, .. }
            | Self::ExistsCollection { span, .. }
            | Self::In { span, .. }
            | Self::IsEmpty { span, .. }
            | Self::MemberOf { span, .. } => *span,
            Self::Expression(e) => e.span(),
        }
    }

    /// Returns a short tag naming the node kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Grouped { .. } => "Grouped",
            Self::And { .. } => "And",
            Self::Or { .. } => "Or",
            Self::Not { .. } => "Not",
            Self::IsNull { .. } => "IsNull",
            Self::IsDistinctFrom { .. } => "IsDistinctFrom",
            Self::Between { .. } => "Between",
            Self::Relational { .. } => "Relational",
            Self::Like { .. } => "Like",
            Self::Exists { .. } => "Exists",
            Self::ExistsCollection { .. } => "ExistsCollection",
            Self::In { .. } => "In",
            Self::IsEmpty { .. } => "IsEmpty",
            Self::MemberOf { .. } => "MemberOf",
            Self::Expression(_) => "Expression",
        }
    }
}

const fn not(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grouped { inner, .. } => write!(f, "({inner})"),
            Self::And { left, right, .. } => write!(f, "{left} AND {right}"),
            Self::Or { left, right, .. } => write!(f, "{left} OR {right}"),
            Self::Not { inner, .. } => write!(f, "NOT {inner}"),
            Self::IsNull {
                expression,
                negated,
                ..
            } => write!(f, "{expression} IS {}NULL", not(*negated)),
            Self::IsDistinctFrom {
                left,
                right,
                negated,
                ..
            } => write!(f, "{left} IS {}DISTINCT FROM {right}", not(*negated)),
            Self::Between {
                expression,
                low,
                high,
                negated,
                ..
            } => write!(f, "{expression} {}BETWEEN {low} AND {high}", not(*negated)),
            Self::Relational {
                left, op, right, ..
            } => write!(f, "{left} {} {right}", op.as_str()),
            Self::Like {
                expression,
                pattern,
                escape,
                case_insensitive,
                negated,
                ..
            } => {
                let op = if *case_insensitive { "ILIKE" } else { "LIKE" };
                write!(f, "{expression} {}{op} {pattern}", not(*negated))?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                Ok(())
            }
            Self::Exists { expression, .. } => write!(f, "EXISTS {expression}"),
            Self::ExistsCollection { function, path, .. } => {
                write!(f, "EXISTS {}({path})", function.as_str())
            }
            Self::In {
                expression,
                list,
                negated,
                ..
            } => write!(f, "{expression} {}IN {list}", not(*negated)),
            Self::IsEmpty {
                expression,
                negated,
                ..
            } => write!(f, "{expression} IS {}EMPTY", not(*negated)),
            Self::MemberOf {
                expression,
                collection,
                negated,
                ..
            } => write!(f, "{expression} {}MEMBER OF {collection}", not(*negated)),
            Self::Expression(e) => e.fmt(f),
        }
    }
}
