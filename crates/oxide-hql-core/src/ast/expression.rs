//! Expression AST types.

use std::fmt;

use super::{Function, Identifier, Literal, NumericLiteral, Path, Predicate, QueryExpression};
use crate::lexer::Span;

/// Binary arithmetic and string operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `||`
    Concat,
}

impl BinaryOperator {
    /// Returns the HQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Concat => "||",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Concat => 1,
            Self::Add | Self::Subtract => 2,
            Self::Multiply | Self::Divide => 3,
        }
    }
}

/// Unary sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Sign {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl Sign {
    /// Returns the HQL representation of the sign.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Date/time fields usable in `EXTRACT` and duration arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DatetimeField {
    Year,
    Month,
    Day,
    Week,
    Quarter,
    Hour,
    Minute,
    Second,
    Nanosecond,
    Epoch,
}

impl DatetimeField {
    /// Returns the HQL representation of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH",
            Self::Day => "DAY",
            Self::Week => "WEEK",
            Self::Quarter => "QUARTER",
            Self::Hour => "HOUR",
            Self::Minute => "MINUTE",
            Self::Second => "SECOND",
            Self::Nanosecond => "NANOSECOND",
            Self::Epoch => "EPOCH",
        }
    }
}

impl fmt::Display for DatetimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HQL expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expression {
    /// Arithmetic or concatenation: `a + b`, `a * b`, `a || b`.
    Binary {
        /// Left operand.
        left: Box<Expression>,
        /// Operator.
        op: BinaryOperator,
        /// Right operand.
        right: Box<Expression>,
        /// Source span.
        span: Span,
    },

    /// A sign directly applied to a numeric literal: `-1`, `+2.5`.
    SignedNumericLiteral {
        /// The sign.
        sign: Sign,
        /// The unsigned literal.
        literal: NumericLiteral,
        /// Source span.
        span: Span,
    },

    /// A sign applied to any other operand: `-e.salary`.
    Signed {
        /// The sign.
        sign: Sign,
        /// The operand.
        operand: Box<Expression>,
        /// Source span.
        span: Span,
    },

    /// `(a, b, ...)` with at least two elements.
    Tuple {
        /// The elements.
        elements: Vec<ExpressionOrPredicate>,
        /// Source span.
        span: Span,
    },

    /// `(expr)`
    Grouped {
        /// The parenthesized expression.
        inner: Box<Expression>,
        /// Source span.
        span: Span,
    },

    /// `(subquery)` used as a value.
    Subquery {
        /// The query.
        query: Box<QueryExpression>,
        /// Source span.
        span: Span,
    },

    /// `expr field`: a number converted to a duration of `field` units.
    ToDuration {
        /// The magnitude.
        expression: Box<Expression>,
        /// The unit.
        unit: DatetimeField,
        /// Source span.
        span: Span,
    },

    /// `expr BY field`: a duration converted to a number of `field` units.
    FromDuration {
        /// The duration.
        expression: Box<Expression>,
        /// The unit.
        unit: DatetimeField,
        /// Source span.
        span: Span,
    },

    /// `DAY OF WEEK`
    DayOfWeek {
        /// Source span.
        span: Span,
    },

    /// `DAY OF MONTH`
    DayOfMonth {
        /// Source span.
        span: Span,
    },

    /// `WEEK OF YEAR`
    WeekOfYear {
        /// Source span.
        span: Span,
    },

    /// `CASE ... END`
    Case(Box<CaseExpression>),

    /// A literal value.
    Literal {
        /// The value.
        value: Literal,
        /// Source span.
        span: Span,
    },

    /// A query parameter.
    Parameter(Parameter),

    /// A function call.
    Function(Box<Function>),

    /// A path expression.
    Path(Path),
}

impl Expression {
    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Binary { span, .. }
            | Self::SignedNumericLiteral { span, .. }
            | Self::Signed { span, .. }
            | Self::Tuple { span, .. }
            | Self::Grouped { span, .. }
            | Self::Subquery { span, .. }
            | Self::ToDuration { span, .. }
            | Self::FromDuration { span, .. }
            | Self::DayOfWeek { span }
            | Self::DayOfMonth { span }
            | Self::WeekOfYear { span }
            | Self::Literal { span, .. } => *span,
            Self::Case(case) => case.span(),
            Self::Parameter(p) => p.span,
            Self::Function(function) => function.span(),
            Self::Path(path) => path.span(),
        }
    }

    /// Returns a short tag naming the node kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Binary { .. } => "Binary",
            Self::SignedNumericLiteral { .. } => "SignedNumericLiteral",
            Self::Signed { .. } => "Signed",
            Self::Tuple { .. } => "Tuple",
            Self::Grouped { .. } => "Grouped",
            Self::Subquery { .. } => "Subquery",
            Self::ToDuration { .. } => "ToDuration",
            Self::FromDuration { .. } => "FromDuration",
            Self::DayOfWeek { .. } => "DayOfWeek",
            Self::DayOfMonth { .. } => "DayOfMonth",
            Self::WeekOfYear { .. } => "WeekOfYear",
            Self::Case(_) => "Case",
            Self::Literal { .. } => "Literal",
            Self::Parameter(_) => "Parameter",
            Self::Function(_) => "Function",
            Self::Path(_) => "Path",
        }
    }

    /// Creates a literal expression.
    #[must_use]
    pub const fn literal(value: Literal, span: Span) -> Self {
        Self::Literal { value, span }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary {
                left, op, right, ..
            } => write!(f, "{left} {} {right}", op.as_str()),
            Self::SignedNumericLiteral { sign, literal, .. } => {
                write!(f, "{}{literal}", sign.as_str())
            }
            Self::Signed { sign, operand, .. } => {
                let operand = operand.to_string();
                if operand.starts_with(['+', '-']) {
                    write!(f, "{} {operand}", sign.as_str())
                } else {
                    write!(f, "{}{operand}", sign.as_str())
                }
            }
            Self::Tuple { elements, .. } => {
                write!(f, "({})", super::display_comma_separated(elements))
            }
            Self::Grouped { inner, .. } => write!(f, "({inner})"),
            Self::Subquery { query, .. } => write!(f, "({query})"),
            Self::ToDuration {
                expression, unit, ..
            } => write!(f, "{expression} {unit}"),
            Self::FromDuration {
                expression, unit, ..
            } => write!(f, "{expression} BY {unit}"),
            Self::DayOfWeek { .. } => f.write_str("DAY OF WEEK"),
            Self::DayOfMonth { .. } => f.write_str("DAY OF MONTH"),
            Self::WeekOfYear { .. } => f.write_str("WEEK OF YEAR"),
            Self::Case(case) => case.fmt(f),
            Self::Literal { value, .. } => value.fmt(f),
            Self::Parameter(p) => p.fmt(f),
            Self::Function(function) => function.fmt(f),
            Self::Path(path) => path.fmt(f),
        }
    }
}

/// A position that accepts either an expression or a predicate.
///
/// A predicate that is just a bare expression is always stored as
/// `Expression`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExpressionOrPredicate {
    /// A value expression.
    Expression(Expression),
    /// A boolean predicate.
    Predicate(Predicate),
}

impl ExpressionOrPredicate {
    /// Wraps a parsed predicate, unwrapping bare expressions.
    #[must_use]
    pub fn from_predicate(predicate: Predicate) -> Self {
        match predicate {
            Predicate::Expression(expression) => Self::Expression(expression),
            other => Self::Predicate(other),
        }
    }

    /// Returns the source span.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Expression(e) => e.span(),
            Self::Predicate(p) => p.span(),
        }
    }

    /// Returns the expression, if this is one.
    #[must_use]
    pub const fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(e) => Some(e),
            Self::Predicate(_) => None,
        }
    }

    /// Returns the predicate, if this is one.
    #[must_use]
    pub const fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Self::Expression(_) => None,
            Self::Predicate(p) => Some(p),
        }
    }
}

impl fmt::Display for ExpressionOrPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(e) => e.fmt(f),
            Self::Predicate(p) => p.fmt(f),
        }
    }
}

/// `CASE` expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CaseExpression {
    /// `CASE operand WHEN value THEN result ... [ELSE result] END`
    Simple {
        /// The value being compared.
        operand: ExpressionOrPredicate,
        /// The `WHEN value THEN result` arms.
        when_clauses: Vec<SimpleWhen>,
        /// The `ELSE` result.
        else_result: Option<ExpressionOrPredicate>,
        /// Source span.
        span: Span,
    },
    /// `CASE WHEN predicate THEN result ... [ELSE result] END`
    Searched {
        /// The `WHEN predicate THEN result` arms.
        when_clauses: Vec<SearchedWhen>,
        /// The `ELSE` result.
        else_result: Option<ExpressionOrPredicate>,
        /// Source span.
        span: Span,
    },
}

impl CaseExpression {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Simple { span, .. } | Self::Searched { span, .. } => *span,
        }
    }

    /// Returns the `ELSE` result.
    #[must_use]
    pub const fn else_result(&self) -> Option<&ExpressionOrPredicate> {
        match self {
            Self::Simple { else_result, .. } | Self::Searched { else_result, .. } => {
                else_result.as_ref()
            }
        }
    }
}

impl fmt::Display for CaseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CASE")?;
        match self {
            Self::Simple {
                operand,
                when_clauses,
                ..
            } => {
                write!(f, " {operand}")?;
                for when in when_clauses {
                    write!(f, " WHEN {} THEN {}", when.when, when.then)?;
                }
            }
            Self::Searched { when_clauses, .. } => {
                for when in when_clauses {
                    write!(f, " WHEN {} THEN {}", when.when, when.then)?;
                }
            }
        }
        if let Some(else_result) = self.else_result() {
            write!(f, " ELSE {else_result}")?;
        }
        f.write_str(" END")
    }
}

/// `WHEN value THEN result` in a simple `CASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimpleWhen {
    /// The value compared against the operand.
    pub when: Expression,
    /// The result.
    pub then: ExpressionOrPredicate,
}

/// `WHEN predicate THEN result` in a searched `CASE`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchedWhen {
    /// The condition.
    pub when: Predicate,
    /// The result.
    pub then: ExpressionOrPredicate,
}

/// `%` wildcards wrapped around a parameter in a `LIKE` pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LikeWildcards {
    /// `%` before the parameter.
    pub leading: bool,
    /// `%` after the parameter.
    pub trailing: bool,
}

/// The two parameter prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterPrefix {
    /// `:`
    Colon,
    /// `?`
    Question,
}

impl ParameterPrefix {
    /// Returns the HQL representation of the prefix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Colon => ":",
            Self::Question => "?",
        }
    }
}

/// The forms of query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterKind {
    /// `:name`
    Named(Identifier),
    /// `?` or `?1`, holding the index lexeme when present.
    Positional(Option<String>),
    /// `:#{...}` or `?#{...}`
    Spel {
        /// The prefix used.
        prefix: ParameterPrefix,
        /// The text between the braces.
        expression: String,
    },
}

/// A query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Parameter {
    /// Which form of parameter.
    pub kind: ParameterKind,
    /// Wildcards, only ever set on `LIKE` patterns.
    pub wildcards: LikeWildcards,
    /// Source span.
    pub span: Span,
}

impl Parameter {
    /// Returns the name of a named parameter.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            ParameterKind::Named(name) => Some(&name.value),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wildcards.leading {
            f.write_str("%")?;
        }
        match &self.kind {
            ParameterKind::Named(name) => write!(f, ":{name}")?,
            ParameterKind::Positional(Some(index)) => write!(f, "?{index}")?,
            ParameterKind::Positional(None) => f.write_str("?")?,
            ParameterKind::Spel { prefix, expression } => {
                write!(f, "{}#{{{expression}}}", prefix.as_str())?;
            }
        }
        if self.wildcards.trailing {
            f.write_str("%")?;
        }
        Ok(())
    }
}
