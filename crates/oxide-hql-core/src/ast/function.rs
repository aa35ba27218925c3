//! Function call and window clause AST types.

use std::fmt;

use super::{
    display_comma_separated, CollectionFunction, DatetimeField, Expression, ExpressionOrPredicate,
    OrderByClause, Predicate, QueryExpression, SimplePath, StringLiteral, WhereClause,
};
use crate::lexer::Span;

/// A function invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Function {
    /// `name(args)` with optional FILTER, WITHIN GROUP and OVER.
    Generic(GenericFunction),
    /// `name(subquery)`
    WithSubquery {
        /// Function name.
        name: SimplePath,
        /// The subquery argument.
        query: Box<QueryExpression>,
        /// Source span.
        span: Span,
    },
    /// `CAST(expr AS Type)`
    Cast(CastFunction),
    /// `EXTRACT(field FROM expr)` or `field(expr)`
    Extract(ExtractFunction),
    /// `TRIM([spec] [char] [FROM] expr)`
    Trim(TrimFunction),
    /// `EVERY`/`ALL`/`ANY`/`SOME` over a predicate, subquery or collection.
    Quantified(QuantifiedFunction),
}

impl Function {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Generic(f) => f.span,
            Self::WithSubquery { span, .. } => *span,
            Self::Cast(f) => f.span,
            Self::Extract(f) => f.span,
            Self::Trim(f) => f.span,
            Self::Quantified(f) => f.span,
        }
    }

    /// Returns a short tag naming the node kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Generic(_) => "GenericFunction",
            Self::WithSubquery { .. } => "FunctionWithSubquery",
            Self::Cast(_) => "Cast",
            Self::Extract(_) => "Extract",
            Self::Trim(_) => "Trim",
            Self::Quantified(_) => "Quantified",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic(g) => g.fmt(f),
            Self::WithSubquery { name, query, .. } => write!(f, "{name}({query})"),
            Self::Cast(c) => c.fmt(f),
            Self::Extract(e) => e.fmt(f),
            Self::Trim(t) => t.fmt(f),
            Self::Quantified(q) => q.fmt(f),
        }
    }
}

/// Arguments of a generic function call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FunctionArguments {
    /// `()`
    None,
    /// `(*)`
    Star,
    /// `([DISTINCT] a, b, ...)`
    List {
        /// `DISTINCT` was given.
        distinct: bool,
        /// The arguments, never empty.
        args: Vec<ExpressionOrPredicate>,
    },
}

impl fmt::Display for FunctionArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Star => f.write_str("*"),
            Self::List { distinct, args } => {
                if *distinct {
                    f.write_str("DISTINCT ")?;
                }
                display_comma_separated(args).fmt(f)
            }
        }
    }
}

/// `name(args)` and its optional trailing clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GenericFunction {
    /// Possibly dot-qualified function name.
    pub name: SimplePath,
    /// The arguments.
    pub arguments: FunctionArguments,
    /// Legacy accessor continuing after the call: `fn(x).attr`.
    pub continuation: Option<SimplePath>,
    /// `FILTER (WHERE ...)`
    pub filter: Option<WhereClause>,
    /// `WITHIN GROUP (ORDER BY ...)`
    pub within_group: Option<OrderByClause>,
    /// `OVER (...)`
    pub over: Option<OverClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for GenericFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)?;
        if let Some(continuation) = &self.continuation {
            write!(f, ".{continuation}")?;
        }
        if let Some(filter) = &self.filter {
            write!(f, " FILTER ({filter})")?;
        }
        if let Some(order_by) = &self.within_group {
            write!(f, " WITHIN GROUP ({order_by})")?;
        }
        if let Some(over) = &self.over {
            write!(f, " OVER ({over})")?;
        }
        Ok(())
    }
}

/// The body of an `OVER (...)` window clause.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OverClause {
    /// `PARTITION BY a, b`
    pub partition_by: Vec<Expression>,
    /// `ORDER BY ...`
    pub order_by: Option<OrderByClause>,
    /// Frame specification.
    pub frame: Option<FrameClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for OverClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if !self.partition_by.is_empty() {
            write!(
                f,
                "PARTITION BY {}",
                display_comma_separated(&self.partition_by)
            )?;
            sep = " ";
        }
        if let Some(order_by) = &self.order_by {
            write!(f, "{sep}{order_by}")?;
            sep = " ";
        }
        if let Some(frame) = &self.frame {
            write!(f, "{sep}{frame}")?;
        }
        Ok(())
    }
}

/// Frame unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameMode {
    /// `RANGE`
    Range,
    /// `ROWS`
    Rows,
    /// `GROUPS`
    Groups,
}

impl FrameMode {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Range => "RANGE",
            Self::Rows => "ROWS",
            Self::Groups => "GROUPS",
        }
    }
}

/// A frame boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameBound {
    /// `UNBOUNDED PRECEDING` (start only)
    UnboundedPreceding,
    /// `expr PRECEDING`
    Preceding(Expression),
    /// `CURRENT ROW`
    CurrentRow,
    /// `expr FOLLOWING`
    Following(Expression),
    /// `UNBOUNDED FOLLOWING` (end only)
    UnboundedFollowing,
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(e) => write!(f, "{e} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(e) => write!(f, "{e} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

/// `EXCLUDE ...`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameExclusion {
    /// `EXCLUDE CURRENT ROW`
    CurrentRow,
    /// `EXCLUDE GROUP`
    Group,
    /// `EXCLUDE TIES`
    Ties,
    /// `EXCLUDE NO OTHERS`
    NoOthers,
}

impl FrameExclusion {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRow => "EXCLUDE CURRENT ROW",
            Self::Group => "EXCLUDE GROUP",
            Self::Ties => "EXCLUDE TIES",
            Self::NoOthers => "EXCLUDE NO OTHERS",
        }
    }
}

/// `ROWS|RANGE|GROUPS start` or `... BETWEEN start AND end`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameClause {
    /// Frame unit.
    pub mode: FrameMode,
    /// Frame start.
    pub start: FrameBound,
    /// Frame end, present for the `BETWEEN` form.
    pub end: Option<FrameBound>,
    /// Exclusion.
    pub exclusion: Option<FrameExclusion>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for FrameClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode.as_str())?;
        match &self.end {
            Some(end) => write!(f, " BETWEEN {} AND {end}", self.start)?,
            None => write!(f, " {}", self.start)?,
        }
        if let Some(exclusion) = &self.exclusion {
            write!(f, " {}", exclusion.as_str())?;
        }
        Ok(())
    }
}

/// `CAST(expr AS Type[(n[, m])])`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CastFunction {
    /// The value being converted.
    pub expression: Box<Expression>,
    /// The target type name.
    pub target: SimplePath,
    /// Length or precision, as written.
    pub precision: Option<String>,
    /// Scale, as written.
    pub scale: Option<String>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for CastFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CAST({} AS {}", self.expression, self.target)?;
        match (&self.precision, &self.scale) {
            (Some(p), Some(s)) => write!(f, "({p}, {s})")?,
            (Some(p), None) => write!(f, "({p})")?,
            _ => {}
        }
        f.write_str(")")
    }
}

/// What `EXTRACT` pulls out of a date/time value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExtractField {
    /// A bare field: `YEAR`, `EPOCH`, ...
    Datetime(DatetimeField),
    /// Anything else, e.g. `DAY OF WEEK` or a function.
    Expression(Expression),
}

impl fmt::Display for ExtractField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Datetime(field) => field.fmt(f),
            Self::Expression(e) => e.fmt(f),
        }
    }
}

/// `EXTRACT(field FROM source)`, or the `field(source)` shorthand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtractFunction {
    /// The extracted field.
    pub field: ExtractField,
    /// The date/time value.
    pub source: Box<Expression>,
    /// Written as `field(source)`.
    pub shorthand: bool,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for ExtractFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shorthand {
            write!(f, "{}({})", self.field, self.source)
        } else {
            write!(f, "EXTRACT({} FROM {})", self.field, self.source)
        }
    }
}

/// Which end(s) `TRIM` works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrimSpecification {
    /// `LEADING`
    Leading,
    /// `TRAILING`
    Trailing,
    /// `BOTH`
    Both,
}

impl TrimSpecification {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
            Self::Both => "BOTH",
        }
    }
}

/// `TRIM([LEADING|TRAILING|BOTH] [char] [FROM] source)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrimFunction {
    /// Which end(s) to trim.
    pub specification: Option<TrimSpecification>,
    /// The character to remove.
    pub character: Option<StringLiteral>,
    /// `FROM` was written.
    pub from: bool,
    /// The string being trimmed.
    pub source: Box<Expression>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for TrimFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TRIM(")?;
        if let Some(spec) = &self.specification {
            write!(f, "{} ", spec.as_str())?;
        }
        if let Some(character) = &self.character {
            write!(f, "{character} ")?;
        }
        if self.from {
            f.write_str("FROM ")?;
        }
        write!(f, "{})", self.source)
    }
}

/// Quantifier spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Quantifier {
    /// `EVERY`
    Every,
    /// `ALL`
    All,
    /// `ANY`
    Any,
    /// `SOME`
    Some,
}

impl Quantifier {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Every => "EVERY",
            Self::All => "ALL",
            Self::Any => "ANY",
            Self::Some => "SOME",
        }
    }

    /// Returns true for `EVERY`/`ALL`, false for `ANY`/`SOME`.
    #[must_use]
    pub const fn is_universal(&self) -> bool {
        matches!(self, Self::Every | Self::All)
    }
}

/// What a quantifier ranges over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QuantifiedArgument {
    /// `(predicate)`
    Predicate(Box<Predicate>),
    /// `(subquery)`
    Subquery(Box<QueryExpression>),
    /// `ELEMENTS(path)` / `INDICES(path)`
    Collection {
        /// Which side of the collection.
        function: CollectionFunction,
        /// The collection path.
        path: SimplePath,
    },
}

/// `EVERY(...)`, `ALL(...)`, `ANY(...)`, `SOME(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QuantifiedFunction {
    /// The quantifier keyword.
    pub quantifier: Quantifier,
    /// The argument.
    pub argument: QuantifiedArgument,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for QuantifiedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quantifier = self.quantifier.as_str();
        match &self.argument {
            QuantifiedArgument::Predicate(p) => write!(f, "{quantifier}({p})"),
            QuantifiedArgument::Subquery(q) => write!(f, "{quantifier}({q})"),
            QuantifiedArgument::Collection { function, path } => {
                write!(f, "{quantifier} {}({path})", function.as_str())
            }
        }
    }
}
