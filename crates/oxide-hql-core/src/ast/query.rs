//! Query expression, CTE and clause AST types.

use std::fmt;

use super::{
    display_comma_separated, Expression, ExpressionOrPredicate, FromClause, Identifier, Literal,
    NumericLiteral, Parameter, Path, Predicate, SimplePath,
};
use crate::lexer::Span;

/// A full query: optional CTEs and one or more ordered queries joined by
/// set operators, evaluated left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryExpression {
    /// `WITH ...`
    pub with: Option<WithClause>,
    /// The first query.
    pub first: OrderedQuery,
    /// Each following `(operator, query)` pair.
    pub rest: Vec<SetOperation>,
    /// Source span.
    pub span: Span,
}

impl QueryExpression {
    /// Iterates over every ordered query in source order.
    pub fn queries(&self) -> impl Iterator<Item = &OrderedQuery> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|op| &op.query))
    }
}

impl fmt::Display for QueryExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            write!(f, "{with} ")?;
        }
        self.first.fmt(f)?;
        for operation in &self.rest {
            write!(f, " {} {}", operation.operator, operation.query)?;
        }
        Ok(())
    }
}

/// The three set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SetOperatorKind {
    /// `UNION`
    Union,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

/// A set operator with its `ALL` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetOperator {
    /// Which operator.
    pub kind: SetOperatorKind,
    /// `ALL` was given.
    pub all: bool,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.kind {
            SetOperatorKind::Union => "UNION",
            SetOperatorKind::Intersect => "INTERSECT",
            SetOperatorKind::Except => "EXCEPT",
        })?;
        if self.all {
            f.write_str(" ALL")?;
        }
        Ok(())
    }
}

/// One `operator query` step of a query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SetOperation {
    /// The operator.
    pub operator: SetOperator,
    /// The right-hand query.
    pub query: OrderedQuery,
}

/// `WITH cte, cte, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WithClause {
    /// The CTEs in declaration order.
    pub ctes: Vec<Cte>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for WithClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WITH {}", display_comma_separated(&self.ctes))
    }
}

/// Materialization hint on a CTE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CteMaterialization {
    /// No hint.
    #[default]
    Unspecified,
    /// `MATERIALIZED`
    Materialized,
    /// `NOT MATERIALIZED`
    NotMaterialized,
}

/// `name AS [[NOT] MATERIALIZED] (query) [SEARCH ...] [CYCLE ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Cte {
    /// The CTE name.
    pub name: Identifier,
    /// Materialization hint.
    pub materialization: CteMaterialization,
    /// The CTE body.
    pub query: Box<QueryExpression>,
    /// `SEARCH` clause of recursive CTEs.
    pub search: Option<SearchClause>,
    /// `CYCLE` clause of recursive CTEs.
    pub cycle: Option<CycleClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} AS ", self.name)?;
        match self.materialization {
            CteMaterialization::Unspecified => {}
            CteMaterialization::Materialized => f.write_str("MATERIALIZED ")?,
            CteMaterialization::NotMaterialized => f.write_str("NOT MATERIALIZED ")?,
        }
        write!(f, "({})", self.query)?;
        if let Some(search) = &self.search {
            write!(f, " {search}")?;
        }
        if let Some(cycle) = &self.cycle {
            write!(f, " {cycle}")?;
        }
        Ok(())
    }
}

/// Traversal order of a `SEARCH` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SearchOrder {
    /// `BREADTH FIRST`
    BreadthFirst,
    /// `DEPTH FIRST`
    DepthFirst,
}

/// `attribute [ASC|DESC] [NULLS FIRST|LAST]` inside `SEARCH ... BY`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchSpecification {
    /// The CTE attribute.
    pub attribute: Identifier,
    /// Sort direction.
    pub direction: Option<SortDirection>,
    /// Null ordering.
    pub nulls: Option<NullsPrecedence>,
}

impl fmt::Display for SearchSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.attribute.fmt(f)?;
        if let Some(direction) = &self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = &self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// `SEARCH BREADTH|DEPTH FIRST BY spec, ... SET column`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchClause {
    /// Traversal order.
    pub order: SearchOrder,
    /// Sort keys.
    pub specifications: Vec<SearchSpecification>,
    /// Name of the generated ordering column.
    pub set_column: Identifier,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for SearchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order = match self.order {
            SearchOrder::BreadthFirst => "BREADTH",
            SearchOrder::DepthFirst => "DEPTH",
        };
        write!(
            f,
            "SEARCH {order} FIRST BY {} SET {}",
            display_comma_separated(&self.specifications),
            self.set_column
        )
    }
}

/// `CYCLE attrs SET mark [TO cycle DEFAULT noncycle] [USING path]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleClause {
    /// Attributes whose repetition marks a cycle.
    pub attributes: Vec<Identifier>,
    /// Name of the cycle mark column.
    pub mark_column: Identifier,
    /// `TO value DEFAULT value`
    pub mark_values: Option<CycleMarkValues>,
    /// Name of the path column.
    pub using: Option<Identifier>,
    /// Source span.
    pub span: Span,
}

/// The literal pair of `TO ... DEFAULT ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CycleMarkValues {
    /// Mark value for rows that close a cycle.
    pub cycle: Literal,
    /// Mark value for all other rows.
    pub default: Literal,
}

impl fmt::Display for CycleClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CYCLE {} SET {}",
            display_comma_separated(&self.attributes),
            self.mark_column
        )?;
        if let Some(values) = &self.mark_values {
            write!(f, " TO {} DEFAULT {}", values.cycle, values.default)?;
        }
        if let Some(using) = &self.using {
            write!(f, " USING {using}")?;
        }
        Ok(())
    }
}

/// A query, or a parenthesized query expression, with optional ordering
/// and row limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderedQuery {
    /// The query proper.
    pub body: QueryBody,
    /// `ORDER BY` / `LIMIT` / `OFFSET` / `FETCH`
    pub order: Option<QueryOrder>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for OrderedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.body.fmt(f)?;
        if let Some(order) = &self.order {
            write!(f, " {order}")?;
        }
        Ok(())
    }
}

/// The body of an ordered query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QueryBody {
    /// A select-first or from-first query.
    Query(Box<Query>),
    /// `(query expression)`
    Nested(Box<QueryExpression>),
}

impl fmt::Display for QueryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(q) => q.fmt(f),
            Self::Nested(q) => write!(f, "({q})"),
        }
    }
}

/// Clause order of a query in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QueryForm {
    /// `SELECT ... FROM ...`
    SelectFirst,
    /// `FROM ... [SELECT ...]`
    FromFirst,
}

/// A single query block.
///
/// Both clause orders produce this shape. A from-first query without a
/// `SELECT` selects its sole root; resolving that is left to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    /// Clause order.
    pub form: QueryForm,
    /// `SELECT ...`, required in the select-first form.
    pub select: Option<SelectClause>,
    /// `FROM ...`, required in the from-first form.
    pub from: Option<FromClause>,
    /// `WHERE ...`
    pub where_clause: Option<WhereClause>,
    /// `GROUP BY ...`
    pub group_by: Option<GroupByClause>,
    /// `HAVING ...`
    pub having: Option<HavingClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.form == QueryForm::SelectFirst {
            if let Some(select) = &self.select {
                parts.push(select.to_string());
            }
        }
        if let Some(from) = &self.from {
            parts.push(from.to_string());
        }
        if let Some(where_clause) = &self.where_clause {
            parts.push(where_clause.to_string());
        }
        if let Some(group_by) = &self.group_by {
            parts.push(group_by.to_string());
        }
        if let Some(having) = &self.having {
            parts.push(having.to_string());
        }
        if self.form == QueryForm::FromFirst {
            if let Some(select) = &self.select {
                parts.push(select.to_string());
            }
        }
        f.write_str(&parts.join(" "))
    }
}

/// `SELECT [DISTINCT] selection, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SelectClause {
    /// `DISTINCT` was given.
    pub distinct: bool,
    /// The selections, never empty.
    pub selections: Vec<Selection>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for SelectClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        display_comma_separated(&self.selections).fmt(f)
    }
}

/// An alias: `AS name` or a bare `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Variable {
    /// The alias.
    pub name: Identifier,
    /// `AS` was written.
    pub explicit_as: bool,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.explicit_as {
            write!(f, "AS {}", self.name)
        } else {
            self.name.fmt(f)
        }
    }
}

/// Writes ` alias` when present.
pub(crate) fn fmt_variable(f: &mut fmt::Formatter<'_>, variable: Option<&Variable>) -> fmt::Result {
    match variable {
        Some(variable) => write!(f, " {variable}"),
        None => Ok(()),
    }
}

/// One item of the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Selection {
    /// What is selected.
    pub item: SelectExpression,
    /// Optional alias.
    pub variable: Option<Variable>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.item.fmt(f)?;
        fmt_variable(f, self.variable.as_ref())
    }
}

/// The forms a selection can take.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SelectExpression {
    /// `NEW Target(args)`
    Instantiation(Instantiation),
    /// `ENTRY(path)`
    MapEntry(Path),
    /// `OBJECT(alias)`
    Object(Identifier),
    /// Any expression or predicate.
    Expression(ExpressionOrPredicate),
}

impl fmt::Display for SelectExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instantiation(i) => i.fmt(f),
            Self::MapEntry(p) => write!(f, "ENTRY({p})"),
            Self::Object(i) => write!(f, "OBJECT({i})"),
            Self::Expression(e) => e.fmt(f),
        }
    }
}

/// Target of `NEW`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InstantiationTarget {
    /// `NEW LIST(...)`
    List,
    /// `NEW MAP(...)`
    Map,
    /// `NEW com.acme.Dto(...)`
    Class(SimplePath),
}

impl fmt::Display for InstantiationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => f.write_str("LIST"),
            Self::Map => f.write_str("MAP"),
            Self::Class(path) => path.fmt(f),
        }
    }
}

/// `NEW Target(arg [alias], ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instantiation {
    /// The constructed type.
    pub target: InstantiationTarget,
    /// Constructor arguments.
    pub arguments: Vec<InstantiationArgument>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for Instantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NEW {}({})",
            self.target,
            display_comma_separated(&self.arguments)
        )
    }
}

/// The value of a constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InstantiationValue {
    /// Any expression or predicate.
    Expression(ExpressionOrPredicate),
    /// A nested `NEW ...`.
    Instantiation(Instantiation),
}

/// One constructor argument, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstantiationArgument {
    /// The value.
    pub value: InstantiationValue,
    /// Optional alias.
    pub variable: Option<Variable>,
}

impl fmt::Display for InstantiationArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            InstantiationValue::Expression(e) => e.fmt(f)?,
            InstantiationValue::Instantiation(i) => i.fmt(f)?,
        }
        fmt_variable(f, self.variable.as_ref())
    }
}

/// `WHERE predicate, ...`
///
/// A comma-separated list is accepted; consumers treat the predicates as
/// a conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WhereClause {
    /// The predicates, never empty.
    pub predicates: Vec<Predicate>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHERE {}", display_comma_separated(&self.predicates))
    }
}

/// `GROUP BY item, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GroupByClause {
    /// Grouping expressions.
    pub items: Vec<Expression>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for GroupByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GROUP BY {}", display_comma_separated(&self.items))
    }
}

/// `HAVING predicate, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HavingClause {
    /// The predicates, never empty.
    pub predicates: Vec<Predicate>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for HavingClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HAVING {}", display_comma_separated(&self.predicates))
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NullsPrecedence {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullsPrecedence {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortedItem {
    /// The expression to order by.
    pub expression: Expression,
    /// The direction, if written.
    pub direction: Option<SortDirection>,
    /// Null ordering, if written.
    pub nulls: Option<NullsPrecedence>,
}

impl fmt::Display for SortedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expression.fmt(f)?;
        if let Some(direction) = &self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = &self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// `ORDER BY item, ...`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OrderByClause {
    /// Sort keys, never empty.
    pub items: Vec<SortedItem>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for OrderByClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ORDER BY {}", display_comma_separated(&self.items))
    }
}

/// A row count: a parameter or a number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RowCount {
    /// A parameter.
    Parameter(Parameter),
    /// A numeric literal.
    Number(NumericLiteral),
}

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(p) => p.fmt(f),
            Self::Number(n) => n.fmt(f),
        }
    }
}

/// `ROW` or `ROWS`, as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RowsKeyword {
    /// `ROW`
    Row,
    /// `ROWS`
    Rows,
}

impl RowsKeyword {
    /// Returns the HQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "ROW",
            Self::Rows => "ROWS",
        }
    }
}

/// `FETCH FIRST` or `FETCH NEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FetchPosition {
    /// `FIRST`
    First,
    /// `NEXT`
    Next,
}

/// `ONLY` or `WITH TIES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FetchMode {
    /// `ONLY`
    Only,
    /// `WITH TIES`
    WithTies,
}

/// `FETCH FIRST|NEXT count [%] ROW|ROWS ONLY|WITH TIES`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FetchClause {
    /// `FIRST` or `NEXT`.
    pub position: FetchPosition,
    /// Row count or percentage.
    pub count: RowCount,
    /// The count is a percentage.
    pub percent: bool,
    /// `ROW` or `ROWS`.
    pub rows: RowsKeyword,
    /// `ONLY` or `WITH TIES`.
    pub mode: FetchMode,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for FetchClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = match self.position {
            FetchPosition::First => "FIRST",
            FetchPosition::Next => "NEXT",
        };
        write!(f, "FETCH {position} {}", self.count)?;
        if self.percent {
            f.write_str(" %")?;
        }
        let mode = match self.mode {
            FetchMode::Only => "ONLY",
            FetchMode::WithTies => "WITH TIES",
        };
        write!(f, " {} {mode}", self.rows.as_str())
    }
}

/// `ORDER BY`, `LIMIT`, `OFFSET` and `FETCH` trailing a query.
///
/// At least one part is present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueryOrder {
    /// `ORDER BY ...`
    pub order_by: Option<OrderByClause>,
    /// `LIMIT n`
    pub limit: Option<RowCount>,
    /// `OFFSET n [ROW|ROWS]`
    pub offset: Option<(RowCount, Option<RowsKeyword>)>,
    /// `FETCH ...`
    pub fetch: Option<FetchClause>,
    /// Source span.
    pub span: Span,
}

impl fmt::Display for QueryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if let Some(order_by) = &self.order_by {
            parts.push(order_by.to_string());
        }
        if let Some(limit) = &self.limit {
            parts.push(format!("LIMIT {limit}"));
        }
        if let Some((offset, rows)) = &self.offset {
            match rows {
                Some(rows) => parts.push(format!("OFFSET {offset} {}", rows.as_str())),
                None => parts.push(format!("OFFSET {offset}")),
            }
        }
        if let Some(fetch) = &self.fetch {
            parts.push(fetch.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}
