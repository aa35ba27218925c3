//! Recursive AST traversal.
//!
//! [`Visit`] walks a tree depth first and reports statements, queries,
//! expressions, predicates, paths and functions to a [`Visitor`]. Every
//! hook returns [`ControlFlow`], so a visitor can stop the walk early and
//! hand a value back through [`ControlFlow::Break`].
//!
//! ```
//! use std::ops::ControlFlow;
//! use oxide_hql_core::ast::visit_paths;
//!
//! let statement = oxide_hql_core::parse("SELECT e.name FROM Employee e WHERE e.age > 30").unwrap();
//! let mut paths = Vec::new();
//! let _ = visit_paths(&statement, |path| {
//!     paths.push(path.to_string());
//!     ControlFlow::<()>::Continue(())
//! });
//! assert_eq!(paths, ["e.name", "e.age"]);
//! ```

use std::ops::ControlFlow;

use super::{
    Assignment, CaseExpression, CastFunction, CollectionJoin, CrossJoin, Cte, DeleteStatement,
    EntityWithJoins, Expression, ExpressionOrPredicate, ExtractField, ExtractFunction, FetchClause,
    FrameBound, FrameClause, FromClause, FromRoot, Function, FunctionArguments, GeneralPath,
    GenericFunction, GroupByClause, HavingClause, InList, InsertSource, InsertStatement,
    Instantiation, InstantiationArgument, InstantiationValue, Join, JoinRestriction,
    JoinSpecifier, JoinTarget, OrderByClause, OrderedQuery, OverClause, Parameter, Path, Predicate,
    QuantifiedArgument, QuantifiedFunction, Query, QueryBody, QueryExpression, QueryOrder,
    RowCount, SelectClause, SelectExpression, Selection, SortedItem, Statement, TrimFunction,
    UpdateStatement, ValuesRow, WhereClause, WithClause,
};

/// A type that can be walked by a [`Visitor`].
pub trait Visit {
    /// Walks `self` and its children, calling the visitor's hooks.
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break>;
}

impl<T: Visit> Visit for Option<T> {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        if let Some(s) = self {
            s.visit(visitor)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T: Visit> Visit for Vec<T> {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        for v in self {
            v.visit(visitor)?;
        }
        ControlFlow::Continue(())
    }
}

impl<T: Visit> Visit for Box<T> {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        T::visit(self, visitor)
    }
}

/// Hooks called while walking a tree.
///
/// All hooks default to doing nothing. `pre_*` hooks run before the node's
/// children are visited, `post_*` hooks after.
pub trait Visitor {
    /// Value returned when the walk stops early.
    type Break;

    /// Called before visiting a statement.
    fn pre_visit_statement(&mut self, _statement: &Statement) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting a statement.
    fn post_visit_statement(&mut self, _statement: &Statement) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called before visiting a query expression, including subqueries.
    fn pre_visit_query(&mut self, _query: &QueryExpression) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting a query expression.
    fn post_visit_query(&mut self, _query: &QueryExpression) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called before visiting an expression.
    fn pre_visit_expression(&mut self, _expression: &Expression) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting an expression.
    fn post_visit_expression(&mut self, _expression: &Expression) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called before visiting a predicate.
    fn pre_visit_predicate(&mut self, _predicate: &Predicate) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting a predicate.
    fn post_visit_predicate(&mut self, _predicate: &Predicate) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called before visiting a path.
    fn pre_visit_path(&mut self, _path: &Path) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting a path.
    fn post_visit_path(&mut self, _path: &Path) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called before visiting a function call.
    fn pre_visit_function(&mut self, _function: &Function) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }

    /// Called after visiting a function call.
    fn post_visit_function(&mut self, _function: &Function) -> ControlFlow<Self::Break> {
        ControlFlow::Continue(())
    }
}

impl Visit for Statement {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_statement(self)?;
        match self {
            Self::Select(query) => query.visit(visitor)?,
            Self::Update(update) => update.visit(visitor)?,
            Self::Delete(delete) => delete.visit(visitor)?,
            Self::Insert(insert) => insert.visit(visitor)?,
        }
        visitor.post_visit_statement(self)
    }
}

impl Visit for UpdateStatement {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.assignments.visit(visitor)?;
        self.where_clause.visit(visitor)
    }
}

impl Visit for Assignment {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.value.visit(visitor)
    }
}

impl Visit for DeleteStatement {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.where_clause.visit(visitor)
    }
}

impl Visit for InsertStatement {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match &self.source {
            InsertSource::Query(query) => query.visit(visitor),
            InsertSource::Values(rows) => rows.visit(visitor),
        }
    }
}

impl Visit for ValuesRow {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.values.visit(visitor)
    }
}

impl Visit for QueryExpression {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_query(self)?;
        self.with.visit(visitor)?;
        for query in self.queries() {
            query.visit(visitor)?;
        }
        visitor.post_visit_query(self)
    }
}

impl Visit for WithClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.ctes.visit(visitor)
    }
}

impl Visit for Cte {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.query.visit(visitor)
    }
}

impl Visit for OrderedQuery {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match &self.body {
            QueryBody::Query(query) => query.visit(visitor)?,
            QueryBody::Nested(query) => query.visit(visitor)?,
        }
        self.order.visit(visitor)
    }
}

impl Visit for QueryOrder {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.order_by.visit(visitor)?;
        self.limit.visit(visitor)?;
        if let Some((offset, _)) = &self.offset {
            offset.visit(visitor)?;
        }
        self.fetch.visit(visitor)
    }
}

impl Visit for RowCount {
    fn visit<V: Visitor>(&self, _visitor: &mut V) -> ControlFlow<V::Break> {
        ControlFlow::Continue(())
    }
}

impl Visit for FetchClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.count.visit(visitor)
    }
}

impl Visit for OrderByClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.items.visit(visitor)
    }
}

impl Visit for SortedItem {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.expression.visit(visitor)
    }
}

impl Visit for Query {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.select.visit(visitor)?;
        self.from.visit(visitor)?;
        self.where_clause.visit(visitor)?;
        self.group_by.visit(visitor)?;
        self.having.visit(visitor)
    }
}

impl Visit for SelectClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.selections.visit(visitor)
    }
}

impl Visit for Selection {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match &self.item {
            SelectExpression::Instantiation(instantiation) => instantiation.visit(visitor),
            SelectExpression::MapEntry(path) => path.visit(visitor),
            SelectExpression::Object(_) => ControlFlow::Continue(()),
            SelectExpression::Expression(e) => e.visit(visitor),
        }
    }
}

impl Visit for Instantiation {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.arguments.visit(visitor)
    }
}

impl Visit for InstantiationArgument {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match &self.value {
            InstantiationValue::Expression(e) => e.visit(visitor),
            InstantiationValue::Instantiation(i) => i.visit(visitor),
        }
    }
}

impl Visit for WhereClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.predicates.visit(visitor)
    }
}

impl Visit for GroupByClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.items.visit(visitor)
    }
}

impl Visit for HavingClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.predicates.visit(visitor)
    }
}

impl Visit for FromClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.roots.visit(visitor)
    }
}

impl Visit for EntityWithJoins {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.root.visit(visitor)?;
        self.joins.visit(visitor)
    }
}

impl Visit for FromRoot {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Entity { .. } => ControlFlow::Continue(()),
            Self::Subquery { query, .. } => query.visit(visitor),
        }
    }
}

impl Visit for JoinSpecifier {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Join(join) => join.visit(visitor),
            Self::Cross(cross) => cross.visit(visitor),
            Self::Collection(collection) => collection.visit(visitor),
        }
    }
}

impl Visit for Join {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.target.visit(visitor)?;
        self.restriction.visit(visitor)
    }
}

impl Visit for JoinTarget {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Path { path, .. } => path.visit(visitor),
            Self::Subquery { query, .. } => query.visit(visitor),
        }
    }
}

impl Visit for JoinRestriction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.predicate.visit(visitor)
    }
}

impl Visit for CrossJoin {
    fn visit<V: Visitor>(&self, _visitor: &mut V) -> ControlFlow<V::Break> {
        ControlFlow::Continue(())
    }
}

impl Visit for CollectionJoin {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.path.visit(visitor)
    }
}

impl Visit for ExpressionOrPredicate {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Expression(e) => e.visit(visitor),
            Self::Predicate(p) => p.visit(visitor),
        }
    }
}

impl Visit for Expression {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_expression(self)?;
        match self {
            Self::Binary { left, right, .. } => {
                left.visit(visitor)?;
                right.visit(visitor)?;
            }
            Self::Signed { operand, .. } => operand.visit(visitor)?,
            Self::Tuple { elements, .. } => elements.visit(visitor)?,
            Self::Grouped { inner, .. } => inner.visit(visitor)?,
            Self::Subquery { query, .. } => query.visit(visitor)?,
            Self::ToDuration { expression, .. } | Self::FromDuration { expression, .. } => {
                expression.visit(visitor)?;
            }
            Self::Case(case) => case.visit(visitor)?,
            Self::Parameter(parameter) => parameter.visit(visitor)?,
            Self::Function(function) => function.visit(visitor)?,
            Self::Path(path) => path.visit(visitor)?,
            Self::SignedNumericLiteral { .. }
            | Self::DayOfWeek { .. }
            | Self::DayOfMonth { .. }
            | Self::WeekOfYear { .. }
            | Self::Literal { .. } => {}
        }
        visitor.post_visit_expression(self)
    }
}

impl Visit for Parameter {
    fn visit<V: Visitor>(&self, _visitor: &mut V) -> ControlFlow<V::Break> {
        ControlFlow::Continue(())
    }
}

impl Visit for CaseExpression {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Simple {
                operand,
                when_clauses,
                ..
            } => {
                operand.visit(visitor)?;
                for when in when_clauses {
                    when.when.visit(visitor)?;
                    when.then.visit(visitor)?;
                }
            }
            Self::Searched { when_clauses, .. } => {
                for when in when_clauses {
                    when.when.visit(visitor)?;
                    when.then.visit(visitor)?;
                }
            }
        }
        if let Some(else_result) = self.else_result() {
            else_result.visit(visitor)?;
        }
        ControlFlow::Continue(())
    }
}

impl Visit for Predicate {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_predicate(self)?;
        match self {
            Self::Grouped { inner, .. } | Self::Not { inner, .. } => inner.visit(visitor)?,
            Self::And { left, right, .. } | Self::Or { left, right, .. } => {
                left.visit(visitor)?;
                right.visit(visitor)?;
            }
            Self::IsNull { expression, .. }
            | Self::IsEmpty { expression, .. }
            | Self::Exists { expression, .. } => expression.visit(visitor)?,
            Self::IsDistinctFrom { left, right, .. } | Self::Relational { left, right, .. } => {
                left.visit(visitor)?;
                right.visit(visitor)?;
            }
            Self::Between {
                expression,
                low,
                high,
                ..
            } => {
                expression.visit(visitor)?;
                low.visit(visitor)?;
                high.visit(visitor)?;
            }
            Self::Like {
                expression,
                pattern,
                ..
            } => {
                expression.visit(visitor)?;
                pattern.visit(visitor)?;
            }
            Self::ExistsCollection { .. } => {}
            Self::In {
                expression, list, ..
            } => {
                expression.visit(visitor)?;
                list.visit(visitor)?;
            }
            Self::MemberOf {
                expression,
                collection,
                ..
            } => {
                expression.visit(visitor)?;
                collection.visit(visitor)?;
            }
            Self::Expression(expression) => expression.visit(visitor)?,
        }
        visitor.post_visit_predicate(self)
    }
}

impl Visit for InList {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Collection { .. } | Self::Parameter(_) => ControlFlow::Continue(()),
            Self::Subquery(query) => query.visit(visitor),
            Self::List(items) => items.visit(visitor),
        }
    }
}

impl Visit for Path {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_path(self)?;
        match self {
            Self::General(general) => general.visit(visitor)?,
            Self::Treated(treated) => treated.path.visit(visitor)?,
        }
        visitor.post_visit_path(self)
    }
}

impl Visit for GeneralPath {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        if let Some(index) = &self.index {
            index.index.visit(visitor)?;
            index.continuation.visit(visitor)?;
        }
        ControlFlow::Continue(())
    }
}

impl Visit for Function {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        visitor.pre_visit_function(self)?;
        match self {
            Self::Generic(generic) => generic.visit(visitor)?,
            Self::WithSubquery { query, .. } => query.visit(visitor)?,
            Self::Cast(cast) => cast.visit(visitor)?,
            Self::Extract(extract) => extract.visit(visitor)?,
            Self::Trim(trim) => trim.visit(visitor)?,
            Self::Quantified(quantified) => quantified.visit(visitor)?,
        }
        visitor.post_visit_function(self)
    }
}

impl Visit for GenericFunction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        if let FunctionArguments::List { args, .. } = &self.arguments {
            args.visit(visitor)?;
        }
        self.filter.visit(visitor)?;
        self.within_group.visit(visitor)?;
        self.over.visit(visitor)
    }
}

impl Visit for OverClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.partition_by.visit(visitor)?;
        self.order_by.visit(visitor)?;
        self.frame.visit(visitor)
    }
}

impl Visit for FrameClause {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.start.visit(visitor)?;
        self.end.visit(visitor)
    }
}

impl Visit for FrameBound {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match self {
            Self::Preceding(e) | Self::Following(e) => e.visit(visitor),
            Self::UnboundedPreceding | Self::CurrentRow | Self::UnboundedFollowing => {
                ControlFlow::Continue(())
            }
        }
    }
}

impl Visit for CastFunction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.expression.visit(visitor)
    }
}

impl Visit for ExtractFunction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        if let ExtractField::Expression(field) = &self.field {
            field.visit(visitor)?;
        }
        self.source.visit(visitor)
    }
}

impl Visit for TrimFunction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        self.source.visit(visitor)
    }
}

impl Visit for QuantifiedFunction {
    fn visit<V: Visitor>(&self, visitor: &mut V) -> ControlFlow<V::Break> {
        match &self.argument {
            QuantifiedArgument::Predicate(p) => p.visit(visitor),
            QuantifiedArgument::Subquery(q) => q.visit(visitor),
            QuantifiedArgument::Collection { .. } => ControlFlow::Continue(()),
        }
    }
}

struct ExpressionVisitor<F>(F);

impl<E, F: FnMut(&Expression) -> ControlFlow<E>> Visitor for ExpressionVisitor<F> {
    type Break = E;

    fn pre_visit_expression(&mut self, expression: &Expression) -> ControlFlow<Self::Break> {
        self.0(expression)
    }
}

/// Invokes `f` on every expression in `v`, outermost first.
pub fn visit_expressions<V, E, F>(v: &V, f: F) -> ControlFlow<E>
where
    V: Visit,
    F: FnMut(&Expression) -> ControlFlow<E>,
{
    let mut visitor = ExpressionVisitor(f);
    v.visit(&mut visitor)?;
    ControlFlow::Continue(())
}

struct PredicateVisitor<F>(F);

impl<E, F: FnMut(&Predicate) -> ControlFlow<E>> Visitor for PredicateVisitor<F> {
    type Break = E;

    fn pre_visit_predicate(&mut self, predicate: &Predicate) -> ControlFlow<Self::Break> {
        self.0(predicate)
    }
}

/// Invokes `f` on every predicate in `v`, outermost first.
pub fn visit_predicates<V, E, F>(v: &V, f: F) -> ControlFlow<E>
where
    V: Visit,
    F: FnMut(&Predicate) -> ControlFlow<E>,
{
    let mut visitor = PredicateVisitor(f);
    v.visit(&mut visitor)?;
    ControlFlow::Continue(())
}

struct PathVisitor<F>(F);

impl<E, F: FnMut(&Path) -> ControlFlow<E>> Visitor for PathVisitor<F> {
    type Break = E;

    fn pre_visit_path(&mut self, path: &Path) -> ControlFlow<Self::Break> {
        self.0(path)
    }
}

/// Invokes `f` on every path in `v`, in source order.
pub fn visit_paths<V, E, F>(v: &V, f: F) -> ControlFlow<E>
where
    V: Visit,
    F: FnMut(&Path) -> ControlFlow<E>,
{
    let mut visitor = PathVisitor(f);
    v.visit(&mut visitor)?;
    ControlFlow::Continue(())
}
