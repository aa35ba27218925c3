//! Abstract Syntax Tree (AST) types for HQL statements.
//!
//! Every node carries a [`Span`](crate::lexer::Span). Spans are ignored by
//! `==`, so two trees compare equal when they have the same structure,
//! whatever their source positions. Every node implements `Display`,
//! rendering canonical HQL that parses back to an equal tree.

mod expression;
mod from;
mod function;
mod literal;
mod path;
mod predicate;
mod query;
mod statement;
mod visitor;

use std::fmt;

pub use expression::{
    BinaryOperator, CaseExpression, DatetimeField, Expression, ExpressionOrPredicate,
    LikeWildcards, Parameter, ParameterKind, ParameterPrefix, SearchedWhen, Sign, SimpleWhen,
};
pub use from::{
    CollectionJoin, CrossJoin, EntityWithJoins, FromClause, FromRoot, Join, JoinKind,
    JoinRestriction, JoinSpecifier, JoinTarget, JoinType, RestrictionKeyword,
};
pub use function::{
    CastFunction, ExtractField, ExtractFunction, FrameBound, FrameClause, FrameExclusion,
    FrameMode, Function, FunctionArguments, GenericFunction, OverClause, QuantifiedArgument,
    QuantifiedFunction, Quantifier, TrimFunction, TrimSpecification,
};
pub use literal::{
    BinaryLiteral, DateTimeLiteral, DateTimeScope, Literal, NumericKind, NumericLiteral,
    StringLiteral, StringStyle,
};
pub use path::{GeneralPath, Identifier, IdentifierStyle, IndexedAccess, Path, SimplePath, TreatedPath};
pub use predicate::{CollectionFunction, InList, LikeEscape, Predicate, RelationalOperator};
pub use query::{
    Cte, CteMaterialization, CycleClause, CycleMarkValues, FetchClause, FetchMode, FetchPosition,
    GroupByClause, HavingClause, Instantiation, InstantiationArgument, InstantiationTarget,
    InstantiationValue, NullsPrecedence, OrderByClause, OrderedQuery, Query, QueryBody,
    QueryExpression, QueryForm, QueryOrder, RowCount, RowsKeyword, SearchClause, SearchOrder,
    SearchSpecification, SelectClause, SelectExpression, Selection, SetOperation, SetOperator,
    SetOperatorKind, SortDirection, SortedItem, Variable, WhereClause, WithClause,
};
pub use statement::{
    Assignment, DeleteStatement, InsertSource, InsertStatement, Statement, TargetEntity,
    UpdateStatement, ValuesRow,
};
pub use visitor::{visit_expressions, visit_paths, visit_predicates, Visit, Visitor};

struct DisplaySeparated<'a, T> {
    items: &'a [T],
    separator: &'static str,
}

impl<T: fmt::Display> fmt::Display for DisplaySeparated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(self.separator)?;
            }
            item.fmt(f)?;
        }
        Ok(())
    }
}

/// Displays `items` joined by `", "`.
pub(crate) fn display_comma_separated<T: fmt::Display>(items: &[T]) -> impl fmt::Display + '_ {
    DisplaySeparated {
        items,
        separator: ", ",
    }
}
