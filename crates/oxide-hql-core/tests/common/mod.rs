#![allow(dead_code)]

use oxide_hql_core::ast::{
    DeleteStatement, Expression, ExpressionOrPredicate, InsertStatement, Predicate, Query,
    QueryBody, QueryExpression, SelectExpression, Statement, UpdateStatement,
};
use oxide_hql_core::{ParseError, Parser};

pub fn parse(hql: &str) -> Statement {
    Parser::new(hql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {hql}\nError: {e}"))
}

pub fn parse_err(hql: &str) -> ParseError {
    Parser::new(hql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {hql}"))
}

pub fn parse_query_expression(hql: &str) -> QueryExpression {
    match parse(hql) {
        Statement::Select(q) => q,
        other => panic!("Expected query, got {other:?}"),
    }
}

/// Parses a single query without set operations or nesting.
pub fn parse_select(hql: &str) -> Query {
    let query = parse_query_expression(hql);
    assert!(query.rest.is_empty(), "Unexpected set operation in {hql}");
    match query.first.body {
        QueryBody::Query(q) => *q,
        QueryBody::Nested(_) => panic!("Expected plain query: {hql}"),
    }
}

pub fn parse_insert(hql: &str) -> InsertStatement {
    match parse(hql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(hql: &str) -> UpdateStatement {
    match parse(hql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(hql: &str) -> DeleteStatement {
    match parse(hql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Parses `SELECT <expr> FROM E e` and returns the selected expression.
pub fn parse_selected_expression(expr: &str) -> Expression {
    let hql = format!("SELECT {expr} FROM E e");
    let select = parse_select(&hql).select.expect("select clause");
    match select.selections.into_iter().next().map(|s| s.item) {
        Some(SelectExpression::Expression(ExpressionOrPredicate::Expression(e))) => e,
        other => panic!("Expected expression in {hql}, got {other:?}"),
    }
}

/// Parses `FROM E e WHERE <predicate>` and returns the single predicate.
pub fn parse_where(predicate: &str) -> Predicate {
    let hql = format!("FROM E e WHERE {predicate}");
    let mut predicates = parse_select(&hql)
        .where_clause
        .expect("where clause")
        .predicates;
    assert_eq!(predicates.len(), 1, "Expected one predicate in {hql}");
    predicates.remove(0)
}

/// Verifies that `to_string()` produces a fixed point: the rendered text
/// parses back to an equal tree and renders to the same string again.
pub fn round_trip(hql: &str) {
    let ast1 = parse(hql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        ast1, ast2,
        "Round-trip changed the tree.\n  Input:    {hql}\n  Rendered: {rendered1}"
    );
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {hql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}
