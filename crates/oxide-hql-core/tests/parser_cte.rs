//! Tests for WITH clauses: CTE lists, materialization, SEARCH and CYCLE.

mod common;
use common::*;

use oxide_hql_core::ast::{
    CteMaterialization, FromRoot, Literal, NullsPrecedence, QueryBody, SearchOrder,
    SortDirection,
};

#[test]
fn single_cte() {
    let query = parse_query_expression("WITH c AS (SELECT e FROM Employee e) SELECT x FROM c x");
    let with = query.with.as_ref().unwrap();
    assert_eq!(with.ctes.len(), 1);
    assert_eq!(with.ctes[0].name.value, "c");
    assert_eq!(with.ctes[0].materialization, CteMaterialization::Unspecified);

    let QueryBody::Query(outer) = &query.first.body else {
        panic!("Expected plain outer query");
    };
    let root = &outer.from.as_ref().unwrap().roots[0].root;
    assert!(matches!(root, FromRoot::Entity { name, .. } if name.to_string() == "c"));
}

#[test]
fn cte_list_with_materialization() {
    let query = parse_query_expression(
        "WITH a AS MATERIALIZED (SELECT 1), b AS NOT MATERIALIZED (FROM B) SELECT x FROM a x",
    );
    let ctes = &query.with.unwrap().ctes;
    assert_eq!(ctes[0].materialization, CteMaterialization::Materialized);
    assert_eq!(ctes[1].materialization, CteMaterialization::NotMaterialized);
}

#[test]
fn recursive_cte_with_union() {
    let query = parse_query_expression(
        "WITH tree AS (SELECT n.id id, n.parent parent FROM Node n WHERE n.parent IS NULL \
         UNION ALL SELECT c.id, c.parent FROM Node c JOIN tree t ON c.parent = t.id) \
         SELECT t.id FROM tree t",
    );
    let cte = &query.with.unwrap().ctes[0];
    assert_eq!(cte.query.rest.len(), 1);
    assert!(cte.query.rest[0].operator.all);
}

#[test]
fn search_clause() {
    let query = parse_query_expression(
        "WITH t AS (SELECT n FROM Node n) SEARCH BREADTH FIRST BY id ASC NULLS LAST, name SET seq \
         SELECT x FROM t x",
    );
    let search = query.with.unwrap().ctes.remove(0).search.unwrap();
    assert_eq!(search.order, SearchOrder::BreadthFirst);
    assert_eq!(search.specifications.len(), 2);
    assert_eq!(search.specifications[0].direction, Some(SortDirection::Asc));
    assert_eq!(search.specifications[0].nulls, Some(NullsPrecedence::Last));
    assert_eq!(search.set_column.value, "seq");
}

#[test]
fn cycle_clause() {
    let query = parse_query_expression(
        "WITH t AS (SELECT n FROM Node n) CYCLE id, parent SET looped TO 'Y' DEFAULT 'N' USING path \
         SELECT x FROM t x",
    );
    let cycle = query.with.unwrap().ctes.remove(0).cycle.unwrap();
    assert_eq!(cycle.attributes.len(), 2);
    assert_eq!(cycle.mark_column.value, "looped");
    let values = cycle.mark_values.unwrap();
    assert!(matches!(values.cycle, Literal::String(ref s) if s.value == "Y"));
    assert!(matches!(values.default, Literal::String(ref s) if s.value == "N"));
    assert_eq!(cycle.using.unwrap().value, "path");
}

#[test]
fn cycle_without_mark_values() {
    let query = parse_query_expression(
        "WITH t AS (SELECT n FROM Node n) CYCLE id SET looped SELECT x FROM t x",
    );
    let cycle = query.with.unwrap().ctes.remove(0).cycle.unwrap();
    assert!(cycle.mark_values.is_none());
    assert!(cycle.using.is_none());
}

#[test]
fn cte_requires_parenthesized_query() {
    let err = parse_err("WITH c AS SELECT 1 SELECT x FROM c x");
    assert!(err.expected.contains("'('"));
}

#[test]
fn search_requires_breadth_or_depth() {
    let err = parse_err("WITH t AS (SELECT 1) SEARCH WIDTH FIRST BY id SET s SELECT x FROM t x");
    assert!(err.expected.contains("BREADTH or DEPTH"));
}

#[test]
fn round_trip_ctes() {
    round_trip("WITH c AS (SELECT e FROM Employee e) SELECT x FROM c x");
    round_trip(
        "WITH a AS MATERIALIZED (SELECT 1), b AS NOT MATERIALIZED (FROM B) SELECT x FROM a x",
    );
    round_trip(
        "WITH t AS (SELECT n FROM Node n) SEARCH DEPTH FIRST BY id DESC SET seq \
         CYCLE id SET looped TO TRUE DEFAULT FALSE USING trail SELECT x FROM t x",
    );
}
