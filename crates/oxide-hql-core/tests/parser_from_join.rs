//! Tests for FROM roots and the join forms.

mod common;
use common::*;

use oxide_hql_core::ast::{
    FromClause, FromRoot, JoinKind, JoinSpecifier, JoinTarget, Path, RestrictionKeyword,
};

fn from_clause(hql: &str) -> FromClause {
    parse_select(hql).from.expect("from clause")
}

fn first_join(hql: &str) -> oxide_hql_core::ast::Join {
    let mut from = from_clause(hql);
    match from.roots.remove(0).joins.remove(0) {
        JoinSpecifier::Join(join) => join,
        other => panic!("Expected regular join, got {other:?}"),
    }
}

// ===================================================================
// Roots
// ===================================================================

#[test]
fn qualified_entity_name() {
    let from = from_clause("SELECT e FROM com.acme.model.Employee e");
    let FromRoot::Entity { name, .. } = &from.roots[0].root else {
        panic!("Expected entity");
    };
    assert_eq!(name.segments.len(), 4);
}

#[test]
fn keyword_entity_name() {
    let from = from_clause("SELECT o FROM Order o");
    let FromRoot::Entity { name, variable, .. } = &from.roots[0].root else {
        panic!("Expected entity");
    };
    assert_eq!(name.to_string(), "Order");
    assert_eq!(variable.as_ref().unwrap().name.value, "o");
}

#[test]
fn several_roots() {
    let from = from_clause("SELECT e, d FROM Employee e, Department d WHERE e.dept = d");
    assert_eq!(from.roots.len(), 2);
}

#[test]
fn lateral_subquery_root() {
    let from = from_clause("SELECT x FROM Employee e, LATERAL (SELECT p FROM e.projects p) x");
    assert!(matches!(
        from.roots[1].root,
        FromRoot::Subquery { lateral: true, .. }
    ));
}

// ===================================================================
// Joins
// ===================================================================

#[test]
fn left_outer_join_fetch() {
    let join = first_join("SELECT e FROM Employee e LEFT OUTER JOIN FETCH e.projects p");
    assert_eq!(join.join_type.kind, JoinKind::Left);
    assert!(join.join_type.outer);
    assert!(join.join_type.is_outer());
    assert!(join.fetch);
    assert!(join.restriction.is_none());
}

#[test]
fn bare_outer_join_is_accepted() {
    let join = first_join("SELECT e FROM Employee e OUTER JOIN e.manager m");
    assert_eq!(join.join_type.kind, JoinKind::Unspecified);
    assert!(join.join_type.outer);
}

#[test]
fn join_on_and_with() {
    let join = first_join("SELECT e FROM Employee e JOIN Department d ON d.id = e.deptId");
    assert_eq!(join.restriction.unwrap().keyword, RestrictionKeyword::On);

    let join = first_join("SELECT e FROM Employee e INNER JOIN e.phones ph WITH ph.kind = 'mobile'");
    assert_eq!(join.join_type.kind, JoinKind::Inner);
    assert_eq!(join.restriction.unwrap().keyword, RestrictionKeyword::With);
}

#[test]
fn join_target_with_index() {
    let join = first_join("SELECT e FROM Employee e JOIN e.addresses[0].city c");
    let JoinTarget::Path { path, .. } = &join.target else {
        panic!("Expected path target");
    };
    let Path::General(general) = path else {
        panic!("Expected general path");
    };
    assert!(general.index.is_some());
    assert_eq!(path.to_string(), "e.addresses[0].city");
}

#[test]
fn treated_join_target() {
    let join = first_join("SELECT e FROM Employee e JOIN TREAT(e.vehicle AS Car) c");
    let JoinTarget::Path { path, .. } = &join.target else {
        panic!("Expected path target");
    };
    assert!(matches!(path, Path::Treated(_)));
}

#[test]
fn subquery_join_target() {
    let join = first_join(
        "SELECT e FROM Employee e LEFT JOIN (SELECT p.owner o FROM Project p) x ON x.o = e",
    );
    assert!(matches!(join.target, JoinTarget::Subquery { lateral: false, .. }));
}

#[test]
fn joins_chain_on_one_root() {
    let from = from_clause(
        "SELECT e FROM Employee e JOIN e.dept d LEFT JOIN d.site s CROSS JOIN Region r, IN(e.phones) ph",
    );
    let joins = &from.roots[0].joins;
    assert_eq!(joins.len(), 4);
    assert!(matches!(joins[2], JoinSpecifier::Cross(_)));
    assert!(matches!(joins[3], JoinSpecifier::Collection(_)));
}

#[test]
fn cross_join_lateral() {
    let join = first_join("SELECT e FROM Employee e CROSS JOIN LATERAL (SELECT 1) x");
    assert_eq!(join.join_type.kind, JoinKind::Cross);
    assert!(matches!(join.target, JoinTarget::Subquery { lateral: true, .. }));
}

#[test]
fn join_requires_target() {
    let err = parse_err("SELECT e FROM Employee e JOIN ON e.id = 1");
    assert_eq!(err.found.as_deref(), Some("ON"));
}

// ===================================================================
// Round trips
// ===================================================================

#[test]
fn round_trip_from_clauses() {
    round_trip("SELECT e FROM Employee AS e LEFT OUTER JOIN FETCH e.projects p WITH p.active = TRUE");
    round_trip("SELECT e FROM Employee e RIGHT JOIN Department d ON d = e.dept, Site s");
    round_trip("SELECT e FROM Employee e CROSS JOIN Region r, IN(e.phones) ph");
    round_trip("SELECT e FROM Employee e JOIN LATERAL (SELECT p FROM e.projects p) x ON TRUE");
    round_trip("SELECT e FROM Employee e CROSS JOIN (SELECT 1) x FULL JOIN TREAT(e.v AS Car) c");
    round_trip("SELECT e FROM Employee e OUTER JOIN e.m m JOIN e.addresses[0].city c");
}
