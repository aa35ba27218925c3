//! Tests for AST traversal.

mod common;
use common::*;

use std::ops::ControlFlow;

use oxide_hql_core::ast::{
    visit_expressions, visit_paths, visit_predicates, Expression, Function, QueryExpression,
    Statement, Visit, Visitor,
};

fn paths(hql: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let _ = visit_paths(&parse(hql), |path| {
        paths.push(path.to_string());
        ControlFlow::<()>::Continue(())
    });
    paths
}

#[test]
fn paths_in_source_order() {
    assert_eq!(
        paths(
            "SELECT e.name, upper(e.title) FROM Employee e JOIN e.dept d ON d.open = true \
             WHERE e.age > 30 ORDER BY e.hired"
        ),
        ["e.name", "e.title", "e.dept", "d.open", "e.age", "e.hired"]
    );
}

#[test]
fn paths_inside_ctes_and_subquery_joins() {
    assert_eq!(
        paths(
            "WITH c AS (SELECT x.a FROM X x) \
             SELECT c.a FROM c JOIN (SELECT y.b FROM Y y) z ON z.b = c.a"
        ),
        ["x.a", "c.a", "y.b", "z.b", "c.a"]
    );
}

#[test]
fn paths_in_dml() {
    assert_eq!(
        paths("UPDATE Employee e SET e.a = e.b + 1 WHERE e.id = :id"),
        ["e.b", "e.id"]
    );
    assert_eq!(paths("DELETE FROM Employee e WHERE e.gone"), ["e.gone"]);
}

#[test]
fn predicates_outermost_first() {
    let statement = parse("FROM E e WHERE e.a = 1 AND (e.b IS NULL OR e.c NOT LIKE 'x%')");
    let mut kinds = Vec::new();
    let _ = visit_predicates(&statement, |predicate| {
        kinds.push(predicate.kind_name());
        ControlFlow::<()>::Continue(())
    });
    assert_eq!(
        kinds,
        ["And", "Relational", "Grouped", "Or", "IsNull", "Like"]
    );
}

#[test]
fn parameters_through_expressions() {
    let statement = parse("FROM E e WHERE e.a = :a AND e.b IN (?1, ?2)");
    let mut parameters = Vec::new();
    let _ = visit_expressions(&statement, |expression| {
        if let Expression::Parameter(parameter) = expression {
            parameters.push(parameter.to_string());
        }
        ControlFlow::<()>::Continue(())
    });
    assert_eq!(parameters, [":a", "?1", "?2"]);
}

#[test]
fn break_stops_the_walk() {
    let statement = parse("SELECT e FROM E e WHERE e.x > (SELECT max(y.x) FROM Y y) AND e.z = 1");
    let mut seen = 0;
    let flow = visit_expressions(&statement, |expression| {
        seen += 1;
        if matches!(expression, Expression::Subquery { .. }) {
            ControlFlow::Break(expression.kind_name())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(flow, ControlFlow::Break("Subquery"));
    assert_eq!(seen, 3);
}

// ===================================================================
// Custom visitors
// ===================================================================

#[derive(Default)]
struct Stats {
    statements: usize,
    depth: usize,
    max_depth: usize,
    functions: Vec<&'static str>,
}

impl Visitor for Stats {
    type Break = ();

    fn pre_visit_statement(&mut self, _statement: &Statement) -> ControlFlow<()> {
        self.statements += 1;
        ControlFlow::Continue(())
    }

    fn pre_visit_query(&mut self, _query: &QueryExpression) -> ControlFlow<()> {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _query: &QueryExpression) -> ControlFlow<()> {
        self.depth -= 1;
        ControlFlow::Continue(())
    }

    fn pre_visit_function(&mut self, function: &Function) -> ControlFlow<()> {
        self.functions.push(function.kind_name());
        ControlFlow::Continue(())
    }
}

#[test]
fn custom_visitor_tracks_query_nesting() {
    let statement = parse(
        "SELECT count(e) FROM E e WHERE EXISTS (SELECT 1 FROM F f \
         WHERE f.id IN (SELECT CAST(g.id AS Long) FROM G g))",
    );
    let mut stats = Stats::default();
    assert_eq!(statement.visit(&mut stats), ControlFlow::Continue(()));
    assert_eq!(stats.statements, 1);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.depth, 0);
    assert_eq!(stats.functions, ["GenericFunction", "Cast"]);
}

#[test]
fn insert_source_is_visited() {
    let mut stats = Stats::default();
    let _ = parse("INSERT Archive (id) SELECT e.id FROM Employee e").visit(&mut stats);
    assert_eq!(stats.max_depth, 1);

    let mut count = 0;
    let _ = visit_expressions(&parse("INSERT Archive (id, n) VALUES (:id, 'x')"), |_| {
        count += 1;
        ControlFlow::<()>::Continue(())
    });
    assert_eq!(count, 2);
}

#[test]
fn statement_kind_names() {
    assert_eq!(parse("FROM E").kind_name(), "SELECT");
    assert_eq!(parse("UPDATE E SET a = 1").kind_name(), "UPDATE");
    assert_eq!(parse("DELETE E").kind_name(), "DELETE");
    assert_eq!(parse("INSERT E (a) VALUES (1)").kind_name(), "INSERT");
}
