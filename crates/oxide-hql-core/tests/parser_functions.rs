//! Tests for function calls, window clauses and the special function forms.

mod common;
use common::*;

use oxide_hql_core::ast::{
    DatetimeField, Expression, ExtractField, FrameBound, FrameExclusion, FrameMode, Function,
    FunctionArguments, GenericFunction, Quantifier, TrimSpecification,
};

fn function(expr: &str) -> Function {
    match parse_selected_expression(expr) {
        Expression::Function(function) => *function,
        other => panic!("Expected function, got {other:?}"),
    }
}

fn generic(expr: &str) -> GenericFunction {
    match function(expr) {
        Function::Generic(generic) => generic,
        other => panic!("Expected generic function, got {other:?}"),
    }
}

// ===================================================================
// Generic calls
// ===================================================================

#[test]
fn argument_forms() {
    assert_eq!(generic("current_user()").arguments, FunctionArguments::None);
    assert_eq!(generic("count(*)").arguments, FunctionArguments::Star);
    let FunctionArguments::List { distinct, args } = generic("count(DISTINCT e.dept)").arguments
    else {
        panic!("Expected argument list");
    };
    assert!(distinct);
    assert_eq!(args.len(), 1);
}

#[test]
fn qualified_function_name() {
    let function = generic("sql.json_extract(e.data, '$.a')");
    assert_eq!(function.name.to_string(), "sql.json_extract");
}

#[test]
fn function_with_subquery() {
    assert!(matches!(
        function("array(SELECT p.id FROM Project p)"),
        Function::WithSubquery { .. }
    ));
}

#[test]
fn window_clause() {
    let function = generic(
        "COUNT(*) OVER (PARTITION BY e.dept ORDER BY e.id ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW)",
    );
    let over = function.over.unwrap();
    assert_eq!(over.partition_by.len(), 1);
    assert_eq!(over.order_by.unwrap().items.len(), 1);
    let frame = over.frame.unwrap();
    assert_eq!(frame.mode, FrameMode::Rows);
    assert_eq!(frame.start, FrameBound::UnboundedPreceding);
    assert_eq!(frame.end, Some(FrameBound::CurrentRow));
    assert_eq!(frame.exclusion, None);
}

#[test]
fn frame_with_offsets_and_exclusion() {
    let frame = generic(
        "sum(e.x) OVER (ORDER BY e.d RANGE BETWEEN 2 PRECEDING AND 1 FOLLOWING EXCLUDE NO OTHERS)",
    )
    .over
    .unwrap()
    .frame
    .unwrap();
    assert_eq!(frame.mode, FrameMode::Range);
    assert!(matches!(frame.start, FrameBound::Preceding(_)));
    assert!(matches!(frame.end, Some(FrameBound::Following(_))));
    assert_eq!(frame.exclusion, Some(FrameExclusion::NoOthers));
}

#[test]
fn single_bound_frame() {
    let frame = generic("avg(e.x) OVER (GROUPS CURRENT ROW)")
        .over
        .unwrap()
        .frame
        .unwrap();
    assert_eq!(frame.mode, FrameMode::Groups);
    assert_eq!(frame.start, FrameBound::CurrentRow);
    assert!(frame.end.is_none());
}

#[test]
fn unbounded_following_cannot_start_a_frame() {
    let err = parse_err("SELECT sum(e.x) OVER (ROWS UNBOUNDED FOLLOWING) FROM E e");
    assert!(err.expected.contains("PRECEDING"));
}

#[test]
fn filter_and_within_group() {
    let function = generic("count(e) FILTER (WHERE e.active = true)");
    assert!(function.filter.is_some());

    let function = generic("listagg(e.name, ',') WITHIN GROUP (ORDER BY e.name)");
    assert!(function.within_group.is_some());
}

// ===================================================================
// Special forms
// ===================================================================

#[test]
fn cast_with_precision() {
    let Function::Cast(cast) = function("CAST(e.price AS BigDecimal(10, 2))") else {
        panic!("Expected CAST");
    };
    assert_eq!(cast.target.to_string(), "BigDecimal");
    assert_eq!(cast.precision.as_deref(), Some("10"));
    assert_eq!(cast.scale.as_deref(), Some("2"));
}

#[test]
fn extract_forms() {
    let Function::Extract(extract) = function("EXTRACT(YEAR FROM e.born)") else {
        panic!("Expected EXTRACT");
    };
    assert_eq!(extract.field, ExtractField::Datetime(DatetimeField::Year));
    assert!(!extract.shorthand);

    let Function::Extract(extract) = function("extract(DAY OF WEEK FROM e.born)") else {
        panic!("Expected EXTRACT");
    };
    assert!(matches!(
        extract.field,
        ExtractField::Expression(Expression::DayOfWeek { .. })
    ));

    let Function::Extract(extract) = function("month(e.born)") else {
        panic!("Expected EXTRACT shorthand");
    };
    assert!(extract.shorthand);
    assert_eq!(extract.field, ExtractField::Datetime(DatetimeField::Month));
}

#[test]
fn datetime_field_call_with_two_arguments_is_generic() {
    assert!(matches!(function("year(e.a, e.b)"), Function::Generic(_)));
}

#[test]
fn trim_forms() {
    let Function::Trim(trim) = function("TRIM(LEADING '0' FROM e.code)") else {
        panic!("Expected TRIM");
    };
    assert_eq!(trim.specification, Some(TrimSpecification::Leading));
    assert!(trim.character.is_some());
    assert!(trim.from);

    let Function::Trim(trim) = function("trim(e.code)") else {
        panic!("Expected TRIM");
    };
    assert!(trim.specification.is_none());
    assert!(trim.character.is_none());
    assert!(!trim.from);
}

#[test]
fn quantified_forms() {
    let Function::Quantified(quantified) = function("ALL(SELECT p.budget FROM Project p)") else {
        panic!("Expected quantified function");
    };
    assert_eq!(quantified.quantifier, Quantifier::All);

    assert!(matches!(
        parse_where("e.salary > ANY ELEMENTS(e.bonuses)"),
        oxide_hql_core::ast::Predicate::Relational {
            right: Expression::Function(_),
            ..
        }
    ));
}

#[test]
fn function_call_continuation() {
    let function = generic("e.address(0).street");
    assert_eq!(function.name.to_string(), "e.address");
    assert_eq!(function.continuation.unwrap().to_string(), "street");
}

#[test]
fn round_trip_functions() {
    round_trip("SELECT count(*), count(DISTINCT e.d), coalesce(e.a, 0), now() FROM E e");
    round_trip(
        "SELECT rank() OVER (PARTITION BY e.d ORDER BY e.s DESC ROWS BETWEEN 1 PRECEDING AND UNBOUNDED FOLLOWING EXCLUDE TIES) FROM E e",
    );
    round_trip("SELECT CAST(e.x AS String), CAST(e.y AS java.math.BigDecimal(10, 2)) FROM E e");
    round_trip("SELECT EXTRACT(YEAR FROM e.d), EXTRACT(DAY OF MONTH FROM e.d), year(e.d) FROM E e");
    round_trip("SELECT TRIM(BOTH 'x' FROM e.s), TRIM(e.s), TRIM(TRAILING FROM e.s) FROM E e");
    round_trip("SELECT count(e) FILTER (WHERE e.a = 1), listagg(e.n, ',') WITHIN GROUP (ORDER BY e.n) FROM E e");
    round_trip("FROM E e WHERE e.x > ALL (SELECT y.x FROM Y y) AND e.z = SOME ELEMENTS(e.zs)");
}
