//! Tests for arithmetic, concatenation, signs, durations, CASE and grouping.

mod common;
use common::*;

use oxide_hql_core::ast::{
    BinaryOperator, CaseExpression, DatetimeField, Expression, ExpressionOrPredicate,
    ParameterKind, ParameterPrefix, SelectExpression, Sign,
};

fn binary(expr: &Expression) -> (&Expression, BinaryOperator, &Expression) {
    match expr {
        Expression::Binary {
            left, op, right, ..
        } => (left, *op, right),
        other => panic!("Expected binary expression, got {other:?}"),
    }
}

// ===================================================================
// Precedence and associativity
// ===================================================================

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = parse_selected_expression("1 + 2 * 3");
    let (left, op, right) = binary(&expr);
    assert_eq!(op, BinaryOperator::Add);
    assert_eq!(left.to_string(), "1");
    assert_eq!(binary(right).1, BinaryOperator::Multiply);
}

#[test]
fn addition_binds_tighter_than_concat() {
    let expr = parse_selected_expression("e.first || ' ' || e.age + 1");
    let (left, op, right) = binary(&expr);
    assert_eq!(op, BinaryOperator::Concat);
    assert_eq!(binary(left).1, BinaryOperator::Concat);
    assert_eq!(binary(right).1, BinaryOperator::Add);
}

#[test]
fn subtraction_is_left_associative() {
    let expr = parse_selected_expression("10 - 4 - 3");
    let (left, op, right) = binary(&expr);
    assert_eq!(op, BinaryOperator::Subtract);
    assert_eq!(left.to_string(), "10 - 4");
    assert_eq!(right.to_string(), "3");
}

#[test]
fn division_and_multiplication_share_a_level() {
    let expr = parse_selected_expression("a / b * c");
    let (left, op, _) = binary(&expr);
    assert_eq!(op, BinaryOperator::Multiply);
    assert_eq!(binary(left).1, BinaryOperator::Divide);
}

#[test]
fn grouping_overrides_precedence() {
    let expr = parse_selected_expression("(1 + 2) * 3");
    let (left, op, _) = binary(&expr);
    assert_eq!(op, BinaryOperator::Multiply);
    assert!(matches!(left, Expression::Grouped { .. }));
}

// ===================================================================
// Signs
// ===================================================================

#[test]
fn negative_number_literal() {
    let expr = parse_selected_expression("-1 * b");
    let (left, op, _) = binary(&expr);
    assert_eq!(op, BinaryOperator::Multiply);
    assert!(matches!(
        left,
        Expression::SignedNumericLiteral {
            sign: Sign::Minus,
            ..
        }
    ));
}

#[test]
fn sign_applies_to_a_product() {
    let expr = parse_selected_expression("-a * b + c");
    let (left, op, _) = binary(&expr);
    assert_eq!(op, BinaryOperator::Add);
    let Expression::Signed { sign, operand, .. } = left else {
        panic!("Expected signed expression, got {left:?}");
    };
    assert_eq!(*sign, Sign::Minus);
    assert_eq!(binary(operand).1, BinaryOperator::Multiply);
}

#[test]
fn double_sign_renders_with_space() {
    let expr = parse_selected_expression("- -1");
    assert_eq!(expr.to_string(), "- -1");
    round_trip("SELECT - -1, +e.x, 2 - -3 FROM E e");
}

// ===================================================================
// Durations
// ===================================================================

#[test]
fn to_duration_postfix() {
    let expr = parse_selected_expression("e.days DAY");
    assert!(matches!(
        expr,
        Expression::ToDuration {
            unit: DatetimeField::Day,
            ..
        }
    ));
}

#[test]
fn from_duration_by_field() {
    let expr = parse_selected_expression("(e.end - e.start) BY HOUR");
    assert!(matches!(
        expr,
        Expression::FromDuration {
            unit: DatetimeField::Hour,
            ..
        }
    ));
}

#[test]
fn duration_binds_tighter_than_addition() {
    let expr = parse_selected_expression("e.start + 2 WEEK");
    let (_, op, right) = binary(&expr);
    assert_eq!(op, BinaryOperator::Add);
    assert!(matches!(right, Expression::ToDuration { .. }));
}

#[test]
fn day_of_week_expression() {
    let expr = parse_selected_expression("DAY OF WEEK");
    assert!(matches!(expr, Expression::DayOfWeek { .. }));
}

// ===================================================================
// Parenthesized forms
// ===================================================================

#[test]
fn tuple_of_three() {
    let expr = parse_selected_expression("(1, 2, 3)");
    let Expression::Tuple { elements, .. } = expr else {
        panic!("Expected tuple");
    };
    assert_eq!(elements.len(), 3);
}

#[test]
fn grouped_expression() {
    let expr = parse_selected_expression("(1 + 2)");
    let Expression::Grouped { inner, .. } = expr else {
        panic!("Expected grouped expression");
    };
    assert_eq!(binary(&inner).1, BinaryOperator::Add);
}

#[test]
fn subquery_expression() {
    let expr = parse_selected_expression("(SELECT 1)");
    assert!(matches!(expr, Expression::Subquery { .. }));
}

#[test]
fn doubly_parenthesized_subquery() {
    let expr = parse_selected_expression("((SELECT max(x.id) FROM X x))");
    assert!(matches!(expr, Expression::Subquery { .. }));
}

#[test]
fn grouped_expression_that_looks_like_a_subquery() {
    let expr = parse_selected_expression("((e.a) + 1)");
    assert!(matches!(expr, Expression::Grouped { .. }));
}

// ===================================================================
// CASE
// ===================================================================

#[test]
fn searched_case() {
    let expr = parse_selected_expression(
        "CASE WHEN e.age < 18 THEN 'minor' WHEN e.age > 65 THEN 'senior' ELSE 'adult' END",
    );
    let Expression::Case(case) = expr else {
        panic!("Expected CASE");
    };
    let CaseExpression::Searched { when_clauses, .. } = &*case else {
        panic!("Expected searched CASE");
    };
    assert_eq!(when_clauses.len(), 2);
    assert!(case.else_result().is_some());
}

#[test]
fn simple_case_without_else() {
    let expr = parse_selected_expression("case e.kind when 1 then 'a' when 2 then 'b' end");
    let Expression::Case(case) = expr else {
        panic!("Expected CASE");
    };
    assert!(matches!(&*case, CaseExpression::Simple { .. }));
    assert!(case.else_result().is_none());
}

#[test]
fn case_result_may_be_a_predicate() {
    let expr = parse_selected_expression("CASE WHEN e.x IS NULL THEN e.y > 1 ELSE false END");
    let Expression::Case(case) = expr else {
        panic!("Expected CASE");
    };
    let CaseExpression::Searched { when_clauses, .. } = &*case else {
        panic!("Expected searched CASE");
    };
    assert!(matches!(when_clauses[0].then, ExpressionOrPredicate::Predicate(_)));
}

#[test]
fn case_requires_when() {
    let err = parse_err("SELECT CASE e.x ELSE 1 END FROM E e");
    assert!(err.expected.contains("WHEN"));
}

// ===================================================================
// Parameters
// ===================================================================

#[test]
fn parameter_forms() {
    let select = parse_select("SELECT :name, ?1, ?, :#{#entity.id}, ?#{[0]} FROM E e")
        .select
        .unwrap();
    let kinds: Vec<ParameterKind> = select
        .selections
        .iter()
        .map(|s| match &s.item {
            SelectExpression::Expression(ExpressionOrPredicate::Expression(
                Expression::Parameter(p),
            )) => p.kind.clone(),
            other => panic!("Expected parameter, got {other:?}"),
        })
        .collect();
    assert!(matches!(&kinds[0], ParameterKind::Named(name) if name.value == "name"));
    assert_eq!(kinds[1], ParameterKind::Positional(Some("1".to_string())));
    assert_eq!(kinds[2], ParameterKind::Positional(None));
    assert!(matches!(
        &kinds[3],
        ParameterKind::Spel {
            prefix: ParameterPrefix::Colon,
            expression,
        } if expression == "#entity.id"
    ));
    assert!(matches!(
        &kinds[4],
        ParameterKind::Spel {
            prefix: ParameterPrefix::Question,
            ..
        }
    ));
}

#[test]
fn keyword_named_parameter() {
    let expr = parse_selected_expression(":order");
    assert!(matches!(
        expr,
        Expression::Parameter(p) if matches!(&p.kind, ParameterKind::Named(n) if n.value == "order")
    ));
}

// ===================================================================
// Round trips
// ===================================================================

#[test]
fn round_trip_expressions() {
    round_trip("SELECT (e.a + e.b) * -e.c / 2, e.name || '!' FROM E e");
    round_trip("SELECT e.start + 3 DAY, (e.end - e.start) BY SECOND FROM E e");
    round_trip("SELECT CASE WHEN e.a = 1 THEN 'x' ELSE 'y' END AS label FROM E e");
    round_trip("SELECT (1, 2), ((SELECT 1)), (e.x) FROM E e");
}
