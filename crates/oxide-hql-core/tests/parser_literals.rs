//! Tests for literals and quoted names inside full statements.

mod common;
use common::*;

use oxide_hql_core::ast::{
    BinaryLiteral, DateTimeLiteral, DateTimeScope, Expression, IdentifierStyle, Literal,
    NumericKind, Path, StringStyle,
};

fn literal(text: &str) -> Literal {
    match parse_selected_expression(text) {
        Expression::Literal { value, .. } => value,
        other => panic!("Expected literal for {text}, got {other:?}"),
    }
}

#[test]
fn string_spellings() {
    let Literal::String(s) = literal("'O''Brien'") else {
        panic!("Expected string");
    };
    assert_eq!(s.value, "O'Brien");
    assert_eq!(s.style, StringStyle::Single);

    let Literal::String(s) = literal(r#""line\nbreak""#) else {
        panic!("Expected string");
    };
    assert_eq!(s.value, "line\nbreak");
    assert_eq!(s.style, StringStyle::Double);

    let Literal::String(s) = literal("'x'") else {
        panic!("Expected string");
    };
    assert_eq!(s.style, StringStyle::Character);
}

#[test]
fn numeric_kinds_and_suffixes() {
    let cases = [
        ("42", NumericKind::Integer),
        ("42L", NumericKind::Integer),
        ("42BI", NumericKind::Integer),
        ("4.2", NumericKind::Float),
        ("4F", NumericKind::Float),
        ("4.2BD", NumericKind::Float),
        ("1e-3", NumericKind::Float),
        ("0x1F", NumericKind::Hex),
    ];
    for (text, kind) in cases {
        let Literal::Numeric(numeric) = literal(text) else {
            panic!("Expected numeric literal for {text}");
        };
        assert_eq!(numeric.kind, kind, "{text}");
        assert_eq!(numeric.text, text);
    }
}

#[test]
fn keyword_literals() {
    assert_eq!(literal("NULL"), Literal::Null);
    assert_eq!(literal("true"), Literal::Boolean(true));
    assert_eq!(literal("FALSE"), Literal::Boolean(false));
}

#[test]
fn binary_literals() {
    assert_eq!(
        literal("X'CAFE'"),
        Literal::Binary(BinaryLiteral::Hex("CAFE".to_string()))
    );
    assert_eq!(
        literal("{0x0A, 0x0B, 0x0C}"),
        Literal::Binary(BinaryLiteral::List(vec![
            "0x0A".to_string(),
            "0x0B".to_string(),
            "0x0C".to_string()
        ]))
    );
}

#[test]
fn datetime_literals_in_predicates() {
    let predicate = parse_where("e.created < CURRENT_TIMESTAMP");
    assert_eq!(predicate.to_string(), "e.created < CURRENT_TIMESTAMP");

    assert_eq!(
        literal("LOCAL DATETIME"),
        Literal::DateTime(DateTimeLiteral::DateTime(DateTimeScope::Local))
    );
    assert_eq!(literal("instant"), Literal::DateTime(DateTimeLiteral::Instant));
}

#[test]
fn datetime_spelling_as_path_or_call() {
    assert!(matches!(
        parse_selected_expression("e.instant"),
        Expression::Path(_)
    ));
    assert!(matches!(
        parse_selected_expression("current_date()"),
        Expression::Function(_)
    ));
}

#[test]
fn backtick_identifiers() {
    let Expression::Path(Path::General(path)) = parse_selected_expression("e.`order`") else {
        panic!("Expected path");
    };
    let segment = &path.path.segments[1];
    assert_eq!(segment.value, "order");
    assert_eq!(segment.style, IdentifierStyle::Backtick);
}

#[test]
fn invalid_numeric_literal() {
    let err = parse_err("SELECT 12abc FROM E e");
    assert_eq!(err.kind, oxide_hql_core::ParseErrorKind::Lexical);
    assert!(err.message.contains("12abc"));
}

#[test]
fn round_trip_literals() {
    round_trip(r#"SELECT 'it''s', "tab\there", 'x', 10L, 2.5BD, 0xFF, 1e10 FROM E e"#);
    round_trip("SELECT NULL, TRUE, FALSE, X'00FF', {0x01, 0x02} FROM E e");
    round_trip(
        "SELECT LOCAL_DATE, LOCAL TIME, CURRENT DATE, OFFSET DATETIME, OFFSET_DATETIME, INSTANT FROM E e",
    );
    round_trip("SELECT e.`select`, e.`from`.x FROM `Entity` e");
}
