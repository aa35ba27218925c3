//! Operator tables for precedence climbing.

use crate::ast::{BinaryOperator, DatetimeField, RelationalOperator};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of the duration postfixes `expr field` and `expr BY field`.
///
/// Tighter than every binary operator.
pub const DURATION_BINDING_POWER: u8 = 7;

/// Binding power of the operand of a unary sign: multiplicative strength.
pub const SIGN_OPERAND_BINDING_POWER: u8 = 5;

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Concatenation (lowest precedence)
        TokenKind::Concat => Some((1, 2)),

        // Additive
        TokenKind::Plus | TokenKind::Minus => Some((3, 4)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash => Some((5, 6)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Concat => Some(BinaryOperator::Concat),
        _ => None,
    }
}

/// Converts a token to a relational operator.
#[must_use]
pub const fn token_to_relational_op(kind: &TokenKind) -> Option<RelationalOperator> {
    match kind {
        TokenKind::Eq => Some(RelationalOperator::Equal),
        TokenKind::LtGt => Some(RelationalOperator::NotEqual),
        TokenKind::BangEq => Some(RelationalOperator::BangEqual),
        TokenKind::CaretEq => Some(RelationalOperator::CaretEqual),
        TokenKind::Lt => Some(RelationalOperator::LessThan),
        TokenKind::LtEq => Some(RelationalOperator::LessThanOrEqual),
        TokenKind::Gt => Some(RelationalOperator::GreaterThan),
        TokenKind::GtEq => Some(RelationalOperator::GreaterThanOrEqual),
        _ => None,
    }
}

/// Converts a keyword token to the date/time field it names.
#[must_use]
pub const fn token_to_datetime_field(kind: &TokenKind) -> Option<DatetimeField> {
    match kind {
        TokenKind::Keyword(Keyword::Year) => Some(DatetimeField::Year),
        TokenKind::Keyword(Keyword::Month) => Some(DatetimeField::Month),
        TokenKind::Keyword(Keyword::Day) => Some(DatetimeField::Day),
        TokenKind::Keyword(Keyword::Week) => Some(DatetimeField::Week),
        TokenKind::Keyword(Keyword::Quarter) => Some(DatetimeField::Quarter),
        TokenKind::Keyword(Keyword::Hour) => Some(DatetimeField::Hour),
        TokenKind::Keyword(Keyword::Minute) => Some(DatetimeField::Minute),
        TokenKind::Keyword(Keyword::Second) => Some(DatetimeField::Second),
        TokenKind::Keyword(Keyword::Nanosecond) => Some(DatetimeField::Nanosecond),
        TokenKind::Keyword(Keyword::Epoch) => Some(DatetimeField::Epoch),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // Addition should bind tighter than concatenation
        let concat_bp = infix_binding_power(&TokenKind::Concat).unwrap();
        assert!(add_bp.0 > concat_bp.0);

        // Duration postfixes bind tighter than everything
        assert!(DURATION_BINDING_POWER > mul_bp.1);
        assert_eq!(SIGN_OPERAND_BINDING_POWER, mul_bp.0);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::Concat] {
            let (left, right) = infix_binding_power(&kind).unwrap();
            assert!(left < right);
        }
    }

    #[test]
    fn test_percent_is_not_an_operator() {
        assert_eq!(infix_binding_power(&TokenKind::Percent), None);
        assert_eq!(token_to_binary_op(&TokenKind::Percent), None);
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(BinaryOperator::Add));
        assert_eq!(
            token_to_binary_op(&TokenKind::Minus),
            Some(BinaryOperator::Subtract)
        );
        assert_eq!(token_to_binary_op(&TokenKind::Eq), None);
    }

    #[test]
    fn test_token_to_relational_op() {
        assert_eq!(
            token_to_relational_op(&TokenKind::CaretEq),
            Some(RelationalOperator::CaretEqual)
        );
        assert_eq!(
            token_to_relational_op(&TokenKind::LtGt),
            Some(RelationalOperator::NotEqual)
        );
        assert_eq!(token_to_relational_op(&TokenKind::Plus), None);
    }

    #[test]
    fn test_datetime_fields() {
        assert_eq!(
            token_to_datetime_field(&TokenKind::Keyword(Keyword::Epoch)),
            Some(DatetimeField::Epoch)
        );
        assert_eq!(
            token_to_datetime_field(&TokenKind::Keyword(Keyword::Date)),
            None
        );
    }
}
