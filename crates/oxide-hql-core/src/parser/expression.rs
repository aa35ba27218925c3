//! Expression parsing using precedence climbing.

use super::error::ParseError;
use super::parser::{is_identifier, starts_query, Parser};
use super::pratt::{
    infix_binding_power, token_to_binary_op, token_to_datetime_field, DURATION_BINDING_POWER,
    SIGN_OPERAND_BINDING_POWER,
};
use crate::ast::{
    CaseExpression, DatetimeField, Expression, ExpressionOrPredicate, LikeWildcards, Parameter,
    ParameterKind, ParameterPrefix, Path, Predicate, SearchedWhen, Sign, SimpleWhen,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses an expression.
    pub(super) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.nested(|p| p.parse_expression_bp(0))
    }

    /// Parses an expression with the given minimum binding power.
    fn parse_expression_bp(&mut self, min_bp: u8) -> Result<Expression, ParseError> {
        let lhs = self.parse_prefix()?;
        self.parse_expression_tail(lhs, min_bp)
    }

    /// Applies postfix and infix operators to an already parsed operand.
    pub(super) fn parse_expression_tail(
        &mut self,
        mut lhs: Expression,
        min_bp: u8,
    ) -> Result<Expression, ParseError> {
        loop {
            if let Some(unit) = self.duration_unit() {
                if DURATION_BINDING_POWER < min_bp {
                    break;
                }
                self.chain_operator()?;
                self.advance();
                let span = self.span_from(lhs.span().start);
                lhs = Expression::ToDuration {
                    expression: Box::new(lhs),
                    unit,
                    span,
                };
                continue;
            }

            if self.check_keyword(Keyword::By) {
                if let Some(unit) = token_to_datetime_field(self.nth_kind(1)) {
                    if DURATION_BINDING_POWER < min_bp {
                        break;
                    }
                    self.chain_operator()?;
                    self.advance();
                    self.advance();
                    let span = self.span_from(lhs.span().start);
                    lhs = Expression::FromDuration {
                        expression: Box::new(lhs),
                        unit,
                        span,
                    };
                    continue;
                }
            }

            let Some((l_bp, r_bp)) = infix_binding_power(self.kind()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let Some(op) = token_to_binary_op(self.kind()) else {
                break;
            };
            self.chain_operator()?;
            self.advance();

            let rhs = self.parse_expression_bp(r_bp)?;
            let span = self.span_from(lhs.span().start);
            lhs = Expression::Binary {
                left: Box::new(lhs),
                op,
                right: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    /// A datetime field written after an expression: `x DAY`.
    fn duration_unit(&self) -> Option<DatetimeField> {
        let unit = token_to_datetime_field(self.kind())?;
        match self.nth_kind(1) {
            TokenKind::Dot | TokenKind::LeftParen | TokenKind::Keyword(Keyword::Of) => None,
            _ => Some(unit),
        }
    }

    /// Parses a signed operand or a primary expression.
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        let sign = match self.kind() {
            TokenKind::Plus => Sign::Plus,
            TokenKind::Minus => Sign::Minus,
            _ => return self.parse_primary(),
        };
        let start = self.start();
        self.advance();

        if let Some(literal) = self.parse_numeric_literal() {
            return Ok(Expression::SignedNumericLiteral {
                sign,
                literal,
                span: self.span_from(start),
            });
        }
        let operand = self.nested(|p| p.parse_expression_bp(SIGN_OPERAND_BINDING_POWER))?;
        Ok(Expression::Signed {
            sign,
            operand: Box::new(operand),
            span: self.span_from(start),
        })
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        match self.kind() {
            TokenKind::LeftParen => return self.parse_parenthesized_expression(),
            TokenKind::Colon | TokenKind::Question => {
                return self.parse_parameter().map(Expression::Parameter);
            }
            _ if self.at_literal() => return self.parse_literal_expression(),
            _ => {}
        }

        let Some(keyword) = self.current().as_keyword() else {
            return self.parse_path_or_function();
        };
        let call = self.check_nth(1, &TokenKind::LeftParen);
        match keyword {
            Keyword::Case => self.parse_case(),
            Keyword::Cast if call => self.parse_cast(),
            Keyword::Extract if call => self.parse_extract(),
            Keyword::Trim if call => self.parse_trim(),
            Keyword::Treat if call => self.parse_path().map(Expression::Path),
            Keyword::Every | Keyword::All | Keyword::Any | Keyword::Some
                if call
                    || matches!(
                        self.nth_kind(1),
                        TokenKind::Keyword(Keyword::Elements | Keyword::Indices)
                    ) =>
            {
                self.parse_quantified()
            }
            Keyword::Day
                if self.check_nth_keyword(1, Keyword::Of)
                    && (self.check_nth_keyword(2, Keyword::Week)
                        || self.check_nth_keyword(2, Keyword::Month)) =>
            {
                self.advance();
                self.advance();
                let week = self.advance().as_keyword() == Some(Keyword::Week);
                let span = self.span_from(start);
                Ok(if week {
                    Expression::DayOfWeek { span }
                } else {
                    Expression::DayOfMonth { span }
                })
            }
            Keyword::Week
                if self.check_nth_keyword(1, Keyword::Of)
                    && self.check_nth_keyword(2, Keyword::Year) =>
            {
                self.advance();
                self.advance();
                self.advance();
                Ok(Expression::WeekOfYear {
                    span: self.span_from(start),
                })
            }
            kw if kw.is_datetime_field() && call => {
                match self.speculate("extract shorthand", Self::parse_extract_shorthand)? {
                    Some(extract) => Ok(extract),
                    None => self.parse_path_or_function(),
                }
            }
            _ => self.parse_path_or_function(),
        }
    }

    /// Parses a path, or a function call when the name is followed by `(`.
    fn parse_path_or_function(&mut self) -> Result<Expression, ParseError> {
        let followed = matches!(self.nth_kind(1), TokenKind::Dot | TokenKind::LeftParen);
        match self.kind() {
            TokenKind::Keyword(Keyword::Not | Keyword::Exists | Keyword::Case) => {
                return Err(self.unexpected("expression"));
            }
            TokenKind::Keyword(kw) if kw.is_reserved() && !followed => {
                return Err(self.unexpected("expression"));
            }
            kind if !is_identifier(kind) => return Err(self.unexpected("expression")),
            _ => {}
        }

        let name = self.parse_simple_path()?;
        if self.check(&TokenKind::LeftParen) {
            return self.parse_function_call(name);
        }
        let path = self.parse_general_path_from(name)?;
        Ok(Expression::Path(Path::General(path)))
    }

    /// Parses `(...)` in expression position: a subquery, a tuple or a
    /// grouped expression.
    fn parse_parenthesized_expression(&mut self) -> Result<Expression, ParseError> {
        if starts_query(self.nth_kind(1)) {
            return self.parse_subquery_expression();
        }
        if self.check_nth(1, &TokenKind::LeftParen) && self.query_after_parens() {
            if let Some(subquery) = self.speculate("subquery", Self::parse_subquery_expression)? {
                return Ok(subquery);
            }
        }

        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let first = self.parse_predicate()?;
        if self.check(&TokenKind::Comma) {
            let elements = self.parse_tuple_rest(first)?;
            return Ok(Expression::Tuple {
                elements,
                span: self.span_from(start),
            });
        }
        match first {
            Predicate::Expression(inner) => {
                self.expect(&TokenKind::RightParen)?;
                Ok(Expression::Grouped {
                    inner: Box::new(inner),
                    span: self.span_from(start),
                })
            }
            predicate => Err(ParseError::new(
                format!(
                    "Unexpected {} predicate: expected expression",
                    predicate.kind_name()
                ),
                predicate.span(),
            )),
        }
    }

    /// Parses the remaining elements of a tuple whose first element is
    /// `first`, up to and including the closing `)`.
    pub(super) fn parse_tuple_rest(
        &mut self,
        first: Predicate,
    ) -> Result<Vec<ExpressionOrPredicate>, ParseError> {
        let mut elements = vec![ExpressionOrPredicate::from_predicate(first)];
        while self.eat(&TokenKind::Comma) {
            elements.push(self.parse_expression_or_predicate()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(elements)
    }

    /// `(queryExpression)` as an expression.
    pub(super) fn parse_subquery_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        let query = self.parse_parenthesized_query()?;
        Ok(Expression::Subquery {
            query: Box::new(query),
            span: self.span_from(start),
        })
    }

    /// `:name`, `?`, `?1`, `:#{...}` or `?#{...}`.
    pub(super) fn parse_parameter(&mut self) -> Result<Parameter, ParseError> {
        let start = self.start();
        let kind = if self.eat(&TokenKind::Colon) {
            if let TokenKind::Spel(expression) = self.kind() {
                let expression = expression.clone();
                self.advance();
                ParameterKind::Spel {
                    prefix: ParameterPrefix::Colon,
                    expression,
                }
            } else {
                ParameterKind::Named(self.parse_identifier()?)
            }
        } else {
            let question = self.expect(&TokenKind::Question)?;
            match self.kind().clone() {
                TokenKind::Spel(expression) => {
                    self.advance();
                    ParameterKind::Spel {
                        prefix: ParameterPrefix::Question,
                        expression,
                    }
                }
                TokenKind::Integer(index) if self.start() == question.end => {
                    self.advance();
                    ParameterKind::Positional(Some(index))
                }
                _ => ParameterKind::Positional(None),
            }
        };
        Ok(Parameter {
            kind,
            wildcards: LikeWildcards::default(),
            span: self.span_from(start),
        })
    }

    /// Parses a `CASE` expression, simple or searched.
    fn parse_case(&mut self) -> Result<Expression, ParseError> {
        self.nested(|p| {
            let start = p.start();
            p.expect_keyword(Keyword::Case)?;

            let case = if p.check_keyword(Keyword::When) {
                let mut when_clauses = Vec::new();
                while p.eat_keyword(Keyword::When) {
                    let when = p.parse_predicate()?;
                    p.expect_keyword(Keyword::Then)?;
                    let then = p.parse_expression_or_predicate()?;
                    when_clauses.push(SearchedWhen { when, then });
                }
                let else_result = p.parse_case_else()?;
                p.expect_keyword(Keyword::End)?;
                CaseExpression::Searched {
                    when_clauses,
                    else_result,
                    span: p.span_from(start),
                }
            } else {
                let operand = p.parse_expression_or_predicate()?;
                if !p.check_keyword(Keyword::When) {
                    return Err(p.unexpected("WHEN"));
                }
                let mut when_clauses = Vec::new();
                while p.eat_keyword(Keyword::When) {
                    let when = p.parse_expression()?;
                    p.expect_keyword(Keyword::Then)?;
                    let then = p.parse_expression_or_predicate()?;
                    when_clauses.push(SimpleWhen { when, then });
                }
                let else_result = p.parse_case_else()?;
                p.expect_keyword(Keyword::End)?;
                CaseExpression::Simple {
                    operand,
                    when_clauses,
                    else_result,
                    span: p.span_from(start),
                }
            };
            Ok(Expression::Case(Box::new(case)))
        })
    }

    fn parse_case_else(&mut self) -> Result<Option<ExpressionOrPredicate>, ParseError> {
        if self.eat_keyword(Keyword::Else) {
            Ok(Some(self.parse_expression_or_predicate()?))
        } else {
            Ok(None)
        }
    }
}
