//! Predicate parsing.
//!
//! `OR` binds loosest, then `AND`, then `NOT`. Everything else is an
//! expression followed by an optional comparison suffix.

use super::error::ParseError;
use super::parser::{starts_query, Parser};
use super::pratt::token_to_relational_op;
use crate::ast::{
    CollectionFunction, Expression, ExpressionOrPredicate, InList, LikeEscape, LikeWildcards,
    Predicate, SimplePath,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a predicate.
    pub(super) fn parse_predicate(&mut self) -> Result<Predicate, ParseError> {
        self.nested(Self::parse_or)
    }

    /// Parses a predicate, unwrapping it when it is a bare expression.
    pub(super) fn parse_expression_or_predicate(
        &mut self,
    ) -> Result<ExpressionOrPredicate, ParseError> {
        self.parse_predicate()
            .map(ExpressionOrPredicate::from_predicate)
    }

    /// Parses `predicate (',' predicate)*`.
    pub(super) fn parse_predicate_list(&mut self) -> Result<Vec<Predicate>, ParseError> {
        let mut predicates = vec![self.parse_predicate()?];
        while self.eat(&TokenKind::Comma) {
            predicates.push(self.parse_predicate()?);
        }
        Ok(predicates)
    }

    fn parse_or(&mut self) -> Result<Predicate, ParseError> {
        let mut left = self.parse_and()?;
        while self.check_keyword(Keyword::Or) {
            self.chain_operator()?;
            self.advance();
            let right = self.parse_and()?;
            let span = self.span_from(left.span().start);
            left = Predicate::Or {
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Predicate, ParseError> {
        let mut left = self.parse_not()?;
        while self.check_keyword(Keyword::And) {
            self.chain_operator()?;
            self.advance();
            let right = self.parse_not()?;
            let span = self.span_from(left.span().start);
            left = Predicate::And {
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Predicate, ParseError> {
        if !self.check_keyword(Keyword::Not) {
            return self.parse_predicate_primary();
        }
        let start = self.start();
        self.advance();
        let inner = self.nested(Self::parse_not)?;
        Ok(Predicate::Not {
            inner: Box::new(inner),
            span: self.span_from(start),
        })
    }

    fn parse_predicate_primary(&mut self) -> Result<Predicate, ParseError> {
        let start = self.start();
        if self.eat_keyword(Keyword::Exists) {
            if self.at_collection_function() {
                let (function, path) = self.parse_collection_function()?;
                return Ok(Predicate::ExistsCollection {
                    function,
                    path,
                    span: self.span_from(start),
                });
            }
            let expression = self.parse_expression()?;
            return Ok(Predicate::Exists {
                expression,
                span: self.span_from(start),
            });
        }
        if self.check(&TokenKind::LeftParen) {
            return self.parse_parenthesized_predicate();
        }
        let expression = self.parse_expression()?;
        self.parse_predicate_suffix(expression)
    }

    /// Parses `(...)` in predicate position.
    ///
    /// The group may hold a subquery, a tuple, a bare expression or a
    /// predicate. Only the last one is a grouped predicate; the others are
    /// operands that may continue with operators and a comparison.
    fn parse_parenthesized_predicate(&mut self) -> Result<Predicate, ParseError> {
        let subquery = if starts_query(self.nth_kind(1)) {
            Some(self.parse_subquery_expression()?)
        } else if self.check_nth(1, &TokenKind::LeftParen) && self.query_after_parens() {
            self.speculate("subquery", Self::parse_subquery_expression)?
        } else {
            None
        };
        if let Some(subquery) = subquery {
            let expression = self.parse_expression_tail(subquery, 0)?;
            return self.parse_predicate_suffix(expression);
        }

        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let inner = self.parse_predicate()?;
        if self.check(&TokenKind::Comma) {
            let elements = self.parse_tuple_rest(inner)?;
            let tuple = Expression::Tuple {
                elements,
                span: self.span_from(start),
            };
            let expression = self.parse_expression_tail(tuple, 0)?;
            return self.parse_predicate_suffix(expression);
        }
        self.expect(&TokenKind::RightParen)?;
        match inner {
            Predicate::Expression(inner) => {
                let grouped = Expression::Grouped {
                    inner: Box::new(inner),
                    span: self.span_from(start),
                };
                let expression = self.parse_expression_tail(grouped, 0)?;
                self.parse_predicate_suffix(expression)
            }
            inner => Ok(Predicate::Grouped {
                inner: Box::new(inner),
                span: self.span_from(start),
            }),
        }
    }

    /// Parses what may follow an expression in predicate position.
    fn parse_predicate_suffix(&mut self, expression: Expression) -> Result<Predicate, ParseError> {
        let start = expression.span().start;

        if self.eat_keyword(Keyword::Is) {
            let negated = self.eat_keyword(Keyword::Not);
            if self.eat_keyword(Keyword::Null) {
                return Ok(Predicate::IsNull {
                    expression,
                    negated,
                    span: self.span_from(start),
                });
            }
            if self.eat_keyword(Keyword::Empty) {
                return Ok(Predicate::IsEmpty {
                    expression,
                    negated,
                    span: self.span_from(start),
                });
            }
            if self.eat_keyword(Keyword::Distinct) {
                self.expect_keyword(Keyword::From)?;
                let right = self.parse_expression()?;
                return Ok(Predicate::IsDistinctFrom {
                    left: expression,
                    right,
                    negated,
                    span: self.span_from(start),
                });
            }
            return Err(self.unexpected("NULL, EMPTY or DISTINCT FROM"));
        }

        let negated = self.check_keyword(Keyword::Not)
            && matches!(
                self.nth_kind(1),
                TokenKind::Keyword(
                    Keyword::Between | Keyword::Like | Keyword::Ilike | Keyword::In | Keyword::Member
                )
            );
        if negated {
            self.advance();
        }

        match self.kind() {
            TokenKind::Keyword(Keyword::Between) => {
                self.advance();
                let low = self.parse_expression()?;
                self.expect_keyword(Keyword::And)?;
                let high = self.parse_expression()?;
                return Ok(Predicate::Between {
                    expression,
                    low,
                    high,
                    negated,
                    span: self.span_from(start),
                });
            }
            TokenKind::Keyword(kw @ (Keyword::Like | Keyword::Ilike)) => {
                let case_insensitive = *kw == Keyword::Ilike;
                self.advance();
                let pattern = self.parse_like_pattern()?;
                let escape = self.parse_like_escape()?;
                return Ok(Predicate::Like {
                    expression,
                    pattern,
                    escape,
                    case_insensitive,
                    negated,
                    span: self.span_from(start),
                });
            }
            TokenKind::Keyword(Keyword::In) => {
                self.advance();
                let list = self.parse_in_list()?;
                return Ok(Predicate::In {
                    expression,
                    list,
                    negated,
                    span: self.span_from(start),
                });
            }
            TokenKind::Keyword(Keyword::Member) => {
                self.advance();
                self.expect_keyword(Keyword::Of)?;
                let collection = self.parse_path()?;
                return Ok(Predicate::MemberOf {
                    expression,
                    collection,
                    negated,
                    span: self.span_from(start),
                });
            }
            _ => {}
        }

        if let Some(op) = token_to_relational_op(self.kind()) {
            self.advance();
            let right = self.parse_expression()?;
            return Ok(Predicate::Relational {
                left: expression,
                op,
                right,
                span: self.span_from(start),
            });
        }

        Ok(Predicate::Expression(expression))
    }

    /// Parses a `LIKE` pattern, where a parameter may carry `%` wildcards.
    fn parse_like_pattern(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        let leading = self.eat(&TokenKind::Percent);
        let at_parameter = matches!(self.kind(), TokenKind::Colon | TokenKind::Question);
        if leading && !at_parameter {
            return Err(self.unexpected("parameter"));
        }
        if !at_parameter {
            return self.parse_expression();
        }

        let mut parameter = self.parse_parameter()?;
        let trailing = self.eat(&TokenKind::Percent);
        parameter.wildcards = LikeWildcards { leading, trailing };
        parameter.span = self.span_from(start);
        let pattern = Expression::Parameter(parameter);
        if leading || trailing {
            Ok(pattern)
        } else {
            self.parse_expression_tail(pattern, 0)
        }
    }

    fn parse_like_escape(&mut self) -> Result<Option<LikeEscape>, ParseError> {
        if !self.eat_keyword(Keyword::Escape) {
            return Ok(None);
        }
        if let Some(literal) = self.parse_string_literal() {
            return Ok(Some(LikeEscape::Literal(literal)));
        }
        if matches!(self.kind(), TokenKind::Colon | TokenKind::Question) {
            return Ok(Some(LikeEscape::Parameter(self.parse_parameter()?)));
        }
        Err(self.unexpected("escape character"))
    }

    /// Parses the right-hand side of `IN`.
    fn parse_in_list(&mut self) -> Result<InList, ParseError> {
        if self.at_collection_function() {
            let (function, path) = self.parse_collection_function()?;
            return Ok(InList::Collection { function, path });
        }
        if matches!(self.kind(), TokenKind::Colon | TokenKind::Question) {
            return Ok(InList::Parameter(self.parse_parameter()?));
        }
        if !self.check(&TokenKind::LeftParen) {
            return Err(self.unexpected("'('"));
        }

        if starts_query(self.nth_kind(1)) {
            return Ok(InList::Subquery(Box::new(self.parse_parenthesized_query()?)));
        }
        if self.check_nth(1, &TokenKind::LeftParen) && self.query_after_parens() {
            if let Some(query) = self.speculate("subquery", Self::parse_parenthesized_query)? {
                return Ok(InList::Subquery(Box::new(query)));
            }
        }

        self.advance();
        let mut items = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                items.push(self.parse_expression_or_predicate()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(InList::List(items))
    }

    /// Returns true at `ELEMENTS(` or `INDICES(`.
    pub(super) fn at_collection_function(&self) -> bool {
        matches!(
            self.kind(),
            TokenKind::Keyword(Keyword::Elements | Keyword::Indices)
        ) && self.check_nth(1, &TokenKind::LeftParen)
    }

    /// `(ELEMENTS|INDICES) '(' simplePath ')'`
    pub(super) fn parse_collection_function(
        &mut self,
    ) -> Result<(CollectionFunction, SimplePath), ParseError> {
        let function = match self.kind() {
            TokenKind::Keyword(Keyword::Elements) => CollectionFunction::Elements,
            TokenKind::Keyword(Keyword::Indices) => CollectionFunction::Indices,
            _ => return Err(self.unexpected("ELEMENTS or INDICES")),
        };
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let path = self.parse_simple_path()?;
        self.expect(&TokenKind::RightParen)?;
        Ok((function, path))
    }
}
