//! Function call parsing.

use super::error::ParseError;
use super::parser::{starts_query, Parser};
use super::pratt::{infix_binding_power, token_to_datetime_field};
use crate::ast::{
    CastFunction, Expression, ExtractField, ExtractFunction, FrameBound, FrameClause,
    FrameExclusion, FrameMode, Function, FunctionArguments, GenericFunction, OverClause,
    QuantifiedArgument, QuantifiedFunction, Quantifier, SimplePath, TrimFunction,
    TrimSpecification,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a call to `name`, positioned at the opening parenthesis.
    pub(super) fn parse_function_call(&mut self, name: SimplePath) -> Result<Expression, ParseError> {
        let start = name.span.start;
        self.expect(&TokenKind::LeftParen)?;

        if starts_query(self.kind()) {
            let query = self.parse_query_expression()?;
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expression::Function(Box::new(Function::WithSubquery {
                name,
                query: Box::new(query),
                span: self.span_from(start),
            })));
        }

        let arguments = if self.check(&TokenKind::RightParen) {
            FunctionArguments::None
        } else if self.check(&TokenKind::Star) && self.check_nth(1, &TokenKind::RightParen) {
            self.advance();
            FunctionArguments::Star
        } else {
            let distinct = self.eat_keyword(Keyword::Distinct);
            let mut args = vec![self.parse_expression_or_predicate()?];
            while self.eat(&TokenKind::Comma) {
                args.push(self.parse_expression_or_predicate()?);
            }
            FunctionArguments::List { distinct, args }
        };
        self.expect(&TokenKind::RightParen)?;

        let continuation = if self.eat(&TokenKind::Dot) {
            Some(self.parse_simple_path()?)
        } else {
            None
        };

        let filter = if self.check_keyword(Keyword::Filter) && self.check_nth(1, &TokenKind::LeftParen)
        {
            self.advance();
            self.advance();
            let filter = self.parse_where_clause()?;
            self.expect(&TokenKind::RightParen)?;
            Some(filter)
        } else {
            None
        };

        let within_group = if self.check_keyword(Keyword::Within)
            && self.check_nth_keyword(1, Keyword::Group)
        {
            self.advance();
            self.advance();
            self.expect(&TokenKind::LeftParen)?;
            let order_by = self.parse_order_by_clause()?;
            self.expect(&TokenKind::RightParen)?;
            Some(order_by)
        } else {
            None
        };

        let over = if self.check_keyword(Keyword::Over) && self.check_nth(1, &TokenKind::LeftParen) {
            self.advance();
            Some(self.parse_over_clause()?)
        } else {
            None
        };

        Ok(Expression::Function(Box::new(Function::Generic(
            GenericFunction {
                name,
                arguments,
                continuation,
                filter,
                within_group,
                over,
                span: self.span_from(start),
            },
        ))))
    }

    /// `'(' [PARTITION BY ...] [ORDER BY ...] [frame] ')'`
    fn parse_over_clause(&mut self) -> Result<OverClause, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;

        let mut partition_by = Vec::new();
        if self.eat_keyword(Keyword::Partition) {
            self.expect_keyword(Keyword::By)?;
            partition_by.push(self.parse_expression()?);
            while self.eat(&TokenKind::Comma) {
                partition_by.push(self.parse_expression()?);
            }
        }

        let order_by = if self.check_keyword(Keyword::Order) {
            Some(self.parse_order_by_clause()?)
        } else {
            None
        };

        let frame = match self.kind() {
            TokenKind::Keyword(Keyword::Range | Keyword::Rows | Keyword::Groups) => {
                Some(self.parse_frame_clause()?)
            }
            _ => None,
        };

        self.expect(&TokenKind::RightParen)?;
        Ok(OverClause {
            partition_by,
            order_by,
            frame,
            span: self.span_from(start),
        })
    }

    fn parse_frame_clause(&mut self) -> Result<FrameClause, ParseError> {
        let start = self.start();
        let mode = match self.advance().as_keyword() {
            Some(Keyword::Range) => FrameMode::Range,
            Some(Keyword::Rows) => FrameMode::Rows,
            _ => FrameMode::Groups,
        };

        let (frame_start, frame_end) = if self.eat_keyword(Keyword::Between) {
            let frame_start = self.parse_frame_bound(true)?;
            self.expect_keyword(Keyword::And)?;
            let frame_end = self.parse_frame_bound(false)?;
            (frame_start, Some(frame_end))
        } else {
            (self.parse_frame_bound(true)?, None)
        };

        let exclusion = if self.eat_keyword(Keyword::Exclude) {
            Some(self.parse_frame_exclusion()?)
        } else {
            None
        };

        Ok(FrameClause {
            mode,
            start: frame_start,
            end: frame_end,
            exclusion,
            span: self.span_from(start),
        })
    }

    /// Parses a frame boundary. `UNBOUNDED FOLLOWING` cannot start a frame
    /// and `UNBOUNDED PRECEDING` cannot end one.
    fn parse_frame_bound(&mut self, is_start: bool) -> Result<FrameBound, ParseError> {
        if self.eat_keyword(Keyword::Unbounded) {
            return if is_start {
                self.expect_keyword(Keyword::Preceding)?;
                Ok(FrameBound::UnboundedPreceding)
            } else {
                self.expect_keyword(Keyword::Following)?;
                Ok(FrameBound::UnboundedFollowing)
            };
        }
        if self.check_keyword(Keyword::Current) && self.check_nth_keyword(1, Keyword::Row) {
            self.advance();
            self.advance();
            return Ok(FrameBound::CurrentRow);
        }

        let offset = self.parse_expression()?;
        if self.eat_keyword(Keyword::Preceding) {
            Ok(FrameBound::Preceding(offset))
        } else if self.eat_keyword(Keyword::Following) {
            Ok(FrameBound::Following(offset))
        } else {
            Err(self.unexpected("PRECEDING or FOLLOWING"))
        }
    }

    fn parse_frame_exclusion(&mut self) -> Result<FrameExclusion, ParseError> {
        match self.kind() {
            TokenKind::Keyword(Keyword::Current) => {
                self.advance();
                self.expect_keyword(Keyword::Row)?;
                Ok(FrameExclusion::CurrentRow)
            }
            TokenKind::Keyword(Keyword::Group) => {
                self.advance();
                Ok(FrameExclusion::Group)
            }
            TokenKind::Keyword(Keyword::Ties) => {
                self.advance();
                Ok(FrameExclusion::Ties)
            }
            TokenKind::Keyword(Keyword::No) => {
                self.advance();
                self.expect_keyword(Keyword::Others)?;
                Ok(FrameExclusion::NoOthers)
            }
            _ => Err(self.unexpected("CURRENT ROW, GROUP, TIES or NO OTHERS")),
        }
    }

    /// `CAST(expr AS Type[(n[, m])])`
    pub(super) fn parse_cast(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LeftParen)?;
        let expression = self.parse_expression()?;
        self.expect_keyword(Keyword::As)?;
        let target = self.parse_simple_path()?;

        let (mut precision, mut scale) = (None, None);
        if self.eat(&TokenKind::LeftParen) {
            precision = Some(self.parse_integer_text()?);
            if self.eat(&TokenKind::Comma) {
                scale = Some(self.parse_integer_text()?);
            }
            self.expect(&TokenKind::RightParen)?;
        }
        self.expect(&TokenKind::RightParen)?;

        Ok(Expression::Function(Box::new(Function::Cast(CastFunction {
            expression: Box::new(expression),
            target,
            precision,
            scale,
            span: self.span_from(start),
        }))))
    }

    fn parse_integer_text(&mut self) -> Result<String, ParseError> {
        match self.kind() {
            TokenKind::Integer(text) => {
                let text = text.clone();
                self.advance();
                Ok(text)
            }
            _ => Err(self.unexpected("integer")),
        }
    }

    /// `EXTRACT(field FROM source)`
    pub(super) fn parse_extract(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;

        let field = match token_to_datetime_field(self.kind()) {
            Some(field) if self.check_nth_keyword(1, Keyword::From) => {
                self.advance();
                ExtractField::Datetime(field)
            }
            _ => ExtractField::Expression(self.parse_expression()?),
        };
        self.expect_keyword(Keyword::From)?;
        let source = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expression::Function(Box::new(Function::Extract(
            ExtractFunction {
                field,
                source: Box::new(source),
                shorthand: false,
                span: self.span_from(start),
            },
        ))))
    }

    /// `field(source)`, e.g. `year(e.born)`.
    pub(super) fn parse_extract_shorthand(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        let Some(field) = token_to_datetime_field(self.kind()) else {
            return Err(self.unexpected("date/time field"));
        };
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let source = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expression::Function(Box::new(Function::Extract(
            ExtractFunction {
                field: ExtractField::Datetime(field),
                source: Box::new(source),
                shorthand: true,
                span: self.span_from(start),
            },
        ))))
    }

    /// `TRIM([LEADING|TRAILING|BOTH] [char] [FROM] source)`
    pub(super) fn parse_trim(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Trim)?;
        self.expect(&TokenKind::LeftParen)?;

        let specification = if self.check_nth(1, &TokenKind::RightParen) {
            None
        } else {
            match self.kind() {
                TokenKind::Keyword(Keyword::Leading) => Some(TrimSpecification::Leading),
                TokenKind::Keyword(Keyword::Trailing) => Some(TrimSpecification::Trailing),
                TokenKind::Keyword(Keyword::Both) => Some(TrimSpecification::Both),
                _ => None,
            }
        };
        if specification.is_some() {
            self.advance();
        }

        let next = self.nth_kind(1);
        let character_follows = matches!(next, TokenKind::Keyword(Keyword::From))
            || (*next != TokenKind::RightParen && infix_binding_power(next).is_none());
        let character = if character_follows {
            self.parse_string_literal()
        } else {
            None
        };

        let from = self.eat_keyword(Keyword::From);
        let source = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;

        Ok(Expression::Function(Box::new(Function::Trim(TrimFunction {
            specification,
            character,
            from,
            source: Box::new(source),
            span: self.span_from(start),
        }))))
    }

    /// `EVERY|ALL|ANY|SOME` over a subquery, a predicate or a collection.
    pub(super) fn parse_quantified(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        let quantifier = match self.advance().as_keyword() {
            Some(Keyword::Every) => Quantifier::Every,
            Some(Keyword::All) => Quantifier::All,
            Some(Keyword::Any) => Quantifier::Any,
            _ => Quantifier::Some,
        };

        let argument = if self.at_collection_function() {
            let (function, path) = self.parse_collection_function()?;
            QuantifiedArgument::Collection { function, path }
        } else {
            self.expect(&TokenKind::LeftParen)?;
            let argument = if starts_query(self.kind()) {
                QuantifiedArgument::Subquery(Box::new(self.parse_query_expression()?))
            } else {
                QuantifiedArgument::Predicate(Box::new(self.parse_predicate()?))
            };
            self.expect(&TokenKind::RightParen)?;
            argument
        };

        Ok(Expression::Function(Box::new(Function::Quantified(
            QuantifiedFunction {
                quantifier,
                argument,
                span: self.span_from(start),
            },
        ))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CollectionFunction, DatetimeField, ExpressionOrPredicate, Predicate};

    fn parse(input: &str) -> Function {
        let mut parser = Parser::new(input);
        parser.tokenize().unwrap();
        let expr = parser.parse_expression().unwrap();
        assert!(parser.current().is_eof(), "unparsed input in {input}");
        match expr {
            Expression::Function(function) => *function,
            other => panic!("Expected function, got {other:?}"),
        }
    }

    fn generic(input: &str) -> GenericFunction {
        match parse(input) {
            Function::Generic(function) => function,
            other => panic!("Expected generic function, got {other:?}"),
        }
    }

    fn parse_err(input: &str) -> ParseError {
        let mut parser = Parser::new(input);
        parser.tokenize().unwrap();
        parser.parse_expression().unwrap_err()
    }

    #[test]
    fn test_generic_arguments() {
        assert_eq!(generic("now()").arguments, FunctionArguments::None);
        assert_eq!(generic("count(*)").arguments, FunctionArguments::Star);

        let FunctionArguments::List { distinct, args } = generic("count(DISTINCT e.dept)").arguments
        else {
            panic!("Expected argument list");
        };
        assert!(distinct);
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_predicate_argument() {
        let FunctionArguments::List { args, .. } = generic("coalesce(a = b, c)").arguments else {
            panic!("Expected argument list");
        };
        assert!(matches!(
            args[0],
            ExpressionOrPredicate::Predicate(Predicate::Relational { .. })
        ));
        assert!(matches!(args[1], ExpressionOrPredicate::Expression(_)));
    }

    #[test]
    fn test_qualified_name_and_continuation() {
        let function = generic("pkg.fn(x).attr");
        assert_eq!(function.name.to_string(), "pkg.fn");
        assert_eq!(function.continuation.unwrap().to_string(), "attr");
    }

    #[test]
    fn test_function_with_subquery() {
        let Function::WithSubquery { name, .. } = parse("array(SELECT e.id FROM Employee e)") else {
            panic!("Expected function with subquery");
        };
        assert_eq!(name.to_string(), "array");
    }

    #[test]
    fn test_filter_and_within_group() {
        let function = generic(
            "listagg(e.name, ', ') WITHIN GROUP (ORDER BY e.name DESC) ",
        );
        assert_eq!(function.within_group.unwrap().items.len(), 1);

        let function = generic("count(*) FILTER (WHERE e.active = TRUE)");
        assert_eq!(function.filter.unwrap().predicates.len(), 1);
    }

    #[test]
    fn test_over_clause() {
        let over = generic(
            "rank() OVER (PARTITION BY e.dept, e.team ORDER BY e.salary DESC \
             ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW EXCLUDE TIES)",
        )
        .over
        .unwrap();
        assert_eq!(over.partition_by.len(), 2);
        assert!(over.order_by.is_some());
        let frame = over.frame.unwrap();
        assert_eq!(frame.mode, FrameMode::Rows);
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert_eq!(frame.end, Some(FrameBound::CurrentRow));
        assert_eq!(frame.exclusion, Some(FrameExclusion::Ties));
    }

    #[test]
    fn test_empty_over_clause() {
        let over = generic("row_number() OVER ()").over.unwrap();
        assert!(over.partition_by.is_empty());
        assert!(over.order_by.is_none());
        assert!(over.frame.is_none());
    }

    #[test]
    fn test_frame_offsets() {
        let frame = generic("sum(x) OVER (ORDER BY y RANGE 2 PRECEDING EXCLUDE NO OTHERS)")
            .over
            .unwrap()
            .frame
            .unwrap();
        assert!(matches!(frame.start, FrameBound::Preceding(_)));
        assert_eq!(frame.end, None);
        assert_eq!(frame.exclusion, Some(FrameExclusion::NoOthers));
    }

    #[test]
    fn test_frame_rejects_reversed_unbounded() {
        let err = parse_err("sum(x) OVER (ROWS UNBOUNDED FOLLOWING)");
        assert!(err.expected.contains("PRECEDING"));
        let err = parse_err("sum(x) OVER (ROWS BETWEEN CURRENT ROW AND UNBOUNDED PRECEDING)");
        assert!(err.expected.contains("FOLLOWING"));
    }

    #[test]
    fn test_cast() {
        let Function::Cast(cast) = parse("CAST(e.price AS java.math.BigDecimal(10, 2))") else {
            panic!("Expected CAST");
        };
        assert_eq!(cast.target.to_string(), "java.math.BigDecimal");
        assert_eq!(cast.precision.as_deref(), Some("10"));
        assert_eq!(cast.scale.as_deref(), Some("2"));

        let Function::Cast(cast) = parse("cast(x as String)") else {
            panic!("Expected CAST");
        };
        assert!(cast.precision.is_none());
    }

    #[test]
    fn test_extract() {
        let Function::Extract(extract) = parse("EXTRACT(YEAR FROM e.born)") else {
            panic!("Expected EXTRACT");
        };
        assert_eq!(extract.field, ExtractField::Datetime(DatetimeField::Year));
        assert!(!extract.shorthand);

        let Function::Extract(extract) = parse("extract(day of week from e.born)") else {
            panic!("Expected EXTRACT");
        };
        assert!(matches!(
            extract.field,
            ExtractField::Expression(Expression::DayOfWeek { .. })
        ));
    }

    #[test]
    fn test_trim() {
        let Function::Trim(trim) = parse("TRIM(BOTH 'x' FROM e.name)") else {
            panic!("Expected TRIM");
        };
        assert_eq!(trim.specification, Some(TrimSpecification::Both));
        assert_eq!(trim.character.unwrap().value, "x");
        assert!(trim.from);

        let Function::Trim(trim) = parse("trim(e.name)") else {
            panic!("Expected TRIM");
        };
        assert!(trim.specification.is_none());
        assert!(trim.character.is_none());
        assert!(!trim.from);

        let Function::Trim(trim) = parse("TRIM(' padded ')") else {
            panic!("Expected TRIM");
        };
        assert!(trim.character.is_none());

        let Function::Trim(trim) = parse("TRIM(LEADING FROM e.name)") else {
            panic!("Expected TRIM");
        };
        assert_eq!(trim.specification, Some(TrimSpecification::Leading));
        assert!(trim.character.is_none());
        assert!(trim.from);
    }

    #[test]
    fn test_quantified() {
        let Function::Quantified(q) = parse("ALL(SELECT e.salary FROM Employee e)") else {
            panic!("Expected quantified function");
        };
        assert_eq!(q.quantifier, Quantifier::All);
        assert!(matches!(q.argument, QuantifiedArgument::Subquery(_)));

        let Function::Quantified(q) = parse("SOME ELEMENTS(o.items)") else {
            panic!("Expected quantified function");
        };
        assert!(matches!(
            q.argument,
            QuantifiedArgument::Collection {
                function: CollectionFunction::Elements,
                ..
            }
        ));

        let Function::Quantified(q) = parse("every(x.flag)") else {
            panic!("Expected quantified function");
        };
        assert!(q.quantifier.is_universal());
        assert!(matches!(q.argument, QuantifiedArgument::Predicate(_)));
    }
}
