//! Literal and path parsing.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BinaryLiteral, DateTimeLiteral, DateTimeScope, Expression, GeneralPath, IndexedAccess,
    Literal, NumericKind, NumericLiteral, Path, SimplePath, StringLiteral, StringStyle,
    TreatedPath,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Returns true if the current token starts a literal.
    pub(super) fn at_literal(&self) -> bool {
        match self.kind() {
            TokenKind::Integer(_)
            | TokenKind::Float(_)
            | TokenKind::Hex(_)
            | TokenKind::String(_)
            | TokenKind::JavaString(_)
            | TokenKind::Character(_)
            | TokenKind::Binary(_)
            | TokenKind::LeftBrace => true,
            TokenKind::Keyword(kw) => kw.is_literal() || self.datetime_literal_len().is_some(),
            _ => false,
        }
    }

    /// Parses a literal as an expression.
    pub(super) fn parse_literal_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.start();
        let value = self.parse_literal()?;
        Ok(Expression::literal(value, self.span_from(start)))
    }

    /// Parses a literal.
    pub(super) fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        if let Some(numeric) = self.parse_numeric_literal() {
            return Ok(Literal::Numeric(numeric));
        }
        if let Some(string) = self.parse_string_literal() {
            return Ok(Literal::String(string));
        }
        match self.kind().clone() {
            TokenKind::Binary(hex) => {
                self.advance();
                Ok(Literal::Binary(BinaryLiteral::Hex(hex)))
            }
            TokenKind::LeftBrace => self.parse_binary_list(),
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Literal::Null)
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Literal::Boolean(true))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Literal::Boolean(false))
            }
            _ => match self.parse_datetime_literal() {
                Some(literal) => Ok(Literal::DateTime(literal)),
                None => Err(self.unexpected("literal")),
            },
        }
    }

    /// Consumes an integer, float or hex token.
    pub(super) fn parse_numeric_literal(&mut self) -> Option<NumericLiteral> {
        let numeric = match self.kind() {
            TokenKind::Integer(text) => NumericLiteral::new(NumericKind::Integer, text.clone()),
            TokenKind::Float(text) => NumericLiteral::new(NumericKind::Float, text.clone()),
            TokenKind::Hex(text) => NumericLiteral::new(NumericKind::Hex, text.clone()),
            _ => return None,
        };
        self.advance();
        Some(numeric)
    }

    /// Consumes a string or character token.
    pub(super) fn parse_string_literal(&mut self) -> Option<StringLiteral> {
        let string = match self.kind() {
            TokenKind::String(value) => StringLiteral {
                value: value.clone(),
                style: StringStyle::Single,
            },
            TokenKind::JavaString(value) => StringLiteral {
                value: value.clone(),
                style: StringStyle::Double,
            },
            TokenKind::Character(c) => StringLiteral {
                value: c.to_string(),
                style: StringStyle::Character,
            },
            _ => return None,
        };
        self.advance();
        Some(string)
    }

    /// `{0x01, 0x02, ...}`
    fn parse_binary_list(&mut self) -> Result<Literal, ParseError> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut bytes = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Hex(text) => {
                    bytes.push(text.clone());
                    self.advance();
                }
                _ => return Err(self.unexpected("hexadecimal literal")),
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(Literal::Binary(BinaryLiteral::List(bytes)))
    }

    /// Number of tokens making up a date/time literal at the current
    /// position.
    ///
    /// A spelling followed by `.` or `(` is a path or a function call
    /// instead.
    fn datetime_literal_len(&self) -> Option<usize> {
        let len = match self.kind() {
            TokenKind::Keyword(
                Keyword::LocalDate
                | Keyword::LocalTime
                | Keyword::LocalDatetime
                | Keyword::CurrentDate
                | Keyword::CurrentTime
                | Keyword::CurrentTimestamp
                | Keyword::OffsetDatetime
                | Keyword::Instant,
            ) => 1,
            TokenKind::Keyword(Keyword::Local | Keyword::Current)
                if matches!(
                    self.nth_kind(1),
                    TokenKind::Keyword(Keyword::Date | Keyword::Time | Keyword::Datetime)
                ) =>
            {
                2
            }
            TokenKind::Keyword(Keyword::Offset) if self.check_nth_keyword(1, Keyword::Datetime) => {
                2
            }
            _ => return None,
        };
        match self.nth_kind(len) {
            TokenKind::Dot | TokenKind::LeftParen => None,
            _ => Some(len),
        }
    }

    fn parse_datetime_literal(&mut self) -> Option<DateTimeLiteral> {
        let len = self.datetime_literal_len()?;
        let first = self.advance().as_keyword()?;
        if len == 1 {
            return match first {
                Keyword::LocalDate => Some(DateTimeLiteral::LocalDate),
                Keyword::LocalTime => Some(DateTimeLiteral::LocalTime),
                Keyword::LocalDatetime => Some(DateTimeLiteral::LocalDateTime),
                Keyword::CurrentDate => Some(DateTimeLiteral::CurrentDate),
                Keyword::CurrentTime => Some(DateTimeLiteral::CurrentTime),
                Keyword::CurrentTimestamp => Some(DateTimeLiteral::CurrentTimestamp),
                Keyword::OffsetDatetime => Some(DateTimeLiteral::OffsetDateTime),
                _ => Some(DateTimeLiteral::Instant),
            };
        }
        let scope = match first {
            Keyword::Local => DateTimeScope::Local,
            Keyword::Current => DateTimeScope::Current,
            _ => DateTimeScope::Offset,
        };
        match self.advance().as_keyword()? {
            Keyword::Date => Some(DateTimeLiteral::Date(scope)),
            Keyword::Time => Some(DateTimeLiteral::Time(scope)),
            _ => Some(DateTimeLiteral::DateTime(scope)),
        }
    }

    // ==================== Paths ====================

    /// `identifier ('.' identifier)*`
    pub(super) fn parse_simple_path(&mut self) -> Result<SimplePath, ParseError> {
        let start = self.start();
        let mut segments = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Dot) {
            self.advance();
            segments.push(self.parse_identifier()?);
        }
        Ok(SimplePath {
            segments,
            span: self.span_from(start),
        })
    }

    /// A general path starting from an already parsed simple path:
    /// `path ['[' expression ']' ['.' generalPath]]`.
    pub(super) fn parse_general_path_from(
        &mut self,
        path: SimplePath,
    ) -> Result<GeneralPath, ParseError> {
        let start = path.span.start;
        let index = if self.eat(&TokenKind::LeftBracket) {
            let index = self.parse_expression()?;
            self.expect(&TokenKind::RightBracket)?;
            let continuation = if self.eat(&TokenKind::Dot) {
                Some(self.nested(Self::parse_general_path)?)
            } else {
                None
            };
            Some(Box::new(IndexedAccess {
                index,
                continuation,
            }))
        } else {
            None
        };
        Ok(GeneralPath {
            path,
            index,
            span: self.span_from(start),
        })
    }

    /// `simplePath ['[' expression ']' ['.' generalPath]]`
    pub(super) fn parse_general_path(&mut self) -> Result<GeneralPath, ParseError> {
        let path = self.parse_simple_path()?;
        self.parse_general_path_from(path)
    }

    /// A general path or `TREAT(path AS Type)['.' simplePath]`.
    pub(super) fn parse_path(&mut self) -> Result<Path, ParseError> {
        if self.check_keyword(Keyword::Treat) && self.check_nth(1, &TokenKind::LeftParen) {
            return self.parse_treated_path().map(Path::Treated);
        }
        self.parse_general_path().map(Path::General)
    }

    pub(super) fn parse_treated_path(&mut self) -> Result<TreatedPath, ParseError> {
        let start = self.start();
        self.expect_keyword(Keyword::Treat)?;
        self.expect(&TokenKind::LeftParen)?;
        let path = self.nested(Self::parse_path)?;
        self.expect_keyword(Keyword::As)?;
        let treat_as = self.parse_simple_path()?;
        self.expect(&TokenKind::RightParen)?;
        let continuation = if self.eat(&TokenKind::Dot) {
            Some(self.parse_simple_path()?)
        } else {
            None
        };
        Ok(TreatedPath {
            path: Box::new(path),
            treat_as,
            continuation,
            span: self.span_from(start),
        })
    }
}
