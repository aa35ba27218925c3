//! HQL Parser implementation.

use tracing::{debug, trace};

use super::config::ParserConfig;
use super::error::ParseError;
use crate::ast::{Identifier, IdentifierStyle, Statement, Variable};
use crate::lexer::{Keyword, Lexer, Span, Token, TokenKind};

static EOF_TOKEN: Token = Token::new(TokenKind::Eof, Span::new(0, 0));

/// HQL Parser.
///
/// ```
/// use oxide_hql_core::ast::Statement;
/// use oxide_hql_core::Parser;
///
/// let statement = Parser::new("DELETE FROM Employee e WHERE e.active = false")
///     .parse_statement()
///     .unwrap();
/// assert!(matches!(statement, Statement::Delete(_)));
/// ```
pub struct Parser<'a> {
    input: &'a str,
    config: ParserConfig,
    tokens: Vec<Token>,
    pos: usize,
    /// Current nesting depth.
    depth: usize,
    /// Operators folded onto a left operand so far.
    operators: usize,
    /// The furthest failure of an abandoned alternative.
    furthest: Option<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, ParserConfig::default())
    }

    /// Creates a new parser with explicit limits.
    #[must_use]
    pub fn with_config(input: &'a str, config: ParserConfig) -> Self {
        Self {
            input,
            config,
            tokens: Vec::new(),
            pos: 0,
            depth: 0,
            operators: 0,
            furthest: None,
        }
    }

    /// Parses a single HQL statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid HQL statement or
    /// exceeds the configured limits.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        self.pos = 0;
        self.depth = 0;
        self.operators = 0;
        self.furthest = None;
        match self.parse_complete_statement() {
            Ok(statement) => Ok(statement),
            Err(error) => Err(self.finish_error(error)),
        }
    }

    /// Splits the input into tokens and enforces the token budget.
    pub(super) fn tokenize(&mut self) -> Result<(), ParseError> {
        self.tokens = Lexer::new(self.input).tokenize()?;
        let token_count = self.tokens.len().saturating_sub(1);
        debug!(
            input_len = self.input.len(),
            token_count, "parsing HQL statement"
        );
        if let Some(limit) = self.config.token_limit {
            if token_count > limit {
                debug!(limit, token_count, "token limit exceeded");
                let span = self.tokens.get(limit).map_or(Span::default(), |t| t.span);
                return Err(ParseError::token_limit(limit, span));
            }
        }
        Ok(())
    }

    fn parse_complete_statement(&mut self) -> Result<Statement, ParseError> {
        self.tokenize()?;
        let statement = match self.kind() {
            TokenKind::Keyword(Keyword::Update) => Statement::Update(self.parse_update()?),
            TokenKind::Keyword(Keyword::Delete) => Statement::Delete(self.parse_delete()?),
            TokenKind::Keyword(Keyword::Insert) => Statement::Insert(self.parse_insert()?),
            _ => Statement::Select(self.parse_query_expression()?),
        };

        self.eat(&TokenKind::Semicolon);
        if !self.current().is_eof() {
            return Err(self.unexpected("end of input"));
        }
        debug!(kind = statement.kind_name(), "parsed statement");
        Ok(statement)
    }

    /// Picks the error that got furthest and attaches its line and column.
    fn finish_error(&mut self, error: ParseError) -> ParseError {
        let error = match self.furthest.take() {
            Some(furthest) if error.is_recoverable() => {
                if furthest.offset() > error.offset() {
                    furthest
                } else if furthest.offset() == error.offset() {
                    let mut error = error;
                    error.merge(furthest);
                    error
                } else {
                    error
                }
            }
            _ => error,
        };
        error.locate(self.input)
    }

    // ==================== Token access ====================

    /// Returns the token `n` positions ahead, or the end-of-input token.
    pub(super) fn nth(&self, n: usize) -> &Token {
        self.tokens
            .get(self.pos + n)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Returns the current token.
    pub(super) fn current(&self) -> &Token {
        self.nth(0)
    }

    /// Returns the kind of the current token.
    pub(super) fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    /// Returns the kind of the token `n` positions ahead.
    pub(super) fn nth_kind(&self, n: usize) -> &TokenKind {
        &self.nth(n).kind
    }

    /// Returns the source text of a token.
    pub(super) fn lexeme(&self, token: &Token) -> &'a str {
        token.lexeme(self.input)
    }

    /// Byte offset where the current token starts.
    pub(super) fn start(&self) -> usize {
        self.current().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        let end = self
            .tokens
            .get(self.pos.wrapping_sub(1))
            .map_or(start, |t| t.span.end);
        Span::new(start, end.max(start))
    }

    /// Advances to the next token and returns the consumed one.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        self.kind() == kind
    }

    /// Checks if the token `n` positions ahead matches the given kind.
    pub(super) fn check_nth(&self, n: usize, kind: &TokenKind) -> bool {
        self.nth_kind(n) == kind
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check_nth_keyword(0, keyword)
    }

    /// Checks if the token `n` positions ahead is the given keyword.
    pub(super) fn check_nth_keyword(&self, n: usize, keyword: Keyword) -> bool {
        matches!(self.nth_kind(n), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the current token if it matches.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects a specific token kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    /// Expects a specific keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    /// Builds an error for the current token.
    pub(super) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        if token.is_eof() {
            ParseError::unexpected_eof(expected, token.span)
        } else {
            ParseError::unexpected(expected, &token.kind, token.span)
        }
    }

    // ==================== Nesting and backtracking ====================

    /// Runs `f` one nesting level deeper.
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.recursion_limit {
            debug!(
                limit = self.config.recursion_limit,
                offset = self.start(),
                "recursion limit exceeded"
            );
            return Err(ParseError::recursion_limit(
                self.config.recursion_limit,
                self.current().span,
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Accounts for one more operator folded onto a left operand.
    ///
    /// Chains such as `a + b + c` nest to the left without recursing in the
    /// parser, so they are limited separately from nesting.
    pub(super) fn chain_operator(&mut self) -> Result<(), ParseError> {
        if self.operators >= self.config.operator_limit {
            debug!(
                limit = self.config.operator_limit,
                offset = self.start(),
                "operator limit exceeded"
            );
            return Err(ParseError::operator_limit(
                self.config.operator_limit,
                self.current().span,
            ));
        }
        self.operators += 1;
        Ok(())
    }

    /// Tries `f`; on a syntax error rewinds to where it started and
    /// returns `None`.
    ///
    /// The failure is remembered so that the final error can point at the
    /// furthest position any alternative reached.
    pub(super) fn speculate<T>(
        &mut self,
        alternative: &str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Option<T>, ParseError> {
        let pos = self.pos;
        let depth = self.depth;
        let operators = self.operators;
        match f(self) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_recoverable() => {
                trace!(
                    alternative,
                    offset = error.offset(),
                    reason = %error.message,
                    "backtracking"
                );
                self.pos = pos;
                self.depth = depth;
                self.operators = operators;
                self.record_failure(error);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    fn record_failure(&mut self, error: ParseError) {
        match &mut self.furthest {
            Some(furthest) if furthest.offset() > error.offset() => {}
            Some(furthest) if furthest.offset() == error.offset() => furthest.merge(error),
            _ => self.furthest = Some(error),
        }
    }

    // ==================== Names ====================

    /// Parses any name: an identifier, a backtick-quoted identifier, a
    /// SpEL block, or any keyword other than `NULL`, `TRUE` and `FALSE`.
    pub(super) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.current().clone();
        let (value, style) = match &token.kind {
            TokenKind::Identifier(name) => (name.clone(), IdentifierStyle::Plain),
            TokenKind::QuotedIdentifier(name) => (name.clone(), IdentifierStyle::Backtick),
            TokenKind::Spel(text) => (text.clone(), IdentifierStyle::Spel),
            TokenKind::Keyword(kw) if !kw.is_literal() => {
                (self.lexeme(&token).to_string(), IdentifierStyle::Plain)
            }
            _ => return Err(self.unexpected("identifier")),
        };
        self.advance();
        Ok(Identifier {
            value,
            style,
            span: token.span,
        })
    }

    /// Parses an optional alias: `AS name` or a bare non-reserved name.
    pub(super) fn parse_variable(&mut self) -> Result<Option<Variable>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            let name = self.parse_identifier()?;
            return Ok(Some(Variable {
                name,
                explicit_as: true,
            }));
        }
        if is_soft_identifier(self.kind()) {
            let name = self.parse_identifier()?;
            return Ok(Some(Variable {
                name,
                explicit_as: false,
            }));
        }
        Ok(None)
    }

    /// Checks whether the tokens after a run of `(` start a query.
    pub(super) fn query_after_parens(&self) -> bool {
        let mut n = 0;
        while self.check_nth(n, &TokenKind::LeftParen) {
            n += 1;
        }
        n > 0 && starts_query(self.nth_kind(n))
    }
}

/// Any token usable as a name.
pub(super) fn is_identifier(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) | TokenKind::Spel(_) => true,
        TokenKind::Keyword(kw) => !kw.is_literal(),
        _ => false,
    }
}

/// A name that may stand alone, without `AS` or a following `.` or `(`.
pub(super) fn is_soft_identifier(kind: &TokenKind) -> bool {
    match kind {
        TokenKind::Keyword(kw) => !kw.is_reserved(),
        other => is_identifier(other),
    }
}

/// Tokens that open a query: `SELECT`, `FROM` or `WITH`.
pub(super) const fn starts_query(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Keyword(Keyword::Select | Keyword::From | Keyword::With)
    )
}
