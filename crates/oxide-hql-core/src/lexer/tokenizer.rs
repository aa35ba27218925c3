//! HQL tokenizer implementation.

use super::{Keyword, Position, Span, Token, TokenKind};

/// A lexical error: the input cannot be split into tokens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason} at {position}")]
pub struct LexError {
    /// What went wrong.
    pub reason: String,
    /// The offending range of input.
    pub span: Span,
    /// Line and column of the start of `span`.
    pub position: Position,
}

/// A lexer that tokenizes HQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Returns the character two places ahead without advancing.
    fn peek_third(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, reason: impl Into<String>) -> LexError {
        LexError {
            reason: reason.into(),
            span: Span::new(self.start, self.pos),
            position: Position::locate(self.input, self.start),
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- line comment
            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* block comment */
            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.start = self.pos;
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(self.error("Unterminated comment")),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn is_identifier_start(c: char) -> bool {
        c.is_alphabetic() || c == '_' || c == '$'
    }

    fn is_identifier_part(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self.peek().is_some_and(Self::is_identifier_part) {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans a backtick-quoted identifier.
    fn scan_quoted_identifier(&mut self) -> Result<Token, LexError> {
        let content_start = self.pos;
        loop {
            match self.advance() {
                Some('`') => break,
                Some(_) => {}
                None => return Err(self.error("Unterminated quoted identifier")),
            }
        }
        let content = &self.input[content_start..self.pos - 1];
        Ok(self.make_token(TokenKind::QuotedIdentifier(content.to_string())))
    }

    /// Consumes an optional numeric suffix from `suffixes` (case-insensitive).
    ///
    /// A suffix only counts when it is not followed by further identifier
    /// characters.
    fn scan_suffix(&mut self, suffixes: &[&str]) -> bool {
        let rest = &self.input[self.pos..];
        for suffix in suffixes {
            let Some(candidate) = rest.get(..suffix.len()) else {
                continue;
            };
            if !candidate.eq_ignore_ascii_case(suffix) {
                continue;
            }
            let after = rest[suffix.len()..].chars().next();
            if after.is_some_and(Self::is_identifier_part) {
                continue;
            }
            self.pos += suffix.len();
            return true;
        }
        false
    }

    /// Scans a number (integer, float or hex), keeping its lexeme.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        if self.peek() == Some('0')
            && matches!(self.peek_next(), Some('x' | 'X'))
            && self.peek_third().is_some_and(|c| c.is_ascii_hexdigit())
        {
            self.advance();
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            self.scan_suffix(&["L"]);
            return self.finish_number(TokenKind::Hex);
        }

        let mut is_float = false;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let signed_digit = matches!(self.peek_next(), Some('+' | '-'))
                && self.peek_third().is_some_and(|c| c.is_ascii_digit());
            if signed_digit || self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.advance();
                }
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        if is_float {
            self.scan_suffix(&["BD", "D", "F"]);
            return self.finish_number(TokenKind::Float);
        }
        if self.scan_suffix(&["BD", "D", "F"]) {
            return self.finish_number(TokenKind::Float);
        }
        self.scan_suffix(&["BI", "L"]);
        self.finish_number(TokenKind::Integer)
    }

    fn finish_number(&mut self, kind: fn(String) -> TokenKind) -> Result<Token, LexError> {
        if self.peek().is_some_and(Self::is_identifier_part) {
            while self.peek().is_some_and(Self::is_identifier_part) {
                self.advance();
            }
            return Err(self.error(format!(
                "Invalid numeric literal: {}",
                &self.input[self.start..self.pos]
            )));
        }
        let text = self.input[self.start..self.pos].to_string();
        Ok(self.make_token(kind(text)))
    }

    /// Scans a single-quoted string; `''` stands for one quote.
    ///
    /// Exactly one character between the quotes yields a character literal.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        let mut value = String::new();
        let mut escaped = false;
        loop {
            match self.advance() {
                Some('\'') if self.peek() == Some('\'') => {
                    self.advance();
                    value.push('\'');
                    escaped = true;
                }
                Some('\'') => break,
                Some(c) => value.push(c),
                None => return Err(self.error("Unterminated string literal")),
            }
        }

        let mut chars = value.chars();
        if let (Some(c), None, false) = (chars.next(), chars.next(), escaped) {
            return Ok(self.make_token(TokenKind::Character(c)));
        }
        Ok(self.make_token(TokenKind::String(value)))
    }

    /// Scans a double-quoted Java-style string with backslash escapes.
    fn scan_java_string(&mut self) -> Result<Token, LexError> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => {
                    let escape_start = self.pos - 1;
                    let decoded = match self.advance() {
                        Some('b') => '\u{8}',
                        Some('t') => '\t',
                        Some('n') => '\n',
                        Some('f') => '\u{c}',
                        Some('r') => '\r',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('u') => self.scan_unicode_escape(escape_start)?,
                        Some(other) => {
                            return Err(LexError {
                                reason: format!("Invalid escape sequence: \\{other}"),
                                span: Span::new(escape_start, self.pos),
                                position: Position::locate(self.input, escape_start),
                            });
                        }
                        None => return Err(self.error("Unterminated string literal")),
                    };
                    value.push(decoded);
                }
                Some(c) => value.push(c),
                None => return Err(self.error("Unterminated string literal")),
            }
        }
        Ok(self.make_token(TokenKind::JavaString(value)))
    }

    fn scan_unicode_escape(&mut self, escape_start: usize) -> Result<char, LexError> {
        let digits = self.input.get(self.pos..self.pos + 4).unwrap_or("");
        let decoded = if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            u32::from_str_radix(digits, 16)
                .ok()
                .and_then(char::from_u32)
        } else {
            None
        };
        match decoded {
            Some(c) => {
                self.pos += 4;
                Ok(c)
            }
            None => Err(LexError {
                reason: "Invalid unicode escape sequence".to_string(),
                span: Span::new(escape_start, self.pos),
                position: Position::locate(self.input, escape_start),
            }),
        }
    }

    /// Scans a binary literal (`X'...'`), keeping the hex digits.
    fn scan_binary(&mut self) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let content_start = self.pos;
        loop {
            match self.peek() {
                Some('\'') => break,
                Some(c) if c.is_ascii_hexdigit() => {
                    self.advance();
                }
                Some(c) => {
                    self.advance();
                    return Err(self.error(format!("Invalid character in binary literal: {c}")));
                }
                None => return Err(self.error("Unterminated binary literal")),
            }
        }
        let digits = self.input[content_start..self.pos].to_string();
        self.advance(); // closing quote
        Ok(self.make_token(TokenKind::Binary(digits)))
    }

    /// Scans a SpEL block `#{...}`, balancing braces outside of quotes.
    fn scan_spel(&mut self) -> Result<Token, LexError> {
        self.advance(); // {
        let content_start = self.pos;
        let mut depth = 1usize;
        let mut quote: Option<char> = None;
        loop {
            let Some(c) = self.advance() else {
                return Err(self.error("Unterminated SpEL expression"));
            };
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '\'' | '"') => quote = Some(c),
                (None, '{') => depth += 1,
                (None, '}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                (None, _) => {}
            }
        }
        let content = self.input[content_start..self.pos - 1].to_string();
        Ok(self.make_token(TokenKind::Spel(content)))
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a `LexError` for unterminated literals and comments, invalid
    /// escapes and characters that cannot start any token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return Ok(self.make_token(TokenKind::Eof));
        };

        let token = match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            ':' => self.make_token(TokenKind::Colon),
            '?' => self.make_token(TokenKind::Question),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '=' => self.make_token(TokenKind::Eq),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::LtGt)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.make_token(TokenKind::BangEq)
            }
            '^' if self.peek() == Some('=') => {
                self.advance();
                self.make_token(TokenKind::CaretEq)
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                self.make_token(TokenKind::Concat)
            }
            '#' if self.peek() == Some('{') => self.scan_spel()?,
            '\'' => self.scan_string()?,
            '"' => self.scan_java_string()?,
            '`' => self.scan_quoted_identifier()?,
            'X' | 'x' if self.peek() == Some('\'') => self.scan_binary()?,
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()?
            }
            c if Self::is_identifier_start(c) => {
                self.pos = self.start;
                self.scan_identifier()
            }
            other => return Err(self.error(format!("Unexpected character: {other}"))),
        };
        Ok(token)
    }

    /// Tokenizes the entire input; the last token is always `Eof`.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn lex_err(input: &str) -> LexError {
        Lexer::new(input).tokenize().unwrap_err()
    }

    #[test]
    fn test_simple_select() {
        assert_eq!(
            kinds("SELECT e FROM Employee e"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Identifier("e".into()),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Identifier("Employee".into()),
                TokenKind::Identifier("e".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_keep_identity_case_insensitively() {
        assert_eq!(
            kinds("count Count COUNT"),
            vec![
                TokenKind::Keyword(Keyword::Count),
                TokenKind::Keyword(Keyword::Count),
                TokenKind::Keyword(Keyword::Count),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_keep_lexeme() {
        assert_eq!(
            kinds("42 10L 7BI 1.5 2e3 3.0BD 4F 0xFF 0x1fL"),
            vec![
                TokenKind::Integer("42".into()),
                TokenKind::Integer("10L".into()),
                TokenKind::Integer("7BI".into()),
                TokenKind::Float("1.5".into()),
                TokenKind::Float("2e3".into()),
                TokenKind::Float("3.0BD".into()),
                TokenKind::Float("4F".into()),
                TokenKind::Hex("0xFF".into()),
                TokenKind::Hex("0x1fL".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_path_dots_are_not_decimals() {
        assert_eq!(
            kinds("e.salary"),
            vec![
                TokenKind::Identifier("e".into()),
                TokenKind::Dot,
                TokenKind::Identifier("salary".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_spellings() {
        assert_eq!(
            kinds(r#"'it''s' "a\tb" 'x' ''''"#),
            vec![
                TokenKind::String("it's".into()),
                TokenKind::JavaString("a\tb".into()),
                TokenKind::Character('x'),
                TokenKind::String("'".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("= <> != ^= < <= > >= || + - * / %"),
            vec![
                TokenKind::Eq,
                TokenKind::LtGt,
                TokenKind::BangEq,
                TokenKind::CaretEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_parameters_and_spel() {
        assert_eq!(
            kinds(":name ?1 :#{#entity.id} ?#{[0]}"),
            vec![
                TokenKind::Colon,
                TokenKind::Identifier("name".into()),
                TokenKind::Question,
                TokenKind::Integer("1".into()),
                TokenKind::Colon,
                TokenKind::Spel("#entity.id".into()),
                TokenKind::Question,
                TokenKind::Spel("[0]".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spel_balances_braces_and_quotes() {
        assert_eq!(
            kinds("#{ {'}'} }"),
            vec![TokenKind::Spel(" {'}'} ".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_binary_and_quoted_identifier() {
        assert_eq!(
            kinds("X'0A1b' `order`"),
            vec![
                TokenKind::Binary("0A1b".into()),
                TokenKind::QuotedIdentifier("order".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a -- trailing\n/* block */ b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans() {
        let tokens = Lexer::new("SELECT  foo").tokenize().unwrap();
        assert!(tokens[1].span.same_range(&Span::new(8, 11)));
        assert_eq!(tokens[1].lexeme("SELECT  foo"), "foo");
    }

    #[test]
    fn test_unterminated_string() {
        let err = lex_err("SELECT 'abc");
        assert!(err.reason.contains("Unterminated string"));
        assert_eq!(err.position.column, 8);
    }

    #[test]
    fn test_invalid_escape() {
        let err = lex_err(r#""a\qb""#);
        assert!(err.reason.contains("Invalid escape"));
        assert_eq!(err.span.start, 2);
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex_err("SELECT a\n  FROM b WHERE a & b");
        assert!(err.reason.contains('&'));
        assert_eq!(err.position.line, 2);
    }

    #[test]
    fn test_unterminated_binary_and_spel() {
        assert!(lex_err("X'0F").reason.contains("binary"));
        assert!(lex_err("X'0G'").reason.contains("binary"));
        assert!(lex_err(":#{abc").reason.contains("SpEL"));
    }

    #[test]
    fn test_malformed_number() {
        assert!(lex_err("12abc").reason.contains("numeric"));
    }
}
