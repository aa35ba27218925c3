//! Output rendering for statements, tokens and errors.

use std::fmt::Write as _;

use clap::ValueEnum;
use oxide_hql_core::ast::Statement;
use oxide_hql_core::lexer::Position;
use oxide_hql_core::{ParseError, Token, TokenKind};

/// How a parsed statement is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed `Debug` tree.
    Debug,
    /// Pretty-printed JSON.
    Json,
    /// Canonical HQL text.
    Hql,
}

/// Renders a statement in the requested format.
pub fn statement(statement: &Statement, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Debug => Ok(format!("{statement:#?}")),
        OutputFormat::Json => serde_json::to_string_pretty(statement),
        OutputFormat::Hql => Ok(statement.to_string()),
    }
}

/// One line per token: `line:column kind lexeme`. The end-of-input token
/// is left out.
pub fn tokens(tokens: &[Token], input: &str) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| !t.is_eof()) {
        let position = Position::locate(input, token.span.start);
        let _ = writeln!(
            out,
            "{}:{} {} {}",
            position.line,
            position.column,
            kind_label(&token.kind),
            token.lexeme(input)
        );
    }
    out
}

fn kind_label(kind: &TokenKind) -> String {
    let label = match kind {
        TokenKind::Keyword(keyword) => return format!("keyword({})", keyword.as_str()),
        TokenKind::Integer(_) => "integer",
        TokenKind::Float(_) => "float",
        TokenKind::Hex(_) => "hex",
        TokenKind::String(_) => "string",
        TokenKind::JavaString(_) => "java-string",
        TokenKind::Character(_) => "character",
        TokenKind::Binary(_) => "binary",
        TokenKind::Spel(_) => "spel",
        TokenKind::Identifier(_) => "identifier",
        TokenKind::QuotedIdentifier(_) => "quoted-identifier",
        TokenKind::Eof => "eof",
        _ => "punctuation",
    };
    label.to_string()
}

/// Renders a parse error with the offending source line and a caret
/// under the reported span.
pub fn error(error: &ParseError, input: &str) -> String {
    let mut out = format!("error: {}\n", error.message);
    let position = error.position;
    let _ = writeln!(out, " --> {position}");

    let source_line = input.lines().nth(position.line.saturating_sub(1)).unwrap_or("");
    let gutter = position.line.to_string();
    let pad = " ".repeat(gutter.len());
    let width = error.span.len().max(1);
    let _ = writeln!(out, "{pad} |");
    let _ = writeln!(out, "{gutter} | {source_line}");
    let _ = writeln!(
        out,
        "{pad} | {}{}",
        " ".repeat(position.column.saturating_sub(1)),
        "^".repeat(width)
    );

    if !error.expected.is_empty() {
        let expected: Vec<&str> = error.expected.iter().map(String::as_str).collect();
        let _ = writeln!(out, "{pad} = expected: {}", expected.join(", "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_hql_core::Lexer;

    #[test]
    fn test_statement_formats() {
        let statement = oxide_hql_core::parse("select e from Employee e where e.id = 1").unwrap();
        assert_eq!(
            super::statement(&statement, OutputFormat::Hql).unwrap(),
            "SELECT e FROM Employee e WHERE e.id = 1"
        );
        let debug = super::statement(&statement, OutputFormat::Debug).unwrap();
        assert!(debug.starts_with("Select("));
        let json = super::statement(&statement, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("Select").is_some());
    }

    #[test]
    fn test_tokens_listing() {
        let input = "SELECT e\nFROM `Order` e WHERE e.x >= :p";
        let listing = tokens(&Lexer::new(input).tokenize().unwrap(), input);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines[0], "1:1 keyword(SELECT) SELECT");
        assert_eq!(lines[1], "1:8 identifier e");
        assert_eq!(lines[2], "2:1 keyword(FROM) FROM");
        assert_eq!(lines[3], "2:6 quoted-identifier `Order`");
        assert!(lines.contains(&"2:26 punctuation >="));
        assert!(!listing.contains("eof"));
    }

    #[test]
    fn test_error_rendering() {
        let input = "SELECT e\nFROM Employee e\nWHERE e.age > FROM";
        let err = oxide_hql_core::parse(input).unwrap_err();
        let rendered = error(&err, input);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("error: Unexpected FROM"));
        assert_eq!(lines[1], " --> line 3, column 15");
        assert_eq!(lines[3], "3 | WHERE e.age > FROM");
        assert_eq!(lines[4], "  |               ^^^^");
        assert!(lines[5].starts_with("  = expected: "));
    }

    #[test]
    fn test_lexical_error_rendering() {
        let input = "SELECT 'open";
        let err = oxide_hql_core::parse(input).unwrap_err();
        let rendered = error(&err, input);
        assert!(rendered.contains("Unterminated string"));
        assert!(!rendered.contains("expected:"));
    }
}
