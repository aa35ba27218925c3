//! # oxide-hql-core
//!
//! A hand-written parser for the HQL/JPQL object query language.
//!
//! This crate provides:
//! - A lexer that classifies keywords while keeping them usable as names
//! - A recursive descent parser with precedence climbing for expressions
//!   and predicates
//! - A syntax tree whose `Display` output is canonical HQL, and a visitor
//!   for walking it
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_hql_core::ast::{QueryBody, Statement};
//!
//! let statement = oxide_hql_core::parse(
//!     "SELECT e FROM Employee e WHERE e.salary > 50000 ORDER BY e.name ASC",
//! )
//! .unwrap();
//!
//! let Statement::Select(query) = &statement else { unreachable!() };
//! assert!(matches!(query.first.body, QueryBody::Query(_)));
//! assert_eq!(
//!     statement.to_string(),
//!     "SELECT e FROM Employee e WHERE e.salary > 50000 ORDER BY e.name ASC"
//! );
//! ```
//!
//! ## Limits
//!
//! Nesting depth, chained operators and token count are bounded per call,
//! so hostile input fails with an error instead of exhausting the stack:
//!
//! ```rust
//! use oxide_hql_core::{ParseErrorKind, ParserConfig};
//!
//! let config = ParserConfig::new().with_recursion_limit(8);
//! let query = format!("SELECT {}1{}", "(".repeat(20), ")".repeat(20));
//! let error = oxide_hql_core::parse_with_config(&query, &config).unwrap_err();
//! assert_eq!(error.kind, ParseErrorKind::RecursionLimitExceeded);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::Statement;
pub use lexer::{Keyword, LexError, Lexer, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind, Parser, ParserConfig};

/// Parses one HQL statement with the default limits.
///
/// # Errors
///
/// Returns a `ParseError` if `text` is not a valid statement.
pub fn parse(text: &str) -> Result<Statement, ParseError> {
    Parser::new(text).parse_statement()
}

/// Parses one HQL statement with explicit limits.
///
/// # Errors
///
/// Returns a `ParseError` if `text` is not a valid statement or exceeds the
/// limits in `config`.
pub fn parse_with_config(text: &str, config: &ParserConfig) -> Result<Statement, ParseError> {
    Parser::with_config(text, *config).parse_statement()
}
