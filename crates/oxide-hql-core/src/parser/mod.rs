//! HQL Parser
//!
//! A hand-written recursive descent parser with precedence climbing for
//! expressions and predicates.
//!
//! Ambiguous prefixes are resolved with bounded lookahead. The few places
//! that need more (a `((` that may open a nested query, `year(x)` that may
//! be an `EXTRACT` shorthand) parse speculatively and rewind on failure.

mod config;
mod error;
mod expression;
mod from;
mod function;
mod literal;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod predicate;
mod query;
mod statement;

pub use config::{ParserConfig, DEFAULT_OPERATOR_LIMIT, DEFAULT_RECURSION_LIMIT};
pub use error::{ParseError, ParseErrorKind};
pub use parser::Parser;
