//! HQL lexer
//!
//! A hand-written lexer that turns query text into a token stream. Keyword
//! spellings are tagged with their identity; whether a keyword acts as syntax
//! or as a name is decided by the parser.

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{LexError, Lexer};
