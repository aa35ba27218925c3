//! Checking files that hold many queries.
//!
//! Queries are separated by `;` or by a blank line. Separators inside
//! quotes and `--` comments do not count.

use std::path::{Path, PathBuf};

use anyhow::Context;
use oxide_hql_core::lexer::Position;
use oxide_hql_core::{Lexer, ParseError, ParserConfig};
use tracing::debug;

/// A query cut out of a larger text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchQuery<'a> {
    /// Where the query starts in the text.
    pub position: Position,
    /// The query, without surrounding whitespace or separator.
    pub text: &'a str,
}

/// Splits `input` into its queries.
///
/// Chunks holding nothing but comments and whitespace are skipped.
pub fn split_queries(input: &str) -> Vec<BatchQuery<'_>> {
    let mut queries = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut line_is_blank = true;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if let Some(open) = quote {
            if c == open {
                quote = None;
            } else if c == '\\' && open == '"' {
                chars.next();
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                line_is_blank = false;
            }
            '-' if chars.peek().is_some_and(|&(_, next)| next == '-') => {
                while chars.next_if(|&(_, next)| next != '\n').is_some() {}
                line_is_blank = false;
            }
            ';' => {
                push_query(&mut queries, input, start, idx);
                start = idx + 1;
                line_is_blank = false;
            }
            '\n' => {
                if line_is_blank {
                    push_query(&mut queries, input, start, idx);
                    start = idx + 1;
                }
                line_is_blank = true;
            }
            c if c.is_whitespace() => {}
            _ => line_is_blank = false,
        }
    }
    push_query(&mut queries, input, start, input.len());
    queries
}

fn push_query<'a>(queries: &mut Vec<BatchQuery<'a>>, input: &'a str, start: usize, end: usize) {
    let chunk = &input[start..end];
    let text = chunk.trim();
    if text.is_empty() || is_comment_only(text) {
        return;
    }
    let offset = start + (chunk.len() - chunk.trim_start().len());
    queries.push(BatchQuery {
        position: Position::locate(input, offset),
        text,
    });
}

fn is_comment_only(text: &str) -> bool {
    Lexer::new(text)
        .tokenize()
        .is_ok_and(|tokens| tokens.iter().all(oxide_hql_core::Token::is_eof))
}

/// The outcome of checking one query.
#[derive(Debug)]
pub struct QueryCheck {
    /// Where the query starts in its file.
    pub position: Position,
    /// The failure, with its position translated to file coordinates.
    pub error: Option<ParseError>,
}

/// The outcome of checking one file.
#[derive(Debug)]
pub struct FileReport {
    /// The checked file.
    pub path: PathBuf,
    /// One entry per query, in file order.
    pub checks: Vec<QueryCheck>,
}

impl FileReport {
    /// Number of queries that failed to parse.
    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| c.error.is_some()).count()
    }

    /// Renders one `path:line:column: ok|error` line per query.
    pub fn render(&self) -> String {
        let path = self.path.display();
        self.checks
            .iter()
            .map(|check| match &check.error {
                None => format!(
                    "{path}:{}:{}: ok\n",
                    check.position.line, check.position.column
                ),
                Some(error) => format!(
                    "{path}:{}:{}: error: {}\n",
                    error.position.line, error.position.column, error.message
                ),
            })
            .collect()
    }
}

/// Parses every query of `text`.
pub fn check_text(path: &Path, text: &str, config: &ParserConfig) -> FileReport {
    let queries = split_queries(text);
    debug!(path = %path.display(), queries = queries.len(), "checking file");
    let checks = queries
        .into_iter()
        .map(|query| QueryCheck {
            position: query.position,
            error: oxide_hql_core::parse_with_config(query.text, config)
                .err()
                .map(|error| relocate(error, query.position)),
        })
        .collect();
    FileReport {
        path: path.to_path_buf(),
        checks,
    }
}

/// Reads and checks one file.
pub fn check_file(path: &Path, config: &ParserConfig) -> anyhow::Result<FileReport> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(check_text(path, &text, config))
}

/// Moves an error reported against a single query to the coordinates of
/// the file holding it.
fn relocate(mut error: ParseError, origin: Position) -> ParseError {
    if error.position.line == 1 {
        error.position.column += origin.column - 1;
    }
    error.position.line += origin.line - 1;
    error.position.offset += origin.offset;
    error.span.start += origin.offset;
    error.span.end += origin.offset;
    error
}
