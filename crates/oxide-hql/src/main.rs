//! oxide-hql CLI
//!
//! Command-line tool for parsing and checking HQL/JPQL queries.

mod batch;
mod render;

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_hql_core::parser::{DEFAULT_OPERATOR_LIMIT, DEFAULT_RECURSION_LIMIT};
use oxide_hql_core::{Lexer, ParseError, ParserConfig};

use render::OutputFormat;

/// Parse and check HQL/JPQL queries.
#[derive(Parser)]
#[command(name = "oxide-hql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Maximum nesting depth of a query.
    #[arg(long, env = "OXIDE_HQL_RECURSION_LIMIT", default_value_t = DEFAULT_RECURSION_LIMIT)]
    recursion_limit: usize,

    /// Maximum number of chained operators in a query.
    #[arg(long, env = "OXIDE_HQL_OPERATOR_LIMIT", default_value_t = DEFAULT_OPERATOR_LIMIT)]
    operator_limit: usize,

    /// Maximum number of tokens in a query (unlimited if not specified).
    #[arg(long, env = "OXIDE_HQL_TOKEN_LIMIT")]
    token_limit: Option<usize>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a query and print its syntax tree.
    Parse {
        /// Query text (read from stdin if not specified).
        query: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Debug)]
        format: OutputFormat,
    },

    /// Print the tokens of a query, one per line.
    Tokens {
        /// Query text (read from stdin if not specified).
        query: Option<String>,
    },

    /// Check every query in the given files.
    Check {
        /// Files holding queries separated by `;` or blank lines.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            recursion_limit: self.recursion_limit,
            operator_limit: self.operator_limit,
            token_limit: self.token_limit,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the rendered output.
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.parser_config();
    debug!(
        recursion_limit = config.recursion_limit,
        operator_limit = config.operator_limit,
        token_limit = ?config.token_limit,
        "parser configuration"
    );

    match cli.command {
        Commands::Parse { query, format } => {
            let text = read_query(query)?;
            match oxide_hql_core::parse_with_config(&text, &config) {
                Ok(statement) => {
                    println!("{}", render::statement(&statement, format)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    eprint!("{}", render::error(&error, &text));
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Tokens { query } => {
            let text = read_query(query)?;
            match Lexer::new(&text).tokenize() {
                Ok(tokens) => {
                    print!("{}", render::tokens(&tokens, &text));
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    eprint!("{}", render::error(&ParseError::from(error), &text));
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Check { files } => {
            let mut total = 0;
            let mut failed = 0;
            for path in &files {
                let report = batch::check_file(path, &config)?;
                print!("{}", report.render());
                total += report.checks.len();
                failed += report.failures();
            }
            let ok = total - failed;
            println!("{total} queries checked, {ok} ok, {failed} failed");
            Ok(if failed == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Returns the query argument, or all of stdin when it is absent.
fn read_query(query: Option<String>) -> anyhow::Result<String> {
    if let Some(query) = query {
        return Ok(query);
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("failed to read query from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "oxide-hql",
            "--recursion-limit",
            "32",
            "--operator-limit",
            "64",
            "--token-limit",
            "500",
            "parse",
            "--format",
            "json",
            "FROM Employee",
        ])
        .unwrap();
        let config = cli.parser_config();
        assert_eq!(config.recursion_limit, 32);
        assert_eq!(config.operator_limit, 64);
        assert_eq!(config.token_limit, Some(500));
        let Commands::Parse { query, format } = cli.command else {
            panic!("Expected parse command");
        };
        assert_eq!(query.as_deref(), Some("FROM Employee"));
        assert_eq!(format, OutputFormat::Json);
    }

    #[test]
    fn test_check_requires_files() {
        assert!(Cli::try_parse_from(["oxide-hql", "check"]).is_err());
        let cli = Cli::try_parse_from(["oxide-hql", "check", "a.hql", "b.hql"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { files } if files.len() == 2));
    }
}
