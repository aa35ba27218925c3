//! Parser limits.

/// Default maximum nesting depth.
pub const DEFAULT_RECURSION_LIMIT: usize = 128;

/// Default maximum number of chained operators.
pub const DEFAULT_OPERATOR_LIMIT: usize = 2048;

/// Resource limits applied to a single parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of subqueries, parenthesized groups, `CASE`
    /// expressions, function arguments and predicates.
    pub recursion_limit: usize,
    /// Maximum number of operators folded onto a left operand across the
    /// whole statement: `+`, `AND`, `OR`, duration units and the like.
    /// Each one adds a level to the tree.
    pub operator_limit: usize,
    /// Maximum number of tokens accepted, if any.
    pub token_limit: Option<usize>,
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            operator_limit: DEFAULT_OPERATOR_LIMIT,
            token_limit: None,
        }
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn with_recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = recursion_limit;
        self
    }

    /// Sets the maximum number of chained operators.
    #[must_use]
    pub const fn with_operator_limit(mut self, operator_limit: usize) -> Self {
        self.operator_limit = operator_limit;
        self
    }

    /// Sets the token budget.
    #[must_use]
    pub const fn with_token_limit(mut self, token_limit: usize) -> Self {
        self.token_limit = Some(token_limit);
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ParserConfig::default()
            .with_recursion_limit(8)
            .with_operator_limit(64)
            .with_token_limit(100);
        assert_eq!(config.recursion_limit, 8);
        assert_eq!(config.operator_limit, 64);
        assert_eq!(config.token_limit, Some(100));
        assert_eq!(ParserConfig::new().recursion_limit, DEFAULT_RECURSION_LIMIT);
        assert_eq!(ParserConfig::new().operator_limit, DEFAULT_OPERATOR_LIMIT);
        assert_eq!(ParserConfig::new().token_limit, None);
    }
}
