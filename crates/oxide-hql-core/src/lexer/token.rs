//! Token types for the HQL lexer.

use std::fmt;

use super::Span;

macro_rules! define_keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        /// HQL keywords.
        ///
        /// Almost every keyword is soft: the lexer always tags the spelling
        /// with its keyword identity and the parser decides per call site
        /// whether it acts as syntax or as an ordinary name.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        #[allow(missing_docs)]
        pub enum Keyword {
            $($variant,)*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const KEYWORDS: &'static [Self] = &[$(Self::$variant,)*];

            /// Attempts to parse a keyword from a string (case-insensitive).
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            /// Returns the canonical (upper-case) spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)*
                }
            }
        }
    };
}

define_keywords! {
    Abs => "ABS",
    All => "ALL",
    And => "AND",
    Any => "ANY",
    As => "AS",
    Asc => "ASC",
    Avg => "AVG",
    Between => "BETWEEN",
    Both => "BOTH",
    Breadth => "BREADTH",
    By => "BY",
    Case => "CASE",
    Cast => "CAST",
    Ceiling => "CEILING",
    Coalesce => "COALESCE",
    Collate => "COLLATE",
    Concat => "CONCAT",
    Count => "COUNT",
    Cross => "CROSS",
    Cube => "CUBE",
    Current => "CURRENT",
    CurrentDate => "CURRENT_DATE",
    CurrentInstant => "CURRENT_INSTANT",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",
    Cycle => "CYCLE",
    Date => "DATE",
    Datetime => "DATETIME",
    Day => "DAY",
    Default => "DEFAULT",
    Delete => "DELETE",
    Depth => "DEPTH",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Element => "ELEMENT",
    Elements => "ELEMENTS",
    Else => "ELSE",
    Empty => "EMPTY",
    End => "END",
    Entry => "ENTRY",
    Epoch => "EPOCH",
    Error => "ERROR",
    Escape => "ESCAPE",
    Every => "EVERY",
    Except => "EXCEPT",
    Exclude => "EXCLUDE",
    Exists => "EXISTS",
    Exp => "EXP",
    Extract => "EXTRACT",
    False => "FALSE",
    Fetch => "FETCH",
    Filter => "FILTER",
    First => "FIRST",
    Fk => "FK",
    Floor => "FLOOR",
    Following => "FOLLOWING",
    For => "FOR",
    Format => "FORMAT",
    From => "FROM",
    Full => "FULL",
    Function => "FUNCTION",
    Group => "GROUP",
    Groups => "GROUPS",
    Having => "HAVING",
    Hour => "HOUR",
    Id => "ID",
    Ignore => "IGNORE",
    Ilike => "ILIKE",
    In => "IN",
    Index => "INDEX",
    Indices => "INDICES",
    Inner => "INNER",
    Insert => "INSERT",
    Instant => "INSTANT",
    Intersect => "INTERSECT",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Key => "KEY",
    Last => "LAST",
    Lateral => "LATERAL",
    Leading => "LEADING",
    Left => "LEFT",
    Length => "LENGTH",
    Like => "LIKE",
    Limit => "LIMIT",
    List => "LIST",
    Listagg => "LISTAGG",
    Ln => "LN",
    Local => "LOCAL",
    LocalDate => "LOCAL_DATE",
    LocalDatetime => "LOCAL_DATETIME",
    LocalTime => "LOCAL_TIME",
    Locate => "LOCATE",
    Lower => "LOWER",
    Map => "MAP",
    Materialized => "MATERIALIZED",
    Max => "MAX",
    Maxelement => "MAXELEMENT",
    Maxindex => "MAXINDEX",
    Member => "MEMBER",
    Microsecond => "MICROSECOND",
    Millisecond => "MILLISECOND",
    Min => "MIN",
    Minelement => "MINELEMENT",
    Minindex => "MININDEX",
    Minute => "MINUTE",
    Mod => "MOD",
    Month => "MONTH",
    Nanosecond => "NANOSECOND",
    Naturalid => "NATURALID",
    New => "NEW",
    Next => "NEXT",
    No => "NO",
    Not => "NOT",
    Null => "NULL",
    Nullif => "NULLIF",
    Nulls => "NULLS",
    Object => "OBJECT",
    Of => "OF",
    Offset => "OFFSET",
    OffsetDatetime => "OFFSET_DATETIME",
    On => "ON",
    Only => "ONLY",
    Or => "OR",
    Order => "ORDER",
    Others => "OTHERS",
    Outer => "OUTER",
    Over => "OVER",
    Overflow => "OVERFLOW",
    Overlay => "OVERLAY",
    Pad => "PAD",
    Partition => "PARTITION",
    Percent => "PERCENT",
    Placing => "PLACING",
    Position => "POSITION",
    Power => "POWER",
    Preceding => "PRECEDING",
    Quarter => "QUARTER",
    Range => "RANGE",
    Respect => "RESPECT",
    Right => "RIGHT",
    Rollup => "ROLLUP",
    Row => "ROW",
    Rows => "ROWS",
    Search => "SEARCH",
    Second => "SECOND",
    Select => "SELECT",
    Set => "SET",
    Sign => "SIGN",
    Size => "SIZE",
    Some => "SOME",
    Sqrt => "SQRT",
    Start => "START",
    Substring => "SUBSTRING",
    Sum => "SUM",
    Then => "THEN",
    Ties => "TIES",
    Time => "TIME",
    Timestamp => "TIMESTAMP",
    TimezoneHour => "TIMEZONE_HOUR",
    TimezoneMinute => "TIMEZONE_MINUTE",
    To => "TO",
    Trailing => "TRAILING",
    Treat => "TREAT",
    Trim => "TRIM",
    True => "TRUE",
    Trunc => "TRUNC",
    Truncate => "TRUNCATE",
    Type => "TYPE",
    Unbounded => "UNBOUNDED",
    Union => "UNION",
    Update => "UPDATE",
    Upper => "UPPER",
    Using => "USING",
    Value => "VALUE",
    Values => "VALUES",
    Version => "VERSION",
    Versioned => "VERSIONED",
    Week => "WEEK",
    When => "WHEN",
    Where => "WHERE",
    With => "WITH",
    Within => "WITHIN",
    Without => "WITHOUT",
    Year => "YEAR",
}

impl Keyword {
    /// Keywords that always denote a literal and never a name.
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Null | Self::True | Self::False)
    }

    /// Keywords that introduce or delimit a clause, or act as an operator.
    ///
    /// These cannot start a bare path or serve as an alias without `AS`.
    /// They remain usable as names after `.`, before `(` and after `AS`.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Group
                | Self::Having
                | Self::Order
                | Self::Union
                | Self::Intersect
                | Self::Except
                | Self::Limit
                | Self::Offset
                | Self::Fetch
                | Self::Join
                | Self::Inner
                | Self::Left
                | Self::Right
                | Self::Full
                | Self::Outer
                | Self::Cross
                | Self::On
                | Self::Set
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::And
                | Self::Or
                | Self::Not
                | Self::As
                | Self::By
                | Self::Is
                | Self::In
                | Self::Between
                | Self::Like
                | Self::Ilike
                | Self::Escape
                | Self::Member
                | Self::Exists
                | Self::Asc
                | Self::Desc
                | Self::Nulls
                | Self::With
                | Self::Within
                | Self::Over
                | Self::Filter
                | Self::Values
                | Self::Into
                | Self::Distinct
        ) || self.is_literal()
    }

    /// Keywords naming a date/time field (`YEAR` ... `EPOCH`).
    #[must_use]
    pub const fn is_datetime_field(&self) -> bool {
        matches!(
            self,
            Self::Year
                | Self::Month
                | Self::Day
                | Self::Week
                | Self::Quarter
                | Self::Hour
                | Self::Minute
                | Self::Second
                | Self::Nanosecond
                | Self::Epoch
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    // Literals
    /// Integer literal, lexeme kept verbatim (e.g. `42`, `10L`, `7BI`).
    Integer(String),
    /// Floating point literal, lexeme kept verbatim (e.g. `1.5`, `2e3F`, `3.0BD`).
    Float(String),
    /// Hexadecimal literal, lexeme kept verbatim (e.g. `0xFF`).
    Hex(String),
    /// Single-quoted string, `''` unescaped.
    String(String),
    /// Double-quoted Java-style string, backslash escapes decoded.
    JavaString(String),
    /// Single-quoted one-character literal (e.g. `'x'`).
    Character(char),
    /// Binary literal `X'0A1B'`, holding the hex digits.
    Binary(String),
    /// SpEL block `#{...}`, holding the text between the braces.
    Spel(String),

    // Names
    /// Plain identifier.
    Identifier(String),
    /// Backtick-quoted identifier, holding the text between the backticks.
    QuotedIdentifier(String),
    /// Keyword.
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ||
    Concat,
    /// =
    Eq,
    /// <>
    LtGt,
    /// !=
    BangEq,
    /// ^=
    CaretEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// .
    Dot,
    /// ;
    Semicolon,
    /// :
    Colon,
    /// ?
    Question,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Describes the token for diagnostics (`FROM`, `identifier 'x'`, `'('`).
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(text) | Self::Float(text) | Self::Hex(text) => {
                format!("number {text}")
            }
            Self::String(value) | Self::JavaString(value) => format!("string '{value}'"),
            Self::Character(c) => format!("character '{c}'"),
            Self::Binary(hex) => format!("binary X'{hex}'"),
            Self::Spel(text) => format!("SpEL #{{{text}}}"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::QuotedIdentifier(name) => format!("identifier `{name}`"),
            Self::Keyword(kw) => kw.as_str().to_string(),
            Self::Eof => "end of input".to_string(),
            punct => format!("'{}'", punct.symbol()),
        }
    }

    /// Returns the fixed spelling of punctuation and operator tokens.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Concat => "||",
            Self::Eq => "=",
            Self::LtGt => "<>",
            Self::BangEq => "!=",
            Self::CaretEq => "^=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Question => "?",
            _ => "",
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the source text of the token.
    #[must_use]
    pub fn lexeme<'a>(&self, input: &'a str) -> &'a str {
        self.span.slice(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("Local_DateTime"), Some(Keyword::LocalDatetime));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_round_trips_through_spelling() {
        for kw in Keyword::KEYWORDS {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(*kw));
        }
        assert!(Keyword::KEYWORDS.len() > 170);
    }

    #[test]
    fn test_keyword_classification() {
        assert!(Keyword::From.is_reserved());
        assert!(Keyword::Null.is_reserved());
        assert!(!Keyword::Count.is_reserved());
        assert!(!Keyword::Value.is_reserved());
        assert!(Keyword::True.is_literal());
        assert!(!Keyword::Select.is_literal());
        assert!(Keyword::Epoch.is_datetime_field());
        assert!(!Keyword::Date.is_datetime_field());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TokenKind::Keyword(Keyword::From).describe(), "FROM");
        assert_eq!(
            TokenKind::Identifier("foo".into()).describe(),
            "identifier 'foo'"
        );
        assert_eq!(TokenKind::LeftParen.describe(), "'('");
        assert_eq!(TokenKind::Eof.describe(), "end of input");
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
        assert!(Token::new(TokenKind::Eof, Span::new(6, 6)).is_eof());
    }
}
