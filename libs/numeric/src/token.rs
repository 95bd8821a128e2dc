//! Token types for the CSS tokenizer
//!
//! The closed set of tokens from CSS Syntax Level 3 that the engine
//! consumes. Tokens are ephemeral: they only live long enough to be
//! grouped into component values.

/// A CSS token.
#[derive(Debug, Clone, PartialEq)]
pub enum CssToken {
    Ident(String),
    /// A function name immediately followed by `(`, e.g. `calc(`.
    Function(String),
    AtKeyword(String),
    Hash(String),
    String(String),
    BadString,
    Url(String),
    BadUrl,
    /// Any code point with no token of its own.
    Delim(char),
    Number {
        value: f64,
        is_integer: bool,
    },
    Percentage(f64),
    Dimension {
        value: f64,
        is_integer: bool,
        unit: String,
    },
    /// A run of whitespace, collapsed to a single token.
    Whitespace,
    /// `<!--`
    Cdo,
    /// `-->`
    Cdc,
    Colon,
    Semicolon,
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
}

impl CssToken {
    /// The close token matching an open-bracket token, if this is one.
    pub fn mirror(&self) -> Option<CssToken> {
        match self {
            CssToken::OpenParen => Some(CssToken::CloseParen),
            CssToken::OpenBracket => Some(CssToken::CloseBracket),
            CssToken::OpenBrace => Some(CssToken::CloseBrace),
            _ => None,
        }
    }
}
