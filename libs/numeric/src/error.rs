//! Error types for the numeric-value engine

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing or combining numeric values.
///
/// Tokenizing and component grouping never fail; failures surface at the
/// "parse a component value" boundary (`Syntax`) and at the reification /
/// type-algebra boundary (`Type`). The simplifier is total and returns an
/// unreduced tree instead of raising.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Type error: {0}")]
    Type(String),
}
