//! Component-value grouping
//!
//! Nests a flat token sequence into functions and simple blocks. Grouping
//! itself never fails (a missing close token degrades to "gather until end
//! of input"); the only errors are at the outer boundary: empty input, or
//! more than one component value remaining after trimming whitespace.

use crate::error::{Error, Result};
use crate::token::CssToken;

/// A component value: a preserved token, a function, or a simple block.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    Token(CssToken),
    Function(FunctionValue),
    Block(SimpleBlock),
}

/// A function with its ordered argument values, e.g. `calc(...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionValue {
    pub name: String,
    pub values: Vec<ComponentValue>,
}

/// A `()`, `[]` or `{}` block with its ordered contents.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
    /// The open token this block was started by.
    pub open: CssToken,
    pub values: Vec<ComponentValue>,
}

/// Parse a token sequence into exactly one component value.
///
/// Surrounding whitespace is trimmed. Empty input, or any non-whitespace
/// token remaining after the first component value, is a syntax error.
pub fn parse_component_value(tokens: &[CssToken]) -> Result<ComponentValue> {
    let mut cursor = 0;
    skip_whitespace(tokens, &mut cursor);

    if cursor >= tokens.len() {
        return Err(Error::Syntax("empty input".into()));
    }

    let value = consume_component(tokens, &mut cursor);

    skip_whitespace(tokens, &mut cursor);
    if cursor < tokens.len() {
        return Err(Error::Syntax(format!(
            "unexpected input after value: {:?}",
            tokens[cursor]
        )));
    }

    Ok(value)
}

/// Consume one component value starting at `cursor`.
fn consume_component(tokens: &[CssToken], cursor: &mut usize) -> ComponentValue {
    let token = tokens[*cursor].clone();
    *cursor += 1;

    match token {
        CssToken::Function(name) => {
            let values = consume_until(tokens, cursor, &CssToken::CloseParen);
            ComponentValue::Function(FunctionValue { name, values })
        }
        open @ (CssToken::OpenParen | CssToken::OpenBracket | CssToken::OpenBrace) => {
            // mirror() is Some for every open-bracket token
            let close = open.mirror().unwrap_or(CssToken::CloseParen);
            let values = consume_until(tokens, cursor, &close);
            ComponentValue::Block(SimpleBlock { open, values })
        }
        token => ComponentValue::Token(token),
    }
}

/// Gather nested component values until the matching close token or end of
/// input. A missing close token degrades rather than errors.
fn consume_until(tokens: &[CssToken], cursor: &mut usize, close: &CssToken) -> Vec<ComponentValue> {
    let mut values = Vec::new();
    while *cursor < tokens.len() {
        if &tokens[*cursor] == close {
            *cursor += 1;
            return values;
        }
        values.push(consume_component(tokens, cursor));
    }
    values
}

fn skip_whitespace(tokens: &[CssToken], cursor: &mut usize) {
    while tokens.get(*cursor) == Some(&CssToken::Whitespace) {
        *cursor += 1;
    }
}
