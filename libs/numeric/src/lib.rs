#![forbid(unsafe_code)]

//! Typed CSS numeric-value arithmetic
//!
//! Parses `calc()`/`min()`/`max()` expressions from text or pre-tokenized
//! input, builds a typed expression tree over the fixed unit groups
//! (lengths, angles, time, frequency, resolution, flex, percentages and
//! plain numbers), and reduces that tree to a canonical minimal form.
//!
//! # Pipeline
//!
//! ```text
//! Text
//!   |
//! Tokenizer -> CssToken sequence
//!   |
//! Grouper -> one ComponentValue
//!   |
//! Shunting-Yard -> n-ary CalcNode AST
//!   |
//! Reifier -> NumericValue tree (type-checked)
//!   |
//! Simplifier -> canonical NumericValue
//! ```
//!
//! Every stage is a pure, terminating computation over immutable inputs;
//! the only shared state is the compile-time unit tables.
//!
//! # Example
//!
//! ```
//! use cassia_numeric::parse;
//!
//! let value = parse("calc(10px + 5px)").unwrap();
//! assert_eq!(value.to("px").unwrap().value, 15.0);
//! ```

pub mod ast;
pub mod component;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reify;
pub mod simplify;
pub mod sum;
pub mod token;
pub mod types;
pub mod unit;
pub mod value;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::tokenize;
pub use reify::{parse, parse_tokens};
pub use simplify::{simplify, SimplifyContext};
pub use sum::{create_sum_value, SumTerm};
pub use token::CssToken;
pub use types::{BaseDimension, NumericType};
pub use value::{NumericValue, UnitValue};
