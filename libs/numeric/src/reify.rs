//! Reification - parsed syntax to the numeric-value domain model
//!
//! Converts a parsed `calc`/`min`/`max` construct or leaf token into a
//! numeric-value tree, then applies the simplifier. A top-level math
//! function always returns a math node: a bare unit value result is
//! re-wrapped in a 1-ary sum.

use crate::ast::CalcNode;
use crate::component::{parse_component_value, ComponentValue, FunctionValue};
use crate::error::{Error, Result};
use crate::lexer::tokenize;
use crate::parser::compile_expression;
use crate::simplify::{simplify, SimplifyContext};
use crate::token::CssToken;
use crate::types::NumericType;
use crate::value::NumericValue;

/// Parse calc-style text into a numeric value.
///
/// Accepts a single unit literal (`"10px"`, `"50%"`, `"3.5"`) or a math
/// function (`calc(...)`, `min(...)`, `max(...)`). Malformed input is a
/// `Syntax` error; structurally valid input whose values cannot combine is
/// a `Type` error.
pub fn parse(input: &str) -> Result<NumericValue> {
    parse_tokens(&tokenize(input))
}

/// Parse a pre-tokenized sequence into a numeric value.
pub fn parse_tokens(tokens: &[CssToken]) -> Result<NumericValue> {
    let component = parse_component_value(tokens)?;
    match &component {
        ComponentValue::Function(function) if is_math_function(&function.name) => {
            let value = reify_math_function(function)?;
            let reduced = simplify(&value, &SimplifyContext::default());
            // calc() contract: a math function always yields a math node.
            match reduced {
                NumericValue::Unit(u) => Ok(NumericValue::Sum(vec![NumericValue::Unit(u)])),
                reduced => Ok(reduced),
            }
        }
        component => reify_component(component),
    }
}

fn is_math_function(name: &str) -> bool {
    name.eq_ignore_ascii_case("calc")
        || name.eq_ignore_ascii_case("min")
        || name.eq_ignore_ascii_case("max")
}

/// Reify a math function: `calc` takes one argument, `min`/`max` take a
/// comma-separated list, each argument its own calc body.
fn reify_math_function(function: &FunctionValue) -> Result<NumericValue> {
    if function.name.eq_ignore_ascii_case("calc") {
        return reify_calc_body(&function.values);
    }

    let mut arguments = Vec::new();
    for argument in split_arguments(&function.values) {
        arguments.push(reify_calc_body(argument)?);
    }
    if function.name.eq_ignore_ascii_case("min") {
        NumericValue::min_of(arguments)
    } else {
        NumericValue::max_of(arguments)
    }
}

/// Split function values on top-level commas. Nested commas live inside
/// already-grouped functions/blocks and are not seen here.
fn split_arguments(values: &[ComponentValue]) -> Vec<&[ComponentValue]> {
    let mut arguments = Vec::new();
    let mut start = 0;
    for (i, value) in values.iter().enumerate() {
        if matches!(value, ComponentValue::Token(CssToken::Comma)) {
            arguments.push(&values[start..i]);
            start = i + 1;
        }
    }
    arguments.push(&values[start..]);
    arguments
}

/// Compile and reify one calc argument.
pub(crate) fn reify_calc_body(values: &[ComponentValue]) -> Result<NumericValue> {
    reify_node(compile_expression(values)?)
}

fn reify_node(node: CalcNode) -> Result<NumericValue> {
    match node {
        CalcNode::Sum(values) => {
            NumericValue::sum(values.into_iter().map(reify_node).collect::<Result<_>>()?)
        }
        CalcNode::Product(values) => {
            NumericValue::product(values.into_iter().map(reify_node).collect::<Result<_>>()?)
        }
        CalcNode::Negate(inner) => NumericValue::negate(reify_node(*inner)?),
        CalcNode::Invert(inner) => NumericValue::invert(reify_node(*inner)?),
        CalcNode::Leaf(component) => reify_component(&component),
    }
}

fn reify_component(component: &ComponentValue) -> Result<NumericValue> {
    match component {
        ComponentValue::Token(token) => reify_token(token),
        ComponentValue::Block(block) if block.open == CssToken::OpenParen => {
            reify_calc_body(&block.values)
        }
        ComponentValue::Function(function) if is_math_function(&function.name) => {
            reify_math_function(function)
        }
        ComponentValue::Function(function) => Err(Error::Syntax(format!(
            "unsupported function '{}'",
            function.name
        ))),
        component => Err(Error::Syntax(format!(
            "unexpected component value: {component:?}"
        ))),
    }
}

fn reify_token(token: &CssToken) -> Result<NumericValue> {
    match token {
        // A unitless zero is a length in CSS; non-zero numbers stay plain.
        CssToken::Number { value, .. } if *value == 0.0 => Ok(NumericValue::unit(0.0, "px")),
        CssToken::Number { value, .. } => Ok(NumericValue::number(*value)),
        CssToken::Percentage(value) => Ok(NumericValue::unit(*value, "percent")),
        CssToken::Dimension { value, unit, .. } => {
            let unit = unit.to_ascii_lowercase();
            // Unrecognized units are syntax errors, not delayed type errors.
            NumericType::of_unit(&unit)?;
            Ok(NumericValue::unit(*value, unit))
        }
        CssToken::Ident(name) if name.eq_ignore_ascii_case("e") => {
            Ok(NumericValue::number(std::f64::consts::E))
        }
        CssToken::Ident(name) if name.eq_ignore_ascii_case("pi") => {
            Ok(NumericValue::number(std::f64::consts::PI))
        }
        CssToken::Ident(name) => Err(Error::Syntax(format!("unresolvable identifier '{name}'"))),
        token => Err(Error::Syntax(format!("unexpected token: {token:?}"))),
    }
}
