//! Shunting-Yard compiler - component values to arithmetic AST
//!
//! Two-stack operator-precedence parsing over one calc-style argument.
//! Precedence: `*` `/` = 4, `+` `-` = 2, parenthesis sentinel = 6. An
//! operator whose precedence is less than or equal to the stack top (and
//! the top is not a sentinel) pops and reduces first. Reduction builds
//! n-ary Sum/Product nodes, flattening same-kind operands, and rewrites
//! `a - b` as `a + (-b)` and `a / b` as `a * (1/b)`.
//!
//! A single bare operand is returned as a leaf; it is the reifier's job to
//! interpret it.

use crate::ast::CalcNode;
use crate::component::ComponentValue;
use crate::error::{Error, Result};
use crate::token::CssToken;

fn precedence(op: char) -> u8 {
    match op {
        '(' => 6,
        '*' | '/' => 4,
        _ => 2, // '+' and '-'
    }
}

/// Compile the component values of one calc argument into a single AST
/// node. Fails on unbalanced parentheses and missing operands.
pub fn compile_expression(values: &[ComponentValue]) -> Result<CalcNode> {
    let mut operators: Vec<char> = Vec::new();
    let mut operands: Vec<CalcNode> = Vec::new();

    for value in values {
        match value {
            ComponentValue::Token(CssToken::Whitespace) => {}
            ComponentValue::Token(CssToken::Delim(op @ ('+' | '-' | '*' | '/'))) => {
                while let Some(&top) = operators.last() {
                    if top != '(' && precedence(*op) <= precedence(top) {
                        operators.pop();
                        reduce(top, &mut operands)?;
                    } else {
                        break;
                    }
                }
                operators.push(*op);
            }
            // Ungrouped parentheses can appear in pre-tokenized input.
            ComponentValue::Token(CssToken::OpenParen) => operators.push('('),
            ComponentValue::Token(CssToken::CloseParen) => loop {
                match operators.pop() {
                    Some('(') => break,
                    Some(op) => reduce(op, &mut operands)?,
                    None => return Err(Error::Syntax("unbalanced ')'".into())),
                }
            },
            operand => operands.push(CalcNode::Leaf(operand.clone())),
        }
    }

    while let Some(op) = operators.pop() {
        if op == '(' {
            return Err(Error::Syntax("unbalanced '('".into()));
        }
        reduce(op, &mut operands)?;
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(node), true) => Ok(node),
        (Some(_), false) => Err(Error::Syntax("expected a single expression".into())),
        (None, _) => Err(Error::Syntax("empty calc expression".into())),
    }
}

/// Pop two operands and apply `op`, flattening same-kind nodes.
fn reduce(op: char, operands: &mut Vec<CalcNode>) -> Result<()> {
    let right = operands
        .pop()
        .ok_or_else(|| Error::Syntax(format!("missing operand for '{op}'")))?;
    let left = operands
        .pop()
        .ok_or_else(|| Error::Syntax(format!("missing operand for '{op}'")))?;

    let node = match op {
        '+' => flatten_sum(left, right),
        '-' => flatten_sum(left, CalcNode::Negate(Box::new(right))),
        '*' => flatten_product(left, right),
        _ => flatten_product(left, CalcNode::Invert(Box::new(right))),
    };
    operands.push(node);
    Ok(())
}

fn flatten_sum(left: CalcNode, right: CalcNode) -> CalcNode {
    match left {
        CalcNode::Sum(mut values) => {
            values.push(right);
            CalcNode::Sum(values)
        }
        left => CalcNode::Sum(vec![left, right]),
    }
}

fn flatten_product(left: CalcNode, right: CalcNode) -> CalcNode {
    match left {
        CalcNode::Product(mut values) => {
            values.push(right);
            CalcNode::Product(values)
        }
        left => CalcNode::Product(vec![left, right]),
    }
}
