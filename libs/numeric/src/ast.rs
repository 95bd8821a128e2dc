//! Arithmetic AST for calc-style expressions
//!
//! Internal, ephemeral representation between component values and the
//! public numeric-value tree. Sum and Product are n-ary; the compiler
//! rewrites subtraction and division into Negate/Invert at reduction time,
//! so flattening only ever sees Sum and Product.

use crate::component::ComponentValue;

/// A node of the calc expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcNode {
    Sum(Vec<CalcNode>),
    Product(Vec<CalcNode>),
    Negate(Box<CalcNode>),
    Invert(Box<CalcNode>),
    /// An unreified operand: a token, nested function, or block.
    Leaf(ComponentValue),
}
