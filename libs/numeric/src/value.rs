//! Public numeric-value tree
//!
//! The closed family of value nodes produced by parsing and arithmetic:
//! a unit value, the math-operation nodes, and the terminal keyword value.
//! Trees are immutable; every transform allocates a new tree. Composite
//! constructors type-check their children, so an ill-typed node (for
//! example a sum of `px` and `deg`) fails at construction with a
//! `Type` error rather than at use.

use std::fmt;

use crate::error::{Error, Result};
use crate::sum::create_sum_value;
use crate::types::NumericType;
use crate::unit;

/// A scalar paired with a unit name. `"number"` and `"percent"` are unit
/// names like any other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitValue {
    pub value: f64,
    pub unit: String,
}

impl UnitValue {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn number(value: f64) -> Self {
        Self::new(value, "number")
    }

    pub fn numeric_type(&self) -> Result<NumericType> {
        NumericType::of_unit(&self.unit)
    }
}

impl fmt::Display for UnitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit.as_str() {
            "number" => write!(f, "{}", self.value),
            "percent" => write!(f, "{}%", self.value),
            unit => write!(f, "{}{}", self.value, unit),
        }
    }
}

/// A numeric value: the result type of any unit or math expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericValue {
    Unit(UnitValue),
    Sum(Vec<NumericValue>),
    Product(Vec<NumericValue>),
    Negate(Box<NumericValue>),
    Invert(Box<NumericValue>),
    Min(Vec<NumericValue>),
    Max(Vec<NumericValue>),
    /// Terminal, non-arithmetic value. Carries no numeric type.
    Keyword(String),
}

impl From<UnitValue> for NumericValue {
    fn from(value: UnitValue) -> Self {
        NumericValue::Unit(value)
    }
}

impl NumericValue {
    pub fn unit(value: f64, unit: impl Into<String>) -> Self {
        NumericValue::Unit(UnitValue::new(value, unit))
    }

    pub fn number(value: f64) -> Self {
        NumericValue::Unit(UnitValue::number(value))
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        NumericValue::Keyword(text.into())
    }

    /// Build a sum node. The children's types must be addable.
    pub fn sum(values: Vec<NumericValue>) -> Result<Self> {
        added_type(&values)?;
        Ok(NumericValue::Sum(values))
    }

    /// Build a product node. The children's types must multiply.
    pub fn product(values: Vec<NumericValue>) -> Result<Self> {
        multiplied_type(&values)?;
        Ok(NumericValue::Product(values))
    }

    /// Build a min node. Arguments are compared, so they must be addable.
    pub fn min_of(values: Vec<NumericValue>) -> Result<Self> {
        added_type(&values)?;
        Ok(NumericValue::Min(values))
    }

    /// Build a max node. Arguments are compared, so they must be addable.
    pub fn max_of(values: Vec<NumericValue>) -> Result<Self> {
        added_type(&values)?;
        Ok(NumericValue::Max(values))
    }

    pub fn negate(value: NumericValue) -> Result<Self> {
        value.numeric_type()?;
        Ok(NumericValue::Negate(Box::new(value)))
    }

    pub fn invert(value: NumericValue) -> Result<Self> {
        value.numeric_type()?;
        Ok(NumericValue::Invert(Box::new(value)))
    }

    /// The type of this value, computed structurally. Keyword values have
    /// no numeric type.
    pub fn numeric_type(&self) -> Result<NumericType> {
        match self {
            NumericValue::Unit(u) => u.numeric_type(),
            NumericValue::Sum(values) | NumericValue::Min(values) | NumericValue::Max(values) => {
                added_type(values)
            }
            NumericValue::Product(values) => multiplied_type(values),
            NumericValue::Negate(value) => value.numeric_type(),
            NumericValue::Invert(value) => Ok(value.numeric_type()?.invert()),
            NumericValue::Keyword(k) => {
                Err(Error::Type(format!("keyword '{k}' has no numeric type")))
            }
        }
    }

    /// Convert to a single unit value in `target`.
    ///
    /// Fails with a `Type` error unless this value flattens to exactly one
    /// sum-value term whose unit group matches `target`'s group.
    pub fn to(&self, target: &str) -> Result<UnitValue> {
        let terms = create_sum_value(self)?;
        if terms.len() != 1 {
            return Err(Error::Type(format!(
                "cannot convert a {}-term value to '{target}'",
                terms.len()
            )));
        }
        let term = &terms[0];

        let (expected, ratio) = if target == "number" {
            (None, 1.0)
        } else if let Some(meta) = unit::lookup(target) {
            match meta.ratio {
                Some(ratio) => (Some(meta.canonical), ratio),
                // Context-dependent units only match themselves.
                None => (Some(target), 1.0),
            }
        } else {
            return Err(Error::Syntax(format!("unknown unit '{target}'")));
        };

        let compatible = match expected {
            None => term.units.is_empty(),
            Some(name) => term.units.len() == 1 && term.units.get(name) == Some(&1),
        };
        if !compatible {
            return Err(Error::Type(format!(
                "value is not compatible with unit '{target}'"
            )));
        }

        Ok(UnitValue::new(term.value / ratio, target))
    }

    /// Flatten to a sum of single-unit values.
    ///
    /// Fails with a `Type` error if any term does not collapse to a single
    /// unit at exponent 1. Terms are ordered by unit name.
    pub fn to_sum(&self) -> Result<NumericValue> {
        let terms = create_sum_value(self)?;

        let mut units = Vec::with_capacity(terms.len());
        for term in &terms {
            let unit_value = match term.units.len() {
                0 => UnitValue::new(term.value, "number"),
                1 => match term.units.iter().next() {
                    Some((name, 1)) => UnitValue::new(term.value, name.clone()),
                    _ => {
                        return Err(Error::Type(
                            "term does not collapse to a single unit".into(),
                        ))
                    }
                },
                _ => {
                    return Err(Error::Type(
                        "term does not collapse to a single unit".into(),
                    ))
                }
            };
            units.push(unit_value);
        }

        units.sort_by(|a, b| a.unit.cmp(&b.unit));
        NumericValue::sum(units.into_iter().map(NumericValue::Unit).collect())
    }
}

fn added_type(values: &[NumericValue]) -> Result<NumericType> {
    let mut iter = values.iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::Type("math node requires at least one value".into()))?;
    let mut ty = first.numeric_type()?;
    for value in iter {
        ty = ty.add(&value.numeric_type()?)?;
    }
    Ok(ty)
}

fn multiplied_type(values: &[NumericValue]) -> Result<NumericType> {
    let mut iter = values.iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::Type("math node requires at least one value".into()))?;
    let mut ty = first.numeric_type()?;
    for value in iter {
        ty = ty.multiply(&value.numeric_type()?)?;
    }
    Ok(ty)
}

// Serialization renders re-parseable CSS: sums and products become calc()
// bodies, min/max serialize natively, nested math nodes are parenthesized.

/// A child rendered inside an enclosing expression.
struct Term<'a>(&'a NumericValue);

impl fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            NumericValue::Unit(u) => write!(f, "{u}"),
            NumericValue::Keyword(k) => write!(f, "{k}"),
            NumericValue::Min(_) | NumericValue::Max(_) => write!(f, "{}", self.0),
            NumericValue::Sum(values) => {
                write!(f, "(")?;
                fmt_sum_body(values, f)?;
                write!(f, ")")
            }
            NumericValue::Product(values) => {
                write!(f, "(")?;
                fmt_product_body(values, f)?;
                write!(f, ")")
            }
            NumericValue::Negate(value) => write!(f, "(-1 * {})", Term(value)),
            NumericValue::Invert(value) => write!(f, "(1 / {})", Term(value)),
        }
    }
}

/// A min()/max() argument: a full calc body without the calc() wrapper.
struct Argument<'a>(&'a NumericValue);

impl fmt::Display for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            NumericValue::Sum(values) => fmt_sum_body(values, f),
            NumericValue::Product(values) => fmt_product_body(values, f),
            NumericValue::Negate(value) => write!(f, "-1 * {}", Term(value)),
            NumericValue::Invert(value) => write!(f, "1 / {}", Term(value)),
            value => write!(f, "{}", Term(value)),
        }
    }
}

fn fmt_sum_body(values: &[NumericValue], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        match (i, value) {
            (0, NumericValue::Negate(inner)) => write!(f, "-1 * {}", Term(inner))?,
            (0, value) => write!(f, "{}", Term(value))?,
            (_, NumericValue::Negate(inner)) => write!(f, " - {}", Term(inner))?,
            (_, value) => write!(f, " + {}", Term(value))?,
        }
    }
    Ok(())
}

fn fmt_product_body(values: &[NumericValue], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        match (i, value) {
            (0, NumericValue::Invert(inner)) => write!(f, "1 / {}", Term(inner))?,
            (0, value) => write!(f, "{}", Term(value))?,
            (_, NumericValue::Invert(inner)) => write!(f, " / {}", Term(inner))?,
            (_, value) => write!(f, " * {}", Term(value))?,
        }
    }
    Ok(())
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Unit(u) => write!(f, "{u}"),
            NumericValue::Keyword(k) => write!(f, "{k}"),
            NumericValue::Sum(values) => {
                write!(f, "calc(")?;
                fmt_sum_body(values, f)?;
                write!(f, ")")
            }
            NumericValue::Product(values) => {
                write!(f, "calc(")?;
                fmt_product_body(values, f)?;
                write!(f, ")")
            }
            NumericValue::Negate(value) => write!(f, "calc(-1 * {})", Term(value)),
            NumericValue::Invert(value) => write!(f, "calc(1 / {})", Term(value)),
            NumericValue::Min(values) => fmt_arguments(f, "min", values),
            NumericValue::Max(values) => fmt_arguments(f, "max", values),
        }
    }
}

fn fmt_arguments(f: &mut fmt::Formatter<'_>, name: &str, values: &[NumericValue]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", Argument(value))?;
    }
    write!(f, ")")
}
