//! Sum-value conversion
//!
//! The canonical flattened form of a numeric value: an ordered list of
//! (scalar, unit-exponent-map) terms, with every fixed-ratio unit already
//! converted to its group's canonical unit. Computed on demand and never
//! persisted; it backs `to()`, `to_sum()` and the simplifier's product
//! collapse.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::unit;
use crate::value::{NumericValue, UnitValue};

/// One term of a sum value: a scalar times a product of unit powers.
/// An empty unit map is a plain number.
#[derive(Debug, Clone, PartialEq)]
pub struct SumTerm {
    pub value: f64,
    pub units: BTreeMap<String, i32>,
}

/// Flatten a numeric value into sum-value terms.
///
/// Supports unit values, negation, inversion of single-term children, sums,
/// and products of the above. Min/max and keyword values cannot be
/// expressed as a sum of units and fail with a `Type` error.
pub fn create_sum_value(value: &NumericValue) -> Result<Vec<SumTerm>> {
    match value {
        NumericValue::Unit(u) => Ok(vec![unit_term(u)]),
        NumericValue::Negate(inner) => {
            let mut terms = create_sum_value(inner)?;
            for term in &mut terms {
                term.value = -term.value;
            }
            Ok(terms)
        }
        NumericValue::Invert(inner) => {
            let mut terms = create_sum_value(inner)?;
            if terms.len() != 1 {
                return Err(Error::Type(
                    "cannot invert a value with more than one term".into(),
                ));
            }
            let mut term = terms.remove(0);
            // Division by zero propagates an IEEE-754 infinity.
            term.value = 1.0 / term.value;
            term.units = term.units.into_iter().map(|(u, e)| (u, -e)).collect();
            Ok(vec![term])
        }
        NumericValue::Sum(values) => {
            let mut terms: Vec<SumTerm> = Vec::new();
            for child in values {
                for incoming in create_sum_value(child)? {
                    merge_term(&mut terms, incoming);
                }
            }
            Ok(terms)
        }
        NumericValue::Product(values) => {
            let mut terms = vec![SumTerm {
                value: 1.0,
                units: BTreeMap::new(),
            }];
            for child in values {
                let child_terms = create_sum_value(child)?;
                let mut product = Vec::with_capacity(terms.len() * child_terms.len());
                for left in &terms {
                    for right in &child_terms {
                        product.push(multiply_terms(left, right));
                    }
                }
                terms = product;
            }
            Ok(terms)
        }
        NumericValue::Min(_) | NumericValue::Max(_) | NumericValue::Keyword(_) => Err(
            Error::Type("value cannot be expressed as a sum of units".into()),
        ),
    }
}

/// The term for a single unit value, converted to its canonical unit where
/// a fixed ratio exists. Relative units keep their own name.
fn unit_term(u: &UnitValue) -> SumTerm {
    if u.unit == "number" {
        return SumTerm {
            value: u.value,
            units: BTreeMap::new(),
        };
    }
    let (value, name) = match unit::to_canonical(u.value, &u.unit) {
        Some((value, canonical)) => (value, canonical.to_string()),
        None => (u.value, u.unit.clone()),
    };
    let mut units = BTreeMap::new();
    units.insert(name, 1);
    SumTerm { value, units }
}

/// Add a term into the list, folding into an existing term with the same
/// unit map.
fn merge_term(terms: &mut Vec<SumTerm>, incoming: SumTerm) {
    for term in terms.iter_mut() {
        if term.units == incoming.units {
            term.value += incoming.value;
            return;
        }
    }
    terms.push(incoming);
}

fn multiply_terms(left: &SumTerm, right: &SumTerm) -> SumTerm {
    let mut units = left.units.clone();
    for (name, exponent) in &right.units {
        let entry = units.entry(name.clone()).or_insert(0);
        *entry += exponent;
        if *entry == 0 {
            units.remove(name);
        }
    }
    SumTerm {
        value: left.value * right.value,
        units,
    }
}
