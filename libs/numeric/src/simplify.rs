//! Calculation simplifier
//!
//! Bottom-up, single-pass term rewriting to the canonical minimal form:
//! fixed-ratio units convert to their group's canonical unit, nested
//! sums/products flatten, same-unit terms fold, double negation and double
//! inversion cancel, and dimensional products collapse through the
//! sum-value form. The simplifier is total: an under-resolved tree (for
//! example a percentage with no reference) comes back unreduced rather
//! than failing.

use std::collections::HashMap;

use crate::sum::create_sum_value;
use crate::unit;
use crate::value::{NumericValue, UnitValue};

/// Optional resolution context supplied by a layout/geometry collaborator.
/// Both members are expected in canonical units.
#[derive(Debug, Clone, Default)]
pub struct SimplifyContext {
    /// Concrete basis for resolving percentages.
    pub percentage_reference: Option<UnitValue>,
    /// Concrete font size for resolving `em`.
    pub font_size: Option<UnitValue>,
}

/// Reduce a numeric-value tree to canonical minimal form. Never fails.
pub fn simplify(value: &NumericValue, ctx: &SimplifyContext) -> NumericValue {
    match value {
        NumericValue::Unit(u) => NumericValue::Unit(simplify_unit(u, ctx)),
        NumericValue::Sum(values) => simplify_sum(values, ctx),
        NumericValue::Product(values) => simplify_product(values, ctx),
        NumericValue::Negate(inner) => match simplify(inner, ctx) {
            NumericValue::Unit(u) => NumericValue::Unit(UnitValue::new(-u.value, u.unit)),
            NumericValue::Negate(inner) => *inner,
            child => NumericValue::Negate(Box::new(child)),
        },
        NumericValue::Invert(inner) => match simplify(inner, ctx) {
            NumericValue::Invert(inner) => *inner,
            child => NumericValue::Invert(Box::new(child)),
        },
        NumericValue::Min(values) => fold_extremum(values, ctx, f64::min, NumericValue::Min),
        NumericValue::Max(values) => fold_extremum(values, ctx, f64::max, NumericValue::Max),
        keyword @ NumericValue::Keyword(_) => keyword.clone(),
    }
}

/// Resolve a unit value against the context, then against the fixed
/// conversion table.
fn simplify_unit(u: &UnitValue, ctx: &SimplifyContext) -> UnitValue {
    if u.unit == "percent" {
        if let Some(reference) = &ctx.percentage_reference {
            return UnitValue::new(reference.value * (u.value / 100.0), reference.unit.clone());
        }
    }
    if u.unit == "em" {
        if let Some(font_size) = &ctx.font_size {
            return UnitValue::new(u.value * font_size.value, font_size.unit.clone());
        }
    }
    match unit::to_canonical(u.value, &u.unit) {
        Some((value, canonical)) => UnitValue::new(value, canonical),
        None => u.clone(),
    }
}

/// Simplify a sum: flatten nested sums, fold same-unit terms (zero-valued
/// terms are kept; they still carry unit identity), unwrap singletons.
fn simplify_sum(values: &[NumericValue], ctx: &SimplifyContext) -> NumericValue {
    let mut flat = Vec::with_capacity(values.len());
    for value in values {
        match simplify(value, ctx) {
            NumericValue::Sum(inner) => flat.extend(inner),
            child => flat.push(child),
        }
    }

    let mut out: Vec<NumericValue> = Vec::with_capacity(flat.len());
    let mut slot_by_unit: HashMap<String, usize> = HashMap::new();
    for child in flat {
        match child {
            NumericValue::Unit(u) => match slot_by_unit.get(&u.unit) {
                Some(&slot) => {
                    if let NumericValue::Unit(existing) = &mut out[slot] {
                        existing.value += u.value;
                    }
                }
                None => {
                    slot_by_unit.insert(u.unit.clone(), out.len());
                    out.push(NumericValue::Unit(u));
                }
            },
            child => out.push(child),
        }
    }

    if out.len() == 1 {
        // out is non-empty here; Sum children are never removed, only folded.
        out.remove(0)
    } else {
        NumericValue::Sum(out)
    }
}

/// Simplify a product: flatten nested products, fold plain numbers,
/// distribute a number over an all-numeric sum, and collapse dimensional
/// products through the sum-value form.
fn simplify_product(values: &[NumericValue], ctx: &SimplifyContext) -> NumericValue {
    let mut flat = Vec::with_capacity(values.len());
    for value in values {
        match simplify(value, ctx) {
            NumericValue::Product(inner) => flat.extend(inner),
            child => flat.push(child),
        }
    }

    // Fold two or more plain-number children into one, at the position of
    // the first.
    let number_count = flat.iter().filter(|c| is_number(c)).count();
    if number_count >= 2 {
        let mut product = 1.0;
        let mut folded = Vec::with_capacity(flat.len() - number_count + 1);
        let mut slot = None;
        for child in flat {
            match child {
                NumericValue::Unit(u) if u.unit == "number" => {
                    product *= u.value;
                    if slot.is_none() {
                        slot = Some(folded.len());
                        folded.push(NumericValue::number(1.0)); // placeholder
                    }
                }
                child => folded.push(child),
            }
        }
        if let Some(slot) = slot {
            folded[slot] = NumericValue::number(product);
        }
        flat = folded;
    }

    // Distribute {number, sum of unit values} into the sum.
    if flat.len() == 2 {
        let distributed = match (&flat[0], &flat[1]) {
            (NumericValue::Unit(n), NumericValue::Sum(sum)) if n.unit == "number" => {
                distribute(n.value, sum)
            }
            (NumericValue::Sum(sum), NumericValue::Unit(n)) if n.unit == "number" => {
                distribute(n.value, sum)
            }
            _ => None,
        };
        if let Some(values) = distributed {
            return simplify_sum(&values, ctx);
        }
    }

    // A product made entirely of canonical unit values (or their inverses)
    // has a well-defined dimensional product.
    let collapsible = flat.iter().all(|child| match child {
        NumericValue::Unit(u) => unit::is_canonical(&u.unit),
        NumericValue::Invert(inner) => match inner.as_ref() {
            NumericValue::Unit(u) => unit::is_canonical(&u.unit),
            _ => false,
        },
        _ => false,
    });
    if collapsible {
        if let Ok(terms) = create_sum_value(&NumericValue::Product(flat.clone())) {
            if terms.len() == 1 {
                let term = &terms[0];
                if term.units.is_empty() {
                    return NumericValue::number(term.value);
                }
                if let Some((name, 1)) = term.units.iter().next() {
                    if term.units.len() == 1 {
                        return NumericValue::unit(term.value, name.clone());
                    }
                }
            }
        }
    }

    if flat.len() == 1 {
        flat.remove(0)
    } else {
        NumericValue::Product(flat)
    }
}

fn distribute(factor: f64, sum: &[NumericValue]) -> Option<Vec<NumericValue>> {
    let mut out = Vec::with_capacity(sum.len());
    for child in sum {
        match child {
            NumericValue::Unit(u) => out.push(NumericValue::unit(factor * u.value, &*u.unit)),
            _ => return None,
        }
    }
    Some(out)
}

fn is_number(value: &NumericValue) -> bool {
    matches!(value, NumericValue::Unit(u) if u.unit == "number")
}

/// Simplify min/max: fold same-unit, non-percent unit values per group.
///
/// Percentage children are deliberately left unfolded: a percentage may
/// resolve against a negative or variable basis, which could invert the
/// comparison.
fn fold_extremum(
    values: &[NumericValue],
    ctx: &SimplifyContext,
    op: fn(f64, f64) -> f64,
    rebuild: fn(Vec<NumericValue>) -> NumericValue,
) -> NumericValue {
    let mut out: Vec<NumericValue> = Vec::with_capacity(values.len());
    let mut slot_by_unit: HashMap<String, usize> = HashMap::new();

    for value in values {
        match simplify(value, ctx) {
            NumericValue::Unit(u) if u.unit != "percent" => match slot_by_unit.get(&u.unit) {
                Some(&slot) => {
                    if let NumericValue::Unit(existing) = &mut out[slot] {
                        existing.value = op(existing.value, u.value);
                    }
                }
                None => {
                    slot_by_unit.insert(u.unit.clone(), out.len());
                    out.push(NumericValue::Unit(u));
                }
            },
            child => out.push(child),
        }
    }

    if out.len() == 1 {
        out.remove(0)
    } else {
        rebuild(out)
    }
}
