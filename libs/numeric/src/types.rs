//! Unit type algebra
//!
//! A `NumericType` is a vector of integer exponents over the seven base
//! dimensions plus an optional percent hint: it records what a value is
//! compatible with, never its magnitude. All operations are pure functions
//! over copies; nothing here mutates shared state.

use crate::error::{Error, Result};
use crate::unit;

/// The seven base dimensions of the CSS numeric type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseDimension {
    Percent,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Flex,
}

impl BaseDimension {
    /// All dimensions, in exponent-vector order.
    pub const ALL: [BaseDimension; 7] = [
        BaseDimension::Percent,
        BaseDimension::Length,
        BaseDimension::Angle,
        BaseDimension::Time,
        BaseDimension::Frequency,
        BaseDimension::Resolution,
        BaseDimension::Flex,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// The type of a numeric value: per-dimension exponents plus an optional
/// percent hint recording which dimension a percentage is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericType {
    exponents: [i32; 7],
    percent_hint: Option<BaseDimension>,
}

impl NumericType {
    /// The type of a plain number: all exponents zero, no hint.
    pub fn scalar() -> Self {
        Self {
            exponents: [0; 7],
            percent_hint: None,
        }
    }

    /// A type with a single dimension at exponent 1.
    pub fn single(dimension: BaseDimension) -> Self {
        let mut exponents = [0; 7];
        exponents[dimension.index()] = 1;
        Self {
            exponents,
            percent_hint: None,
        }
    }

    /// The type of a unit name: `"number"` is the scalar type, `"percent"`
    /// is {percent: 1}, every unit in the fixed table contributes its
    /// group's dimension. Unknown units are a syntax error.
    pub fn of_unit(unit_name: &str) -> Result<Self> {
        if unit_name == "number" {
            return Ok(Self::scalar());
        }
        match unit::lookup(unit_name) {
            Some(meta) => Ok(Self::single(meta.dimension)),
            None => Err(Error::Syntax(format!("unknown unit '{unit_name}'"))),
        }
    }

    pub fn exponent(&self, dimension: BaseDimension) -> i32 {
        self.exponents[dimension.index()]
    }

    pub fn percent_hint(&self) -> Option<BaseDimension> {
        self.percent_hint
    }

    /// Whether this is the plain-number type (no dimensions, no hint).
    pub fn is_scalar(&self) -> bool {
        self.exponents == [0; 7] && self.percent_hint.is_none()
    }

    /// Negate every exponent. The hint survives unchanged.
    pub fn invert(&self) -> Self {
        let mut exponents = self.exponents;
        for e in &mut exponents {
            *e = -*e;
        }
        Self {
            exponents,
            percent_hint: self.percent_hint,
        }
    }

    /// Fold the percent exponent into `hint`'s dimension and record the
    /// hint. Idempotent once percent is zero.
    fn apply_percent_hint(&mut self, hint: BaseDimension) {
        let percent = self.exponents[BaseDimension::Percent.index()];
        if hint != BaseDimension::Percent {
            self.exponents[hint.index()] += percent;
            self.exponents[BaseDimension::Percent.index()] = 0;
        }
        self.percent_hint = Some(hint);
    }

    /// The product type: elementwise exponent sum. Fails when both types
    /// carry a percent hint and the hints differ.
    pub fn multiply(&self, other: &Self) -> Result<Self> {
        let (a, b) = reconcile_hints(*self, *other)?;

        let mut exponents = [0; 7];
        for (i, e) in exponents.iter_mut().enumerate() {
            *e = a.exponents[i] + b.exponents[i];
        }
        Ok(Self {
            exponents,
            percent_hint: a.percent_hint.or(b.percent_hint),
        })
    }

    /// The sum type: both operands must collapse to the same exponent
    /// vector, possibly by tying their percentages to one base dimension.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let (a, b) = reconcile_hints(*self, *other)?;

        if a.exponents == b.exponents {
            return Ok(Self {
                exponents: a.exponents,
                percent_hint: a.percent_hint.or(b.percent_hint),
            });
        }

        // One side is (partly) a percentage: try each base dimension as
        // the hint and keep the first that makes the vectors agree.
        let has_percent = a.exponent(BaseDimension::Percent) != 0
            || b.exponent(BaseDimension::Percent) != 0;
        if has_percent {
            for dimension in BaseDimension::ALL {
                if dimension == BaseDimension::Percent {
                    continue;
                }
                if a.exponent(dimension) == 0 && b.exponent(dimension) == 0 {
                    continue;
                }
                let mut hinted_a = a;
                let mut hinted_b = b;
                hinted_a.apply_percent_hint(dimension);
                hinted_b.apply_percent_hint(dimension);
                if hinted_a.exponents == hinted_b.exponents {
                    return Ok(hinted_a);
                }
            }
        }

        Err(Error::Type("incompatible types in addition".into()))
    }
}

/// Check hint agreement and apply an existing hint to both sides.
fn reconcile_hints(mut a: NumericType, mut b: NumericType) -> Result<(NumericType, NumericType)> {
    if let (Some(ha), Some(hb)) = (a.percent_hint, b.percent_hint) {
        if ha != hb {
            return Err(Error::Type("mismatched percent hints".into()));
        }
    }
    if let Some(hint) = a.percent_hint.or(b.percent_hint) {
        a.apply_percent_hint(hint);
        b.apply_percent_hint(hint);
    }
    Ok((a, b))
}
