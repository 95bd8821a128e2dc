//! Static unit tables
//!
//! One compile-time perfect hash map covers the fixed unit inventory: the
//! base dimension a unit belongs to, the canonical unit of its group, and
//! the fixed conversion ratio to that canonical unit where one exists.
//! Relative units (em, vw, ...) are typed as lengths but carry no fixed
//! ratio; they only resolve against a context. The tables are read-only
//! after compilation, so concurrent callers never contend.

use crate::types::BaseDimension;
use phf::phf_map;

/// Metadata for one unit name.
#[derive(Debug, Clone, Copy)]
pub struct UnitMetadata {
    pub dimension: BaseDimension,
    /// The unit this unit's group normalizes to.
    pub canonical: &'static str,
    /// Multiplier to the canonical unit; `None` for context-dependent units.
    pub ratio: Option<f64>,
}

const fn unit(dimension: BaseDimension, canonical: &'static str, ratio: f64) -> UnitMetadata {
    UnitMetadata {
        dimension,
        canonical,
        ratio: Some(ratio),
    }
}

const fn relative(dimension: BaseDimension, canonical: &'static str) -> UnitMetadata {
    UnitMetadata {
        dimension,
        canonical,
        ratio: None,
    }
}

static UNITS_BY_NAME: phf::Map<&'static str, UnitMetadata> = phf_map! {
    "percent" => unit(BaseDimension::Percent, "percent", 1.0),

    // Absolute lengths
    "px" => unit(BaseDimension::Length, "px", 1.0),
    "cm" => unit(BaseDimension::Length, "px", 96.0 / 2.54),
    "mm" => unit(BaseDimension::Length, "px", 96.0 / 25.4),
    "q" => unit(BaseDimension::Length, "px", 96.0 / 101.6),
    "in" => unit(BaseDimension::Length, "px", 96.0),
    "pc" => unit(BaseDimension::Length, "px", 16.0),
    "pt" => unit(BaseDimension::Length, "px", 96.0 / 72.0),

    // Font-relative lengths
    "em" => relative(BaseDimension::Length, "px"),
    "ex" => relative(BaseDimension::Length, "px"),
    "ch" => relative(BaseDimension::Length, "px"),
    "ic" => relative(BaseDimension::Length, "px"),
    "rem" => relative(BaseDimension::Length, "px"),
    "lh" => relative(BaseDimension::Length, "px"),
    "rlh" => relative(BaseDimension::Length, "px"),
    "cap" => relative(BaseDimension::Length, "px"),

    // Viewport-relative lengths
    "vw" => relative(BaseDimension::Length, "px"),
    "vh" => relative(BaseDimension::Length, "px"),
    "vi" => relative(BaseDimension::Length, "px"),
    "vb" => relative(BaseDimension::Length, "px"),
    "vmin" => relative(BaseDimension::Length, "px"),
    "vmax" => relative(BaseDimension::Length, "px"),

    // Angles
    "deg" => unit(BaseDimension::Angle, "deg", 1.0),
    "grad" => unit(BaseDimension::Angle, "deg", 0.9),
    "rad" => unit(BaseDimension::Angle, "deg", 180.0 / std::f64::consts::PI),
    "turn" => unit(BaseDimension::Angle, "deg", 360.0),

    // Time
    "s" => unit(BaseDimension::Time, "s", 1.0),
    "ms" => unit(BaseDimension::Time, "s", 0.001),

    // Frequency
    "hz" => unit(BaseDimension::Frequency, "hz", 1.0),
    "khz" => unit(BaseDimension::Frequency, "hz", 1000.0),

    // Resolution
    "dppx" => unit(BaseDimension::Resolution, "dppx", 1.0),
    "x" => unit(BaseDimension::Resolution, "dppx", 1.0),
    "dpi" => unit(BaseDimension::Resolution, "dppx", 1.0 / 96.0),
    "dpcm" => unit(BaseDimension::Resolution, "dppx", 2.54 / 96.0),

    // Flex
    "fr" => unit(BaseDimension::Flex, "fr", 1.0),
};

/// Look up the metadata for a unit name. `"number"` is not in the table;
/// it is the dimensionless scalar handled by the type algebra directly.
pub fn lookup(unit: &str) -> Option<&'static UnitMetadata> {
    UNITS_BY_NAME.get(unit)
}

/// The fixed multiplier from `unit` to its group's canonical unit, if any.
pub fn ratio_to_canonical(unit: &str) -> Option<f64> {
    lookup(unit).and_then(|meta| meta.ratio)
}

/// Convert a value to its group's canonical unit via the fixed ratio.
/// Returns `None` for `"number"`, unknown units, and relative units.
pub fn to_canonical(value: f64, unit: &str) -> Option<(f64, &'static str)> {
    let meta = lookup(unit)?;
    let ratio = meta.ratio?;
    Some((value * ratio, meta.canonical))
}

/// Whether a unit is its own group's canonical unit. `"number"` counts as
/// canonical (it is the canonical dimensionless unit).
pub fn is_canonical(unit: &str) -> bool {
    if unit == "number" {
        return true;
    }
    match lookup(unit) {
        Some(meta) => meta.canonical == unit,
        None => false,
    }
}
