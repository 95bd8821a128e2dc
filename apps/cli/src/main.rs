//! Command-line front end for the numeric-value engine.

use anyhow::{bail, Context, Result};
use cassia_numeric::{parse, simplify, NumericValue, SimplifyContext, UnitValue};
use clap::Parser;

/// Parse and simplify CSS calc()/min()/max() expressions.
#[derive(Parser, Debug)]
#[command(name = "cassia", version, about)]
struct Args {
    /// Expression to evaluate, e.g. "calc(10px + 2 * 3px)".
    expression: String,

    /// Resolve percentages against this value, e.g. "200px".
    #[arg(long, value_name = "VALUE")]
    percentage_reference: Option<String>,

    /// Resolve em against this font size, e.g. "16px".
    #[arg(long, value_name = "VALUE")]
    font_size: Option<String>,

    /// Convert the result to this unit, e.g. "px".
    #[arg(long, value_name = "UNIT")]
    to: Option<String>,

    /// Print the result tree as JSON instead of CSS text.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let value = parse(&args.expression)
        .with_context(|| format!("failed to parse '{}'", args.expression))?;

    let ctx = SimplifyContext {
        percentage_reference: args
            .percentage_reference
            .as_deref()
            .map(parse_unit_value)
            .transpose()?,
        font_size: args.font_size.as_deref().map(parse_unit_value).transpose()?,
    };
    let reduced = simplify(&value, &ctx);

    if let Some(target) = &args.to {
        let converted = reduced
            .to(target)
            .with_context(|| format!("cannot convert '{reduced}' to '{target}'"))?;
        print_value(&NumericValue::Unit(converted), args.json)
    } else {
        print_value(&reduced, args.json)
    }
}

/// Parse a plain unit literal for the context options.
fn parse_unit_value(input: &str) -> Result<UnitValue> {
    match parse(input).with_context(|| format!("failed to parse '{input}'"))? {
        NumericValue::Unit(unit_value) => Ok(unit_value),
        other => bail!("expected a unit value, got '{other}'"),
    }
}

fn print_value(value: &NumericValue, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}
