//! Unit tests for simplification, conversion, and the sum-value form

use cassia_numeric::{
    parse, simplify, Error, NumericValue, SimplifyContext, UnitValue,
};

fn no_ctx() -> SimplifyContext {
    SimplifyContext::default()
}

fn wrapped_unit(value: f64, unit: &str) -> NumericValue {
    NumericValue::Sum(vec![NumericValue::unit(value, unit)])
}

#[test]
fn test_sum_of_same_unit_folds() {
    assert_eq!(parse("calc(10px + 5px)").unwrap(), wrapped_unit(15.0, "px"));
}

#[test]
fn test_absolute_units_convert_to_canonical() {
    assert_eq!(parse("calc(1in)").unwrap(), wrapped_unit(96.0, "px"));
    assert_eq!(parse("calc(0.5turn)").unwrap(), wrapped_unit(180.0, "deg"));
    assert_eq!(parse("calc(2khz)").unwrap(), wrapped_unit(2000.0, "hz"));

    let grad = parse("calc(100grad)").unwrap().to("deg").unwrap();
    assert!((grad.value - 90.0).abs() < 1e-9);
}

#[test]
fn test_min_max_fold_shared_unit() {
    assert_eq!(
        parse("min(10px, 20px, 5px)").unwrap(),
        wrapped_unit(5.0, "px")
    );
    assert_eq!(parse("max(10px, 20px)").unwrap(), wrapped_unit(20.0, "px"));

    // Mixed canonical units within a group fold before comparison.
    assert_eq!(parse("min(1in, 90px)").unwrap(), wrapped_unit(90.0, "px"));
}

#[test]
fn test_min_max_leave_percentages_unfolded() {
    // A percentage may resolve against a negative basis; folding would be
    // unsound.
    let value = parse("min(10%, 20px)").unwrap();
    match &value {
        NumericValue::Min(values) => assert_eq!(values.len(), 2),
        other => panic!("expected min, got {other:?}"),
    }

    let value = parse("min(10%, 20%)").unwrap();
    match &value {
        NumericValue::Min(values) => assert_eq!(values.len(), 2),
        other => panic!("expected min, got {other:?}"),
    }
}

#[test]
fn test_min_with_relative_units_keeps_groups() {
    let value = parse("min(10px, 2em)").unwrap();
    match &value {
        NumericValue::Min(values) => assert_eq!(values.len(), 2),
        other => panic!("expected min, got {other:?}"),
    }
}

#[test]
fn test_percentage_unresolved_without_reference() {
    assert_eq!(
        parse("calc(10% + 10px)").unwrap(),
        NumericValue::Sum(vec![
            NumericValue::unit(10.0, "percent"),
            NumericValue::unit(10.0, "px"),
        ])
    );
}

#[test]
fn test_percentage_resolves_against_reference() {
    let value = parse("calc(10% + 10px)").unwrap();
    let ctx = SimplifyContext {
        percentage_reference: Some(UnitValue::new(200.0, "px")),
        font_size: None,
    };
    assert_eq!(simplify(&value, &ctx), NumericValue::unit(30.0, "px"));
}

#[test]
fn test_em_resolves_against_font_size() {
    let value = parse("calc(2em + 10px)").unwrap();
    let ctx = SimplifyContext {
        percentage_reference: None,
        font_size: Some(UnitValue::new(16.0, "px")),
    };
    assert_eq!(simplify(&value, &ctx), NumericValue::unit(42.0, "px"));
}

#[test]
fn test_number_times_dimension_collapses() {
    assert_eq!(parse("calc(2 * 3px)").unwrap(), wrapped_unit(6.0, "px"));
    assert_eq!(parse("calc(12px / 4)").unwrap(), wrapped_unit(3.0, "px"));
    assert_eq!(
        parse("calc(2 * 3 * 4px)").unwrap(),
        wrapped_unit(24.0, "px")
    );
}

#[test]
fn test_number_division_collapses() {
    assert_eq!(
        parse("calc(1 / 4)").unwrap(),
        NumericValue::Sum(vec![NumericValue::number(0.25)])
    );
}

#[test]
fn test_number_distributes_over_sum() {
    let value = parse("calc(2 * (1px + 10%))").unwrap();
    assert_eq!(
        value,
        NumericValue::Sum(vec![
            NumericValue::unit(2.0, "px"),
            NumericValue::unit(20.0, "percent"),
        ])
    );
}

#[test]
fn test_dimensional_product_stays_unreduced() {
    // px * px has no single-unit representation.
    let value = parse("calc(2px * 3px)").unwrap();
    match &value {
        NumericValue::Product(values) => assert_eq!(values.len(), 2),
        other => panic!("expected a product, got {other:?}"),
    }
}

#[test]
fn test_zero_terms_keep_unit_identity() {
    assert_eq!(parse("calc(0px + 0px)").unwrap(), wrapped_unit(0.0, "px"));
    // A unitless zero is a zero length and folds with other lengths.
    assert_eq!(parse("calc(0 + 10px)").unwrap(), wrapped_unit(10.0, "px"));
}

#[test]
fn test_double_negation_cancels() {
    let value = NumericValue::negate(
        NumericValue::negate(NumericValue::unit(5.0, "px")).unwrap(),
    )
    .unwrap();
    assert_eq!(simplify(&value, &no_ctx()), NumericValue::unit(5.0, "px"));
}

#[test]
fn test_double_inversion_cancels() {
    let value = NumericValue::invert(
        NumericValue::invert(NumericValue::unit(5.0, "px")).unwrap(),
    )
    .unwrap();
    assert_eq!(simplify(&value, &no_ctx()), NumericValue::unit(5.0, "px"));
}

#[test]
fn test_construction_rejects_incompatible_types() {
    let err = NumericValue::sum(vec![
        NumericValue::unit(1.0, "px"),
        NumericValue::unit(1.0, "deg"),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Type(_)));

    let err = NumericValue::min_of(vec![
        NumericValue::unit(1.0, "s"),
        NumericValue::unit(1.0, "fr"),
    ])
    .unwrap_err();
    assert!(matches!(err, Error::Type(_)));

    // Percent + length is addable: the percentage ties to length.
    assert!(NumericValue::sum(vec![
        NumericValue::unit(1.0, "percent"),
        NumericValue::unit(1.0, "px"),
    ])
    .is_ok());
}

#[test]
fn test_keyword_values_are_terminal() {
    let keyword = NumericValue::keyword("auto");
    assert_eq!(keyword.to_string(), "auto");
    assert!(matches!(keyword.numeric_type(), Err(Error::Type(_))));
    assert!(matches!(
        NumericValue::sum(vec![keyword, NumericValue::unit(1.0, "px")]),
        Err(Error::Type(_))
    ));
}

#[test]
fn test_to_converts_within_group() {
    assert_eq!(parse("calc(96px)").unwrap().to("in").unwrap().value, 1.0);
    let ms = parse("calc(1s)").unwrap().to("ms").unwrap();
    assert!((ms.value - 1000.0).abs() < 1e-9);

    let err = parse("calc(96px)").unwrap().to("deg").unwrap_err();
    assert!(matches!(err, Error::Type(_)));

    let err = parse("calc(10% + 10px)").unwrap().to("px").unwrap_err();
    assert!(matches!(err, Error::Type(_)));

    let err = parse("calc(96px)").unwrap().to("bogus").unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn test_to_sum_orders_by_unit() {
    let value = parse("calc(10px + 10%)").unwrap();
    let sum = value.to_sum().unwrap();
    assert_eq!(
        sum,
        NumericValue::Sum(vec![
            NumericValue::unit(10.0, "percent"),
            NumericValue::unit(10.0, "px"),
        ])
    );
}

#[test]
fn test_to_sum_rejects_non_singular_terms() {
    let product = parse("calc(2px * 3px)").unwrap();
    assert!(matches!(product.to_sum(), Err(Error::Type(_))));

    let min = parse("min(10%, 20px)").unwrap();
    assert!(matches!(min.to_sum(), Err(Error::Type(_))));
}

#[test]
fn test_division_by_zero_propagates_infinity() {
    let value = NumericValue::invert(NumericValue::number(0.0)).unwrap();
    let converted = value.to("number").unwrap();
    assert!(converted.value.is_infinite());
}

#[test]
fn test_simplifier_is_total_on_unresolved_trees() {
    let value = parse("calc(10%)").unwrap();
    assert_eq!(
        simplify(&value, &no_ctx()),
        NumericValue::unit(10.0, "percent")
    );
}

#[test]
fn test_display_renders_reparseable_css() {
    assert_eq!(
        parse("calc(10% + 10px)").unwrap().to_string(),
        "calc(10% + 10px)"
    );
    assert_eq!(
        parse("min(10%, 20px)").unwrap().to_string(),
        "min(10%, 20px)"
    );
    assert_eq!(parse("calc(10px + 5px)").unwrap().to_string(), "calc(15px)");
    assert_eq!(NumericValue::unit(1.5, "number").to_string(), "1.5");
}
