use ka::{
    ast::UnitSignature,
    error::RuntimeError,
    interpreter::{
        Interpreter,
        library::{
            quantity::{convert, make_quantity},
            standard_functions,
        },
        units::{registry::UnitRegistry, table::standard_units, vector::QuantityVector},
        value::{core::Value, number::Number},
    },
};
use pretty_assertions::assert_eq;

fn signature(units: &[(&str, i32)], inverted: &[(&str, i32)]) -> UnitSignature {
    let owned = |list: &[(&str, i32)]| list.iter().map(|(name, e)| ((*name).to_string(), *e)).collect();
    UnitSignature { units:    owned(units),
                    inverted: owned(inverted), }
}

fn single(name: &str) -> UnitSignature {
    signature(&[(name, 1)], &[])
}

#[test]
fn vectors_combine_componentwise() {
    let velocity = QuantityVector::LENGTH.div(QuantityVector::TIME);
    assert_eq!(velocity, QuantityVector([0, 1, -1, 0, 0, 0, 0]));
    assert_eq!(velocity.pow(2), QuantityVector([0, 2, -2, 0, 0, 0, 0]));
    assert!(velocity.mul(QuantityVector::TIME).div(QuantityVector::LENGTH).is_dimensionless());
    assert_eq!(QuantityVector([1, 2, -2, 0, 0, 0, 0]).to_string(), "kg m^2 s^-2");
}

#[test]
fn exact_names_win_over_prefixes() {
    let units = standard_units();
    assert_eq!(units.lookup("min").unwrap().multiplier, Number::from(60));
    assert_eq!(units.lookup("mi").unwrap().vector, QuantityVector::LENGTH);
    assert_eq!(units.lookup("cd").unwrap().vector, QuantityVector::LUMINOSITY);
}

#[test]
fn prefixes_by_symbol_and_by_name() {
    let units = standard_units();
    assert_eq!(units.lookup("km").unwrap().multiplier, Number::from(1000));
    assert_eq!(units.lookup("kilometre").unwrap().multiplier, Number::from(1000));
    assert_eq!(units.lookup("millimeters").unwrap().multiplier, Number::ratio(1, 1000).unwrap());
    assert_eq!(units.lookup("dam").unwrap().multiplier, Number::from(10));
    assert_eq!(units.lookup("kg").unwrap().multiplier, Number::from(1));
}

#[test]
fn lookup_failures() {
    let units = standard_units();
    assert_eq!(units.lookup("kdegC"),
               Err(RuntimeError::InvalidPrefix { prefix: "k".to_string(),
                                                 unit:   "degC".to_string(), }));
    assert_eq!(units.lookup("furlong"),
               Err(RuntimeError::UnknownUnit { name: "furlong".to_string() }));
    assert!(units.lookup("k").is_err());
}

#[test]
fn composition_folds_exponents_and_inversions() {
    let units = standard_units();
    let joule = units.compose(&signature(&[("kg", 1), ("m", 2)], &[("s", 2)])).unwrap();
    assert_eq!(joule.vector, units.lookup("J").unwrap().vector);
    assert_eq!(joule.multiplier, Number::from(1));
    assert_eq!(joule.label, "kg m^2/s^2");

    let per_hour = units.compose(&signature(&[("km", 1)], &[("hr", 1)])).unwrap();
    assert_eq!(per_hour.multiplier, Number::ratio(5, 18).unwrap());
}

#[test]
fn offset_units_stand_alone() {
    let units = standard_units();
    let celsius = units.compose(&single("degC")).unwrap();
    assert_eq!(celsius.offset, Number::ratio(27_315, 100).unwrap());

    let offset_error = |sig: &UnitSignature| match units.compose(sig) {
        Err(RuntimeError::IncompatibleOffsetUnit { unit }) => unit,
        other => panic!("expected an offset error, got {other:?}"),
    };
    assert_eq!(offset_error(&signature(&[("degC", 2)], &[])), "degC");
    assert_eq!(offset_error(&signature(&[("m", 1), ("degC", 1)], &[])), "degC");
    assert_eq!(offset_error(&signature(&[("J", 1)], &[("degF", 1)])), "degF");
}

#[test]
fn quantity_names_for_vectors() {
    let units = standard_units();
    assert_eq!(units.quantity_names(QuantityVector::LENGTH), ["length"]);
    assert_eq!(units.quantity_names(QuantityVector::LENGTH.div(QuantityVector::TIME)), ["velocity"]);
    assert!(units.quantity_names(QuantityVector([3, 3, 3, 0, 0, 0, 0])).is_empty());
}

#[test]
fn descriptions() {
    let units = standard_units();
    assert_eq!(units.describe("ft").unwrap(), "ft (foot, feet): length = 381/1250 m");
    assert!(units.describe("furlong").is_none());
}

/// Builds `1 from` and expresses it in `to`, returning the displayed
/// magnitude.
fn converted(units: &UnitRegistry, from: &str, to: &str, magnitude: Number) -> Number {
    let functions = standard_functions();
    let source = units.compose(&single(from)).unwrap();
    let target = units.compose(&single(to)).unwrap();
    let quantity = make_quantity(&functions, magnitude, &source).unwrap();
    match convert(&functions, &quantity, &target).unwrap() {
        Value::Quantity(q) => q.display.expect("converted quantities carry a display unit").magnitude.clone(),
        other => panic!("expected a quantity, got {other:?}"),
    }
}

#[test]
fn conversions_round_trip_exactly() {
    let units = standard_units();
    let pairs = [("ft", "m"), ("mi", "km"), ("lb", "oz"), ("hr", "wk"), ("L", "mL"), ("eV", "cal"), ("yd", "inch")];
    for (a, b) in pairs {
        let there = converted(&units, a, b, Number::one());
        let back = converted(&units, b, a, there);
        assert_eq!(back, Number::one(), "{a} -> {b} -> {a}");
    }
}

#[test]
fn temperature_conversions() {
    let units = standard_units();
    assert_eq!(converted(&units, "degC", "K", Number::from(100)), Number::ratio(7463, 20).unwrap());
    assert_eq!(converted(&units, "degF", "degC", Number::from(212)), Number::from(100));
    assert_eq!(converted(&units, "degC", "degF", Number::from(-40)), Number::from(-40));
}

#[test]
fn conversion_needs_matching_dimensions() {
    let units = standard_units();
    let functions = standard_functions();
    let metre = units.compose(&single("m")).unwrap();
    let second = units.compose(&single("s")).unwrap();
    let length = make_quantity(&functions, Number::from(2), &metre).unwrap();
    assert!(convert(&functions, &length, &second).is_err());
}

#[test]
fn listings_for_the_command_line() {
    let interpreter = Interpreter::new();
    assert!(interpreter.unit_table().contains(&"ft (foot, feet): length = 381/1250 m".to_string()));
    assert!(interpreter.prefix_table().contains(&"k (kilo) = 1000".to_string()));
    assert!(interpreter.function_table().contains(&"round(Number; places: Integer)".to_string()));

    assert_eq!(interpreter.describe("km").unwrap(), "km: length = 1000 m");
    assert_eq!(interpreter.describe("ft").unwrap(), "ft (foot, feet): length = 381/1250 m");
    assert_eq!(interpreter.describe("sqrt").unwrap(), "sqrt(Quantity)\nsqrt(Number)");
    assert!(interpreter.describe("furlong").is_none());
}
