use ka::{
    execute_default,
    interpreter::value::{
        combinatoric::{Combinatoric, FactorRange},
        core::Value,
        number::Number,
    },
};
use num::BigInt;
use pretty_assertions::assert_eq;

fn range(lo: u64, hi: u64) -> FactorRange {
    FactorRange::new(lo, hi).unwrap()
}

fn factorial(n: u64) -> BigInt {
    (1..=n).map(BigInt::from).product()
}

#[test]
fn empty_ranges_are_rejected() {
    assert_eq!(FactorRange::new(3, 2), None);
    assert_eq!(FactorRange::new(0, 4), None);
    assert_eq!(FactorRange::new(4, 4), Some(FactorRange { lo: 4, hi: 4 }));
}

#[test]
fn factorial_quotients_cancel_on_construction() {
    let c = Combinatoric::factorial(100).over(&Combinatoric::factorial(98));
    assert_eq!(c.numerator(), [range(99, 100)]);
    assert!(c.denominator().is_empty());
    assert_eq!(c.resolve(), Number::from(9900));
}

#[test]
fn partial_overlaps_leave_remainders() {
    let c = Combinatoric::new(vec![range(5, 10)], vec![range(8, 12)]);
    let mut top = c.numerator().to_vec();
    top.sort_by_key(|r| r.lo);
    assert_eq!(top, [range(5, 7)]);
    assert_eq!(c.denominator(), [range(11, 12)]);
    assert_eq!(c.resolve(), Number::ratio(5 * 6 * 7, 11 * 12).unwrap());
}

#[test]
fn uncancellable_denominators_survive() {
    let c = Combinatoric::new(vec![range(2, 3)], vec![range(5, 5)]);
    assert_eq!(c.denominator(), [range(5, 5)]);
    assert_eq!(c.resolve(), Number::ratio(6, 5).unwrap());
}

#[test]
fn binomials_match_the_factorial_formula() {
    for n in 0..=30_u64 {
        for k in 0..=n {
            let expected = factorial(n) / (factorial(k) * factorial(n - k));
            assert_eq!(Combinatoric::choose(n, k).resolve(), Number::Integer(expected), "C({n}, {k})");
        }
    }
}

#[test]
fn permutations() {
    assert_eq!(Combinatoric::permutations(5, 2).resolve(), Number::from(20));
    assert_eq!(Combinatoric::permutations(5, 0).resolve(), Number::from(1));
    assert_eq!(Combinatoric::permutations(5, 5).resolve(), Number::from(120));
}

#[test]
fn large_binomials_stay_exact() {
    let value = execute_default("C(1000, 500)").unwrap().unwrap();
    let Value::Combinatoric(c) = &value else {
        panic!("expected a lazy combinatoric, got {value:?}");
    };
    let Number::Integer(n) = c.resolve() else {
        panic!("C(1000, 500) is an integer");
    };
    assert_eq!(n, factorial(1000) / (factorial(500) * factorial(500)));
    assert_eq!(n.to_string().len(), 300);
}

#[test]
fn products_of_combinatorics_stay_lazy() {
    let value = execute_default("C(10, 3) * C(7, 2) / C(10, 5)").unwrap().unwrap();
    assert!(matches!(value, Value::Combinatoric(_)));
    assert_eq!(value.as_number().unwrap(), Number::from(10));
}

#[test]
fn out_of_range_arguments_give_zero() {
    assert_eq!(execute_default("C(3, 5)").unwrap(), Some(Value::from(0)));
    assert_eq!(execute_default("C(-1, 2)").unwrap(), Some(Value::from(0)));
    assert_eq!(execute_default("P(2, 3)").unwrap(), Some(Value::from(0)));
    assert!(execute_default("(-3)!").is_err());
}
