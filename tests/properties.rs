//! Property tests for the numeric tower, combinatorics and the evaluator.

use ka::{
    execute_default,
    interpreter::value::{combinatoric::Combinatoric, core::Value, number::Number},
};
use num::{BigInt, BigRational};
use proptest::prelude::*;

fn rational() -> impl Strategy<Value = Number> {
    (-1000_i64..1000, 1_i64..1000).prop_map(|(n, d)| Number::Rational(BigRational::new(n.into(), d.into())))
}

fn binomial(n: u64, k: u64) -> BigInt {
    let mut value = BigInt::from(1);
    for i in 0..k {
        value = value * BigInt::from(n - i) / BigInt::from(i + 1);
    }
    value
}

proptest! {
    #[test]
    fn integral_floats_simplify_to_integers(x in -1_000_000_i64..1_000_000) {
        #[allow(clippy::cast_precision_loss)]
        let float = Number::Float(x as f64);
        prop_assert_eq!(float.simplify(), Number::from(x));
    }

    #[test]
    fn whole_fractions_simplify_to_integers(n in -1000_i64..1000) {
        let whole = Number::Rational(BigRational::from_integer(n.into()));
        prop_assert_eq!(whole.simplify(), Number::from(n));
    }

    #[test]
    fn simplify_is_idempotent(x in rational(), f in -1e6_f64..1e6) {
        prop_assert_eq!(x.clone().simplify().simplify(), x.simplify());
        let float = Number::Float(f);
        prop_assert_eq!(float.clone().simplify().simplify(), float.simplify());
    }

    #[test]
    fn coercion_meets_at_the_higher_kind(a in rational(), b in -1000_i64..1000) {
        let (x, y) = Number::coerce(a.clone(), Number::from(b)).unwrap();
        prop_assert_eq!(x.rank(), y.rank());
        prop_assert_eq!(x.rank(), a.rank());
    }

    #[test]
    fn fraction_arithmetic_is_exact(a in rational(), b in rational()) {
        let sum = a.add(&b).unwrap();
        prop_assert_eq!(sum.sub(&b).unwrap().simplify(), a.clone().simplify());
        prop_assume!(!b.is_zero());
        let product = a.mul(&b).unwrap();
        prop_assert_eq!(product.div(&b).unwrap().simplify(), a.simplify());
    }

    #[test]
    fn binomials_are_exact(n in 0_u64..=30, k in 0_u64..=30) {
        prop_assume!(k <= n);
        prop_assert_eq!(Combinatoric::choose(n, k).resolve(), Number::Integer(binomial(n, k)));
    }

    #[test]
    fn lazy_products_match_eager_ones(a in 0_u64..40, b in 0_u64..40, c in 0_u64..40) {
        let lazy = Combinatoric::factorial(a).times(&Combinatoric::factorial(b))
                                             .over(&Combinatoric::factorial(c));
        let Number::Integer(fa) = Combinatoric::factorial(a).resolve() else { unreachable!() };
        let Number::Integer(fb) = Combinatoric::factorial(b).resolve() else { unreachable!() };
        let Number::Integer(fc) = Combinatoric::factorial(c).resolve() else { unreachable!() };
        let eager = Number::Rational(BigRational::new(fa * fb, fc)).simplify();
        prop_assert_eq!(lazy.resolve(), eager);
    }

    #[test]
    fn integer_arithmetic_matches_i64(a in -10_000_i64..10_000, b in -10_000_i64..10_000) {
        let value = execute_default(&format!("({a}) * ({b}) + ({a}) - ({b})")).unwrap();
        prop_assert_eq!(value, Some(Value::from(a * b + a - b)));
    }

    #[test]
    fn unit_round_trips_are_exact(x in 1_i64..10_000) {
        let source = format!("(({x} ft to m) to inch) to ft");
        let Some(Value::Quantity(q)) = execute_default(&source).unwrap() else {
            panic!("expected a quantity from {source}");
        };
        let display = q.display.clone().unwrap();
        prop_assert_eq!(display.magnitude.clone(), Number::from(x));
    }
}
