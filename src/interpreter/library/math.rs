use std::cmp::Ordering;

use num::{BigInt, BigRational, Signed};

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder, Signature},
        library::number,
        value::{
            core::{Type, Value},
            number::Number,
        },
    },
    register_functions,
    util::{num::number_to_i64, special::gamma},
};

/// Applies a float function to a single float argument.
///
/// Integer and fraction arguments reach these functions already widened to
/// floats by the dispatcher. Results that are not finite become
/// `NumericOverflow` or `NotANumber`.
macro_rules! float_builtin {
    ($fname:ident, $float_fn:ident) => {
        fn $fname(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
            let x = args[0].as_number()?.to_f64()?;
            Ok(number(Number::float(x.$float_fn())?))
        }
    };
}

float_builtin!(sqrt_float, sqrt);
float_builtin!(exp, exp);
float_builtin!(ln, ln);
float_builtin!(log10, log10);
float_builtin!(sin, sin);
float_builtin!(cos, cos);
float_builtin!(tan, tan);
float_builtin!(asin, asin);
float_builtin!(acos, acos);
float_builtin!(atan, atan);

/// Exact square root of a perfect square, otherwise the float root.
///
/// # Example
/// ```
/// use ka::execute_default;
///
/// let root = execute_default("sqrt(9/4)").unwrap().unwrap();
/// assert_eq!(root.to_string(), "3/2");
/// ```
fn sqrt(registry: &Registry, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
    let x = args[0].as_number()?;
    if let Some(r) = x.to_rational()
       && !r.is_negative()
       && !matches!(x, Number::Float(_))
    {
        let (n, d) = (r.numer().sqrt(), r.denom().sqrt());
        if &n * &n == *r.numer() && &d * &d == *r.denom() {
            return Ok(number(Number::Rational(BigRational::new(n, d))));
        }
    }
    sqrt_float(registry, &[number(Number::float(x.to_f64()?)?)], keywords)
}

/// `log(x, base)`.
fn log(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let x = args[0].as_number()?.to_f64()?;
    let base = args[1].as_number()?.to_f64()?;
    Ok(number(Number::float(x.log(base))?))
}

fn abs(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(args[0].as_number()?.abs()))
}

fn floor(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(match args[0].as_number()? {
                  Number::Rational(r) => Number::Integer(r.floor().to_integer()),
                  Number::Float(f) => Number::float(f.floor())?,
                  integer => integer,
              }))
}

fn ceil(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(match args[0].as_number()? {
                  Number::Rational(r) => Number::Integer(r.ceil().to_integer()),
                  Number::Float(f) => Number::float(f.ceil())?,
                  integer => integer,
              }))
}

/// Rounds half away from zero, to `places` decimal places (default 0).
///
/// Exact numbers are rounded exactly; floats are rounded in floating point.
fn round(_: &Registry, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
    let places = match keywords.get("places") {
        Some(value) => number_to_i64(&value.as_number()?, "places")?,
        None => 0,
    };
    let places = i32::try_from(places).map_err(|_| RuntimeError::NumericOverflow)?;
    let x = args[0].as_number()?;

    if let Number::Float(f) = x {
        let scale = 10f64.powi(places);
        return Ok(number(Number::float((f * scale).round() / scale)?));
    }

    let Some(r) = x.to_rational() else {
        return Ok(number(x));
    };
    let scale = BigRational::from_integer(BigInt::from(10).pow(places.unsigned_abs()));
    let scale = if places < 0 { scale.recip() } else { scale };
    Ok(number(Number::Rational((r * &scale).round() / scale)))
}

fn gamma_fn(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let x = args[0].as_number()?.to_f64()?;
    Ok(number(Number::float(gamma(x)?)?))
}

/// Keeps the argument that orders as `keep` against every other one.
fn extreme(args: &[Value], keep: Ordering) -> EvalResult<Value> {
    let mut best = args[0].as_number()?;
    for arg in &args[1..] {
        let candidate = arg.as_number()?;
        if candidate.compare(&best)? == keep {
            best = candidate;
        }
    }
    Ok(number(best))
}

fn min(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    extreme(args, Ordering::Less)
}

fn max(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    extreme(args, Ordering::Greater)
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "sqrt" (Number) => sqrt,
        "exp" (Float) => exp,
        "ln" (Float) => ln,
        "log" (Float) => log10,
        "log" (Float, Float) => log,
        "sin" (Float) => sin,
        "cos" (Float) => cos,
        "tan" (Float) => tan,
        "asin" (Float) => asin,
        "acos" (Float) => acos,
        "atan" (Float) => atan,
        "abs" (Number) => abs,
        "floor" (Number) => floor,
        "ceil" (Number) => ceil,
        "gamma" (Float) => gamma_fn,
    });

    builder.register("round", Signature::new(&[Type::Number]).keyword("places", Type::Integer), round)
           .register("min", Signature::new(&[Type::Number]).vararg(Type::Number), min)
           .register("max", Signature::new(&[Type::Number]).vararg(Type::Number), max);
}

