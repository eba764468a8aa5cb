use std::cmp::Ordering;

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, NativeFn, Registry, RegistryBuilder, Signature},
        value::core::{Type, Value},
    },
    register_functions,
};

/// Orders two values of comparable kinds.
fn order(a: &Value, b: &Value) -> Result<Ordering, RuntimeError> {
    match (a, b) {
        (Value::Quantity(x), Value::Quantity(y)) => {
            if x.vector != y.vector {
                return Err(RuntimeError::IncompatibleQuantities { left:  x.vector,
                                                                  right: y.vector, });
            }
            x.magnitude.compare(&y.magnitude)
        },
        (Value::Instant(x), Value::Instant(y)) => Ok(x.cmp(y)),
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (x, y) => x.as_number()?.compare(&y.as_number()?),
    }
}

/// Structural equality with numeric comparison across number kinds, so that
/// `1 == 1.0` and `3 m == 3000 mm`.
///
/// # Example
/// ```
/// use ka::interpreter::{library::comparison::values_equal, value::core::Value};
///
/// let a = Value::from(vec![Value::from(1), Value::from(2)]);
/// let b = Value::from(vec![Value::from(1), Value::from(2)]);
/// assert!(values_equal(&a, &b).unwrap());
/// assert!(!values_equal(&Value::from(1), &Value::from("1")).unwrap());
/// ```
pub fn values_equal(a: &Value, b: &Value) -> Result<bool, RuntimeError> {
    match (a, b) {
        (Value::Number(_) | Value::Combinatoric(_), Value::Number(_) | Value::Combinatoric(_)) => {
            a.as_number()?.numeric_eq(&b.as_number()?)
        },
        (Value::Quantity(x), Value::Quantity(y)) => {
            Ok(x.vector == y.vector && x.magnitude.numeric_eq(&y.magnitude)?)
        },
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.iter().zip(ys.iter()) {
                if !values_equal(x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        },
        _ => Ok(a == b),
    }
}

/// Generates an ordering operator from a predicate on `Ordering`.
macro_rules! ordering_operator {
    ($fname:ident, $test:expr) => {
        fn $fname(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
            let test: fn(Ordering) -> bool = $test;
            Ok(Value::Bool(test(order(&args[0], &args[1])?)))
        }
    };
}

ordering_operator!(less, |o| o == Ordering::Less);
ordering_operator!(less_equal, |o| o != Ordering::Greater);
ordering_operator!(greater, |o| o == Ordering::Greater);
ordering_operator!(greater_equal, |o| o != Ordering::Less);

fn equal(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Bool(values_equal(&args[0], &args[1])?))
}

fn not_equal(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Bool(!values_equal(&args[0], &args[1])?))
}

fn register_ordering(builder: &mut RegistryBuilder, name: &str, implementation: NativeFn) {
    for kinds in [[Type::Number, Type::Number],
                  [Type::Quantity, Type::Quantity],
                  [Type::Instant, Type::Instant],
                  [Type::String, Type::String]]
    {
        builder.register(name, Signature::new(&kinds), implementation);
    }
}

pub fn register(builder: &mut RegistryBuilder) {
    register_ordering(builder, "<", less);
    register_ordering(builder, "<=", less_equal);
    register_ordering(builder, ">", greater);
    register_ordering(builder, ">=", greater_equal);

    register_functions!(builder, {
        "==" (Any, Any) => equal,
        "!=" (Any, Any) => not_equal,
    });
}
