use num::ToPrimitive;

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        library::number,
        units::{quantity::Quantity, registry::Composition, vector::QuantityVector},
        value::{core::Value, number::Number},
    },
    register_functions,
};

/// Splits a value into magnitude and dimensions. Plain numbers are
/// dimensionless.
fn parts(value: &Value) -> Result<(Number, QuantityVector), RuntimeError> {
    match value {
        Value::Quantity(q) => Ok((q.magnitude.clone(), q.vector)),
        other => Ok((other.as_number()?, QuantityVector::DIMENSIONLESS)),
    }
}

/// Dispatches `op` on two plain magnitudes.
fn combine(registry: &Registry, op: &str, a: Number, b: Number) -> EvalResult<Number> {
    Ok(registry.call(op, &[number(a), number(b)])?.as_number()?)
}

/// Builds a quantity from a magnitude written in the units of `composition`.
///
/// The base magnitude is `magnitude * multiplier + offset`, computed through
/// the dispatcher.
pub fn make_quantity(registry: &Registry, magnitude: Number, composition: &Composition) -> EvalResult<Value> {
    let scaled = combine(registry, "*", magnitude, composition.multiplier.clone())?;
    let base = combine(registry, "+", scaled, composition.offset.clone())?;
    Ok(Quantity::value(base, composition.vector))
}

/// Expresses `value` in the units of `composition`.
///
/// The result keeps its base magnitude for arithmetic and records
/// `(magnitude - offset) / multiplier` for display.
///
/// # Errors
/// `IncompatibleQuantities` unless the dimensions match exactly.
pub fn convert(registry: &Registry, value: &Value, composition: &Composition) -> EvalResult<Value> {
    let (magnitude, vector) = parts(value)?;
    if vector != composition.vector {
        return Err(RuntimeError::IncompatibleQuantities { left:  vector,
                                                          right: composition.vector, }.into());
    }
    let shifted = combine(registry, "-", magnitude.clone(), composition.offset.clone())?;
    let converted = combine(registry, "/", shifted, composition.multiplier.clone())?;
    if vector.is_dimensionless() {
        return Ok(number(converted));
    }
    Ok(Value::Quantity(Quantity::new(magnitude, vector).with_display(composition.label.clone(), converted)))
}

/// `+` and `-` require identical dimensions.
fn additive(registry: &Registry, op: &str, args: &[Value]) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    let (b, vb) = parts(&args[1])?;
    if va != vb {
        return Err(RuntimeError::IncompatibleQuantities { left: va, right: vb }.into());
    }
    Ok(Quantity::value(combine(registry, op, a, b)?, va))
}

fn add(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    additive(registry, "+", args)
}

fn sub(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    additive(registry, "-", args)
}

fn mul(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    let (b, vb) = parts(&args[1])?;
    Ok(Quantity::value(combine(registry, "*", a, b)?, va.mul(vb)))
}

fn div(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    let (b, vb) = parts(&args[1])?;
    Ok(Quantity::value(combine(registry, "/", a, b)?, va.div(vb)))
}

fn pow(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    let exponent = args[1].as_number()?;
    let e = exponent.to_integer()
                    .and_then(|e| e.to_i32())
                    .ok_or(RuntimeError::NumericOverflow)?;
    Ok(Quantity::value(combine(registry, "^", a, exponent)?, va.pow(e)))
}

fn negate(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    Ok(Quantity::value(registry.call("-", &[number(a)])?.as_number()?, va))
}

fn identity(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(args[0].clone())
}

fn abs(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    Ok(Quantity::value(a.abs(), va))
}

/// Square root of a quantity whose dimension exponents are all even.
fn sqrt(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, va) = parts(&args[0])?;
    if va.0.iter().any(|e| e % 2 != 0) {
        return Err(RuntimeError::InvalidArgument { details: format!("cannot take the square root of a quantity of {va}") }.into());
    }
    let root = registry.call("sqrt", &[number(a)])?.as_number()?;
    Ok(Quantity::value(root, QuantityVector(va.0.map(|e| e / 2))))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "+" (Quantity, Quantity) => add,
        "+" (Number, Quantity) => add,
        "+" (Quantity, Number) => add,
        "-" (Quantity, Quantity) => sub,
        "-" (Number, Quantity) => sub,
        "-" (Quantity, Number) => sub,
        "*" (Quantity, Quantity) => mul,
        "*" (Number, Quantity) => mul,
        "*" (Quantity, Number) => mul,
        "/" (Quantity, Quantity) => div,
        "/" (Number, Quantity) => div,
        "/" (Quantity, Number) => div,
        "^" (Quantity, Integer) => pow,
        "-" (Quantity) => negate,
        "+" (Quantity) => identity,
        "abs" (Quantity) => abs,
        "sqrt" (Quantity) => sqrt,
    });
}
