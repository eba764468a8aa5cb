use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        library::number,
        value::{core::Value, interval::Interval, number::Number},
    },
    register_functions,
};

fn interval_arg(value: &Value) -> Result<&Interval, RuntimeError> {
    match value {
        Value::Interval(i) => Ok(i),
        other => Err(RuntimeError::InvalidArgument { details: format!("expected an interval, got {other}") }),
    }
}

/// `interval(lo, hi)`, the call form of `[lo, hi]`.
fn interval(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Interval(Interval::new(args[0].as_number()?, args[1].as_number()?)?))
}

fn add(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Interval(interval_arg(&args[0])?.add(interval_arg(&args[1])?)?))
}

fn sub(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Interval(interval_arg(&args[0])?.sub(interval_arg(&args[1])?)?))
}

fn mul(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Interval(interval_arg(&args[0])?.mul(interval_arg(&args[1])?)?))
}

/// Splits a mixed argument pair into the interval and the number, in either
/// order.
fn mixed(args: &[Value]) -> Result<(&Interval, Number), RuntimeError> {
    match (&args[0], &args[1]) {
        (Value::Interval(i), x) | (x, Value::Interval(i)) => Ok((i, x.as_number()?)),
        _ => Err(RuntimeError::InvalidArgument { details: "expected an interval and a number".to_string() }),
    }
}

fn shift(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (i, x) = mixed(args)?;
    Ok(Value::Interval(i.shift(&x)?))
}

fn shift_down(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (i, x) = mixed(args)?;
    Ok(Value::Interval(i.shift(&x.neg())?))
}

/// `x - [lo, hi]` is `[x - hi, x - lo]`.
fn subtract_from(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (i, x) = mixed(args)?;
    Ok(Value::Interval(i.scale(&Number::from(-1))?.shift(&x)?))
}

fn scale(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (i, x) = mixed(args)?;
    Ok(Value::Interval(i.scale(&x)?))
}

fn scale_down(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (i, x) = mixed(args)?;
    Ok(Value::Interval(i.scale(&Number::one().div(&x)?)?))
}

fn negate(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Interval(interval_arg(&args[0])?.scale(&Number::from(-1))?))
}

fn contains(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Bool(interval_arg(&args[0])?.contains(&args[1].as_number()?)?))
}

fn width(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(interval_arg(&args[0])?.width()?))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "interval" (Number, Number) => interval,
        "+" (Interval, Interval) => add,
        "-" (Interval, Interval) => sub,
        "*" (Interval, Interval) => mul,
        "+" (Interval, Number) => shift,
        "+" (Number, Interval) => shift,
        "-" (Interval, Number) => shift_down,
        "-" (Number, Interval) => subtract_from,
        "*" (Interval, Number) => scale,
        "*" (Number, Interval) => scale,
        "/" (Interval, Number) => scale_down,
        "-" (Interval) => negate,
        "contains" (Interval, Number) => contains,
        "width" (Interval) => width,
    });
}
