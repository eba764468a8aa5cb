use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        units::{quantity::Quantity, vector::QuantityVector},
        value::{core::Value, instant::Instant, number::Number},
    },
    register_functions,
};

/// Splits a mixed argument pair into the instant and a duration in seconds.
///
/// # Errors
/// `IncompatibleQuantities` unless the quantity is a time.
fn instant_and_duration(args: &[Value]) -> Result<(Instant, Number), RuntimeError> {
    match (&args[0], &args[1]) {
        (Value::Instant(t), Value::Quantity(q)) | (Value::Quantity(q), Value::Instant(t)) => {
            if q.vector != QuantityVector::TIME {
                return Err(RuntimeError::IncompatibleQuantities { left:  QuantityVector::TIME,
                                                                  right: q.vector, });
            }
            Ok((*t, q.magnitude.clone()))
        },
        _ => Err(RuntimeError::InvalidArgument { details: "expected an instant and a time".to_string() }),
    }
}

/// `t1 - t2` is the time between them, in seconds.
///
/// # Example
/// ```
/// use ka::execute_default;
///
/// let day = execute_default("#2024-03-01# - #2024-02-29# to hr").unwrap().unwrap();
/// assert_eq!(day.to_string(), "24 hr");
/// ```
fn elapsed(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (Value::Instant(later), Value::Instant(earlier)) = (&args[0], &args[1]) else {
        return Err(RuntimeError::InvalidArgument { details: "expected two instants".to_string() }.into());
    };
    Ok(Quantity::value(later.since(*earlier), QuantityVector::TIME))
}

fn later(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (t, seconds) = instant_and_duration(args)?;
    Ok(Value::Instant(t.offset(&seconds)?))
}

fn earlier(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (t, seconds) = instant_and_duration(args)?;
    Ok(Value::Instant(t.offset(&seconds.neg())?))
}

fn now(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(Value::Instant(Instant::now()?))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "-" (Instant, Instant) => elapsed,
        "+" (Instant, Quantity) => later,
        "+" (Quantity, Instant) => later,
        "-" (Instant, Quantity) => earlier,
        "now" () => now,
    });
}
