use crate::{
    error::{ControlSignal, RuntimeError},
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        value::core::Value,
    },
    register_functions,
};

fn assert(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    if args[0].as_bool()? {
        Ok(Value::Bool(true))
    } else {
        Err(RuntimeError::AssertionFailed.into())
    }
}

/// Stops the script. The signal travels up to `execute` like an error but is
/// not one.
fn quit(_: &Registry, _: &[Value], _: &Keywords) -> EvalResult<Value> {
    Err(ControlSignal::Exit.into())
}

fn concat(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (Value::String(a), Value::String(b)) = (&args[0], &args[1]) else {
        return Err(RuntimeError::InvalidArgument { details: "expected two strings".to_string() }.into());
    };
    Ok(Value::from(format!("{a}{b}").as_str()))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "assert" (Bool) => assert,
        "quit" () => quit,
        "+" (String, String) => concat,
    });
}
