use crate::{
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        library::number,
        value::core::Value,
    },
    register_functions,
};

/// Generates a binary operator over two numbers from a `Number` method.
macro_rules! numeric_operator {
    ($fname:ident, $method:ident) => {
        fn $fname(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
            let (a, b) = (args[0].as_number()?, args[1].as_number()?);
            Ok(number(a.$method(&b)?))
        }
    };
}

numeric_operator!(add, add);
numeric_operator!(sub, sub);
numeric_operator!(mul, mul);
numeric_operator!(div, div);
numeric_operator!(rem, rem);
numeric_operator!(pow, pow);

fn negate(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(args[0].as_number()?.neg()))
}

fn identity(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(args[0].clone())
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "+" (Number, Number) => add,
        "-" (Number, Number) => sub,
        "*" (Number, Number) => mul,
        "/" (Number, Number) => div,
        "%" (Number, Number) => rem,
        "^" (Number, Number) => pow,
        "-" (Number) => negate,
        "+" (Number) => identity,
    });
}
