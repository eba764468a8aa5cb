use std::rc::Rc;

use num::{Signed, ToPrimitive};

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        library::number,
        value::{combinatoric::Combinatoric, core::Value, number::Number},
    },
    register_functions,
    util::special::gamma,
};

fn lazy(c: Combinatoric) -> Value {
    Value::Combinatoric(Rc::new(c))
}

/// Reads an integer argument. `None` means it is negative.
fn natural(value: &Value) -> Result<Option<u64>, RuntimeError> {
    let n = value.as_number()?
                 .to_integer()
                 .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("expected an integer, got {value}") })?;
    if n.is_negative() {
        return Ok(None);
    }
    n.to_u64().map(Some).ok_or(RuntimeError::NumericOverflow)
}

/// `n!` on integers, as a lazy combinatoric.
fn factorial(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let Some(n) = natural(&args[0])? else {
        return Err(RuntimeError::InvalidArgument { details: "factorial is not defined for negative integers".to_string() }.into());
    };
    Ok(lazy(Combinatoric::factorial(n)))
}

/// `x!` on any other number: exact for whole numbers, otherwise through the
/// Gamma function.
fn number_factorial(registry: &Registry, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
    let x = args[0].as_number()?;
    if let Some(n) = x.to_integer() {
        return factorial(registry, &[number(Number::Integer(n))], keywords);
    }
    Ok(number(Number::float(gamma(x.to_f64()? + 1.0)?)?))
}

/// `C(n, k)`. Zero when `k > n` or either argument is negative.
fn choose(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    match (natural(&args[0])?, natural(&args[1])?) {
        (Some(n), Some(k)) if k <= n => Ok(lazy(Combinatoric::choose(n, k))),
        _ => Ok(number(Number::zero())),
    }
}

/// `P(n, k) = n! / (n-k)!`. Zero when `k > n` or either argument is negative.
fn permutations(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    match (natural(&args[0])?, natural(&args[1])?) {
        (Some(n), Some(k)) if k <= n => Ok(lazy(Combinatoric::permutations(n, k))),
        _ => Ok(number(Number::zero())),
    }
}

fn combinatorics(args: &[Value]) -> Result<(&Combinatoric, &Combinatoric), RuntimeError> {
    match (&args[0], &args[1]) {
        (Value::Combinatoric(a), Value::Combinatoric(b)) => Ok((a, b)),
        _ => Err(RuntimeError::InvalidArgument { details: "expected two combinatorics".to_string() }),
    }
}

fn times(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, b) = combinatorics(args)?;
    Ok(lazy(a.times(b)))
}

fn over(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let (a, b) = combinatorics(args)?;
    Ok(lazy(a.over(b)))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "!" (Integer) => factorial,
        "!" (Number) => number_factorial,
        "factorial" (Integer) => factorial,
        "C" (Integer, Integer) => choose,
        "choose" (Integer, Integer) => choose,
        "P" (Integer, Integer) => permutations,
        "perm" (Integer, Integer) => permutations,
        "*" (Combinatoric, Combinatoric) => times,
        "/" (Combinatoric, Combinatoric) => over,
    });
}
