use std::rc::Rc;

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, Registry, RegistryBuilder},
        library::number,
        value::{
            core::Value,
            random::{Bernoulli, Binomial, Exponential, Gaussian, Geometric, Poisson, RandomVariable, Uniform, UniformInt},
        },
    },
    register_functions,
    util::num::{number_to_i64, number_to_u64},
};

fn distribution(variable: impl RandomVariable + 'static) -> Value {
    Value::RandomVariable(Rc::new(variable))
}

fn variable(value: &Value) -> Result<&dyn RandomVariable, RuntimeError> {
    match value {
        Value::RandomVariable(x) => Ok(x.as_ref()),
        other => Err(RuntimeError::InvalidArgument { details: format!("expected a random variable, got {other}") }),
    }
}

fn binomial(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let n = number_to_u64(&args[0].as_number()?, "parameter n for Binomial")?;
    Ok(distribution(Binomial::new(n, args[1].as_number()?)?))
}

fn poisson(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Poisson::new(&args[0].as_number()?)?))
}

fn geometric(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Geometric::new(args[0].as_number()?)?))
}

fn bernoulli(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Bernoulli::new(args[0].as_number()?)?))
}

fn uniform_int(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let lo = number_to_i64(&args[0].as_number()?, "lower bound of UniformInt")?;
    let hi = number_to_i64(&args[1].as_number()?, "upper bound of UniformInt")?;
    Ok(distribution(UniformInt::new(lo, hi)?))
}

fn exponential(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Exponential::new(&args[0].as_number()?)?))
}

fn uniform(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Uniform::new(args[0].as_number()?, args[1].as_number()?)?))
}

fn gaussian(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(distribution(Gaussian::new(args[0].as_number()?, &args[1].as_number()?)?))
}

/// `pmf(X, x)`. Only discrete distributions have one.
///
/// # Example
/// ```
/// use ka::execute_default;
///
/// let p = execute_default("pmf(Binomial(4, 1/2), 2)").unwrap().unwrap();
/// assert_eq!(p.to_string(), "3/8");
/// ```
fn pmf(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let x = variable(&args[0])?;
    let Some(p) = x.pmf(&args[1].as_number()?)? else {
        return Err(RuntimeError::InvalidArgument { details: format!("{x} is continuous and has no pmf") }.into());
    };
    Ok(number(p))
}

fn cdf(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(variable(&args[0])?.cdf(&args[1].as_number()?)?))
}

fn mean(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    Ok(number(variable(&args[0])?.mean()?))
}

fn sample(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let x = variable(&args[0])?;
    Ok(number(x.sample(&mut rand::thread_rng())?))
}

/// `sample(X, n)`: an array of `n` independent draws.
fn samples(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let x = variable(&args[0])?;
    let count = number_to_u64(&args[1].as_number()?, "sample count")?;
    let mut rng = rand::thread_rng();
    let draws = (0..count).map(|_| x.sample(&mut rng).map(number))
                          .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::from(draws))
}

pub fn register(builder: &mut RegistryBuilder) {
    register_functions!(builder, {
        "Binomial" (Integer, Number) => binomial,
        "Poisson" (Number) => poisson,
        "Geometric" (Number) => geometric,
        "Bernoulli" (Number) => bernoulli,
        "UniformInt" (Integer, Integer) => uniform_int,
        "Exponential" (Number) => exponential,
        "Uniform" (Number, Number) => uniform,
        "Gaussian" (Number, Number) => gaussian,
        "pmf" (RandomVariable, Number) => pmf,
        "cdf" (RandomVariable, Number) => cdf,
        "mean" (RandomVariable) => mean,
        "sample" (RandomVariable) => sample,
        "sample" (RandomVariable, Integer) => samples,
    });
}
