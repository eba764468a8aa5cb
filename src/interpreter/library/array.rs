use num::{BigInt, FromPrimitive, ToPrimitive};

use crate::{
    error::RuntimeError,
    interpreter::{
        dispatch::registry::{EvalResult, Keywords, NativeFn, Registry, RegistryBuilder, Signature},
        library::number,
        value::{
            core::{Type, Value},
            number::Number,
        },
    },
    register_functions,
    util::num::usize_to_number,
};

/// Longest array `range` will build.
const MAX_RANGE_LENGTH: u64 = 10_000_000;

/// Index of the last element of a range: `floor((hi - lo) / step)`, or
/// `None` when the range is empty.
///
/// A float quotient is allowed a relative error of `1e-12` before flooring,
/// so `range(0, 0.3, step: 0.1)` still ends at `0.3`.
fn last_index(lo: &Number, hi: &Number, step: &Number) -> Result<Option<u64>, RuntimeError> {
    let quotient = hi.sub(lo)?.div(step)?;
    if quotient.is_negative() {
        return Ok(None);
    }
    let last = match quotient {
        Number::Integer(i) => i,
        Number::Rational(r) => r.floor().to_integer(),
        Number::Float(f) => BigInt::from_f64(f.mul_add(1e-12, f).floor()).ok_or(RuntimeError::NumericOverflow)?,
    };
    match last.to_u64() {
        Some(last) if last < MAX_RANGE_LENGTH => Ok(Some(last)),
        _ => Err(RuntimeError::InvalidArgument { details: format!("range would have more than {MAX_RANGE_LENGTH} elements") }),
    }
}

/// `range(lo, hi)`: every value from `lo` up to and including `hi`, in
/// steps of `step` (default 1). A negative step counts down.
///
/// The length is fixed before any element is built and element `i` is
/// `lo + i * step`, so float steps neither drift nor loop forever.
///
/// # Example
/// ```
/// use ka::execute_default;
///
/// let values = execute_default("range(1, 2, step: 1/2)").unwrap().unwrap();
/// assert_eq!(values.to_string(), "{1, 3/2, 2}");
/// ```
fn range(_: &Registry, args: &[Value], keywords: &Keywords) -> EvalResult<Value> {
    let lo = args[0].as_number()?;
    let hi = args[1].as_number()?;
    let step = match keywords.get("step") {
        Some(step) => step.as_number()?,
        None => Number::one(),
    };
    if step.is_zero() {
        return Err(RuntimeError::InvalidArgument { details: "range step must not be zero".to_string() }.into());
    }

    let Some(last) = last_index(&lo, &hi, &step)? else {
        return Ok(Value::from(Vec::new()));
    };
    let values = (0..=last).map(|i| Ok(number(lo.add(&step.mul(&Number::from(BigInt::from(i)))?)?.simplify())))
                           .collect::<Result<Vec<_>, RuntimeError>>()?;
    Ok(Value::from(values))
}

fn len(_: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let count = match &args[0] {
        Value::String(s) => s.chars().count(),
        other => other.as_array()?.len(),
    };
    Ok(number(usize_to_number(count)))
}

/// Folds the elements with a dispatched operator, starting from `empty`.
fn fold(registry: &Registry, items: &[Value], op: &str, empty: Value) -> EvalResult<Value> {
    let Some((first, rest)) = items.split_first() else {
        return Ok(empty);
    };
    let mut total = first.clone();
    for item in rest {
        total = registry.call(op, &[total, item.clone()])?;
    }
    Ok(total)
}

fn sum(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    fold(registry, args[0].as_array()?, "+", Value::from(0))
}

fn prod(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    fold(registry, args[0].as_array()?, "*", Value::from(1))
}

fn mean(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let items = args[0].as_array()?;
    if items.is_empty() {
        return Err(RuntimeError::InvalidArgument { details: "mean of an empty array".to_string() }.into());
    }
    let total = fold(registry, items, "+", Value::from(0))?;
    registry.call("/", &[total, number(usize_to_number(items.len()))])
}

/// Smallest or largest element, compared with the dispatched `<`.
fn extreme(registry: &Registry, items: &[Value], op: &str) -> EvalResult<Value> {
    let Some((first, rest)) = items.split_first() else {
        return Err(RuntimeError::InvalidArgument { details: "expected a non-empty array".to_string() }.into());
    };
    let mut best = first.clone();
    for item in rest {
        if registry.call(op, &[item.clone(), best.clone()])?.as_bool()? {
            best = item.clone();
        }
    }
    Ok(best)
}

fn min(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    extreme(registry, args[0].as_array()?, "<")
}

fn max(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    extreme(registry, args[0].as_array()?, ">")
}

/// Applies `op` element by element. Arrays must have equal length; a
/// non-array operand is paired with every element.
fn elementwise(registry: &Registry, op: &str, left: &Value, right: &Value) -> EvalResult<Value> {
    let results = match (left, right) {
        (Value::Array(a), Value::Array(b)) => {
            if a.len() != b.len() {
                return Err(RuntimeError::InvalidArgument { details: format!("cannot combine arrays of length {} and {}", a.len(), b.len()) }.into());
            }
            a.iter()
             .zip(b.iter())
             .map(|(x, y)| registry.call(op, &[x.clone(), y.clone()]))
             .collect::<EvalResult<Vec<_>>>()?
        },
        (Value::Array(a), scalar) => a.iter()
                                      .map(|x| registry.call(op, &[x.clone(), scalar.clone()]))
                                      .collect::<EvalResult<Vec<_>>>()?,
        (scalar, Value::Array(b)) => b.iter()
                                      .map(|y| registry.call(op, &[scalar.clone(), y.clone()]))
                                      .collect::<EvalResult<Vec<_>>>()?,
        _ => return registry.call(op, &[left.clone(), right.clone()]),
    };
    Ok(Value::from(results))
}

/// Generates an element-wise array operator.
macro_rules! array_operator {
    ($fname:ident, $op:literal) => {
        fn $fname(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
            elementwise(registry, $op, &args[0], &args[1])
        }
    };
}

array_operator!(add, "+");
array_operator!(sub, "-");
array_operator!(mul, "*");
array_operator!(div, "/");
array_operator!(pow, "^");

fn negate(registry: &Registry, args: &[Value], _: &Keywords) -> EvalResult<Value> {
    let negated = args[0].as_array()?
                         .iter()
                         .map(|x| registry.call("-", std::slice::from_ref(x)))
                         .collect::<EvalResult<Vec<_>>>()?;
    Ok(Value::from(negated))
}

pub fn register(builder: &mut RegistryBuilder) {
    builder.register("range",
                     Signature::new(&[Type::Number, Type::Number]).keyword("step", Type::Number),
                     range);

    register_functions!(builder, {
        "len" (Array) => len,
        "len" (String) => len,
        "sum" (Array) => sum,
        "prod" (Array) => prod,
        "mean" (Array) => mean,
        "min" (Array) => min,
        "max" (Array) => max,
        "-" (Array) => negate,
    });

    let operators: [(&str, NativeFn); 5] = [("+", add), ("-", sub), ("*", mul), ("/", div), ("^", pow)];
    for (name, implementation) in operators {
        builder.register(name, Signature::new(&[Type::Array, Type::Array]), implementation)
               .register(name, Signature::new(&[Type::Array, Type::Any]), implementation)
               .register(name, Signature::new(&[Type::Any, Type::Array]), implementation);
    }
}
