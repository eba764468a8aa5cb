use crate::interpreter::{
    dispatch::registry::{Registry, RegistryBuilder},
    value::{core::Value, number::Number},
};

/// Operators and functions on plain numbers.
pub mod arithmetic;
/// Element-wise array arithmetic, ranges and reductions.
pub mod array;
/// Factorials, binomial coefficients and permutations.
pub mod combinatoric;
/// Ordering and equality operators.
pub mod comparison;
/// Arithmetic between instants and time quantities.
pub mod instant;
/// Interval construction and interval arithmetic.
pub mod interval;
/// Elementary and special functions.
pub mod math;
/// Strings, assertions and control signals.
pub mod misc;
/// Probability distributions and their queries.
pub mod probability;
/// Arithmetic on quantities, plus unit conversion.
pub mod quantity;

/// Registers every builtin into `builder`.
pub fn register_standard(builder: &mut RegistryBuilder) {
    arithmetic::register(builder);
    quantity::register(builder);
    comparison::register(builder);
    combinatoric::register(builder);
    math::register(builder);
    array::register(builder);
    interval::register(builder);
    instant::register(builder);
    probability::register(builder);
    misc::register(builder);
}

/// Builds the registry every interpreter starts with.
#[must_use]
pub fn standard_functions() -> Registry {
    let mut builder = RegistryBuilder::new();
    register_standard(&mut builder);
    builder.build()
}

/// Wraps a number as a value.
pub(crate) const fn number(n: Number) -> Value {
    Value::Number(n)
}
