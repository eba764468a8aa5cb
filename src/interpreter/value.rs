/// The runtime `Value` enum and the `Type` lattice used for dispatch.
pub mod core;
/// The numeric tower: integers, exact fractions and floats.
///
/// Every arithmetic operation coerces both operands to the higher kind,
/// operates, and leaves the caller to collapse the result back to its
/// simplest kind.
pub mod number;
/// Lazily evaluated factorials, binomial coefficients and permutations.
pub mod combinatoric;
/// Closed numeric intervals and interval arithmetic.
pub mod interval;
/// Points in time, parsed from date literals.
pub mod instant;
/// Probability distributions.
pub mod random;
