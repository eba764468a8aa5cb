use num::{BigInt, ToPrimitive};

use crate::{error::RuntimeError, interpreter::value::number::Number};

/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Rejects non-finite floats.
///
/// ## Errors
/// - `NotANumber` for NaN.
/// - `NumericOverflow` for either infinity.
///
/// ## Example
/// ```
/// use ka::{error::RuntimeError, util::num::check_finite};
///
/// assert_eq!(check_finite(1.5), Ok(1.5));
/// assert_eq!(check_finite(f64::INFINITY), Err(RuntimeError::NumericOverflow));
/// assert_eq!(check_finite(f64::NAN), Err(RuntimeError::NotANumber));
/// ```
pub fn check_finite(value: f64) -> Result<f64, RuntimeError> {
    if value.is_nan() {
        Err(RuntimeError::NotANumber)
    } else if value.is_infinite() {
        Err(RuntimeError::NumericOverflow)
    } else {
        Ok(value)
    }
}

/// Converts an integral number to `u64`.
///
/// ## Parameters
/// - `value`: The number to convert. Integral floats are accepted.
/// - `what`: Name of the argument, used in the error message.
///
/// ## Errors
/// `InvalidArgument` when the number is negative, fractional or too large.
///
/// ## Example
/// ```
/// use ka::{interpreter::value::number::Number, util::num::number_to_u64};
///
/// assert_eq!(number_to_u64(&Number::from(7), "n").unwrap(), 7);
/// assert!(number_to_u64(&Number::from(-1), "n").is_err());
/// assert!(number_to_u64(&Number::Float(0.5), "n").is_err());
/// ```
pub fn number_to_u64(value: &Number, what: &str) -> Result<u64, RuntimeError> {
    value.to_integer()
         .and_then(|i| i.to_u64())
         .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{what} must be a non-negative integer, got {value}") })
}

/// Converts an integral number to `i64`.
///
/// ## Errors
/// `InvalidArgument` when the number is fractional or out of range.
pub fn number_to_i64(value: &Number, what: &str) -> Result<i64, RuntimeError> {
    value.to_integer()
         .and_then(|i| i.to_i64())
         .ok_or_else(|| RuntimeError::InvalidArgument { details: format!("{what} must be an integer, got {value}") })
}

/// Converts a `usize` length into a number.
#[must_use]
pub fn usize_to_number(value: usize) -> Number {
    Number::Integer(BigInt::from(value))
}

/// Converts a `u64` to `f64` if and only if it is exactly representable.
///
/// ## Errors
/// `NumericOverflow` if the value exceeds [`MAX_SAFE_U64_INT`].
#[allow(clippy::cast_precision_loss)]
pub const fn u64_to_f64_checked(value: u64) -> Result<f64, RuntimeError> {
    if value > MAX_SAFE_U64_INT {
        return Err(RuntimeError::NumericOverflow);
    }
    Ok(value as f64)
}

/// Converts a finite `f64` with no fractional part to `i64`.
///
/// ## Errors
/// `InvalidArgument` for fractional or out of range values.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> Result<i64, RuntimeError> {
    let value = check_finite(value)?;
    if value < i64::MIN as f64 || value > i64::MAX as f64 || value.fract() != 0.0 {
        return Err(RuntimeError::InvalidArgument { details: format!("{value} is not a representable integer") });
    }
    Ok(value as i64)
}
