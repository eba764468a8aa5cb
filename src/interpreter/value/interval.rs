use std::{cmp::Ordering, fmt};

use crate::{error::RuntimeError, interpreter::value::number::Number};

/// A closed interval `[lo, hi]` of numbers with `lo <= hi`.
///
/// Arithmetic follows interval arithmetic: the result contains every value
/// obtainable by combining a member of each operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    lo: Number,
    hi: Number,
}

fn min(a: Number, b: Number) -> Result<Number, RuntimeError> {
    Ok(if a.compare(&b)? == Ordering::Greater { b } else { a })
}

fn max(a: Number, b: Number) -> Result<Number, RuntimeError> {
    Ok(if a.compare(&b)? == Ordering::Less { b } else { a })
}

impl Interval {
    /// Builds `[lo, hi]`.
    ///
    /// # Errors
    /// `InvalidArgument` when `lo > hi`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::{interval::Interval, number::Number};
    ///
    /// let i = Interval::new(Number::from(1), Number::from(3)).unwrap();
    /// assert_eq!(i.to_string(), "[1, 3]");
    /// assert!(Interval::new(Number::from(3), Number::from(1)).is_err());
    /// ```
    pub fn new(lo: Number, hi: Number) -> Result<Self, RuntimeError> {
        if lo.compare(&hi)? == Ordering::Greater {
            return Err(RuntimeError::InvalidArgument { details: format!("interval lower bound {lo} exceeds upper bound {hi}") });
        }
        Ok(Self { lo: lo.simplify(),
                  hi: hi.simplify() })
    }

    #[must_use]
    pub const fn lo(&self) -> &Number {
        &self.lo
    }

    #[must_use]
    pub const fn hi(&self) -> &Number {
        &self.hi
    }

    pub fn add(&self, other: &Self) -> Result<Self, RuntimeError> {
        Self::new(self.lo.add(&other.lo)?, self.hi.add(&other.hi)?)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, RuntimeError> {
        Self::new(self.lo.sub(&other.hi)?, self.hi.sub(&other.lo)?)
    }

    /// Product interval: the extremes of the four endpoint products.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::{interval::Interval, number::Number};
    ///
    /// let a = Interval::new(Number::from(-1), Number::from(2)).unwrap();
    /// let b = Interval::new(Number::from(3), Number::from(4)).unwrap();
    /// assert_eq!(a.mul(&b).unwrap().to_string(), "[-4, 8]");
    /// ```
    pub fn mul(&self, other: &Self) -> Result<Self, RuntimeError> {
        let products = [self.lo.mul(&other.lo)?,
                        self.lo.mul(&other.hi)?,
                        self.hi.mul(&other.lo)?,
                        self.hi.mul(&other.hi)?];
        let mut lo = products[0].clone();
        let mut hi = products[0].clone();
        for p in &products[1..] {
            lo = min(lo, p.clone())?;
            hi = max(hi, p.clone())?;
        }
        Self::new(lo, hi)
    }

    /// Moves both ends by `x`.
    pub fn shift(&self, x: &Number) -> Result<Self, RuntimeError> {
        Self::new(self.lo.add(x)?, self.hi.add(x)?)
    }

    /// Multiplies both ends by `x`, swapping them when `x` is negative.
    pub fn scale(&self, x: &Number) -> Result<Self, RuntimeError> {
        let (a, b) = (self.lo.mul(x)?, self.hi.mul(x)?);
        if x.is_negative() { Self::new(b, a) } else { Self::new(a, b) }
    }

    pub fn contains(&self, x: &Number) -> Result<bool, RuntimeError> {
        Ok(self.lo.compare(x)? != Ordering::Greater && x.compare(&self.hi)? != Ordering::Greater)
    }

    pub fn width(&self) -> Result<Number, RuntimeError> {
        self.hi.sub(&self.lo)
    }

    /// The integers from `lo` to `hi`, both inclusive.
    ///
    /// # Errors
    /// `InvalidArgument` when either end is not an integer.
    pub fn integers(&self) -> Result<Vec<Number>, RuntimeError> {
        let (Some(lo), Some(hi)) = (self.lo.to_integer(), self.hi.to_integer()) else {
            return Err(RuntimeError::InvalidArgument { details: format!("can only iterate over intervals with integer ends, got {self}") });
        };
        let mut values = Vec::new();
        let mut current = lo;
        while current <= hi {
            values.push(Number::Integer(current.clone()));
            current += 1;
        }
        Ok(values)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
