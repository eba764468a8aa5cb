use std::{cmp::Ordering, fmt};

use num::{BigInt, BigRational, FromPrimitive, Integer, One, Signed, ToPrimitive, Zero};

use crate::{error::RuntimeError, util::num::check_finite};

/// A scalar number in the numeric tower.
///
/// The kinds are ordered `Integer < Rational < Float`. Binary arithmetic
/// first [`coerce`](Number::coerce)s both operands to the higher of the two
/// kinds, then operates, and callers [`simplify`](Number::simplify) the
/// result so that every number is kept in its simplest kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// An arbitrary precision integer.
    Integer(BigInt),
    /// An exact fraction. Always stored in lowest terms.
    Rational(BigRational),
    /// An IEEE-754 double. Never infinite or NaN.
    Float(f64),
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(BigInt::from(value))
    }
}

impl From<BigInt> for Number {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<BigRational> for Number {
    fn from(value: BigRational) -> Self {
        Self::Rational(value)
    }
}

impl Number {
    /// Builds an exact fraction `numerator / denominator`.
    ///
    /// # Errors
    /// `DivisionByZero` when `denominator` is zero.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::number::Number;
    ///
    /// let half = Number::ratio(2, 4).unwrap();
    /// assert_eq!(half.to_string(), "1/2");
    /// ```
    pub fn ratio(numerator: i64, denominator: i64) -> Result<Self, RuntimeError> {
        if denominator == 0 {
            return Err(RuntimeError::DivisionByZero);
        }
        Ok(Self::Rational(BigRational::new(numerator.into(), denominator.into())))
    }

    /// Wraps a float, rejecting non-finite values.
    ///
    /// # Errors
    /// `NumericOverflow` for infinities, `NotANumber` for NaN.
    pub fn float(value: f64) -> Result<Self, RuntimeError> {
        Ok(Self::Float(check_finite(value)?))
    }

    /// Position of this kind in the tower. Higher ranks absorb lower ones.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Integer(_) => 0,
            Self::Rational(_) => 1,
            Self::Float(_) => 2,
        }
    }

    /// Collapses the number to its simplest kind.
    ///
    /// A float with zero fractional part becomes an integer. A fraction with
    /// denominator one becomes an integer. Anything else is unchanged.
    /// Floats are never turned into fractions.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::number::Number;
    ///
    /// assert_eq!(Number::Float(4.0).simplify(), Number::from(4));
    /// assert_eq!(Number::ratio(8, 4).unwrap().simplify(), Number::from(2));
    /// assert_eq!(Number::Float(0.5).simplify(), Number::Float(0.5));
    /// ```
    #[must_use]
    pub fn simplify(self) -> Self {
        match self {
            Self::Float(f) if f.fract() == 0.0 => {
                BigInt::from_f64(f).map_or(Self::Float(f), Self::Integer)
            },
            Self::Rational(r) if r.is_integer() => Self::Integer(r.to_integer()),
            other => other,
        }
    }

    /// Moves the number one step up the tower.
    fn promote(self) -> Result<Self, RuntimeError> {
        match self {
            Self::Integer(i) => Ok(Self::Rational(BigRational::from_integer(i))),
            Self::Rational(r) => {
                let f = r.to_f64().ok_or(RuntimeError::NumericOverflow)?;
                Self::float(f)
            },
            Self::Float(f) => Ok(Self::Float(f)),
        }
    }

    /// Promotes the lower-ranked operand until both share a kind.
    ///
    /// # Errors
    /// `NumericOverflow` when an exact value is too large for a float.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::number::Number;
    ///
    /// let (a, b) = Number::coerce(Number::from(1), Number::Float(0.5)).unwrap();
    /// assert_eq!(a, Number::Float(1.0));
    /// assert_eq!(b, Number::Float(0.5));
    /// ```
    pub fn coerce(a: Self, b: Self) -> Result<(Self, Self), RuntimeError> {
        let (mut a, mut b) = (a, b);
        while a.rank() < b.rank() {
            a = a.promote()?;
        }
        while b.rank() < a.rank() {
            b = b.promote()?;
        }
        Ok((a, b))
    }

    /// Converts the number to a float of the same value.
    ///
    /// # Errors
    /// `NumericOverflow` when the value does not fit in an `f64`.
    pub fn to_f64(&self) -> Result<f64, RuntimeError> {
        let f = match self {
            Self::Integer(i) => i.to_f64(),
            Self::Rational(r) => r.to_f64(),
            Self::Float(f) => Some(*f),
        };
        check_finite(f.ok_or(RuntimeError::NumericOverflow)?)
    }

    /// Converts the number to an exact fraction, if it has one.
    #[must_use]
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            Self::Integer(i) => Some(BigRational::from_integer(i.clone())),
            Self::Rational(r) => Some(r.clone()),
            Self::Float(f) => BigRational::from_float(*f),
        }
    }

    /// Returns the integer value when the number is integral.
    #[must_use]
    pub fn to_integer(&self) -> Option<BigInt> {
        match self.clone().simplify() {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Integer(i) => i.is_zero(),
            Self::Rational(r) => r.is_zero(),
            Self::Float(f) => *f == 0.0,
        }
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer(i) => i.is_negative(),
            Self::Rational(r) => r.is_negative(),
            Self::Float(f) => *f < 0.0,
        }
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        match self {
            Self::Integer(i) => Self::Integer(-i),
            Self::Rational(r) => Self::Rational(-r),
            Self::Float(f) => Self::Float(-f),
        }
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        match self {
            Self::Integer(i) => Self::Integer(i.abs()),
            Self::Rational(r) => Self::Rational(r.abs()),
            Self::Float(f) => Self::Float(f.abs()),
        }
    }

    /// Adds two numbers after coercion.
    pub fn add(&self, other: &Self) -> Result<Self, RuntimeError> {
        match Self::coerce(self.clone(), other.clone())? {
            (Self::Integer(a), Self::Integer(b)) => Ok(Self::Integer(a + b)),
            (Self::Rational(a), Self::Rational(b)) => Ok(Self::Rational(a + b)),
            (a, b) => Self::float(a.to_f64()? + b.to_f64()?),
        }
    }

    /// Subtracts `other` from `self` after coercion.
    pub fn sub(&self, other: &Self) -> Result<Self, RuntimeError> {
        self.add(&other.neg())
    }

    /// Multiplies two numbers after coercion.
    pub fn mul(&self, other: &Self) -> Result<Self, RuntimeError> {
        match Self::coerce(self.clone(), other.clone())? {
            (Self::Integer(a), Self::Integer(b)) => Ok(Self::Integer(a * b)),
            (Self::Rational(a), Self::Rational(b)) => Ok(Self::Rational(a * b)),
            (a, b) => Self::float(a.to_f64()? * b.to_f64()?),
        }
    }

    /// Divides `self` by `other`.
    ///
    /// Dividing two integers produces an exact fraction, never a float.
    ///
    /// # Errors
    /// `DivisionByZero` when `other` is zero.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::number::Number;
    ///
    /// let q = Number::from(3).div(&Number::from(4)).unwrap();
    /// assert_eq!(q, Number::ratio(3, 4).unwrap());
    /// ```
    pub fn div(&self, other: &Self) -> Result<Self, RuntimeError> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        match Self::coerce(self.clone(), other.clone())? {
            (Self::Integer(a), Self::Integer(b)) => Ok(Self::Rational(BigRational::new(a, b))),
            (Self::Rational(a), Self::Rational(b)) => Ok(Self::Rational(a / b)),
            (a, b) => Self::float(a.to_f64()? / b.to_f64()?),
        }
    }

    /// Floored remainder; the result takes the sign of `other`.
    ///
    /// # Errors
    /// `DivisionByZero` when `other` is zero.
    pub fn rem(&self, other: &Self) -> Result<Self, RuntimeError> {
        if other.is_zero() {
            return Err(RuntimeError::DivisionByZero);
        }
        match Self::coerce(self.clone(), other.clone())? {
            (Self::Integer(a), Self::Integer(b)) => Ok(Self::Integer(a.mod_floor(&b))),
            (Self::Rational(a), Self::Rational(b)) => {
                let quotient = (&a / &b).floor();
                Ok(Self::Rational(a - b * quotient))
            },
            (a, b) => {
                let (a, b) = (a.to_f64()?, b.to_f64()?);
                Self::float(a - b * (a / b).floor())
            },
        }
    }

    /// Raises `self` to the power `exponent`.
    ///
    /// Integer and rational bases raised to integer exponents stay exact;
    /// a negative integer exponent yields a fraction. Every other
    /// combination is evaluated in floating point.
    ///
    /// # Errors
    /// - `DivisionByZero` for zero raised to a negative power.
    /// - `NumericOverflow` when the exponent or the result is too large.
    /// - `NotANumber` for results such as `(-8)^0.5`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::number::Number;
    ///
    /// let x = Number::from(2).pow(&Number::from(-2)).unwrap();
    /// assert_eq!(x, Number::ratio(1, 4).unwrap());
    /// ```
    pub fn pow(&self, exponent: &Self) -> Result<Self, RuntimeError> {
        let exact_base = match self {
            Self::Integer(base) => Some(BigRational::from_integer(base.clone())),
            Self::Rational(base) => Some(base.clone()),
            Self::Float(_) => None,
        };
        if let Self::Integer(e) = exponent
           && let Some(base) = exact_base
        {
            let e = e.to_i32().ok_or(RuntimeError::NumericOverflow)?;
            if e < 0 && self.is_zero() {
                return Err(RuntimeError::DivisionByZero);
            }
            let magnitude = e.unsigned_abs();
            let raised = BigRational::new(base.numer().pow(magnitude), base.denom().pow(magnitude));
            return Ok(if e < 0 {
                          Self::Rational(raised.recip())
                      } else {
                          Self::Rational(raised)
                      }.simplify());
        }

        let base = self.to_f64()?;
        let e = exponent.to_f64()?;
        if base == 0.0 && e < 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        Self::float(base.powf(e))
    }

    /// Compares two numbers after coercion.
    ///
    /// # Errors
    /// `NumericOverflow` if coercion to float overflows.
    pub fn compare(&self, other: &Self) -> Result<Ordering, RuntimeError> {
        match Self::coerce(self.clone(), other.clone())? {
            (Self::Integer(a), Self::Integer(b)) => Ok(a.cmp(&b)),
            (Self::Rational(a), Self::Rational(b)) => Ok(a.cmp(&b)),
            (a, b) => a.to_f64()?
                       .partial_cmp(&b.to_f64()?)
                       .ok_or(RuntimeError::NotANumber),
        }
    }

    /// Numeric equality across kinds, so that `1 == 1.0`.
    pub fn numeric_eq(&self, other: &Self) -> Result<bool, RuntimeError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    #[must_use]
    pub fn one() -> Self {
        Self::Integer(BigInt::one())
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::Integer(BigInt::zero())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}
