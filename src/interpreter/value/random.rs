use std::{cmp::Ordering, fmt};

use num::{BigInt, ToPrimitive};
use rand::{Rng, RngCore};

use crate::{
    error::RuntimeError,
    interpreter::value::{combinatoric::Combinatoric, number::Number},
    util::{num::u64_to_f64_checked, special::erf},
};

/// The capability contract shared by every probability distribution.
///
/// Discrete distributions answer [`pmf`](RandomVariable::pmf); continuous
/// ones return `None` from it. Parameters are validated on construction, so
/// the methods only fail on arithmetic errors.
pub trait RandomVariable: fmt::Debug + fmt::Display {
    /// Probability of exactly `x`, or `None` for continuous distributions.
    fn pmf(&self, _x: &Number) -> Result<Option<Number>, RuntimeError> {
        Ok(None)
    }

    /// Probability of a value less than or equal to `x`.
    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError>;

    /// The expected value.
    fn mean(&self) -> Result<Number, RuntimeError>;

    /// Draws one value.
    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError>;
}

fn invalid(details: String) -> RuntimeError {
    RuntimeError::InvalidArgument { details }
}

fn check_probability(p: &Number, distribution: &str) -> Result<(), RuntimeError> {
    if p.is_negative() || p.compare(&Number::one())? == Ordering::Greater {
        return Err(invalid(format!("parameter p for {distribution} must be between 0 and 1, was {p}")));
    }
    Ok(())
}

/// Integer value of `x` when it is a whole number, for discrete supports.
fn whole(x: &Number) -> Option<BigInt> {
    x.to_integer()
}

/// `floor(x)` as a big integer.
fn floor(x: &Number) -> Result<BigInt, RuntimeError> {
    match x {
        Number::Integer(i) => Ok(i.clone()),
        Number::Rational(r) => Ok(r.floor().to_integer()),
        Number::Float(f) => {
            num::FromPrimitive::from_f64(f.floor()).ok_or(RuntimeError::NumericOverflow)
        },
    }
}

fn complement(p: &Number) -> Result<Number, RuntimeError> {
    Number::one().sub(p)
}

fn uniform_draw(rng: &mut dyn RngCore) -> f64 {
    rng.r#gen::<f64>()
}

/// Number of successes in `n` independent trials with success chance `p`.
#[derive(Debug)]
pub struct Binomial {
    n: u64,
    p: Number,
}

impl Binomial {
    pub fn new(n: u64, p: Number) -> Result<Self, RuntimeError> {
        if n == 0 {
            return Err(invalid(format!("parameter n for Binomial must be greater than 0, was {n}")));
        }
        check_probability(&p, "Binomial")?;
        Ok(Self { n, p })
    }
}

impl RandomVariable for Binomial {
    fn pmf(&self, x: &Number) -> Result<Option<Number>, RuntimeError> {
        let Some(k) = whole(x).and_then(|k| k.to_u64()).filter(|&k| k <= self.n) else {
            return Ok(Some(Number::zero()));
        };
        let ways = Combinatoric::choose(self.n, k).resolve();
        let hits = self.p.pow(&Number::from(BigInt::from(k)))?;
        let misses = complement(&self.p)?.pow(&Number::from(BigInt::from(self.n - k)))?;
        Ok(Some(ways.mul(&hits)?.mul(&misses)?))
    }

    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        let top = floor(x)?;
        let mut total = Number::zero();
        let mut k = BigInt::from(0);
        while k <= top && k <= BigInt::from(self.n) {
            if let Some(p) = self.pmf(&Number::Integer(k.clone()))? {
                total = total.add(&p)?;
            }
            k += 1;
        }
        Ok(total)
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Number::from(BigInt::from(self.n)).mul(&self.p)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        let p = self.p.to_f64()?;
        let successes = (0..self.n).filter(|_| uniform_draw(rng) < p).count();
        Ok(Number::from(BigInt::from(successes)))
    }
}

impl fmt::Display for Binomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binomial(n={}, p={})", self.n, self.p)
    }
}

/// Count of events in a fixed interval with average rate `mu`.
#[derive(Debug)]
pub struct Poisson {
    mu: f64,
}

impl Poisson {
    pub fn new(mu: &Number) -> Result<Self, RuntimeError> {
        let mu = mu.to_f64()?;
        if mu <= 0.0 {
            return Err(invalid(format!("parameter mu for Poisson must be greater than 0, was {mu}")));
        }
        Ok(Self { mu })
    }

    /// `P(X = k)`, computed in log space to survive large `k`.
    fn probability(&self, k: u64) -> Result<f64, RuntimeError> {
        let k_f = u64_to_f64_checked(k)?;
        let log_factorial: f64 = (2..=k).map(|i| (i as f64).ln()).sum();
        Ok(k_f.mul_add(self.mu.ln(), -self.mu - log_factorial).exp())
    }
}

impl RandomVariable for Poisson {
    fn pmf(&self, x: &Number) -> Result<Option<Number>, RuntimeError> {
        match whole(x).and_then(|k| k.to_u64()) {
            Some(k) => Ok(Some(Number::float(self.probability(k)?)?)),
            None => Ok(Some(Number::zero())),
        }
    }

    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        if x.is_negative() {
            return Ok(Number::zero());
        }
        let top = floor(x)?.to_u64().ok_or(RuntimeError::NumericOverflow)?;
        let mut total = 0.0;
        for k in 0..=top {
            total += self.probability(k)?;
        }
        Number::float(total.min(1.0))
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Number::float(self.mu)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        // Inversion by sequential search; the normal approximation takes over
        // once exp(-mu) would underflow.
        if self.mu > 500.0 {
            let draw = self.mu.sqrt().mul_add(standard_normal(rng), self.mu).round().max(0.0);
            return Number::float(draw).map(Number::simplify);
        }
        let u = uniform_draw(rng);
        let mut k: u64 = 0;
        let mut p = (-self.mu).exp();
        let mut cumulative = p;
        while u > cumulative && p > 0.0 {
            k += 1;
            p *= self.mu / u64_to_f64_checked(k)?;
            cumulative += p;
        }
        Ok(Number::from(BigInt::from(k)))
    }
}

impl fmt::Display for Poisson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Poisson(rate={})", self.mu)
    }
}

/// Number of trials up to and including the first success.
#[derive(Debug)]
pub struct Geometric {
    p: Number,
}

impl Geometric {
    pub fn new(p: Number) -> Result<Self, RuntimeError> {
        check_probability(&p, "Geometric")?;
        if p.is_zero() {
            return Err(invalid("parameter p for Geometric must be greater than 0".to_string()));
        }
        Ok(Self { p })
    }
}

impl RandomVariable for Geometric {
    fn pmf(&self, x: &Number) -> Result<Option<Number>, RuntimeError> {
        match whole(x).filter(|k| *k >= BigInt::from(1)) {
            Some(k) => {
                let misses = complement(&self.p)?.pow(&Number::Integer(k - 1))?;
                Ok(Some(misses.mul(&self.p)?))
            },
            None => Ok(Some(Number::zero())),
        }
    }

    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        let k = floor(x)?;
        if k < BigInt::from(1) {
            return Ok(Number::zero());
        }
        Number::one().sub(&complement(&self.p)?.pow(&Number::Integer(k))?)
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Number::one().div(&self.p)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        let p = self.p.to_f64()?;
        if p >= 1.0 {
            return Ok(Number::one());
        }
        let u = 1.0 - uniform_draw(rng);
        Number::float((u.ln() / (1.0 - p).ln()).ceil().max(1.0)).map(Number::simplify)
    }
}

impl fmt::Display for Geometric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geometric(p={})", self.p)
    }
}

/// A single trial: `1` with chance `p`, else `0`.
#[derive(Debug)]
pub struct Bernoulli {
    p: Number,
}

impl Bernoulli {
    pub fn new(p: Number) -> Result<Self, RuntimeError> {
        check_probability(&p, "Bernoulli")?;
        Ok(Self { p })
    }
}

impl RandomVariable for Bernoulli {
    fn pmf(&self, x: &Number) -> Result<Option<Number>, RuntimeError> {
        if x.numeric_eq(&Number::one())? {
            Ok(Some(self.p.clone()))
        } else if x.is_zero() {
            Ok(Some(complement(&self.p)?))
        } else {
            Ok(Some(Number::zero()))
        }
    }

    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        if x.is_negative() {
            Ok(Number::zero())
        } else if x.compare(&Number::one())? == Ordering::Less {
            complement(&self.p)
        } else {
            Ok(Number::one())
        }
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Ok(self.p.clone())
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        let hit = uniform_draw(rng) < self.p.to_f64()?;
        Ok(Number::from(i64::from(hit)))
    }
}

impl fmt::Display for Bernoulli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bernoulli(p={})", self.p)
    }
}

/// Every integer in `lo..=hi` equally likely.
#[derive(Debug)]
pub struct UniformInt {
    lo: i64,
    hi: i64,
}

impl UniformInt {
    pub fn new(lo: i64, hi: i64) -> Result<Self, RuntimeError> {
        if lo > hi {
            return Err(invalid(format!("lower bound of UniformInt must not exceed the upper bound, was {lo} > {hi}")));
        }
        Ok(Self { lo, hi })
    }

    fn count(&self) -> Number {
        Number::from(BigInt::from(self.hi) - BigInt::from(self.lo) + 1)
    }
}

impl RandomVariable for UniformInt {
    fn pmf(&self, x: &Number) -> Result<Option<Number>, RuntimeError> {
        match whole(x) {
            Some(k) if k >= BigInt::from(self.lo) && k <= BigInt::from(self.hi) => {
                Ok(Some(Number::one().div(&self.count())?))
            },
            _ => Ok(Some(Number::zero())),
        }
    }

    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        let k = floor(x)?;
        if k < BigInt::from(self.lo) {
            return Ok(Number::zero());
        }
        if k >= BigInt::from(self.hi) {
            return Ok(Number::one());
        }
        Number::from(k - BigInt::from(self.lo) + 1).div(&self.count())
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Number::from(BigInt::from(self.lo) + BigInt::from(self.hi)).div(&Number::from(2))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        Ok(Number::from(rng.gen_range(self.lo..=self.hi)))
    }
}

impl fmt::Display for UniformInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniformInt(lo={}, hi={})", self.lo, self.hi)
    }
}

/// Waiting time between events that occur at `rate` per unit time.
#[derive(Debug)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    pub fn new(rate: &Number) -> Result<Self, RuntimeError> {
        let rate = rate.to_f64()?;
        if rate <= 0.0 {
            return Err(invalid(format!("rate of Exponential must be greater than 0, was {rate}")));
        }
        Ok(Self { rate })
    }
}

impl RandomVariable for Exponential {
    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        let x = x.to_f64()?;
        if x < 0.0 {
            return Ok(Number::zero());
        }
        Number::float(1.0 - (-self.rate * x).exp())
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Number::float(1.0 / self.rate)
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        Number::float(-(1.0 - uniform_draw(rng)).ln() / self.rate)
    }
}

impl fmt::Display for Exponential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exponential(rate={})", self.rate)
    }
}

/// Every real in `[lo, hi]` equally likely.
#[derive(Debug)]
pub struct Uniform {
    lo: Number,
    hi: Number,
}

impl Uniform {
    pub fn new(lo: Number, hi: Number) -> Result<Self, RuntimeError> {
        if lo.compare(&hi)? == Ordering::Greater {
            return Err(invalid(format!("lower bound of Uniform must not exceed the upper bound, was {lo} > {hi}")));
        }
        Ok(Self { lo, hi })
    }
}

impl RandomVariable for Uniform {
    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        if x.compare(&self.lo)? == Ordering::Less {
            return Ok(Number::zero());
        }
        if x.compare(&self.hi)? != Ordering::Less {
            return Ok(Number::one());
        }
        x.sub(&self.lo)?.div(&self.hi.sub(&self.lo)?)
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        self.lo.add(&self.hi)?.div(&Number::from(2))
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        let (lo, hi) = (self.lo.to_f64()?, self.hi.to_f64()?);
        Number::float(uniform_draw(rng).mul_add(hi - lo, lo))
    }
}

impl fmt::Display for Uniform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uniform(lo={}, hi={})", self.lo, self.hi)
    }
}

/// The normal distribution.
#[derive(Debug)]
pub struct Gaussian {
    mean:   Number,
    stddev: f64,
}

impl Gaussian {
    pub fn new(mean: Number, stddev: &Number) -> Result<Self, RuntimeError> {
        let stddev = stddev.to_f64()?;
        if stddev <= 0.0 {
            return Err(invalid(format!("standard deviation of Gaussian must be positive, was {stddev}")));
        }
        Ok(Self { mean, stddev })
    }
}

/// One draw from the standard normal distribution (Box-Muller).
fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    let u1 = 1.0 - uniform_draw(rng);
    let u2 = uniform_draw(rng);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

impl RandomVariable for Gaussian {
    fn cdf(&self, x: &Number) -> Result<Number, RuntimeError> {
        let z = (x.to_f64()? - self.mean.to_f64()?) / (self.stddev * std::f64::consts::SQRT_2);
        Number::float(0.5 * (1.0 + erf(z)))
    }

    fn mean(&self) -> Result<Number, RuntimeError> {
        Ok(self.mean.clone())
    }

    fn sample(&self, rng: &mut dyn RngCore) -> Result<Number, RuntimeError> {
        Number::float(self.stddev.mul_add(standard_normal(rng), self.mean.to_f64()?))
    }
}

impl fmt::Display for Gaussian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gaussian(mean={}, stddev={})", self.mean, self.stddev)
    }
}
