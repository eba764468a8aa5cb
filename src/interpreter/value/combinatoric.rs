use std::{cell::OnceCell, fmt};

use num::{BigInt, BigRational, Integer, One};

use crate::interpreter::value::number::Number;

/// The inclusive run of integers `lo..=hi`, all at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorRange {
    pub lo: u64,
    pub hi: u64,
}

impl FactorRange {
    /// Returns `None` for an empty run.
    #[must_use]
    pub const fn new(lo: u64, hi: u64) -> Option<Self> {
        if lo > hi || lo == 0 { None } else { Some(Self { lo, hi }) }
    }

    const fn intersection(self, other: Self) -> Option<Self> {
        let lo = if self.lo > other.lo { self.lo } else { other.lo };
        let hi = if self.hi < other.hi { self.hi } else { other.hi };
        Self::new(lo, hi)
    }

    /// The parts of `self` left over after removing `cut`, which must lie
    /// inside `self`.
    fn without(self, cut: Self) -> impl Iterator<Item = Self> {
        let below = Self::new(self.lo, cut.lo.saturating_sub(1));
        let above = Self::new(cut.hi.saturating_add(1), self.hi);
        below.into_iter().chain(above)
    }
}

/// A lazily evaluated product quotient
/// `prod(numerator ranges) / prod(denominator ranges)`.
///
/// Factorials, binomial coefficients and permutations are kept in this form
/// so that expressions such as `C(1000, 500)` or `100!/98!` never compute a
/// full factorial. Overlapping numerator and denominator ranges cancel as
/// soon as they meet, and [`resolve`](Combinatoric::resolve) computes the
/// value once and caches it.
#[derive(Debug, Clone)]
pub struct Combinatoric {
    numerator:   Vec<FactorRange>,
    denominator: Vec<FactorRange>,
    resolved:    OnceCell<Number>,
}

impl Combinatoric {
    /// Builds the quotient, cancelling what it can.
    #[must_use]
    pub fn new(numerator: Vec<FactorRange>, denominator: Vec<FactorRange>) -> Self {
        let empty = Self { numerator:   Vec::new(),
                           denominator: Vec::new(),
                           resolved:    OnceCell::new(), };
        empty.multiply(&numerator, &denominator)
    }

    /// `n!`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::{combinatoric::Combinatoric, number::Number};
    ///
    /// assert_eq!(Combinatoric::factorial(5).resolve(), Number::from(120));
    /// assert_eq!(Combinatoric::factorial(0).resolve(), Number::from(1));
    /// ```
    #[must_use]
    pub fn factorial(n: u64) -> Self {
        Self::new(FactorRange::new(2, n).into_iter().collect(), Vec::new())
    }

    /// `n! / (k! (n-k)!)`. The caller handles `k > n`.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::{combinatoric::Combinatoric, number::Number};
    ///
    /// assert_eq!(Combinatoric::choose(5, 2).resolve(), Number::from(10));
    /// assert_eq!(Combinatoric::choose(7, 0).resolve(), Number::from(1));
    /// ```
    #[must_use]
    pub fn choose(n: u64, k: u64) -> Self {
        let numerator = FactorRange::new(1, n).into_iter().collect();
        let denominator = [FactorRange::new(1, k), FactorRange::new(1, n.saturating_sub(k))].into_iter()
                                                                                         .flatten()
                                                                                         .collect();
        Self::new(numerator, denominator)
    }

    /// `n! / (n-k)!`. The caller handles `k > n`.
    #[must_use]
    pub fn permutations(n: u64, k: u64) -> Self {
        let numerator = if k == 0 { None } else { FactorRange::new(n - k + 1, n) };
        Self::new(numerator.into_iter().collect(), Vec::new())
    }

    /// Multiplies by `prod(numerator) / prod(denominator)`.
    ///
    /// Denominator ranges are popped one at a time and cancelled against
    /// the first numerator range they intersect. The uncancelled pieces of
    /// both are pushed back and the process repeats until no denominator
    /// range meets a numerator range.
    #[must_use]
    pub fn multiply(&self, numerator: &[FactorRange], denominator: &[FactorRange]) -> Self {
        let mut top: Vec<FactorRange> = self.numerator.iter().chain(numerator).copied().collect();
        let mut pending: Vec<FactorRange> = self.denominator.iter().chain(denominator).copied().collect();
        let mut bottom = Vec::new();

        while let Some(d) = pending.pop() {
            let hit = top.iter()
                         .enumerate()
                         .find_map(|(i, n)| n.intersection(d).map(|common| (i, common)));
            match hit {
                Some((i, common)) => {
                    let n = top.swap_remove(i);
                    top.extend(n.without(common));
                    pending.extend(d.without(common));
                },
                None => bottom.push(d),
            }
        }

        Self { numerator:   top,
               denominator: bottom,
               resolved:    OnceCell::new(), }
    }

    /// `self * other`, cancelling lazily.
    #[must_use]
    pub fn times(&self, other: &Self) -> Self {
        self.multiply(&other.numerator, &other.denominator)
    }

    /// `self / other`, cancelling lazily.
    #[must_use]
    pub fn over(&self, other: &Self) -> Self {
        self.multiply(&other.denominator, &other.numerator)
    }

    #[must_use]
    pub fn numerator(&self) -> &[FactorRange] {
        &self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> &[FactorRange] {
        &self.denominator
    }

    /// Computes the exact value, caching it.
    ///
    /// Numerator factors are multiplied in from the high end of each range.
    /// After every step the running product is divided by the smallest
    /// remaining denominator factor for as long as that factor divides it,
    /// which keeps intermediate values small.
    ///
    /// # Example
    /// ```
    /// use ka::interpreter::value::{combinatoric::Combinatoric, number::Number};
    ///
    /// let c = Combinatoric::choose(1000, 500);
    /// let Number::Integer(value) = c.resolve() else { panic!("not an integer") };
    /// assert_eq!(value.to_string().len(), 300);
    /// ```
    pub fn resolve(&self) -> Number {
        self.resolved.get_or_init(|| self.compute()).clone()
    }

    fn compute(&self) -> Number {
        let mut divisors: Vec<u64> = self.denominator.iter().flat_map(|r| r.lo..=r.hi).collect();
        divisors.sort_unstable();
        let mut divisors = divisors.into_iter().peekable();

        let mut product = BigInt::one();
        for range in &self.numerator {
            for factor in (range.lo..=range.hi).rev() {
                product *= factor;
                while let Some(&d) = divisors.peek() {
                    let d = BigInt::from(d);
                    if !product.is_multiple_of(&d) {
                        break;
                    }
                    product /= d;
                    divisors.next();
                }
            }
        }

        let rest: BigInt = divisors.map(BigInt::from).product();
        Number::Rational(BigRational::new(product, rest)).simplify()
    }
}

impl PartialEq for Combinatoric {
    fn eq(&self, other: &Self) -> bool {
        self.resolve() == other.resolve()
    }
}

impl fmt::Display for Combinatoric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolve())
    }
}
