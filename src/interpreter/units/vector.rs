use std::fmt;

/// Symbols of the seven SI base units, in vector order.
pub const BASE_UNITS: [&str; 7] = ["kg", "m", "s", "A", "K", "mol", "cd"];

/// Exponents of the seven SI base dimensions `[kg, m, s, A, K, mol, cd]`.
///
/// Multiplying quantities adds their vectors, dividing subtracts them and
/// raising to an integer power scales them.
///
/// # Example
/// ```
/// use ka::interpreter::units::vector::QuantityVector;
///
/// let speed = QuantityVector::LENGTH.div(QuantityVector::TIME);
/// assert_eq!(speed.to_string(), "m s^-1");
/// assert!(speed.mul(QuantityVector::TIME).div(QuantityVector::LENGTH).is_dimensionless());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct QuantityVector(pub [i32; 7]);

impl QuantityVector {
    pub const DIMENSIONLESS: Self = Self([0; 7]);
    pub const MASS: Self = Self::base(0);
    pub const LENGTH: Self = Self::base(1);
    pub const TIME: Self = Self::base(2);
    pub const CURRENT: Self = Self::base(3);
    pub const TEMPERATURE: Self = Self::base(4);
    pub const AMOUNT: Self = Self::base(5);
    pub const LUMINOSITY: Self = Self::base(6);

    /// The unit vector along one base dimension.
    #[must_use]
    pub const fn base(index: usize) -> Self {
        let mut components = [0; 7];
        components[index] = 1;
        Self(components)
    }

    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + other.0[i]))
    }

    #[must_use]
    pub fn div(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - other.0[i]))
    }

    #[must_use]
    pub fn pow(self, exponent: i32) -> Self {
        Self(self.0.map(|x| x * exponent))
    }

    #[must_use]
    pub fn is_dimensionless(self) -> bool {
        self == Self::DIMENSIONLESS
    }
}

impl fmt::Display for QuantityVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self.0
                                     .iter()
                                     .zip(BASE_UNITS)
                                     .filter(|(exp, _)| **exp != 0)
                                     .map(|(exp, name)| {
                                         if *exp == 1 {
                                             name.to_string()
                                         } else {
                                             format!("{name}^{exp}")
                                         }
                                     })
                                     .collect();
        write!(f, "{}", parts.join(" "))
    }
}
