use std::f64::consts::{PI, TAU};

use crate::{error::RuntimeError, util::num::check_finite};

/// Computes the Gamma function using the Lanczos approximation.
///
/// Uses the reflection formula for `z < 0.5`, so every real input except the
/// non-positive integers is accepted.
///
/// # Errors
/// `NumericOverflow` at the poles and for results too large for an `f64`.
///
/// # Example
/// ```
/// use ka::util::special::gamma;
///
/// assert!((gamma(5.0).unwrap() - 24.0).abs() < 1e-9);
/// assert!((gamma(0.5).unwrap() - std::f64::consts::PI.sqrt()).abs() < 1e-10);
/// assert!(gamma(-1.0).is_err());
/// ```
pub fn gamma(z: f64) -> Result<f64, RuntimeError> {
    // Lanczos coefficients, g = 7, n = 9.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z <= 0.0 && z.fract() == 0.0 {
        return Err(RuntimeError::NumericOverflow);
    }

    if z < 0.5 {
        check_finite(PI / ((PI * z).sin() * gamma(1.0 - z)?))
    } else {
        let z_minus_1 = z - 1.0;
        let mut x = COEFFS[0];

        for (i, &c) in (1_u32..).zip(COEFFS.iter().skip(1)) {
            x += c / (z_minus_1 + f64::from(i));
        }

        let t = z_minus_1 + G + 0.5;

        check_finite(TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x)
    }
}

/// The error function, accurate to about `1.2e-7`.
///
/// Evaluated through a Chebyshev fit of the complementary error function.
///
/// # Example
/// ```
/// use ka::util::special::erf;
///
/// assert!(erf(0.0).abs() < 1e-6);
/// assert!((erf(1.0) - 0.842_700_79).abs() < 1e-6);
/// assert!((erf(-1.0) + 0.842_700_79).abs() < 1e-6);
/// ```
#[must_use]
pub fn erf(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = t.mul_add(0.170_872_77, -0.822_152_23);
    let poly = t.mul_add(poly, 1.488_515_87);
    let poly = t.mul_add(poly, -1.135_203_98);
    let poly = t.mul_add(poly, 0.278_868_07);
    let poly = t.mul_add(poly, -0.186_288_06);
    let poly = t.mul_add(poly, 0.096_784_18);
    let poly = t.mul_add(poly, 0.374_091_96);
    let poly = t.mul_add(poly, 1.000_023_68);
    let poly = t.mul_add(poly, -1.265_512_23);
    let erfc = t * (-z).mul_add(z, poly).exp();
    if x >= 0.0 { 1.0 - erfc } else { erfc - 1.0 }
}
