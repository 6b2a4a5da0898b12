//! Numeric capability layer shared by every wavefunction and quadrature
//! routine.
//!
//! All physical formulas in this crate are written once against
//! [`Scalar`] and instantiated at two backends: `f64` paired with
//! [`num_complex::Complex64`] for speed, and [`rug::Float`] paired with
//! [`rug::Complex`] at [`MP_PREC`] bits for cases where cancellation or
//! high quantum numbers exceed machine precision. Both backends share the
//! same formulas; only the numeric representation differs.

use std::fmt;
use std::ops::{ Add, Div, Mul, Neg, Sub };
use num_complex::Complex64 as C64;
use rug::ops::Pow;

/// Working precision of the extended backend, in bits (roughly 77 decimal
/// digits).
///
/// Pinned here so that results never depend on a library default
/// precision.
pub const MP_PREC: u32 = 256;

/// Real scalar carrying the arithmetic and special functions needed to
/// build wavefunctions and integrate them, together with an associated
/// complex counterpart type.
///
/// Complex conjugation, unit phase factors, and real scaling are derived
/// from the constructor and accessors, so a backend only has to supply
/// the primitives.
pub trait Scalar: Clone + PartialOrd + fmt::Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Complex number over this scalar.
    type Complex: Clone + fmt::Debug
        + Add<Output = Self::Complex>
        + Sub<Output = Self::Complex>
        + Mul<Output = Self::Complex>
        + Neg<Output = Self::Complex>;

    fn from_f64(x: f64) -> Self;

    fn to_f64(&self) -> f64;

    /// Round an extended-precision value into this backend.
    fn from_mp(x: &rug::Float) -> Self;

    fn pi() -> Self;

    fn exp(self) -> Self;

    fn sqrt(self) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    fn abs(self) -> Self;

    fn powf(self, exponent: Self) -> Self;

    /// The gamma function of `self`.
    fn gamma(self) -> Self;

    fn complex(re: Self, im: Self) -> Self::Complex;

    fn re(z: &Self::Complex) -> Self;

    fn im(z: &Self::Complex) -> Self;

    fn zero() -> Self { Self::from_f64(0.0) }

    fn one() -> Self { Self::from_f64(1.0) }

    fn c_zero() -> Self::Complex { Self::complex(Self::zero(), Self::zero()) }

    /// Complex conjugate.
    fn conj(z: &Self::Complex) -> Self::Complex {
        Self::complex(Self::re(z), -Self::im(z))
    }

    /// The unit phase factor `exp(i theta)`.
    fn cis(theta: Self) -> Self::Complex {
        Self::complex(theta.clone().cos(), theta.sin())
    }

    /// Scale a complex value by a real factor.
    fn c_scale(z: &Self::Complex, s: Self) -> Self::Complex {
        Self::complex(Self::re(z) * s.clone(), Self::im(z) * s)
    }
}

impl Scalar for f64 {
    type Complex = C64;

    fn from_f64(x: f64) -> Self { x }

    fn to_f64(&self) -> f64 { *self }

    fn from_mp(x: &rug::Float) -> Self { x.to_f64() }

    fn pi() -> Self { std::f64::consts::PI }

    fn exp(self) -> Self { f64::exp(self) }

    fn sqrt(self) -> Self { f64::sqrt(self) }

    fn sin(self) -> Self { f64::sin(self) }

    fn cos(self) -> Self { f64::cos(self) }

    fn abs(self) -> Self { f64::abs(self) }

    fn powf(self, exponent: Self) -> Self { f64::powf(self, exponent) }

    fn gamma(self) -> Self { libm::tgamma(self) }

    fn complex(re: Self, im: Self) -> Self::Complex { C64::new(re, im) }

    fn re(z: &Self::Complex) -> Self { z.re }

    fn im(z: &Self::Complex) -> Self { z.im }
}

impl Scalar for rug::Float {
    type Complex = rug::Complex;

    fn from_f64(x: f64) -> Self { rug::Float::with_val(MP_PREC, x) }

    fn to_f64(&self) -> f64 { rug::Float::to_f64(self) }

    fn from_mp(x: &rug::Float) -> Self { rug::Float::with_val(MP_PREC, x) }

    fn pi() -> Self {
        rug::Float::with_val(MP_PREC, rug::float::Constant::Pi)
    }

    fn exp(self) -> Self { rug::Float::exp(self) }

    fn sqrt(self) -> Self { rug::Float::sqrt(self) }

    fn sin(self) -> Self { rug::Float::sin(self) }

    fn cos(self) -> Self { rug::Float::cos(self) }

    fn abs(self) -> Self { rug::Float::abs(self) }

    fn powf(self, exponent: Self) -> Self { self.pow(exponent) }

    fn gamma(self) -> Self { rug::Float::gamma(self) }

    fn complex(re: Self, im: Self) -> Self::Complex {
        rug::Complex::with_val(MP_PREC, (re, im))
    }

    fn re(z: &Self::Complex) -> Self { z.real().clone() }

    fn im(z: &Self::Complex) -> Self { z.imag().clone() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn f64_backend() {
        let z = <f64 as Scalar>::cis(std::f64::consts::FRAC_PI_2);
        assert!(z.re.abs() < 1e-15);
        assert!((z.im - 1.0).abs() < 1e-15);
        let w = <f64 as Scalar>::conj(&z);
        assert!((w.im + 1.0).abs() < 1e-15);
        assert!((Scalar::gamma(5.0_f64) - 24.0).abs() < 1e-12);
    }

    #[test]
    fn mp_backend() {
        let x = <rug::Float as Scalar>::from_f64(0.25);
        assert_eq!(x.prec(), MP_PREC);
        assert!((Scalar::to_f64(&x) - 0.25).abs() < 1e-30);
        let g = Scalar::gamma(<rug::Float as Scalar>::from_f64(5.0));
        assert!((Scalar::to_f64(&g) - 24.0).abs() < 1e-12);
        let pi64 = Scalar::to_f64(&<rug::Float as Scalar>::pi());
        assert!((pi64 - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn backends_agree() {
        // same formula, two representations
        let f = 1.7_f64.exp() * 0.3_f64.sqrt();
        let m = Scalar::exp(<rug::Float as Scalar>::from_f64(1.7))
            * Scalar::sqrt(<rug::Float as Scalar>::from_f64(0.3));
        assert!((f - Scalar::to_f64(&m)).abs() < 1e-14);
    }
}
