//! Immutable potential curve descriptors.
//!
//! A [`Morse`] well carries the discrete vibrational spectrum; a
//! [`Hyperbolic`] curve `a/R + b` supplies the asymptotic kinetic energy
//! of the continuum states built in [`wavefn`][crate::wavefn].
//!
//! All parameters are in atomic units (Hartree, Bohr, electron masses);
//! convert at the boundary with [`units`][crate::units].

use ndarray as nd;
use crate::error::WfError;

/// Morse potential descriptor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Morse {
    /// Well depth De (Hartree).
    pub de: f64,
    /// Range parameter alpha (inverse Bohr).
    pub alpha: f64,
    /// Equilibrium distance Req (Bohr).
    pub req: f64,
}

impl Morse {
    /// Create a new `Morse`, rejecting non-positive or non-finite
    /// parameters.
    pub fn new(de: f64, alpha: f64, req: f64) -> Result<Self, WfError> {
        WfError::check_positive("De", de)?;
        WfError::check_positive("alpha", alpha)?;
        WfError::check_positive("Req", req)?;
        Ok(Self { de, alpha, req })
    }

    /// The potential curve De (1 - exp(-alpha (r - Req)))^2 - De, with the
    /// dissociation limit at zero energy.
    pub fn value(&self, r: f64) -> f64 {
        let x = 1.0 - (-self.alpha * (r - self.req)).exp();
        self.de * x * x - self.de
    }

    /// The dimensionless well parameter lambda = sqrt(2 m De) / alpha.
    ///
    /// Roughly half a unit above the number of vibrational levels the
    /// well supports.
    pub fn lambda_param(&self, red_mass: f64) -> f64 {
        (2.0 * red_mass * self.de).sqrt() / self.alpha
    }

    /// Vibrational eigenenergy of level `n`, measured from the bottom of
    /// the well:
    ///
    /// ```text
    /// E_n = (n + 1/2) alpha sqrt(2 De / m) - (n + 1/2)^2 alpha^2 / (2 m)
    /// ```
    ///
    /// The formula is evaluated for any `n`; only levels below
    /// [`level_count`][Self::level_count] are physical.
    pub fn eigenvalue(&self, n: u32, red_mass: f64) -> f64 {
        let nh = n as f64 + 0.5;
        nh * self.alpha * (2.0 * self.de / red_mass).sqrt()
            - nh.powi(2) * self.alpha.powi(2) / (2.0 * red_mass)
    }

    /// Number of bound vibrational levels, i.e. the number of `n` with
    /// 2 lambda - 2n - 1 > 0.
    pub fn level_count(&self, red_mass: f64) -> u32 {
        (self.lambda_param(red_mass) - 0.5).ceil().max(0.0) as u32
    }

    /// The whole bound spectrum, measured from the bottom of the well.
    pub fn eigenvalues(&self, red_mass: f64) -> nd::Array1<f64> {
        (0..self.level_count(red_mass))
            .map(|n| self.eigenvalue(n, red_mass))
            .collect()
    }
}

/// Hyperbolic potential descriptor, V(r) = a/r + b.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hyperbolic {
    /// Strength coefficient a (Hartree Bohr).
    pub a: f64,
    /// Asymptotic offset b (Hartree).
    pub b: f64,
}

impl Hyperbolic {
    /// Create a new `Hyperbolic`, rejecting non-finite parameters.
    pub fn new(a: f64, b: f64) -> Result<Self, WfError> {
        (a.is_finite() && a != 0.0)
            .then_some(())
            .ok_or(WfError::BadParameter { name: "a", value: a })?;
        b.is_finite()
            .then_some(())
            .ok_or(WfError::BadParameter { name: "b", value: b })?;
        Ok(Self { a, b })
    }

    /// The potential value a/r + b.
    ///
    /// The curve diverges at r = 0; callers must keep r away from zero.
    pub fn value(&self, r: f64) -> f64 { self.a / r + self.b }

    /// Kinetic energy a particle starting at rest at `r_start` on this
    /// curve has at infinite separation, V(r_start) - b.
    pub fn asymptotic_kinetic_energy(&self, r_start: f64) -> f64 {
        self.value(r_start) - self.b
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn morse_spectrum() {
        let pot = Morse::new(0.1, 1.0, 2.0).unwrap();
        let m = 100.0;
        // lambda = sqrt(20) ~ 4.47, so four levels
        assert_eq!(pot.level_count(m), 4);
        let e = pot.eigenvalues(m);
        assert_eq!(e.len(), 4);
        // increasing, positive, below the dissociation limit
        for k in 0..e.len() - 1 {
            assert!(e[k] > 0.0);
            assert!(e[k] < e[k + 1]);
        }
        assert!(e[e.len() - 1] < pot.de);
        // anharmonic: spacings shrink with n
        assert!(e[1] - e[0] > e[3] - e[2]);
    }

    #[test]
    fn morse_curve() {
        let pot = Morse::new(0.1, 1.0, 2.0).unwrap();
        assert!((pot.value(pot.req) + pot.de).abs() < 1e-15);
        assert!(pot.value(60.0).abs() < 1e-12);
        assert!(pot.value(0.5) > 0.0);
    }

    #[test]
    fn morse_rejects_bad_parameters() {
        assert!(Morse::new(-0.1, 1.0, 2.0).is_err());
        assert!(Morse::new(0.1, 0.0, 2.0).is_err());
        assert!(Morse::new(0.1, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn hyperbolic_energy() {
        let pot = Hyperbolic::new(0.5, -0.3).unwrap();
        assert!((pot.value(2.0) - (-0.05)).abs() < 1e-15);
        // the offset drops out of the asymptotic kinetic energy
        assert!((pot.asymptotic_kinetic_energy(2.0) - 0.25).abs() < 1e-15);
    }
}
