//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when
//! allowed and compatible with application code using [`anyhow`][anyhow].
//!
//! Invalid descriptors and configurations are rejected here, at the
//! boundary, so that evaluation code never has to propagate NaN silently.
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned from wavefunction and potential descriptor constructors, and
/// from Coulomb wavefunction evaluation.
#[derive(Debug, Error)]
pub enum WfError {
    /// Returned when a potential parameter is non-positive or non-finite.
    #[error("potential parameters must be positive and finite; got {name} = {value}")]
    BadParameter { name: &'static str, value: f64 },

    /// Returned when a non-positive or non-finite reduced mass is
    /// encountered.
    #[error("reduced mass must be positive and finite; got {0}")]
    BadMass(f64),

    /// Returned when a bound level is requested above the top of the well.
    #[error("no bound level n = {n} in this Morse well; only {levels} levels exist")]
    NoSuchLevel { n: u32, levels: u32 },

    /// Returned when a continuum reference point is non-positive.
    #[error("continuum reference point must be positive; got R_start = {0}")]
    BadRStart(f64),

    /// Returned when the asymptotic kinetic energy of a continuum state
    /// comes out non-positive.
    #[error("continuum state requires positive asymptotic kinetic energy; got {0}")]
    BadKineticEnergy(f64),

    /// Returned when the regular Coulomb wavefunction series fails to
    /// converge within its term cap.
    #[error("coulomb wavefunction series failed to converge within {max_terms} terms")]
    CoulombSeries { max_terms: usize },
}

impl WfError {
    pub(crate) fn check_positive(name: &'static str, value: f64)
        -> Result<(), Self>
    {
        (value.is_finite() && value > 0.0)
            .then_some(())
            .ok_or(Self::BadParameter { name, value })
    }

    pub(crate) fn check_mass(red_mass: f64) -> Result<(), Self> {
        (red_mass.is_finite() && red_mass > 0.0)
            .then_some(())
            .ok_or(Self::BadMass(red_mass))
    }

    pub(crate) fn check_r_start(r_start: f64) -> Result<(), Self> {
        (r_start.is_finite() && r_start > 0.0)
            .then_some(())
            .ok_or(Self::BadRStart(r_start))
    }

    pub(crate) fn check_e_kin(e_kin: f64) -> Result<(), Self> {
        (e_kin.is_finite() && e_kin > 0.0)
            .then_some(())
            .ok_or(Self::BadKineticEnergy(e_kin))
    }
}

/// Returned from quadrature functions.
#[derive(Debug, Error)]
pub enum QuadError {
    /// Returned when a non-positive absolute tolerance is encountered.
    #[error("absolute tolerance must be greater than 0; got {0}")]
    BadTolerance(f64),

    /// Returned when a zero subdivision limit is encountered.
    #[error("subdivision limit must be greater than 0; got {0}")]
    BadLimit(usize),

    /// Returned when an integration bound is non-finite.
    #[error("integration bounds must be finite; got [{0}, {1}]")]
    BadBounds(f64, f64),
}

impl QuadError {
    pub(crate) fn check_tolerance(abs_tol: f64) -> Result<(), Self> {
        (abs_tol.is_finite() && abs_tol > 0.0)
            .then_some(())
            .ok_or(Self::BadTolerance(abs_tol))
    }

    pub(crate) fn check_limit(limit: usize) -> Result<(), Self> {
        (limit != 0).then_some(()).ok_or(Self::BadLimit(limit))
    }

    pub(crate) fn check_bounds(a: f64, b: f64) -> Result<(), Self> {
        (a.is_finite() && b.is_finite())
            .then_some(())
            .ok_or(Self::BadBounds(a, b))
    }
}

/// Returned from overlap integral functions.
#[derive(Debug, Error)]
pub enum FcError {
    /// [`WfError`]
    #[error("wavefunction error: {0}")]
    Wf(#[from] WfError),

    /// [`QuadError`]
    #[error("quadrature error: {0}")]
    Quad(#[from] QuadError),
}
