//! Complex overlap (Franck-Condon) integrals `<psi1 | V(R) | psi2>`
//! between pairs of vibrational states over a finite radial domain.
//!
//! Four pairings are provided, plus a free-state self-normalization
//! check. Pairings involving continuum states run through the complex
//! quadrature adapter; the bound-bound integrand is real under the phase
//! convention used here (bound Morse eigenfunctions carry no complex
//! phase), so it uses plain real quadrature in both precision paths.
//!
//! Callers choose the integration bounds; no domain-adequacy check is
//! performed, so the bounds must be wide enough to capture the bound
//! probability density and any oscillatory continuum structure. Phase
//! offsets for continuum states live in the state descriptors.
//!
//! The [`mp`] submodule instantiates every pairing at the
//! extended-precision backend and rounds the result to a machine complex
//! number at the boundary.

use std::cell::Cell;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    DEF_ABS_TOL,
    DEF_LIMIT,
    DEF_MIN_DEPTH,
    error::{ FcError, WfError },
    potential::Morse,
    quad::{ self, ComplexQuadrature, QuadConfig, Quadrature },
    scalar::Scalar,
    wavefn::{ BoundMorse, CoulombWave, PlaneWave },
};

pub type FcResult<T> = Result<T, FcError>;

/// Overlap-integral tuning parameters.
///
/// The weighting potential defaults to the constant 1, turning the
/// integral into a plain overlap.
pub struct OverlapConfig<'a, T: Scalar> {
    /// Absolute error tolerance (default: `1.49e-8`).
    pub abs_tol: f64,
    /// Quadrature subdivision limit (default: `50`).
    pub limit: usize,
    /// Weighting potential V(R) applied inside the integrand (default:
    /// `None`, i.e. 1).
    pub weight: Option<&'a dyn Fn(&T) -> T>,
}

impl<T: Scalar> Clone for OverlapConfig<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T: Scalar> Copy for OverlapConfig<'_, T> { }

impl<T: Scalar> Default for OverlapConfig<'_, T> {
    fn default() -> Self {
        Self { abs_tol: DEF_ABS_TOL, limit: DEF_LIMIT, weight: None }
    }
}

impl<'a, T: Scalar> OverlapConfig<'a, T> {
    fn quad(&self) -> QuadConfig {
        QuadConfig {
            abs_tol: self.abs_tol,
            limit: self.limit,
            min_depth: DEF_MIN_DEPTH,
        }
    }

    fn weigh(&self, r: &T, v: T) -> T {
        match self.weight {
            Some(w) => v * w(r),
            None => v,
        }
    }
}

/// Overlap of two bound Morse eigenstates.
///
/// Both states must share the reduced mass used to construct them for
/// the result to be physically meaningful; this is not checked.
pub fn bound_bound<T: Scalar>(
    s1: &BoundMorse,
    s2: &BoundMorse,
    bounds: (f64, f64),
    cfg: &OverlapConfig<T>,
) -> FcResult<Quadrature<T>> {
    let f = |r: &T| cfg.weigh(r, s1.eval::<T>(r) * s2.eval::<T>(r));
    let q = quad::integrate(f, bounds.0, bounds.1, &cfg.quad())?;
    Ok(q)
}

/// Overlap of a bound Morse eigenstate with an energy-normalized plane
/// wave, `conj(psi1) psi2 V`.
pub fn bound_free<T: Scalar>(
    s1: &BoundMorse,
    s2: &PlaneWave,
    bounds: (f64, f64),
    cfg: &OverlapConfig<T>,
) -> FcResult<ComplexQuadrature<T>> {
    // the bound eigenfunction is real, so conjugation is the identity
    let f = |r: &T| {
        let w = cfg.weigh(r, s1.eval::<T>(r));
        T::c_scale(&s2.eval::<T>(r), w)
    };
    let q = quad::integrate_complex(f, bounds.0, bounds.1, &cfg.quad())?;
    Ok(q)
}

/// Overlap of a bound Morse eigenstate with a Coulomb continuum state,
/// `conj(psi1) psi2 V`.
///
/// A Coulomb-series convergence failure anywhere in the domain aborts
/// the integration and is returned as the error.
pub fn bound_coulomb<T: Scalar>(
    s1: &BoundMorse,
    s2: &CoulombWave,
    bounds: (f64, f64),
    cfg: &OverlapConfig<T>,
) -> FcResult<ComplexQuadrature<T>> {
    let trouble: Cell<Option<WfError>> = Cell::new(None);
    let f = |r: &T| {
        let hyp = match s2.eval::<T>(r) {
            Ok(v) => v,
            Err(e) => {
                trouble.set(Some(e));
                T::zero()
            },
        };
        let v = cfg.weigh(r, s1.eval::<T>(r) * hyp);
        T::complex(v, T::zero())
    };
    let q = quad::integrate_complex(f, bounds.0, bounds.1, &cfg.quad())?;
    if let Some(e) = trouble.take() {
        return Err(e.into());
    }
    Ok(q)
}

/// Overlap of two energy-normalized plane waves, `conj(psi1) psi2 V`.
pub fn free_free<T: Scalar>(
    s1: &PlaneWave,
    s2: &PlaneWave,
    bounds: (f64, f64),
    cfg: &OverlapConfig<T>,
) -> FcResult<ComplexQuadrature<T>> {
    let f = |r: &T| {
        let z = T::conj(&s1.eval::<T>(r)) * s2.eval::<T>(r);
        match cfg.weight {
            Some(w) => T::c_scale(&z, w(r)),
            None => z,
        }
    };
    let q = quad::integrate_complex(f, bounds.0, bounds.1, &cfg.quad())?;
    Ok(q)
}

/// Self-overlap of an energy-normalized plane wave, `conj(psi) psi`.
///
/// The weighting function is not applied; this is a bare normalization
/// check whose imaginary part should vanish.
pub fn norm_free<T: Scalar>(
    s: &PlaneWave,
    bounds: (f64, f64),
    cfg: &OverlapConfig<T>,
) -> FcResult<ComplexQuadrature<T>> {
    let f = |r: &T| T::conj(&s.eval::<T>(r)) * s.eval::<T>(r);
    let q = quad::integrate_complex(f, bounds.0, bounds.1, &cfg.quad())?;
    Ok(q)
}

/// Table of bound-bound overlaps between the levels of two Morse wells,
/// indexed `[n1, n2]`.
pub fn fc_matrix(
    pot1: &Morse,
    n1_max: u32,
    pot2: &Morse,
    n2_max: u32,
    red_mass: f64,
    bounds: (f64, f64),
    cfg: &OverlapConfig<f64>,
) -> FcResult<nd::Array2<f64>> {
    let mut fc = nd::Array2::<f64>::zeros(
        (n1_max as usize + 1, n2_max as usize + 1));
    for n1 in 0..=n1_max {
        let s1 = BoundMorse::new(*pot1, red_mass, n1)?;
        for n2 in 0..=n2_max {
            let s2 = BoundMorse::new(*pot2, red_mass, n2)?;
            fc[[n1 as usize, n2 as usize]]
                = bound_bound(&s1, &s2, bounds, cfg)?.value;
        }
    }
    Ok(fc)
}

/// Arbitrary-precision counterparts of the overlap integrals.
///
/// Each function runs the generic algorithm at the extended-precision
/// backend with pinned working precision and rounds the result to a
/// machine number at the boundary. Reach for these when the quantum
/// number or the well parameter lambda is large enough that the
/// three-term recurrence or the oscillatory integrand cancels beyond
/// machine precision, or when the machine-precision error estimate
/// exceeds the requested tolerance.
pub mod mp {
    use super::*;

    fn to_c64(q: &ComplexQuadrature<rug::Float>) -> C64 {
        C64::new(q.value.real().to_f64(), q.value.imag().to_f64())
    }

    /// Extended-precision [`bound_bound`][super::bound_bound].
    pub fn bound_bound(
        s1: &BoundMorse,
        s2: &BoundMorse,
        bounds: (f64, f64),
        cfg: &OverlapConfig<rug::Float>,
    ) -> FcResult<f64> {
        Ok(super::bound_bound(s1, s2, bounds, cfg)?.value.to_f64())
    }

    /// Extended-precision [`bound_free`][super::bound_free].
    pub fn bound_free(
        s1: &BoundMorse,
        s2: &PlaneWave,
        bounds: (f64, f64),
        cfg: &OverlapConfig<rug::Float>,
    ) -> FcResult<C64> {
        Ok(to_c64(&super::bound_free(s1, s2, bounds, cfg)?))
    }

    /// Extended-precision [`bound_coulomb`][super::bound_coulomb].
    pub fn bound_coulomb(
        s1: &BoundMorse,
        s2: &CoulombWave,
        bounds: (f64, f64),
        cfg: &OverlapConfig<rug::Float>,
    ) -> FcResult<C64> {
        Ok(to_c64(&super::bound_coulomb(s1, s2, bounds, cfg)?))
    }

    /// Extended-precision [`free_free`][super::free_free].
    pub fn free_free(
        s1: &PlaneWave,
        s2: &PlaneWave,
        bounds: (f64, f64),
        cfg: &OverlapConfig<rug::Float>,
    ) -> FcResult<C64> {
        Ok(to_c64(&super::free_free(s1, s2, bounds, cfg)?))
    }

    /// Extended-precision [`norm_free`][super::norm_free].
    pub fn norm_free(
        s: &PlaneWave,
        bounds: (f64, f64),
        cfg: &OverlapConfig<rug::Float>,
    ) -> FcResult<C64> {
        Ok(to_c64(&super::norm_free(s, bounds, cfg)?))
    }
}
