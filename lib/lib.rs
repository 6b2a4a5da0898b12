//! Analytical bound and continuum vibrational wavefunctions of Morse and
//! hyperbolic potential curves, and the complex overlap (Franck-Condon)
//! integrals between them.
//!
//! Bound Morse eigenfunctions are built from the closed-form solutions of
//! JCP 88, 4535 (1988) via a three-term recurrence in the level index;
//! continuum states are energy-normalized plane waves or regular Coulomb
//! wavefunctions. Overlap integrals are evaluated by adaptive quadrature
//! that splits complex integrands into real and imaginary parts, and a
//! nested variant handles double integrals of products of complex
//! one-variable functions (used by the time-domain streaking prototype in
//! [`streak`]).
//!
//! Every physical formula is written once against the numeric capability
//! trait in [`scalar`] and instantiated at two backends: machine floats
//! for speed and pinned extended precision for cases where cancellation
//! or high quantum numbers make machine precision insufficient.
//!
//! All quantities cross the crate boundary in atomic units (Hartree,
//! Bohr, electron masses); [`units`] provides the conversions.

pub mod error;
pub mod units;
pub mod scalar;
pub mod potential;
pub mod quad;
pub mod wavefn;
pub mod overlap;
pub mod streak;

pub(crate) const DEF_ABS_TOL: f64 = 1.49e-8;
pub(crate) const DEF_LIMIT: usize = 50;
pub(crate) const DEF_MIN_DEPTH: usize = 8;
pub(crate) const DEF_MAX_TERMS: usize = 1_000_000;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
