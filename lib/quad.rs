//! Adaptive quadrature for real- and complex-valued integrands.
//!
//! The core routine is an adaptive Simpson scheme with Richardson error
//! estimation, written once against [`Scalar`] so the same algorithm
//! serves the machine-precision and extended-precision paths. Complex
//! integrands are handled by integrating the real and imaginary parts
//! separately and recombining; nested double integrals of products of two
//! complex one-variable functions are expanded into four real double
//! integrals.
//!
//! When the subdivision budget runs out before the requested tolerance is
//! met, the leaf estimates still enter the returned error bound and a
//! warning is printed; it is up to the caller to tighten the tolerance or
//! widen the limit.

use std::cell::Cell;
use crate::{
    error::QuadError,
    scalar::Scalar,
    DEF_ABS_TOL,
    DEF_LIMIT,
    DEF_MIN_DEPTH,
};

pub type QuadResult<T> = Result<T, QuadError>;

/// Quadrature tuning parameters.
#[derive(Copy, Clone, Debug)]
pub struct QuadConfig {
    /// Absolute error tolerance (default: `1.49e-8`).
    pub abs_tol: f64,
    /// Maximum bisection depth (default: `50`).
    pub limit: usize,
    /// Bisection depth that is always performed, regardless of the local
    /// error estimate (default: `8`).
    ///
    /// Adaptive refinement can miss features much narrower than the
    /// initial panels; seeding the subdivision this deep guards against
    /// false convergence on sharply peaked vibrational densities.
    pub min_depth: usize,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            abs_tol: DEF_ABS_TOL,
            limit: DEF_LIMIT,
            min_depth: DEF_MIN_DEPTH,
        }
    }
}

/// A real integral value together with its absolute-error estimate.
#[derive(Clone, Debug)]
pub struct Quadrature<T> {
    pub value: T,
    pub abs_err: T,
}

/// A complex integral value together with the absolute-error estimates of
/// its independently integrated real and imaginary parts.
#[derive(Clone, Debug)]
pub struct ComplexQuadrature<T: Scalar> {
    pub value: T::Complex,
    pub re_abs_err: T,
    pub im_abs_err: T,
}

// one Simpson panel over an interval of width h
fn panel<T: Scalar>(fa: &T, fm: &T, fb: &T, h: &T) -> T {
    let four = T::from_f64(4.0);
    let six = T::from_f64(6.0);
    h.clone() / six * (fa.clone() + four * fm.clone() + fb.clone())
}

// bisect until the Richardson estimate for every panel meets its share of
// the tolerance; returns (value, error estimate)
#[allow(clippy::too_many_arguments)]
fn adapt<T, F>(
    f: &F,
    a: T, fa: T,
    m: T, fm: T,
    b: T, fb: T,
    whole: T,
    tol: T,
    depth: usize,
    cfg: &QuadConfig,
    exhausted: &Cell<bool>,
) -> (T, T)
where
    T: Scalar,
    F: Fn(&T) -> T,
{
    let two = T::from_f64(2.0);
    let lm = (a.clone() + m.clone()) / two.clone();
    let rm = (m.clone() + b.clone()) / two.clone();
    let flm = f(&lm);
    let frm = f(&rm);
    let left = panel(&fa, &flm, &fm, &(m.clone() - a.clone()));
    let right = panel(&fm, &frm, &fb, &(b.clone() - m.clone()));
    let s2 = left.clone() + right.clone();
    let delta = (s2.clone() - whole) / T::from_f64(15.0);
    let err = delta.clone().abs();
    if depth >= cfg.min_depth && err <= tol {
        return (s2 + delta, err);
    }
    if depth >= cfg.limit {
        exhausted.set(true);
        return (s2 + delta, err);
    }
    let half_tol = tol / two;
    let (vl, el) = adapt(
        f,
        a, fa,
        lm, flm,
        m.clone(), fm.clone(),
        left,
        half_tol.clone(),
        depth + 1,
        cfg,
        exhausted,
    );
    let (vr, er) = adapt(
        f,
        m, fm,
        rm, frm,
        b, fb,
        right,
        half_tol,
        depth + 1,
        cfg,
        exhausted,
    );
    (vl + vr, el + er)
}

fn integrate_core<T, F>(
    f: &F,
    a: T,
    b: T,
    cfg: &QuadConfig,
    exhausted: &Cell<bool>,
) -> (T, T)
where
    T: Scalar,
    F: Fn(&T) -> T,
{
    let two = T::from_f64(2.0);
    let m = (a.clone() + b.clone()) / two;
    let fa = f(&a);
    let fm = f(&m);
    let fb = f(&b);
    let whole = panel(&fa, &fm, &fb, &(b.clone() - a.clone()));
    let tol = T::from_f64(cfg.abs_tol);
    adapt(f, a, fa, m, fm, b, fb, whole, tol, 0, cfg, exhausted)
}

/// Integrate a real-valued function over `[a, b]`.
///
/// Reversed bounds are allowed and flip the sign of the result.
pub fn integrate<T, F>(f: F, a: f64, b: f64, cfg: &QuadConfig)
    -> QuadResult<Quadrature<T>>
where
    T: Scalar,
    F: Fn(&T) -> T,
{
    QuadError::check_tolerance(cfg.abs_tol)?;
    QuadError::check_limit(cfg.limit)?;
    QuadError::check_bounds(a, b)?;
    let exhausted = Cell::new(false);
    let (value, abs_err)
        = integrate_core(&f, T::from_f64(a), T::from_f64(b), cfg, &exhausted);
    if exhausted.get() {
        println!(
            "quad::integrate: WARNING: subdivision limit {} reached; the \
            error estimate may exceed the requested tolerance",
            cfg.limit,
        );
    }
    Ok(Quadrature { value, abs_err })
}

/// Integrate a complex-valued function of one real variable over `[a, b]`
/// by running the adaptive scheme separately on the real and imaginary
/// parts and recombining.
///
/// Both component error estimates are reported; they are never collapsed
/// into a single bound.
pub fn integrate_complex<T, F>(f: F, a: f64, b: f64, cfg: &QuadConfig)
    -> QuadResult<ComplexQuadrature<T>>
where
    T: Scalar,
    F: Fn(&T) -> T::Complex,
{
    let re = integrate(|r: &T| T::re(&f(r)), a, b, cfg)?;
    let im = integrate(|r: &T| T::im(&f(r)), a, b, cfg)?;
    Ok(ComplexQuadrature {
        value: T::complex(re.value, im.value),
        re_abs_err: re.abs_err,
        im_abs_err: im.abs_err,
    })
}

// nested real double integral of fx(x) fy(y), x outer over [a, b], y
// inner over [c(x), d(x)]; inner budget exhaustion is folded into the
// shared flag
#[allow(clippy::too_many_arguments)]
fn double_core<T, FX, FY, C, D>(
    fx: &FX,
    fy: &FY,
    a: f64,
    b: f64,
    c: &C,
    d: &D,
    cfg: &QuadConfig,
    exhausted: &Cell<bool>,
) -> (T, T)
where
    T: Scalar,
    FX: Fn(&T) -> T,
    FY: Fn(&T) -> T,
    C: Fn(&T) -> T,
    D: Fn(&T) -> T,
{
    let outer = |x: &T| {
        let (inner, _err) = integrate_core(fy, c(x), d(x), cfg, exhausted);
        fx(x) * inner
    };
    integrate_core(&outer, T::from_f64(a), T::from_f64(b), cfg, exhausted)
}

/// Evaluate the nested double integral of the product `f1(x) f2(y)`, with
/// the outer variable x running over `[a, b]` and the inner variable y
/// over `[c(x), d(x)]`.
///
/// The product of the two complex values is expanded into four real
/// double integrals (ReRe, ImIm, ImRe, ReIm) which are recombined as
/// `(ReRe - ImIm) + i (ImRe + ReIm)`. The bound functions `c` and `d`
/// always receive the *outer* integration variable as their argument,
/// never the inner one, even when a bound happens to coincide with the
/// physical inner variable.
pub fn integrate_complex_product<T, F1, F2, C, D>(
    f1: F1,
    f2: F2,
    a: f64,
    b: f64,
    c: C,
    d: D,
    cfg: &QuadConfig,
) -> QuadResult<ComplexQuadrature<T>>
where
    T: Scalar,
    F1: Fn(&T) -> T::Complex,
    F2: Fn(&T) -> T::Complex,
    C: Fn(&T) -> T,
    D: Fn(&T) -> T,
{
    QuadError::check_tolerance(cfg.abs_tol)?;
    QuadError::check_limit(cfg.limit)?;
    QuadError::check_bounds(a, b)?;
    let exhausted = Cell::new(false);
    let (rr, err_rr) = double_core(
        &|x: &T| T::re(&f1(x)), &|y: &T| T::re(&f2(y)),
        a, b, &c, &d, cfg, &exhausted,
    );
    let (ii, err_ii) = double_core(
        &|x: &T| T::im(&f1(x)), &|y: &T| T::im(&f2(y)),
        a, b, &c, &d, cfg, &exhausted,
    );
    let (ir, err_ir) = double_core(
        &|x: &T| T::im(&f1(x)), &|y: &T| T::re(&f2(y)),
        a, b, &c, &d, cfg, &exhausted,
    );
    let (ri, err_ri) = double_core(
        &|x: &T| T::re(&f1(x)), &|y: &T| T::im(&f2(y)),
        a, b, &c, &d, cfg, &exhausted,
    );
    if exhausted.get() {
        println!(
            "quad::integrate_complex_product: WARNING: subdivision limit \
            {} reached; the error estimate may exceed the requested \
            tolerance",
            cfg.limit,
        );
    }
    Ok(ComplexQuadrature {
        value: T::complex(rr - ii, ir + ri),
        re_abs_err: err_rr + err_ii,
        im_abs_err: err_ir + err_ri,
    })
}
