//! Analytical vibrational wavefunctions: bound Morse eigenstates and
//! energy-normalized continuum states.
//!
//! Bound eigenfunctions follow the closed-form Morse solutions of
//! JCP 88, 4535 (1988), built from a three-term recurrence in the level
//! index at fixed `s = 2 lambda - 2n - 1`. The recurrence is evaluated
//! bottom-up with two rolling values, so one evaluation costs O(n).
//!
//! Continuum states come in two flavors: plane waves whose asymptotic
//! kinetic energy is read off a hyperbolic potential curve (optionally
//! with zero amplitude left of the reference point, modeling a particle
//! with no density behind a turning point), and regular Coulomb
//! wavefunctions for a genuine 1/r potential. Both are normalized to a
//! Dirac delta in energy.
//!
//! Every evaluation is a pure function of the descriptor and the radial
//! coordinate; descriptors are validated once, at construction.

use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use crate::{
    Arr1,
    DEF_MAX_TERMS,
    error::WfError,
    potential::{ Hyperbolic, Morse },
    scalar::{ Scalar, MP_PREC },
};

pub type WfResult<T> = Result<T, WfError>;

/// The square root of the generalized factorial, `sqrt(x!)`.
///
/// Integer arguments reproduce `sqrt(n!)` exactly; non-integer arguments
/// are reduced multiplicatively until the remainder drops below 1, where
/// the continuous factorial `Gamma(x + 1)` takes over. Working with the
/// square root at every step keeps intermediate values representable for
/// arguments where `x!` itself would overflow twice as fast.
pub fn sqrt_fact<T: Scalar>(x: T) -> T {
    let one = T::one();
    let thresh = T::from_f64(1e-7);
    let mut x = x;
    let mut acc = T::one();
    loop {
        if (one.clone() - x.clone()).abs() < thresh {
            return acc * x.sqrt();
        } else if x < one {
            return acc * Scalar::gamma(x + one).sqrt();
        }
        acc = acc * x.clone().sqrt();
        x = x - one.clone();
    }
}

/// A bound Morse vibrational eigenstate.
///
/// The quantum number is a non-negative integer by construction; the
/// constructor additionally requires the level to exist in the well
/// (`2 lambda - 2n - 1 > 0`), since the recurrence is undefined
/// otherwise.
#[derive(Copy, Clone, Debug)]
pub struct BoundMorse {
    pot: Morse,
    red_mass: f64,
    n: u32,
    lambda: f64,
    s: f64,
}

impl BoundMorse {
    /// Create a new `BoundMorse` for level `n` of `pot`.
    pub fn new(pot: Morse, red_mass: f64, n: u32) -> WfResult<Self> {
        WfError::check_positive("De", pot.de)?;
        WfError::check_positive("alpha", pot.alpha)?;
        WfError::check_positive("Req", pot.req)?;
        WfError::check_mass(red_mass)?;
        let lambda = pot.lambda_param(red_mass);
        let s = 2.0 * lambda - 2.0 * (n as f64) - 1.0;
        if s <= 0.0 {
            return Err(WfError::NoSuchLevel {
                n,
                levels: pot.level_count(red_mass),
            });
        }
        Ok(Self { pot, red_mass, n, lambda, s })
    }

    /// Get the vibrational quantum number.
    pub fn n(&self) -> u32 { self.n }

    /// Get the potential descriptor.
    pub fn potential(&self) -> Morse { self.pot }

    /// Eigenenergy of this level, measured from the bottom of the well.
    pub fn energy(&self) -> f64 { self.pot.eigenvalue(self.n, self.red_mass) }

    /// Evaluate the (real) wavefunction amplitude at radius `r` (Bohr).
    ///
    /// The n = 0 amplitude splits `z^(s/2)` into two half powers around
    /// the exponential so that the tiny normalization factor damps the
    /// large power before it can overflow.
    pub fn eval<T: Scalar>(&self, r: &T) -> T {
        let two = T::from_f64(2.0);
        let alpha = T::from_f64(self.pot.alpha);
        let req = T::from_f64(self.pot.req);
        let lambda = T::from_f64(self.lambda);
        let s = T::from_f64(self.s);
        let z = two.clone() * lambda
            * (-(alpha.clone() * (r.clone() - req))).exp();
        let zq = z.clone().powf(T::from_f64(self.s / 4.0));
        let psi0 = alpha.sqrt() * s.clone().sqrt() / sqrt_fact(s.clone())
            * zq.clone()
            * (-(z.clone() / two.clone())).exp()
            * zq;
        // three-term recurrence at fixed s; the k = 1 step degenerates to
        // the two-term form since the psi_{-1} coefficient vanishes
        let mut prev2 = T::zero();
        let mut prev1 = psi0;
        for k in 1..=self.n {
            let kf = T::from_f64(k as f64);
            let pre = (T::one() / (kf.clone() * (s.clone() + kf.clone())))
                .sqrt();
            let p1 = two.clone() * kf.clone() + s.clone() - T::one()
                - z.clone();
            let p2 = ((kf.clone() - T::one()) * (kf + s.clone() - T::one()))
                .sqrt();
            let cur = pre * (p1 * prev1.clone() - p2 * prev2);
            prev2 = prev1;
            prev1 = cur;
        }
        prev1
    }

    /// Sample the wavefunction over a coordinate array.
    pub fn sample<S>(&self, r: &Arr1<S>) -> nd::Array1<f64>
    where S: nd::Data<Elem = f64>
    {
        sample(r, |rk| self.eval::<f64>(&rk))
    }
}

/// An energy-normalized free-particle state whose kinetic energy is read
/// off a hyperbolic potential curve at a reference point.
#[derive(Copy, Clone, Debug)]
pub struct PlaneWave {
    pot: Hyperbolic,
    red_mass: f64,
    r_start: f64,
    phase: f64,
    truncate_left: bool,
    e_kin: f64,
}

impl PlaneWave {
    /// Create a new `PlaneWave` with asymptotic kinetic energy
    /// `V(r_start) - b`.
    pub fn new(pot: Hyperbolic, red_mass: f64, r_start: f64, phase: f64)
        -> WfResult<Self>
    {
        WfError::check_mass(red_mass)?;
        WfError::check_r_start(r_start)?;
        let e_kin = pot.asymptotic_kinetic_energy(r_start);
        WfError::check_e_kin(e_kin)?;
        Ok(Self { pot, red_mass, r_start, phase, truncate_left: false, e_kin })
    }

    /// Like [`Self::new`], but with zero amplitude for `r <= r_start`.
    ///
    /// This models a dissociating particle with no density left of its
    /// classical turning point; the cutoff is a physical boundary
    /// condition, not a numerical artifact.
    pub fn truncated(pot: Hyperbolic, red_mass: f64, r_start: f64, phase: f64)
        -> WfResult<Self>
    {
        let mut pw = Self::new(pot, red_mass, r_start, phase)?;
        pw.truncate_left = true;
        Ok(pw)
    }

    /// Get the potential descriptor.
    pub fn potential(&self) -> Hyperbolic { self.pot }

    /// Get the asymptotic kinetic energy (Hartree).
    pub fn e_kin(&self) -> f64 { self.e_kin }

    /// Get the nuclear wavenumber K = sqrt(2 m E) (inverse Bohr).
    pub fn wavenumber(&self) -> f64 {
        (2.0 * self.red_mass * self.e_kin).sqrt()
    }

    /// Get the reference point (Bohr).
    pub fn r_start(&self) -> f64 { self.r_start }

    /// Get the constant phase offset.
    pub fn phase(&self) -> f64 { self.phase }

    /// Evaluate the wavefunction at radius `r` (Bohr):
    /// `sqrt(m / (2 pi K)) exp(i (K (r - r_start) + phase))`.
    pub fn eval<T: Scalar>(&self, r: &T) -> T::Complex {
        if self.truncate_left && *r <= T::from_f64(self.r_start) {
            return T::c_zero();
        }
        let two = T::from_f64(2.0);
        let m = T::from_f64(self.red_mass);
        let k = (two.clone() * m.clone() * T::from_f64(self.e_kin)).sqrt();
        let norm = (m / (two * T::pi() * k.clone())).sqrt();
        let theta = k * (r.clone() - T::from_f64(self.r_start))
            + T::from_f64(self.phase);
        T::c_scale(&T::cis(theta), norm)
    }

    /// Sample the wavefunction over a coordinate array.
    pub fn sample<S>(&self, r: &Arr1<S>) -> nd::Array1<C64>
    where S: nd::Data<Elem = f64>
    {
        sample(r, |rk| self.eval::<f64>(&rk))
    }
}

/// An energy-normalized continuum state of a genuine 1/r potential,
/// built from the regular Coulomb wavefunction F_0.
#[derive(Copy, Clone, Debug)]
pub struct CoulombWave {
    pot: Hyperbolic,
    red_mass: f64,
    r_start: f64,
    max_terms: usize,
    e_kin: f64,
}

impl CoulombWave {
    /// Create a new `CoulombWave` with asymptotic kinetic energy
    /// `V(r_start) - b = a / r_start`.
    pub fn new(pot: Hyperbolic, red_mass: f64, r_start: f64)
        -> WfResult<Self>
    {
        WfError::check_mass(red_mass)?;
        WfError::check_r_start(r_start)?;
        let e_kin = pot.asymptotic_kinetic_energy(r_start);
        WfError::check_e_kin(e_kin)?;
        Ok(Self { pot, red_mass, r_start, max_terms: DEF_MAX_TERMS, e_kin })
    }

    /// Replace the Coulomb-series term cap (default: `1_000_000`).
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Get the potential descriptor.
    pub fn potential(&self) -> Hyperbolic { self.pot }

    /// Get the reference point (Bohr).
    pub fn r_start(&self) -> f64 { self.r_start }

    /// Get the nuclear wavenumber K = sqrt(2 m E) (inverse Bohr).
    pub fn wavenumber(&self) -> f64 {
        (2.0 * self.red_mass * self.e_kin).sqrt()
    }

    /// Get the Sommerfeld parameter eta = a m / K.
    pub fn eta(&self) -> f64 {
        self.pot.a * self.red_mass / self.wavenumber()
    }

    /// Evaluate the (real) wavefunction amplitude at radius `r` (Bohr):
    /// `sqrt(2 m / (pi K)) F_0(eta, K r)`.
    ///
    /// The Coulomb series is summed in extended precision regardless of
    /// the backend; failure to converge within the term cap is an error,
    /// never a silent NaN.
    pub fn eval<T: Scalar>(&self, r: &T) -> WfResult<T> {
        let k = self.wavenumber();
        let rho = k * r.to_f64();
        let f0 = coulomb_f0(self.eta(), rho, self.max_terms)?;
        let two = T::from_f64(2.0);
        let m = T::from_f64(self.red_mass);
        let norm = (two * m / (T::pi() * T::from_f64(k))).sqrt();
        Ok(norm * T::from_mp(&f0))
    }

    /// Sample the wavefunction over a coordinate array.
    pub fn sample<S>(&self, r: &Arr1<S>) -> WfResult<nd::Array1<f64>>
    where S: nd::Data<Elem = f64>
    {
        let mut out: Vec<f64> = Vec::with_capacity(r.len());
        for &rk in r.iter() {
            out.push(self.eval::<f64>(&rk)?);
        }
        Ok(nd::Array1::from_vec(out))
    }
}

// regular Coulomb wavefunction F_0(eta, rho) from the power series
//
//   F_0 = C_0(eta) rho sum_k A_k rho^k,
//   A_0 = 1, A_1 = eta, A_k = (2 eta A_{k-1} - A_{k-2}) / (k (k + 1)),
//   C_0(eta) = sqrt(2 pi eta / (e^{2 pi eta} - 1))
//
// partial sums cancel down from ~e^rho to O(1), so the working precision
// has to grow with rho; 1.5 bits per unit covers the 1.44 bits of
// cancellation per unit of rho
fn coulomb_f0(eta: f64, rho: f64, max_terms: usize)
    -> Result<rug::Float, WfError>
{
    use rug::Float;
    use rug::float::Constant;
    use rug::ops::Pow;
    let prec = ((96.0 + 1.5 * rho.abs()).ceil() as u32).max(MP_PREC);
    let rho_mp = Float::with_val(prec, rho);
    let eta_mp = Float::with_val(prec, eta);
    let c0 = if eta == 0.0 {
        Float::with_val(prec, 1.0)
    } else {
        let tpe = Float::with_val(prec, 2.0)
            * Float::with_val(prec, Constant::Pi)
            * eta_mp.clone();
        (tpe.clone() / (tpe.exp() - Float::with_val(prec, 1.0))).sqrt()
    };
    let eps = Float::with_val(prec, 2.0).pow(-((prec as i32) - 8));
    let mut a_prev = Float::with_val(prec, 1.0);
    let mut a_cur = eta_mp.clone();
    let mut sum = a_prev.clone() + a_cur.clone() * rho_mp.clone();
    let mut rho_pow = rho_mp.clone();
    let mut converged = false;
    for k in 2..=max_terms {
        rho_pow = rho_pow * rho_mp.clone();
        let denom = Float::with_val(prec, (k as f64) * (k as f64 + 1.0));
        let a_next = (Float::with_val(prec, 2.0) * eta_mp.clone()
            * a_cur.clone() - a_prev) / denom;
        let term = a_next.clone() * rho_pow.clone();
        sum = sum + term.clone();
        a_prev = a_cur;
        a_cur = a_next;
        // terms grow until k ~ rho; only trust smallness past that point
        if k as f64 > rho.abs()
            && term.abs() <= sum.clone().abs() * eps.clone()
        {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(WfError::CoulombSeries { max_terms });
    }
    Ok(c0 * rho_mp * sum)
}

/// Sample a function of the radial coordinate over a coordinate array.
pub fn sample<S, A, F>(r: &Arr1<S>, psi: F) -> nd::Array1<A>
where
    S: nd::Data<Elem = f64>,
    A: Clone + Zero,
    F: Fn(f64) -> A,
{
    let mut out = nd::Array1::<A>::zeros(r.len());
    out.iter_mut().zip(r).for_each(|(ok, &rk)| { *ok = psi(rk); });
    out
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sqrt_fact_integers() {
        let mut fact: f64 = 1.0;
        for n in 0..=20 {
            if n > 0 { fact *= n as f64; }
            let got = sqrt_fact(n as f64);
            assert!(
                (got - fact.sqrt()).abs() <= 1e-9 * fact.sqrt(),
                "n = {}: {} vs {}", n, got, fact.sqrt(),
            );
        }
    }

    #[test]
    fn sqrt_fact_continuous() {
        // multiplicative reduction agrees with the gamma function
        let got = sqrt_fact(3.3_f64);
        let expected = libm::tgamma(4.3).sqrt();
        assert!((got - expected).abs() < 1e-12 * expected);
        // extended backend matches the machine one
        let mp = sqrt_fact(<rug::Float as Scalar>::from_f64(3.3));
        assert!((Scalar::to_f64(&mp) - got).abs() < 1e-12);
    }

    fn test_well() -> (Morse, f64) {
        (Morse::new(0.1, 1.0, 2.0).unwrap(), 100.0)
    }

    #[test]
    fn morse_ground_state_is_localized() {
        let (pot, m) = test_well();
        let psi = BoundMorse::new(pot, m, 0).unwrap();
        let at_req: f64 = psi.eval(&pot.req);
        assert!(at_req.is_finite() && at_req.abs() > 0.0);
        assert!(psi.eval::<f64>(&(pot.req + 1.5)).abs() < at_req.abs());
        assert!(psi.eval::<f64>(&(pot.req - 1.0)).abs() < at_req.abs());
    }

    #[test]
    fn morse_node_count() {
        let (pot, m) = test_well();
        let psi = BoundMorse::new(pot, m, 2).unwrap();
        let r: nd::Array1<f64> = nd::Array1::linspace(0.5, 8.0, 4001);
        let wf = psi.sample(&r);
        let nodes = wf.iter().zip(wf.iter().skip(1))
            .filter(|(a, b)| *a * *b < 0.0)
            .count();
        assert_eq!(nodes, 2);
    }

    #[test]
    fn morse_rejects_unbound_level() {
        let (pot, m) = test_well();
        // lambda ~ 4.47: levels 0..=3 exist, 4 does not
        assert!(BoundMorse::new(pot, m, 3).is_ok());
        assert!(matches!(
            BoundMorse::new(pot, m, 4),
            Err(WfError::NoSuchLevel { n: 4, levels: 4 }),
        ));
    }

    #[test]
    fn morse_backends_agree() {
        let (pot, m) = test_well();
        let psi = BoundMorse::new(pot, m, 2).unwrap();
        for r in [1.2, 1.9, 2.4, 3.6] {
            let f: f64 = psi.eval(&r);
            let x = psi.eval::<rug::Float>(
                &<rug::Float as Scalar>::from_f64(r));
            assert!((f - Scalar::to_f64(&x)).abs() < 1e-10 * f.abs().max(1.0));
        }
    }

    #[test]
    fn plane_wave_modulus_and_truncation() {
        let pot = Hyperbolic::new(0.5, -0.1).unwrap();
        let free = PlaneWave::new(pot, 50.0, 2.0, 0.0).unwrap();
        let cut = PlaneWave::truncated(pot, 50.0, 2.0, 0.0).unwrap();
        let k = free.wavenumber();
        let expected_sq = 50.0 / (2.0 * std::f64::consts::PI * k);
        for r in [2.5, 4.0, 9.0] {
            let z = free.eval::<f64>(&r);
            assert!((z.norm_sqr() - expected_sq).abs() < 1e-12);
            // identical right of the reference point
            let w = cut.eval::<f64>(&r);
            assert_eq!(z, w);
        }
        // exactly zero at and left of the reference point
        assert_eq!(cut.eval::<f64>(&2.0), C64::zero());
        assert_eq!(cut.eval::<f64>(&1.0), C64::zero());
        assert!(free.eval::<f64>(&1.0).norm() > 0.0);
    }

    #[test]
    fn coulomb_series_reduces_to_sine() {
        for rho in [0.5, 2.0, 10.0] {
            let f0 = coulomb_f0(0.0, rho, 1_000_000).unwrap();
            assert!((f0.to_f64() - rho.sin()).abs() < 1e-12);
        }
    }

    #[test]
    fn coulomb_wave_is_regular_at_origin() {
        let pot = Hyperbolic::new(0.5, 0.0).unwrap();
        let cw = CoulombWave::new(pot, 10.0, 2.0).unwrap();
        let near: f64 = cw.eval(&1e-6).unwrap();
        let mid: f64 = cw.eval(&1.0).unwrap();
        assert!(near.abs() < 1e-4);
        assert!(mid.is_finite());
    }

    #[test]
    fn coulomb_series_cap_is_surfaced() {
        let pot = Hyperbolic::new(0.5, 0.0).unwrap();
        let cw = CoulombWave::new(pot, 10.0, 2.0).unwrap().with_max_terms(3);
        assert!(matches!(
            cw.eval::<f64>(&5.0),
            Err(WfError::CoulombSeries { max_terms: 3 }),
        ));
    }
}
