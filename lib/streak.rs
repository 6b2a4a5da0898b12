//! Time-domain streaking prototype: oscillating pulse-envelope and
//! population-decay integrands over nested time windows.
//!
//! This is exploratory code exercising the nested-integral machinery in
//! [`quad`][crate::quad] on the kind of double integrals that appear
//! when streaking an electronic decay process with an XUV pulse. In the
//! nested integrals the first conceptual variable (t2) is the inner one,
//! and bound closures receive the outer variable as their argument,
//! matching the contract of
//! [`integrate_complex_product`][crate::quad::integrate_complex_product].

use std::f64::consts::PI;
use num_complex::Complex64 as C64;
use crate::{
    quad::{ self, ComplexQuadrature, QuadConfig, QuadResult },
    units,
};

/// Parameters of the streaking setup, in atomic units.
///
/// Immutable; thread a copy into every call instead of keeping
/// process-wide state.
#[derive(Copy, Clone, Debug)]
pub struct StreakParams {
    /// Resonance energy of the decaying state (Hartree).
    pub er: f64,
    /// Kinetic energy of the emitted secondary electron (Hartree).
    pub e_kin: f64,
    /// Electronic decay width of the resonant state (Hartree).
    pub gamma: f64,
    /// XUV carrier frequency (Hartree).
    pub omega_x: f64,
    /// XUV pulse duration (atomic time units).
    pub tx: f64,
    /// XUV field amplitude.
    pub a0x: f64,
}

impl StreakParams {
    /// Build from the laboratory units driver code usually carries:
    /// energies in eV, durations in seconds.
    pub fn from_ev_seconds(
        er_ev: f64,
        e_kin_ev: f64,
        gamma_ev: f64,
        omega_x_ev: f64,
        tx_s: f64,
        a0x: f64,
    ) -> Self {
        Self {
            er: units::ev_to_hartree(er_ev),
            e_kin: units::ev_to_hartree(e_kin_ev),
            gamma: units::ev_to_hartree(gamma_ev),
            omega_x: units::ev_to_hartree(omega_x_ev),
            tx: units::second_to_atu(tx_s),
            a0x,
        }
    }

    /// The cos^2 pulse window
    /// `f(t) = 1/4 (e^{2 pi i t / TX} + 2 + e^{-2 pi i t / TX})`.
    pub fn envelope(&self, t: f64) -> C64 {
        let th = 2.0 * PI * t / self.tx;
        (C64::new(0.0, th).exp() + 2.0 + C64::new(0.0, -th).exp()) / 4.0
    }

    /// Time derivative of the window,
    /// `f'(t) = pi/(2 i TX) (-e^{2 pi i t / TX} + e^{-2 pi i t / TX})`.
    pub fn envelope_deriv(&self, t: f64) -> C64 {
        let th = 2.0 * PI * t / self.tx;
        C64::new(0.0, -PI / (2.0 * self.tx))
            * (C64::new(0.0, -th).exp() - C64::new(0.0, th).exp())
    }

    /// The windowed XUV field,
    /// `-A cos(Omega t) f'(t) + A Omega sin(Omega t) f(t)`.
    pub fn field(&self, t: f64) -> C64 {
        -self.a0x * (self.omega_x * t).cos() * self.envelope_deriv(t)
            + self.a0x * self.omega_x * (self.omega_x * t).sin()
                * self.envelope(t)
    }

    /// Population kernel of the resonant state,
    /// `e^{t (Gamma/2 + i Er)}`.
    pub fn resonant_kernel(&self, t: f64) -> C64 {
        (t * C64::new(self.gamma / 2.0, self.er)).exp()
    }

    /// Joint decay-and-emission kernel,
    /// `e^{t (Gamma/2 + i (Er + E_kin))}`.
    pub fn emission_kernel(&self, t: f64) -> C64 {
        (t * C64::new(self.gamma / 2.0, self.er + self.e_kin)).exp()
    }

    /// Nested decay amplitude over the pulse window: the outer time t1
    /// runs over `[-TX/2, TX/2]`, the inner time t2 from t1 to `TX/2`.
    pub fn decay_amplitude(&self, cfg: &QuadConfig)
        -> QuadResult<ComplexQuadrature<f64>>
    {
        let half = self.tx / 2.0;
        quad::integrate_complex_product(
            |t1: &f64| self.resonant_kernel(*t1),
            |t2: &f64| self.emission_kernel(*t2),
            -half, half,
            |x: &f64| *x,
            |_x: &f64| half,
            cfg,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params() -> StreakParams {
        StreakParams::from_ev_seconds(14.0, 2.0, 0.5, 13.5, 100e-18, 1.0)
    }

    #[test]
    fn envelope_is_a_cosine_window() {
        let p = params();
        for t in [-0.4 * p.tx, -0.1 * p.tx, 0.0, 0.3 * p.tx] {
            let f = p.envelope(t);
            let expected = (PI * t / p.tx).cos().powi(2);
            assert!((f.re - expected).abs() < 1e-12);
            assert!(f.im.abs() < 1e-12);
        }
        assert!(p.envelope(p.tx / 2.0).norm() < 1e-12);
    }

    #[test]
    fn envelope_deriv_matches_finite_difference() {
        let p = params();
        let h = 1e-6;
        for t in [-1.2, 0.3, 1.7] {
            let fd = (p.envelope(t + h) - p.envelope(t - h)) / (2.0 * h);
            let an = p.envelope_deriv(t);
            assert!((fd - an).norm() < 1e-6);
        }
    }

    #[test]
    fn field_is_real() {
        let p = params();
        for t in [-1.5, 0.0, 0.9] {
            let fx = p.field(t);
            assert!(fx.im.abs() < 1e-12);
            assert!(fx.re.is_finite());
        }
    }

    #[test]
    fn decay_amplitude_matches_analytic_form() {
        let p = params();
        let q = p.decay_amplitude(&QuadConfig::default()).unwrap();
        // inner integral has the closed form (e^{c2 T} - e^{c2 t1}) / c2
        let t = p.tx / 2.0;
        let c1 = C64::new(p.gamma / 2.0, p.er);
        let c2 = C64::new(p.gamma / 2.0, p.er + p.e_kin);
        let c12 = c1 + c2;
        let expected = (
            (c2 * t).exp() * ((c1 * t).exp() - (-c1 * t).exp()) / c1
            - ((c12 * t).exp() - (-c12 * t).exp()) / c12
        ) / c2;
        assert!((q.value - expected).norm() < 1e-6 * expected.norm().max(1.0));
    }
}
