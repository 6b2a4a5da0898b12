#![allow(non_upper_case_globals)]

//! Conversions between the laboratory units that potential parameters are
//! usually quoted in and the atomic units used everywhere inside this
//! crate.
//!
//! Concrete physical constants are taken from NIST.

/// Hartree energy (eV)
pub const Eh_eV: f64 = 27.211386245988;
//                 +/- 0.000000000053

/// Bohr radius (Å)
pub const a0_A: f64 = 0.529177210903;
//                +/- 0.000000000080

/// unified atomic mass unit (electron masses)
pub const u_me: f64 = 1822.888486209;
//                +/- 0.000000053

/// atomic unit of time (s)
pub const atu_s: f64 = 2.4188843265857e-17;
//                 +/- 0.0000000000047e-17

/// Convert an energy in electron volts to Hartree.
pub fn ev_to_hartree(e: f64) -> f64 { e / Eh_eV }

/// Convert an energy in Hartree to electron volts.
pub fn hartree_to_ev(e: f64) -> f64 { e * Eh_eV }

/// Convert a length in Ångström to Bohr radii.
pub fn angstrom_to_bohr(r: f64) -> f64 { r / a0_A }

/// Convert a length in Bohr radii to Ångström.
pub fn bohr_to_angstrom(r: f64) -> f64 { r * a0_A }

/// Convert a mass in g/mol (per particle, i.e. unified atomic mass units)
/// to electron masses.
pub fn gmol_to_me(m: f64) -> f64 { m * u_me }

/// Convert a mass in electron masses to g/mol.
pub fn me_to_gmol(m: f64) -> f64 { m / u_me }

/// Convert a time in seconds to atomic time units.
pub fn second_to_atu(t: f64) -> f64 { t / atu_s }

/// Convert a time in atomic time units to seconds.
pub fn atu_to_second(t: f64) -> f64 { t * atu_s }

/// Reduced mass of a two-body system, in electron masses, from the two
/// constituent masses in g/mol.
pub fn reduced_mass_au(mass1: f64, mass2: f64) -> f64 {
    gmol_to_me(mass1 * mass2 / (mass1 + mass2))
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(a.abs())
    }

    #[test]
    fn roundtrips() {
        assert!(close(ev_to_hartree(hartree_to_ev(0.5)), 0.5, 1e-15));
        assert!(close(angstrom_to_bohr(bohr_to_angstrom(3.7)), 3.7, 1e-15));
        assert!(close(gmol_to_me(me_to_gmol(1822.0)), 1822.0, 1e-15));
        assert!(close(second_to_atu(atu_to_second(41.3)), 41.3, 1e-15));
    }

    #[test]
    fn known_values() {
        // 1 Hartree in eV, 1 Å in Bohr
        assert!(close(hartree_to_ev(1.0), 27.211386245988, 1e-12));
        assert!(close(angstrom_to_bohr(1.0), 1.8897259886, 1e-9));
        // homonuclear reduced mass is half the atomic mass
        let mu = reduced_mass_au(20.1797, 20.1797);
        assert!(close(mu, gmol_to_me(20.1797 / 2.0), 1e-15));
    }
}
