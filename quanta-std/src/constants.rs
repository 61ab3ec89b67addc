//! Mathematical and physical constants with sources
//!
//! Names must not shadow unit symbols: units resolve first, so standard
//! gravity is `g0` (not `g`, the gram) and Planck's constant is `planck`
//! (not `h`, the hour).

use quanta_plugin::ConstantDef;

// ============================================================================
// Mathematical Constants
// ============================================================================

pub fn pi() -> ConstantDef {
    ConstantDef::new("pi", "pi", "", "https://oeis.org/A000796", "transcendental")
}

pub fn pi_symbol() -> ConstantDef {
    ConstantDef::new("π", "pi", "", "https://oeis.org/A000796", "transcendental")
}

pub fn e() -> ConstantDef {
    ConstantDef::new("e", "exp(1)", "", "https://oeis.org/A001113", "transcendental")
}

pub fn phi() -> ConstantDef {
    ConstantDef::new("phi", "(1 + sqrt(5)) / 2", "", "https://oeis.org/A001622", "algebraic")
}

pub fn phi_symbol() -> ConstantDef {
    ConstantDef::new("φ", "(1 + sqrt(5)) / 2", "", "https://oeis.org/A001622", "algebraic")
}

pub fn sqrt2() -> ConstantDef {
    ConstantDef::new("sqrt2", "sqrt(2)", "", "https://oeis.org/A002193", "algebraic")
}

pub fn sqrt3() -> ConstantDef {
    ConstantDef::new("sqrt3", "sqrt(3)", "", "https://oeis.org/A002194", "algebraic")
}

// ============================================================================
// Physical Constants (SI 2019 exact values unless noted)
// ============================================================================

pub fn c() -> ConstantDef {
    ConstantDef::new("c", "299792458", "m/s", "https://physics.nist.gov/cgi-bin/cuu/Value?c", "physics")
}

pub fn g0() -> ConstantDef {
    ConstantDef::new("g0", "9.80665", "m/s^2", "3rd CGPM (1901)", "physics")
}

/// CODATA 2018, not exact
pub fn gravitational() -> ConstantDef {
    ConstantDef::new("G", "6.67430e-11", "m^3/kg/s^2", "https://physics.nist.gov/cgi-bin/cuu/Value?bg", "physics")
}

pub fn planck() -> ConstantDef {
    ConstantDef::new("planck", "6.62607015e-34", "J*s", "https://physics.nist.gov/cgi-bin/cuu/Value?h", "physics")
}

pub fn avogadro() -> ConstantDef {
    ConstantDef::new("N_A", "6.02214076e23", "1/mol", "https://physics.nist.gov/cgi-bin/cuu/Value?na", "physics")
}

pub fn boltzmann() -> ConstantDef {
    ConstantDef::new("k_B", "1.380649e-23", "J/K", "https://physics.nist.gov/cgi-bin/cuu/Value?k", "physics")
}

pub fn elementary_charge() -> ConstantDef {
    ConstantDef::new("q_e", "1.602176634e-19", "C", "https://physics.nist.gov/cgi-bin/cuu/Value?e", "physics")
}

/// CODATA 2018, not exact
pub fn electron_mass() -> ConstantDef {
    ConstantDef::new("m_e", "9.1093837015e-31", "kg", "https://physics.nist.gov/cgi-bin/cuu/Value?me", "physics")
}

/// Every constant, in registration order
pub fn all() -> Vec<ConstantDef> {
    vec![
        pi(),
        pi_symbol(),
        e(),
        phi(),
        phi_symbol(),
        sqrt2(),
        sqrt3(),
        c(),
        g0(),
        gravitational(),
        planck(),
        avogadro(),
        boltzmann(),
        elementary_charge(),
        electron_mass(),
    ]
}
