//! Quanta Units - unit registry and unit functions
//!
//! Resolves unit names to [`Unit`] values with dimensions and exact SI
//! factors. Supports SI prefixes, long names and plurals, plus unit
//! expressions like `kg*m/s^2`.
//!
//! Categories:
//! - Length (m, in, ft, mi, au, ...)
//! - Mass (g, kg, lb, oz, ...)
//! - Time (s, min, h, d, wk, and calendar units mo, yr, decade, century)
//! - Temperature (K, °C, °F, °R)
//! - Current, amount, luminosity (A, mol, cd, lm, lx)
//! - Area, volume, velocity, acceleration
//! - Force, energy, power, pressure, frequency
//! - Electrical (V, Ω, C, F, Ah)
//! - Data (bit, B, bps with SI and IEC prefixes)
//! - Angle (rad, deg, grad, arcmin, arcsec, turn)
//! - Ratio (%, ‰, ppm) and currency ($, ¢)

mod convert;
mod parse;
mod units;

pub use convert::si_unit;
pub use parse::parse_unit;
pub use units::{UnitRegistry, UNITS};

use quanta_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion
        .with_function(convert::Convert)
        .with_function(convert::ToBase)

        // Inspection
        .with_function(convert::Magnitude)
        .with_function(convert::UnitOf)
        .with_function(convert::DimensionOf)
        .with_function(convert::Dimensions)
        .with_function(convert::IsDimensionless)
        .with_function(convert::Compatible)
}
