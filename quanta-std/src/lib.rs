//! Quanta Standard Library
//!
//! Math, trig and date functions plus named constants. [`standard_registry`]
//! also loads the unit functions from `quanta-units`.

pub mod constants;
pub mod functions;

use quanta_plugin::PluginRegistry;
use tracing::debug;

/// Load standard library into registry
pub fn load_standard_library(registry: PluginRegistry) -> PluginRegistry {
    let registry = registry
        // Math
        .with_function(functions::Sqrt)
        .with_function(functions::Ln)
        .with_function(functions::Exp)
        .with_function(functions::Pow)
        .with_function(functions::Abs)
        .with_function(functions::Round)
        .with_function(functions::Floor)
        .with_function(functions::Ceil)
        // Trig
        .with_function(functions::Sin)
        .with_function(functions::Cos)
        .with_function(functions::Tan)
        // Dates
        .with_function(functions::DateFn)
        .with_function(functions::DateTimeFn)
        .with_function(functions::TimeFn)
        .with_function(functions::NowFn)
        .with_function(functions::ParseDate)
        .with_function(functions::FormatDate)
        .with_function(functions::AddMonths)
        .with_function(functions::Diff)
        .with_function(functions::YEAR)
        .with_function(functions::MONTH)
        .with_function(functions::DAY)
        .with_function(functions::HOUR)
        .with_function(functions::MINUTE)
        .with_function(functions::SECOND)
        .with_function(functions::WEEKDAY)
        .with_function(functions::DAY_OF_YEAR)
        .with_function(functions::WEEK);

    constants::all()
        .into_iter()
        .fold(registry, |registry, def| registry.with_constant(def))
}

/// Create registry with standard library and unit functions
pub fn standard_registry() -> PluginRegistry {
    let registry = quanta_units::load_units_library(load_standard_library(PluginRegistry::new()));
    debug!(
        functions = registry.list_functions(None).len(),
        constants = registry.list_constants().len(),
        "standard registry ready"
    );
    registry
}
