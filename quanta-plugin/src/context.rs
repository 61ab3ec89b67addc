//! Evaluation Context

use crate::{ConstantDef, PluginRegistry};
use quanta_core::{Number, NumericConfig, QuantaDateTime, QuantaError};
use std::sync::Arc;

/// Evaluation context passed to plugins
///
/// One context per evaluation; the registry behind it is shared.
pub struct EvalContext {
    pub config: NumericConfig,
    pub registry: Arc<PluginRegistry>,
    /// Clock reading for `now` and bare times of day
    pub now: QuantaDateTime,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            config: NumericConfig::default(),
            registry,
            now: QuantaDateTime::now(),
        }
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.config.precision = precision;
        self
    }

    pub fn with_config(mut self, config: NumericConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin the clock (deterministic evaluation)
    pub fn with_now(mut self, now: QuantaDateTime) -> Self {
        self.now = now;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn precision(&self) -> u32 {
        self.config.precision
    }

    /// Look up a constant and compute its magnitude.
    ///
    /// Returns the definition alongside so the caller can attach its unit.
    pub fn constant(&self, name: &str) -> Option<(&ConstantDef, Result<Number, QuantaError>)> {
        let def = self.registry.get_constant(name)?;
        Some((def, self.eval_constant_formula(&def.formula)))
    }

    /// Evaluate a constant's formula ("pi", "exp(1)", "(1 + sqrt(5)) / 2", "299792458")
    fn eval_constant_formula(&self, formula: &str) -> Result<Number, QuantaError> {
        if let Ok(n) = Number::from_str(formula) {
            return Ok(n);
        }

        let precision = self.precision();
        match formula {
            "pi" => Ok(Number::pi(precision)),
            "exp(1)" => Ok(Number::e(precision)),
            "(1 + sqrt(5)) / 2" => Ok(Number::phi(precision)),
            "sqrt(2)" => Ok(Number::from_i64(2).sqrt(precision)?),
            "sqrt(3)" => Ok(Number::from_i64(3).sqrt(precision)?),
            _ => Err(QuantaError::internal(format!("Unknown constant formula: {}", formula))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<PluginRegistry> {
        Arc::new(
            PluginRegistry::new()
                .with_constant(ConstantDef::new("pi", "pi", "", "Archimedes", "mathematics"))
                .with_constant(ConstantDef::new("g0", "9.80665", "m/s^2", "CGPM 1901", "physics"))
                .with_constant(ConstantDef::new("bogus", "zeta(3)", "", "none", "test")),
        )
    }

    #[test]
    fn test_builders() {
        let now = QuantaDateTime::from_ymd(2025, 1, 1).unwrap();
        let ctx = EvalContext::new(registry())
            .with_precision(30)
            .with_max_depth(10)
            .with_now(now.clone());
        assert_eq!(ctx.precision(), 30);
        assert_eq!(ctx.config.max_depth, 10);
        assert_eq!(ctx.now, now);
        assert_eq!(ctx.config.digit_budget, NumericConfig::default().digit_budget);
    }

    #[test]
    fn test_constant_literal_is_exact() {
        let ctx = EvalContext::new(registry());
        let (def, value) = ctx.constant("g0").unwrap();
        assert_eq!(def.unit, "m/s^2");
        let value = value.unwrap();
        assert!(value.is_exact());
        assert_eq!(value, Number::from_ratio(980665, 100000));
    }

    #[test]
    fn test_constant_computed() {
        let ctx = EvalContext::new(registry());
        let (_, value) = ctx.constant("PI").unwrap();
        let value = value.unwrap();
        assert!(!value.is_exact());
        assert_eq!(value, Number::pi(50));
    }

    #[test]
    fn test_constant_unknown_formula() {
        let ctx = EvalContext::new(registry());
        let (_, value) = ctx.constant("bogus").unwrap();
        assert!(value.is_err());
        assert!(ctx.constant("missing").is_none());
    }
}
