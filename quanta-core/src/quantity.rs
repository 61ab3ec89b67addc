//! Quantity type - a number with an associated unit

use crate::dimension::Dimension;
use crate::number::{Number, NumericConfig};
use crate::unit::{ConversionError, Unit, UnitOp};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric magnitude with a unit; plain numbers carry the empty unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    pub value: Number,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Number, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: Number) -> Self {
        Quantity {
            value,
            unit: Unit::dimensionless(),
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// A plain number: dimensionless with no unit symbol or scale
    pub fn is_plain(&self) -> bool {
        self.unit.is_unity()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Get the value in SI base units
    pub fn si_value(&self) -> Number {
        self.unit.to_si(&self.value)
    }

    /// Convert to another unit, offsets included (100 degC -> 373.15 K)
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let value = self.unit.convert_to(&self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Same magnitude expressed in `target`, scaling by the factor ratio only
    fn rescale_to(&self, target: &Unit) -> Result<Number, ConversionError> {
        if self.unit == *target {
            return Ok(self.value.clone());
        }
        Ok(self.value.mul(&self.unit.factor_to(target)?))
    }

    /// Fold the residual scale of a dimensionless unit into the magnitude
    /// (2 m / 50 cm -> 4)
    pub fn fold_dimensionless(self) -> Quantity {
        if self.unit.is_dimensionless() && !self.unit.is_unity() {
            let value = self.value.mul(&self.unit.to_si_factor);
            Quantity::dimensionless(value)
        } else {
            self
        }
    }

    // ========== Arithmetic ==========

    /// Add two quantities; the right operand is expressed in the left's unit.
    /// Offset temperatures are added as absolute kelvin values.
    pub fn add(&self, other: &Quantity, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let unit = Unit::combine(UnitOp::Add, &self.unit, &other.unit)?;
        if self.has_offset_unit(other) {
            let value = self.si_value().add(&other.si_value()).within_limits(config)?;
            return Ok(Quantity::new(value, Unit::kelvin()));
        }
        let converted = other.rescale_to(&self.unit)?;
        Ok(Quantity::new(self.value.add(&converted).within_limits(config)?, unit))
    }

    /// Subtract two quantities; the right operand is expressed in the left's
    /// unit. Offset temperatures subtract as absolute kelvin values, so
    /// 20 degC - 10 degC is 10 K.
    pub fn sub(&self, other: &Quantity, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let unit = Unit::combine(UnitOp::Sub, &self.unit, &other.unit)?;
        if self.has_offset_unit(other) {
            let value = self.si_value().sub(&other.si_value()).within_limits(config)?;
            return Ok(Quantity::new(value, Unit::kelvin()));
        }
        let converted = other.rescale_to(&self.unit)?;
        Ok(Quantity::new(self.value.sub(&converted).within_limits(config)?, unit))
    }

    fn has_offset_unit(&self, other: &Quantity) -> bool {
        self.unit.has_offset() || other.unit.has_offset()
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let other = other.aligned_with(self)?;
        let unit = Unit::combine(UnitOp::Mul, &self.unit, &other.unit)?;
        let value = self.value.mul(&other.value).within_limits(config)?;
        Ok(Quantity::new(value, unit).fold_dimensionless())
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let other = other.aligned_with(self)?;
        let value = self.value.checked_div(&other.value)?.within_limits(config)?;
        let unit = Unit::combine(UnitOp::Frac, &self.unit, &other.unit)?;
        Ok(Quantity::new(value, unit).fold_dimensionless())
    }

    /// Same-dimension operands of `*` and `/` are expressed in the left unit
    /// first, so 2 m * 50 cm is 1 m^2 rather than 100 m·cm
    fn aligned_with(&self, left: &Quantity) -> Result<Quantity, ConversionError> {
        if self.is_dimensionless() || !self.is_compatible(left) || self.unit == left.unit {
            return Ok(self.clone());
        }
        Ok(Quantity::new(self.rescale_to(&left.unit)?, left.unit.clone()))
    }

    /// Raise to a dimensionless power. Integer exponents are exact; other
    /// exponents are only allowed on plain numbers or as whole roots of the unit.
    pub fn pow(&self, exp: &Quantity, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let exp = exp.clone().fold_dimensionless();
        if !exp.is_plain() {
            return Err(ConversionError::InvalidExponent(format!(
                "exponent must be dimensionless, got {}",
                exp.unit.symbol
            )));
        }

        if exp.value.is_exact() && exp.value.is_integer() {
            let e = exp
                .value
                .to_i64()
                .and_then(|e| i32::try_from(e).ok())
                .ok_or_else(|| ConversionError::InvalidExponent("exponent too large".to_string()))?;
            let unit = self.unit.power(e, config)?;
            let value = self.value.powi(i64::from(e), config)?.within_limits(config)?;
            return Ok(Quantity::new(value, unit));
        }

        let base = self.clone().fold_dimensionless();
        if base.is_plain() {
            let value = base.value.pow(&exp.value, config)?.within_limits(config)?;
            return Ok(Quantity::dimensionless(value));
        }

        // Fractional exponents on a unit: only p/q where the unit has a q-th root
        if let Some(ratio) = exp.value.as_rational() {
            if let (Some(p), Some(q)) = (ratio.numer().to_i32(), ratio.denom().to_i32()) {
                let unit = self.unit.root(q, config)?.power(p, config)?;
                let value = if q == 2 {
                    self.value.sqrt(config.precision)?.powi(i64::from(p), config)?
                } else {
                    self.value.pow(&exp.value, config)?
                };
                return Ok(Quantity::new(value.within_limits(config)?, unit));
            }
        }
        Err(ConversionError::InvalidExponent(format!(
            "cannot raise {} to a non-integer power",
            self.unit.symbol
        )))
    }

    pub fn neg(&self) -> Quantity {
        Quantity::new(self.value.neg(), self.unit.clone())
    }

    /// Square root; the unit must have whole square roots of its components
    pub fn sqrt(&self, config: &NumericConfig) -> Result<Quantity, ConversionError> {
        let unit = self.unit.root(2, config)?;
        let value = self.value.sqrt(config.precision)?;
        Ok(Quantity::new(value, unit))
    }

    /// Compare after expressing the right operand in the left's unit; offset
    /// temperatures compare as absolute values (0 degC == 32 degF)
    pub fn equals(&self, other: &Quantity, config: &NumericConfig) -> Result<bool, ConversionError> {
        Unit::combine(UnitOp::Equals, &self.unit, &other.unit)?;
        if self.has_offset_unit(other) {
            return Ok(self
                .si_value()
                .approx_eq(&other.si_value(), config.equality_tolerance_exp));
        }
        let converted = other.rescale_to(&self.unit)?;
        Ok(self.value.approx_eq(&converted, config.equality_tolerance_exp))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other) && self.si_value() == other.si_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> NumericConfig {
        NumericConfig::default()
    }

    fn meter() -> Unit {
        Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length")
    }

    fn centimeter() -> Unit {
        Unit::new("cm", "centimeter", Dimension::LENGTH, Number::from_ratio(1, 100), "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", Dimension::TIME, Number::from_i64(1), "time")
    }

    fn q(n: i64, unit: Unit) -> Quantity {
        Quantity::new(Number::from_i64(n), unit)
    }

    #[test]
    fn test_add_converts_right_into_left_unit() {
        let sum = q(5, meter()).add(&q(300, centimeter()), &cfg()).unwrap();
        assert_eq!(sum.unit.symbol, "m");
        assert!(sum.value.is_exact());
        assert_eq!(sum.value, Number::from_i64(8));
    }

    #[test]
    fn test_add_incompatible() {
        let result = q(5, meter()).add(&q(3, second()), &cfg());
        assert!(matches!(result, Err(ConversionError::IncompatibleDimensions { .. })));
    }

    #[test]
    fn test_mul_same_dimension() {
        let area = q(5, meter()).mul(&q(3, meter()), &cfg()).unwrap();
        assert_eq!(area.value, Number::from_i64(15));
        assert_eq!(area.unit.symbol, "m^2");
        assert_eq!(area.dimension().name(), Some("area"));

        let mixed = q(2, meter()).mul(&q(50, centimeter()), &cfg()).unwrap();
        assert_eq!(mixed.unit.symbol, "m^2");
        assert_eq!(mixed.value, Number::from_i64(1));
    }

    #[test]
    fn test_div_folds_dimensionless() {
        let ratio = q(2, meter()).div(&q(50, centimeter()), &cfg()).unwrap();
        assert!(ratio.is_plain());
        assert_eq!(ratio.value, Number::from_i64(4));
    }

    #[test]
    fn test_div_by_zero() {
        let result = q(1, meter()).div(&Quantity::dimensionless(Number::from_i64(0)), &cfg());
        assert!(matches!(result, Err(ConversionError::NumberError(_))));
    }

    #[test]
    fn test_pow_integer() {
        let cube = q(2, meter()).pow(&Quantity::dimensionless(Number::from_i64(3)), &cfg()).unwrap();
        assert_eq!(cube.value, Number::from_i64(8));
        assert_eq!(cube.unit.symbol, "m^3");
        assert_eq!(cube.dimension(), Dimension::VOLUME);
    }

    #[test]
    fn test_pow_fractional_on_unit() {
        let area = q(9, meter()).mul(&q(1, meter()), &cfg()).unwrap();
        let half = Quantity::dimensionless(Number::from_ratio(1, 2));
        let side = area.pow(&half, &cfg()).unwrap();
        assert_eq!(side.unit.symbol, "m");
        assert_eq!(side.value, Number::from_i64(3));

        let bad = q(2, meter()).pow(&half, &cfg());
        assert!(matches!(bad, Err(ConversionError::InvalidExponent(_))));
    }

    #[test]
    fn test_pow_dimensioned_exponent() {
        let result = q(2, meter()).pow(&q(2, second()), &cfg());
        assert!(matches!(result, Err(ConversionError::InvalidExponent(_))));
    }

    #[test]
    fn test_equals() {
        assert!(q(1, meter()).equals(&q(100, centimeter()), &cfg()).unwrap());
        assert!(!q(1, meter()).equals(&q(99, centimeter()), &cfg()).unwrap());
        assert!(q(1, meter()).equals(&q(1, second()), &cfg()).is_err());
    }

    fn celsius() -> Unit {
        Unit::with_offset(
            "°C",
            "celsius",
            Dimension::TEMPERATURE,
            Number::from_i64(1),
            Number::from_str("273.15").unwrap(),
            "temperature",
        )
    }

    fn fahrenheit() -> Unit {
        Unit::with_offset(
            "°F",
            "fahrenheit",
            Dimension::TEMPERATURE,
            Number::from_ratio(5, 9),
            Number::from_ratio(45967, 180),
            "temperature",
        )
    }

    #[test]
    fn test_offset_temperatures_compare_absolutely() {
        assert!(q(0, celsius()).equals(&q(32, fahrenheit()), &cfg()).unwrap());
        assert!(q(0, celsius()).equals(&Quantity::new(Number::from_str("273.15").unwrap(), Unit::kelvin()), &cfg()).unwrap());
        assert!(q(100, celsius()).equals(&q(212, fahrenheit()), &cfg()).unwrap());
        assert!(!q(0, celsius()).equals(&q(0, fahrenheit()), &cfg()).unwrap());
    }

    #[test]
    fn test_offset_temperatures_add_in_kelvin() {
        let diff = q(20, celsius()).sub(&q(10, celsius()), &cfg()).unwrap();
        assert_eq!(diff.unit.symbol, "K");
        assert_eq!(diff.value, Number::from_i64(10));

        let warmer = q(10, celsius()).add(&q(10, Unit::kelvin()), &cfg()).unwrap();
        assert_eq!(warmer.unit.symbol, "K");
        assert_eq!(warmer.value, Number::from_str("293.15").unwrap());
    }

    #[test]
    fn test_unit_exponent_overflow() {
        let huge = q(1, meter()).pow(&Quantity::dimensionless(Number::from_i64(65536)), &cfg()).unwrap();
        let result = huge.pow(&Quantity::dimensionless(Number::from_i64(32768)), &cfg());
        assert!(matches!(result, Err(ConversionError::InvalidExponent(_))));

        let min = Quantity::dimensionless(Number::from_i64(i64::from(i32::MIN)));
        let tiny = q(1, meter()).pow(&min, &cfg()).unwrap();
        assert_eq!(tiny.unit.symbol, "1/m^2147483648");
        let result = tiny.pow(&Quantity::dimensionless(Number::from_i64(-1)), &cfg());
        assert!(matches!(result, Err(ConversionError::InvalidExponent(_))));
    }

    #[test]
    fn test_overflowing_magnitude() {
        let ten = Quantity::dimensionless(Number::from_i64(10));
        let result = ten.pow(&Quantity::dimensionless(Number::from_i64(10_000_000)), &cfg());
        assert!(matches!(result, Err(ConversionError::NumberError(crate::number::NumberError::Overflow))));
    }

    #[test]
    fn test_display() {
        assert_eq!(q(5, meter()).to_string(), "5 m");
        assert_eq!(Quantity::dimensionless(Number::from_ratio(1, 4)).to_string(), "0.25");
    }
}
