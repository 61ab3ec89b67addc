//! Unit string parsing - parse expressions like "km/h" or "m^2"

use quanta_core::{NumericConfig, QuantaError, Unit};
use crate::units::UNITS;

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Simple: "m", "kg", "kilometers"
/// - Powers: "m^2", "s^-1", "m²", "s⁻¹"
/// - Products: "m*s", "N·m", "kg m"
/// - Quotients: "m/s", "kg/m^2", "meters per second"
/// - Combined: "kg*m/s^2"
pub fn parse_unit(s: &str) -> Result<Unit, QuantaError> {
    let s = s.trim();

    if s.is_empty() || s == "1" {
        return Ok(Unit::dimensionless());
    }

    // Whole-string lookup first, so registered forms like "km/h" or "sq ft" win
    if let Some(unit) = UNITS.lookup(s) {
        return Ok(unit);
    }

    parse_unit_expression(&s.replace(" per ", "/"))
}

/// Parse a unit expression like "kg*m/s^2"; every '/' divides what precedes it
fn parse_unit_expression(s: &str) -> Result<Unit, QuantaError> {
    let mut parts = s.split('/');
    let mut result = parse_product(parts.next().unwrap_or_default())?;

    for part in parts {
        let denominator = parse_product(part)?;
        result = result.divide(&denominator)?;
    }

    Ok(result)
}

/// Parse a product of units like "kg*m" or "m^2 s"
fn parse_product(s: &str) -> Result<Unit, QuantaError> {
    let factors: Vec<&str> = s
        .split(|c| c == '*' || c == '·' || c == ' ')
        .filter(|p| !p.is_empty())
        .collect();

    let mut result = Unit::dimensionless();
    for factor in factors {
        if factor == "1" {
            continue;
        }
        result = result.multiply(&parse_power(factor)?)?;
    }
    Ok(result)
}

/// Parse a unit with optional power like "m^2", "s^-1" or "m³"
fn parse_power(s: &str) -> Result<Unit, QuantaError> {
    let config = NumericConfig::default();

    if let Some((base, exp_str)) = s.split_once('^') {
        let exponent: i32 = exp_str
            .trim()
            .parse()
            .map_err(|_| QuantaError::invalid_unit_exponent(format!("'{}' in {}", exp_str, s)))?;
        return Ok(UNITS.resolve(base)?.power(exponent, &config)?);
    }

    if let Some((base, exponent)) = split_superscript(s) {
        return Ok(UNITS.resolve(base)?.power(exponent, &config)?);
    }

    UNITS.resolve(s)
}

/// Split a trailing superscript exponent: "m²" -> ("m", 2), "s⁻¹" -> ("s", -1)
fn split_superscript(s: &str) -> Option<(&str, i32)> {
    let start = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| superscript_digit(*c).is_some() || *c == '⁻')
        .last()
        .map(|(i, _)| i)?;
    let (base, sup) = s.split_at(start);
    if base.is_empty() {
        return None;
    }

    let (negative, digits) = match sup.strip_prefix('⁻') {
        Some(rest) => (true, rest),
        None => (false, sup),
    };
    if digits.is_empty() {
        return None;
    }
    let mut value: i32 = 0;
    for c in digits.chars() {
        let digit = superscript_digit(c)?;
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some((base, if negative { -value } else { value }))
}

fn superscript_digit(c: char) -> Option<i32> {
    let digit = match c {
        '⁰' => 0,
        '¹' => 1,
        '²' => 2,
        '³' => 3,
        '⁴' => 4,
        '⁵' => 5,
        '⁶' => 6,
        '⁷' => 7,
        '⁸' => 8,
        '⁹' => 9,
        _ => return None,
    };
    Some(digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::{codes, Dimension, Number};

    #[test]
    fn test_parse_simple_unit() {
        let unit = parse_unit("m").unwrap();
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, Dimension::LENGTH);
    }

    #[test]
    fn test_parse_empty_is_dimensionless() {
        assert!(parse_unit("").unwrap().is_unity());
        assert!(parse_unit("1").unwrap().is_unity());
    }

    #[test]
    fn test_parse_unit_with_power() {
        let unit = parse_unit("m^2").unwrap();
        assert_eq!(unit.dimension, Dimension::AREA);
        assert_eq!(unit.symbol, "m^2");

        let unit = parse_unit("s^-1").unwrap();
        assert_eq!(unit.dimension, Dimension::FREQUENCY);
        assert_eq!(unit.symbol, "1/s");
    }

    #[test]
    fn test_parse_superscripts() {
        assert_eq!(parse_unit("cm³").unwrap().dimension, Dimension::VOLUME);
        assert_eq!(parse_unit("s⁻¹").unwrap().dimension, Dimension::FREQUENCY);
        assert_eq!(split_superscript("m¹²"), Some(("m", 12)));
        assert_eq!(split_superscript("²"), None);
    }

    #[test]
    fn test_parse_quotient() {
        let unit = parse_unit("m/s").unwrap();
        assert_eq!(unit.dimension, Dimension::VELOCITY);

        let unit = parse_unit("meters per second").unwrap();
        assert_eq!(unit.dimension, Dimension::VELOCITY);
        assert_eq!(unit.symbol, "m/s");
    }

    #[test]
    fn test_parse_product() {
        let unit = parse_unit("kg*m").unwrap();
        let expected = Dimension::MASS.multiply(&Dimension::LENGTH).unwrap();
        assert_eq!(unit.dimension, expected);
        assert_eq!(unit.symbol, "kg·m");
    }

    #[test]
    fn test_parse_complex() {
        let unit = parse_unit("kg*m/s^2").unwrap();
        assert_eq!(unit.dimension, Dimension::FORCE);
        assert_eq!(unit.symbol, "kg·m/s^2");

        let unit = parse_unit("m/s/s").unwrap();
        assert_eq!(unit.dimension, Dimension::ACCELERATION);
    }

    #[test]
    fn test_parse_keeps_exact_factor() {
        let unit = parse_unit("mi/h").unwrap();
        assert_eq!(unit.to_si_factor, Number::from_ratio(1_609_344, 3_600_000));
        assert!(unit.to_si_factor.is_exact());
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_unit("unknown_xyz").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);

        let err = parse_unit("m^x").unwrap_err();
        assert_eq!(err.code, codes::INVALID_UNIT_EXPONENT);
    }
}
