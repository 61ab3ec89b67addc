//! Dimension vectors
//!
//! Each quantity has dimensions represented as a 9-element vector:
//! [length, mass, time, current, temperature, amount, luminosity, currency, information]

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of base dimensions
pub const BASE_COUNT: usize = 9;

/// Dimension indices
pub const LENGTH: usize = 0;
pub const MASS: usize = 1;
pub const TIME: usize = 2;
pub const CURRENT: usize = 3;
pub const TEMPERATURE: usize = 4;
pub const AMOUNT: usize = 5;
pub const LUMINOSITY: usize = 6;
pub const CURRENCY: usize = 7;
pub const INFORMATION: usize = 8;

const BASE_SYMBOLS: [&str; BASE_COUNT] = ["L", "M", "T", "I", "Θ", "N", "J", "$", "B"];

const BASE_NAMES: [&str; BASE_COUNT] = [
    "length",
    "mass",
    "time",
    "current",
    "temperature",
    "amount",
    "luminosity",
    "currency",
    "information",
];

/// Exponents over the base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; BASE_COUNT],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::base_power(0, 0);

    /// Length dimension [L]
    pub const LENGTH: Dimension = Dimension::base_power(LENGTH, 1);

    /// Mass dimension [M]
    pub const MASS: Dimension = Dimension::base_power(MASS, 1);

    /// Time dimension [T]
    pub const TIME: Dimension = Dimension::base_power(TIME, 1);

    /// Electric current dimension [I]
    pub const CURRENT: Dimension = Dimension::base_power(CURRENT, 1);

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: Dimension = Dimension::base_power(TEMPERATURE, 1);

    /// Amount of substance dimension [N]
    pub const AMOUNT: Dimension = Dimension::base_power(AMOUNT, 1);

    /// Luminous intensity dimension [J]
    pub const LUMINOSITY: Dimension = Dimension::base_power(LUMINOSITY, 1);

    /// Money [$]
    pub const CURRENCY: Dimension = Dimension::base_power(CURRENCY, 1);

    /// Information [B]
    pub const INFORMATION: Dimension = Dimension::base_power(INFORMATION, 1);

    /// Velocity [L T^-1]
    pub const VELOCITY: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0, 0, 0]);

    /// Acceleration [L T^-2]
    pub const ACCELERATION: Dimension = Dimension::new([1, 0, -2, 0, 0, 0, 0, 0, 0]);

    /// Force [M L T^-2]
    pub const FORCE: Dimension = Dimension::new([1, 1, -2, 0, 0, 0, 0, 0, 0]);

    /// Energy [M L^2 T^-2]
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0, 0, 0]);

    /// Power [M L^2 T^-3]
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0, 0, 0]);

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0, 0, 0]);

    /// Area [L^2]
    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Volume [L^3]
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Frequency [T^-1]
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0, 0, 0]);

    /// Electric charge [I T]
    pub const CHARGE: Dimension = Dimension::new([0, 0, 1, 1, 0, 0, 0, 0, 0]);

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: Dimension = Dimension::new([2, 1, -3, -1, 0, 0, 0, 0, 0]);

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: Dimension = Dimension::new([2, 1, -3, -2, 0, 0, 0, 0, 0]);

    /// Illuminance [J L^-2]
    pub const ILLUMINANCE: Dimension = Dimension::new([-2, 0, 0, 0, 0, 0, 1, 0, 0]);

    /// Capacitance [M^-1 L^-2 T^4 I^2]
    pub const CAPACITANCE: Dimension = Dimension::new([-2, -1, 4, 2, 0, 0, 0, 0, 0]);

    /// Data rate [B T^-1]
    pub const DATA_RATE: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0, 0, 1]);

    pub const fn new(exponents: [i32; BASE_COUNT]) -> Self {
        Dimension { exponents }
    }

    const fn base_power(index: usize, exp: i32) -> Self {
        let mut exponents = [0i32; BASE_COUNT];
        exponents[index] = exp;
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Multiply dimensions (add exponents); `None` on exponent overflow
    pub fn multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_add)
    }

    /// Divide dimensions (subtract exponents); `None` on exponent overflow
    pub fn divide(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_sub)
    }

    /// Raise to integer power (multiply exponents); `None` on exponent overflow
    pub fn power(&self, exp: i32) -> Option<Dimension> {
        let mut result = self.exponents;
        for e in result.iter_mut() {
            *e = e.checked_mul(exp)?;
        }
        Some(Dimension { exponents: result })
    }

    /// Take an integer root; `None` unless every exponent divides evenly
    pub fn root(&self, n: i32) -> Option<Dimension> {
        let mut result = self.exponents;
        for e in result.iter_mut() {
            if e.checked_rem(n)? != 0 {
                return None;
            }
            *e = e.checked_div(n)?;
        }
        Some(Dimension { exponents: result })
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> Option<Dimension> {
        self.power(-1)
    }

    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut result = [0i32; BASE_COUNT];
        for (i, slot) in result.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i])?;
        }
        Some(Dimension { exponents: result })
    }

    /// Get the dimension name if it matches a named dimension
    pub fn name(&self) -> Option<&'static str> {
        if self.is_dimensionless() {
            return Some("dimensionless");
        }
        let nonzero: Vec<usize> = (0..BASE_COUNT).filter(|&i| self.exponents[i] != 0).collect();
        if let [single] = nonzero.as_slice() {
            if self.exponents[*single] == 1 {
                return Some(BASE_NAMES[*single]);
            }
        }
        match *self {
            Dimension::VELOCITY => Some("velocity"),
            Dimension::ACCELERATION => Some("acceleration"),
            Dimension::FORCE => Some("force"),
            Dimension::ENERGY => Some("energy"),
            Dimension::POWER => Some("power"),
            Dimension::PRESSURE => Some("pressure"),
            Dimension::AREA => Some("area"),
            Dimension::VOLUME => Some("volume"),
            Dimension::FREQUENCY => Some("frequency"),
            Dimension::CHARGE => Some("charge"),
            Dimension::VOLTAGE => Some("voltage"),
            Dimension::RESISTANCE => Some("resistance"),
            Dimension::DATA_RATE => Some("data rate"),
            _ => None,
        }
    }

    /// Named dimension, or the vector written out (`length^2 time^-1`)
    pub fn describe(&self) -> String {
        if let Some(name) = self.name() {
            return name.to_string();
        }
        let mut parts = Vec::new();
        for (i, &exp) in self.exponents.iter().enumerate() {
            match exp {
                0 => {}
                1 => parts.push(BASE_NAMES[i].to_string()),
                _ => parts.push(format!("{}^{}", BASE_NAMES[i], exp)),
            }
        }
        parts.join(" ")
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for (i, &exp) in self.exponents.iter().enumerate() {
            if exp == 1 {
                parts.push(BASE_SYMBOLS[i].to_string());
            } else if exp != 0 {
                parts.push(format!("{}^{}", BASE_SYMBOLS[i], exp));
            }
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
        assert!(!Dimension::CURRENCY.is_dimensionless());
    }

    #[test]
    fn test_divide() {
        let velocity = Dimension::LENGTH.divide(&Dimension::TIME).unwrap();
        assert_eq!(velocity, Dimension::VELOCITY);
    }

    #[test]
    fn test_force() {
        let force = Dimension::MASS.multiply(&Dimension::ACCELERATION).unwrap();
        assert_eq!(force, Dimension::FORCE);
    }

    #[test]
    fn test_power_and_root() {
        let area = Dimension::LENGTH.power(2).unwrap();
        assert_eq!(area, Dimension::AREA);
        assert_eq!(area.root(2), Some(Dimension::LENGTH));
        assert_eq!(Dimension::VOLUME.root(2), None);
        assert_eq!(Dimension::LENGTH.root(0), None);
    }

    #[test]
    fn test_exponent_overflow() {
        let huge = Dimension::LENGTH.power(65536).unwrap();
        assert_eq!(huge.power(32768), None);
        assert_eq!(huge.multiply(&Dimension::LENGTH.power(i32::MAX - 65535).unwrap()), None);
        assert_eq!(Dimension::LENGTH.power(i32::MIN).unwrap().invert(), None);
        assert_eq!(Dimension::LENGTH.power(i32::MIN).unwrap().divide(&Dimension::LENGTH), None);
        assert_eq!(Dimension::LENGTH.power(i32::MIN).unwrap().root(-1), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Dimension::AREA.name(), Some("area"));
        assert_eq!(Dimension::INFORMATION.name(), Some("information"));
        assert_eq!(Dimension::DATA_RATE.name(), Some("data rate"));
        assert_eq!(Dimension::ILLUMINANCE.name(), None);
        let tesseract = Dimension::LENGTH.power(4).unwrap();
        assert_eq!(tesseract.name(), None);
        assert_eq!(tesseract.describe(), "length^4");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dimension::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", Dimension::LENGTH), "L");
        assert_eq!(format!("{}", Dimension::VELOCITY), "L T^-1");
        assert_eq!(format!("{}", Dimension::CURRENCY.divide(&Dimension::MASS).unwrap()), "M^-1 $");
    }
}
