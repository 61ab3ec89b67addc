//! Unit representation with conversion factors and unit algebra

use crate::dimension::Dimension;
use crate::number::{Number, NumberError, NumericConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A unit with its dimension and conversion factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Display symbol (e.g., "m", "km/h", "m^2")
    pub symbol: String,
    /// Long name (e.g., "meter")
    pub name: String,
    pub dimension: Dimension,
    /// Factor to the SI unit (value_si = value * to_si_factor + to_si_offset)
    pub to_si_factor: Number,
    /// Offset for non-proportional units like temperature (Celsius, Fahrenheit)
    pub to_si_offset: Number,
    /// Category for organization (e.g., "length", "mass", "time")
    pub category: String,
    /// Named unit symbols and their exponents; the display symbol is built from these
    #[serde(default)]
    pub components: BTreeMap<String, i32>,
    /// Calendar length in months for month-based units (month=1, year=12)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_months: Option<i64>,
    /// Named ad-hoc base units (`apples`) and their exponents; each acts as
    /// its own dimension
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ad_hoc: BTreeMap<String, i32>,
}

/// Binary operations that combine the units of two operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOp {
    Add,
    Sub,
    Equals,
    Mul,
    Frac,
}

impl Unit {
    // ========== Construction ==========

    /// Create a new unit with proportional conversion (no offset)
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        category: &str,
    ) -> Self {
        let mut components = BTreeMap::new();
        if !symbol.is_empty() {
            components.insert(symbol.to_string(), 1);
        }
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            to_si_factor,
            to_si_offset: Number::from_i64(0),
            category: category.to_string(),
            components,
            calendar_months: None,
            ad_hoc: BTreeMap::new(),
        }
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        to_si_factor: Number,
        to_si_offset: Number,
        category: &str,
    ) -> Self {
        Unit {
            to_si_offset,
            ..Unit::new(symbol, name, dimension, to_si_factor, category)
        }
    }

    /// The empty unit of a plain number
    pub fn dimensionless() -> Self {
        Unit::new("", "", Dimension::DIMENSIONLESS, Number::from_i64(1), "dimensionless")
    }

    /// A base unit counting things called `name`, compatible only with itself
    pub fn ad_hoc(name: &str) -> Self {
        let mut unit = Unit::new(name, name, Dimension::DIMENSIONLESS, Number::from_i64(1), "ad hoc");
        unit.ad_hoc.insert(name.to_string(), 1);
        unit
    }

    /// Kelvin, the absolute scale offset temperatures are combined in
    pub fn kelvin() -> Self {
        Unit::new("K", "kelvin", Dimension::TEMPERATURE, Number::from_i64(1), "temperature")
    }

    /// Mark this unit as a calendar unit spanning `months`
    pub fn calendar(mut self, months: i64) -> Self {
        self.calendar_months = Some(months);
        self
    }

    // ========== Predicates ==========

    pub fn is_si_base(&self) -> bool {
        self.to_si_factor.is_one() && self.to_si_offset.is_zero()
    }

    /// Check if this unit has an offset (non-proportional conversion)
    pub fn has_offset(&self) -> bool {
        !self.to_si_offset.is_zero()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension && self.ad_hoc == other.ad_hoc
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless() && self.ad_hoc.is_empty()
    }

    /// Dimension name followed by any ad-hoc units (`length`, `apples`,
    /// `apples^2 length^-1`)
    pub fn describe_dimension(&self) -> String {
        if self.ad_hoc.is_empty() {
            return self.dimension.describe();
        }
        let mut parts: Vec<String> = self
            .ad_hoc
            .iter()
            .map(|(name, &e)| if e == 1 { name.clone() } else { format!("{}^{}", name, e) })
            .collect();
        if !self.dimension.is_dimensionless() {
            parts.push(self.dimension.describe());
        }
        parts.join(" ")
    }

    /// Dimensionless with no residual factor or symbol
    pub fn is_unity(&self) -> bool {
        self.is_dimensionless() && self.components.is_empty() && self.is_si_base()
    }

    pub fn is_calendar(&self) -> bool {
        self.calendar_months.is_some()
    }

    // ========== Conversion ==========

    /// Convert a value from this unit to SI base unit
    pub fn to_si(&self, value: &Number) -> Number {
        value.mul(&self.to_si_factor).add(&self.to_si_offset)
    }

    /// Convert a value from SI base unit to this unit
    pub fn from_si(&self, value_si: &Number) -> Result<Number, NumberError> {
        value_si.sub(&self.to_si_offset).checked_div(&self.to_si_factor)
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: &Number, target: &Unit) -> Result<Number, ConversionError> {
        self.ensure_compatible(target)?;
        Ok(target.from_si(&self.to_si(value))?)
    }

    /// Scale factor taking magnitudes in this unit to magnitudes in `target`,
    /// ignoring offsets
    pub fn factor_to(&self, target: &Unit) -> Result<Number, ConversionError> {
        self.ensure_compatible(target)?;
        Ok(self.to_si_factor.checked_div(&target.to_si_factor)?)
    }

    fn ensure_compatible(&self, other: &Unit) -> Result<(), ConversionError> {
        if self.is_compatible(other) {
            Ok(())
        } else {
            Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: other.symbol.clone(),
                from_dim: self.describe_dimension(),
                to_dim: other.describe_dimension(),
            })
        }
    }

    // ========== Unit Algebra ==========

    /// Result unit of `left op right`.
    ///
    /// Additive operations and comparison require identical dimensions and
    /// keep the left unit.
    pub fn combine(op: UnitOp, left: &Unit, right: &Unit) -> Result<Unit, ConversionError> {
        match op {
            UnitOp::Add | UnitOp::Sub | UnitOp::Equals => {
                left.ensure_compatible(right)?;
                Ok(left.clone())
            }
            UnitOp::Mul => left.multiply(right),
            UnitOp::Frac => left.divide(right),
        }
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Result<Unit, ConversionError> {
        if other.is_unity() {
            return Ok(self.clone());
        }
        if self.is_unity() {
            return Ok(other.clone());
        }
        let overflow = || self.exponent_overflow("*", other);
        Ok(Unit::derived(
            combine_exponents(&self.components, &other.components, i32::checked_add).ok_or_else(overflow)?,
            combine_exponents(&self.ad_hoc, &other.ad_hoc, i32::checked_add).ok_or_else(overflow)?,
            format!("{} {}", self.name, other.name),
            self.dimension.multiply(&other.dimension).ok_or_else(overflow)?,
            self.to_si_factor.mul(&other.to_si_factor),
        ))
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Result<Unit, ConversionError> {
        if other.is_unity() {
            return Ok(self.clone());
        }
        let factor = self.to_si_factor.checked_div(&other.to_si_factor)?;
        let overflow = || self.exponent_overflow("/", other);
        let name = if self.is_unity() {
            format!("per {}", other.name)
        } else {
            format!("{} per {}", self.name, other.name)
        };
        Ok(Unit::derived(
            combine_exponents(&self.components, &other.components, i32::checked_sub).ok_or_else(overflow)?,
            combine_exponents(&self.ad_hoc, &other.ad_hoc, i32::checked_sub).ok_or_else(overflow)?,
            name,
            self.dimension.divide(&other.dimension).ok_or_else(overflow)?,
            factor,
        ))
    }

    /// Raise unit to an integer power (e.g., m^2, s^-1)
    pub fn power(&self, exp: i32, config: &NumericConfig) -> Result<Unit, ConversionError> {
        if exp == 1 || self.is_unity() {
            return Ok(self.clone());
        }
        let overflow = || {
            ConversionError::InvalidExponent(format!("exponent overflow raising {} to {}", self.symbol, exp))
        };
        let components = scale_exponents(&self.components, exp).ok_or_else(overflow)?;
        let ad_hoc = scale_exponents(&self.ad_hoc, exp).ok_or_else(overflow)?;
        let dimension = self.dimension.power(exp).ok_or_else(overflow)?;
        let factor = self.to_si_factor.powi(i64::from(exp), config)?;
        Ok(Unit::derived(
            components,
            ad_hoc,
            format!("{} to the {}", self.name, exp),
            dimension,
            factor,
        ))
    }

    /// Integer root of a unit (e.g., sqrt(m^2) -> m); every component
    /// exponent must divide evenly
    pub fn root(&self, n: i32, config: &NumericConfig) -> Result<Unit, ConversionError> {
        if self.is_unity() {
            return Ok(self.clone());
        }
        let invalid = || ConversionError::InvalidExponent(format!("cannot take root {} of {}", n, self.symbol));
        let dimension = self.dimension.root(n).ok_or_else(invalid)?;
        let components = root_exponents(&self.components, n).ok_or_else(invalid)?;
        let ad_hoc = root_exponents(&self.ad_hoc, n).ok_or_else(invalid)?;
        let factor = if n == 2 {
            self.to_si_factor.sqrt(config.precision)?
        } else {
            self.to_si_factor
                .pow_real(&Number::from_ratio(1, i64::from(n)), config.precision)?
        };
        Ok(Unit::derived(
            components,
            ad_hoc,
            format!("root {} of {}", n, self.name),
            dimension,
            factor,
        ))
    }

    fn exponent_overflow(&self, op: &str, other: &Unit) -> ConversionError {
        ConversionError::InvalidExponent(format!("exponent overflow in {} {} {}", self.symbol, op, other.symbol))
    }

    fn derived(
        components: BTreeMap<String, i32>,
        ad_hoc: BTreeMap<String, i32>,
        name: String,
        dimension: Dimension,
        to_si_factor: Number,
    ) -> Unit {
        let category = match dimension.name() {
            Some(named) if ad_hoc.is_empty() => named,
            _ => "derived",
        }
        .to_string();
        Unit {
            symbol: compose_symbol(&components),
            name,
            dimension,
            to_si_factor,
            to_si_offset: Number::from_i64(0),
            category,
            components,
            calendar_months: None,
            ad_hoc,
        }
    }
}

/// Merge two exponent maps with `op`, dropping zeros; `None` on overflow
fn combine_exponents(
    left: &BTreeMap<String, i32>,
    right: &BTreeMap<String, i32>,
    op: fn(i32, i32) -> Option<i32>,
) -> Option<BTreeMap<String, i32>> {
    let mut merged = left.clone();
    for (symbol, &exp) in right {
        let slot = merged.entry(symbol.clone()).or_insert(0);
        *slot = op(*slot, exp)?;
    }
    merged.retain(|_, exp| *exp != 0);
    Some(merged)
}

fn scale_exponents(map: &BTreeMap<String, i32>, exp: i32) -> Option<BTreeMap<String, i32>> {
    let mut scaled = BTreeMap::new();
    for (symbol, &e) in map {
        let e = e.checked_mul(exp)?;
        if e != 0 {
            scaled.insert(symbol.clone(), e);
        }
    }
    Some(scaled)
}

fn root_exponents(map: &BTreeMap<String, i32>, n: i32) -> Option<BTreeMap<String, i32>> {
    let mut rooted = BTreeMap::new();
    for (symbol, &e) in map {
        if e.checked_rem(n)? != 0 {
            return None;
        }
        rooted.insert(symbol.clone(), e.checked_div(n)?);
    }
    Some(rooted)
}

/// Build a display symbol from component exponents: `kg·m/s^2`, `1/s`
pub fn compose_symbol(components: &BTreeMap<String, i32>) -> String {
    fn term(symbol: &str, exp: u32) -> String {
        if exp == 1 {
            symbol.to_string()
        } else {
            format!("{}^{}", symbol, exp)
        }
    }

    let numerator: Vec<String> = components
        .iter()
        .filter(|(_, &e)| e > 0)
        .map(|(s, &e)| term(s, e.unsigned_abs()))
        .collect();
    let denominator: Vec<String> = components
        .iter()
        .filter(|(_, &e)| e < 0)
        .map(|(s, &e)| term(s, e.unsigned_abs()))
        .collect();

    match (numerator.is_empty(), denominator.is_empty()) {
        (true, true) => String::new(),
        (false, true) => numerator.join("·"),
        (true, false) => format!("1/{}", denominator.join("·")),
        (false, false) => format!("{}/{}", numerator.join("·"), denominator.join("·")),
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur during unit algebra and conversion
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    #[error(
        "cannot combine {from} ({}) with {to} ({}): incompatible dimensions",
        .from_dim,
        .to_dim
    )]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: String,
        to_dim: String,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("invalid unit exponent: {0}")]
    InvalidExponent(String),

    #[error("numeric error: {0}")]
    NumberError(#[from] NumberError),
}
