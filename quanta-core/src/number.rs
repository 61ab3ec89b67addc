//! Dual exact/approximate numbers
//!
//! A `Number` is either an exact rational (num-rational `BigRational`) or an
//! approximate decimal (dashu-float `DBig`). Arithmetic stays exact as long as
//! every operand is exact and the result stays within the configured size;
//! transcendentals and oversized results fall back to the approximate side.

use dashu_float::ops::{Abs, SquareRoot};
use dashu_float::DBig;
use dashu_int::IBig;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Default precision for approximate calculations (decimal digits)
pub const DEFAULT_PRECISION: u32 = 50;

/// Largest decimal exponent accepted when parsing scientific notation
const MAX_PARSE_EXPONENT: i64 = 100_000;

/// Numeric limits and display thresholds
///
/// `max_exact_bits` is the exact→approximate threshold: an exact result whose
/// numerator or denominator needs more bits than this is demoted to an
/// approximate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Decimal digits carried by approximate arithmetic
    pub precision: u32,
    /// Max fractional digits of a terminating decimal shown as exact
    pub digit_budget: usize,
    /// Significant digits of the approximate text
    pub approx_digits: usize,
    pub max_exact_bits: u64,
    /// Fractions with a larger denominator are shown approximately
    pub max_fraction_denom: u64,
    /// Fractions with a larger numerator are shown approximately
    pub max_fraction_numer: u64,
    /// Exact integers or decimals with more integer digits also get approximate text
    pub max_exact_int_digits: usize,
    /// Largest decimal exponent (either sign) a result may reach before `OVERFLOW`
    pub max_decimal_exponent: u64,
    /// Relative tolerance for inexact equality is 10^-n
    pub equality_tolerance_exp: u32,
    /// Deepest expression tree the evaluator walks
    pub max_depth: usize,
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            digit_budget: 20,
            approx_digits: 12,
            max_exact_bits: 4096,
            max_fraction_denom: 1_000_000,
            max_fraction_numer: 1_000_000_000,
            max_exact_int_digits: 21,
            max_decimal_exponent: 100_000,
            equality_tolerance_exp: 12,
            max_depth: 256,
        }
    }
}

/// Renderer-facing view of a number
///
/// `numer`/`denom` are always present. At least one of `exact_value` and
/// `approx_value` is set. `approximate` marks a value that is not an exact
/// rational; `numer`/`denom` then hold its decimal significand over a power
/// of ten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericParts {
    pub numer: String,
    pub denom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_value: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub approximate: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl NumericParts {
    /// Parts for an integer literal
    pub fn integer(n: i64) -> Self {
        Self {
            numer: n.to_string(),
            denom: "1".to_string(),
            exact_value: Some(n.to_string()),
            approx_value: None,
            approximate: false,
        }
    }

    /// Parts for a literal fraction `numer/denom`
    pub fn fraction(numer: i64, denom: i64) -> Self {
        Self {
            numer: numer.to_string(),
            denom: denom.to_string(),
            exact_value: None,
            approx_value: None,
            approximate: false,
        }
    }

    /// The text a renderer shows first
    pub fn display(&self) -> &str {
        self.exact_value
            .as_deref()
            .or(self.approx_value.as_deref())
            .unwrap_or(self.numer.as_str())
    }
}

#[derive(Debug, Clone)]
enum Repr {
    Exact(BigRational),
    Approx(DBig),
}

/// Arbitrary precision number, exact while it can be
#[derive(Debug, Clone)]
pub struct Number {
    repr: Repr,
}

impl Number {
    // ========== Construction ==========

    fn exact(r: BigRational) -> Self {
        Self { repr: Repr::Exact(r) }
    }

    fn approx(d: DBig) -> Self {
        Self { repr: Repr::Approx(d) }
    }

    /// Create from string representation, always exact.
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = parse_decimal(num.trim()).ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            let den = parse_decimal(den.trim()).ok_or_else(|| NumberError::ParseError(s.to_string()))?;
            if den.is_zero() {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Self::exact(num / den));
        }
        parse_decimal(s)
            .map(Self::exact)
            .ok_or_else(|| NumberError::ParseError(s.to_string()))
    }

    /// Create from arbitrary precision numerator/denominator strings
    pub fn from_parts(numer: &str, denom: &str) -> Result<Self, NumberError> {
        let n: BigInt = numer
            .trim()
            .parse()
            .map_err(|_| NumberError::ParseError(numer.to_string()))?;
        let d: BigInt = denom
            .trim()
            .parse()
            .map_err(|_| NumberError::ParseError(denom.to_string()))?;
        if d.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(Self::exact(BigRational::new(n, d)))
    }

    /// Rebuild a number from the renderer view.
    ///
    /// Unless the parts are marked `approximate`, `numer`/`denom` win when
    /// they parse, so an exact rational shown only approximately comes back
    /// exact. The texts are fallbacks for unparsable integers.
    pub fn from_numeric_parts(parts: &NumericParts) -> Result<Self, NumberError> {
        let approx_text = || -> Result<Self, NumberError> {
            let text = parts
                .approx_value
                .as_deref()
                .ok_or_else(|| NumberError::ParseError(parts.numer.clone()))?;
            let d: DBig = text
                .trim()
                .parse()
                .map_err(|_| NumberError::ParseError(text.to_string()))?;
            Ok(Self::approx(with_precision(d, DEFAULT_PRECISION)))
        };

        if parts.approximate {
            if let Some(d) = decimal_from_parts(&parts.numer, &parts.denom) {
                return Ok(Self::approx(with_precision(d, DEFAULT_PRECISION)));
            }
            return match Self::from_parts(&parts.numer, &parts.denom) {
                Ok(n) => Ok(n.to_approx(DEFAULT_PRECISION)),
                Err(NumberError::DivisionByZero) => Err(NumberError::DivisionByZero),
                Err(_) => approx_text(),
            };
        }
        match Self::from_parts(&parts.numer, &parts.denom) {
            Ok(n) => Ok(n),
            Err(NumberError::DivisionByZero) => Err(NumberError::DivisionByZero),
            Err(e) => match &parts.exact_value {
                Some(text) => Self::from_str(text),
                None if parts.approx_value.is_some() => approx_text(),
                None => Err(e),
            },
        }
    }

    pub fn from_i64(n: i64) -> Self {
        Self::exact(BigRational::from_integer(BigInt::from(n)))
    }

    /// Create from ratio (exact division); a zero denominator gives zero
    pub fn from_ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return Self::from_i64(0);
        }
        Self::exact(BigRational::new(BigInt::from(num), BigInt::from(den)))
    }

    pub fn from_rational(r: BigRational) -> Self {
        Self::exact(r)
    }

    /// Exact `mantissa × 10^exp10` (`from_scaled(254, -4)` is 0.0254)
    pub fn from_scaled(mantissa: i64, exp10: i32) -> Self {
        let scale = BigInt::from(10).pow(exp10.unsigned_abs());
        let mantissa = BigInt::from(mantissa);
        if exp10 >= 0 {
            Self::exact(BigRational::from_integer(mantissa * scale))
        } else {
            Self::exact(BigRational::new(mantissa, scale))
        }
    }

    /// Approximate copy of this number at the given precision
    pub fn to_approx(&self, precision: u32) -> Self {
        Self::approx(self.to_dbig(precision))
    }

    // ========== Predicates ==========

    pub fn is_exact(&self) -> bool {
        matches!(self.repr, Repr::Exact(_))
    }

    pub fn is_zero(&self) -> bool {
        match &self.repr {
            Repr::Exact(r) => r.is_zero(),
            Repr::Approx(d) => *d == DBig::ZERO,
        }
    }

    pub fn is_one(&self) -> bool {
        match &self.repr {
            Repr::Exact(r) => r.is_one(),
            Repr::Approx(d) => *d == DBig::ONE,
        }
    }

    pub fn is_negative(&self) -> bool {
        match &self.repr {
            Repr::Exact(r) => r.is_negative(),
            Repr::Approx(d) => *d < DBig::ZERO,
        }
    }

    pub fn is_integer(&self) -> bool {
        match &self.repr {
            Repr::Exact(r) => r.is_integer(),
            Repr::Approx(d) => {
                let (significand, exponent) = d.clone().into_repr().into_parts();
                if exponent >= 0 || significand == IBig::ZERO {
                    return true;
                }
                let (_, digits) = signed_digits(&significand);
                let places = exponent.unsigned_abs();
                places <= digits.len() && digits[digits.len() - places..].bytes().all(|b| b == b'0')
            }
        }
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> Self {
        match (&self.repr, &other.repr) {
            (Repr::Exact(a), Repr::Exact(b)) => Self::exact(a + b),
            _ => Self::approx(&self.to_dbig(DEFAULT_PRECISION) + &other.to_dbig(DEFAULT_PRECISION)),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        match (&self.repr, &other.repr) {
            (Repr::Exact(a), Repr::Exact(b)) => Self::exact(a - b),
            _ => Self::approx(&self.to_dbig(DEFAULT_PRECISION) - &other.to_dbig(DEFAULT_PRECISION)),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        match (&self.repr, &other.repr) {
            (Repr::Exact(a), Repr::Exact(b)) => Self::exact(a * b),
            _ => Self::approx(&self.to_dbig(DEFAULT_PRECISION) * &other.to_dbig(DEFAULT_PRECISION)),
        }
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        Ok(match (&self.repr, &other.repr) {
            (Repr::Exact(a), Repr::Exact(b)) => Self::exact(a / b),
            _ => Self::approx(&self.to_dbig(DEFAULT_PRECISION) / &other.to_dbig(DEFAULT_PRECISION)),
        })
    }

    pub fn neg(&self) -> Self {
        match &self.repr {
            Repr::Exact(r) => Self::exact(-r.clone()),
            Repr::Approx(d) => Self::approx(-d.clone()),
        }
    }

    /// Demote an exact value whose numerator or denominator outgrew
    /// `max_exact_bits`, and reject magnitudes beyond `max_decimal_exponent`.
    pub fn within_limits(self, config: &NumericConfig) -> Result<Self, NumberError> {
        self.check_range(config)?;
        Ok(match &self.repr {
            Repr::Exact(r) if rational_bits(r) > config.max_exact_bits => {
                Self::approx(rational_to_dbig(r, config.precision))
            }
            _ => self,
        })
    }

    /// `Overflow` when the decimal exponent of the magnitude (10^n or
    /// 10^-n) exceeds `max_decimal_exponent`
    pub fn check_range(&self, config: &NumericConfig) -> Result<(), NumberError> {
        if self.decimal_exponent().unsigned_abs() > config.max_decimal_exponent {
            return Err(NumberError::Overflow);
        }
        Ok(())
    }

    /// Power of ten of the leading digit; exact values give a lower-bound
    /// estimate from their bit lengths
    fn decimal_exponent(&self) -> i64 {
        match &self.repr {
            Repr::Exact(r) => {
                let digits = |n: &BigInt| ((n.bits().saturating_sub(1)) as f64 * std::f64::consts::LOG10_2) as i64;
                digits(r.numer()) - digits(r.denom())
            }
            Repr::Approx(d) => {
                let (significand, exponent) = d.clone().into_repr().into_parts();
                let (_, digits) = signed_digits(&significand);
                exponent as i64 + digits.len() as i64 - 1
            }
        }
    }

    /// General power. Exact integer exponents keep exact bases exact;
    /// anything else goes through `exp(y * ln x)`.
    pub fn pow(&self, exp: &Self, config: &NumericConfig) -> Result<Self, NumberError> {
        if let Repr::Exact(e) = &exp.repr {
            if e.is_integer() {
                let e = e.to_integer().to_i64().ok_or(NumberError::Overflow)?;
                return self.powi(e, config);
            }
        }
        self.pow_real(exp, config.precision)
    }

    /// Integer power by repeated squaring
    pub fn powi(&self, exp: i64, config: &NumericConfig) -> Result<Self, NumberError> {
        if exp == 0 {
            return Ok(Self::from_i64(1));
        }
        if self.is_zero() {
            return if exp < 0 {
                Err(NumberError::DivisionByZero)
            } else {
                Ok(Self::from_i64(0))
            };
        }
        let abs_exp = exp.unsigned_abs();

        if let Repr::Exact(r) = &self.repr {
            let estimated_bits = rational_bits(r).saturating_mul(abs_exp);
            if estimated_bits <= config.max_exact_bits {
                let e = u32::try_from(abs_exp).map_err(|_| NumberError::Overflow)?;
                let numer = r.numer().pow(e);
                let denom = r.denom().pow(e);
                let result = if exp < 0 {
                    BigRational::new(denom, numer)
                } else {
                    BigRational::new(numer, denom)
                };
                return Ok(Self::exact(result));
            }
        }

        let base = self.to_dbig(config.precision);
        let mut result = with_precision(DBig::ONE, config.precision);
        let mut square = base;
        let mut remaining = abs_exp;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &square;
            }
            remaining >>= 1;
            if remaining > 0 {
                square = &square * &square;
            }
        }
        if exp < 0 {
            result = with_precision(DBig::ONE, config.precision) / result;
        }
        Ok(Self::approx(result))
    }

    /// Real-valued power: x^y = exp(y * ln(x)), always approximate
    pub fn pow_real(&self, exp: &Self, precision: u32) -> Result<Self, NumberError> {
        if exp.is_zero() {
            return Ok(Self::from_i64(1));
        }
        if self.is_zero() {
            return if exp.is_negative() {
                Err(NumberError::DivisionByZero)
            } else {
                Ok(Self::from_i64(0))
            };
        }
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "negative base with non-integer exponent".to_string(),
            ));
        }

        let ln_x = self.to_dbig(precision).ln();
        let product = &ln_x * &exp.to_dbig(precision);
        Ok(Self::approx(product.exp()))
    }

    // ========== Transcendental Functions ==========

    /// Square root, exact for perfect squares
    pub fn sqrt(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_negative() {
            return Err(NumberError::DomainError(
                "square root of negative number".to_string(),
            ));
        }
        if self.is_zero() {
            return Ok(Self::from_i64(0));
        }
        if let Repr::Exact(r) = &self.repr {
            let n = r.numer().sqrt();
            let d = r.denom().sqrt();
            if &(&n * &n) == r.numer() && &(&d * &d) == r.denom() {
                return Ok(Self::exact(BigRational::new(n, d)));
            }
        }
        Ok(Self::approx(self.to_dbig(precision).sqrt()))
    }

    /// Natural logarithm
    pub fn ln(&self, precision: u32) -> Result<Self, NumberError> {
        if self.is_zero() || self.is_negative() {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string(),
            ));
        }
        if self.is_exact() && self.is_one() {
            return Ok(Self::from_i64(0));
        }
        Ok(Self::approx(self.to_dbig(precision).ln()))
    }

    /// Exponential function (e^x)
    pub fn exp(&self, precision: u32) -> Self {
        if self.is_exact() && self.is_zero() {
            return Self::from_i64(1);
        }
        Self::approx(self.to_dbig(precision).exp())
    }

    /// Sine function (Taylor series)
    pub fn sin(&self, precision: u32) -> Self {
        if self.is_exact() && self.is_zero() {
            return Self::from_i64(0);
        }
        let x = self.to_dbig(precision);
        let x_squared = &x * &x;

        let mut sum = x.clone();
        let mut term = x;

        for k in 1..series_terms(precision) {
            let denom = DBig::from((2 * k) * (2 * k + 1));
            term = -&term * &x_squared / denom;
            sum = &sum + &term;
        }

        Self::approx(sum)
    }

    /// Cosine function (Taylor series)
    pub fn cos(&self, precision: u32) -> Self {
        if self.is_exact() && self.is_zero() {
            return Self::from_i64(1);
        }
        let x = self.to_dbig(precision);
        let x_squared = &x * &x;

        let one = with_precision(DBig::ONE, precision);
        let mut sum = one.clone();
        let mut term = one;

        for k in 1..series_terms(precision) {
            let denom = DBig::from((2 * k - 1) * (2 * k));
            term = -&term * &x_squared / denom;
            sum = &sum + &term;
        }

        Self::approx(sum)
    }

    /// Tangent function (sin/cos)
    pub fn tan(&self, precision: u32) -> Result<Self, NumberError> {
        let cos_x = self.cos(precision);
        if cos_x.is_zero() {
            return Err(NumberError::DomainError(
                "tan undefined at odd multiples of π/2".to_string(),
            ));
        }
        self.sin(precision).checked_div(&cos_x)
    }

    // ========== Mathematical Constants ==========

    /// Golden ratio φ = (1 + √5) / 2
    pub fn phi(precision: u32) -> Self {
        let sqrt5 = Self::from_i64(5)
            .sqrt(precision + 10)
            .unwrap_or_else(|_| Self::from_i64(2));
        Self::from_i64(1)
            .add(&sqrt5)
            .checked_div(&Self::from_i64(2))
            .unwrap_or_else(|_| Self::from_ratio(161803, 100000))
    }

    /// Pi - from high-precision string constant
    pub fn pi(precision: u32) -> Self {
        const PI_STR: &str = "3.14159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798214808651328230664709384460955058223172535940812848111745028410270193852110555964462294895493038196442881097566593344612847564823378678316527120190914564856692346034861045432664821339360726024914127372458700660631558817488152092096282925409171536436789259036001133053054882046652138414695194151160943305727036575959195309218611738193261179310511854807446237996274956735188575272489122793818301194912";

        let end_pos = (precision as usize + 2).min(PI_STR.len());
        Self::from_str(&PI_STR[..end_pos])
            .unwrap_or_else(|_| Self::from_ratio(355, 113))
            .to_approx(precision)
    }

    /// Euler's number e
    pub fn e(precision: u32) -> Self {
        Self::from_i64(1).to_approx(precision).exp(precision)
    }

    // ========== Rounding ==========

    pub fn abs(&self) -> Self {
        match &self.repr {
            Repr::Exact(r) => Self::exact(r.abs()),
            Repr::Approx(d) => Self::approx(Abs::abs(d.clone())),
        }
    }

    /// Largest integer <= x
    pub fn floor(&self) -> Self {
        match &self.repr {
            Repr::Exact(r) => Self::exact(r.floor()),
            Repr::Approx(d) => Self::approx(d.floor()),
        }
    }

    /// Smallest integer >= x
    pub fn ceil(&self) -> Self {
        match &self.repr {
            Repr::Exact(r) => Self::exact(r.ceil()),
            Repr::Approx(d) => Self::approx(d.ceil()),
        }
    }

    /// Nearest integer, halves away from zero
    pub fn round(&self) -> Self {
        match &self.repr {
            Repr::Exact(r) => Self::exact(r.round()),
            Repr::Approx(d) => {
                let half = DBig::from_parts(IBig::from(5), -1);
                if *d < DBig::ZERO {
                    Self::approx((d - &half).ceil())
                } else {
                    Self::approx((d + &half).floor())
                }
            }
        }
    }

    // ========== Conversion ==========

    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() || self.decimal_exponent() > 19 {
            return None;
        }
        self.to_rational()?.to_integer().to_i64()
    }

    /// Exact rational value; approximate numbers give their decimal
    /// expansion, or `None` when it would exceed 10^±100000
    pub fn to_rational(&self) -> Option<BigRational> {
        match &self.repr {
            Repr::Exact(r) => Some(r.clone()),
            Repr::Approx(d) => dbig_to_rational(d),
        }
    }

    /// The rational of an exact number
    pub fn as_rational(&self) -> Option<&BigRational> {
        match &self.repr {
            Repr::Exact(r) => Some(r),
            Repr::Approx(_) => None,
        }
    }

    fn to_dbig(&self, precision: u32) -> DBig {
        match &self.repr {
            Repr::Exact(r) => rational_to_dbig(r, precision),
            Repr::Approx(d) => with_precision(d.clone(), precision),
        }
    }

    /// Equality within a relative tolerance of 10^-`tolerance_exp`.
    /// Two exact numbers compare exactly.
    pub fn approx_eq(&self, other: &Self, tolerance_exp: u32) -> bool {
        if let (Repr::Exact(a), Repr::Exact(b)) = (&self.repr, &other.repr) {
            return a == b;
        }
        let a = self.to_dbig(DEFAULT_PRECISION);
        let b = other.to_dbig(DEFAULT_PRECISION);
        let diff = Abs::abs(&a - &b);
        let scale = if Abs::abs(a.clone()) > Abs::abs(b.clone()) {
            Abs::abs(a)
        } else {
            Abs::abs(b)
        };
        if scale == DBig::ZERO {
            return diff == DBig::ZERO;
        }
        let tolerance = DBig::from_parts(IBig::ONE, -(tolerance_exp as isize));
        diff <= &scale * &tolerance
    }

    // ========== Display ==========

    /// Renderer view: exact text when the value is exact and printable,
    /// approximate text otherwise or when the integer part is too long to
    /// read.
    pub fn to_parts(&self, config: &NumericConfig) -> NumericParts {
        match &self.repr {
            Repr::Exact(r) => {
                let numer = r.numer().to_string();
                let denom = r.denom().to_string();
                if let Some(decimal) = terminating_decimal(r, config.digit_budget) {
                    let int_digits = decimal
                        .trim_start_matches('-')
                        .split('.')
                        .next()
                        .map_or(0, str::len);
                    let approx_value = (int_digits > config.max_exact_int_digits)
                        .then(|| round_significant(r, config.approx_digits));
                    return NumericParts {
                        numer,
                        denom,
                        exact_value: Some(decimal),
                        approx_value,
                        approximate: false,
                    };
                }
                let approx = round_significant(r, config.approx_digits);
                let small = r.denom() <= &BigInt::from(config.max_fraction_denom)
                    && r.numer().abs() <= BigInt::from(config.max_fraction_numer);
                NumericParts {
                    exact_value: small.then(|| format!("{}/{}", numer, denom)),
                    numer,
                    denom,
                    approx_value: Some(approx),
                    approximate: false,
                }
            }
            Repr::Approx(d) => {
                let (significand, exponent) = d.clone().into_repr().into_parts();
                let (negative, digits) = signed_digits(&significand);
                let sign = if negative { "-" } else { "" };
                let zeros = "0".repeat(exponent.unsigned_abs());
                let (numer, denom) = if exponent >= 0 {
                    (format!("{}{}{}", sign, digits, zeros), "1".to_string())
                } else {
                    (format!("{}{}", sign, digits), format!("1{}", zeros))
                };
                let leading = exponent as i64 + digits.len() as i64 - 1;
                NumericParts {
                    numer,
                    denom,
                    exact_value: None,
                    approx_value: Some(format_digits(negative, &digits, leading, config.approx_digits)),
                    approximate: true,
                }
            }
        }
    }
}

// ========== Helpers ==========

fn with_precision(d: DBig, precision: u32) -> DBig {
    d.with_precision(precision.max(1) as usize).value()
}

fn series_terms(precision: u32) -> i64 {
    (precision / 3).clamp(12, 50) as i64
}

fn ten_pow(e: usize) -> BigInt {
    BigInt::from(10u32).pow(e as u32)
}

fn rational_bits(r: &BigRational) -> u64 {
    r.numer().bits().max(r.denom().bits())
}

fn bigint_to_ibig(n: &BigInt) -> IBig {
    n.to_string().parse().unwrap_or(IBig::ZERO)
}

fn ibig_to_bigint(n: &IBig) -> BigInt {
    n.to_string().parse().unwrap_or_else(|_| BigInt::zero())
}

fn rational_to_dbig(r: &BigRational, precision: u32) -> DBig {
    let numer = with_precision(DBig::from_parts(bigint_to_ibig(r.numer()), 0), precision);
    if r.denom().is_one() {
        return numer;
    }
    let denom = with_precision(DBig::from_parts(bigint_to_ibig(r.denom()), 0), precision);
    numer / denom
}

fn dbig_to_rational(d: &DBig) -> Option<BigRational> {
    let (significand, exponent) = d.clone().into_repr().into_parts();
    if exponent.unsigned_abs() as i64 > MAX_PARSE_EXPONENT {
        return None;
    }
    let significand = ibig_to_bigint(&significand);
    let scale = ten_pow(exponent.unsigned_abs());
    Some(if exponent >= 0 {
        BigRational::from_integer(significand * scale)
    } else {
        BigRational::new(significand, scale)
    })
}

/// `digits·10^k / 10^m` read straight into a decimal, without expanding
/// the zeros; `None` unless the denominator is a power of ten
fn decimal_from_parts(numer: &str, denom: &str) -> Option<DBig> {
    let denom = denom.trim().strip_prefix('1')?;
    if !denom.bytes().all(|b| b == b'0') {
        return None;
    }
    let numer = numer.trim();
    let significand = numer.trim_end_matches('0');
    let significand = if significand.is_empty() { "0" } else { significand };
    let trailing = numer.len() - significand.len().min(numer.len());
    let exponent = isize::try_from(trailing).ok()? - isize::try_from(denom.len()).ok()?;
    let significand: IBig = significand.parse().ok()?;
    Some(DBig::from_parts(significand, exponent))
}

/// Sign and decimal digits of a significand (`"0"` for zero)
fn signed_digits(n: &IBig) -> (bool, String) {
    let text = n.to_string();
    match text.strip_prefix('-') {
        Some(digits) => (true, digits.to_string()),
        None => (false, text),
    }
}

/// Parse an unsigned or signed decimal with optional exponent, exactly
fn parse_decimal(s: &str) -> Option<BigRational> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    let (mantissa, exponent) = match body.find(|c| c == 'e' || c == 'E') {
        Some(pos) => (&body[..pos], body[pos + 1..].parse::<i64>().ok()?),
        None => (body, 0),
    };
    if exponent.abs() > MAX_PARSE_EXPONENT {
        return None;
    }
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let digits: BigInt = format!("0{}{}", int_part, frac_part).parse().ok()?;
    let scale = exponent - frac_part.len() as i64;
    let magnitude = if scale >= 0 {
        BigRational::from_integer(digits * ten_pow(scale as usize))
    } else {
        BigRational::new(digits, ten_pow(scale.unsigned_abs() as usize))
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Decimal text of `r` if it terminates within `budget` fractional digits
fn terminating_decimal(r: &BigRational, budget: usize) -> Option<String> {
    let two = BigInt::from(2u32);
    let five = BigInt::from(5u32);
    let mut rest = r.denom().clone();
    let (mut twos, mut fives) = (0usize, 0usize);
    while (&rest % &two).is_zero() {
        rest = &rest / &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest = &rest / &five;
        fives += 1;
    }
    if !rest.is_one() {
        return None;
    }
    let places = twos.max(fives);
    if places > budget {
        return None;
    }
    let scaled = r.numer().abs() * ten_pow(places) / r.denom();
    let sign = if r.is_negative() { "-" } else { "" };
    Some(format!("{}{}", sign, insert_point(&scaled.to_string(), places)))
}

/// Place a decimal point `places` digits from the right of `digits`
fn insert_point(digits: &str, places: usize) -> String {
    if places == 0 {
        return digits.to_string();
    }
    let padded = if digits.len() <= places {
        format!("{}{}", "0".repeat(places - digits.len() + 1), digits)
    } else {
        digits.to_string()
    };
    let split = padded.len() - places;
    format!("{}.{}", &padded[..split], &padded[split..])
}

fn scale_by_ten(r: &BigRational, k: i64) -> BigRational {
    let factor = ten_pow(k.unsigned_abs() as usize);
    if k >= 0 {
        r * BigRational::from_integer(factor)
    } else {
        r / BigRational::from_integer(factor)
    }
}

/// Decimal text of `r` rounded to `digits` significant digits
fn round_significant(r: &BigRational, digits: usize) -> String {
    if r.is_zero() {
        return "0".to_string();
    }
    let digits = digits.max(1);
    let magnitude = r.abs();

    let numer_len = magnitude.numer().to_string().len() as i64;
    let denom_len = magnitude.denom().to_string().len() as i64;
    let mut exponent = numer_len - denom_len;
    if scale_by_ten(&magnitude, -exponent) < BigRational::one() {
        exponent -= 1;
    }

    let scaled = scale_by_ten(&magnitude, digits as i64 - 1 - exponent);
    let two = BigInt::from(2u32);
    let mut mantissa = (scaled.numer() * &two + scaled.denom()) / (scaled.denom() * &two);
    if mantissa == ten_pow(digits) {
        mantissa = ten_pow(digits - 1);
        exponent += 1;
    }
    layout_digits(r.is_negative(), &mantissa.to_string(), exponent)
}

/// Round a digit string whose leading digit sits at 10^`exponent` to `n`
/// significant digits, half up
fn format_digits(negative: bool, digits: &str, mut exponent: i64, n: usize) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return "0".to_string();
    }
    let n = n.max(1);
    if digits.len() <= n {
        return layout_digits(negative, digits, exponent);
    }
    let head: BigInt = digits[..n].parse().unwrap_or_default();
    let mut mantissa = if digits.as_bytes()[n] >= b'5' { head + 1 } else { head };
    if mantissa == ten_pow(n) {
        mantissa = ten_pow(n - 1);
        exponent += 1;
    }
    layout_digits(negative, &mantissa.to_string(), exponent)
}

/// Plain notation for 1e-7 < |x| < 1e21, scientific otherwise
fn layout_digits(negative: bool, text: &str, exponent: i64) -> String {
    let text = text.trim_end_matches('0');
    let text = if text.is_empty() { "0" } else { text };
    let sign = if negative { "-" } else { "" };

    if exponent > -7 && exponent < 21 {
        let (int_part, frac_part) = if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if int_len >= text.len() {
                (format!("{}{}", text, "0".repeat(int_len - text.len())), String::new())
            } else {
                (text[..int_len].to_string(), text[int_len..].to_string())
            }
        } else {
            let zeros = "0".repeat(exponent.unsigned_abs() as usize - 1);
            ("0".to_string(), format!("{}{}", zeros, text))
        };
        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    } else {
        let frac_part = &text[1..];
        if frac_part.is_empty() {
            format!("{}{}e{}", sign, &text[..1], exponent)
        } else {
            format!("{}{}.{}e{}", sign, &text[..1], frac_part, exponent)
        }
    }
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self.to_parts(&NumericConfig::default());
        write!(f, "{}", parts.display())
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_parts(&NumericConfig::default()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parts = NumericParts::deserialize(deserializer)?;
        Self::from_numeric_parts(&parts).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, NumericConfig::default().equality_tolerance_exp)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (&self.repr, &other.repr) {
            (Repr::Exact(a), Repr::Exact(b)) => Some(a.cmp(b)),
            _ => self
                .to_dbig(DEFAULT_PRECISION)
                .partial_cmp(&other.to_dbig(DEFAULT_PRECISION)),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl From<BigRational> for Number {
    fn from(r: BigRational) -> Self {
        Self::from_rational(r)
    }
}
