//! Date and time values
//!
//! Nanosecond instants since the Unix epoch with an optional UTC offset.
//! Calendar fields come from the Gregorian proleptic calendar (Howard
//! Hinnant's civil algorithms) evaluated in the value's own offset.
//! Durations are ordinary time quantities; calendar units (month, year)
//! shift by calendar months with day-of-month clamping.

use crate::dimension::Dimension;
use crate::number::Number;
use crate::quantity::Quantity;
use crate::unit::Unit;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

pub const NANOS_PER_SECOND: i128 = 1_000_000_000;
pub const NANOS_PER_MINUTE: i128 = 60 * NANOS_PER_SECOND;
pub const NANOS_PER_HOUR: i128 = 60 * NANOS_PER_MINUTE;
pub const NANOS_PER_DAY: i128 = 24 * NANOS_PER_HOUR;

/// Days in each month (non-leap year)
const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days from 0000-03-01 to 1970-01-01
const UNIX_EPOCH_DAYS: i64 = 719_468;

/// Supported calendar years
const MIN_YEAR: i64 = -999_999;
const MAX_YEAR: i64 = 999_999;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

// ============================================================================
// QuantaDateTime
// ============================================================================

/// An instant with nanosecond precision
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuantaDateTime {
    /// Nanoseconds since 1970-01-01T00:00:00Z
    nanos: i128,
    /// Offset from UTC in seconds (None = UTC)
    tz_offset: Option<i32>,
}

impl QuantaDateTime {
    // ========== Construction ==========

    pub fn from_nanos(nanos: i128) -> Self {
        Self { nanos, tz_offset: None }
    }

    /// Midnight UTC of the given date
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateTimeError> {
        Self::from_ymd_hms_nano(year, month, day, 0, 0, 0, 0)
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, DateTimeError> {
        Self::from_ymd_hms_nano(year, month, day, hour, minute, second, 0)
    }

    /// Create a UTC datetime from components with nanoseconds
    pub fn from_ymd_hms_nano(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
    ) -> Result<Self, DateTimeError> {
        validate_date(year, month, day)?;
        let time = time_of_day_nanos(hour, minute, second, nano)?;
        let days = days_from_civil(year, month, day);
        Ok(Self::from_nanos(i128::from(days) * NANOS_PER_DAY + time))
    }

    /// Wall-clock components read in the given UTC offset
    pub fn from_local(
        year: i32,
        month: u32,
        day: u32,
        time: (u32, u32, u32, u32),
        tz_offset: Option<i32>,
    ) -> Result<Self, DateTimeError> {
        let (hour, minute, second, nano) = time;
        let local = Self::from_ymd_hms_nano(year, month, day, hour, minute, second, nano)?;
        let offset = i128::from(tz_offset.unwrap_or(0)) * NANOS_PER_SECOND;
        Ok(Self {
            nanos: local.nanos - offset,
            tz_offset,
        })
    }

    /// Current UTC time from the system clock
    pub fn now() -> Self {
        let duration = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_nanos(duration.as_nanos() as i128)
    }

    // ========== Accessors ==========

    pub fn as_nanos(&self) -> i128 {
        self.nanos
    }

    pub fn as_unix_secs(&self) -> i64 {
        self.nanos.div_euclid(NANOS_PER_SECOND) as i64
    }

    pub fn tz_offset(&self) -> Option<i32> {
        self.tz_offset
    }

    /// Same instant, fields read in another offset
    pub fn with_tz_offset(mut self, offset_secs: i32) -> Self {
        self.tz_offset = Some(offset_secs);
        self
    }

    /// Nanoseconds of the wall clock in this value's offset
    fn local_nanos(&self) -> i128 {
        self.nanos + i128::from(self.tz_offset.unwrap_or(0)) * NANOS_PER_SECOND
    }

    pub fn year(&self) -> i32 {
        self.to_ymd().0
    }

    /// Month (1-12)
    pub fn month(&self) -> u32 {
        self.to_ymd().1
    }

    /// Day of month (1-31)
    pub fn day(&self) -> u32 {
        self.to_ymd().2
    }

    pub fn hour(&self) -> u32 {
        (self.local_nanos().rem_euclid(NANOS_PER_DAY) / NANOS_PER_HOUR) as u32
    }

    pub fn minute(&self) -> u32 {
        (self.local_nanos().rem_euclid(NANOS_PER_HOUR) / NANOS_PER_MINUTE) as u32
    }

    pub fn second(&self) -> u32 {
        (self.local_nanos().rem_euclid(NANOS_PER_MINUTE) / NANOS_PER_SECOND) as u32
    }

    pub fn nanosecond(&self) -> u32 {
        self.local_nanos().rem_euclid(NANOS_PER_SECOND) as u32
    }

    /// Day of week (1=Monday, 7=Sunday, ISO 8601)
    pub fn weekday(&self) -> u32 {
        let days = self.local_nanos().div_euclid(NANOS_PER_DAY);
        // 1970-01-01 was a Thursday
        (days + 3).rem_euclid(7) as u32 + 1
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAY_NAMES[(self.weekday() - 1) as usize]
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month() - 1) as usize]
    }

    /// Day of year (1-366)
    pub fn day_of_year(&self) -> u32 {
        let (year, month, day) = self.to_ymd();
        (1..month).map(|m| days_in_month(year, m)).sum::<u32>() + day
    }

    /// ISO week number (1-53)
    pub fn iso_week(&self) -> u32 {
        let year = self.year();
        let thursday = self.day_of_year() as i32 + 4 - self.weekday() as i32;
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if thursday < 1 {
            return Self::from_ymd(year - 1, 12, 28).map(|dt| dt.iso_week()).unwrap_or(52);
        }
        if thursday > days_in_year {
            return 1;
        }
        ((thursday - 1) / 7 + 1) as u32
    }

    /// Decompose into year, month, day
    pub fn to_ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.local_nanos().div_euclid(NANOS_PER_DAY) as i64)
    }

    /// Midnight of the same local day
    pub fn start_of_day(&self) -> Self {
        let local = self.local_nanos();
        Self {
            nanos: self.nanos - local.rem_euclid(NANOS_PER_DAY),
            tz_offset: self.tz_offset,
        }
    }

    /// The same local day at the given wall-clock time
    pub fn at_time(&self, hour: u32, minute: u32, second: u32, nano: u32) -> Result<Self, DateTimeError> {
        let time = time_of_day_nanos(hour, minute, second, nano)?;
        Ok(Self {
            nanos: self.start_of_day().nanos + time,
            tz_offset: self.tz_offset,
        })
    }

    // ========== Arithmetic ==========

    pub fn add_nanos(&self, nanos: i128) -> Result<Self, DateTimeError> {
        let shifted = self.nanos.checked_add(nanos).ok_or(DateTimeError::Overflow)?;
        if shifted.unsigned_abs() > max_nanos() {
            return Err(DateTimeError::Overflow);
        }
        let result = Self {
            nanos: shifted,
            tz_offset: self.tz_offset,
        };
        if !(MIN_YEAR..=MAX_YEAR).contains(&i64::from(result.year())) {
            return Err(DateTimeError::Overflow);
        }
        Ok(result)
    }

    pub fn add_days(&self, days: i64) -> Result<Self, DateTimeError> {
        self.add_nanos(i128::from(days) * NANOS_PER_DAY)
    }

    /// Add calendar months; the day is clamped to the target month
    /// (Jan 31 + 1 month = Feb 28/29)
    pub fn add_months(&self, months: i64) -> Result<Self, DateTimeError> {
        let (year, month, day) = self.to_ymd();
        let total = i64::from(year)
            .checked_mul(12)
            .and_then(|t| t.checked_add(i64::from(month) - 1))
            .and_then(|t| t.checked_add(months))
            .ok_or(DateTimeError::Overflow)?;
        let new_year = total.div_euclid(12);
        if !(MIN_YEAR..=MAX_YEAR).contains(&new_year) {
            return Err(DateTimeError::Overflow);
        }
        let new_year = new_year as i32;
        let new_month = (total.rem_euclid(12) + 1) as u32;
        let new_day = day.min(days_in_month(new_year, new_month));

        let time = self.local_nanos().rem_euclid(NANOS_PER_DAY);
        let local = i128::from(days_from_civil(new_year, new_month, new_day)) * NANOS_PER_DAY + time;
        Ok(Self {
            nanos: local - i128::from(self.tz_offset.unwrap_or(0)) * NANOS_PER_SECOND,
            tz_offset: self.tz_offset,
        })
    }

    pub fn add_years(&self, years: i64) -> Result<Self, DateTimeError> {
        self.add_months(years.checked_mul(12).ok_or(DateTimeError::Overflow)?)
    }

    /// Shift by a time quantity. Whole counts of calendar units go through
    /// `add_months`; everything else is converted to seconds and applied
    /// exactly to the nanosecond.
    pub fn add_quantity(&self, amount: &Quantity) -> Result<Self, DateTimeError> {
        if amount.dimension() != Dimension::TIME || !amount.unit.ad_hoc.is_empty() {
            return Err(DateTimeError::NotADuration(amount.unit.symbol.clone()));
        }
        if let Some(months) = amount.unit.calendar_months {
            if amount.value.is_integer() {
                let count = amount.value.to_i64().ok_or(DateTimeError::Overflow)?;
                return self.add_months(count.checked_mul(months).ok_or(DateTimeError::Overflow)?);
            }
        }
        let seconds = amount.si_value().to_rational().ok_or(DateTimeError::Overflow)?;
        let nanos = (seconds * BigRational::from_integer(BigInt::from(NANOS_PER_SECOND)))
            .round()
            .to_integer()
            .to_i128()
            .ok_or(DateTimeError::Overflow)?;
        self.add_nanos(nanos)
    }

    pub fn sub_quantity(&self, amount: &Quantity) -> Result<Self, DateTimeError> {
        self.add_quantity(&amount.neg())
    }

    /// Exact elapsed time `self - other` in seconds
    pub fn difference(&self, other: &QuantaDateTime) -> Quantity {
        let seconds = BigRational::new(
            BigInt::from(self.nanos - other.nanos),
            BigInt::from(NANOS_PER_SECOND),
        );
        Quantity::new(Number::from_rational(seconds), second_unit())
    }

    // ========== Formatting ==========

    /// ISO 8601 text; fractional seconds only when present
    pub fn to_iso_string(&self) -> String {
        let (year, month, day) = self.to_ymd();
        let mut out = format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            year,
            month,
            day,
            self.hour(),
            self.minute(),
            self.second()
        );
        let nano = self.nanosecond();
        if nano != 0 {
            let frac = format!("{:09}", nano);
            out.push('.');
            out.push_str(frac.trim_end_matches('0'));
        }
        match self.tz_offset {
            None | Some(0) => out.push('Z'),
            Some(offset) => {
                let sign = if offset < 0 { '-' } else { '+' };
                let abs = offset.unsigned_abs();
                out.push_str(&format!("{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60));
            }
        }
        out
    }

    /// Format with a pattern
    ///
    /// Supported tokens:
    /// - YYYY / YY: year
    /// - MMMM: month name, MM / M: month number
    /// - dddd: weekday name
    /// - DDD: day of year (001-366), DD / D: day of month
    /// - HH / H: hour (24h), hh / h: hour (12h)
    /// - mm / m: minute, ss / s: second, SSS: milliseconds
    /// - A / a: AM/PM, am/pm
    /// - W: ISO week
    pub fn format(&self, pattern: &str) -> String {
        const TOKENS: [&str; 21] = [
            "YYYY", "MMMM", "dddd", "DDD", "SSS", "YY", "MM", "DD", "HH", "hh", "mm", "ss", "M",
            "D", "H", "h", "m", "s", "A", "a", "W",
        ];

        let (year, month, day) = self.to_ymd();
        let hour = self.hour();
        let hour12 = match hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };

        let mut out = String::new();
        let mut rest = pattern;
        while !rest.is_empty() {
            let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) else {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
                continue;
            };
            let text = match *token {
                "YYYY" => format!("{:04}", year),
                "YY" => format!("{:02}", year.rem_euclid(100)),
                "MMMM" => self.month_name().to_string(),
                "MM" => format!("{:02}", month),
                "M" => month.to_string(),
                "dddd" => self.weekday_name().to_string(),
                "DDD" => format!("{:03}", self.day_of_year()),
                "DD" => format!("{:02}", day),
                "D" => day.to_string(),
                "HH" => format!("{:02}", hour),
                "H" => hour.to_string(),
                "hh" => format!("{:02}", hour12),
                "h" => hour12.to_string(),
                "mm" => format!("{:02}", self.minute()),
                "m" => self.minute().to_string(),
                "ss" => format!("{:02}", self.second()),
                "s" => self.second().to_string(),
                "SSS" => format!("{:03}", self.nanosecond() / 1_000_000),
                "A" => (if hour < 12 { "AM" } else { "PM" }).to_string(),
                "a" => (if hour < 12 { "am" } else { "pm" }).to_string(),
                _ => self.iso_week().to_string(),
            };
            out.push_str(&text);
            rest = &rest[token.len()..];
        }
        out
    }
}

impl fmt::Display for QuantaDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_iso_string())
    }
}

impl Serialize for QuantaDateTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for QuantaDateTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn second_unit() -> Unit {
    Unit::new("s", "second", Dimension::TIME, Number::from_i64(1), "time")
}

fn max_nanos() -> u128 {
    // Comfortably past year ±999999
    (MAX_YEAR as u128 + 1) * 366 * NANOS_PER_DAY as u128
}

// ============================================================================
// DateTimeError
// ============================================================================

/// Errors that can occur with datetime operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid day: {day} for {year}-{month:02}")]
    InvalidDay { day: u32, month: u32, year: i32 },

    #[error("Invalid hour: {0} (must be 0-23)")]
    InvalidHour(u32),

    #[error("Invalid minute: {0} (must be 0-59)")]
    InvalidMinute(u32),

    #[error("Invalid second: {0} (must be 0-59)")]
    InvalidSecond(u32),

    #[error("Invalid nanosecond: {0}")]
    InvalidNano(u32),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Date out of range")]
    Overflow,

    #[error("Cannot shift a date by {0}: not a time quantity")]
    NotADuration(String),
}

// ============================================================================
// Calendar Utilities (Gregorian proleptic)
// ============================================================================

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        1..=12 => DAYS_IN_MONTH[(month - 1) as usize],
        _ => 0,
    }
}

fn validate_date(year: i32, month: u32, day: u32) -> Result<(), DateTimeError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&i64::from(year)) {
        return Err(DateTimeError::Overflow);
    }
    if !(1..=12).contains(&month) {
        return Err(DateTimeError::InvalidMonth(month));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeError::InvalidDay { day, month, year });
    }
    Ok(())
}

fn time_of_day_nanos(hour: u32, minute: u32, second: u32, nano: u32) -> Result<i128, DateTimeError> {
    if hour > 23 {
        return Err(DateTimeError::InvalidHour(hour));
    }
    if minute > 59 {
        return Err(DateTimeError::InvalidMinute(minute));
    }
    if second > 59 {
        return Err(DateTimeError::InvalidSecond(second));
    }
    if nano >= 1_000_000_000 {
        return Err(DateTimeError::InvalidNano(nano));
    }
    Ok(i128::from(hour) * NANOS_PER_HOUR
        + i128::from(minute) * NANOS_PER_MINUTE
        + i128::from(second) * NANOS_PER_SECOND
        + i128::from(nano))
}

/// Civil date to days since Unix epoch
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146097 + doe - UNIX_EPOCH_DAYS
}

/// Days since Unix epoch to civil date
/// Algorithm from Howard Hinnant: http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + UNIX_EPOCH_DAYS;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = z - era * 146097; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1; // [1, 31]
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // [1, 12]
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m as u32, d as u32)
}

// ============================================================================
// Parsing
// ============================================================================

impl QuantaDateTime {
    /// Parse an ISO 8601 style datetime
    ///
    /// Supported formats:
    /// - 2025-06-15
    /// - 2025-06-15T14:30, 2025-06-15 14:30
    /// - 2025-06-15T14:30:00Z
    /// - 2025-06-15T14:30:00+05:30
    /// - 2025-06-15T14:30:00.123Z
    pub fn parse(s: &str) -> Result<Self, DateTimeError> {
        let s = s.trim();
        let split = s.find(|c| c == 'T' || c == ' ');
        let (date_part, time_part) = match split {
            Some(pos) => (&s[..pos], Some(s[pos + 1..].trim())),
            None => (s, None),
        };

        let (year, month, day) = parse_date_part(date_part)?;
        match time_part {
            None => Self::from_ymd(year, month, day),
            Some(time_part) => {
                let (time_str, tz_offset) = extract_timezone(time_part)?;
                let time = parse_time_of_day(time_str)?;
                Self::from_local(year, month, day, time, tz_offset)
            }
        }
    }
}

fn parse_field<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, DateTimeError> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateTimeError::ParseError(format!("Invalid {}: '{}'", what, s)));
    }
    s.parse()
        .map_err(|_| DateTimeError::ParseError(format!("Invalid {}: '{}'", what, s)))
}

/// `YYYY-MM-DD`, with an optional leading minus on the year
fn parse_date_part(s: &str) -> Result<(i32, u32, u32), DateTimeError> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let parts: Vec<&str> = body.split('-').collect();
    if parts.len() != 3 {
        return Err(DateTimeError::ParseError(format!("Expected YYYY-MM-DD, got '{}'", s)));
    }
    let year: i32 = parse_field(parts[0], "year")?;
    let month = parse_field(parts[1], "month")?;
    let day = parse_field(parts[2], "day")?;
    Ok((if negative { -year } else { year }, month, day))
}

/// `HH:MM[:SS[.fffffffff]]` into (hour, minute, second, nanosecond)
pub fn parse_time_of_day(s: &str) -> Result<(u32, u32, u32, u32), DateTimeError> {
    let (clock, nanos) = match s.split_once('.') {
        Some((clock, frac)) => (clock, parse_fractional_seconds(frac)?),
        None => (s, 0),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(DateTimeError::ParseError(format!("Expected HH:MM[:SS], got '{}'", s)));
    }
    let hour = parse_field(parts[0], "hour")?;
    let minute = parse_field(parts[1], "minute")?;
    let second = match parts.get(2) {
        Some(sec) => parse_field(sec, "second")?,
        None => 0,
    };
    time_of_day_nanos(hour, minute, second, nanos)?;
    Ok((hour, minute, second, nanos))
}

/// Split a trailing `Z` or `±HH:MM` offset from a time
fn extract_timezone(time_part: &str) -> Result<(&str, Option<i32>), DateTimeError> {
    if let Some(stripped) = time_part.strip_suffix('Z') {
        return Ok((stripped.trim_end(), Some(0)));
    }
    if let Some(pos) = time_part.rfind(|c| c == '+' || c == '-') {
        if pos >= 4 {
            let sign = if time_part[pos..].starts_with('-') { -1 } else { 1 };
            let offset = parse_tz_offset(&time_part[pos + 1..])?;
            return Ok((time_part[..pos].trim_end(), Some(sign * offset)));
        }
    }
    Ok((time_part, None))
}

fn parse_tz_offset(s: &str) -> Result<i32, DateTimeError> {
    let (hours, minutes) = match s.split_once(':') {
        Some((h, m)) => (h, m),
        None if s.len() == 4 => s.split_at(2),
        None => (s, "0"),
    };
    let hours: i32 = parse_field(hours, "timezone hours")?;
    let minutes: i32 = parse_field(minutes, "timezone minutes")?;
    if hours > 23 || minutes > 59 {
        return Err(DateTimeError::ParseError(format!("Invalid timezone offset: '{}'", s)));
    }
    Ok(hours * 3600 + minutes * 60)
}

fn parse_fractional_seconds(s: &str) -> Result<u32, DateTimeError> {
    let digits: String = s.chars().take(9).collect();
    let padded = format!("{:0<9}", digits);
    parse_field(&padded, "fractional seconds")
}
