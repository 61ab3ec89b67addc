//! Quanta Core - Fundamental types
//!
//! This crate provides the core types used throughout Quanta:
//! - `Number`: exact rationals with an approximate decimal fallback
//! - `Dimension`, `Unit`, `Quantity`: dimensional analysis and unit algebra
//! - `QuantaDateTime`: instants and calendar arithmetic
//! - `Value`: runtime values (quantities, dates, text, booleans, errors)
//! - `QuantaError`: structured errors that flow through evaluation

mod datetime;
mod dimension;
mod error;
mod number;
mod quantity;
mod unit;
mod value;

pub use datetime::{
    days_in_month, is_leap_year, parse_time_of_day, DateTimeError, QuantaDateTime,
    NANOS_PER_DAY, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND,
};
pub use dimension::{Dimension, BASE_COUNT};
pub use error::{codes, ErrorContext, QuantaError, Severity};
pub use number::{Number, NumberError, NumericConfig, NumericParts, DEFAULT_PRECISION};
pub use quantity::Quantity;
pub use unit::{compose_symbol, ConversionError, Unit, UnitOp};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{
        Dimension, Number, NumericConfig, QuantaDateTime, QuantaError, Quantity, Severity, Unit,
        Value,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    mod number_tests {
        use super::*;

        fn cfg() -> NumericConfig {
            NumericConfig::default()
        }

        #[test]
        fn test_from_i64() {
            let n = Number::from_i64(42);
            assert_eq!(n.to_i64(), Some(42));
            assert!(n.is_exact());
        }

        #[test]
        fn test_from_str_decimal_is_exact() {
            let a = Number::from_str("0.1").unwrap();
            let b = Number::from_str("0.2").unwrap();
            let sum = a.add(&b);
            assert!(sum.is_exact());
            assert_eq!(sum.to_parts(&cfg()).exact_value.as_deref(), Some("0.3"));
        }

        #[test]
        fn test_from_str_forms() {
            assert_eq!(Number::from_str("1.5e3").unwrap().to_i64(), Some(1500));
            assert_eq!(Number::from_str("-42").unwrap().to_i64(), Some(-42));
            assert_eq!(Number::from_str("6/4").unwrap(), Number::from_ratio(3, 2));
            assert!(matches!(Number::from_str("1/0"), Err(NumberError::DivisionByZero)));
            assert!(matches!(Number::from_str("abc"), Err(NumberError::ParseError(_))));
            assert!(matches!(Number::from_str("1.2.3"), Err(NumberError::ParseError(_))));
        }

        #[test]
        fn test_from_parts() {
            let n = Number::from_parts("123456789012345678901234567890", "10").unwrap();
            assert!(n.is_exact());
            assert!(matches!(Number::from_parts("1", "0"), Err(NumberError::DivisionByZero)));
        }

        #[test]
        fn test_from_scaled() {
            assert_eq!(Number::from_scaled(254, -4), Number::from_ratio(127, 5000));
            assert_eq!(Number::from_scaled(3, 2), Number::from_i64(300));
            assert!(Number::from_scaled(667_430, -16).is_exact());
        }

        #[test]
        fn test_one_third_parts() {
            let third = Number::from_i64(1).checked_div(&Number::from_i64(3)).unwrap();
            let parts = third.to_parts(&cfg());
            assert_eq!(parts.numer, "1");
            assert_eq!(parts.denom, "3");
            assert_eq!(parts.exact_value.as_deref(), Some("1/3"));
            assert_eq!(parts.approx_value.as_deref(), Some("0.333333333333"));
        }

        #[test]
        fn test_terminating_decimal_has_no_approx() {
            let parts = Number::from_ratio(10, 4).to_parts(&cfg());
            assert_eq!(parts.exact_value.as_deref(), Some("2.5"));
            assert_eq!(parts.approx_value, None);

            let parts = Number::from_ratio(-1, 8).to_parts(&cfg());
            assert_eq!(parts.exact_value.as_deref(), Some("-0.125"));
        }

        #[test]
        fn test_large_denominator_is_approx_only() {
            let parts = Number::from_ratio(1, 1234567).to_parts(&cfg());
            assert_eq!(parts.exact_value, None);
            let approx = parts.approx_value.unwrap();
            assert!(approx.starts_with("8.1"), "got {}", approx);
            assert!(approx.ends_with("e-7"), "got {}", approx);
        }

        #[test]
        fn test_digit_budget_is_configurable() {
            let tiny = Number::from_ratio(1, 1 << 20);
            assert!(tiny.to_parts(&cfg()).exact_value.is_some());
            let strict = NumericConfig {
                digit_budget: 4,
                ..NumericConfig::default()
            };
            assert!(tiny.to_parts(&strict).exact_value.is_none());
        }

        #[test]
        fn test_division_by_zero() {
            let result = Number::from_i64(1).checked_div(&Number::from_i64(0));
            assert!(matches!(result, Err(NumberError::DivisionByZero)));
        }

        #[test]
        fn test_integer_power_is_exact() {
            let n = Number::from_i64(2).powi(10, &cfg()).unwrap();
            assert!(n.is_exact());
            assert_eq!(n.to_i64(), Some(1024));

            let quarter = Number::from_i64(2).powi(-2, &cfg()).unwrap();
            assert_eq!(quarter, Number::from_ratio(1, 4));

            let zero_inv = Number::from_i64(0).powi(-1, &cfg());
            assert!(matches!(zero_inv, Err(NumberError::DivisionByZero)));
        }

        #[test]
        fn test_fractional_power_is_approx() {
            let root2 = Number::from_i64(2).pow(&Number::from_ratio(1, 2), &cfg()).unwrap();
            assert!(!root2.is_exact());
            let approx = root2.to_parts(&cfg()).approx_value.unwrap();
            assert!(approx.starts_with("1.414213562"), "got {}", approx);

            let negative = Number::from_i64(-8).pow(&Number::from_ratio(1, 3), &cfg());
            assert!(matches!(negative, Err(NumberError::DomainError(_))));
        }

        #[test]
        fn test_oversized_result_degrades() {
            let huge = Number::from_i64(3).powi(10_000, &cfg()).unwrap();
            assert!(!huge.is_exact());

            let big = Number::from_i64(2).powi(5000, &NumericConfig {
                max_exact_bits: 100_000,
                ..NumericConfig::default()
            })
            .unwrap();
            assert!(big.is_exact());
            assert!(!big.clone().within_limits(&cfg()).unwrap().is_exact());
        }

        #[test]
        fn test_sqrt() {
            let four = Number::from_i64(16).sqrt(50).unwrap();
            assert!(four.is_exact());
            assert_eq!(four.to_i64(), Some(4));

            let quarter = Number::from_ratio(9, 4).sqrt(50).unwrap();
            assert_eq!(quarter, Number::from_ratio(3, 2));

            assert!(!Number::from_i64(2).sqrt(50).unwrap().is_exact());
            assert!(Number::from_i64(-1).sqrt(50).is_err());
        }

        #[test]
        fn test_equality_tolerance() {
            let exact = Number::from_ratio(1, 3);
            let approx = exact.to_approx(50);
            assert!(!approx.is_exact());
            assert_eq!(exact, approx);
            assert!(exact.approx_eq(&approx, 12));
            assert_ne!(Number::from_ratio(1, 3), Number::from_ratio(1, 3).add(&Number::from_ratio(1, 1_000_000)).to_approx(50));
        }

        #[test]
        fn test_ln_and_exp() {
            let ln_10 = Number::from_i64(10).ln(50).unwrap();
            let text = ln_10.to_parts(&cfg()).approx_value.unwrap();
            assert!(text.starts_with("2.30258509"), "got {}", text);

            let back = ln_10.exp(50);
            assert_eq!(back, Number::from_i64(10));

            assert!(Number::from_i64(0).ln(50).is_err());
            assert_eq!(Number::from_i64(1).ln(50).unwrap(), Number::from_i64(0));
        }

        #[test]
        fn test_trig() {
            let pi = Number::pi(50);
            let half_pi = pi.checked_div(&Number::from_i64(2)).unwrap();
            assert_eq!(half_pi.sin(50), Number::from_i64(1));
            assert!(Number::from_i64(0).sin(50).is_exact());
            assert_eq!(pi.cos(50), Number::from_i64(-1));
        }

        #[test]
        fn test_constants_display() {
            assert_eq!(Number::pi(50).to_string(), "3.14159265359");
            assert_eq!(Number::e(50).to_string(), "2.71828182846");
            assert_eq!(Number::phi(50).to_string(), "1.61803398875");
        }

        #[test]
        fn test_rounding() {
            let x = Number::from_ratio(7, 2);
            assert_eq!(x.floor().to_i64(), Some(3));
            assert_eq!(x.ceil().to_i64(), Some(4));
            assert_eq!(x.round().to_i64(), Some(4));
            assert_eq!(x.neg().round().to_i64(), Some(-4));
            assert_eq!(x.neg().abs(), x);
        }

        #[test]
        fn test_approx_scientific_display() {
            let big = Number::from_i64(10).powi(30, &cfg()).unwrap().to_approx(50);
            assert_eq!(big.to_parts(&cfg()).approx_value.as_deref(), Some("1e30"));
            let parts = big.to_parts(&cfg());
            assert_eq!(parts.denom, "1");
        }

        #[test]
        fn test_long_integers_also_get_scientific_text() {
            let googol4 = Number::from_i64(10).powi(400, &cfg()).unwrap();
            assert!(googol4.is_exact());
            let parts = googol4.to_parts(&cfg());
            assert_eq!(parts.exact_value.as_deref().map(str::len), Some(401));
            assert_eq!(parts.approx_value.as_deref(), Some("1e400"));

            let short = Number::from_i64(123_456_789).to_parts(&cfg());
            assert_eq!(short.approx_value, None);

            let wide = NumericConfig {
                max_exact_int_digits: 500,
                ..NumericConfig::default()
            };
            assert_eq!(googol4.to_parts(&wide).approx_value, None);
        }

        #[test]
        fn test_huge_approximate_values_stay_cheap() {
            let huge = Number::from_i64(10).powi(200_000, &cfg()).unwrap();
            assert!(!huge.is_exact());
            let parts = huge.to_parts(&cfg());
            assert!(parts.approximate);
            assert_eq!(parts.approx_value.as_deref(), Some("1e200000"));
            assert_eq!(parts.denom, "1");
            assert!(parts.numer.starts_with('1'));

            assert!(huge.is_integer());
            assert_eq!(huge.to_i64(), None);
            assert_eq!(huge.to_rational(), None);
            assert!(matches!(huge.check_range(&cfg()), Err(NumberError::Overflow)));
            assert!(matches!(huge.clone().within_limits(&cfg()), Err(NumberError::Overflow)));

            let tiny = Number::from_i64(1).checked_div(&huge).unwrap();
            assert_eq!(tiny.to_parts(&cfg()).approx_value.as_deref(), Some("1e-200000"));
            assert!(!tiny.is_integer());
            assert!(matches!(tiny.check_range(&cfg()), Err(NumberError::Overflow)));

            let fine = Number::from_i64(10).powi(90_000, &cfg()).unwrap();
            assert!(fine.check_range(&cfg()).is_ok());
        }

        #[test]
        fn test_approx_rounding_from_digits() {
            let n = Number::from_str("2.99999999999999").unwrap().to_approx(50);
            assert_eq!(n.to_parts(&cfg()).approx_value.as_deref(), Some("3"));
            let n = Number::from_str("-0.000123456789012345").unwrap().to_approx(50);
            assert_eq!(n.to_parts(&cfg()).approx_value.as_deref(), Some("-0.000123456789012"));
            let n = Number::from_str("-1.5e-9").unwrap().to_approx(50);
            assert_eq!(n.to_parts(&cfg()).approx_value.as_deref(), Some("-1.5e-9"));
        }

        #[test]
        fn test_exact_values_survive_parts() {
            let third = Number::from_ratio(1, 3);
            let tiny = third.powi(30, &cfg()).unwrap();
            let parts = tiny.to_parts(&cfg());
            assert_eq!(parts.exact_value, None);
            assert!(!parts.approximate);
            let back = Number::from_numeric_parts(&parts).unwrap();
            assert!(back.is_exact());
            assert_eq!(back.as_rational(), tiny.as_rational());

            let root2 = Number::from_i64(2).sqrt(50).unwrap();
            let parts = root2.to_parts(&cfg());
            assert!(parts.approximate);
            let back = Number::from_numeric_parts(&parts).unwrap();
            assert!(!back.is_exact());
            assert_eq!(back, root2);
        }

        #[test]
        fn test_serde_as_parts() {
            let n = Number::from_ratio(1, 3);
            let json = serde_json::to_value(&n).unwrap();
            assert_eq!(json["numer"], "1");
            assert_eq!(json["exactValue"], "1/3");
            let back: Number = serde_json::from_value(json).unwrap();
            assert!(back.is_exact());
            assert_eq!(back, n);
        }
    }

    mod datetime_tests {
        use super::*;

        #[test]
        fn test_from_ymd() {
            let dt = QuantaDateTime::from_ymd(2025, 6, 15).unwrap();
            assert_eq!(dt.to_ymd(), (2025, 6, 15));
            assert_eq!(dt.hour(), 0);
        }

        #[test]
        fn test_unix_epoch_and_pre_epoch() {
            assert_eq!(QuantaDateTime::from_ymd(1970, 1, 1).unwrap().as_nanos(), 0);
            let dt = QuantaDateTime::from_ymd(1969, 12, 31).unwrap();
            assert!(dt.as_nanos() < 0);
            assert_eq!(dt.to_ymd(), (1969, 12, 31));
        }

        #[test]
        fn test_invalid_components() {
            assert_eq!(
                QuantaDateTime::from_ymd(2023, 2, 29),
                Err(DateTimeError::InvalidDay { day: 29, month: 2, year: 2023 })
            );
            assert_eq!(QuantaDateTime::from_ymd(2023, 13, 1), Err(DateTimeError::InvalidMonth(13)));
            assert_eq!(
                QuantaDateTime::from_ymd_hms(2023, 1, 1, 24, 0, 0),
                Err(DateTimeError::InvalidHour(24))
            );
        }

        #[test]
        fn test_weekday_and_day_of_year() {
            assert_eq!(QuantaDateTime::from_ymd(1970, 1, 1).unwrap().weekday(), 4);
            let dt = QuantaDateTime::from_ymd(2025, 6, 15).unwrap();
            assert_eq!(dt.weekday(), 7);
            assert_eq!(dt.weekday_name(), "Sunday");
            assert_eq!(QuantaDateTime::from_ymd(2024, 12, 31).unwrap().day_of_year(), 366);
        }

        #[test]
        fn test_add_months_clamps() {
            let jan31 = QuantaDateTime::from_ymd(2024, 1, 31).unwrap();
            assert_eq!(jan31.add_months(1).unwrap().to_ymd(), (2024, 2, 29));

            let jan31 = QuantaDateTime::from_ymd(2023, 1, 31).unwrap();
            assert_eq!(jan31.add_months(1).unwrap().to_ymd(), (2023, 2, 28));
            assert_eq!(jan31.add_months(-2).unwrap().to_ymd(), (2022, 11, 30));
            assert_eq!(jan31.add_years(1).unwrap().to_ymd(), (2024, 1, 31));
        }

        #[test]
        fn test_add_quantity() {
            let month = Unit::new("mo", "month", Dimension::TIME, Number::from_i64(2_629_746), "time").calendar(1);
            let jan31 = QuantaDateTime::from_ymd(2023, 1, 31).unwrap();
            let shifted = jan31.add_quantity(&Quantity::new(Number::from_i64(1), month)).unwrap();
            assert_eq!(shifted.to_ymd(), (2023, 2, 28));

            let hour = Unit::new("h", "hour", Dimension::TIME, Number::from_i64(3600), "time");
            let later = jan31.add_quantity(&Quantity::new(Number::from_ratio(3, 2), hour)).unwrap();
            assert_eq!((later.hour(), later.minute()), (1, 30));

            let meter = Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length");
            let err = jan31.add_quantity(&Quantity::new(Number::from_i64(1), meter));
            assert_eq!(err, Err(DateTimeError::NotADuration("m".to_string())));
        }

        #[test]
        fn test_difference_in_seconds() {
            let a = QuantaDateTime::from_ymd(2024, 3, 1).unwrap();
            let b = QuantaDateTime::from_ymd(2024, 2, 1).unwrap();
            let diff = a.difference(&b);
            assert_eq!(diff.unit.symbol, "s");
            assert!(diff.value.is_exact());
            assert_eq!(diff.value.to_i64(), Some(29 * 86_400));
        }

        #[test]
        fn test_parse_formats() {
            let dt = QuantaDateTime::parse("2025-06-15T14:30:00Z").unwrap();
            assert_eq!((dt.hour(), dt.minute()), (14, 30));
            assert_eq!(dt.tz_offset(), Some(0));

            let dt = QuantaDateTime::parse("2025-06-15 14:30").unwrap();
            assert_eq!(dt.to_ymd(), (2025, 6, 15));
            assert_eq!(dt.tz_offset(), None);

            let dt = QuantaDateTime::parse("2025-06-15T14:30:00+05:30").unwrap();
            assert_eq!(dt.hour(), 14);
            let utc = QuantaDateTime::from_ymd_hms(2025, 6, 15, 9, 0, 0).unwrap();
            assert_eq!(dt.as_nanos(), utc.as_nanos());

            let dt = QuantaDateTime::parse("2025-06-15T14:30:00.25Z").unwrap();
            assert_eq!(dt.nanosecond(), 250_000_000);

            assert!(matches!(QuantaDateTime::parse("June 15"), Err(DateTimeError::ParseError(_))));
        }

        #[test]
        fn test_iso_round_trip() {
            let dt = QuantaDateTime::parse("2025-06-15T14:30:05.5-03:00").unwrap();
            let text = dt.to_iso_string();
            assert_eq!(text, "2025-06-15T14:30:05.5-03:00");
            assert_eq!(QuantaDateTime::parse(&text).unwrap(), dt);
        }

        #[test]
        fn test_format() {
            let dt = QuantaDateTime::from_ymd_hms(2025, 6, 15, 14, 30, 0).unwrap();
            assert_eq!(dt.format("DD/MM/YYYY"), "15/06/2025");
            assert_eq!(dt.format("YYYY-MM-DD HH:mm"), "2025-06-15 14:30");
            assert_eq!(dt.format("dddd, MMMM D"), "Sunday, June 15");
            assert_eq!(dt.format("h:mm A"), "2:30 PM");
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn test_number_error_codes() {
            assert_eq!(QuantaError::from(NumberError::DivisionByZero).code, codes::DIV_ZERO);
            assert_eq!(
                QuantaError::from(NumberError::DomainError("x".into())).code,
                codes::DOMAIN_ERROR
            );
        }

        #[test]
        fn test_conversion_error_codes() {
            let err = ConversionError::IncompatibleDimensions {
                from: "m".into(),
                to: "s".into(),
                from_dim: Dimension::LENGTH.describe(),
                to_dim: Dimension::TIME.describe(),
            };
            let q = QuantaError::from(err);
            assert_eq!(q.code, codes::INCOMPATIBLE_UNITS);
            assert!(q.message.contains("m (length)"));
            assert!(q.message.contains("s (time)"));

            let q = QuantaError::from(ConversionError::InvalidExponent("m^x".into()));
            assert_eq!(q.code, codes::INVALID_UNIT_EXPONENT);
            assert_eq!(QuantaError::from(NumberError::Overflow).code, codes::OVERFLOW);
        }

        #[test]
        fn test_datetime_error_codes() {
            assert_eq!(QuantaError::from(DateTimeError::InvalidMonth(13)).code, codes::INVALID_DATE);
            assert_eq!(QuantaError::from(DateTimeError::InvalidHour(25)).code, codes::INVALID_TIME);
            assert_eq!(QuantaError::from(DateTimeError::Overflow).code, codes::DATE_OVERFLOW);
        }

        #[test]
        fn test_notes_and_node() {
            let err = QuantaError::div_zero()
                .at_node("binop")
                .at_node("mul")
                .with_note("from left operand");
            assert_eq!(err.context.as_ref().and_then(|c| c.node.as_deref()), Some("binop"));
            assert_eq!(err.notes(), ["from left operand".to_string()]);
        }

        #[test]
        fn test_embedded_keeps_message() {
            let err = QuantaError::embedded("bad token");
            assert_eq!(err.code, codes::EMBEDDED_ERROR);
            assert_eq!(err.message, "bad token");
        }
    }

    mod value_tests {
        use super::*;

        #[test]
        fn test_type_names() {
            assert_eq!(Value::from(3).type_name(), "Number");
            let meter = Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length");
            assert_eq!(Value::from(Quantity::new(Number::from_i64(3), meter)).type_name(), "Quantity");
            assert_eq!(Value::from("x").type_name(), "Text");
            assert_eq!(Value::from(QuantaError::div_zero()).type_name(), "Error");
        }

        #[test]
        fn test_display_with_approx() {
            let config = NumericConfig::default();
            let third = Value::number(Number::from_ratio(1, 3));
            assert_eq!(third.display(&config), "1/3 (approx. 0.333333333333)");
            let meter = Unit::new("m", "meter", Dimension::LENGTH, Number::from_i64(1), "length");
            let five = Value::from(Quantity::new(Number::from_i64(5), meter));
            assert_eq!(five.display(&config), "5 m");
        }

        #[test]
        fn test_serialization_shape() {
            let json = serde_json::to_value(Value::from(true)).unwrap();
            assert_eq!(json["type"], "Bool");
            assert_eq!(json["value"], true);

            let json = serde_json::to_value(Value::number(Number::from_i64(8))).unwrap();
            assert_eq!(json["type"], "Quantity");
            assert_eq!(json["value"]["value"]["exactValue"], "8");
        }
    }
}
