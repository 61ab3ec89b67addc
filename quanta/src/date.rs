//! Date literal decoding
//!
//! The parser hands over date literals as tokens. They are joined back into
//! text and read as an ISO 8601 date or datetime; a bare time of day lands
//! on the evaluation clock's date.

use crate::expr::DateToken;
use quanta_core::{parse_time_of_day, QuantaDateTime, QuantaError};
use tracing::trace;

/// Decode a date literal
///
/// Accepted shapes:
/// - `2025-06-15`
/// - `2025-06-15 14:30`, `2025-06-15T14:30:05.250`
/// - any of the above with `Z` or `±HH:MM`
/// - `14:30`, `14:30:05` (date taken from `today`)
pub fn decode(tokens: &[DateToken], today: &QuantaDateTime) -> Result<QuantaDateTime, QuantaError> {
    let text: String = tokens.iter().map(DateToken::text).collect();
    let text = text.trim();
    trace!(literal = text, "decoding date");

    if text.is_empty() {
        return Err(QuantaError::date_parse_error("empty date literal"));
    }

    if is_time_of_day(text) {
        let (clock, offset) = split_utc_suffix(text);
        let (hour, minute, second, nano) = parse_time_of_day(clock)?;
        let day = match offset {
            Some(offset) => today.clone().with_tz_offset(offset),
            None => today.clone(),
        };
        return Ok(day.at_time(hour, minute, second, nano)?);
    }

    Ok(QuantaDateTime::parse(text)?)
}

/// `HH:MM...` with no date part in front
fn is_time_of_day(text: &str) -> bool {
    match text.find(':') {
        Some(pos) => !text[..pos].contains('-') && pos <= 2,
        None => false,
    }
}

/// A trailing `Z` marks a UTC clock time
fn split_utc_suffix(text: &str) -> (&str, Option<i32>) {
    match text.strip_suffix('Z') {
        Some(clock) => (clock.trim_end(), Some(0)),
        None => (text, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_core::codes;

    fn num(s: &str) -> DateToken {
        DateToken::Number { value: s.to_string() }
    }

    fn today() -> QuantaDateTime {
        QuantaDateTime::from_ymd_hms(2025, 6, 15, 8, 0, 0).unwrap()
    }

    fn ymd(y: &str, m: &str, d: &str) -> Vec<DateToken> {
        vec![num(y), DateToken::Dash, num(m), DateToken::Dash, num(d)]
    }

    #[test]
    fn test_decode_date() {
        let dt = decode(&ymd("2024", "01", "31"), &today()).unwrap();
        assert_eq!(dt.to_ymd(), (2024, 1, 31));
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_decode_datetime_with_offset() {
        let mut tokens = ymd("2025", "06", "15");
        tokens.extend([
            DateToken::Literal { value: "T".to_string() },
            num("14"),
            DateToken::Colon,
            num("30"),
            DateToken::Plus,
            num("02"),
            DateToken::Colon,
            num("00"),
        ]);
        let dt = decode(&tokens, &today()).unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.tz_offset(), Some(7200));
        assert_eq!(dt.as_nanos(), QuantaDateTime::from_ymd_hms(2025, 6, 15, 12, 30, 0).unwrap().as_nanos());
    }

    #[test]
    fn test_decode_fractional_seconds() {
        let mut tokens = ymd("2025", "06", "15");
        tokens.extend([
            DateToken::Space,
            num("09"),
            DateToken::Colon,
            num("05"),
            DateToken::Colon,
            num("07"),
            DateToken::Dot,
            num("25"),
        ]);
        let dt = decode(&tokens, &today()).unwrap();
        assert_eq!(dt.second(), 7);
        assert_eq!(dt.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_decode_time_of_day_uses_today() {
        let tokens = vec![num("14"), DateToken::Colon, num("30")];
        let dt = decode(&tokens, &today()).unwrap();
        assert_eq!(dt.to_ymd(), (2025, 6, 15));
        assert_eq!((dt.hour(), dt.minute()), (14, 30));
    }

    #[test]
    fn test_decode_errors() {
        let err = decode(&ymd("2025", "02", "30"), &today()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_DATE);

        let tokens = vec![num("25"), DateToken::Colon, num("00")];
        let err = decode(&tokens, &today()).unwrap_err();
        assert_eq!(err.code, codes::INVALID_TIME);

        let err = decode(&[DateToken::Literal { value: "soon".to_string() }], &today()).unwrap_err();
        assert_eq!(err.code, codes::DATE_PARSE_ERROR);

        let err = decode(&[], &today()).unwrap_err();
        assert_eq!(err.code, codes::DATE_PARSE_ERROR);
    }
}
