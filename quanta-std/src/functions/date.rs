//! Date and time functions
//!
//! Construction, parsing, formatting, field extraction and calendar
//! arithmetic over `QuantaDateTime`. Durations are time quantities, so
//! `diff` returns seconds that convert like any other quantity.

use quanta_plugin::prelude::*;
use quanta_units::parse_unit;
use super::{datetime_arg, int_arg, into_value, text_arg};

// ============ date ============

pub struct DateFn;

static DATE_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("year", "Number", "Year"),
    ArgMeta::required("month", "Number", "Month (1-12)"),
    ArgMeta::required("day", "Number", "Day of month"),
];
static DATE_EXAMPLES: [&str; 2] = ["date(2025, 6, 15) → 2025-06-15T00:00:00Z", "date(2024, 2, 30) → INVALID_DATE"];
static DATE_RELATED: [&str; 3] = ["datetime", "time", "parse_date"];

impl FunctionPlugin for DateFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "date",
            description: "Midnight UTC of a calendar date",
            usage: "date(year, month, day)",
            args: &DATE_ARGS,
            returns: "DateTime",
            examples: &DATE_EXAMPLES,
            category: "datetime",
            source: None,
            related: &DATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = (|| -> Result<QuantaDateTime, QuantaError> {
            let year = int_arg("date", "year", &args[0])?;
            let month = int_arg("date", "month", &args[1])?;
            let day = int_arg("date", "day", &args[2])?;
            Ok(QuantaDateTime::from_ymd(year, month, day)?)
        })();
        into_value(result)
    }
}

// ============ datetime ============

pub struct DateTimeFn;

static DATETIME_ARGS: [ArgMeta; 6] = [
    ArgMeta::required("year", "Number", "Year"),
    ArgMeta::required("month", "Number", "Month (1-12)"),
    ArgMeta::required("day", "Number", "Day of month"),
    ArgMeta::required("hour", "Number", "Hour (0-23)"),
    ArgMeta::required("minute", "Number", "Minute (0-59)"),
    ArgMeta::optional("second", "Number", "Second (0-59)", "0"),
];
static DATETIME_EXAMPLES: [&str; 1] = ["datetime(2025, 6, 15, 14, 30) → 2025-06-15T14:30:00Z"];
static DATETIME_RELATED: [&str; 2] = ["date", "time"];

impl FunctionPlugin for DateTimeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "datetime",
            description: "UTC instant from calendar and clock fields",
            usage: "datetime(year, month, day, hour, minute, second?)",
            args: &DATETIME_ARGS,
            returns: "DateTime",
            examples: &DATETIME_EXAMPLES,
            category: "datetime",
            source: None,
            related: &DATETIME_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = (|| -> Result<QuantaDateTime, QuantaError> {
            let year = int_arg("datetime", "year", &args[0])?;
            let month = int_arg("datetime", "month", &args[1])?;
            let day = int_arg("datetime", "day", &args[2])?;
            let hour = int_arg("datetime", "hour", &args[3])?;
            let minute = int_arg("datetime", "minute", &args[4])?;
            let second = match args.get(5) {
                Some(arg) => int_arg("datetime", "second", arg)?,
                None => 0,
            };
            Ok(QuantaDateTime::from_ymd_hms(year, month, day, hour, minute, second)?)
        })();
        into_value(result)
    }
}

// ============ time ============

pub struct TimeFn;

static TIME_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("hour", "Number", "Hour (0-23)"),
    ArgMeta::required("minute", "Number", "Minute (0-59)"),
    ArgMeta::optional("second", "Number", "Second (0-59)", "0"),
];
static TIME_EXAMPLES: [&str; 1] = ["time(9, 30) → today at 09:30"];
static TIME_RELATED: [&str; 2] = ["now", "datetime"];

impl FunctionPlugin for TimeFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "time",
            description: "Today's date at the given clock time",
            usage: "time(hour, minute, second?)",
            args: &TIME_ARGS,
            returns: "DateTime",
            examples: &TIME_EXAMPLES,
            category: "datetime",
            source: None,
            related: &TIME_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let result = (|| -> Result<QuantaDateTime, QuantaError> {
            let hour = int_arg("time", "hour", &args[0])?;
            let minute = int_arg("time", "minute", &args[1])?;
            let second = match args.get(2) {
                Some(arg) => int_arg("time", "second", arg)?,
                None => 0,
            };
            Ok(ctx.now.at_time(hour, minute, second, 0)?)
        })();
        into_value(result)
    }
}

// ============ now ============

pub struct NowFn;

static NOW_ARGS: [ArgMeta; 0] = [];
static NOW_EXAMPLES: [&str; 1] = ["now()"];
static NOW_RELATED: [&str; 2] = ["time", "date"];

impl FunctionPlugin for NowFn {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "now",
            description: "The evaluation clock reading",
            usage: "now()",
            args: &NOW_ARGS,
            returns: "DateTime",
            examples: &NOW_EXAMPLES,
            category: "datetime",
            source: None,
            related: &NOW_RELATED,
        }
    }

    fn call(&self, _args: &[Value], ctx: &EvalContext) -> Value {
        Value::DateTime(ctx.now.clone())
    }
}

// ============ parse_date ============

pub struct ParseDate;

static PARSE_DATE_ARGS: [ArgMeta; 1] = [ArgMeta::required("text", "Text", "ISO 8601 date or datetime")];
static PARSE_DATE_EXAMPLES: [&str; 2] = [
    "parse_date(\"2025-06-15\")",
    "parse_date(\"2025-06-15T14:30:00+02:00\")",
];
static PARSE_DATE_RELATED: [&str; 2] = ["format_date", "date"];

impl FunctionPlugin for ParseDate {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "parse_date",
            description: "Parse ISO 8601 text into a DateTime",
            usage: "parse_date(text)",
            args: &PARSE_DATE_ARGS,
            returns: "DateTime",
            examples: &PARSE_DATE_EXAMPLES,
            category: "datetime",
            source: None,
            related: &PARSE_DATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(
            text_arg("parse_date", "text", &args[0])
                .and_then(|text| Ok(QuantaDateTime::parse(text)?)),
        )
    }
}

// ============ format_date ============

pub struct FormatDate;

static FORMAT_DATE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("dt", "DateTime", "DateTime to format"),
    ArgMeta::optional("pattern", "Text", "Pattern (YYYY, MM, DD, HH, mm, ss, MMMM, dddd, ...)", "YYYY-MM-DD"),
];
static FORMAT_DATE_EXAMPLES: [&str; 2] = [
    "format_date(2025-06-15) → \"2025-06-15\"",
    "format_date(2025-06-15, \"dddd, MMMM D\") → \"Sunday, June 15\"",
];
static FORMAT_DATE_RELATED: [&str; 1] = ["parse_date"];

impl FunctionPlugin for FormatDate {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_date",
            description: "Format a DateTime with a pattern",
            usage: "format_date(dt, pattern?)",
            args: &FORMAT_DATE_ARGS,
            returns: "Text",
            examples: &FORMAT_DATE_EXAMPLES,
            category: "datetime",
            source: None,
            related: &FORMAT_DATE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = datetime_arg("format_date", "dt", &args[0]).and_then(|dt| {
            let pattern = match args.get(1) {
                Some(arg) => text_arg("format_date", "pattern", arg)?,
                None => "YYYY-MM-DD",
            };
            Ok(dt.format(pattern))
        });
        into_value(result)
    }
}

// ============ field extractors ============

/// Single-field extractor such as `year(dt)`
pub struct Extract {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    examples: &'static [&'static str],
    field: fn(&QuantaDateTime) -> i64,
}

static EXTRACT_ARGS: [ArgMeta; 1] = [ArgMeta::required("dt", "DateTime", "DateTime to extract from")];
static EXTRACT_RELATED: [&str; 2] = ["date", "format_date"];

pub const YEAR: Extract = Extract {
    name: "year",
    description: "Calendar year",
    usage: "year(dt)",
    examples: &["year(2025-06-15) → 2025"],
    field: |dt| i64::from(dt.year()),
};

pub const MONTH: Extract = Extract {
    name: "month",
    description: "Month of year (1-12)",
    usage: "month(dt)",
    examples: &["month(2025-06-15) → 6"],
    field: |dt| i64::from(dt.month()),
};

pub const DAY: Extract = Extract {
    name: "day",
    description: "Day of month",
    usage: "day(dt)",
    examples: &["day(2025-06-15) → 15"],
    field: |dt| i64::from(dt.day()),
};

pub const HOUR: Extract = Extract {
    name: "hour",
    description: "Hour (0-23)",
    usage: "hour(dt)",
    examples: &["hour(2025-06-15 14:30) → 14"],
    field: |dt| i64::from(dt.hour()),
};

pub const MINUTE: Extract = Extract {
    name: "minute",
    description: "Minute (0-59)",
    usage: "minute(dt)",
    examples: &["minute(2025-06-15 14:30) → 30"],
    field: |dt| i64::from(dt.minute()),
};

pub const SECOND: Extract = Extract {
    name: "second",
    description: "Second (0-59)",
    usage: "second(dt)",
    examples: &["second(2025-06-15 14:30:05) → 5"],
    field: |dt| i64::from(dt.second()),
};

pub const WEEKDAY: Extract = Extract {
    name: "weekday",
    description: "ISO day of week (1 = Monday, 7 = Sunday)",
    usage: "weekday(dt)",
    examples: &["weekday(2025-06-15) → 7"],
    field: |dt| i64::from(dt.weekday()),
};

pub const DAY_OF_YEAR: Extract = Extract {
    name: "dayofyear",
    description: "Day of year (1-366)",
    usage: "dayofyear(dt)",
    examples: &["dayofyear(2025-02-01) → 32"],
    field: |dt| i64::from(dt.day_of_year()),
};

pub const WEEK: Extract = Extract {
    name: "week",
    description: "ISO 8601 week number",
    usage: "week(dt)",
    examples: &["week(2025-01-01) → 1"],
    field: |dt| i64::from(dt.iso_week()),
};

impl FunctionPlugin for Extract {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: self.name,
            description: self.description,
            usage: self.usage,
            args: &EXTRACT_ARGS,
            returns: "Number",
            examples: self.examples,
            category: "datetime",
            source: None,
            related: &EXTRACT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        into_value(datetime_arg(self.name, "dt", &args[0]).map(|dt| Number::from_i64((self.field)(dt))))
    }
}

// ============ add_months ============

pub struct AddMonths;

static ADD_MONTHS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("dt", "DateTime", "Starting date"),
    ArgMeta::required("months", "Number", "Whole months to add (may be negative)"),
];
static ADD_MONTHS_EXAMPLES: [&str; 1] = ["add_months(2025-01-31, 1) → 2025-02-28"];
static ADD_MONTHS_RELATED: [&str; 1] = ["diff"];

impl FunctionPlugin for AddMonths {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "add_months",
            description: "Shift by calendar months, clamping to the last day of the month",
            usage: "add_months(dt, months)",
            args: &ADD_MONTHS_ARGS,
            returns: "DateTime",
            examples: &ADD_MONTHS_EXAMPLES,
            category: "datetime",
            source: None,
            related: &ADD_MONTHS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = datetime_arg("add_months", "dt", &args[0]).and_then(|dt| {
            let months = int_arg("add_months", "months", &args[1])?;
            Ok(dt.add_months(months)?)
        });
        into_value(result)
    }
}

// ============ diff ============

pub struct Diff;

static DIFF_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("end", "DateTime", "Later instant"),
    ArgMeta::required("start", "DateTime", "Earlier instant"),
    ArgMeta::optional("unit", "Text", "Time unit of the result", "s"),
];
static DIFF_EXAMPLES: [&str; 2] = [
    "diff(2025-03-01, 2025-02-01, \"d\") → 28 d",
    "diff(2025-01-01 12:00, 2025-01-01 09:30) → 9000 s",
];
static DIFF_RELATED: [&str; 1] = ["add_months"];

impl FunctionPlugin for Diff {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "diff",
            description: "Elapsed time between two instants",
            usage: "diff(end, start, unit?)",
            args: &DIFF_ARGS,
            returns: "Quantity",
            examples: &DIFF_EXAMPLES,
            category: "datetime",
            source: None,
            related: &DIFF_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = (|| -> Result<Quantity, QuantaError> {
            let end = datetime_arg("diff", "end", &args[0])?;
            let start = datetime_arg("diff", "start", &args[1])?;
            let elapsed = end.difference(start);
            match args.get(2) {
                Some(arg) => {
                    let unit = parse_unit(text_arg("diff", "unit", arg)?)?;
                    Ok(elapsed.convert_to(&unit)?)
                }
                None => Ok(elapsed),
            }
        })();
        into_value(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quanta_plugin::PluginRegistry;
    use std::sync::Arc;

    fn ctx() -> EvalContext {
        let now = QuantaDateTime::from_ymd_hms(2025, 6, 15, 14, 30, 0).unwrap();
        EvalContext::new(Arc::new(PluginRegistry::new())).with_now(now)
    }

    fn int(n: i64) -> Value {
        Value::number(Number::from_i64(n))
    }

    fn dt(s: &str) -> Value {
        Value::DateTime(QuantaDateTime::parse(s).unwrap())
    }

    fn number_of(v: &Value) -> Number {
        v.as_quantity().unwrap().value.clone()
    }

    #[test]
    fn test_date_constructs_midnight() {
        let result = DateFn.call(&[int(2025), int(6), int(15)], &ctx());
        assert_eq!(result, dt("2025-06-15"));
    }

    #[test]
    fn test_date_rejects_invalid_day() {
        let result = DateFn.call(&[int(2025), int(2), int(30)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INVALID_DATE);

        let result = DateFn.call(&[int(2025), int(-1), int(1)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::DOMAIN_ERROR);
    }

    #[test]
    fn test_datetime_optional_second() {
        let result = DateTimeFn.call(&[int(2025), int(6), int(15), int(9), int(5)], &ctx());
        assert_eq!(result, dt("2025-06-15T09:05:00"));

        let result = DateTimeFn.call(&[int(2025), int(6), int(15), int(9), int(5), int(7)], &ctx());
        assert_eq!(result, dt("2025-06-15T09:05:07"));
    }

    #[test]
    fn test_time_uses_context_clock() {
        let result = TimeFn.call(&[int(9), int(0)], &ctx());
        assert_eq!(result, dt("2025-06-15T09:00"));

        let result = TimeFn.call(&[int(25), int(0)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INVALID_TIME);
    }

    #[test]
    fn test_now_is_context_clock() {
        let ctx = ctx();
        assert_eq!(NowFn.call(&[], &ctx), Value::DateTime(ctx.now.clone()));
    }

    #[test]
    fn test_parse_and_format() {
        let parsed = ParseDate.call(&[Value::Text("2025-06-15T14:30:00Z".to_string())], &ctx());
        let expected = QuantaDateTime::from_ymd_hms(2025, 6, 15, 14, 30, 0).unwrap();
        assert_eq!(parsed.as_datetime().unwrap().as_nanos(), expected.as_nanos());
        assert_eq!(parsed.as_datetime().unwrap().tz_offset(), Some(0));

        let bad = ParseDate.call(&[Value::Text("june".to_string())], &ctx());
        assert_eq!(bad.as_error().unwrap().code, codes::DATE_PARSE_ERROR);

        let text = FormatDate.call(&[dt("2025-06-15")], &ctx());
        assert_eq!(text.as_text(), Some("2025-06-15"));

        let text = FormatDate.call(&[dt("2025-06-15"), Value::Text("dddd, MMMM D".to_string())], &ctx());
        assert_eq!(text.as_text(), Some("Sunday, June 15"));
    }

    #[test]
    fn test_extractors() {
        let value = dt("2025-06-15T14:30:05Z");
        let cases = [
            (YEAR, 2025),
            (MONTH, 6),
            (DAY, 15),
            (HOUR, 14),
            (MINUTE, 30),
            (SECOND, 5),
            (WEEKDAY, 7),
            (DAY_OF_YEAR, 166),
            (WEEK, 24),
        ];
        for (extract, expected) in cases {
            let result = extract.call(&[value.clone()], &ctx());
            assert_eq!(number_of(&result), Number::from_i64(expected), "{}", extract.name);
        }
    }

    #[test]
    fn test_negative_year() {
        let result = YEAR.call(&[dt("-0044-03-15")], &ctx());
        assert_eq!(number_of(&result), Number::from_i64(-44));
    }

    #[test]
    fn test_extractor_needs_datetime() {
        let result = MONTH.call(&[int(3)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);
    }

    #[test]
    fn test_add_months_clamps() {
        let result = AddMonths.call(&[dt("2025-01-31"), int(1)], &ctx());
        assert_eq!(result, dt("2025-02-28"));

        let result = AddMonths.call(&[dt("2024-03-31"), int(-1)], &ctx());
        assert_eq!(result, dt("2024-02-29"));
    }

    #[test]
    fn test_diff_in_seconds_and_days() {
        let result = Diff.call(&[dt("2025-01-01 12:00"), dt("2025-01-01 09:30")], &ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.value, Number::from_i64(9000));
        assert_eq!(q.unit.symbol, "s");

        let result = Diff.call(&[dt("2025-03-01"), dt("2025-02-01"), Value::Text("d".to_string())], &ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.value, Number::from_i64(28));
        assert!(q.value.is_exact());
    }

    #[test]
    fn test_diff_rejects_non_time_unit() {
        let result = Diff.call(&[dt("2025-03-01"), dt("2025-02-01"), Value::Text("m".to_string())], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INCOMPATIBLE_UNITS);
    }
}
