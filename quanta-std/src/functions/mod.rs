//! Standard functions

mod date;
mod math;
mod trig;

pub use date::{
    AddMonths, DateFn, DateTimeFn, Diff, Extract, FormatDate, NowFn, ParseDate, TimeFn, DAY,
    DAY_OF_YEAR, HOUR, MINUTE, MONTH, SECOND, WEEK, WEEKDAY, YEAR,
};
pub use math::{Abs, Ceil, Exp, Floor, Ln, Pow, Round, Sqrt};
pub use trig::{Cos, Sin, Tan};

use quanta_plugin::prelude::*;

// ============ argument helpers ============

pub(crate) fn quantity_arg<'a>(func: &str, arg: &str, value: &'a Value) -> Result<&'a Quantity, QuantaError> {
    value
        .as_quantity()
        .ok_or_else(|| QuantaError::arg_type(func, arg, "Quantity", value.type_name()))
}

/// A pure number; dimensionless units such as % or deg are folded in first
pub(crate) fn plain_arg(func: &str, arg: &str, value: &Value) -> Result<Number, QuantaError> {
    let q = quantity_arg(func, arg, value)?.clone().fold_dimensionless();
    if q.is_plain() {
        Ok(q.value)
    } else {
        Err(QuantaError::arg_type(func, arg, "dimensionless number", &q.unit.symbol))
    }
}

pub(crate) fn int_arg<T: TryFrom<i64>>(func: &str, arg: &str, value: &Value) -> Result<T, QuantaError> {
    let n = plain_arg(func, arg, value)?;
    let n = n
        .to_i64()
        .ok_or_else(|| QuantaError::arg_type(func, arg, "integer", "non-integer"))?;
    T::try_from(n).map_err(|_| QuantaError::domain_error(format!("{} out of range for {}", arg, func)))
}

pub(crate) fn datetime_arg<'a>(func: &str, arg: &str, value: &'a Value) -> Result<&'a QuantaDateTime, QuantaError> {
    value
        .as_datetime()
        .ok_or_else(|| QuantaError::arg_type(func, arg, "DateTime", value.type_name()))
}

pub(crate) fn text_arg<'a>(func: &str, arg: &str, value: &'a Value) -> Result<&'a str, QuantaError> {
    value
        .as_text()
        .ok_or_else(|| QuantaError::arg_type(func, arg, "Text", value.type_name()))
}

pub(crate) fn into_value<T: Into<Value>>(result: Result<T, QuantaError>) -> Value {
    match result {
        Ok(v) => v.into(),
        Err(e) => Value::Error(e),
    }
}
