//! `of` property extraction
//!
//! Resolution order for `<property> of <value>`:
//! 1. a percentage literal ("20%", "7.5 percent") scales the value
//! 2. builtin extractors for quantities and dates
//! 3. any function taking the value as its only argument
//!
//! Anything else is `UNKNOWN_PROPERTY`.

use quanta_core::{Number, QuantaError, Quantity, Value};
use quanta_plugin::EvalContext;
use tracing::trace;

pub fn extract(property: &str, value: Value, ctx: &EvalContext) -> Value {
    let name = property.trim();

    if let Some(percent) = percentage(name) {
        return match percent {
            Ok(fraction) => percent_of(&fraction, &value),
            Err(e) => Value::Error(e),
        };
    }

    let key = name.to_lowercase();
    if let Some(result) = builtin(&key, &value) {
        trace!(property = %key, "builtin property");
        return result;
    }

    if ctx.registry.has_function(&key) {
        trace!(property = %key, "property via function table");
        return ctx.registry.call_function(&key, &[value], ctx);
    }

    Value::Error(
        QuantaError::unknown_property(name)
            .with_suggestion(format!("'{}' is not a property of {}", name, value.type_name())),
    )
}

/// "20%" -> 1/5; `None` when the property is not a percentage at all
fn percentage(property: &str) -> Option<Result<Number, QuantaError>> {
    let digits = property
        .strip_suffix('%')
        .or_else(|| property.strip_suffix("percent"))?
        .trim();
    if digits.is_empty() {
        return None;
    }
    Some(
        Number::from_str(digits)
            .and_then(|n| n.checked_div(&Number::from_i64(100)))
            .map_err(QuantaError::from),
    )
}

fn percent_of(fraction: &Number, value: &Value) -> Value {
    match value {
        Value::Quantity(q) => Value::Quantity(Quantity::new(q.value.mul(fraction), q.unit.clone())),
        other => Value::Error(QuantaError::type_error("Quantity", other.type_name())),
    }
}

fn builtin(key: &str, value: &Value) -> Option<Value> {
    match value {
        Value::Quantity(q) => quantity_property(key, q),
        Value::DateTime(dt) => {
            let field = match key {
                "year" => i64::from(dt.year()),
                "month" => i64::from(dt.month()),
                "day" => i64::from(dt.day()),
                "hour" => i64::from(dt.hour()),
                "minute" => i64::from(dt.minute()),
                "second" => i64::from(dt.second()),
                "weekday" => i64::from(dt.weekday()),
                "dayofyear" => i64::from(dt.day_of_year()),
                _ => return None,
            };
            Some(Value::number(Number::from_i64(field)))
        }
        _ => None,
    }
}

fn quantity_property(key: &str, q: &Quantity) -> Option<Value> {
    let result = match key {
        "magnitude" | "value" => Value::number(q.value.clone()),
        "unit" => Value::Text(q.unit.symbol.clone()),
        "dimension" => Value::Text(q.unit.describe_dimension()),
        _ => return None,
    };
    Some(result)
}
