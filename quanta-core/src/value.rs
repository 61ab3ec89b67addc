//! Runtime values
//!
//! A value is a quantity (plain numbers are dimensionless quantities), a
//! date, text, a boolean from a comparison, or an error. Errors propagate
//! through evaluation instead of aborting it.

use crate::{Number, NumericConfig, NumericParts, QuantaDateTime, QuantaError, Quantity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    Quantity(Quantity),
    DateTime(QuantaDateTime),
    Text(String),
    Bool(bool),
    Error(QuantaError),
}

impl Value {
    /// A plain dimensionless number
    pub fn number(n: Number) -> Self {
        Value::Quantity(Quantity::dimensionless(n))
    }

    // ========== Safe Accessors (never panic) ==========

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    /// The magnitude of a plain number
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Quantity(q) if q.is_plain() => Some(&q.value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&QuantaDateTime> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&QuantaError> {
        match self {
            Value::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Quantity(q) if q.is_plain() => "Number",
            Value::Quantity(_) => "Quantity",
            Value::DateTime(_) => "DateTime",
            Value::Text(_) => "Text",
            Value::Bool(_) => "Bool",
            Value::Error(_) => "Error",
        }
    }

    /// Renderer view of the magnitude of a quantity
    pub fn numeric_parts(&self, config: &NumericConfig) -> Option<NumericParts> {
        self.as_quantity().map(|q| q.value.to_parts(config))
    }

    /// Display text using the given numeric limits
    pub fn display(&self, config: &NumericConfig) -> String {
        match self {
            Value::Quantity(q) => {
                let parts = q.value.to_parts(config);
                let text = match (&parts.exact_value, &parts.approx_value) {
                    (Some(exact), Some(approx)) => format!("{} (approx. {})", exact, approx),
                    _ => parts.display().to_string(),
                };
                if q.unit.symbol.is_empty() {
                    text
                } else {
                    format!("{} {}", text, q.unit.symbol)
                }
            }
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Quantity(q) => write!(f, "{}", q),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Error(e) => write!(f, "#ERROR: {}", e.message),
        }
    }
}

// From implementations for convenience
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::number(Number::from_i64(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::number(n)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<QuantaDateTime> for Value {
    fn from(dt: QuantaDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<QuantaError> for Value {
    fn from(e: QuantaError) -> Self {
        Value::Error(e)
    }
}
