//! Structured errors
//!
//! Errors never abort evaluation. They are values that flow up the
//! expression tree and carry a machine-readable code, a message, an
//! optional suggestion and propagation notes.

use crate::{ConversionError, DateTimeError, NumberError};
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INCOMPATIBLE_UNITS: &str = "INCOMPATIBLE_UNITS";
    pub const INVALID_UNIT_EXPONENT: &str = "INVALID_UNIT_EXPONENT";
    pub const UNKNOWN_PROPERTY: &str = "UNKNOWN_PROPERTY";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const ARITY_MISMATCH: &str = "ARITY_MISMATCH";
    pub const TOO_COMPLEX: &str = "TOO_COMPLEX";
    pub const EMBEDDED_ERROR: &str = "EMBEDDED_ERROR";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const INTERNAL: &str = "INTERNAL";
    // DateTime-specific error codes
    pub const INVALID_DATE: &str = "INVALID_DATE";
    pub const INVALID_TIME: &str = "INVALID_TIME";
    pub const DATE_OVERFLOW: &str = "DATE_OVERFLOW";
    pub const DATE_PARSE_ERROR: &str = "DATE_PARSE_ERROR";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Computation failed for this expression
    Error,
    /// Evaluation was abandoned
    Fatal,
}

/// Where an error came from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Kind of expression node that raised the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,

    /// Propagation notes, innermost first
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured evaluation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantaError {
    pub code: String,

    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    pub severity: Severity,
}

impl QuantaError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: record the node kind, keeping the innermost one
    pub fn at_node(mut self, node: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        if ctx.node.is_none() {
            ctx.node = Some(node.into());
        }
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn notes(&self) -> &[String] {
        self.context.as_ref().map(|c| c.notes.as_slice()).unwrap_or(&[])
    }

    // ========== Common Error Constructors ==========

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Check the number or literal syntax")
    }

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, "Division by zero")
            .with_suggestion("Ensure divisor is not zero")
    }

    pub fn unknown_unit(name: &str) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit: {}", name))
    }

    pub fn incompatible_units(details: impl Into<String>) -> Self {
        Self::new(codes::INCOMPATIBLE_UNITS, format!("Incompatible units: {}", details.into()))
            .with_suggestion("Both operands must have the same dimension")
    }

    pub fn invalid_unit_exponent(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_UNIT_EXPONENT, format!("Invalid unit exponent: {}", details.into()))
            .with_suggestion("Exponents must be dimensionless; fractional powers need whole roots of the unit")
    }

    pub fn unknown_property(name: &str) -> Self {
        Self::new(codes::UNKNOWN_PROPERTY, format!("Unknown property: {}", name))
    }

    pub fn unknown_function(name: &str) -> Self {
        Self::new(codes::UNKNOWN_FUNCTION, format!("Unknown function: {}", name))
    }

    pub fn arity_mismatch(func: &str, expected: &str, got: usize) -> Self {
        Self::new(
            codes::ARITY_MISMATCH,
            format!("{}() expects {} arguments, got {}", func, expected, got),
        )
        .with_suggestion(format!("Check the usage of {}()", func))
    }

    pub fn too_complex(max_depth: usize) -> Self {
        Self::new(
            codes::TOO_COMPLEX,
            format!("Expression nests deeper than {} levels", max_depth),
        )
        .with_suggestion("Split the expression into smaller parts")
        .with_severity(Severity::Fatal)
    }

    /// An error the parser embedded in the tree; the message is kept verbatim
    pub fn embedded(message: impl Into<String>) -> Self {
        Self::new(codes::EMBEDDED_ERROR, message)
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got),
        )
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }

    // ========== DateTime Error Constructors ==========

    pub fn invalid_date(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_DATE, format!("Invalid date: {}", details.into()))
            .with_suggestion("Check date components (year, month 1-12, day 1-31)")
    }

    pub fn invalid_time(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_TIME, format!("Invalid time: {}", details.into()))
            .with_suggestion("Check time components (hour 0-23, minute 0-59, second 0-59)")
    }

    pub fn date_overflow() -> Self {
        Self::new(codes::DATE_OVERFLOW, "Date out of supported range")
    }

    pub fn date_parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::DATE_PARSE_ERROR, format!("Date parse error: {}", details.into()))
            .with_suggestion("Use YYYY-MM-DD, YYYY-MM-DD HH:MM[:SS] or HH:MM[:SS]")
    }
}

impl std::fmt::Display for QuantaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuantaError {}

impl From<NumberError> for QuantaError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => Self::parse_error(s),
            NumberError::DivisionByZero => Self::div_zero(),
            NumberError::DomainError(s) => Self::domain_error(s),
            NumberError::Overflow => Self::new(codes::OVERFLOW, "Numeric overflow"),
        }
    }
}

impl From<ConversionError> for QuantaError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::IncompatibleDimensions { .. } => {
                Self::new(codes::INCOMPATIBLE_UNITS, err.to_string())
                    .with_suggestion("Both operands must have the same dimension")
            }
            ConversionError::UnknownUnit(name) => Self::unknown_unit(&name),
            ConversionError::InvalidExponent(details) => Self::invalid_unit_exponent(details),
            ConversionError::NumberError(e) => Self::from(e),
        }
    }
}

impl From<DateTimeError> for QuantaError {
    fn from(err: DateTimeError) -> Self {
        match err {
            DateTimeError::InvalidMonth(_) | DateTimeError::InvalidDay { .. } => {
                Self::invalid_date(err.to_string())
            }
            DateTimeError::InvalidHour(_)
            | DateTimeError::InvalidMinute(_)
            | DateTimeError::InvalidSecond(_)
            | DateTimeError::InvalidNano(_) => Self::invalid_time(err.to_string()),
            DateTimeError::ParseError(s) => Self::date_parse_error(s),
            DateTimeError::Overflow => Self::date_overflow(),
            DateTimeError::NotADuration(_) => Self::incompatible_units(err.to_string()),
        }
    }
}
