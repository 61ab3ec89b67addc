//! Plugin traits

use quanta_core::{QuantaError, Value};
use crate::EvalContext;
use serde::Serialize;

/// Metadata about a function argument
#[derive(Debug, Clone, Serialize)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ArgMeta {
    pub const fn required(name: &'static str, typ: &'static str, description: &'static str) -> Self {
        Self { name, typ, description, optional: false, default: None }
    }

    pub const fn optional(name: &'static str, typ: &'static str, description: &'static str, default: &'static str) -> Self {
        Self { name, typ, description, optional: true, default: Some(default) }
    }
}

/// Metadata for a function plugin
#[derive(Debug, Clone, Serialize)]
pub struct FunctionMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub args: &'static [ArgMeta],
    pub returns: &'static str,
    pub examples: &'static [&'static str],
    pub category: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    pub related: &'static [&'static str],
}

impl FunctionMeta {
    /// Minimum and maximum argument counts
    pub fn arity(&self) -> (usize, usize) {
        let required = self.args.iter().filter(|a| !a.optional).count();
        (required, self.args.len())
    }

    /// Check an argument count against the declared arguments
    pub fn check_arity(&self, got: usize) -> Result<(), QuantaError> {
        let (min, max) = self.arity();
        if got >= min && got <= max {
            return Ok(());
        }
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        Err(QuantaError::arity_mismatch(self.name, &expected, got)
            .with_suggestion(format!("Usage: {}", self.usage)))
    }
}

/// Pure function plugin
///
/// Arguments arrive evaluated and error-free; arity has already been
/// checked against [`FunctionMeta::args`]. Failures are returned as
/// `Value::Error`.
pub trait FunctionPlugin: Send + Sync {
    fn meta(&self) -> FunctionMeta;
    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value;
}
