//! Quanta - evaluation core of a units-aware calculator
//!
//! Takes an expression tree from an external parser and computes a value:
//! exact rationals while possible, dimension-checked unit algebra, date
//! arithmetic, and errors that travel through the tree as values.

mod date;
mod eval;
mod expr;
mod property;

pub use eval::Evaluator;
pub use expr::{BinOp, DateToken, Expr, UnaryOp};

use quanta_core::{NumericConfig, NumericParts, QuantaDateTime, QuantaError, Value};
use quanta_plugin::{ConstantDef, EvalContext, FunctionMeta, PluginRegistry};
use serde::Serialize;
use std::sync::Arc;

/// Main Quanta engine
pub struct Quanta {
    registry: Arc<PluginRegistry>,
    config: NumericConfig,
    /// Pinned clock; `None` reads the system clock per evaluation
    now: Option<QuantaDateTime>,
}

/// A value with its renderer-facing parts
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub value: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<NumericParts>,
    pub display: String,
}

impl Quanta {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            config: NumericConfig::default(),
            now: None,
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(quanta_std::standard_registry())
    }

    pub fn with_precision(mut self, precision: u32) -> Self {
        self.config.precision = precision;
        self
    }

    pub fn with_config(mut self, config: NumericConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_now(mut self, now: QuantaDateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn config(&self) -> &NumericConfig {
        &self.config
    }

    fn context(&self) -> EvalContext {
        let ctx = EvalContext::new(self.registry.clone()).with_config(self.config);
        match &self.now {
            Some(now) => ctx.with_now(now.clone()),
            None => ctx,
        }
    }

    pub fn evaluate(&self, expr: &Expr) -> Value {
        Evaluator::new().evaluate(expr, &self.context())
    }

    /// Evaluate and attach the numeric parts and display text
    pub fn evaluate_full(&self, expr: &Expr) -> Evaluation {
        let value = self.evaluate(expr);
        Evaluation {
            parts: value.numeric_parts(&self.config),
            display: value.display(&self.config),
            value,
        }
    }

    /// Evaluate a tree given as JSON; malformed JSON is a `PARSE_ERROR` value
    pub fn evaluate_json(&self, json: &str) -> Evaluation {
        match serde_json::from_str::<Expr>(json) {
            Ok(expr) => self.evaluate_full(&expr),
            Err(e) => {
                let value = Value::Error(QuantaError::parse_error(format!("expression tree: {}", e)));
                Evaluation {
                    parts: None,
                    display: value.display(&self.config),
                    value,
                }
            }
        }
    }

    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        self.registry.list_functions(category)
    }

    pub fn list_constants(&self) -> Vec<&ConstantDef> {
        self.registry.list_constants()
    }
}

impl Default for Quanta {
    fn default() -> Self {
        Self::with_standard_library()
    }
}
