//! Plugin Registry

use crate::{EvalContext, FunctionMeta, FunctionPlugin};
use quanta_core::{QuantaError, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Definition of a built-in constant
///
/// `formula` is a numeric literal or one of the computed constants
/// (`pi`, `exp(1)`, `(1 + sqrt(5)) / 2`, `sqrt(2)`). `unit` is a unit
/// expression attached to the value; empty for plain numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstantDef {
    pub name: String,
    pub formula: String,
    #[serde(default)]
    pub unit: String,
    pub source: String,
    pub category: String,
}

impl ConstantDef {
    pub fn new(name: &str, formula: &str, unit: &str, source: &str, category: &str) -> Self {
        Self {
            name: name.to_string(),
            formula: formula.to_string(),
            unit: unit.to_string(),
            source: source.to_string(),
            category: category.to_string(),
        }
    }
}

/// Central plugin registry, immutable once built
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
    constants: HashMap<String, ConstantDef>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn with_constant(mut self, def: ConstantDef) -> Self {
        let name = def.name.to_lowercase();
        self.constants.insert(name, def);
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    pub fn get_constant(&self, name: &str) -> Option<&ConstantDef> {
        self.constants.get(&name.to_lowercase())
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    /// Look up and call a function.
    ///
    /// Unknown names produce `UNKNOWN_FUNCTION` with similar names as a
    /// suggestion; a wrong argument count produces `ARITY_MISMATCH`.
    pub fn call_function(&self, name: &str, args: &[Value], ctx: &EvalContext) -> Value {
        let Some(f) = self.get_function(name) else {
            return Value::Error(self.unknown_function(name));
        };
        if let Err(e) = f.meta().check_arity(args.len()) {
            return Value::Error(e);
        }
        f.call(args, ctx)
    }

    fn unknown_function(&self, name: &str) -> QuantaError {
        let similar = self.find_similar_functions(name);
        let err = QuantaError::unknown_function(name);
        if similar.is_empty() {
            return err;
        }
        let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
        err.with_suggestion(format!("Similar: {}", suggestions.join(", ")))
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = similarity_score(&name_lower, func_name);
                (score >= 10).then(|| (func_name.clone(), score))
            })
            .collect();

        // Highest score first, then alphabetical for stable output
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    /// Function metadata, sorted by name, optionally for one category
    pub fn list_functions(&self, category: Option<&str>) -> Vec<FunctionMeta> {
        let mut funcs: Vec<FunctionMeta> = self
            .functions
            .values()
            .map(|f| f.meta())
            .filter(|meta| category.map_or(true, |c| meta.category == c))
            .collect();
        funcs.sort_by(|a, b| a.name.cmp(b.name));
        funcs
    }

    /// Constant definitions sorted by name
    pub fn list_constants(&self) -> Vec<&ConstantDef> {
        let mut consts: Vec<&ConstantDef> = self.constants.values().collect();
        consts.sort_by(|a, b| a.name.cmp(&b.name));
        consts
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Similarity between a misspelled name and a candidate; higher is closer
pub(crate) fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    if candidate.starts_with(query) {
        score += 100;
    } else if candidate.contains(query) {
        score += 50;
    } else if query.contains(candidate) {
        score += 30;
    }

    let query_chars: std::collections::HashSet<char> = query.chars().collect();
    let candidate_chars: std::collections::HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    score += common * 2;

    let len_diff = query.len().abs_diff(candidate.len());
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArgMeta;
    use quanta_core::{codes, Number};

    struct Double;

    static DOUBLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Value to double")];

    impl FunctionPlugin for Double {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "double",
                description: "Twice the argument",
                usage: "double(x)",
                args: &DOUBLE_ARGS,
                returns: "Number",
                examples: &["double(2) → 4"],
                category: "test",
                source: None,
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            match args[0].as_number() {
                Some(n) => Value::number(n.mul(&Number::from_i64(2))),
                None => Value::Error(QuantaError::arg_type("double", "x", "Number", args[0].type_name())),
            }
        }
    }

    struct Round;

    static ROUND_ARGS: [ArgMeta; 2] = [
        ArgMeta::required("x", "Number", "Value to round"),
        ArgMeta::optional("places", "Number", "Decimal places", "0"),
    ];

    impl FunctionPlugin for Round {
        fn meta(&self) -> FunctionMeta {
            FunctionMeta {
                name: "Round",
                description: "Round",
                usage: "round(x, [places])",
                args: &ROUND_ARGS,
                returns: "Number",
                examples: &[],
                category: "test",
                source: None,
                related: &[],
            }
        }

        fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
            args[0].clone()
        }
    }

    fn ctx() -> EvalContext {
        EvalContext::new(Arc::new(
            PluginRegistry::new().with_function(Double).with_function(Round),
        ))
    }

    #[test]
    fn test_call_function() {
        let ctx = ctx();
        let result = ctx.registry.call_function("double", &[Value::from(21)], &ctx);
        assert_eq!(result.as_number(), Some(&Number::from_i64(42)));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let ctx = ctx();
        assert!(ctx.registry.has_function("DOUBLE"));
        assert!(ctx.registry.has_function("round"));
    }

    #[test]
    fn test_unknown_function_suggests_similar() {
        let ctx = ctx();
        let result = ctx.registry.call_function("doubel", &[Value::from(1)], &ctx);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::UNKNOWN_FUNCTION);
        assert!(err.suggestion.as_deref().unwrap().contains("double"));
    }

    #[test]
    fn test_arity_mismatch() {
        let ctx = ctx();
        let result = ctx.registry.call_function("double", &[], &ctx);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::ARITY_MISMATCH);
        assert!(err.message.contains("expects 1"));

        let result = ctx.registry.call_function("round", &[Value::from(1), Value::from(2), Value::from(3)], &ctx);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::ARITY_MISMATCH);
        assert!(err.message.contains("1 to 2"));

        let ok = ctx.registry.call_function("round", &[Value::from(1)], &ctx);
        assert!(!ok.is_error());
    }

    #[test]
    fn test_list_functions_sorted() {
        let registry = PluginRegistry::new().with_function(Round).with_function(Double);
        let names: Vec<&str> = registry.list_functions(None).iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["Round", "double"]);
        assert!(registry.list_functions(Some("trig")).is_empty());
    }

    #[test]
    fn test_constants() {
        let registry = PluginRegistry::new()
            .with_constant(ConstantDef::new("c", "299792458", "m/s", "CODATA", "physics"));
        let def = registry.get_constant("C").unwrap();
        assert_eq!(def.unit, "m/s");
        assert_eq!(registry.list_constants().len(), 1);
    }

    #[test]
    fn test_similarity_prefers_prefix() {
        assert!(similarity_score("sq", "sqrt") > similarity_score("sq", "cos"));
    }
}
