//! Unit conversion and inspection functions

use quanta_plugin::prelude::*;
use quanta_core::BASE_COUNT;
use crate::parse::parse_unit;
use crate::units::UNITS;

/// SI symbol of each base dimension
const SI_BASE_SYMBOLS: [&str; BASE_COUNT] = ["m", "kg", "s", "A", "K", "mol", "cd", "$", "bit"];

/// Coherent SI unit for a dimension (`kg·m/s^2` for force)
pub fn si_unit(dimension: &Dimension, config: &NumericConfig) -> Result<Unit, QuantaError> {
    let mut unit = Unit::dimensionless();
    for (symbol, &exp) in SI_BASE_SYMBOLS.iter().zip(dimension.exponents.iter()) {
        if exp != 0 {
            unit = unit.multiply(&UNITS.resolve(symbol)?.power(exp, config)?)?;
        }
    }
    Ok(unit)
}

/// A unit given either as text ("km/h") or as a quantity carrying it
fn unit_arg(func: &str, arg: &str, value: &Value) -> Result<Unit, QuantaError> {
    match value {
        Value::Text(s) => parse_unit(s),
        Value::Quantity(q) => Ok(q.unit.clone()),
        other => Err(QuantaError::arg_type(func, arg, "Text or Quantity", other.type_name())),
    }
}

fn quantity_arg<'a>(func: &str, arg: &str, value: &'a Value) -> Result<&'a Quantity, QuantaError> {
    value
        .as_quantity()
        .ok_or_else(|| QuantaError::arg_type(func, arg, "Quantity", value.type_name()))
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Quantity", "Quantity to convert"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"mi\")"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(100 km, \"mi\") → 62.1371192237 mi",
    "convert(100 °C, \"°F\") → 212 °F",
    "convert(1 kg, \"lb\") → 2.20462262185 lb",
];

static CONVERT_RELATED: [&str; 2] = ["to_base", "compatible"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Express a quantity in another unit of the same dimension",
            usage: "convert(value, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Quantity",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            source: None,
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let result = quantity_arg("convert", "value", &args[0]).and_then(|q| {
            let target = unit_arg("convert", "to_unit", &args[1])?;
            Ok(q.convert_to(&target)?)
        });
        match result {
            Ok(q) => Value::Quantity(q),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ to_base ============

pub struct ToBase;

static TO_BASE_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Quantity", "Quantity to convert")];

static TO_BASE_EXAMPLES: [&str; 2] = [
    "to_base(5 km) → 5000 m",
    "to_base(100 °C) → 373.15 K",
];

static TO_BASE_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for ToBase {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_base",
            description: "Express a quantity in coherent SI base units",
            usage: "to_base(value)",
            args: &TO_BASE_ARGS,
            returns: "Quantity",
            examples: &TO_BASE_EXAMPLES,
            category: "units",
            source: None,
            related: &TO_BASE_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let result = quantity_arg("to_base", "value", &args[0]).and_then(|q| {
            let mut base = si_unit(&q.dimension(), &ctx.config)?;
            for (name, &exp) in &q.unit.ad_hoc {
                base = base.multiply(&Unit::ad_hoc(name).power(exp, &ctx.config)?)?;
            }
            Ok(Quantity::new(q.si_value(), base).fold_dimensionless())
        });
        match result {
            Ok(q) => Value::Quantity(q),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ magnitude ============

pub struct Magnitude;

static MAGNITUDE_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Quantity", "Quantity to inspect")];

static MAGNITUDE_EXAMPLES: [&str; 2] = ["magnitude(5 km) → 5", "magnitude of 3 h → 3"];

static MAGNITUDE_RELATED: [&str; 2] = ["unit", "dimension"];

impl FunctionPlugin for Magnitude {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "magnitude",
            description: "The number of a quantity, without its unit",
            usage: "magnitude(value)",
            args: &MAGNITUDE_ARGS,
            returns: "Number",
            examples: &MAGNITUDE_EXAMPLES,
            category: "units",
            source: None,
            related: &MAGNITUDE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match quantity_arg("magnitude", "value", &args[0]) {
            Ok(q) => Value::number(q.value.clone()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ unit ============

pub struct UnitOf;

static UNIT_OF_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Quantity", "Quantity to inspect")];

static UNIT_OF_EXAMPLES: [&str; 2] = ["unit(5 km) → \"km\"", "unit of 9.81 m/s^2 → \"m/s^2\""];

static UNIT_OF_RELATED: [&str; 2] = ["magnitude", "dimension"];

impl FunctionPlugin for UnitOf {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "unit",
            description: "The unit symbol of a quantity",
            usage: "unit(value)",
            args: &UNIT_OF_ARGS,
            returns: "Text",
            examples: &UNIT_OF_EXAMPLES,
            category: "units",
            source: None,
            related: &UNIT_OF_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match quantity_arg("unit", "value", &args[0]) {
            Ok(q) => Value::Text(q.unit.symbol.clone()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ dimension ============

pub struct DimensionOf;

static DIMENSION_OF_ARGS: [ArgMeta; 1] = [ArgMeta::required("value", "Quantity", "Quantity or unit to inspect")];

static DIMENSION_OF_EXAMPLES: [&str; 3] = [
    "dimension(5 km) → \"length\"",
    "dimension(\"N\") → \"force\"",
    "dimension(\"m^4\") → \"length^4\"",
];

static DIMENSION_OF_RELATED: [&str; 2] = ["dimensions", "compatible"];

impl FunctionPlugin for DimensionOf {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "dimension",
            description: "The name of a quantity's dimension",
            usage: "dimension(value)",
            args: &DIMENSION_OF_ARGS,
            returns: "Text",
            examples: &DIMENSION_OF_EXAMPLES,
            category: "units",
            source: None,
            related: &DIMENSION_OF_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match unit_arg("dimension", "value", &args[0]) {
            Ok(unit) => Value::Text(unit.describe_dimension()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ dimensions ============

pub struct Dimensions;

static DIMENSIONS_ARGS: [ArgMeta; 1] = [ArgMeta::required("unit", "Text", "Unit string like \"m/s\", or a quantity")];

static DIMENSIONS_EXAMPLES: [&str; 3] = [
    "dimensions(\"m\") → \"L\"",
    "dimensions(\"m/s\") → \"L T^-1\"",
    "dimensions(\"N\") → \"L M T^-2\"",
];

static DIMENSIONS_RELATED: [&str; 2] = ["dimension", "compatible"];

impl FunctionPlugin for Dimensions {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "dimensions",
            description: "Get the dimensional signature of a unit",
            usage: "dimensions(unit)",
            args: &DIMENSIONS_ARGS,
            returns: "Text",
            examples: &DIMENSIONS_EXAMPLES,
            category: "units",
            source: None,
            related: &DIMENSIONS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match unit_arg("dimensions", "unit", &args[0]) {
            Ok(unit) => Value::Text(unit.dimension.to_string()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ is_dimensionless ============

pub struct IsDimensionless;

static IS_DIMLESS_ARGS: [ArgMeta; 1] = [ArgMeta::required("unit", "Text", "Unit string, or a quantity")];

static IS_DIMLESS_EXAMPLES: [&str; 3] = [
    "is_dimensionless(\"rad\") → true",
    "is_dimensionless(\"m\") → false",
    "is_dimensionless(\"m/km\") → true",
];

static IS_DIMLESS_RELATED: [&str; 2] = ["dimensions", "compatible"];

impl FunctionPlugin for IsDimensionless {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "is_dimensionless",
            description: "Check if a unit is dimensionless",
            usage: "is_dimensionless(unit)",
            args: &IS_DIMLESS_ARGS,
            returns: "Bool",
            examples: &IS_DIMLESS_EXAMPLES,
            category: "units",
            source: None,
            related: &IS_DIMLESS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        match unit_arg("is_dimensionless", "unit", &args[0]) {
            Ok(unit) => Value::Bool(unit.is_dimensionless()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ compatible ============

pub struct Compatible;

static COMPATIBLE_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("unit1", "Text", "First unit or quantity"),
    ArgMeta::required("unit2", "Text", "Second unit or quantity"),
];

static COMPATIBLE_EXAMPLES: [&str; 3] = [
    "compatible(\"km\", \"mi\") → true",
    "compatible(\"m\", \"s\") → false",
    "compatible(\"N\", \"kg*m/s^2\") → true",
];

static COMPATIBLE_RELATED: [&str; 2] = ["dimensions", "convert"];

impl FunctionPlugin for Compatible {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "compatible",
            description: "Check if two units are dimensionally compatible",
            usage: "compatible(unit1, unit2)",
            args: &COMPATIBLE_ARGS,
            returns: "Bool",
            examples: &COMPATIBLE_EXAMPLES,
            category: "units",
            source: None,
            related: &COMPATIBLE_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let units = unit_arg("compatible", "unit1", &args[0])
            .and_then(|a| Ok((a, unit_arg("compatible", "unit2", &args[1])?)));
        match units {
            Ok((a, b)) => Value::Bool(a.is_compatible(&b)),
            Err(e) => Value::Error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn eval_ctx() -> EvalContext {
        EvalContext::new(Arc::new(PluginRegistry::new()))
    }

    fn qty(n: i64, unit: &str) -> Value {
        Value::Quantity(Quantity::new(Number::from_i64(n), parse_unit(unit).unwrap()))
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_convert_length() {
        let result = Convert.call(&[qty(1, "km"), text("m")], &eval_ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.unit.symbol, "m");
        assert_eq!(q.value, Number::from_i64(1000));
        assert!(q.value.is_exact());
    }

    #[test]
    fn test_convert_temperature() {
        let result = Convert.call(&[qty(0, "celsius"), text("K")], &eval_ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.value, Number::from_ratio(27_315, 100));
    }

    #[test]
    fn test_convert_incompatible() {
        let result = Convert.call(&[qty(1, "m"), text("s")], &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::INCOMPATIBLE_UNITS);

        let result = Convert.call(&[qty(1, "m"), text("parsnips")], &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::UNKNOWN_UNIT);

        let result = Convert.call(&[text("m"), text("km")], &eval_ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);
    }

    #[test]
    fn test_to_base() {
        let result = ToBase.call(&[qty(5, "km")], &eval_ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.unit.symbol, "m");
        assert_eq!(q.value, Number::from_i64(5000));

        let result = ToBase.call(&[qty(2, "kN")], &eval_ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.unit.symbol, "kg·m/s^2");
        assert_eq!(q.value, Number::from_i64(2000));

        let density = Unit::ad_hoc("apples").divide(&parse_unit("km").unwrap()).unwrap();
        let result = ToBase.call(&[Value::Quantity(Quantity::new(Number::from_i64(5), density))], &eval_ctx());
        let q = result.as_quantity().unwrap();
        assert_eq!(q.unit.symbol, "apples/m");
        assert_eq!(q.value, Number::from_ratio(1, 200));
    }

    #[test]
    fn test_magnitude_and_unit() {
        let ctx = eval_ctx();
        let result = Magnitude.call(&[qty(5, "km")], &ctx);
        assert_eq!(result.as_number(), Some(&Number::from_i64(5)));

        let result = UnitOf.call(&[qty(5, "km/h")], &ctx);
        assert_eq!(result.as_text(), Some("km/h"));
    }

    #[test]
    fn test_dimension_names() {
        let ctx = eval_ctx();
        assert_eq!(DimensionOf.call(&[qty(5, "km")], &ctx).as_text(), Some("length"));
        assert_eq!(DimensionOf.call(&[text("m^4")], &ctx).as_text(), Some("length^4"));
        assert_eq!(Dimensions.call(&[text("m/s")], &ctx).as_text(), Some("L T^-1"));
    }

    #[test]
    fn test_is_dimensionless() {
        let ctx = eval_ctx();
        assert_eq!(IsDimensionless.call(&[text("rad")], &ctx).as_bool(), Some(true));
        assert_eq!(IsDimensionless.call(&[text("m")], &ctx).as_bool(), Some(false));
    }

    #[test]
    fn test_compatible() {
        let ctx = eval_ctx();
        assert_eq!(Compatible.call(&[text("km"), text("mi")], &ctx).as_bool(), Some(true));
        assert_eq!(Compatible.call(&[text("m"), text("s")], &ctx).as_bool(), Some(false));
        assert_eq!(Compatible.call(&[text("N"), text("kg*m/s^2")], &ctx).as_bool(), Some(true));
    }
}
