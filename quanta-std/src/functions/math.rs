//! Core math functions
//!
//! All of them accept quantities. `abs`, `floor`, `ceil` and `round` keep the
//! unit, `sqrt` and `pow` carry it through the unit algebra, `ln` and `exp`
//! need a dimensionless argument.

use quanta_plugin::prelude::*;
use super::{int_arg, into_value, plain_arg, quantity_arg};

pub struct Sqrt;
pub struct Ln;
pub struct Exp;
pub struct Pow;
pub struct Abs;
pub struct Round;
pub struct Floor;
pub struct Ceil;

static SQRT_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Quantity", "Value (must be non-negative)")];
static SQRT_EXAMPLES: [&str; 3] = ["sqrt(16) → 4", "sqrt(2) → 1.41421356237", "sqrt(9 m^2) → 3 m"];
static SQRT_RELATED: [&str; 2] = ["pow", "exp"];

static LN_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Value (must be positive)")];
static LN_EXAMPLES: [&str; 2] = ["ln(e) → 1", "ln(1) → 0"];
static LN_RELATED: [&str; 1] = ["exp"];

static EXP_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Exponent")];
static EXP_EXAMPLES: [&str; 2] = ["exp(0) → 1", "exp(1) → 2.71828182846"];
static EXP_RELATED: [&str; 2] = ["ln", "pow"];

static POW_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("base", "Quantity", "Base value"),
    ArgMeta::required("exponent", "Number", "Dimensionless exponent"),
];
static POW_EXAMPLES: [&str; 3] = ["pow(2, 10) → 1024", "pow(2, -1) → 0.5", "pow(3 m, 2) → 9 m^2"];
static POW_RELATED: [&str; 2] = ["sqrt", "exp"];

static ABS_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Quantity", "Value")];
static ABS_EXAMPLES: [&str; 2] = ["abs(-5) → 5", "abs(-3 m) → 3 m"];
static ABS_RELATED: [&str; 0] = [];

/// Decimal places `round` accepts in either direction
const MAX_ROUND_PLACES: i32 = 1000;

static ROUND_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("x", "Quantity", "Value to round"),
    ArgMeta::optional("places", "Number", "Decimal places to keep", "0"),
];
static ROUND_EXAMPLES: [&str; 3] = ["round(2.5) → 3", "round(-2.5) → -3", "round(3.14159, 2) → 3.14"];
static ROUND_RELATED: [&str; 2] = ["floor", "ceil"];

static FLOOR_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Quantity", "Value to floor")];
static FLOOR_EXAMPLES: [&str; 2] = ["floor(3.7) → 3", "floor(-2.3) → -3"];
static FLOOR_RELATED: [&str; 2] = ["ceil", "round"];

static CEIL_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Quantity", "Value to ceil")];
static CEIL_EXAMPLES: [&str; 2] = ["ceil(3.2) → 4", "ceil(-2.7) → -2"];
static CEIL_RELATED: [&str; 2] = ["floor", "round"];

/// Apply `f` to the magnitude, keeping the unit
fn map_magnitude(func: &str, value: &Value, f: impl Fn(&Number) -> Number) -> Value {
    into_value(quantity_arg(func, "x", value).map(|q| Quantity::new(f(&q.value), q.unit.clone())))
}

impl FunctionPlugin for Sqrt {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sqrt",
            description: "Square root; units need whole square roots (m^2 → m)",
            usage: "sqrt(x)",
            args: &SQRT_ARGS,
            returns: "Quantity",
            examples: &SQRT_EXAMPLES,
            category: "math",
            source: None,
            related: &SQRT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(quantity_arg("sqrt", "x", &args[0]).and_then(|q| {
            Ok(q.clone().fold_dimensionless().sqrt(&ctx.config)?)
        }))
    }
}

impl FunctionPlugin for Ln {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ln",
            description: "Natural logarithm",
            usage: "ln(x)",
            args: &LN_ARGS,
            returns: "Number",
            examples: &LN_EXAMPLES,
            category: "math",
            source: None,
            related: &LN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(plain_arg("ln", "x", &args[0]).and_then(|n| Ok(n.ln(ctx.precision())?)))
    }
}

impl FunctionPlugin for Exp {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "exp",
            description: "Exponential function (e^x)",
            usage: "exp(x)",
            args: &EXP_ARGS,
            returns: "Number",
            examples: &EXP_EXAMPLES,
            category: "math",
            source: None,
            related: &EXP_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(plain_arg("exp", "x", &args[0]).map(|n| n.exp(ctx.precision())))
    }
}

impl FunctionPlugin for Pow {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "pow",
            description: "Raise to a power; integer powers stay exact",
            usage: "pow(base, exponent)",
            args: &POW_ARGS,
            returns: "Quantity",
            examples: &POW_EXAMPLES,
            category: "math",
            source: None,
            related: &POW_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        let result = quantity_arg("pow", "base", &args[0]).and_then(|base| {
            let exponent = quantity_arg("pow", "exponent", &args[1])?;
            Ok(base.pow(exponent, &ctx.config)?)
        });
        into_value(result)
    }
}

impl FunctionPlugin for Abs {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "abs",
            description: "Absolute value",
            usage: "abs(x)",
            args: &ABS_ARGS,
            returns: "Quantity",
            examples: &ABS_EXAMPLES,
            category: "math",
            source: None,
            related: &ABS_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        map_magnitude("abs", &args[0], Number::abs)
    }
}

impl FunctionPlugin for Round {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "round",
            description: "Round half away from zero, optionally to decimal places",
            usage: "round(x, places?)",
            args: &ROUND_ARGS,
            returns: "Quantity",
            examples: &ROUND_EXAMPLES,
            category: "math",
            source: None,
            related: &ROUND_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        let places: i32 = match args.get(1) {
            Some(arg) => match int_arg("round", "places", arg) {
                Ok(p) => p,
                Err(e) => return Value::Error(e),
            },
            None => 0,
        };
        if places == 0 {
            return map_magnitude("round", &args[0], Number::round);
        }
        if places.unsigned_abs() > MAX_ROUND_PLACES.unsigned_abs() {
            return Value::Error(QuantaError::domain_error(format!(
                "round() places must be within ±{}, got {}",
                MAX_ROUND_PLACES, places
            )));
        }

        let scale = Number::from_scaled(1, places);
        let result = quantity_arg("round", "x", &args[0]).and_then(|q| {
            let rounded = q.value.mul(&scale).round().checked_div(&scale)?;
            Ok(Quantity::new(rounded, q.unit.clone()))
        });
        into_value(result)
    }
}

impl FunctionPlugin for Floor {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "floor",
            description: "Round toward negative infinity",
            usage: "floor(x)",
            args: &FLOOR_ARGS,
            returns: "Quantity",
            examples: &FLOOR_EXAMPLES,
            category: "math",
            source: None,
            related: &FLOOR_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        map_magnitude("floor", &args[0], Number::floor)
    }
}

impl FunctionPlugin for Ceil {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "ceil",
            description: "Round toward positive infinity",
            usage: "ceil(x)",
            args: &CEIL_ARGS,
            returns: "Quantity",
            examples: &CEIL_EXAMPLES,
            category: "math",
            source: None,
            related: &CEIL_RELATED,
        }
    }

    fn call(&self, args: &[Value], _ctx: &EvalContext) -> Value {
        map_magnitude("ceil", &args[0], Number::ceil)
    }
}
