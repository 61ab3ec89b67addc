//! Trigonometric functions
//!
//! Angles are dimensionless; `deg`, `grad` and friends fold to radians
//! before the series runs, so `sin(90 deg)` is 1.

use quanta_plugin::prelude::*;
use super::{into_value, plain_arg};

pub struct Sin;
pub struct Cos;
pub struct Tan;

static ANGLE_ARGS: [ArgMeta; 1] = [ArgMeta::required("x", "Number", "Angle in radians, or with an angle unit")];

static SIN_EXAMPLES: [&str; 2] = ["sin(0) → 0", "sin(90 deg) → 1"];
static SIN_RELATED: [&str; 2] = ["cos", "tan"];

static COS_EXAMPLES: [&str; 2] = ["cos(0) → 1", "cos(pi) → -1"];
static COS_RELATED: [&str; 2] = ["sin", "tan"];

static TAN_EXAMPLES: [&str; 2] = ["tan(0) → 0", "tan(45 deg) → 1"];
static TAN_RELATED: [&str; 2] = ["sin", "cos"];

impl FunctionPlugin for Sin {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "sin",
            description: "Sine function",
            usage: "sin(x)",
            args: &ANGLE_ARGS,
            returns: "Number",
            examples: &SIN_EXAMPLES,
            category: "trig",
            source: None,
            related: &SIN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(plain_arg("sin", "x", &args[0]).map(|x| x.sin(ctx.precision())))
    }
}

impl FunctionPlugin for Cos {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "cos",
            description: "Cosine function",
            usage: "cos(x)",
            args: &ANGLE_ARGS,
            returns: "Number",
            examples: &COS_EXAMPLES,
            category: "trig",
            source: None,
            related: &COS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(plain_arg("cos", "x", &args[0]).map(|x| x.cos(ctx.precision())))
    }
}

impl FunctionPlugin for Tan {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "tan",
            description: "Tangent function",
            usage: "tan(x)",
            args: &ANGLE_ARGS,
            returns: "Number",
            examples: &TAN_EXAMPLES,
            category: "trig",
            source: None,
            related: &TAN_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(plain_arg("tan", "x", &args[0]).and_then(|x| Ok(x.tan(ctx.precision())?)))
    }
}
