//! Expression evaluator
//!
//! Walks an expression tree and produces a [`Value`]. Evaluation never fails
//! as control flow: problems become `Value::Error` and flow up the tree, the
//! first error in child order winning. Each propagation step appends a note
//! so the renderer can show where an error came from.

use crate::date;
use crate::expr::{BinOp, Expr, UnaryOp};
use crate::property;
use quanta_core::{Number, QuantaDateTime, QuantaError, Quantity, Unit, Value};
use quanta_plugin::EvalContext;
use quanta_units::{parse_unit, UNITS};
use tracing::{debug, trace};

/// Expression evaluator
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate a tree; never panics, never fails
    pub fn evaluate(&self, expr: &Expr, ctx: &EvalContext) -> Value {
        let value = self.eval(expr, ctx, 0);
        if let Value::Error(e) = &value {
            debug!(code = %e.code, message = %e.message, "evaluation produced an error");
        }
        value
    }

    fn eval(&self, expr: &Expr, ctx: &EvalContext, depth: usize) -> Value {
        if depth > ctx.config.max_depth {
            return Value::Error(QuantaError::too_complex(ctx.config.max_depth).at_node(expr.kind()));
        }
        trace!(node = expr.kind(), depth, "eval");

        let value = match expr {
            Expr::Unit { name } => self.eval_name(name, ctx),
            Expr::Quote { string } => Value::Text(string.clone()),
            Expr::Const { value } => match Number::from_numeric_parts(value).and_then(|n| n.within_limits(&ctx.config)) {
                Ok(n) => Value::number(n),
                Err(e) => Value::Error(e.into()),
            },
            Expr::Date { tokens } => match date::decode(tokens, &ctx.now) {
                Ok(dt) => Value::DateTime(dt),
                Err(e) => Value::Error(e),
            },
            Expr::BinOp { op, left, right } => {
                let l = self.eval(left, ctx, depth + 1);
                if let Value::Error(e) = l {
                    return Value::Error(e.with_note("from left operand"));
                }
                let r = self.eval(right, ctx, depth + 1);
                if let Value::Error(e) = r {
                    return Value::Error(e.with_note("from right operand"));
                }
                self.eval_binop(*op, l, r, ctx)
            }
            Expr::UnaryOp { op, expr } => {
                let v = self.eval(expr, ctx, depth + 1);
                if let Value::Error(e) = v {
                    return Value::Error(e.with_note("from operand"));
                }
                self.eval_unaryop(*op, v)
            }
            Expr::Mul { exprs } => self.eval_mul(exprs, ctx, depth),
            Expr::Of { property, expr } => {
                let v = self.eval(expr, ctx, depth + 1);
                if let Value::Error(e) = v {
                    return Value::Error(e.with_note(format!("from operand of '{}'", property)));
                }
                property::extract(property, v, ctx)
            }
            Expr::Call { func, args } => {
                let mut evaluated = Vec::with_capacity(args.len());
                for (i, arg) in args.iter().enumerate() {
                    match self.eval(arg, ctx, depth + 1) {
                        Value::Error(e) => {
                            return Value::Error(e.with_note(format!("from argument {} of {}()", i + 1, func)));
                        }
                        v => evaluated.push(v),
                    }
                }
                ctx.registry.call_function(func, &evaluated, ctx)
            }
            Expr::Error { message } => Value::Error(QuantaError::embedded(message.clone())),
        };

        let value = match value {
            Value::Quantity(q) => match q.value.check_range(&ctx.config) {
                Ok(()) => Value::Quantity(q),
                Err(e) => Value::Error(e.into()),
            },
            v => v,
        };
        match value {
            Value::Error(e) => Value::Error(e.at_node(expr.kind())),
            v => v,
        }
    }

    /// A bare name: unit first, then constant, then `now`
    fn eval_name(&self, name: &str, ctx: &EvalContext) -> Value {
        if let Some(unit) = UNITS.lookup(name) {
            return Value::Quantity(Quantity::new(Number::from_i64(1), unit));
        }

        if let Some((def, value)) = ctx.constant(name) {
            trace!(constant = %def.name, "resolved constant");
            let result = value.and_then(|n| Ok(Quantity::new(n, parse_unit(&def.unit)?)));
            return match result {
                Ok(q) => Value::Quantity(q),
                Err(e) => Value::Error(e),
            };
        }

        if name.eq_ignore_ascii_case("now") {
            return Value::DateTime(ctx.now.clone());
        }

        match UNITS.resolve(name) {
            Ok(unit) => Value::Quantity(Quantity::new(Number::from_i64(1), unit)),
            Err(e) => Value::Error(e),
        }
    }

    fn eval_binop(&self, op: BinOp, left: Value, right: Value, ctx: &EvalContext) -> Value {
        let config = &ctx.config;
        let result = match (op, &left, &right) {
            (BinOp::Add, Value::Quantity(l), Value::Quantity(r)) => l.add(r, config).map(Value::Quantity).map_err(QuantaError::from),
            (BinOp::Sub, Value::Quantity(l), Value::Quantity(r)) => l.sub(r, config).map(Value::Quantity).map_err(QuantaError::from),
            (BinOp::Frac, Value::Quantity(l), Value::Quantity(r)) => l.div(r, config).map(Value::Quantity).map_err(QuantaError::from),
            (BinOp::Pow, Value::Quantity(l), Value::Quantity(r)) => l.pow(r, config).map(Value::Quantity).map_err(QuantaError::from),
            (BinOp::Equals, Value::Quantity(l), Value::Quantity(r)) => l.equals(r, config).map(Value::Bool).map_err(QuantaError::from),

            // Date arithmetic
            (BinOp::Add, Value::DateTime(dt), Value::Quantity(d))
            | (BinOp::Add, Value::Quantity(d), Value::DateTime(dt)) => shift(dt, d, false),
            (BinOp::Sub, Value::DateTime(dt), Value::Quantity(d)) => shift(dt, d, true),
            (BinOp::Sub, Value::DateTime(l), Value::DateTime(r)) => Ok(Value::Quantity(l.difference(r))),
            (BinOp::Equals, Value::DateTime(l), Value::DateTime(r)) => Ok(Value::Bool(l.as_nanos() == r.as_nanos())),

            (BinOp::Add, Value::Text(l), Value::Text(r)) => Ok(Value::Text(format!("{}{}", l, r))),
            (BinOp::Equals, Value::Text(l), Value::Text(r)) => Ok(Value::Bool(l == r)),
            (BinOp::Equals, Value::Bool(l), Value::Bool(r)) => Ok(Value::Bool(l == r)),

            _ => Err(QuantaError::type_error(
                expected_operands(op),
                &format!("{} and {}", left.type_name(), right.type_name()),
            )),
        };

        match result {
            Ok(value) => {
                if lost_exactness(&left, &right, &value) {
                    debug!(op = ?op, "exact operands gave an approximate result");
                }
                value
            }
            Err(e) => Value::Error(e),
        }
    }

    fn eval_unaryop(&self, op: UnaryOp, value: Value) -> Value {
        match (op, value) {
            (UnaryOp::Positive, v) => v,
            (UnaryOp::Negative, Value::Quantity(q)) => Value::Quantity(q.neg()),
            (UnaryOp::Negative, other) => Value::Error(QuantaError::type_error("Quantity", other.type_name())),
        }
    }

    /// Multiply left to right. A plain number followed by a bare unit takes
    /// that unit ("5 meters", "20 °C", "15 %") instead of multiplying by it.
    /// A quoted name among the factors counts things of that name
    /// ("3 'apples'"), each name being its own dimension.
    fn eval_mul(&self, exprs: &[Expr], ctx: &EvalContext, depth: usize) -> Value {
        let mut acc: Option<Quantity> = None;

        for (i, expr) in exprs.iter().enumerate() {
            if let (Some(q), Expr::Unit { name }) = (&acc, expr) {
                if q.is_plain() {
                    if let Some(unit) = UNITS.lookup(name) {
                        trace!(unit = %unit.symbol, "juxtaposition");
                        acc = Some(Quantity::new(q.value.clone(), unit));
                        continue;
                    }
                }
            }

            if let Expr::Quote { string } = expr {
                let name = string.trim();
                if !name.is_empty() {
                    trace!(unit = name, "ad-hoc unit");
                    let one = Quantity::new(Number::from_i64(1), Unit::ad_hoc(name));
                    acc = Some(match acc {
                        None => one,
                        Some(product) => match product.mul(&one, &ctx.config) {
                            Ok(q) => q,
                            Err(e) => return Value::Error(e.into()),
                        },
                    });
                    continue;
                }
            }

            let factor = match self.eval(expr, ctx, depth + 1) {
                Value::Quantity(q) => q,
                Value::Error(e) => return Value::Error(e.with_note(format!("from factor {}", i + 1))),
                other => {
                    return Value::Error(QuantaError::type_error("Quantity", other.type_name()).with_note(format!("factor {}", i + 1)));
                }
            };

            acc = Some(match acc {
                None => factor,
                Some(product) => match product.mul(&factor, &ctx.config) {
                    Ok(q) => q,
                    Err(e) => return Value::Error(e.into()),
                },
            });
        }

        match acc {
            Some(q) => Value::Quantity(q),
            None => Value::number(Number::from_i64(1)),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn shift(dt: &QuantaDateTime, duration: &Quantity, subtract: bool) -> Result<Value, QuantaError> {
    let shifted = if subtract {
        dt.sub_quantity(duration)?
    } else {
        dt.add_quantity(duration)?
    };
    Ok(Value::DateTime(shifted))
}

fn expected_operands(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "two quantities, a date and a duration, or two texts",
        BinOp::Sub => "two quantities, a date and a duration, or two dates",
        BinOp::Frac | BinOp::Pow => "two quantities",
        BinOp::Equals => "two values of the same type",
    }
}

fn lost_exactness(left: &Value, right: &Value, result: &Value) -> bool {
    let exact = |v: &Value| v.as_quantity().map(|q| q.value.is_exact());
    matches!(
        (exact(left), exact(right), exact(result)),
        (Some(true), Some(true), Some(false))
    )
}
