//! Expression tree
//!
//! Produced by an external parser, usually as JSON:
//! `{"type": "mul", "exprs": [{"type": "const", "value": {...}}, {"type": "unit", "name": "m"}]}`.
//! Trees are read-only; the evaluator never mutates them.

use quanta_core::{Number, NumericConfig, NumericParts};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expr {
    /// Named unit, constant, or `now`
    Unit { name: String },
    /// Quoted string literal
    Quote { string: String },
    Const { value: NumericParts },
    /// Date or time literal as the parser tokenized it
    Date { tokens: Vec<DateToken> },
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryOp { op: UnaryOp, expr: Box<Expr> },
    /// Multiplication chain, including juxtaposition ("5 meters")
    Mul { exprs: Vec<Expr> },
    /// Property extraction ("20% of 50", "year of 2025-06-15")
    Of { property: String, expr: Box<Expr> },
    Call { func: String, args: Vec<Expr> },
    /// Error the parser embedded in the tree
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinOp {
    Add,
    Sub,
    Frac,
    Pow,
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnaryOp {
    Negative,
    Positive,
}

/// Pieces of a date literal; joined back into text before decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DateToken {
    Number { value: String },
    Literal { value: String },
    Dash,
    Colon,
    Plus,
    Space,
    Dot,
}

impl Expr {
    /// Node kind as it appears in the `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Expr::Unit { .. } => "unit",
            Expr::Quote { .. } => "quote",
            Expr::Const { .. } => "const",
            Expr::Date { .. } => "date",
            Expr::BinOp { .. } => "binop",
            Expr::UnaryOp { .. } => "unaryop",
            Expr::Mul { .. } => "mul",
            Expr::Of { .. } => "of",
            Expr::Call { .. } => "call",
            Expr::Error { .. } => "error",
        }
    }

    // ========== Builders ==========

    pub fn unit(name: impl Into<String>) -> Self {
        Expr::Unit { name: name.into() }
    }

    pub fn quote(string: impl Into<String>) -> Self {
        Expr::Quote { string: string.into() }
    }

    pub fn int(n: i64) -> Self {
        Expr::Const { value: NumericParts::integer(n) }
    }

    /// Literal `numer/denom`
    pub fn fraction(numer: i64, denom: i64) -> Self {
        Expr::Const { value: NumericParts::fraction(numer, denom) }
    }

    /// Exact decimal literal such as "0.1"
    pub fn decimal(text: &str) -> Self {
        let value = Number::from_str(text)
            .map(|n| n.to_parts(&NumericConfig::default()))
            .unwrap_or_else(|_| NumericParts {
                numer: text.to_string(),
                denom: "1".to_string(),
                exact_value: Some(text.to_string()),
                approx_value: None,
                approximate: false,
            });
        Expr::Const { value }
    }

    pub fn date(tokens: Vec<DateToken>) -> Self {
        Expr::Date { tokens }
    }

    pub fn binop(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unaryop(op: UnaryOp, expr: Expr) -> Self {
        Expr::UnaryOp { op, expr: Box::new(expr) }
    }

    pub fn mul(exprs: Vec<Expr>) -> Self {
        Expr::Mul { exprs }
    }

    pub fn of(property: impl Into<String>, expr: Expr) -> Self {
        Expr::Of {
            property: property.into(),
            expr: Box::new(expr),
        }
    }

    pub fn call(func: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            func: func.into(),
            args,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Expr::Error { message: message.into() }
    }
}

impl DateToken {
    /// Source text of the token
    pub fn text(&self) -> &str {
        match self {
            DateToken::Number { value } | DateToken::Literal { value } => value,
            DateToken::Dash => "-",
            DateToken::Colon => ":",
            DateToken::Plus => "+",
            DateToken::Space => " ",
            DateToken::Dot => ".",
        }
    }
}
