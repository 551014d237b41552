//! Runtime value extracted from a literal.

use std::fmt::Display;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::ast::{Expr, UnaryOp};
use crate::util::encode_sql_string;

#[derive(Debug, Error, PartialEq)]
pub enum ConvertError {
    #[error("{0} is not a value")]
    NotAValue(String),

    #[error("\"{0}\" is not a 64-bit integer")]
    Number(String),

    #[error("\"{0}\" is not a valid hex literal")]
    Hex(String),
}

/// A value the executor routes on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Int(i64),
    Uint(u64),
    Bytes(Vec<u8>),
    /// Reference to a bind variable, resolved at execution time.
    Bind(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(i) => write!(f, "{}", i),
            Self::Uint(u) => write!(f, "{}", u),
            Self::Bytes(b) => write!(f, "{}", encode_sql_string(&String::from_utf8_lossy(b))),
            Self::Bind(name) => write!(f, ":{}", name),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Uint(u) => serializer.serialize_u64(*u),
            Self::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
            Self::Bind(name) => serializer.serialize_str(&format!(":{}", name)),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }
}

impl TryFrom<&Expr> for Value {
    type Error = ConvertError;

    fn try_from(expr: &Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Null => Ok(Value::Null),
            Expr::BindArg(name) => Ok(Value::Bind(name.clone())),
            Expr::Str(s) => Ok(Value::Bytes(s.as_bytes().to_vec())),
            Expr::Num(text) => parse_number(text).ok_or_else(|| ConvertError::Number(text.clone())),
            Expr::HexNum(hex) => decode_hex(hex)
                .map(Value::Bytes)
                .ok_or_else(|| ConvertError::Hex(hex.clone())),
            Expr::Unary {
                op: op @ (UnaryOp::Minus | UnaryOp::Plus),
                expr,
            } => match expr.as_ref() {
                Expr::Num(text) => {
                    let text = if *op == UnaryOp::Minus {
                        format!("-{}", text)
                    } else {
                        text.clone()
                    };
                    parse_number(&text).ok_or(ConvertError::Number(text))
                }
                _ => Err(ConvertError::NotAValue(expr.to_string())),
            },
            _ => Err(ConvertError::NotAValue(expr.to_string())),
        }
    }
}

/// Parse an integer literal: decimal, `0x` hex, `0b` binary,
/// `0o` or leading-zero octal. Signed if it fits, unsigned otherwise.
fn parse_number(text: &str) -> Option<Value> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = if let Some(digits) = strip_radix(unsigned, 'x') {
        (16, digits)
    } else if let Some(digits) = strip_radix(unsigned, 'b') {
        (2, digits)
    } else if let Some(digits) = strip_radix(unsigned, 'o') {
        (8, digits)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()?;

    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return None;
        }
        Some(Value::Int((magnitude as i64).wrapping_neg()))
    } else if magnitude <= i64::MAX as u64 {
        Some(Value::Int(magnitude as i64))
    } else {
        Some(Value::Uint(magnitude))
    }
}

fn strip_radix(text: &str, prefix: char) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    rest.strip_prefix(prefix)
        .or_else(|| rest.strip_prefix(prefix.to_ascii_uppercase()))
}

fn decode_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 || !hex.is_ascii() {
        return None;
    }

    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
