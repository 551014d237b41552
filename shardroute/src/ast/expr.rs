//! Value expressions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::ColIdent;
use crate::util::{encode_sql_string, format_ident};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Minus,
    Plus,
    Tilde,
    Not,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Minus => "-",
            Self::Plus => "+",
            Self::Tilde => "~",
            Self::Not => "not ",
        })
    }
}

/// An expression in a `VALUES` tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    Null,
    /// String literal, unescaped.
    Str(String),
    /// Numeric literal, as written.
    Num(String),
    /// Hex string literal, `X'..'`. Digits only.
    HexNum(String),
    Bool(bool),
    /// Named bind variable, without the leading `:`.
    BindArg(String),
    Column(ColIdent),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Func {
        name: String,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// Scalar subquery, without the surrounding parentheses.
    Subquery(String),
}

impl Expr {
    pub fn str(value: impl ToString) -> Self {
        Self::Str(value.to_string())
    }

    pub fn num(value: impl ToString) -> Self {
        Self::Num(value.to_string())
    }

    pub fn bind(name: impl ToString) -> Self {
        Self::BindArg(name.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Str(s) => write!(f, "{}", encode_sql_string(s)),
            Self::Num(n) => write!(f, "{}", n),
            Self::HexNum(h) => write!(f, "X'{}'", h),
            Self::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Self::BindArg(name) => write!(f, ":{}", name),
            Self::Column(col) => write!(f, "{}", col),
            Self::Unary { op, expr } => write!(f, "{}{}", op, Operand(expr)),
            Self::Binary { left, op, right } => {
                write!(f, "{} {} {}", Operand(left), op, Operand(right))
            }
            Self::Func { name, args } => write!(
                f,
                "{}({})",
                format_ident(name),
                args.iter()
                    .map(|arg| arg.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Subquery(query) => write!(f, "({})", query),
        }
    }
}

/// Operand of a unary or binary operator. Compound operands keep
/// their parentheses so precedence survives printing.
struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expr::Binary { .. } | Expr::Unary { .. } => write!(f, "({})", self.0),
            expr => write!(f, "{}", expr),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Expr::Null.to_string(), "null");
        assert_eq!(Expr::str("o'neil").to_string(), "'o\\'neil'");
        assert_eq!(Expr::num("0x1f").to_string(), "0x1f");
        assert_eq!(Expr::HexNum("0a".into()).to_string(), "X'0a'");
        assert_eq!(Expr::bind("_id0").to_string(), ":_id0");
        assert_eq!(
            Expr::Unary {
                op: UnaryOp::Minus,
                expr: Box::new(Expr::num(5)),
            }
            .to_string(),
            "-5"
        );
        assert_eq!(
            Expr::Binary {
                left: Box::new(Expr::Column("a".into())),
                op: "+".into(),
                right: Box::new(Expr::num(1)),
            }
            .to_string(),
            "a + 1"
        );
        assert_eq!(
            Expr::Func {
                name: "now".into(),
                args: vec![],
            }
            .to_string(),
            "now()"
        );
        assert_eq!(
            Expr::Func {
                name: "concat".into(),
                args: vec![Expr::str("a"), Expr::Column("b".into())],
            }
            .to_string(),
            "concat('a', b)"
        );
        assert_eq!(
            Expr::Subquery("select 1 from dual".into()).to_string(),
            "(select 1 from dual)"
        );
    }

    fn binary(left: Expr, op: &str, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op: op.into(),
            right: Box::new(right),
        }
    }

    #[test]
    fn test_display_keeps_precedence() {
        let sum = binary(Expr::num(2), "+", Expr::num(3));
        assert_eq!(
            binary(sum.clone(), "*", Expr::num(4)).to_string(),
            "(2 + 3) * 4"
        );
        assert_eq!(
            binary(Expr::num(4), "-", sum.clone()).to_string(),
            "4 - (2 + 3)"
        );

        let negated = Expr::Unary {
            op: UnaryOp::Minus,
            expr: Box::new(binary(Expr::num(1), "+", Expr::num(2))),
        };
        assert_eq!(negated.to_string(), "-(1 + 2)");

        let double_negative = Expr::Unary {
            op: UnaryOp::Minus,
            expr: Box::new(Expr::Unary {
                op: UnaryOp::Minus,
                expr: Box::new(Expr::num(1)),
            }),
        };
        assert_eq!(double_negative.to_string(), "-(-1)");
        assert_eq!(
            binary(Expr::Column("a".into()), "-", double_negative).to_string(),
            "a - (-(-1))"
        );
    }

    #[test]
    fn test_json() {
        let expr: Expr = serde_json::from_str(r#"{"num": "42"}"#).unwrap();
        assert_eq!(expr, Expr::num(42));
        let expr: Expr = serde_json::from_str(r#""null""#).unwrap();
        assert!(expr.is_null());
    }
}
