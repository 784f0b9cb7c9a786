//! Display implementations for expression trees
//!
//! `Debug` (derived) gives the tagged form used when debugging: `Add(Const(1), Var("x"))`.
//! `Display` gives fully parenthesised infix: `(1 + x)`.

use crate::compiler_frontend::ast::expression::{BinaryOperator, Expr};
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expr::Const(value) => write!(f, "{value}"),
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Sub(left, right) => write!(f, "({left} - {right})"),
            Expr::Mul(left, right) => write!(f, "({left} * {right})"),
            Expr::Div(left, right) => write!(f, "({left} / {right})"),
        }
    }
}
