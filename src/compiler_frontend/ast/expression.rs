use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::return_division_by_zero_error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An immutable integer expression tree.
///
/// The variant set is closed. Every consumer matches all six variants without a wildcard arm,
/// so adding a variant breaks each consumer at compile time.
/// Binary nodes own their operands exclusively, so trees never share or cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    Const(i64),
    Var(String),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Expr {
    pub fn constant(value: i64) -> Expr {
        Expr::Const(value)
    }

    pub fn var(name: impl Into<String>) -> Expr {
        Expr::Var(name.into())
    }

    pub fn add(left: Expr, right: Expr) -> Expr {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn sub(left: Expr, right: Expr) -> Expr {
        Expr::Sub(Box::new(left), Box::new(right))
    }

    pub fn mul(left: Expr, right: Expr) -> Expr {
        Expr::Mul(Box::new(left), Box::new(right))
    }

    pub fn div(left: Expr, right: Expr) -> Expr {
        Expr::Div(Box::new(left), Box::new(right))
    }

    /// The variant name, as it appears in the debug rendering
    pub fn tag(&self) -> &'static str {
        match self {
            Expr::Const(_) => "Const",
            Expr::Var(_) => "Var",
            Expr::Add(..) => "Add",
            Expr::Sub(..) => "Sub",
            Expr::Mul(..) => "Mul",
            Expr::Div(..) => "Div",
        }
    }

    /// Splits a binary node into its operator and operands.
    /// Leaves return None.
    pub fn as_binary(&self) -> Option<(BinaryOperator, &Expr, &Expr)> {
        match self {
            Expr::Add(left, right) => Some((BinaryOperator::Add, &**left, &**right)),
            Expr::Sub(left, right) => Some((BinaryOperator::Subtract, &**left, &**right)),
            Expr::Mul(left, right) => Some((BinaryOperator::Multiply, &**left, &**right)),
            Expr::Div(left, right) => Some((BinaryOperator::Divide, &**left, &**right)),
            Expr::Const(_) | Expr::Var(_) => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];

        while let Some(expr) = stack.pop() {
            count += 1;
            if let Some((_, left, right)) = expr.as_binary() {
                stack.push(left);
                stack.push(right);
            }
        }

        count
    }

    /// Longest root-to-leaf path, counting nodes. A leaf has depth 1.
    /// Walks with an explicit stack so it is safe on trees too deep for the recursive passes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((expr, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some((_, left, right)) = expr.as_binary() {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }

        deepest
    }

    /// Every distinct variable name referenced by the tree, sorted
    pub fn variables(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        let mut stack = vec![self];

        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Var(name) => {
                    names.insert(name.as_str());
                }
                Expr::Const(_) => {}
                Expr::Add(left, right)
                | Expr::Sub(left, right)
                | Expr::Mul(left, right)
                | Expr::Div(left, right) => {
                    stack.push(&**left);
                    stack.push(&**right);
                }
            }
        }

        names
    }
}

impl BinaryOperator {
    pub fn to_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }

    /// Builds a new node of this operator's variant
    pub fn rebuild(&self, left: Expr, right: Expr) -> Expr {
        match self {
            BinaryOperator::Add => Expr::add(left, right),
            BinaryOperator::Subtract => Expr::sub(left, right),
            BinaryOperator::Multiply => Expr::mul(left, right),
            BinaryOperator::Divide => Expr::div(left, right),
        }
    }

    /// The arithmetic shared by evaluation and constant folding.
    ///
    /// Integers wrap on overflow (two's complement), including `i64::MIN / -1`.
    /// Division truncates toward zero.
    /// `node` is the expression being reduced and is only used to describe a division by zero.
    pub fn apply(
        &self,
        lhs: i64,
        rhs: i64,
        node: &Expr,
        stage: &'static str,
    ) -> Result<i64, CompilerError> {
        let value = match self {
            BinaryOperator::Add => lhs.wrapping_add(rhs),
            BinaryOperator::Subtract => lhs.wrapping_sub(rhs),
            BinaryOperator::Multiply => lhs.wrapping_mul(rhs),
            BinaryOperator::Divide => {
                if rhs == 0 {
                    return_division_by_zero_error!(node, {
                        CompilationStage => stage,
                        PrimarySuggestion => "Make sure the divisor can never be zero",
                    })
                }

                lhs.wrapping_div(rhs)
            }
        };

        Ok(value)
    }
}
