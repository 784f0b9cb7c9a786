//! # Constant Folding Pass
//!
//! Collapses arithmetic on literals into a single literal.
//!
//! ## Algorithm
//!
//! Bottom-up over the tree:
//! 1. **Fold Children**: both operands of a binary node are folded first
//! 2. **Immediate Folding**: if both folded operands are now `Const`, the node becomes one `Const`
//! 3. **Runtime Preservation**: otherwise the node is rebuilt around its folded operands
//!
//! `Var` and `Const` leaves are returned as they are. Because children are folded before their
//! parent, a folded tree contains no binary node with two `Const` children, so folding is idempotent.
//!
//! ## Error Handling
//!
//! Folding `Div(Const(a), Const(0))` returns a DivisionByZero error, the same as evaluation.
//! A zero divisor that is not yet a literal (e.g. `x / (1 - 1)` once folded to `x / 0`) is left for
//! evaluation to report, since the left side is not constant.

use crate::compiler_frontend::ast::expression::{BinaryOperator, Expr};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::rewriting_pass::RewritingPass;
use crate::pass_log;

const FOLDING_STAGE: &str = "Constant Folding";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantFoldingPass;

impl ConstantFoldingPass {
    pub fn new() -> Self {
        ConstantFoldingPass
    }

    fn fold_binary(
        &self,
        op: BinaryOperator,
        left: &Expr,
        right: &Expr,
        node: &Expr,
    ) -> Result<Expr, CompilerError> {
        let folded_left = self.rewrite(left)?;
        let folded_right = self.rewrite(right)?;

        match (&folded_left, &folded_right) {
            (Expr::Const(lhs), Expr::Const(rhs)) => {
                let value = op.apply(*lhs, *rhs, node, FOLDING_STAGE)?;
                pass_log!("Folded ", node.to_string(), " into ", value);
                Ok(Expr::Const(value))
            }

            // Not foldable, keep the node as a runtime expression
            _ => Ok(op.rebuild(folded_left, folded_right)),
        }
    }
}

impl RewritingPass for ConstantFoldingPass {
    fn name(&self) -> &str {
        "constant_folding"
    }

    fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError> {
        match expr {
            Expr::Const(_) | Expr::Var(_) => Ok(expr.clone()),
            Expr::Add(left, right) => self.fold_binary(BinaryOperator::Add, left, right, expr),
            Expr::Sub(left, right) => self.fold_binary(BinaryOperator::Subtract, left, right, expr),
            Expr::Mul(left, right) => self.fold_binary(BinaryOperator::Multiply, left, right, expr),
            Expr::Div(left, right) => self.fold_binary(BinaryOperator::Divide, left, right, expr),
        }
    }
}
