use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::rewriting_pass::RewritingPass;
use crate::pass_log;

/// Replaces the value of every `Const` in the tree with one fixed value.
/// `Var` leaves are left alone and binary nodes are rebuilt around their rewritten operands.
/// This pass never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantRewritingPass {
    constant_value: i64,
}

impl ConstantRewritingPass {
    pub fn new(constant_value: i64) -> Self {
        ConstantRewritingPass { constant_value }
    }

    pub fn constant_value(&self) -> i64 {
        self.constant_value
    }

    fn rewrite_tree(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Const(_) => {
                pass_log!("Rewriting ", expr.to_string(), " to ", self.constant_value);
                Expr::Const(self.constant_value)
            }
            Expr::Var(_) => expr.clone(),
            Expr::Add(left, right) => Expr::add(self.rewrite_tree(left), self.rewrite_tree(right)),
            Expr::Sub(left, right) => Expr::sub(self.rewrite_tree(left), self.rewrite_tree(right)),
            Expr::Mul(left, right) => Expr::mul(self.rewrite_tree(left), self.rewrite_tree(right)),
            Expr::Div(left, right) => Expr::div(self.rewrite_tree(left), self.rewrite_tree(right)),
        }
    }
}

impl RewritingPass for ConstantRewritingPass {
    fn name(&self) -> &str {
        "constant_rewriting"
    }

    fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError> {
        Ok(self.rewrite_tree(expr))
    }
}
