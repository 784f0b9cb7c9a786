use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;

/// One tree transformation strategy.
///
/// A pass must be pure: the same input always gives the same output, and the input is never
/// modified (a new tree is returned). Passes are `Send + Sync` so a pipeline can be shared
/// across threads when rewriting many trees at once.
pub trait RewritingPass: Send + Sync {
    /// Short name used in logs and `Pipeline::pass_names`
    fn name(&self) -> &str {
        "custom"
    }

    fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError>;
}

// Lets plain closures be registered as passes
impl<F> RewritingPass for F
where
    F: Fn(&Expr) -> Result<Expr, CompilerError> + Send + Sync,
{
    fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError> {
        self(expr)
    }
}
