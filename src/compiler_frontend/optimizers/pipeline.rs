use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::optimizers::rewriting_pass::RewritingPass;
use crate::pass_log;
use rayon::prelude::*;

/// An ordered list of passes. Each pass receives the output of the one before it.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn RewritingPass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline { passes: Vec::new() }
    }

    pub fn with_passes(passes: Vec<Box<dyn RewritingPass>>) -> Self {
        Pipeline { passes }
    }

    /// Appends a pass to the end of the pipeline.
    /// Returns the pipeline so registrations can be chained.
    pub fn register(&mut self, pass: impl RewritingPass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn register_boxed(&mut self, pass: Box<dyn RewritingPass>) -> &mut Self {
        self.passes.push(pass);
        self
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Runs every pass in registration order.
    ///
    /// The first failing pass stops the pipeline and its error is returned; no partial tree
    /// is produced. An empty pipeline returns a copy of the input.
    /// Each pass recurses over the tree, so the same stack depth caveat as `evaluate` applies.
    pub fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError> {
        let mut current = expr.clone();

        for pass in &self.passes {
            pass_log!("Running ", pass.name(), " on ", current.to_string());
            current = pass.rewrite(&current)?;
        }

        Ok(current)
    }

    /// Rewrites many independent trees in parallel.
    ///
    /// Output order matches input order. If any tree fails, the error for the earliest
    /// failing tree in the input is returned.
    pub fn rewrite_all(&self, exprs: &[Expr]) -> Result<Vec<Expr>, CompilerError> {
        let results: Vec<Result<Expr, CompilerError>> =
            exprs.par_iter().map(|expr| self.rewrite(expr)).collect();

        results.into_iter().collect()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.pass_names())
            .finish()
    }
}
