pub mod ast;
pub mod evaluator;
pub mod optimizers {
    pub mod constant_folding;
    pub mod constant_rewriting;
    pub mod pipeline;
    pub mod rewriting_pass;
}

pub mod compiler_messages {
    pub mod compiler_dev_logging;
    pub mod compiler_errors;
    pub mod display_messages;
}
pub use compiler_messages::compiler_errors;
pub use compiler_messages::display_messages;

#[cfg(test)]
mod tests;

use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::evaluator::evaluate;
use crate::compiler_frontend::optimizers::pipeline::Pipeline;
use crate::projects::settings::Config;
use crate::timer_log;
use std::time::Instant;

/// Flags change how the CLI reports results.
/// They don't change evaluation or rewriting semantics.
#[derive(PartialEq, Debug, Clone)]
pub enum Flag {
    JsonOutput,
    DisableTimers,
}

/// Owns a configured pipeline and environment and runs the two stages over trees.
pub struct CompilerFrontend<'a> {
    pub(crate) project_config: &'a Config,
    pipeline: Pipeline,
}

impl<'a> CompilerFrontend<'a> {
    pub fn new(project_config: &'a Config) -> Self {
        Self {
            project_config,
            pipeline: project_config.build_pipeline(),
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// -----------------------------
    /// EVALUATION
    /// -----------------------------
    /// Reduces the tree to an integer using the configured environment.
    pub fn evaluate(&self, expr: &Expr) -> Result<i64, CompilerError> {
        let time = Instant::now();
        let result = evaluate(expr, &self.project_config.environment);
        timer_log!(time, "Evaluated in: ");

        result
    }

    /// -----------------------------
    /// REWRITING
    /// -----------------------------
    /// Threads the tree through every configured pass in order.
    pub fn rewrite(&self, expr: &Expr) -> Result<Expr, CompilerError> {
        let time = Instant::now();
        let rewritten = self.pipeline.rewrite(expr);
        timer_log!(time, "Rewritten in: ");

        rewritten
    }

    /// Rewrites a batch of independent trees in parallel, keeping their order.
    pub fn rewrite_all(&self, exprs: &[Expr]) -> Result<Vec<Expr>, CompilerError> {
        let time = Instant::now();
        let rewritten = self.pipeline.rewrite_all(exprs);
        timer_log!(time, "Batch rewritten in: ");

        rewritten
    }
}
