//! Expression trees over integers, an evaluator, and a pipeline of tree-rewriting passes.
//!
//! ```
//! use expr_rewriter::{ConstantFoldingPass, ConstantRewritingPass, Environment, Expr, Pipeline, evaluate};
//!
//! // 1 + 2 * 3
//! let expr = Expr::add(Expr::constant(1), Expr::mul(Expr::constant(2), Expr::constant(3)));
//! assert_eq!(evaluate(&expr, &Environment::default()), Ok(7));
//!
//! let mut pipeline = Pipeline::new();
//! pipeline
//!     .register(ConstantFoldingPass::new())
//!     .register(ConstantRewritingPass::new(42));
//!
//! assert_eq!(pipeline.rewrite(&expr), Ok(Expr::constant(42)));
//! ```

pub mod compiler_frontend;
pub mod projects;

pub use compiler_frontend::ast::expression::{BinaryOperator, Expr};
pub use compiler_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey, ErrorType};
pub use compiler_frontend::evaluator::{Environment, environment_from, evaluate};
pub use compiler_frontend::optimizers::constant_folding::ConstantFoldingPass;
pub use compiler_frontend::optimizers::constant_rewriting::ConstantRewritingPass;
pub use compiler_frontend::optimizers::pipeline::Pipeline;
pub use compiler_frontend::optimizers::rewriting_pass::RewritingPass;
pub use compiler_frontend::{CompilerFrontend, Flag};
pub use projects::settings::{Config, PassConfig};
