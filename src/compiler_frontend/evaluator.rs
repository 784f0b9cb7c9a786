use crate::compiler_frontend::ast::expression::{BinaryOperator, Expr};
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::{eval_log, return_undefined_variable_error};
use rustc_hash::FxHashMap;

/// Variable bindings supplied at evaluation time. Read-only during a single evaluation.
pub type Environment = FxHashMap<String, i64>;

const EVALUATION_STAGE: &str = "Evaluation";

/// Reduces an expression to a single integer.
///
/// The left operand is always evaluated first, so when both sides fail the left error is returned.
/// Unbound variables and zero divisors are errors; nothing is defaulted.
///
/// Recursion depth follows tree depth. Very deep trees (hundreds of thousands of nested nodes)
/// can exhaust the thread's stack, check `Expr::depth` first if a tree comes from an untrusted source.
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<i64, CompilerError> {
    let value = match expr {
        Expr::Const(value) => *value,

        Expr::Var(name) => match env.get(name) {
            Some(value) => *value,
            None => return_undefined_variable_error!(name, {
                CompilationStage => EVALUATION_STAGE,
                PrimarySuggestion => "Bind this name in the environment before evaluating",
            }),
        },

        Expr::Add(left, right) => {
            evaluate_binary(BinaryOperator::Add, left, right, expr, env)?
        }
        Expr::Sub(left, right) => {
            evaluate_binary(BinaryOperator::Subtract, left, right, expr, env)?
        }
        Expr::Mul(left, right) => {
            evaluate_binary(BinaryOperator::Multiply, left, right, expr, env)?
        }
        Expr::Div(left, right) => {
            evaluate_binary(BinaryOperator::Divide, left, right, expr, env)?
        }
    };

    eval_log!("Evaluated ", expr.to_string(), " to ", value);

    Ok(value)
}

fn evaluate_binary(
    op: BinaryOperator,
    left: &Expr,
    right: &Expr,
    node: &Expr,
    env: &Environment,
) -> Result<i64, CompilerError> {
    let lhs = evaluate(left, env)?;
    let rhs = evaluate(right, env)?;
    op.apply(lhs, rhs, node, EVALUATION_STAGE)
}

/// Builds an environment from name/value pairs
pub fn environment_from<I, S>(bindings: I) -> Environment
where
    I: IntoIterator<Item = (S, i64)>,
    S: Into<String>,
{
    bindings
        .into_iter()
        .map(|(name, value)| (name.into(), value))
        .collect()
}
