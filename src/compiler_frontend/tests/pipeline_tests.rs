#![cfg(test)]

use super::test_support::{every_variant, sample_tree};
use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey, ErrorType};
use crate::compiler_frontend::evaluator::{Environment, evaluate};
use crate::compiler_frontend::optimizers::constant_folding::ConstantFoldingPass;
use crate::compiler_frontend::optimizers::constant_rewriting::ConstantRewritingPass;
use crate::compiler_frontend::optimizers::pipeline::Pipeline;
use crate::compiler_frontend::optimizers::rewriting_pass::RewritingPass;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn demo_pipeline() -> Pipeline {
    let mut pipeline = Pipeline::new();
    pipeline
        .register(ConstantFoldingPass::new())
        .register(ConstantRewritingPass::new(42));
    pipeline
}

#[test]
fn fold_then_rewrite_gives_42() {
    let rewritten = demo_pipeline().rewrite(&sample_tree()).expect("pipeline");

    assert_eq!(rewritten, Expr::constant(42));
    assert_eq!(evaluate(&rewritten, &Environment::default()), Ok(42));
}

#[test]
fn pass_order_matters() {
    // Rewrite first: 1 + 2 * 3 -> 42 + 42 * 42, then fold to 1806
    let mut pipeline = Pipeline::new();
    pipeline
        .register(ConstantRewritingPass::new(42))
        .register(ConstantFoldingPass::new());

    assert_eq!(
        pipeline.rewrite(&sample_tree()),
        Ok(Expr::constant(42 + 42 * 42))
    );
}

#[test]
fn empty_pipeline_returns_input_unchanged() {
    let pipeline = Pipeline::new();
    assert!(pipeline.is_empty());

    for expr in every_variant() {
        assert_eq!(pipeline.rewrite(&expr), Ok(expr));
    }
}

#[test]
fn with_passes_keeps_given_order() {
    let pipeline = Pipeline::with_passes(vec![
        Box::new(ConstantRewritingPass::new(2)),
        Box::new(ConstantFoldingPass::new()),
    ]);

    assert_eq!(pipeline.len(), 2);
    assert_eq!(
        pipeline.pass_names(),
        vec!["constant_rewriting", "constant_folding"]
    );
}

#[test]
fn closures_can_be_registered() {
    let swap_operands = |expr: &Expr| -> Result<Expr, CompilerError> {
        match expr.as_binary() {
            Some((op, left, right)) => Ok(op.rebuild(right.clone(), left.clone())),
            None => Ok(expr.clone()),
        }
    };

    let mut pipeline = Pipeline::new();
    pipeline.register(swap_operands).register(ConstantFoldingPass::new());

    // 8 - 2 becomes 2 - 8 before folding
    let expr = Expr::sub(Expr::constant(8), Expr::constant(2));
    assert_eq!(pipeline.rewrite(&expr), Ok(Expr::constant(-6)));
    assert_eq!(pipeline.pass_names(), vec!["custom", "constant_folding"]);
}

#[test]
fn failing_pass_aborts_the_rest() {
    let later_runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&later_runs);
    let count_runs = move |expr: &Expr| -> Result<Expr, CompilerError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(expr.clone())
    };

    let mut pipeline = Pipeline::new();
    pipeline
        .register(ConstantFoldingPass::new())
        .register(count_runs);

    let error = pipeline
        .rewrite(&Expr::div(Expr::constant(1), Expr::constant(0)))
        .expect_err("folding fails");

    assert_eq!(error.error_type, ErrorType::DivisionByZero);
    assert_eq!(later_runs.load(Ordering::SeqCst), 0);
}

#[test]
fn each_pass_sees_the_previous_output() {
    let mut pipeline = Pipeline::new();
    pipeline
        .register(ConstantFoldingPass::new())
        .register(|expr: &Expr| -> Result<Expr, CompilerError> {
            // Folding already ran, so the whole tree is a single constant here
            assert_eq!(expr, &Expr::constant(7));
            Ok(Expr::add(expr.clone(), Expr::var("x")))
        });

    assert_eq!(
        pipeline.rewrite(&sample_tree()),
        Ok(Expr::add(Expr::constant(7), Expr::var("x")))
    );
}

#[test]
fn rewrite_all_keeps_input_order() {
    let exprs: Vec<Expr> = (0..64)
        .map(|i| Expr::mul(Expr::constant(i), Expr::var("x")))
        .collect();

    let mut pipeline = Pipeline::new();
    pipeline.register(ConstantRewritingPass::new(3));

    let rewritten = pipeline.rewrite_all(&exprs).expect("no pass fails");
    assert_eq!(rewritten.len(), 64);
    for expr in rewritten {
        assert_eq!(expr, Expr::mul(Expr::constant(3), Expr::var("x")));
    }

    let folded = demo_pipeline()
        .rewrite_all(&[sample_tree(), Expr::var("y")])
        .expect("no pass fails");
    assert_eq!(folded, vec![Expr::constant(42), Expr::var("y")]);
}

#[test]
fn rewrite_all_reports_earliest_failure() {
    let mut pipeline = Pipeline::new();
    pipeline.register(ConstantFoldingPass::new());

    let exprs = vec![
        sample_tree(),
        Expr::div(Expr::constant(1), Expr::constant(0)),
        Expr::div(Expr::constant(2), Expr::constant(0)),
    ];

    let error = pipeline.rewrite_all(&exprs).expect_err("second tree fails");
    assert_eq!(error.error_type, ErrorType::DivisionByZero);
    assert_eq!(
        error.metadata_value(ErrorMetaDataKey::Expression),
        Some("(1 / 0)")
    );
}

#[test]
fn pipeline_debug_lists_pass_names() {
    assert_eq!(
        format!("{:?}", demo_pipeline()),
        "Pipeline { passes: [\"constant_folding\", \"constant_rewriting\"] }"
    );
}

#[test]
fn registered_passes_run_through_trait_objects() {
    let passes: Vec<Box<dyn RewritingPass>> = vec![Box::new(ConstantFoldingPass::new())];
    let mut pipeline = Pipeline::new();
    for pass in passes {
        pipeline.register_boxed(pass);
    }

    assert_eq!(pipeline.rewrite(&sample_tree()), Ok(Expr::constant(7)));
}
