use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::{CompilerError, ErrorMetaDataKey, ErrorType};
use crate::return_file_error;
use std::fs;
use std::path::Path;

/// Deepest tree `parse_tree` accepts.
/// serde_json stops at 128 levels of JSON nesting and every binary node takes two of them
/// (the variant object and its operand array).
pub const MAX_TREE_DEPTH: usize = 64;

/// Reads an expression tree from its JSON form, e.g. `{"Add":[{"Const":1},{"Var":"x"}]}`.
///
/// Trees deeper than [`MAX_TREE_DEPTH`] are rejected, which also keeps loaded trees well inside
/// the stack budget of the recursive evaluator and passes.
pub fn load_tree(path: &Path) -> Result<Expr, CompilerError> {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return_file_error!(path, format!("Could not read expression tree: {e}")),
    };

    parse_tree(&source).map_err(|mut e| {
        e.msg = format!("{}: {}", path.display(), e.msg);
        e
    })
}

pub fn parse_tree(source: &str) -> Result<Expr, CompilerError> {
    serde_json::from_str(source).map_err(|e| {
        let msg = e.to_string();
        let suggestion = if msg.starts_with("recursion limit exceeded") {
            format!("Trees can be at most {MAX_TREE_DEPTH} levels deep")
        } else {
            String::from(
                "Trees are written as tagged JSON, e.g. {\"Add\":[{\"Const\":1},{\"Var\":\"x\"}]}",
            )
        };

        CompilerError::new(format!("Invalid expression tree: {msg}"), ErrorType::File)
            .with_metadata(ErrorMetaDataKey::PrimarySuggestion, suggestion)
    })
}

pub fn tree_to_json(expr: &Expr) -> Result<String, CompilerError> {
    serde_json::to_string(expr).map_err(|e| {
        CompilerError::new(
            format!("Could not serialise expression tree: {e}"),
            ErrorType::File,
        )
    })
}
