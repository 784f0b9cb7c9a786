use std::collections::HashMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum ErrorMetaDataKey {
    VariableName,
    CompilationStage,

    // The offending subtree, rendered with Display
    Expression,

    // Optional suggestions
    PrimarySuggestion,
}

impl ErrorMetaDataKey {
    pub fn to_str(&self) -> &'static str {
        match self {
            ErrorMetaDataKey::VariableName => "Variable",
            ErrorMetaDataKey::CompilationStage => "Stage",
            ErrorMetaDataKey::Expression => "Expression",
            ErrorMetaDataKey::PrimarySuggestion => "Suggestion",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerError {
    pub msg: String,
    pub error_type: ErrorType,

    // Structured detail about what went wrong (variable names, offending subtree, stage)
    pub metadata: HashMap<ErrorMetaDataKey, String>,
}

impl CompilerError {
    pub fn new(msg: impl Into<String>, error_type: ErrorType) -> CompilerError {
        CompilerError {
            msg: msg.into(),
            error_type,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: ErrorMetaDataKey, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value.into());
        self
    }

    pub fn metadata_value(&self, key: ErrorMetaDataKey) -> Option<&str> {
        self.metadata.get(&key).map(String::as_str)
    }

    /// Create a config error (malformed TOML, unknown pass kinds, bad CLI values)
    pub fn new_config_error(msg: impl Into<String>) -> Self {
        CompilerError::new(msg, ErrorType::Config)
    }

    /// Create a file system error for the given path
    pub fn file_error(path: &Path, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        CompilerError::new(format!("{}: {msg}", path.display()), ErrorType::File)
    }

    pub fn is_undefined_variable(&self) -> bool {
        self.error_type == ErrorType::UndefinedVariable
    }

    pub fn is_division_by_zero(&self) -> bool {
        self.error_type == ErrorType::DivisionByZero
    }
}

impl Display for CompilerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}", error_type_to_str(&self.error_type), self.msg)
    }
}

impl std::error::Error for CompilerError {}

// Only the first two are produced by evaluation and rewriting.
// Config and File come from the outer surface (settings and CLI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    UndefinedVariable,
    DivisionByZero,
    Config,
    File,
}

pub fn error_type_to_str(e_type: &ErrorType) -> &'static str {
    match e_type {
        ErrorType::UndefinedVariable => "Undefined Variable",
        ErrorType::DivisionByZero => "Division By Zero",
        ErrorType::Config => "Malformed Config",
        ErrorType::File => "File Error",
    }
}

/// Returns a new CompilerError for a variable missing from the environment.
///
/// Usage: `return_undefined_variable_error!(name, { CompilationStage => "Evaluation" })`;
#[macro_export]
macro_rules! return_undefined_variable_error {
    ($name:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {{
        let name: &str = $name;
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: format!("Undefined variable '{}'", name),
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::UndefinedVariable,
            metadata: {
                let mut map = std::collections::HashMap::new();
                map.insert(
                    $crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::VariableName,
                    name.to_string(),
                );
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value.to_string()); )*
                map
            },
        });
    }};
    ($name:expr) => {
        $crate::return_undefined_variable_error!($name, {})
    };
}

/// Returns a new CompilerError for a zero divisor.
///
/// The offending `Div` node is recorded under `ErrorMetaDataKey::Expression`.
///
/// Usage: `return_division_by_zero_error!(expr, { CompilationStage => "Constant Folding" })`;
#[macro_export]
macro_rules! return_division_by_zero_error {
    ($expr:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {{
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: String::from("Can't divide by zero"),
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::DivisionByZero,
            metadata: {
                let mut map = std::collections::HashMap::new();
                map.insert(
                    $crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::Expression,
                    $expr.to_string(),
                );
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value.to_string()); )*
                map
            },
        });
    }};
}

/// Returns a new CompilerError for malformed configuration.
///
/// Usage: `return_config_error!("Unknown pass kind", { PrimarySuggestion => "..." })`;
#[macro_export]
macro_rules! return_config_error {
    ($msg:expr, { $( $key:ident => $value:expr ),* $(,)? }) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError {
            msg: $msg.into(),
            error_type: $crate::compiler_frontend::compiler_errors::ErrorType::Config,
            metadata: {
                let mut map = std::collections::HashMap::new();
                $( map.insert($crate::compiler_frontend::compiler_errors::ErrorMetaDataKey::$key, $value.to_string()); )*
                map
            },
        })
    };
    ($msg:expr) => {
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::new_config_error($msg))
    };
}

/// Returns a new CompilerError
///
/// Usage: `return_file_error!(path, "message")`;
#[macro_export]
macro_rules! return_file_error {
    ($path:expr, $msg:expr) => {{
        return Err($crate::compiler_frontend::compiler_errors::CompilerError::file_error(
            $path, $msg,
        ));
    }};
}
