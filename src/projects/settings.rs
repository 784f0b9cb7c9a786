use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::evaluator::Environment;
use crate::compiler_frontend::optimizers::constant_folding::ConstantFoldingPass;
use crate::compiler_frontend::optimizers::constant_rewriting::ConstantRewritingPass;
use crate::compiler_frontend::optimizers::pipeline::Pipeline;
use crate::{return_config_error, return_file_error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "exprw.toml";

// The value the demonstration pipeline rewrites every constant to
pub const DEFAULT_REWRITE_CONSTANT: i64 = 42;

/// One entry in the `[[passes]]` list of a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PassConfig {
    ConstantFolding,
    ConstantRewriting { value: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub passes: Vec<PassConfig>,

    #[serde(default)]
    pub environment: Environment,
}

impl Config {
    pub fn new(passes: Vec<PassConfig>, environment: Environment) -> Self {
        Config {
            passes,
            environment,
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CompilerError> {
        match toml::from_str::<Config>(source) {
            Ok(config) => Ok(config),
            Err(e) => return_config_error!(
                format!("Could not parse config: {e}"),
                {
                    PrimarySuggestion => "Each [[passes]] entry needs kind = \"constant_folding\" or kind = \"constant_rewriting\" with a value",
                }
            ),
        }
    }

    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => return_file_error!(path, format!("Could not read config file: {e}")),
        };

        Config::from_toml_str(&source).map_err(|mut e| {
            e.msg = format!("{}: {}", path.display(), e.msg);
            e
        })
    }

    pub fn to_toml_string(&self) -> Result<String, CompilerError> {
        toml::to_string(self).map_err(|e| {
            CompilerError::new_config_error(format!("Could not serialise config: {e}"))
        })
    }

    /// Adds or replaces a single variable binding
    pub fn bind(&mut self, name: impl Into<String>, value: i64) {
        self.environment.insert(name.into(), value);
    }

    pub fn build_pipeline(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        for pass in &self.passes {
            match pass {
                PassConfig::ConstantFolding => {
                    pipeline.register(ConstantFoldingPass::new());
                }
                PassConfig::ConstantRewriting { value } => {
                    pipeline.register(ConstantRewritingPass::new(*value));
                }
            }
        }

        pipeline
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            passes: vec![
                PassConfig::ConstantFolding,
                PassConfig::ConstantRewriting {
                    value: DEFAULT_REWRITE_CONSTANT,
                },
            ],
            environment: Environment::default(),
        }
    }
}
