//! Command-line entrypoints for the expression rewriter.
//!
//! This module parses CLI commands and dispatches them into the demo, evaluation and
//! rewriting workflows.

use crate::compiler_frontend::ast::expression::Expr;
use crate::compiler_frontend::compiler_errors::CompilerError;
use crate::compiler_frontend::display_messages::{print_errors, print_formatted_error};
use crate::compiler_frontend::evaluator::{Environment, evaluate};
use crate::compiler_frontend::optimizers::constant_folding::ConstantFoldingPass;
use crate::compiler_frontend::optimizers::constant_rewriting::ConstantRewritingPass;
use crate::compiler_frontend::optimizers::pipeline::Pipeline;
use crate::compiler_frontend::{CompilerFrontend, Flag};
use crate::projects::settings::{CONFIG_FILE_NAME, Config, DEFAULT_REWRITE_CONSTANT};
use crate::projects::tree_files::{load_tree, tree_to_json};
use saying::say;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    // Builds 1 + 2 * 3, evaluates it, rewrites it and evaluates the result
    Demo,

    Eval {
        tree: PathBuf,
        options: RunOptions,
    },

    // Rewrites one or more tree files with the configured pipeline
    Rewrite {
        trees: Vec<PathBuf>,
        options: RunOptions,
    },

    Help,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct RunOptions {
    config_path: Option<PathBuf>,
    bindings: Vec<(String, i64)>,
}

pub fn start_cli() {
    let compiler_args: Vec<String> = env::args().collect();

    let command = match get_command(compiler_args.get(1..).unwrap_or_default()) {
        Ok(command) => command,
        Err(e) => {
            say!(Red e);
            print_help(true);
            return;
        }
    };

    // Gather a list of any additional flags
    let flags = get_flags(&compiler_args);

    match command {
        Command::Help => {
            print_help(false);
        }

        Command::Demo => {
            if let Err(e) = run_demo() {
                print_formatted_error(&e);
            }
        }

        Command::Eval { tree, options } => {
            if let Err(e) = run_eval(&tree, &options, &flags) {
                print_formatted_error(&e);
            }
        }

        Command::Rewrite { trees, options } => {
            if let Err(errors) = run_rewrite(&trees, &options, &flags) {
                print_errors(&errors);
            }
        }
    }
}

fn run_demo() -> Result<(), CompilerError> {
    let mut rewriter = Pipeline::new();
    rewriter
        .register(ConstantFoldingPass::new())
        .register(ConstantRewritingPass::new(DEFAULT_REWRITE_CONSTANT));

    // 1 + 2 * 3
    let expr = Expr::add(
        Expr::constant(1),
        Expr::mul(Expr::constant(2), Expr::constant(3)),
    );
    let env = Environment::default();

    say!("Original: ", format!("{expr:?}"));
    let result = evaluate(&expr, &env)?;
    say!("Result: ", Green result);

    let rewritten = rewriter.rewrite(&expr)?;

    say!("Rewritten: ", format!("{rewritten:?}"));
    let result = evaluate(&rewritten, &env)?;
    say!("Result: ", Green result);

    Ok(())
}

fn run_eval(tree: &Path, options: &RunOptions, flags: &[Flag]) -> Result<(), CompilerError> {
    let config = load_config(options, Path::new("."))?;
    let frontend = CompilerFrontend::new(&config);
    let expr = load_tree(tree)?;

    let time = Instant::now();
    let value = frontend.evaluate(&expr)?;

    print_tree("Expression: ", &expr, flags)?;
    say!("Result: ", Green value);
    print_elapsed(time, flags);

    Ok(())
}

fn run_rewrite(
    trees: &[PathBuf],
    options: &RunOptions,
    flags: &[Flag],
) -> Result<(), Vec<CompilerError>> {
    let config = load_config(options, Path::new(".")).map_err(|e| vec![e])?;
    let frontend = CompilerFrontend::new(&config);

    // Every file is read before any rewriting so all bad paths are reported together
    let mut exprs = Vec::with_capacity(trees.len());
    let mut errors = Vec::new();
    for path in trees {
        match load_tree(path) {
            Ok(expr) => exprs.push(expr),
            Err(e) => errors.push(e),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    say!(Bright Black "Passes: ", Bright Black frontend.pipeline().pass_names().join(", "));

    let time = Instant::now();
    let rewritten = frontend.rewrite_all(&exprs).map_err(|e| vec![e])?;

    for (path, expr) in trees.iter().zip(&rewritten) {
        say!(Bold path.display().to_string());
        print_tree("Rewritten: ", expr, flags).map_err(|e| vec![e])?;

        // A rewritten tree can still reference unbound variables, that's only worth a note
        match frontend.evaluate(expr) {
            Ok(value) => {
                say!("Result: ", Green value);
            }
            Err(e) => {
                say!(Yellow "Not evaluated: ", Yellow e.to_string());
            }
        }
    }
    print_elapsed(time, flags);

    Ok(())
}

// Without --config, falls back to the config file in `project_dir`, then to the defaults
fn load_config(options: &RunOptions, project_dir: &Path) -> Result<Config, CompilerError> {
    let mut config = match &options.config_path {
        Some(path) => Config::load(path)?,
        None => {
            let local_config = project_dir.join(CONFIG_FILE_NAME);
            if local_config.is_file() {
                Config::load(&local_config)?
            } else {
                Config::default()
            }
        }
    };

    // --var bindings override anything from the config file
    for (name, value) in &options.bindings {
        config.bind(name.to_owned(), *value);
    }

    Ok(config)
}

fn print_tree(label: &str, expr: &Expr, flags: &[Flag]) -> Result<(), CompilerError> {
    if flags.contains(&Flag::JsonOutput) {
        let json = tree_to_json(expr)?;
        say!(label, json);
    } else {
        say!(label, expr.to_string());
    }

    Ok(())
}

fn print_elapsed(time: Instant, flags: &[Flag]) {
    if !flags.contains(&Flag::DisableTimers) {
        say!(Bright Black "Finished in: ", Bright Black format!("{:?}", time.elapsed()));
    }
}

fn get_command(args: &[String]) -> Result<Command, String> {
    let command = args.first().map(String::as_str);

    match command {
        None | Some("demo") => Ok(Command::Demo),

        Some("help") => Ok(Command::Help),

        Some("eval") => {
            let (mut trees, options) = parse_run_args(&args[1..])?;
            match trees.len() {
                1 => Ok(Command::Eval {
                    tree: trees.remove(0),
                    options,
                }),
                0 => Err(String::from("Missing expression tree file for eval")),
                _ => Err(String::from("Eval accepts exactly one expression tree file")),
            }
        }

        Some("rewrite") => {
            let (trees, options) = parse_run_args(&args[1..])?;
            if trees.is_empty() {
                return Err(String::from("Missing expression tree file for rewrite"));
            }

            Ok(Command::Rewrite { trees, options })
        }

        Some(other) => Err(format!("Invalid command: '{other}'")),
    }
}

fn get_flags(args: &[String]) -> Vec<Flag> {
    let mut flags = Vec::new();

    for arg in args {
        match arg.as_str() {
            "--json" => flags.push(Flag::JsonOutput),
            "--hide-timers" => flags.push(Flag::DisableTimers),
            _ => {}
        }
    }

    flags
}

fn parse_run_args(args: &[String]) -> Result<(Vec<PathBuf>, RunOptions), String> {
    let mut trees = Vec::new();
    let mut options = RunOptions::default();
    let mut index = 0usize;

    while let Some(arg) = args.get(index) {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.get(index + 1) else {
                    return Err(String::from("Missing value for --config"));
                };
                if path.starts_with("--") {
                    return Err(String::from("Missing value for --config"));
                }
                options.config_path = Some(PathBuf::from(path));
                index += 2;
            }
            "--var" => {
                let Some(binding) = args.get(index + 1) else {
                    return Err(String::from("Missing value for --var"));
                };
                options.bindings.push(parse_binding(binding)?);
                index += 2;
            }
            "--json" | "--hide-timers" => {
                index += 1;
            }
            _ if arg.starts_with("--") => {
                return Err(format!(
                    "Unknown flag: '{arg}'. Supported flags are --config, --var, --json, --hide-timers."
                ));
            }
            _ => {
                trees.push(PathBuf::from(arg));
                index += 1;
            }
        }
    }

    Ok((trees, options))
}

// name=value
fn parse_binding(binding: &str) -> Result<(String, i64), String> {
    let Some((name, value)) = binding.split_once('=') else {
        return Err(format!(
            "Invalid --var value: '{binding}'. Bindings are written as name=value."
        ));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Invalid --var value: '{binding}'. The name is empty."));
    }

    match value.trim().parse::<i64>() {
        Ok(value) => Ok((name.to_owned(), value)),
        Err(_) => Err(format!(
            "Invalid --var value: '{binding}'. The value must be a whole number."
        )),
    }
}

fn print_help(commands_only: bool) {
    if !commands_only {
        say!(Bright Black "------------------------------------");
        say!(Green Bold "Expression tree evaluator and rewriter");
        say!("Usage: ", Bold "<command>", Italic "<args>");
    }
    say!(Green Bold "\nCommands:");
    say!("  demo                  - Folds and rewrites 1 + 2 * 3 (default)");
    say!("  eval <tree.json>      - Evaluates a tree");
    say!("  rewrite <tree.json>.. - Runs the configured passes over one or more trees");
    say!("  help                  - Shows this message");

    say!(Green Bold "\nFlags:");
    say!("  --config <file.toml>  (default: ./", CONFIG_FILE_NAME, " if present)");
    say!("  --var <name=value>    (repeatable)");
    say!("  --json");
    say!("  --hide-timers");
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
