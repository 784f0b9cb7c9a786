//! Tests for CLI command parsing and validation.

use super::{Command, RunOptions, get_command, get_flags, load_config, parse_binding};
use crate::compiler_frontend::Flag;
use crate::projects::settings::{CONFIG_FILE_NAME, Config, PassConfig};
use std::fs;
use std::path::PathBuf;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn no_command_runs_demo() {
    assert_eq!(get_command(&[]), Ok(Command::Demo));
    assert_eq!(get_command(&args(&["demo"])), Ok(Command::Demo));
}

#[test]
fn eval_command_parses_config_and_bindings() {
    let command = get_command(&args(&[
        "eval",
        "tree.json",
        "--config",
        "passes.toml",
        "--var",
        "x=5",
        "--var",
        "y = -3",
    ]))
    .expect("command should parse");

    assert_eq!(
        command,
        Command::Eval {
            tree: PathBuf::from("tree.json"),
            options: RunOptions {
                config_path: Some(PathBuf::from("passes.toml")),
                bindings: vec![(String::from("x"), 5), (String::from("y"), -3)],
            },
        }
    );
}

#[test]
fn eval_command_requires_exactly_one_tree() {
    let missing = get_command(&args(&["eval"])).expect_err("no tree should fail");
    assert!(missing.contains("Missing expression tree"));

    let too_many = get_command(&args(&["eval", "a.json", "b.json"])).expect_err("two trees");
    assert!(too_many.contains("exactly one"));
}

#[test]
fn rewrite_command_accepts_many_trees() {
    let command = get_command(&args(&["rewrite", "a.json", "--json", "b.json"]))
        .expect("command should parse");

    assert_eq!(
        command,
        Command::Rewrite {
            trees: vec![PathBuf::from("a.json"), PathBuf::from("b.json")],
            options: RunOptions::default(),
        }
    );
}

#[test]
fn rewrite_command_requires_a_tree() {
    let error = get_command(&args(&["rewrite", "--hide-timers"])).expect_err("no tree");
    assert!(error.contains("Missing expression tree"));
}

#[test]
fn config_flag_requires_value() {
    let error = get_command(&args(&["eval", "tree.json", "--config"])).expect_err("no value");
    assert_eq!(error, "Missing value for --config");

    let error = get_command(&args(&["eval", "tree.json", "--config", "--json"]))
        .expect_err("flag is not a value");
    assert_eq!(error, "Missing value for --config");
}

#[test]
fn unknown_flag_is_rejected() {
    let error = get_command(&args(&["eval", "tree.json", "--fold-harder"])).expect_err("unknown");
    assert!(error.contains("Unknown flag: '--fold-harder'"));
}

#[test]
fn unknown_command_is_rejected() {
    let error = get_command(&args(&["optimise"])).expect_err("unknown command");
    assert_eq!(error, "Invalid command: 'optimise'");
}

#[test]
fn bindings_must_be_name_equals_integer() {
    assert_eq!(parse_binding("count=12"), Ok((String::from("count"), 12)));
    assert!(parse_binding("count").is_err());
    assert!(parse_binding("=12").is_err());
    assert!(parse_binding("count=twelve").is_err());
}

#[test]
fn flags_are_collected_from_anywhere() {
    let flags = get_flags(&args(&["exprw", "rewrite", "a.json", "--hide-timers", "--json"]));
    assert_eq!(flags, vec![Flag::DisableTimers, Flag::JsonOutput]);
}

#[test]
fn var_bindings_override_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config_path = dir.path().join("passes.toml");
    fs::write(
        &config_path,
        "[[passes]]\nkind = \"constant_folding\"\n\n[environment]\nx = 1\ny = 2\n",
    )
    .expect("write config");

    let options = RunOptions {
        config_path: Some(config_path),
        bindings: vec![(String::from("x"), 10), (String::from("z"), 3)],
    };
    let config = load_config(&options, dir.path()).expect("config should load");

    assert_eq!(config.passes, vec![PassConfig::ConstantFolding]);
    assert_eq!(config.environment.get("x"), Some(&10));
    assert_eq!(config.environment.get("y"), Some(&2));
    assert_eq!(config.environment.get("z"), Some(&3));
}

#[test]
fn falls_back_to_project_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[[passes]]\nkind = \"constant_rewriting\"\nvalue = 5\n\n[environment]\nn = 8\n",
    )
    .expect("write config");

    let options = RunOptions {
        config_path: None,
        bindings: vec![(String::from("n"), 9)],
    };
    let config = load_config(&options, dir.path()).expect("config should load");

    assert_eq!(config.passes, vec![PassConfig::ConstantRewriting { value: 5 }]);
    assert_eq!(config.environment.get("n"), Some(&9));
}

#[test]
fn explicit_config_wins_over_project_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join(CONFIG_FILE_NAME), "[environment]\nn = 8\n")
        .expect("write project config");
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[environment]\nm = 1\n").expect("write explicit config");

    let options = RunOptions {
        config_path: Some(explicit),
        bindings: Vec::new(),
    };
    let config = load_config(&options, dir.path()).expect("config should load");

    assert_eq!(config.environment.get("m"), Some(&1));
    assert_eq!(config.environment.get("n"), None);
}

#[test]
fn no_config_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let options = RunOptions {
        config_path: None,
        bindings: vec![(String::from("x"), 4)],
    };

    let mut expected = Config::default();
    expected.bind("x", 4);
    assert_eq!(load_config(&options, dir.path()), Ok(expected));
}
