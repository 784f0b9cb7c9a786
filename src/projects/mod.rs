/// # Everything outside the pure core
/// Config loading, tree files and the command line all live here.

// The basic CLI for evaluating and rewriting trees
pub mod cli;

pub mod settings;
pub mod tree_files;
