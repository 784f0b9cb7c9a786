fn main() {
    expr_rewriter::projects::cli::start_cli();
}
