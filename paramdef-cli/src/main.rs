//! CLI entrypoint for `paramdef`.

use clap::Parser;
use paramdef_cli::cli::Args;
use paramdef_cli::error::CliError;
use paramdef_cli::{init_logging, run};

fn main() -> Result<(), CliError> {
    init_logging();
    let args = Args::parse();
    run(&args, &mut std::io::stdout().lock(), &mut std::io::stderr().lock())
}
