//! Library interface for the `paramdef` command.
//!
//! The binary parses [`cli::Args`] and hands them to [`run`], which resolves
//! the documents, reports unused overrides, and renders or saves the tree.

pub mod cli;
pub mod error;

use std::io::Write;

use camino::Utf8Path;
use paramdef::create_params;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;
use crate::error::CliError;

/// Install a stderr log subscriber filtered by `RUST_LOG`, showing only
/// errors by default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the documents named by `args`.
///
/// Unused overrides and their count go to `stderr`. Without `--out` the
/// resolved tree is rendered to `stdout` in the requested format.
///
/// # Errors
///
/// Returns [`CliError::Params`] when resolution fails, including the unused
/// check under `--error-on-unused`, and [`CliError::Output`] when writing to
/// either stream fails.
pub fn run<O, E>(args: &Args, stdout: &mut O, stderr: &mut E) -> Result<(), CliError>
where
    O: Write,
    E: Write,
{
    let resolved = create_params(&args.schema, &args.overrides, &args.resolve_options())?;
    for entry in resolved.unused() {
        writeln!(stderr, "{entry}")?;
    }
    writeln!(stderr, "{} unused parameters", resolved.unused_count())?;

    if args.out.is_none() {
        let rendered = args
            .format
            .document_format()
            .render(Utf8Path::new("<stdout>"), resolved.params())?;
        stdout.write_all(rendered.as_bytes())?;
    }
    Ok(())
}
