//! Error types for the `paramdef` command.

use paramdef::ParamError;
use thiserror::Error;

/// Errors surfaced by the `paramdef` command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, resolving, or saving parameters failed.
    #[error(transparent)]
    Params(#[from] ParamError),

    /// Writing to the terminal failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
