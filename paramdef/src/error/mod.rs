//! Error types produced while loading, resolving, and auditing parameters.

mod constructors;
mod types;

pub use types::ParamError;

/// Result alias used throughout the crate.
pub type ParamResult<T> = Result<T, ParamError>;
