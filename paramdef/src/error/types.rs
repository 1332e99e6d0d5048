//! Primary error enum for parameter resolution flows.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::KeyPath;

/// Errors that can occur while resolving parameters against a schema.
///
/// Every variant raised during resolution carries the dotted [`KeyPath`] of
/// the offending field. Messages end with the path in square brackets so a
/// reader can locate the value in the original document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParamError {
    /// A value failed a bound, type, or membership check.
    #[error("{message} [{path}]")]
    Validation {
        /// Location of the rejected value.
        path: KeyPath,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A `bin` id could not be parsed as an integer.
    #[error("bin ids must be integers, got '{key}' [{path}]")]
    BinKey {
        /// Location of the bin field.
        path: KeyPath,
        /// The offending id.
        key: String,
    },

    /// A record lacks a field that has no declared default.
    #[error("'{field}' must be present [{path}]")]
    MissingField {
        /// Location of the record.
        path: KeyPath,
        /// Name of the absent field.
        field: String,
    },

    /// The schema or an override has a structure the resolver cannot use.
    #[error("{message} [{path}]")]
    Shape {
        /// Location of the malformed node.
        path: KeyPath,
        /// Description of the structural problem.
        message: String,
    },

    /// A field refers to a class that is not in the population index.
    #[error("unknown population '{class}' [{path}]")]
    UnknownPopulation {
        /// Location of the referring field.
        path: KeyPath,
        /// Name of the missing class.
        class: String,
    },

    /// Override keys were never consumed and the caller asked for this to
    /// be fatal.
    #[error("{count} unused parameters were passed to the resolver")]
    UnusedParameters {
        /// Number of unused entries found.
        count: usize,
    },

    /// A document could not be read, parsed, rendered, or written.
    #[error("document error in '{path}': {source}")]
    Document {
        /// Path of the document.
        path: Utf8PathBuf,
        /// Underlying error reported by the reader or writer.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A document path has no recognised extension.
    #[error("unsupported document format for '{path}'; expected .yaml, .yml, .json or .toml")]
    UnsupportedFormat {
        /// Path of the rejected document.
        path: Utf8PathBuf,
    },
}
