//! Reading and writing parameter documents.
//!
//! Schema and override documents may be YAML, JSON, or TOML files, or
//! directories of such files whose top-level keys are combined. Resolved
//! trees are written back in the format named by the output path.

mod error;
mod format;
mod loader;
mod writer;
mod yaml;

pub use format::DocumentFormat;
pub use loader::load_document;
pub(crate) use loader::load_all;
pub use writer::save_document;

#[cfg(test)]
mod tests;
