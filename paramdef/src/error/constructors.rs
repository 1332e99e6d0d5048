//! Constructors and accessors for `ParamError`.

use camino::Utf8Path;

use super::ParamError;
use crate::KeyPath;

impl ParamError {
    /// Construct a validation failure at `path`.
    #[must_use]
    pub fn validation(path: &KeyPath, message: impl Into<String>) -> Self {
        Self::Validation {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Construct a structural failure at `path`.
    #[must_use]
    pub fn shape(path: &KeyPath, message: impl Into<String>) -> Self {
        Self::Shape {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Construct a missing-field failure for `field` inside the record at
    /// `path`.
    #[must_use]
    pub fn missing_field(path: &KeyPath, field: &str) -> Self {
        Self::MissingField {
            path: path.clone(),
            field: field.to_owned(),
        }
    }

    /// Wrap a reader or writer error for the document at `path`.
    #[must_use]
    pub fn document(
        path: &Utf8Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Document {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Returns the key path attached to resolution errors.
    ///
    /// Document and audit errors are not tied to a single field and return
    /// `None`.
    #[must_use]
    pub const fn key_path(&self) -> Option<&KeyPath> {
        match self {
            Self::Validation { path, .. }
            | Self::BinKey { path, .. }
            | Self::MissingField { path, .. }
            | Self::Shape { path, .. }
            | Self::UnknownPopulation { path, .. } => Some(path),
            Self::UnusedParameters { .. }
            | Self::Document { .. }
            | Self::UnsupportedFormat { .. } => None,
        }
    }
}
