//! Format-specific parsing and rendering.

use camino::Utf8Path;
use serde_json::{Map, Value};

use super::error::invalid_data;
use super::yaml::yaml_to_json;
use crate::{ParamError, ParamResult};

/// Serialisation formats understood by the document store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
    /// TOML (`.toml`).
    Toml,
}

impl DocumentFormat {
    /// Select a format from the file extension, ignoring case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use camino::Utf8Path;
    /// use paramdef::file::DocumentFormat;
    ///
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("defs.YML")), Some(DocumentFormat::Yaml));
    /// assert_eq!(DocumentFormat::from_path(Utf8Path::new("notes.txt")), None);
    /// ```
    #[must_use]
    pub fn from_path(path: &Utf8Path) -> Option<Self> {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `contents` into a top-level mapping. `path` is only used for
    /// error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Document`] when the contents fail to parse or
    /// the top level is not a mapping.
    pub fn parse(self, path: &Utf8Path, contents: &str) -> ParamResult<Map<String, Value>> {
        let value = match self {
            Self::Yaml => {
                let raw: serde_yaml::Value =
                    serde_yaml::from_str(contents).map_err(|err| ParamError::document(path, err))?;
                yaml_to_json(raw).map_err(|msg| invalid_data(path, msg))?
            }
            Self::Json => serde_json::from_str(contents).map_err(|err| ParamError::document(path, err))?,
            Self::Toml => toml::from_str(contents).map_err(|err| ParamError::document(path, err))?,
        };
        match value {
            Value::Object(map) => Ok(map),
            // An empty YAML file parses as null.
            Value::Null => Ok(Map::new()),
            other => Err(invalid_data(
                path,
                format!("expected a mapping at the top level, got {other}"),
            )),
        }
    }

    /// Render `tree` in this format. `path` is only used for error
    /// reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Document`] when the tree cannot be represented,
    /// such as a null value in TOML.
    pub fn render(self, path: &Utf8Path, tree: &Value) -> ParamResult<String> {
        match self {
            Self::Yaml => serde_yaml::to_string(tree).map_err(|err| ParamError::document(path, err)),
            Self::Json => serde_json::to_string_pretty(tree)
                .map(|mut rendered| {
                    rendered.push('\n');
                    rendered
                })
                .map_err(|err| ParamError::document(path, err)),
            Self::Toml => toml::to_string(tree).map_err(|err| ParamError::document(path, err)),
        }
    }
}
