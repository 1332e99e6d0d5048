//! Writing resolved trees back to disk.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::Value;

use super::DocumentFormat;
use super::error::{invalid_data, unsupported};
use crate::{ParamError, ParamResult};

/// Write `tree` to `path` in the format named by its extension, creating
/// the parent directory when needed.
///
/// Loading the written file with [`super::load_document`] reproduces `tree`:
/// integers and floats stay distinct and key order is kept.
///
/// # Errors
///
/// Returns [`ParamError::UnsupportedFormat`] for an unknown extension and
/// [`ParamError::Document`] when rendering or writing fails.
pub fn save_document(path: &Utf8Path, tree: &Value) -> ParamResult<()> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| unsupported(path))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| invalid_data(path, "output path has no file name"))?;
    let rendered = format.render(path, tree)?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = ensure_dir(parent)?;
    dir.write(file_name, rendered.as_bytes())
        .map_err(|err| ParamError::document(path, err))?;
    tracing::debug!(path = %path, ?format, "wrote resolved parameters");
    Ok(())
}

fn ensure_dir(path: &Utf8Path) -> ParamResult<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority())
                .map_err(|err| ParamError::document(path, err))?;
            Dir::open_ambient_dir(path, ambient_authority())
                .map_err(|err| ParamError::document(path, err))
        }
        Err(open_err) => Err(ParamError::document(path, open_err)),
    }
}
