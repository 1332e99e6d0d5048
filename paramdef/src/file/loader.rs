//! Loading schema and override documents from files or directories.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde_json::{Map, Value};

use super::DocumentFormat;
use super::error::unsupported;
use crate::{ParamError, ParamResult};

/// Load a document, or a directory of documents, into a single mapping.
///
/// A file must carry a recognised extension. A directory is read in file
/// name order; files without a recognised extension are skipped, and the
/// top-level keys of the remaining files are combined, later files replacing
/// earlier ones on collision. Key order inside each file is preserved.
///
/// # Errors
///
/// Returns [`ParamError::UnsupportedFormat`] for a file with an unknown
/// extension and [`ParamError::Document`] when reading or parsing fails.
///
/// # Examples
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use paramdef::file::load_document;
///
/// let defs = load_document(Utf8Path::new("params/defs.yaml"))?;
/// assert!(defs.contains_key("classes"));
/// # Ok::<_, paramdef::ParamError>(())
/// ```
pub fn load_document(path: &Utf8Path) -> ParamResult<Map<String, Value>> {
    if path.is_dir() {
        load_directory(path)
    } else {
        load_file(path)
    }
}

fn load_file(path: &Utf8Path) -> ParamResult<Map<String, Value>> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| unsupported(path))?;
    let contents = std::fs::read_to_string(path).map_err(|err| ParamError::document(path, err))?;
    tracing::debug!(path = %path, ?format, "loading document");
    format.parse(path, &contents)
}

fn load_directory(path: &Utf8Path) -> ParamResult<Map<String, Value>> {
    let dir = Dir::open_ambient_dir(path, ambient_authority())
        .map_err(|err| ParamError::document(path, err))?;
    let mut combined = Map::new();
    for name in document_names(&dir, path)? {
        let file_path = path.join(&name);
        let Some(format) = DocumentFormat::from_path(&file_path) else {
            tracing::debug!(path = %file_path, "skipping file without a document extension");
            continue;
        };
        let contents = dir
            .read_to_string(&name)
            .map_err(|err| ParamError::document(&file_path, err))?;
        tracing::debug!(path = %file_path, ?format, "loading document");
        combined.extend(format.parse(&file_path, &contents)?);
    }
    Ok(combined)
}

/// Regular file names in `dir`, sorted so loading order is reproducible.
fn document_names(dir: &Dir, path: &Utf8Path) -> ParamResult<Vec<String>> {
    let entries = dir.entries().map_err(|err| ParamError::document(path, err))?;
    let mut names = Vec::new();
    for listed in entries {
        let entry = listed.map_err(|err| ParamError::document(path, err))?;
        let is_file = entry
            .file_type()
            .map_err(|err| ParamError::document(path, err))?
            .is_file();
        if is_file {
            names.push(entry.file_name().map_err(|err| ParamError::document(path, err))?);
        }
    }
    names.sort();
    Ok(names)
}

/// Load every path in order, returning one mapping per path.
///
/// # Errors
///
/// Returns the first error raised by [`load_document`].
pub(crate) fn load_all<P>(paths: &[P]) -> ParamResult<Vec<Value>>
where
    P: AsRef<Utf8Path>,
{
    paths
        .iter()
        .map(|path| load_document(path.as_ref()).map(Value::Object))
        .collect()
}
