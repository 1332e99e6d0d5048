//! Error constructors shared by document readers and writers.

use camino::Utf8Path;

use crate::ParamError;

pub(super) fn invalid_data(path: &Utf8Path, msg: impl Into<String>) -> ParamError {
    ParamError::document(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}

pub(super) fn unsupported(path: &Utf8Path) -> ParamError {
    ParamError::UnsupportedFormat {
        path: path.to_path_buf(),
    }
}
