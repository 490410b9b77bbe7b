//! Error handling for ctxdrift-store
//!
//! Wraps ctxdrift-core ExError with filesystem-specific helpers

use ctxdrift_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an index-missing error
pub fn index_missing(path: &Path) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("read_index")
        .with_path(path.display().to_string())
        .with_message("no index file in context directory")
}

/// Create an error for a folder path that escapes the context directory
pub fn folder_escapes_root(folder: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("resolve_folder")
        .with_entity_id(folder)
        .with_message("folder path must stay inside the context directory")
}

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Attach the file path to a decode error unless it already names one
pub fn at_path(err: ExError, path: &Path) -> ExError {
    if err.path().is_some() {
        err
    } else {
        err.with_path(path.display().to_string())
    }
}
