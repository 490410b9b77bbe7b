//! Filesystem access to a generated context directory
//!
//! A context directory holds one index file at its root and one bundle file
//! per folder listed in the index. Reads are synchronous and every file is
//! decoded exactly once through the core boundary parsers.

#![allow(clippy::result_large_err)]

use ctxdrift_core::diff::BundleSource;
use ctxdrift_core::model::{parse_bundle_file_bytes, parse_index_bytes, Bundle, Index};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{at_path, folder_escapes_root, index_missing, io_error, Result};

/// Default index file name
pub const DEFAULT_INDEX_FILE: &str = "context_main.json";

/// Default per-folder bundle file name
pub const DEFAULT_BUNDLE_FILE: &str = "context.json";

/// A context directory on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDir {
    root: PathBuf,
    index_file: String,
    bundle_file: String,
}

/// An index together with the digest of the bytes it was decoded from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedIndex {
    pub index: Index,
    /// SHA-256 hex of the raw index file
    pub digest: String,
}

/// Compute the SHA-256 hex digest of raw bytes
pub fn digest_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl ContextDir {
    /// Open a context directory with the default file names
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
            bundle_file: DEFAULT_BUNDLE_FILE.to_string(),
        }
    }

    /// Override the index and bundle file names
    pub fn with_file_names(
        mut self,
        index_file: impl Into<String>,
        bundle_file: impl Into<String>,
    ) -> Self {
        self.index_file = index_file.into();
        self.bundle_file = bundle_file.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index_file)
    }

    /// Path of the bundle file for `folder`
    ///
    /// `"."` and `""` name the directory itself. Folder paths are
    /// slash-separated; `..` segments are rejected.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the folder path would leave the context directory.
    pub fn bundle_path(&self, folder: &str) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in folder.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(folder_escapes_root(folder)),
                s => path.push(s),
            }
        }
        path.push(&self.bundle_file);
        Ok(path)
    }

    /// Read the raw index bytes
    ///
    /// # Errors
    ///
    /// `NotFound` if the index file is absent, `Io` for other read failures.
    pub fn read_index_bytes(&self) -> Result<Vec<u8>> {
        let path = self.index_path();
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => index_missing(&path),
            _ => io_error("read_index", &path, e),
        })
    }

    /// Read and decode the index
    ///
    /// # Errors
    ///
    /// As [`read_index_bytes`](Self::read_index_bytes), plus `Corrupt` if
    /// the file is not a valid index.
    pub fn read_index(&self) -> Result<Index> {
        self.load_index().map(|loaded| loaded.index)
    }

    /// Read and decode the index, keeping the digest of its raw bytes
    ///
    /// # Errors
    ///
    /// Same as [`read_index`](Self::read_index).
    pub fn load_index(&self) -> Result<LoadedIndex> {
        let bytes = self.read_index_bytes()?;
        let index = parse_index_bytes(&bytes).map_err(|e| at_path(e, &self.index_path()))?;
        tracing::debug!(
            context_dir = %self.root.display(),
            folder_count = index.folders.len(),
            "index loaded"
        );
        Ok(LoadedIndex {
            index,
            digest: digest_bytes(&bytes),
        })
    }

    /// Read and decode the bundles for one folder
    ///
    /// A folder with no bundle file yields an empty vec.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an escaping folder path, `Corrupt` for an
    /// undecodable file, `Io` for other read failures.
    pub fn read_bundles(&self, folder: &str) -> Result<Vec<Bundle>> {
        let path = self.bundle_path(folder)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(folder_path = folder, "no bundle file, treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_error("read_bundles", &path, e)),
        };
        parse_bundle_file_bytes(&bytes).map_err(|e| at_path(e, &path))
    }
}

impl BundleSource for ContextDir {
    fn load_bundles(&self, folder_path: &str) -> Result<Vec<Bundle>> {
        self.read_bundles(folder_path)
    }
}
