//! Access to a dataset's per-folder bundle files.

use std::collections::BTreeMap;

use crate::errors::Result;
use crate::model::Bundle;

/// Supplies the bundle array stored for a folder path
///
/// Implementations must return an empty vec when a folder has no bundle
/// file; absence is never an error. A file that exists but cannot be decoded
/// is an error.
pub trait BundleSource {
    /// Load the bundles stored for `folder_path`
    ///
    /// # Errors
    ///
    /// `Corrupt` for undecodable files, `Io` for read failures.
    fn load_bundles(&self, folder_path: &str) -> Result<Vec<Bundle>>;
}

impl<T: BundleSource + ?Sized> BundleSource for &T {
    fn load_bundles(&self, folder_path: &str) -> Result<Vec<Bundle>> {
        (**self).load_bundles(folder_path)
    }
}

/// In-memory source keyed by folder path
impl BundleSource for BTreeMap<String, Vec<Bundle>> {
    fn load_bundles(&self, folder_path: &str) -> Result<Vec<Bundle>> {
        Ok(self.get(folder_path).cloned().unwrap_or_default())
    }
}
