//! Repository layout constants.

use std::path::{Path, PathBuf};

/// Name of the version-control metadata directory.
pub const METADATA_DIR: &str = ".git";

/// The only remote both tools manage.
pub const REMOTE: &str = "origin";

/// `<workdir>/.git`
pub fn metadata_dir(workdir: &Path) -> PathBuf {
    workdir.join(METADATA_DIR)
}

/// True when `workdir` directly contains a metadata directory.
///
/// A `.git` *file* (worktrees, submodules) does not count.
pub fn is_managed(workdir: &Path) -> bool {
    metadata_dir(workdir).is_dir()
}
