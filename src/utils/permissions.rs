//! Owner-only permissions for cache files and directories.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::error::Result;

/// Create `dir` and any missing parents with mode 0o700.
///
/// Existing directories keep whatever mode they already have. On non-Unix
/// platforms the mode is ignored.
pub fn create_private_dir(dir: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(dir)?;
    Ok(())
}

/// Open `path` for writing, truncating it, creating it with mode 0o600.
pub fn create_private_file(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;
    // The creation mode only applies to new files; tighten pre-existing ones.
    restrict_file_permissions(path)?;
    Ok(file)
}

/// Set owner-only read/write (0o600) on a file. No-op off Unix.
pub fn restrict_file_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}
