//! File system utilities for writing artifacts.

use crate::bundler::error::{ErrorExt, Result};
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};

/// Writes `contents` to `path`, creating any parent directories as needed.
///
/// The file is flushed before returning so a following metadata or checksum
/// read sees the final size.
pub async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }
    let mut file = fs::File::create(path)
        .await
        .fs_context("creating artifact", path)?;
    file.write_all(contents)
        .await
        .fs_context("writing artifact", path)?;
    file.flush().await.fs_context("flushing artifact", path)?;
    Ok(())
}

/// Gives `to` the permission bits of `from`, so an executable entry script
/// yields an executable artifact.
#[cfg(unix)]
pub async fn copy_permissions(from: &Path, to: &Path) -> Result<()> {
    let permissions = fs::metadata(from)
        .await
        .fs_context("reading script permissions", from)?
        .permissions();
    fs::set_permissions(to, permissions)
        .await
        .fs_context("setting artifact permissions", to)?;
    Ok(())
}

/// Permission bits are not carried over on this platform.
#[cfg(not(unix))]
pub async fn copy_permissions(_from: &Path, _to: &Path) -> Result<()> {
    Ok(())
}
