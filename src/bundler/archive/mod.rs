//! Packs resolved dependencies into one ZIP container.
//!
//! The container is built in memory and laid out the way the import system
//! expects to find modules on a search-path entry: a package directory becomes
//! `<import_name>/...`, a single-module file becomes `<import_name>.<ext>`.
//!
//! Entries are written in file-name order with a fixed timestamp, so packing
//! the same trees twice yields identical bytes.

use crate::bundler::{
    Error, Result,
    error::{Context, ErrorExt},
    resolver::{PackageRef, ResolvedSet},
};
use std::collections::HashSet;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};
use zip::{CompressionMethod, ZipWriter, result::ZipError, write::SimpleFileOptions};

/// Directories never copied into the container.
pub const SKIPPED_DIRS: &[&str] = &["__pycache__", ".mypy_cache", ".pytest_cache", ".ruff_cache"];

/// Entry compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate, falling back to [`Compression::Stored`] when the linked zip
    /// implementation lacks it
    #[default]
    Deflated,
    /// No compression
    Stored,
}

impl Compression {
    fn method(self) -> CompressionMethod {
        match self {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        }
    }
}

/// Pack every entry of `resolved` into an in-memory container.
///
/// Runs the tree walk on the blocking pool.
pub async fn pack(resolved: &ResolvedSet, compression: Compression) -> Result<Vec<u8>> {
    let resolved = resolved.clone();
    tokio::task::spawn_blocking(move || pack_blocking(&resolved, compression))
        .await
        .context("archive task panicked")?
}

/// Synchronous [`pack`].
pub fn pack_blocking(resolved: &ResolvedSet, compression: Compression) -> Result<Vec<u8>> {
    match write_container(resolved, compression) {
        Err(Error::Zip(ZipError::UnsupportedArchive(reason)))
            if compression != Compression::Stored =>
        {
            log::warn!("{:?} unavailable ({}), storing entries uncompressed", compression, reason);
            write_container(resolved, Compression::Stored)
        }
        other => other,
    }
}

fn write_container(resolved: &ResolvedSet, compression: Compression) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(compression.method())
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut written_roots = HashSet::new();
    for package in resolved {
        if !written_roots.insert(package.import_name.clone()) {
            log::debug!(
                "{} already packed for another name, skipping {}",
                package.import_name,
                package.logical_name
            );
            continue;
        }
        log::info!(
            "Packing {} from {}",
            package.import_name,
            package.filesystem_path.display()
        );
        add_package(&mut zip, package, options)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn add_package<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    package: &PackageRef,
    options: SimpleFileOptions,
) -> Result<()> {
    let root = &package.filesystem_path;

    if !package.is_package {
        let arcname = match root.extension().and_then(|e| e.to_str()) {
            Some(extension) => format!("{}.{}", package.import_name, extension),
            None => format!("{}.py", package.import_name),
        };
        return add_file(zip, root, &arcname, options);
    }

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root)?;
        let arcname = std::iter::once(package.import_name.clone())
            .chain(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join("/");
        add_file(zip, entry.path(), &arcname, options)?;
    }

    Ok(())
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    arcname: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    if is_extension_module(extension) {
        log::warn!(
            "{} is a compiled extension, the zip import hook cannot load it",
            arcname
        );
    }

    let bytes = std::fs::read(path).fs_context("reading file to pack", path)?;
    log::debug!("  {} -> {}", path.display(), arcname);
    zip.start_file(arcname, options)?;
    zip.write_all(&bytes).fs_context("writing archive entry", path)?;
    Ok(())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn is_extension_module(extension: &str) -> bool {
    matches!(extension, "so" | "pyd" | "dylib")
}
