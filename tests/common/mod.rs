//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the Python fixtures.
pub fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Fixture install root; its path contains `site-packages`.
pub fn site_packages() -> PathBuf {
    fixtures().join("site-packages")
}

/// Interpreter for tests that evaluate scripts, `None` skips them.
pub fn python() -> Option<PathBuf> {
    let found = which::which("python3").or_else(|_| which::which("python")).ok();
    if found.is_none() {
        eprintln!("no python interpreter on PATH, skipping");
    }
    found
}

/// Write `contents` to `root/relative`, creating parents.
pub fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, contents).expect("write file");
    path
}

/// A fake install root with a `widgets` package, a single-file module and a
/// bytecode cache.
pub fn fake_site(root: &Path) -> PathBuf {
    let site = root.join("lib/python3/site-packages");
    write(&site, "widgets/__init__.py", "from widgets.gadgets import Gadget\n");
    write(&site, "widgets/gadgets.py", "class Gadget:\n    pass\n");
    write(&site, "widgets/parts/springs.py", "COIL = 3\n");
    write(&site, "widgets/__pycache__/gadgets.cpython-311.pyc", "cached");
    write(&site, "six.py", "PY3 = True\n");
    site
}

/// Archive entry names of a ZIP container.
pub fn entry_names(container: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::io::Cursor::new(container)).expect("valid zip");
    archive.file_names().map(String::from).collect()
}
