//! Python interpreter detection.
//!
//! The probe needs an interpreter of the same kind that will later run the
//! bundled script. An explicit one from the settings wins; otherwise the first
//! of [`INTERPRETER_CANDIDATES`] on `PATH` is used.

use crate::bundler::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Executable names tried in order when no interpreter is configured.
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Interpreter found on `PATH`, cached for the life of the process.
pub static DEFAULT_INTERPRETER: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    for candidate in INTERPRETER_CANDIDATES {
        match which::which(candidate) {
            Ok(path) => {
                log::debug!("Found {} at: {}", candidate, path.display());
                return Some(path);
            }
            Err(e) => log::debug!("{} not found in PATH: {}", candidate, e),
        }
    }
    None
});

/// Resolve the interpreter used for the probe.
///
/// A configured path is looked up with `which` as well, so bare names like
/// `python3.12` work.
pub fn resolve_interpreter(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => which::which(path).map_err(|e| {
            Error::InterpreterNotFound(format!("{}: {}", path.display(), e))
        }),
        None => DEFAULT_INTERPRETER.clone().ok_or_else(|| {
            Error::InterpreterNotFound(format!(
                "none of {} found in PATH",
                INTERPRETER_CANDIDATES.join(", ")
            ))
        }),
    }
}
