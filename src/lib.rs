//! Dependency bundler for Python scripts
//!
//! Evaluates a script once, finds the third-party packages it imported,
//! packs them into a ZIP container, and writes a copy of the script that
//! mounts the container on start and removes it on exit.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
