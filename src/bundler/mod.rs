//! Dependency bundling engine.
//!
//! Turns a script into a single self-contained script that carries its
//! third-party dependencies:
//!
//! - [`resolver`] - evaluates the scripts once and finds external packages
//! - [`archive`] - packs the packages into a ZIP container
//! - [`codec`] - encodes the container as printable text
//! - [`stub`] - wraps the original source with the mount/cleanup code
//! - [`builder`] - the [`Bundler`] that runs the stages in order

pub mod archive;
pub mod builder;
pub mod codec;
pub mod error;
pub mod resolver;
pub mod settings;
pub mod stub;
pub mod utils;

pub use builder::Bundler;
pub use codec::{EncodedPayload, Scheme};
pub use error::{Error, Result};
pub use resolver::{PackageRef, ResolvedSet, Resolver};
pub use settings::{Settings, SettingsBuilder};

use std::path::PathBuf;

/// A written bundle.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Path of the generated script
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// Hex SHA-256 of the generated script
    pub checksum: String,
    /// Payload encoding used
    pub scheme: Scheme,
    /// Logical names of the bundled modules
    pub modules: Vec<String>,
}
