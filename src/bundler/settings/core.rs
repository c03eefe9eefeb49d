//! Core Settings struct and implementations.

use crate::bundler::{archive::Compression, codec::Scheme};
use std::path::{Path, PathBuf};

/// Suffix inserted before the entry script's extension to name the output.
pub const OUTPUT_SUFFIX: &str = "bundled";

/// Main settings for bundler operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Examples
///
/// ```no_run
/// use depbundle::bundler::SettingsBuilder;
///
/// # fn example() -> depbundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scripts(vec!["app.py".into(), "helpers.py".into()])
///     .portable(true)
///     .build()?;
/// assert_eq!(settings.output_path().file_name().unwrap(), "app.bundled.py");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Scripts to evaluate; the first is the entry whose source gets wrapped.
    scripts: Vec<PathBuf>,

    /// Explicit artifact path.
    ///
    /// None means `<entry-stem>.bundled.<ext>` next to the entry.
    output: Option<PathBuf>,

    /// Interpreter for the probe, looked up on `PATH` when None.
    interpreter: Option<PathBuf>,

    /// Force the base85 payload encoding.
    portable: bool,

    /// Container compression.
    compression: Compression,
}

impl Settings {
    pub(super) fn new(
        scripts: Vec<PathBuf>,
        output: Option<PathBuf>,
        interpreter: Option<PathBuf>,
        portable: bool,
        compression: Compression,
    ) -> Self {
        Self {
            scripts,
            output,
            interpreter,
            portable,
            compression,
        }
    }

    /// Returns every script, entry first.
    pub fn scripts(&self) -> &[PathBuf] {
        &self.scripts
    }

    /// Returns the entry script.
    pub fn entry(&self) -> &Path {
        // the builder rejects an empty script list
        &self.scripts[0]
    }

    /// Returns where the artifact is written.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(self.entry()),
        }
    }

    /// Returns the configured interpreter, if any.
    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter.as_deref()
    }

    /// Returns the payload encoding for this build.
    pub fn scheme(&self) -> Scheme {
        Scheme::select(self.portable)
    }

    /// Returns the container compression.
    pub fn compression(&self) -> Compression {
        self.compression
    }
}

/// `dir/app.py` becomes `dir/app.bundled.py`; `dir/tool` becomes `dir/tool.bundled`.
pub fn default_output_path(entry: &Path) -> PathBuf {
    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match entry.extension() {
        Some(extension) => format!("{}.{}.{}", stem, OUTPUT_SUFFIX, extension.to_string_lossy()),
        None => format!("{}.{}", stem, OUTPUT_SUFFIX),
    };
    entry.with_file_name(name)
}
