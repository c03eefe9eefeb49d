//! Builder for constructing Settings.

use super::Settings;
use crate::bundler::archive::Compression;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use depbundle::bundler::SettingsBuilder;
///
/// # fn example() -> depbundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scripts(vec!["app.py".into()])
///     .output("dist/app.py")
///     .interpreter("python3.12")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    scripts: Vec<PathBuf>,
    output: Option<PathBuf>,
    interpreter: Option<PathBuf>,
    portable: bool,
    compression: Compression,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the scripts to evaluate, entry first.
    ///
    /// # Required
    ///
    /// At least one script is required for building.
    pub fn scripts(mut self, scripts: Vec<PathBuf>) -> Self {
        self.scripts = scripts;
        self
    }

    /// Sets the artifact path.
    ///
    /// Default: `<entry-stem>.bundled.<ext>` next to the entry script
    pub fn output<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the interpreter used for the probe.
    ///
    /// Default: first of `python3`, `python` on `PATH`
    pub fn interpreter<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.interpreter = Some(path.as_ref().to_path_buf());
        self
    }

    /// Forces the portable base85 payload encoding.
    ///
    /// Default: false (basE91 when available)
    pub fn portable(mut self, portable: bool) -> Self {
        self.portable = portable;
        self
    }

    /// Sets the container compression.
    ///
    /// Default: [`Compression::Deflated`]
    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no script was given.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        if self.scripts.is_empty() {
            crate::bail!("at least one script is required");
        }

        Ok(Settings::new(
            self.scripts,
            self.output,
            self.interpreter,
            self.portable,
            self.compression,
        ))
    }
}
