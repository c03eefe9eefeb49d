//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, and the conversion
//! of parsed arguments into engine [`Settings`].

use crate::bundler::{Settings, SettingsBuilder, archive::Compression};
use clap::Parser;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Bundle a Python script's third-party dependencies into the script itself
#[derive(Parser, Debug)]
#[command(
    name = "depbundle",
    version,
    about = "Bundle a Python script's third-party dependencies into the script itself",
    long_about = "Evaluates the given scripts once, finds every imported module that lives in a \
site-packages directory, zips those packages, and writes a copy of the first script that \
unpacks them to a temporary directory on start and removes it on exit.

Usage:
  depbundle app.py
  depbundle app.py helpers.py --output dist/app.py
  depbundle app.py --python python3.12 --portable

A script can skip discovery by declaring the modules to bundle:
  __depbundle_modules__ = [\"requests\", \"yaml\"]

Exit code 0 = artifact written to the reported path."
)]
pub struct Args {
    /// Scripts to evaluate; the first is wrapped into the artifact
    #[arg(value_name = "SCRIPT", required = true)]
    pub scripts: Vec<PathBuf>,

    /// Artifact path (default: <entry>.bundled.py next to the entry script)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Python interpreter used to evaluate the scripts
    #[arg(long, value_name = "PYTHON", env = "DEPBUNDLE_PYTHON")]
    pub python: Option<PathBuf>,

    /// Encode the payload with base85 instead of basE91
    #[arg(long, env = "DEPBUNDLE_PORTABLE")]
    pub portable: bool,

    /// Store container entries without compression
    #[arg(long)]
    pub store: bool,

    /// Print the resolved modules and exit without writing anything
    #[arg(long)]
    pub list: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every resolved path
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.scripts.is_empty() {
            return Err("At least one script is required".to_string());
        }

        if let (Some(output), Some(entry)) = (&self.output, self.scripts.first()) {
            if same_file(entry, output) {
                return Err(format!(
                    "Output path {} would overwrite the entry script",
                    output.display()
                ));
            }
        }

        Ok(())
    }

    /// Engine settings for these arguments.
    pub fn settings(&self) -> crate::bundler::Result<Settings> {
        let mut builder = SettingsBuilder::new()
            .scripts(self.scripts.clone())
            .portable(self.portable)
            .compression(if self.store {
                Compression::Stored
            } else {
                Compression::Deflated
            });

        if let Some(output) = &self.output {
            builder = builder.output(output);
        }
        if let Some(python) = &self.python {
            builder = builder.interpreter(python);
        }

        builder.build()
    }
}

/// Whether `a` and `b` name the same file, however they are spelled.
fn same_file(a: &Path, b: &Path) -> bool {
    resolved(a) == resolved(b)
}

/// Absolute form of `path` with symlinks resolved as far as it exists.
fn resolved(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let absolute = path
        .absolutize()
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| path.to_path_buf());
    let within_parent = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|p| p.join(name)),
        _ => None,
    };
    within_parent.unwrap_or(absolute)
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
