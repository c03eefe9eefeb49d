//! Error types for the bundling engine.
//!
//! Every stage of the pipeline (probe, resolve, archive, encode, synthesize)
//! reports through [`Error`]. Warnings that do not abort a run are logged
//! instead of returned.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the bundling engine.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Catch-all with a human readable message.
    #[error("{0}")]
    GenericError(String),

    /// Plain I/O failure without path information.
    #[error(transparent)]
    IoError(#[from] io::Error),

    /// I/O failure on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        context: &'static str,
        path: PathBuf,
        error: io::Error,
    },

    /// A script named on the command line does not exist.
    #[error("script not found: {}", .0.display())]
    MissingScript(PathBuf),

    /// The one-shot evaluation of the scripts failed.
    #[error("failed to evaluate {}: {reason}", .script.display())]
    Execution {
        /// Entry script of the failed evaluation
        script: PathBuf,
        /// Interpreter diagnostics
        reason: String,
    },

    /// No usable interpreter for the probe.
    #[error("python interpreter not found: {0}")]
    InterpreterNotFound(String),

    /// The probe produced output that could not be parsed.
    #[error("invalid probe output: {0}")]
    Json(#[from] serde_json::Error),

    /// Container assembly failure.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Directory walk failure.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// Invalid text handed to a decoder.
    #[error("decode error: {0}")]
    Decode(String),

    /// Stub template failure.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Path manipulation failure.
    #[error(transparent)]
    StripPrefix(#[from] std::path::StripPrefixError),
}

/// Attach file-system context to I/O results.
pub trait ErrorExt<T> {
    /// Wrap the error with what was being done and to which path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert an `Option` or foreign error into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Attach a message.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}

/// Return early with an [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
