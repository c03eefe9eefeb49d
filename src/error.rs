//! Error types for the command line surface.
//!
//! Engine failures arrive as [`crate::bundler::Error`] and are wrapped here
//! together with argument errors.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bundler errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as Engine;

        match self {
            BundlerError::Bundler(Engine::MissingScript(path)) => {
                vec![format!("Check that {} exists", path.display())]
            }
            BundlerError::Bundler(Engine::Execution { .. }) => vec![
                "The script must run without errors before it can be bundled".to_string(),
                "Install its dependencies in the interpreter given by --python".to_string(),
            ],
            BundlerError::Bundler(Engine::InterpreterNotFound(_)) => {
                vec!["Pass --python or set DEPBUNDLE_PYTHON".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
