//! Command line interface for depbundle.
//!
//! This module provides the CLI for bundling operations, with argument
//! parsing, command execution, and user feedback.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Bundler, ResolvedSet};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Execute already parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let config = RuntimeConfig::from(args);
    let settings = args.settings()?;
    let bundler = Bundler::new(settings)?;

    config.section(&format!("Bundling {}", bundler.settings().entry().display()))?;
    config.progress("Evaluating scripts and resolving modules")?;
    let resolved = bundler.resolve().await?;
    print_resolved(&config, &resolved)?;

    if args.list {
        return Ok(0);
    }

    config.progress("Packing and encoding dependencies")?;
    let artifact = bundler.bundle_resolved(&resolved).await?;

    config.verbose_println(&format!(
        "{} bytes, {} payload, sha256 {}",
        artifact.size, artifact.scheme, artifact.checksum
    ))?;
    config.success(&format!("success! written to file {}", artifact.path.display()))?;

    Ok(0)
}

fn print_resolved(config: &RuntimeConfig, resolved: &ResolvedSet) -> std::io::Result<()> {
    if resolved.is_empty() {
        return config.warn("no third-party modules found");
    }
    for package in resolved {
        config.indent(&package.logical_name)?;
        config.verbose_println(&format!(
            "    {} -> {}/",
            package.filesystem_path.display(),
            package.import_name
        ))?;
    }
    Ok(())
}
