//! One-shot evaluation of the scripts in a separate interpreter.
//!
//! The scripts run in a fresh interpreter process, inside a fresh namespace,
//! so nothing of the bundler is visible to them and nothing they do outlives
//! the process except the JSON dump of their bindings.

use super::context::RuntimeContext;
use crate::bundler::{
    Error, Result,
    error::{Context, ErrorExt},
};
use std::path::{Path, PathBuf};

/// Program handed to the interpreter with `-c`.
pub const PROBE_SOURCE: &str = include_str!("probe.py");

/// Lines of interpreter stderr kept in an execution error.
const STDERR_TAIL: usize = 20;

/// Evaluate `scripts` in order with `interpreter` and return their bindings.
///
/// # Errors
///
/// * [`Error::Execution`] - a script raised, including its own import errors
/// * [`Error::InterpreterNotFound`] - the interpreter could not be started
pub async fn evaluate(interpreter: &Path, scripts: &[PathBuf]) -> Result<RuntimeContext> {
    let entry = scripts
        .first()
        .cloned()
        .context("no scripts to evaluate")?;

    let scratch = tempfile::Builder::new()
        .prefix("depbundle-probe-")
        .tempdir()?;
    let dump = scratch.path().join("context.json");

    log::debug!(
        "Evaluating {} script(s) with {}",
        scripts.len(),
        interpreter.display()
    );

    let output = tokio::process::Command::new(interpreter)
        .arg("-c")
        .arg(PROBE_SOURCE)
        .arg(&dump)
        .args(scripts)
        .env("PYTHONDONTWRITEBYTECODE", "1")
        .output()
        .await
        .map_err(|e| {
            Error::InterpreterNotFound(format!("failed to run {}: {}", interpreter.display(), e))
        })?;

    // the scripts' own stdout is redirected here too
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        log::debug!("[probe] {}", line);
    }

    if !output.status.success() {
        return Err(Error::Execution {
            script: entry,
            reason: stderr_tail(&output.stderr, output.status.code()),
        });
    }

    // a script that ends the process itself (`os._exit`) never gets to the dump
    if !tokio::fs::try_exists(&dump).await.unwrap_or(false) {
        return Err(Error::Execution {
            script: entry,
            reason: "interpreter exited before the scripts finished evaluating".into(),
        });
    }

    let raw = tokio::fs::read(&dump)
        .await
        .fs_context("reading probe output", &dump)?;
    let context: RuntimeContext = serde_json::from_slice(&raw)?;

    for (module, error) in &context.import_errors {
        log::debug!("probe could not import {}: {}", module, error);
    }

    Ok(context)
}

fn stderr_tail(stderr: &[u8], code: Option<i32>) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let tail = lines[lines.len().saturating_sub(STDERR_TAIL)..].join("\n");
    match code {
        Some(code) if tail.is_empty() => format!("interpreter exited with status {code}"),
        Some(code) => format!("interpreter exited with status {code}\n{tail}"),
        None => format!("interpreter terminated by signal\n{tail}"),
    }
}
