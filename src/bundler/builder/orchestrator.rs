//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the pipeline
//! resolve → pack → encode → synthesize and writes the artifact.

use crate::bundler::{
    BundledArtifact, Error, Result, Settings,
    archive,
    codec::EncodedPayload,
    error::ErrorExt,
    resolver::{ResolvedSet, Resolver},
    stub::Stub,
    utils::fs,
};

use super::{checksum::calculate_file_sha256, tool_detection::resolve_interpreter};

/// Main bundler orchestrator.
///
/// Every stage runs to completion before the next starts; the first error
/// aborts the run and nothing is written.
///
/// # Examples
///
/// ```no_run
/// use depbundle::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> depbundle::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .scripts(vec!["app.py".into()])
///     .build()?;
///
/// let bundler = Bundler::new(settings)?;
/// let artifact = bundler.bundle().await?;
/// println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
/// println!("SHA256: {}", artifact.checksum);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    resolver: Resolver,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    ///
    /// # Errors
    ///
    /// * [`Error::MissingScript`] - the entry script does not exist
    /// * [`Error::InterpreterNotFound`] - no interpreter is configured and none
    ///   is found on `PATH`
    pub fn new(settings: Settings) -> Result<Self> {
        if !settings.entry().is_file() {
            return Err(Error::MissingScript(settings.entry().to_path_buf()));
        }

        let interpreter = resolve_interpreter(settings.interpreter())?;
        log::debug!("Using interpreter {}", interpreter.display());

        Ok(Self {
            settings,
            resolver: Resolver::new(interpreter),
        })
    }

    /// Returns the settings this bundler runs with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Evaluates the scripts and returns their third-party dependencies.
    pub async fn resolve(&self) -> Result<ResolvedSet> {
        let resolved = self.resolver.resolve(self.settings.scripts()).await?;

        if resolved.is_empty() {
            log::info!("No third-party modules found");
        } else {
            let summary: Vec<String> = resolved
                .iter()
                .map(|p| format!("{} from {}", p.logical_name, p.filesystem_path.display()))
                .collect();
            log::info!("Resolved modules: {}", summary.join(", "));
        }

        Ok(resolved)
    }

    /// Runs the whole pipeline and writes the artifact.
    ///
    /// # Returns
    ///
    /// The written [`BundledArtifact`].
    pub async fn bundle(&self) -> Result<BundledArtifact> {
        let resolved = self.resolve().await?;
        self.bundle_resolved(&resolved).await
    }

    /// Packs, encodes and writes an already resolved set.
    pub async fn bundle_resolved(&self, resolved: &ResolvedSet) -> Result<BundledArtifact> {
        let entry = self.settings.entry();

        let container = archive::pack(resolved, self.settings.compression()).await?;
        log::info!("Container holds {} bytes", container.len());

        let scheme = self.settings.scheme();
        let payload = EncodedPayload::encode(&container, scheme);
        log::info!("Encoded container with {} ({} characters)", scheme, payload.text.len());

        let source = tokio::fs::read_to_string(entry)
            .await
            .fs_context("reading entry script", entry)?;

        let modules: Vec<&str> = resolved.names();
        let artifact = Stub::new(&payload)
            .modules(modules.iter().copied())
            .container_size(container.len())
            .synthesize(&source)?;

        let output = self.settings.output_path();
        fs::write_file(&output, artifact.as_bytes()).await?;
        fs::copy_permissions(entry, &output).await?;

        let size = tokio::fs::metadata(&output)
            .await
            .fs_context("reading artifact metadata", &output)?
            .len();
        let checksum = calculate_file_sha256(&output).await?;

        log::info!("✓ Wrote {} ({} bytes)", output.display(), size);

        Ok(BundledArtifact {
            path: output,
            size,
            checksum,
            scheme,
            modules: resolved.names().into_iter().map(String::from).collect(),
        })
    }
}
