//! Generation of the self-mounting script.
//!
//! The output is the rendered prologue, the original source verbatim, and the
//! epilogue. At run time the prologue decodes the container into a private
//! temporary directory and puts it first on `sys.path`; the epilogue (and an
//! `atexit` hook, for scripts that leave through `sys.exit`) removes it again.
//! Mount errors propagate; cleanup errors are reported on stderr only.

mod template;

pub use template::{EPILOGUE_TEMPLATE, PROLOGUE_TEMPLATE};

use crate::bundler::{Result, codec::EncodedPayload, codec::base91};
use handlebars::Handlebars;
use serde_json::json;

/// Prologue metadata and rendering for one payload.
#[derive(Debug)]
pub struct Stub<'a> {
    payload: &'a EncodedPayload,
    modules: Vec<String>,
    container_size: usize,
}

impl<'a> Stub<'a> {
    pub fn new(payload: &'a EncodedPayload) -> Self {
        Self {
            payload,
            modules: Vec::new(),
            container_size: 0,
        }
    }

    /// Module names listed in the generated header.
    pub fn modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Raw container size listed in the generated header.
    pub fn container_size(mut self, size: usize) -> Self {
        self.container_size = size;
        self
    }

    /// Render the prologue.
    pub fn prologue(&self) -> Result<String> {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);

        let modules = if self.modules.is_empty() {
            "(none)".to_string()
        } else {
            self.modules.join(", ")
        };

        let data = json!({
            "version": env!("CARGO_PKG_VERSION"),
            "modules": modules,
            "container_size": self.container_size,
            "sha256": self.payload.sha256,
            "scheme": self.payload.scheme.to_string(),
            "payload": self.payload.text,
            "dense": if self.payload.scheme.is_dense() { "True" } else { "False" },
            "alphabet": String::from_utf8_lossy(base91::ALPHABET),
        });

        Ok(handlebars.render_template(PROLOGUE_TEMPLATE, &data)?)
    }

    /// Wrap `original_source` between the prologue and the epilogue.
    pub fn synthesize(&self, original_source: &str) -> Result<String> {
        let prologue = self.prologue()?;
        let mut artifact =
            String::with_capacity(prologue.len() + original_source.len() + EPILOGUE_TEMPLATE.len());
        artifact.push_str(&prologue);
        artifact.push_str(original_source);
        artifact.push_str(EPILOGUE_TEMPLATE);
        Ok(artifact)
    }
}

/// Wrap `original_source` around `payload` with a default header.
pub fn synthesize(payload: &EncodedPayload, original_source: &str) -> Result<String> {
    Stub::new(payload).synthesize(original_source)
}
