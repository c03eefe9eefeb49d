//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns one or
//! more scripts into a single self-mounting script.
//!
//! # Overview
//!
//! The bundler:
//! 1. Reads configuration from [`Settings`](crate::bundler::Settings)
//! 2. Evaluates the scripts once and resolves third-party modules
//! 3. Packs them into a ZIP container
//! 4. Encodes the container as text
//! 5. Wraps the entry script and returns a
//!    [`BundledArtifact`](crate::bundler::BundledArtifact)
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for containers and artifacts
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`tool_detection`] - Interpreter availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::Bundler;
