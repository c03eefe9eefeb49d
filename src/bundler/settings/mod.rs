//! Configuration for a bundling run.

mod builder;
mod core;

pub use builder::SettingsBuilder;
pub use core::{OUTPUT_SUFFIX, Settings, default_output_path};
