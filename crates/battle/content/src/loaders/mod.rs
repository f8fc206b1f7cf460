//! Content loaders for reading battle data from files.
//!
//! Every loader has a path-based `load` and a string-based `parse`, plus a
//! `bundled` variant over the data shipped in `data/`.

pub mod config;
pub mod modules;

pub use config::ConfigLoader;
pub use modules::ModuleLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file {}", path.display()))
}
