//! Data-driven battle content and loaders.
//!
//! This crate houses the static description of action modules and the
//! battle configuration:
//! - Module catalog (data-driven via RON): recast, category flags and the
//!   optional chain effect of every module
//! - Battle configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime and never appears in battle state.

pub mod module;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use module::{ModuleCatalog, ModuleDefinition};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ModuleLoader};
