//! Public runtime API surface.
//!
//! Clients drive a battle through [`RuntimeHandle`], plug intent in through
//! [`ModuleProvider`], and receive [`RuntimeError`] on failure.
mod errors;
mod handle;
mod providers;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{IdleProvider, ModuleProvider, RotationProvider};
