//! Runtime orchestration for a battle session.
//!
//! This crate wraps [`battle_core::BattleState`] in a single-owner worker task
//! so any number of async clients can drive one battle through cloneable
//! [`RuntimeHandle`]s, without sharing the state behind a lock.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus for recast and chain events
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{IdleProvider, ModuleProvider, Result, RotationProvider, RuntimeError, RuntimeHandle};
pub use events::{ChainEvent, Event, EventBus, RecastEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, StepReport};
