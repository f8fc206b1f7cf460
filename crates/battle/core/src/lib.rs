//! Deterministic recast and chain-effect coordination for the typing battle.
//!
//! `battle-core` holds the only temporal state of a battle: per-agent
//! cooldowns ([`recast::RecastTracker`]) and the pending bonus effects agents
//! leave for each other ([`chain::ChainEffectRegistry`]). The
//! [`pipeline`] module links both to a single "agent uses a module" event, and
//! [`battle::BattleState`] owns one instance of each for a battle session.
//!
//! Everything here is synchronous and I/O free. Every multi-value result is
//! ordered by ascending agent index so replays and tests are reproducible.
pub mod agent;
pub mod battle;
pub mod chain;
pub mod config;
pub mod effect;
pub mod error;
pub mod flags;
pub mod pipeline;
pub mod recast;

pub use agent::{AgentIndex, ModuleId};
pub use battle::{BattleSnapshot, BattleState, RecastView, TickReport};
pub use chain::{ChainEffectRegistry, PendingChainEffect, TriggeredChainEffect};
pub use config::BattleConfig;
pub use effect::{ChainEffect, ChainEffectKind, EffectCategory};
pub use error::ActionError;
pub use flags::ActionCategoryFlags;
pub use pipeline::{ActionOutcome, ModuleAction, resolve_action};
pub use recast::{RecastState, RecastTracker};
