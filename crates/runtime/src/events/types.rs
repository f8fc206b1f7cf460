//! Event types for different topics.

use battle_core::{AgentIndex, ModuleId, PendingChainEffect, TriggeredChainEffect};
use serde::{Deserialize, Serialize};

/// Events related to agent cooldowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecastEvent {
    /// An agent used a module and started recasting
    Started {
        agent: AgentIndex,
        module: ModuleId,
        total_seconds: f32,
    },

    /// An agent's recast ran out; it may act again
    Completed { agent: AgentIndex },

    /// An agent's recast was cancelled before completion
    Cancelled { agent: AgentIndex },
}

/// Events related to pending chain effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChainEvent {
    /// A module left a chain effect pending for its agent
    Registered(PendingChainEffect),

    /// Another agent's action fired a pending effect
    Triggered {
        by: AgentIndex,
        triggered: TriggeredChainEffect,
    },

    /// The owner's recast completed before anyone triggered the effect
    Expired(PendingChainEffect),

    /// All pending effects were dropped by a reset
    Cleared,
}
