//! Errors raised by the caller-side validation layer.
//!
//! The recast tracker and chain registry are total: they accept any input.
//! Only [`crate::BattleState::try_resolve_action`] rejects actions, and only
//! for reasons the battle session itself can judge.

use crate::agent::AgentIndex;

/// Reasons an agent's action is refused before it enters the pipeline.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Agent index is not one of the configured slots.
    #[error("{agent} is outside the {slots} configured agent slots")]
    AgentOutOfRange { agent: AgentIndex, slots: u8 },

    /// Agent is still on cooldown.
    #[error("{agent} is recasting ({remaining_seconds:.2}s remaining)")]
    AgentRecasting {
        agent: AgentIndex,
        remaining_seconds: f32,
    },
}

impl ActionError {
    /// Agent the rejected action belonged to.
    pub const fn agent(&self) -> AgentIndex {
        match self {
            Self::AgentOutOfRange { agent, .. } | Self::AgentRecasting { agent, .. } => *agent,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::AgentOutOfRange { .. } => "AGENT_OUT_OF_RANGE",
            Self::AgentRecasting { .. } => "AGENT_RECASTING",
        }
    }
}
