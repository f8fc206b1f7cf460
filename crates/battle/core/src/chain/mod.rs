//! Chain effects: bonuses one agent leaves for another agent's next action.
//!
//! Each agent holds at most one pending effect. It fires once, when a
//! *different* agent performs an action whose category flags match
//! ([`trigger::matches`]), or it expires when the owner's own recast
//! completes.

mod registry;
pub mod trigger;

pub use registry::ChainEffectRegistry;

use crate::agent::{AgentIndex, ModuleId};
use crate::effect::ChainEffect;

/// Effect waiting for another agent's matching action.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingChainEffect {
    /// Agent that registered the effect.
    pub agent: AgentIndex,
    pub effect: ChainEffect,
    /// Module that created the effect. Diagnostic only.
    pub source_module: ModuleId,
}

/// A pending effect that just fired. Returned to the caller, never stored.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredChainEffect {
    pub effect: ChainEffect,
    pub effect_value: f32,
    pub message: String,
    /// Agent that owned the pending effect.
    pub source_agent: AgentIndex,
}

impl TriggeredChainEffect {
    fn from_pending(pending: PendingChainEffect) -> Self {
        Self {
            effect: pending.effect,
            effect_value: pending.effect.value,
            message: pending.effect.message(),
            source_agent: pending.agent,
        }
    }
}
