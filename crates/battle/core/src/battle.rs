//! Battle session state: one recast tracker and one chain registry.
//!
//! [`BattleState`] is what the battle loop owns. Besides running the action
//! pipeline it performs the tick-driver step ([`BattleState::tick`]): advance
//! every recast, then expire the chain effect of each agent whose own recast
//! just completed.

use std::time::Duration;

use tracing::{debug, warn};

use crate::agent::AgentIndex;
use crate::chain::{ChainEffectRegistry, PendingChainEffect};
use crate::config::BattleConfig;
use crate::error::ActionError;
use crate::pipeline::{ActionOutcome, ModuleAction, resolve_action};
use crate::recast::{RecastState, RecastTracker};

/// Result of one tick.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    /// Agents whose recast completed this tick, ascending.
    pub completed: Vec<AgentIndex>,
    /// Chain effects whose window closed with their owner's recast.
    pub expired: Vec<PendingChainEffect>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.expired.is_empty()
    }
}

/// Read-only recast row for presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecastView {
    pub agent: AgentIndex,
    pub remaining_seconds: f32,
    pub total_seconds: f32,
    pub progress: f32,
}

impl From<RecastState> for RecastView {
    fn from(state: RecastState) -> Self {
        Self {
            agent: state.agent,
            remaining_seconds: state.remaining_seconds(),
            total_seconds: state.total_seconds(),
            progress: state.progress(),
        }
    }
}

/// Point-in-time view of a battle, sorted by agent index.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub recasts: Vec<RecastView>,
    pub pending: Vec<PendingChainEffect>,
}

impl BattleSnapshot {
    /// Recast row of `agent`, if it is recasting.
    pub fn recast(&self, agent: AgentIndex) -> Option<&RecastView> {
        self.recasts.iter().find(|view| view.agent == agent)
    }

    pub fn is_agent_ready(&self, agent: AgentIndex) -> bool {
        self.recast(agent).is_none()
    }

    pub fn pending_for(&self, agent: AgentIndex) -> Option<&PendingChainEffect> {
        self.pending.iter().find(|pending| pending.agent == agent)
    }
}

/// Owned state of one battle.
#[derive(Clone, Debug, Default)]
pub struct BattleState {
    config: BattleConfig,
    recasts: RecastTracker,
    chains: ChainEffectRegistry,
}

impl BattleState {
    pub fn new(config: BattleConfig) -> Self {
        Self {
            config,
            recasts: RecastTracker::new(),
            chains: ChainEffectRegistry::new(),
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn recasts(&self) -> &RecastTracker {
        &self.recasts
    }

    pub fn chains(&self) -> &ChainEffectRegistry {
        &self.chains
    }

    /// Runs the action pipeline without validation.
    pub fn resolve_action(&mut self, action: &ModuleAction) -> ActionOutcome {
        resolve_action(&mut self.recasts, &mut self.chains, action)
    }

    /// Checks that the agent is a configured slot and ready, then runs the
    /// pipeline.
    pub fn try_resolve_action(
        &mut self,
        action: &ModuleAction,
    ) -> Result<ActionOutcome, ActionError> {
        self.validate(action.agent).inspect_err(|error| {
            warn!(agent = %action.agent, module = %action.module, %error, "action rejected");
        })?;
        Ok(self.resolve_action(action))
    }

    fn validate(&self, agent: AgentIndex) -> Result<(), ActionError> {
        if !self.config.contains(agent) {
            return Err(ActionError::AgentOutOfRange {
                agent,
                slots: self.config.agent_slots,
            });
        }
        if let Some(state) = self.recasts.recast_state(agent) {
            return Err(ActionError::AgentRecasting {
                agent,
                remaining_seconds: state.remaining_seconds(),
            });
        }
        Ok(())
    }

    /// Advances time by `delta`.
    ///
    /// Every agent whose recast completes loses its pending chain effect.
    pub fn tick(&mut self, delta: Duration) -> TickReport {
        let completed = self.recasts.update_recast(delta);
        let expired: Vec<_> = completed
            .iter()
            .filter_map(|&agent| self.chains.expire_effects_for_agent(agent))
            .collect();

        if !completed.is_empty() {
            debug!(?completed, expired = expired.len(), "tick completed recasts");
        }

        TickReport { completed, expired }
    }

    /// Cancels the recast of `agent`. Its pending chain effect stays pending.
    pub fn cancel_recast(&mut self, agent: AgentIndex) -> Option<RecastState> {
        self.recasts.cancel_recast(agent)
    }

    /// Cancels every recast. Pending chain effects stay pending.
    pub fn cancel_all_recasts(&mut self) {
        self.recasts.cancel_all_recasts();
    }

    /// Returns the battle to its initial state.
    pub fn reset(&mut self) {
        self.recasts.cancel_all_recasts();
        self.chains.clear_all();
        debug!("battle state reset");
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            recasts: self
                .recasts
                .recast_states()
                .into_iter()
                .map(RecastView::from)
                .collect(),
            pending: self.chains.pending_effects(),
        }
    }
}
