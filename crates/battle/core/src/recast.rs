//! Per-agent cooldown ("recast") tracking.
//!
//! An agent is ready exactly when no [`RecastState`] is tracked for it.
//!
//! ```text
//! Ready --start(d > 0)--> Recasting --update drives remaining <= 0--> Ready
//!                         Recasting --cancel----------------------> Ready
//!                         Recasting --start again (replaces)------> Recasting
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use crate::agent::AgentIndex;

/// Cooldown of one agent that is currently unable to act.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecastState {
    pub agent: AgentIndex,
    /// Time left. Decreases exactly by each tick delta, never below zero.
    pub remaining: Duration,
    /// Duration at creation. Only used for progress.
    pub total: Duration,
}

impl RecastState {
    fn new(agent: AgentIndex, duration: Duration) -> Self {
        Self {
            agent,
            remaining: duration,
            total: duration,
        }
    }

    pub fn remaining_seconds(&self) -> f32 {
        self.remaining.as_secs_f32()
    }

    pub fn total_seconds(&self) -> f32 {
        self.total.as_secs_f32()
    }

    /// Fraction of the cooldown elapsed, `0.0` at start and `1.0` at completion.
    pub fn progress(&self) -> f32 {
        if self.total.is_zero() {
            return 1.0;
        }
        (self.total - self.remaining).as_secs_f32() / self.total.as_secs_f32()
    }
}

/// Tracks which agents are recasting and for how much longer.
///
/// Storage is keyed by agent index, so every multi-agent result comes out in
/// ascending agent order.
#[derive(Clone, Debug, Default)]
pub struct RecastTracker {
    states: BTreeMap<AgentIndex, RecastState>,
}

impl RecastTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the cooldown of `agent`.
    ///
    /// A zero duration leaves the agent ready. A running cooldown is replaced,
    /// never extended: the last start wins.
    pub fn start_recast(&mut self, agent: AgentIndex, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        trace!(%agent, seconds = duration.as_secs_f32(), "recast started");
        self.states.insert(agent, RecastState::new(agent, duration));
    }

    /// Advances every cooldown by `delta` and returns the agents that became
    /// ready, in ascending order.
    ///
    /// Overshoot is discarded: a completed agent is reported once and its
    /// state removed.
    pub fn update_recast(&mut self, delta: Duration) -> Vec<AgentIndex> {
        let mut completed = Vec::new();

        for state in self.states.values_mut() {
            state.remaining = state.remaining.saturating_sub(delta);
            if state.remaining.is_zero() {
                completed.push(state.agent);
            }
        }

        for agent in &completed {
            self.states.remove(agent);
            trace!(%agent, "recast completed");
        }

        completed
    }

    /// True when `agent` has no running cooldown.
    pub fn is_agent_ready(&self, agent: AgentIndex) -> bool {
        !self.states.contains_key(&agent)
    }

    pub fn recast_state(&self, agent: AgentIndex) -> Option<&RecastState> {
        self.states.get(&agent)
    }

    /// Snapshot of all running cooldowns, ascending by agent.
    pub fn recast_states(&self) -> Vec<RecastState> {
        self.states.values().copied().collect()
    }

    /// Cooldown progress of `agent`; `1.0` when the agent is ready.
    pub fn progress(&self, agent: AgentIndex) -> f32 {
        self.states.get(&agent).map_or(1.0, RecastState::progress)
    }

    /// Removes the cooldown of `agent` without touching chain effects.
    pub fn cancel_recast(&mut self, agent: AgentIndex) -> Option<RecastState> {
        self.states.remove(&agent)
    }

    pub fn cancel_all_recasts(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
