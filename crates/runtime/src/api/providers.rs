//! Asynchronous abstraction for sourcing agent intent.
//!
//! Runtime users plug in [`ModuleProvider`] implementations so a battle can
//! run with typed player input, scripted rotations, or AI policies.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use battle_core::{AgentIndex, BattleSnapshot, ModuleId};

use super::errors::Result;

/// Trait for choosing the module a ready agent uses next.
#[async_trait]
pub trait ModuleProvider: Send + Sync {
    /// Choose a module for `agent`, or `None` to stay idle this step.
    ///
    /// Only called while `agent` is ready.
    async fn choose_module(
        &self,
        agent: AgentIndex,
        snapshot: &BattleSnapshot,
    ) -> Result<Option<ModuleId>>;
}

/// A provider that never acts.
/// Useful for testing or as a placeholder for an absent agent.
pub struct IdleProvider;

#[async_trait]
impl ModuleProvider for IdleProvider {
    async fn choose_module(
        &self,
        _agent: AgentIndex,
        _snapshot: &BattleSnapshot,
    ) -> Result<Option<ModuleId>> {
        Ok(None)
    }
}

/// Cycles through a fixed list of modules, one per call.
pub struct RotationProvider {
    modules: Vec<ModuleId>,
    next: AtomicUsize,
}

impl RotationProvider {
    pub fn new(modules: impl IntoIterator<Item = ModuleId>) -> Self {
        Self {
            modules: modules.into_iter().collect(),
            next: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ModuleProvider for RotationProvider {
    async fn choose_module(
        &self,
        _agent: AgentIndex,
        _snapshot: &BattleSnapshot,
    ) -> Result<Option<ModuleId>> {
        if self.modules.is_empty() {
            return Ok(None);
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.modules.len();
        Ok(Some(self.modules[index]))
    }
}
