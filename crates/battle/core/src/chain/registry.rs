use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::trigger::matches;
use super::{PendingChainEffect, TriggeredChainEffect};
use crate::agent::{AgentIndex, ModuleId};
use crate::effect::ChainEffect;
use crate::flags::ActionCategoryFlags;

/// Pending chain effects, at most one per agent.
///
/// Keyed by owner agent index, so snapshots and trigger results are produced
/// in ascending owner order.
#[derive(Clone, Debug, Default)]
pub struct ChainEffectRegistry {
    pending: BTreeMap<AgentIndex, PendingChainEffect>,
}

impl ChainEffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `effect` as the pending effect of `agent`, replacing any
    /// previous one. Does nothing when `effect` is `None`.
    pub fn register(
        &mut self,
        agent: AgentIndex,
        effect: Option<ChainEffect>,
        source_module: ModuleId,
    ) {
        let Some(effect) = effect else {
            return;
        };

        let pending = PendingChainEffect {
            agent,
            effect,
            source_module,
        };
        if let Some(previous) = self.pending.insert(agent, pending) {
            trace!(%agent, replaced = ?previous.effect.kind, "chain effect replaced");
        }
        debug!(%agent, kind = ?effect.kind, value = effect.value, %source_module, "chain effect registered");
    }

    /// Fires every pending effect owned by another agent whose category
    /// matches `flags`.
    ///
    /// Fired effects are consumed. The acting agent's own effect is never
    /// considered. Results are ascending by owner agent.
    pub fn check_and_trigger(
        &mut self,
        acting_agent: AgentIndex,
        flags: ActionCategoryFlags,
    ) -> Vec<TriggeredChainEffect> {
        let fired: Vec<AgentIndex> = self
            .pending
            .values()
            .filter(|pending| pending.agent != acting_agent)
            .filter(|pending| matches(pending.effect.kind, flags))
            .map(|pending| pending.agent)
            .collect();

        fired
            .into_iter()
            .filter_map(|owner| self.pending.remove(&owner))
            .map(|pending| {
                debug!(
                    owner = %pending.agent,
                    by = %acting_agent,
                    kind = ?pending.effect.kind,
                    "chain effect triggered"
                );
                TriggeredChainEffect::from_pending(pending)
            })
            .collect()
    }

    /// Removes the pending effect of `agent` without firing it.
    ///
    /// Called when the owner's own recast completes: the window has closed.
    pub fn expire_effects_for_agent(&mut self, agent: AgentIndex) -> Option<PendingChainEffect> {
        let expired = self.pending.remove(&agent);
        if let Some(pending) = &expired {
            debug!(%agent, kind = ?pending.effect.kind, "chain effect expired");
        }
        expired
    }

    /// Snapshot of pending effects, ascending by owner agent.
    pub fn pending_effects(&self) -> Vec<PendingChainEffect> {
        self.pending.values().copied().collect()
    }

    pub fn has_pending_effect(&self, agent: AgentIndex) -> bool {
        self.pending.contains_key(&agent)
    }

    pub fn pending_effect_for_agent(&self, agent: AgentIndex) -> Option<&PendingChainEffect> {
        self.pending.get(&agent)
    }

    /// Drops every pending effect. Used at battle end or reset.
    pub fn clear_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::ChainEffectKind;

    type Flags = ActionCategoryFlags;

    const MODULE: ModuleId = ModuleId(10);

    fn effect(kind: ChainEffectKind, value: f32) -> Option<ChainEffect> {
        Some(ChainEffect::new(kind, value))
    }

    #[test]
    fn absent_effect_is_not_registered() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), None, MODULE);

        assert!(!registry.has_pending_effect(AgentIndex(0)));
        assert!(registry.is_empty());
    }

    #[test]
    fn attack_effect_fires_on_other_agents_damage() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::DamageBonus, 25.0), MODULE);

        let triggered = registry.check_and_trigger(AgentIndex(1), Flags::DAMAGE);

        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].effect_value, 25.0);
        assert_eq!(triggered[0].source_agent, AgentIndex(0));
        assert_eq!(triggered[0].message, "Damage bonus +25");
        assert!(registry.pending_effects().is_empty());
    }

    #[test]
    fn fires_at_most_once() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::DamageBonus, 25.0), MODULE);

        assert_eq!(registry.check_and_trigger(AgentIndex(1), Flags::DAMAGE).len(), 1);
        assert!(registry.check_and_trigger(AgentIndex(1), Flags::DAMAGE).is_empty());
        assert!(registry.check_and_trigger(AgentIndex(2), Flags::DAMAGE).is_empty());
    }

    #[test]
    fn own_action_never_triggers() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::Shield, 10.0), MODULE);

        assert!(registry.check_and_trigger(AgentIndex(0), Flags::all()).is_empty());
        assert!(registry.has_pending_effect(AgentIndex(0)));
    }

    #[test]
    fn non_matching_category_stays_pending() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::HealBonus, 15.0), MODULE);

        assert!(registry.check_and_trigger(AgentIndex(1), Flags::DAMAGE).is_empty());
        assert!(registry.has_pending_effect(AgentIndex(0)));
    }

    #[test]
    fn register_replaces_existing_effect() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::DamageBonus, 25.0), ModuleId(1));
        registry.register(AgentIndex(0), effect(ChainEffectKind::HealBonus, 5.0), ModuleId(2));

        assert_eq!(registry.len(), 1);
        let pending = registry.pending_effect_for_agent(AgentIndex(0)).unwrap();
        assert_eq!(pending.effect.kind, ChainEffectKind::HealBonus);
        assert_eq!(pending.source_module, ModuleId(2));
    }

    #[test]
    fn expire_removes_without_firing() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(0), effect(ChainEffectKind::DamageBonus, 25.0), MODULE);

        let expired = registry.expire_effects_for_agent(AgentIndex(0));
        assert_eq!(expired.map(|p| p.agent), Some(AgentIndex(0)));
        assert!(registry.expire_effects_for_agent(AgentIndex(0)).is_none());
        assert!(registry.check_and_trigger(AgentIndex(1), Flags::all()).is_empty());
    }

    #[test]
    fn multiple_matches_are_ascending_by_owner() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(2), effect(ChainEffectKind::Shield, 3.0), MODULE);
        registry.register(AgentIndex(0), effect(ChainEffectKind::DamageBonus, 1.0), MODULE);
        registry.register(AgentIndex(1), effect(ChainEffectKind::HealBonus, 2.0), MODULE);

        let triggered = registry.check_and_trigger(AgentIndex(1), Flags::DAMAGE | Flags::HEAL);

        let owners: Vec<_> = triggered.iter().map(|t| t.source_agent).collect();
        assert_eq!(owners, vec![AgentIndex(0), AgentIndex(2)]);
        // Agent 1's own heal bonus is untouched.
        assert!(registry.has_pending_effect(AgentIndex(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn snapshot_and_clear() {
        let mut registry = ChainEffectRegistry::new();
        registry.register(AgentIndex(1), effect(ChainEffectKind::Lifesteal, 1.0), MODULE);
        registry.register(AgentIndex(0), effect(ChainEffectKind::DoubleCast, 1.0), MODULE);

        let owners: Vec<_> = registry.pending_effects().iter().map(|p| p.agent).collect();
        assert_eq!(owners, vec![AgentIndex(0), AgentIndex(1)]);

        registry.clear_all();
        assert!(registry.is_empty());
    }
}
