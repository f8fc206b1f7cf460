//! Resolution of one "agent uses a module" event.
//!
//! The order of steps is part of the contract:
//!
//! 1. trigger pending effects of *other* agents against the action's flags,
//! 2. start the acting agent's recast,
//! 3. register the chain effect the module grants, if any.
//!
//! Triggering before the recast starts keeps an agent from reaching bonuses
//! tied to a cooldown window that is closing in the same step. Registering
//! last means the acting agent's new effect cannot fire on its own action.

use std::time::Duration;

use crate::agent::{AgentIndex, ModuleId};
use crate::chain::{ChainEffectRegistry, TriggeredChainEffect};
use crate::effect::{ChainEffect, EffectCategory};
use crate::flags::ActionCategoryFlags;
use crate::recast::RecastTracker;

/// Input of the pipeline, produced by the action/formula layer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleAction {
    pub agent: AgentIndex,
    pub module: ModuleId,
    /// Facets of the outcome the module produced.
    pub flags: ActionCategoryFlags,
    /// Cooldown started for the acting agent. Zero means no cooldown.
    pub recast: Duration,
    pub chain_effect: Option<ChainEffect>,
}

impl ModuleAction {
    pub fn new(agent: AgentIndex, module: ModuleId, flags: ActionCategoryFlags) -> Self {
        Self {
            agent,
            module,
            flags,
            recast: Duration::ZERO,
            chain_effect: None,
        }
    }

    pub fn with_recast(mut self, recast: Duration) -> Self {
        self.recast = recast;
        self
    }

    pub fn with_chain_effect(mut self, effect: ChainEffect) -> Self {
        self.chain_effect = Some(effect);
        self
    }
}

/// What the pipeline did for one action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionOutcome {
    pub agent: AgentIndex,
    pub module: ModuleId,
    /// Bonuses from other agents, ascending by owner agent.
    pub triggered: Vec<TriggeredChainEffect>,
    pub recast_started: bool,
    /// Chain effect left pending by this action.
    pub registered: Option<ChainEffect>,
}

impl ActionOutcome {
    /// Sum of triggered values of one category, for the formula layer to fold
    /// into the module's base effect.
    pub fn bonus_for(&self, category: EffectCategory) -> f32 {
        self.triggered
            .iter()
            .filter(|triggered| triggered.effect.category() == category)
            .map(|triggered| triggered.effect_value)
            .sum()
    }

    pub fn has_triggered(&self) -> bool {
        !self.triggered.is_empty()
    }
}

/// Runs the pipeline against the given tracker and registry.
///
/// Never fails: callers that need readiness or slot checks validate first.
pub fn resolve_action(
    recasts: &mut RecastTracker,
    chains: &mut ChainEffectRegistry,
    action: &ModuleAction,
) -> ActionOutcome {
    let triggered = chains.check_and_trigger(action.agent, action.flags);

    recasts.start_recast(action.agent, action.recast);
    let recast_started = !action.recast.is_zero();

    chains.register(action.agent, action.chain_effect, action.module);

    ActionOutcome {
        agent: action.agent,
        module: action.module,
        triggered,
        recast_started,
        registered: action.chain_effect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::ChainEffectKind;

    type Flags = ActionCategoryFlags;

    fn attack(agent: i32) -> ModuleAction {
        ModuleAction::new(AgentIndex(agent), ModuleId(1), Flags::DAMAGE)
            .with_recast(Duration::from_secs(3))
    }

    #[test]
    fn starts_recast_and_registers_effect() {
        let mut recasts = RecastTracker::new();
        let mut chains = ChainEffectRegistry::new();
        let action =
            attack(0).with_chain_effect(ChainEffect::new(ChainEffectKind::DamageBonus, 25.0));

        let outcome = resolve_action(&mut recasts, &mut chains, &action);

        assert!(outcome.recast_started);
        assert!(!outcome.has_triggered());
        assert!(!recasts.is_agent_ready(AgentIndex(0)));
        assert_eq!(
            chains.pending_effect_for_agent(AgentIndex(0)).map(|p| p.source_module),
            Some(ModuleId(1))
        );
    }

    #[test]
    fn own_new_effect_does_not_fire_on_same_action() {
        let mut recasts = RecastTracker::new();
        let mut chains = ChainEffectRegistry::new();
        let action = attack(0).with_chain_effect(ChainEffect::new(ChainEffectKind::Shield, 5.0));

        let outcome = resolve_action(&mut recasts, &mut chains, &action);

        assert!(outcome.triggered.is_empty());
        assert!(chains.has_pending_effect(AgentIndex(0)));
    }

    #[test]
    fn other_agent_collects_bonus() {
        let mut recasts = RecastTracker::new();
        let mut chains = ChainEffectRegistry::new();
        let setup =
            attack(0).with_chain_effect(ChainEffect::new(ChainEffectKind::DamageBonus, 25.0));
        resolve_action(&mut recasts, &mut chains, &setup);

        let outcome = resolve_action(&mut recasts, &mut chains, &attack(1));

        assert_eq!(outcome.triggered.len(), 1);
        assert_eq!(outcome.bonus_for(EffectCategory::Attack), 25.0);
        assert_eq!(outcome.bonus_for(EffectCategory::Heal), 0.0);
        assert!(chains.is_empty());
    }

    #[test]
    fn zero_recast_leaves_agent_ready() {
        let mut recasts = RecastTracker::new();
        let mut chains = ChainEffectRegistry::new();
        let action = ModuleAction::new(AgentIndex(0), ModuleId(2), Flags::BUFF);

        let outcome = resolve_action(&mut recasts, &mut chains, &action);

        assert!(!outcome.recast_started);
        assert!(recasts.is_agent_ready(AgentIndex(0)));
    }

    #[test]
    fn replacing_own_effect_keeps_latest() {
        let mut recasts = RecastTracker::new();
        let mut chains = ChainEffectRegistry::new();
        let first = attack(0).with_chain_effect(ChainEffect::new(ChainEffectKind::HealBonus, 1.0));
        let second =
            attack(0).with_chain_effect(ChainEffect::new(ChainEffectKind::DamageBonus, 2.0));

        resolve_action(&mut recasts, &mut chains, &first);
        resolve_action(&mut recasts, &mut chains, &second);

        let pending = chains.pending_effect_for_agent(AgentIndex(0)).unwrap();
        assert_eq!(pending.effect.kind, ChainEffectKind::DamageBonus);
    }
}
