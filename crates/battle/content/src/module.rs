//! Module definitions: what an action costs and what it leaves behind.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::bail;
use battle_core::{ActionCategoryFlags, AgentIndex, ChainEffect, ModuleAction, ModuleId};

/// Static description of one action module.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleDefinition {
    pub id: ModuleId,
    pub name: String,
    /// Cooldown in seconds. Negative or non-finite values mean no cooldown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub recast_seconds: f32,
    /// Facets the module produces when used.
    pub flags: ActionCategoryFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub chain_effect: Option<ChainEffect>,
}

impl ModuleDefinition {
    /// Cooldown as a duration, normalized to zero when not positive.
    pub fn recast(&self) -> Duration {
        Duration::try_from_secs_f32(self.recast_seconds).unwrap_or(Duration::ZERO)
    }

    /// Builds the pipeline input for `agent` using this module.
    pub fn to_action(&self, agent: AgentIndex) -> ModuleAction {
        ModuleAction {
            agent,
            module: self.id,
            flags: self.flags,
            recast: self.recast(),
            chain_effect: self.chain_effect,
        }
    }
}

/// All known modules, keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleCatalog {
    modules: BTreeMap<ModuleId, ModuleDefinition>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog, rejecting duplicate ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ModuleDefinition>,
    ) -> anyhow::Result<Self> {
        let mut modules = BTreeMap::new();
        for definition in definitions {
            let id = definition.id;
            if let Some(existing) = modules.insert(id, definition) {
                bail!("duplicate {} (first defined as {:?})", id, existing.name);
            }
        }
        Ok(Self { modules })
    }

    pub fn get(&self, id: ModuleId) -> Option<&ModuleDefinition> {
        self.modules.get(&id)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.modules.contains_key(&id)
    }

    /// Definitions in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.modules.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::ChainEffectKind;

    fn definition(id: u16, recast_seconds: f32) -> ModuleDefinition {
        ModuleDefinition {
            id: ModuleId(id),
            name: format!("module {id}"),
            recast_seconds,
            flags: ActionCategoryFlags::DAMAGE,
            chain_effect: Some(ChainEffect::new(ChainEffectKind::DamageBonus, 10.0)),
        }
    }

    #[test]
    fn recast_normalizes_degenerate_seconds() {
        assert_eq!(definition(1, 2.5).recast(), Duration::from_millis(2500));
        assert_eq!(definition(1, 0.0).recast(), Duration::ZERO);
        assert_eq!(definition(1, -3.0).recast(), Duration::ZERO);
        assert_eq!(definition(1, f32::NAN).recast(), Duration::ZERO);
    }

    #[test]
    fn to_action_carries_definition() {
        let action = definition(4, 3.0).to_action(AgentIndex(2));

        assert_eq!(action.agent, AgentIndex(2));
        assert_eq!(action.module, ModuleId(4));
        assert_eq!(action.recast, Duration::from_secs(3));
        assert!(action.chain_effect.is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = ModuleCatalog::from_definitions([definition(1, 1.0), definition(1, 2.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn iterates_in_id_order() {
        let catalog =
            ModuleCatalog::from_definitions([definition(3, 1.0), definition(1, 1.0)]).unwrap();

        let ids: Vec<_> = catalog.ids().collect();
        assert_eq!(ids, vec![ModuleId(1), ModuleId(3)]);
        assert!(catalog.get(ModuleId(2)).is_none());
    }
}
