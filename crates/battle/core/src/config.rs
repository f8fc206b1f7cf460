use crate::agent::AgentIndex;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Number of player agent slots. Valid indices are `0..agent_slots`.
    pub agent_slots: u8,
}

impl BattleConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_AGENT_SLOTS: u8 = 3;

    pub fn new() -> Self {
        Self {
            agent_slots: Self::DEFAULT_AGENT_SLOTS,
        }
    }

    pub fn with_agent_slots(agent_slots: u8) -> Self {
        Self { agent_slots }
    }

    /// Returns true if `agent` names one of the configured slots.
    pub fn contains(&self, agent: AgentIndex) -> bool {
        (0..i32::from(self.agent_slots)).contains(&agent.get())
    }

    /// Iterates the configured slots in ascending order.
    pub fn agents(&self) -> impl Iterator<Item = AgentIndex> + use<> {
        (0..i32::from(self.agent_slots)).map(AgentIndex)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_three_slots() {
        let config = BattleConfig::default();
        assert_eq!(config.agent_slots, 3);
        assert!(config.contains(AgentIndex(0)));
        assert!(config.contains(AgentIndex(2)));
        assert!(!config.contains(AgentIndex(3)));
        assert!(!config.contains(AgentIndex(-1)));
    }

    #[test]
    fn agents_are_ascending() {
        let config = BattleConfig::with_agent_slots(4);
        let agents: Vec<_> = config.agents().collect();
        assert_eq!(
            agents,
            vec![AgentIndex(0), AgentIndex(1), AgentIndex(2), AgentIndex(3)]
        );
    }
}
