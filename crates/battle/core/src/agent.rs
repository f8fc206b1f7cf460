//! Identifiers shared by every battle component.
use core::fmt;

/// Player agent slot index.
///
/// Stable for the lifetime of a battle. The core does not bound-check
/// indices: negative or out-of-range values are tracked like any other key,
/// and validation is left to [`crate::BattleState::try_resolve_action`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentIndex(pub i32);

impl AgentIndex {
    pub const fn new(index: i32) -> Self {
        Self(index)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for AgentIndex {
    fn from(index: i32) -> Self {
        Self(index)
    }
}

impl fmt::Display for AgentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Identifier of an action module.
///
/// Recorded on pending chain effects for diagnostics only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ModuleId(pub u16);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "module#{}", self.0)
    }
}
