use bitflags::bitflags;

bitflags! {
    /// Facets of the outcome an action produced.
    ///
    /// Facets are not exclusive: a drain attack is both `DAMAGE` and `HEAL`.
    /// Supplied by the formula layer after it resolves the action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ActionCategoryFlags: u8 {
        const DAMAGE = 1 << 0;
        const HEAL   = 1 << 1;
        const BUFF   = 1 << 2;
        const DEBUFF = 1 << 3;
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ActionCategoryFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ActionCategoryFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bitflags::serde::deserialize(deserializer)
    }
}

impl ActionCategoryFlags {
    pub const fn has_damage(self) -> bool {
        self.contains(Self::DAMAGE)
    }

    pub const fn has_heal(self) -> bool {
        self.contains(Self::HEAL)
    }

    pub const fn has_buff(self) -> bool {
        self.contains(Self::BUFF)
    }

    pub const fn has_debuff(self) -> bool {
        self.contains(Self::DEBUFF)
    }

    /// True when the action produced at least one facet.
    pub const fn has_any(self) -> bool {
        !self.is_empty()
    }
}
