//! Chain-effect descriptors and their categories.
//!
//! A chain effect is opaque to the engine apart from its [`ChainEffectKind`]:
//! the kind's [`EffectCategory`] decides which actions can trigger it, and the
//! numeric `value` is handed back untouched to the formula layer.

use strum::{EnumIter, IntoStaticStr};

/// Broad grouping of chain-effect kinds used by the trigger rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectCategory {
    Attack,
    Defense,
    Heal,
    Typing,
    Recast,
    EffectExtend,
    Special,
}

impl EffectCategory {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Fixed enumeration of chain-effect kinds.
///
/// Every kind belongs to exactly one [`EffectCategory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ChainEffectKind {
    // ========================================================================
    // Attack
    // ========================================================================
    /// Flat damage added to the triggering action.
    DamageBonus,
    /// Percentage damage multiplier.
    DamageMultiplier,
    /// Extra critical chance.
    CriticalBonus,

    // ========================================================================
    // Defense
    // ========================================================================
    DamageReduction,
    Shield,

    // ========================================================================
    // Heal
    // ========================================================================
    HealBonus,
    Regeneration,

    // ========================================================================
    // Typing
    // ========================================================================
    /// Extra seconds on the typing timer.
    TimeExtension,
    AccuracyBonus,

    // ========================================================================
    // Recast
    // ========================================================================
    RecastReduction,

    // ========================================================================
    // Effect extension
    // ========================================================================
    BuffExtend,
    BuffDuration,
    DebuffExtend,
    DebuffDuration,
    /// Generic status extension. Has no matching action facet and never fires.
    StatusExtend,

    // ========================================================================
    // Special
    // ========================================================================
    Lifesteal,
    DoubleCast,
}

impl ChainEffectKind {
    pub const fn category(self) -> EffectCategory {
        match self {
            Self::DamageBonus | Self::DamageMultiplier | Self::CriticalBonus => {
                EffectCategory::Attack
            }
            Self::DamageReduction | Self::Shield => EffectCategory::Defense,
            Self::HealBonus | Self::Regeneration => EffectCategory::Heal,
            Self::TimeExtension | Self::AccuracyBonus => EffectCategory::Typing,
            Self::RecastReduction => EffectCategory::Recast,
            Self::BuffExtend
            | Self::BuffDuration
            | Self::DebuffExtend
            | Self::DebuffDuration
            | Self::StatusExtend => EffectCategory::EffectExtend,
            Self::Lifesteal | Self::DoubleCast => EffectCategory::Special,
        }
    }

    /// Extends or lengthens buffs.
    pub const fn is_buff_extension(self) -> bool {
        matches!(self, Self::BuffExtend | Self::BuffDuration)
    }

    /// Extends or lengthens debuffs.
    pub const fn is_debuff_extension(self) -> bool {
        matches!(self, Self::DebuffExtend | Self::DebuffDuration)
    }

    /// Human-readable label used in trigger messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::DamageBonus => "Damage bonus",
            Self::DamageMultiplier => "Damage multiplier",
            Self::CriticalBonus => "Critical bonus",
            Self::DamageReduction => "Damage reduction",
            Self::Shield => "Shield",
            Self::HealBonus => "Heal bonus",
            Self::Regeneration => "Regeneration",
            Self::TimeExtension => "Time extension",
            Self::AccuracyBonus => "Accuracy bonus",
            Self::RecastReduction => "Recast reduction",
            Self::BuffExtend => "Buff extend",
            Self::BuffDuration => "Buff duration",
            Self::DebuffExtend => "Debuff extend",
            Self::DebuffDuration => "Debuff duration",
            Self::StatusExtend => "Status extend",
            Self::Lifesteal => "Lifesteal",
            Self::DoubleCast => "Double cast",
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Deferred bonus carried by a module and handed to other agents' actions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainEffect {
    pub kind: ChainEffectKind,
    pub value: f32,
}

impl ChainEffect {
    pub const fn new(kind: ChainEffectKind, value: f32) -> Self {
        Self { kind, value }
    }

    pub const fn category(&self) -> EffectCategory {
        self.kind.category()
    }

    /// Message shown when the effect fires, e.g. `"Damage bonus +25"`.
    pub fn message(&self) -> String {
        format!("{} +{}", self.kind.label(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_category_has_a_kind() {
        for category in EffectCategory::iter() {
            assert!(
                ChainEffectKind::iter().any(|kind| kind.category() == category),
                "no kind for {}",
                category.as_str()
            );
        }
    }

    #[test]
    fn extension_subtypes_are_disjoint() {
        for kind in ChainEffectKind::iter() {
            assert!(!(kind.is_buff_extension() && kind.is_debuff_extension()));
            if kind.is_buff_extension() || kind.is_debuff_extension() {
                assert_eq!(kind.category(), EffectCategory::EffectExtend);
            }
        }
        assert!(!ChainEffectKind::StatusExtend.is_buff_extension());
        assert!(!ChainEffectKind::StatusExtend.is_debuff_extension());
    }

    #[test]
    fn message_includes_label_and_value() {
        let effect = ChainEffect::new(ChainEffectKind::DamageBonus, 25.0);
        assert_eq!(effect.message(), "Damage bonus +25");

        let effect = ChainEffect::new(ChainEffectKind::RecastReduction, 0.5);
        assert_eq!(effect.message(), "Recast reduction +0.5");
    }

    #[test]
    fn snake_case_names() {
        assert_eq!(ChainEffectKind::DebuffDuration.as_str(), "debuff_duration");
        assert_eq!(EffectCategory::EffectExtend.as_str(), "effect_extend");
    }
}
