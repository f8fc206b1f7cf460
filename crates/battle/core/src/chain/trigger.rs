//! Category-match rules deciding whether a pending effect fires.
//!
//! | Pending category | Fires when the acting agent's action has |
//! |---|---|
//! | Attack | damage |
//! | Heal | heal |
//! | Defense, Typing, Recast, Special | any facet |
//! | EffectExtend (buff extend/duration) | buff |
//! | EffectExtend (debuff extend/duration) | debuff |
//! | EffectExtend (other) | never |

use crate::effect::{ChainEffectKind, EffectCategory};
use crate::flags::ActionCategoryFlags;

/// Returns true if an effect of `kind` fires on an action with `flags`.
pub fn matches(kind: ChainEffectKind, flags: ActionCategoryFlags) -> bool {
    match kind.category() {
        EffectCategory::Attack => flags.has_damage(),
        EffectCategory::Heal => flags.has_heal(),
        EffectCategory::Defense
        | EffectCategory::Typing
        | EffectCategory::Recast
        | EffectCategory::Special => flags.has_any(),
        EffectCategory::EffectExtend => {
            if kind.is_buff_extension() {
                flags.has_buff()
            } else if kind.is_debuff_extension() {
                flags.has_debuff()
            } else {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    type Flags = ActionCategoryFlags;

    #[test]
    fn attack_needs_damage() {
        let kind = ChainEffectKind::DamageBonus;
        assert!(matches(kind, Flags::DAMAGE));
        assert!(matches(kind, Flags::DAMAGE | Flags::HEAL));
        assert!(!matches(kind, Flags::HEAL | Flags::BUFF | Flags::DEBUFF));
    }

    #[test]
    fn heal_needs_heal() {
        let kind = ChainEffectKind::HealBonus;
        assert!(matches(kind, Flags::HEAL));
        assert!(!matches(kind, Flags::DAMAGE));
    }

    #[test]
    fn universal_categories_need_any_facet() {
        for kind in [
            ChainEffectKind::Shield,
            ChainEffectKind::TimeExtension,
            ChainEffectKind::RecastReduction,
            ChainEffectKind::DoubleCast,
        ] {
            for flags in [Flags::DAMAGE, Flags::HEAL, Flags::BUFF, Flags::DEBUFF] {
                assert!(matches(kind, flags), "{kind:?} should fire on {flags:?}");
            }
            assert!(!matches(kind, Flags::empty()));
        }
    }

    #[test]
    fn extension_subtypes_follow_their_facet() {
        assert!(matches(ChainEffectKind::BuffExtend, Flags::BUFF));
        assert!(matches(ChainEffectKind::BuffDuration, Flags::BUFF));
        assert!(!matches(ChainEffectKind::BuffExtend, Flags::DEBUFF | Flags::DAMAGE));

        assert!(matches(ChainEffectKind::DebuffExtend, Flags::DEBUFF));
        assert!(matches(ChainEffectKind::DebuffDuration, Flags::DEBUFF));
        assert!(!matches(ChainEffectKind::DebuffDuration, Flags::BUFF | Flags::HEAL));
    }

    #[test]
    fn other_extension_never_fires() {
        assert!(!matches(ChainEffectKind::StatusExtend, Flags::all()));
    }

    #[test]
    fn nothing_fires_without_facets() {
        for kind in ChainEffectKind::iter() {
            assert!(!matches(kind, Flags::empty()), "{kind:?} fired on no facets");
        }
    }
}
