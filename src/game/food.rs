use crate::consts;
use rand::Rng;
use ratatui::style::Style;

/// A food item on the arena floor: its type plus the arena-scaled growth
/// it grants when eaten
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) kind: FoodKind,
    pub(super) growth: i64,
}

/// The food types, carrying their unit growth value and display color
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum FoodKind {
    Ordinary,
    Poison,
    TierThree,
    TierNine,
}

impl FoodKind {
    /// Pick a special food type with the nested distribution: about 67%
    /// poison, and the remainder split 67/33 between the +3 and +9
    /// tiers.  Deliberately skewed toward poison.
    pub(super) fn draw_special<R: Rng>(rng: &mut R) -> FoodKind {
        if rng.random_range(1..=100) > consts::FOOD_TIER_THRESHOLD {
            FoodKind::Poison
        } else if rng.random_range(1..=100) > consts::FOOD_TIER_THRESHOLD {
            FoodKind::TierThree
        } else {
            FoodKind::TierNine
        }
    }

    /// Growth in arena units, before scaling
    pub(super) fn growth_units(self) -> f64 {
        match self {
            FoodKind::Ordinary => 1.0,
            FoodKind::Poison => -1.0,
            FoodKind::TierThree => 3.0,
            FoodKind::TierNine => 9.0,
        }
    }

    pub(super) fn style(self) -> Style {
        match self {
            FoodKind::Ordinary => consts::ORDINARY_FOOD_STYLE,
            FoodKind::Poison => consts::POISON_FOOD_STYLE,
            FoodKind::TierThree => consts::TIER_THREE_FOOD_STYLE,
            FoodKind::TierNine => consts::TIER_NINE_FOOD_STYLE,
        }
    }
}
