//! Visual categories for reveal-grid cells.
use serde::{Deserialize, Serialize};

/// Number of categories available to real prizes.
pub const TIER_COUNT: usize = 11;

/// Number of zero-value filler categories.
pub const DUMMY_COUNT: usize = 5;

/// Icon family drawn on a cell. The first eleven variants carry prizes; the
/// last five are decorative fillers that never pay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Diamond,
    Crown,
    Clover,
    Bell,
    Cherry,
    Star,
    Seven,
    Horseshoe,
    Coin,
    Gem,
    Trophy,
    Lemon,
    Grape,
    Plum,
    Melon,
    Banana,
}

impl Category {
    pub const TIERS: [Self; TIER_COUNT] = [
        Self::Diamond,
        Self::Crown,
        Self::Clover,
        Self::Bell,
        Self::Cherry,
        Self::Star,
        Self::Seven,
        Self::Horseshoe,
        Self::Coin,
        Self::Gem,
        Self::Trophy,
    ];

    pub const DUMMIES: [Self; DUMMY_COUNT] =
        [Self::Lemon, Self::Grape, Self::Plum, Self::Melon, Self::Banana];

    /// Category for the prize at `index` in its catalog. Catalogs longer than
    /// eleven entries wrap around.
    #[must_use]
    pub const fn for_catalog_index(index: usize) -> Self {
        Self::TIERS[index % TIER_COUNT]
    }

    #[must_use]
    pub const fn is_dummy(self) -> bool {
        matches!(
            self,
            Self::Lemon | Self::Grape | Self::Plum | Self::Melon | Self::Banana
        )
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Diamond => "diamond",
            Self::Crown => "crown",
            Self::Clover => "clover",
            Self::Bell => "bell",
            Self::Cherry => "cherry",
            Self::Star => "star",
            Self::Seven => "seven",
            Self::Horseshoe => "horseshoe",
            Self::Coin => "coin",
            Self::Gem => "gem",
            Self::Trophy => "trophy",
            Self::Lemon => "lemon",
            Self::Grape => "grape",
            Self::Plum => "plum",
            Self::Melon => "melon",
            Self::Banana => "banana",
        }
    }

    /// Asset path of the fallback icon, relative to the site root.
    #[must_use]
    pub fn icon_path(self) -> String {
        format!("static/img/icons/{}.svg", self.key())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_index_wraps_after_eleven() {
        assert_eq!(Category::for_catalog_index(0), Category::Diamond);
        assert_eq!(Category::for_catalog_index(10), Category::Trophy);
        assert_eq!(Category::for_catalog_index(11), Category::Diamond);
        assert_eq!(Category::for_catalog_index(23), Category::Crown);
        assert_eq!(
            Category::for_catalog_index(23),
            Category::for_catalog_index(1)
        );
    }

    #[test]
    fn tiers_and_dummies_are_disjoint() {
        assert!(Category::TIERS.iter().all(|c| !c.is_dummy()));
        assert!(Category::DUMMIES.iter().all(|c| c.is_dummy()));
        assert_eq!(Category::Lemon.icon_path(), "static/img/icons/lemon.svg");
    }
}
