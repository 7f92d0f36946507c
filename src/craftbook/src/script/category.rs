//! Item category classification
//!
//! Item instances carry a two-letter tag right after the `it` prefix
//! (`ITMW_` for melee weapons, `ITFO_` for food, ...). This module maps
//! those tags to categories used for grouping in pickers and listings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of an item instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemCategory {
    Amulet,
    AnimalTrophy,
    Armor,
    Food,
    Key,
    MeleeWeapon,
    Misc,
    RangedWeapon,
    Ring,
    Rune,
    Scroll,
    Secret,
    Written,
    Belt,
    Potion,
    Plant,
    Helmet,
    HouseCraft,
    Shield,
    Receipt,
    Unknown,
}

/// Tag/category pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTag {
    pub tag: &'static str,
    pub category: ItemCategory,
}

/// All known item tags
pub const CATEGORY_TAGS: &[CategoryTag] = &[
    CategoryTag { tag: "am", category: ItemCategory::Amulet },
    CategoryTag { tag: "at", category: ItemCategory::AnimalTrophy },
    CategoryTag { tag: "ar", category: ItemCategory::Armor },
    CategoryTag { tag: "fo", category: ItemCategory::Food },
    CategoryTag { tag: "ke", category: ItemCategory::Key },
    CategoryTag { tag: "mw", category: ItemCategory::MeleeWeapon },
    CategoryTag { tag: "mi", category: ItemCategory::Misc },
    CategoryTag { tag: "rw", category: ItemCategory::RangedWeapon },
    CategoryTag { tag: "ri", category: ItemCategory::Ring },
    CategoryTag { tag: "ru", category: ItemCategory::Rune },
    CategoryTag { tag: "sc", category: ItemCategory::Scroll },
    CategoryTag { tag: "se", category: ItemCategory::Secret },
    CategoryTag { tag: "wr", category: ItemCategory::Written },
    CategoryTag { tag: "be", category: ItemCategory::Belt },
    CategoryTag { tag: "po", category: ItemCategory::Potion },
    CategoryTag { tag: "pl", category: ItemCategory::Plant },
    CategoryTag { tag: "he", category: ItemCategory::Helmet },
    CategoryTag { tag: "hc", category: ItemCategory::HouseCraft },
    CategoryTag { tag: "sh", category: ItemCategory::Shield },
    CategoryTag { tag: "rc", category: ItemCategory::Receipt },
];

/// `it` + two tag characters + underscore, anywhere in the identifier
static ITEM_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)it(\S\S)_").unwrap());

impl ItemCategory {
    /// Camel-case name, as used in serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::Amulet => "amulet",
            ItemCategory::AnimalTrophy => "animalTrophy",
            ItemCategory::Armor => "armor",
            ItemCategory::Food => "food",
            ItemCategory::Key => "key",
            ItemCategory::MeleeWeapon => "meleeWeapon",
            ItemCategory::Misc => "misc",
            ItemCategory::RangedWeapon => "rangedWeapon",
            ItemCategory::Ring => "ring",
            ItemCategory::Rune => "rune",
            ItemCategory::Scroll => "scroll",
            ItemCategory::Secret => "secret",
            ItemCategory::Written => "written",
            ItemCategory::Belt => "belt",
            ItemCategory::Potion => "potion",
            ItemCategory::Plant => "plant",
            ItemCategory::Helmet => "helmet",
            ItemCategory::HouseCraft => "houseCraft",
            ItemCategory::Shield => "shield",
            ItemCategory::Receipt => "receipt",
            ItemCategory::Unknown => "unknown",
        }
    }

    /// Parse a camel-case category name (the inverse of [`ItemCategory::as_str`])
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "unknown" {
            return Some(ItemCategory::Unknown);
        }
        CATEGORY_TAGS
            .iter()
            .map(|t| t.category)
            .find(|c| c.as_str() == name)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Get category by two-letter tag (case-insensitive)
pub fn category_by_tag(tag: &str) -> ItemCategory {
    let tag = tag.to_lowercase();
    CATEGORY_TAGS
        .iter()
        .find(|t| t.tag == tag)
        .map(|t| t.category)
        .unwrap_or(ItemCategory::Unknown)
}

/// Classify an instance identifier
///
/// Returns `None` when the identifier has no `it??_` tag at all; an
/// unrecognized tag yields [`ItemCategory::Unknown`].
pub fn classify(name: &str) -> Option<ItemCategory> {
    ITEM_TAG_RE
        .captures(name)
        .map(|caps| category_by_tag(&caps[1]))
}

/// Category name for display, empty when the identifier is not tagged
pub fn category_label(name: &str) -> &'static str {
    classify(name).map(ItemCategory::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_tags() {
        assert_eq!(classify("ITMW_SWORD01"), Some(ItemCategory::MeleeWeapon));
        assert_eq!(classify("itfo_apple"), Some(ItemCategory::Food));
        assert_eq!(classify("ItRc_Sword"), Some(ItemCategory::Receipt));
        assert_eq!(classify("ITHC_TABLE"), Some(ItemCategory::HouseCraft));
    }

    #[test]
    fn test_classify_unknown_tag() {
        assert_eq!(classify("ITXX_FOO"), Some(ItemCategory::Unknown));
        assert_eq!(category_label("ITXX_FOO"), "unknown");
    }

    #[test]
    fn test_classify_untagged() {
        assert_eq!(classify("sword"), None);
        assert_eq!(category_label("sword"), "");
        // Needs the underscore after the tag
        assert_eq!(classify("ITMWSWORD"), None);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label("ITMW_SWORD01"), "meleeWeapon");
        assert_eq!(category_label("itat_wolffur"), "animalTrophy");
    }

    #[test]
    fn test_name_roundtrip() {
        for tag in CATEGORY_TAGS {
            assert_eq!(ItemCategory::from_name(tag.category.as_str()), Some(tag.category));
        }
        assert_eq!(ItemCategory::from_name("unknown"), Some(ItemCategory::Unknown));
        assert_eq!(ItemCategory::from_name("nope"), None);
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&ItemCategory::RangedWeapon).unwrap();
        assert_eq!(json, "\"rangedWeapon\"");
    }
}
