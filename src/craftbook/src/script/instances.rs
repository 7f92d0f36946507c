//! `instance` and `prototype` declarations

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::category::{classify, ItemCategory};
use super::properties::{decompose, first_value};

/// Two-character marker that starts every item identifier
pub const ITEM_PREFIX: &str = "it";

/// Bare base declaration that shares the item prefix but is not an item
pub const ITEM_SENTINEL: &str = "item";

// Bodies are matched lazily so consecutive declarations stay separate
static INSTANCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?R)instance ((?i:it).+)\((.+)\) \{([\s\S]+?)\};").unwrap()
});

static PROTOTYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?R)prototype ((?i:it).+)\((.+)\) \{([\s\S]+?)\};").unwrap()
});

/// A declared game object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInstance {
    pub name: String,
    /// Parenthesized argument text, verbatim
    pub prototype_ref: String,
    pub properties: Vec<(String, String)>,
    /// `None` when the name carries no `it??_` tag
    pub category: Option<ItemCategory>,
    /// Body statements skipped by the property decomposer
    #[serde(default)]
    pub dropped_lines: usize,
}

impl SourceInstance {
    /// Value of the first `name` property
    pub fn name_property(&self) -> Option<&str> {
        self.property("name")
    }

    /// Value of the first property with the given key
    pub fn property(&self, key: &str) -> Option<&str> {
        first_value(&self.properties, key)
    }

    /// Whether this declaration denotes an in-game item
    pub fn is_item(&self) -> bool {
        has_item_prefix(&self.name) && !self.name.eq_ignore_ascii_case(ITEM_SENTINEL)
    }
}

/// Case-insensitive check for the item prefix
pub fn has_item_prefix(name: &str) -> bool {
    name.get(..ITEM_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(ITEM_PREFIX))
}

/// Extract all item-prefixed `instance` declarations, in source order
pub fn extract_instances(source: &str) -> Vec<SourceInstance> {
    extract_with(&INSTANCE_RE, source)
}

/// Extract all item-prefixed `prototype` declarations, in source order
pub fn extract_prototypes(source: &str) -> Vec<SourceInstance> {
    extract_with(&PROTOTYPE_RE, source)
}

fn extract_with(re: &Regex, source: &str) -> Vec<SourceInstance> {
    re.captures_iter(source)
        .map(|caps| {
            let name = caps[1].to_string();
            let props = decompose(&caps[3]);
            if props.dropped > 0 {
                tracing::debug!(instance = %name, dropped = props.dropped, "instance has unparsed statements");
            }
            SourceInstance {
                category: classify(&name),
                prototype_ref: caps[2].to_string(),
                properties: props.pairs,
                dropped_lines: props.dropped,
                name,
            }
        })
        .collect()
}

/// First instance whose uppercased name equals `id` (compared uppercased)
pub fn find_instance<'a>(instances: &'a [SourceInstance], id: &str) -> Option<&'a SourceInstance> {
    let id = id.to_uppercase();
    instances.iter().find(|i| i.name.to_uppercase() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "instance ITMW_SWORD01(C_Item) {\r\n\tname = NAME_SWORD;\r\n\tdamagetotal = 40;\r\n};\r\n\r\ninstance itfo_apple(C_Item) {\r\n\tname = \"Apple\";\r\n\tvalue = 5;\r\n};\r\n";

    #[test]
    fn test_extract_two_instances() {
        let instances = extract_instances(SOURCE);
        assert_eq!(instances.len(), 2);

        assert_eq!(instances[0].name, "ITMW_SWORD01");
        assert_eq!(instances[0].prototype_ref, "C_Item");
        assert_eq!(instances[0].category, Some(ItemCategory::MeleeWeapon));
        assert_eq!(instances[0].name_property(), Some("NAME_SWORD"));
        assert_eq!(instances[0].property("damagetotal"), Some("40"));

        assert_eq!(instances[1].name, "itfo_apple");
        assert_eq!(instances[1].name_property(), Some("\"Apple\""));
        assert_eq!(instances[1].category, Some(ItemCategory::Food));
    }

    #[test]
    fn test_non_item_instances_skipped() {
        let src = "instance PC_Hero(NPC_DEFAULT) {\n\tname = \"Hero\";\n};\ninstance ItMi_Gold(C_Item) {\n\tname = \"Gold\";\n};\n";
        let instances = extract_instances(src);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].name, "ItMi_Gold");
    }

    #[test]
    fn test_untagged_item_has_no_category() {
        let instances = extract_instances("instance item(C_Item) { name = \"base\"; };");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].category, None);
        assert!(!instances[0].is_item());
    }

    #[test]
    fn test_prototypes_separate() {
        let src = "prototype ItPr_Base(C_Item) { value = 1; };\ninstance ItPo_Health(ItPr_Base) { name = \"Heal\"; };\n";
        let protos = extract_prototypes(src);
        let instances = extract_instances(src);
        assert_eq!(protos.len(), 1);
        assert_eq!(protos[0].name, "ItPr_Base");
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].prototype_ref, "ItPr_Base");
    }

    #[test]
    fn test_dropped_lines_counted() {
        let instances = extract_instances("instance ItWr_Note(C_Item) { name = \"Note\"; text = \"1+1=2\"; };");
        assert_eq!(instances[0].properties.len(), 1);
        assert_eq!(instances[0].dropped_lines, 1);
    }

    #[test]
    fn test_find_instance_case_insensitive() {
        let instances = extract_instances(SOURCE);
        assert_eq!(find_instance(&instances, "ITFO_APPLE").map(|i| i.name.as_str()), Some("itfo_apple"));
        assert!(find_instance(&instances, "ITFO_PEAR").is_none());
    }

    #[test]
    fn test_item_prefix() {
        assert!(has_item_prefix("ITMW_X"));
        assert!(has_item_prefix("itmw_x"));
        assert!(!has_item_prefix("PC_Hero"));
        assert!(!has_item_prefix("i"));
    }
}
