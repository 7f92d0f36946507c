//! Crafting recipe records and the recipe book.
//!
//! The JSON shape matches the editor's export format, so books written by
//! older exports import unchanged.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

use crate::catalogue::Catalogue;

/// Price assigned to new recipes
pub const DEFAULT_PRICE: u32 = 50;

/// Highest crafting tier
pub const MAX_TIER: u8 = 6;

/// Allowed ingredient count range
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 99;

/// Prefix of generated recipe ids
pub const RECIPE_PREFIX: &str = "ITRC_";

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Recipe with code {0} already exists")]
    DuplicateId(String),

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Recipe code must not be empty")]
    EmptyId,

    #[error("Recipe {id}: tier {tier} is out of range (0-{max})", max = MAX_TIER)]
    InvalidTier { id: String, tier: u8 },

    #[error("Recipe {id}: ingredient {item} has count {count} (allowed {min}-{max})", min = MIN_COUNT, max = MAX_COUNT)]
    InvalidCount { id: String, item: String, count: u32 },

    #[error("Failed to parse recipes: {0}")]
    Json(#[from] serde_json::Error),
}

/// One ingredient line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    #[serde(deserialize_with = "rounded_u32")]
    pub count: u32,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Ingredient {
            id: id.into(),
            count,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{} {}", self.count, self.id)
    }
}

/// A crafting recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub result_item: String,
    #[serde(default = "default_price", deserialize_with = "rounded_u32")]
    pub price: u32,
    #[serde(default, deserialize_with = "rounded_u8")]
    pub tier: u8,
}

fn default_price() -> u32 {
    DEFAULT_PRICE
}

// Exported books may carry fractional or negative numbers from the editor's
// number inputs. Round to the nearest integer and saturate into range.
fn rounded_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as u32)
}

fn rounded_u8<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as u8)
}

impl Recipe {
    /// New recipe producing `result_item`, with the suggested id
    pub fn new(name: impl Into<String>, result_item: impl Into<String>) -> Self {
        let result_item = result_item.into();
        Recipe {
            id: suggested_id(&result_item),
            name: name.into(),
            description: String::new(),
            ingredients: Vec::new(),
            result_item,
            price: DEFAULT_PRICE,
            tier: 0,
        }
    }

    pub fn with_ingredient(mut self, id: impl Into<String>, count: u32) -> Self {
        self.ingredients.push(Ingredient::new(id, count));
        self
    }

    /// Tier label as shown in listings (`T0`..`T6`)
    pub fn tier_label(&self) -> String {
        format!("T{}", self.tier)
    }

    /// Ingredient summary, e.g. `x2 ITMI_IRONORE, x1 ITMI_COAL`
    pub fn ingredients_summary(&self) -> String {
        self.ingredients
            .iter()
            .map(Ingredient::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.id.trim().is_empty() {
            return Err(RecipeError::EmptyId);
        }
        if self.tier > MAX_TIER {
            return Err(RecipeError::InvalidTier {
                id: self.id.clone(),
                tier: self.tier,
            });
        }
        if let Some(bad) = self
            .ingredients
            .iter()
            .find(|i| !(MIN_COUNT..=MAX_COUNT).contains(&i.count))
        {
            return Err(RecipeError::InvalidCount {
                id: self.id.clone(),
                item: bad.id.clone(),
                count: bad.count,
            });
        }
        Ok(())
    }

    /// Item ids referenced by this recipe (result first, then ingredients)
    pub fn referenced_items(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.result_item.as_str())
            .chain(self.ingredients.iter().map(|i| i.id.as_str()))
            .filter(|id| !id.is_empty())
    }

    fn normalize(mut self) -> Self {
        self.id = self.id.to_uppercase();
        self
    }
}

/// Recipe id derived from the result item: `ITMW_SWORD` -> `ITRC_MW_SWORD`
///
/// Only the first `IT` is removed.
pub fn suggested_id(result_item: &str) -> String {
    format!("{}{}", RECIPE_PREFIX, result_item.replacen("IT", "", 1))
}

/// File name for an exported book, e.g. `recipes 2024-05-01 13-45-10.json`
pub fn export_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    format!("recipes {}.json", now.format("%Y-%m-%d %H-%M-%S"))
}

/// Ordered set of recipes keyed by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an exported JSON array
    pub fn from_json(json: &str) -> Result<Self, RecipeError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Ok(RecipeBook { recipes })
    }

    pub fn to_json(&self) -> Result<String, RecipeError> {
        Ok(serde_json::to_string_pretty(&self.recipes)?)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Recipe by id (compared uppercased, as stored)
    pub fn get(&self, id: &str) -> Option<&Recipe> {
        let id = id.to_uppercase();
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a new recipe; the id is uppercased and must be unused
    pub fn add(&mut self, recipe: Recipe) -> Result<(), RecipeError> {
        let recipe = recipe.normalize();
        recipe.validate()?;
        if self.contains(&recipe.id) {
            return Err(RecipeError::DuplicateId(recipe.id));
        }
        self.recipes.push(recipe);
        Ok(())
    }

    /// Replace the recipe that has the same id, keeping its position
    pub fn update(&mut self, recipe: Recipe) -> Result<(), RecipeError> {
        let recipe = recipe.normalize();
        recipe.validate()?;
        let slot = self
            .recipes
            .iter_mut()
            .find(|r| r.id == recipe.id)
            .ok_or_else(|| RecipeError::NotFound(recipe.id.clone()))?;
        *slot = recipe;
        Ok(())
    }

    /// Duplicate a recipe under a new id
    pub fn copy(&mut self, id: &str, new_id: &str) -> Result<(), RecipeError> {
        let mut copy = self
            .get(id)
            .cloned()
            .ok_or_else(|| RecipeError::NotFound(id.to_string()))?;
        copy.id = new_id.to_string();
        self.add(copy)
    }

    /// Remove by id, returning the removed recipe
    pub fn remove(&mut self, id: &str) -> Option<Recipe> {
        let id = id.to_uppercase();
        let index = self.recipes.iter().position(|r| r.id == id)?;
        Some(self.recipes.remove(index))
    }

    /// Item ids referenced by recipes but missing from the catalogue
    pub fn unknown_items(&self, catalogue: &Catalogue) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for id in self.iter().flat_map(|r| r.referenced_items()) {
            if !catalogue.contains(id) && !missing.iter().any(|m| m == id) {
                missing.push(id.to_string());
            }
        }
        missing
    }
}

impl<'a> IntoIterator for &'a RecipeBook {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sword() -> Recipe {
        Recipe::new("Iron Sword", "ITMW_SWORD01")
            .with_ingredient("ITMI_IRONORE", 2)
            .with_ingredient("ITMI_COAL", 1)
    }

    #[test]
    fn test_suggested_id() {
        assert_eq!(suggested_id("ITMW_SWORD01"), "ITRC_MW_SWORD01");
        assert_eq!(suggested_id("ITMI_ITEM"), "ITRC_MI_ITEM");
        assert_eq!(suggested_id("GOLD"), "ITRC_GOLD");
    }

    #[test]
    fn test_add_and_duplicate() {
        let mut book = RecipeBook::new();
        book.add(sword()).unwrap();
        assert_eq!(book.len(), 1);

        let err = book.add(sword()).unwrap_err();
        assert!(matches!(err, RecipeError::DuplicateId(id) if id == "ITRC_MW_SWORD01"));
    }

    #[test]
    fn test_add_uppercases_id() {
        let mut book = RecipeBook::new();
        let mut recipe = sword();
        recipe.id = "itrc_custom".to_string();
        book.add(recipe).unwrap();
        assert!(book.contains("ITRC_CUSTOM"));
    }

    #[test]
    fn test_update_keeps_position() {
        let mut book = RecipeBook::new();
        book.add(sword()).unwrap();
        book.add(Recipe::new("Bread", "ITFO_BREAD")).unwrap();

        let mut changed = sword();
        changed.price = 75;
        book.update(changed).unwrap();

        assert_eq!(book.iter().next().unwrap().price, 75);
        assert!(matches!(
            book.update(Recipe::new("Ghost", "ITMI_GHOST")),
            Err(RecipeError::NotFound(_))
        ));
    }

    #[test]
    fn test_copy_and_remove() {
        let mut book = RecipeBook::new();
        book.add(sword()).unwrap();
        book.copy("ITRC_MW_SWORD01", "ITRC_MW_SWORD02").unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.get("ITRC_MW_SWORD02").unwrap().name, "Iron Sword");

        let removed = book.remove("ITRC_MW_SWORD01").unwrap();
        assert_eq!(removed.result_item, "ITMW_SWORD01");
        assert!(book.remove("ITRC_MW_SWORD01").is_none());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_validate_ranges() {
        let mut recipe = sword();
        recipe.tier = 7;
        assert!(matches!(recipe.validate(), Err(RecipeError::InvalidTier { .. })));

        let recipe = sword().with_ingredient("ITMI_GOLD", 0);
        assert!(matches!(recipe.validate(), Err(RecipeError::InvalidCount { count: 0, .. })));

        let mut recipe = sword();
        recipe.id = "  ".to_string();
        assert!(matches!(recipe.validate(), Err(RecipeError::EmptyId)));
    }

    #[test]
    fn test_json_format() {
        let mut book = RecipeBook::new();
        book.add(sword()).unwrap();
        let json = book.to_json().unwrap();
        assert!(json.contains("\"resultItem\": \"ITMW_SWORD01\""));

        let parsed = RecipeBook::from_json(&json).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn test_import_defaults() {
        let book = RecipeBook::from_json(r#"[{"id":"ITRC_X","name":"X"}]"#).unwrap();
        let recipe = book.get("ITRC_X").unwrap();
        assert_eq!(recipe.price, DEFAULT_PRICE);
        assert_eq!(recipe.tier, 0);
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_import_rounds_editor_numbers() {
        let json = r#"[{"id":"ITRC_X","name":"X","price":12.5,"tier":2.0,"ingredients":[{"id":"ITMI_GOLD","count":0},{"id":"ITMI_COAL","count":1.4}]}]"#;
        let book = RecipeBook::from_json(json).unwrap();
        let recipe = book.get("ITRC_X").unwrap();
        assert_eq!(recipe.price, 13);
        assert_eq!(recipe.tier, 2);
        assert_eq!(recipe.ingredients[0].count, 0);
        assert_eq!(recipe.ingredients[1].count, 1);

        let book = RecipeBook::from_json(r#"[{"id":"ITRC_Y","name":"Y","price":-5}]"#).unwrap();
        assert_eq!(book.get("ITRC_Y").unwrap().price, 0);
    }

    #[test]
    fn test_lookups_ignore_case() {
        let mut book = RecipeBook::new();
        let mut recipe = sword();
        recipe.id = "itrc_custom".to_string();
        book.add(recipe).unwrap();

        assert!(book.get("itrc_custom").is_some());
        assert!(book.contains("Itrc_Custom"));

        book.copy("itrc_custom", "itrc_custom2").unwrap();
        assert!(book.get("ITRC_CUSTOM2").is_some());

        assert!(book.remove("itrc_custom").is_some());
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_summary_and_tier_label() {
        let recipe = sword();
        assert_eq!(recipe.ingredients_summary(), "x2 ITMI_IRONORE, x1 ITMI_COAL");
        assert_eq!(recipe.tier_label(), "T0");
    }

    #[test]
    fn test_unknown_items() {
        let catalogue = Catalogue::parse(
            "instance ItMw_Sword01(C_Item) { name = \"Sword\"; };\ninstance ItMi_IronOre(C_Item) { name = \"Ore\"; };\n",
        );
        let mut book = RecipeBook::new();
        book.add(sword()).unwrap();
        book.add(Recipe::new("Axe", "ITMW_AXE").with_ingredient("ITMI_COAL", 3)).unwrap();
        assert_eq!(book.unknown_items(&catalogue), vec!["ITMI_COAL", "ITMW_AXE"]);
    }

    #[test]
    fn test_export_file_name() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 10).unwrap();
        assert_eq!(export_file_name(&now), "recipes 2024-05-01 13-45-10.json");
    }
}
