//! WebAssembly bindings for craftbook
//!
//! JavaScript-friendly entry points for the browser editor. Structured
//! results cross the boundary as JSON strings.

use crate::catalogue::{Catalogue, Session as RustSession};
use crate::codegen::{item_list_snippet, recipe_snippet, CodegenOptions};
use crate::recipe::RecipeBook;
use crate::script::{category_label, ScriptSource, CATEGORY_TAGS};
use wasm_bindgen::prelude::*;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialize failed: {}", e)))
}

/// Parse a script and return constants, instances, prototypes and functions as JSON
#[wasm_bindgen(js_name = parseScript)]
pub fn parse_script(text: &str) -> Result<String, JsValue> {
    to_json(&ScriptSource::parse(text))
}

/// Parse a script and return the item catalogue entries as JSON
#[wasm_bindgen(js_name = buildCatalogue)]
pub fn build_catalogue(text: &str) -> Result<String, JsValue> {
    to_json(Catalogue::parse(text).entries())
}

/// Category name for an item identifier (empty when untagged)
#[wasm_bindgen(js_name = classifyItem)]
pub fn classify_item(name: &str) -> String {
    category_label(name).to_string()
}

/// All category names known to the classifier
#[wasm_bindgen(js_name = itemCategories)]
pub fn item_categories() -> js_sys::Array {
    CATEGORY_TAGS
        .iter()
        .map(|t| JsValue::from_str(t.category.as_str()))
        .collect()
}

/// Editing session holding the active catalogue
#[wasm_bindgen]
pub struct Session {
    inner: RustSession,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Session {
        Session {
            inner: RustSession::new(),
        }
    }

    /// Import a script, replacing the current catalogue; returns the item count
    #[wasm_bindgen(js_name = importScript)]
    pub fn import_script(&mut self, text: &str) -> usize {
        self.inner.import_script(text).len()
    }

    #[wasm_bindgen(js_name = hasCatalogue)]
    pub fn has_catalogue(&self) -> bool {
        self.inner.has_catalogue()
    }

    /// Catalogue entries as JSON (empty array before any import)
    #[wasm_bindgen(js_name = items)]
    pub fn items(&self) -> Result<String, JsValue> {
        match self.inner.catalogue() {
            Some(catalogue) => to_json(catalogue.entries()),
            None => Ok("[]".to_string()),
        }
    }

    /// Quote-free display name for an item id
    #[wasm_bindgen(js_name = displayName)]
    pub fn display_name(&self, id: &str) -> Option<String> {
        self.inner.catalogue().and_then(|c| c.display_name(id))
    }

    /// Generate the recipe snippet for an exported recipes JSON array
    #[wasm_bindgen(js_name = generateRecipes)]
    pub fn generate_recipes(&self, recipes_json: &str) -> Result<String, JsValue> {
        let book = RecipeBook::from_json(recipes_json)
            .map_err(|e| JsValue::from_str(&format!("Parse failed: {}", e)))?;
        let catalogue = self.inner.catalogue();
        Ok(recipe_snippet(&book, catalogue.as_deref(), &CodegenOptions::default()))
    }

    /// Generate the recipe id list snippet for an exported recipes JSON array
    #[wasm_bindgen(js_name = generateItemList)]
    pub fn generate_item_list(&self, recipes_json: &str) -> Result<String, JsValue> {
        let book = RecipeBook::from_json(recipes_json)
            .map_err(|e| JsValue::from_str(&format!("Parse failed: {}", e)))?;
        Ok(item_list_snippet(&book, &CodegenOptions::default()))
    }

    /// Drop the active catalogue
    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
