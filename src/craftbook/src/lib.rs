//! # craftbook
//!
//! Crafting recipe authoring library for script-based game mods.
//!
//! This library provides functionality to:
//! - Scrape constants, item instances and functions from a decompiled script
//! - Build an item catalogue (id -> display name) from the scraped data
//! - Author, validate, store and exchange recipe books
//! - Generate script snippets for the authored recipes
//!
//! ## Example
//!
//! ```no_run
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = fs::read("GOTHIC.src")?;
//! let catalogue = craftbook::Catalogue::from_bytes(&data)?;
//!
//! for entry in catalogue.entries() {
//!     println!("{} {}", entry.id, entry.display_name);
//! }
//!
//! let mut book = craftbook::RecipeBook::new();
//! book.add(craftbook::Recipe::new("Iron Sword", "ITMW_SWORD01").with_ingredient("ITMI_IRONORE", 2))?;
//!
//! let snippet = craftbook::recipe_snippet(&book, Some(&catalogue), &Default::default());
//! fs::write("recipes.d", snippet)?;
//! # Ok(())
//! # }
//! ```

pub mod catalogue;
pub mod codegen;
pub mod recipe;
pub mod script;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used items
#[doc(inline)]
pub use catalogue::{build_entries, resolve_value, Catalogue, CatalogueEntry, Session, NO_NAME};
#[doc(inline)]
pub use codegen::{item_list_snippet, recipe_snippet, CodegenOptions};
#[doc(inline)]
pub use recipe::{export_file_name, suggested_id, Ingredient, Recipe, RecipeBook, RecipeError};
#[doc(inline)]
pub use script::{
    category_label, classify, extract_constants, extract_functions, extract_instances,
    ConstantValue, ItemCategory, ScriptError, ScriptSource, SourceConstant, SourceFunction,
    SourceInstance,
};
#[doc(inline)]
pub use store::{import_book, load_book, save_book, smart_backup, StoreError};
