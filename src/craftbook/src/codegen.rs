//! Script snippet generation from a recipe book.
//!
//! Produces one recipe instance per recipe plus a constant array listing all
//! recipe ids, in the same dialect the catalogue is scraped from.

use std::fmt::Write;

use crate::catalogue::Catalogue;
use crate::recipe::{Recipe, RecipeBook};

/// Default prototype for generated recipe instances
pub const DEFAULT_PROTOTYPE: &str = "C_Item";

/// Default name of the generated recipe list constant
pub const DEFAULT_LIST_NAME: &str = "CRAFT_RECIPES";

/// Knobs for snippet output
#[derive(Debug, Clone)]
pub struct CodegenOptions {
    pub prototype: String,
    pub list_name: String,
    pub line_ending: &'static str,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            prototype: DEFAULT_PROTOTYPE.to_string(),
            list_name: DEFAULT_LIST_NAME.to_string(),
            line_ending: "\r\n",
        }
    }
}

/// Make text safe for a string literal (the dialect has no escapes)
pub fn quote(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| match c {
            '"' => '\'',
            '\r' | '\n' => ' ',
            c => c,
        })
        .collect();
    format!("\"{}\"", cleaned)
}

/// Display name for an item, falling back to its id
fn item_name(catalogue: Option<&Catalogue>, id: &str) -> String {
    catalogue
        .and_then(|c| c.display_name(id))
        .unwrap_or_else(|| id.to_string())
}

fn write_recipe(out: &mut String, recipe: &Recipe, catalogue: Option<&Catalogue>, options: &CodegenOptions) {
    let nl = options.line_ending;
    let result_name = item_name(catalogue, &recipe.result_item);

    // Writing into a String cannot fail
    let _ = write!(out, "// {} -> {} ({}){nl}", recipe.id, recipe.result_item, recipe.tier_label());
    let _ = write!(out, "instance {}({}) {{{nl}", recipe.id, options.prototype);
    let _ = write!(out, "\tname = {};{nl}", quote(&recipe.name));
    let _ = write!(out, "\tvalue = {};{nl}", recipe.price);
    let _ = write!(out, "\tdescription = {};{nl}", quote(&result_name));

    let mut line = 0;
    if !recipe.description.is_empty() {
        let _ = write!(out, "\ttext[{}] = {};{nl}", line, quote(&recipe.description));
        line += 1;
    }
    for ingredient in &recipe.ingredients {
        let label = format!("{} x{}", item_name(catalogue, &ingredient.id), ingredient.count);
        let _ = write!(out, "\ttext[{}] = {};{nl}", line, quote(&label));
        line += 1;
    }

    let _ = write!(out, "}};{nl}");
}

/// Recipe instance declarations for the whole book
///
/// Item display names are resolved through the catalogue when one is
/// given; unresolved ids are written as-is.
pub fn recipe_snippet(book: &RecipeBook, catalogue: Option<&Catalogue>, options: &CodegenOptions) -> String {
    let mut out = String::new();
    for (i, recipe) in book.iter().enumerate() {
        if i > 0 {
            out.push_str(options.line_ending);
        }
        write_recipe(&mut out, recipe, catalogue, options);
    }
    out
}

/// Constant string array of every recipe id
pub fn item_list_snippet(book: &RecipeBook, options: &CodegenOptions) -> String {
    let ids: Vec<String> = book.iter().map(|r| quote(&r.id)).collect();
    format!(
        "const string {}[{}] = {{{}}};{}",
        options.list_name,
        ids.len(),
        ids.join(", "),
        options.line_ending
    )
}
