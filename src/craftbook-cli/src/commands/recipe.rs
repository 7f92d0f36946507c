//! Recipe book command handlers

use anyhow::{bail, Context, Result};
use craftbook::store::{import_book, load_book, save_book};
use craftbook::{export_file_name, suggested_id, Ingredient, Recipe, RecipeBook};
use std::path::{Path, PathBuf};

use super::script::load_catalogue;
use crate::cli::{OutputFormat, RecipeArgs};

/// Parse `ITEM:COUNT` (count defaults to 1)
pub fn parse_ingredient(arg: &str) -> Result<Ingredient> {
    let (id, count) = match arg.rsplit_once(':') {
        Some((id, count)) => {
            let count = count
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid ingredient count in '{}'", arg))?;
            (id, count)
        }
        None => (arg, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        bail!("Missing item id in ingredient '{}'", arg);
    }

    Ok(Ingredient::new(id.to_uppercase(), count))
}

/// Build a recipe from CLI fields
pub fn build_recipe(id: Option<String>, fields: RecipeArgs) -> Result<Recipe> {
    let result_item = fields.result.to_uppercase();
    let ingredients = fields
        .ingredients
        .iter()
        .map(|s| parse_ingredient(s))
        .collect::<Result<Vec<_>>>()?;

    Ok(Recipe {
        id: id.unwrap_or_else(|| suggested_id(&result_item)),
        name: fields.name,
        description: fields.description,
        ingredients,
        result_item,
        price: fields.price,
        tier: fields.tier,
    })
}

/// Warn about item ids the script does not declare
fn check_items(recipe: &Recipe, script: Option<&Path>) -> Result<()> {
    let Some(script) = script else {
        return Ok(());
    };

    let catalogue = load_catalogue(script)?;
    for id in recipe.referenced_items() {
        if !catalogue.contains(id) {
            tracing::warn!(item = id, "item is not in the script catalogue");
        }
    }
    Ok(())
}

fn print_table(book: &RecipeBook) {
    for recipe in book {
        println!(
            "{:<24} {:<24} {:<4} {:>6}  {} <- {}",
            recipe.id,
            recipe.name,
            recipe.tier_label(),
            recipe.price,
            recipe.result_item,
            recipe.ingredients_summary()
        );
    }
}

/// Handle `recipe list`
pub fn list(book_path: &Path, format: OutputFormat) -> Result<()> {
    let book = load_book(book_path)?;
    match format {
        OutputFormat::Json => println!("{}", book.to_json()?),
        OutputFormat::Table => {
            if book.is_empty() {
                println!("No recipes in {}", book_path.display());
            } else {
                print_table(&book);
            }
        }
    }
    Ok(())
}

/// Handle `recipe show`
pub fn show(book_path: &Path, id: &str) -> Result<()> {
    let book = load_book(book_path)?;
    let recipe = book
        .get(id)
        .with_context(|| format!("Recipe not found: {}", id))?;

    println!("Code:        {}", recipe.id);
    println!("Name:        {}", recipe.name);
    if !recipe.description.is_empty() {
        println!("Description: {}", recipe.description);
    }
    println!("Result:      {}", recipe.result_item);
    println!("Tier:        {}", recipe.tier_label());
    println!("Price:       {}", recipe.price);
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  {}", ingredient);
    }
    Ok(())
}

/// Handle `recipe add`
pub fn add(book_path: &Path, id: Option<String>, fields: RecipeArgs, script: Option<&Path>) -> Result<()> {
    let recipe = build_recipe(id, fields)?;
    check_items(&recipe, script)?;

    let mut book = load_book(book_path)?;
    let id = recipe.id.to_uppercase();
    book.add(recipe)?;
    save_book(book_path, &book)?;

    println!("Added {} to {}", id, book_path.display());
    Ok(())
}

/// Handle `recipe update`
pub fn update(book_path: &Path, id: String, fields: RecipeArgs, script: Option<&Path>) -> Result<()> {
    let recipe = build_recipe(Some(id), fields)?;
    check_items(&recipe, script)?;

    let mut book = load_book(book_path)?;
    let id = recipe.id.to_uppercase();
    book.update(recipe)?;
    save_book(book_path, &book)?;

    println!("Updated {}", id);
    Ok(())
}

/// Handle `recipe copy`
pub fn copy(book_path: &Path, id: &str, new_id: &str) -> Result<()> {
    let mut book = load_book(book_path)?;
    book.copy(id, new_id)?;
    save_book(book_path, &book)?;

    println!("Copied {} to {}", id.to_uppercase(), new_id.to_uppercase());
    Ok(())
}

/// Handle `recipe remove`
pub fn remove(book_path: &Path, id: &str) -> Result<()> {
    let mut book = load_book(book_path)?;
    if book.remove(id).is_none() {
        bail!("Recipe not found: {}", id);
    }
    save_book(book_path, &book)?;

    println!("Removed {}", id.to_uppercase());
    Ok(())
}

/// Handle `recipe import`
pub fn import(book_path: &Path, input: &Path) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let book = import_book(book_path, &json)
        .with_context(|| format!("Failed to import {}", input.display()))?;

    println!("Imported {} recipes into {}", book.len(), book_path.display());
    Ok(())
}

/// Handle `recipe export`
pub fn export(book_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let book = load_book(book_path)?;
    if book.is_empty() {
        bail!("Nothing to export: {} has no recipes", book_path.display());
    }

    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(&chrono::Local::now())));
    std::fs::write(&output, book.to_json()?)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Exported {} recipes to {}", book.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> RecipeArgs {
        RecipeArgs {
            name: "Iron Sword".to_string(),
            result: "itmw_sword01".to_string(),
            description: String::new(),
            ingredients: vec!["ITMI_IRONORE:2".to_string(), "itmi_coal".to_string()],
            price: 50,
            tier: 1,
        }
    }

    #[test]
    fn test_parse_ingredient() {
        assert_eq!(parse_ingredient("ITMI_GOLD:5").unwrap(), Ingredient::new("ITMI_GOLD", 5));
        assert_eq!(parse_ingredient("itmi_gold").unwrap(), Ingredient::new("ITMI_GOLD", 1));
        assert!(parse_ingredient("ITMI_GOLD:x").is_err());
        assert!(parse_ingredient(":3").is_err());
    }

    #[test]
    fn test_build_recipe_suggests_id() {
        let recipe = build_recipe(None, fields()).unwrap();
        assert_eq!(recipe.id, "ITRC_MW_SWORD01");
        assert_eq!(recipe.result_item, "ITMW_SWORD01");
        assert_eq!(recipe.ingredients.len(), 2);
        assert_eq!(recipe.ingredients[1], Ingredient::new("ITMI_COAL", 1));
    }

    #[test]
    fn test_add_update_remove_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let book_path = dir.path().join("recipes.json");

        add(&book_path, None, fields(), None).unwrap();
        assert!(add(&book_path, None, fields(), None).is_err());

        let mut changed = fields();
        changed.price = 80;
        update(&book_path, "itrc_mw_sword01".to_string(), changed, None).unwrap();
        assert_eq!(load_book(&book_path).unwrap().get("ITRC_MW_SWORD01").unwrap().price, 80);

        copy(&book_path, "itrc_mw_sword01", "ITRC_MW_SWORD02").unwrap();
        assert_eq!(load_book(&book_path).unwrap().len(), 2);

        remove(&book_path, "ITRC_MW_SWORD01").unwrap();
        assert!(remove(&book_path, "ITRC_MW_SWORD01").is_err());
        assert_eq!(load_book(&book_path).unwrap().len(), 1);
    }

    #[test]
    fn test_export_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let book_path = dir.path().join("recipes.json");
        let export_path = dir.path().join("export.json");

        assert!(export(&book_path, Some(export_path.clone())).is_err());

        add(&book_path, None, fields(), None).unwrap();
        export(&book_path, Some(export_path.clone())).unwrap();

        let other = dir.path().join("other.json");
        import(&other, &export_path).unwrap();
        assert_eq!(load_book(&other).unwrap(), load_book(&book_path).unwrap());
    }
}
