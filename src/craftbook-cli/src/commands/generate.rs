//! Snippet generation command handler

use anyhow::{Context, Result};
use craftbook::codegen::{item_list_snippet, recipe_snippet, CodegenOptions};
use craftbook::store::load_book;
use std::path::{Path, PathBuf};

use super::script::load_catalogue;

/// Inputs for `generate`
#[derive(Debug)]
pub struct GenerateArgs {
    pub book: PathBuf,
    pub script: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub items_output: Option<PathBuf>,
    pub options: CodegenOptions,
}

fn emit(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// Handle `generate`
pub fn handle(args: GenerateArgs) -> Result<()> {
    let book = load_book(&args.book)
        .with_context(|| format!("Failed to load recipe book {}", args.book.display()))?;

    let catalogue = args.script.as_deref().map(load_catalogue).transpose()?;
    if let Some(catalogue) = &catalogue {
        for id in book.unknown_items(catalogue) {
            tracing::warn!(item = %id, "item is not in the script catalogue, using its id as name");
        }
    }

    let recipes = recipe_snippet(&book, catalogue.as_ref(), &args.options);
    let items = item_list_snippet(&book, &args.options);

    emit(args.output.as_deref(), &recipes)?;
    if args.output.is_none() && args.items_output.is_none() {
        println!();
    }
    emit(args.items_output.as_deref(), &items)?;

    tracing::info!(recipes = book.len(), "generated snippets");
    Ok(())
}
