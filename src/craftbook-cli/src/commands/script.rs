//! Script inspection and item catalogue commands

use anyhow::{bail, Context, Result};
use craftbook::{Catalogue, CatalogueEntry, ItemCategory};
use std::path::Path;

use crate::cli::OutputFormat;

/// Read and scrape a decompiled script
pub fn load_catalogue(path: &Path) -> Result<Catalogue> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    Catalogue::from_bytes(&data).with_context(|| format!("Failed to load script {}", path.display()))
}

/// Handle `inspect`
pub fn inspect(path: &Path, full: bool) -> Result<()> {
    let catalogue = load_catalogue(path)?;
    let source = &catalogue.source;

    println!("Script: {}", path.display());
    println!("  Constants:     {}", source.constants.len());
    println!("  Instances:     {}", source.instances.len());
    println!("  Prototypes:    {}", source.prototypes.len());
    println!("  Functions:     {}", source.functions.len());
    println!("  Items:         {}", catalogue.len());
    println!("  Dropped lines: {}", source.dropped_lines());

    if catalogue.is_empty() {
        println!();
        println!("No items found. Is this a decompiled script?");
    }

    if full {
        println!();
        println!("Constants:");
        for c in &source.constants {
            println!("  {} {} = {}", c.kind, c.name, c.value);
        }

        println!();
        println!("Functions:");
        for f in &source.functions {
            println!(
                "  {} {}({})",
                f.return_type,
                f.name,
                f.params.as_deref().unwrap_or("")
            );
        }

        let lossy: Vec<_> = source.instances.iter().filter(|i| i.dropped_lines > 0).collect();
        if !lossy.is_empty() {
            println!();
            println!("Instances with dropped statements:");
            for i in lossy {
                println!("  {} ({})", i.name, i.dropped_lines);
            }
        }
    }

    Ok(())
}

/// Entries matching the optional category and text filter
pub fn filter_entries<'a>(
    catalogue: &'a Catalogue,
    category: Option<ItemCategory>,
    filter: Option<&str>,
) -> Vec<&'a CatalogueEntry> {
    let entries: Vec<&CatalogueEntry> = match category {
        Some(category) => catalogue.by_category(category),
        None => catalogue.entries().iter().collect(),
    };

    match filter.map(str::to_lowercase) {
        Some(needle) => entries
            .into_iter()
            .filter(|e| {
                e.id.to_lowercase().contains(&needle)
                    || e.display_name.to_lowercase().contains(&needle)
            })
            .collect(),
        None => entries,
    }
}

/// Handle `items`
pub fn items(
    path: &Path,
    category: Option<&str>,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let category = match category {
        Some(name) => match ItemCategory::from_name(name) {
            Some(c) => Some(c),
            None => bail!("Unknown category: {}", name),
        },
        None => None,
    };

    let catalogue = load_catalogue(path)?;
    let entries = filter_entries(&catalogue, category, filter);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Table => {
            let width = entries.iter().map(|e| e.id.len()).max().unwrap_or(0);
            for entry in &entries {
                println!("{:<width$}  {}", entry.id, entry.display_name, width = width);
            }
            eprintln!("{} of {} items", entries.len(), catalogue.len());
        }
    }

    Ok(())
}
