//! Recipe command CLI definitions

use clap::{Args, Subcommand};
use std::path::PathBuf;

use super::core::OutputFormat;

/// Recipe fields shared by `add` and `update`
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Recipe name shown to the player
    #[arg(short, long)]
    pub name: String,

    /// Item produced by the recipe
    #[arg(short, long)]
    pub result: String,

    /// Extra description shown before the ingredient list
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Ingredient as ITEM_ID:COUNT (repeatable)
    #[arg(short, long = "ingredient", value_name = "ITEM:COUNT")]
    pub ingredients: Vec<String>,

    /// Trader price
    #[arg(short, long, default_value_t = craftbook::recipe::DEFAULT_PRICE)]
    pub price: u32,

    /// Crafting tier (0-6)
    #[arg(short, long, default_value_t = 0)]
    pub tier: u8,
}

#[derive(Subcommand)]
pub enum RecipeCommand {
    /// List recipes in the book
    List {
        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one recipe
    Show {
        /// Recipe code
        id: String,

        #[arg(short, long)]
        book: Option<PathBuf>,
    },

    /// Add a new recipe
    Add {
        /// Recipe code (derived from the result item if not provided)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        fields: RecipeArgs,

        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Check item ids against this script (uses configured default if set)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Replace an existing recipe
    Update {
        /// Recipe code
        id: String,

        #[command(flatten)]
        fields: RecipeArgs,

        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Check item ids against this script (uses configured default if set)
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Duplicate a recipe under a new code
    Copy {
        /// Existing recipe code
        id: String,

        /// New recipe code
        new_id: String,

        #[arg(short, long)]
        book: Option<PathBuf>,
    },

    /// Remove a recipe
    Remove {
        /// Recipe code
        id: String,

        #[arg(short, long)]
        book: Option<PathBuf>,
    },

    /// Replace the book with an exported recipes file (backs up the old one)
    Import {
        /// Exported recipes JSON
        input: PathBuf,

        #[arg(short, long)]
        book: Option<PathBuf>,
    },

    /// Export the book to a timestamped JSON file
    Export {
        /// Output file (defaults to "recipes <timestamp>.json")
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        book: Option<PathBuf>,
    },
}
