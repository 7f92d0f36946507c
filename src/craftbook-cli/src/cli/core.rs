//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::recipe::RecipeCommand;

/// Output format for listing commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "craftbook")]
#[command(about = "Crafting recipe editor for script-based game mods", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize what the scraper finds in a decompiled script
    #[command(visible_alias = "i")]
    Inspect {
        /// Decompiled script (uses configured default if not provided)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Also list constants and functions
        #[arg(short, long)]
        full: bool,
    },

    /// List the item catalogue of a decompiled script
    #[command(visible_alias = "it")]
    Items {
        /// Decompiled script (uses configured default if not provided)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Only items of this category (e.g. meleeWeapon, food)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive filter on id or name
        #[arg(short = 'q', long)]
        filter: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Recipe book operations (list, add, update, copy, remove, import, export)
    #[command(visible_alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommand,
    },

    /// Generate script snippets for the recipe book
    #[command(visible_alias = "g")]
    Generate {
        /// Recipe book (uses configured default or recipes.json)
        #[arg(short, long)]
        book: Option<PathBuf>,

        /// Decompiled script used to resolve item names
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Write recipe instances here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the recipe id list here instead of stdout
        #[arg(long)]
        items_output: Option<PathBuf>,

        /// Prototype for recipe instances
        #[arg(long)]
        prototype: Option<String>,

        /// Name of the recipe list constant
        #[arg(long)]
        list_name: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default decompiled script
        #[arg(long)]
        script: Option<PathBuf>,

        /// Set default recipe book
        #[arg(long)]
        book: Option<PathBuf>,

        /// Set prototype for generated recipe instances
        #[arg(long)]
        prototype: Option<String>,

        /// Set name of the generated recipe list constant
        #[arg(long)]
        list_name: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
