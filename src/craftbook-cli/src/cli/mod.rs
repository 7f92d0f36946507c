//! CLI argument definitions for craftbook
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod recipe;

pub use self::core::{Cli, Commands, OutputFormat};
pub use self::recipe::{RecipeArgs, RecipeCommand};
