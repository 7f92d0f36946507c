//! Command handlers for craftbook CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod generate;
pub mod recipe;
pub mod script;
