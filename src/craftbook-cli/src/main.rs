mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use config::Config;
use craftbook::codegen::{CodegenOptions, DEFAULT_LIST_NAME, DEFAULT_PROTOTYPE};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "craftbook=info,craftbook_cli=info",
        1 => "craftbook=debug,craftbook_cli=debug",
        _ => "craftbook=trace,craftbook_cli=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Inspect { script, full } => {
            let script = config.resolve_script(script)?;
            commands::script::inspect(&script, full)?;
        }

        Commands::Items {
            script,
            category,
            filter,
            format,
        } => {
            let script = config.resolve_script(script)?;
            commands::script::items(&script, category.as_deref(), filter.as_deref(), format)?;
        }

        Commands::Recipe { command } => match command {
            RecipeCommand::List { book, format } => {
                commands::recipe::list(&config.resolve_book(book), format)?;
            }

            RecipeCommand::Show { id, book } => {
                commands::recipe::show(&config.resolve_book(book), &id)?;
            }

            RecipeCommand::Add {
                id,
                fields,
                book,
                script,
            } => {
                let script = script.or_else(|| config.script.clone());
                commands::recipe::add(&config.resolve_book(book), id, fields, script.as_deref())?;
            }

            RecipeCommand::Update {
                id,
                fields,
                book,
                script,
            } => {
                let script = script.or_else(|| config.script.clone());
                commands::recipe::update(&config.resolve_book(book), id, fields, script.as_deref())?;
            }

            RecipeCommand::Copy { id, new_id, book } => {
                commands::recipe::copy(&config.resolve_book(book), &id, &new_id)?;
            }

            RecipeCommand::Remove { id, book } => {
                commands::recipe::remove(&config.resolve_book(book), &id)?;
            }

            RecipeCommand::Import { input, book } => {
                commands::recipe::import(&config.resolve_book(book), &input)?;
            }

            RecipeCommand::Export { output, book } => {
                commands::recipe::export(&config.resolve_book(book), output)?;
            }
        },

        Commands::Generate {
            book,
            script,
            output,
            items_output,
            prototype,
            list_name,
        } => {
            let options = CodegenOptions {
                prototype: prototype
                    .or_else(|| config.prototype.clone())
                    .unwrap_or_else(|| DEFAULT_PROTOTYPE.to_string()),
                list_name: list_name
                    .or_else(|| config.list_name.clone())
                    .unwrap_or_else(|| DEFAULT_LIST_NAME.to_string()),
                ..CodegenOptions::default()
            };

            commands::generate::handle(commands::generate::GenerateArgs {
                book: config.resolve_book(book),
                script: script.or_else(|| config.script.clone()),
                output,
                items_output,
                options,
            })?;
        }

        Commands::Configure {
            script,
            book,
            prototype,
            list_name,
            show,
        } => {
            let update = commands::configure::ConfigUpdate {
                script,
                book,
                prototype,
                list_name,
            };
            commands::configure::handle(update, show)?;
        }
    }

    Ok(())
}
