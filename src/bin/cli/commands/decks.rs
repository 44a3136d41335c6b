use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = decks.iter().map(|deck| {
                serde_json::json!({
                    "id": deck.id.to_string(),
                    "name": deck.name,
                    "cardCount": deck.len(),
                    "updatedAt": deck.updated_at,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("(no decks)");
            }
            for deck in &decks {
                let count = paint(&format!("({} cards)", deck.len()), Color::GRAY, use_color);
                println!("{} {}", deck.name, count);
            }
        }
    }

    Ok(())
}

pub fn run_create(app: &App, name: String, format: &OutputFormat) -> Result<()> {
    let deck = app.store.create_deck(name).context("Failed to create deck")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => {
            println!("Created deck \"{}\"", deck.name);
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}

pub fn run_rename(app: &App, deck_name: &str, name: String, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let renamed = app.store.rename_deck(deck.id, name).context("Failed to rename deck")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&renamed)?),
        OutputFormat::Plain => println!("Renamed deck \"{}\" to \"{}\"", deck.name, renamed.name),
    }

    Ok(())
}

pub fn run_delete(app: &App, deck_name: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    app.store.delete_deck(deck.id).context("Failed to delete deck")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": deck.id.to_string(),
                "name": deck.name,
                "deleted": true,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted deck \"{}\" ({} cards)", deck.name, deck.len()),
    }

    Ok(())
}
