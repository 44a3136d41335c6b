use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::app::{card_at, App};
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, deck_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck.cards)?),
        OutputFormat::Plain => {
            println!("{}", paint(&deck.name, Color::BOLD, use_color));
            if deck.is_empty() {
                println!("  (no cards)");
            }
            for (i, card) in deck.cards.iter().enumerate() {
                let position = paint(&format!("{:>3}.", i + 1), Color::GRAY, use_color);
                println!("{} {} \u{2192} {}", position, card.front, card.back);
            }
        }
    }

    Ok(())
}

pub fn run_add(app: &App, deck_name: &str, front: String, back: String, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = app.store.add_card(deck.id, front, back).context("Failed to add card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Added \"{}\" \u{2192} \"{}\" to \"{}\" at position {}", card.front, card.back, deck.name, deck.len() + 1);
        }
    }

    Ok(())
}

pub fn run_edit(
    app: &App,
    deck_name: &str,
    position: usize,
    front: Option<String>,
    back: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    if front.is_none() && back.is_none() {
        bail!("Nothing to change: pass --front and/or --back");
    }

    let deck = app.find_deck(deck_name)?;
    let card = card_at(&deck, position)?;
    let updated = app.store
        .update_card(deck.id, card.id, front, back)
        .context("Failed to update card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => println!("Updated card {}: \"{}\" \u{2192} \"{}\"", position, updated.front, updated.back),
    }

    Ok(())
}

pub fn run_remove(app: &App, deck_name: &str, position: usize, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    let card = card_at(&deck, position)?;
    let removed = app.store.remove_card(deck.id, card.id).context("Failed to remove card")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&removed)?),
        OutputFormat::Plain => println!("Removed \"{}\" from \"{}\"", removed.front, deck.name),
    }

    Ok(())
}

pub fn run_move(app: &App, deck_name: &str, from: usize, to: usize) -> Result<()> {
    let deck = app.find_deck(deck_name)?;
    card_at(&deck, from)?;
    card_at(&deck, to)?;

    app.store.move_card(deck.id, from - 1, to - 1).context("Failed to move card")?;
    println!("Moved card {} to position {} in \"{}\"", from, to, deck.name);

    Ok(())
}

pub fn run_import(app: &App, deck_name: &str, file: &Path, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_name)?;

    let content = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?
    };

    let pairs = parse_tsv(&content)?;
    let added = app.store.add_cards(deck.id, pairs).context("Failed to import cards")?;
    log::info!("Imported {} cards into deck {}", added.len(), deck.id);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&added)?),
        OutputFormat::Plain => println!("Imported {} cards into \"{}\"", added.len(), deck.name),
    }

    Ok(())
}

/// Parse `front<TAB>back` lines. Blank lines and comments (`#` alone or `# ` followed
/// by text) are skipped, so a front such as `#1` still imports.
fn parse_tsv(content: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_end() == "#" || line.starts_with("# ") {
            continue;
        }

        let Some((front, back)) = line.split_once('\t') else {
            bail!("Line {}: expected front<TAB>back", i + 1);
        };
        let (front, back) = (front.trim(), back.trim());
        if front.is_empty() || back.is_empty() {
            bail!("Line {}: both faces need text", i + 1);
        }
        pairs.push((front.to_string(), back.to_string()));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_skips_blank_and_comment_lines() {
        let pairs = parse_tsv("# words\nhrana\tcomida\n\njabuka\tmanzana\r\n").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("hrana".to_string(), "comida".to_string()),
                ("jabuka".to_string(), "manzana".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_tsv_keeps_fronts_starting_with_hash() {
        let pairs = parse_tsv("# numbers\n#\n#1\tone\n").unwrap();
        assert_eq!(pairs, vec![("#1".to_string(), "one".to_string())]);
    }

    #[test]
    fn test_parse_tsv_reports_line_numbers() {
        let err = parse_tsv("a\tb\nno tab here\n").unwrap_err().to_string();
        assert!(err.starts_with("Line 2"));

        let err = parse_tsv("a\t \n").unwrap_err().to_string();
        assert!(err.contains("both faces"));
    }
}
