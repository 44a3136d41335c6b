use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use flashcards_lib::flashcards::{Card, Deck, DeckStore};
use flashcards_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub store: DeckStore,
    pub config: Config,
}

impl App {
    /// Initialize from `data_dir`, or the default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Config::default_data_dir().context("Failed to get data directory")?,
        };

        let config = Config::load(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;

        Ok(Self {
            store: DeckStore::new(data_dir),
            config,
        })
    }

    /// List all decks
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.store.list_decks().context("Failed to list decks")
    }

    /// Find a deck by name (case-insensitive prefix match)
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        let decks = self.list_decks()?;
        find_by_name(&decks, name).cloned()
    }

    /// Cards of a deck, reloaded from disk
    pub fn reload_cards(&self, deck: &Deck) -> Result<Vec<Card>> {
        let deck = self.store.get_deck(deck.id).context("Failed to reload deck")?;
        Ok(deck.cards)
    }
}

/// Exact name first, then a unique prefix
pub fn find_by_name<'a>(decks: &'a [Deck], name: &str) -> Result<&'a Deck> {
    let name_lower = name.to_lowercase();

    if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == name_lower) {
        return Ok(deck);
    }

    let matches: Vec<&Deck> = decks.iter()
        .filter(|d| d.name.to_lowercase().starts_with(&name_lower))
        .collect();

    match matches.len() {
        0 => bail!("No deck matching '{}'. Available decks:\n{}", name,
            decks.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")),
        1 => Ok(matches[0]),
        _ => bail!("Ambiguous deck name '{}'. Matches:\n{}", name,
            matches.iter().map(|d| format!("  - {}", d.name)).collect::<Vec<_>>().join("\n")),
    }
}

/// Resolve a 1-based card position
pub fn card_at(deck: &Deck, position: usize) -> Result<&Card> {
    if position == 0 || position > deck.cards.len() {
        bail!("Card position {} out of range (deck '{}' has {} cards)", position, deck.name, deck.cards.len());
    }
    Ok(&deck.cards[position - 1])
}
