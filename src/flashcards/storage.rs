//! Storage operations for decks
//!
//! All decks live in a single JSON document:
//! ```text
//! {data-dir}/
//! └── decks.json    # Array of decks, each carrying its cards in order
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use super::models::*;

#[derive(Error, Debug)]
pub enum FlashcardStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Card not found: {0}")]
    CardNotFound(Uuid),

    #[error("Card position {position} out of range for a deck of {len} cards")]
    CardIndexOutOfRange { position: usize, len: usize },

    #[error("Card text must not be empty")]
    EmptyCardText,

    #[error("Deck name must not be empty")]
    EmptyDeckName,
}

pub type Result<T> = std::result::Result<T, FlashcardStorageError>;

/// Storage manager for decks and their cards
pub struct DeckStore {
    /// Directory holding decks.json (e.g., ~/.local/share/flashcards)
    data_dir: PathBuf,
}

impl DeckStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the decks.json path
    fn decks_path(&self) -> PathBuf {
        self.data_dir.join("decks.json")
    }

    /// Load every deck. A missing file means nothing has been saved yet.
    pub fn load(&self) -> Result<Vec<Deck>> {
        let decks_path = self.decks_path();
        if !decks_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&decks_path)?;
        let decks: Vec<Deck> = serde_json::from_str(&content)?;
        Ok(decks)
    }

    /// Replace the stored decks
    pub fn save(&self, decks: &[Deck]) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        // Write next to the target, then rename over it
        let decks_path = self.decks_path();
        let tmp_path = decks_path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(decks)?)?;
        fs::rename(&tmp_path, &decks_path)?;

        log::info!("Saved {} decks to {:?}", decks.len(), decks_path);
        Ok(())
    }

    /// Load, apply `f` to the deck with `deck_id`, and save
    fn modify_deck<T>(&self, deck_id: Uuid, f: impl FnOnce(&mut Deck) -> Result<T>) -> Result<T> {
        let mut decks = self.load()?;
        let deck = decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))?;

        let value = f(deck)?;
        deck.touch();

        self.save(&decks)?;
        Ok(value)
    }

    // ==================== Deck Operations ====================

    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.load()
    }

    pub fn get_deck(&self, deck_id: Uuid) -> Result<Deck> {
        self.load()?
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or(FlashcardStorageError::DeckNotFound(deck_id))
    }

    pub fn create_deck(&self, name: String) -> Result<Deck> {
        let name = validate_deck_name(name)?;

        let deck = Deck::new(name);
        let mut decks = self.load()?;
        decks.push(deck.clone());
        self.save(&decks)?;

        Ok(deck)
    }

    pub fn rename_deck(&self, deck_id: Uuid, name: String) -> Result<Deck> {
        let name = validate_deck_name(name)?;
        self.modify_deck(deck_id, |deck| {
            deck.name = name;
            Ok(())
        })?;
        self.get_deck(deck_id)
    }

    /// Delete a deck and all its cards
    pub fn delete_deck(&self, deck_id: Uuid) -> Result<()> {
        let mut decks = self.load()?;
        let before = decks.len();
        decks.retain(|d| d.id != deck_id);
        if decks.len() == before {
            return Err(FlashcardStorageError::DeckNotFound(deck_id));
        }

        self.save(&decks)
    }

    // ==================== Card Operations ====================

    /// Append a card to the end of a deck. Both faces need text.
    pub fn add_card(&self, deck_id: Uuid, front: String, back: String) -> Result<Card> {
        let (front, back) = validate_card_text(front, back)?;
        let card = Card::new(front, back);

        let added = card.clone();
        self.modify_deck(deck_id, move |deck| {
            deck.cards.push(card);
            Ok(())
        })?;

        Ok(added)
    }

    /// Append several cards. An empty face anywhere rejects the whole batch.
    pub fn add_cards(&self, deck_id: Uuid, pairs: Vec<(String, String)>) -> Result<Vec<Card>> {
        let cards = pairs
            .into_iter()
            .map(|(front, back)| validate_card_text(front, back).map(|(f, b)| Card::new(f, b)))
            .collect::<Result<Vec<_>>>()?;

        let added = cards.clone();
        self.modify_deck(deck_id, move |deck| {
            deck.cards.extend(cards);
            Ok(())
        })?;

        Ok(added)
    }

    /// Replace the text of a card. `None` keeps the current face.
    pub fn update_card(
        &self,
        deck_id: Uuid,
        card_id: Uuid,
        front: Option<String>,
        back: Option<String>,
    ) -> Result<Card> {
        self.modify_deck(deck_id, |deck| {
            let card = deck
                .cards
                .iter_mut()
                .find(|c| c.id == card_id)
                .ok_or(FlashcardStorageError::CardNotFound(card_id))?;

            let (front, back) = validate_card_text(
                front.unwrap_or_else(|| card.front.clone()),
                back.unwrap_or_else(|| card.back.clone()),
            )?;
            card.front = front;
            card.back = back;
            Ok(card.clone())
        })
    }

    pub fn remove_card(&self, deck_id: Uuid, card_id: Uuid) -> Result<Card> {
        self.modify_deck(deck_id, |deck| {
            let pos = deck
                .cards
                .iter()
                .position(|c| c.id == card_id)
                .ok_or(FlashcardStorageError::CardNotFound(card_id))?;
            Ok(deck.cards.remove(pos))
        })
    }

    /// Move the card at position `from` so it ends up at position `to`
    pub fn move_card(&self, deck_id: Uuid, from: usize, to: usize) -> Result<()> {
        self.modify_deck(deck_id, |deck| {
            let len = deck.cards.len();
            for position in [from, to] {
                if position >= len {
                    return Err(FlashcardStorageError::CardIndexOutOfRange { position, len });
                }
            }

            let card = deck.cards.remove(from);
            deck.cards.insert(to, card);
            Ok(())
        })
    }
}

fn validate_deck_name(name: String) -> Result<String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(FlashcardStorageError::EmptyDeckName);
    }
    Ok(name)
}

fn validate_card_text(front: String, back: String) -> Result<(String, String)> {
    if front.trim().is_empty() || back.trim().is_empty() {
        return Err(FlashcardStorageError::EmptyCardText);
    }
    Ok((front, back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (DeckStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = DeckStore::new(temp_dir.path().join("flashcards"));
        (store, temp_dir)
    }

    fn fronts(deck: &Deck) -> Vec<&str> {
        deck.cards.iter().map(|c| c.front.as_str()).collect()
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (store, _temp) = create_test_store();
        fs::create_dir_all(store.data_dir()).unwrap();
        fs::write(store.decks_path(), "not json").unwrap();

        assert!(matches!(store.load(), Err(FlashcardStorageError::Json(_))));
    }

    #[test]
    fn test_create_deck_and_add_cards() {
        let (store, _temp) = create_test_store();

        let deck = store.create_deck("tarea #1".to_string()).unwrap();
        store.add_card(deck.id, "hrana".to_string(), "comida".to_string()).unwrap();
        store.add_card(deck.id, "jabuka".to_string(), "manzana".to_string()).unwrap();

        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name, "tarea #1");
        assert_eq!(fronts(&decks[0]), vec!["hrana", "jabuka"]);
    }

    #[test]
    fn test_empty_text_rejected() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("words".to_string()).unwrap();

        let result = store.add_card(deck.id, "zena".to_string(), "  ".to_string());
        assert!(matches!(result, Err(FlashcardStorageError::EmptyCardText)));

        let result = store.create_deck(" ".to_string());
        assert!(matches!(result, Err(FlashcardStorageError::EmptyDeckName)));

        assert!(store.get_deck(deck.id).unwrap().is_empty());
    }

    #[test]
    fn test_add_cards_batch_is_all_or_nothing() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("words".to_string()).unwrap();

        let result = store.add_cards(
            deck.id,
            vec![
                ("a".to_string(), "b".to_string()),
                ("c".to_string(), String::new()),
            ],
        );
        assert!(result.is_err());
        assert!(store.get_deck(deck.id).unwrap().is_empty());

        let added = store
            .add_cards(deck.id, vec![("a".to_string(), "b".to_string())])
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(store.get_deck(deck.id).unwrap().len(), 1);
    }

    #[test]
    fn test_update_card_keeps_unspecified_face() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("words".to_string()).unwrap();
        let card = store.add_card(deck.id, "zena".to_string(), "hombre".to_string()).unwrap();

        let updated = store
            .update_card(deck.id, card.id, None, Some("mujer".to_string()))
            .unwrap();
        assert_eq!(updated.id, card.id);
        assert_eq!(updated.front, "zena");
        assert_eq!(updated.back, "mujer");

        let missing = store.update_card(deck.id, Uuid::new_v4(), None, None);
        assert!(matches!(missing, Err(FlashcardStorageError::CardNotFound(_))));
    }

    #[test]
    fn test_move_and_remove_cards() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("letters".to_string()).unwrap();
        for letter in ["a", "b", "c"] {
            store.add_card(deck.id, letter.to_string(), letter.to_uppercase()).unwrap();
        }

        store.move_card(deck.id, 0, 2).unwrap();
        let moved = store.get_deck(deck.id).unwrap();
        assert_eq!(fronts(&moved), vec!["b", "c", "a"]);

        let out_of_range = store.move_card(deck.id, 0, 3);
        assert!(matches!(
            out_of_range,
            Err(FlashcardStorageError::CardIndexOutOfRange { position: 3, len: 3 })
        ));

        let removed = store.remove_card(deck.id, moved.cards[1].id).unwrap();
        assert_eq!(removed.front, "c");
        assert_eq!(fronts(&store.get_deck(deck.id).unwrap()), vec!["b", "a"]);
    }

    #[test]
    fn test_rename_and_delete_deck() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("old".to_string()).unwrap();
        let other = store.create_deck("other".to_string()).unwrap();

        let renamed = store.rename_deck(deck.id, "  new ".to_string()).unwrap();
        assert_eq!(renamed.name, "new");
        assert!(renamed.updated_at >= deck.updated_at);

        store.delete_deck(deck.id).unwrap();
        let decks = store.list_decks().unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].id, other.id);

        assert!(matches!(
            store.delete_deck(deck.id),
            Err(FlashcardStorageError::DeckNotFound(_))
        ));
    }

    #[test]
    fn test_card_ids_survive_round_trip() {
        let (store, _temp) = create_test_store();
        let deck = store.create_deck("words".to_string()).unwrap();
        let card = store.add_card(deck.id, "same".to_string(), "same".to_string()).unwrap();
        let twin = store.add_card(deck.id, "same".to_string(), "same".to_string()).unwrap();

        let loaded = store.get_deck(deck.id).unwrap();
        assert_eq!(loaded.cards[0].id, card.id);
        assert_eq!(loaded.cards[1].id, twin.id);
        assert_ne!(card.id, twin.id);
    }
}
