//! Data models for decks and cards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A flashcard with a front and a back face
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "frontText")]
    pub front: String,
    #[serde(alias = "backText")]
    pub back: String,
}

impl Card {
    pub fn new(front: String, back: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
        }
    }

    /// Text shown first when studying with `side` facing up
    pub fn prompt(&self, side: CardSide) -> &str {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }

    /// Text revealed after the prompt
    pub fn answer(&self, side: CardSide) -> &str {
        self.prompt(side.flipped())
    }
}

/// Which face of the cards is shown first during a study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardSide {
    #[default]
    Front,
    Back,
}

impl CardSide {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// A named, ordered collection of cards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Mark the deck as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_and_answer_follow_side() {
        let card = Card::new("hrana".to_string(), "comida".to_string());

        assert_eq!(card.prompt(CardSide::Front), "hrana");
        assert_eq!(card.answer(CardSide::Front), "comida");
        assert_eq!(card.prompt(CardSide::Back), "comida");
        assert_eq!(card.answer(CardSide::Back), "hrana");
    }

    #[test]
    fn test_deck_deserializes_without_ids_or_timestamps() {
        let json = r#"{"name":"tarea #1","cards":[{"front":"jabuka","back":"manzana"}]}"#;
        let deck: Deck = serde_json::from_str(json).unwrap();

        assert_eq!(deck.name, "tarea #1");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.cards[0].back, "manzana");
    }

    #[test]
    fn test_deck_loads_front_text_back_text_fields() {
        let json = r#"[{"id":"3f2b1c9e-8a4d-4e7f-9c1a-2b3d4e5f6a7b","name":"tarea #1","cards":[{"id":"0c4f5e6d-7a8b-4c9d-8e1f-2a3b4c5d6e7f","frontText":"zena","backText":"mujer"}]}]"#;
        let decks: Vec<Deck> = serde_json::from_str(json).unwrap();

        assert_eq!(decks[0].cards[0].front, "zena");
        assert_eq!(decks[0].cards[0].back, "mujer");
    }

    #[test]
    fn test_card_side_serializes_camel_case() {
        assert_eq!(serde_json::to_value(CardSide::Back).unwrap(), "back");
        let side: CardSide = serde_json::from_str("\"front\"").unwrap();
        assert_eq!(side, CardSide::Front);
    }

    #[test]
    fn test_deck_serializes_camel_case() {
        let deck = Deck::new("words".to_string());
        let value = serde_json::to_value(&deck).unwrap();

        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("created_at").is_none());
    }
}
