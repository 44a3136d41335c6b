//! Flashcard decks and the staged learning queue
//!
//! This module provides:
//! - Deck and card models
//! - JSON-backed deck storage and editing
//! - The staged learning queue that drives a study session

pub mod models;
pub mod session;
pub mod storage;

pub use models::*;
pub use session::{
    KeepOrder, LearningSession, RandomShuffler, SessionProgress, SessionStatus, Shuffler, Transition,
    DEFAULT_PEEK_DEPTH, DEFAULT_STAGE_COUNT,
};
pub use storage::{DeckStore, FlashcardStorageError};
