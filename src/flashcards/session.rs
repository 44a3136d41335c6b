//! Staged learning queue
//!
//! A Leitner-style scheduler. Cards start shuffled in stage 0 and move one
//! stage up on every correct answer and one stage down on every miss. A card
//! answered correctly while in the last stage graduates and leaves the session.
//!
//! The learner always drills the *active* stage. When it runs dry the session
//! steps back to the previous stage if that one holds cards, otherwise forward
//! to the next one, and the newly active stage is reshuffled.
//!
//! Stage movement is purely rank based; no review dates are involved.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Number of stages a session uses unless configured otherwise
pub const DEFAULT_STAGE_COUNT: usize = 4;

/// Number of cards a front end shows stacked from the head of the active stage
pub const DEFAULT_PEEK_DEPTH: usize = 4;

/// Source of the permutations applied to stages
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Uniform shuffling backed by a `rand` generator
#[derive(Debug, Clone)]
pub struct RandomShuffler<R = StdRng> {
    rng: R,
}

impl RandomShuffler<StdRng> {
    /// Entropy-seeded shuffler; every session gets a fresh order
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible shuffler for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for RandomShuffler<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomShuffler<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Shuffler for RandomShuffler<R> {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Leaves every stage in insertion order
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl Shuffler for KeepOrder {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}

/// Where a judged card ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Answered correctly in the last stage
    Graduated,
    /// Moved up to `to`
    Promoted { to: usize },
    /// Moved down to `to`
    Demoted { to: usize },
    /// Missed in stage 0 and sent to the back of it
    Requeued,
}

/// Coarse state of a session, for choosing what to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    /// The deck had no cards to begin with
    Empty,
    InProgress,
    /// Every card graduated
    Learned,
}

/// Snapshot of a session for progress displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProgress {
    pub stage_sizes: Vec<usize>,
    pub graduated: usize,
    pub current_stage: usize,
    pub total_cards: usize,
    pub generation: u64,
    pub status: SessionStatus,
}

/// One run of the staged learning queue over a snapshot of a deck
#[derive(Debug, Clone)]
pub struct LearningSession<C, S = RandomShuffler> {
    stages: Vec<VecDeque<C>>,
    current_stage: usize,
    graduated_count: usize,
    total_cards: usize,
    generation: u64,
    shuffler: S,
}

impl<C> LearningSession<C, RandomShuffler> {
    /// Start a session with the default stage count and an entropy-seeded shuffle
    pub fn new(cards: impl IntoIterator<Item = C>) -> Self {
        Self::with_shuffler(cards, RandomShuffler::new())
    }
}

impl<C, S: Shuffler> LearningSession<C, S> {
    pub fn with_shuffler(cards: impl IntoIterator<Item = C>, shuffler: S) -> Self {
        Self::with_stage_count(cards, DEFAULT_STAGE_COUNT, shuffler)
    }

    /// Start a session with `stage_count` stages.
    ///
    /// # Panics
    /// If `stage_count` is zero.
    pub fn with_stage_count(
        cards: impl IntoIterator<Item = C>,
        stage_count: usize,
        shuffler: S,
    ) -> Self {
        assert!(stage_count >= 1, "a learning session needs at least one stage");

        let mut session = Self {
            stages: (0..stage_count).map(|_| VecDeque::new()).collect(),
            current_stage: 0,
            graduated_count: 0,
            total_cards: 0,
            generation: 0,
            shuffler,
        };
        session.fill(cards);
        log::info!(
            "Started learning session: {} cards across {} stages",
            session.total_cards,
            stage_count
        );
        session
    }

    /// Put every card into stage 0 in random order and clear the rest
    fn fill(&mut self, cards: impl IntoIterator<Item = C>) {
        for stage in &mut self.stages {
            stage.clear();
        }

        let mut first: VecDeque<C> = cards.into_iter().collect();
        self.shuffler.shuffle(first.make_contiguous());

        self.total_cards = first.len();
        self.stages[0] = first;
        self.current_stage = 0;
        self.graduated_count = 0;
    }

    /// Reinitialize in place from `cards`, keeping the stage count.
    ///
    /// Returns the new generation. Front ends key transient per-card view state
    /// on it and drop whatever belonged to an older generation.
    pub fn reset(&mut self, cards: impl IntoIterator<Item = C>) -> u64 {
        self.fill(cards);
        self.generation += 1;
        log::info!(
            "Reset learning session: generation {}, {} cards",
            self.generation,
            self.total_cards
        );
        self.generation
    }

    /// Apply the learner's judgment to the front card of the active stage.
    ///
    /// # Panics
    /// If the active stage is empty. Callers check [`is_complete`](Self::is_complete)
    /// before judging.
    pub fn judge(&mut self, correct: bool) -> Transition {
        let current = self.current_stage;
        let last = self.last_stage();

        let Some(card) = self.stages[current].pop_front() else {
            panic!("judged an exhausted learning session (stage {current} is empty)");
        };

        let transition = if correct {
            if current == last {
                self.graduated_count += 1;
                Transition::Graduated
            } else {
                self.stages[current + 1].push_back(card);
                Transition::Promoted { to: current + 1 }
            }
        } else if current > 0 {
            self.stages[current - 1].push_back(card);
            Transition::Demoted { to: current - 1 }
        } else {
            self.stages[current].push_back(card);
            Transition::Requeued
        };

        if self.stages[current].is_empty() {
            // Previous stage wins over the next one
            if current > 0 && !self.stages[current - 1].is_empty() {
                self.activate(current - 1);
            } else if current < last {
                self.activate(current + 1);
            }
        }

        log::debug!(
            "Judged card (correct: {}): {:?}, active stage {}, graduated {}/{}",
            correct,
            transition,
            self.current_stage,
            self.graduated_count,
            self.total_cards
        );

        transition
    }

    fn activate(&mut self, stage: usize) {
        self.current_stage = stage;
        self.shuffler.shuffle(self.stages[stage].make_contiguous());
    }

    fn last_stage(&self) -> usize {
        self.stages.len() - 1
    }

    /// True once every card graduated. Also true for an empty deck; use
    /// [`status`](Self::status) to tell the two apart.
    pub fn is_complete(&self) -> bool {
        self.graduated_count == self.total_cards
    }

    pub fn status(&self) -> SessionStatus {
        if self.total_cards == 0 {
            SessionStatus::Empty
        } else if self.is_complete() {
            SessionStatus::Learned
        } else {
            SessionStatus::InProgress
        }
    }

    /// Up to `n` cards from the head of the active stage, front first
    pub fn peek_front(&self, n: usize) -> Vec<&C> {
        self.stages[self.current_stage].iter().take(n).collect()
    }

    /// The card the learner is being asked about
    pub fn front(&self) -> Option<&C> {
        self.stages[self.current_stage].front()
    }

    pub fn stage_sizes(&self) -> Vec<usize> {
        self.stages.iter().map(VecDeque::len).collect()
    }

    pub fn graduated_count(&self) -> usize {
        self.graduated_count
    }

    pub fn current_stage_index(&self) -> usize {
        self.current_stage
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            stage_sizes: self.stage_sizes(),
            graduated: self.graduated_count,
            current_stage: self.current_stage,
            total_cards: self.total_cards,
            generation: self.generation,
            status: self.status(),
        }
    }
}
