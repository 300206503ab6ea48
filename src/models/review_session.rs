//! Review session management for spaced repetition practice.
//! Walks the cards that are due across the library and commits each grade
//! through the store.

use super::{Card, Grade, ScheduleState};
use crate::Result;
use crate::database::store::Store;

/// A single pass over the due cards. Every grade is a passing one, so a
/// graded card leaves the session until the scheduler makes it due again.
pub struct ReviewSession {
    pub cards: Vec<Card>,
    pub current_index: usize,
    pub show_definition: bool,
}

impl ReviewSession {
    pub fn from_due_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            current_index: 0,
            show_definition: false,
        }
    }

    /// Starts a session over everything due right now.
    pub fn start(store: &Store) -> Result<Self> {
        Ok(Self::from_due_cards(store.due_cards()?))
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current_index)
    }

    pub fn toggle_definition(&mut self) {
        self.show_definition = !self.show_definition;
    }

    /// Grades the current card, stores its new schedule and moves on.
    pub fn grade_current_card(&mut self, store: &Store, grade: Grade) -> Result<Option<ScheduleState>> {
        let Some(card) = self.cards.get_mut(self.current_index) else {
            return Ok(None);
        };

        let schedule = store.grade_card(card.id, grade)?;
        card.schedule = schedule.clone();

        self.current_index += 1;
        self.show_definition = false;
        Ok(Some(schedule))
    }

    pub fn reviewed_count(&self) -> usize {
        self.current_index.min(self.cards.len())
    }

    pub fn total_count(&self) -> usize {
        self.cards.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.reviewed_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.cards.len()
    }

    pub fn progress_message(&self) -> String {
        if self.is_completed() {
            format!("Review complete: {} cards", self.total_count())
        } else {
            format!("Card {} of {}", self.current_index + 1, self.total_count())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::store::TimeSource;
    use crate::models::{MILLIS_PER_DAY, VocabEntry};

    const NOW: i64 = 1_700_000_000_000;

    fn store_with_cards() -> Store {
        let store = Store::open_in_memory(TimeSource::Simulated).unwrap();
        store.set_current_time(NOW).unwrap();
        store
            .save_all_to_new_collection(
                "Lesson",
                &[VocabEntry::new("cloud", "đám mây"), VocabEntry::new("rain", "mưa")],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_empty_session_is_completed() {
        let session = ReviewSession::from_due_cards(Vec::new());
        assert!(session.is_completed());
        assert!(session.current_card().is_none());
        assert_eq!(session.remaining_count(), 0);
    }

    #[test]
    fn test_session_walks_due_cards() {
        let store = store_with_cards();
        let mut session = ReviewSession::start(&store).unwrap();
        assert_eq!(session.total_count(), 2);
        assert_eq!(session.progress_message(), "Card 1 of 2");

        session.toggle_definition();
        assert!(session.show_definition);

        let schedule = session.grade_current_card(&store, Grade::Good).unwrap().unwrap();
        assert_eq!(schedule.next_review_at, Some(NOW + MILLIS_PER_DAY));
        assert!(!session.show_definition);
        assert_eq!(session.current_card().unwrap().entry.word, "rain");
        assert_eq!(session.remaining_count(), 1);

        session.grade_current_card(&store, Grade::Easy).unwrap();
        assert!(session.is_completed());
        assert_eq!(session.reviewed_count(), 2);
        assert_eq!(session.progress_message(), "Review complete: 2 cards");
        assert!(session.grade_current_card(&store, Grade::Easy).unwrap().is_none());

        assert!(store.due_cards().unwrap().is_empty());
    }
}
