//! Library-wide learning progress counters.
use super::{Card, Timestamp};
use serde::Serialize;

/// Cards reviewed successfully more times than this count as mastered.
pub const DEFAULT_MASTERED_AFTER: u32 = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub mastered: usize,
    /// Cards with a scheduled review at or before now. Cards that were never
    /// scheduled are due but not counted here.
    pub due_today: usize,
}

impl LibraryStats {
    pub fn from_cards<'a>(
        cards: impl IntoIterator<Item = &'a Card>,
        now: Timestamp,
        mastered_after: u32,
    ) -> Self {
        let mut stats = Self::default();
        for card in cards {
            let reps = card.schedule.repetition_count;
            stats.total += 1;
            if reps == 0 {
                stats.new += 1;
            } else if reps <= mastered_after {
                stats.learning += 1;
            } else {
                stats.mastered += 1;
            }
            if card.schedule.next_review_at.is_some_and(|at| at <= now) {
                stats.due_today += 1;
            }
        }
        stats
    }

    /// Share of the library in `count`, as a whole percentage.
    pub fn percent_of_total(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((count as f64 / self.total as f64) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScheduleState, VocabEntry};

    const NOW: i64 = 1_700_000_000_000;

    fn card(repetition_count: u32, next_review_at: Option<i64>) -> Card {
        Card {
            id: 0,
            entry: VocabEntry::new("word", "từ"),
            schedule: ScheduleState {
                repetition_count,
                next_review_at,
                ..ScheduleState::default()
            },
        }
    }

    #[test]
    fn test_buckets() {
        let cards = vec![
            card(0, None),
            card(0, Some(NOW)),
            card(1, Some(NOW + 1)),
            card(5, Some(NOW - 1)),
            card(6, Some(NOW + 1000)),
        ];

        let stats = LibraryStats::from_cards(&cards, NOW, DEFAULT_MASTERED_AFTER);
        assert_eq!(
            stats,
            LibraryStats {
                total: 5,
                new: 2,
                learning: 2,
                mastered: 1,
                due_today: 2,
            }
        );
        assert_eq!(stats.percent_of_total(stats.new), 40);
    }

    #[test]
    fn test_empty_library() {
        let cards: Vec<Card> = Vec::new();
        let stats = LibraryStats::from_cards(&cards, NOW, DEFAULT_MASTERED_AFTER);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.percent_of_total(stats.mastered), 0);
    }

    #[test]
    fn test_custom_mastery_threshold() {
        let cards = vec![card(2, None), card(3, None)];
        let stats = LibraryStats::from_cards(&cards, NOW, 2);
        assert_eq!(stats.learning, 1);
        assert_eq!(stats.mastered, 1);
    }
}
