//! Container for all collections the learner owns
use super::{Card, Collection, Timestamp};

#[derive(Clone, Debug, Default)]
pub struct Library {
    pub collections: Vec<Collection>,
}

impl Library {
    pub fn find(&self, collection_id: i64) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == collection_id)
    }

    pub fn find_card(&self, card_id: i64) -> Option<&Card> {
        self.cards().find(|card| card.id == card_id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.collections.iter().flat_map(|c| c.cards.iter())
    }

    /// Due cards across every collection, in collection order then card order.
    pub fn due_cards(&self, now: Timestamp) -> Vec<Card> {
        self.collections
            .iter()
            .flat_map(|c| c.due_cards(now))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MILLIS_PER_DAY, ScheduleState, VocabEntry};

    const NOW: i64 = 1_700_000_000_000;

    fn card(id: i64, next_review_at: Option<i64>) -> Card {
        Card {
            id,
            entry: VocabEntry::new(&format!("word{id}"), "nghĩa"),
            schedule: ScheduleState {
                next_review_at,
                ..ScheduleState::default()
            },
        }
    }

    fn collection(id: i64, cards: Vec<Card>) -> Collection {
        Collection {
            id,
            name: format!("Collection {id}"),
            cards,
            created_at: NOW,
        }
    }

    #[test]
    fn test_due_cards_across_collections_in_order() {
        let library = Library {
            collections: vec![
                collection(1, vec![card(1, None), card(2, Some(NOW + MILLIS_PER_DAY)), card(3, Some(NOW))]),
                collection(2, vec![card(4, Some(NOW + 1)), card(5, Some(NOW - MILLIS_PER_DAY))]),
            ],
        };

        let due: Vec<i64> = library.due_cards(NOW).iter().map(|c| c.id).collect();
        assert_eq!(due, vec![1, 3, 5]);
    }

    #[test]
    fn test_empty_library_has_nothing_due() {
        assert!(Library::default().due_cards(NOW).is_empty());
    }

    #[test]
    fn test_find_card() {
        let library = Library {
            collections: vec![collection(1, vec![card(7, None)])],
        };
        assert_eq!(library.find_card(7).map(|c| c.entry.word.as_str()), Some("word7"));
        assert!(library.find_card(8).is_none());
        assert!(library.find(1).is_some());
    }
}
