//! Collection is a named set of saved cards
use super::{Card, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub name: String,
    pub cards: Vec<Card>,
    pub created_at: Timestamp,
}

impl Collection {
    pub fn due_cards(&self, now: Timestamp) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |card| card.is_due(now))
    }
}
