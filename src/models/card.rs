//! A saved vocabulary entry together with its review schedule.
use super::{ScheduleState, Timestamp, VocabEntry};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    #[serde(flatten)]
    pub entry: VocabEntry,
    #[serde(flatten)]
    pub schedule: ScheduleState,
}

impl Card {
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.schedule.is_due(now)
    }
}
