//! Per-card spaced repetition state.
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

pub const MILLIS_PER_DAY: i64 = 86_400_000;
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleState {
    /// Days until the next review. 0 means due now.
    pub interval: u32,
    pub ease_factor: f64,
    pub repetition_count: u32,
    /// `None` means the card is due immediately.
    pub next_review_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            repetition_count: 0,
            next_review_at: None,
            last_reviewed_at: None,
        }
    }
}

impl ScheduleState {
    /// State of a card saved at `now`: default values, due immediately.
    pub fn new_at(now: Timestamp) -> Self {
        Self {
            next_review_at: Some(now),
            ..Self::default()
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review_at {
            None => true,
            Some(at) => at <= now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000_000;

    #[test]
    fn test_defaults() {
        let state = ScheduleState::default();
        assert_eq!(state.interval, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.repetition_count, 0);
        assert!(state.next_review_at.is_none());
        assert!(state.last_reviewed_at.is_none());
    }

    #[test]
    fn test_absent_next_review_is_due() {
        assert!(ScheduleState::default().is_due(NOW));
    }

    #[test]
    fn test_past_next_review_is_due() {
        let state = ScheduleState {
            next_review_at: Some(NOW - 1),
            ..ScheduleState::default()
        };
        assert!(state.is_due(NOW));
        assert!(ScheduleState::new_at(NOW).is_due(NOW));
    }

    #[test]
    fn test_future_next_review_is_not_due() {
        let state = ScheduleState {
            next_review_at: Some(NOW + MILLIS_PER_DAY),
            ..ScheduleState::default()
        };
        assert!(!state.is_due(NOW));
    }
}
