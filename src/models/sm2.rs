//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an ease factor (EF) that adjusts based on performance
//! - Quality grades 0-2: restart the card (1 day, repetition count back to 0)
//! - Quality grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3
//!
//! Learners only ever pick hard/good/easy, which map to qualities 3-5, so the
//! restart branch is reachable only through [`calculate_next_review`] directly.

use super::schedule::{MILLIS_PER_DAY, MIN_EASE_FACTOR, ScheduleState, Timestamp};
use super::Grade;

/// Lowest quality that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

/// Schedules the next review of a card graded by the learner at `now`.
pub fn schedule_review(state: &ScheduleState, grade: Grade, now: Timestamp) -> ScheduleState {
    calculate_next_review(state, grade.quality(), now)
}

/// Calculates new schedule state according to the SM-2 algorithm.
/// quality: 0-5 (0 = complete blackout, 5 = perfect response)
pub fn calculate_next_review(state: &ScheduleState, quality: u8, now: Timestamp) -> ScheduleState {
    let quality = quality.min(5);

    // The interval grows by the ease factor held before this review
    let (interval, repetition_count) = if quality >= PASSING_QUALITY {
        let interval = match state.repetition_count {
            0 => 1,
            1 => 6,
            _ => (state.interval as f64 * state.ease_factor).round() as u32,
        };
        (interval, state.repetition_count + 1)
    } else {
        (1, 0)
    };

    let q = quality as f64;
    let ease_factor = (state.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASE_FACTOR);

    ScheduleState {
        interval,
        ease_factor,
        repetition_count,
        next_review_at: Some(now + interval as i64 * MILLIS_PER_DAY),
        last_reviewed_at: Some(now),
    }
}
