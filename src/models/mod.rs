pub mod card;
pub mod collection;
pub mod grade;
pub mod library;
pub mod review_session;
pub mod schedule;
pub mod sm2;
pub mod stats;
pub mod vocab_entry;

pub use card::Card;
pub use collection::Collection;
pub use grade::{Grade, ParseGradeError};
pub use library::Library;
pub use review_session::ReviewSession;
pub use schedule::{MILLIS_PER_DAY, ScheduleState, Timestamp};
pub use stats::LibraryStats;
pub use vocab_entry::VocabEntry;
