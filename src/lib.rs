pub mod config;
pub mod database;
pub mod error;
pub mod ingest;
pub mod models;

pub use database::store::{Store, TimeSource};
pub use error::{Error, Result};
pub use models::{
    Card, Collection, Grade, Library, LibraryStats, ReviewSession, ScheduleState, Timestamp,
    VocabEntry,
};
