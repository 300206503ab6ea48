//! The learner's library as a service object.
//!
//! `Store` owns the SQLite connection and is the only place where schedule
//! state is committed. Grading reads the card, runs the SM-2 scheduler and
//! writes the new schedule back; vocabulary fields are never touched.

use super::db;
use crate::models::{
    Card, Collection, Grade, Library, ScheduleState, Timestamp, VocabEntry, sm2,
};
use crate::{Error, Result};
use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

pub const DEFAULT_QUICK_SAVES: &str = "Quick Saves";
pub const UNTITLED_COLLECTION: &str = "Untitled List";

/// Where the store reads "now" from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// Real wall-clock time
    #[default]
    Wall,
    /// A date persisted in the database, moved forward with [`Store::advance_day`]
    Simulated,
}

pub struct Store {
    conn: Connection,
    time_source: TimeSource,
    quick_saves: String,
}

impl Store {
    /// Opens (or creates) the library database at `path`.
    pub fn open(path: impl AsRef<Path>, time_source: TimeSource) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("Opening library at {}", path.display());
        Self::with_connection(Connection::open(path)?, time_source)
    }

    pub fn open_in_memory(time_source: TimeSource) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, time_source)
    }

    fn with_connection(conn: Connection, time_source: TimeSource) -> Result<Self> {
        db::init_schema(&conn)?;
        db::init_current_date(wall_clock(), &conn)?;
        Ok(Self {
            conn,
            time_source,
            quick_saves: DEFAULT_QUICK_SAVES.to_string(),
        })
    }

    /// Name of the collection single entries are saved into.
    pub fn with_quick_saves_name(mut self, name: &str) -> Self {
        self.quick_saves = name.to_string();
        self
    }

    pub fn time_source(&self) -> TimeSource {
        self.time_source
    }

    pub fn current_time(&self) -> Result<Timestamp> {
        match self.time_source {
            TimeSource::Wall => Ok(wall_clock()),
            TimeSource::Simulated => db::get_current_date(&self.conn),
        }
    }

    /// Moves the simulated clock forward by one day.
    pub fn advance_day(&self) -> Result<Timestamp> {
        self.require_simulated("advance the day")?;
        let now = db::advance_day(&self.conn)?;
        info!("Simulated date advanced to {}", now);
        Ok(now)
    }

    pub fn set_current_time(&self, timestamp: Timestamp) -> Result<()> {
        self.require_simulated("set the date")?;
        db::set_current_date(timestamp, &self.conn)
    }

    fn require_simulated(&self, action: &str) -> Result<()> {
        if self.time_source != TimeSource::Simulated {
            return Err(Error::InvalidInput(format!(
                "cannot {action} while using the wall clock"
            )));
        }
        Ok(())
    }

    pub fn create_collection(&self, name: &str) -> Result<i64> {
        let id = db::new_collection(name, self.current_time()?, &self.conn)?;
        info!("Collection '{}' created with id {}", name, id);
        Ok(id)
    }

    /// Saves one entry into a collection with a fresh schedule.
    pub fn save_entry(&self, collection_id: i64, entry: &VocabEntry) -> Result<i64> {
        if !db::collection_exists(collection_id, &self.conn)? {
            return Err(Error::NotFound(format!("collection {collection_id}")));
        }
        let now = self.current_time()?;
        let card_id = db::add_card(collection_id, entry, &ScheduleState::new_at(now), &self.conn)?;
        debug!("Saved '{}' as card {}", entry.word, card_id);
        Ok(card_id)
    }

    /// Saves a whole extraction run as a new collection.
    ///
    /// Returns `None` without touching the library when there is nothing to save.
    pub fn save_all_to_new_collection(
        &self,
        name: &str,
        entries: &[VocabEntry],
    ) -> Result<Option<i64>> {
        if entries.is_empty() {
            return Ok(None);
        }

        let name = match name.trim() {
            "" => UNTITLED_COLLECTION,
            trimmed => trimmed,
        };
        let now = self.current_time()?;

        let tx = self.conn.unchecked_transaction()?;
        let collection_id = db::new_collection(name, now, &tx)?;
        for entry in entries {
            db::add_card(collection_id, entry, &ScheduleState::new_at(now), &tx)?;
        }
        tx.commit()?;

        info!(
            "Saved {} entries to new collection '{}' ({})",
            entries.len(),
            name,
            collection_id
        );
        Ok(Some(collection_id))
    }

    /// Saves one entry into the quick-saves collection, creating it on first use.
    pub fn quick_save(&self, entry: &VocabEntry) -> Result<i64> {
        let collection_id = match db::find_collection_by_name(&self.quick_saves, &self.conn)? {
            Some(id) => id,
            None => self.create_collection(&self.quick_saves)?,
        };
        self.save_entry(collection_id, entry)
    }

    pub fn load_library(&self) -> Result<Library> {
        db::load_library(&self.conn)
    }

    pub fn load_collection(&self, collection_id: i64) -> Result<Collection> {
        db::load_collection(collection_id, &self.conn)?
            .ok_or_else(|| Error::NotFound(format!("collection {collection_id}")))
    }

    pub fn card(&self, card_id: i64) -> Result<Card> {
        db::get_card(card_id, &self.conn)?.ok_or_else(|| Error::NotFound(format!("card {card_id}")))
    }

    /// Cards due now across the whole library.
    pub fn due_cards(&self) -> Result<Vec<Card>> {
        db::get_due_cards(self.current_time()?, &self.conn)
    }

    /// Records a grade for a card and commits its new schedule.
    pub fn grade_card(&self, card_id: i64, grade: Grade) -> Result<ScheduleState> {
        let card = self.card(card_id)?;
        let now = self.current_time()?;
        let schedule = sm2::schedule_review(&card.schedule, grade, now);

        db::update_schedule(card_id, &schedule, &self.conn)?;
        debug!(
            card_id,
            %grade,
            interval = schedule.interval,
            ease_factor = schedule.ease_factor,
            "Card graded"
        );
        Ok(schedule)
    }

    pub fn delete_card(&self, card_id: i64) -> Result<()> {
        if db::delete_card(card_id, &self.conn)? == 0 {
            return Err(Error::NotFound(format!("card {card_id}")));
        }
        info!("Card {} deleted", card_id);
        Ok(())
    }

    pub fn delete_collection(&self, collection_id: i64) -> Result<()> {
        if db::delete_collection(collection_id, &self.conn)? == 0 {
            return Err(Error::NotFound(format!("collection {collection_id}")));
        }
        info!("Collection {} deleted", collection_id);
        Ok(())
    }
}

fn wall_clock() -> Timestamp {
    Utc::now().timestamp_millis()
}
