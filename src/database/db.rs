//! Database operations for the vocabulary library
//!
//! Handles SQLite schema initialization, CRUD operations for collections and cards,
//! and SM-2 schedule data management. Every function borrows the connection;
//! ownership of the connection lives in [`super::store::Store`].

use crate::Result;
use crate::models::{
    Card, Collection, Library, MILLIS_PER_DAY, ScheduleState, Timestamp, VocabEntry,
};
use rusqlite::{Connection, OptionalExtension, Row, params};

const CARD_COLUMNS: &str = "c.id, c.word, c.definition, c.example_en, c.example_vn, c.level,
     r.interval_days, r.ease_factor, r.repetitions, r.next_review_at, r.last_reviewed_at";

/// Creates tables for collections, cards, SM-2 review data, and app state.
pub fn init_schema(conn: &Connection) -> Result<()> {
    // Cascading deletes only work with foreign keys enabled per connection
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS cards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection_id INTEGER NOT NULL,
            word TEXT NOT NULL,
            definition TEXT NOT NULL,
            example_en TEXT NOT NULL DEFAULT '',
            example_vn TEXT NOT NULL DEFAULT '',
            level TEXT,
            FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE,
            UNIQUE(collection_id, word)
        )",
        (),
    )?;

    // next_review_at is NULL for cards that are due immediately
    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_data (
            card_id INTEGER PRIMARY KEY,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review_at INTEGER,
            last_reviewed_at INTEGER,
            FOREIGN KEY (card_id) REFERENCES cards(id) ON DELETE CASCADE
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// Seeds the simulated clock with `now` unless it was already initialized.
pub fn init_current_date(now: Timestamp, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![now.to_string()],
    )?;
    Ok(())
}

/// Retrieves current simulated date from database
pub fn get_current_date(conn: &Connection) -> Result<Timestamp> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;

    Ok(value.parse::<Timestamp>().unwrap_or(0))
}

pub fn set_current_date(timestamp: Timestamp, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES ('current_date', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![timestamp.to_string()],
    )?;
    Ok(())
}

/// Advances the simulated date by 24 hours and returns the new date
pub fn advance_day(conn: &Connection) -> Result<Timestamp> {
    let next_day = get_current_date(conn)? + MILLIS_PER_DAY;
    set_current_date(next_day, conn)?;
    Ok(next_day)
}

/// Creates a new collection and returns its ID
pub fn new_collection(name: &str, created_at: Timestamp, conn: &Connection) -> Result<i64> {
    conn.execute(
        "INSERT INTO collections (name, created_at) VALUES (?1, ?2)",
        params![name, created_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Returns the oldest collection with the given name, if any
pub fn find_collection_by_name(name: &str, conn: &Connection) -> Result<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM collections WHERE name = ?1 ORDER BY id LIMIT 1",
            params![name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

pub fn collection_exists(collection_id: i64, conn: &Connection) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT id FROM collections WHERE id = ?1",
            params![collection_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Adds a card to a collection and initializes its SM-2 review data
///
/// Returns the card ID. If the word is already in the collection the existing
/// card is kept, together with its schedule, due to the UNIQUE constraint.
pub fn add_card(
    collection_id: i64,
    entry: &VocabEntry,
    schedule: &ScheduleState,
    conn: &Connection,
) -> Result<i64> {
    conn.execute(
        "INSERT OR IGNORE INTO cards (collection_id, word, definition, example_en, example_vn, level)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            collection_id,
            entry.word,
            entry.definition,
            entry.example_en,
            entry.example_vn,
            entry.level
        ],
    )?;

    let card_id: i64 = conn.query_row(
        "SELECT id FROM cards WHERE collection_id = ?1 AND word = ?2",
        params![collection_id, entry.word],
        |row| row.get(0),
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO review_data
            (card_id, ease_factor, interval_days, repetitions, next_review_at, last_reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            card_id,
            schedule.ease_factor,
            schedule.interval,
            schedule.repetition_count,
            schedule.next_review_at,
            schedule.last_reviewed_at
        ],
    )?;

    Ok(card_id)
}

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<Card> {
    Ok(Card {
        id: row.get(0)?,
        entry: VocabEntry {
            word: row.get(1)?,
            definition: row.get(2)?,
            example_en: row.get(3)?,
            example_vn: row.get(4)?,
            level: row.get(5)?,
        },
        schedule: ScheduleState {
            interval: row.get(6)?,
            ease_factor: row.get(7)?,
            repetition_count: row.get(8)?,
            next_review_at: row.get(9)?,
            last_reviewed_at: row.get(10)?,
        },
    })
}

/// Retrieves all cards of a collection in insertion order
pub fn get_cards_for_collection(collection_id: i64, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS}
         FROM cards c
         JOIN review_data r ON c.id = r.card_id
         WHERE c.collection_id = ?1
         ORDER BY c.id"
    ))?;

    let cards = stmt
        .query_map(params![collection_id], card_from_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;

    Ok(cards)
}

pub fn get_card(card_id: i64, conn: &Connection) -> Result<Option<Card>> {
    let card = conn
        .query_row(
            &format!(
                "SELECT {CARD_COLUMNS}
                 FROM cards c
                 JOIN review_data r ON c.id = r.card_id
                 WHERE c.id = ?1"
            ),
            params![card_id],
            card_from_row,
        )
        .optional()?;
    Ok(card)
}

/// Updates SM-2 review data for a card after it was graded
///
/// Returns the number of rows changed, 0 when the card does not exist.
pub fn update_schedule(card_id: i64, schedule: &ScheduleState, conn: &Connection) -> Result<usize> {
    let changed = conn.execute(
        "UPDATE review_data
         SET ease_factor = ?1, interval_days = ?2, repetitions = ?3,
             next_review_at = ?4, last_reviewed_at = ?5
         WHERE card_id = ?6",
        params![
            schedule.ease_factor,
            schedule.interval,
            schedule.repetition_count,
            schedule.next_review_at,
            schedule.last_reviewed_at,
            card_id
        ],
    )?;

    Ok(changed)
}

/// Retrieves cards due for review across every collection
///
/// Returns cards whose next_review_at is unset or <= now, ordered by
/// collection insertion, then card insertion within each collection.
pub fn get_due_cards(now: Timestamp, conn: &Connection) -> Result<Vec<Card>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS}
         FROM cards c
         JOIN review_data r ON c.id = r.card_id
         WHERE r.next_review_at IS NULL OR r.next_review_at <= ?1
         ORDER BY c.collection_id ASC, c.id ASC"
    ))?;

    let cards = stmt
        .query_map(params![now], card_from_row)?
        .collect::<rusqlite::Result<Vec<Card>>>()?;

    Ok(cards)
}

/// Loads one collection with its cards
pub fn load_collection(collection_id: i64, conn: &Connection) -> Result<Option<Collection>> {
    let header = conn
        .query_row(
            "SELECT name, created_at FROM collections WHERE id = ?1",
            params![collection_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, Timestamp>(1)?)),
        )
        .optional()?;

    let Some((name, created_at)) = header else {
        return Ok(None);
    };

    Ok(Some(Collection {
        id: collection_id,
        name,
        cards: get_cards_for_collection(collection_id, conn)?,
        created_at,
    }))
}

/// Loads all collections with their cards and schedules into memory
pub fn load_library(conn: &Connection) -> Result<Library> {
    let mut stmt = conn.prepare("SELECT id, name, created_at FROM collections ORDER BY id")?;
    let headers = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Timestamp>(2)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut collections = Vec::with_capacity(headers.len());
    for (id, name, created_at) in headers {
        collections.push(Collection {
            id,
            name,
            cards: get_cards_for_collection(id, conn)?,
            created_at,
        });
    }

    Ok(Library { collections })
}

/// Deletes a card; its review data goes with it
pub fn delete_card(card_id: i64, conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM cards WHERE id = ?1", params![card_id])?)
}

/// Deletes a collection with all of its cards
pub fn delete_collection(collection_id: i64, conn: &Connection) -> Result<usize> {
    Ok(conn.execute(
        "DELETE FROM collections WHERE id = ?1",
        params![collection_id],
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Timestamp = 1_700_000_000_000;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = setup();
        assert!(init_schema(&conn).is_ok());
    }

    #[test]
    fn test_current_date_roundtrip() {
        let conn = setup();
        init_current_date(NOW, &conn).unwrap();
        init_current_date(NOW + 5, &conn).unwrap();
        assert_eq!(get_current_date(&conn).unwrap(), NOW);

        assert_eq!(advance_day(&conn).unwrap(), NOW + MILLIS_PER_DAY);
        assert_eq!(get_current_date(&conn).unwrap(), NOW + MILLIS_PER_DAY);
    }

    #[test]
    fn test_add_card_ignores_duplicate_word() {
        let conn = setup();
        let collection = new_collection("Unit 1", NOW, &conn).unwrap();
        let entry = VocabEntry::new("apple", "quả táo");

        let first = add_card(collection, &entry, &ScheduleState::new_at(NOW), &conn).unwrap();
        let reviewed = ScheduleState {
            repetition_count: 3,
            ..ScheduleState::new_at(NOW)
        };
        update_schedule(first, &reviewed, &conn).unwrap();

        let second = add_card(collection, &entry, &ScheduleState::new_at(NOW), &conn).unwrap();
        assert_eq!(first, second);
        assert_eq!(get_cards_for_collection(collection, &conn).unwrap().len(), 1);
        assert_eq!(
            get_card(first, &conn).unwrap().unwrap().schedule.repetition_count,
            3
        );
    }

    #[test]
    fn test_null_next_review_is_due() {
        let conn = setup();
        let collection = new_collection("Unit 1", NOW, &conn).unwrap();
        add_card(collection, &VocabEntry::new("a", "một"), &ScheduleState::default(), &conn).unwrap();

        let due = get_due_cards(NOW, &conn).unwrap();
        assert_eq!(due.len(), 1);
        assert!(due[0].schedule.next_review_at.is_none());
    }

    #[test]
    fn test_delete_collection_cascades() {
        let conn = setup();
        let collection = new_collection("Unit 1", NOW, &conn).unwrap();
        let card = add_card(collection, &VocabEntry::new("a", "một"), &ScheduleState::new_at(NOW), &conn).unwrap();

        assert_eq!(delete_collection(collection, &conn).unwrap(), 1);
        assert!(get_card(card, &conn).unwrap().is_none());

        let orphaned: i64 = conn
            .query_row("SELECT COUNT(*) FROM review_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphaned, 0);
    }
}
