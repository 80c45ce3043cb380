//! Glossa Storage Layer
//!
//! Implements the VocabularyStore trait on top of an embedded SQLite database.
//!
//! # Architecture
//!
//! - One `vocabulary` table with a UNIQUE constraint on `text`
//! - A single connection behind a mutex, so one `SqliteStore` can be shared
//!   (via `Arc`) between concurrent pipeline runs
//! - WAL journaling for file-backed databases so other processes can read
//!   while a run is writing
//!
//! # Examples
//!
//! ```
//! use glossa_store::SqliteStore;
//! use glossa_domain::traits::VocabularyStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! let id = store.insert("hola", "Spanish").unwrap();
//! assert!(store.exists_text("hola").unwrap());
//! assert_eq!(store.get(id).unwrap().unwrap().text, "hola");
//! ```

#![warn(missing_docs)]

use glossa_domain::traits::VocabularyStore;
use glossa_domain::{VocabularyId, VocabularyItem};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// How long a writer waits on a locked database file before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_COLUMNS: &str = "SELECT id, text, language, created_at FROM vocabulary";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The text is already stored
    #[error("Vocabulary text already exists: {0}")]
    DuplicateText(String),

    /// No item with the given ID
    #[error("Vocabulary with ID {0} not found")]
    NotFound(VocabularyId),

    /// Another thread panicked while holding the connection
    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

/// SQLite-based implementation of VocabularyStore
///
/// # Thread Safety
///
/// The connection is guarded by a mutex, so the store is `Send + Sync` and is
/// meant to be shared behind an `Arc`. The lock is held per statement, not
/// across an existence check and the following insert.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use glossa_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("glossa.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let in_memory = path.as_ref().as_os_str() == ":memory:";
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        if !in_memory {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.lock()?.execute_batch(schema)?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<VocabularyItem> {
        Ok(VocabularyItem {
            id: VocabularyId::from_value(row.get(0)?),
            text: row.get(1)?,
            language: row.get(2)?,
            created_at: row.get::<_, i64>(3)? as u64,
        })
    }

    fn query_items(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<VocabularyItem>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        let items = stmt
            .query_map(params, Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }
}

impl VocabularyStore for SqliteStore {
    type Error = StoreError;

    fn insert(&self, text: &str, language: &str) -> Result<VocabularyId, Self::Error> {
        let conn = self.lock()?;
        let inserted = conn.execute(
            "INSERT INTO vocabulary (text, language, created_at) VALUES (?1, ?2, ?3)",
            params![text, language, Self::now_secs() as i64],
        );

        match inserted {
            Ok(_) => {
                let id = VocabularyId::from_value(conn.last_insert_rowid());
                debug!("Inserted vocabulary {} ({})", id, text);
                Ok(id)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateText(text.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn exists_text(&self, text: &str) -> Result<bool, Self::Error> {
        let exists = self
            .lock()?
            .query_row(
                "SELECT 1 FROM vocabulary WHERE text = ?1",
                params![text],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn get(&self, id: VocabularyId) -> Result<Option<VocabularyItem>, Self::Error> {
        let item = self
            .lock()?
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id.value()],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    fn get_by_text(&self, text: &str) -> Result<Option<VocabularyItem>, Self::Error> {
        let item = self
            .lock()?
            .query_row(
                &format!("{} WHERE text = ?1", SELECT_COLUMNS),
                params![text],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    fn list(&self) -> Result<Vec<VocabularyItem>, Self::Error> {
        self.query_items(
            &format!("{} ORDER BY created_at DESC, id DESC", SELECT_COLUMNS),
            &[],
        )
    }

    fn list_by_language(&self, language: &str) -> Result<Vec<VocabularyItem>, Self::Error> {
        self.query_items(
            &format!(
                "{} WHERE language = ?1 ORDER BY created_at DESC, id DESC",
                SELECT_COLUMNS
            ),
            &[&language],
        )
    }

    fn delete(&self, id: VocabularyId) -> Result<(), Self::Error> {
        let affected = self
            .lock()?
            .execute("DELETE FROM vocabulary WHERE id = ?1", params![id.value()])?;

        if affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    fn count(&self) -> Result<usize, Self::Error> {
        let count: i64 = self
            .lock()?
            .query_row("SELECT COUNT(*) FROM vocabulary", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
