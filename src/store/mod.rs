//! Per-tab deep link storage
//!
//! Links are stored under `url{tab_id}` and overwritten by the next
//! successful lookup for the same tab.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

const DB_FILE: &str = "links.db";

type Result<T> = std::result::Result<T, StoreError>;

/// Storage key for a tab's link
pub fn link_key(tab_id: u64) -> String {
    format!("url{}", tab_id)
}

/// Key-value store for deep links
pub trait LinkStore: Send + Sync {
    fn put(&self, key: &str, url: &str) -> Result<()>;

    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Returns whether an entry was removed
    fn remove(&self, key: &str) -> Result<bool>;

    fn count(&self) -> Result<usize>;
}

/// SQLite-backed link store
pub struct SqliteLinkStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteLinkStore {
    /// Open or create the store at the default data location
    pub fn open() -> Result<Self> {
        Self::open_at(&Self::data_dir()?)
    }

    /// Get the data directory path (~/.local/share/editlink on Linux)
    pub fn data_dir() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(base.join("editlink"))
    }

    /// Open or create the store inside `dir`
    pub fn open_at(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .map_err(|e| StoreError::Io(format!("Failed to create store dir: {}", e)))?;

        let path = dir.join(DB_FILE);
        let conn = Connection::open(&path)?;

        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Link store schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            conn.execute_batch("DROP TABLE IF EXISTS links;")?;
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                link_key TEXT PRIMARY KEY NOT NULL,
                url TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LinkStore for SqliteLinkStore {
    fn put(&self, key: &str, url: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO links (link_key, url, updated_at) VALUES (?1, ?2, ?3)",
            params![key, url, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let url: Option<String> = self
            .conn()
            .query_row(
                "SELECT url FROM links WHERE link_key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(url)
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let deleted = self
            .conn()
            .execute("DELETE FROM links WHERE link_key = ?1", [key])?;
        Ok(deleted > 0)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM links", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}
