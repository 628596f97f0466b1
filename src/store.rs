//! Key-value draft store backed by `SQLite`
//!
//! Mirrors the browser's local storage: string keys, string values. Drafts
//! live under [`DRAFT_KEY`] as a JSON-encoded [`DraftSnapshot`].

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

use crate::models::DraftSnapshot;
use crate::paths;

/// Storage key of the saved draft
pub const DRAFT_KEY: &str = "linkerlab_draft";

/// Key-value store connection wrapper
pub struct DraftStore {
    conn: Connection,
}

impl DraftStore {
    /// Open or create the store at the default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_path(&path)
    }

    /// Open or create the store at a specific path
    pub fn open_path(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create data directory")?;
        }

        let conn = Connection::open(path).context("Failed to open draft store")?;

        let store = Self { conn };
        store.init()?;

        Ok(store)
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory store")?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Get the default store path
    pub fn default_path() -> Result<PathBuf> {
        paths::store_path()
    }

    /// Initialize the schema
    fn init(&self) -> Result<()> {
        self.conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    // ==================== Raw key-value ====================

    /// Store a value, replacing any previous one
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Read a value
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Delete a value; returns whether it existed
    pub fn remove_item(&self, key: &str) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(count > 0)
    }

    // ==================== Drafts ====================

    /// Persist a draft under [`DRAFT_KEY`]
    pub fn save_draft(&self, draft: &DraftSnapshot) -> Result<()> {
        let json = draft.to_json().context("Failed to encode draft")?;
        self.set_item(DRAFT_KEY, &json)?;
        tracing::info!(
            "Saved draft ({} chars, {} image(s), platforms: {})",
            draft.content.chars().count(),
            draft.images.len(),
            draft.platforms_str()
        );
        Ok(())
    }

    /// Load the saved draft, if any
    pub fn load_draft(&self) -> Result<Option<DraftSnapshot>> {
        let Some(json) = self.get_item(DRAFT_KEY)? else {
            return Ok(None);
        };
        let draft = DraftSnapshot::from_json(&json).context("Failed to decode stored draft")?;
        Ok(Some(draft))
    }

    /// Delete the saved draft
    pub fn clear_draft(&self) -> Result<bool> {
        self.remove_item(DRAFT_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::CompositionSession;
    use crate::models::{ImageAttachment, Platform};
    use tempfile::tempdir;

    #[test]
    fn test_store_init() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("test.sqlite");
        let _store = DraftStore::open_path(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_item_crud() {
        let store = DraftStore::open_in_memory().unwrap();

        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "one").unwrap();
        store.set_item("k", "two").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("two"));

        assert!(store.remove_item("k").unwrap());
        assert!(!store.remove_item("k").unwrap());
        assert_eq!(store.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_draft_roundtrip_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.sqlite");

        let mut session = CompositionSession::new();
        session.toggle_platform(Platform::Instagram, true);
        session.toggle_platform(Platform::Blogger, true);
        session.set_text("Saved for later");
        session.attach(ImageAttachment::new("a.png", "image/png", "data:image/png;base64,AA"));
        session.attach(ImageAttachment::new("b.png", "image/png", "data:image/png;base64,BB"));
        let snapshot = session.build_draft_snapshot();

        DraftStore::open_path(&path).unwrap().save_draft(&snapshot).unwrap();

        let loaded = DraftStore::open_path(&path)
            .unwrap()
            .load_draft()
            .unwrap()
            .unwrap();
        assert_eq!(loaded.content, "Saved for later");
        assert_eq!(loaded.platforms, vec![Platform::Instagram, Platform::Blogger]);
        assert_eq!(
            loaded.images,
            vec![
                "data:image/png;base64,AA".to_string(),
                "data:image/png;base64,BB".to_string()
            ]
        );
    }

    #[test]
    fn test_stored_value_is_plain_json() {
        let store = DraftStore::open_in_memory().unwrap();
        let session = CompositionSession::with_platforms([Platform::Etsy]);
        store.save_draft(&session.build_draft_snapshot()).unwrap();

        let raw = store.get_item(DRAFT_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["platforms"][0], "etsy");
        assert_eq!(value["content"], "");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_corrupt_draft_is_an_error() {
        let store = DraftStore::open_in_memory().unwrap();
        store.set_item(DRAFT_KEY, "{not json").unwrap();
        assert!(store.load_draft().is_err());
        assert!(store.clear_draft().unwrap());
        assert!(store.load_draft().unwrap().is_none());
    }
}
