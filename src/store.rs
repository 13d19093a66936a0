// 💾 Key-Value Store - typed persistence over SQLite
// One table: kv(key TEXT PRIMARY KEY, value TEXT). Values are JSON documents.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::rc::Rc;

use crate::error::Result;

/// Typed key-value store backed by a single SQLite table.
///
/// Cloning is cheap and clones share the same underlying connection, so
/// every higher-level store can wrap its own handle while the wallet owns
/// a single database. Single-key writes are atomic (SQLite's guarantee);
/// there are no transactions across keys.
#[derive(Clone)]
pub struct KvStore {
    conn: Rc<Connection>,
}

impl KvStore {
    /// Open (or create) a file-backed store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::setup(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::setup(Connection::open_in_memory()?)
    }

    fn setup(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(KvStore {
            conn: Rc::new(conn),
        })
    }

    /// Serialize `value` under `key`, fully overwriting prior content.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, payload],
        )?;
        Ok(())
    }

    /// Load the value under `key`, or `default` when the key was never
    /// saved. A payload that no longer decodes also degrades to `default`
    /// rather than failing the caller; database-level read errors still
    /// propagate.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        match raw {
            None => Ok(default),
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(value) => Ok(value),
                Err(err) => {
                    tracing::warn!(key, %err, "undecodable payload, falling back to default");
                    Ok(default)
                }
            },
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        label: String,
        value: f64,
    }

    #[test]
    fn test_load_never_saved_key_returns_default() {
        let store = KvStore::open_in_memory().unwrap();

        assert_eq!(store.load("missing", 42.0).unwrap(), 42.0);
        assert_eq!(
            store.load("missing", "fallback".to_string()).unwrap(),
            "fallback"
        );
        assert_eq!(
            store.load::<Vec<Record>>("missing", Vec::new()).unwrap(),
            Vec::new()
        );
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = KvStore::open_in_memory().unwrap();

        store.save("number", &123.5).unwrap();
        assert_eq!(store.load("number", 0.0).unwrap(), 123.5);

        store.save("text", &"hola".to_string()).unwrap();
        assert_eq!(store.load("text", String::new()).unwrap(), "hola");

        let records = vec![
            Record {
                label: "a".to_string(),
                value: 1.0,
            },
            Record {
                label: "b".to_string(),
                value: 2.0,
            },
        ];
        store.save("records", &records).unwrap();
        assert_eq!(store.load("records", Vec::new()).unwrap(), records);
    }

    #[test]
    fn test_save_fully_overwrites() {
        let store = KvStore::open_in_memory().unwrap();

        store.save("key", &vec![1, 2, 3]).unwrap();
        store.save("key", &vec![9]).unwrap();

        assert_eq!(store.load::<Vec<i64>>("key", Vec::new()).unwrap(), vec![9]);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = KvStore::open_in_memory().unwrap();

        store.save("a", &1.0).unwrap();
        store.save("b", &2.0).unwrap();
        store.save("a", &3.0).unwrap();

        assert_eq!(store.load("a", 0.0).unwrap(), 3.0);
        assert_eq!(store.load("b", 0.0).unwrap(), 2.0);
    }

    #[test]
    fn test_undecodable_payload_degrades_to_default() {
        let store = KvStore::open_in_memory().unwrap();

        store
            .conn
            .execute(
                "INSERT INTO kv (key, value) VALUES ('broken', '{not json')",
                [],
            )
            .unwrap();

        assert_eq!(store.load("broken", 7.0).unwrap(), 7.0);

        // Wrong shape fails the same soft way as garbage
        store.save("shape", &"a string").unwrap();
        assert_eq!(
            store.load::<Vec<Record>>("shape", Vec::new()).unwrap(),
            Vec::new()
        );
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");

        {
            let store = KvStore::open(&path).unwrap();
            store.save("kept", &"still here".to_string()).unwrap();
        }

        let store = KvStore::open(&path).unwrap();
        assert_eq!(store.load("kept", String::new()).unwrap(), "still here");
    }

    #[test]
    fn test_cloned_handles_share_the_store() {
        let store = KvStore::open_in_memory().unwrap();
        let handle = store.clone();

        handle.save("shared", &5.0).unwrap();
        assert_eq!(store.load("shared", 0.0).unwrap(), 5.0);
    }
}
