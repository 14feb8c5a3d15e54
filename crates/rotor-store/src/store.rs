use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use tracing::warn;

use crate::db::init_db;
use crate::error::Result;

/// Thread-safe handle to the durable key-value store.
///
/// Wraps a single SQLite connection in a `Mutex`; clones share the same
/// connection. Reads with a missing or unparseable value fall back to the
/// caller-supplied default, so a first run needs no seeding pass.
#[derive(Clone)]
pub struct Store {
    db: Arc<Mutex<Connection>>,
}

impl Store {
    /// Wrap a connection, initialising the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Arc::new(Mutex::new(conn)),
        })
    }

    /// Read a raw value, `None` when the key has never been written.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().unwrap();
        match db.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write one key. Each write is independently durable.
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().unwrap();
        db.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn get_i64(&self, key: &str, default: i64) -> Result<i64> {
        Ok(self
            .get_raw(key)?
            .and_then(|v| parse_or_warn(key, &v))
            .unwrap_or(default))
    }

    pub fn set_i64(&self, key: &str, value: i64) -> Result<()> {
        self.set_raw(key, &value.to_string())
    }

    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        Ok(self
            .get_raw(key)?
            .and_then(|v| parse_or_warn(key, &v))
            .unwrap_or(default))
    }

    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_raw(key, if value { "true" } else { "false" })
    }

    pub fn get_text(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.get_raw(key)?.unwrap_or_else(|| default.to_string()))
    }

    pub fn set_text(&self, key: &str, value: &str) -> Result<()> {
        self.set_raw(key, value)
    }
}

/// A value that fails to parse is treated as absent.
fn parse_or_warn<T: std::str::FromStr>(key: &str, value: &str) -> Option<T> {
    match value.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(%key, %value, "unparseable stored value — using default");
            None
        }
    }
}
