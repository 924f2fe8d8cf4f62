//! Basic database query operations

use super::{models::StoredValue, schema::PickDatabase};
use anyhow::Result;
use rusqlite::{params, OptionalExtension, Row};
use std::time::{SystemTime, UNIX_EPOCH};

impl PickDatabase {
    /// Get the raw value stored under `key`
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace the value stored under `key`
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at)
             VALUES (?, ?, ?)",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Remove `key`, returning whether a row was deleted
    pub fn remove_value(&mut self, key: &str) -> Result<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
        Ok(rows_affected > 0)
    }

    /// All stored entries ordered by key
    pub fn list_values(&self) -> Result<Vec<StoredValue>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, value, updated_at FROM kv_store ORDER BY key")?;

        let rows = stmt.query_map([], |row| self.row_to_stored_value(row))?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }

    pub(crate) fn row_to_stored_value(&self, row: &Row) -> rusqlite::Result<StoredValue> {
        Ok(StoredValue {
            key: row.get(0)?,
            value: row.get(1)?,
            updated_at: row.get::<_, i64>(2)? as u64,
        })
    }
}
