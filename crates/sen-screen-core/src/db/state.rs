//! Key-value state operations.

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{Database, DbResult};

impl Database {
    /// Read the raw value stored under a key.
    pub fn get_value(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM app_state WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    /// Write a single key.
    pub fn put_value(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO app_state (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Write several keys as a single transaction. Either all entries
    /// land or none do.
    pub fn put_values(&mut self, entries: &[(&str, &str)]) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                r#"
                INSERT INTO app_state (key, value, updated_at)
                VALUES (?1, ?2, datetime('now'))
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')
                "#,
                params![key, value],
            )?;
        }
        tx.commit()?;
        debug!(keys = entries.len(), "committed state write");
        Ok(())
    }

    /// Load a collection stored as a JSON array under `key`. A missing
    /// key is an empty collection, not an error.
    pub fn load_collection<T: DeserializeOwned>(&self, key: &str) -> DbResult<Vec<T>> {
        match self.get_value(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist two collections under their keys in one transaction.
    pub fn save_collections<P, A>(
        &mut self,
        patients_key: &str,
        patients: &[P],
        assessments_key: &str,
        assessments: &[A],
    ) -> DbResult<()>
    where
        P: Serialize,
        A: Serialize,
    {
        let patients_json = serde_json::to_string(patients)?;
        let assessments_json = serde_json::to_string(assessments)?;
        self.put_values(&[
            (patients_key, &patients_json),
            (assessments_key, &assessments_json),
        ])
    }
}
