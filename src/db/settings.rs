//! Settings collection: plain key/value rows.

use crate::errors::AppResult;
use crate::models::Setting;
use rusqlite::{Connection, OptionalExtension, params};

pub fn get(conn: &Connection, key: &str) -> AppResult<Option<Setting>> {
    let found = conn
        .query_row(
            "SELECT key, value FROM settings WHERE key = ?1",
            [key],
            |row| {
                Ok(Setting {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(found)
}

/// Insert or overwrite the value under `key`.
pub fn put(conn: &Connection, key: &str, value: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Remove the value under `key`. Returns whether a row existed.
pub fn delete(conn: &Connection, key: &str) -> AppResult<bool> {
    let changed = conn.execute("DELETE FROM settings WHERE key = ?1", [key])?;
    Ok(changed > 0)
}
