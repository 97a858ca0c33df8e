//! Training collection queries.
//!
//! `datum` is stored as TEXT in the canonical `DD.MM.YYYY` form. Queries
//! never ORDER BY that column: the string sorts lexically, not by calendar
//! date. Callers load and sort on the parsed `NaiveDate` instead.

use crate::errors::{AppError, AppResult};
use crate::models::Training;
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Field set for insert/update; the surrogate id is assigned by the store.
#[derive(Debug, Clone)]
pub struct TrainingData {
    pub external_id: Option<String>,
    pub datum: NaiveDate,
    pub thema: String,
    pub trainer1_id: i64,
    pub trainer2_id: Option<i64>,
}

pub fn map_row(row: &Row) -> Result<Training> {
    let datum_str: String = row.get("datum")?;

    let datum = date::parse_datum(&datum_str).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(datum_str.clone())),
        )
    })?;

    Ok(Training {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        datum,
        thema: row.get("thema")?,
        trainer1_id: row.get("trainer1_id")?,
        trainer2_id: row.get("trainer2_id")?,
        completed: row.get::<_, i64>("completed")? != 0,
    })
}

/// Insert a new training (completed = false) and return the assigned id.
pub fn insert(conn: &Connection, data: &TrainingData) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO trainings (external_id, datum, thema, trainer1_id, trainer2_id, completed)
         VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        params![
            data.external_id,
            date::format_datum(&data.datum),
            data.thema,
            data.trainer1_id,
            data.trainer2_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an existing training in place. The `completed` flag is untouched;
/// only the attendance save transaction flips it.
pub fn update(conn: &Connection, id: i64, data: &TrainingData) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE trainings
         SET external_id = ?1, datum = ?2, thema = ?3, trainer1_id = ?4, trainer2_id = ?5
         WHERE id = ?6",
        params![
            data.external_id,
            date::format_datum(&data.datum),
            data.thema,
            data.trainer1_id,
            data.trainer2_id,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::TrainingNotFound(id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Training> {
    conn.query_row(
        "SELECT id, external_id, datum, thema, trainer1_id, trainer2_id, completed
         FROM trainings WHERE id = ?1",
        [id],
        map_row,
    )
    .optional()?
    .ok_or(AppError::TrainingNotFound(id))
}

pub fn find_by_external_id(conn: &Connection, external_id: &str) -> AppResult<Option<Training>> {
    let found = conn
        .query_row(
            "SELECT id, external_id, datum, thema, trainer1_id, trainer2_id, completed
             FROM trainings WHERE external_id = ?1",
            [external_id],
            map_row,
        )
        .optional()?;
    Ok(found)
}

pub fn load_all(conn: &Connection) -> AppResult<Vec<Training>> {
    let mut stmt = conn.prepare(
        "SELECT id, external_id, datum, thema, trainer1_id, trainer2_id, completed
         FROM trainings",
    )?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM trainings", [], |row| row.get(0))
}
