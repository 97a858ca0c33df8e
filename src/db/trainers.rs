//! Trainer collection queries.

use crate::errors::{AppError, AppResult};
use crate::models::Trainer;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Trainer> {
    Ok(Trainer {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        vorname: row.get("vorname")?,
        nachname: row.get("nachname")?,
    })
}

pub fn insert(
    conn: &Connection,
    external_id: Option<&str>,
    vorname: &str,
    nachname: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO trainers (external_id, vorname, nachname) VALUES (?1, ?2, ?3)",
        params![external_id, vorname, nachname],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    external_id: Option<&str>,
    vorname: &str,
    nachname: &str,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE trainers SET external_id = ?1, vorname = ?2, nachname = ?3 WHERE id = ?4",
        params![external_id, vorname, nachname, id],
    )?;
    if changed == 0 {
        return Err(AppError::TrainerNotFound(id));
    }
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM trainers WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::TrainerNotFound(id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Trainer> {
    conn.query_row(
        "SELECT id, external_id, vorname, nachname FROM trainers WHERE id = ?1",
        [id],
        map_row,
    )
    .optional()?
    .ok_or(AppError::TrainerNotFound(id))
}

pub fn find_by_external_id(conn: &Connection, external_id: &str) -> AppResult<Option<Trainer>> {
    let found = conn
        .query_row(
            "SELECT id, external_id, vorname, nachname FROM trainers WHERE external_id = ?1",
            [external_id],
            map_row,
        )
        .optional()?;
    Ok(found)
}

pub fn list(conn: &Connection, search: Option<&str>) -> AppResult<Vec<Trainer>> {
    let mut out = Vec::new();

    match search {
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, vorname, nachname FROM trainers
                 ORDER BY nachname ASC, vorname ASC",
            )?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(term) => {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, vorname, nachname FROM trainers
                 WHERE instr(lower(vorname), lower(?1)) > 0
                    OR instr(lower(nachname), lower(?1)) > 0
                 ORDER BY nachname ASC, vorname ASC",
            )?;
            let rows = stmt.query_map([term], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

/// How many trainings reference this trainer in either slot.
/// The delete guard refuses while this is non-zero.
pub fn reference_count(conn: &Connection, trainer_id: i64) -> Result<usize> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM trainings WHERE trainer1_id = ?1 OR trainer2_id = ?1",
        [trainer_id],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM trainers", [], |row| row.get(0))
}
