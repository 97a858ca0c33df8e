//! Member collection queries. Deleting here does NOT cascade; the cascade
//! over attendances belongs to core::members, inside one transaction.

use crate::errors::{AppError, AppResult};
use crate::models::Member;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Member> {
    Ok(Member {
        id: row.get("id")?,
        external_id: row.get("external_id")?,
        vorname: row.get("vorname")?,
        nachname: row.get("nachname")?,
    })
}

/// Insert a new member and return the assigned id.
pub fn insert(
    conn: &Connection,
    external_id: Option<&str>,
    vorname: &str,
    nachname: &str,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO members (external_id, vorname, nachname) VALUES (?1, ?2, ?3)",
        params![external_id, vorname, nachname],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an existing member in place (identity unchanged).
pub fn update(
    conn: &Connection,
    id: i64,
    external_id: Option<&str>,
    vorname: &str,
    nachname: &str,
) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE members SET external_id = ?1, vorname = ?2, nachname = ?3 WHERE id = ?4",
        params![external_id, vorname, nachname, id],
    )?;
    if changed == 0 {
        return Err(AppError::MemberNotFound(id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Member> {
    conn.query_row(
        "SELECT id, external_id, vorname, nachname FROM members WHERE id = ?1",
        [id],
        map_row,
    )
    .optional()?
    .ok_or(AppError::MemberNotFound(id))
}

pub fn find_by_external_id(conn: &Connection, external_id: &str) -> AppResult<Option<Member>> {
    let found = conn
        .query_row(
            "SELECT id, external_id, vorname, nachname FROM members WHERE external_id = ?1",
            [external_id],
            map_row,
        )
        .optional()?;
    Ok(found)
}

/// List members sorted by surname, then first name. `search` applies the
/// case-insensitive substring filter over both name fields.
pub fn list(conn: &Connection, search: Option<&str>) -> AppResult<Vec<Member>> {
    let mut out = Vec::new();

    match search {
        None => {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, vorname, nachname FROM members
                 ORDER BY nachname ASC, vorname ASC",
            )?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        Some(term) => {
            let mut stmt = conn.prepare(
                "SELECT id, external_id, vorname, nachname FROM members
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

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM members", [], |row| row.get(0))
}
