//! Attendance collection queries, including the save transaction that flips
//! a training from open to completed.

use crate::errors::{AppError, AppResult};
use crate::models::Attendance;
use rusqlite::{Connection, Result, Row};
use std::collections::BTreeSet;

fn map_row(row: &Row) -> Result<Attendance> {
    Ok(Attendance {
        training_id: row.get("training_id")?,
        member_id: row.get("member_id")?,
    })
}

/// Present members of one session.
pub fn member_ids_for_training(conn: &Connection, training_id: i64) -> AppResult<BTreeSet<i64>> {
    let mut stmt =
        conn.prepare("SELECT member_id FROM attendances WHERE training_id = ?1")?;
    let rows = stmt.query_map([training_id], |row| row.get::<_, i64>(0))?;

    let mut out = BTreeSet::new();
    for r in rows {
        out.insert(r?);
    }
    Ok(out)
}

/// Attendance rows for any of the given trainings, in (training_id,
/// member_id) order.
pub fn for_trainings(conn: &Connection, training_ids: &[i64]) -> AppResult<Vec<Attendance>> {
    if training_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; training_ids.len()].join(",");
    let sql = format!(
        "SELECT training_id, member_id FROM attendances
         WHERE training_id IN ({})
         ORDER BY training_id ASC, member_id ASC",
        placeholders
    );

    let params: Vec<&dyn rusqlite::ToSql> = training_ids
        .iter()
        .map(|id| id as &dyn rusqlite::ToSql)
        .collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_for_member(conn: &Connection, member_id: i64) -> Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM attendances WHERE member_id = ?1",
        [member_id],
        |row| row.get(0),
    )
}

/// Replace the attendance of one session wholesale and mark it completed.
///
/// One transaction: delete the session's rows, insert one row per present
/// member, set `completed = 1`. All three effects commit together or none
/// do; a failed save leaves the prior rows intact.
pub fn replace_for_training(
    conn: &mut Connection,
    training_id: i64,
    present: &BTreeSet<i64>,
) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute(
        "DELETE FROM attendances WHERE training_id = ?1",
        [training_id],
    )?;

    {
        let mut stmt =
            tx.prepare("INSERT INTO attendances (training_id, member_id) VALUES (?1, ?2)")?;
        for member_id in present {
            stmt.execute(rusqlite::params![training_id, member_id])?;
        }
    }

    let changed = tx.execute(
        "UPDATE trainings SET completed = 1 WHERE id = ?1",
        [training_id],
    )?;
    if changed == 0 {
        // tx dropped here → rollback
        return Err(AppError::TrainingNotFound(training_id));
    }

    tx.commit()?;
    Ok(())
}

pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM attendances", [], |row| row.get(0))
}
