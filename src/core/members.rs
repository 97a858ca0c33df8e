use crate::db::pool::DbPool;
use crate::db::{log, members};
use crate::errors::{AppError, AppResult};
use crate::models::Member;

/// Both name fields must be non-empty after trimming; nothing is written
/// otherwise.
pub(crate) fn validate_names(vorname: &str, nachname: &str) -> AppResult<()> {
    if vorname.trim().is_empty() || nachname.trim().is_empty() {
        return Err(AppError::Validation(
            "first and last name must both be given".into(),
        ));
    }
    Ok(())
}

pub struct MemberLogic;

impl MemberLogic {
    pub fn add(
        pool: &mut DbPool,
        external_id: Option<&str>,
        vorname: &str,
        nachname: &str,
    ) -> AppResult<i64> {
        validate_names(vorname, nachname)?;

        let id = members::insert(&pool.conn, external_id, vorname.trim(), nachname.trim())?;
        let _ = log::record(
            &pool.conn,
            "add",
            &format!("member:{id}"),
            &format!("Added member {} {}", vorname.trim(), nachname.trim()),
        );
        Ok(id)
    }

    /// Patch an existing member. Omitted fields keep their stored value.
    pub fn update(
        pool: &mut DbPool,
        id: i64,
        external_id: Option<&str>,
        vorname: Option<&str>,
        nachname: Option<&str>,
    ) -> AppResult<Member> {
        let existing = members::get(&pool.conn, id)?;

        let vorname = vorname.unwrap_or(&existing.vorname);
        let nachname = nachname.unwrap_or(&existing.nachname);
        validate_names(vorname, nachname)?;

        let external_id = match external_id {
            Some(e) => Some(e.to_string()),
            None => existing.external_id.clone(),
        };

        members::update(
            &pool.conn,
            id,
            external_id.as_deref(),
            vorname.trim(),
            nachname.trim(),
        )?;
        let _ = log::record(
            &pool.conn,
            "edit",
            &format!("member:{id}"),
            &format!("Updated member {} {}", vorname.trim(), nachname.trim()),
        );

        members::get(&pool.conn, id)
    }

    /// Delete a member and every attendance row referencing it, in one
    /// transaction. Returns the number of attendance rows removed.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<usize> {
        let removed = {
            let tx = pool.conn.transaction()?;

            let removed = tx.execute("DELETE FROM attendances WHERE member_id = ?1", [id])?;
            let changed = tx.execute("DELETE FROM members WHERE id = ?1", [id])?;
            if changed == 0 {
                // tx dropped here → rollback, attendance rows stay
                return Err(AppError::MemberNotFound(id));
            }

            tx.commit()?;
            removed
        };

        let _ = log::record(
            &pool.conn,
            "del",
            &format!("member:{id}"),
            &format!("Deleted member and {removed} attendance row(s)"),
        );
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::{attendances, members, trainings};
    use crate::utils::date;
    use std::collections::BTreeSet;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn add_then_read_round_trips() {
        let mut pool = pool();
        let id = MemberLogic::add(&mut pool, Some("M1"), "Anna", "Adler").unwrap();

        let m = members::get(&pool.conn, id).unwrap();
        assert_eq!(m.vorname, "Anna");
        assert_eq!(m.nachname, "Adler");
        assert_eq!(m.external_id.as_deref(), Some("M1"));
    }

    #[test]
    fn blank_names_are_rejected_before_any_write() {
        let mut pool = pool();
        assert!(MemberLogic::add(&mut pool, None, " ", "Adler").is_err());
        assert!(MemberLogic::add(&mut pool, None, "Anna", "").is_err());
        assert_eq!(members::count(&pool.conn).unwrap(), 0);
    }

    #[test]
    fn delete_cascades_over_attendances() {
        let mut pool = pool();
        let member = MemberLogic::add(&mut pool, None, "Anna", "Adler").unwrap();
        let trainer =
            crate::db::trainers::insert(&pool.conn, None, "Tom", "Trainer").unwrap();
        let training = trainings::insert(
            &pool.conn,
            &trainings::TrainingData {
                external_id: None,
                datum: date::parse_datum("01.03.2024").unwrap(),
                thema: "Falltraining".into(),
                trainer1_id: trainer,
                trainer2_id: None,
            },
        )
        .unwrap();

        let present: BTreeSet<i64> = [member].into_iter().collect();
        attendances::replace_for_training(&mut pool.conn, training, &present).unwrap();
        assert_eq!(attendances::count_for_member(&pool.conn, member).unwrap(), 1);

        let removed = MemberLogic::delete(&mut pool, member).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(attendances::count_for_member(&pool.conn, member).unwrap(), 0);
        assert!(members::get(&pool.conn, member).is_err());
    }

    #[test]
    fn delete_of_unknown_member_fails() {
        let mut pool = pool();
        assert!(matches!(
            MemberLogic::delete(&mut pool, 99),
            Err(AppError::MemberNotFound(99))
        ));
    }
}
